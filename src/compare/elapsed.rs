// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Snapgraph-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Snapgraph and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};

const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Parses a snapshot timestamp into milliseconds since the epoch.
///
/// Accepts RFC 3339, a naive date-time (taken as UTC) or a bare date.
pub fn parse_timestamp_millis(raw: &str) -> Option<i64> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.timestamp_millis());
    }
    for format in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(Utc.from_utc_datetime(&naive).timestamp_millis());
        }
    }
    let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()?;
    let midnight = date.and_hms_opt(0, 0, 0)?;
    Some(Utc.from_utc_datetime(&midnight).timestamp_millis())
}

/// Absolute time between two snapshots, largest units first.
///
/// `None` when either timestamp cannot be parsed.
pub fn format_elapsed(first: &str, second: &str) -> Option<String> {
    let first = parse_timestamp_millis(first)?;
    let second = parse_timestamp_millis(second)?;
    let seconds = first.abs_diff(second) / 1000;
    Some(format_seconds(seconds))
}

pub fn format_seconds(total: u64) -> String {
    let hours = total / 3600;
    let minutes = (total / 60) % 60;
    let seconds = total % 60;

    if hours > 0 {
        format!(
            "{}, {}, and {}",
            unit(hours, "hour"),
            unit(minutes, "minute"),
            unit(seconds, "second")
        )
    } else if total >= 60 {
        format!("{} and {}", unit(minutes, "minute"), unit(seconds, "second"))
    } else {
        unit(seconds, "second")
    }
}

/// Plural for every value but 1, so a zero reads "0 seconds" rather than "0 second".
fn unit(value: u64, name: &str) -> String {
    if value == 1 {
        format!("1 {name}")
    } else {
        format!("{value} {name}s")
    }
}
