// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Snapgraph-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Snapgraph and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Serialize, Serializer};

/// Column holding the ISO-8601 capture time of a snapshot.
pub const TIMESTAMP_COLUMN: &str = "timestamp";
/// Column holding the raw source code of a snapshot.
pub const CODE_COLUMN: &str = "code";
/// Ground-truth progress in `[0, 1]`.
pub const REAL_PROGRESS_COLUMN: &str = "real_progress";
/// Regressor estimate; older exports use the long name.
pub const ESTIMATED_PROGRESS_COLUMNS: [&str; 2] = ["reg_est_prog", "reg_est_progress"];

/// Columns that are plotted or shown separately and therefore hidden from generic metadata
/// listings.
pub const HIDDEN_METADATA_COLUMNS: [&str; 5] =
    ["normalized_code", "dtw_est_progress", "reg_est_progress", "reg_est_prog", "real_progress"];

/// A dynamically typed CSV cell.
#[derive(Debug, Clone, PartialEq)]
pub enum MetadataValue {
    Null,
    Bool(bool),
    Number(f64),
    Text(String),
}

impl MetadataValue {
    /// Types a raw cell: empty -> null, `true`/`false` -> bool, finite number -> number.
    pub fn from_cell(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Self::Null;
        }
        if trimmed.eq_ignore_ascii_case("true") {
            return Self::Bool(true);
        }
        if trimmed.eq_ignore_ascii_case("false") {
            return Self::Bool(false);
        }
        match trimmed.parse::<f64>() {
            Ok(number) if number.is_finite() => Self::Number(number),
            _ => Self::Text(raw.to_owned()),
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(number) => Some(*number),
            Self::Bool(flag) => Some(if *flag { 1.0 } else { 0.0 }),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Whether the value counts as "nothing to show" in detail views.
    pub fn is_falsy(&self) -> bool {
        match self {
            Self::Null => true,
            Self::Bool(flag) => !flag,
            Self::Number(number) => *number == 0.0 || number.is_nan(),
            Self::Text(text) => text.is_empty(),
        }
    }
}

impl fmt::Display for MetadataValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("null"),
            Self::Bool(flag) => write!(f, "{flag}"),
            Self::Number(number) => write!(f, "{number}"),
            Self::Text(text) => f.write_str(text),
        }
    }
}

impl Serialize for MetadataValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Null => serializer.serialize_none(),
            Self::Bool(flag) => serializer.serialize_bool(*flag),
            Self::Number(number) => serializer.serialize_f64(*number),
            Self::Text(text) => serializer.serialize_str(text),
        }
    }
}

/// One row of a progress series.
///
/// Records are immutable once loaded. Selection state holds them behind `Arc` and never copies
/// them.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SnapshotRecord {
    #[serde(rename = "snapshot")]
    ordinal: usize,
    timestamp: String,
    code: Option<String>,
    #[serde(flatten)]
    metrics: BTreeMap<String, MetadataValue>,
}

impl SnapshotRecord {
    pub fn new(
        ordinal: usize,
        timestamp: impl Into<String>,
        code: Option<String>,
        metrics: BTreeMap<String, MetadataValue>,
    ) -> Self {
        Self { ordinal, timestamp: timestamp.into(), code, metrics }
    }

    /// 1-based position within the series.
    pub fn ordinal(&self) -> usize {
        self.ordinal
    }

    pub fn timestamp(&self) -> &str {
        &self.timestamp
    }

    /// Source code, `None` when the cell was empty or the column is missing.
    pub fn code(&self) -> Option<&str> {
        self.code.as_deref()
    }

    pub fn metrics(&self) -> &BTreeMap<String, MetadataValue> {
        &self.metrics
    }

    pub fn metric(&self, column: &str) -> Option<&MetadataValue> {
        self.metrics.get(column)
    }

    pub fn real_progress(&self) -> Option<f64> {
        self.metric(REAL_PROGRESS_COLUMN).and_then(MetadataValue::as_f64)
    }

    pub fn estimated_progress(&self) -> Option<f64> {
        ESTIMATED_PROGRESS_COLUMNS
            .iter()
            .find_map(|column| self.metric(column).and_then(MetadataValue::as_f64))
    }

    /// Metadata value for a display field, treating `snapshot`/`timestamp` as columns.
    pub fn field(&self, key: &str) -> Option<MetadataValue> {
        match key {
            "snapshot" => Some(MetadataValue::Number(self.ordinal as f64)),
            TIMESTAMP_COLUMN => Some(MetadataValue::Text(self.timestamp.clone())),
            _ => self.metric(key).cloned(),
        }
    }

    /// Opaque metadata columns, excluding code and plotted progress values.
    pub fn extra_metadata(&self) -> impl Iterator<Item = (&str, &MetadataValue)> {
        self.metrics
            .iter()
            .filter(|(key, _)| !HIDDEN_METADATA_COLUMNS.contains(&key.as_str()))
            .map(|(key, value)| (key.as_str(), value))
    }
}
