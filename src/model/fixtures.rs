// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Snapgraph-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Snapgraph and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::BTreeMap;

use super::ids::SeriesId;
use super::point::SelectedPoint;
use super::series::Series;
use super::snapshot::{MetadataValue, SnapshotRecord};

pub(crate) fn sid(value: &str) -> SeriesId {
    SeriesId::new(value).expect("series id")
}

/// `len` snapshots one minute apart, each with code `print(<ordinal>)`.
pub(crate) fn series(path: &str, len: usize) -> Series {
    let records = (1..=len)
        .map(|ordinal| {
            let mut metrics = BTreeMap::new();
            let progress = ordinal as f64 / len.max(1) as f64;
            metrics.insert("real_progress".to_owned(), MetadataValue::Number(progress));
            metrics.insert("reg_est_prog".to_owned(), MetadataValue::Number(progress * 0.9));
            metrics.insert("action".to_owned(), MetadataValue::Text("run".to_owned()));
            metrics.insert("correct".to_owned(), MetadataValue::Bool(ordinal == len));
            SnapshotRecord::new(
                ordinal,
                format!("2024-03-01T10:{:02}:00Z", ordinal.min(59)),
                Some(format!("print({ordinal})")),
                metrics,
            )
        })
        .collect();
    Series::new(sid(path), records)
}

/// Series whose snapshot at `missing` has no code.
pub(crate) fn series_with_missing_code(path: &str, len: usize, missing: usize) -> Series {
    let base = series(path, len);
    let records = base
        .records()
        .iter()
        .map(|record| {
            let code = (record.ordinal() != missing).then(|| record.code().unwrap_or("").to_owned());
            SnapshotRecord::new(
                record.ordinal(),
                record.timestamp(),
                code,
                record.metrics().clone(),
            )
        })
        .collect();
    Series::new(sid(path), records)
}

pub(crate) fn point(series: &Series, ordinal: usize) -> SelectedPoint {
    SelectedPoint::in_series(series, ordinal).expect("ordinal in range")
}
