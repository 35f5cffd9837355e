// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Snapgraph-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Snapgraph and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::BTreeMap;

use crate::model::{
    MetadataValue, Series, SeriesId, SnapshotRecord, CODE_COLUMN, TIMESTAMP_COLUMN,
};

/// Column some exports carry; the row position is authoritative instead.
const SNAPSHOT_COLUMN: &str = "snapshot";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CsvParseError {
    #[error("expected a header row")]
    MissingHeader,
    #[error("malformed CSV on line {line}: {message}")]
    Malformed { line: u64, message: String },
}

impl CsvParseError {
    fn from_csv(err: &csv::Error) -> Self {
        let line = err.position().map(csv::Position::line).unwrap_or(0);
        Self::Malformed { line, message: err.to_string() }
    }
}

/// Parses a progress CSV into an ordered series.
///
/// Rows whose cells are all empty are skipped, so trailing blank lines do not become points.
/// Ordinals are assigned from row position, starting at 1.
pub fn parse_series(id: SeriesId, text: &str) -> Result<Series, CsvParseError> {
    let mut reader =
        csv::ReaderBuilder::new().has_headers(true).flexible(true).from_reader(text.as_bytes());

    let headers = reader.headers().map_err(|err| CsvParseError::from_csv(&err))?.clone();
    if headers.iter().all(|header| header.trim().is_empty()) {
        return Err(CsvParseError::MissingHeader);
    }
    let headers = headers.iter().map(|header| header.trim().to_owned()).collect::<Vec<_>>();

    let mut records = Vec::new();
    for row in reader.records() {
        let row = row.map_err(|err| CsvParseError::from_csv(&err))?;
        if row.iter().all(|cell| cell.trim().is_empty()) {
            continue;
        }

        let ordinal = records.len() + 1;
        let mut timestamp = String::new();
        let mut code = None;
        let mut metrics = BTreeMap::new();
        for (idx, header) in headers.iter().enumerate() {
            let cell = row.get(idx).unwrap_or("");
            match header.as_str() {
                "" | SNAPSHOT_COLUMN => {}
                TIMESTAMP_COLUMN => timestamp = cell.trim().to_owned(),
                CODE_COLUMN => code = (!cell.trim().is_empty()).then(|| cell.to_owned()),
                _ => {
                    metrics.insert(header.clone(), MetadataValue::from_cell(cell));
                }
            }
        }
        records.push(SnapshotRecord::new(ordinal, timestamp, code, metrics));
    }

    Ok(Series::new(id, records))
}
