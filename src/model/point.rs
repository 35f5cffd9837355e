// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Snapgraph-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Snapgraph and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fmt;
use std::sync::Arc;

use super::ids::SeriesId;
use super::series::Series;
use super::snapshot::SnapshotRecord;

/// A reference to one snapshot of one series.
///
/// Two points are equal when they name the same series and the same ordinal; the record is
/// shared, not copied.
#[derive(Debug, Clone)]
pub struct SelectedPoint {
    series: SeriesId,
    record: Arc<SnapshotRecord>,
}

impl SelectedPoint {
    pub fn new(series: SeriesId, record: Arc<SnapshotRecord>) -> Self {
        Self { series, record }
    }

    /// Point for a 1-based ordinal of a loaded series.
    pub fn in_series(series: &Series, ordinal: usize) -> Option<Self> {
        series.record(ordinal).map(|record| Self::new(series.id().clone(), record.clone()))
    }

    pub fn series(&self) -> &SeriesId {
        &self.series
    }

    pub fn record(&self) -> &SnapshotRecord {
        &self.record
    }

    pub fn ordinal(&self) -> usize {
        self.record.ordinal()
    }

    pub fn code(&self) -> Option<&str> {
        self.record.code()
    }

    pub fn key(&self) -> PointKey {
        PointKey { series: self.series.clone(), ordinal: self.ordinal() }
    }

    /// `alice - Snapshot #3`
    pub fn title(&self) -> String {
        format!("{} - Snapshot #{}", self.series.display_name(), self.ordinal())
    }
}

impl PartialEq for SelectedPoint {
    fn eq(&self, other: &Self) -> bool {
        self.series == other.series && self.ordinal() == other.ordinal()
    }
}

impl Eq for SelectedPoint {}

impl fmt::Display for SelectedPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.series, self.ordinal())
    }
}

/// Owned identity of a point, used to remember which pair a request was made for.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PointKey {
    pub series: SeriesId,
    pub ordinal: usize,
}
