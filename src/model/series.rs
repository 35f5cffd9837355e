// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Snapgraph-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Snapgraph and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::sync::Arc;

use super::ids::SeriesId;
use super::snapshot::SnapshotRecord;

/// An ordered, loaded progress series.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    id: SeriesId,
    records: Vec<Arc<SnapshotRecord>>,
}

impl Series {
    /// Builds a series; records must already be ordered with ordinals `1..=len`.
    pub fn new(id: SeriesId, records: Vec<SnapshotRecord>) -> Self {
        debug_assert!(records.iter().enumerate().all(|(idx, record)| record.ordinal() == idx + 1));
        Self { id, records: records.into_iter().map(Arc::new).collect() }
    }

    pub fn id(&self) -> &SeriesId {
        &self.id
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[Arc<SnapshotRecord>] {
        &self.records
    }

    /// Record at a 1-based ordinal.
    pub fn record(&self, ordinal: usize) -> Option<&Arc<SnapshotRecord>> {
        ordinal.checked_sub(1).and_then(|idx| self.records.get(idx))
    }

    pub fn contains_ordinal(&self, ordinal: usize) -> bool {
        (1..=self.records.len()).contains(&ordinal)
    }
}
