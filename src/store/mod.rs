// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Snapgraph-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Snapgraph and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Content-root access.
//!
//! The content root holds `<language>/<assignment>/<student>.csv`. Listing an absent directory is
//! a valid empty result, not an error: an assignment with no graphs yet is normal.

pub mod content_root;

pub use content_root::{sanitize_dir, AssignmentEntry, ContentRoot, Language, StoreError};

use crate::model::{AssignmentId, Series, SeriesId};

/// Source of series data for the dashboard.
///
/// Loads are blocking and are run off the UI thread.
pub trait SeriesLoader: Send + Sync {
    fn list_assignments(&self) -> Result<Vec<AssignmentEntry>, StoreError>;
    fn series_ids(&self, assignment: &AssignmentId) -> Result<Vec<SeriesId>, StoreError>;
    fn load(&self, id: &SeriesId) -> Result<Series, StoreError>;
}

impl SeriesLoader for ContentRoot {
    fn list_assignments(&self) -> Result<Vec<AssignmentEntry>, StoreError> {
        ContentRoot::list_assignments(self)
    }

    fn series_ids(&self, assignment: &AssignmentId) -> Result<Vec<SeriesId>, StoreError> {
        ContentRoot::series_ids(self, assignment)
    }

    fn load(&self, id: &SeriesId) -> Result<Series, StoreError> {
        self.load_series(id)
    }
}
