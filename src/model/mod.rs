// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Snapgraph-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Snapgraph and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Core data model.
//!
//! A series is one CSV of snapshots; selection state refers to snapshots through
//! [`SelectedPoint`].

#[cfg(test)]
pub(crate) mod fixtures;
pub mod ids;
pub mod language;
pub mod point;
pub mod series;
pub mod snapshot;

pub use ids::{AssignmentId, Id, IdError, SeriesId};
pub use language::{Language, ParseLanguageError};
pub use point::{PointKey, SelectedPoint};
pub use series::Series;
pub use snapshot::{
    MetadataValue, SnapshotRecord, CODE_COLUMN, ESTIMATED_PROGRESS_COLUMNS,
    HIDDEN_METADATA_COLUMNS, REAL_PROGRESS_COLUMN, TIMESTAMP_COLUMN,
};
