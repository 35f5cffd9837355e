// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Snapgraph-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Snapgraph and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Cross-series comparison of the two selected snapshots.
//!
//! Everything here is derived from the comparison pair; the only state is the similarity score
//! held by [`ComparisonTracker`].

pub mod detail;
pub mod elapsed;
pub mod tracker;

pub use detail::{
    diff_lines, format_percent, metadata_fields, Comparison, DiffLine, DiffTag, COMPARISON_FIELDS,
};
pub use elapsed::{format_elapsed, format_seconds, parse_timestamp_millis};
pub use tracker::{ComparisonTracker, ScoreState, ScoreTicket};
