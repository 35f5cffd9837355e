// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Snapgraph-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Snapgraph and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Snapgraph: progress graphs of student code snapshots, with cross-graph comparison.
//!
//! The dashboard plots one CSV series per panel. Up to two points can be selected across all
//! panels; two selected points are compared side by side and scored by an external AST
//! similarity service.

pub mod api;
pub mod compare;
pub mod config;
pub mod format;
pub mod model;
pub mod selection;
pub mod similarity;
pub mod store;
pub mod tui;
