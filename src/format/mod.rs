// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Snapgraph-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Snapgraph and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Series file formats.
//!
//! Progress series are exported as CSV with a header row; cells are typed dynamically.

pub mod csv;

pub use self::csv::{parse_series, CsvParseError};
