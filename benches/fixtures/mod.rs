// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Snapgraph-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Snapgraph and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

#![allow(dead_code)]

// Shared deterministic benchmark fixtures (no RNG).

use snapgraph::format::parse_series;
use snapgraph::model::{Series, SeriesId};

#[derive(Debug, Clone, Copy)]
pub enum Case {
    Small,
    Medium,
    LargeLongCode,
}

impl Case {
    pub fn id(self) -> &'static str {
        match self {
            Self::Small => "small",
            Self::Medium => "medium",
            Self::LargeLongCode => "large_long_code",
        }
    }

    fn shape(self) -> (usize, usize) {
        match self {
            Self::Small => (40, 6),
            Self::Medium => (400, 20),
            Self::LargeLongCode => (2_000, 120),
        }
    }
}

pub fn series_id(name: &str) -> SeriesId {
    SeriesId::new(format!("Python/A1/{name}.csv")).expect("series id")
}

/// CSV text with `rows` snapshots whose code grows by one line every few rows.
pub fn csv_text(case: Case) -> String {
    let (rows, code_lines) = case.shape();
    let mut out = String::from(
        "snapshot,timestamp,code,reg_est_prog,real_progress,action,correct,tokens\n",
    );
    for row in 1..=rows {
        let lines = 1 + (row * code_lines) / rows;
        let code = (0..lines)
            .map(|line| format!("    total += {}", (line * 7 + row) % 13))
            .collect::<Vec<_>>()
            .join("\n");
        let seconds = row * 17;
        out.push_str(&format!(
            "{row},2024-03-01T{:02}:{:02}:{:02},\"def solve():\n{code}\",{:.3},{:.3},{},{},{}\n",
            8 + seconds / 3600,
            (seconds / 60) % 60,
            seconds % 60,
            row as f64 / rows as f64 * 0.9,
            row as f64 / rows as f64,
            if row % 5 == 0 { "submit" } else { "run" },
            row == rows,
            lines * 6,
        ));
    }
    out
}

pub fn series(case: Case, name: &str) -> Series {
    parse_series(series_id(name), &csv_text(case)).expect("fixture csv parses")
}
