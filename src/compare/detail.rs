// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Snapgraph-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Snapgraph and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use similar::{ChangeTag, TextDiff};

use crate::model::{SelectedPoint, SnapshotRecord};

use super::elapsed::format_elapsed;

/// Fields shown side by side for each compared snapshot: `(column, label)`.
pub const COMPARISON_FIELDS: [(&str, &str); 4] =
    [("snapshot", "Snapshot"), ("timestamp", "Timestamp"), ("action", "Action"), ("correct", "Correct")];

/// `0.87` -> `87.0%`
pub fn format_percent(score: f64) -> String {
    format!("{:.1}%", score * 100.0)
}

/// Labelled comparison fields; null, false, zero and empty values render as `-`.
pub fn metadata_fields(record: &SnapshotRecord) -> Vec<(&'static str, String)> {
    COMPARISON_FIELDS
        .iter()
        .map(|(key, label)| {
            let value = record
                .field(key)
                .filter(|value| !value.is_falsy())
                .map(|value| value.to_string())
                .unwrap_or_else(|| "-".to_owned());
            (*label, value)
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiffTag {
    Equal,
    Removed,
    Added,
}

impl DiffTag {
    pub fn sign(self) -> char {
        match self {
            Self::Equal => ' ',
            Self::Removed => '-',
            Self::Added => '+',
        }
    }
}

/// One line of a code diff, with its 1-based line number on each side it appears on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffLine {
    pub tag: DiffTag,
    pub old_line: Option<usize>,
    pub new_line: Option<usize>,
    pub text: String,
}

/// Full line diff of two code blobs (no context folding).
pub fn diff_lines(old: &str, new: &str) -> Vec<DiffLine> {
    let diff = TextDiff::from_lines(old, new);
    diff.iter_all_changes()
        .map(|change| {
            let tag = match change.tag() {
                ChangeTag::Equal => DiffTag::Equal,
                ChangeTag::Delete => DiffTag::Removed,
                ChangeTag::Insert => DiffTag::Added,
            };
            let text = change.value().trim_end_matches(['\n', '\r']).to_owned();
            DiffLine {
                tag,
                old_line: change.old_index().map(|index| index + 1),
                new_line: change.new_index().map(|index| index + 1),
                text,
            }
        })
        .collect()
}

/// Everything the comparison pane shows besides the score.
#[derive(Debug, Clone)]
pub struct Comparison {
    pub titles: [String; 2],
    pub fields: [Vec<(&'static str, String)>; 2],
    /// `None` when a timestamp could not be parsed.
    pub elapsed: Option<String>,
    pub diff: Vec<DiffLine>,
}

impl Comparison {
    pub fn between(first: &SelectedPoint, second: &SelectedPoint) -> Self {
        Self {
            titles: [first.title(), second.title()],
            fields: [metadata_fields(first.record()), metadata_fields(second.record())],
            elapsed: format_elapsed(first.record().timestamp(), second.record().timestamp()),
            diff: diff_lines(first.code().unwrap_or(""), second.code().unwrap_or("")),
        }
    }

    pub fn changed_lines(&self) -> usize {
        self.diff.iter().filter(|line| line.tag != DiffTag::Equal).count()
    }
}
