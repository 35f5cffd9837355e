// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Snapgraph-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Snapgraph and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use crate::model::SeriesId;

/// Graph list of the current assignment with a cursor and an optional fuzzy filter.
#[derive(Debug, Clone, Default)]
pub(super) struct GraphPicker {
    entries: Vec<SeriesId>,
    filtered: Vec<usize>,
    cursor: usize,
    filter: String,
    editing: bool,
}

impl GraphPicker {
    pub(super) fn set_entries(&mut self, entries: Vec<SeriesId>) {
        self.entries = entries;
        self.filter.clear();
        self.editing = false;
        self.cursor = 0;
        self.refilter();
    }

    pub(super) fn entries(&self) -> &[SeriesId] {
        &self.entries
    }

    /// Entries that pass the filter, best match first.
    pub(super) fn visible_entries(&self) -> impl Iterator<Item = &SeriesId> + '_ {
        self.filtered.iter().filter_map(|idx| self.entries.get(*idx))
    }

    pub(super) fn visible_len(&self) -> usize {
        self.filtered.len()
    }

    pub(super) fn cursor(&self) -> usize {
        self.cursor
    }

    pub(super) fn cursor_entry(&self) -> Option<&SeriesId> {
        self.filtered.get(self.cursor).and_then(|idx| self.entries.get(*idx))
    }

    pub(super) fn move_cursor(&mut self, delta: isize) {
        if self.filtered.is_empty() {
            self.cursor = 0;
            return;
        }
        let last = self.filtered.len() - 1;
        self.cursor = self.cursor.saturating_add_signed(delta).min(last);
    }

    pub(super) fn filter(&self) -> &str {
        &self.filter
    }

    pub(super) fn is_editing(&self) -> bool {
        self.editing
    }

    pub(super) fn start_filter(&mut self) {
        self.editing = true;
    }

    /// Leaves filter editing; `keep == false` also drops the query.
    pub(super) fn finish_filter(&mut self, keep: bool) {
        self.editing = false;
        if !keep {
            self.filter.clear();
            self.refilter();
        }
    }

    pub(super) fn push_char(&mut self, ch: char) {
        self.filter.push(ch);
        self.refilter();
    }

    pub(super) fn pop_char(&mut self) {
        self.filter.pop();
        self.refilter();
    }

    fn refilter(&mut self) {
        self.filtered = ranked_entries(&self.entries, &self.filter);
        self.cursor = self.cursor.min(self.filtered.len().saturating_sub(1));
    }
}

/// Indices of `entries` matching `query`, best first. An empty query keeps every entry in order.
pub(super) fn ranked_entries(entries: &[SeriesId], query: &str) -> Vec<usize> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return (0..entries.len()).collect();
    }

    let mut scored = entries
        .iter()
        .enumerate()
        .filter_map(|(idx, id)| {
            let haystack = id.display_name().to_lowercase();
            fuzzy_score(&needle, &haystack).map(|score| (score, idx))
        })
        .collect::<Vec<_>>();
    scored.sort_by(|(score_a, idx_a), (score_b, idx_b)| {
        score_b.cmp(score_a).then_with(|| idx_a.cmp(idx_b))
    });
    scored.into_iter().map(|(_, idx)| idx).collect()
}

/// Subsequence match weighted by edit ratio; `None` when `needle` is not a subsequence.
fn fuzzy_score(needle: &str, haystack: &str) -> Option<i64> {
    let (first, span) = subsequence_span(needle, haystack)?;
    let ratio = rapidfuzz::fuzz::ratio(needle.chars(), haystack.chars());

    let mut score = (ratio * 1000.0).round() as i64;
    score -= span as i64;
    score -= (first as i64) / 4;
    if haystack.starts_with(needle) {
        score += 3000;
    } else if haystack.contains(needle) {
        score += 2000;
    }
    Some(score)
}

/// Char offset of the first matched char and the matched span length.
fn subsequence_span(needle: &str, haystack: &str) -> Option<(usize, usize)> {
    let mut needle_chars = needle.chars().peekable();
    let mut first = None;
    let mut last = 0;
    for (pos, ch) in haystack.chars().enumerate() {
        let Some(&want) = needle_chars.peek() else {
            break;
        };
        if ch == want {
            first.get_or_insert(pos);
            last = pos;
            needle_chars.next();
        }
    }
    if needle_chars.peek().is_some() {
        return None;
    }
    let first = first.unwrap_or(0);
    Some((first, last + 1 - first))
}
