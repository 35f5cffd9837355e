// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Snapgraph-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Snapgraph and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Cross-panel selection state.
//!
//! [`SelectionCoordinator`] is the only writer of the shared [`GlobalSelection`]. Panels read
//! per-series highlight sets from it and the comparison view reads the comparison pair; both are
//! derived on every call and never stored.

use smallvec::SmallVec;

use crate::model::{SelectedPoint, Series, SeriesId};

pub mod nav;

pub use nav::{NavDirection, NavOutcome, NavRejection};

/// Ordered selection of at most two points.
///
/// Position 0 is the anchor, position 1 the comparand. Constructors make a longer selection
/// unrepresentable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GlobalSelection {
    points: SmallVec<[SelectedPoint; 2]>,
}

impl GlobalSelection {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn single(point: SelectedPoint) -> Self {
        let mut points = SmallVec::new();
        points.push(point);
        Self { points }
    }

    pub fn pair(first: SelectedPoint, second: SelectedPoint) -> Self {
        let mut points = SmallVec::new();
        points.push(first);
        points.push(second);
        Self { points }
    }

    pub fn points(&self) -> &[SelectedPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn first(&self) -> Option<&SelectedPoint> {
        self.points.first()
    }

    /// Keeps the points matching `keep`, preserving order.
    fn retained(&self, mut keep: impl FnMut(&SelectedPoint) -> bool) -> Self {
        Self { points: self.points.iter().filter(|point| keep(point)).cloned().collect() }
    }

    /// Copy with the entry at `index` swapped for `point`.
    fn replaced(&self, index: usize, point: SelectedPoint) -> Self {
        let mut points = self.points.clone();
        points[index] = point;
        Self { points }
    }

    /// Selection produced by a click on `point`.
    fn after_click(&self, point: SelectedPoint, multi_select: bool) -> Self {
        if !multi_select {
            return Self::single(point);
        }

        match self.points.as_slice() {
            [] => Self::single(point),
            [first] if *first == point => self.clone(),
            [first] => Self::pair(first.clone(), point),
            [first, _] if *first == point => Self::single(first.clone()),
            [first, _] => Self::pair(first.clone(), point),
            _ => unreachable!("global selection never exceeds two points"),
        }
    }
}

/// Owner of the single global selection.
#[derive(Debug, Clone, Default)]
pub struct SelectionCoordinator {
    selection: GlobalSelection,
    rev: u64,
}

impl SelectionCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selection(&self) -> &GlobalSelection {
        &self.selection
    }

    /// Bumped on every effective change; unchanged when an operation is a no-op.
    pub fn rev(&self) -> u64 {
        self.rev
    }

    /// Applies a click. `None` (empty plot space) leaves the selection untouched.
    pub fn select_point(&mut self, point: Option<SelectedPoint>, multi_select: bool) {
        let Some(point) = point else {
            return;
        };
        let next = self.selection.after_click(point, multi_select);
        self.replace(next);
    }

    /// Drops every selected point that belongs to `series`.
    pub fn remove_series(&mut self, series: &SeriesId) {
        let next = self.selection.retained(|point| point.series() != series);
        self.replace(next);
    }

    /// Resets to an empty selection.
    pub fn clear(&mut self) {
        self.replace(GlobalSelection::empty());
    }

    /// Selected points of one series, in selection order.
    pub fn highlight_set_for(&self, series: &SeriesId) -> Vec<SelectedPoint> {
        self.selection.points().iter().filter(|point| point.series() == series).cloned().collect()
    }

    /// The `(first, second)` pair iff exactly two points are selected.
    pub fn comparison_pair(&self) -> Option<(&SelectedPoint, &SelectedPoint)> {
        match self.selection.points() {
            [first, second] => Some((first, second)),
            _ => None,
        }
    }

    /// Moves a selected point of `series` one step along its ordinal axis.
    pub fn navigate(&mut self, series: &Series, direction: NavDirection) -> NavOutcome {
        match nav::plan_shift(&self.selection, series, direction) {
            Ok((index, point)) => {
                let next = self.selection.replaced(index, point);
                self.replace(next);
                NavOutcome::Moved
            }
            Err(outcome) => outcome,
        }
    }

    fn replace(&mut self, next: GlobalSelection) {
        if next == self.selection {
            return;
        }
        self.selection = next;
        self.rev = self.rev.wrapping_add(1);
    }
}
