// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Snapgraph-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Snapgraph and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Keyboard navigation of selected points within one panel.
//!
//! Policy:
//! - Left/Right move the last selected point of the panel's series by -1/+1.
//! - Up/Down move the first selected point of the panel's series by +1/-1.
//! - A move outside `[1, len]` is rejected.
//! - With two points selected in the same series, a move onto the other point's ordinal is
//!   rejected.
//!
//! Points that belong to other series are never touched.

use std::fmt;

use crate::model::{SelectedPoint, Series};

use super::GlobalSelection;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavDirection {
    Left,
    Right,
    Up,
    Down,
}

impl NavDirection {
    fn delta(self) -> isize {
        match self {
            Self::Left | Self::Down => -1,
            Self::Right | Self::Up => 1,
        }
    }

    fn moves_last(self) -> bool {
        matches!(self, Self::Left | Self::Right)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavOutcome {
    Moved,
    Rejected(NavRejection),
    /// No selected point belongs to the panel; the key is left for other handlers.
    NotApplicable,
}

impl NavOutcome {
    pub fn moved(self) -> bool {
        self == Self::Moved
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavRejection {
    OutOfRange,
    Collision,
}

impl fmt::Display for NavRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfRange => f.write_str("no snapshot in that direction"),
            Self::Collision => f.write_str("both selected points would coincide"),
        }
    }
}

/// Works out which selection slot moves and where, without touching the selection.
pub(super) fn plan_shift(
    selection: &GlobalSelection,
    series: &Series,
    direction: NavDirection,
) -> Result<(usize, SelectedPoint), NavOutcome> {
    let points = selection.points();
    let mut matching = points
        .iter()
        .enumerate()
        .filter(|(_, point)| point.series() == series.id())
        .map(|(index, _)| index);

    let index = if direction.moves_last() { matching.last() } else { matching.next() };
    let Some(index) = index else {
        return Err(NavOutcome::NotApplicable);
    };

    let target = points[index]
        .ordinal()
        .checked_add_signed(direction.delta())
        .filter(|ordinal| series.contains_ordinal(*ordinal))
        .ok_or(NavOutcome::Rejected(NavRejection::OutOfRange))?;

    if let [first, second] = points {
        let other = if index == 0 { second } else { first };
        if other.series() == series.id() && other.ordinal() == target {
            return Err(NavOutcome::Rejected(NavRejection::Collision));
        }
    }

    let point = SelectedPoint::in_series(series, target)
        .ok_or(NavOutcome::Rejected(NavRejection::OutOfRange))?;
    Ok((index, point))
}
