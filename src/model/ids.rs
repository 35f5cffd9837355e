// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Snapgraph-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Snapgraph and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::borrow::Borrow;
use std::fmt;
use std::marker::PhantomData;
use std::str::FromStr;

use serde::{Serialize, Serializer};

/// A content-relative resource path used as an opaque key.
///
/// Paths are `/`-separated and relative to the content root, e.g. `Python/A1/alice.csv` for a
/// series or `Python/A1` for an assignment. Validation only rejects values that could escape the
/// content root; everything else is passed through untouched.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Id<T> {
    value: String,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Id<T> {
    pub fn new(value: impl Into<String>) -> Result<Self, IdError> {
        let value = value.into();
        validate_relative_path(&value)?;
        Ok(Self { value, _marker: PhantomData })
    }

    pub fn as_str(&self) -> &str {
        &self.value
    }

    pub fn into_string(self) -> String {
        self.value
    }

    /// Last path segment, e.g. `alice.csv`.
    pub fn file_name(&self) -> &str {
        self.value.rsplit('/').next().unwrap_or(&self.value)
    }

    /// Last path segment without a trailing `.csv`, used as the panel title.
    pub fn display_name(&self) -> &str {
        let name = self.file_name();
        name.strip_suffix(".csv").unwrap_or(name)
    }
}

impl<T> fmt::Display for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

impl<T> Serialize for Id<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.value)
    }
}

impl<T> AsRef<str> for Id<T> {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl<T> Borrow<str> for Id<T> {
    fn borrow(&self) -> &str {
        self.as_str()
    }
}

impl<T> FromStr for Id<T> {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s.to_owned())
    }
}

impl<T> TryFrom<String> for Id<T> {
    type Error = IdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IdError {
    #[error("path must not be empty")]
    Empty,
    #[error("path must be relative to the content root")]
    Absolute,
    #[error("path must not contain `..` segments")]
    ParentSegment,
}

fn validate_relative_path(value: &str) -> Result<(), IdError> {
    if value.is_empty() {
        return Err(IdError::Empty);
    }
    if value.starts_with('/') || value.starts_with('\\') {
        return Err(IdError::Absolute);
    }
    if value.split(['/', '\\']).any(|segment| segment == "..") {
        return Err(IdError::ParentSegment);
    }
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SeriesIdTag {}
pub type SeriesId = Id<SeriesIdTag>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum AssignmentIdTag {}
pub type AssignmentId = Id<AssignmentIdTag>;

impl AssignmentId {
    /// Series path for a file that lives directly inside this assignment directory.
    pub fn series(&self, file_name: &str) -> Result<SeriesId, IdError> {
        SeriesId::new(format!("{}/{file_name}", self.as_str()))
    }
}
