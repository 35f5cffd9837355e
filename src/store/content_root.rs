// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Snapgraph-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Snapgraph and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;

use crate::format::{parse_series, CsvParseError};
use crate::model::{AssignmentId, IdError, Series, SeriesId};

pub use crate::model::Language;

const SERIES_EXTENSION: &str = ".csv";

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("{}: not found", path.display())]
    NotFound { path: PathBuf },
    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid content path `{value}`: {source}")]
    InvalidPath {
        value: String,
        #[source]
        source: IdError,
    },
    #[error("{}: {source}", path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: CsvParseError,
    },
}

impl StoreError {
    fn io(path: &Path, source: io::Error) -> Self {
        if source.kind() == io::ErrorKind::NotFound {
            Self::NotFound { path: path.to_path_buf() }
        } else {
            Self::Io { path: path.to_path_buf(), source }
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// One `<language>/<assignment>` directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AssignmentEntry {
    pub language: Language,
    pub assignment: String,
    pub path: AssignmentId,
}

impl AssignmentEntry {
    pub fn id(&self) -> &AssignmentId {
        &self.path
    }

    /// `Python / A1`
    pub fn label(&self) -> String {
        format!("{} / {}", self.language, self.assignment)
    }
}

/// Directory that holds all assignments and their series files.
#[derive(Debug, Clone)]
pub struct ContentRoot {
    root: PathBuf,
}

impl ContentRoot {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Every assignment directory, grouped by language in [`Language::ALL`] order and sorted by
    /// name within a language. Missing language directories are skipped.
    pub fn list_assignments(&self) -> Result<Vec<AssignmentEntry>, StoreError> {
        let mut entries = Vec::new();
        for language in Language::ALL {
            let language_dir = self.root.join(language.as_str());
            let Some(mut names) = read_dir_names(&language_dir, |file_type| file_type.is_dir())?
            else {
                continue;
            };
            names.sort();

            for assignment in names {
                let path = AssignmentId::new(format!("{language}/{assignment}")).map_err(
                    |source| StoreError::InvalidPath { value: assignment.clone(), source },
                )?;
                entries.push(AssignmentEntry { language, assignment, path });
            }
        }
        Ok(entries)
    }

    /// File names of the `.csv` series inside `dir`, sorted. An absent directory yields an
    /// empty list.
    pub fn list_series(&self, dir: &str) -> Result<Vec<String>, StoreError> {
        let dir = sanitize_dir(dir);
        let path = self.root.join(&dir);
        let Some(mut names) = read_dir_names(&path, |file_type| file_type.is_file())? else {
            return Ok(Vec::new());
        };
        names.retain(|name| name.ends_with(SERIES_EXTENSION));
        names.sort();
        Ok(names)
    }

    /// Series ids for every `.csv` file of an assignment.
    pub fn series_ids(&self, assignment: &AssignmentId) -> Result<Vec<SeriesId>, StoreError> {
        self.list_series(assignment.as_str())?
            .into_iter()
            .map(|name| {
                assignment
                    .series(&name)
                    .map_err(|source| StoreError::InvalidPath { value: name, source })
            })
            .collect()
    }

    pub fn series_path(&self, id: &SeriesId) -> PathBuf {
        self.root.join(id.as_str())
    }

    /// Reads and parses one series file.
    pub fn load_series(&self, id: &SeriesId) -> Result<Series, StoreError> {
        let path = self.series_path(id);
        let text = fs::read_to_string(&path).map_err(|err| StoreError::io(&path, err))?;
        parse_series(id.clone(), &text).map_err(|source| StoreError::Csv { path, source })
    }

    /// Parses a raw request path into a series id under this root.
    pub fn parse_series_id(&self, raw: &str) -> Result<SeriesId, StoreError> {
        SeriesId::new(raw.trim_start_matches('/'))
            .map_err(|source| StoreError::InvalidPath { value: raw.to_owned(), source })
    }
}

/// Strips leading/trailing slashes and any `..` runs from a requested directory, then drops
/// empty segments so the result can never be absolute.
pub fn sanitize_dir(dir: &str) -> String {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    let pattern = PATTERN.get_or_init(|| {
        Regex::new(r"^[/\\]+|[/\\]+$|\.\.+").unwrap_or_else(|err| panic!("dir pattern: {err}"))
    });
    let stripped = pattern.replace_all(dir.trim(), "");
    stripped.split(['/', '\\']).filter(|segment| !segment.is_empty()).collect::<Vec<_>>().join("/")
}

/// Names of directory entries whose file type matches; `None` if `dir` does not exist.
fn read_dir_names(
    dir: &Path,
    keep: impl Fn(&fs::FileType) -> bool,
) -> Result<Option<Vec<String>>, StoreError> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(err) => return Err(StoreError::io(dir, err)),
    };

    let mut names = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|err| StoreError::io(dir, err))?;
        let file_type = entry.file_type().map_err(|err| StoreError::io(&entry.path(), err))?;
        if !keep(&file_type) {
            continue;
        }
        if let Some(name) = entry.file_name().to_str() {
            names.push(name.to_owned());
        }
    }
    Ok(Some(names))
}
