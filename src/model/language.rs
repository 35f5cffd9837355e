// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Snapgraph-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Snapgraph and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Programming language of an assignment; also selects the similarity parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Language {
    Java,
    Python,
}

impl Language {
    /// Top-level content directories, in listing order.
    pub const ALL: [Language; 2] = [Language::Java, Language::Python];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Java => "Java",
            Self::Python => "Python",
        }
    }

    /// Language for an assignment path such as `Java/Assignment1`; anything not under `Java`
    /// is scored with the Python parser.
    pub fn for_assignment_path(path: &str) -> Self {
        if path.starts_with("Java") {
            Self::Java
        } else {
            Self::Python
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown language `{0}` (expected Java or Python)")]
pub struct ParseLanguageError(String);

impl FromStr for Language {
    type Err = ParseLanguageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Java" => Ok(Self::Java),
            "Python" => Ok(Self::Python),
            other => Err(ParseLanguageError(other.to_owned())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Language;

    #[test]
    fn assignment_prefix_selects_parser() {
        assert_eq!(Language::for_assignment_path("Java/Assignment1"), Language::Java);
        assert_eq!(Language::for_assignment_path("Python/A1"), Language::Python);
        assert_eq!(Language::for_assignment_path(""), Language::Python);
    }

    #[test]
    fn serializes_as_bare_name() {
        assert_eq!(serde_json::to_string(&Language::Java).expect("json"), "\"Java\"");
        assert_eq!("Python".parse::<Language>(), Ok(Language::Python));
        assert!("Rust".parse::<Language>().is_err());
    }
}
