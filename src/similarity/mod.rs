// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Snapgraph-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Snapgraph and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! AST similarity scoring via an external service.
//!
//! The service accepts two code strings and answers with a score in `[0, 1]`. Input that can be
//! rejected locally (missing code) never reaches the network.

use std::future::Future;
use std::pin::Pin;

use serde::{Deserialize, Serialize};

use crate::model::Language;

pub mod client;

pub use client::HttpSimilarityClient;

pub const MISSING_CODE_MESSAGE: &str = "Missing code in one or both of the snapshots";

/// A pair of code strings to compare.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimilarityRequest {
    #[serde(default)]
    pub code1: String,
    #[serde(default)]
    pub code2: String,
    #[serde(default = "default_parser")]
    pub parser: Language,
}

fn default_parser() -> Language {
    Language::Python
}

impl SimilarityRequest {
    pub fn new(code1: impl Into<String>, code2: impl Into<String>, parser: Language) -> Self {
        Self { code1: code1.into(), code2: code2.into(), parser }
    }

    /// Builds a request only when both sides carry non-empty code.
    pub fn from_codes(
        code1: Option<&str>,
        code2: Option<&str>,
        parser: Language,
    ) -> Result<Self, SimilarityError> {
        let request = Self::new(code1.unwrap_or(""), code2.unwrap_or(""), parser);
        request.validate()?;
        Ok(request)
    }

    pub fn validate(&self) -> Result<(), SimilarityError> {
        if self.code1.is_empty() || self.code2.is_empty() {
            return Err(SimilarityError::MissingCode);
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SimilarityError {
    #[error("Missing code in one or both of the snapshots")]
    MissingCode,
    #[error("similarity service URL not set (SNAPGRAPH_SIMILARITY_URL)")]
    NotConfigured,
    #[error("similarity service returned non-JSON (status {status})")]
    NonJson { status: u16, detail: String },
    #[error("{message}")]
    Backend { status: u16, message: String },
    #[error("similarity request failed: {0}")]
    Transport(String),
    #[error("similarity score {0} is outside [0, 1]")]
    InvalidScore(f64),
}

impl SimilarityError {
    /// HTTP status the local API answers with for this failure.
    pub fn http_status(&self) -> u16 {
        match self {
            Self::MissingCode => 400,
            Self::NotConfigured | Self::Transport(_) => 500,
            Self::NonJson { status, .. } | Self::Backend { status, .. } => *status,
            Self::InvalidScore(_) => 502,
        }
    }

    /// Raw upstream body, when the service answered with something other than JSON.
    pub fn detail(&self) -> Option<&str> {
        match self {
            Self::NonJson { detail, .. } => Some(detail),
            _ => None,
        }
    }
}

pub type ScoreFuture<'a> = Pin<Box<dyn Future<Output = Result<f64, SimilarityError>> + Send + 'a>>;

/// Anything that can score a [`SimilarityRequest`].
pub trait SimilarityScorer: Send + Sync {
    fn score<'a>(&'a self, request: &'a SimilarityRequest) -> ScoreFuture<'a>;
}
