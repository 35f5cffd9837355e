// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Snapgraph-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Snapgraph and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use crate::model::{Language, PointKey, SelectedPoint};
use crate::similarity::{SimilarityError, SimilarityRequest, MISSING_CODE_MESSAGE};

const ERROR_PREVIEW_CHARS: usize = 30;

/// Similarity score state for the current comparison pair. Variants are mutually exclusive.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ScoreState {
    #[default]
    Idle,
    MissingCode,
    Pending,
    Ready(f64),
    /// `detail` holds the raw service body when it answered with something other than JSON.
    Failed { message: String, detail: Option<String> },
}

impl ScoreState {
    pub fn label(&self) -> String {
        match self {
            Self::Idle => "AST Similarity: N/A".to_owned(),
            Self::Pending => "Calculating AST Similarity...".to_owned(),
            Self::Ready(score) => format!("AST Similarity: {}", super::format_percent(*score)),
            Self::MissingCode | Self::Failed { .. } => {
                let message = self.error().unwrap_or_default();
                format!("AST Error: {}", truncate_error(message))
            }
        }
    }

    /// Full error text; the label only carries a preview.
    pub fn error(&self) -> Option<&str> {
        match self {
            Self::MissingCode => Some(MISSING_CODE_MESSAGE),
            Self::Failed { message, .. } => Some(message),
            _ => None,
        }
    }

    /// Diagnostic detail of a failed request, shown with the full error.
    pub fn detail(&self) -> Option<&str> {
        match self {
            Self::Failed { detail, .. } => detail.as_deref(),
            _ => None,
        }
    }

    pub fn is_error(&self) -> bool {
        self.error().is_some()
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending)
    }
}

fn truncate_error(message: &str) -> String {
    let mut chars = message.chars();
    let preview: String = chars.by_ref().take(ERROR_PREVIEW_CHARS).collect();
    if chars.next().is_some() {
        format!("{preview}...")
    } else {
        preview
    }
}

type PairKey = (PointKey, PointKey);

/// Identifies the comparison a similarity request was issued for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreTicket {
    generation: u64,
    pair: PairKey,
}

impl ScoreTicket {
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// Tracks the score of the active comparison pair and drops results for pairs that are no
/// longer selected.
#[derive(Debug, Default)]
pub struct ComparisonTracker {
    generation: u64,
    pair: Option<PairKey>,
    state: ScoreState,
}

impl ComparisonTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &ScoreState {
        &self.state
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Follows a selection change. Returns the request to send when the new pair needs a score;
    /// an unchanged pair keeps its state and issues nothing.
    pub fn sync(
        &mut self,
        pair: Option<(&SelectedPoint, &SelectedPoint)>,
        parser: Language,
    ) -> Option<(ScoreTicket, SimilarityRequest)> {
        let keys = pair.map(|(first, second)| (first.key(), second.key()));
        if keys == self.pair {
            return None;
        }

        self.generation += 1;
        self.pair = keys.clone();

        let (Some((first, second)), Some(keys)) = (pair, keys) else {
            self.state = ScoreState::Idle;
            return None;
        };

        match SimilarityRequest::from_codes(first.code(), second.code(), parser) {
            Ok(request) => {
                self.state = ScoreState::Pending;
                Some((ScoreTicket { generation: self.generation, pair: keys }, request))
            }
            Err(_) => {
                tracing::debug!(
                    event = "compare.score.missing_code",
                    first = %first,
                    second = %second,
                    "skipping similarity request"
                );
                self.state = ScoreState::MissingCode;
                None
            }
        }
    }

    /// Applies a finished request. Returns `false` and leaves the state untouched when the
    /// ticket no longer matches the active pair.
    pub fn apply(&mut self, ticket: &ScoreTicket, result: Result<f64, SimilarityError>) -> bool {
        if ticket.generation != self.generation || self.pair.as_ref() != Some(&ticket.pair) {
            tracing::debug!(
                event = "compare.score.stale",
                ticket = ticket.generation,
                current = self.generation,
                "discarding stale similarity result"
            );
            return false;
        }

        self.state = match result {
            Ok(score) => ScoreState::Ready(score),
            Err(error) => ScoreState::Failed {
                message: error.to_string(),
                detail: error.detail().map(str::to_owned),
            },
        };
        true
    }

    pub fn reset(&mut self) {
        if self.pair.is_some() || self.state != ScoreState::Idle {
            self.generation += 1;
        }
        self.pair = None;
        self.state = ScoreState::Idle;
    }
}
