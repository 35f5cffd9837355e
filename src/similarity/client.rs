// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Snapgraph-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Snapgraph and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::time::{Duration, Instant};

use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::{ScoreFuture, SimilarityError, SimilarityRequest, SimilarityScorer};
use crate::model::Language;

/// Body sent to the scoring service's `POST /similarity`.
#[derive(Serialize)]
struct ServiceRequest<'a> {
    code1: &'a str,
    code2: &'a str,
    lang: Language,
}

#[derive(Deserialize)]
struct ServiceResponse {
    similarity: Option<f64>,
    error: Option<String>,
}

/// HTTP client for the AST similarity service.
#[derive(Debug, Clone)]
pub struct HttpSimilarityClient {
    client: Client,
    base_url: Option<String>,
}

impl HttpSimilarityClient {
    /// `base_url` is the service root; `None` or blank makes every score fail with
    /// [`SimilarityError::NotConfigured`].
    pub fn new(base_url: Option<&str>, timeout: Duration) -> Result<Self, SimilarityError> {
        let client = Client::builder().timeout(timeout).build().map_err(|error| {
            SimilarityError::Transport(format!("failed to build HTTP client: {error}"))
        })?;
        let base_url = base_url
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(|value| value.trim_end_matches('/').to_owned());
        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> Option<&str> {
        self.base_url.as_deref()
    }

    pub async fn score_pair(&self, request: &SimilarityRequest) -> Result<f64, SimilarityError> {
        request.validate()?;
        let base_url = self.base_url.as_deref().ok_or(SimilarityError::NotConfigured)?;

        let started = Instant::now();
        let url = format!("{base_url}/similarity");
        let body =
            ServiceRequest { code1: &request.code1, code2: &request.code2, lang: request.parser };
        let response = match self.client.post(&url).json(&body).send().await {
            Ok(response) => response,
            Err(error) => {
                tracing::warn!(
                    event = "similarity.http.request_failed",
                    url,
                    elapsed_ms = started.elapsed().as_millis(),
                    error = %error,
                    "similarity request failed"
                );
                return Err(SimilarityError::Transport(error.to_string()));
            }
        };

        let status = response.status();
        let is_json = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .is_some_and(|value| value.contains("application/json"));
        if !is_json {
            let detail = match response.text().await {
                Ok(body) => body,
                Err(error) => format!("failed to read response body: {error}"),
            };
            tracing::warn!(
                event = "similarity.http.non_json",
                status = %status,
                elapsed_ms = started.elapsed().as_millis(),
                "similarity service returned non-JSON"
            );
            return Err(SimilarityError::NonJson { status: status.as_u16(), detail });
        }

        let payload: ServiceResponse = match response.json().await {
            Ok(payload) => payload,
            Err(error) => {
                tracing::warn!(
                    event = "similarity.http.decode_failed",
                    status = %status,
                    error = %error,
                    "similarity response decode failed"
                );
                return Err(SimilarityError::Transport(error.to_string()));
            }
        };

        if !status.is_success() || payload.error.is_some() {
            let message = payload
                .error
                .unwrap_or_else(|| format!("similarity service error {}", status.as_u16()));
            tracing::debug!(
                event = "similarity.http.backend_error",
                status = %status,
                message,
                "similarity service reported an error"
            );
            return Err(SimilarityError::Backend { status: status.as_u16(), message });
        }

        let score = payload.similarity.ok_or_else(|| SimilarityError::Backend {
            status: status.as_u16(),
            message: "similarity missing from response".to_owned(),
        })?;
        if !score.is_finite() || !(0.0..=1.0).contains(&score) {
            return Err(SimilarityError::InvalidScore(score));
        }

        tracing::debug!(
            event = "similarity.http.completed",
            elapsed_ms = started.elapsed().as_millis(),
            score,
            "similarity scored"
        );
        Ok(score)
    }
}

impl SimilarityScorer for HttpSimilarityClient {
    fn score<'a>(&'a self, request: &'a SimilarityRequest) -> ScoreFuture<'a> {
        Box::pin(self.score_pair(request))
    }
}
