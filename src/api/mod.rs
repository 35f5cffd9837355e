// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Snapgraph-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Snapgraph and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Local HTTP side-server.
//!
//! Exposes the content listings, parsed series and a proxy to the similarity service so other
//! tools can read what the dashboard reads:
//!
//! - `GET /api/list-assignments`
//! - `GET /api/list-csv?dir=<assignment path>`
//! - `GET /api/series?path=<series path>`
//! - `POST /api/ast-similarity` with `{code1, code2, parser?}`

use std::future::Future;
use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::{json, Value};
use tokio::net::TcpListener;

use crate::model::SnapshotRecord;
use crate::similarity::{SimilarityError, SimilarityRequest, SimilarityScorer};
use crate::store::{ContentRoot, StoreError};

pub const DEFAULT_HTTP_PORT: u16 = 27436;

pub struct ApiState {
    pub content_root: ContentRoot,
    pub scorer: Arc<dyn SimilarityScorer>,
}

impl ApiState {
    pub fn new(content_root: ContentRoot, scorer: Arc<dyn SimilarityScorer>) -> Self {
        Self { content_root, scorer }
    }
}

type SharedState = Arc<ApiState>;

/// JSON error body with an HTTP status.
#[derive(Debug)]
struct ApiError {
    status: StatusCode,
    body: Value,
}

impl ApiError {
    fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self { status, body: json!({ "error": message.into() }) }
    }

    fn similarity(error: &SimilarityError) -> Self {
        let status =
            StatusCode::from_u16(error.http_status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let message = match error {
            SimilarityError::MissingCode => "Both code snippets are required".to_owned(),
            other => other.to_string(),
        };
        let mut body = json!({ "error": message, "similarity": 0 });
        if let Some(detail) = error.detail() {
            body["detail"] = Value::String(detail.to_owned());
        }
        Self { status, body }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

#[derive(Debug, Deserialize)]
struct DirQuery {
    #[serde(default)]
    dir: String,
}

#[derive(Debug, Deserialize)]
struct SeriesQuery {
    #[serde(default)]
    path: String,
}

/// Runs blocking content-root work off the async workers.
async fn with_root<T, F>(state: &SharedState, op: F) -> Result<T, StoreError>
where
    T: Send + 'static,
    F: FnOnce(&ContentRoot) -> Result<T, StoreError> + Send + 'static,
{
    let root = state.content_root.clone();
    match tokio::task::spawn_blocking(move || op(&root)).await {
        Ok(result) => result,
        Err(err) => Err(StoreError::Io {
            path: state.content_root.root().to_path_buf(),
            source: std::io::Error::other(err.to_string()),
        }),
    }
}

async fn list_assignments(State(state): State<SharedState>) -> Response {
    match with_root(&state, |root| root.list_assignments()).await {
        Ok(entries) => Json(entries).into_response(),
        Err(err) => {
            tracing::error!(event = "api.list_assignments.failed", error = %err, "listing failed");
            ApiError::new(StatusCode::INTERNAL_SERVER_ERROR, "Failed to list assignments")
                .into_response()
        }
    }
}

async fn list_csv(State(state): State<SharedState>, Query(query): Query<DirQuery>) -> Response {
    match with_root(&state, move |root| root.list_series(&query.dir)).await {
        Ok(names) => Json(names).into_response(),
        Err(err) => {
            tracing::error!(event = "api.list_csv.failed", error = %err, "listing failed");
            ApiError::new(StatusCode::INTERNAL_SERVER_ERROR, "Failed to read CSV files")
                .into_response()
        }
    }
}

async fn series(State(state): State<SharedState>, Query(query): Query<SeriesQuery>) -> Response {
    let id = match state.content_root.parse_series_id(&query.path) {
        Ok(id) => id,
        Err(err) => return ApiError::new(StatusCode::BAD_REQUEST, err.to_string()).into_response(),
    };

    match with_root(&state, move |root| root.load_series(&id)).await {
        Ok(series) => {
            let rows = series.records().iter().map(|record| &**record).collect::<Vec<&SnapshotRecord>>();
            Json(rows).into_response()
        }
        Err(err) if err.is_not_found() => {
            ApiError::new(StatusCode::NOT_FOUND, err.to_string()).into_response()
        }
        Err(err) => {
            tracing::warn!(event = "api.series.failed", error = %err, "series load failed");
            let status = match err {
                StoreError::Csv { .. } => StatusCode::UNPROCESSABLE_ENTITY,
                StoreError::InvalidPath { .. } => StatusCode::BAD_REQUEST,
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            };
            ApiError::new(status, err.to_string()).into_response()
        }
    }
}

async fn ast_similarity(
    State(state): State<SharedState>,
    Json(request): Json<SimilarityRequest>,
) -> Response {
    match state.scorer.score(&request).await {
        Ok(similarity) => Json(json!({ "similarity": similarity })).into_response(),
        Err(err) => {
            tracing::debug!(event = "api.ast_similarity.failed", error = %err, "scoring failed");
            ApiError::similarity(&err).into_response()
        }
    }
}

pub fn router(state: Arc<ApiState>) -> Router {
    Router::new()
        .route("/api/list-assignments", get(list_assignments))
        .route("/api/list-csv", get(list_csv))
        .route("/api/series", get(series))
        .route("/api/ast-similarity", post(ast_similarity))
        .with_state(state)
}

/// Serves the API on `listener` until `shutdown` resolves.
pub async fn serve(
    listener: TcpListener,
    state: Arc<ApiState>,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> std::io::Result<()> {
    let addr = listener.local_addr()?;
    tracing::info!(event = "api.listening", %addr, "http api listening");
    axum::serve(listener, router(state)).with_graceful_shutdown(shutdown).await?;
    tracing::info!(event = "api.stopped", "http api stopped");
    Ok(())
}
