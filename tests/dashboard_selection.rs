// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Snapgraph-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Snapgraph and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use serde_json::{json, Value};

use snapgraph::compare::{ComparisonTracker, ScoreState};
use snapgraph::model::{Language, SelectedPoint, Series};
use snapgraph::selection::{NavDirection, NavOutcome, NavRejection, SelectionCoordinator};
use snapgraph::similarity::{HttpSimilarityClient, SimilarityScorer};
use snapgraph::store::{ContentRoot, SeriesLoader};

const CSV_HEADER: &str = "timestamp,code,reg_est_prog,real_progress,action,correct";

fn write_series(root: &std::path::Path, rel: &str, rows: &[(&str, &str)]) {
    let path = root.join(rel);
    std::fs::create_dir_all(path.parent().expect("parent dir")).expect("create dirs");
    let mut text = format!("{CSV_HEADER}\n");
    for (idx, (timestamp, code)) in rows.iter().enumerate() {
        let progress = (idx + 1) as f64 / rows.len() as f64;
        text.push_str(&format!("{timestamp},{code},{:.2},{progress:.2},run,false\n", progress * 0.8));
    }
    std::fs::write(path, text).expect("write csv");
}

/// Content root with `Python/A1/a.csv` (5 rows) and `Python/A1/b.csv` (row 2 without code).
fn content_root() -> (tempfile::TempDir, ContentRoot) {
    let tmp = tempfile::tempdir().expect("tempdir");
    write_series(
        tmp.path(),
        "Python/A1/a.csv",
        &[
            ("2024-03-01T10:00:00Z", "x = 1"),
            ("2024-03-01T10:00:30Z", "x = 2"),
            ("2024-03-01T10:01:00Z", "print(x)"),
            ("2024-03-01T10:05:00Z", "print(x)"),
            ("2024-03-01T11:06:01Z", "print(x)"),
        ],
    );
    write_series(
        tmp.path(),
        "Python/A1/b.csv",
        &[("2024-03-01T10:00:00Z", "y = 1"), ("2024-03-01T10:02:00Z", "")],
    );
    let root = ContentRoot::new(tmp.path());
    (tmp, root)
}

fn load(root: &ContentRoot, name: &str) -> Series {
    let assignment = root.list_assignments().expect("list assignments").remove(0);
    let id = root
        .series_ids(assignment.id())
        .expect("series ids")
        .into_iter()
        .find(|id| id.display_name() == name)
        .expect("series listed");
    SeriesLoader::load(root, &id).expect("load series")
}

fn point(series: &Series, ordinal: usize) -> SelectedPoint {
    SelectedPoint::in_series(series, ordinal).expect("ordinal in range")
}

fn ordinals(coordinator: &SelectionCoordinator) -> Vec<(String, usize)> {
    coordinator
        .selection()
        .points()
        .iter()
        .map(|p| (p.series().display_name().to_owned(), p.ordinal()))
        .collect()
}

#[test]
fn click_ctrl_click_and_arrow_follow_the_selection_rules() {
    let (_tmp, root) = content_root();
    let a = load(&root, "a");
    assert_eq!(a.len(), 5);

    let mut coordinator = SelectionCoordinator::new();
    coordinator.select_point(Some(point(&a, 3)), false);
    assert_eq!(ordinals(&coordinator), vec![("a".to_owned(), 3)]);

    coordinator.select_point(Some(point(&a, 5)), true);
    assert_eq!(ordinals(&coordinator), vec![("a".to_owned(), 3), ("a".to_owned(), 5)]);
    assert!(coordinator.comparison_pair().is_some());

    let rev = coordinator.rev();
    let outcome = coordinator.navigate(&a, NavDirection::Right);
    assert_eq!(outcome, NavOutcome::Rejected(NavRejection::OutOfRange));
    assert_eq!(ordinals(&coordinator), vec![("a".to_owned(), 3), ("a".to_owned(), 5)]);
    assert_eq!(coordinator.rev(), rev);

    assert_eq!(coordinator.navigate(&a, NavDirection::Left), NavOutcome::Moved);
    assert_eq!(
        coordinator.navigate(&a, NavDirection::Left),
        NavOutcome::Rejected(NavRejection::Collision)
    );
    assert_eq!(ordinals(&coordinator), vec![("a".to_owned(), 3), ("a".to_owned(), 4)]);
}

#[test]
fn comparison_reports_elapsed_time_between_loaded_snapshots() {
    let (_tmp, root) = content_root();
    let a = load(&root, "a");

    let comparison = snapgraph::compare::Comparison::between(&point(&a, 1), &point(&a, 5));
    assert_eq!(comparison.elapsed.as_deref(), Some("1 hour, 6 minutes, and 1 second"));
    assert_eq!(comparison.titles[1], "a - Snapshot #5");
}

#[tokio::test]
async fn matching_code_is_scored_by_the_similarity_service() {
    let hits = Arc::new(AtomicUsize::new(0));
    let app = Router::new()
        .route(
            "/similarity",
            post(|State(hits): State<Arc<AtomicUsize>>, Json(body): Json<Value>| async move {
                hits.fetch_add(1, Ordering::SeqCst);
                assert_eq!(body["code1"], body["code2"]);
                assert_eq!(body["lang"], "Python");
                Json(json!({ "similarity": 0.87 }))
            }),
        )
        .with_state(hits.clone());
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    let server = tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    let (_tmp, root) = content_root();
    let a = load(&root, "a");
    let client = HttpSimilarityClient::new(Some(&format!("http://{addr}")), Duration::from_secs(5))
        .expect("client");

    let mut coordinator = SelectionCoordinator::new();
    let mut tracker = ComparisonTracker::new();
    coordinator.select_point(Some(point(&a, 3)), false);
    coordinator.select_point(Some(point(&a, 4)), true);

    let (ticket, request) = tracker
        .sync(coordinator.comparison_pair(), Language::for_assignment_path("Python/A1"))
        .expect("request for a new pair");
    assert!(tracker.state().is_pending());

    let result = client.score(&request).await;
    server.abort();

    assert!(tracker.apply(&ticket, result));
    assert_eq!(tracker.state().label(), "AST Similarity: 87.0%");
    assert_eq!(hits.load(Ordering::SeqCst), 1);
}

#[test]
fn missing_code_is_a_local_error() {
    let (_tmp, root) = content_root();
    let a = load(&root, "a");
    let b = load(&root, "b");
    assert_eq!(b.record(2).and_then(|record| record.code()), None);

    let mut coordinator = SelectionCoordinator::new();
    let mut tracker = ComparisonTracker::new();
    coordinator.select_point(Some(point(&a, 1)), false);
    coordinator.select_point(Some(point(&b, 2)), true);

    assert!(tracker.sync(coordinator.comparison_pair(), Language::Python).is_none());
    assert_eq!(tracker.state(), &ScoreState::MissingCode);
    assert_eq!(tracker.state().label(), "AST Error: Missing code in one or both of...");
}
