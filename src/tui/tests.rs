// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Snapgraph-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Snapgraph and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crossterm::event::KeyCode;
use ratatui::{backend::TestBackend, layout::Rect, Terminal};
use rstest::rstest;
use tokio::runtime::Handle;

use super::panel::PlotGeometry;
use super::picker::ranked_entries;
use super::{
    assignment_counter_label, draw, footer_help_line, osc52_sequence, panel_grid, App, Focus,
};
use crate::compare::ScoreState;
use crate::model::fixtures::{series, series_with_missing_code, sid};
use crate::model::{AssignmentId, Language, Series, SeriesId};
use crate::similarity::{ScoreFuture, SimilarityError, SimilarityRequest, SimilarityScorer};
use crate::store::{AssignmentEntry, SeriesLoader, StoreError};

struct MemoryLoader {
    assignments: Vec<AssignmentEntry>,
    listings: BTreeMap<AssignmentId, Vec<SeriesId>>,
    series: BTreeMap<SeriesId, Series>,
}

impl MemoryLoader {
    /// `Python/A1` with alice, bob and carol (carol #2 has no code); `Java/A2` with dave.
    fn sample() -> Self {
        let python = [
            series("Python/A1/alice.csv", 5),
            series("Python/A1/bob.csv", 5),
            series_with_missing_code("Python/A1/carol.csv", 3, 2),
        ];
        let java = [series("Java/A2/dave.csv", 4)];

        let mut loader =
            Self { assignments: Vec::new(), listings: BTreeMap::new(), series: BTreeMap::new() };
        for (language, assignment, members) in
            [(Language::Python, "A1", &python[..]), (Language::Java, "A2", &java[..])]
        {
            let path = AssignmentId::new(format!("{language}/{assignment}")).expect("assignment id");
            loader.assignments.push(AssignmentEntry {
                language,
                assignment: assignment.to_owned(),
                path: path.clone(),
            });
            loader.listings.insert(path, members.iter().map(|s| s.id().clone()).collect());
            for member in members {
                loader.series.insert(member.id().clone(), member.clone());
            }
        }
        loader
    }
}

impl SeriesLoader for MemoryLoader {
    fn list_assignments(&self) -> Result<Vec<AssignmentEntry>, StoreError> {
        Ok(self.assignments.clone())
    }

    fn series_ids(&self, assignment: &AssignmentId) -> Result<Vec<SeriesId>, StoreError> {
        Ok(self.listings.get(assignment).cloned().unwrap_or_default())
    }

    fn load(&self, id: &SeriesId) -> Result<Series, StoreError> {
        self.series
            .get(id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound { path: PathBuf::from(id.as_str()) })
    }
}

/// Scores `code2`'s digits / 10 unless a fixed score is set; records every call.
#[derive(Default)]
struct RecordingScorer {
    fixed: Option<f64>,
    failure: Option<SimilarityError>,
    calls: AtomicUsize,
    parsers: Mutex<Vec<Language>>,
}

impl RecordingScorer {
    fn fixed(score: f64) -> Self {
        Self { fixed: Some(score), ..Self::default() }
    }

    fn failing(error: SimilarityError) -> Self {
        Self { failure: Some(error), ..Self::default() }
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl SimilarityScorer for RecordingScorer {
    fn score<'a>(&'a self, request: &'a SimilarityRequest) -> ScoreFuture<'a> {
        Box::pin(async move {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.parsers.lock().expect("lock").push(request.parser);
            request.validate()?;
            if let Some(error) = &self.failure {
                return Err(error.clone());
            }
            let score = match self.fixed {
                Some(score) => score,
                None => {
                    let digits: String =
                        request.code2.chars().filter(char::is_ascii_digit).collect();
                    digits.parse::<f64>().unwrap_or(0.0) / 10.0
                }
            };
            Ok::<f64, SimilarityError>(score)
        })
    }
}

async fn pump(app: &mut App) {
    let event = tokio::time::timeout(Duration::from_secs(5), app.events_rx.recv())
        .await
        .expect("background event in time")
        .expect("event channel open");
    app.apply_event(event);
}

/// App after startup: first assignment selected, its first graph loaded.
async fn started_app(scorer: RecordingScorer) -> (App, Arc<RecordingScorer>) {
    let scorer = Arc::new(scorer);
    let mut app = App::new(Arc::new(MemoryLoader::sample()), scorer.clone(), Handle::current());
    app.request_assignments();
    pump(&mut app).await;
    pump(&mut app).await;
    pump(&mut app).await;
    (app, scorer)
}

async fn show_next_graph(app: &mut App) {
    app.focus = Focus::Picker;
    app.handle_key_code(KeyCode::Down);
    app.handle_key_code(KeyCode::Char(' '));
    pump(app).await;
}

fn render(app: &mut App) -> String {
    let mut terminal = Terminal::new(TestBackend::new(140, 48)).expect("test terminal");
    terminal.draw(|frame| draw(frame, app)).expect("draw");
    let buffer = terminal.backend().buffer();
    let mut out = String::new();
    for y in 0..buffer.area.height {
        for x in 0..buffer.area.width {
            out.push_str(buffer[(x, y)].symbol());
        }
        out.push('\n');
    }
    out
}

fn plot(app: &App, panel: usize) -> PlotGeometry {
    app.panel_hits[panel].plot.expect("panel has a plot")
}

fn click_ordinal(app: &mut App, panel: usize, ordinal: usize, multi_select: bool) {
    let plot = plot(app, panel);
    app.click_at(plot.column_of(ordinal), plot.area.y + 1, multi_select);
}

fn selected(app: &App) -> Vec<String> {
    app.selection.selection().points().iter().map(ToString::to_string).collect()
}

fn line_to_string(line: &ratatui::text::Line<'_>) -> String {
    line.spans.iter().map(|span| span.content.as_ref()).collect::<String>()
}

#[tokio::test]
async fn startup_selects_first_assignment_and_shows_its_first_graph() {
    let (app, _) = started_app(RecordingScorer::default()).await;

    assert_eq!(app.assignment_index, Some(0));
    assert_eq!(app.picker.entries().len(), 3);
    assert_eq!(app.visible, vec![sid("Python/A1/alice.csv")]);
    assert_eq!(app.loaded_series(&sid("Python/A1/alice.csv")).map(|s| s.len()), Some(5));
    assert!(app.selection.selection().is_empty());
}

#[tokio::test]
async fn click_selects_nearest_snapshot_and_empty_space_is_ignored() {
    let (mut app, _) = started_app(RecordingScorer::default()).await;
    render(&mut app);

    click_ordinal(&mut app, 0, 3, false);
    assert_eq!(selected(&app), vec!["Python/A1/alice.csv#3"]);
    assert_eq!(app.focus, Focus::Panel(0));

    let plot = plot(&app, 0);
    let between = (plot.column_of(1) + plot.column_of(2)) / 2;
    app.click_at(between, plot.area.y + 1, false);
    assert_eq!(selected(&app), vec!["Python/A1/alice.csv#3"]);

    let screen = render(&mut app);
    assert!(screen.contains("alice - Snapshot #3"));
}

#[tokio::test]
async fn multi_click_across_graphs_shows_score_when_it_arrives() {
    let (mut app, scorer) = started_app(RecordingScorer::fixed(0.87)).await;
    show_next_graph(&mut app).await;
    render(&mut app);

    click_ordinal(&mut app, 0, 3, false);
    click_ordinal(&mut app, 1, 5, true);
    assert_eq!(selected(&app), vec!["Python/A1/alice.csv#3", "Python/A1/bob.csv#5"]);
    assert!(app.tracker.state().is_pending());
    assert!(render(&mut app).contains("Calculating AST Similarity..."));

    pump(&mut app).await;
    assert_eq!(app.tracker.state(), &ScoreState::Ready(0.87));
    assert_eq!(scorer.calls(), 1);

    let screen = render(&mut app);
    assert!(screen.contains("AST Similarity: 87.0%"));
    assert!(screen.contains("Time between snapshots: 2 minutes and 0 seconds"));
}

#[tokio::test]
async fn plain_click_after_pair_starts_a_new_single_selection() {
    let (mut app, _) = started_app(RecordingScorer::default()).await;
    show_next_graph(&mut app).await;
    render(&mut app);

    click_ordinal(&mut app, 0, 1, false);
    click_ordinal(&mut app, 1, 2, true);
    click_ordinal(&mut app, 1, 4, false);

    assert_eq!(selected(&app), vec!["Python/A1/bob.csv#4"]);
    assert!(app.comparison.is_none());
    assert_eq!(app.tracker.state(), &ScoreState::Idle);
}

#[tokio::test]
async fn result_for_a_replaced_pair_is_discarded() {
    let (mut app, scorer) = started_app(RecordingScorer::default()).await;
    show_next_graph(&mut app).await;
    let alice = sid("Python/A1/alice.csv");
    let bob = sid("Python/A1/bob.csv");

    app.click_point(&alice, Some(1), false);
    app.click_point(&bob, Some(2), true);
    app.click_point(&bob, Some(3), true);

    pump(&mut app).await;
    pump(&mut app).await;

    assert_eq!(scorer.calls(), 2);
    assert_eq!(app.tracker.state(), &ScoreState::Ready(0.3));
}

#[tokio::test]
async fn missing_code_never_issues_a_request() {
    let (mut app, scorer) = started_app(RecordingScorer::default()).await;
    show_next_graph(&mut app).await;
    show_next_graph(&mut app).await;

    app.click_point(&sid("Python/A1/alice.csv"), Some(1), false);
    app.click_point(&sid("Python/A1/carol.csv"), Some(2), true);
    tokio::task::yield_now().await;

    assert_eq!(app.tracker.state(), &ScoreState::MissingCode);
    assert!(app.events_rx.try_recv().is_err());
    assert_eq!(scorer.calls(), 0);

    app.handle_key_code(KeyCode::Char('e'));
    assert!(app.show_full_error);
    assert!(render(&mut app).contains("Missing code in one or both of the snapshots"));
}

#[tokio::test]
async fn full_error_view_shows_raw_body_of_non_json_reply() {
    let body = "<html>Bad Gateway upstream</html>";
    let error = SimilarityError::NonJson { status: 502, detail: body.to_owned() };
    let (mut app, scorer) = started_app(RecordingScorer::failing(error)).await;

    app.click_point(&sid("Python/A1/alice.csv"), Some(1), false);
    app.click_point(&sid("Python/A1/alice.csv"), Some(2), true);
    pump(&mut app).await;

    assert_eq!(scorer.calls(), 1);
    assert_eq!(app.tracker.state().detail(), Some(body));
    assert!(!render(&mut app).contains("Bad Gateway upstream"));

    app.handle_key_code(KeyCode::Char('e'));
    let screen = render(&mut app);
    assert!(screen.contains("similarity service returned non-JSON (status 502)"));
    assert!(screen.contains(body));
}

#[tokio::test]
async fn hiding_the_focused_panel_moves_focus_to_a_remaining_panel() {
    let (mut app, _) = started_app(RecordingScorer::default()).await;
    show_next_graph(&mut app).await;
    app.click_point(&sid("Python/A1/alice.csv"), Some(2), false);
    app.click_point(&sid("Python/A1/bob.csv"), Some(4), true);
    pump(&mut app).await;

    app.focus = Focus::Panel(1);
    app.handle_key_code(KeyCode::Char('x'));

    assert_eq!(app.visible, vec![sid("Python/A1/alice.csv")]);
    assert_eq!(app.focus, Focus::Panel(0));
    assert_eq!(selected(&app), vec!["Python/A1/alice.csv#2"]);
    assert_eq!(app.tracker.state(), &ScoreState::Idle);

    app.handle_key_code(KeyCode::Char('x'));
    assert!(app.visible.is_empty());
    assert_eq!(app.focus, Focus::Picker);
    assert!(app.selection.selection().is_empty());
}

#[tokio::test]
async fn hiding_a_graph_drops_its_selected_points() {
    let (mut app, _) = started_app(RecordingScorer::default()).await;
    show_next_graph(&mut app).await;
    app.click_point(&sid("Python/A1/alice.csv"), Some(2), false);
    app.click_point(&sid("Python/A1/bob.csv"), Some(4), true);
    pump(&mut app).await;

    app.focus = Focus::Picker;
    app.handle_key_code(KeyCode::Char('k'));
    app.handle_key_code(KeyCode::Char(' '));

    assert_eq!(app.visible, vec![sid("Python/A1/bob.csv")]);
    assert_eq!(selected(&app), vec!["Python/A1/bob.csv#4"]);
    assert!(app.comparison.is_none());
    assert_eq!(app.tracker.state(), &ScoreState::Idle);
}

#[tokio::test]
async fn arrow_keys_move_the_selected_point_within_bounds() {
    let (mut app, _) = started_app(RecordingScorer::default()).await;
    app.focus = Focus::Panel(0);
    app.click_point(&sid("Python/A1/alice.csv"), Some(4), false);

    app.handle_key_code(KeyCode::Right);
    assert_eq!(selected(&app), vec!["Python/A1/alice.csv#5"]);

    app.handle_key_code(KeyCode::Right);
    assert_eq!(selected(&app), vec!["Python/A1/alice.csv#5"]);
    let toast = app.toast.as_ref().map(|toast| toast.message.clone());
    assert_eq!(toast.as_deref(), Some("Cannot move: no snapshot in that direction"));

    app.handle_key_code(KeyCode::Down);
    assert_eq!(selected(&app), vec!["Python/A1/alice.csv#4"]);
}

#[tokio::test]
async fn home_and_end_select_the_graph_edges() {
    let (mut app, scorer) = started_app(RecordingScorer::default()).await;
    app.focus = Focus::Panel(0);

    app.handle_key_code(KeyCode::Home);
    assert_eq!(selected(&app), vec!["Python/A1/alice.csv#1"]);

    app.handle_key_code(KeyCode::End);
    assert_eq!(selected(&app), vec!["Python/A1/alice.csv#1", "Python/A1/alice.csv#5"]);
    pump(&mut app).await;
    assert_eq!(app.tracker.state(), &ScoreState::Ready(0.5));
    assert_eq!(scorer.calls(), 1);
}

#[tokio::test]
async fn switching_assignment_resets_selection_and_scores_with_its_language() {
    let (mut app, scorer) = started_app(RecordingScorer::default()).await;
    app.click_point(&sid("Python/A1/alice.csv"), Some(1), false);

    app.handle_key_code(KeyCode::Char(']'));
    assert!(app.selection.selection().is_empty());
    assert!(app.visible.is_empty());
    pump(&mut app).await;
    pump(&mut app).await;
    assert_eq!(app.visible, vec![sid("Java/A2/dave.csv")]);

    app.focus = Focus::Panel(0);
    app.handle_key_code(KeyCode::Home);
    app.handle_key_code(KeyCode::End);
    pump(&mut app).await;

    assert_eq!(scorer.parsers.lock().expect("lock").as_slice(), &[Language::Java]);
    assert!(render(&mut app).contains("Java / A2"));
}

#[tokio::test]
async fn picker_filter_narrows_visible_entries() {
    let (mut app, _) = started_app(RecordingScorer::default()).await;

    app.handle_key_code(KeyCode::Char('/'));
    for ch in "crl".chars() {
        app.handle_key_code(KeyCode::Char(ch));
    }
    assert_eq!(app.picker.visible_len(), 1);
    app.handle_key_code(KeyCode::Enter);
    assert!(!app.picker.is_editing());

    app.handle_key_code(KeyCode::Char(' '));
    pump(&mut app).await;
    assert!(app.visible.contains(&sid("Python/A1/carol.csv")));
}

#[rstest]
#[case(Focus::Picker, 0, Focus::Picker)]
#[case(Focus::Picker, 2, Focus::Panel(0))]
#[case(Focus::Panel(0), 2, Focus::Panel(1))]
#[case(Focus::Panel(1), 2, Focus::Picker)]
fn focus_cycles_through_picker_and_panels(
    #[case] from: Focus,
    #[case] panels: usize,
    #[case] expected: Focus,
) {
    assert_eq!(from.cycle(panels), expected);
    assert_eq!(expected.cycle_back(panels), from);
}

#[rstest]
#[case(1, 1)]
#[case(2, 2)]
#[case(3, 3)]
fn panel_grid_uses_one_column_for_a_single_panel(#[case] count: usize, #[case] expected: usize) {
    let area = Rect::new(0, 0, 100, 40);
    let rects = panel_grid(area, count);

    assert_eq!(rects.len(), expected);
    if count == 1 {
        assert_eq!(rects[0], area);
    } else {
        assert_eq!(rects[0].width, 50);
        assert_eq!(rects[1].x, 50);
    }
}

#[rstest]
#[case(5, 1, 0)]
#[case(5, 5, 99)]
#[case(1, 1, 0)]
fn plot_columns_span_the_plot_area(#[case] len: usize, #[case] ordinal: usize, #[case] column: u16) {
    let plot = PlotGeometry { area: Rect::new(0, 0, 100, 10), len };
    if len == 1 {
        assert_eq!(plot.column_of(ordinal), 49);
    } else {
        assert_eq!(plot.column_of(ordinal), column);
    }
    assert_eq!(plot.ordinal_at(plot.column_of(ordinal), 3), Some(ordinal));
}

#[test]
fn plot_hit_test_rejects_clicks_outside_or_far_from_points() {
    let plot = PlotGeometry { area: Rect::new(10, 5, 41, 10), len: 3 };

    assert_eq!(plot.ordinal_at(plot.column_of(2), 4), None);
    assert_eq!(plot.ordinal_at(plot.column_of(2) + 1, 6), Some(2));
    assert_eq!(plot.ordinal_at(plot.column_of(2) + 5, 6), None);
    assert_eq!(PlotGeometry { len: 0, ..plot }.ordinal_at(20, 6), None);
}

#[test]
fn picker_ranks_prefix_matches_first() {
    let entries = [sid("A/x/bobby.csv"), sid("A/x/alice.csv"), sid("A/x/bob.csv")];

    assert_eq!(ranked_entries(&entries, ""), vec![0, 1, 2]);
    assert_eq!(ranked_entries(&entries, "bob"), vec![2, 0]);
    assert!(ranked_entries(&entries, "zzz").is_empty());
}

#[test]
fn osc52_sequence_encodes_text() {
    assert_eq!(osc52_sequence("print(1)"), "\x1b]52;c;cHJpbnQoMSk=\x1b\\");
}

#[rstest]
#[case(None, 0, "[0/0]")]
#[case(Some(0), 3, "[1/3]")]
#[case(Some(9), 12, "[10/12]")]
fn assignment_counter_is_one_based(
    #[case] index: Option<usize>,
    #[case] total: usize,
    #[case] expected: &str,
) {
    assert_eq!(assignment_counter_label(index, total), expected);
}

#[tokio::test]
async fn footer_lists_focus_keys_and_toast() {
    let (mut app, _) = started_app(RecordingScorer::default()).await;

    let picker = line_to_string(&footer_help_line(&app, " | Yanked"));
    assert!(picker.starts_with("Move:j/k | Show:Space | Filter:/"));
    assert!(picker.ends_with("Quit:q | Yanked"));

    app.focus = Focus::Panel(0);
    let panel = line_to_string(&footer_help_line(&app, ""));
    assert!(panel.contains("Add last:End"));
    assert!(panel.contains("Hide:x"));
    assert!(panel.contains("Assignment:[]"));
}
