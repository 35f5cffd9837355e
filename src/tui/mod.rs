// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Snapgraph-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Snapgraph and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Terminal dashboard.
//!
//! The UI thread owns all state. Series loads and similarity requests run on the tokio runtime
//! and report back through one unbounded channel that is drained before every draw.

use std::{
    collections::BTreeMap,
    error::Error,
    io,
    sync::Arc,
    time::{Duration, Instant},
};

use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
    },
    execute,
    style::Print,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap},
};
use tokio::runtime::Handle;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use crate::compare::{Comparison, ComparisonTracker, ScoreTicket};
use crate::model::{Language, SelectedPoint, Series, SeriesId};
use crate::selection::{NavDirection, NavOutcome, SelectionCoordinator};
use crate::similarity::{SimilarityError, SimilarityRequest, SimilarityScorer};
use crate::store::{AssignmentEntry, SeriesLoader};

mod compare;
mod panel;
mod picker;

use panel::{PanelContent, PanelMarker, PlotGeometry};
use picker::GraphPicker;

const FOCUS_COLOR: Color = Color::LightGreen;
const FOOTER_LABEL_COLOR: Color = Color::Gray;
const FOOTER_KEY_COLOR: Color = Color::Cyan;
const FOOTER_BRAND_COLOR: Color = Color::White;
const FOOTER_BRAND: &str = "snapgraph";
const PICKER_WIDTH: u16 = 30;
const TICK: Duration = Duration::from_millis(100);
const TOAST_TTL: Duration = Duration::from_secs(2);

/// Runs the dashboard until the user quits.
///
/// Must be called from a blocking context; background work is spawned on `runtime`.
pub fn run(
    loader: Arc<dyn SeriesLoader>,
    scorer: Arc<dyn SimilarityScorer>,
    runtime: Handle,
) -> Result<(), Box<dyn Error>> {
    let mut terminal = TerminalSession::new()?;
    let mut app = App::new(loader, scorer, runtime);
    app.request_assignments();

    while !app.should_quit {
        app.drain_events();
        terminal.draw(|frame| draw(frame, &mut app))?;

        if event::poll(TICK)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => app.handle_key(key),
                Event::Mouse(mouse) => app.handle_mouse(mouse),
                _ => {}
            }
        }
    }

    tracing::info!(event = "tui.exit", "dashboard closed");
    Ok(())
}

fn draw(frame: &mut Frame<'_>, app: &mut App) {
    let area = frame.area();
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(0), Constraint::Length(1)])
        .split(area);
    let (header_area, main_area, status_area) = (layout[0], layout[1], layout[2]);

    frame.render_widget(Paragraph::new(header_line(app)), header_area);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(PICKER_WIDTH), Constraint::Min(0)])
        .split(main_area);
    render_picker(frame, app, columns[0]);

    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(columns[1]);
    render_panels(frame, app, right[0]);
    render_detail_pane(frame, app, right[1]);

    let toast_snapshot = app.toast.as_ref().map(|toast| (toast.message.clone(), toast.expires_at));
    let toast_suffix = match toast_snapshot {
        Some((message, expires_at)) if expires_at > Instant::now() => format!(" | {message}"),
        Some(_) => {
            app.toast = None;
            String::new()
        }
        None => String::new(),
    };

    if app.picker.is_editing() {
        frame.render_widget(Paragraph::new(filter_footer_line(app, &toast_suffix)), status_area);
        let cursor_x = status_area
            .x
            .saturating_add(1)
            .saturating_add(app.picker.filter().chars().count() as u16)
            .min(status_area.x.saturating_add(status_area.width.saturating_sub(1)));
        frame.set_cursor_position((cursor_x, status_area.y));
    } else {
        frame.render_widget(Paragraph::new(footer_help_line(app, &toast_suffix)), status_area);
    }
    let brand = Paragraph::new(footer_brand_line()).alignment(Alignment::Right);
    frame.render_widget(brand, status_area);

    if app.show_help {
        render_help(frame, app, main_area);
    }
}

fn render_picker(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let focused = app.focus == Focus::Picker;
    let tail = (!app.picker.filter().is_empty()).then(|| format!("/{}", app.picker.filter()));
    let block = Block::default()
        .borders(Borders::ALL)
        .title(view_title("Graphs", tail.as_deref()))
        .border_style(panel_border_style(focused));

    let items = app
        .picker
        .visible_entries()
        .map(|id| {
            let mark = if app.visible.contains(id) { "[x] " } else { "[ ] " };
            let style = match app.series.get(id) {
                Some(SeriesSlot::Failed(_)) => Style::default().fg(Color::Red),
                _ => Style::default(),
            };
            ListItem::new(Line::from(vec![Span::raw(mark), Span::styled(id.display_name().to_owned(), style)]))
        })
        .collect::<Vec<_>>();

    if items.is_empty() {
        let message = if app.picker.entries().is_empty() { "No graphs" } else { "No match" };
        let body = Paragraph::new(message).style(Style::default().fg(Color::DarkGray));
        frame.render_widget(body.block(block), area);
        return;
    }

    let mut state = ListState::default();
    state.select(Some(app.picker.cursor()));
    let highlight = if focused {
        Style::default().fg(Color::Black).bg(FOCUS_COLOR)
    } else {
        Style::default().add_modifier(Modifier::REVERSED)
    };
    let list = List::new(items).block(block).highlight_style(highlight);
    frame.render_stateful_widget(list, area, &mut state);
}

fn render_panels(frame: &mut Frame<'_>, app: &mut App, area: Rect) {
    app.panel_hits.clear();
    if app.visible.is_empty() {
        let body = Paragraph::new("Select a graph with Space in the picker.")
            .style(Style::default().fg(Color::DarkGray))
            .block(Block::default().borders(Borders::ALL).title(view_title("Graphs", None)));
        frame.render_widget(body, area);
        return;
    }

    let selection = app.selection.selection().points().to_vec();
    for (index, (id, rect)) in app
        .visible
        .clone()
        .into_iter()
        .zip(panel_grid(area, app.visible.len()))
        .enumerate()
    {
        let markers = selection
            .iter()
            .enumerate()
            .filter(|(_, point)| point.series() == &id)
            .map(|(slot, point)| PanelMarker { slot, ordinal: point.ordinal() })
            .collect::<Vec<_>>();
        let content = match app.series.get(&id) {
            Some(SeriesSlot::Loaded(series)) => PanelContent::Loaded(series),
            Some(SeriesSlot::Failed(message)) => PanelContent::Failed(message),
            Some(SeriesSlot::Loading) | None => PanelContent::Loading,
        };
        let focused = app.focus == Focus::Panel(index);
        let len = match &content {
            PanelContent::Loaded(series) => Some(series.len()),
            _ => None,
        };
        let title = panel_title(&id, len, focused);
        let plot = panel::render_panel(frame, rect, title, panel_border_style(focused), content, &markers);
        app.panel_hits.push(PanelHit { id, area: rect, plot });
    }
}

fn render_detail_pane(frame: &mut Frame<'_>, app: &mut App, area: Rect) {
    let (title, lines) = match (&app.comparison, app.selection.selection().points()) {
        (Some(comparison), _) => (
            "Comparison",
            compare::comparison_lines(comparison, app.tracker.state(), app.show_full_error),
        ),
        (None, [point]) => ("Snapshot", compare::single_lines(point)),
        _ => ("Details", compare::empty_lines()),
    };
    let max_scroll = lines.len().saturating_sub(1).min(u16::MAX as usize) as u16;
    app.detail_scroll = app.detail_scroll.min(max_scroll);
    compare::render_detail(frame, area, title, lines, app.detail_scroll);
}

// Layout, title, footer and help helpers.
include!("chrome.rs");

#[derive(Debug, Clone)]
struct Toast {
    message: String,
    expires_at: Instant,
}

/// Load state of one series of the current assignment.
#[derive(Debug, Clone)]
enum SeriesSlot {
    Loading,
    Loaded(Arc<Series>),
    Failed(String),
}

/// Where a visible panel was drawn in the last frame.
#[derive(Debug, Clone)]
struct PanelHit {
    id: SeriesId,
    area: Rect,
    plot: Option<PlotGeometry>,
}

/// Completions of background work. `generation` ties listing/loading results to the assignment
/// they were requested for.
#[derive(Debug)]
enum AsyncEvent {
    AssignmentsListed(Result<Vec<AssignmentEntry>, String>),
    SeriesListed { generation: u64, result: Result<Vec<SeriesId>, String> },
    SeriesLoaded { generation: u64, id: SeriesId, result: Result<Series, String> },
    Scored { ticket: ScoreTicket, result: Result<f64, SimilarityError> },
}

struct App {
    loader: Arc<dyn SeriesLoader>,
    scorer: Arc<dyn SimilarityScorer>,
    runtime: Handle,
    events_tx: UnboundedSender<AsyncEvent>,
    events_rx: UnboundedReceiver<AsyncEvent>,
    assignments: Vec<AssignmentEntry>,
    assignment_index: Option<usize>,
    load_generation: u64,
    picker: GraphPicker,
    series: BTreeMap<SeriesId, SeriesSlot>,
    visible: Vec<SeriesId>,
    selection: SelectionCoordinator,
    tracker: ComparisonTracker,
    comparison: Option<Comparison>,
    focus: Focus,
    panel_hits: Vec<PanelHit>,
    detail_scroll: u16,
    show_full_error: bool,
    show_help: bool,
    help_scroll: u16,
    help_viewport_height: u16,
    toast: Option<Toast>,
    should_quit: bool,
}

impl App {
    fn new(loader: Arc<dyn SeriesLoader>, scorer: Arc<dyn SimilarityScorer>, runtime: Handle) -> Self {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        Self {
            loader,
            scorer,
            runtime,
            events_tx,
            events_rx,
            assignments: Vec::new(),
            assignment_index: None,
            load_generation: 0,
            picker: GraphPicker::default(),
            series: BTreeMap::new(),
            visible: Vec::new(),
            selection: SelectionCoordinator::new(),
            tracker: ComparisonTracker::new(),
            comparison: None,
            focus: Focus::Picker,
            panel_hits: Vec::new(),
            detail_scroll: 0,
            show_full_error: false,
            show_help: false,
            help_scroll: 0,
            help_viewport_height: 0,
            toast: None,
            should_quit: false,
        }
    }

    fn current_assignment(&self) -> Option<&AssignmentEntry> {
        self.assignment_index.and_then(|index| self.assignments.get(index))
    }

    fn parser(&self) -> Language {
        self.current_assignment()
            .map(|entry| Language::for_assignment_path(entry.id().as_str()))
            .unwrap_or(Language::Python)
    }

    fn loaded_series(&self, id: &SeriesId) -> Option<Arc<Series>> {
        match self.series.get(id) {
            Some(SeriesSlot::Loaded(series)) => Some(series.clone()),
            _ => None,
        }
    }

    fn focused_series(&self) -> Option<&SeriesId> {
        match self.focus {
            Focus::Panel(index) => self.visible.get(index),
            Focus::Picker => None,
        }
    }

    fn request_assignments(&mut self) {
        let loader = self.loader.clone();
        let tx = self.events_tx.clone();
        self.runtime.spawn_blocking(move || {
            let result = loader.list_assignments().map_err(|err| err.to_string());
            let _ = tx.send(AsyncEvent::AssignmentsListed(result));
        });
    }

    /// Switches to another assignment: drops every panel, the selection and the score.
    fn select_assignment(&mut self, index: usize) {
        let Some(entry) = self.assignments.get(index).cloned() else {
            return;
        };
        self.assignment_index = Some(index);
        self.load_generation += 1;
        self.series.clear();
        self.visible.clear();
        self.panel_hits.clear();
        self.picker.set_entries(Vec::new());
        self.focus = Focus::Picker;
        let before = self.selection.rev();
        self.selection.clear();
        self.after_selection_change(before);
        tracing::info!(
            event = "tui.assignment.selected",
            assignment = %entry.id(),
            generation = self.load_generation,
            "assignment selected"
        );

        let loader = self.loader.clone();
        let tx = self.events_tx.clone();
        let generation = self.load_generation;
        self.runtime.spawn_blocking(move || {
            let result = loader.series_ids(entry.id()).map_err(|err| err.to_string());
            let _ = tx.send(AsyncEvent::SeriesListed { generation, result });
        });
    }

    fn cycle_assignment(&mut self, delta: isize) {
        let total = self.assignments.len();
        if total == 0 {
            self.set_toast("No assignments found");
            return;
        }
        let current = self.assignment_index.unwrap_or(0) as isize;
        let next = (current + delta).rem_euclid(total as isize) as usize;
        if Some(next) != self.assignment_index {
            self.select_assignment(next);
        }
    }

    fn show_series(&mut self, id: SeriesId) {
        if self.visible.contains(&id) {
            return;
        }
        self.visible.push(id.clone());
        if self.series.contains_key(&id) {
            return;
        }

        self.series.insert(id.clone(), SeriesSlot::Loading);
        let loader = self.loader.clone();
        let tx = self.events_tx.clone();
        let generation = self.load_generation;
        self.runtime.spawn_blocking(move || {
            let result = loader.load(&id).map_err(|err| err.to_string());
            let _ = tx.send(AsyncEvent::SeriesLoaded { generation, id, result });
        });
    }

    /// Hides a visible series (dropping its selected points) or shows a hidden one.
    fn toggle_series(&mut self, id: SeriesId) {
        let Some(position) = self.visible.iter().position(|visible| visible == &id) else {
            self.show_series(id);
            return;
        };

        self.visible.remove(position);
        let before = self.selection.rev();
        self.selection.remove_series(&id);
        self.after_selection_change(before);
        if let Focus::Panel(index) = self.focus {
            self.focus = match self.visible.len() {
                0 => Focus::Picker,
                len => Focus::Panel(index.min(len - 1)),
            };
        }
    }

    fn drain_events(&mut self) {
        while let Ok(event) = self.events_rx.try_recv() {
            self.apply_event(event);
        }
    }

    fn apply_event(&mut self, event: AsyncEvent) {
        match event {
            AsyncEvent::AssignmentsListed(Ok(assignments)) => {
                tracing::info!(
                    event = "tui.assignments.listed",
                    count = assignments.len(),
                    "assignments listed"
                );
                self.assignments = assignments;
                if self.assignments.is_empty() {
                    self.set_toast("No assignments found");
                } else {
                    self.select_assignment(0);
                }
            }
            AsyncEvent::AssignmentsListed(Err(err)) => {
                tracing::warn!(event = "tui.assignments.failed", error = %err, "listing failed");
                self.set_toast(format!("Failed to list assignments: {err}"));
            }
            AsyncEvent::SeriesListed { generation, .. } if generation != self.load_generation => {}
            AsyncEvent::SeriesListed { result: Ok(ids), .. } => {
                let first = ids.first().cloned();
                self.picker.set_entries(ids);
                if let Some(first) = first {
                    self.show_series(first);
                }
            }
            AsyncEvent::SeriesListed { result: Err(err), .. } => {
                tracing::warn!(event = "tui.series.list_failed", error = %err, "series listing failed");
                self.set_toast(format!("Failed to list graphs: {err}"));
            }
            AsyncEvent::SeriesLoaded { generation, .. } if generation != self.load_generation => {}
            AsyncEvent::SeriesLoaded { id, result, .. } => {
                let slot = match result {
                    Ok(series) => {
                        tracing::debug!(
                            event = "tui.series.loaded",
                            series = %id,
                            snapshots = series.len(),
                            "series loaded"
                        );
                        SeriesSlot::Loaded(Arc::new(series))
                    }
                    Err(err) => {
                        tracing::warn!(
                            event = "tui.series.load_failed",
                            series = %id,
                            error = %err,
                            "series load failed"
                        );
                        SeriesSlot::Failed(err)
                    }
                };
                self.series.insert(id, slot);
            }
            AsyncEvent::Scored { ticket, result } => {
                self.tracker.apply(&ticket, result);
            }
        }
    }

    /// Re-derives the comparison and issues a score request after the selection moved past `before`.
    fn after_selection_change(&mut self, before: u64) {
        if self.selection.rev() == before {
            return;
        }

        let parser = self.parser();
        let pair = self.selection.comparison_pair();
        self.comparison = pair.map(|(first, second)| Comparison::between(first, second));
        let request = self.tracker.sync(pair, parser);
        self.detail_scroll = 0;
        self.show_full_error = false;

        if let Some((ticket, request)) = request {
            self.spawn_score(ticket, request);
        }
    }

    fn spawn_score(&self, ticket: ScoreTicket, request: SimilarityRequest) {
        let scorer = self.scorer.clone();
        let tx = self.events_tx.clone();
        tracing::debug!(
            event = "tui.score.requested",
            generation = ticket.generation(),
            parser = %request.parser,
            "similarity requested"
        );
        self.runtime.spawn(async move {
            let result = scorer.score(&request).await;
            let _ = tx.send(AsyncEvent::Scored { ticket, result });
        });
    }

    fn click_point(&mut self, id: &SeriesId, ordinal: Option<usize>, multi_select: bool) {
        let point = ordinal
            .zip(self.loaded_series(id))
            .and_then(|(ordinal, series)| SelectedPoint::in_series(&series, ordinal));
        let before = self.selection.rev();
        self.selection.select_point(point, multi_select);
        self.after_selection_change(before);
    }

    fn navigate(&mut self, direction: NavDirection) -> NavOutcome {
        let Some(series) = self.focused_series().and_then(|id| self.loaded_series(id)) else {
            return NavOutcome::NotApplicable;
        };
        let before = self.selection.rev();
        let outcome = self.selection.navigate(&series, direction);
        match outcome {
            NavOutcome::Moved => self.after_selection_change(before),
            NavOutcome::Rejected(reason) => self.set_toast(format!("Cannot move: {reason}")),
            NavOutcome::NotApplicable => {}
        }
        outcome
    }

    fn select_edge(&mut self, last: bool) {
        let Some(id) = self.focused_series().cloned() else {
            return;
        };
        let Some(series) = self.loaded_series(&id) else {
            self.set_toast("Graph is not loaded yet");
            return;
        };
        if series.is_empty() {
            self.set_toast("Graph has no snapshots");
            return;
        }
        let ordinal = if last { series.len() } else { 1 };
        self.click_point(&id, Some(ordinal), last);
    }

    fn handle_key(&mut self, key: KeyEvent) {
        if self.handle_key_code(key.code) {
            self.should_quit = true;
        }
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) {
        let MouseEventKind::Down(MouseButton::Left) = mouse.kind else {
            return;
        };
        let multi_select = mouse
            .modifiers
            .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT | KeyModifiers::SUPER);
        self.click_at(mouse.column, mouse.row, multi_select);
    }

    fn click_at(&mut self, column: u16, row: u16, multi_select: bool) {
        let position = Position::new(column, row);
        let Some((index, hit)) = self
            .panel_hits
            .iter()
            .enumerate()
            .find(|(_, hit)| hit.area.contains(position))
            .map(|(index, hit)| (index, hit.clone()))
        else {
            return;
        };

        self.focus = Focus::Panel(index);
        let ordinal = hit.plot.and_then(|plot| plot.ordinal_at(column, row));
        self.click_point(&hit.id, ordinal, multi_select);
    }

    fn handle_key_code(&mut self, code: KeyCode) -> bool {
        if self.show_help {
            match code {
                KeyCode::Esc | KeyCode::Char('?') => self.show_help = false,
                KeyCode::Char('q') => return true,
                KeyCode::Down | KeyCode::Char('j') => self.help_scroll = self.help_scroll.saturating_add(1),
                KeyCode::Up | KeyCode::Char('k') => self.help_scroll = self.help_scroll.saturating_sub(1),
                KeyCode::PageDown => {
                    self.help_scroll = self.help_scroll.saturating_add(self.help_page())
                }
                KeyCode::PageUp => self.help_scroll = self.help_scroll.saturating_sub(self.help_page()),
                KeyCode::Home => self.help_scroll = 0,
                KeyCode::End => self.help_scroll = u16::MAX,
                _ => {}
            }
            return false;
        }

        if self.picker.is_editing() {
            match code {
                KeyCode::Esc => self.picker.finish_filter(false),
                KeyCode::Enter => self.picker.finish_filter(true),
                KeyCode::Backspace => self.picker.pop_char(),
                KeyCode::Up => self.picker.move_cursor(-1),
                KeyCode::Down => self.picker.move_cursor(1),
                KeyCode::Char(ch) => self.picker.push_char(ch),
                _ => {}
            }
            return false;
        }

        match code {
            KeyCode::Char('q') => return true,
            KeyCode::Char('?') => {
                self.show_help = true;
                self.help_scroll = 0;
            }
            KeyCode::Tab => self.focus = self.focus.cycle(self.visible.len()),
            KeyCode::BackTab => self.focus = self.focus.cycle_back(self.visible.len()),
            KeyCode::Char('[') => self.cycle_assignment(-1),
            KeyCode::Char(']') => self.cycle_assignment(1),
            KeyCode::Char('e') => self.toggle_full_error(),
            KeyCode::Char('y') => self.yank_code(),
            KeyCode::PageDown => self.detail_scroll = self.detail_scroll.saturating_add(5),
            KeyCode::PageUp => self.detail_scroll = self.detail_scroll.saturating_sub(5),
            _ => match self.focus {
                Focus::Picker => self.handle_picker_key(code),
                Focus::Panel(_) => self.handle_panel_key(code),
            },
        }
        false
    }

    fn handle_picker_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Up | KeyCode::Char('k') => self.picker.move_cursor(-1),
            KeyCode::Down | KeyCode::Char('j') => self.picker.move_cursor(1),
            KeyCode::Char(' ') | KeyCode::Enter => {
                if let Some(id) = self.picker.cursor_entry().cloned() {
                    self.toggle_series(id);
                }
            }
            KeyCode::Char('/') => self.picker.start_filter(),
            KeyCode::Esc => self.picker.finish_filter(false),
            _ => {}
        }
    }

    fn handle_panel_key(&mut self, code: KeyCode) {
        let direction = match code {
            KeyCode::Left | KeyCode::Char('h') => NavDirection::Left,
            KeyCode::Right | KeyCode::Char('l') => NavDirection::Right,
            KeyCode::Up | KeyCode::Char('k') => NavDirection::Up,
            KeyCode::Down | KeyCode::Char('j') => NavDirection::Down,
            KeyCode::Home => return self.select_edge(false),
            KeyCode::End => return self.select_edge(true),
            KeyCode::Char('x') => {
                if let Some(id) = self.focused_series().cloned() {
                    self.toggle_series(id);
                }
                return;
            }
            _ => return,
        };

        // Vertical keys scroll the detail pane when this panel has nothing selected.
        if self.navigate(direction) == NavOutcome::NotApplicable {
            match direction {
                NavDirection::Up => self.detail_scroll = self.detail_scroll.saturating_sub(1),
                NavDirection::Down => self.detail_scroll = self.detail_scroll.saturating_add(1),
                NavDirection::Left | NavDirection::Right => {}
            }
        }
    }

    fn help_page(&self) -> u16 {
        self.help_viewport_height.max(2) - 1
    }

    fn toggle_full_error(&mut self) {
        if self.tracker.state().is_error() {
            self.show_full_error = !self.show_full_error;
        } else {
            self.set_toast("No similarity error to show");
        }
    }

    /// Code of the focused panel's last selected point, else of the anchor.
    fn yank_target(&self) -> Option<SelectedPoint> {
        let focused = self
            .focused_series()
            .and_then(|id| self.selection.highlight_set_for(id).pop());
        focused.or_else(|| self.selection.selection().first().cloned())
    }

    fn yank_code(&mut self) {
        let Some(point) = self.yank_target() else {
            self.set_toast("No snapshot selected");
            return;
        };
        let Some(code) = point.code() else {
            self.set_toast(format!("No code in {}", point.title()));
            return;
        };

        match copy_to_clipboard(code) {
            Ok(backend) => self.set_toast(format!("Yanked code of {} ({backend})", point.title())),
            Err(err) => self.set_toast(format!("Clipboard error: {err}")),
        }
    }

    fn set_toast(&mut self, message: impl Into<String>) {
        self.toast = Some(Toast { message: message.into(), expires_at: Instant::now() + TOAST_TTL });
    }
}

struct TerminalSession {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
}

impl TerminalSession {
    fn new() -> Result<Self, Box<dyn Error>> {
        enable_raw_mode()?;

        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture).map_err(|err| {
            teardown_terminal();
            err
        })?;

        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend).map_err(|err| {
            teardown_terminal();
            err
        })?;
        terminal.clear().map_err(|err| {
            teardown_terminal();
            err
        })?;

        Ok(Self { terminal })
    }

    fn draw(&mut self, draw_fn: impl FnOnce(&mut Frame<'_>)) -> io::Result<()> {
        self.terminal.draw(draw_fn)?;
        Ok(())
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        let _ = self.terminal.show_cursor();
        teardown_terminal();
    }
}

fn teardown_terminal() {
    let _ = disable_raw_mode();
    let mut stdout = io::stdout();
    let _ = execute!(stdout, DisableMouseCapture, LeaveAlternateScreen);
}

fn copy_to_clipboard(text: &str) -> Result<&'static str, String> {
    let mut stdout = io::stdout();
    execute!(stdout, Print(osc52_sequence(text))).map_err(|err| err.to_string())?;
    Ok("osc52")
}

fn osc52_sequence(text: &str) -> String {
    use base64::engine::general_purpose::STANDARD;
    use base64::Engine as _;

    let encoded = STANDARD.encode(text.as_bytes());
    format!("\x1b]52;c;{encoded}\x1b\\")
}

#[cfg(test)]
mod tests;
