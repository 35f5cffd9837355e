// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Snapgraph-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Snapgraph and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

// Layout, title, footer, help, and style helpers used by TUI rendering.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Focus {
    Picker,
    Panel(usize),
}

impl Focus {
    /// Next stop in `Picker -> Panel(0) -> .. -> Panel(panels - 1) -> Picker`.
    fn cycle(self, panels: usize) -> Self {
        match self {
            Self::Picker if panels > 0 => Self::Panel(0),
            Self::Panel(index) if index + 1 < panels => Self::Panel(index + 1),
            _ => Self::Picker,
        }
    }

    fn cycle_back(self, panels: usize) -> Self {
        match self {
            Self::Picker if panels > 0 => Self::Panel(panels - 1),
            Self::Panel(index) if index > 0 && index <= panels => Self::Panel(index - 1),
            _ => Self::Picker,
        }
    }
}

fn panel_border_style(focused: bool) -> Style {
    if focused {
        Style::default().fg(FOCUS_COLOR)
    } else {
        Style::default()
    }
}

fn view_title(label: &str, tail: Option<&str>) -> String {
    let mut title = format!("─ {label}");
    if let Some(tail) = tail {
        let tail = tail.trim();
        if !tail.is_empty() {
            title.push(' ');
            title.push_str(tail);
        }
    }
    title.push(' ');
    title
}

fn panel_title(id: &SeriesId, len: Option<usize>, focused: bool) -> Line<'static> {
    let name_color = if focused { Color::White } else { Color::Gray };
    let mut spans = vec![
        Span::raw("─ ".to_owned()),
        Span::styled(id.display_name().to_owned(), Style::default().fg(name_color)),
    ];
    if let Some(len) = len {
        spans.push(Span::styled(format!(" [{len}]"), Style::default().fg(Color::LightGreen)));
    }
    spans.push(Span::raw(" ".to_owned()));
    Line::from(spans)
}

fn assignment_counter_label(index: Option<usize>, total: usize) -> String {
    if total == 0 {
        return "[0/0]".to_owned();
    }

    let width = total.to_string().len();
    let index = index.map(|index| index + 1).unwrap_or(0).min(total);
    format!("[{index:0width$}/{total}]")
}

fn header_line(app: &App) -> Line<'static> {
    let label = app
        .current_assignment()
        .map(AssignmentEntry::label)
        .unwrap_or_else(|| "no assignment".to_owned());
    let loading = app.series.values().filter(|slot| matches!(slot, SeriesSlot::Loading)).count();

    let mut spans = vec![
        Span::styled("Assignment ", Style::default().fg(FOOTER_LABEL_COLOR)),
        Span::styled(
            assignment_counter_label(app.assignment_index, app.assignments.len()),
            Style::default().fg(Color::LightGreen),
        ),
        Span::raw(" "),
        Span::styled(label, Style::default().fg(Color::White).add_modifier(Modifier::BOLD)),
        Span::styled(
            format!("  {} of {} graphs shown", app.visible.len(), app.picker.entries().len()),
            Style::default().fg(FOOTER_LABEL_COLOR),
        ),
    ];
    if loading > 0 {
        spans.push(Span::styled(
            format!("  loading {loading}..."),
            Style::default().fg(Color::DarkGray),
        ));
    }
    Line::from(spans)
}

/// Panel rectangles for `count` panels: one column for a single panel, two otherwise, filled
/// row by row.
fn panel_grid(area: Rect, count: usize) -> Vec<Rect> {
    if count == 0 {
        return Vec::new();
    }

    let columns = if count == 1 { 1 } else { 2 };
    let rows = count.div_ceil(columns);
    let row_areas = Layout::default()
        .direction(Direction::Vertical)
        .constraints(vec![Constraint::Ratio(1, rows as u32); rows])
        .split(area);

    let mut rects = Vec::with_capacity(count);
    for row_area in row_areas.iter() {
        let cells = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(vec![Constraint::Ratio(1, columns as u32); columns])
            .split(*row_area);
        rects.extend(cells.iter().copied());
    }
    rects.truncate(count);
    rects
}

fn footer_help_line(app: &App, toast_suffix: &str) -> Line<'static> {
    let mut spans = Vec::<Span<'static>>::new();

    match app.focus {
        Focus::Picker => {
            push_footer_entry(&mut spans, "MOVE", "j/k");
            push_footer_entry(&mut spans, "SHOW", "Space");
            push_footer_entry(&mut spans, "FILTER", "/");
        }
        Focus::Panel(_) => {
            let has_point = app
                .focused_series()
                .is_some_and(|id| !app.selection.highlight_set_for(id).is_empty());
            push_footer_entry_maybe_disabled(&mut spans, "STEP", "←→↑↓", !has_point);
            push_footer_entry(&mut spans, "FIRST", "Home");
            push_footer_entry(&mut spans, "ADD LAST", "End");
            push_footer_entry(&mut spans, "HIDE", "x");
            push_footer_entry_maybe_disabled(&mut spans, "YANK", "y", app.selection.selection().is_empty());
        }
    }
    push_footer_entry_maybe_disabled(&mut spans, "ERROR", "e", !app.tracker.state().is_error());
    push_footer_entry(&mut spans, "ASSIGNMENT", "[]");
    push_footer_entry(&mut spans, "FOCUS", "Tab");
    push_footer_entry(&mut spans, "HELP", "?");
    push_footer_entry(&mut spans, "QUIT", "q");

    if !toast_suffix.is_empty() {
        spans.push(Span::styled(toast_suffix.to_owned(), Style::default().fg(Color::Yellow)));
    }
    Line::from(spans)
}

fn filter_footer_line(app: &App, toast_suffix: &str) -> Line<'static> {
    let mut spans = vec![
        Span::styled("/", Style::default().fg(FOOTER_KEY_COLOR).add_modifier(Modifier::BOLD)),
        Span::raw(app.picker.filter().to_owned()),
        Span::styled(
            format!("  ({} match)", app.picker.visible_len()),
            Style::default().fg(FOOTER_LABEL_COLOR),
        ),
    ];
    let mut entries = Vec::new();
    push_footer_entry(&mut entries, "KEEP", "Enter");
    push_footer_entry(&mut entries, "CANCEL", "Esc");
    spans.push(Span::raw("  "));
    spans.extend(entries);
    if !toast_suffix.is_empty() {
        spans.push(Span::styled(toast_suffix.to_owned(), Style::default().fg(Color::Yellow)));
    }
    Line::from(spans)
}

fn footer_brand_line() -> Line<'static> {
    Line::from(vec![Span::styled(
        FOOTER_BRAND.to_owned(),
        Style::default().fg(FOOTER_BRAND_COLOR),
    )])
}

fn help_key_style() -> Style {
    Style::default()
        .fg(FOOTER_KEY_COLOR)
        .add_modifier(Modifier::BOLD)
}

fn help_header_style() -> Style {
    Style::default()
        .fg(Color::White)
        .add_modifier(Modifier::BOLD)
}

fn centered_rect(width_percent: u16, height_percent: u16, area: Rect) -> Rect {
    let vertical_margin = (100u16.saturating_sub(height_percent)) / 2;
    let horizontal_margin = (100u16.saturating_sub(width_percent)) / 2;

    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(vertical_margin),
            Constraint::Percentage(height_percent),
            Constraint::Percentage(vertical_margin),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(horizontal_margin),
            Constraint::Percentage(width_percent),
            Constraint::Percentage(horizontal_margin),
        ])
        .split(vertical[1])[1]
}

fn help_kv(key: &str, desc: &str, key_width: usize, key_style: Style) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{key:>width$}", width = key_width), key_style),
        Span::raw("  "),
        Span::raw(desc.to_owned()),
    ])
}

fn help_lines() -> Vec<Line<'static>> {
    const GLOBAL: [(&str, &str); 8] = [
        ("?", "Help (toggle)"),
        ("q", "Quit"),
        ("Tab/Shift-Tab", "Focus next/previous panel"),
        ("[/]", "Previous/next assignment"),
        ("e", "Show/hide the full similarity error"),
        ("y", "Yank selected code (OSC 52)"),
        ("PgUp/PgDn", "Scroll the detail pane"),
        ("Esc", "Close help / cancel filter"),
    ];
    const PICKER: [(&str, &str); 3] = [
        ("j/k, ↑/↓", "Move cursor"),
        ("Space/Enter", "Show/hide graph"),
        ("/", "Fuzzy filter graphs"),
    ];
    const PANEL: [(&str, &str); 6] = [
        ("←/→", "Move the last selected point of this graph"),
        ("↑/↓", "Move the first selected point of this graph"),
        ("Home", "Select the first snapshot"),
        ("End", "Add the last snapshot to the selection"),
        ("x", "Hide this graph"),
        ("click", "Select; Ctrl/Alt+click adds a second point"),
    ];

    let key_style = help_key_style();
    let header_style = help_header_style();
    let key_col_width = GLOBAL
        .iter()
        .chain(PICKER.iter())
        .chain(PANEL.iter())
        .map(|(key, _)| key.chars().count())
        .max()
        .unwrap_or(0);

    let mut lines = Vec::<Line<'static>>::new();
    for (header, entries) in
        [("--- Global ---", &GLOBAL[..]), ("--- Graphs ---", &PICKER[..]), ("--- Panel ---", &PANEL[..])]
    {
        if !lines.is_empty() {
            lines.push(Line::default());
        }
        lines.push(Line::from(Span::styled(header, header_style)));
        for (key, desc) in entries {
            lines.push(help_kv(key, desc, key_col_width, key_style));
        }
    }
    lines.push(Line::default());
    lines.push(Line::from(Span::styled(
        "Two selected points show a comparison with an AST similarity score.",
        Style::default().fg(Color::DarkGray),
    )));
    lines
}

fn render_help(frame: &mut Frame<'_>, app: &mut App, main_area: Rect) {
    let area = centered_rect(70, 80, main_area);
    frame.render_widget(Clear, area);

    let lines = help_lines();
    let block = Block::default()
        .borders(Borders::ALL)
        .title("─ Help ─")
        .border_style(Style::default().fg(FOCUS_COLOR))
        .title_style(
            Style::default()
                .fg(FOCUS_COLOR)
                .add_modifier(Modifier::BOLD),
        );
    let inner = block.inner(area);
    app.help_viewport_height = inner.height;
    let max_scroll = lines
        .len()
        .saturating_sub(inner.height.max(1) as usize)
        .min(u16::MAX as usize) as u16;
    app.help_scroll = app.help_scroll.min(max_scroll);

    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false })
        .scroll((app.help_scroll, 0));
    frame.render_widget(paragraph, area);
}

fn push_footer_entry(spans: &mut Vec<Span<'static>>, label: &str, value: &str) {
    push_footer_entry_maybe_disabled(spans, label, value, false);
}

fn push_footer_entry_maybe_disabled(
    spans: &mut Vec<Span<'static>>,
    label: &str,
    value: &str,
    disabled: bool,
) {
    if !spans.is_empty() {
        spans.push(Span::styled(" | ".to_owned(), Style::default().fg(FOOTER_LABEL_COLOR)));
    }
    spans.push(Span::styled(
        format!("{}:", footer_label_ucfirst(label)),
        Style::default().fg(FOOTER_LABEL_COLOR),
    ));
    spans.push(footer_value_span(value, disabled));
}

fn footer_label_ucfirst(label: &str) -> String {
    let lower = label.to_lowercase();
    let mut chars = lower.chars();
    let Some(first) = chars.next() else {
        return String::new();
    };
    let mut out = first.to_uppercase().collect::<String>();
    out.push_str(chars.as_str());
    out
}

fn footer_value_span(value: &str, disabled: bool) -> Span<'static> {
    let color = if disabled { Color::DarkGray } else { FOOTER_KEY_COLOR };
    Span::styled(value.to_owned(), Style::default().fg(color).add_modifier(Modifier::BOLD))
}
