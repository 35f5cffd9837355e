// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Snapgraph-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Snapgraph and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Detail pane: single-snapshot view and the cross-graph comparison.

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph, Wrap},
};

use crate::compare::{metadata_fields, Comparison, DiffLine, DiffTag, ScoreState, COMPARISON_FIELDS};
use crate::model::SelectedPoint;

use super::panel::SLOT_COLORS;

const SCORE_COLOR: Color = Color::LightBlue;
const ERROR_COLOR: Color = Color::LightRed;

pub(super) fn score_style(state: &ScoreState) -> Style {
    let color = if state.is_error() { ERROR_COLOR } else { SCORE_COLOR };
    Style::default().fg(color).add_modifier(Modifier::BOLD)
}

pub(super) fn empty_lines() -> Vec<Line<'static>> {
    vec![
        Line::from("Click a point to inspect a snapshot."),
        Line::from("Ctrl/Alt+click a second point (any graph) to compare."),
    ]
    .into_iter()
    .map(|line| line.style(Style::default().fg(Color::DarkGray)))
    .collect()
}

/// Metadata, extra columns and code of one snapshot.
pub(super) fn single_lines(point: &SelectedPoint) -> Vec<Line<'static>> {
    let mut lines = vec![Line::from(Span::styled(
        point.title(),
        Style::default().fg(SLOT_COLORS[0]).add_modifier(Modifier::BOLD),
    ))];
    for (label, value) in metadata_fields(point.record()) {
        lines.push(field_line(label, value));
    }

    let extra = point.record().extra_metadata().collect::<Vec<_>>();
    let shown = extra.iter().filter(|(key, _)| !is_comparison_field(key)).collect::<Vec<_>>();
    if !shown.is_empty() {
        lines.push(Line::default());
        for (key, value) in shown {
            lines.push(field_line(key, value.to_string()));
        }
    }

    lines.push(Line::default());
    match point.code() {
        Some(code) => {
            lines.push(Line::from(Span::styled("Code", header_style())));
            lines.extend(code.lines().map(|line| Line::from(line.to_owned())));
        }
        None => lines.push(Line::from(Span::styled(
            "No code recorded for this snapshot",
            Style::default().fg(Color::DarkGray),
        ))),
    }
    lines
}

fn is_comparison_field(key: &str) -> bool {
    COMPARISON_FIELDS.iter().any(|(field, _)| *field == key)
}

/// Score, elapsed time, both snapshots' fields and the code diff.
pub(super) fn comparison_lines(
    comparison: &Comparison,
    state: &ScoreState,
    show_full_error: bool,
) -> Vec<Line<'static>> {
    let elapsed = comparison.elapsed.clone().unwrap_or_else(|| "unknown".to_owned());
    let mut lines = vec![Line::from(vec![
        Span::styled(state.label(), score_style(state)),
        Span::raw("   "),
        Span::styled("Time between snapshots: ", Style::default().fg(Color::Gray)),
        Span::raw(elapsed),
    ])];

    if show_full_error {
        if let Some(error) = state.error() {
            lines.push(Line::from(Span::styled(error.to_owned(), Style::default().fg(ERROR_COLOR))));
        }
        if let Some(detail) = state.detail().filter(|detail| !detail.trim().is_empty()) {
            lines.push(Line::from(Span::styled("Detail:", Style::default().fg(Color::Gray))));
            lines.extend(detail.lines().map(|line| {
                Line::from(Span::styled(line.to_owned(), Style::default().fg(ERROR_COLOR)))
            }));
        }
    }
    lines.push(Line::default());

    let width = comparison.titles[0].chars().count().max(24);
    lines.push(Line::from(vec![
        Span::styled(
            format!("{:<width$}", comparison.titles[0]),
            Style::default().fg(SLOT_COLORS[0]).add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        Span::styled(
            comparison.titles[1].clone(),
            Style::default().fg(SLOT_COLORS[1]).add_modifier(Modifier::BOLD),
        ),
    ]));
    for ((label, left), (_, right)) in comparison.fields[0].iter().zip(comparison.fields[1].iter()) {
        let left = format!("{label}: {left}");
        lines.push(Line::from(vec![
            Span::raw(format!("{left:<width$}")),
            Span::raw("  "),
            Span::raw(format!("{label}: {right}")),
        ]));
    }

    lines.push(Line::default());
    lines.push(Line::from(Span::styled(
        format!("Code Differences ({} changed lines)", comparison.changed_lines()),
        header_style(),
    )));
    lines.extend(comparison.diff.iter().map(diff_line));
    lines
}

fn diff_line(line: &DiffLine) -> Line<'static> {
    let style = match line.tag {
        DiffTag::Equal => Style::default(),
        DiffTag::Removed => Style::default().fg(Color::Red),
        DiffTag::Added => Style::default().fg(Color::Green),
    };
    let number = |value: Option<usize>| value.map(|n| format!("{n:>4}")).unwrap_or_else(|| "    ".to_owned());
    Line::from(vec![
        Span::styled(
            format!("{} {} ", number(line.old_line), number(line.new_line)),
            Style::default().fg(Color::DarkGray),
        ),
        Span::styled(format!("{} {}", line.tag.sign(), line.text), style),
    ])
}

fn field_line(label: &str, value: String) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{label}: "), Style::default().fg(Color::Gray)),
        Span::raw(value),
    ])
}

fn header_style() -> Style {
    Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
}

pub(super) fn render_detail(
    frame: &mut Frame<'_>,
    area: Rect,
    title: &str,
    lines: Vec<Line<'static>>,
    scroll: u16,
) {
    let paragraph = Paragraph::new(Text::from(lines))
        .block(Block::default().borders(Borders::ALL).title(title.to_owned()))
        .wrap(Wrap { trim: false })
        .scroll((scroll, 0));
    frame.render_widget(paragraph, area);
}
