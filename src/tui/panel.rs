// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Snapgraph-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Snapgraph and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Graph panel: one series plotted on a braille canvas.

use ratatui::{
    prelude::*,
    symbols::Marker,
    widgets::{
        canvas::{Canvas, Context, Line as CanvasLine, Points},
        Block, Borders, Paragraph, Wrap,
    },
};

use crate::model::{Series, SnapshotRecord};

pub(super) const REAL_PROGRESS_COLOR: Color = Color::Green;
pub(super) const ESTIMATED_PROGRESS_COLOR: Color = Color::Cyan;
/// Marker color per selection slot (anchor, comparand).
pub(super) const SLOT_COLORS: [Color; 2] = [Color::LightRed, Color::LightYellow];

/// What a panel has to show for its series.
pub(super) enum PanelContent<'a> {
    Loading,
    Failed(&'a str),
    Loaded(&'a Series),
}

/// A selected point as seen by one panel: its slot in the global selection and its ordinal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) struct PanelMarker {
    pub(super) slot: usize,
    pub(super) ordinal: usize,
}

/// Maps between series ordinals and terminal columns of a plot area.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) struct PlotGeometry {
    pub(super) area: Rect,
    pub(super) len: usize,
}

impl PlotGeometry {
    pub(super) fn x_bounds(&self) -> [f64; 2] {
        if self.len <= 1 {
            [0.0, 2.0]
        } else {
            [1.0, self.len as f64]
        }
    }

    /// Column the canvas draws `ordinal` in (braille grid, two dots per cell).
    pub(super) fn column_of(&self, ordinal: usize) -> u16 {
        let [left, right] = self.x_bounds();
        let frac = ((ordinal as f64 - left) / (right - left)).clamp(0.0, 1.0);
        let dots = f64::from(self.area.width) * 2.0 - 1.0;
        let dot = (frac * dots.max(0.0)) as u16;
        self.area.x + dot / 2
    }

    /// Nearest ordinal to a click, if one is drawn within one column of it.
    pub(super) fn ordinal_at(&self, column: u16, row: u16) -> Option<usize> {
        if self.len == 0 || !self.area.contains(Position::new(column, row)) {
            return None;
        }

        let mut best: Option<(u16, usize)> = None;
        for ordinal in 1..=self.len {
            let distance = self.column_of(ordinal).abs_diff(column);
            match best {
                Some((best_distance, _)) if best_distance <= distance => {}
                _ => best = Some((distance, ordinal)),
            }
        }
        best.filter(|(distance, _)| *distance <= 1).map(|(_, ordinal)| ordinal)
    }
}

/// Draws one panel and returns the plot geometry used for mouse hit-testing.
pub(super) fn render_panel(
    frame: &mut Frame<'_>,
    area: Rect,
    title: Line<'static>,
    border_style: Style,
    content: PanelContent<'_>,
    markers: &[PanelMarker],
) -> Option<PlotGeometry> {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(title)
        .title_bottom(legend_line())
        .border_style(border_style);

    let series = match content {
        PanelContent::Loading => {
            let body = Paragraph::new("Loading...").style(Style::default().fg(Color::DarkGray));
            frame.render_widget(body.block(block), area);
            return None;
        }
        PanelContent::Failed(message) => {
            let body = Paragraph::new(format!("Failed to load: {message}"))
                .style(Style::default().fg(Color::Red))
                .wrap(Wrap { trim: true });
            frame.render_widget(body.block(block), area);
            return None;
        }
        PanelContent::Loaded(series) if series.is_empty() => {
            let body = Paragraph::new("No snapshots").style(Style::default().fg(Color::DarkGray));
            frame.render_widget(body.block(block), area);
            return None;
        }
        PanelContent::Loaded(series) => series,
    };

    let geometry = PlotGeometry { area: block.inner(area), len: series.len() };
    let real = progress_points(series, |record| record.real_progress());
    let estimated = progress_points(series, |record| record.estimated_progress());
    let y_max = real
        .iter()
        .chain(estimated.iter())
        .map(|(_, y)| *y)
        .fold(1.0_f64, f64::max);

    let marker_points = markers
        .iter()
        .filter_map(|marker| {
            let y = real
                .iter()
                .chain(estimated.iter())
                .find(|(x, _)| *x == marker.ordinal as f64)
                .map(|(_, y)| *y)
                .unwrap_or(0.0);
            let color = SLOT_COLORS.get(marker.slot).copied()?;
            Some((marker.slot, marker.ordinal as f64, y, color))
        })
        .collect::<Vec<_>>();

    let canvas = Canvas::default()
        .block(block)
        .marker(Marker::Braille)
        .x_bounds(geometry.x_bounds())
        .y_bounds([0.0, y_max])
        .paint(|ctx| {
            for (_, x, _, _) in &marker_points {
                ctx.draw(&CanvasLine { x1: *x, y1: 0.0, x2: *x, y2: y_max, color: Color::DarkGray });
            }
            ctx.layer();
            draw_polyline(ctx, &estimated, ESTIMATED_PROGRESS_COLOR);
            draw_polyline(ctx, &real, REAL_PROGRESS_COLOR);
            ctx.layer();
            for (slot, x, y, color) in &marker_points {
                ctx.draw(&Points { coords: &[(*x, *y)], color: *color });
                ctx.print(
                    *x,
                    y_max,
                    Span::styled(
                        format!("{}", slot + 1),
                        Style::default().fg(*color).add_modifier(Modifier::BOLD),
                    ),
                );
            }
        });
    frame.render_widget(canvas, area);

    Some(geometry)
}

fn progress_points(
    series: &Series,
    value: impl Fn(&SnapshotRecord) -> Option<f64>,
) -> Vec<(f64, f64)> {
    series
        .records()
        .iter()
        .filter_map(|record| value(record).map(|y| (record.ordinal() as f64, y)))
        .collect()
}

fn draw_polyline(ctx: &mut Context<'_>, points: &[(f64, f64)], color: Color) {
    match points {
        [] => {}
        [(x, y)] => ctx.draw(&Points { coords: &[(*x, *y)], color }),
        _ => {
            for pair in points.windows(2) {
                let [(x1, y1), (x2, y2)] = [pair[0], pair[1]];
                ctx.draw(&CanvasLine { x1, y1, x2, y2, color });
            }
        }
    }
}

fn legend_line() -> Line<'static> {
    Line::from(vec![
        Span::raw(" "),
        Span::styled("━ real", Style::default().fg(REAL_PROGRESS_COLOR)),
        Span::raw("  "),
        Span::styled("━ estimated", Style::default().fg(ESTIMATED_PROGRESS_COLOR)),
        Span::raw(" "),
    ])
}
