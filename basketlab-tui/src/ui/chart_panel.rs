//! Panel 3 (Chart): basket P&L across the settlement grid.

use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::symbols;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Axis, Chart, Dataset, GraphType, Paragraph};
use ratatui::Frame;

use basketlab_core::pnl::{CurveSeries, SeriesMeta};

use crate::app::AppState;
use crate::theme;

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    match app.curve.as_ref().and_then(|c| c.series(SeriesMeta::default())) {
        Some(series) => render_chart(f, area, &series, app.ledger.len()),
        None => render_empty(f, area),
    }
}

fn render_empty(f: &mut Frame, area: Rect) {
    let lines = vec![
        Line::from(""),
        Line::from(""),
        Line::from(Span::styled(
            "No curve for this record: it has no ATM strike.",
            theme::muted(),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Move to another record with n / p (or N / P for dates).",
            theme::muted(),
        )),
    ];
    f.render_widget(Paragraph::new(lines), area);
}

/// Y bounds that always include zero, padded by 5%.
pub fn y_bounds(series: &CurveSeries) -> [f64; 2] {
    let min_y = series.summary.min_pnl.min(0.0);
    let max_y = series.summary.max_pnl.max(0.0);
    let padding = ((max_y - min_y).abs() * 0.05).max(1.0);
    [min_y - padding, max_y + padding]
}

fn render_chart(f: &mut Frame, area: Rect, series: &CurveSeries, legs: usize) {
    let data: Vec<(f64, f64)> = series
        .points
        .iter()
        .map(|p| (p.settlement as f64, p.pnl))
        .collect();

    let x_min = data.first().map_or(0.0, |p| p.0);
    let x_max = data.last().map_or(1.0, |p| p.0).max(x_min + 1.0);
    let [y_min, y_max] = y_bounds(series);

    let baseline = [(x_min, 0.0), (x_max, 0.0)];
    let reference = [
        (series.reference_price as f64, y_min),
        (series.reference_price as f64, y_max),
    ];

    let label = format!("{} ({legs} legs)", series.meta.name);
    let mut datasets = Vec::new();
    if series.meta.zero_baseline {
        datasets.push(
            Dataset::default()
                .marker(symbols::Marker::Braille)
                .style(theme::muted())
                .graph_type(GraphType::Line)
                .data(&baseline),
        );
    }
    datasets.push(
        Dataset::default()
            .marker(symbols::Marker::Braille)
            .style(theme::neutral())
            .graph_type(GraphType::Line)
            .data(&reference),
    );
    datasets.push(
        Dataset::default()
            .name(label)
            .marker(symbols::Marker::Braille)
            .style(Style::default().fg(theme::ACCENT))
            .graph_type(GraphType::Line)
            .data(&data),
    );

    let chart = Chart::new(datasets)
        .x_axis(
            Axis::default()
                .title(Span::styled(series.meta.x_title.as_str(), theme::muted()))
                .style(theme::muted())
                .bounds([x_min, x_max])
                .labels(vec![
                    Span::styled(format!("{x_min:.0}"), theme::muted()),
                    Span::styled(format!("{}", series.reference_price), theme::neutral()),
                    Span::styled(format!("{x_max:.0}"), theme::muted()),
                ]),
        )
        .y_axis(
            Axis::default()
                .title(Span::styled(series.meta.y_title.as_str(), theme::muted()))
                .style(theme::muted())
                .bounds([y_min, y_max])
                .labels(vec![
                    Span::styled(format!("{y_min:.0}"), theme::muted()),
                    Span::styled("0", theme::muted()),
                    Span::styled(format!("{y_max:.0}"), theme::muted()),
                ]),
        );

    f.render_widget(chart, area);
}
