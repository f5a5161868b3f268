//! Panel 1 (Chain): record header and the call / strike / put ladder.

use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use basketlab_core::chain::SessionFilter;
use basketlab_core::Quote;

use crate::app::AppState;
use crate::theme;

const HEADER_ROWS: usize = 5;

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let mut lines: Vec<Line> = Vec::new();

    let Some(record) = app.current_record() else {
        lines.push(Line::from(Span::styled("No records loaded.", theme::muted())));
        f.render_widget(Paragraph::new(lines), area);
        return;
    };

    let snapshot = app.snapshot();
    let dash = || "-".to_string();
    let expiries = app.expiries();

    lines.push(Line::from(vec![
        Span::styled(format!("#{} ", record.number), theme::accent_bold()),
        Span::styled(
            format!("{}  {}", record.date.format("%Y/%m/%d"), record.session),
            theme::accent(),
        ),
        Span::styled(
            format!(
                "   sessions: {}   filter: {}",
                app.data
                    .book
                    .sessions_on(record.date, &SessionFilter::All)
                    .join(" "),
                app.session_filter.label()
            ),
            theme::muted(),
        ),
    ]));
    lines.push(Line::from(vec![
        Span::styled("Expiry ", theme::muted()),
        Span::styled(
            app.current_expiry().unwrap_or("-").to_string(),
            theme::accent(),
        ),
        Span::styled(
            format!("  ({}/{})", (app.expiry_idx + 1).min(expiries.len()), expiries.len()),
            theme::muted(),
        ),
        Span::styled("   Close ", theme::muted()),
        Span::raw(snapshot.and_then(|s| s.close).map_or_else(dash, |c| format!("{c}"))),
        Span::styled("   Days ", theme::muted()),
        Span::raw(
            snapshot
                .and_then(|s| s.days_remaining)
                .map_or_else(dash, |d| d.to_string()),
        ),
        Span::styled("   ATM ", theme::muted()),
        Span::styled(
            app.atm().map_or_else(dash, |a| a.to_string()),
            theme::neutral(),
        ),
    ]));
    lines.push(Line::from(Span::styled(
        "[n/p]record [N/P]date [f]ilter [e]xpiry [j/k]strike [b/s]call [B/S]put",
        theme::muted(),
    )));
    lines.push(Line::from(""));

    let rows = app.ladder();
    if rows.is_empty() {
        lines.push(Line::from(Span::styled(
            "No ATM strike for this record; ladder unavailable.",
            theme::warning(),
        )));
        f.render_widget(Paragraph::new(lines), area);
        return;
    }

    lines.push(Line::from(Span::styled(
        format!("{:>10}  {:>8}  {:<10}", "Call", "Strike", "Put"),
        theme::accent_bold(),
    )));

    // Keep the cursor row visible.
    let visible = (area.height as usize).saturating_sub(HEADER_ROWS).max(1);
    let start = app.cursor.saturating_sub(visible / 2).min(rows.len().saturating_sub(visible));
    let end = (start + visible).min(rows.len());

    for (i, row) in rows.iter().enumerate().take(end).skip(start) {
        let is_cursor = i == app.cursor;
        let strike_style = if is_cursor {
            theme::cursor()
        } else if row.is_atm {
            theme::neutral()
        } else {
            theme::muted()
        };
        lines.push(Line::from(vec![
            Span::styled(format!("{:>10}", row.call.to_string()), quote_style(row.call, is_cursor)),
            Span::raw("  "),
            Span::styled(format!("{:>8}", row.strike), strike_style),
            Span::raw("  "),
            Span::styled(format!("{:<10}", row.put.to_string()), quote_style(row.put, is_cursor)),
        ]));
    }

    f.render_widget(Paragraph::new(lines), area);
}

fn quote_style(quote: Quote, is_cursor: bool) -> Style {
    match (quote.is_available(), is_cursor) {
        (true, true) => theme::cursor(),
        (true, false) => theme::accent(),
        (false, _) => theme::muted(),
    }
}
