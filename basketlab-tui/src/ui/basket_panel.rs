//! Panel 2 (Basket): ledger table and curve summary.

use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use basketlab_core::pnl::leg_payoff;

use crate::app::AppState;
use crate::theme;

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let mut lines: Vec<Line> = Vec::new();

    lines.push(Line::from(vec![
        Span::styled(format!("{} legs", app.ledger.len()), theme::accent()),
        Span::styled("  [u]ndo last  [X] clear", theme::muted()),
    ]));
    lines.push(Line::from(""));

    if app.ledger.is_empty() {
        lines.push(Line::from(Span::styled(
            "Basket is empty. Trade from the Chain panel (press 1).",
            theme::muted(),
        )));
        f.render_widget(Paragraph::new(lines), area);
        return;
    }

    let reference = app.curve.as_ref().map(|c| c.reference_price);
    let params = app.engine.params;

    lines.push(Line::from(Span::styled(
        format!(
            "{:>3} {:<11} {:<11} {:<5} {:<5} {:>8} {:>8} {:>4} {:>12}",
            "#", "Date", "Session", "Side", "Right", "Strike", "Premium", "Qty", "P&L @ ref"
        ),
        theme::accent_bold(),
    )));

    for (i, leg) in app.ledger.iter().enumerate() {
        let at_ref = reference.map(|r| leg_payoff(leg, r as f64, &params));
        lines.push(Line::from(vec![
            Span::styled(format!("{:>3} ", i + 1), theme::muted()),
            Span::raw(format!("{:<11} {:<11} ", leg.date_label(), leg.session())),
            Span::styled(format!("{:<5} ", leg.action()), theme::action_style(leg.action())),
            Span::raw(format!(
                "{:<5} {:>8} {:>8.1} {:>4} ",
                leg.right(),
                leg.strike(),
                leg.premium(),
                leg.quantity()
            )),
            match at_ref {
                Some(v) => Span::styled(format!("{v:>12.0}"), theme::pnl_style(v)),
                None => Span::styled(format!("{:>12}", "-"), theme::muted()),
            },
        ]));
    }

    lines.push(Line::from(""));
    match app.curve.as_ref().and_then(|c| c.summary().map(|s| (c.reference_price, s))) {
        Some((reference, summary)) => {
            lines.push(Line::from(vec![
                Span::styled("Reference ", theme::muted()),
                Span::styled(reference.to_string(), theme::neutral()),
            ]));
            lines.push(Line::from(vec![
                Span::styled("Max P&L   ", theme::muted()),
                Span::styled(format!("{:.0}", summary.max_pnl), theme::pnl_style(summary.max_pnl)),
                Span::styled(format!(" at {}", summary.max_at), theme::muted()),
            ]));
            lines.push(Line::from(vec![
                Span::styled("Min P&L   ", theme::muted()),
                Span::styled(format!("{:.0}", summary.min_pnl), theme::pnl_style(summary.min_pnl)),
                Span::styled(format!(" at {}", summary.min_at), theme::muted()),
            ]));
            let breakevens = if summary.breakevens.is_empty() {
                "none in range".to_string()
            } else {
                summary
                    .breakevens
                    .iter()
                    .map(|b| format!("{b:.0}"))
                    .collect::<Vec<_>>()
                    .join(", ")
            };
            lines.push(Line::from(vec![
                Span::styled("Breakeven ", theme::muted()),
                Span::raw(breakevens),
            ]));
        }
        None => lines.push(Line::from(Span::styled(
            "No curve: the selected record has no ATM strike.",
            theme::warning(),
        ))),
    }

    f.render_widget(Paragraph::new(lines), area);
}
