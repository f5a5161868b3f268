//! Panel 4 (Help): keyboard shortcuts and payoff settings.

use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::app::AppState;
use crate::theme;

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let mut lines: Vec<Line> = Vec::new();

    section(&mut lines, "Global Navigation");
    key(&mut lines, "1-4", "Switch to panel by number");
    key(&mut lines, "Tab / Shift+Tab", "Cycle panels forward / back");
    key(&mut lines, "q", "Quit");
    lines.push(Line::from(""));

    section(&mut lines, "Records");
    key(&mut lines, "n / p  (] / [)", "Next / previous record");
    key(&mut lines, "N / P", "Next / previous trading date");
    key(&mut lines, "f", "Cycle session filter");
    key(&mut lines, "e", "Cycle expiry");
    lines.push(Line::from(""));

    section(&mut lines, "Chain panel");
    key(&mut lines, "j / k", "Move strike cursor");
    key(&mut lines, "b / s", "Buy / sell call at cursor strike");
    key(&mut lines, "B / S", "Buy / sell put at cursor strike");
    lines.push(Line::from(""));

    section(&mut lines, "Basket");
    key(&mut lines, "u", "Remove last leg");
    key(&mut lines, "X", "Clear basket");
    lines.push(Line::from(""));

    section(&mut lines, "Payoff at settlement");
    let p = app.engine.params;
    let g = app.engine.grid;
    key(&mut lines, "multiplier", &format!("{} per point", p.multiplier));
    key(&mut lines, "fee", &format!("{} per contract", p.fee));
    key(&mut lines, "grid", &format!("reference ± {} step {}", g.half_width, g.step));

    f.render_widget(Paragraph::new(lines), area);
}

fn section(lines: &mut Vec<Line<'_>>, title: &str) {
    lines.push(Line::from(Span::styled(title.to_string(), theme::accent_bold())));
}

fn key(lines: &mut Vec<Line<'_>>, keys: &str, desc: &str) {
    lines.push(Line::from(vec![
        Span::styled(format!("  {:>20}  ", keys), theme::accent()),
        Span::styled(desc.to_string(), theme::muted()),
    ]));
}
