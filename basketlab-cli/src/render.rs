//! Plain-text and CSV output for the CLI commands.

use std::io::{self, Write};

use basketlab_core::chain::{ChainRow, RecordBook};
use basketlab_core::domain::{ExpirySnapshot, Record};
use basketlab_core::pnl::{payoff_bound, PayoffParams, SeriesPoint};
use basketlab_core::{PnlCurve, TradeLeg};

fn opt<T: std::fmt::Display>(value: Option<T>) -> String {
    value.map_or_else(|| "-".to_string(), |v| v.to_string())
}

pub fn curve_table(
    out: &mut impl Write,
    legs: &[TradeLeg],
    curve: &PnlCurve,
    params: &PayoffParams,
) -> io::Result<()> {
    writeln!(out, "=== Basket ({} legs) ===", legs.len())?;
    writeln!(
        out,
        "{:<4} {:<11} {:<8} {:<5} {:<5} {:>8} {:>9} {:>4} {:>10}",
        "#", "Date", "Session", "Side", "Right", "Strike", "Premium", "Qty", "Floor/Cap"
    )?;
    writeln!(out, "{}", "-".repeat(72))?;
    for (i, leg) in legs.iter().enumerate() {
        writeln!(
            out,
            "{:<4} {:<11} {:<8} {:<5} {:<5} {:>8} {:>9.1} {:>4} {:>10.0}",
            i + 1,
            leg.date_label(),
            leg.session(),
            leg.action(),
            leg.right(),
            leg.strike(),
            leg.premium(),
            leg.quantity(),
            payoff_bound(leg, params)
        )?;
    }
    writeln!(out)?;

    writeln!(out, "=== P&L at settlement (reference {}) ===", curve.reference_price)?;
    writeln!(out, "{:>10} {:>12}", "Settlement", "P&L")?;
    writeln!(out, "{}", "-".repeat(23))?;
    for (price, pnl) in curve.points() {
        let marker = if price == curve.reference_price { " <" } else { "" };
        writeln!(out, "{price:>10} {pnl:>12.1}{marker}")?;
    }

    if let Some(summary) = curve.summary() {
        writeln!(out)?;
        writeln!(out, "Max P&L:    {:.1} at {}", summary.max_pnl, summary.max_at)?;
        writeln!(out, "Min P&L:    {:.1} at {}", summary.min_pnl, summary.min_at)?;
        if summary.breakevens.is_empty() {
            writeln!(out, "Breakevens: none in range")?;
        } else {
            let labels: Vec<String> =
                summary.breakevens.iter().map(|b| format!("{b:.1}")).collect();
            writeln!(out, "Breakevens: {}", labels.join(", "))?;
        }
    }
    Ok(())
}

pub fn curve_csv(out: &mut impl Write, curve: &PnlCurve) -> io::Result<()> {
    let mut wtr = csv::Writer::from_writer(out);
    for (settlement, pnl) in curve.points() {
        wtr.serialize(SeriesPoint { settlement, pnl })?;
    }
    wtr.flush()
}

pub fn record_header(
    out: &mut impl Write,
    record: &Record,
    expiry: &str,
    snapshot: Option<&ExpirySnapshot>,
) -> io::Result<()> {
    writeln!(out, "Record:         {}", record.number)?;
    writeln!(out, "Date:           {}", record.date.format("%Y/%m/%d"))?;
    writeln!(out, "Session:        {}", record.session)?;
    writeln!(out, "Expiry:         {expiry}")?;
    writeln!(out, "Close:          {}", opt(snapshot.and_then(|s| s.close)))?;
    writeln!(
        out,
        "Days remaining: {}",
        opt(snapshot.and_then(|s| s.days_remaining))
    )?;
    writeln!(out, "ATM:            {}", opt(snapshot.and_then(|s| s.atm_price)))?;
    writeln!(out)
}

pub fn ladder_table(out: &mut impl Write, rows: &[ChainRow]) -> io::Result<()> {
    writeln!(out, "{:>10} {:>8} {:>10}", "Call", "Strike", "Put")?;
    writeln!(out, "{}", "-".repeat(30))?;
    for row in rows {
        let marker = if row.is_atm { " *" } else { "" };
        writeln!(
            out,
            "{:>10} {:>8} {:>10}{marker}",
            row.call.to_string(),
            row.strike,
            row.put.to_string()
        )?;
    }
    Ok(())
}

pub fn records_table(out: &mut impl Write, records: &[&Record], book: &RecordBook) -> io::Result<()> {
    writeln!(out, "{:>6} {:<11} {:<12} {}", "Number", "Date", "Session", "Expiries")?;
    writeln!(out, "{}", "-".repeat(44))?;
    for r in records {
        writeln!(
            out,
            "{:>6} {:<11} {:<12} {}",
            r.number,
            r.date.format("%Y/%m/%d").to_string(),
            r.session,
            book.expiries(r.number).join(" ")
        )?;
    }
    match book.date_range() {
        Some((first, last)) => writeln!(
            out,
            "{} record(s); data covers {} to {}",
            records.len(),
            first.format("%Y/%m/%d"),
            last.format("%Y/%m/%d")
        ),
        None => writeln!(out, "{} record(s)", records.len()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use basketlab_core::{Action, Ledger, LegRequest, PnlEngine, Quote, Right};
    use chrono::NaiveDate;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 11).unwrap()
    }

    fn text(buf: Vec<u8>) -> String {
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn curve_csv_has_header_and_every_point() {
        let mut ledger = Ledger::new();
        ledger
            .append(LegRequest::new(Action::Buy, Right::Call, 18000.0, 120.0, day(), "Regular"))
            .unwrap();
        let curve = PnlEngine::default().curve(ledger.snapshot(), 18000).unwrap();

        let mut buf = Vec::new();
        curve_csv(&mut buf, &curve).unwrap();
        let out = text(buf);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "settlement,pnl");
        assert_eq!(lines.len(), 1 + 201);
        assert!(lines.contains(&"18000,-6100.0"));
    }

    #[test]
    fn curve_table_marks_reference_and_summarises() {
        let curve = PnlEngine::default().curve(&[], 18000).unwrap();
        let mut buf = Vec::new();
        curve_table(&mut buf, &[], &curve, &PayoffParams::default()).unwrap();
        let out = text(buf);
        assert!(out.contains("=== Basket (0 legs) ==="));
        assert!(out.contains("     18000          0.0 <"));
        assert!(out.contains("Max P&L:    0.0 at 17000"));
    }

    #[test]
    fn ladder_shows_unavailable_as_dash() {
        let rows = vec![ChainRow {
            strike: 18000,
            call: Quote::Last(120.0),
            put: Quote::Unavailable,
            is_atm: true,
        }];
        let mut buf = Vec::new();
        ladder_table(&mut buf, &rows).unwrap();
        let out = text(buf);
        let last = out.lines().last().unwrap();
        assert!(last.ends_with(" *"));
        assert!(last.contains("18000"));
        assert!(last.trim_end_matches(" *").ends_with('-'));
    }

    #[test]
    fn header_without_snapshot_prints_dashes() {
        let record = Record { number: 7, date: day(), session: "Regular".into() };
        let mut buf = Vec::new();
        record_header(&mut buf, &record, "202403", None).unwrap();
        let out = text(buf);
        assert!(out.contains("Date:           2024/03/11"));
        assert!(out.contains("ATM:            -"));
    }
}
