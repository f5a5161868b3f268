//! Golden basket scenarios with hand-computed P&L values.

use chrono::NaiveDate;

use basketlab_core::pnl::{leg_payoff, PayoffParams};
use basketlab_core::{Action, Ledger, LegRequest, PnlEngine, Quote, Right, TradeLeg};

fn day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, 11).unwrap()
}

fn long_call() -> LegRequest {
    LegRequest::new(Action::Buy, Right::Call, 18000.0, 120.0, day(), "Regular")
}

fn short_put_x2() -> LegRequest {
    LegRequest::new(Action::Sell, Right::Put, 18000.0, 80.0, day(), "Regular").with_quantity(2)
}

#[test]
fn long_call_at_the_money() {
    // max((0 - 120) * 50 - 100, -120 * 50 - 100) = max(-6100, -6100)
    let leg = TradeLeg::try_from(long_call()).unwrap();
    assert_eq!(leg_payoff(&leg, 18000.0, &PayoffParams::default()), -6100.0);
}

#[test]
fn long_call_500_points_in_the_money() {
    // max((500 - 120) * 50 - 100, -6100) = 18900
    let leg = TradeLeg::try_from(long_call()).unwrap();
    assert_eq!(leg_payoff(&leg, 18500.0, &PayoffParams::default()), 18900.0);
}

#[test]
fn two_short_puts_keep_capped_premium() {
    // inner = 80 - (18000 - 18200) = 280; 2 * min(280 * 50 - 100, 80 * 50 - 100) = 7800
    let leg = TradeLeg::try_from(short_put_x2()).unwrap();
    assert_eq!(leg_payoff(&leg, 18200.0, &PayoffParams::default()), 7800.0);
}

#[test]
fn basket_total_is_sum_of_independent_legs() {
    let mut ledger = Ledger::new();
    ledger.append(long_call()).unwrap();
    ledger.append(short_put_x2()).unwrap();

    let params = PayoffParams::default();
    let call = leg_payoff(&ledger.snapshot()[0], 18200.0, &params);
    let put = leg_payoff(&ledger.snapshot()[1], 18200.0, &params);
    assert_eq!(call, 3900.0);
    assert_eq!(put, 7800.0);

    let curve = PnlEngine::default().curve(ledger.snapshot(), 18000).unwrap();
    assert_eq!(curve.at(18200), Some(call + put));
    assert_eq!(curve.at(18200), Some(11700.0));
}

#[test]
fn curve_follows_ledger_edits() {
    let engine = PnlEngine::default();
    let mut ledger = Ledger::new();
    ledger.append(long_call()).unwrap();
    let single = engine.curve(ledger.snapshot(), 18000).unwrap();

    ledger.append(short_put_x2()).unwrap();
    let pair = engine.curve(ledger.snapshot(), 18000).unwrap();
    assert_ne!(single, pair);

    ledger.remove_last();
    assert_eq!(engine.curve(ledger.snapshot(), 18000).unwrap(), single);

    ledger.clear();
    let flat = engine.curve(ledger.snapshot(), 18000).unwrap();
    assert!(flat.pnl.iter().all(|&v| v == 0.0));
}

#[test]
fn missing_quote_never_reaches_the_basket() {
    let mut ledger = Ledger::new();
    let mut req = long_call();
    req.premium = Quote::parse("-");
    assert!(ledger.append(req).is_err());
    assert!(ledger.is_empty());
}

#[test]
fn long_straddle_summary() {
    let mut ledger = Ledger::new();
    ledger.append(long_call()).unwrap();
    ledger
        .append(LegRequest::new(Action::Buy, Right::Put, 18000.0, 100.0, day(), "Regular"))
        .unwrap();

    let curve = PnlEngine::default().curve(ledger.snapshot(), 18000).unwrap();
    let summary = curve.summary().unwrap();

    // Both legs floored between 17900 and 18120; first grid hit is 17900.
    assert_eq!(summary.min_pnl, -6100.0 - 5100.0);
    assert_eq!(summary.min_at, 17900);
    // (1000 - 120) * 50 - 100 - 5100, equal at either grid edge
    assert_eq!(summary.max_pnl, 38800.0);
    assert_eq!(summary.breakevens.len(), 2);
    assert!(summary.breakevens[0] < 18000.0 && summary.breakevens[1] > 18000.0);
}
