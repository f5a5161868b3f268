//! Settlement payoff of a single leg.
//!
//! With `K` strike, `P` premium, `Q` quantity, `M` multiplier and `F` fee:
//!
//! | right | action | payoff(S) |
//! |---|---|---|
//! | Call | Buy  | `Q * max((S - K - P) * M - F, -P*M - F)` |
//! | Call | Sell | `Q * min((P - (S - K)) * M - F, P*M - F)` |
//! | Put  | Buy  | `Q * max((K - S - P) * M - F, -P*M - F)` |
//! | Put  | Sell | `Q * min((P - (K - S)) * M - F, P*M - F)` |
//!
//! The fee sits inside both branches of the clamp, so the floor of a long leg
//! is `-P*M - F` and the ceiling of a short leg is `P*M - F`. Short downside
//! is unbounded.

use crate::domain::{Action, Right, TradeLeg};

use super::params::PayoffParams;

/// Intrinsic move in the holder's favour at settlement `s`.
fn intrinsic(right: Right, strike: f64, s: f64) -> f64 {
    match right {
        Right::Call => s - strike,
        Right::Put => strike - s,
    }
}

/// Payoff of one leg at settlement price `settlement`.
pub fn leg_payoff(leg: &TradeLeg, settlement: f64, params: &PayoffParams) -> f64 {
    let m = params.multiplier;
    let f = params.fee;
    let p = leg.premium();
    let q = f64::from(leg.quantity());
    let move_ = intrinsic(leg.right(), leg.strike(), settlement);

    let per_leg = match leg.action() {
        Action::Buy => ((move_ - p) * m - f).max(-p * m - f),
        Action::Sell => ((p - move_) * m - f).min(p * m - f),
    };
    q * per_leg
}

/// Worst case of a long leg / best case of a short leg.
pub fn payoff_bound(leg: &TradeLeg, params: &PayoffParams) -> f64 {
    let q = f64::from(leg.quantity());
    let p = leg.premium();
    match leg.action() {
        Action::Buy => q * (-p * params.multiplier - params.fee),
        Action::Sell => q * (p * params.multiplier - params.fee),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::LegRequest;
    use chrono::NaiveDate;

    fn leg(action: Action, right: Right, strike: f64, premium: f64, qty: u32) -> TradeLeg {
        let date = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
        TradeLeg::try_from(
            LegRequest::new(action, right, strike, premium, date, "Regular").with_quantity(qty),
        )
        .unwrap()
    }

    #[test]
    fn long_call_at_strike_loses_premium_plus_fee() {
        let l = leg(Action::Buy, Right::Call, 18000.0, 120.0, 1);
        assert_eq!(leg_payoff(&l, 18000.0, &PayoffParams::default()), -6100.0);
    }

    #[test]
    fn long_call_in_the_money() {
        let l = leg(Action::Buy, Right::Call, 18000.0, 120.0, 1);
        assert_eq!(leg_payoff(&l, 18500.0, &PayoffParams::default()), 18900.0);
    }

    #[test]
    fn short_put_caps_at_premium_minus_fee() {
        let l = leg(Action::Sell, Right::Put, 18000.0, 80.0, 2);
        assert_eq!(leg_payoff(&l, 18200.0, &PayoffParams::default()), 7800.0);
    }

    #[test]
    fn short_call_loss_is_unbounded() {
        let l = leg(Action::Sell, Right::Call, 18000.0, 100.0, 1);
        let params = PayoffParams::default();
        // (100 - 1000) * 50 - 100
        assert_eq!(leg_payoff(&l, 19000.0, &params), -45100.0);
        assert!(leg_payoff(&l, 25000.0, &params) < leg_payoff(&l, 19000.0, &params));
    }

    #[test]
    fn long_put_floor_and_payout() {
        let l = leg(Action::Buy, Right::Put, 18000.0, 60.0, 1);
        let params = PayoffParams::default();
        assert_eq!(leg_payoff(&l, 18500.0, &params), -3100.0);
        // (18000 - 17500 - 60) * 50 - 100
        assert_eq!(leg_payoff(&l, 17500.0, &params), 21900.0);
    }

    #[test]
    fn fee_is_inside_the_clamp() {
        // Slightly out of the money: the unclamped branch is just above the floor,
        // so applying the fee outside the clamp would double count it.
        let l = leg(Action::Buy, Right::Call, 18000.0, 10.0, 1);
        let params = PayoffParams::default();
        // (18005 - 18000 - 10) * 50 - 100 = -350, floor = -600
        assert_eq!(leg_payoff(&l, 18005.0, &params), -350.0);
        // deep OTM hits the floor exactly, including the fee once
        assert_eq!(leg_payoff(&l, 17000.0, &params), -600.0);

        let s = leg(Action::Sell, Right::Call, 18000.0, 10.0, 1);
        // deep OTM short keeps premium minus fee
        assert_eq!(leg_payoff(&s, 17000.0, &params), 400.0);
    }

    #[test]
    fn quantity_scales_fee_and_price_component() {
        let one = leg(Action::Buy, Right::Call, 18000.0, 120.0, 1);
        let three = leg(Action::Buy, Right::Call, 18000.0, 120.0, 3);
        let params = PayoffParams::default();
        for s in [17000.0, 18000.0, 18120.0, 18500.0] {
            assert_eq!(leg_payoff(&three, s, &params), 3.0 * leg_payoff(&one, s, &params));
        }
    }

    #[test]
    fn custom_params_flow_through() {
        let l = leg(Action::Buy, Right::Call, 100.0, 2.0, 1);
        assert_eq!(leg_payoff(&l, 110.0, &PayoffParams::points()), 8.0);
        assert_eq!(leg_payoff(&l, 90.0, &PayoffParams::points()), -2.0);
        assert_eq!(payoff_bound(&l, &PayoffParams::new(10.0, 1.0)), -21.0);
    }
}
