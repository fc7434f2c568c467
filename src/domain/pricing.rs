//! Stay pricing
//!
//! Money never touches binary floating point: amounts are decimal strings
//! at the boundary and `rust_decimal::Decimal` internally. The total is
//! summed first and rounded once, half-up, at the currency boundary.

use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::domain::{DomainError, DomainResult};

/// Nights covered by a half-open `[check_in, check_out)` date range.
pub fn nights(check_in: NaiveDate, check_out: NaiveDate) -> i64 {
    (check_out - check_in).num_days()
}

/// Total price for a stay: Σ nightly_rate × nights, rounded half-up to
/// two decimal places after summation and rescaled so serialization
/// always carries two decimals ("750.00", not "750").
pub fn stay_total(nightly_rates: &[Decimal], nights: i64) -> Decimal {
    let per_night: Decimal = nightly_rates.iter().copied().sum();
    let mut total = per_night * Decimal::from(nights);
    total = total.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    total.rescale(2);
    total
}

/// Parse a caller-supplied decimal amount string.
pub fn parse_money(raw: &str) -> DomainResult<Decimal> {
    raw.trim()
        .parse::<Decimal>()
        .map_err(|_| DomainError::Validation(format!("Invalid amount: '{raw}'")))
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[test]
    fn nights_for_three_night_stay() {
        let check_in = NaiveDate::from_ymd_opt(2025, 10, 5).unwrap();
        let check_out = NaiveDate::from_ymd_opt(2025, 10, 8).unwrap();
        assert_eq!(nights(check_in, check_out), 3);
    }

    #[test]
    fn nights_for_one_night_stay() {
        let check_in = NaiveDate::from_ymd_opt(2025, 10, 5).unwrap();
        let check_out = NaiveDate::from_ymd_opt(2025, 10, 6).unwrap();
        assert_eq!(nights(check_in, check_out), 1);
    }

    #[test]
    fn two_rooms_three_nights() {
        // 100 + 150 per night, 3 nights
        let total = stay_total(&[d("100"), d("150")], 3);
        assert_eq!(total, d("750.00"));
        assert_eq!(total.to_string(), "750.00");
    }

    #[test]
    fn scenario_total_matches() {
        let total = stay_total(&[d("90.00"), d("150.00")], 3);
        assert_eq!(total.to_string(), "720.00");
    }

    #[test]
    fn three_thirds_sum_to_a_cent_boundary() {
        let total = stay_total(&[d("89.99")], 3);
        assert_eq!(total.to_string(), "269.97");
    }

    #[test]
    fn rounds_half_up_after_summation() {
        // 0.335 would truncate to 0.33 per-room; summed first and rounded
        // half-up it must be 0.34
        let total = stay_total(&[d("0.335")], 1);
        assert_eq!(total.to_string(), "0.34");

        // two sub-cent rates only round once, at the end
        let total = stay_total(&[d("0.333"), d("0.333")], 1);
        assert_eq!(total.to_string(), "0.67");
    }

    #[test]
    fn always_serializes_two_decimals() {
        assert_eq!(stay_total(&[d("100")], 1).to_string(), "100.00");
        assert_eq!(stay_total(&[d("99.5")], 2).to_string(), "199.00");
    }

    #[test]
    fn parse_money_accepts_decimal_strings() {
        assert_eq!(parse_money("269.97").unwrap(), d("269.97"));
        assert_eq!(parse_money(" 720.00 ").unwrap(), d("720.00"));
    }

    #[test]
    fn parse_money_rejects_garbage() {
        assert!(parse_money("12,50").is_err());
        assert!(parse_money("abc").is_err());
        assert!(parse_money("").is_err());
    }
}
