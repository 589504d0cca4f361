//! Monetary amount derivation for orders.
//!
//! All arithmetic stays in `Decimal`; summation runs at full precision and
//! each output is rounded exactly once, half-up to two places.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

const MONEY_DP: u32 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Totals {
    pub subtotal: Decimal,
    pub vat_amount: Decimal,
    pub total: Decimal,
}

fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(MONEY_DP, RoundingStrategy::MidpointAwayFromZero)
}

/// Line total as rendered in responses: unit price times quantity, rounded.
pub fn line_total(unit_price: Decimal, quantity: i32) -> Decimal {
    round_money(unit_price * Decimal::from(quantity))
}

/// Derive subtotal, VAT amount and grand total from price snapshots.
///
/// `vat_rate` is a percentage (5.5 means 5.5%). The total is the exact sum
/// of the two rounded components, so `total == subtotal + vat_amount` holds
/// for every input.
pub fn compute_totals<I>(lines: I, vat_rate: Decimal) -> Totals
where
    I: IntoIterator<Item = (Decimal, i32)>,
{
    let raw_subtotal: Decimal = lines
        .into_iter()
        .map(|(unit_price, quantity)| unit_price * Decimal::from(quantity))
        .sum();

    let raw_vat = raw_subtotal * vat_rate / Decimal::ONE_HUNDRED;

    let subtotal = round_money(raw_subtotal);
    let vat_amount = round_money(raw_vat);
    let total = round_money(subtotal + vat_amount);

    Totals {
        subtotal,
        vat_amount,
        total,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[test]
    fn empty_order_is_zero() {
        let totals = compute_totals(Vec::new(), dec("20"));
        assert_eq!(totals.subtotal, Decimal::ZERO);
        assert_eq!(totals.vat_amount, Decimal::ZERO);
        assert_eq!(totals.total, Decimal::ZERO);
    }

    #[test]
    fn reference_rounding_case() {
        // 29.90 * 3 = 89.70; 89.70 * 5.5% = 4.9335 -> 4.93; total 94.63
        let totals = compute_totals(vec![(dec("29.90"), 3)], dec("5.5"));
        assert_eq!(totals.subtotal, dec("89.70"));
        assert_eq!(totals.vat_amount, dec("4.93"));
        assert_eq!(totals.total, dec("94.63"));
    }

    #[test]
    fn happy_path_two_tickets() {
        let totals = compute_totals(vec![(dec("20.00"), 2)], dec("5.5"));
        assert_eq!(totals.subtotal, dec("40.00"));
        assert_eq!(totals.vat_amount, dec("2.20"));
        assert_eq!(totals.total, dec("42.20"));
    }

    #[test]
    fn total_is_exact_sum_of_rounded_parts() {
        let cases = [
            (vec![(dec("0.01"), 1)], dec("19.6")),
            (vec![(dec("3.33"), 3), (dec("7.77"), 7)], dec("21.2")),
            (vec![(dec("129.99"), 13)], dec("0")),
            (vec![(dec("10.005"), 2)], dec("100")),
        ];

        for (lines, vat) in cases {
            let totals = compute_totals(lines, vat);
            assert_eq!(totals.total, totals.subtotal + totals.vat_amount);
            assert!(totals.subtotal.scale() <= 2);
            assert!(totals.vat_amount.scale() <= 2);
            assert!(totals.total.scale() <= 2);
        }
    }

    #[test]
    fn rounding_happens_once_not_per_line() {
        // Three lines of 0.333 each: full-precision sum is 0.999 -> 1.00.
        // Per-line rounding would give 0.33 * 3 = 0.99.
        let lines = vec![(dec("0.333"), 1), (dec("0.333"), 1), (dec("0.333"), 1)];
        let totals = compute_totals(lines, Decimal::ZERO);
        assert_eq!(totals.subtotal, dec("1.00"));
    }

    #[test]
    fn half_up_rounding() {
        // 10.005 rounds away from zero to 10.01.
        let totals = compute_totals(vec![(dec("10.005"), 1)], Decimal::ZERO);
        assert_eq!(totals.subtotal, dec("10.01"));
    }

    #[test]
    fn line_total_rounds_to_cents() {
        assert_eq!(line_total(dec("19.99"), 3), dec("59.97"));
        assert_eq!(line_total(dec("0.333"), 3), dec("1.00"));
    }
}
