//! Money helpers for discount amounts

use rust_decimal::prelude::*;

const DECIMAL_PLACES: u32 = 2;

/// Round a saving to 2 decimal places, truncating toward zero.
///
/// A rounded saving never exceeds the exact one.
#[inline]
pub fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::ToZero)
}

/// Percentage as a multiplier (12.5 -> 0.125)
#[inline]
pub fn percent_rate(percentage: Decimal) -> Decimal {
    percentage / Decimal::ONE_HUNDRED
}

/// `percentage`% of `base`, rounded (percentage: 10 = 10%)
///
/// The rate is reduced first so the product never exceeds `base`.
#[inline]
pub fn percent_of(base: Decimal, percentage: Decimal) -> Decimal {
    round_money(base * percent_rate(percentage))
}

/// Format a percentage without trailing zeros (10.00 -> "10")
pub fn format_percent(percentage: Decimal) -> String {
    format!("{}%", percentage.normalize())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_round_money_truncates() {
        assert_eq!(round_money(dec!(1.005)), dec!(1.00));
        assert_eq!(round_money(dec!(1.009)), dec!(1.00));
        assert_eq!(round_money(dec!(2.5)), dec!(2.50));
        assert_eq!(round_money(dec!(4.16625)), dec!(4.16));
    }

    #[test]
    fn test_percent_of() {
        assert_eq!(percent_of(dec!(150), dec!(10)), dec!(15));
        assert_eq!(percent_of(dec!(8), dec!(20)), dec!(1.60));
        assert_eq!(percent_of(dec!(33.33), dec!(12.5)), dec!(4.16));
        assert_eq!(percent_of(dec!(99), dec!(0)), Decimal::ZERO);
    }

    #[test]
    fn test_percent_of_never_exceeds_exact_value() {
        for base in [dec!(33.33), dec!(0.01), dec!(19.99), dec!(1234.567)] {
            for pct in [dec!(1), dec!(12.5), dec!(33.333), dec!(66.67), dec!(100)] {
                let exact = base * pct / Decimal::ONE_HUNDRED;
                let rounded = percent_of(base, pct);
                assert!(rounded <= exact, "base={base} pct={pct}");
                assert!(exact - rounded < dec!(0.01), "base={base} pct={pct}");
            }
        }
    }

    #[test]
    fn test_percent_of_does_not_overflow_at_max() {
        assert_eq!(percent_of(Decimal::MAX, dec!(100)), Decimal::MAX);
        assert!(percent_of(Decimal::MAX, dec!(60)) < Decimal::MAX);
    }

    #[test]
    fn test_format_percent() {
        assert_eq!(format_percent(dec!(10.00)), "10%");
        assert_eq!(format_percent(dec!(12.5)), "12.5%");
    }
}
