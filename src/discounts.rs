//! Discounts
//!
//! Percentage helpers shared by the pricing rules, and the categories rule discounts are
//! attributed to.

use std::fmt;

use decimal_percentage::Percentage;
use rust_decimal::{
    Decimal, RoundingStrategy,
    prelude::{FromPrimitive, ToPrimitive},
};
use rusty_money::{Money, MoneyError, iso::Currency};
use thiserror::Error;

/// Errors specific to discount calculations.
#[derive(Debug, Error)]
pub enum DiscountError {
    /// Percentage calculation could not be safely converted.
    #[error("percentage conversion overflowed or was not finite")]
    PercentConversion,

    /// Wrapped money arithmetic or currency mismatch error.
    #[error(transparent)]
    Money(#[from] MoneyError),
}

/// Bucket a rule's discount is reported under.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum DiscountCategory {
    /// Discounts granted for holding a member card
    Member,

    /// Promotional discounts on specific menu items
    Promotion,

    /// Anything else; recorded per rule but not added to the named totals
    Other,
}

impl fmt::Display for DiscountCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            DiscountCategory::Member => "member",
            DiscountCategory::Promotion => "promotion",
            DiscountCategory::Other => "other",
        })
    }
}

/// Calculate the discount amount in minor units based on a percentage and a minor unit amount.
///
/// # Errors
///
/// Returns an error if the percentage calculation overflows or cannot be safely represented
/// (`DiscountError::PercentConversion`).
pub fn percent_of_minor(percent: &Percentage, minor: i64) -> Result<i64, DiscountError> {
    let minor = Decimal::from_i64(minor).ok_or(DiscountError::PercentConversion)?;

    ((*percent) * Decimal::ONE) // decimal_percentage doesn't expose the underlying Decimal
        .checked_mul(minor)
        .ok_or(DiscountError::PercentConversion)?
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
        .ok_or(DiscountError::PercentConversion)
}

/// Calculate `percent` of a money amount, rounded to the nearest minor unit.
///
/// # Errors
///
/// Returns `DiscountError::PercentConversion` if the result is not representable.
pub fn percent_of<'a>(
    amount: &Money<'a, Currency>,
    percent: &Percentage,
) -> Result<Money<'a, Currency>, DiscountError> {
    let minor = percent_of_minor(percent, amount.to_minor_units())?;

    Ok(Money::from_minor(minor, amount.currency()))
}

#[cfg(test)]
mod tests {
    use rusty_money::iso::THB;
    use testresult::TestResult;

    use super::*;

    #[test]
    fn percent_of_minor_calculates_correctly() -> TestResult {
        let percent = Percentage::from(0.25);

        assert_eq!(percent_of_minor(&percent, 200)?, 50);

        Ok(())
    }

    #[test]
    fn percent_of_minor_rounds_half_away_from_zero() -> TestResult {
        let percent = Percentage::from(0.05);

        // 5% of 0.10 is half a satang
        assert_eq!(percent_of_minor(&percent, 10)?, 1);

        Ok(())
    }

    #[test]
    fn percent_of_minor_overflow_returns_error() {
        let percent = Percentage::from(2.0);
        let result = percent_of_minor(&percent, i64::MAX);

        assert!(matches!(result, Err(DiscountError::PercentConversion)));
    }

    #[test]
    fn percent_of_minor_checked_mul_overflow_returns_error() -> TestResult {
        let percent = Percentage::try_from("100000000000000000000")?;
        let result = percent_of_minor(&percent, i64::MAX);

        assert!(matches!(result, Err(DiscountError::PercentConversion)));

        Ok(())
    }

    #[test]
    fn percent_of_keeps_currency() -> TestResult {
        let amount = Money::from_minor(9_000, THB);

        let discount = percent_of(&amount, &Percentage::from(0.10))?;

        assert_eq!(discount, Money::from_minor(900, THB));

        Ok(())
    }
}
