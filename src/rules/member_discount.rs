//! Member Discount
//!
//! A percentage off the whole order for customers holding a member card.

use decimal_percentage::Percentage;
use rust_decimal::Decimal;
use rusty_money::{Money, iso::Currency};

use crate::{
    discounts::{DiscountCategory, DiscountError, percent_of},
    orders::Order,
    pricing::ItemSubtotals,
    rules::PricingRule,
};

/// Default member discount rate (10%)
pub const DEFAULT_MEMBER_RATE: Decimal = Decimal::from_parts(10, 0, 0, false, 2);

/// Member Discount Rule
#[derive(Debug, Copy, Clone)]
pub struct MemberDiscountRule {
    rate: Percentage,
}

impl MemberDiscountRule {
    /// Create a member discount with the given rate.
    pub fn new(rate: Percentage) -> Self {
        Self { rate }
    }

    /// Discount rate
    pub fn rate(&self) -> Percentage {
        self.rate
    }
}

impl Default for MemberDiscountRule {
    fn default() -> Self {
        Self::new(Percentage::from(DEFAULT_MEMBER_RATE))
    }
}

impl PricingRule for MemberDiscountRule {
    fn name(&self) -> &str {
        "Member Discount"
    }

    fn category(&self) -> DiscountCategory {
        DiscountCategory::Member
    }

    fn calculate<'a>(
        &self,
        order: &Order,
        total: Money<'a, Currency>,
        _subtotals: &ItemSubtotals<'a>,
    ) -> Result<Money<'a, Currency>, DiscountError> {
        if order.is_member() {
            percent_of(&total, &self.rate)
        } else {
            Ok(Money::from_minor(0, total.currency()))
        }
    }
}

#[cfg(test)]
mod tests {
    use rusty_money::iso::THB;
    use testresult::TestResult;

    use super::*;

    #[test]
    fn members_get_ten_percent_of_total() -> TestResult {
        let rule = MemberDiscountRule::default();
        let mut order = Order::new();
        order.set_member(true);

        let discount = rule.calculate(
            &order,
            Money::from_minor(10_000, THB),
            &ItemSubtotals::new(),
        )?;

        assert_eq!(discount, Money::from_minor(1_000, THB));
        assert_eq!(rule.name(), "Member Discount");

        Ok(())
    }

    #[test]
    fn non_members_get_nothing() -> TestResult {
        let rule = MemberDiscountRule::default();

        let discount = rule.calculate(
            &Order::new(),
            Money::from_minor(10_000, THB),
            &ItemSubtotals::new(),
        )?;

        assert_eq!(discount, Money::from_minor(0, THB));

        Ok(())
    }

    #[test]
    fn custom_rate_is_applied() -> TestResult {
        let rule = MemberDiscountRule::new(Percentage::from(Decimal::new(20, 2)));
        let mut order = Order::new();
        order.set_member(true);

        let discount = rule.calculate(
            &order,
            Money::from_minor(29_000, THB),
            &ItemSubtotals::new(),
        )?;

        assert_eq!(discount, Money::from_minor(5_800, THB));

        Ok(())
    }

    #[test]
    fn default_rate_is_exactly_ten_percent() {
        assert_eq!(
            MemberDiscountRule::default().rate() * Decimal::ONE,
            Decimal::new(1, 1)
        );
    }
}
