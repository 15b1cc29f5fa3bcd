//! Pricing Rules
//!
//! A pricing rule turns an order and its pre-discount totals into a discount amount. Rules
//! report the [`DiscountCategory`] their amount belongs to, so the calculator can attribute
//! discounts without knowing which concrete rules are configured.

use std::{fmt::Debug, sync::Arc};

use rusty_money::{Money, iso::Currency};

use crate::{
    discounts::{DiscountCategory, DiscountError},
    orders::Order,
    pricing::ItemSubtotals,
};

pub mod buy_two_discount;
pub mod member_discount;

pub use buy_two_discount::BuyTwoDiscountRule;
pub use member_discount::MemberDiscountRule;

/// A pluggable discount computation applied once per checkout.
pub trait PricingRule: Debug {
    /// Human readable label used on receipts.
    fn name(&self) -> &str;

    /// Bucket this rule's discount is attributed to.
    fn category(&self) -> DiscountCategory;

    /// Calculate the discount for an order.
    ///
    /// `total` is the order's pre-discount total and `subtotals` its per item type breakdown,
    /// which may be empty for rules that do not need it. The returned amount is in the
    /// currency of `total`. Implementations must be pure.
    ///
    /// # Errors
    ///
    /// Returns a [`DiscountError`] if the discount cannot be represented.
    fn calculate<'a>(
        &self,
        order: &Order,
        total: Money<'a, Currency>,
        subtotals: &ItemSubtotals<'a>,
    ) -> Result<Money<'a, Currency>, DiscountError>;
}

/// Rule object held by the calculator.
pub type Rule<'r> = Arc<dyn PricingRule + 'r>;

/// Wrap any pricing rule implementation into a shared rule object.
pub fn pricing_rule<'r, R>(rule: R) -> Rule<'r>
where
    R: PricingRule + 'r,
{
    Arc::new(rule)
}

/// The rules every calculator starts with: member discount, then buy two.
pub fn default_rules<'r>() -> Vec<Rule<'r>> {
    vec![
        pricing_rule(MemberDiscountRule::default()),
        pricing_rule(BuyTwoDiscountRule::default()),
    ]
}
