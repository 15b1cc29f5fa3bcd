//! Receipt
//!
//! The outcome of pricing an order, and its rendering for the till.

use std::io;

use rusty_money::{Money, MoneyError, iso::Currency};
use smallvec::SmallVec;
use tabled::{
    builder::Builder,
    settings::{Alignment, Style, object::Columns},
};
use thiserror::Error;

use crate::discounts::DiscountCategory;

/// Errors that can occur when rendering a receipt.
#[derive(Debug, Error)]
pub enum ReceiptError {
    /// Wrapper for money errors.
    #[error(transparent)]
    Money(#[from] MoneyError),

    /// IO error
    #[error("IO error")]
    IO,
}

/// Discount produced by a single pricing rule.
#[derive(Debug, Clone, PartialEq)]
pub struct AppliedDiscount<'a> {
    /// Name reported by the rule
    pub name: String,

    /// Bucket the discount was attributed to
    pub category: DiscountCategory,

    /// Discount amount
    pub amount: Money<'a, Currency>,
}

/// Final price breakdown for an order.
#[derive(Debug, Clone, PartialEq)]
pub struct CalculationResult<'a> {
    total: Money<'a, Currency>,
    member_discount: Money<'a, Currency>,
    promotion_discount: Money<'a, Currency>,
    total_discount: Money<'a, Currency>,
    grand_total: Money<'a, Currency>,
    applied: SmallVec<[AppliedDiscount<'a>; 4]>,
}

impl<'a> CalculationResult<'a> {
    /// Build a result from a pre-discount total and the discounts each rule produced.
    ///
    /// Member and promotion amounts are summed per category; [`DiscountCategory::Other`]
    /// discounts are kept in [`CalculationResult::applied_discounts`] only.
    ///
    /// # Errors
    ///
    /// Returns a [`MoneyError`] if a discount is in a different currency from `total`.
    pub fn new(
        total: Money<'a, Currency>,
        applied: impl IntoIterator<Item = AppliedDiscount<'a>>,
    ) -> Result<Self, MoneyError> {
        let applied: SmallVec<[AppliedDiscount<'a>; 4]> = applied.into_iter().collect();

        let member_discount = sum_category(&applied, DiscountCategory::Member, total.currency())?;
        let promotion_discount =
            sum_category(&applied, DiscountCategory::Promotion, total.currency())?;

        let total_discount = member_discount.add(promotion_discount)?;
        let grand_total = total.sub(total_discount)?;

        Ok(Self {
            total,
            member_discount,
            promotion_discount,
            total_discount,
            grand_total,
            applied,
        })
    }

    /// Total before any discount
    pub fn total(&self) -> Money<'a, Currency> {
        self.total
    }

    /// Sum of member discounts
    pub fn member_discount(&self) -> Money<'a, Currency> {
        self.member_discount
    }

    /// Sum of promotional discounts
    pub fn promotion_discount(&self) -> Money<'a, Currency> {
        self.promotion_discount
    }

    /// Member plus promotional discounts
    pub fn total_discount(&self) -> Money<'a, Currency> {
        self.total_discount
    }

    /// Amount payable
    pub fn grand_total(&self) -> Money<'a, Currency> {
        self.grand_total
    }

    /// Discounts in rule order, including zero amounts.
    pub fn applied_discounts(&self) -> &[AppliedDiscount<'a>] {
        &self.applied
    }

    /// Render the receipt as a table.
    ///
    /// Only non-zero member and promotional discounts get a row, so the rows add up to the
    /// total discount.
    ///
    /// # Errors
    ///
    /// Returns [`ReceiptError::IO`] if writing to `out` fails.
    pub fn write_to(&self, mut out: impl io::Write) -> Result<(), ReceiptError> {
        let mut builder = Builder::default();

        builder.push_record(["", "Amount"]);
        builder.push_record(["Subtotal".to_string(), self.total.to_string()]);

        for discount in self
            .applied
            .iter()
            .filter(|discount| {
                discount.category != DiscountCategory::Other
                    && discount.amount.to_minor_units() != 0
            })
        {
            builder.push_record([discount.name.clone(), format!("-{}", discount.amount)]);
        }

        builder.push_record([
            "Total Discount".to_string(),
            format!("-{}", self.total_discount),
        ]);
        builder.push_record(["Grand Total".to_string(), self.grand_total.to_string()]);

        let mut table = builder.build();

        table.with(Style::modern_rounded());
        table.modify(Columns::new(1..), Alignment::right());

        writeln!(out, "{table}").map_err(|_err| ReceiptError::IO)
    }
}

fn sum_category<'a>(
    applied: &[AppliedDiscount<'a>],
    category: DiscountCategory,
    currency: &'a Currency,
) -> Result<Money<'a, Currency>, MoneyError> {
    applied
        .iter()
        .filter(|discount| discount.category == category)
        .try_fold(Money::from_minor(0, currency), |acc, discount| {
            acc.add(discount.amount)
        })
}

#[cfg(test)]
mod tests {
    use rusty_money::iso::{GBP, THB};
    use testresult::TestResult;

    use super::*;

    fn applied<'a>(
        name: &str,
        category: DiscountCategory,
        amount: Money<'a, Currency>,
    ) -> AppliedDiscount<'a> {
        AppliedDiscount {
            name: name.to_string(),
            category,
            amount,
        }
    }

    #[test]
    fn new_aggregates_by_category() -> TestResult {
        let result = CalculationResult::new(
            Money::from_minor(29_000, THB),
            [
                applied("Member Discount", DiscountCategory::Member, Money::from_minor(2_900, THB)),
                applied("Buy Two Discount", DiscountCategory::Promotion, Money::from_minor(1_200, THB)),
            ],
        )?;

        assert_eq!(result.member_discount(), Money::from_minor(2_900, THB));
        assert_eq!(result.promotion_discount(), Money::from_minor(1_200, THB));
        assert_eq!(result.total_discount(), Money::from_minor(4_100, THB));
        assert_eq!(result.grand_total(), Money::from_minor(24_900, THB));

        Ok(())
    }

    #[test]
    fn other_category_is_recorded_but_not_totalled() -> TestResult {
        let result = CalculationResult::new(
            Money::from_minor(10_000, THB),
            [applied("Happy Hour", DiscountCategory::Other, Money::from_minor(500, THB))],
        )?;

        assert_eq!(result.total_discount(), Money::from_minor(0, THB));
        assert_eq!(result.grand_total(), Money::from_minor(10_000, THB));
        assert_eq!(result.applied_discounts().len(), 1);

        Ok(())
    }

    #[test]
    fn same_category_amounts_are_summed() -> TestResult {
        let result = CalculationResult::new(
            Money::from_minor(10_000, THB),
            [
                applied("Member Discount", DiscountCategory::Member, Money::from_minor(1_000, THB)),
                applied("Gold Member", DiscountCategory::Member, Money::from_minor(2_000, THB)),
            ],
        )?;

        assert_eq!(result.member_discount(), Money::from_minor(3_000, THB));
        assert_eq!(result.grand_total(), Money::from_minor(7_000, THB));

        Ok(())
    }

    #[test]
    fn new_errors_on_currency_mismatch() {
        let result = CalculationResult::new(
            Money::from_minor(10_000, THB),
            [applied("Member Discount", DiscountCategory::Member, Money::from_minor(100, GBP))],
        );

        assert_eq!(
            result,
            Err(MoneyError::CurrencyMismatch {
                expected: THB.iso_alpha_code,
                actual: GBP.iso_alpha_code,
            })
        );
    }

    #[test]
    fn write_to_lists_non_zero_discounts() -> TestResult {
        let result = CalculationResult::new(
            Money::from_minor(9_000, THB),
            [
                applied("Member Discount", DiscountCategory::Member, Money::from_minor(900, THB)),
                applied("Buy Two Discount", DiscountCategory::Promotion, Money::from_minor(0, THB)),
            ],
        )?;

        let mut out = Vec::new();
        result.write_to(&mut out)?;
        let rendered = String::from_utf8(out)?;

        assert!(rendered.contains("Subtotal"), "missing subtotal row: {rendered}");
        assert!(rendered.contains("Member Discount"), "missing member row: {rendered}");
        assert!(!rendered.contains("Buy Two Discount"), "zero discount rendered: {rendered}");
        assert!(rendered.contains("Grand Total"), "missing grand total row: {rendered}");

        Ok(())
    }

    #[test]
    fn write_to_only_lists_deducted_discounts() -> TestResult {
        let result = CalculationResult::new(
            Money::from_minor(3_000, THB),
            [applied("Happy Hour", DiscountCategory::Other, Money::from_minor(500, THB))],
        )?;

        let mut out = Vec::new();
        result.write_to(&mut out)?;
        let rendered = String::from_utf8(out)?;

        assert!(!rendered.contains("Happy Hour"), "undeducted discount rendered: {rendered}");
        assert_eq!(result.grand_total(), Money::from_minor(3_000, THB));

        Ok(())
    }
}
