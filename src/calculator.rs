//! Calculator
//!
//! Validates an order, totals it against the catalog and runs every configured pricing rule.

use rusty_money::MoneyError;
use thiserror::Error;

use crate::{
    catalog::Catalog,
    discounts::DiscountError,
    orders::Order,
    pricing::{OrderTotals, TotalPriceError, order_totals},
    receipt::{AppliedDiscount, CalculationResult},
    rules::{Rule, default_rules},
};

/// Errors returned by [`Calculator::calculate_order`].
#[derive(Debug, Error)]
pub enum CalculatorError {
    /// No order was supplied.
    #[error("order cannot be nil")]
    NilOrder,

    /// The order has no lines.
    #[error("order must contain at least one item")]
    EmptyOrder,

    /// A line has a zero or negative quantity.
    #[error("item quantity must be greater than 0 (line {index} has {quantity})")]
    InvalidQuantity {
        /// Index of the first offending line
        index: usize,

        /// Quantity on that line
        quantity: i64,
    },

    /// Totaling failed, including lookups of item types missing from the catalog.
    #[error(transparent)]
    TotalPrice(#[from] TotalPriceError),

    /// A pricing rule could not compute its discount.
    #[error(transparent)]
    Discount(#[from] DiscountError),

    /// Wrapped money arithmetic or currency mismatch error.
    #[error(transparent)]
    Money(#[from] MoneyError),
}

/// Order calculator
#[derive(Debug)]
pub struct Calculator<'a> {
    catalog: Catalog<'a>,
    rules: Vec<Rule<'a>>,
}

impl<'a> Calculator<'a> {
    /// Create a calculator for the given catalog with the default rules.
    pub fn new(catalog: Catalog<'a>) -> Self {
        Self::with_rules(catalog, default_rules())
    }

    /// Create a calculator with an explicit, ordered list of rules.
    pub fn with_rules(catalog: Catalog<'a>, rules: impl IntoIterator<Item = Rule<'a>>) -> Self {
        Self {
            catalog,
            rules: rules.into_iter().collect(),
        }
    }

    /// Append a rule; it runs after every rule already configured.
    pub fn add_pricing_rule(&mut self, rule: Rule<'a>) {
        self.rules.push(rule);
    }

    /// Configured rules, in application order
    pub fn rules(&self) -> &[Rule<'a>] {
        &self.rules
    }

    /// Number of configured rules
    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    /// Catalog orders are priced against
    pub fn catalog(&self) -> &Catalog<'a> {
        &self.catalog
    }

    /// Check that an order can be priced, stopping at the first problem found.
    ///
    /// # Errors
    ///
    /// - [`CalculatorError::NilOrder`]: `order` is `None`.
    /// - [`CalculatorError::EmptyOrder`]: the order has no lines.
    /// - [`CalculatorError::InvalidQuantity`]: a line has a quantity of zero or less.
    pub fn validate_order<'o>(
        order: impl Into<Option<&'o Order>>,
    ) -> Result<&'o Order, CalculatorError> {
        let order = order.into().ok_or(CalculatorError::NilOrder)?;

        if order.is_empty() {
            return Err(CalculatorError::EmptyOrder);
        }

        if let Some((index, line)) = order
            .items()
            .iter()
            .enumerate()
            .find(|(_, line)| line.quantity() <= 0)
        {
            return Err(CalculatorError::InvalidQuantity {
                index,
                quantity: line.quantity(),
            });
        }

        Ok(order)
    }

    /// Price an order.
    ///
    /// Accepts `&Order` or `Option<&Order>`.
    ///
    /// # Errors
    ///
    /// Returns a validation error (see [`Calculator::validate_order`]),
    /// [`CalculatorError::TotalPrice`] if a line cannot be priced, or
    /// [`CalculatorError::Discount`] if a rule fails. No partial result is produced.
    pub fn calculate_order<'o>(
        &self,
        order: impl Into<Option<&'o Order>>,
    ) -> Result<CalculationResult<'a>, CalculatorError> {
        let order = Self::validate_order(order)?;

        let OrderTotals { total, subtotals } = order_totals(order, &self.catalog)?;

        let applied = self
            .rules
            .iter()
            .map(|rule| -> Result<AppliedDiscount<'a>, DiscountError> {
                Ok(AppliedDiscount {
                    name: rule.name().to_string(),
                    category: rule.category(),
                    amount: rule.calculate(order, total, &subtotals)?,
                })
            })
            .collect::<Result<Vec<_>, DiscountError>>()?;

        Ok(CalculationResult::new(total, applied)?)
    }
}
