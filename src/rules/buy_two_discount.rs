//! Buy Two Discount
//!
//! A percentage off the subtotal of promotional items bought in multiples.

use decimal_percentage::Percentage;
use rust_decimal::Decimal;
use rustc_hash::FxHashSet;
use rusty_money::{Money, iso::Currency};

use crate::{
    catalog::MenuItemType,
    discounts::{DiscountCategory, DiscountError, percent_of},
    orders::Order,
    pricing::ItemSubtotals,
    rules::PricingRule,
};

/// Default promotion rate (5%)
pub const DEFAULT_PROMOTION_RATE: Decimal = Decimal::from_parts(5, 0, 0, false, 2);

/// Default minimum quantity a line needs to qualify
pub const DEFAULT_MIN_QUANTITY: i64 = 2;

/// Item types on promotion by default
pub const DEFAULT_PROMOTION_ITEMS: [MenuItemType; 3] =
    [MenuItemType::Orange, MenuItemType::Pink, MenuItemType::Green];

/// Buy Two Discount Rule
///
/// Every order line of an eligible item type with at least `min_quantity` units adds
/// `rate` of that type's subtotal to the discount. The subtotal covers all lines of the type,
/// so two qualifying lines of the same type are each discounted on the combined amount.
#[derive(Debug, Clone)]
pub struct BuyTwoDiscountRule {
    eligible: FxHashSet<MenuItemType>,
    min_quantity: i64,
    rate: Percentage,
}

impl BuyTwoDiscountRule {
    /// Create a new buy two discount.
    pub fn new(
        eligible: impl IntoIterator<Item = MenuItemType>,
        min_quantity: i64,
        rate: Percentage,
    ) -> Self {
        Self {
            eligible: eligible.into_iter().collect(),
            min_quantity,
            rate,
        }
    }

    /// Whether a menu item type is on promotion
    pub fn is_eligible(&self, item_type: MenuItemType) -> bool {
        self.eligible.contains(&item_type)
    }

    /// Minimum quantity a line needs to qualify
    pub fn min_quantity(&self) -> i64 {
        self.min_quantity
    }

    /// Discount rate
    pub fn rate(&self) -> Percentage {
        self.rate
    }
}

impl Default for BuyTwoDiscountRule {
    fn default() -> Self {
        Self::new(
            DEFAULT_PROMOTION_ITEMS,
            DEFAULT_MIN_QUANTITY,
            Percentage::from(DEFAULT_PROMOTION_RATE),
        )
    }
}

impl PricingRule for BuyTwoDiscountRule {
    fn name(&self) -> &str {
        "Buy Two Discount"
    }

    fn category(&self) -> DiscountCategory {
        DiscountCategory::Promotion
    }

    fn calculate<'a>(
        &self,
        order: &Order,
        total: Money<'a, Currency>,
        subtotals: &ItemSubtotals<'a>,
    ) -> Result<Money<'a, Currency>, DiscountError> {
        let zero = Money::from_minor(0, total.currency());

        order
            .items()
            .iter()
            .filter(|line| {
                self.is_eligible(line.item_type()) && line.quantity() >= self.min_quantity
            })
            .try_fold(zero, |discount, line| {
                let subtotal = subtotals.get(line.item_type()).unwrap_or(zero);

                Ok(discount.add(percent_of(&subtotal, &self.rate)?)?)
            })
    }
}
