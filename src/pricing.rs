//! Pricing
//!
//! Totals an order against a catalog before any discounts are applied.

use rustc_hash::FxHashMap;
use rusty_money::{Money, MoneyError, iso::Currency};
use thiserror::Error;

use crate::{
    catalog::{Catalog, CatalogError, MenuItemType},
    orders::Order,
};

/// Errors that can occur while calculating total price.
#[derive(Debug, Error, PartialEq)]
pub enum TotalPriceError {
    /// An order line references an item type the catalog does not stock.
    #[error("get menu item {item_type}: {source}")]
    MenuItemNotFound {
        /// Item type of the offending line
        item_type: MenuItemType,

        /// Underlying lookup failure
        source: CatalogError,
    },

    /// Unit price multiplied by quantity does not fit in minor units.
    #[error("line total for {quantity} x {item_type} overflowed")]
    QuantityOverflow {
        /// Item type of the offending line
        item_type: MenuItemType,

        /// Quantity of the offending line
        quantity: i64,
    },

    /// Wrapped money arithmetic or currency mismatch error.
    #[error(transparent)]
    Money(#[from] MoneyError),
}

/// Per item type subtotals, summed across every line sharing the type.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ItemSubtotals<'a> {
    subtotals: FxHashMap<MenuItemType, Money<'a, Currency>>,
}

impl<'a> ItemSubtotals<'a> {
    /// Create an empty breakdown.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `amount` to the subtotal for `item_type`.
    ///
    /// # Errors
    ///
    /// Returns a [`MoneyError`] if `amount` is in a different currency from the existing subtotal.
    pub fn add(
        &mut self,
        item_type: MenuItemType,
        amount: Money<'a, Currency>,
    ) -> Result<(), MoneyError> {
        let subtotal = match self.subtotals.get(&item_type) {
            Some(existing) => existing.add(amount)?,
            None => amount,
        };

        self.subtotals.insert(item_type, subtotal);

        Ok(())
    }

    /// Subtotal for an item type, if any line of that type was priced.
    pub fn get(&self, item_type: MenuItemType) -> Option<Money<'a, Currency>> {
        self.subtotals.get(&item_type).copied()
    }

    /// Iterate over `(type, subtotal)` pairs in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (MenuItemType, Money<'a, Currency>)> + '_ {
        self.subtotals
            .iter()
            .map(|(item_type, subtotal)| (*item_type, *subtotal))
    }

    /// Number of distinct item types
    pub fn len(&self) -> usize {
        self.subtotals.len()
    }

    /// Check if no subtotals were recorded.
    pub fn is_empty(&self) -> bool {
        self.subtotals.is_empty()
    }
}

impl<'a> FromIterator<(MenuItemType, Money<'a, Currency>)> for ItemSubtotals<'a> {
    fn from_iter<I: IntoIterator<Item = (MenuItemType, Money<'a, Currency>)>>(iter: I) -> Self {
        Self {
            subtotals: iter.into_iter().collect(),
        }
    }
}

/// Pre-discount totals for an order.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderTotals<'a> {
    /// Sum of every line
    pub total: Money<'a, Currency>,

    /// Line totals grouped by item type
    pub subtotals: ItemSubtotals<'a>,
}

/// Calculates the pre-discount total of an order and its per item type breakdown.
///
/// # Errors
///
/// - [`TotalPriceError::MenuItemNotFound`]: a line's item type is missing from the catalog.
/// - [`TotalPriceError::QuantityOverflow`]: a line total does not fit in minor units.
/// - [`TotalPriceError::Money`]: wrapped money arithmetic or currency mismatch error.
pub fn order_totals<'a>(
    order: &Order,
    catalog: &Catalog<'a>,
) -> Result<OrderTotals<'a>, TotalPriceError> {
    let mut total = Money::from_minor(0, catalog.currency());
    let mut subtotals = ItemSubtotals::new();

    for line in order.items() {
        let item_type = line.item_type();

        let menu_item = catalog
            .get(item_type)
            .map_err(|source| TotalPriceError::MenuItemNotFound { item_type, source })?;

        let line_minor = menu_item
            .price()
            .to_minor_units()
            .checked_mul(line.quantity())
            .ok_or(TotalPriceError::QuantityOverflow {
                item_type,
                quantity: line.quantity(),
            })?;

        let line_total = Money::from_minor(line_minor, menu_item.price().currency());

        subtotals.add(item_type, line_total)?;
        total = total.add(line_total)?;
    }

    Ok(OrderTotals { total, subtotals })
}
