//! Catalog
//!
//! The fixed registry of purchasable menu items and their unit prices.

use std::{fmt, str::FromStr};

use rustc_hash::FxHashMap;
use rusty_money::{
    Money,
    iso::{Currency, THB},
};
use serde::Deserialize;
use thiserror::Error;

/// Errors raised while building or querying a catalog.
#[derive(Debug, Error, PartialEq)]
pub enum CatalogError {
    /// No entry exists for the requested item type.
    #[error("menu item not found: {0}")]
    NotFound(MenuItemType),

    /// An item was priced in a different currency from the catalog
    /// (item type, item currency, catalog currency).
    #[error("menu item {0} has currency {1}, but catalog has currency {2}")]
    CurrencyMismatch(MenuItemType, &'static str, &'static str),

    /// The item code is not one of the known menu item types.
    #[error("unknown menu item code: {0}")]
    UnknownCode(String),
}

/// Menu item type identifier
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum MenuItemType {
    /// Red set
    Red,

    /// Green set
    Green,

    /// Blue set
    Blue,

    /// Yellow set
    Yellow,

    /// Pink set
    Pink,

    /// Purple set
    Purple,

    /// Orange set
    Orange,
}

impl MenuItemType {
    /// Every item type, in menu order.
    pub const ALL: [MenuItemType; 7] = [
        MenuItemType::Red,
        MenuItemType::Green,
        MenuItemType::Blue,
        MenuItemType::Yellow,
        MenuItemType::Pink,
        MenuItemType::Purple,
        MenuItemType::Orange,
    ];

    /// Stable upper-case code used in configuration files and messages.
    pub fn code(self) -> &'static str {
        match self {
            MenuItemType::Red => "RED",
            MenuItemType::Green => "GREEN",
            MenuItemType::Blue => "BLUE",
            MenuItemType::Yellow => "YELLOW",
            MenuItemType::Pink => "PINK",
            MenuItemType::Purple => "PURPLE",
            MenuItemType::Orange => "ORANGE",
        }
    }
}

impl fmt::Display for MenuItemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for MenuItemType {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim();

        MenuItemType::ALL
            .into_iter()
            .find(|item_type| item_type.code().eq_ignore_ascii_case(code))
            .ok_or_else(|| CatalogError::UnknownCode(s.to_string()))
    }
}

/// A purchasable menu item
#[derive(Debug, Clone, PartialEq)]
pub struct MenuItem<'a> {
    name: String,
    price: Money<'a, Currency>,
}

impl<'a> MenuItem<'a> {
    /// Create a new menu item
    pub fn new(name: impl Into<String>, price: Money<'a, Currency>) -> Self {
        Self {
            name: name.into(),
            price,
        }
    }

    /// Display name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Unit price
    pub fn price(&self) -> &Money<'a, Currency> {
        &self.price
    }
}

/// Catalog
///
/// Immutable once handed to a calculator; built explicitly at startup either from
/// [`Catalog::standard`] or from a store configuration file.
#[derive(Debug, Clone)]
pub struct Catalog<'a> {
    items: FxHashMap<MenuItemType, MenuItem<'a>>,
    currency: &'static Currency,
}

impl<'a> Catalog<'a> {
    /// Create an empty catalog priced in the given currency.
    pub fn new(currency: &'static Currency) -> Self {
        Self {
            items: FxHashMap::default(),
            currency,
        }
    }

    /// Create a catalog from `(type, item)` pairs.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::CurrencyMismatch`] if any item is priced in another currency.
    pub fn with_items(
        items: impl IntoIterator<Item = (MenuItemType, MenuItem<'a>)>,
        currency: &'static Currency,
    ) -> Result<Self, CatalogError> {
        let mut catalog = Self::new(currency);

        for (item_type, item) in items {
            catalog.insert(item_type, item)?;
        }

        Ok(catalog)
    }

    /// Add or replace the entry for an item type.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::CurrencyMismatch`] if the item is priced in another currency.
    pub fn insert(
        &mut self,
        item_type: MenuItemType,
        item: MenuItem<'a>,
    ) -> Result<(), CatalogError> {
        let item_currency = item.price().currency();

        if item_currency != self.currency {
            return Err(CatalogError::CurrencyMismatch(
                item_type,
                item_currency.iso_alpha_code,
                self.currency.iso_alpha_code,
            ));
        }

        self.items.insert(item_type, item);

        Ok(())
    }

    /// Look up the menu item for an item type.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::NotFound`] if the catalog has no entry for `item_type`.
    pub fn get(&self, item_type: MenuItemType) -> Result<&MenuItem<'a>, CatalogError> {
        self.items
            .get(&item_type)
            .ok_or(CatalogError::NotFound(item_type))
    }

    /// Iterate over entries in menu order.
    pub fn iter(&self) -> impl Iterator<Item = (MenuItemType, &MenuItem<'a>)> {
        MenuItemType::ALL
            .into_iter()
            .filter_map(|item_type| self.items.get(&item_type).map(|item| (item_type, item)))
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if the catalog has no entries.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Currency every entry is priced in
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }
}

impl Catalog<'static> {
    /// The store's standard menu, priced in Thai Baht.
    pub fn standard() -> Self {
        let entries = [
            (MenuItemType::Red, "Red Set", 50),
            (MenuItemType::Green, "Green Set", 40),
            (MenuItemType::Blue, "Blue Set", 30),
            (MenuItemType::Yellow, "Yellow Set", 50),
            (MenuItemType::Pink, "Pink Set", 80),
            (MenuItemType::Purple, "Purple Set", 90),
            (MenuItemType::Orange, "Orange Set", 120),
        ];

        let items = entries
            .into_iter()
            .map(|(item_type, name, baht)| {
                (item_type, MenuItem::new(name, Money::from_minor(baht * 100, THB)))
            })
            .collect();

        Self {
            items,
            currency: THB,
        }
    }
}
