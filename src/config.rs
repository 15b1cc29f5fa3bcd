//! Store configuration
//!
//! Loads the menu and pricing rule parameters from a YAML document:
//!
//! ```yaml
//! menu:
//!   RED: { name: Red Set, price: "50 THB" }
//!   ORANGE: { name: Orange Set, price: "120 THB" }
//! rules:
//!   member_discount: { rate: "10%" }
//!   buy_two_discount: { items: [ORANGE], min_quantity: 2, rate: "5%" }
//! ```

use std::{fs, path::Path};

use decimal_percentage::Percentage;
use rust_decimal::{Decimal, prelude::ToPrimitive};
use rustc_hash::FxHashMap;
use rusty_money::{
    Money,
    iso::{Currency, EUR, GBP, THB, USD},
};
use serde::Deserialize;
use thiserror::Error;

use crate::{
    calculator::Calculator,
    catalog::{Catalog, CatalogError, MenuItem, MenuItemType},
    rules::{
        BuyTwoDiscountRule, MemberDiscountRule, Rule,
        buy_two_discount::{DEFAULT_MIN_QUANTITY, DEFAULT_PROMOTION_ITEMS},
        pricing_rule,
    },
};

/// Store configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// IO error reading the configuration file
    #[error("Failed to read store configuration: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Invalid price format
    #[error("Invalid price format: {0}")]
    InvalidPrice(String),

    /// Invalid percentage format
    #[error("Invalid percentage format: {0}")]
    InvalidPercentage(String),

    /// Unknown currency code
    #[error("Unknown currency code: {0}")]
    UnknownCurrency(String),

    /// The menu has no entries
    #[error("Menu has no items; cannot determine currency")]
    EmptyMenu,

    /// Catalog construction failed, e.g. mixed currencies
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

/// Store configuration document
#[derive(Debug, Deserialize)]
pub struct StoreConfig {
    /// Map of item type -> menu entry
    pub menu: FxHashMap<MenuItemType, MenuItemConfig>,

    /// Pricing rule parameters
    #[serde(default)]
    pub rules: RulesConfig,
}

/// Menu entry
#[derive(Debug, Deserialize)]
pub struct MenuItemConfig {
    /// Display name
    pub name: String,

    /// Unit price (e.g., "50 THB")
    pub price: String,
}

/// Pricing rule sections; an absent section keeps the rule with its defaults.
#[derive(Debug, Default, Deserialize)]
pub struct RulesConfig {
    /// Member discount parameters
    #[serde(default)]
    pub member_discount: Option<MemberDiscountConfig>,

    /// Buy two discount parameters
    #[serde(default)]
    pub buy_two_discount: Option<BuyTwoDiscountConfig>,
}

/// Member discount parameters
#[derive(Debug, Deserialize)]
pub struct MemberDiscountConfig {
    /// Set to `false` to drop the rule
    #[serde(default = "enabled")]
    pub enabled: bool,

    /// Discount rate (e.g., "10%" or "0.10")
    pub rate: Option<String>,
}

/// Buy two discount parameters
#[derive(Debug, Deserialize)]
pub struct BuyTwoDiscountConfig {
    /// Set to `false` to drop the rule
    #[serde(default = "enabled")]
    pub enabled: bool,

    /// Item types on promotion
    pub items: Option<Vec<MenuItemType>>,

    /// Minimum quantity a line needs to qualify
    pub min_quantity: Option<i64>,

    /// Discount rate (e.g., "5%" or "0.05")
    pub rate: Option<String>,
}

fn enabled() -> bool {
    true
}

impl StoreConfig {
    /// Load a store configuration from a YAML file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;

        Self::from_yaml(&contents)
    }

    /// Parse a store configuration from a YAML string
    ///
    /// # Errors
    ///
    /// Returns an error if the YAML is malformed or does not match the expected shape.
    pub fn from_yaml(contents: &str) -> Result<Self, ConfigError> {
        Ok(serde_norway::from_str(contents)?)
    }

    /// Build the catalog described by the menu section
    ///
    /// # Errors
    ///
    /// Returns an error if the menu is empty, a price cannot be parsed, or the entries are
    /// priced in more than one currency.
    pub fn catalog(&self) -> Result<Catalog<'static>, ConfigError> {
        let mut entries = Vec::with_capacity(self.menu.len());

        for item_type in MenuItemType::ALL {
            let Some(entry) = self.menu.get(&item_type) else {
                continue;
            };

            let (minor_units, currency) = parse_price(&entry.price)?;

            entries.push((
                item_type,
                MenuItem::new(entry.name.clone(), Money::from_minor(minor_units, currency)),
            ));
        }

        let currency = entries
            .first()
            .map(|(_, item)| item.price().currency())
            .ok_or(ConfigError::EmptyMenu)?;

        Ok(Catalog::with_items(entries, currency)?)
    }

    /// Build the pricing rules, member discount first
    ///
    /// # Errors
    ///
    /// Returns an error if a configured rate cannot be parsed.
    pub fn rules(&self) -> Result<Vec<Rule<'static>>, ConfigError> {
        let mut rules = Vec::with_capacity(2);

        match &self.rules.member_discount {
            None => rules.push(pricing_rule(MemberDiscountRule::default())),
            Some(config) if config.enabled => {
                let rule = match config.rate.as_deref() {
                    Some(rate) => MemberDiscountRule::new(parse_percentage(rate)?),
                    None => MemberDiscountRule::default(),
                };

                rules.push(pricing_rule(rule));
            }
            Some(_) => {}
        }

        match &self.rules.buy_two_discount {
            None => rules.push(pricing_rule(BuyTwoDiscountRule::default())),
            Some(config) if config.enabled => {
                let defaults = BuyTwoDiscountRule::default();

                let rate = match config.rate.as_deref() {
                    Some(rate) => parse_percentage(rate)?,
                    None => defaults.rate(),
                };

                let items = config
                    .items
                    .clone()
                    .unwrap_or_else(|| DEFAULT_PROMOTION_ITEMS.to_vec());

                rules.push(pricing_rule(BuyTwoDiscountRule::new(
                    items,
                    config.min_quantity.unwrap_or(DEFAULT_MIN_QUANTITY),
                    rate,
                )));
            }
            Some(_) => {}
        }

        Ok(rules)
    }

    /// Build a calculator from the menu and rules
    ///
    /// # Errors
    ///
    /// Returns an error if either the catalog or the rules cannot be built.
    pub fn calculator(&self) -> Result<Calculator<'static>, ConfigError> {
        Ok(Calculator::with_rules(self.catalog()?, self.rules()?))
    }
}

/// Parse price string (e.g., "50 THB" or "2.99 GBP") into minor units and currency
///
/// # Errors
///
/// Returns an error if the string is not in the format "AMOUNT CURRENCY",
/// if the amount cannot be parsed as a decimal, or if the currency code
/// is not recognized.
pub fn parse_price(s: &str) -> Result<(i64, &'static Currency), ConfigError> {
    let parts: Vec<&str> = s.split_whitespace().collect();

    let [amount, currency_code] = parts.as_slice() else {
        return Err(ConfigError::InvalidPrice(format!(
            "Expected format 'AMOUNT CURRENCY', got: {s}"
        )));
    };

    let amount = amount
        .parse::<Decimal>()
        .map_err(|_err| ConfigError::InvalidPrice(s.to_string()))?;

    if amount.is_sign_negative() {
        return Err(ConfigError::InvalidPrice(s.to_string()));
    }

    let minor_units = amount
        .checked_mul(Decimal::new(100, 0))
        .and_then(|value| value.round_dp(0).to_i64())
        .ok_or_else(|| ConfigError::InvalidPrice(s.to_string()))?;

    let currency = match *currency_code {
        "THB" => THB,
        "GBP" => GBP,
        "USD" => USD,
        "EUR" => EUR,
        other => return Err(ConfigError::UnknownCurrency(other.to_string())),
    };

    Ok((minor_units, currency))
}

/// Parse percentage string (e.g., "5%" or "0.05") into a `Percentage`
///
/// # Errors
///
/// Returns an error if the string cannot be parsed or the value is negative.
pub fn parse_percentage(s: &str) -> Result<Percentage, ConfigError> {
    let trimmed = s.trim();

    let value = if let Some(percent_str) = trimmed.strip_suffix('%') {
        percent_str
            .trim()
            .parse::<Decimal>()
            .ok()
            .and_then(|value| value.checked_div(Decimal::ONE_HUNDRED))
    } else {
        trimmed.parse::<Decimal>().ok()
    }
    .ok_or_else(|| ConfigError::InvalidPercentage(s.to_string()))?;

    if value.is_sign_negative() {
        return Err(ConfigError::InvalidPercentage(s.to_string()));
    }

    Ok(Percentage::from(value))
}
