//! Canteen prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    calculator::{Calculator, CalculatorError},
    catalog::{Catalog, CatalogError, MenuItem, MenuItemType},
    config::{ConfigError, StoreConfig},
    discounts::{DiscountCategory, DiscountError},
    orders::{Order, OrderItem},
    pricing::{ItemSubtotals, OrderTotals, TotalPriceError, order_totals},
    receipt::{AppliedDiscount, CalculationResult, ReceiptError},
    rules::{
        BuyTwoDiscountRule, MemberDiscountRule, PricingRule, Rule, default_rules, pricing_rule,
    },
    shell::{Shell, ShellError},
};
