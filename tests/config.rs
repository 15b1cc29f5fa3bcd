//! Integration tests for loading store configuration files.

use std::{io::Write, path::Path};

use rusty_money::{
    Money,
    iso::{GBP, THB},
};
use tempfile::NamedTempFile;
use testresult::TestResult;

use canteen::prelude::*;

#[test]
fn bundled_store_fixture_matches_standard_menu() -> TestResult {
    let path = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("fixtures")
        .join("store.yml");

    let config = StoreConfig::from_path(path)?;
    let catalog = config.catalog()?;
    let standard = Catalog::standard();

    assert_eq!(catalog.len(), standard.len());
    assert_eq!(catalog.currency(), THB);

    for (item_type, item) in standard.iter() {
        assert_eq!(catalog.get(item_type)?, item, "{item_type} differs");
    }

    Ok(())
}

#[test]
fn configured_calculator_prices_like_the_default() -> TestResult {
    let path = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("fixtures")
        .join("store.yml");

    let calculator = StoreConfig::from_path(path)?.calculator()?;
    let order = Order::with_items(
        [
            OrderItem::new(MenuItemType::Orange, 2),
            OrderItem::new(MenuItemType::Red, 1),
        ],
        true,
    );

    let result = calculator.calculate_order(&order)?;

    assert_eq!(calculator.rule_count(), 2);
    assert_eq!(result.grand_total(), Money::from_minor(24_900, THB));

    Ok(())
}

#[test]
fn custom_menu_and_rules_are_loaded_from_file() -> TestResult {
    let mut file = NamedTempFile::new()?;

    write!(
        file,
        r#"
menu:
  BLUE: {{ name: Blue Plate, price: "4.50 GBP" }}
  PURPLE: {{ name: Purple Plate, price: "6 GBP" }}
rules:
  member_discount:
    rate: "20%"
  buy_two_discount:
    items: [BLUE]
    min_quantity: 3
    rate: "0.10"
"#
    )?;

    let calculator = StoreConfig::from_path(file.path())?.calculator()?;

    assert_eq!(calculator.catalog().currency(), GBP);
    assert!(calculator.catalog().get(MenuItemType::Red).is_err());

    let order = Order::with_items(
        [
            OrderItem::new(MenuItemType::Blue, 3),
            OrderItem::new(MenuItemType::Purple, 2),
        ],
        true,
    );

    let result = calculator.calculate_order(&order)?;

    // 13.50 + 12.00
    assert_eq!(result.total(), Money::from_minor(2_550, GBP));
    assert_eq!(result.member_discount(), Money::from_minor(510, GBP));
    // 10% of the 13.50 BLUE subtotal
    assert_eq!(result.promotion_discount(), Money::from_minor(135, GBP));
    assert_eq!(result.grand_total(), Money::from_minor(1_905, GBP));

    Ok(())
}

#[test]
fn missing_file_is_an_io_error() {
    let result = StoreConfig::from_path("does/not/exist.yml");

    assert!(matches!(result, Err(ConfigError::Io(_))));
}

#[test]
fn unknown_item_code_is_a_yaml_error() {
    let result = StoreConfig::from_yaml("menu:\n  TEAL: { name: Teal Set, price: \"10 THB\" }\n");

    assert!(matches!(result, Err(ConfigError::Yaml(_))));
}
