//! Integration tests driving the interactive shell through in-memory IO.

use std::io::Cursor;

use testresult::TestResult;

use canteen::prelude::*;

fn session(calculator: &Calculator<'_>, input: &str) -> Result<(Order, String), ShellError> {
    let mut shell = Shell::new(calculator, Cursor::new(input.as_bytes()), Vec::new());

    shell.run()?;

    let order = shell.order().clone();
    let output = String::from_utf8_lossy(&shell.into_output()).into_owned();

    Ok((order, output))
}

#[test]
fn member_checkout_prints_discounted_total_and_resets_cart() -> TestResult {
    let calculator = Calculator::new(Catalog::standard());

    // Orange x2, Red x1, member card on, view cart, checkout, exit
    let input = "1\n7\n2\n1\n1\n1\n3\n2\n4\n5\n";

    let (order, output) = session(&calculator, input)?;

    assert!(output.contains("Item added!"), "no confirmation in: {output}");
    assert!(output.contains("Orange Set × 2"), "cart missing orange line: {output}");
    assert!(output.contains("Member card used"), "membership not shown: {output}");
    assert!(output.contains("Member Discount"), "receipt missing member row: {output}");
    assert!(output.contains("Buy Two Discount"), "receipt missing promotion row: {output}");
    assert!(output.contains("Total price is:"), "no total in: {output}");
    assert!(output.contains("249"), "wrong grand total in: {output}");
    assert!(output.contains("Exiting..."), "did not exit cleanly: {output}");

    assert!(order.is_empty(), "cart was not reset");
    assert!(order.is_member(), "membership was not kept");

    Ok(())
}

#[test]
fn empty_cart_checkout_is_refused() -> TestResult {
    let calculator = Calculator::new(Catalog::standard());

    let (_, output) = session(&calculator, "4\n2\n5\n")?;

    assert!(output.contains("Cart is empty!"), "no refusal in: {output}");
    assert!(output.contains("Empty"), "cart not shown as empty: {output}");
    assert!(!output.contains("Total price is:"), "priced an empty cart: {output}");

    Ok(())
}

#[test]
fn end_of_input_exits_quietly() -> TestResult {
    let calculator = Calculator::new(Catalog::standard());

    let (order, output) = session(&calculator, "1\n2\n")?;

    assert!(order.is_empty());
    assert!(!output.contains("Item added!"), "added an item without a quantity: {output}");

    Ok(())
}
