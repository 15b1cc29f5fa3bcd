//! Shell
//!
//! Text menu that builds an order and checks out through a [`Calculator`].

use std::io::{self, BufRead, Write};

use rusty_money::Money;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::{calculator::Calculator, orders::Order, receipt::ReceiptError};

/// Errors that end a shell session.
#[derive(Debug, Error)]
pub enum ShellError {
    /// Reading input or writing output failed.
    #[error("terminal IO failed: {0}")]
    Io(#[from] io::Error),

    /// The receipt could not be rendered.
    #[error(transparent)]
    Receipt(#[from] ReceiptError),
}

/// Interactive order shell
#[derive(Debug)]
pub struct Shell<'c, 'a, R, W> {
    calculator: &'c Calculator<'a>,
    order: Order,
    input: R,
    output: W,
}

impl<'c, 'a, R: BufRead, W: Write> Shell<'c, 'a, R, W> {
    /// Create a shell with an empty cart.
    pub fn new(calculator: &'c Calculator<'a>, input: R, output: W) -> Self {
        Self {
            calculator,
            order: Order::new(),
            input,
            output,
        }
    }

    /// Start from an existing order instead of an empty cart.
    #[must_use]
    pub fn with_order(mut self, order: Order) -> Self {
        self.order = order;
        self
    }

    /// Current cart
    pub fn order(&self) -> &Order {
        &self.order
    }

    /// Consume the shell, returning its output sink.
    pub fn into_output(self) -> W {
        self.output
    }

    /// Run until the user exits or input ends.
    ///
    /// # Errors
    ///
    /// Returns a [`ShellError`] if the terminal cannot be read or written.
    pub fn run(&mut self) -> Result<(), ShellError> {
        writeln!(self.output, "=========================")?;
        writeln!(self.output, "Food store calculator")?;
        writeln!(self.output, "=========================")?;

        loop {
            self.show_menu()?;

            let Some(choice) = self.prompt("Your choice: ")? else {
                debug!("input closed");
                break;
            };

            match choice.as_str() {
                "1" => self.add_item()?,
                "2" => self.view_cart()?,
                "3" => self.toggle_member()?,
                "4" => self.checkout()?,
                "5" => {
                    writeln!(self.output, "Exiting...")?;
                    break;
                }
                _ => writeln!(self.output, "Invalid choice! Choose between 1-5")?,
            }
        }

        Ok(())
    }

    fn show_menu(&mut self) -> Result<(), ShellError> {
        writeln!(self.output)?;
        writeln!(self.output, "1. Add Item")?;
        writeln!(self.output, "2. View Cart")?;
        writeln!(self.output, "3. Toggle Member Card")?;
        writeln!(self.output, "4. Checkout")?;
        writeln!(self.output, "5. Exit")?;

        Ok(())
    }

    /// Write `prompt` and read one trimmed line; `None` once input is exhausted.
    fn prompt(&mut self, prompt: &str) -> Result<Option<String>, ShellError> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;

        let mut line = String::new();

        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }

        Ok(Some(line.trim().to_string()))
    }

    fn add_item(&mut self) -> Result<(), ShellError> {
        let calculator = self.calculator;
        let catalog = calculator.catalog();

        writeln!(self.output)?;
        writeln!(self.output, "MENU:")?;

        for (number, (_, item)) in catalog.iter().enumerate() {
            writeln!(
                self.output,
                "{}. {:<12} - {}",
                number + 1,
                item.name(),
                item.price()
            )?;
        }

        let Some(choice) = self.prompt(&format!("\nSelect item (1-{}): ", catalog.len()))? else {
            return Ok(());
        };

        let Some(quantity) = self.prompt("Quantity: ")? else {
            return Ok(());
        };

        let item_type = choice
            .parse::<usize>()
            .ok()
            .and_then(|number| number.checked_sub(1))
            .and_then(|index| catalog.iter().nth(index))
            .map(|(item_type, _)| item_type);

        let quantity = quantity.parse::<i64>().ok().filter(|quantity| *quantity > 0);

        match (item_type, quantity) {
            (Some(item_type), Some(quantity)) => {
                self.order.add_item(item_type, quantity);
                debug!(%item_type, quantity, lines = self.order.len(), "item added");
                writeln!(self.output, "Item added!")?;
            }
            _ => {
                debug!(%choice, "rejected item selection");
                writeln!(self.output, "Invalid input")?;
            }
        }

        Ok(())
    }

    fn view_cart(&mut self) -> Result<(), ShellError> {
        let calculator = self.calculator;
        let catalog = calculator.catalog();

        writeln!(self.output)?;
        writeln!(self.output, "YOUR CART:")?;

        if self.order.is_empty() {
            writeln!(self.output, "Empty")?;
            return Ok(());
        }

        for line in self.order.items() {
            match catalog.get(line.item_type()) {
                Ok(item) => {
                    let line_total = item
                        .price()
                        .to_minor_units()
                        .checked_mul(line.quantity())
                        .map(|minor| Money::from_minor(minor, item.price().currency()));

                    match line_total {
                        Some(line_total) => writeln!(
                            self.output,
                            "{} × {} - {line_total}",
                            item.name(),
                            line.quantity()
                        )?,
                        None => writeln!(
                            self.output,
                            "{} × {} - too large to price",
                            item.name(),
                            line.quantity()
                        )?,
                    }
                }
                Err(err) => writeln!(
                    self.output,
                    "{} × {} - {err}",
                    line.item_type(),
                    line.quantity()
                )?,
            }
        }

        if self.order.is_member() {
            writeln!(self.output, "Member card used")?;
        } else {
            writeln!(self.output, "No member card used")?;
        }

        Ok(())
    }

    fn toggle_member(&mut self) -> Result<(), ShellError> {
        let is_member = self.order.toggle_member();

        debug!(is_member, "member card toggled");

        if is_member {
            writeln!(self.output, "Use member card!")?;
        } else {
            writeln!(self.output, "Don't use member card!")?;
        }

        Ok(())
    }

    fn checkout(&mut self) -> Result<(), ShellError> {
        if self.order.is_empty() {
            writeln!(self.output, "Cart is empty!")?;
            return Ok(());
        }

        match self.calculator.calculate_order(&self.order) {
            Ok(result) => {
                info!(
                    lines = self.order.len(),
                    is_member = self.order.is_member(),
                    total = %result.total(),
                    discount = %result.total_discount(),
                    grand_total = %result.grand_total(),
                    "order checked out"
                );

                result.write_to(&mut self.output)?;

                writeln!(self.output, "==================================")?;
                writeln!(self.output, "Total price is: {}", result.grand_total())?;
                writeln!(self.output, "==================================")?;

                self.order.clear();
            }
            Err(err) => {
                warn!(error = %err, "checkout failed");
                writeln!(self.output, "Unable to price order: {err}")?;
            }
        }

        Ok(())
    }
}
