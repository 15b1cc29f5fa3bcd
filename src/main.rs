//! Canteen interactive till

use std::{io, path::PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use canteen::{
    calculator::Calculator, catalog::Catalog, config::StoreConfig, orders::Order, shell::Shell,
};

#[derive(Debug, Parser)]
#[command(name = "canteen", about = "Food store order calculator", long_about = None)]
struct Cli {
    /// Store configuration file with the menu and pricing rules; the built-in menu is used
    /// when omitted
    #[arg(short, long, env = "CANTEEN_CONFIG")]
    config: Option<PathBuf>,

    /// Start with the member card applied
    #[arg(short, long)]
    member: bool,
}

pub fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging();

    let calculator = match cli.config.as_deref() {
        Some(path) => {
            info!(path = %path.display(), "loading store configuration");

            StoreConfig::from_path(path)
                .and_then(|config| config.calculator())
                .with_context(|| format!("loading store configuration {}", path.display()))?
        }
        None => Calculator::new(Catalog::standard()),
    };

    info!(
        items = calculator.catalog().len(),
        rules = calculator.rule_count(),
        "calculator ready"
    );

    let mut order = Order::new();
    order.set_member(cli.member);

    let stdin = io::stdin();
    let stdout = io::stdout();

    Shell::new(&calculator, stdin.lock(), stdout.lock())
        .with_order(order)
        .run()?;

    Ok(())
}

/// Log to stderr so the menu on stdout stays readable; `RUST_LOG` overrides the `warn` default.
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_err| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .compact()
        .with_target(true)
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}
