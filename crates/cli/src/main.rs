mod config;

use anyhow::Context;

use kedai_cart::PosSession;

use crate::config::{CONFIG_ENV, Config};

fn main() -> anyhow::Result<()> {
    let (config, source) = Config::from_env()?;
    kedai_observability::init(config.log_format);

    match &source {
        Some(path) => tracing::info!(path = %path, "loaded config"),
        None => tracing::warn!("{CONFIG_ENV} not set; using the default menu and order"),
    }

    let mut session = PosSession::new(config.catalog()?, config.receipt.clone());

    for product in session.catalog().iter() {
        println!(
            "{} | {} | {} | stock {}",
            product.code().unwrap_or("-"),
            product.name(),
            product.price().format_with(&session.receipt_config().currency),
            product.stock()
        );
    }

    for product in session.catalog().low_stock_items() {
        tracing::warn!(name = product.name(), stock = product.stock(), "low stock");
    }

    for line in &config.order {
        session
            .add_to_cart(&line.name, line.quantity)
            .with_context(|| format!("adding {} x{} to the cart", line.name, line.quantity))?;
    }

    println!();
    println!("{}", session.receipt()?);
    tracing::info!(total = session.total()?.units(), lines = session.cart().len(), "checkout complete");
    Ok(())
}
