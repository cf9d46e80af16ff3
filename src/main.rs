//! Inventory rules - order stock processing

use anyhow::Result;
use clap::{Parser, Subcommand};
use inventory_rules::{Config, OrderId, ServiceContext};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
#[command(name = "inventory-rules", version, about = "Apply inventory rules to ecommerce orders")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run the product rules over every line of an order
    ProcessOrder { order_id: i32 },
    /// Print an order with its products
    ShowOrder { order_id: i32 },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::registry().with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into())).with(tracing_subscriber::fmt::layer()).init();
    let cli = Cli::parse();
    let ctx = ServiceContext::connect(&Config::from_env()?).await?;

    match cli.command {
        Command::ProcessOrder { order_id } => {
            let outcomes = ctx.orders.process_order(OrderId(order_id)).await?;
            println!("{}", serde_json::to_string_pretty(&outcomes)?);
        }
        Command::ShowOrder { order_id } => match ctx.orders.get_order(OrderId(order_id)).await? {
            Some(order) => println!("{}", serde_json::to_string_pretty(&order)?),
            None => anyhow::bail!("order {order_id} not found"),
        },
    }
    Ok(())
}
