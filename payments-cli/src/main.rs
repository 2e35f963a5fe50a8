//! Payments CLI
//!
//! Command-line interface for the Payments API.

use anyhow::Result;
use clap::{Parser, Subcommand};

use payments_client::PaymentsClient;
use payments_types::{OrderId, PaymentId, PaymentMethod, PaymentRequest};

#[derive(Parser)]
#[command(name = "payments")]
#[command(author, version, about = "Payments API CLI client", long_about = None)]
struct Cli {
    /// Base URL of the Payments API
    #[arg(
        long,
        env = "PAYMENTS_API_URL",
        default_value = "http://localhost:3000"
    )]
    api_url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Payment operations
    Payment {
        #[command(subcommand)]
        action: PaymentCommands,
    },
    /// Check API health
    Health,
}

#[derive(Subcommand)]
enum PaymentCommands {
    /// Record a payment for an order
    Create {
        #[arg(long)]
        order_id: i64,
        /// Amount in smallest currency unit
        #[arg(long)]
        amount: i64,
        /// CARD, UPI, NET_BANKING, WALLET or CASH_ON_DELIVERY
        #[arg(long, default_value = "CARD")]
        method: String,
        #[arg(long)]
        reference: Option<String>,
    },
    /// Get a payment by ID
    Get {
        /// Payment ID
        id: i64,
    },
    /// Get the payment recorded for an order
    ByOrder {
        /// Order ID
        order_id: i64,
    },
    /// Change the status of a payment
    SetStatus {
        /// Payment ID
        id: i64,
        /// PENDING, PAID, FAILED or REFUNDED
        status: String,
    },
    /// List all payments
    List,
}

fn parse_method(s: &str) -> Result<PaymentMethod> {
    s.parse().map_err(|_| {
        anyhow::anyhow!(
            "Unknown payment method: {}. Supported: CARD, UPI, NET_BANKING, WALLET, CASH_ON_DELIVERY",
            s
        )
    })
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let client = PaymentsClient::new(&cli.api_url);

    match cli.command {
        Commands::Health => {
            let healthy = client.health().await?;
            if healthy {
                println!("✓ API is healthy");
            } else {
                println!("✗ API is not healthy");
                std::process::exit(1);
            }
        }

        Commands::Payment { action } => match action {
            PaymentCommands::Create {
                order_id,
                amount,
                method,
                reference,
            } => {
                let req = PaymentRequest {
                    order_id: OrderId::new(order_id),
                    amount,
                    method: parse_method(&method)?,
                    reference,
                };
                let payment = client.create_payment(&req).await?;
                println!("{}", serde_json::to_string_pretty(&payment)?);
            }
            PaymentCommands::Get { id } => {
                let payment = client.get_payment(PaymentId::new(id)).await?;
                println!("{}", serde_json::to_string_pretty(&payment)?);
            }
            PaymentCommands::ByOrder { order_id } => {
                let payment = client.get_payment_by_order(OrderId::new(order_id)).await?;
                println!("{}", serde_json::to_string_pretty(&payment)?);
            }
            PaymentCommands::SetStatus { id, status } => {
                let payment = client
                    .update_payment_status(PaymentId::new(id), &status)
                    .await?;
                println!("{}", serde_json::to_string_pretty(&payment)?);
            }
            PaymentCommands::List => {
                let payments = client.list_payments().await?;
                println!("{}", serde_json::to_string_pretty(&payments)?);
            }
        },
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_set_status() {
        let cli = Cli::try_parse_from(["payments", "payment", "set-status", "1", "PAID"]).unwrap();
        match cli.command {
            Commands::Payment {
                action: PaymentCommands::SetStatus { id, status },
            } => {
                assert_eq!(id, 1);
                assert_eq!(status, "PAID");
            }
            _ => panic!("expected set-status"),
        }
    }

    #[test]
    fn test_parse_method() {
        assert_eq!(parse_method("upi").unwrap(), PaymentMethod::Upi);
        assert!(parse_method("cheque").is_err());
    }
}
