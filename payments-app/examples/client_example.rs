//! Client example demonstrating the full payment flow against a running server.
//!
//! Run with: cargo run -p payments-app --example client_example --no-default-features --features sqlite

use payments_client::PaymentsClient;
use payments_hex::{PaymentService, inbound::HttpServer};
use payments_repo::build_repo;
use payments_types::{OrderId, PaymentId, PaymentMethod, PaymentRequest};
use std::net::SocketAddr;
use tempfile::tempdir;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt().with_env_filter("info").init();

    // Bind first so the port is ours before the server starts
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr: SocketAddr = listener.local_addr()?;

    // Use a temp file-backed SQLite DB
    let tmp = tempdir()?;
    let db_path = tmp.path().join("payments.db");
    let db_url = format!("sqlite://{}?mode=rwc", db_path.display());

    println!("🚀 Starting server on {addr}...");
    println!("   Database: {db_url}");

    // Build repository (handles connection and migration)
    let repo = build_repo(&db_url).await?;

    // Start server in background
    let router = HttpServer::new(PaymentService::new(repo)).router();
    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, router).await {
            eprintln!("server error: {e}");
        }
    });

    let client = PaymentsClient::new(format!("http://{addr}"));

    // ─────────────────────────────────────────────────────────────────────────
    // Demo: Full payment flow
    // ─────────────────────────────────────────────────────────────────────────

    let health = client.health().await?;
    println!("✅ Server health: {health}");

    let payment = client
        .create_payment(&PaymentRequest {
            order_id: OrderId::new(42),
            amount: 100,
            method: PaymentMethod::Upi,
            reference: Some("INV-42".into()),
        })
        .await?;
    println!(
        "✅ Created payment id={} for order {} ({})",
        payment.id, payment.order_id, payment.status
    );

    let by_order = client.get_payment_by_order(OrderId::new(42)).await?;
    println!("✅ Lookup by order returned payment id={}", by_order.id);

    let paid = client.update_payment_status(payment.id, "PAID").await?;
    println!("✅ Payment {} is now {}", paid.id, paid.status);

    let refund_again = client.update_payment_status(payment.id, "PENDING").await;
    println!(
        "✅ PAID -> PENDING rejected: {}",
        refund_again.expect_err("transition should be rejected")
    );

    let missing = client.get_payment(PaymentId::new(999)).await;
    println!(
        "✅ Unknown payment is not found: {}",
        missing.is_err_and(|e| e.is_not_found())
    );

    let all = client.list_payments().await?;
    println!("✅ {} payment(s) recorded", all.len());

    Ok(())
}
