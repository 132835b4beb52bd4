//! Example demonstrating the retry-on-timeout behavior against a local
//! gateway daemon.
//!
//! This example shows how to:
//! - Configure the per-attempt timeout and retry budget
//! - Disable certificate verification for a self-signed gateway
//! - Observe retry attempts through the tracing output
//!
//! Run with: `cargo run --example retry_on_timeout`
//!
//! It expects a gateway listening on https://localhost:5000; without one the
//! call fails immediately with a transport error (connection failures are
//! never retried, only read timeouts are).

use gatebind::{Client, Error, Verification};
use std::time::Duration;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Show the per-attempt dispatch and retry log lines
    tracing_subscriber::fmt()
        .with_env_filter("gatebind=debug")
        .init();

    let client = Client::builder()
        .base_url("https://localhost:5000/v1/api")?
        .verification(Verification::Disabled)
        .timeout(Duration::from_secs(2))
        .max_retries(3)
        .name("gateway_demo")
        .build()?;

    println!(
        "Calling {} with a {:?} timeout and {} retries...",
        client.base_url(),
        client.timeout(),
        client.max_retries()
    );
    println!(
        "Worst-case wait: {:?}",
        client.timeout() * (client.max_retries() as u32 + 1)
    );
    println!();

    match client.get("iserver/auth/status", None).await {
        Ok(response) => {
            println!("Gateway responded: {:?}", response.data);
        }
        Err(Error::RetriesExhausted { max_retries, .. }) => {
            println!("Gateway timed out on all {} + 1 attempts", max_retries);
        }
        Err(Error::Transport(e)) => {
            println!("Transport failure (not retried): {}", e);
        }
        Err(e) => {
            println!("Other error: {}", e);
        }
    }

    Ok(())
}
