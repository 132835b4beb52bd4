//! Example demonstrating comprehensive error handling.
//!
//! This example shows how to:
//! - Handle different error types
//! - Access the status code and raw body on gateway errors
//! - Recognize exhausted timeout retries
//! - Use the accessor helpers to branch without matching variants
//!
//! Run with: `cargo run --example error_handling`

use gatebind::{Client, Error};
use std::time::Duration;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter("gatebind=info")
        .init();

    let client = Client::builder()
        .base_url("https://jsonplaceholder.typicode.com")?
        .build()?;

    println!("=== Example 1: Handling Gateway Errors ===");
    // Fetch a non-existent resource (404)
    match client.get("posts/999999/comments/bad", None).await {
        Ok(response) => println!("Success: {:?}", response.data),
        Err(Error::Gateway {
            result,
            status,
            reason,
            body,
            ..
        }) => {
            println!("Gateway error!");
            println!("  Status: {} ({})", status.as_u16(), reason);
            println!("  Is client error (4xx): {}", status.is_client_error());
            println!("  Raw body: {}", body);
            println!("  Failed request: {:?}", result.request.get("url"));
        }
        Err(e) => println!("Other error: {}", e),
    }
    println!();

    println!("=== Example 2: Recognizing Exhausted Retries ===");
    // An aggressive timeout against a real endpoint usually exhausts the
    // retry budget.
    let impatient = Client::builder()
        .base_url("https://jsonplaceholder.typicode.com")?
        .timeout(Duration::from_millis(1))
        .max_retries(2)
        .build()?;

    match impatient.get("posts/1", None).await {
        Ok(response) => println!("Surprisingly fast: {:?}", response.data),
        Err(Error::RetriesExhausted {
            method,
            url,
            max_retries,
            ..
        }) => {
            println!("Retries exhausted!");
            println!("  Call: {} {}", method, url);
            println!("  Budget: {} retries after the first attempt", max_retries);
        }
        Err(e) => println!("Other error: {}", e),
    }
    println!();

    println!("=== Example 3: Branching with Accessors ===");
    match client.get("posts/999999/comments/bad", None).await {
        Ok(_) => println!("Success"),
        Err(e) if e.is_timeout() => println!("Timed out, worth retrying later"),
        Err(e) => {
            println!("Failed with status {:?}", e.status().map(|s| s.as_u16()));
            if let Some(body) = e.body() {
                println!("Body: {}", body);
            }
        }
    }

    Ok(())
}
