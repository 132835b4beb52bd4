//! Basic example demonstrating simple GET and POST requests.
//!
//! This example shows how to:
//! - Create a client with basic configuration
//! - Make GET requests with query-placed parameters
//! - Make POST requests with body-placed parameters
//! - Access the response payload and request description
//!
//! Run with: `cargo run --example basic_call`

use gatebind::{Client, Params};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
#[allow(dead_code)]
struct Post {
    #[serde(rename = "userId")]
    user_id: u32,
    id: u32,
    title: String,
    body: String,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing for logging
    tracing_subscriber::fmt()
        .with_env_filter("gatebind=debug,basic_call=info")
        .init();

    // Create a client for the JSONPlaceholder API
    let client = Client::builder()
        .base_url("https://jsonplaceholder.typicode.com")?
        .build()?;

    println!("=== GET Request Example ===");
    // Make a GET request to fetch a post
    let response = client.get("posts/1", None).await?;
    let post: Post = response.parse()?;

    println!("Post ID: {}", post.id);
    println!("Title: {}", post.title);
    println!("Sent to: {:?}", response.request.get("url"));
    println!();

    println!("=== POST Request Example ===");
    // Make a POST request to create a new post
    let response = client
        .post(
            "posts",
            Params::new()
                .with("title", "My New Post")
                .with("body", "This is the content of my new post!")
                .with("userId", 1),
        )
        .await?;

    println!("Created: {:?}", response.data);
    println!();

    println!("=== Omitting Optional Parameters ===");
    // An Option::None parameter never reaches the wire, so the server's
    // own default applies instead of receiving an explicit null.
    let page: Option<u32> = None;
    let response = client
        .get("posts", Params::new().with("userId", 1).with("page", page))
        .await?;
    let posts: Vec<Post> = response.parse()?;
    println!("Fetched {} posts for user 1", posts.len());

    Ok(())
}
