//! # Gatebind - a retry-aware REST client for brokerage gateway APIs
//!
//! Gatebind wraps an HTTP transport with bounded retry-on-timeout, a uniform
//! success/error result shape, and request-scoped logging. It is built for
//! locally-running gateway daemons that occasionally stall under load: read
//! timeouts are retried up to a configured budget, while every other failure
//! (connection refused, DNS, TLS, HTTP error statuses) propagates immediately
//! as a typed error.
//!
//! ## Quick Start
//!
//! ```no_run
//! use gatebind::{Client, Params};
//! use std::time::Duration;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), gatebind::Error> {
//!     let client = Client::builder()
//!         .base_url("https://localhost:5000/v1/api")?
//!         .timeout(Duration::from_secs(10))
//!         .max_retries(3)
//!         .build()?;
//!
//!     // GET with query-placed parameters
//!     let stocks = client
//!         .get("trsrv/stocks", Params::new().with("symbols", "AAPL,MSFT"))
//!         .await?;
//!     println!("stocks: {:?}", stocks.data);
//!
//!     // POST with body-placed parameters
//!     let reply = client
//!         .post("iserver/questions/suppress", Params::new().with("messageIds", "o354"))
//!         .await?;
//!     println!("reply: {:?}", reply.data);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Result Shape
//!
//! Every successful call returns a [`Response`] pairing the parsed JSON
//! payload with a description of the request that produced it (resolved URL
//! and transport arguments). The shape is the same for every endpoint, so
//! generic handling and error reporting never need endpoint knowledge:
//!
//! ```no_run
//! # async fn example(client: gatebind::Client) -> Result<(), gatebind::Error> {
//! let response = client.get("portfolio/accounts", None).await?;
//! println!("sent to: {:?}", response.request.get("url"));
//! println!("payload: {:?}", response.data);
//! # Ok(())
//! # }
//! ```
//!
//! ## Absent Parameters
//!
//! Gateway endpoints apply their own defaults when a parameter is not sent at
//! all, which is different from sending `null`. [`Param::Absent`] marks a
//! parameter as intentionally omitted and is stripped before dispatch;
//! `Option::None` converts to it, so optional call arguments forward
//! directly:
//!
//! ```
//! use gatebind::Params;
//!
//! let period: Option<&str> = None;
//! let params = Params::new()
//!     .with("conid", 265598)
//!     .with("period", period); // never reaches the wire
//! # assert_eq!(params.query_pairs().len(), 1);
//! ```
//!
//! ## Error Handling
//!
//! All failures surface as one [`Error`] enum, coarse enough to branch on:
//!
//! ```no_run
//! use gatebind::{Client, Error};
//!
//! # async fn example(client: Client) {
//! match client.get("iserver/auth/status", None).await {
//!     Ok(response) => println!("ok: {:?}", response.data),
//!     Err(Error::RetriesExhausted { max_retries, .. }) => {
//!         eprintln!("gateway kept timing out after {} retries", max_retries);
//!     }
//!     Err(Error::Gateway { status, body, .. }) => {
//!         eprintln!("gateway rejected the call: {} {}", status, body);
//!     }
//!     Err(e) => eprintln!("other error: {}", e),
//! }
//! # }
//! ```
//!
//! ## Logging
//!
//! The client emits [`tracing`] events inside a per-client span carrying the
//! client's identity and base URL. The span is created lazily on first use
//! and reused for the client's lifetime. Install any `tracing` subscriber to
//! collect the output; routing it to per-client daily files is the
//! application's concern.

mod client;
mod env;
mod error;
mod params;
mod request;
mod response;

pub use client::{Client, ClientBuilder, Verification};
pub use error::{Error, Result};
pub use params::{Param, Params};
pub use request::RequestArgs;
pub use response::Response;
