//! # rocketreach - a resilient RocketReach API client
//!
//! A client for the RocketReach people-search REST API, built on `reqwest`.
//! Every call goes through an [`Executor`] that injects the `Api-Key`
//! header, retries transient failures, honors server rate limits, and
//! classifies error responses into a typed [`Error`].
//!
//! ## Quick Start
//!
//! ```no_run
//! use rocketreach::RocketReach;
//! use rocketreach::models::{SearchFilters, SearchQuery};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), rocketreach::Error> {
//!     let client = RocketReach::new("your-api-key")?;
//!
//!     let results = client
//!         .people_search(&SearchQuery {
//!             query: SearchFilters {
//!                 name: Some(vec!["Jane Doe".to_string()]),
//!                 ..Default::default()
//!             },
//!             ..Default::default()
//!         })
//!         .await?;
//!
//!     for profile in &results.profiles {
//!         println!("{}", profile["name"]);
//!     }
//!     if results.has_next_page() {
//!         println!("More results from offset {:?}", results.next_page());
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Retries
//!
//! With `max_retries = N` the executor makes at most `N + 1` attempts:
//!
//! - **Transport failures** (timeouts, refused connections) wait
//!   `base_retry_delay * 2^attempt` before the next attempt.
//! - **429 Too Many Requests** waits for the `Retry-After` header's value
//!   (60 seconds when absent).
//! - **Any other non-2xx** status fails at once with [`Error::Api`].
//!
//! ```no_run
//! use rocketreach::{Executor, ExecutorConfig};
//! use std::time::Duration;
//!
//! # fn example() -> Result<(), rocketreach::Error> {
//! let executor = Executor::new(
//!     ExecutorConfig::builder("your-api-key")
//!         .timeout(Duration::from_secs(10))
//!         .max_retries(5)
//!         .base_retry_delay(Duration::from_millis(250))
//!         .build(),
//! )?;
//! # Ok(())
//! # }
//! ```

mod client;
pub mod config;
mod error;
mod executor;
pub mod models;
pub mod rate_limit;
pub mod request;
mod response;
pub mod retry;

pub use client::RocketReach;
pub use config::{ExecutorConfig, ExecutorConfigBuilder};
pub use error::{Error, Result};
pub use executor::{Executor, USER_AGENT};
pub use request::Request;
pub use response::Response;
pub use retry::Sleeper;
