//! Searches people and branches on the error kinds.
//!
//! Reads the key from `ROCKETREACH_API_KEY`.
//!
//! Run with: `cargo run --example people_search -- "Jane Doe"`

use rocketreach::models::{SearchFilters, SearchQuery};
use rocketreach::{Error, RocketReach};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter("rocketreach=info")
        .init();

    let name = std::env::args().nth(1).unwrap_or_else(|| "Jane Doe".to_string());
    let client = RocketReach::from_env()?;

    let query = SearchQuery {
        query: SearchFilters {
            name: Some(vec![name]),
            ..Default::default()
        },
        page_size: 5,
        ..Default::default()
    };

    match client.people_search(&query).await {
        Ok(results) => {
            println!("Found {} of {} profiles", results.count(), results.total());
            for profile in &results.profiles {
                println!("  {} ({})", profile["name"], profile["current_employer"]);
            }
            if results.has_next_page() {
                println!("Next page starts at {:?}", results.next_page());
            }
        }
        Err(Error::RateLimit { retry_after, .. }) => {
            println!("Rate limited, try again in {}s", retry_after);
        }
        Err(e @ Error::Api { .. }) if e.status().map(|s| s.as_u16()) == Some(401) => {
            println!("The API key was rejected: {}", e);
        }
        Err(Error::Api {
            status,
            message,
            details,
            ..
        }) => {
            println!("API error {}: {}", status, message);
            if !details.is_empty() {
                println!("  Details: {}", serde_json::Value::Object(details));
            }
        }
        Err(e) => println!("Request failed: {}", e),
    }

    Ok(())
}
