//! The RocketReach endpoint facade.
//!
//! [`RocketReach`] turns query structs into executor calls against the
//! documented endpoints and wraps the JSON results.

use crate::{
    models::{EnrichResponse, LookupQuery, PersonResponse, SearchQuery, SearchResponse},
    Error, Executor, ExecutorConfig, Request, Result,
};
use serde::Serialize;
use serde_json::Value;

/// A RocketReach API client.
///
/// # Examples
///
/// ```no_run
/// use rocketreach::RocketReach;
/// use rocketreach::models::{LookupQuery, SearchFilters, SearchQuery};
///
/// # async fn example() -> Result<(), rocketreach::Error> {
/// let client = RocketReach::new("my-api-key")?;
///
/// let results = client
///     .people_search(&SearchQuery {
///         query: SearchFilters {
///             current_employer: Some(vec!["Acme".to_string()]),
///             ..Default::default()
///         },
///         ..Default::default()
///     })
///     .await?;
/// println!("{} of {} profiles", results.count(), results.total());
///
/// let person = client
///     .person_lookup(&LookupQuery {
///         email: Some("jane@acme.com".to_string()),
///         ..Default::default()
///     })
///     .await?;
/// println!("Lookup status: {:?}", person.status());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct RocketReach {
    executor: Executor,
}

impl RocketReach {
    /// Creates a client for the production API with default settings.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the key is empty or whitespace.
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Self::with_config(ExecutorConfig::new(api_key))
    }

    /// Creates a client from an explicit config.
    pub fn with_config(config: ExecutorConfig) -> Result<Self> {
        Ok(Self::from_executor(Executor::new(config)?))
    }

    /// Creates a client configured from `ROCKETREACH_*` environment variables.
    pub fn from_env() -> Result<Self> {
        Self::with_config(ExecutorConfig::from_env()?)
    }

    /// Wraps an existing executor.
    pub fn from_executor(executor: Executor) -> Self {
        Self { executor }
    }

    /// The executor every endpoint call goes through.
    pub fn executor(&self) -> &Executor {
        &self.executor
    }

    /// Searches people. `POST /person/search`.
    pub async fn people_search(&self, query: &SearchQuery) -> Result<SearchResponse> {
        let body = to_json(query)?;
        let data = self.executor.post("/person/search", Some(body)).await?;
        Ok(SearchResponse::from(data))
    }

    /// Looks up one person. `GET /person/lookup`.
    pub async fn person_lookup(&self, query: &LookupQuery) -> Result<PersonResponse> {
        let data = self.lookup("/person/lookup", query).await?;
        Ok(PersonResponse::from(data))
    }

    /// Looks up one person with their current company.
    /// `GET /profile-company/lookup`.
    pub async fn person_enrich(&self, query: &LookupQuery) -> Result<EnrichResponse> {
        let data = self.lookup("/profile-company/lookup", query).await?;
        Ok(EnrichResponse::from(data))
    }

    /// Account information and usage. `GET /account`.
    pub async fn account(&self) -> Result<Value> {
        self.executor.get("/account", None).await
    }

    /// API health status. `GET /health`.
    pub async fn health(&self) -> Result<Value> {
        self.executor.get("/health", None).await
    }

    async fn lookup(&self, path: &str, query: &LookupQuery) -> Result<Value> {
        let params = match to_json(query)? {
            Value::Object(params) => params,
            _ => {
                return Err(Error::SerializationFailed(
                    "lookup query is not an object".to_string(),
                ))
            }
        };
        let request = Request::get(path).with_query(&params);
        Ok(self.executor.execute(request).await?.data)
    }
}

fn to_json<T: Serialize>(value: &T) -> Result<Value> {
    serde_json::to_value(value).map_err(|e| Error::SerializationFailed(e.to_string()))
}
