//! Query parameters and response wrappers for the RocketReach endpoints.
//!
//! Queries are plain structs: set the fields you need and leave the rest at
//! their defaults. Responses wrap the raw JSON and extract fields
//! defensively, so a missing field is `None` or empty rather than an error.

use serde::Serialize;
use serde_json::{Map, Value};

/// Multi-value filters for a people search.
///
/// Unset filters are omitted from the request.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SearchFilters {
    /// Full names.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<Vec<String>>,
    /// Current job titles.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_title: Option<Vec<String>>,
    /// Current employer names.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_employer: Option<Vec<String>>,
    /// Current employer domains, such as `acme.com`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_employer_domain: Option<Vec<String>>,
    /// Locations, as free text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<Vec<String>>,
    /// LinkedIn profile URLs.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub linkedin_url: Option<Vec<String>>,
    /// Required contact methods, such as `"email"` or `"phone"`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_method: Option<Vec<String>>,
    /// Employer industries.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub industry: Option<Vec<String>>,
    /// Employer headcount ranges.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_size: Option<Vec<String>>,
    /// Employer funding stages.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_funding: Option<Vec<String>>,
    /// Employer revenue ranges.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_revenue: Option<Vec<String>>,
    /// Seniority levels.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seniority: Option<Vec<String>>,
    /// Listed skills.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skills: Option<Vec<String>>,
    /// Schools or degrees.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub education: Option<Vec<String>>,
}

/// A people search request body.
///
/// Serializes to `{"query": {...}, "page": .., "page_size": .., "order_by": ..}`.
///
/// # Examples
///
/// ```
/// use rocketreach::models::{SearchFilters, SearchQuery};
/// use serde_json::json;
///
/// let query = SearchQuery {
///     query: SearchFilters {
///         name: Some(vec!["Jane Doe".to_string()]),
///         ..Default::default()
///     },
///     page_size: 25,
///     ..Default::default()
/// };
///
/// assert_eq!(
///     serde_json::to_value(&query).unwrap(),
///     json!({
///         "query": {"name": ["Jane Doe"]},
///         "page": 1,
///         "page_size": 25,
///         "order_by": "relevance"
///     })
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchQuery {
    /// The filters to match.
    pub query: SearchFilters,
    /// 1-based page number.
    pub page: u32,
    /// Profiles per page.
    pub page_size: u32,
    /// Result ordering, such as `"relevance"`.
    pub order_by: String,
}

impl Default for SearchQuery {
    fn default() -> Self {
        Self {
            query: SearchFilters::default(),
            page: 1,
            page_size: 10,
            order_by: "relevance".to_string(),
        }
    }
}

/// Single-value filters identifying one person, used by lookup and enrich.
///
/// Unset fields are omitted from the URL.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LookupQuery {
    /// RocketReach profile id.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    /// LinkedIn profile URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub linkedin_url: Option<String>,
    /// Full name. Pair with `current_employer` for a usable match.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Current employer name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_employer: Option<String>,
    /// Current job title.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// A known email address.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// US National Provider Identifier.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub npi_number: Option<u64>,
}

fn str_field<'a>(object: &'a Value, key: &str) -> Option<&'a str> {
    object.get(key)?.as_str()
}

fn list_field<'a>(object: &'a Value, key: &str) -> &'a [Value] {
    object
        .get(key)
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

/// One page of people search results.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchResponse {
    /// The profiles on this page.
    pub profiles: Vec<Value>,
    /// The `pagination` object, empty when absent.
    pub pagination: Map<String, Value>,
}

impl SearchResponse {
    /// Profiles on this page.
    pub fn count(&self) -> usize {
        self.profiles.len()
    }

    /// Total matching profiles, `0` when unreported.
    pub fn total(&self) -> u64 {
        self.pagination
            .get("total")
            .and_then(Value::as_u64)
            .unwrap_or(0)
    }

    /// The page's start offset as reported by the API, `1` when unreported.
    pub fn current_page(&self) -> u64 {
        self.pagination
            .get("start")
            .and_then(Value::as_u64)
            .unwrap_or(1)
    }

    /// The next page, if the API reported one.
    pub fn next_page(&self) -> Option<u64> {
        self.pagination.get("next").and_then(Value::as_u64)
    }

    /// Returns `true` when a next page was reported.
    pub fn has_next_page(&self) -> bool {
        self.next_page().is_some()
    }

    /// Returns `true` when the page holds no profiles.
    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }
}

impl From<Value> for SearchResponse {
    fn from(mut data: Value) -> Self {
        let profiles = match data.get_mut("profiles").map(Value::take) {
            Some(Value::Array(profiles)) => profiles,
            _ => Vec::new(),
        };
        let pagination = match data.get_mut("pagination").map(Value::take) {
            Some(Value::Object(pagination)) => pagination,
            _ => Map::new(),
        };
        Self {
            profiles,
            pagination,
        }
    }
}

/// A person lookup result.
#[derive(Debug, Clone, PartialEq)]
pub struct PersonResponse {
    /// The raw response object.
    pub data: Value,
}

impl PersonResponse {
    /// RocketReach profile id.
    pub fn id(&self) -> Option<u64> {
        self.data.get("id").and_then(Value::as_u64)
    }

    /// Full name.
    pub fn name(&self) -> Option<&str> {
        str_field(&self.data, "name")
    }

    /// Current job title.
    pub fn current_title(&self) -> Option<&str> {
        str_field(&self.data, "current_title")
    }

    /// Current employer name.
    pub fn current_employer(&self) -> Option<&str> {
        str_field(&self.data, "current_employer")
    }

    /// LinkedIn profile URL.
    pub fn linkedin_url(&self) -> Option<&str> {
        str_field(&self.data, "linkedin_url")
    }

    /// Location, as free text.
    pub fn location(&self) -> Option<&str> {
        str_field(&self.data, "location")
    }

    /// Lookup progress, such as `"complete"` or `"searching"`.
    pub fn status(&self) -> Option<&str> {
        str_field(&self.data, "status")
    }

    /// Returns `true` once the lookup has finished.
    pub fn is_complete(&self) -> bool {
        self.status() == Some("complete")
    }

    /// Returns `true` while RocketReach is still gathering contact data.
    pub fn is_searching(&self) -> bool {
        self.status() == Some("searching")
    }

    /// Email entries, empty when absent.
    pub fn emails(&self) -> &[Value] {
        list_field(&self.data, "emails")
    }

    /// Phone entries, empty when absent.
    pub fn phones(&self) -> &[Value] {
        list_field(&self.data, "phones")
    }
}

impl From<Value> for PersonResponse {
    fn from(data: Value) -> Self {
        Self { data }
    }
}

/// Company fields pulled out of an enrich response.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CompanySummary {
    /// From `current_employer_id`.
    pub id: Option<u64>,
    /// From `current_employer`.
    pub name: Option<String>,
    /// From `current_employer_domain`.
    pub domain: Option<String>,
    /// From `current_employer_website`.
    pub website: Option<String>,
    /// From `current_employer_linkedin_url`.
    pub linkedin_url: Option<String>,
}

/// A person-plus-company enrich result.
///
/// The API returns one flat object; company fields are the
/// `current_employer*` keys.
#[derive(Debug, Clone, PartialEq)]
pub struct EnrichResponse {
    /// The person, as a lookup result over the same object.
    pub person: PersonResponse,
    /// The person's current employer.
    pub company: CompanySummary,
}

impl From<Value> for EnrichResponse {
    fn from(data: Value) -> Self {
        let owned = |key: &str| str_field(&data, key).map(str::to_string);
        let company = CompanySummary {
            id: data.get("current_employer_id").and_then(Value::as_u64),
            name: owned("current_employer"),
            domain: owned("current_employer_domain"),
            website: owned("current_employer_website"),
            linkedin_url: owned("current_employer_linkedin_url"),
        };
        Self {
            person: PersonResponse::from(data),
            company,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_search_query_defaults() {
        let payload = serde_json::to_value(SearchQuery::default()).unwrap();
        assert_eq!(
            payload,
            json!({"query": {}, "page": 1, "page_size": 10, "order_by": "relevance"})
        );
    }

    #[test]
    fn test_lookup_query_skips_unset_fields() {
        let query = LookupQuery {
            name: Some("Jane Doe".to_string()),
            npi_number: Some(1234567890),
            ..Default::default()
        };

        assert_eq!(
            serde_json::to_value(&query).unwrap(),
            json!({"name": "Jane Doe", "npi_number": 1234567890u64})
        );
    }

    #[test]
    fn test_search_response_pagination() {
        let response = SearchResponse::from(json!({
            "profiles": [{"id": 1}, {"id": 2}],
            "pagination": {"start": 1, "next": 11, "total": 42}
        }));

        assert_eq!(response.count(), 2);
        assert_eq!(response.total(), 42);
        assert_eq!(response.current_page(), 1);
        assert_eq!(response.next_page(), Some(11));
        assert!(response.has_next_page());
    }

    #[test]
    fn test_search_response_tolerates_missing_fields() {
        let response = SearchResponse::from(json!({"pagination": {"next": null}}));

        assert!(response.is_empty());
        assert_eq!(response.total(), 0);
        assert_eq!(response.current_page(), 1);
        assert!(!response.has_next_page());

        let response = SearchResponse::from(json!("unexpected"));
        assert!(response.is_empty());
        assert!(response.pagination.is_empty());
    }

    #[test]
    fn test_person_response_status() {
        let person = PersonResponse::from(json!({
            "id": 7,
            "name": "Jane Doe",
            "status": "searching",
            "location": "Seattle, WA",
            "emails": [{"email": "jane@example.com"}]
        }));

        assert_eq!(person.id(), Some(7));
        assert_eq!(person.name(), Some("Jane Doe"));
        assert_eq!(person.location(), Some("Seattle, WA"));
        assert_eq!(person.current_title(), None);
        assert!(person.is_searching());
        assert!(!person.is_complete());
        assert_eq!(person.emails().len(), 1);
        assert!(person.phones().is_empty());
    }

    #[test]
    fn test_enrich_response_company_view() {
        let enriched = EnrichResponse::from(json!({
            "id": 7,
            "name": "Jane Doe",
            "current_employer": "Acme",
            "current_employer_id": 99,
            "current_employer_domain": "acme.com"
        }));

        assert_eq!(enriched.person.name(), Some("Jane Doe"));
        assert_eq!(enriched.company.id, Some(99));
        assert_eq!(enriched.company.name.as_deref(), Some("Acme"));
        assert_eq!(enriched.company.domain.as_deref(), Some("acme.com"));
        assert_eq!(enriched.company.website, None);
    }
}
