//! Endpoint facade tests against a wiremock server.

use rocketreach::models::{LookupQuery, SearchFilters, SearchQuery};
use rocketreach::{Error, ExecutorConfig, RocketReach};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client(mock_server: &MockServer) -> RocketReach {
    let config = ExecutorConfig::builder("test-api-key")
        .base_url(format!("{}/api/v2", mock_server.uri()))
        .max_retries(0)
        .build();
    RocketReach::with_config(config).unwrap()
}

#[test]
fn test_empty_api_key_rejected() {
    for key in ["", "    "] {
        match RocketReach::new(key) {
            Err(Error::Config(msg)) => assert_eq!(msg, "API key cannot be empty"),
            other => panic!("Expected Config error, got {:?}", other),
        }
    }
}

#[test]
fn test_default_settings() {
    let client = RocketReach::new(" key-with-spaces ").unwrap();
    let executor = client.executor();

    assert_eq!(executor.api_key(), "key-with-spaces");
    assert_eq!(executor.base_url(), "https://api.rocketreach.co/api/v2");
    assert_eq!(executor.max_retries(), 3);
    assert_eq!(executor.timeout(), std::time::Duration::from_secs(30));
    assert_eq!(
        executor.base_retry_delay(),
        std::time::Duration::from_secs(1)
    );
    assert_eq!(executor.max_rate_limit_wait(), None);
}

#[tokio::test]
async fn test_people_search_payload() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v2/person/search"))
        .and(header("api-key", "test-api-key"))
        .and(body_json(json!({
            "query": {
                "name": ["John Doe"],
                "current_employer": ["Acme", "Globex"]
            },
            "page": 2,
            "page_size": 25,
            "order_by": "relevance"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "profiles": [{"id": 1, "name": "John Doe"}],
            "pagination": {"start": 26, "next": 51, "total": 60}
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let query = SearchQuery {
        query: SearchFilters {
            name: Some(vec!["John Doe".to_string()]),
            current_employer: Some(vec!["Acme".to_string(), "Globex".to_string()]),
            ..Default::default()
        },
        page: 2,
        page_size: 25,
        ..Default::default()
    };

    let results = client(&mock_server).people_search(&query).await.unwrap();

    assert_eq!(results.count(), 1);
    assert_eq!(results.total(), 60);
    assert_eq!(results.next_page(), Some(51));
    assert!(results.has_next_page());
}

#[tokio::test]
async fn test_person_lookup_query_params() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v2/person/lookup"))
        .and(query_param("name", "Jane Doe"))
        .and(query_param("current_employer", "Acme"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 5,
            "name": "Jane Doe",
            "status": "complete",
            "emails": [{"email": "jane@acme.com"}]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let query = LookupQuery {
        name: Some("Jane Doe".to_string()),
        current_employer: Some("Acme".to_string()),
        ..Default::default()
    };

    let person = client(&mock_server).person_lookup(&query).await.unwrap();

    assert_eq!(person.id(), Some(5));
    assert!(person.is_complete());
    assert_eq!(person.emails().len(), 1);
}

#[tokio::test]
async fn test_person_enrich_endpoint() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v2/profile-company/lookup"))
        .and(query_param("id", "5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 5,
            "name": "Jane Doe",
            "current_employer": "Acme",
            "current_employer_domain": "acme.com"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let query = LookupQuery {
        id: Some(5),
        ..Default::default()
    };

    let enriched = client(&mock_server).person_enrich(&query).await.unwrap();

    assert_eq!(enriched.person.id(), Some(5));
    assert_eq!(enriched.company.name.as_deref(), Some("Acme"));
    assert_eq!(enriched.company.domain.as_deref(), Some("acme.com"));
}

#[tokio::test]
async fn test_account_and_health() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v2/account"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"credits": 100})))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/v2/health"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "ok"})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client(&mock_server);

    assert_eq!(client.account().await.unwrap(), json!({"credits": 100}));
    assert_eq!(client.health().await.unwrap(), json!({"status": "ok"}));
}

#[tokio::test]
async fn test_lookup_api_error_surfaces() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v2/person/lookup"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "message": "Person not found"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let err = client(&mock_server)
        .person_lookup(&LookupQuery {
            email: Some("nobody@example.com".to_string()),
            ..Default::default()
        })
        .await
        .unwrap_err();

    assert_eq!(err.status().map(|s| s.as_u16()), Some(404));
    assert_eq!(err.message(), Some("Person not found"));
    assert!(err.is_client_error());
}
