use dossier_core::config::HubSpotConfig;
use dossier_core::{HubSpotClient, QualifiedLead};
use std::time::Duration;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const SUBMIT_PATH: &str = "/submissions/v3/integration/submit/147219365/form-guid";

fn config(base_url: &str) -> HubSpotConfig {
    HubSpotConfig {
        api_base_url: base_url.to_string(),
        portal_id: "147219365".to_string(),
        form_guid: "form-guid".to_string(),
        ..HubSpotConfig::default()
    }
}

fn lead() -> QualifiedLead {
    QualifiedLead {
        full_name: "Toni Ballesteros".to_string(),
        email: "toni@example.com".to_string(),
        attribution_token: "1697224219759".to_string(),
        source_page_uri: Some("https://landing.example/?utm_source=test".to_string()),
    }
}

#[tokio::test]
async fn test_submit_posts_json_payload() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(SUBMIT_PATH))
        .and(header("content-type", "application/json"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let client = HubSpotClient::new(config(&server.uri())).unwrap();
    let record = client.build_record(&lead());

    assert!(client.submit(&record).await);

    let requests = server.received_requests().await.unwrap();
    let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();

    assert_eq!(body["fields"][0], serde_json::json!({"name": "email", "value": "toni@example.com"}));
    assert_eq!(body["fields"][1], serde_json::json!({"name": "firstname", "value": "Toni"}));
    assert_eq!(body["fields"][2], serde_json::json!({"name": "lastname", "value": "Ballesteros"}));
    assert_eq!(body["context"]["hutk"], "1697224219759");
    assert_eq!(body["context"]["pageUri"], "https://landing.example/?utm_source=test");
    assert_eq!(body["context"]["pageName"], "Playa Viva Dossier Download");
}

#[tokio::test]
async fn test_non_success_status_is_failure() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(SUBMIT_PATH))
        .respond_with(ResponseTemplate::new(400).set_body_string(r#"{"status":"error"}"#))
        .expect(1)
        .mount(&server)
        .await;

    let client = HubSpotClient::new(config(&server.uri())).unwrap();

    assert!(!client.submit(&client.build_record(&lead())).await);
}

#[tokio::test]
async fn test_single_attempt_on_server_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&server)
        .await;

    let client = HubSpotClient::new(config(&server.uri())).unwrap();

    assert!(!client.submit(&client.build_record(&lead())).await);
}

#[tokio::test]
async fn test_timeout_is_failure() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(3)))
        .mount(&server)
        .await;

    let client = HubSpotClient::new(HubSpotConfig {
        timeout_secs: 1,
        ..config(&server.uri())
    })
    .unwrap();

    assert!(!client.submit(&client.build_record(&lead())).await);
}

#[tokio::test]
async fn test_connection_refused_is_failure() {
    let client = HubSpotClient::new(config("http://127.0.0.1:1")).unwrap();

    assert!(!client.submit(&client.build_record(&lead())).await);
}
