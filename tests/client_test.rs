//! Integration tests for the Nopaper request dispatcher.

use nopaper::{Client, ClientConfig, NopaperError, ProviderError};
use std::collections::HashMap;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const API: &str = "/partner-api/api/v2/external";

fn mock_client(mock_server: &MockServer) -> Client {
    Client::with_config(ClientConfig {
        url: mock_server.uri(),
        token: "test_api_key".to_string(),
        ..Default::default()
    })
    .unwrap()
}

#[tokio::test]
async fn test_client_creation() {
    let client = Client::new("test_api_key").unwrap();
    assert!(client.base_url().starts_with("https://"));
    assert!(client.base_url().ends_with(API));
}

#[tokio::test]
async fn test_client_with_injected_transport() {
    let http = reqwest::Client::builder().build().unwrap();
    let client = Client::with_http_client(
        ClientConfig {
            url: "https://custom.api.com/".to_string(),
            token: "test_api_key".to_string(),
            ..Default::default()
        },
        http,
    )
    .unwrap();
    assert_eq!(
        client.base_url(),
        "https://custom.api.com/partner-api/api/v2/external"
    );
}

#[tokio::test]
async fn test_request_carries_api_key() {
    let mock_server = MockServer::start().await;
    let user_id = "00000000-0000-0000-0000-000000000001";

    Mock::given(method("GET"))
        .and(path(format!("{}/profile-fl/user-guid/by-phone", API)))
        .and(header("X-API-KEY", "test_api_key"))
        .and(query_param("userPhone", "71234567890"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "userGuid": user_id
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = mock_client(&mock_server);

    let found = client
        .profiles()
        .user_id_by_phone("71234567890")
        .await
        .unwrap();
    assert_eq!(found, uuid::Uuid::parse_str(user_id).unwrap());
}

#[tokio::test]
async fn test_created_status_is_success() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(format!("{}/document/draft", API)))
        .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
            "documentId": 77
        })))
        .mount(&mock_server)
        .await;

    let client = mock_client(&mock_server);

    let document_id = client
        .documents()
        .create_draft(Default::default())
        .await
        .unwrap();
    assert_eq!(document_id, 77);
}

#[tokio::test]
async fn test_other_success_statuses_are_failures() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(format!("{}/document/5/send", API)))
        .respond_with(ResponseTemplate::new(204))
        .mount(&mock_server)
        .await;

    let client = mock_client(&mock_server);

    match client.documents().activate(5).await {
        Err(NopaperError::Api {
            status_code, code, ..
        }) => {
            assert_eq!(status_code, 204);
            assert!(code.is_none());
        }
        other => panic!("Expected Api error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_known_error_code_maps_to_domain_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(format!("{}/profile-fl/user-guid/by-phone", API)))
        .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
            "code": "NOPAPERPARTNER.10401"
        })))
        .expect(2)
        .mount(&mock_server)
        .await;

    let client = mock_client(&mock_server);

    for _ in 0..2 {
        let err = client
            .profiles()
            .user_id_by_phone("71234567890")
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            NopaperError::Provider(ProviderError::ProfileNotFound)
        ));
    }
}

#[tokio::test]
async fn test_all_builtin_codes_map() {
    let cases = [
        ("NOPAPERPARTNER.10401", ProviderError::ProfileNotFound),
        ("NOPAPERPARTNERLIB.10401", ProviderError::ProfileNotFound),
        (
            "NOPAPERPARTNERAPI.CORE.41116",
            ProviderError::RequestBodyInvalid,
        ),
        ("NOPAPERPARTNER.10402", ProviderError::IncompleteProfile),
        ("NOPAPERPARTNERLIB.10402", ProviderError::IncompleteProfile),
    ];

    for (code, expected) in cases {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path(format!("{}/document/1/send", API)))
            .respond_with(ResponseTemplate::new(422).set_body_json(serde_json::json!({
                "code": code,
                "message": "rejected"
            })))
            .mount(&mock_server)
            .await;

        let client = mock_client(&mock_server);
        let err = client.documents().activate(1).await.unwrap_err();
        assert_eq!(err.provider_error(), Some(expected), "code {}", code);
    }
}

#[tokio::test]
async fn test_configured_error_code_override() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(format!("{}/document/1/send", API)))
        .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
            "code": "PARTNER.CUSTOM.1"
        })))
        .mount(&mock_server)
        .await;

    let mut error_codes = HashMap::new();
    error_codes.insert(
        "PARTNER.CUSTOM.1".to_string(),
        ProviderError::IncompleteProfile,
    );

    let client = Client::with_config(ClientConfig {
        url: mock_server.uri(),
        token: "test_api_key".to_string(),
        error_codes,
        ..Default::default()
    })
    .unwrap();

    let err = client.documents().activate(1).await.unwrap_err();
    assert_eq!(err.provider_error(), Some(ProviderError::IncompleteProfile));
}

#[tokio::test]
async fn test_unknown_error_code_keeps_status_and_body() {
    let mock_server = MockServer::start().await;
    let body = r#"{"code":"NOPAPERPARTNER.99999","message":"something else"}"#;

    Mock::given(method("POST"))
        .and(path(format!("{}/document/3/send", API)))
        .respond_with(ResponseTemplate::new(409).set_body_string(body))
        .mount(&mock_server)
        .await;

    let client = mock_client(&mock_server);

    let err = client.documents().activate(3).await.unwrap_err();
    assert!(err.to_string().contains("409"));
    assert!(err.to_string().contains("something else"));

    match err {
        NopaperError::Api {
            status_code,
            code,
            body: raw,
        } => {
            assert_eq!(status_code, 409);
            assert_eq!(code.as_deref(), Some("NOPAPERPARTNER.99999"));
            assert_eq!(raw, body);
        }
        other => panic!("Expected Api error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_non_json_error_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(format!("{}/document/3/send", API)))
        .respond_with(ResponseTemplate::new(502).set_body_string("Bad Gateway"))
        .mount(&mock_server)
        .await;

    let client = mock_client(&mock_server);

    let err = client.documents().activate(3).await.unwrap_err();
    assert!(err.is_retryable());
    match err {
        NopaperError::Api {
            status_code,
            code,
            body,
        } => {
            assert_eq!(status_code, 502);
            assert!(code.is_none());
            assert_eq!(body, "Bad Gateway");
        }
        other => panic!("Expected Api error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_malformed_success_payload() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(format!("{}/profile-fl/user-guid/by-phone", API)))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "userGuid": "not-a-uuid"
        })))
        .mount(&mock_server)
        .await;

    let client = mock_client(&mock_server);

    let err = client
        .profiles()
        .user_id_by_phone("71234567890")
        .await
        .unwrap_err();
    assert!(matches!(err, NopaperError::Decode(_)));
}

#[tokio::test]
async fn test_transport_error_propagates() {
    // Nothing listens on the discard port.
    let client = Client::with_config(ClientConfig {
        url: "http://127.0.0.1:9".to_string(),
        token: "test_api_key".to_string(),
        ..Default::default()
    })
    .unwrap();

    let err = client.documents().activate(1).await.unwrap_err();
    assert!(matches!(err, NopaperError::Http(_)));
}

#[tokio::test]
async fn test_invalid_requests_never_reach_the_server() {
    let mock_server = MockServer::start().await;

    Mock::given(wiremock::matchers::any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let client = mock_client(&mock_server);

    let err = client
        .profiles()
        .register(nopaper::RegisterUserRequest {
            user_phone: "81234567890".to_string(),
            ..Default::default()
        })
        .await
        .unwrap_err();
    assert!(matches!(err, NopaperError::InvalidRequest(_)));

    let err = client
        .documents()
        .attach_file(
            10,
            nopaper::FileInfo {
                file_name_with_extension: String::new(),
                file_base64: "JVBERg==".to_string(),
            }
            .into(),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, NopaperError::InvalidRequest(_)));

    let err = client.documents().activate(0).await.unwrap_err();
    assert!(matches!(err, NopaperError::InvalidRequest(_)));

    let err = client.hub().set_callback_uri("").await.unwrap_err();
    assert!(matches!(err, NopaperError::InvalidRequest(_)));
}
