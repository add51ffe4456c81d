use std::sync::Arc;

use pawfind_client::{ApiClient, ApiErrorKind, AuthSession, SESSION_COOKIE, SessionCookies};
use pawfind_types::{SearchQuery, Sort, SortDirection, SortField};
use serde_json::json;
use url::Url;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer, cookies: SessionCookies) -> (ApiClient, AuthSession) {
    let session = AuthSession::new();
    let cookies = Arc::new(cookies);
    session.initialize(&cookies);
    let client = ApiClient::new(Url::parse(&server.uri()).unwrap(), cookies, session.clone())
        .expect("client builds");
    (client, session)
}

#[tokio::test]
async fn test_login_stores_cookie_and_sends_it_afterwards() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .and(body_json(json!({"name": "Ada", "email": "ada@example.com"})))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("set-cookie", "fetch-access-token=tok123; Path=/; HttpOnly")
                .set_body_string("OK"),
        )
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/dogs/breeds"))
        .and(header("cookie", "fetch-access-token=tok123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!(["Beagle", "Poodle"])))
        .expect(1)
        .mount(&server)
        .await;

    let (client, session) = client_for(&server, SessionCookies::new());
    assert!(!session.is_authenticated());

    client.login("Ada", "ada@example.com").await.unwrap();
    assert!(client.cookies().contains(SESSION_COOKIE));

    let breeds = client.breeds().await.unwrap();
    assert_eq!(breeds, vec!["Beagle", "Poodle"]);
}

#[tokio::test]
async fn test_login_rejection_is_authentication_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(ResponseTemplate::new(401).set_body_string("Unauthorized"))
        .mount(&server)
        .await;

    let (client, session) = client_for(&server, SessionCookies::new());
    let err = client.login("Ada", "not-an-email").await.unwrap_err();

    assert_eq!(err.kind, ApiErrorKind::Authentication);
    assert_eq!(err.status, Some(401));
    assert!(!session.is_authenticated());
}

#[tokio::test]
async fn test_search_sends_offset_size_breeds_and_sort() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/dogs/search"))
        .and(query_param("breeds", "Poodle"))
        .and(query_param("size", "10"))
        .and(query_param("from", "20"))
        .and(query_param("sort", "age:desc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "resultIds": ["d21", "d22"],
            "total": 25,
            "prev": "/dogs/search?from=10"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let (client, _) = client_for(&server, SessionCookies::with_session_token("tok"));
    let results = client
        .search(&SearchQuery {
            breeds: vec!["Poodle".to_string()],
            size: 10,
            from: 20,
            sort: Sort::new(SortField::Age, SortDirection::Desc),
        })
        .await
        .unwrap();

    assert_eq!(results.result_ids, vec!["d21", "d22"]);
    assert_eq!(results.total, 25);
}

#[tokio::test]
async fn test_dogs_posts_id_array() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/dogs/"))
        .and(body_json(json!(["b", "a"])))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": "a", "img": "https://img/a.jpg", "name": "Ace", "age": 2, "zip_code": "10001", "breed": "Beagle"},
            {"id": "b", "img": "https://img/b.jpg", "name": "Bo", "age": 7, "zip_code": "94105", "breed": "Boxer"}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let (client, _) = client_for(&server, SessionCookies::with_session_token("tok"));
    let dogs = client
        .dogs(&["b".to_string(), "a".to_string()])
        .await
        .unwrap();

    assert_eq!(dogs.len(), 2);
    assert_eq!(dogs[0].name, "Ace");
    assert_eq!(dogs[1].age, 7);
}

#[tokio::test]
async fn test_rejected_session_marks_unauthenticated() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/dogs/breeds"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let (client, session) = client_for(&server, SessionCookies::with_session_token("stale"));
    assert!(session.is_authenticated());

    let err = client.breeds().await.unwrap_err();

    assert_eq!(err.kind, ApiErrorKind::Unauthorized);
    assert!(!session.is_authenticated());
}

#[tokio::test]
async fn test_raw_get_returns_status_and_payload() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/dogs/breeds"))
        .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
        .mount(&server)
        .await;

    let (client, session) = client_for(&server, SessionCookies::with_session_token("tok"));
    let response = client.get("/dogs/breeds", &[]).await.unwrap();

    assert_eq!(response.status, 503);
    assert_eq!(response.text(), "maintenance");
    assert!(session.is_authenticated());

    let err = client.breeds().await.unwrap_err();
    assert_eq!(err.kind, ApiErrorKind::HttpStatus);
    assert_eq!(err.message, "HTTP 503: maintenance");
}

#[tokio::test]
async fn test_malformed_body_is_parse_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/dogs/breeds"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
        .mount(&server)
        .await;

    let (client, _) = client_for(&server, SessionCookies::with_session_token("tok"));
    let err = client.breeds().await.unwrap_err();

    assert_eq!(err.kind, ApiErrorKind::Parse);
}

#[tokio::test]
async fn test_logout_clears_local_credentials_even_on_failure() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/logout"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    let (client, session) = client_for(&server, SessionCookies::with_session_token("tok"));
    assert!(session.is_authenticated());

    assert!(client.logout().await.is_err());
    assert!(!session.is_authenticated());
    assert!(!client.cookies().contains(SESSION_COOKIE));
}

#[tokio::test]
async fn test_unreachable_service_is_network_error() {
    let port = std::net::TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap()
        .port();

    let session = AuthSession::new();
    let client = ApiClient::new(
        Url::parse(&format!("http://127.0.0.1:{port}")).unwrap(),
        Arc::new(SessionCookies::new()),
        session,
    )
    .unwrap();

    let err = client.breeds().await.unwrap_err();
    assert_eq!(err.kind, ApiErrorKind::Network);
}
