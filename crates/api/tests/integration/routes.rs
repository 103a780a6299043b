use std::net::SocketAddr;

use api::app::build_router;
use api::gql::build_schema;
use axum::{
    body::Body,
    extract::ConnectInfo,
    http::{header, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use crate::common::*;

fn router(state: &api::AppState) -> Router {
    build_router(state.clone(), build_schema(state.clone())).expect("Failed to build router")
}

fn json_request(uri: &str, body: Value, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let mut request = builder.body(Body::from(body.to_string())).unwrap();
    // The login rate limiter keys on the peer address
    request
        .extensions_mut()
        .insert(ConnectInfo(SocketAddr::from(([127, 0, 0, 1], 40000))));
    request
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_health() {
    let db = setup_test_db().await;

    let response = router(&db.state)
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_login_then_query_over_http() {
    let db = setup_test_db().await;
    let app = router(&db.state);

    let response = app
        .clone()
        .oneshot(json_request(
            "/auth/login",
            json!({ "password": ADMIN_PASSWORD }),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["tokenType"], "Bearer");
    assert_eq!(body["expiresIn"], 3600);
    let token = body["accessToken"].as_str().unwrap().to_string();

    let response = app
        .oneshot(json_request(
            "/graphql",
            json!({ "query": "{ tables { number } }" }),
            Some(&token),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert!(
        body["errors"].as_array().map_or(true, |e| e.is_empty()),
        "{body}"
    );
    assert_eq!(body["data"]["tables"].as_array().unwrap().len(), 20);
}

#[tokio::test]
async fn test_wrong_password_rejected() {
    let db = setup_test_db().await;

    let response = router(&db.state)
        .oneshot(json_request(
            "/auth/login",
            json!({ "password": "guess" }),
            None,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(response).await;
    assert!(body["error"].as_str().unwrap().contains("Invalid credentials"));
}

#[tokio::test]
async fn test_invalid_token_rejected() {
    let db = setup_test_db().await;

    let response = router(&db.state)
        .oneshot(json_request(
            "/graphql",
            json!({ "query": "{ mealOptions }" }),
            Some("not-a-token"),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_malformed_graphql_body_is_bad_request() {
    let db = setup_test_db().await;

    let mut request = Request::builder()
        .method("POST")
        .uri("/graphql")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{ not json"))
        .unwrap();
    request
        .extensions_mut()
        .insert(ConnectInfo(SocketAddr::from(([127, 0, 0, 1], 40000))));

    let response = router(&db.state).oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert!(body["error"].as_str().unwrap().contains("Invalid GraphQL request"));
}
