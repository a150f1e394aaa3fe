use axum::http::{self, Request, StatusCode};
use http_body_util::BodyExt;
use mock_server::{app, ErrorBody};
use serde_json::{json, Value};
use tower::ServiceExt;

async fn body_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_bytes(response: axum::response::Response) -> bytes::Bytes {
    response.into_body().collect().await.unwrap().to_bytes()
}

fn json_request(method: &str, uri: &str, body: &str) -> Request<String> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(http::header::CONTENT_TYPE, "application/json")
        .body(body.to_string())
        .unwrap()
}

const BOB: &str = r#"{"user_name":"bob","password":"pw","mail":"bob@example.com"}"#;

// --- transactions ---

#[tokio::test]
async fn list_transactions_empty() {
    let app = app();
    let resp = app
        .oneshot(
            Request::builder()
                .uri("/expense/transaction")
                .body(String::new())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let records: Vec<Value> = body_json(resp).await;
    assert!(records.is_empty());
}

#[tokio::test]
async fn create_transaction_returns_message_and_id() {
    let app = app();
    let resp = app
        .oneshot(json_request(
            "POST",
            "/expense/transaction",
            r#"{"category":"food","product_name":"rice","total_cost":3}"#,
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = body_json(resp).await;
    assert_eq!(body["message"], "Transaction created successfully");
    assert_eq!(body["id"], 1);
}

#[tokio::test]
async fn create_transaction_rejects_non_object() {
    let app = app();
    let resp = app
        .oneshot(json_request("POST", "/expense/transaction", "[1,2]"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn create_transaction_malformed_json_returns_400() {
    let app = app();
    let resp = app
        .oneshot(json_request("POST", "/expense/transaction", "{not json"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn delete_transaction_is_not_served() {
    let app = app();
    let resp = app
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri("/expense/transaction")
                .body(String::new())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);
}

// --- auth ---

#[tokio::test]
async fn register_accepts_post_and_put() {
    let app = app();
    let resp = app
        .clone()
        .oneshot(json_request("POST", "/api/register", BOB))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = body_json(resp).await;
    assert_eq!(body["message"], "User successfully registered");
    assert_eq!(body["user_name"], "bob");

    let resp = app
        .oneshot(json_request(
            "PUT",
            "/api/register",
            r#"{"user_name":"carol","password":"pw","mail":"carol@example.com"}"#,
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
}

#[tokio::test]
async fn register_missing_field_returns_422() {
    let app = app();
    let resp = app
        .oneshot(json_request("POST", "/api/register", r#"{"user_name":"bob"}"#))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn login_unknown_user_returns_401() {
    let app = app();
    let resp = app
        .oneshot(json_request(
            "POST",
            "/api/login",
            r#"{"account":"ghost","password":"pw"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body: ErrorBody = body_json(resp).await;
    assert_eq!(body.error_code, 4006);
    assert_eq!(body.detail, "Invalid username or password");
}

// --- full lifecycle ---

#[tokio::test]
async fn auth_and_expense_lifecycle() {
    use tower::Service;

    let mut app = app().into_service();

    // register
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(json_request("POST", "/api/register", BOB))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    // register again: name taken
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(json_request("PUT", "/api/register", BOB))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let err: ErrorBody = body_json(resp).await;
    assert_eq!(err.error_code, 4001);

    // another name, same mail: also taken
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(json_request(
            "POST",
            "/api/register",
            r#"{"user_name":"bobby","password":"pw","mail":"bob@example.com"}"#,
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    // login with wrong password
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(json_request(
            "POST",
            "/api/login",
            r#"{"account":"bob","password":"nope"}"#,
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    // login, sets the access token cookie
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(json_request(
            "POST",
            "/api/login",
            r#"{"account":"bob","password":"pw"}"#,
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let cookie = resp
        .headers()
        .get(http::header::SET_COOKIE)
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    assert!(cookie.starts_with("access_token="));
    assert!(cookie.contains("HttpOnly"));
    let body: Value = body_json(resp).await;
    assert_eq!(body, json!({"message": "Login success"}));

    // two transactions
    for (i, product) in ["rice", "bus ticket"].iter().enumerate() {
        let payload = json!({"category": "misc", "product_name": product, "total_cost": 2.5});
        let resp = ServiceExt::ready(&mut app)
            .await
            .unwrap()
            .call(json_request("POST", "/expense/transaction", &payload.to_string()))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let body: Value = body_json(resp).await;
        assert_eq!(body["id"], i as u64 + 1);
    }

    // list keeps insertion order and echoes the stored fields
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(
            Request::builder()
                .uri("/expense/transaction")
                .body(String::new())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let records: Vec<Value> = body_json(resp).await;
    assert_eq!(records.len(), 2);
    assert_eq!(records[0]["product_name"], "rice");
    assert_eq!(records[0]["id"], 1);
    assert_eq!(records[1]["product_name"], "bus ticket");
    assert_eq!(records[1]["total_cost"], 2.5);

    // unknown path
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(
            Request::builder()
                .uri("/expense/other")
                .body(String::new())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert!(body_bytes(resp).await.is_empty());
}
