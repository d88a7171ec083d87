//! Integration tests for the HTTP boundary.
//!
//! These tests drive the full axum router over an in-memory SQLite store
//! and verify the observable contract: Basic credentials in, status codes
//! and stable error kinds out.

use axum::{
    Router,
    body::Body,
    http::{Method, Request, StatusCode},
};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use http_body_util::BodyExt;
use tower::ServiceExt;

use ledger_hex::{AdminIdentity, LedgerService, inbound::HttpServer};
use ledger_repo::SqliteRepo;
use ledger_types::{Account, AccountStore, Currency, Money, User};

const ADMIN_EMAIL: &str = "admin@ledger.local";
const ADMIN_PASSWORD: &str = "s3cret";

struct TestApp {
    app: Router,
    sender: User,
    receiver: User,
}

/// Two users, each holding 10000 EUR and 10000 USD.
async fn setup() -> TestApp {
    let repo = SqliteRepo::new("sqlite::memory:").await.unwrap();

    let sender = User::new(
        "John".to_string(),
        "Doe".to_string(),
        "john.doe@gmail.com".to_string(),
        "password".to_string(),
    );
    let receiver = User::new(
        "Ion".to_string(),
        "Popescu".to_string(),
        "ion.popescu@yahoo.com".to_string(),
        "parola".to_string(),
    );
    repo.insert_user(&sender).await.unwrap();
    repo.insert_user(&receiver).await.unwrap();

    for user in [&sender, &receiver] {
        for currency in [Currency::EUR, Currency::USD] {
            let mut account = Account::new(user.id, currency);
            account.balance = Money::new(10000, currency);
            repo.upsert_account(&account).await.unwrap();
        }
    }

    let service = LedgerService::new(repo, AdminIdentity::new(ADMIN_EMAIL, ADMIN_PASSWORD));
    let app = HttpServer::new(service).router();

    TestApp {
        app,
        sender,
        receiver,
    }
}

fn basic(email: &str, password: &str) -> String {
    format!("Basic {}", STANDARD.encode(format!("{email}:{password}")))
}

fn admin_auth() -> String {
    basic(ADMIN_EMAIL, ADMIN_PASSWORD)
}

fn user_auth(user: &User) -> String {
    basic(&user.email, &user.password)
}

fn request(method: Method, uri: &str, auth: &str, body: Option<serde_json::Value>) -> Request<Body> {
    let builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("Authorization", auth);

    match body {
        Some(json) => builder
            .header("Content-Type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

async fn json_body(response: axum::response::Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

// ─────────────────────────────────────────────────────────────────────────────
// Account listing
// ─────────────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_get_accounts_unknown_identity_is_unauthorized() {
    let t = setup().await;

    let response = t
        .app
        .oneshot(request(
            Method::GET,
            "/api/accounts",
            &basic("dummy@example.com", "dummy"),
            None,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = json_body(response).await;
    assert_eq!(body["error"], "UserNotFound");
}

#[tokio::test]
async fn test_get_accounts_missing_header_is_unauthorized() {
    let t = setup().await;

    let response = t
        .app
        .oneshot(
            Request::builder()
                .uri("/api/accounts")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_get_accounts_empty_is_no_content() {
    let t = setup().await;

    // A freshly created user owns no accounts yet.
    let response = t
        .app
        .clone()
        .oneshot(request(
            Method::POST,
            "/api/users",
            &admin_auth(),
            Some(serde_json::json!({
                "first_name": "Jane",
                "last_name": "Roe",
                "email": "jane.roe@example.com",
                "password": "secret"
            })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::ACCEPTED);

    let response = t
        .app
        .oneshot(request(
            Method::GET,
            "/api/accounts",
            &basic("jane.roe@example.com", "secret"),
            None,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn test_get_accounts_ok_with_payload() {
    let t = setup().await;

    let response = t
        .app
        .oneshot(request(
            Method::GET,
            "/api/accounts",
            &user_auth(&t.sender),
            None,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body.as_array().unwrap().len(), 2);
}

// ─────────────────────────────────────────────────────────────────────────────
// Payments
// ─────────────────────────────────────────────────────────────────────────────

async fn balances_of(app: &Router, auth: &str) -> serde_json::Value {
    let response = app
        .clone()
        .oneshot(request(Method::GET, "/api/accounts", auth, None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    json_body(response).await
}

fn balance_in(accounts: &serde_json::Value, currency: &str) -> u64 {
    accounts
        .as_array()
        .unwrap()
        .iter()
        .find(|a| a["currency"] == currency)
        .unwrap()["amount"]
        .as_u64()
        .unwrap()
}

#[tokio::test]
async fn test_send_payment_overdraft() {
    let t = setup().await;

    let uri = format!(
        "/api/payments?receiver={}&currency=EUR&amount=100000",
        t.receiver.email
    );
    let response = t
        .app
        .clone()
        .oneshot(request(Method::POST, &uri, &user_auth(&t.sender), None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = json_body(response).await;
    assert_eq!(body["error"], "AccountHasNotEnoughAmountForPayment");

    // Balances unchanged on both sides.
    let sender_accounts = balances_of(&t.app, &user_auth(&t.sender)).await;
    let receiver_accounts = balances_of(&t.app, &user_auth(&t.receiver)).await;
    assert_eq!(balance_in(&sender_accounts, "EUR"), 10000);
    assert_eq!(balance_in(&receiver_accounts, "EUR"), 10000);
}

#[tokio::test]
async fn test_send_payment_accepted() {
    let t = setup().await;

    let uri = format!(
        "/api/payments?receiver={}&currency=EUR&amount=1000",
        t.receiver.email
    );
    let response = t
        .app
        .clone()
        .oneshot(request(Method::POST, &uri, &user_auth(&t.sender), None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::ACCEPTED);
    let payment = json_body(response).await;
    assert_eq!(payment["currency"], "EUR");
    assert_eq!(payment["amount"], 1000);

    let sender_accounts = balances_of(&t.app, &user_auth(&t.sender)).await;
    let receiver_accounts = balances_of(&t.app, &user_auth(&t.receiver)).await;
    assert_eq!(balance_in(&sender_accounts, "EUR"), 9000);
    assert_eq!(balance_in(&receiver_accounts, "EUR"), 11000);
    // The USD accounts are untouched.
    assert_eq!(balance_in(&sender_accounts, "USD"), 10000);
    assert_eq!(balance_in(&receiver_accounts, "USD"), 10000);
}

#[tokio::test]
async fn test_send_payment_unknown_receiver() {
    let t = setup().await;

    let uri = "/api/payments?receiver=nobody@example.com&currency=EUR&amount=1000";
    let response = t
        .app
        .oneshot(request(Method::POST, uri, &user_auth(&t.sender), None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = json_body(response).await;
    assert_eq!(body["error"], "UserNotFound");
}

#[tokio::test]
async fn test_send_payment_no_common_currency() {
    let t = setup().await;

    // Neither side holds a RON account.
    let uri = format!(
        "/api/payments?receiver={}&currency=RON&amount=1000",
        t.receiver.email
    );
    let response = t
        .app
        .oneshot(request(Method::POST, &uri, &user_auth(&t.sender), None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = json_body(response).await;
    assert_eq!(body["error"], "AccountNotFound");
}

// ─────────────────────────────────────────────────────────────────────────────
// User administration
// ─────────────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_create_user_forbidden_for_non_admin() {
    let t = setup().await;

    let response = t
        .app
        .oneshot(request(
            Method::POST,
            "/api/users",
            &user_auth(&t.sender),
            Some(serde_json::json!({
                "first_name": "John",
                "last_name": "Doe",
                "email": "john.doe@gmail.com",
                "password": "password"
            })),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let body = json_body(response).await;
    assert_eq!(body["error"], "BadCredentials");
}

#[tokio::test]
async fn test_create_user_duplicate_email() {
    let t = setup().await;

    let response = t
        .app
        .oneshot(request(
            Method::POST,
            "/api/users",
            &admin_auth(),
            Some(serde_json::json!({
                "first_name": "John",
                "last_name": "Doe",
                "email": t.sender.email,
                "password": "password"
            })),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = json_body(response).await;
    assert_eq!(body["error"], "UserWithSameEmailAlreadyExists");
}

#[tokio::test]
async fn test_create_user_accepted() {
    let t = setup().await;

    let response = t
        .app
        .oneshot(request(
            Method::POST,
            "/api/users",
            &admin_auth(),
            Some(serde_json::json!({
                "first_name": "Jane",
                "last_name": "Roe",
                "email": "jane.roe@example.com",
                "password": "secret"
            })),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::ACCEPTED);
    let body = json_body(response).await;
    assert_eq!(body["email"], "jane.roe@example.com");
    // The password is never echoed back.
    assert!(body.get("password").is_none());
}

#[tokio::test]
async fn test_delete_user_forbidden_for_non_admin() {
    let t = setup().await;

    let response = t
        .app
        .oneshot(request(
            Method::DELETE,
            "/api/users?email=nu_exista",
            &user_auth(&t.sender),
            None,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let body = json_body(response).await;
    assert_eq!(body["error"], "BadCredentials");
}

#[tokio::test]
async fn test_delete_user_unknown_email() {
    let t = setup().await;

    let response = t
        .app
        .oneshot(request(
            Method::DELETE,
            "/api/users?email=nu_exista",
            &admin_auth(),
            None,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = json_body(response).await;
    assert_eq!(body["error"], "UserCouldNotBeRemoved");
}

#[tokio::test]
async fn test_delete_user_accepted() {
    let t = setup().await;

    let uri = format!("/api/users?email={}", t.sender.email);
    let response = t
        .app
        .clone()
        .oneshot(request(Method::DELETE, &uri, &admin_auth(), None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::ACCEPTED);

    // The removed user can no longer authenticate.
    let response = t
        .app
        .oneshot(request(
            Method::GET,
            "/api/accounts",
            &user_auth(&t.sender),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

// ─────────────────────────────────────────────────────────────────────────────
// Account administration
// ─────────────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_save_account_forbidden_for_non_admin() {
    let t = setup().await;

    let response = t
        .app
        .oneshot(request(
            Method::PUT,
            "/api/accounts",
            &user_auth(&t.sender),
            Some(serde_json::json!({
                "user_id": t.sender.id,
                "currency": "RON",
                "amount": 10000
            })),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let body = json_body(response).await;
    assert_eq!(body["error"], "BadCredentials");
}

#[tokio::test]
async fn test_save_account_accepted() {
    let t = setup().await;

    let response = t
        .app
        .clone()
        .oneshot(request(
            Method::PUT,
            "/api/accounts",
            &admin_auth(),
            Some(serde_json::json!({
                "user_id": t.sender.id,
                "currency": "RON",
                "amount": 2500
            })),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::ACCEPTED);

    let accounts = balances_of(&t.app, &user_auth(&t.sender)).await;
    assert_eq!(balance_in(&accounts, "RON"), 2500);
}

#[tokio::test]
async fn test_delete_account_forbidden_for_non_admin() {
    let t = setup().await;

    let response = t
        .app
        .oneshot(request(
            Method::DELETE,
            "/api/accounts?email=Nu_exista&currency=RON",
            &user_auth(&t.sender),
            None,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let body = json_body(response).await;
    assert_eq!(body["error"], "BadCredentials");
}

#[tokio::test]
async fn test_delete_account_unknown_target() {
    let t = setup().await;

    let response = t
        .app
        .oneshot(request(
            Method::DELETE,
            "/api/accounts?email=nu_exista&currency=USD",
            &admin_auth(),
            None,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = json_body(response).await;
    assert_eq!(body["error"], "AccountCouldNotBeRemoved");
}

#[tokio::test]
async fn test_delete_account_accepted() {
    let t = setup().await;

    let uri = format!("/api/accounts?email={}&currency=USD", t.sender.email);
    let response = t
        .app
        .clone()
        .oneshot(request(Method::DELETE, &uri, &admin_auth(), None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::ACCEPTED);

    let accounts = balances_of(&t.app, &user_auth(&t.sender)).await;
    let currencies: Vec<_> = accounts
        .as_array()
        .unwrap()
        .iter()
        .map(|a| a["currency"].clone())
        .collect();
    assert_eq!(currencies, vec!["EUR"]);
}

// ─────────────────────────────────────────────────────────────────────────────
// Health
// ─────────────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_health_requires_no_credentials() {
    let t = setup().await;

    let response = t
        .app
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}
