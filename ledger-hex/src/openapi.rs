//! OpenAPI specification and documentation.

#![allow(dead_code)] // Path functions are only used by utoipa for documentation generation

use ledger_types::domain::{AccountId, Currency, PaymentId, UserId};
use ledger_types::dto::{
    AccountResponse, CreateUserRequest, PaymentResponse, RemoveAccountParams, RemoveUserParams,
    SaveAccountRequest, SendPaymentRequest, UserResponse,
};
use utoipa::{
    Modify, OpenApi,
    openapi::security::{Http, HttpAuthScheme, SecurityScheme},
};

// Dummy functions to generate path documentation
// These are not the actual handlers, just for OpenAPI path generation

/// Health check endpoint
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "Service is healthy", body = inline(serde_json::Value), example = json!({"status": "healthy"}))
    )
)]
async fn health() {}

/// List the caller's accounts
#[utoipa::path(
    get,
    path = "/api/accounts",
    tag = "accounts",
    security(("basic_auth" = [])),
    responses(
        (status = 200, description = "The caller's accounts", body = Vec<AccountResponse>),
        (status = 204, description = "The caller owns no accounts"),
        (status = 401, description = "Unknown identity"),
        (status = 403, description = "Wrong secret")
    )
)]
async fn get_accounts() {}

/// Send a payment from the caller's account
#[utoipa::path(
    post,
    path = "/api/payments",
    tag = "payments",
    params(
        ("receiver" = String, Query, description = "Receiver's email"),
        ("currency" = Currency, Query, description = "Currency of both accounts"),
        ("amount" = u64, Query, description = "Amount in smallest currency unit")
    ),
    security(("basic_auth" = [])),
    responses(
        (status = 202, description = "Transfer accepted", body = PaymentResponse),
        (status = 401, description = "Unknown sender or receiver"),
        (status = 500, description = "Domain failure, body carries the error kind")
    )
)]
async fn send_payment() {}

/// Create a user (administrator only)
#[utoipa::path(
    post,
    path = "/api/users",
    tag = "users",
    request_body = CreateUserRequest,
    security(("basic_auth" = [])),
    responses(
        (status = 202, description = "User created", body = UserResponse),
        (status = 403, description = "Caller is not the administrator"),
        (status = 500, description = "Duplicate email")
    )
)]
async fn create_user() {}

/// Remove a user (administrator only)
#[utoipa::path(
    delete,
    path = "/api/users",
    tag = "users",
    params(
        ("email" = String, Query, description = "Email of the user to remove")
    ),
    security(("basic_auth" = [])),
    responses(
        (status = 202, description = "User removed"),
        (status = 403, description = "Caller is not the administrator"),
        (status = 500, description = "User could not be removed")
    )
)]
async fn remove_user() {}

/// Create or overwrite an account (administrator only)
#[utoipa::path(
    put,
    path = "/api/accounts",
    tag = "accounts",
    request_body = SaveAccountRequest,
    security(("basic_auth" = [])),
    responses(
        (status = 202, description = "Account saved", body = AccountResponse),
        (status = 403, description = "Caller is not the administrator"),
        (status = 500, description = "Account could not be saved")
    )
)]
async fn save_account() {}

/// Remove an account by owner and currency (administrator only)
#[utoipa::path(
    delete,
    path = "/api/accounts",
    tag = "accounts",
    params(
        ("email" = String, Query, description = "Owner's email"),
        ("currency" = Currency, Query, description = "Currency of the account to remove")
    ),
    security(("basic_auth" = [])),
    responses(
        (status = 202, description = "Account removed"),
        (status = 403, description = "Caller is not the administrator"),
        (status = 500, description = "Account could not be removed")
    )
)]
async fn remove_account() {}

/// OpenAPI documentation for the Ledger API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Ledger Service API",
        version = "1.0.0",
        description = "A small financial ledger service: users own currency-denominated accounts, authenticated actors transfer funds, and a configured administrator manages users and accounts.\n\n## Authentication\n\nEvery endpoint except `/health` expects HTTP Basic credentials:\n\n```\nAuthorization: Basic base64(email:password)\n```",
    ),
    paths(
        health,
        get_accounts,
        send_payment,
        create_user,
        remove_user,
        save_account,
        remove_account,
    ),
    components(
        schemas(
            CreateUserRequest,
            UserResponse,
            RemoveUserParams,
            SaveAccountRequest,
            AccountResponse,
            RemoveAccountParams,
            SendPaymentRequest,
            PaymentResponse,
            Currency,
            AccountId,
            UserId,
            PaymentId,
        )
    ),

    modifiers(&SecurityAddon),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "accounts", description = "Account listing and administration"),
        (name = "payments", description = "Fund transfers between accounts"),
        (name = "users", description = "User administration"),
    )
)]
pub struct ApiDoc;

/// Security scheme modifier for Basic authentication.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "basic_auth",
                SecurityScheme::Http(Http::new(HttpAuthScheme::Basic)),
            );
        }
    }
}
