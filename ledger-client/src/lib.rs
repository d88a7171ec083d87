//! # Ledger Client SDK
//!
//! A typed Rust client for the Ledger API.

use ledger_types::{
    AccountResponse, CreateUserRequest, Currency, PaymentResponse, SaveAccountRequest,
    UserResponse,
};
use reqwest::{Client, Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;

/// Error type for client operations.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error: {status} - {kind}")]
    Api { status: u16, kind: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Ledger API client.
///
/// Every call except `health` sends the configured Basic credentials.
pub struct LedgerClient {
    base_url: String,
    email: Option<String>,
    password: Option<String>,
    http: Client,
}

impl LedgerClient {
    /// Creates a new client.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            email: None,
            password: None,
            http: Client::new(),
        }
    }

    /// Sets the credentials used for authentication.
    pub fn with_credentials(
        mut self,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        self.email = Some(email.into());
        self.password = Some(password.into());
        self
    }

    /// Checks if the API is healthy.
    pub async fn health(&self) -> Result<bool, ClientError> {
        let resp = self
            .http
            .get(format!("{}/health", self.base_url))
            .send()
            .await?;
        Ok(resp.status().is_success())
    }

    /// Lists the caller's accounts. A "no content" response is an empty list.
    pub async fn get_accounts(&self) -> Result<Vec<AccountResponse>, ClientError> {
        let resp = self.request(Method::GET, "/api/accounts").send().await?;

        if resp.status() == StatusCode::NO_CONTENT {
            return Ok(Vec::new());
        }

        Self::parse(resp).await
    }

    /// Sends a payment from the caller's account in `currency`.
    pub async fn send_payment(
        &self,
        receiver: &str,
        currency: Currency,
        amount: u64,
    ) -> Result<PaymentResponse, ClientError> {
        let resp = self
            .request(Method::POST, "/api/payments")
            .query(&[
                ("receiver", receiver.to_string()),
                ("currency", currency.to_string()),
                ("amount", amount.to_string()),
            ])
            .send()
            .await?;

        Self::parse(resp).await
    }

    /// Creates a user (administrator credentials required).
    pub async fn create_user(&self, req: &CreateUserRequest) -> Result<UserResponse, ClientError> {
        let resp = self
            .request(Method::POST, "/api/users")
            .json(req)
            .send()
            .await?;

        Self::parse(resp).await
    }

    /// Removes a user by email (administrator credentials required).
    pub async fn remove_user(&self, email: &str) -> Result<(), ClientError> {
        let resp = self
            .request(Method::DELETE, "/api/users")
            .query(&[("email", email)])
            .send()
            .await?;

        Self::check(resp).await
    }

    /// Creates or overwrites an account (administrator credentials required).
    pub async fn save_account(
        &self,
        req: &SaveAccountRequest,
    ) -> Result<AccountResponse, ClientError> {
        let resp = self
            .request(Method::PUT, "/api/accounts")
            .json(req)
            .send()
            .await?;

        Self::parse(resp).await
    }

    /// Removes the account held by `email` in `currency` (administrator
    /// credentials required).
    pub async fn remove_account(&self, email: &str, currency: Currency) -> Result<(), ClientError> {
        let resp = self
            .request(Method::DELETE, "/api/accounts")
            .query(&[
                ("email", email.to_string()),
                ("currency", currency.to_string()),
            ])
            .send()
            .await?;

        Self::check(resp).await
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let mut builder = self
            .http
            .request(method, format!("{}{}", self.base_url, path));

        if let Some(email) = &self.email {
            builder = builder.basic_auth(email, self.password.as_deref());
        }

        builder
    }

    /// Extracts the stable error kind from a failure body.
    async fn api_error(resp: reqwest::Response) -> ClientError {
        let status = resp.status().as_u16();
        let kind = match resp.json::<serde_json::Value>().await {
            Ok(body) => body["error"].as_str().unwrap_or("Unknown").to_string(),
            Err(_) => "Unknown".to_string(),
        };
        ClientError::Api { status, kind }
    }

    async fn parse<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, ClientError> {
        if !resp.status().is_success() {
            return Err(Self::api_error(resp).await);
        }
        Ok(resp.json().await?)
    }

    async fn check(resp: reqwest::Response) -> Result<(), ClientError> {
        if !resp.status().is_success() {
            return Err(Self::api_error(resp).await);
        }
        Ok(())
    }
}
