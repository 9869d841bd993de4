//! Day-off server HTTP client
//!
//! Implements the DayOffApi port with reqwest against the REST contract:
//! - POST   /auth/login            { email, password } -> { token, user }
//! - POST   /auth/reset-password   { email }           -> { success }
//! - GET    /dayoffs                                   -> [ day-off ]
//! - GET    /dayoffs/{userId}                          -> [ day-off ]
//! - POST   /dayoffs               { date }            -> day-off
//! - DELETE /dayoffs/{id}                              -> { success }
//! - PATCH  /dayoffs/{id}          { status }          -> { success }
//! - GET    /users                                     -> [ user ]
//!
//! The bearer token is read from the shared session on every request, so
//! a login or logout elsewhere in the process is picked up immediately.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use tracing::{debug, warn};
use url::Url;

use crate::config::Config;
use crate::domain::result::{Error, Result};
use crate::domain::{AuthResponse, DayOffRequest, DayOffStatus, User};
use crate::ports::DayOffApi;
use crate::session::SharedSession;

// =============================================================================
// Wire models (matching the server contract)
// =============================================================================

/// Day-off request as the server sends it
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DayOffWire {
    /// Request ID (some servers return numbers, we accept both)
    #[serde(deserialize_with = "deserialize_id")]
    id: String,
    #[serde(deserialize_with = "deserialize_id")]
    user_id: String,
    /// Plain day or full datetime; truncated to the calendar day
    #[serde(deserialize_with = "deserialize_wire_date")]
    date: NaiveDate,
    #[serde(deserialize_with = "deserialize_status")]
    status: DayOffStatus,
    created_at: DateTime<Utc>,
}

impl From<DayOffWire> for DayOffRequest {
    fn from(wire: DayOffWire) -> Self {
        DayOffRequest {
            id: wire.id,
            user_id: wire.user_id,
            date: wire.date,
            status: wire.status,
            created_at: wire.created_at,
        }
    }
}

/// User as the server sends it
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UserWire {
    #[serde(deserialize_with = "deserialize_id")]
    id: String,
    email: String,
    name: String,
    #[serde(default)]
    super_user: bool,
}

impl From<UserWire> for User {
    fn from(wire: UserWire) -> Self {
        User {
            id: wire.id,
            email: wire.email,
            name: wire.name,
            super_user: wire.super_user,
        }
    }
}

#[derive(Debug, Deserialize)]
struct LoginResponse {
    token: String,
    user: UserWire,
}

/// Error payload the server attaches to non-2xx responses
#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

#[derive(Serialize)]
struct LoginBody<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
struct ResetPasswordBody<'a> {
    email: &'a str,
}

#[derive(Serialize)]
struct CreateDayOffBody {
    date: NaiveDate,
}

#[derive(Serialize)]
struct DecisionBody {
    status: DayOffStatus,
}

/// Deserialize an ID that can be number or string
fn deserialize_id<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::Error;
    let value: JsonValue = Deserialize::deserialize(deserializer)?;
    match value {
        JsonValue::Number(n) => Ok(n.to_string()),
        JsonValue::String(s) => Ok(s),
        _ => Err(D::Error::custom("expected number or string for id")),
    }
}

/// Deserialize a date sent either as a plain day ("2024-04-15") or as a
/// full RFC 3339 datetime ("2024-04-15T00:00:00Z")
fn deserialize_wire_date<'de, D>(deserializer: D) -> std::result::Result<NaiveDate, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::Error;
    let s = String::deserialize(deserializer)?;
    if let Ok(dt) = DateTime::parse_from_rfc3339(&s) {
        return Ok(dt.date_naive());
    }
    NaiveDate::parse_from_str(&s, "%Y-%m-%d")
        .map_err(|e| D::Error::custom(format!("invalid date '{}': {}", s, e)))
}

/// Deserialize a status string, rejecting unknown spellings
fn deserialize_status<'de, D>(deserializer: D) -> std::result::Result<DayOffStatus, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::Error;
    let s = String::deserialize(deserializer)?;
    s.parse().map_err(D::Error::custom)
}

// =============================================================================
// HTTP client
// =============================================================================

/// Day-off server API client
#[derive(Debug)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    session: SharedSession,
}

impl ApiClient {
    /// Create a client from configuration.
    ///
    /// The base URL is validated up front so a typo in settings fails at
    /// startup instead of on the first request. The configured timeout
    /// applies to every call; requests that outlive it fail as Timeout.
    pub fn new(config: &Config, session: SharedSession) -> Result<Self> {
        let parsed = Url::parse(&config.api_url)
            .map_err(|e| Error::Config(format!("invalid API URL '{}': {}", config.api_url, e)))?;
        if parsed.scheme() != "http" && parsed.scheme() != "https" {
            return Err(Error::Config(format!(
                "API URL must use http or https, got '{}'",
                parsed.scheme()
            )));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| Error::Network(format!("failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.api_url.trim_end_matches('/').to_string(),
            session,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Start a request with the bearer token attached when one is held
    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let mut builder = self.client.request(method, self.url(path));
        if let Some(token) = self.session.token() {
            builder = builder.bearer_auth(token);
        }
        builder
    }

    /// Fail fast when no token is held, before any network traffic
    fn require_token(&self) -> Result<()> {
        if self.session.token().is_none() {
            return Err(Error::auth("not logged in"));
        }
        Ok(())
    }

    async fn send(&self, builder: RequestBuilder) -> Result<Response> {
        let response = builder.send().await.map_err(map_transport_error)?;
        check_response_status(response).await
    }

    /// Decide a pending request: PATCH with the target status
    async fn set_status(&self, id: &str, status: DayOffStatus) -> Result<()> {
        self.require_token()?;
        debug!("PATCH /dayoffs/{} status={}", id, status);
        let path = format!("/dayoffs/{}", id);
        let builder = self
            .request(Method::PATCH, &path)
            .json(&DecisionBody { status });
        self.send(builder).await?;
        Ok(())
    }
}

#[async_trait]
impl DayOffApi for ApiClient {
    async fn login(&self, email: &str, password: &str) -> Result<AuthResponse> {
        debug!("POST /auth/login");
        let builder = self
            .request(Method::POST, "/auth/login")
            .json(&LoginBody { email, password });
        let response = self.send(builder).await?;
        let parsed: LoginResponse = decode(response).await?;
        Ok(AuthResponse {
            token: parsed.token,
            user: parsed.user.into(),
        })
    }

    async fn reset_password(&self, email: &str) -> Result<()> {
        debug!("POST /auth/reset-password");
        let builder = self
            .request(Method::POST, "/auth/reset-password")
            .json(&ResetPasswordBody { email });
        self.send(builder).await?;
        Ok(())
    }

    async fn list_day_offs(&self) -> Result<Vec<DayOffRequest>> {
        self.require_token()?;
        debug!("GET /dayoffs");
        let response = self.send(self.request(Method::GET, "/dayoffs")).await?;
        let wires: Vec<DayOffWire> = decode(response).await?;
        Ok(wires.into_iter().map(Into::into).collect())
    }

    async fn list_day_offs_for_user(&self, user_id: &str) -> Result<Vec<DayOffRequest>> {
        self.require_token()?;
        debug!("GET /dayoffs/{}", user_id);
        let path = format!("/dayoffs/{}", user_id);
        let response = self.send(self.request(Method::GET, &path)).await?;
        let wires: Vec<DayOffWire> = decode(response).await?;
        Ok(wires.into_iter().map(Into::into).collect())
    }

    async fn create_day_off(&self, date: NaiveDate) -> Result<DayOffRequest> {
        self.require_token()?;
        debug!("POST /dayoffs date={}", date);
        let builder = self
            .request(Method::POST, "/dayoffs")
            .json(&CreateDayOffBody { date });
        let response = self.send(builder).await?;
        let wire: DayOffWire = decode(response).await?;
        Ok(wire.into())
    }

    async fn cancel_day_off(&self, id: &str) -> Result<()> {
        self.require_token()?;
        debug!("DELETE /dayoffs/{}", id);
        let path = format!("/dayoffs/{}", id);
        self.send(self.request(Method::DELETE, &path)).await?;
        Ok(())
    }

    async fn approve_day_off(&self, id: &str) -> Result<()> {
        self.set_status(id, DayOffStatus::Approved).await
    }

    async fn refuse_day_off(&self, id: &str) -> Result<()> {
        self.set_status(id, DayOffStatus::Refused).await
    }

    async fn list_users(&self) -> Result<Vec<User>> {
        self.require_token()?;
        debug!("GET /users");
        let response = self.send(self.request(Method::GET, "/users")).await?;
        let wires: Vec<UserWire> = decode(response).await?;
        Ok(wires.into_iter().map(Into::into).collect())
    }
}

/// Read and parse a 2xx response body
async fn decode<T: DeserializeOwned>(response: Response) -> Result<T> {
    let body = response.text().await.map_err(map_transport_error)?;
    Ok(serde_json::from_str(&body)?)
}

/// Map transport failures (no HTTP status received) to typed errors
fn map_transport_error(error: reqwest::Error) -> Error {
    if error.is_timeout() {
        Error::Timeout("the server did not respond in time".to_string())
    } else if error.is_connect() {
        Error::Network("unable to reach the day-off server".to_string())
    } else {
        Error::Network(format!("request failed: {}", error))
    }
}

/// Map non-2xx statuses to the error taxonomy, folding in the server's
/// message when the body carries one
async fn check_response_status(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let message = read_error_message(response).await;
    warn!(status = status.as_u16(), error = %message, "server rejected request");
    Err(match status {
        StatusCode::BAD_REQUEST => Error::Validation(message),
        StatusCode::UNAUTHORIZED => Error::Auth(message),
        StatusCode::FORBIDDEN => Error::Authorization(message),
        StatusCode::NOT_FOUND => Error::NotFound(message),
        StatusCode::CONFLICT => Error::Conflict(message),
        _ => Error::Api {
            status: status.as_u16(),
            message,
        },
    })
}

/// Best-effort extraction of `{"error": "..."}` from an error response
async fn read_error_message(response: Response) -> String {
    let fallback = format!("HTTP {}", response.status().as_u16());
    match response.text().await {
        Ok(body) if !body.trim().is_empty() => serde_json::from_str::<ErrorBody>(&body)
            .ok()
            .and_then(|b| b.error.or(b.message))
            .unwrap_or(fallback),
        _ => fallback,
    }
}

// =============================================================================
// Tests
// =============================================================================
