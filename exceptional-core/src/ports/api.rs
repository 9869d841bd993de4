//! Day-off server port - remote API abstraction

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::domain::result::Result;
use crate::domain::{AuthResponse, DayOffRequest, User};

/// Day-off server abstraction
///
/// This trait defines every server operation the client performs.
/// Implementations (adapters) provide the actual transport: the reqwest
/// HTTP client in production, an in-memory server in demo mode and tests.
///
/// Authorization lives on the server; implementations surface its verdict
/// as typed errors rather than pre-filtering calls by role.
#[async_trait]
pub trait DayOffApi: Send + Sync {
    // === Auth ===

    /// Exchange credentials for a token and the authenticated identity
    async fn login(&self, email: &str, password: &str) -> Result<AuthResponse>;

    /// Ask the server to send password-reset instructions
    async fn reset_password(&self, email: &str) -> Result<()>;

    // === Day offs ===

    /// The authenticated user's own requests
    async fn list_day_offs(&self) -> Result<Vec<DayOffRequest>>;

    /// Another user's requests (superuser only)
    async fn list_day_offs_for_user(&self, user_id: &str) -> Result<Vec<DayOffRequest>>;

    /// Create a pending request for `date`
    async fn create_day_off(&self, date: NaiveDate) -> Result<DayOffRequest>;

    /// Delete a request: the owner while it is pending, a superuser once
    /// it is approved
    async fn cancel_day_off(&self, id: &str) -> Result<()>;

    /// Approve a pending request (superuser only)
    async fn approve_day_off(&self, id: &str) -> Result<()>;

    /// Refuse a pending request (superuser only)
    async fn refuse_day_off(&self, id: &str) -> Result<()>;

    // === Users ===

    /// Directory of all users, for the review dashboard (superuser only)
    async fn list_users(&self) -> Result<Vec<User>>;
}
