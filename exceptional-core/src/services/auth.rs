//! Authentication service
//!
//! Owns the session lifecycle: login persists and publishes the session,
//! logout clears both the in-memory slot and the session file, and
//! password resets never touch either.

use std::sync::Arc;

use tracing::info;

use crate::domain::result::{Error, Result};
use crate::domain::User;
use crate::ports::DayOffApi;
use crate::session::{Session, SessionStore, SharedSession};

/// Authentication service
pub struct AuthService {
    api: Arc<dyn DayOffApi>,
    store: SessionStore,
    session: SharedSession,
}

impl AuthService {
    pub fn new(api: Arc<dyn DayOffApi>, store: SessionStore, session: SharedSession) -> Self {
        Self {
            api,
            store,
            session,
        }
    }

    /// Log in with email and password.
    ///
    /// The email is sanity-checked locally so obvious typos never cost a
    /// round-trip; the server performs the real validation. On success the
    /// session is written to disk first and published to the rest of the
    /// process after, so a crash in between leaves a restorable file
    /// rather than a half-logged-in state.
    pub async fn login(&self, email: &str, password: &str) -> Result<User> {
        validate_email(email)?;
        if password.is_empty() {
            return Err(Error::validation("password must not be empty"));
        }

        let response = self.api.login(email.trim(), password).await?;
        let session = Session::new(response.token, response.user.clone());
        self.store.save(&session)?;
        self.session.set(session);

        info!(email = %response.user.email, "logged in");
        Ok(response.user)
    }

    /// Ask the server to email reset instructions. Does not change the
    /// current session.
    pub async fn reset_password(&self, email: &str) -> Result<()> {
        validate_email(email)?;
        self.api.reset_password(email.trim()).await
    }

    /// Forget the session, in memory and on disk. Succeeds when already
    /// logged out.
    pub fn logout(&self) -> Result<()> {
        self.session.clear();
        self.store.clear()?;
        info!("logged out");
        Ok(())
    }

    /// Identity of the current session, when known
    pub fn current_user(&self) -> Option<User> {
        self.session.user()
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_authenticated()
    }
}

/// Just enough checking to catch obvious typos; the server decides what
/// is actually a valid address
fn validate_email(email: &str) -> Result<()> {
    let trimmed = email.trim();
    if trimmed.is_empty()
        || !trimmed.contains('@')
        || trimmed.starts_with('@')
        || trimmed.ends_with('@')
    {
        return Err(Error::validation(format!(
            "'{}' is not a valid email address",
            email
        )));
    }
    Ok(())
}
