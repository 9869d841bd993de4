//! Exceptional Core - Business logic for the exceptional day-off client
//!
//! This crate implements the client-side logic following hexagonal architecture:
//!
//! - **domain**: Core business entities (User, DayOffRequest) and the quota policy
//! - **ports**: Trait definition for the day-off server (DayOffApi)
//! - **services**: Business logic orchestration (auth/session, day-off lifecycle)
//! - **adapters**: Concrete implementations (reqwest HTTP client, in-memory demo server)

pub mod adapters;
pub mod config;
pub mod domain;
pub mod ports;
pub mod services;
pub mod session;

use std::path::Path;
use std::sync::Arc;

use adapters::demo::DemoApi;
use adapters::http::ApiClient;
use config::Config;
use ports::DayOffApi;
use services::{AuthService, DayOffService};
use session::{SessionStore, SharedSession};

// Re-export commonly used types at crate root
pub use domain::result::{Error, Result};
pub use domain::{AuthResponse, DayOffRequest, DayOffStatus, User};
pub use session::Session;

/// Main context for client operations
///
/// This is the primary entry point. It restores any persisted session,
/// picks the server adapter (HTTP, or the in-memory demo server when demo
/// mode is on) and wires up the services.
pub struct ExceptionalContext {
    pub config: Config,
    pub session: SharedSession,
    pub auth_service: AuthService,
    pub day_off_service: DayOffService,
}

impl ExceptionalContext {
    /// Create a new context rooted at `app_dir`
    pub fn new(app_dir: &Path) -> Result<Self> {
        let config = Config::load(app_dir)?;

        let store = SessionStore::new(app_dir);
        let session = SharedSession::new(store.load()?);

        let api: Arc<dyn DayOffApi> = if config.demo_mode {
            Arc::new(DemoApi::seeded(session.clone()))
        } else {
            Arc::new(ApiClient::new(&config, session.clone())?)
        };

        let auth_service = AuthService::new(Arc::clone(&api), store, session.clone());
        let day_off_service = DayOffService::new(api);

        Ok(Self {
            config,
            session,
            auth_service,
            day_off_service,
        })
    }
}
