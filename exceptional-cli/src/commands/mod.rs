//! CLI command implementations

pub mod admin;
pub mod auth;
pub mod demo;
pub mod list;
pub mod request;

use std::path::PathBuf;

use anyhow::{Context, Result};
use exceptional_core::ExceptionalContext;

/// Get the exceptional directory from environment or default
pub fn get_app_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("EXCEPTIONAL_DIR") {
        PathBuf::from(dir)
    } else {
        dirs::home_dir()
            .expect("Could not find home directory")
            .join(".exceptional")
    }
}

/// Get or create the application context
pub fn get_context() -> Result<ExceptionalContext> {
    let app_dir = get_app_dir();

    // Create directory if it doesn't exist
    std::fs::create_dir_all(&app_dir)
        .with_context(|| format!("Failed to create exceptional directory: {:?}", app_dir))?;

    ExceptionalContext::new(&app_dir).context("Failed to initialize exceptional context")
}

/// Fail early with a hint when no session is stored
pub fn require_login(ctx: &ExceptionalContext) -> Result<()> {
    if !ctx.session.is_authenticated() {
        anyhow::bail!("Not logged in. Run 'exc login' first.");
    }
    Ok(())
}
