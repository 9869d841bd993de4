//! Configuration management
//!
//! Settings live in `settings.json` under the app directory:
//! ```json
//! {
//!   "apiUrl": "http://localhost:3000",
//!   "timeoutSecs": 30,
//!   "demoMode": false
//! }
//! ```

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::domain::result::Result;

/// Environment override for the server base URL (for CI/testing)
pub const API_URL_ENV: &str = "EXCEPTIONAL_API_URL";
/// Environment override for demo mode (for CI/testing)
pub const DEMO_MODE_ENV: &str = "EXCEPTIONAL_DEMO_MODE";

const DEFAULT_API_URL: &str = "http://localhost:3000";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Raw settings.json structure
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SettingsFile {
    #[serde(default = "default_api_url")]
    api_url: String,
    #[serde(default = "default_timeout_secs")]
    timeout_secs: u64,
    #[serde(default)]
    demo_mode: bool,
    // Preserve fields written by other frontends when saving
    #[serde(flatten)]
    other: HashMap<String, serde_json::Value>,
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl Default for SettingsFile {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            timeout_secs: default_timeout_secs(),
            demo_mode: false,
            other: HashMap::new(),
        }
    }
}

/// Client configuration (simplified view of settings)
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the day-off server
    pub api_url: String,
    /// Per-request deadline for server calls
    pub timeout_secs: u64,
    /// Run against the built-in in-memory server instead of the network
    pub demo_mode: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            timeout_secs: default_timeout_secs(),
            demo_mode: false,
        }
    }
}

impl Config {
    /// Load config from the app directory
    ///
    /// The base URL and demo mode can be overridden via:
    /// 1. Settings file (exc demo on, or editing settings.json)
    /// 2. Environment variables EXCEPTIONAL_API_URL / EXCEPTIONAL_DEMO_MODE
    pub fn load(app_dir: &Path) -> Result<Self> {
        let settings_path = app_dir.join("settings.json");

        let raw: SettingsFile = if settings_path.exists() {
            let content = std::fs::read_to_string(&settings_path)?;
            serde_json::from_str(&content).unwrap_or_default()
        } else {
            SettingsFile::default()
        };

        let api_url = match std::env::var(API_URL_ENV).ok() {
            Some(url) if !url.trim().is_empty() => url,
            _ => raw.api_url,
        };

        let demo_mode = match std::env::var(DEMO_MODE_ENV).ok().as_deref() {
            Some("true" | "1" | "yes" | "TRUE" | "YES") => true,
            Some("false" | "0" | "no" | "FALSE" | "NO") => false,
            _ => raw.demo_mode,
        };

        Ok(Self {
            api_url,
            timeout_secs: raw.timeout_secs,
            demo_mode,
        })
    }

    /// Save config to the app directory
    /// Preserves settings that this client doesn't manage
    pub fn save(&self, app_dir: &Path) -> Result<()> {
        let settings_path = app_dir.join("settings.json");

        let mut settings = if settings_path.exists() {
            let content = std::fs::read_to_string(&settings_path)?;
            serde_json::from_str::<SettingsFile>(&content).unwrap_or_default()
        } else {
            SettingsFile::default()
        };

        settings.api_url = self.api_url.clone();
        settings.timeout_secs = self.timeout_secs;
        settings.demo_mode = self.demo_mode;

        std::fs::create_dir_all(app_dir)?;
        let content = serde_json::to_string_pretty(&settings)?;
        std::fs::write(&settings_path, content)?;
        Ok(())
    }

    /// Enable demo mode
    pub fn enable_demo_mode(&mut self) {
        self.demo_mode = true;
    }

    /// Disable demo mode
    pub fn disable_demo_mode(&mut self) {
        self.demo_mode = false;
    }
}
