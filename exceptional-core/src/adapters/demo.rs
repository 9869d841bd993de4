//! Demo day-off server for testing and onboarding
//!
//! An in-memory stand-in for the real backend. Any password logs in, an
//! email containing "admin" gets the superuser role, and the server-side
//! rules (unique dates, quota, pending-only decisions, role checks) are
//! enforced so the rest of the client sees honest behavior.
//!
//! State lives for the process only; nothing is persisted.

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{NaiveDate, TimeZone, Utc};

use crate::domain::result::{Error, Result};
use crate::domain::{quota, AuthResponse, DayOffRequest, DayOffStatus, User};
use crate::ports::DayOffApi;
use crate::session::SharedSession;

/// In-memory day-off server
///
/// Reads the caller identity from the shared session on every call, the
/// same way the HTTP adapter reads the token. A restored session without
/// an identity cannot be resolved here, so those calls ask for a fresh
/// login.
pub struct DemoApi {
    session: SharedSession,
    state: Mutex<DemoState>,
}

struct DemoState {
    users: Vec<User>,
    day_offs: Vec<DayOffRequest>,
    next_id: u64,
}

impl DemoState {
    fn mint_id(&mut self) -> String {
        let id = self.next_id.to_string();
        self.next_id += 1;
        id
    }
}

impl DemoApi {
    /// Create a demo server with users but no day-off requests
    pub fn new(session: SharedSession) -> Self {
        Self {
            session,
            state: Mutex::new(DemoState {
                users: seed_users(),
                day_offs: Vec::new(),
                next_id: 100,
            }),
        }
    }

    /// Create a demo server pre-loaded with sample requests
    pub fn seeded(session: SharedSession) -> Self {
        let api = Self::new(session);
        api.state.lock().unwrap().day_offs = seed_day_offs();
        api
    }

    fn current_user(&self) -> Result<User> {
        self.session
            .user()
            .ok_or_else(|| Error::auth("not logged in"))
    }

    fn require_superuser(&self) -> Result<User> {
        let me = self.current_user()?;
        if !me.super_user {
            return Err(Error::authorization("superuser role required"));
        }
        Ok(me)
    }

    fn decide(&self, id: &str, status: DayOffStatus) -> Result<()> {
        self.require_superuser()?;
        let mut state = self.state.lock().unwrap();
        let entry = state
            .day_offs
            .iter_mut()
            .find(|d| d.id == id)
            .ok_or_else(|| Error::not_found(format!("no day-off request with id {}", id)))?;
        if entry.status != DayOffStatus::Pending {
            return Err(Error::conflict(format!(
                "cannot decide a {} request",
                entry.status
            )));
        }
        entry.status = status;
        Ok(())
    }
}

#[async_trait]
impl DayOffApi for DemoApi {
    async fn login(&self, email: &str, _password: &str) -> Result<AuthResponse> {
        if email.trim().is_empty() {
            return Err(Error::validation("email is required"));
        }

        let mut state = self.state.lock().unwrap();
        let user = match state.users.iter().find(|u| u.email == email) {
            Some(user) => user.clone(),
            None => {
                let mut user = User::new(state.mint_id(), email, display_name(email));
                user.super_user = email.contains("admin");
                state.users.push(user.clone());
                user
            }
        };

        Ok(AuthResponse {
            token: "demo-token".to_string(),
            user,
        })
    }

    async fn reset_password(&self, email: &str) -> Result<()> {
        if !email.contains('@') {
            return Err(Error::validation("invalid email address"));
        }
        Ok(())
    }

    async fn list_day_offs(&self) -> Result<Vec<DayOffRequest>> {
        let me = self.current_user()?;
        let state = self.state.lock().unwrap();
        Ok(state
            .day_offs
            .iter()
            .filter(|d| d.user_id == me.id)
            .cloned()
            .collect())
    }

    async fn list_day_offs_for_user(&self, user_id: &str) -> Result<Vec<DayOffRequest>> {
        self.require_superuser()?;
        let state = self.state.lock().unwrap();
        if !state.users.iter().any(|u| u.id == user_id) {
            return Err(Error::not_found(format!("no user with id {}", user_id)));
        }
        Ok(state
            .day_offs
            .iter()
            .filter(|d| d.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn create_day_off(&self, date: NaiveDate) -> Result<DayOffRequest> {
        let me = self.current_user()?;
        let mut state = self.state.lock().unwrap();

        let mine: Vec<DayOffRequest> = state
            .day_offs
            .iter()
            .filter(|d| d.user_id == me.id)
            .cloned()
            .collect();
        quota::check_request(&mine, date, quota::MAX_REQUESTS)?;

        let request = DayOffRequest::new(state.mint_id(), me.id.clone(), date);
        state.day_offs.push(request.clone());
        Ok(request)
    }

    async fn cancel_day_off(&self, id: &str) -> Result<()> {
        let me = self.current_user()?;
        let mut state = self.state.lock().unwrap();
        let pos = state
            .day_offs
            .iter()
            .position(|d| d.id == id)
            .ok_or_else(|| Error::not_found(format!("no day-off request with id {}", id)))?;

        match state.day_offs[pos].status {
            DayOffStatus::Pending => {
                if state.day_offs[pos].user_id != me.id {
                    return Err(Error::authorization(
                        "only the owner may cancel a pending request",
                    ));
                }
            }
            DayOffStatus::Approved => {
                if !me.super_user {
                    return Err(Error::authorization(
                        "only a superuser may remove an approved request",
                    ));
                }
            }
            DayOffStatus::Refused => {
                return Err(Error::conflict("refused requests cannot be cancelled"));
            }
        }

        state.day_offs.remove(pos);
        Ok(())
    }

    async fn approve_day_off(&self, id: &str) -> Result<()> {
        self.decide(id, DayOffStatus::Approved)
    }

    async fn refuse_day_off(&self, id: &str) -> Result<()> {
        self.decide(id, DayOffStatus::Refused)
    }

    async fn list_users(&self) -> Result<Vec<User>> {
        self.require_superuser()?;
        let state = self.state.lock().unwrap();
        Ok(state.users.clone())
    }
}

fn seed_users() -> Vec<User> {
    let mut admin = User::new("2", "admin@example.com", "Jane Doe");
    admin.super_user = true;
    vec![User::new("1", "dev@example.com", "John Doe"), admin]
}

fn seed_day_offs() -> Vec<DayOffRequest> {
    let created = Utc.with_ymd_and_hms(2024, 4, 1, 10, 0, 0).unwrap();
    vec![
        DayOffRequest {
            id: "1".to_string(),
            user_id: "1".to_string(),
            date: NaiveDate::from_ymd_opt(2024, 4, 15).unwrap(),
            status: DayOffStatus::Approved,
            created_at: created,
        },
        DayOffRequest {
            id: "2".to_string(),
            user_id: "1".to_string(),
            date: NaiveDate::from_ymd_opt(2024, 4, 16).unwrap(),
            status: DayOffStatus::Pending,
            created_at: created,
        },
    ]
}

/// Derive a display name from an email local part, e.g.
/// "jane.smith@x.co" becomes "Jane Smith"
fn display_name(email: &str) -> String {
    let local = email.split('@').next().unwrap_or(email);
    let words: Vec<String> = local
        .split(['.', '_', '-'])
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect();
    if words.is_empty() {
        "Demo User".to_string()
    } else {
        words.join(" ")
    }
}
