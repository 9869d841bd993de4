//! Day-off lifecycle service
//!
//! Holds one view's request list and drives every user- or admin-initiated
//! action against the server. Local state changes only after the server
//! confirms an action; a failed call leaves the list exactly as it was.
//!
//! Every mutation of an existing request takes a per-id in-flight marker
//! for its duration, so a second action on the same request is rejected
//! instead of racing the first. The marker is released on success and
//! failure alike.

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use chrono::NaiveDate;
use tracing::{debug, info};

use crate::domain::quota;
use crate::domain::result::{Error, Result};
use crate::domain::{DayOffRequest, DayOffStatus, User};
use crate::ports::DayOffApi;

/// Day-off lifecycle service
pub struct DayOffService {
    api: Arc<dyn DayOffApi>,
    day_offs: Mutex<Vec<DayOffRequest>>,
    in_flight: Mutex<HashSet<String>>,
}

/// Releases the in-flight marker for its id when dropped, so an early
/// return or server failure can never leave a request permanently locked
struct ActionGuard<'a> {
    in_flight: &'a Mutex<HashSet<String>>,
    id: String,
}

impl Drop for ActionGuard<'_> {
    fn drop(&mut self) {
        if let Ok(mut in_flight) = self.in_flight.lock() {
            in_flight.remove(&self.id);
        }
    }
}

impl DayOffService {
    pub fn new(api: Arc<dyn DayOffApi>) -> Self {
        Self {
            api,
            day_offs: Mutex::new(Vec::new()),
            in_flight: Mutex::new(HashSet::new()),
        }
    }

    /// Replace local state with the server's view of my requests,
    /// in calendar order
    pub async fn load_mine(&self) -> Result<Vec<DayOffRequest>> {
        let mut list = self.api.list_day_offs().await?;
        list.sort_by_key(|d| d.date);
        *self.day_offs.lock().unwrap() = list.clone();
        debug!(count = list.len(), "loaded own day offs");
        Ok(list)
    }

    /// Replace local state with another user's requests (superuser only)
    pub async fn load_for_user(&self, user_id: &str) -> Result<Vec<DayOffRequest>> {
        let mut list = self.api.list_day_offs_for_user(user_id).await?;
        list.sort_by_key(|d| d.date);
        *self.day_offs.lock().unwrap() = list.clone();
        debug!(user_id, count = list.len(), "loaded day offs for user");
        Ok(list)
    }

    /// Snapshot of the currently loaded list
    pub fn day_offs(&self) -> Vec<DayOffRequest> {
        self.day_offs.lock().unwrap().clone()
    }

    /// Allowance left in the currently loaded list
    pub fn remaining(&self) -> u32 {
        quota::remaining(&self.day_offs.lock().unwrap(), quota::MAX_REQUESTS)
    }

    /// Whether an action on `id` is outstanding right now
    pub fn is_in_flight(&self, id: &str) -> bool {
        self.in_flight.lock().unwrap().contains(id)
    }

    /// Request `date` as an exceptional day off.
    ///
    /// The quota policy runs against the loaded list first, so an occupied
    /// date or exhausted allowance never reaches the network. The server
    /// re-checks on the call itself and its verdict overrides.
    pub async fn request_date(&self, date: NaiveDate) -> Result<DayOffRequest> {
        {
            let held = self.day_offs.lock().unwrap();
            quota::check_request(&held, date, quota::MAX_REQUESTS)?;
        }

        let created = self.api.create_day_off(date).await?;
        info!(id = %created.id, date = %created.date, "day off requested");

        let mut held = self.day_offs.lock().unwrap();
        held.push(created.clone());
        held.sort_by_key(|d| d.date);
        Ok(created)
    }

    /// Cancel (delete) a request. The server decides whether the caller
    /// may: owners cancel their pending requests, superusers remove
    /// approved ones.
    pub async fn cancel(&self, id: &str) -> Result<()> {
        let _guard = self.begin_action(id)?;
        self.api.cancel_day_off(id).await?;
        info!(id, "day off cancelled");
        self.day_offs.lock().unwrap().retain(|d| d.id != id);
        Ok(())
    }

    /// Approve a pending request (superuser only)
    pub async fn approve(&self, id: &str) -> Result<()> {
        let _guard = self.begin_action(id)?;
        self.api.approve_day_off(id).await?;
        info!(id, "day off approved");
        self.set_local_status(id, DayOffStatus::Approved);
        Ok(())
    }

    /// Refuse a pending request (superuser only)
    pub async fn refuse(&self, id: &str) -> Result<()> {
        let _guard = self.begin_action(id)?;
        self.api.refuse_day_off(id).await?;
        info!(id, "day off refused");
        self.set_local_status(id, DayOffStatus::Refused);
        Ok(())
    }

    /// User directory for the review dashboard (superuser only)
    pub async fn users(&self) -> Result<Vec<User>> {
        self.api.list_users().await
    }

    fn begin_action(&self, id: &str) -> Result<ActionGuard<'_>> {
        let mut in_flight = self.in_flight.lock().unwrap();
        if !in_flight.insert(id.to_string()) {
            return Err(Error::ActionInFlight(id.to_string()));
        }
        Ok(ActionGuard {
            in_flight: &self.in_flight,
            id: id.to_string(),
        })
    }

    fn set_local_status(&self, id: &str, status: DayOffStatus) {
        let mut held = self.day_offs.lock().unwrap();
        if let Some(entry) = held.iter_mut().find(|d| d.id == id) {
            entry.status = status;
        }
    }
}
