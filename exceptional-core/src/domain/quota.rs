//! Quota policy for exceptional day-off requests
//!
//! Pure functions over a list of requests; no I/O. The policy runs
//! client-side to block doomed requests before they reach the network.
//! The server applies the same rules and its verdict always wins.

use chrono::NaiveDate;

use crate::domain::day_off::{DayOffRequest, DayOffStatus};
use crate::domain::result::{Error, Result};

/// Maximum number of non-refused requests a user may hold at once
pub const MAX_REQUESTS: u32 = 9;

/// Remaining allowance: `max` minus the pending and approved requests.
/// Refused requests never count; deleted ones are gone from the list.
/// Never goes below zero, even against an over-quota server list.
pub fn remaining(day_offs: &[DayOffRequest], max: u32) -> u32 {
    let used = day_offs
        .iter()
        .filter(|d| d.status.counts_against_quota())
        .count() as u32;
    max.saturating_sub(used)
}

/// Check whether a new request for `date` would be admissible.
///
/// An occupied date is reported before the allowance is consulted, so the
/// user learns the more specific problem first.
pub fn check_request(day_offs: &[DayOffRequest], date: NaiveDate, max: u32) -> Result<()> {
    if let Some(existing) = day_offs
        .iter()
        .find(|d| d.date == date && d.status != DayOffStatus::Refused)
    {
        return Err(Error::conflict(format!(
            "a {} request already exists for {}",
            existing.status, date
        )));
    }
    if remaining(day_offs, max) == 0 {
        return Err(Error::QuotaExceeded { max });
    }
    Ok(())
}

/// Convenience wrapper over [`check_request`] for callers that only need
/// a yes/no answer, e.g. to grey out a calendar day
pub fn can_request(day_offs: &[DayOffRequest], date: NaiveDate, max: u32) -> bool {
    check_request(day_offs, date, max).is_ok()
}
