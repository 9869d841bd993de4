//! Core domain entities
//!
//! All business entities are defined here. These are pure data structures
//! plus the quota policy - no I/O or external dependencies.

mod day_off;
pub mod quota;
pub mod result;
mod user;

pub use day_off::{DayOffRequest, DayOffStatus};
pub use user::{AuthResponse, User};
