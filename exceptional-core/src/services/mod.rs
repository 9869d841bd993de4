//! Service layer - business logic orchestration
//!
//! Services coordinate domain logic and port interactions. Each service
//! focuses on a specific use case or feature area.

mod auth;
mod day_off;

pub use auth::AuthService;
pub use day_off::DayOffService;
