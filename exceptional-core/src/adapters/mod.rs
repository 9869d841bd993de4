//! Adapter implementations
//!
//! Adapters implement the DayOffApi port with concrete technologies:
//! - reqwest HTTP client for the real day-off server
//! - In-memory demo server for demo mode and integration tests

pub mod demo;
pub mod http;

#[cfg(test)]
pub mod http_mock;
