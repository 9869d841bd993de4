//! Port definitions - abstractions over external systems

mod api;

pub use api::DayOffApi;
