//! Built-in tools shipped with every Neospan server.

pub mod health;

pub use health::{HealthResponse, HealthTools};
