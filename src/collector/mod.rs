//! Client side of the planner: gathers preferences, posts them to
//! `/plan_trip`, keeps the latest plan and renders it for a terminal.

use std::error::Error;
use std::fmt;

pub mod client;
pub mod preferences;
pub mod render;
pub mod session;

pub use client::PlannerClient;
pub use preferences::TripPreferences;
pub use render::{render_plan, RenderOptions};
pub use session::TripSession;

#[derive(Debug)]
pub enum CollectorError {
    /// Rejected before any network call.
    Validation(String),
    /// Unreachable backend, timeout, or non-2xx status.
    Network(String),
    /// The response arrived but could not be understood.
    Unexpected {
        message: String,
        raw_body: Option<String>,
    },
}

impl CollectorError {
    pub fn raw_body(&self) -> Option<&str> {
        match self {
            CollectorError::Unexpected { raw_body, .. } => raw_body.as_deref(),
            _ => None,
        }
    }
}

impl fmt::Display for CollectorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CollectorError::Validation(msg) => write!(f, "{}", msg),
            CollectorError::Network(detail) => write!(
                f,
                "Network error: Failed to connect to the backend. Is it running? Details: {}",
                detail
            ),
            CollectorError::Unexpected { message, .. } => {
                write!(f, "An unexpected error occurred: {}", message)
            }
        }
    }
}

impl Error for CollectorError {}

impl From<reqwest::Error> for CollectorError {
    fn from(err: reqwest::Error) -> Self {
        CollectorError::Network(err.to_string())
    }
}
