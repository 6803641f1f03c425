//! Dashboard Error Types
//!
//! Errors raised while fetching and decoding a dashboard section. None of
//! them ever reaches the dashboard user: a failed section keeps whatever it
//! rendered last.

use thiserror::Error;

use crate::model::Section;

/// Dashboard error types
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DashboardError {
    /// Request never produced a response (DNS, connection, timeout)
    #[error("Network error: {0}")]
    Network(String),

    /// Endpoint answered with a non-success HTTP status
    #[error("{section} returned HTTP {status}")]
    Status { section: Section, status: u16 },

    /// Body was not JSON or did not match the section's shape
    #[error("Failed to parse {section} response: {message}")]
    Parse { section: Section, message: String },

    /// Envelope carried `success: false` (or no data)
    #[error("{section} reported failure: {}", message.as_deref().unwrap_or("no message"))]
    Unsuccessful {
        section: Section,
        message: Option<String>,
    },
}

impl DashboardError {
    /// Logical failures are skipped silently, everything else is logged
    pub fn is_logical(&self) -> bool {
        matches!(self, DashboardError::Unsuccessful { .. })
    }
}

/// Result type for dashboard operations
pub type DashboardResult<T> = Result<T, DashboardError>;
