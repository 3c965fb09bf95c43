//! Event aggregation error types.

use crate::store::StoreError;
use thiserror::Error;

/// Failure of an upstream event source
#[derive(Debug, Error)]
pub enum ProviderError {
    /// Transport failure (connection refused, timeout, ...)
    #[error("HTTP error: {0}")]
    Http(String),

    /// Non-success status code
    #[error("Unexpected status {status}: {body}")]
    Status { status: u16, body: String },

    /// Response body did not have the expected shape
    #[error("Decode error: {0}")]
    Decode(String),

    /// Source not configured or otherwise unavailable
    #[error("Source unavailable: {0}")]
    Unavailable(String),
}

/// Result type for provider calls
pub type ProviderResult<T> = Result<T, ProviderError>;

/// Static schedule errors, only raised in strict mode
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScheduleError {
    #[error("Unparsable date {value:?} for {band}")]
    UnparsableDate { band: String, value: String },
}

/// Errors from aggregator mutations
///
/// Reads never fail; see [`crate::events::UnifiedEventAggregator::load_all`].
#[derive(Debug, Error)]
pub enum EventError {
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Tournament entry not found: {0}")]
    EntryNotFound(String),

    #[error("Invalid tournament entry: {0}")]
    InvalidEntry(String),
}

/// Result type for aggregator mutations
pub type EventResult<T> = Result<T, EventError>;
