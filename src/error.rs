use thiserror::Error;
use uuid::Uuid;

/// A single round trip to the backing store failed. Carries the store's own
/// message; never retried.
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct BackendError {
    pub message: String,
}

impl BackendError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl From<mongodb::error::Error> for BackendError {
    fn from(err: mongodb::error::Error) -> Self {
        Self::new(err.to_string())
    }
}

/// Unified error for every data-access operation. Callers branch on the
/// variant instead of inspecting side-channel slots.
#[derive(Debug, Error)]
pub enum DataError {
    #[error(transparent)]
    Backend(#[from] BackendError),

    /// A single-object read matched zero rows. This is an explicit contract:
    /// "not found" is always an error here, never a null result, regardless
    /// of how the backing store reports it.
    #[error("no record with id {id} in {collection}")]
    NotFound { collection: String, id: Uuid },

    /// A stored document did not map onto the entity type.
    #[error("failed to decode record: {message}")]
    Decode { message: String },
}

impl DataError {
    pub fn decode(err: impl std::fmt::Display) -> Self {
        Self::Decode {
            message: err.to_string(),
        }
    }

    pub fn not_found(collection: &str, id: Uuid) -> Self {
        Self::NotFound {
            collection: collection.to_string(),
            id,
        }
    }
}

/// A multi-step aggregation failed. Displays only the fixed human-readable
/// context; the failing step's detail stays available through `source()` and
/// is logged at the point of failure.
#[derive(Debug, Error)]
#[error("{context}")]
pub struct AggregateError {
    pub context: &'static str,
    #[source]
    pub source: DataError,
}

impl AggregateError {
    pub fn new(context: &'static str, source: DataError) -> Self {
        log::error!("{}: {}", context, source);
        Self { context, source }
    }
}
