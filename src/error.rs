use thiserror::Error;

/// Failures while retrieving the proposal document or the annex.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("source {location} unavailable: {reason}")]
    Unavailable { location: String, reason: String },

    #[error("source {location} is not a valid proposal document")]
    InvalidDocument {
        location: String,
        #[source]
        source: serde_json::Error,
    },
}

impl SourceError {
    pub fn unavailable(location: impl Into<String>, reason: impl ToString) -> Self {
        SourceError::Unavailable {
            location: location.into(),
            reason: reason.to_string(),
        }
    }

    pub fn location(&self) -> &str {
        match self {
            SourceError::Unavailable { location, .. } => location,
            SourceError::InvalidDocument { location, .. } => location,
        }
    }
}
