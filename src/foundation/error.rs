/// Convenience result type used across speedramp.
pub type RampResult<T> = Result<T, RampError>;

/// Top-level error taxonomy used by planning and pipeline APIs.
#[derive(thiserror::Error, Debug)]
pub enum RampError {
    /// Rejected request parameters: segment count, speed bounds, profile tag, encoder settings.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// Media metadata that cannot form even a single segment.
    #[error("degenerate input: {0}")]
    DegenerateInput(String),

    /// Failures while reading media metadata.
    #[error("probe error: {0}")]
    Probe(String),

    /// Failures while resolving a locator into a local media file.
    #[error("source error: {0}")]
    Source(String),

    /// Failures while executing a filter graph.
    #[error("execution error: {0}")]
    Execution(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl RampError {
    /// Build a [`RampError::InvalidConfiguration`] value.
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfiguration(msg.into())
    }

    /// Build a [`RampError::DegenerateInput`] value.
    pub fn degenerate(msg: impl Into<String>) -> Self {
        Self::DegenerateInput(msg.into())
    }

    /// Build a [`RampError::Probe`] value.
    pub fn probe(msg: impl Into<String>) -> Self {
        Self::Probe(msg.into())
    }

    /// Build a [`RampError::Source`] value.
    pub fn source(msg: impl Into<String>) -> Self {
        Self::Source(msg.into())
    }

    /// Build a [`RampError::Execution`] value.
    pub fn execution(msg: impl Into<String>) -> Self {
        Self::Execution(msg.into())
    }

    /// Build a [`RampError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }

    /// True for errors raised by request validation before any work happens.
    pub fn is_invalid_configuration(&self) -> bool {
        matches!(self, Self::InvalidConfiguration(_))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
