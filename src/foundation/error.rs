/// Convenience result type used across the crate.
pub type ScorecardResult<T> = Result<T, ScorecardError>;

/// Top-level error taxonomy used by generator APIs.
#[derive(thiserror::Error, Debug)]
pub enum ScorecardError {
    /// Construction-time inputs (canvas size, assets, font) are unusable.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// A per-call score record failed validation.
    #[error("invalid score record: {0}")]
    Score(String),

    /// A raster operation could not be carried out on the given image data.
    #[error("asset processing failure: {0}")]
    Asset(String),

    /// Text shaping, measuring or drawing failed.
    #[error("text rendering error: {0}")]
    Text(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ScorecardError {
    /// Build a [`ScorecardError::Config`] value.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Build a [`ScorecardError::Score`] value.
    pub fn score(msg: impl Into<String>) -> Self {
        Self::Score(msg.into())
    }

    /// Build a [`ScorecardError::Asset`] value.
    pub fn asset(msg: impl Into<String>) -> Self {
        Self::Asset(msg.into())
    }

    /// Build a [`ScorecardError::Text`] value.
    pub fn text(msg: impl Into<String>) -> Self {
        Self::Text(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
