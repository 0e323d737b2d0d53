/// Result of every fallible encoder, probe and driver call.
pub type ForgeResult<T> = Result<T, ForgeError>;

/// Why a fixture could not be produced or read back.
#[derive(thiserror::Error, Debug)]
pub enum ForgeError {
    /// Invalid generator parameters or mesh data.
    #[error("validation error: {0}")]
    Validation(String),

    /// A container could not be produced from otherwise valid input.
    #[error("encode error: {0}")]
    Encode(String),

    /// A file read back for probing is structurally invalid.
    #[error("probe error: {0}")]
    Probe(String),

    /// A fixture options file is not valid JSON for [`crate::FixtureOpts`].
    #[error("serialization error: {0}")]
    Serde(String),

    /// Filesystem failure (with the path in its context) or a decoder error.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ForgeError {
    /// Parameters rejected before any bytes are produced.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Container assembly failed.
    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }

    /// Read-back found a structural defect.
    pub fn probe(msg: impl Into<String>) -> Self {
        Self::Probe(msg.into())
    }

    /// Options JSON could not be parsed.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
