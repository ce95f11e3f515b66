/// Result alias that carries the custom [`CarouselError`] type.
pub type Result<T> = std::result::Result<T, CarouselError>;

/// Common error type for the core crate.
///
/// Carousel navigation itself never fails; these variants cover the
/// surrounding tooling (configuration files, event scripts, IO).
#[derive(Debug, thiserror::Error)]
pub enum CarouselError {
    /// Free-form message surfaced to the command line user.
    #[error("{0}")]
    Message(String),
    /// A configuration value is outside of its accepted range.
    #[error("invalid config: {field}: {reason}")]
    InvalidConfig {
        field: &'static str,
        reason: String,
    },
    /// Wrapper around JSON (de)serialisation errors.
    #[error("{0}")]
    Json(#[from] serde_json::Error),
    /// Wrapper around standard IO errors.
    #[error("{0}")]
    Io(#[from] std::io::Error),
}

impl CarouselError {
    /// Creates a new error that simply wraps the provided message.
    pub fn msg<T: Into<String>>(msg: T) -> Self {
        Self::Message(msg.into())
    }

    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            field,
            reason: reason.into(),
        }
    }
}

impl From<&str> for CarouselError {
    fn from(value: &str) -> Self {
        Self::msg(value)
    }
}

impl From<String> for CarouselError {
    fn from(value: String) -> Self {
        Self::Message(value)
    }
}
