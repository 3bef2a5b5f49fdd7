/// Shared error type used across all liffground crates.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("IO: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP: {0}")]
    Http(String),

    #[error("invalid SDK version {0:?}: expected a bare major (\"2\") or a dotted triple (\"2.5.1\")")]
    Version(String),

    #[error("config: {0}")]
    Config(String),

    #[error("platform {call}: {message}")]
    Platform { call: String, message: String },

    #[error("session not ready: {0}")]
    NotReady(&'static str),

    #[error("capability not granted: {0}")]
    Unsupported(String),
}

impl Error {
    /// Shorthand for a failed platform SDK call.
    pub fn platform(call: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Platform {
            call: call.into(),
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
