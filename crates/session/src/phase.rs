use serde::{Deserialize, Serialize};

/// Where the session is in its linear lifecycle.
///
/// Phases advance strictly left to right and stop at `Failed`; there is no
/// in-process retry or teardown path. Recovery is a fresh bootstrap, which
/// in a browser host means a page reload.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionPhase {
    #[default]
    Uninitialized,
    /// The SDK script is being fetched.
    Loading,
    /// The script arrived; the platform init call and the dependent
    /// context/profile/permission queries are in flight.
    Initializing,
    Ready,
    Failed,
}

impl std::fmt::Display for SessionPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Uninitialized => "uninitialized",
            Self::Loading => "loading",
            Self::Initializing => "initializing",
            Self::Ready => "ready",
            Self::Failed => "failed",
        };
        write!(f, "{name}")
    }
}
