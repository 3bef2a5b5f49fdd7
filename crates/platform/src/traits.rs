use std::sync::Arc;

use serde::{Deserialize, Serialize};

use lg_domain::error::{Error, Result};
use lg_domain::{Context, DecodedIdToken, Os, Profile, Scope};

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Messages
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// A message payload accepted by `sendMessages` / `shareTargetPicker`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Message {
    Text { text: String },
}

impl Message {
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text { text: text.into() }
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Core provider trait
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// The platform SDK surface the playground consumes.
///
/// Implementations adapt a concrete SDK build (or a stub, in tests and the
/// demo CLI) to these calls. Every call can fail: the vendor script may be
/// an older build that lacks the API, or the host client may refuse it.
#[async_trait::async_trait]
pub trait PlatformSdk: Send + Sync {
    /// Initialize the SDK against a target app ID. Must complete before any
    /// other call; the session stays not-ready if it fails.
    async fn init(&self, liff_id: &str) -> Result<()>;

    /// Context of the embedding surface. `Ok(None)` in surfaces that carry
    /// no context (some external-browser launches).
    async fn get_context(&self) -> Result<Option<Context>>;
    async fn is_in_client(&self) -> Result<bool>;
    async fn get_os(&self) -> Result<Os>;
    async fn is_logged_in(&self) -> Result<bool>;

    /// Start the platform login flow, returning to `redirect_uri` after.
    async fn login(&self, redirect_uri: &str) -> Result<()>;
    async fn logout(&self) -> Result<()>;

    async fn get_profile(&self) -> Result<Profile>;
    async fn get_id_token(&self) -> Result<Option<String>>;
    async fn get_access_token(&self) -> Result<Option<String>>;
    async fn get_decoded_id_token(&self) -> Result<Option<DecodedIdToken>>;

    /// Static feature probe. Callers must treat an `Err` as "unavailable",
    /// never propagate it — older builds throw on unknown API names.
    async fn is_api_available(&self, api: &str) -> Result<bool>;

    async fn send_messages(&self, messages: &[Message]) -> Result<()>;
    async fn share_target_picker(&self, messages: &[Message]) -> Result<()>;
    async fn create_permanent_link(&self, url: &str) -> Result<String>;

    /// Explicit granted-permission query. `Ok(None)` means this SDK build
    /// does not support the query at all, which selects the capability
    /// resolver's fallback heuristic.
    async fn get_granted_all(&self) -> Result<Option<Vec<Scope>>>;

    async fn get_version(&self) -> Result<String>;
    async fn get_app_language(&self) -> Result<String>;
    async fn get_language(&self) -> Result<String>;
    /// Host client version; absent when running in an external browser.
    async fn get_line_version(&self) -> Result<Option<String>>;
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Handle
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// The provider slot the session owns: empty until the script loader has
/// produced a working SDK, then ready with a shared handle.
#[derive(Clone, Default)]
pub enum SdkHandle {
    #[default]
    Uninitialized,
    Ready(Arc<dyn PlatformSdk>),
}

impl SdkHandle {
    pub fn ready(sdk: Arc<dyn PlatformSdk>) -> Self {
        Self::Ready(sdk)
    }

    /// Borrow the provider, failing when no SDK has been attached yet.
    pub fn get(&self) -> Result<&Arc<dyn PlatformSdk>> {
        match self {
            Self::Ready(sdk) => Ok(sdk),
            Self::Uninitialized => Err(Error::NotReady("no SDK attached")),
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready(_))
    }
}

impl std::fmt::Debug for SdkHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Uninitialized => write!(f, "SdkHandle::Uninitialized"),
            Self::Ready(_) => write!(f, "SdkHandle::Ready(..)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_serializes_tagged() {
        let json = serde_json::to_value(Message::text("hello")).unwrap();
        assert_eq!(json["type"], "text");
        assert_eq!(json["text"], "hello");
    }

    #[test]
    fn empty_handle_reports_not_ready() {
        let handle = SdkHandle::default();
        assert!(!handle.is_ready());
        assert!(matches!(handle.get(), Err(Error::NotReady(_))));
    }
}
