//! Permission-gated actions.
//!
//! Each action checks readiness and capability membership, then delegates
//! to the platform. Action failures are returned to the caller to surface
//! as a transient notice; they never touch session state.

use lg_domain::error::{Error, Result};
use lg_domain::Capability;
use lg_platform::Message;

use crate::state::Session;

impl Session {
    /// Push a text message into the current chat.
    pub async fn send_text_message(&self, text: &str) -> Result<()> {
        self.require_capability(Capability::SendMessage)?;
        let sdk = self.sdk()?;
        sdk.send_messages(&[Message::text(text)]).await?;
        tracing::info!("message sent");
        Ok(())
    }

    /// Open the share target picker with a text message.
    pub async fn share_text(&self, text: &str) -> Result<()> {
        self.require_capability(Capability::ShareTargetPicker)?;
        let sdk = self.sdk()?;
        sdk.share_target_picker(&[Message::text(text)]).await?;
        tracing::info!("share target picker completed");
        Ok(())
    }

    /// Create a permanent link for the given page URL (the "copy link"
    /// action of the playground).
    pub async fn permanent_link(&self, url: &str) -> Result<String> {
        if !self.snapshot().ready {
            return Err(Error::NotReady("permanent link"));
        }
        let sdk = self.sdk()?;
        sdk.create_permanent_link(url).await
    }

    fn require_capability(&self, capability: Capability) -> Result<()> {
        let snap = self.snapshot();
        if !snap.ready {
            return Err(Error::NotReady("action before initialization"));
        }
        if !snap.capabilities.contains(&capability) {
            return Err(Error::Unsupported(capability.to_string()));
        }
        Ok(())
    }
}
