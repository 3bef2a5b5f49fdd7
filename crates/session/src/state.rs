//! The observable state surface.
//!
//! One snapshot aggregates everything the presentation layer renders. The
//! [`Session`] owns the only `watch::Sender`; the bootstrap and the explicit
//! login / logout / version-change operations are the only writers.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use tokio::sync::watch;

use lg_domain::config::PlaygroundConfig;
use lg_domain::error::Result;
use lg_domain::{
    CapabilitySet, Context, IdentityTokens, Os, Profile, Scope, SdkVersionSelection,
};
use lg_platform::{PlatformSdk, SdkHandle};

use crate::capability::{resolve, CapabilityInputs, ProbeResults};
use crate::host::HostPage;
use crate::phase::SessionPhase;

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Snapshot
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Version and language strings the SDK reports about itself and its host.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SdkInfo {
    pub version: Option<String>,
    pub app_language: Option<String>,
    pub language: Option<String>,
    /// Host client version; absent in an external browser.
    pub line_version: Option<String>,
}

/// Everything known about the session at one point in time.
///
/// Invariant: `profile` and `tokens` are populated if and only if
/// `logged_in` is true, and they always clear together.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Snapshot {
    pub phase: SessionPhase,
    pub sdk_loaded: bool,
    pub ready: bool,
    pub logged_in: bool,
    pub selection: Option<SdkVersionSelection>,
    pub profile: Option<Profile>,
    pub tokens: IdentityTokens,
    pub context: Option<Context>,
    pub in_client: bool,
    pub os: Option<Os>,
    pub sdk_info: SdkInfo,
    /// Kept so capabilities can be recomputed when login state changes.
    pub probes: ProbeResults,
    /// Explicit grant query result; `None` when the build lacks the API.
    pub granted_scopes: Option<Vec<Scope>>,
    pub capabilities: CapabilitySet,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Session
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// The single owned session of the playground.
pub struct Session {
    pub(crate) config: PlaygroundConfig,
    pub(crate) host: Arc<dyn HostPage>,
    pub(crate) sdk: Mutex<SdkHandle>,
    pub(crate) tx: watch::Sender<Snapshot>,
}

impl Session {
    pub fn new(config: PlaygroundConfig, host: Arc<dyn HostPage>) -> Self {
        let (tx, _) = watch::channel(Snapshot::default());
        Self {
            config,
            host,
            sdk: Mutex::new(SdkHandle::Uninitialized),
            tx,
        }
    }

    pub fn config(&self) -> &PlaygroundConfig {
        &self.config
    }

    /// Observe every published state change.
    pub fn subscribe(&self) -> watch::Receiver<Snapshot> {
        self.tx.subscribe()
    }

    /// The current state.
    pub fn snapshot(&self) -> Snapshot {
        self.tx.borrow().clone()
    }

    pub(crate) fn sdk(&self) -> Result<Arc<dyn PlatformSdk>> {
        self.sdk.lock().get().map(Arc::clone)
    }

    // ── Explicit operations ────────────────────────────────────────

    /// Start the platform login flow, redirecting back to the current page.
    /// A warning-level no-op until the session is ready.
    pub async fn login(&self) -> Result<()> {
        if !self.snapshot().ready {
            tracing::warn!("login requested before the session is ready; ignoring");
            return Ok(());
        }
        let sdk = self.sdk()?;
        sdk.login(&self.host.current_url()).await
    }

    /// Log out and clear the local identity state.
    ///
    /// The local clear is best-effort with respect to the platform call: a
    /// platform failure is logged and the local state clears anyway, and
    /// profile and tokens always clear together in a single publish.
    pub async fn logout(&self) -> Result<()> {
        if !self.snapshot().ready {
            tracing::warn!("logout requested before the session is ready; ignoring");
            return Ok(());
        }
        let sdk = self.sdk()?;
        if let Err(e) = sdk.logout().await {
            tracing::warn!(error = %e, "platform logout failed; clearing local state anyway");
        }

        let excluded = self.config.capabilities.fallback_excluded_context_types.clone();
        self.tx.send_modify(|snap| {
            snap.logged_in = false;
            snap.profile = None;
            snap.tokens.clear();
            snap.granted_scopes = None;
            snap.capabilities = resolve(&CapabilityInputs {
                logged_in: false,
                probes: snap.probes,
                scope_hint: snap
                    .context
                    .as_ref()
                    .is_some_and(Context::hints_message_write),
                granted: None,
                context_type: snap.context.as_ref().map(|c| c.context_type),
                excluded: &excluded,
            });
        });
        tracing::info!("logged out");
        Ok(())
    }

    /// Switch to another SDK build.
    ///
    /// Persists the selection to the query string, waits for it to settle,
    /// then asks the host for a full reload. The SDK binds globally at
    /// script-load time, so there is no hot-swap path.
    pub async fn set_sdk_version(&self, version: &str, patch: bool) -> Result<()> {
        let selection = SdkVersionSelection::parse(version, patch).inspect_err(|e| {
            tracing::error!(version, error = %e, "rejecting SDK version change");
        })?;

        let query = self.config.selection_query(&selection);
        self.host.persist_query(&query);
        self.tx.send_modify(|snap| snap.selection = Some(selection.clone()));

        tokio::time::sleep(Duration::from_millis(self.config.reload_settle_ms)).await;
        tracing::info!(version = %selection, "SDK version changed; requesting reload");
        self.host.reload();
        Ok(())
    }

    /// Whether the user holds `scope`. The explicit grant list, when the
    /// build supports the query, takes precedence over the context's
    /// advertised scopes.
    pub fn has_permission(&self, scope: &Scope) -> bool {
        let snap = self.snapshot();
        if !snap.ready {
            tracing::warn!(scope = %scope, "permission check before the session is ready");
            return false;
        }
        match &snap.granted_scopes {
            Some(granted) => granted.contains(scope),
            None => snap
                .context
                .as_ref()
                .is_some_and(|c| c.scope.contains(scope)),
        }
    }
}
