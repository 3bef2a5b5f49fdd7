//! The bootstrap sequence.
//!
//! load → init → context/client/os → probes → (if logged in) profile,
//! tokens, granted permissions → capability resolution. Every step depends
//! on state established by the previous one, so everything is awaited
//! sequentially. Any failure lands the session in `Failed` with a logged
//! error and no automatic retry; recovery is a fresh bootstrap.

use std::sync::Arc;

use lg_domain::error::Result;
use lg_domain::{Context, IdentityTokens, SdkVersionSelection};
use lg_platform::{PlatformSdk, ScriptSource, SdkHandle};

use crate::capability::{resolve, CapabilityInputs, ProbeResults};
use crate::phase::SessionPhase;
use crate::state::{SdkInfo, Session};

impl Session {
    /// Run the full lifecycle against the given script source and provider.
    ///
    /// A malformed configured version is rejected up front with no state
    /// change at all, matching the loader contract.
    pub async fn bootstrap(&self, source: &dyn ScriptSource, sdk: Arc<dyn PlatformSdk>) {
        let selection =
            match SdkVersionSelection::parse(&self.config.sdk.version, self.config.sdk.patch) {
                Ok(selection) => selection,
                Err(e) => {
                    tracing::error!(
                        version = %self.config.sdk.version,
                        error = %e,
                        "invalid SDK version format; nothing loaded"
                    );
                    return;
                }
            };

        self.tx.send_modify(|snap| {
            snap.phase = SessionPhase::Loading;
            snap.selection = Some(selection.clone());
        });

        if let Err(e) = source.fetch(&selection).await {
            tracing::error!(version = %selection.version, error = %e, "SDK script load failed");
            self.tx.send_modify(|snap| snap.phase = SessionPhase::Failed);
            return;
        }

        *self.sdk.lock() = SdkHandle::ready(Arc::clone(&sdk));
        self.tx.send_modify(|snap| {
            snap.sdk_loaded = true;
            snap.phase = SessionPhase::Initializing;
        });

        if let Err(e) = self.initialize(sdk).await {
            tracing::error!(error = %e, "platform initialization failed");
            self.tx.send_modify(|snap| {
                snap.phase = SessionPhase::Failed;
                snap.ready = false;
            });
        }
    }

    async fn initialize(&self, sdk: Arc<dyn PlatformSdk>) -> Result<()> {
        sdk.init(&self.config.liff_id).await?;

        let context = sdk.get_context().await?;
        let in_client = sdk.is_in_client().await?;
        let os = sdk.get_os().await?;
        let sdk_info = SdkInfo {
            version: sdk.get_version().await.ok(),
            app_language: sdk.get_app_language().await.ok(),
            language: sdk.get_language().await.ok(),
            line_version: sdk.get_line_version().await.ok().flatten(),
        };

        let probes = ProbeResults {
            share_target_picker: probe(sdk.as_ref(), "shareTargetPicker").await,
            scan_code_v2: probe(sdk.as_ref(), "scanCodeV2").await,
        };
        let scope_hint = context.as_ref().is_some_and(Context::hints_message_write);

        let logged_in = sdk.is_logged_in().await?;

        let mut profile = None;
        let mut tokens = IdentityTokens::default();
        let mut granted = None;
        if logged_in {
            profile = Some(sdk.get_profile().await?);
            tokens.id_token = sdk.get_id_token().await?;
            tokens.access_token = sdk.get_access_token().await?;
            tokens.decoded = sdk.get_decoded_id_token().await?;

            granted = match sdk.get_granted_all().await {
                Ok(result) => result,
                Err(e) => {
                    // Older builds throw instead of answering; same as "no
                    // result" for resolution purposes.
                    tracing::warn!(error = %e, "granted-permission query unavailable");
                    None
                }
            };
        }

        let capabilities = resolve(&CapabilityInputs {
            logged_in,
            probes,
            scope_hint,
            granted: granted.as_deref(),
            context_type: context.as_ref().map(|c| c.context_type),
            excluded: &self.config.capabilities.fallback_excluded_context_types,
        });

        tracing::info!(
            logged_in,
            in_client,
            capabilities = ?capabilities,
            "session ready"
        );

        self.tx.send_modify(|snap| {
            snap.phase = SessionPhase::Ready;
            snap.ready = true;
            snap.logged_in = logged_in;
            snap.context = context;
            snap.in_client = in_client;
            snap.os = Some(os);
            snap.sdk_info = sdk_info;
            snap.probes = probes;
            snap.profile = profile;
            snap.tokens = tokens;
            snap.granted_scopes = granted;
            snap.capabilities = capabilities;
        });

        Ok(())
    }
}

/// Wrapped feature probe: an unsupported or throwing probe reads as `false`
/// and never propagates.
async fn probe(sdk: &dyn PlatformSdk, api: &str) -> bool {
    match sdk.is_api_available(api).await {
        Ok(available) => available,
        Err(e) => {
            tracing::debug!(api, error = %e, "feature probe failed; treating as unavailable");
            false
        }
    }
}
