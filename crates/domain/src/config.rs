//! Playground configuration.
//!
//! All user-facing knobs arrive through the URL query string (`version`,
//! `patch`, `liffId`, `vconsole`); everything else is defaulted here. The
//! query string is also where a changed SDK selection is persisted before
//! the forced reload, so the new page picks it up.

use serde::{Deserialize, Serialize};

use crate::context::ContextType;
use crate::version::SdkVersionSelection;

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Top-level config
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaygroundConfig {
    #[serde(default)]
    pub sdk: SdkConfig,
    /// Target app ID passed to the platform's init call. Resolved from the
    /// `liffId` query parameter, falling back to the `LINE_LIFF_ID` env var.
    #[serde(default = "d_liff_id")]
    pub liff_id: String,
    /// Gates the on-page debug console overlay.
    #[serde(default)]
    pub vconsole: bool,
    #[serde(default)]
    pub cdn: CdnConfig,
    #[serde(default)]
    pub capabilities: CapabilityRules,
    /// Delay between persisting a new SDK selection to the query string and
    /// forcing the reload, so the persisted value settles first.
    #[serde(default = "d_200")]
    pub reload_settle_ms: u64,
}

impl Default for PlaygroundConfig {
    fn default() -> Self {
        Self {
            sdk: SdkConfig::default(),
            liff_id: d_liff_id(),
            vconsole: false,
            cdn: CdnConfig::default(),
            capabilities: CapabilityRules::default(),
            reload_settle_ms: 200,
        }
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// SDK selection
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Raw SDK selectors as they appear in the query string. Validation into
/// an [`SdkVersionSelection`] happens at load time, not here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SdkConfig {
    #[serde(default = "d_version")]
    pub version: String,
    #[serde(default = "d_true")]
    pub patch: bool,
}

impl Default for SdkConfig {
    fn default() -> Self {
        Self {
            version: d_version(),
            patch: true,
        }
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// CDN hosts
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CdnConfig {
    /// The platform's own CDN.
    #[serde(default = "d_primary_host")]
    pub primary_host: String,
    /// Community mirror carrying patched SDK builds.
    #[serde(default = "d_patch_host")]
    pub patch_host: String,
}

impl Default for CdnConfig {
    fn default() -> Self {
        Self {
            primary_host: d_primary_host(),
            patch_host: d_patch_host(),
        }
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Capability resolution rules
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Tunables for the capability resolver's fallback heuristic.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CapabilityRules {
    /// Context types that never get the send-message fallback when the
    /// explicit granted-permission query is unavailable. Inferred from
    /// observed platform behavior, not a documented contract, hence
    /// configuration rather than code.
    #[serde(default = "d_excluded_types")]
    pub fallback_excluded_context_types: Vec<ContextType>,
}

impl Default for CapabilityRules {
    fn default() -> Self {
        Self {
            fallback_excluded_context_types: d_excluded_types(),
        }
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Query string resolution
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

impl PlaygroundConfig {
    /// Resolve configuration from a URL query string.
    ///
    /// Recognized keys: `version`, `patch`, `liffId`, `vconsole`. Unknown
    /// keys are ignored; malformed booleans keep their defaults. A leading
    /// `?` is tolerated.
    pub fn from_query(query: &str) -> Self {
        let mut config = Self::default();
        let query = query.strip_prefix('?').unwrap_or(query);

        for (key, value) in url::form_urlencoded::parse(query.as_bytes()) {
            match key.as_ref() {
                "version" => config.sdk.version = value.into_owned(),
                "patch" => {
                    if let Some(b) = parse_bool(&value) {
                        config.sdk.patch = b;
                    }
                }
                "liffId" => config.liff_id = value.into_owned(),
                "vconsole" => {
                    if let Some(b) = parse_bool(&value) {
                        config.vconsole = b;
                    }
                }
                _ => {}
            }
        }

        config
    }

    /// Serialize an SDK selection back into the query string shape the
    /// playground reads on the next load.
    pub fn selection_query(&self, selection: &SdkVersionSelection) -> String {
        let mut serializer = url::form_urlencoded::Serializer::new(String::new());
        serializer
            .append_pair("version", &selection.version)
            .append_pair("patch", if selection.patch { "true" } else { "false" });
        if !self.liff_id.is_empty() {
            serializer.append_pair("liffId", &self.liff_id);
        }
        if self.vconsole {
            serializer.append_pair("vconsole", "true");
        }
        serializer.finish()
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value {
        "true" | "1" => Some(true),
        "false" | "0" => Some(false),
        _ => None,
    }
}

// ── serde default helpers ───────────────────────────────────────────

fn d_version() -> String {
    "2".into()
}
fn d_true() -> bool {
    true
}
fn d_200() -> u64 {
    200
}
fn d_liff_id() -> String {
    std::env::var("LINE_LIFF_ID").unwrap_or_default()
}
fn d_primary_host() -> String {
    "https://static.line-scdn.net".into()
}
fn d_patch_host() -> String {
    "https://cdn.jsdelivr.net/gh/iamprompt/liff-sdk@latest".into()
}
fn d_excluded_types() -> Vec<ContextType> {
    vec![ContextType::None, ContextType::External]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_playground() {
        let config = PlaygroundConfig::default();
        assert_eq!(config.sdk.version, "2");
        assert!(config.sdk.patch);
        assert!(!config.vconsole);
        assert_eq!(config.reload_settle_ms, 200);
        assert_eq!(
            config.capabilities.fallback_excluded_context_types,
            vec![ContextType::None, ContextType::External]
        );
    }

    #[test]
    fn query_overrides_defaults() {
        let config =
            PlaygroundConfig::from_query("?version=2.5.1&patch=false&liffId=9999-zzzz&vconsole=1");
        assert_eq!(config.sdk.version, "2.5.1");
        assert!(!config.sdk.patch);
        assert_eq!(config.liff_id, "9999-zzzz");
        assert!(config.vconsole);
    }

    #[test]
    fn empty_query_keeps_defaults() {
        let config = PlaygroundConfig::from_query("");
        assert_eq!(config.sdk.version, "2");
        assert!(config.sdk.patch);
    }

    #[test]
    fn unknown_keys_and_bad_booleans_ignored() {
        let config = PlaygroundConfig::from_query("version=3&patch=maybe&foo=bar");
        assert_eq!(config.sdk.version, "3");
        assert!(config.sdk.patch, "malformed patch keeps the default");
    }

    #[test]
    fn selection_round_trips_through_query() {
        let mut config = PlaygroundConfig::default();
        config.liff_id = "1234-abcd".into();
        let selection = crate::version::SdkVersionSelection::parse("2.5.1", false).unwrap();
        let query = config.selection_query(&selection);
        let back = PlaygroundConfig::from_query(&query);
        assert_eq!(back.sdk.version, "2.5.1");
        assert!(!back.sdk.patch);
        assert_eq!(back.liff_id, "1234-abcd");
    }
}
