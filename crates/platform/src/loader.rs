//! CDN script loader.
//!
//! Fetches a chosen SDK build from either the platform's CDN or the patched
//! community mirror. Version validation happens before any network activity;
//! a failed fetch is reported once and never retried — the recovery path is
//! picking another version and reloading.

use lg_domain::config::CdnConfig;
use lg_domain::error::{Error, Result};
use lg_domain::{SdkVersionKind, SdkVersionSelection};

/// Build the CDN URL for a validated selection.
///
/// Edge versions live at `/liff/edge/{v}/sdk.js`, pinned versions at
/// `/liff/edge/versions/{v}/sdk.js`. The patch flag switches hosts, not
/// paths.
pub fn cdn_url(selection: &SdkVersionSelection, cdn: &CdnConfig) -> String {
    let host = if selection.patch {
        cdn.patch_host.trim_end_matches('/')
    } else {
        cdn.primary_host.trim_end_matches('/')
    };

    match selection.kind {
        SdkVersionKind::Edge => format!("{host}/liff/edge/{}/sdk.js", selection.version),
        SdkVersionKind::Specific => {
            format!("{host}/liff/edge/versions/{}/sdk.js", selection.version)
        }
    }
}

/// A successfully fetched SDK build.
#[derive(Debug, Clone)]
pub struct LoadedSdk {
    pub version: String,
    pub url: String,
    /// Raw script bytes. The playground only needs proof of a good fetch;
    /// a browser host would evaluate these.
    pub bytes: Vec<u8>,
}

/// Where SDK scripts come from. The session bootstrap only cares that a
/// build materializes for the selection; tests use [`StaticScript`] instead
/// of the network.
#[async_trait::async_trait]
pub trait ScriptSource: Send + Sync {
    async fn fetch(&self, selection: &SdkVersionSelection) -> Result<LoadedSdk>;
}

/// An in-memory script source for tests and offline demo runs.
#[derive(Debug, Clone, Default)]
pub struct StaticScript {
    /// When set, every fetch fails with this message.
    pub fail_with: Option<String>,
}

#[async_trait::async_trait]
impl ScriptSource for StaticScript {
    async fn fetch(&self, selection: &SdkVersionSelection) -> Result<LoadedSdk> {
        if let Some(message) = &self.fail_with {
            return Err(Error::Http(message.clone()));
        }
        Ok(LoadedSdk {
            version: selection.version.clone(),
            url: cdn_url(selection, &CdnConfig::default()),
            bytes: b"/* sdk */".to_vec(),
        })
    }
}

/// Fetches SDK builds over HTTP.
pub struct SdkLoader {
    cdn: CdnConfig,
    client: reqwest::Client,
}

impl SdkLoader {
    pub fn new(cdn: CdnConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .map_err(|e| Error::Http(e.to_string()))?;

        Ok(Self { cdn, client })
    }

    async fn fetch_inner(&self, selection: &SdkVersionSelection) -> Result<LoadedSdk> {
        let url = cdn_url(selection, &self.cdn);
        tracing::debug!(url = %url, version = %selection.version, "fetching SDK script");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| Error::Http(format!("fetch {url}: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Http(format!("fetch {url}: status {status}")));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| Error::Http(format!("read {url}: {e}")))?;
        if bytes.is_empty() {
            return Err(Error::Http(format!("fetch {url}: empty body")));
        }

        tracing::info!(
            version = %selection.version,
            bytes = bytes.len(),
            "SDK script loaded"
        );

        Ok(LoadedSdk {
            version: selection.version.clone(),
            url,
            bytes: bytes.to_vec(),
        })
    }
}

#[async_trait::async_trait]
impl ScriptSource for SdkLoader {
    /// Fetch the script for `selection`.
    ///
    /// Non-success status and empty bodies both count as load failures.
    async fn fetch(&self, selection: &SdkVersionSelection) -> Result<LoadedSdk> {
        self.fetch_inner(selection).await
    }
}
