//! The host-page seam.
//!
//! In a browser these calls hit `document.location`; here they are a trait
//! so the version-change flow (persist query, settle, hard reload) can be
//! exercised without a DOM.

use parking_lot::Mutex;

/// What the session needs from the page hosting it.
pub trait HostPage: Send + Sync {
    /// Full URL of the current page, used as the login redirect target.
    fn current_url(&self) -> String;
    /// Persist a new query string so the next load picks it up.
    fn persist_query(&self, query: &str);
    /// Force a full reload. The SDK binds globally at script-load time and
    /// cannot be reinitialized in place, so this is a hard reset by design.
    fn reload(&self);
}

/// A [`HostPage`] that records what was asked of it.
#[derive(Default)]
pub struct RecordingHost {
    pub url: String,
    persisted: Mutex<Vec<String>>,
    reloads: Mutex<u32>,
}

impl RecordingHost {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            persisted: Mutex::new(Vec::new()),
            reloads: Mutex::new(0),
        }
    }

    pub fn persisted_queries(&self) -> Vec<String> {
        self.persisted.lock().clone()
    }

    pub fn reload_count(&self) -> u32 {
        *self.reloads.lock()
    }
}

impl HostPage for RecordingHost {
    fn current_url(&self) -> String {
        self.url.clone()
    }

    fn persist_query(&self, query: &str) {
        self.persisted.lock().push(query.to_string());
    }

    fn reload(&self) {
        *self.reloads.lock() += 1;
    }
}
