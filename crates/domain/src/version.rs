//! SDK version selection.
//!
//! The playground can load either an "edge" build (latest within a major
//! version line, selected by a bare integer) or a pinned three-part release.
//! Anything else is rejected before any state changes or network activity.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

static EDGE_VERSION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+$").expect("edge version pattern"));
static SPECIFIC_VERSION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+\.\d+\.\d+$").expect("specific version pattern"));

/// Which release line a selection refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SdkVersionKind {
    /// Latest build within a major line, e.g. `"2"`.
    Edge,
    /// An exact pinned release, e.g. `"2.5.1"`.
    Specific,
}

/// A validated SDK build selection, sourced from (and persisted back to)
/// the URL query string. Changing it forces a full reload because the SDK
/// binds globally to the page at script-load time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SdkVersionSelection {
    pub version: String,
    pub patch: bool,
    pub kind: SdkVersionKind,
}

impl SdkVersionSelection {
    /// Validate a raw version string and build a selection.
    ///
    /// Accepts exactly two shapes: `^\d+$` (edge) and `^\d+\.\d+\.\d+$`
    /// (specific). Any other input yields [`Error::Version`].
    pub fn parse(version: &str, patch: bool) -> Result<Self> {
        let kind = if EDGE_VERSION.is_match(version) {
            SdkVersionKind::Edge
        } else if SPECIFIC_VERSION.is_match(version) {
            SdkVersionKind::Specific
        } else {
            return Err(Error::Version(version.to_string()));
        };

        Ok(Self {
            version: version.to_string(),
            patch,
            kind,
        })
    }
}

impl fmt::Display for SdkVersionSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.version)?;
        if self.patch {
            write!(f, " (patch)")?;
        }
        Ok(())
    }
}
