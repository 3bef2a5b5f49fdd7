//! Shared domain types for the liffground playground.
//!
//! Everything here is transient and process-local: the playground mirrors
//! the state of a single platform session and holds nothing across reloads
//! except what round-trips through the URL query string.

pub mod capability;
pub mod config;
pub mod context;
pub mod error;
pub mod profile;
pub mod version;

pub use capability::{Capability, CapabilitySet, Scope};
pub use context::{Context, ContextType, Os, ViewType};
pub use error::{Error, Result};
pub use profile::{DecodedIdToken, IdentityTokens, Profile};
pub use version::{SdkVersionKind, SdkVersionSelection};
