//! Platform SDK boundary.
//!
//! The real platform SDK is a vendor script that binds globally to the page
//! at load time. Here it is an injected provider behind [`PlatformSdk`], so
//! the session core and tests talk to a handle instead of a global.

pub mod loader;
pub mod stub;
pub mod traits;

// Re-exports for convenience.
pub use loader::{cdn_url, LoadedSdk, ScriptSource, SdkLoader, StaticScript};
pub use stub::StubPlatform;
pub use traits::{Message, PlatformSdk, SdkHandle};
