//! Session core for the liffground playground.
//!
//! Owns the platform lifecycle: load a chosen SDK build, run the
//! initialization sequence, derive the capability set, and publish
//! everything as one observable snapshot. Mutation is confined to the
//! bootstrap and the explicit login / logout / version-change operations;
//! everything else only reads.

pub mod actions;
pub mod bootstrap;
pub mod capability;
pub mod host;
pub mod phase;
pub mod state;

pub use capability::{resolve, CapabilityInputs, ProbeResults};
pub use host::{HostPage, RecordingHost};
pub use phase::SessionPhase;
pub use state::{SdkInfo, Session, Snapshot};
