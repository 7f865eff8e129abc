#![forbid(unsafe_code)]
//! vector_field_host: Connects a `vector_field` session to a host application.
//!
//! Modules:
//! - protocol: JSON envelopes exchanged with the host
//! - bus: channels and the [`bus::HostLink`] seam for outbound messages
//! - controls: clamped control-surface parameters and their invalidation rules
//! - presets: named control snapshots in RON
//! - session: the single dispatcher owning all state
pub mod bus;
pub mod controls;
pub mod error;
pub mod presets;
pub mod protocol;
pub mod session;

/// Convenient re-exports for common types. Import with `use vector_field_host::prelude::*;`.
pub mod prelude {
    pub use crate::bus::{ChannelLink, HostBus, HostLink};
    pub use crate::controls::{ControlChange, Controls, Invalidation};
    pub use crate::error::{Error, Result};
    pub use crate::presets::Preset;
    pub use crate::protocol::{HostMessage, PluginMessage};
    pub use crate::session::{Command, Notice, NoticeKind, Overrides, SelectionState, Session};
}
