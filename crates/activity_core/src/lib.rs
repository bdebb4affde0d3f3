//! Binds declarative activity descriptions to native display elements.
//!
//! Descriptions are expanded into `LogicalNode`s backed by handles from a
//! `NativeBridge`; attribute access on a node is forwarded to native state.

pub mod activity;
pub mod binder;
pub mod bridge;
pub mod logging;
pub mod model;

pub use activity::Activity;
pub use binder::{
    attach, AttachFailure, AttributeView, BindError, BindResult, LogicalNode, NodePath,
};
pub use bridge::{BridgeError, ElementKind, ElementStore, NativeBridge};
pub use logging::{default_log_level, init_logging, logging_status, LogSettings};
pub use model::description::{
    descriptions_from_value, parse_descriptions, DescriptionError, NodeDescription,
};
pub use model::handle::Handle;
pub use model::value::AttributeValue;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
