//! Declarative input model and native identity types.
//!
//! # Responsibility
//! - Define the immutable node descriptions callers hand to the binder.
//! - Define the opaque native handle and attribute value shapes.
//!
//! # Invariants
//! - Descriptions are never mutated by the binder.
//! - Handles are opaque: core code clones, compares and forwards them only.

pub mod description;
pub mod handle;
pub mod path;
pub mod value;
