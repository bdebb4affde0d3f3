//! Native element bridge contract.
//!
//! # Responsibility
//! - Define the three native primitives the binder depends on.
//! - Define the error shape native implementations report back.
//!
//! # Invariants
//! - Native state is authoritative: implementations must not expect core to
//!   cache attribute values.
//! - `create_element` is the only source of handles.
//! - Calls are synchronous and return before the binder proceeds.

use crate::model::handle::Handle;
use crate::model::value::AttributeValue;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod element_store;

pub use element_store::{ElementKind, ElementStore};

/// Errors reported by a native bridge implementation.
#[derive(Debug, Clone, PartialEq)]
pub enum BridgeError {
    /// Type tag is not known to the native side.
    UnknownType(String),
    /// Parent handle does not name a live element.
    InvalidParent(Handle),
    /// Handle does not name a live element.
    UnknownHandle(Handle),
    /// Native side refused an attribute value.
    RejectedValue { key: String, reason: String },
    /// Any other native failure.
    Native(String),
}

impl Display for BridgeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownType(tag) => write!(f, "unknown element type `{tag}`"),
            Self::InvalidParent(handle) => write!(f, "invalid parent element: {handle}"),
            Self::UnknownHandle(handle) => write!(f, "unknown element handle: {handle}"),
            Self::RejectedValue { key, reason } => {
                write!(f, "attribute `{key}` rejected: {reason}")
            }
            Self::Native(message) => write!(f, "native bridge failure: {message}"),
        }
    }
}

impl Error for BridgeError {}

/// Native element primitives consumed by the binder.
pub trait NativeBridge {
    /// Creates one element of `type_tag` under `parent` and returns its handle.
    fn create_element(&mut self, parent: &Handle, type_tag: &str) -> Result<Handle, BridgeError>;
    /// Reads one attribute. `Ok(None)` means the element has no such value.
    fn get_attribute(
        &mut self,
        handle: &Handle,
        key: &str,
    ) -> Result<Option<AttributeValue>, BridgeError>;
    /// Writes one attribute.
    fn set_attribute(
        &mut self,
        handle: &Handle,
        key: &str,
        value: AttributeValue,
    ) -> Result<(), BridgeError>;
    /// Releases one element and everything created under it.
    ///
    /// Bridges whose elements live as long as the host may keep the default.
    fn release_element(&mut self, handle: &Handle) -> Result<(), BridgeError> {
        let _ = handle;
        Ok(())
    }
}

impl<B: NativeBridge + ?Sized> NativeBridge for &mut B {
    fn create_element(&mut self, parent: &Handle, type_tag: &str) -> Result<Handle, BridgeError> {
        (**self).create_element(parent, type_tag)
    }

    fn get_attribute(
        &mut self,
        handle: &Handle,
        key: &str,
    ) -> Result<Option<AttributeValue>, BridgeError> {
        (**self).get_attribute(handle, key)
    }

    fn set_attribute(
        &mut self,
        handle: &Handle,
        key: &str,
        value: AttributeValue,
    ) -> Result<(), BridgeError> {
        (**self).set_attribute(handle, key, value)
    }

    fn release_element(&mut self, handle: &Handle) -> Result<(), BridgeError> {
        (**self).release_element(handle)
    }
}
