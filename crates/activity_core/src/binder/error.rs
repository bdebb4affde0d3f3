//! Binder error taxonomy.

use crate::binder::node::LogicalNode;
use crate::bridge::BridgeError;
use crate::model::description::DescriptionError;
use crate::model::handle::Handle;
use crate::model::path::NodePath;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Result type used by attribute view operations.
pub type BindResult<T> = Result<T, BindError>;

/// Errors from tree binding and attribute forwarding.
#[derive(Debug, Clone, PartialEq)]
pub enum BindError {
    /// Native side could not create the element; its subtree was not built.
    CreationFailure {
        type_tag: String,
        path: NodePath,
        source: BridgeError,
    },
    /// Native side rejected one attribute read or write.
    ///
    /// `path` is `None` for accesses made after construction.
    AttributeRejected {
        handle: Handle,
        key: String,
        path: Option<NodePath>,
        source: BridgeError,
    },
    /// Description failed validation before any native call for it.
    MalformedDescription(DescriptionError),
}

impl BindError {
    /// Tree position of the failing node, when known.
    pub fn path(&self) -> Option<&NodePath> {
        match self {
            Self::CreationFailure { path, .. } => Some(path),
            Self::AttributeRejected { path, .. } => path.as_ref(),
            Self::MalformedDescription(reason) => reason.path(),
        }
    }
}

impl Display for BindError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::CreationFailure { type_tag, path, .. } => {
                write!(f, "failed to create `{type_tag}` element at {path}")
            }
            Self::AttributeRejected {
                handle,
                key,
                path: Some(path),
                ..
            } => write!(
                f,
                "attribute `{key}` rejected by element {handle} at {path}"
            ),
            Self::AttributeRejected {
                handle,
                key,
                path: None,
                ..
            } => write!(f, "attribute `{key}` rejected by element {handle}"),
            Self::MalformedDescription(reason) => write!(f, "{reason}"),
        }
    }
}

impl Error for BindError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::CreationFailure { source, .. } => Some(source),
            Self::AttributeRejected { source, .. } => Some(source),
            Self::MalformedDescription(reason) => Some(reason),
        }
    }
}

impl From<DescriptionError> for BindError {
    fn from(value: DescriptionError) -> Self {
        Self::MalformedDescription(value)
    }
}

/// Aborted attach: the first error plus every node created before it.
///
/// Nodes in `partial` exist natively; nothing is rolled back.
#[derive(Debug)]
pub struct AttachFailure {
    pub partial: Vec<LogicalNode>,
    pub error: BindError,
}

impl AttachFailure {
    /// Drops the partial forest and keeps the error.
    pub fn into_error(self) -> BindError {
        self.error
    }
}

impl Display for AttachFailure {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.error)
    }
}

impl Error for AttachFailure {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(&self.error)
    }
}
