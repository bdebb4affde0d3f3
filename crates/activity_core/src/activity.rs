//! Activity root: the top-level attachment point of one running activity.
//!
//! # Responsibility
//! - Hold the host-provided root handle and the top-level logical nodes.
//! - Drive start, attach and end of one activity.
//!
//! # Invariants
//! - The root handle is supplied by the host; it is never created here.
//! - `children` only grows through `attach` and mirrors what exists natively,
//!   including nodes left behind by an aborted attach.

use crate::binder::{attach, BindError, LogicalNode};
use crate::bridge::{BridgeError, NativeBridge};
use crate::model::description::NodeDescription;
use crate::model::handle::Handle;
use log::{error, info};

/// One running activity bound to a native root element.
#[derive(Debug)]
pub struct Activity {
    name: String,
    root: Handle,
    children: Vec<LogicalNode>,
}

impl Activity {
    /// Starts an activity on the host's root element.
    pub fn start(name: impl Into<String>, root: Handle) -> Self {
        let name = name.into();
        info!(
            "event=activity_start module=activity status=ok name={} root={}",
            name, root
        );
        Self {
            name,
            root,
            children: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn root(&self) -> &Handle {
        &self.root
    }

    pub fn children(&self) -> &[LogicalNode] {
        &self.children
    }

    /// Total number of logical nodes under the root.
    pub fn node_count(&self) -> usize {
        self.children.iter().map(LogicalNode::subtree_len).sum()
    }

    /// Instantiates `descriptions` under the root and appends them.
    ///
    /// Returns how many top-level nodes were added. Error paths are relative
    /// to `descriptions`.
    ///
    /// # Errors
    /// Returns the first [`BindError`]. Nodes created before it are still
    /// appended, since they already exist natively.
    pub fn attach<B>(
        &mut self,
        bridge: &mut B,
        descriptions: &[NodeDescription],
    ) -> Result<usize, BindError>
    where
        B: NativeBridge + ?Sized,
    {
        match attach(bridge, &self.root, descriptions) {
            Ok(nodes) => {
                let added = nodes.len();
                self.children.extend(nodes);
                info!(
                    "event=activity_attach module=activity status=ok name={} added={} total_nodes={}",
                    self.name,
                    added,
                    self.node_count()
                );
                Ok(added)
            }
            Err(failure) => {
                self.children.extend(failure.partial);
                error!(
                    "event=activity_attach module=activity status=error name={} total_nodes={} error={}",
                    self.name,
                    self.node_count(),
                    failure.error
                );
                Err(failure.error)
            }
        }
    }

    /// Ends the activity, releasing every top-level element natively.
    ///
    /// # Errors
    /// Returns the first release failure; remaining elements are still
    /// released.
    pub fn end<B>(self, bridge: &mut B) -> Result<(), BridgeError>
    where
        B: NativeBridge + ?Sized,
    {
        let mut first_error = None;
        for child in &self.children {
            if let Err(err) = bridge.release_element(child.handle()) {
                error!(
                    "event=activity_end module=activity status=error name={} handle={} error={}",
                    self.name,
                    child.handle(),
                    err
                );
                first_error.get_or_insert(err);
            }
        }
        info!(
            "event=activity_end module=activity status={} name={} released={}",
            if first_error.is_some() { "error" } else { "ok" },
            self.name,
            self.children.len()
        );
        match first_error {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}
