//! Tree binder: materializes node descriptions as native elements.
//!
//! # Responsibility
//! - Expand a description forest depth-first into `LogicalNode`s.
//! - Route every initial attribute through the same write path used later.
//!
//! # Invariants
//! - A node's handle exists before any of its attributes is touched.
//! - Children are created with their parent's freshly minted handle.
//! - Siblings are created, and attributes written, in description order;
//!   a node's attributes are written before its children are created.
//! - The first failure aborts the whole attach. Nothing is rolled back and
//!   later siblings are never attempted.

mod error;
mod node;

pub use crate::model::path::NodePath;
pub use error::{AttachFailure, BindError, BindResult};
pub use node::{AttributeView, LogicalNode};

use crate::bridge::NativeBridge;
use crate::model::description::NodeDescription;
use crate::model::handle::Handle;
use log::{debug, warn};

/// Instantiates `descriptions` under `parent` and returns the new nodes.
///
/// The same routine serves an activity root and any element handle; nothing
/// is special-cased for the root.
///
/// # Errors
/// Returns [`AttachFailure`] holding the first error and every node created
/// before it, nested in place.
pub fn attach<B>(
    bridge: &mut B,
    parent: &Handle,
    descriptions: &[NodeDescription],
) -> Result<Vec<LogicalNode>, AttachFailure>
where
    B: NativeBridge + ?Sized,
{
    let mut built = Vec::with_capacity(descriptions.len());
    match attach_into(bridge, parent, descriptions, &NodePath::root(), &mut built) {
        Ok(()) => Ok(built),
        Err(error) => {
            warn!(
                "event=attach_abort module=binder status=error parent={} path={} built={} error={}",
                parent,
                error
                    .path()
                    .map(ToString::to_string)
                    .unwrap_or_else(|| "unknown".to_string()),
                built.iter().map(LogicalNode::subtree_len).sum::<usize>(),
                error
            );
            Err(AttachFailure {
                partial: built,
                error,
            })
        }
    }
}

fn attach_into<B>(
    bridge: &mut B,
    parent: &Handle,
    descriptions: &[NodeDescription],
    base: &NodePath,
    out: &mut Vec<LogicalNode>,
) -> Result<(), BindError>
where
    B: NativeBridge + ?Sized,
{
    for (index, description) in descriptions.iter().enumerate() {
        let path = base.child(index);
        description.validate(&path)?;

        let handle = bridge
            .create_element(parent, &description.type_tag)
            .map_err(|source| BindError::CreationFailure {
                type_tag: description.type_tag.clone(),
                path: path.clone(),
                source,
            })?;
        debug!(
            "event=element_create module=binder status=ok type={} parent={} handle={} path={}",
            description.type_tag, parent, handle, path
        );

        let mut node = LogicalNode::new(description.type_tag.clone(), handle);
        let result = apply_attributes(bridge, &node, description, &path).and_then(|()| {
            let handle = node.handle().clone();
            attach_into(
                bridge,
                &handle,
                &description.children,
                &path,
                node.children_mut(),
            )
        });
        out.push(node);
        result?;
    }
    Ok(())
}

fn apply_attributes<B>(
    bridge: &mut B,
    node: &LogicalNode,
    description: &NodeDescription,
    path: &NodePath,
) -> Result<(), BindError>
where
    B: NativeBridge + ?Sized,
{
    let mut view = AttributeView::new(node.handle(), bridge, Some(path.clone()));
    for (key, value) in &description.attributes {
        view.set(key, value.clone())?;
    }
    Ok(())
}
