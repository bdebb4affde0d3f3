//! Logical nodes and their attribute forwarding surface.

use crate::binder::error::{BindError, BindResult};
use crate::bridge::{BridgeError, NativeBridge};
use crate::model::handle::Handle;
use crate::model::path::NodePath;
use crate::model::value::AttributeValue;
use log::{trace, warn};

/// In-memory counterpart of one native element.
///
/// Owns its handle exclusively; attribute state lives on the native side and
/// is reached through [`LogicalNode::attributes`].
#[derive(Debug, PartialEq, Eq)]
pub struct LogicalNode {
    type_tag: String,
    handle: Handle,
    children: Vec<LogicalNode>,
}

impl LogicalNode {
    pub(crate) fn new(type_tag: impl Into<String>, handle: Handle) -> Self {
        Self {
            type_tag: type_tag.into(),
            handle,
            children: Vec::new(),
        }
    }

    pub fn type_tag(&self) -> &str {
        &self.type_tag
    }

    pub fn handle(&self) -> &Handle {
        &self.handle
    }

    pub fn children(&self) -> &[LogicalNode] {
        &self.children
    }

    pub(crate) fn children_mut(&mut self) -> &mut Vec<LogicalNode> {
        &mut self.children
    }

    /// Returns the forwarding view for this node's attributes.
    pub fn attributes<'a, B>(&'a self, bridge: &'a mut B) -> AttributeView<'a, B>
    where
        B: NativeBridge + ?Sized,
    {
        AttributeView::new(&self.handle, bridge, None)
    }

    /// Number of nodes in this subtree, including this one.
    pub fn subtree_len(&self) -> usize {
        1 + self
            .children
            .iter()
            .map(LogicalNode::subtree_len)
            .sum::<usize>()
    }

    /// Finds the node owning `handle` in this subtree.
    pub fn find(&self, handle: &Handle) -> Option<&LogicalNode> {
        if self.handle == *handle {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.find(handle))
    }

    /// Visits this subtree depth-first, parents before children.
    ///
    /// The callback receives the depth relative to this node.
    pub fn visit<F>(&self, mut visitor: F)
    where
        F: FnMut(usize, &LogicalNode),
    {
        self.visit_at(0, &mut visitor);
    }

    fn visit_at<F>(&self, depth: usize, visitor: &mut F)
    where
        F: FnMut(usize, &LogicalNode),
    {
        visitor(depth, self);
        for child in &self.children {
            child.visit_at(depth + 1, visitor);
        }
    }
}

/// Pass-through accessor for one node's native attributes.
///
/// Holds no values: every `get` re-queries the bridge and every `set` is one
/// bridge call. Keys are forwarded verbatim, including keys the description
/// never mentioned.
pub struct AttributeView<'a, B: NativeBridge + ?Sized> {
    handle: &'a Handle,
    bridge: &'a mut B,
    path: Option<NodePath>,
}

impl<'a, B: NativeBridge + ?Sized> AttributeView<'a, B> {
    pub(crate) fn new(handle: &'a Handle, bridge: &'a mut B, path: Option<NodePath>) -> Self {
        Self {
            handle,
            bridge,
            path,
        }
    }

    pub fn handle(&self) -> &Handle {
        self.handle
    }

    /// Reads one attribute from native state.
    ///
    /// `Ok(None)` means the element has no value for `key`; no default is
    /// substituted.
    pub fn get(&mut self, key: &str) -> BindResult<Option<AttributeValue>> {
        match self.bridge.get_attribute(self.handle, key) {
            Ok(value) => {
                trace!(
                    "event=attribute_get module=binder status=ok handle={} key={} present={}",
                    self.handle,
                    key,
                    value.is_some()
                );
                Ok(value)
            }
            Err(source) => Err(self.rejected("attribute_get", key, source)),
        }
    }

    /// Writes one attribute to native state.
    pub fn set(&mut self, key: &str, value: impl Into<AttributeValue>) -> BindResult<()> {
        match self.bridge.set_attribute(self.handle, key, value.into()) {
            Ok(()) => {
                trace!(
                    "event=attribute_set module=binder status=ok handle={} key={}",
                    self.handle,
                    key
                );
                Ok(())
            }
            Err(source) => Err(self.rejected("attribute_set", key, source)),
        }
    }

    fn rejected(&self, event: &str, key: &str, source: BridgeError) -> BindError {
        warn!(
            "event={} module=binder status=error handle={} key={} error={}",
            event, self.handle, key, source
        );
        BindError::AttributeRejected {
            handle: self.handle.clone(),
            key: key.to_string(),
            path: self.path.clone(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::LogicalNode;
    use crate::model::handle::Handle;

    fn sample_tree() -> LogicalNode {
        let mut root = LogicalNode::new("container", Handle::new("H1"));
        let mut menu = LogicalNode::new("inscroll", Handle::new("H2"));
        menu.children_mut()
            .push(LogicalNode::new("text", Handle::new("H3")));
        root.children_mut().push(menu);
        root.children_mut()
            .push(LogicalNode::new("text", Handle::new("H4")));
        root
    }

    #[test]
    fn subtree_len_and_find_walk_nested_children() {
        let tree = sample_tree();
        assert_eq!(tree.subtree_len(), 4);
        assert_eq!(
            tree.find(&Handle::new("H3")).map(LogicalNode::type_tag),
            Some("text")
        );
        assert!(tree.find(&Handle::new("H9")).is_none());
    }

    #[test]
    fn visit_is_preorder_with_depth() {
        let tree = sample_tree();
        let mut seen = Vec::new();
        tree.visit(|depth, node| seen.push((depth, node.handle().to_string())));
        assert_eq!(
            seen,
            vec![
                (0, "H1".to_string()),
                (1, "H2".to_string()),
                (2, "H3".to_string()),
                (1, "H4".to_string()),
            ]
        );
    }
}
