//! Position of one node inside a description forest.

use std::fmt::{Display, Formatter};

/// Sibling indices from the top-level forest down to one node.
///
/// Displayed as `/0/2/1`; the forest itself is `/`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct NodePath(Vec<usize>);

impl NodePath {
    /// Path of the top-level forest.
    pub fn root() -> Self {
        Self::default()
    }

    /// Returns the path of the child at `index` below this path.
    pub fn child(&self, index: usize) -> Self {
        let mut indices = self.0.clone();
        indices.push(index);
        Self(indices)
    }

    pub fn indices(&self) -> &[usize] {
        &self.0
    }

    pub fn depth(&self) -> usize {
        self.0.len()
    }
}

impl From<Vec<usize>> for NodePath {
    fn from(value: Vec<usize>) -> Self {
        Self(value)
    }
}

impl Display for NodePath {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if self.0.is_empty() {
            return f.write_str("/");
        }
        for index in &self.0 {
            write!(f, "/{index}")?;
        }
        Ok(())
    }
}
