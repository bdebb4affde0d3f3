//! Declarative node descriptions and their JSON decoding.
//!
//! # Responsibility
//! - Define the `{type, children, attributes}` record the binder consumes.
//! - Decode activity JSON with errors that point at the offending node.
//!
//! # Invariants
//! - `type` is required and must be a non-blank string.
//! - `children` defaults to empty; when present it must be an array.
//! - `attributes` defaults to empty; when present it must be an object whose
//!   values are strings, numbers or booleans.
//! - Attribute order is document order and is never re-sorted.

use crate::model::path::NodePath;
use crate::model::value::AttributeValue;
use indexmap::IndexMap;
use serde_json::{Map, Value};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Desired shape and initial attributes of one element subtree.
///
/// Built in code or decoded with [`parse_descriptions`].
#[derive(Debug, Clone, PartialEq)]
pub struct NodeDescription {
    /// Element type tag understood by the native bridge.
    pub type_tag: String,
    /// Child descriptions in creation order.
    pub children: Vec<NodeDescription>,
    /// Initial attributes, applied in insertion order.
    pub attributes: IndexMap<String, AttributeValue>,
}

impl NodeDescription {
    /// Creates a leaf description with no attributes.
    pub fn new(type_tag: impl Into<String>) -> Self {
        Self {
            type_tag: type_tag.into(),
            children: Vec::new(),
            attributes: IndexMap::new(),
        }
    }

    /// Appends an initial attribute. Re-adding a key replaces its value but
    /// keeps its first position.
    pub fn with_attribute(
        mut self,
        key: impl Into<String>,
        value: impl Into<AttributeValue>,
    ) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    pub fn with_child(mut self, child: NodeDescription) -> Self {
        self.children.push(child);
        self
    }

    pub fn with_children(mut self, children: impl IntoIterator<Item = NodeDescription>) -> Self {
        self.children.extend(children);
        self
    }

    /// Checks node-local invariants for the description found at `path`.
    ///
    /// Children are not visited; the binder validates each node right before
    /// creating it.
    pub fn validate(&self, path: &NodePath) -> Result<(), DescriptionError> {
        if self.type_tag.trim().is_empty() {
            return Err(DescriptionError::BlankType(path.clone()));
        }
        if self.attributes.keys().any(|key| key.trim().is_empty()) {
            return Err(DescriptionError::BlankAttributeKey(path.clone()));
        }
        Ok(())
    }

    /// Number of nodes in this subtree, including this one.
    pub fn subtree_len(&self) -> usize {
        1 + self
            .children
            .iter()
            .map(NodeDescription::subtree_len)
            .sum::<usize>()
    }
}

/// Errors raised while decoding or validating descriptions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DescriptionError {
    /// Input is not valid JSON.
    InvalidJson(String),
    /// Node is not a JSON object.
    NotAnObject(NodePath),
    /// Node has no `type` field.
    MissingType(NodePath),
    /// Node `type` is not a string.
    TypeNotString(NodePath),
    /// Node `type` is blank after trim.
    BlankType(NodePath),
    /// Node `children` is present but not an array.
    ChildrenNotSequence(NodePath),
    /// Node `attributes` is present but not an object.
    AttributesNotMapping(NodePath),
    /// One attribute key is blank after trim.
    BlankAttributeKey(NodePath),
    /// Attribute value is null, an array or an object.
    UnsupportedAttributeValue { path: NodePath, key: String },
}

impl DescriptionError {
    /// Tree position of the malformed node, when known.
    pub fn path(&self) -> Option<&NodePath> {
        match self {
            Self::InvalidJson(_) => None,
            Self::NotAnObject(path)
            | Self::MissingType(path)
            | Self::TypeNotString(path)
            | Self::BlankType(path)
            | Self::ChildrenNotSequence(path)
            | Self::AttributesNotMapping(path)
            | Self::BlankAttributeKey(path) => Some(path),
            Self::UnsupportedAttributeValue { path, .. } => Some(path),
        }
    }
}

impl Display for DescriptionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidJson(message) => write!(f, "description is not valid JSON: {message}"),
            Self::NotAnObject(path) => write!(f, "description at {path} must be an object"),
            Self::MissingType(path) => write!(f, "description at {path} is missing `type`"),
            Self::TypeNotString(path) => {
                write!(f, "description at {path} has a non-string `type`")
            }
            Self::BlankType(path) => write!(f, "description at {path} has a blank `type`"),
            Self::ChildrenNotSequence(path) => {
                write!(f, "description at {path} has non-array `children`")
            }
            Self::AttributesNotMapping(path) => {
                write!(f, "description at {path} has non-object `attributes`")
            }
            Self::BlankAttributeKey(path) => {
                write!(f, "description at {path} has a blank attribute key")
            }
            Self::UnsupportedAttributeValue { path, key } => write!(
                f,
                "description at {path} has unsupported value for attribute `{key}`"
            ),
        }
    }
}

impl Error for DescriptionError {}

/// Parses an activity description document.
///
/// Accepts either one node object or an array of top-level nodes.
///
/// # Errors
/// - `InvalidJson` when the text does not parse.
/// - A path-carrying variant for the first malformed node in document order.
pub fn parse_descriptions(json: &str) -> Result<Vec<NodeDescription>, DescriptionError> {
    let document: Value =
        serde_json::from_str(json).map_err(|err| DescriptionError::InvalidJson(err.to_string()))?;
    descriptions_from_value(&document)
}

/// Decodes an already-parsed JSON document; see [`parse_descriptions`].
pub fn descriptions_from_value(document: &Value) -> Result<Vec<NodeDescription>, DescriptionError> {
    let root = NodePath::root();
    match document {
        Value::Array(items) => decode_siblings(items, &root),
        other => Ok(vec![decode_node(other, &root.child(0))?]),
    }
}

fn decode_siblings(
    items: &[Value],
    parent: &NodePath,
) -> Result<Vec<NodeDescription>, DescriptionError> {
    items
        .iter()
        .enumerate()
        .map(|(index, item)| decode_node(item, &parent.child(index)))
        .collect()
}

fn decode_node(value: &Value, path: &NodePath) -> Result<NodeDescription, DescriptionError> {
    let object = value
        .as_object()
        .ok_or_else(|| DescriptionError::NotAnObject(path.clone()))?;

    let type_tag = match object.get("type") {
        None => return Err(DescriptionError::MissingType(path.clone())),
        Some(Value::String(tag)) => tag.clone(),
        Some(_) => return Err(DescriptionError::TypeNotString(path.clone())),
    };

    let attributes = match object.get("attributes") {
        None => IndexMap::new(),
        Some(Value::Object(raw)) => decode_attributes(raw, path)?,
        Some(_) => return Err(DescriptionError::AttributesNotMapping(path.clone())),
    };

    let children = match object.get("children") {
        None => Vec::new(),
        Some(Value::Array(items)) => decode_siblings(items, path)?,
        Some(_) => return Err(DescriptionError::ChildrenNotSequence(path.clone())),
    };

    let description = NodeDescription {
        type_tag,
        children,
        attributes,
    };
    description.validate(path)?;
    Ok(description)
}

fn decode_attributes(
    raw: &Map<String, Value>,
    path: &NodePath,
) -> Result<IndexMap<String, AttributeValue>, DescriptionError> {
    let mut attributes = IndexMap::with_capacity(raw.len());
    for (key, value) in raw {
        let decoded = match value {
            Value::String(text) => AttributeValue::Text(text.clone()),
            Value::Bool(flag) => AttributeValue::Bool(*flag),
            Value::Number(number) => match number.as_f64() {
                Some(number) => AttributeValue::Number(number),
                None => {
                    return Err(DescriptionError::UnsupportedAttributeValue {
                        path: path.clone(),
                        key: key.clone(),
                    })
                }
            },
            Value::Null | Value::Array(_) | Value::Object(_) => {
                return Err(DescriptionError::UnsupportedAttributeValue {
                    path: path.clone(),
                    key: key.clone(),
                })
            }
        };
        attributes.insert(key.clone(), decoded);
    }
    Ok(attributes)
}
