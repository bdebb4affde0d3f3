//! In-process element registry implementing the native bridge.
//!
//! # Responsibility
//! - Host the display element tree behind opaque handles.
//! - Apply per-kind defaults and child-append hooks of the display firmware.
//!
//! # Invariants
//! - The store always contains its root container.
//! - Handles are random UUIDs and are never reused after release.
//! - Attribute values are stored as text only; other kinds are rejected.

use crate::bridge::{BridgeError, NativeBridge};
use crate::model::handle::Handle;
use crate::model::value::AttributeValue;
use log::debug;
use std::collections::{BTreeMap, HashMap};
use uuid::Uuid;

const TEXT_DEFAULT_VALUE: &str = "test";
const MENU_DEFAULT_INDEX: &str = "0";

/// Element kinds the display firmware can instantiate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementKind {
    /// Single line of text rendered from the `value` attribute.
    Text,
    /// Plain grouping element that composes children at `x`/`y`.
    Container,
    /// Scrolling menu selecting one child by the `index` attribute.
    Menu,
}

impl ElementKind {
    /// Maps a description type tag to a kind.
    pub fn from_type_tag(type_tag: &str) -> Option<Self> {
        match type_tag {
            "text" => Some(Self::Text),
            "container" => Some(Self::Container),
            "inscroll" => Some(Self::Menu),
            _ => None,
        }
    }

    pub fn type_tag(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Container => "container",
            Self::Menu => "inscroll",
        }
    }

    fn default_attributes(self) -> BTreeMap<String, String> {
        let mut attributes = BTreeMap::new();
        match self {
            Self::Text => {
                attributes.insert("value".to_string(), TEXT_DEFAULT_VALUE.to_string());
            }
            Self::Menu => {
                attributes.insert("index".to_string(), MENU_DEFAULT_INDEX.to_string());
            }
            Self::Container => {}
        }
        attributes
    }
}

#[derive(Debug)]
struct ElementRecord {
    kind: ElementKind,
    parent: Option<Handle>,
    children: Vec<Handle>,
    attributes: BTreeMap<String, String>,
}

impl ElementRecord {
    fn new(kind: ElementKind, parent: Option<Handle>) -> Self {
        Self {
            kind,
            parent,
            children: Vec::new(),
            attributes: kind.default_attributes(),
        }
    }

    fn children_updated(&mut self) {
        if self.kind == ElementKind::Menu {
            // selection restarts at the first entry whenever entries change
            self.attributes
                .insert("index".to_string(), MENU_DEFAULT_INDEX.to_string());
        }
    }
}

/// Element registry owning every live element.
#[derive(Debug)]
pub struct ElementStore {
    root: Handle,
    elements: HashMap<Handle, ElementRecord>,
}

impl ElementStore {
    /// Creates a store holding only the root container.
    pub fn new() -> Self {
        let root = mint_handle();
        let mut elements = HashMap::new();
        elements.insert(root.clone(), ElementRecord::new(ElementKind::Container, None));
        Self { root, elements }
    }

    /// Handle of the root container that hosts an activity.
    pub fn root_handle(&self) -> &Handle {
        &self.root
    }

    /// Number of live elements, root included.
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Always false: the root container cannot be released.
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn contains(&self, handle: &Handle) -> bool {
        self.elements.contains_key(handle)
    }

    pub fn kind_of(&self, handle: &Handle) -> Option<ElementKind> {
        self.elements.get(handle).map(|record| record.kind)
    }

    /// Children of one element in append order.
    pub fn children_of(&self, handle: &Handle) -> Option<&[Handle]> {
        self.elements
            .get(handle)
            .map(|record| record.children.as_slice())
    }

    pub fn parent_of(&self, handle: &Handle) -> Option<&Handle> {
        self.elements
            .get(handle)
            .and_then(|record| record.parent.as_ref())
    }

    fn record_mut(&mut self, handle: &Handle) -> Result<&mut ElementRecord, BridgeError> {
        self.elements
            .get_mut(handle)
            .ok_or_else(|| BridgeError::UnknownHandle(handle.clone()))
    }

    fn remove_subtree(&mut self, handle: &Handle) -> usize {
        let mut removed = 0;
        let mut pending = vec![handle.clone()];
        while let Some(current) = pending.pop() {
            if let Some(record) = self.elements.remove(&current) {
                removed += 1;
                pending.extend(record.children);
            }
        }
        removed
    }
}

impl Default for ElementStore {
    fn default() -> Self {
        Self::new()
    }
}

impl NativeBridge for ElementStore {
    fn create_element(&mut self, parent: &Handle, type_tag: &str) -> Result<Handle, BridgeError> {
        let kind = ElementKind::from_type_tag(type_tag)
            .ok_or_else(|| BridgeError::UnknownType(type_tag.to_string()))?;
        if !self.elements.contains_key(parent) {
            return Err(BridgeError::InvalidParent(parent.clone()));
        }

        let handle = mint_handle();
        self.elements
            .insert(handle.clone(), ElementRecord::new(kind, Some(parent.clone())));

        let parent_record = self.record_mut(parent)?;
        parent_record.children.push(handle.clone());
        parent_record.children_updated();
        Ok(handle)
    }

    fn get_attribute(
        &mut self,
        handle: &Handle,
        key: &str,
    ) -> Result<Option<AttributeValue>, BridgeError> {
        let record = self.record_mut(handle)?;
        Ok(record
            .attributes
            .get(key)
            .map(|value| AttributeValue::Text(value.clone())))
    }

    fn set_attribute(
        &mut self,
        handle: &Handle,
        key: &str,
        value: AttributeValue,
    ) -> Result<(), BridgeError> {
        let record = self.record_mut(handle)?;
        let text = value
            .as_text()
            .ok_or_else(|| BridgeError::RejectedValue {
                key: key.to_string(),
                reason: format!("expected text value, got {}", value.kind_name()),
            })?;
        record.attributes.insert(key.to_string(), text.to_string());
        Ok(())
    }

    fn release_element(&mut self, handle: &Handle) -> Result<(), BridgeError> {
        if *handle == self.root {
            return Err(BridgeError::Native(
                "root container cannot be released".to_string(),
            ));
        }
        let parent = self.record_mut(handle)?.parent.clone();
        if let Some(parent) = parent {
            if let Some(parent_record) = self.elements.get_mut(&parent) {
                parent_record.children.retain(|child| child != handle);
            }
        }
        let removed = self.remove_subtree(handle);
        debug!(
            "event=element_release module=element_store status=ok handle={} removed={}",
            handle, removed
        );
        Ok(())
    }
}

fn mint_handle() -> Handle {
    Handle::new(Uuid::new_v4().to_string())
}
