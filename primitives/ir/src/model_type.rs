//! Model types
//!
//! Every type a service description knows about is a [`ModelType`]. Types
//! parsed from the source schema are `Primitive` or `Composite`; the wrapper
//! pass adds `PollingHandle` and `PageIterator` members.
//!
//! Types reference each other through [`TypeId`] handles into the owning
//! registry, so two references to the same registered type compare equal by
//! handle. Structural equality between candidates is decided by [`TypeKey`].

use std::fmt;

use serde::{Deserialize, Serialize};

/// Handle of a type registered in a type registry.
///
/// Wraps the arena index directly, so every position a registry can hold
/// has a handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TypeId(usize);

impl TypeId {
    /// Create a handle from a raw registry index
    pub fn new(index: usize) -> Self { Self(index) }

    /// Registry index this handle points at
    pub fn index(self) -> usize { self.0 }
}

impl fmt::Display for TypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "#{}", self.0) }
}

/// A type known to the service description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ModelType {
    /// Built-in scalar (string, int32, boolean, ...)
    Primitive(PrimitiveType),
    /// Object schema declared by the service
    Composite(CompositeType),
    /// Synthesized handle for polling a long-running operation ("future")
    PollingHandle(PollingHandle),
    /// Synthesized lazy iterator over a paginated result ("pager")
    PageIterator(PageIterator),
}

/// Built-in scalar type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrimitiveType {
    /// Language-neutral scalar name (e.g. "string", "int32")
    pub name: String,
}

/// Object type declared by the service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompositeType {
    /// Schema name, unique within a service description
    pub name: String,
    /// Schema description
    #[serde(default)]
    pub description: String,
    /// Properties of the object
    #[serde(default)]
    pub fields: Vec<FieldDef>,
}

/// Property of a composite type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDef {
    /// Property name
    pub name: String,
    /// Property type
    pub field_type: TypeId,
    /// Whether the property is always present
    #[serde(default)]
    pub required: bool,
}

/// Polling handle for an in-progress long-running operation.
///
/// Identity is the synthesized `name` together with the `list_all` marker.
/// The remaining fields describe where the handle came from and what it
/// resolves to; they do not take part in deduplication.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PollingHandle {
    /// Synthesized identifier, normalized by the naming service
    pub name: String,
    /// Set for the "list all" handle of a paginated long-running method
    #[serde(default)]
    pub list_all: bool,
    /// Group of the originating method
    pub group: String,
    /// Name of the originating method
    pub method: String,
    /// Type the operation produces once polling completes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<TypeId>,
}

/// Lazy, restartable sequence over the pages of one element type.
///
/// Identity is the element type plus the preparer flag. The companion
/// [`PageType`] is always derived from those two and never built on its own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageIterator {
    /// Type of one page of results
    pub element: TypeId,
    /// Whether the next page request has to be prepared from a next link
    #[serde(default)]
    pub needs_preparer: bool,
    /// Single-page container walked by this iterator
    pub page: PageType,
}

/// Single-page container owned by a [`PageIterator`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageType {
    /// Type of the page payload
    pub element: TypeId,
    /// Mirrors the owning iterator's preparer flag
    #[serde(default)]
    pub needs_preparer: bool,
}

impl PollingHandle {
    /// Qualified name of the method the handle was synthesized for
    pub fn origin(&self) -> String {
        if self.group.is_empty() {
            self.method.clone()
        } else {
            format!("{}.{}", self.group, self.method)
        }
    }

    /// Whether the handle was synthesized for the method `(group, method)`
    pub fn originates_from(&self, group: &str, method: &str) -> bool {
        self.group == group && self.method == method
    }
}

impl PageIterator {
    /// Create an iterator together with its companion page type
    pub fn new(element: TypeId, needs_preparer: bool) -> Self {
        Self { element, needs_preparer, page: PageType { element, needs_preparer } }
    }
}

/// Structural fingerprint of a [`ModelType`]: the variant tag plus the
/// identifying fields of that variant.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TypeKey {
    /// Primitive identified by name
    Primitive(String),
    /// Composite identified by schema name
    Composite(String),
    /// Polling handle identified by synthesized name and list-all marker
    PollingHandle {
        /// Synthesized name
        name: String,
        /// List-all marker
        list_all: bool,
    },
    /// Page iterator identified by element type and preparer flag
    PageIterator {
        /// Element type handle
        element: TypeId,
        /// Preparer flag
        needs_preparer: bool,
    },
}

impl fmt::Display for TypeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeKey::Primitive(name) => write!(f, "primitive `{}`", name),
            TypeKey::Composite(name) => write!(f, "composite `{}`", name),
            TypeKey::PollingHandle { name, list_all: false } => {
                write!(f, "polling handle `{}`", name)
            }
            TypeKey::PollingHandle { name, list_all: true } => {
                write!(f, "list-all polling handle `{}`", name)
            }
            TypeKey::PageIterator { element, needs_preparer } => {
                write!(f, "page iterator over {} (preparer: {})", element, needs_preparer)
            }
        }
    }
}

impl ModelType {
    /// Shorthand for a primitive type
    pub fn primitive(name: impl Into<String>) -> Self {
        ModelType::Primitive(PrimitiveType { name: name.into() })
    }

    /// Shorthand for a composite type without fields
    pub fn composite(name: impl Into<String>) -> Self {
        ModelType::Composite(CompositeType {
            name: name.into(),
            description: String::new(),
            fields: Vec::new(),
        })
    }

    /// Structural fingerprint used for deduplication
    pub fn key(&self) -> TypeKey {
        match self {
            ModelType::Primitive(p) => TypeKey::Primitive(p.name.clone()),
            ModelType::Composite(c) => TypeKey::Composite(c.name.clone()),
            ModelType::PollingHandle(h) => {
                TypeKey::PollingHandle { name: h.name.clone(), list_all: h.list_all }
            }
            ModelType::PageIterator(p) => {
                TypeKey::PageIterator { element: p.element, needs_preparer: p.needs_preparer }
            }
        }
    }

    /// Whether this type was synthesized by the wrapper pass
    pub fn is_synthetic(&self) -> bool {
        matches!(self, ModelType::PollingHandle(_) | ModelType::PageIterator(_))
    }

    /// Declared or synthesized name; page iterators are named by the renderer
    pub fn name(&self) -> Option<&str> {
        match self {
            ModelType::Primitive(p) => Some(&p.name),
            ModelType::Composite(c) => Some(&c.name),
            ModelType::PollingHandle(h) => Some(&h.name),
            ModelType::PageIterator(_) => None,
        }
    }

    /// Variant tag, for diagnostics
    pub fn variant_name(&self) -> &'static str {
        match self {
            ModelType::Primitive(_) => "primitive",
            ModelType::Composite(_) => "composite",
            ModelType::PollingHandle(_) => "polling_handle",
            ModelType::PageIterator(_) => "page_iterator",
        }
    }

    /// Borrow as a polling handle
    pub fn as_polling_handle(&self) -> Option<&PollingHandle> {
        match self {
            ModelType::PollingHandle(h) => Some(h),
            _ => None,
        }
    }

    /// Borrow as a page iterator
    pub fn as_page_iterator(&self) -> Option<&PageIterator> {
        match self {
            ModelType::PageIterator(p) => Some(p),
            _ => None,
        }
    }
}

impl From<PollingHandle> for ModelType {
    fn from(handle: PollingHandle) -> Self { ModelType::PollingHandle(handle) }
}

impl From<PageIterator> for ModelType {
    fn from(pager: PageIterator) -> Self { ModelType::PageIterator(pager) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn composite_key_ignores_fields() {
        let bare = ModelType::composite("Widget");
        let described = ModelType::Composite(CompositeType {
            name: "Widget".into(),
            description: "A widget".into(),
            fields: vec![FieldDef {
                name: "id".into(),
                field_type: TypeId::new(0),
                required: true,
            }],
        });
        assert_eq!(bare.key(), described.key());
        assert_ne!(bare, described);
    }

    #[test]
    fn polling_handle_key_includes_list_all_marker() {
        let handle = |list_all| {
            ModelType::from(PollingHandle {
                name: "ListWidgetsAll".into(),
                list_all,
                group: String::new(),
                method: "ListWidgets".into(),
                result: None,
            })
        };
        assert_ne!(handle(false).key(), handle(true).key());
    }

    #[test]
    fn page_iterator_key_ignores_companion() {
        let pager = PageIterator::new(TypeId::new(3), true);
        assert_eq!(pager.page.element, TypeId::new(3));
        assert!(pager.page.needs_preparer);
        assert_eq!(
            ModelType::from(pager).key(),
            TypeKey::PageIterator { element: TypeId::new(3), needs_preparer: true }
        );
    }

    #[test]
    #[cfg(target_pointer_width = "64")]
    fn handle_covers_indices_past_u32() {
        let past_u32 = u32::MAX as usize + 1;
        let id = TypeId::new(past_u32);
        assert_eq!(id.index(), past_u32);
        assert_ne!(id, TypeId::new(0));
        assert_eq!(id.to_string(), format!("#{}", past_u32));
    }

    #[test]
    fn only_wrappers_are_synthetic() {
        assert!(!ModelType::primitive("string").is_synthetic());
        assert!(!ModelType::composite("Widget").is_synthetic());
        assert!(ModelType::from(PageIterator::new(TypeId::new(0), false)).is_synthetic());
        assert_eq!(ModelType::from(PageIterator::new(TypeId::new(0), false)).name(), None);
    }
}
