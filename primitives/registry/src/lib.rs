#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::unwrap_used)]

//! Service Registry: the in-memory database a generation pass works on.
//!
//! A [`ServiceDescription`] owns the ordered methods of a service together
//! with the [`TypeRegistry`] of every type they reference. The wrapper pass
//! mutates both; renderers only read them through
//! [`ServiceDescriptionReader`].

pub mod dedup;
pub mod type_registry;

use std::path::Path;

use ir::{Method, ModelType, TypeId, TypeKey};
use serde::{Deserialize, Serialize};

pub use dedup::get_or_register;
pub use type_registry::TypeRegistry;

/// Errors raised by the registry
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    /// `canonical_of` was asked for a type that is not registered
    #[error("no registered type matches {0}")]
    NotFound(TypeKey),
    /// I/O error while reading or writing a model file
    #[error(transparent)]
    Io(#[from] std::io::Error),
    /// Malformed model JSON
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Result alias for registry operations
pub type Result<T> = std::result::Result<T, RegistryError>;

/// A parsed service: its methods and every type they reference.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceDescription {
    /// Service name
    pub name: String,
    /// Methods in declaration order
    #[serde(default)]
    methods: Vec<Method>,
    /// Registry of model types
    #[serde(default)]
    types: TypeRegistry,
}

impl ServiceDescription {
    /// Create an empty description
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), ..Self::default() }
    }

    /// Register a schema type, reusing a structurally equal member if present
    pub fn register_type(&mut self, ty: ModelType) -> TypeId {
        get_or_register(&mut self.types, ty)
    }

    /// Add a method, replacing an existing one with the same `(group, name)`
    pub fn insert_method(&mut self, method: Method) {
        match self.methods.iter_mut().find(|m| m.identity() == method.identity()) {
            Some(existing) => *existing = method,
            None => self.methods.push(method),
        }
    }

    /// Methods in declaration order
    pub fn methods(&self) -> &[Method] { &self.methods }

    /// Type registry
    pub fn types(&self) -> &TypeRegistry { &self.types }

    /// Methods and registry borrowed mutably at once, for the rewrite pass
    pub fn parts_mut(&mut self) -> (&mut [Method], &mut TypeRegistry) {
        (&mut self.methods, &mut self.types)
    }

    /// Load a description from a JSON file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    /// Parse a description from JSON text
    pub fn from_json_str(json: &str) -> Result<Self> { Ok(serde_json::from_str(json)?) }

    /// Save the description as pretty JSON
    pub fn to_file(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let mut content = serde_json::to_string_pretty(self)?;
        // Ensure file ends with a newline (POSIX standard)
        content.push('\n');
        std::fs::write(path, content)?;
        Ok(())
    }
}

/// Read-only interface to a [`ServiceDescription`].
///
/// Renderers get this view so that only the wrapper pass can mutate
/// methods.
pub trait ServiceDescriptionReader {
    /// `(group, name)` of every method, in declaration order
    fn list_methods(&self) -> Vec<(&str, &str)>;

    /// Look up a method by identity.
    ///
    /// Returns `None` if no such method exists.
    fn get_method(&self, group: &str, name: &str) -> Option<&Method>;

    /// Total number of methods
    fn method_count(&self) -> usize;

    /// Registered types
    fn types(&self) -> &TypeRegistry;
}

impl ServiceDescriptionReader for ServiceDescription {
    fn list_methods(&self) -> Vec<(&str, &str)> { self.methods.iter().map(Method::identity).collect() }

    fn get_method(&self, group: &str, name: &str) -> Option<&Method> {
        self.methods.iter().find(|m| m.identity() == (group, name))
    }

    fn method_count(&self) -> usize { self.methods.len() }

    fn types(&self) -> &TypeRegistry { &self.types }
}
