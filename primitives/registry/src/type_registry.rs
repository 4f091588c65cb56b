//! Type registry
//!
//! Arena of every [`ModelType`] in a service description, indexed by the
//! structural fingerprint [`TypeKey`]. Handles returned by the registry stay
//! valid for its whole lifetime: types are only ever appended.
//!
//! The registry has no internal locking. A generation pass owns it
//! exclusively and threads it through each rewrite; running passes in
//! parallel over one registry needs a mutex around [`crate::get_or_register`].

use std::collections::HashMap;

use ir::{ModelType, PageIterator, PollingHandle, TypeId, TypeKey};
use serde::{Deserialize, Serialize};

use crate::{RegistryError, Result};

/// Set of model types keyed by structural equality.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(from = "Vec<ModelType>", into = "Vec<ModelType>")]
pub struct TypeRegistry {
    types: Vec<ModelType>,
    index: HashMap<TypeKey, TypeId>,
}

impl TypeRegistry {
    /// Create an empty registry
    pub fn new() -> Self { Self::default() }

    /// Whether a structurally equal type is registered
    pub fn contains(&self, candidate: &ModelType) -> bool {
        self.index.contains_key(&candidate.key())
    }

    /// Handle of the registered type structurally equal to `candidate`
    pub fn canonical_of(&self, candidate: &ModelType) -> Result<TypeId> {
        let key = candidate.key();
        self.index.get(&key).copied().ok_or(RegistryError::NotFound(key))
    }

    /// Append `ty` unconditionally.
    ///
    /// Callers must check [`contains`](Self::contains) first: adding a type
    /// whose key is already present stores a second member, and the index
    /// keeps pointing at the first one. Use [`crate::get_or_register`] for
    /// wrapper types.
    pub fn add(&mut self, ty: ModelType) -> TypeId {
        let id = TypeId::new(self.types.len());
        self.index.entry(ty.key()).or_insert(id);
        self.types.push(ty);
        id
    }

    /// Registered type behind a handle
    pub fn get(&self, id: TypeId) -> Option<&ModelType> { self.types.get(id.index()) }

    /// Number of registered members
    pub fn len(&self) -> usize { self.types.len() }

    /// Whether nothing is registered
    pub fn is_empty(&self) -> bool { self.types.is_empty() }

    /// All members in registration order
    pub fn iter(&self) -> impl Iterator<Item = (TypeId, &ModelType)> {
        self.types.iter().enumerate().map(|(i, ty)| (TypeId::new(i), ty))
    }

    /// Synthesized polling handles in registration order
    pub fn polling_handles(&self) -> impl Iterator<Item = (TypeId, &PollingHandle)> {
        self.iter().filter_map(|(id, ty)| ty.as_polling_handle().map(|h| (id, h)))
    }

    /// Synthesized page iterators in registration order
    pub fn page_iterators(&self) -> impl Iterator<Item = (TypeId, &PageIterator)> {
        self.iter().filter_map(|(id, ty)| ty.as_page_iterator().map(|p| (id, p)))
    }

    /// Number of members added by the wrapper pass
    pub fn synthetic_count(&self) -> usize {
        self.types.iter().filter(|ty| ty.is_synthetic()).count()
    }
}

impl PartialEq for TypeRegistry {
    fn eq(&self, other: &Self) -> bool { self.types == other.types }
}

impl Eq for TypeRegistry {}

impl From<Vec<ModelType>> for TypeRegistry {
    fn from(types: Vec<ModelType>) -> Self {
        let mut registry = Self::new();
        for ty in types {
            registry.add(ty);
        }
        registry
    }
}

impl From<TypeRegistry> for Vec<ModelType> {
    fn from(registry: TypeRegistry) -> Self { registry.types }
}
