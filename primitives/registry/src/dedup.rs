//! Deduplication of synthesized types

use ir::{ModelType, TypeId};

use crate::TypeRegistry;

/// Handle of the registered type structurally equal to `candidate`,
/// registering `candidate` first if there is none.
///
/// This is the only sanctioned way to add wrapper types. Equal candidates
/// always resolve to the same handle and grow the registry by at most one
/// member.
pub fn get_or_register(registry: &mut TypeRegistry, candidate: ModelType) -> TypeId {
    if let Ok(existing) = registry.canonical_of(&candidate) {
        tracing::trace!(key = %candidate.key(), id = %existing, "reusing registered type");
        return existing;
    }
    let key = candidate.key();
    let id = registry.add(candidate);
    tracing::trace!(key = %key, id = %id, "registered new type");
    id
}
