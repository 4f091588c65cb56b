//! Wrapper type construction
//!
//! Builds [`PollingHandle`] and [`PageIterator`] candidates from a method's
//! current shape. Construction is deterministic: the same method always
//! yields structurally equal candidates, which is what lets the caller
//! deduplicate them.

use ir::{Method, PageIterator, PollingHandle};

use crate::naming::{IdentifierNaming, PascalCaseNaming};
use crate::{Result, SemanticError};

/// Suffix appended to the identity of a paginated long-running method to
/// name its "list all" polling handle
pub const LIST_ALL_SUFFIX: &str = "All";

/// Builds wrapper candidates for methods, naming them through `N`
#[derive(Debug, Clone, Default)]
pub struct WrapperTypeFactory<N = PascalCaseNaming> {
    naming: N,
}

impl<N: IdentifierNaming> WrapperTypeFactory<N> {
    /// Create a factory using the given naming service
    pub fn new(naming: N) -> Self { Self { naming } }

    /// Page iterator over the method's current response body.
    ///
    /// Requires a paginated method whose return type still has a body.
    pub fn build_page_iterator(&self, method: &Method) -> Result<PageIterator> {
        if !method.kind.is_paginated() {
            return Err(precondition(method, "a paginated operation"));
        }
        let element =
            method.return_type.body().ok_or_else(|| precondition(method, "a page body type"))?;
        Ok(PageIterator::new(element, method.needs_preparer()))
    }

    /// Polling handle for a long-running method.
    ///
    /// With `name_override` the handle is the method's "list all" handle: it
    /// takes the given identity and carries the list-all marker, so it never
    /// collides with the method's primary handle.
    pub fn build_polling_handle(
        &self,
        method: &Method,
        name_override: Option<String>,
    ) -> Result<PollingHandle> {
        if !method.kind.is_long_running() {
            return Err(precondition(method, "a long-running operation"));
        }
        let list_all = name_override.is_some();
        let name = name_override.unwrap_or_else(|| self.derive_handle_name(method));
        Ok(PollingHandle {
            name,
            list_all,
            group: method.group.clone(),
            method: method.name.clone(),
            result: method.return_type.body(),
        })
    }

    /// Identity of the method's primary polling handle
    pub fn derive_handle_name(&self, method: &Method) -> String {
        self.naming.identifier(&[method.group.as_str(), method.name.as_str()])
    }

    /// Identity of the method's "list all" polling handle.
    ///
    /// Goes through the same normalization as
    /// [`derive_handle_name`](Self::derive_handle_name).
    pub fn derive_list_all_name(&self, method: &Method) -> String {
        self.naming.identifier(&[method.group.as_str(), method.name.as_str(), LIST_ALL_SUFFIX])
    }
}

fn precondition(method: &Method, requirement: &'static str) -> SemanticError {
    SemanticError::Precondition { method: method.qualified_name(), requirement }
}
