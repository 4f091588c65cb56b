//! Method return-type rewriting.
//!
//! Wraps the return type of a paginated and/or long-running method in the
//! synthesized wrapper it needs:
//!
//! | classification             | new return type                                  |
//! |----------------------------|--------------------------------------------------|
//! | plain                      | unchanged                                        |
//! | paginated                  | `Response(pager, headers)`                       |
//! | long-running               | `Response(handle, headers)`                      |
//! | paginated + long-running   | `LroPaged(handle, list_all_handle, pager, headers)` |
//!
//! Wrappers are registered through [`registry::get_or_register`] before the
//! method is touched, so a method never points at an unregistered wrapper.
//! Distinct methods whose names normalize to the same handle identity share
//! that handle only if they resolve to the same result type; otherwise the
//! rewrite fails with [`SemanticError::HandleConflict`].
//! Rewriting is idempotent for the registry but not for a method: rewriting
//! the same method twice wraps the wrapper. The driver rewrites each method
//! once.

use ir::{LroPagedResponse, Method, ModelType, OperationKind, PollingHandle, ReturnType, TypeId};
use registry::{get_or_register, TypeRegistry};
use semantics::{IdentifierNaming, PascalCaseNaming, SemanticError, WrapperTypeFactory};

/// What a single rewrite did to a method
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RewriteOutcome {
    /// Plain method, left as is
    Unchanged,
    /// Body replaced by a page iterator
    Paged {
        /// Page iterator handle
        pager: TypeId,
    },
    /// Body replaced by a polling handle
    LongRunning {
        /// Polling handle
        handle: TypeId,
    },
    /// Return type replaced by the composed paginated long-running response
    PagedLongRunning(LroPagedResponse),
}

/// Rewrites method return types, sharing wrappers through the registry
#[derive(Debug, Clone, Default)]
pub struct MethodRewriter<N = PascalCaseNaming> {
    factory: WrapperTypeFactory<N>,
}

impl<N: IdentifierNaming> MethodRewriter<N> {
    /// Create a rewriter naming wrappers through `naming`
    pub fn new(naming: N) -> Self { Self { factory: WrapperTypeFactory::new(naming) } }

    /// Rewrite `method` according to its own classification
    pub fn rewrite(
        &self,
        method: &mut Method,
        types: &mut TypeRegistry,
    ) -> semantics::Result<RewriteOutcome> {
        let kind = method.kind;
        self.rewrite_as(method, kind, types)
    }

    /// Rewrite `method` as if it were classified `kind`.
    ///
    /// The driver uses this to leave out wrapper kinds disabled by
    /// configuration. `kind` must not claim a trait the method lacks.
    pub fn rewrite_as(
        &self,
        method: &mut Method,
        kind: OperationKind,
        types: &mut TypeRegistry,
    ) -> semantics::Result<RewriteOutcome> {
        match kind {
            OperationKind::Plain => Ok(RewriteOutcome::Unchanged),
            OperationKind::Paginated => {
                self.wrap_paginated(method, types).map(|pager| RewriteOutcome::Paged { pager })
            }
            OperationKind::LongRunning => self
                .wrap_long_running(method, types)
                .map(|handle| RewriteOutcome::LongRunning { handle }),
            OperationKind::PaginatedLongRunning => self
                .wrap_paginated_long_running(method, types)
                .map(RewriteOutcome::PagedLongRunning),
        }
    }

    /// Replace the body of a paginated method with its page iterator
    pub fn wrap_paginated(
        &self,
        method: &mut Method,
        types: &mut TypeRegistry,
    ) -> semantics::Result<TypeId> {
        let candidate = self.factory.build_page_iterator(method)?;
        let pager = get_or_register(types, ModelType::from(candidate));

        let headers = method.return_type.headers();
        method.return_type = ReturnType::response(Some(pager), headers);
        tracing::debug!(method = %method.qualified_name(), %pager, "wrapped paginated method");
        Ok(pager)
    }

    /// Replace the body of a long-running method with its polling handle
    pub fn wrap_long_running(
        &self,
        method: &mut Method,
        types: &mut TypeRegistry,
    ) -> semantics::Result<TypeId> {
        let candidate = self.factory.build_polling_handle(method, None)?;
        check_shared_handle(types, method, &candidate)?;
        let handle = get_or_register(types, ModelType::from(candidate));

        let headers = method.return_type.headers();
        method.return_type = ReturnType::response(Some(handle), headers);
        tracing::debug!(method = %method.qualified_name(), %handle, "wrapped long-running method");
        Ok(handle)
    }

    /// Replace the return type of a paginated long-running method with the
    /// composed response: primary handle, list-all handle and page iterator
    pub fn wrap_paginated_long_running(
        &self,
        method: &mut Method,
        types: &mut TypeRegistry,
    ) -> semantics::Result<LroPagedResponse> {
        // Build and check every candidate first so a failure registers nothing
        let pager = self.factory.build_page_iterator(method)?;
        let handle = self.factory.build_polling_handle(method, None)?;
        let list_all_name = self.factory.derive_list_all_name(method);
        let list_all = self.factory.build_polling_handle(method, Some(list_all_name))?;
        check_shared_handle(types, method, &handle)?;
        check_shared_handle(types, method, &list_all)?;

        let composed = LroPagedResponse {
            handle: get_or_register(types, ModelType::from(handle)),
            list_all_handle: get_or_register(types, ModelType::from(list_all)),
            pager: get_or_register(types, ModelType::from(pager)),
            headers: method.return_type.headers(),
        };
        method.return_type = ReturnType::LroPaged(composed);
        tracing::debug!(
            method = %method.qualified_name(),
            handle = %composed.handle,
            list_all_handle = %composed.list_all_handle,
            pager = %composed.pager,
            "wrapped paginated long-running method"
        );
        Ok(composed)
    }
}

/// A registered handle with the candidate's identity may be reused by
/// another method only when both resolve to the same result type.
fn check_shared_handle(
    types: &TypeRegistry,
    method: &Method,
    candidate: &PollingHandle,
) -> semantics::Result<()> {
    let existing = types
        .canonical_of(&ModelType::from(candidate.clone()))
        .ok()
        .and_then(|id| types.get(id))
        .and_then(ModelType::as_polling_handle);
    match existing {
        Some(existing)
            if !existing.originates_from(&method.group, &method.name)
                && existing.result != candidate.result =>
        {
            Err(SemanticError::HandleConflict {
                name: candidate.name.clone(),
                method: method.qualified_name(),
                existing: existing.origin(),
            })
        }
        _ => Ok(()),
    }
}
