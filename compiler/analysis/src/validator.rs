//! Model Validation
//!
//! Checks that every type handle a method or wrapper points at is
//! registered, that composed responses reference the right wrapper kinds,
//! and that method identities are unique.

use std::collections::{BTreeMap, HashSet};

use ir::{Method, ModelType, ReturnType, TypeId};
use registry::{ServiceDescription, TypeRegistry};

/// Model Validator
#[derive(Debug, Default, Clone, Copy)]
pub struct ModelValidator;

impl ModelValidator {
    /// Create a new model validator
    pub fn new() -> Self { Self }

    /// Validate a service description and return validation errors
    pub fn validate(&self, service: &ServiceDescription) -> Vec<String> {
        let mut errors = Vec::new();
        let types = service.types();

        // 1) Unique method identities
        let mut seen = HashSet::new();
        for method in service.methods() {
            if !seen.insert(method.identity()) {
                errors.push(format!("Duplicate method: {}", method.qualified_name()));
            }
        }

        // 2) Per-method return types
        for method in service.methods() {
            self.validate_return_type(method, types, &mut errors);
        }

        // 3) Wrappers point at registered types
        for (id, ty) in types.iter() {
            match ty {
                ModelType::PageIterator(pager) => {
                    if types.get(pager.element).is_none() {
                        errors.push(format!(
                            "Page iterator {} pages over unregistered type {}",
                            id, pager.element
                        ));
                    }
                }
                ModelType::PollingHandle(handle) => {
                    if let Some(result) = handle.result {
                        if types.get(result).is_none() {
                            errors.push(format!(
                                "Polling handle `{}` resolves to unregistered type {}",
                                handle.name, result
                            ));
                        }
                    }
                }
                ModelType::Primitive(_) | ModelType::Composite(_) => {}
            }
        }

        errors
    }

    /// Polling handle names synthesized for more than one method.
    ///
    /// A service method literally named `<Method>All` gets the same
    /// synthesized name as the list-all handle of `<Method>`. The registry
    /// keeps both apart through the list-all marker, but a renderer that
    /// only looks at names would emit two declarations with one identifier.
    /// Distinct methods whose names normalize alike (`widgets.Create` and an
    /// ungrouped `WidgetsCreate`) end up sharing one registry member, which
    /// is reported the same way.
    pub fn name_collisions(&self, service: &ServiceDescription) -> Vec<String> {
        let types = service.types();
        let mut by_name: BTreeMap<&str, Vec<String>> = BTreeMap::new();
        let mut note = |name, label: String| {
            let origins = by_name.entry(name).or_default();
            if !origins.contains(&label) {
                origins.push(label);
            }
        };

        for (_, handle) in types.polling_handles() {
            note(handle.name.as_str(), handle_label(handle.origin(), handle.list_all));
        }
        for method in service.methods() {
            if !method.kind.is_long_running() {
                continue;
            }
            for id in method.return_type.referenced_types() {
                let Some(handle) = types.get(id).and_then(ModelType::as_polling_handle) else {
                    continue;
                };
                if !handle.originates_from(&method.group, &method.name) {
                    let label = handle_label(method.qualified_name(), handle.list_all);
                    note(handle.name.as_str(), label);
                }
            }
        }

        by_name
            .into_iter()
            .filter(|(_, origins)| origins.len() > 1)
            .map(|(name, origins)| {
                format!(
                    "Polling handle name `{}` is synthesized for {}",
                    name,
                    origins.join(", ")
                )
            })
            .collect()
    }

    fn validate_return_type(
        &self,
        method: &Method,
        types: &TypeRegistry,
        errors: &mut Vec<String>,
    ) {
        for id in method.return_type.referenced_types() {
            if types.get(id).is_none() {
                errors.push(format!(
                    "Method `{}` references unregistered type {}",
                    method.qualified_name(),
                    id
                ));
            }
        }

        if let ReturnType::LroPaged(composed) = &method.return_type {
            expect_handle(method, types, composed.handle, false, errors);
            expect_handle(method, types, composed.list_all_handle, true, errors);
            if let Some(ty) = types.get(composed.pager) {
                if ty.as_page_iterator().is_none() {
                    errors.push(format!(
                        "Method `{}` pager {} is a {}, not a page iterator",
                        method.qualified_name(),
                        composed.pager,
                        ty.variant_name()
                    ));
                }
            }
        }
    }
}

fn handle_label(origin: String, list_all: bool) -> String {
    if list_all {
        format!("{} (list all)", origin)
    } else {
        origin
    }
}

fn expect_handle(
    method: &Method,
    types: &TypeRegistry,
    id: TypeId,
    list_all: bool,
    errors: &mut Vec<String>,
) {
    let Some(ty) = types.get(id) else { return };
    match ty.as_polling_handle() {
        Some(handle) if handle.list_all == list_all => {}
        Some(_) => errors.push(format!(
            "Method `{}` handle {} has the wrong list-all marker",
            method.qualified_name(),
            id
        )),
        None => errors.push(format!(
            "Method `{}` handle {} is a {}, not a polling handle",
            method.qualified_name(),
            id,
            ty.variant_name()
        )),
    }
}
