//! Service methods and their return shapes

use serde::{Deserialize, Serialize};

use crate::model_type::TypeId;

/// How the remote operation behind a method delivers its result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperationKind {
    /// Single synchronous request/response
    #[default]
    Plain,
    /// Result set spread across multiple page fetches
    Paginated,
    /// Operation completes asynchronously and must be polled
    LongRunning,
    /// Long-running operation whose final result is paginated
    PaginatedLongRunning,
}

impl OperationKind {
    /// Build a classification from its two independent traits
    pub fn from_flags(paginated: bool, long_running: bool) -> Self {
        match (paginated, long_running) {
            (false, false) => OperationKind::Plain,
            (true, false) => OperationKind::Paginated,
            (false, true) => OperationKind::LongRunning,
            (true, true) => OperationKind::PaginatedLongRunning,
        }
    }

    /// Whether results arrive in pages
    pub fn is_paginated(self) -> bool {
        matches!(self, OperationKind::Paginated | OperationKind::PaginatedLongRunning)
    }

    /// Whether the operation has to be polled
    pub fn is_long_running(self) -> bool {
        matches!(self, OperationKind::LongRunning | OperationKind::PaginatedLongRunning)
    }

    /// Drop the traits whose wrappers are disabled
    pub fn masked(self, page_wrappers: bool, long_running_wrappers: bool) -> Self {
        Self::from_flags(
            self.is_paginated() && page_wrappers,
            self.is_long_running() && long_running_wrappers,
        )
    }
}

/// Paging details resolved by the parser
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PagingMetadata {
    /// Property of the page payload holding the next page link
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_link_name: Option<String>,
    /// Dedicated operation that fetches the next page, if the service has one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_operation: Option<String>,
}

impl PagingMetadata {
    /// Next-page requests are built from the next link when no dedicated
    /// next-page operation exists.
    pub fn needs_preparer(&self) -> bool {
        self.next_link_name.is_some() && self.next_operation.is_none()
    }
}

/// Response as declared by the service: a body and its header metadata
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ResponseType {
    /// Body type, `None` for empty responses
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<TypeId>,
    /// Header type, carried through every rewrite unchanged
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub headers: Option<TypeId>,
}

/// Response of a paginated long-running method after wrapping
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LroPagedResponse {
    /// Handle resolving to the first page
    pub handle: TypeId,
    /// Handle resolving to an iterator over every page
    pub list_all_handle: TypeId,
    /// Iterator shared with other methods paging the same element type
    pub pager: TypeId,
    /// Original header type
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub headers: Option<TypeId>,
}

/// Declared return type of a method
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum ReturnType {
    /// Plain body + headers; after wrapping the body is the wrapper
    Response(ResponseType),
    /// Composed response of a paginated long-running method
    LroPaged(LroPagedResponse),
}

impl Default for ReturnType {
    fn default() -> Self { ReturnType::Response(ResponseType::default()) }
}

impl ReturnType {
    /// Shorthand for a plain response
    pub fn response(body: Option<TypeId>, headers: Option<TypeId>) -> Self {
        ReturnType::Response(ResponseType { body, headers })
    }

    /// Header metadata, whatever the shape
    pub fn headers(&self) -> Option<TypeId> {
        match self {
            ReturnType::Response(r) => r.headers,
            ReturnType::LroPaged(r) => r.headers,
        }
    }

    /// Body of a plain response
    pub fn body(&self) -> Option<TypeId> {
        match self {
            ReturnType::Response(r) => r.body,
            ReturnType::LroPaged(_) => None,
        }
    }

    /// Every type handle this return type points at
    pub fn referenced_types(&self) -> Vec<TypeId> {
        match self {
            ReturnType::Response(r) => r.body.into_iter().chain(r.headers).collect(),
            ReturnType::LroPaged(r) => [r.handle, r.list_all_handle, r.pager]
                .into_iter()
                .chain(r.headers)
                .collect(),
        }
    }
}

/// A method of the service, identified by `(group, name)`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Method {
    /// Operation group the method belongs to (may be empty)
    #[serde(default)]
    pub group: String,
    /// Method name
    pub name: String,
    /// Method description
    #[serde(default)]
    pub description: String,
    /// Operation classification, determined by the parser
    #[serde(default)]
    pub kind: OperationKind,
    /// Paging details for paginated methods
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paging: Option<PagingMetadata>,
    /// Declared return type; replaced by the wrapper pass
    #[serde(default)]
    pub return_type: ReturnType,
}

impl Method {
    /// Create a method with no description or paging details
    pub fn new(
        group: impl Into<String>,
        name: impl Into<String>,
        kind: OperationKind,
        return_type: ReturnType,
    ) -> Self {
        Self {
            group: group.into(),
            name: name.into(),
            description: String::new(),
            kind,
            paging: None,
            return_type,
        }
    }

    /// Attach paging details
    pub fn with_paging(mut self, paging: PagingMetadata) -> Self {
        self.paging = Some(paging);
        self
    }

    /// `(group, name)` identity
    pub fn identity(&self) -> (&str, &str) { (&self.group, &self.name) }

    /// Human-readable `group.name`, or just `name` for ungrouped methods
    pub fn qualified_name(&self) -> String {
        if self.group.is_empty() {
            self.name.clone()
        } else {
            format!("{}.{}", self.group, self.name)
        }
    }

    /// Whether a page iterator needs a request preparer for this method
    pub fn needs_preparer(&self) -> bool {
        self.paging.as_ref().map(PagingMetadata::needs_preparer).unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classification_flags() {
        assert!(!OperationKind::Plain.is_paginated());
        assert!(OperationKind::Paginated.is_paginated());
        assert!(!OperationKind::Paginated.is_long_running());
        assert!(OperationKind::LongRunning.is_long_running());
        assert!(OperationKind::PaginatedLongRunning.is_paginated());
        assert!(OperationKind::PaginatedLongRunning.is_long_running());
    }

    #[test]
    fn masking_disables_traits() {
        let kind = OperationKind::PaginatedLongRunning;
        assert_eq!(kind.masked(true, true), kind);
        assert_eq!(kind.masked(false, true), OperationKind::LongRunning);
        assert_eq!(kind.masked(true, false), OperationKind::Paginated);
        assert_eq!(kind.masked(false, false), OperationKind::Plain);
    }

    #[test]
    fn preparer_needed_only_without_next_operation() {
        let link_only =
            PagingMetadata { next_link_name: Some("nextLink".into()), next_operation: None };
        assert!(link_only.needs_preparer());

        let with_op = PagingMetadata {
            next_link_name: Some("nextLink".into()),
            next_operation: Some("ListNext".into()),
        };
        assert!(!with_op.needs_preparer());
        assert!(!PagingMetadata::default().needs_preparer());
    }

    #[test]
    fn qualified_name_skips_empty_group() {
        let ungrouped = Method::new("", "Create", OperationKind::Plain, ReturnType::default());
        assert_eq!(ungrouped.qualified_name(), "Create");
        let grouped = Method::new("widgets", "Create", OperationKind::Plain, ReturnType::default());
        assert_eq!(grouped.qualified_name(), "widgets.Create");
    }

    #[test]
    fn lro_paged_references_every_wrapper() {
        let rt = ReturnType::LroPaged(LroPagedResponse {
            handle: TypeId::new(1),
            list_all_handle: TypeId::new(2),
            pager: TypeId::new(3),
            headers: Some(TypeId::new(4)),
        });
        assert_eq!(
            rt.referenced_types(),
            vec![TypeId::new(1), TypeId::new(2), TypeId::new(3), TypeId::new(4)]
        );
        assert_eq!(rt.body(), None);
        assert_eq!(rt.headers(), Some(TypeId::new(4)));
    }
}
