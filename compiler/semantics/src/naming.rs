//! The naming service turns method identities into canonical identifiers.
//! Casing and escaping rules belong to the target language; this crate only
//! needs the normalization to be applied the same way on every path.

use heck::ToUpperCamelCase;

/// Canonical identifier derivation
pub trait IdentifierNaming {
    /// Normalized identifier for the concatenation of `parts`
    fn identifier(&self, parts: &[&str]) -> String;
}

/// Upper camel case concatenation: `["widgets", "list_all"]` → `WidgetsListAll`
#[derive(Debug, Clone, Copy, Default)]
pub struct PascalCaseNaming;

impl IdentifierNaming for PascalCaseNaming {
    fn identifier(&self, parts: &[&str]) -> String {
        parts.iter().map(|part| part.to_upper_camel_case()).collect()
    }
}

impl<N: IdentifierNaming + ?Sized> IdentifierNaming for &N {
    fn identifier(&self, parts: &[&str]) -> String { (**self).identifier(parts) }
}
