use std::sync::Arc;

use crate::metadata::token::Token;

/// A reference to a `TypeRef`
pub type TypeRefRc = Arc<TypeRef>;

/// A pointer-like mention of a type defined elsewhere.
///
/// Carries only identity; resolution to a [`crate::metadata::tables::TypeDef`]
/// happens through the store and must yield exactly one definition.
pub struct TypeRef {
    /// `RowID`
    pub rid: u32,
    /// Token
    pub token: Token,
    /// `TypeNamespace` of the referenced type
    pub namespace: String,
    /// `TypeName` of the referenced type
    pub name: String,
}

impl TypeRef {
    /// Namespace-qualified name, or the bare name for namespace-less types
    #[must_use]
    pub fn fullname(&self) -> String {
        if self.namespace.is_empty() {
            self.name.clone()
        } else {
            format!("{}.{}", self.namespace, self.name)
        }
    }
}
