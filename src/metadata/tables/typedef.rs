use std::sync::Arc;

use crate::metadata::{
    signatures::TypeDefOrRef,
    tables::{EventRc, GenericParamRc, MethodRc, PropertyRc},
    token::Token,
};

/// A reference to a `TypeDef`
pub type TypeDefRc = Arc<TypeDef>;

#[allow(non_snake_case)]
/// Selected flags of the 4-byte `TypeAttributes` bitmask
pub mod TypeAttributes {
    /// Type visibility mask
    pub const VISIBILITY_MASK: u32 = 0x0000_0007;
    /// Type is visible outside the assembly
    pub const PUBLIC: u32 = 0x0000_0001;
    /// Type is an interface
    pub const INTERFACE: u32 = 0x0000_0020;
    /// Type cannot be instantiated
    pub const ABSTRACT: u32 = 0x0000_0080;
    /// Type cannot be extended
    pub const SEALED: u32 = 0x0000_0100;
    /// Type is a Windows Runtime type
    pub const WINDOWS_RUNTIME: u32 = 0x0000_4000;
}

/// Presence marker for a custom attribute applied to a record.
///
/// Only the attribute type's identity is captured; decoding attribute blobs
/// (constructor arguments, named fields) belongs to the metadata reader, not
/// the binding model, which only ever asks "is this marker present".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeRef {
    /// Namespace of the attribute type
    pub namespace: String,
    /// Name of the attribute type
    pub name: String,
}

/// A fully described type owned by the analyzed component.
///
/// Child lists preserve metadata declaration order; the interface closure and
/// overload aggregation depend on that order being stable.
#[derive(Debug)]
pub struct TypeDef {
    /// `RowID`
    pub rid: u32,
    /// Token
    pub token: Token,
    /// bitmask of `TypeAttributes`
    pub flags: u32,
    /// `TypeNamespace` (can be empty)
    pub namespace: String,
    /// `TypeName`
    pub name: String,
    /// This type's base aka 'extends' target, if any
    pub extends: Option<TypeDefOrRef>,
    /// All methods this type declares, in declaration order
    pub methods: Vec<MethodRc>,
    /// All interfaces this type implements directly, in declaration order
    pub interfaces: Vec<TypeDefOrRef>,
    /// Formal generic parameters of this type
    pub generic_params: Vec<GenericParamRc>,
    /// All properties this type declares
    pub properties: Vec<PropertyRc>,
    /// All events this type declares
    pub events: Vec<EventRc>,
    /// Custom attributes applied to this type (presence only)
    pub custom_attributes: Vec<AttributeRef>,
}

impl TypeDef {
    /// Namespace-qualified name, or the bare name for namespace-less types
    #[must_use]
    pub fn fullname(&self) -> String {
        if self.namespace.is_empty() {
            self.name.clone()
        } else {
            format!("{}.{}", self.namespace, self.name)
        }
    }

    /// Whether the given marker attribute is applied to this type
    #[must_use]
    pub fn has_attribute(&self, namespace: &str, name: &str) -> bool {
        self.custom_attributes
            .iter()
            .any(|attr| attr.namespace == namespace && attr.name == name)
    }

    /// Whether this type has formal generic parameters
    #[must_use]
    pub fn is_parameterized(&self) -> bool {
        !self.generic_params.is_empty()
    }

    /// Whether the `INTERFACE` flag is set
    #[must_use]
    pub fn is_interface(&self) -> bool {
        self.flags & TypeAttributes::INTERFACE != 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain_type(namespace: &str, name: &str) -> TypeDef {
        TypeDef {
            rid: 1,
            token: Token::new(0x02000001),
            flags: TypeAttributes::PUBLIC,
            namespace: namespace.to_string(),
            name: name.to_string(),
            extends: None,
            methods: Vec::new(),
            interfaces: Vec::new(),
            generic_params: Vec::new(),
            properties: Vec::new(),
            events: Vec::new(),
            custom_attributes: Vec::new(),
        }
    }

    #[test]
    fn test_fullname() {
        assert_eq!(plain_type("Test", "Widget").fullname(), "Test.Widget");
        assert_eq!(plain_type("", "Widget").fullname(), "Widget");
    }

    #[test]
    fn test_has_attribute() {
        let mut ty = plain_type("Test", "Color");
        ty.custom_attributes.push(AttributeRef {
            namespace: "System".to_string(),
            name: "FlagsAttribute".to_string(),
        });

        assert!(ty.has_attribute("System", "FlagsAttribute"));
        assert!(!ty.has_attribute("System", "ObsoleteAttribute"));
        assert!(!ty.has_attribute("Test", "FlagsAttribute"));
    }

    #[test]
    fn test_interface_flag() {
        let mut ty = plain_type("Test", "IWidget");
        assert!(!ty.is_interface());
        ty.flags |= TypeAttributes::INTERFACE;
        assert!(ty.is_interface());
    }
}
