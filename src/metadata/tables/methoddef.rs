use std::sync::Arc;

use bitflags::bitflags;

use crate::metadata::{signatures::SignatureMethod, tables::ParamRc, token::Token};

/// A reference to a `MethodDef`
pub type MethodRc = Arc<MethodDef>;

/// Bitmask for access-flag extraction from raw method attributes
pub const METHOD_ACCESS_MASK: u32 = 0x0007;
/// Bitmask for vtable-layout extraction from raw method attributes
pub const METHOD_VTABLE_LAYOUT_MASK: u32 = 0x0100;

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq)]
    /// Method modifiers and properties
    pub struct MethodModifiers: u32 {
        /// Defined on type, else per instance
        const STATIC = 0x0010;
        /// Method cannot be overridden
        const FINAL = 0x0020;
        /// Method is virtual
        const VIRTUAL = 0x0040;
        /// Method hides by name+sig, else just by name
        const HIDE_BY_SIG = 0x0080;
        /// Method does not provide an implementation
        const ABSTRACT = 0x0400;
        /// Method is special (accessor, operator, ...)
        const SPECIAL_NAME = 0x0800;
        /// Runtime provides 'special' behavior, depending upon the name of the method
        const RTSPECIAL_NAME = 0x1000;
    }
}

impl MethodModifiers {
    /// Extract method modifiers from raw method attributes
    #[must_use]
    pub fn from_method_flags(flags: u32) -> Self {
        let modifiers = flags & !METHOD_ACCESS_MASK & !METHOD_VTABLE_LAYOUT_MASK;
        Self::from_bits_truncate(modifiers)
    }
}

/// A method definition: name, attribute flags, signature, parameter records.
#[derive(Debug)]
pub struct MethodDef {
    /// `RowID`
    pub rid: u32,
    /// Token
    pub token: Token,
    /// bitmask of `MethodAttributes`
    pub flags: u32,
    /// The method name
    pub name: String,
    /// The parsed method signature
    pub signature: SignatureMethod,
    /// Parameter records, ordered by sequence number (a sequence-0 row, when
    /// present, carries return-value metadata)
    pub params: Vec<ParamRc>,
}

impl MethodDef {
    /// Modifier flags extracted from the raw attributes
    #[must_use]
    pub fn modifiers(&self) -> MethodModifiers {
        MethodModifiers::from_method_flags(self.flags)
    }

    /// Whether the method is static
    #[must_use]
    pub fn is_static(&self) -> bool {
        self.modifiers().contains(MethodModifiers::STATIC)
    }

    /// Whether the method carries the special-name marker
    #[must_use]
    pub fn is_special_name(&self) -> bool {
        self.modifiers().contains(MethodModifiers::SPECIAL_NAME)
    }

    /// Whether this method is an instance constructor.
    ///
    /// Constructors are excluded from overload aggregation; they surface
    /// through activation factories, not interface contracts.
    #[must_use]
    pub fn is_constructor(&self) -> bool {
        self.modifiers().contains(MethodModifiers::RTSPECIAL_NAME) && self.name == ".ctor"
    }

    /// Whether this is a property getter by accessor naming convention
    #[must_use]
    pub fn is_get_method(&self) -> bool {
        self.is_special_name() && self.name.starts_with("get_")
    }

    /// Whether this is a property setter by accessor naming convention
    #[must_use]
    pub fn is_put_method(&self) -> bool {
        self.is_special_name() && self.name.starts_with("put_")
    }

    /// Whether this is an event subscription method by accessor naming convention
    #[must_use]
    pub fn is_add_method(&self) -> bool {
        self.is_special_name() && self.name.starts_with("add_")
    }

    /// Whether this is an event unsubscription method by accessor naming convention
    #[must_use]
    pub fn is_remove_method(&self) -> bool {
        self.is_special_name() && self.name.starts_with("remove_")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn method(name: &str, flags: u32) -> MethodDef {
        MethodDef {
            rid: 1,
            token: Token::new(0x06000001),
            flags,
            name: name.to_string(),
            signature: SignatureMethod::default(),
            params: Vec::new(),
        }
    }

    #[test]
    fn test_modifier_extraction_strips_access_bits() {
        // PUBLIC (0x6) | STATIC | SPECIAL_NAME
        let m = method("get_Value", 0x0006 | 0x0010 | 0x0800);
        assert!(m.is_static());
        assert!(m.is_special_name());
        assert!(!m.modifiers().contains(MethodModifiers::ABSTRACT));
    }

    #[test]
    fn test_constructor_detection() {
        let ctor = method(".ctor", 0x1800);
        assert!(ctor.is_constructor());

        // Name alone is not enough
        let fake = method(".ctor", 0x0800);
        assert!(!fake.is_constructor());

        // Flag alone is not enough
        let cctor = method(".cctor", 0x1800);
        assert!(!cctor.is_constructor());
    }

    #[test]
    fn test_accessor_naming_predicates() {
        assert!(method("get_Value", 0x0800).is_get_method());
        assert!(method("put_Value", 0x0800).is_put_method());
        assert!(method("add_Changed", 0x0800).is_add_method());
        assert!(method("remove_Changed", 0x0800).is_remove_method());

        // Without SPECIAL_NAME the prefix is just a name
        assert!(!method("get_Value", 0).is_get_method());
        assert!(!method("put_Value", 0).is_put_method());
    }
}
