use std::sync::Arc;

use crate::metadata::tables::MethodRc;

/// A reference to a `MethodSemantics`
pub type MethodSemanticsRc = Arc<MethodSemantics>;

#[allow(non_snake_case)]
/// All possible flags for `MethodSemanticsAttributes`
pub mod MethodSemanticsAttributes {
    /// Setter for property
    pub const SETTER: u32 = 0x0001;
    /// Getter for property
    pub const GETTER: u32 = 0x0002;
    /// Other method for property or event
    pub const OTHER: u32 = 0x0004;
    /// `AddOn` method for event
    pub const ADD_ON: u32 = 0x0008;
    /// `RemoveOn` method for event
    pub const REMOVE_ON: u32 = 0x0010;
    /// Fire method for event
    pub const FIRE: u32 = 0x0020;
}

/// The semantic linkage between a property or event and one of its accessor
/// methods: which method is the getter, setter, adder, remover, etc.
#[derive(Debug)]
pub struct MethodSemantics {
    /// a 2-byte bitmask of type `MethodSemanticsAttributes`
    pub semantics: u32,
    /// The linked method
    pub method: MethodRc,
}
