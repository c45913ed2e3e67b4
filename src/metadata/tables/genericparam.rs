use std::sync::Arc;

/// A reference to a `GenericParam`
pub type GenericParamRc = Arc<GenericParam>;

/// A formal generic parameter of a type definition.
#[derive(Debug)]
pub struct GenericParam {
    /// The 2-byte index of the parameter, counting from 0
    pub number: u32,
    /// The parameter name (e.g. "T", "TKey")
    pub name: String,
}
