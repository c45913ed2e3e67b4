use std::sync::Arc;

use crate::metadata::{tables::MethodSemanticsRc, token::Token};

/// A reference to a `Property`
pub type PropertyRc = Arc<Property>;

/// A property record with its semantic linkages to accessor methods.
#[derive(Debug)]
pub struct Property {
    /// `RowID`
    pub rid: u32,
    /// Token
    pub token: Token,
    /// The property name
    pub name: String,
    /// Semantic linkages to this property's accessor methods
    pub semantics: Vec<MethodSemanticsRc>,
}
