use std::sync::Arc;

use crate::{
    metadata::{
        signatures::{GenericInstSig, TypeSignature},
        token::Token,
    },
    Result,
};

/// A reference to a `TypeSpec`
pub type TypeSpecRc = Arc<TypeSpec>;

/// A type specification: a signature-described type, in practice a generic
/// instantiation.
pub struct TypeSpec {
    /// `RowID`
    pub rid: u32,
    /// Token
    pub token: Token,
    /// The signature this specification describes
    pub signature: TypeSignature,
}

impl TypeSpec {
    /// The generic instantiation this specification carries.
    ///
    /// # Errors
    /// Returns an invalid-metadata error if the signature is anything other
    /// than a generic instantiation; interface lists and `extends` targets may
    /// only reference specifications of that shape.
    pub fn generic_inst(&self) -> Result<&GenericInstSig> {
        match &self.signature {
            TypeSignature::GenericInst(inst) => Ok(inst),
            other => Err(invalid_metadata!(
                "TypeSpec {} does not describe a generic instantiation (found {:?})",
                self.token,
                other
            )),
        }
    }
}
