//! Recursive interpreter over the type-signature grammar.
//!
//! The walker reduces a [`TypeSignature`] - or any of the reference shapes it
//! can contain - to a sequence of [`SignatureVisitor`] calls. Dispatch is
//! exhaustive over the closed grammar, so every reachable shape either lands
//! in a visitor capability or fails resolution; there is no silent
//! fallthrough. The signature grammar is acyclic by construction (a signature
//! cannot contain itself), so plain recursion needs no cycle guard.

use crate::{
    metadata::{
        signatures::{GenericInstSig, TypeDefOrRef, TypeSignature},
        store::MetadataStore,
        tables::{TypeDefRc, TypeRefRc},
    },
    model::{
        category::{enum_representation, get_category, TypeCategory},
        visitor::SignatureVisitor,
    },
    Error::TypeNotFound,
    Result,
};

/// Interprets type signatures against a store, driving a visitor.
pub struct SignatureWalker<'a> {
    store: &'a MetadataStore,
}

impl<'a> SignatureWalker<'a> {
    /// Create a walker over the given store
    #[must_use]
    pub fn new(store: &'a MetadataStore) -> Self {
        SignatureWalker { store }
    }

    /// Walk a type signature, dispatching each shape to the visitor.
    ///
    /// # Errors
    /// Propagates resolution failures and unimplemented visitor capabilities.
    pub fn walk_signature(
        &self,
        signature: &TypeSignature,
        visitor: &mut dyn SignatureVisitor,
    ) -> Result<()> {
        match signature {
            TypeSignature::Element(element) => visitor.visit_element(*element),
            TypeSignature::Coded(coded) => self.walk_coded(coded, visitor),
            TypeSignature::GenericInst(inst) => self.walk_generic_inst(inst, visitor),
            TypeSignature::GenericParam(index) => visitor.visit_generic_param(*index),
        }
    }

    /// Walk a coded reference through whichever table it points into.
    ///
    /// # Errors
    /// Fails if a token dangles, an external reference has no definition, or a
    /// specification is not a generic instantiation.
    pub fn walk_coded(
        &self,
        coded: &TypeDefOrRef,
        visitor: &mut dyn SignatureVisitor,
    ) -> Result<()> {
        match coded {
            TypeDefOrRef::Def(token) => {
                let def = self.store.type_def(token).ok_or(TypeNotFound(*token))?;
                self.walk_type_def(&def, visitor)
            }
            TypeDefOrRef::Ref(token) => {
                let tref = self.store.type_ref(token).ok_or(TypeNotFound(*token))?;
                self.walk_type_ref(&tref, visitor)
            }
            TypeDefOrRef::Spec(token) => {
                let spec = self.store.type_spec(token).ok_or(TypeNotFound(*token))?;
                self.walk_generic_inst(spec.generic_inst()?, visitor)
            }
        }
    }

    /// Walk an external type reference.
    ///
    /// `System.Guid` is recognized structurally and routed to the dedicated
    /// guid capability; every other reference resolves to a definition first.
    ///
    /// # Errors
    /// Fails if resolution to a definition fails.
    pub fn walk_type_ref(
        &self,
        tref: &TypeRefRc,
        visitor: &mut dyn SignatureVisitor,
    ) -> Result<()> {
        if tref.name == "Guid" && tref.namespace == "System" {
            visitor.visit_guid(tref)
        } else {
            let def = self.store.find_required(tref)?;
            self.walk_type_def(&def, visitor)
        }
    }

    /// Dispatch a type definition by category.
    ///
    /// Enums do not reach the visitor as definitions: they resolve to their
    /// underlying primitive representation (unsigned for bitflag enums).
    ///
    /// # Errors
    /// Fails if category classification fails or the visitor capability is
    /// unimplemented.
    pub fn walk_type_def(
        &self,
        def: &TypeDefRc,
        visitor: &mut dyn SignatureVisitor,
    ) -> Result<()> {
        match get_category(self.store, def)? {
            TypeCategory::Class => visitor.visit_class(def),
            TypeCategory::Interface => visitor.visit_interface(def),
            TypeCategory::Delegate => visitor.visit_delegate(def),
            TypeCategory::Struct => visitor.visit_struct(def),
            TypeCategory::Enum => visitor.visit_element(enum_representation(self.store, def)?),
        }
    }

    /// Walk a generic instantiation: the generic type itself, then its
    /// arguments bracketed by begin/end events.
    ///
    /// Arguments recurse through the full grammar, so arbitrarily nested
    /// instantiations emit correctly nested bracketing.
    ///
    /// # Errors
    /// Propagates failures from any nested walk or visitor call.
    pub fn walk_generic_inst(
        &self,
        inst: &GenericInstSig,
        visitor: &mut dyn SignatureVisitor,
    ) -> Result<()> {
        self.walk_coded(&inst.base, visitor)?;
        visitor.begin_generic_args()?;
        for arg in &inst.args {
            self.walk_signature(arg, visitor)?;
        }
        visitor.end_generic_args()
    }
}
