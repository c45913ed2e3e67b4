//! Read-only metadata snapshot with token and name indices.
//!
//! The [`MetadataStore`] is the upstream boundary of the analysis: it owns the
//! typed records and answers the capability queries the model layer needs -
//! record lookup by token, definition lookup by full name, and resolution of
//! coded references through all three tables. It is populated once (see
//! [`crate::metadata::builder`]) and never mutated afterwards; every query is a
//! pure read, so sharing a store across threads is safe.
//!
//! # Lookup Architecture
//!
//! - **Token-based lookup**: per-table `SkipMap<Token, Rc>` primary storage
//! - **Name-based lookup**: a `DashMap` fullname index over type definitions
//!
//! # Examples
//!
//! ```rust
//! use dotbind::metadata::builder::{StoreBuilder, TypeBuilder};
//!
//! let mut sb = StoreBuilder::new();
//! TypeBuilder::new("Widget").namespace("Test").build(&mut sb);
//! let store = sb.build();
//!
//! let widget = store.find_by_fullname("Test", "Widget").unwrap();
//! assert_eq!(widget.name, "Widget");
//! ```

use crossbeam_skiplist::SkipMap;
use dashmap::DashMap;

use crate::{
    metadata::{
        signatures::TypeDefOrRef,
        tables::{TypeDefRc, TypeRef, TypeRefRc, TypeSpecRc},
        token::Token,
    },
    Error::TypeNotFound,
    Result,
};

/// The immutable metadata snapshot the analysis runs against.
pub struct MetadataStore {
    /// All type definitions, by token
    type_defs: SkipMap<Token, TypeDefRc>,
    /// All external type references, by token
    type_refs: SkipMap<Token, TypeRefRc>,
    /// All type specifications, by token
    type_specs: SkipMap<Token, TypeSpecRc>,
    /// Fullname ("Ns.Name") index over type definitions
    fullname_index: DashMap<String, Token>,
}

impl MetadataStore {
    /// Create an empty store
    #[must_use]
    pub fn new() -> Self {
        MetadataStore {
            type_defs: SkipMap::new(),
            type_refs: SkipMap::new(),
            type_specs: SkipMap::new(),
            fullname_index: DashMap::new(),
        }
    }

    /// Register a type definition and index its full name
    pub(crate) fn insert_type_def(&self, ty: TypeDefRc) {
        self.fullname_index.insert(ty.fullname(), ty.token);
        self.type_defs.insert(ty.token, ty);
    }

    /// Register an external type reference
    pub(crate) fn insert_type_ref(&self, tref: TypeRefRc) {
        self.type_refs.insert(tref.token, tref);
    }

    /// Register a type specification
    pub(crate) fn insert_type_spec(&self, spec: TypeSpecRc) {
        self.type_specs.insert(spec.token, spec);
    }

    /// Look up a type definition by token
    #[must_use]
    pub fn type_def(&self, token: &Token) -> Option<TypeDefRc> {
        self.type_defs.get(token).map(|entry| entry.value().clone())
    }

    /// Look up an external type reference by token
    #[must_use]
    pub fn type_ref(&self, token: &Token) -> Option<TypeRefRc> {
        self.type_refs.get(token).map(|entry| entry.value().clone())
    }

    /// Look up a type specification by token
    #[must_use]
    pub fn type_spec(&self, token: &Token) -> Option<TypeSpecRc> {
        self.type_specs
            .get(token)
            .map(|entry| entry.value().clone())
    }

    /// Look up a type definition by namespace and name
    #[must_use]
    pub fn find_by_fullname(&self, namespace: &str, name: &str) -> Option<TypeDefRc> {
        let fullname = if namespace.is_empty() {
            name.to_string()
        } else {
            format!("{}.{}", namespace, name)
        };

        self.fullname_index
            .get(&fullname)
            .and_then(|entry| self.type_def(entry.value()))
    }

    /// Resolve an external reference to its definition.
    ///
    /// # Errors
    /// Returns [`crate::Error::UnresolvedReference`] if no definition with the
    /// referenced name exists in this store.
    pub fn find_required(&self, tref: &TypeRef) -> Result<TypeDefRc> {
        self.find_by_fullname(&tref.namespace, &tref.name)
            .ok_or_else(|| crate::Error::UnresolvedReference {
                namespace: tref.namespace.clone(),
                name: tref.name.clone(),
            })
    }

    /// Resolve a coded reference to a type definition.
    ///
    /// A specification resolves to the definition of the generic type it
    /// instantiates.
    ///
    /// # Errors
    /// Returns an error if any token along the way dangles, if an external
    /// reference has no matching definition, or if a specification does not
    /// describe a generic instantiation.
    pub fn resolve(&self, coded: &TypeDefOrRef) -> Result<TypeDefRc> {
        match coded {
            TypeDefOrRef::Def(token) => self.type_def(token).ok_or(TypeNotFound(*token)),
            TypeDefOrRef::Ref(token) => {
                let tref = self.type_ref(token).ok_or(TypeNotFound(*token))?;
                self.find_required(&tref)
            }
            TypeDefOrRef::Spec(token) => {
                let spec = self.type_spec(token).ok_or(TypeNotFound(*token))?;
                let inst = spec.generic_inst()?;
                match &inst.base {
                    TypeDefOrRef::Def(_) | TypeDefOrRef::Ref(_) => self.resolve(&inst.base),
                    TypeDefOrRef::Spec(_) => Err(invalid_metadata!(
                        "TypeSpec {} instantiates another specification",
                        token
                    )),
                }
            }
        }
    }

    /// Namespace and name of a coded reference, without forcing resolution to
    /// a definition.
    ///
    /// For a specification this is the identity of the generic type being
    /// instantiated.
    ///
    /// # Errors
    /// Returns an error if a token along the way dangles or a specification is
    /// malformed.
    pub fn coded_fullname(&self, coded: &TypeDefOrRef) -> Result<(String, String)> {
        match coded {
            TypeDefOrRef::Def(token) => {
                let def = self.type_def(token).ok_or(TypeNotFound(*token))?;
                Ok((def.namespace.clone(), def.name.clone()))
            }
            TypeDefOrRef::Ref(token) => {
                let tref = self.type_ref(token).ok_or(TypeNotFound(*token))?;
                Ok((tref.namespace.clone(), tref.name.clone()))
            }
            TypeDefOrRef::Spec(token) => {
                let spec = self.type_spec(token).ok_or(TypeNotFound(*token))?;
                let inst = spec.generic_inst()?;
                match &inst.base {
                    TypeDefOrRef::Def(_) | TypeDefOrRef::Ref(_) => self.coded_fullname(&inst.base),
                    TypeDefOrRef::Spec(_) => Err(invalid_metadata!(
                        "TypeSpec {} instantiates another specification",
                        token
                    )),
                }
            }
        }
    }

    /// All type definitions in this store, in token order
    #[must_use]
    pub fn type_defs(&self) -> Vec<TypeDefRc> {
        self.type_defs
            .iter()
            .map(|entry| entry.value().clone())
            .collect()
    }
}

impl Default for MetadataStore {
    fn default() -> Self {
        Self::new()
    }
}
