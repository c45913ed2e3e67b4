//! # dotbind Prelude
//!
//! This module provides a convenient prelude for the most commonly used types
//! and traits of the library. Import it to get quick access to the essentials
//! for building and analyzing a metadata snapshot.

// ================================================================================================
// Core Types and Error Handling
// ================================================================================================

/// The main error type for all dotbind operations
pub use crate::Error;

/// The result type used throughout dotbind
pub use crate::Result;

// ================================================================================================
// Metadata Snapshot
// ================================================================================================

/// Record identity
pub use crate::metadata::token::{TableId, Token};

/// The queryable metadata snapshot
pub use crate::metadata::store::MetadataStore;

/// Store population
pub use crate::metadata::builder::{MethodBuilder, StoreBuilder, TypeBuilder};

/// Signature value types
pub use crate::metadata::signatures::{
    ElementType, GenericInstSig, SignatureMethod, SignatureParameter, TypeDefOrRef, TypeSignature,
};

/// Typed records
pub use crate::metadata::tables::{
    Event, EventRc, MethodDef, MethodRc, Param, ParamRc, Property, PropertyRc, TypeDef, TypeDefRc,
    TypeRef, TypeRefRc, TypeSpec, TypeSpecRc,
};

/// Non-fatal consistency reporting
pub use crate::metadata::diagnostics::{DiagnosticCategory, DiagnosticSeverity, Diagnostics};

// ================================================================================================
// Analysis Core
// ================================================================================================

/// The per-type analysis driver and its result model
pub use crate::model::{MethodModel, ParamCounts, TypeAnalyzer, TypeModel};

/// Category classification
pub use crate::model::category::{get_category, is_flags_enum, TypeCategory};

/// Interface closure computation
pub use crate::model::interfaces::{InterfaceClosure, InterfaceCollector, InterfaceInfo};

/// Method aggregation
pub use crate::model::methods::{MethodAggregator, MethodMap, MethodSignature};

/// Accessor resolution
pub use crate::model::accessors::{
    resolve_event, resolve_property, EventAccessors, PropertyAccessors,
};

/// Parameter classification
pub use crate::model::params::{count_inputs, count_outputs, param_category, ParamCategory};

/// Signature dispatch
pub use crate::model::{visitor::SignatureVisitor, walker::SignatureWalker};
