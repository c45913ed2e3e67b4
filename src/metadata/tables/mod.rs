//! Typed metadata records consumed by the binding-model analysis.
//!
//! Each record mirrors one row shape of the component metadata the analysis
//! consumes: type definitions and references, generic instantiation
//! specifications, methods, parameters, properties, events and their semantic
//! linkages. Records are immutable once built and `Arc`-shared via the `XxxRc`
//! aliases; the [`crate::metadata::store::MetadataStore`] owns the lookup
//! indices over them.
//!
//! Decoding the binary metadata blob into these records is out of scope here;
//! the [`crate::metadata::builder`] module is the in-crate way to populate a
//! store.

mod event;
mod genericparam;
mod methoddef;
mod param;
mod property;
mod semantics;
mod typedef;
mod typeref;
mod typespec;

pub use event::{Event, EventRc};
pub use genericparam::{GenericParam, GenericParamRc};
pub use methoddef::{MethodDef, MethodModifiers, MethodRc};
pub use param::{Param, ParamAttributes, ParamRc};
pub use property::{Property, PropertyRc};
pub use semantics::{MethodSemantics, MethodSemanticsAttributes, MethodSemanticsRc};
pub use typedef::{AttributeRef, TypeAttributes, TypeDef, TypeDefRc};
pub use typeref::{TypeRef, TypeRefRc};
pub use typespec::{TypeSpec, TypeSpecRc};
