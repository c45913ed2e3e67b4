//! The metadata snapshot: tokens, typed records, signatures, store, builders.
//!
//! This module is the upstream boundary of the crate. It holds the typed
//! records describing a component's public surface and the read-only
//! [`store::MetadataStore`] the analysis in [`crate::model`] queries. Nothing
//! here interprets semantics - categorization, closure computation and member
//! consolidation all live on the model side.
//!
//! # Key Components
//!
//! - [`token::Token`] / [`token::TableId`]: record identity
//! - [`tables`]: immutable typed records (`TypeDef`, `MethodDef`, `Param`, ...)
//! - [`signatures`]: the closed type-reference grammar
//! - [`store::MetadataStore`]: token + name indices and reference resolution
//! - [`builder`]: fluent population of a store
//! - [`diagnostics`]: non-fatal consistency reports

pub mod builder;
pub mod diagnostics;
pub mod signatures;
pub mod store;
pub mod tables;
pub mod token;
