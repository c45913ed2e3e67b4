// Copyright 2025 Johann Kempter
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//
// SPDX-License-Identifier: Apache-2.0

#![doc(html_no_source)]
#![deny(missing_docs)]
#![allow(dead_code)]

//! # dotbind
//!
//! The analysis core of a metadata-driven binding generator: given typed
//! metadata describing a component's public surface, `dotbind` builds an
//! in-memory, language-neutral model of each type's full interface contract -
//! its category, its flattened interface closure, its aggregated overload
//! sets (including inherited members), and the calling-convention category of
//! every parameter. Code-emission backends consume that model to produce
//! bindings in their target language.
//!
//! ## Features
//!
//! - **Category dispatch** - classes, interfaces, delegates, enums and
//!   structs routed through a capability trait, with enums resolved to their
//!   underlying primitive representation
//! - **Signature walking** - exhaustive recursive dispatch over the closed
//!   type-reference grammar, with first-class bracketing of generic arguments
//! - **Interface closure** - deduplicated, insertion-ordered flattening of
//!   diamond-shaped interface graphs, correct under generic substitution
//! - **Overload aggregation** - per-name overload maps and flat listings,
//!   each entry attributed to the interface that contributed it
//! - **Parameter classification** - direction/array-mode categories and
//!   in/out counts for calling-convention buffer sizing
//!
//! Metadata-blob decoding, attribute decoding, naming conventions of the
//! output language and file output are deliberately out of scope; the store
//! is populated through [`metadata::builder`] by whatever reads the bytes.
//!
//! ## Quick Start
//!
//! ```rust
//! use dotbind::metadata::builder::{StoreBuilder, TypeBuilder};
//! use dotbind::metadata::signatures::{ElementType, TypeDefOrRef, TypeSignature};
//! use dotbind::model::TypeAnalyzer;
//!
//! let mut sb = StoreBuilder::new();
//! let ifoo = TypeBuilder::new("IFoo")
//!     .namespace("Sample")
//!     .interface()
//!     .property("Value", TypeSignature::Element(ElementType::I4), |p| p.setter())
//!     .build(&mut sb);
//! let ibar = TypeBuilder::new("IBar")
//!     .namespace("Sample")
//!     .interface()
//!     .implements(TypeDefOrRef::Def(ifoo))
//!     .build(&mut sb);
//! let store = sb.build();
//!
//! let analyzer = TypeAnalyzer::new(store.clone());
//! let model = analyzer.analyze(&store.type_def(&ibar).unwrap()).unwrap();
//!
//! // IBar inherits IFoo's accessor methods through its closure.
//! assert_eq!(model.interfaces.len(), 1);
//! assert_eq!(model.methods.len(), 2);
//! ```
//!
//! ## Architecture
//!
//! `dotbind` is organized into two layers:
//!
//! - [`metadata`] - the immutable snapshot: tokens, typed records, signature
//!   value types, the queryable store, fixture builders, diagnostics
//! - [`model`] - the analysis pass over that snapshot, producing one
//!   [`model::TypeModel`] per analyzed type
//!
//! Analysis is single-threaded and synchronous; analyses of different types
//! are independent and may be run concurrently by the caller.

#[macro_use]
pub(crate) mod error;

pub mod metadata;
pub mod model;
pub mod prelude;

pub use error::{Error, Result};
