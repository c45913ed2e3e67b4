//! The analysis core: from metadata records to a language-neutral type model.
//!
//! Everything here is a pure, synchronous pass over an immutable
//! [`MetadataStore`]; no I/O, no caching, no mutation of shared state.
//! Analyses of different types are independent, so callers may run them
//! concurrently, but no ordering between them is promised or required.
//!
//! # Key Components
//!
//! - [`category`]: type category classification and enum representation
//! - [`visitor`] / [`walker`]: capability trait + recursive signature dispatch
//! - [`names`]: canonical keys and scoped generic-parameter substitution
//! - [`interfaces`]: deduplicating, order-preserving interface closure
//! - [`methods`]: overload aggregation and signature pairing
//! - [`accessors`]: property/event accessor resolution
//! - [`params`]: parameter direction/array classification
//! - [`TypeAnalyzer`]: driver assembling the per-type [`TypeModel`]
//!
//! # Examples
//!
//! ```rust
//! use dotbind::metadata::builder::{StoreBuilder, TypeBuilder};
//! use dotbind::metadata::signatures::{ElementType, TypeSignature};
//! use dotbind::model::{category::TypeCategory, TypeAnalyzer};
//!
//! let mut sb = StoreBuilder::new();
//! let token = TypeBuilder::new("IWidget")
//!     .namespace("Test")
//!     .interface()
//!     .property("Value", TypeSignature::Element(ElementType::I4), |p| p)
//!     .build(&mut sb);
//! let store = sb.build();
//!
//! let analyzer = TypeAnalyzer::new(store.clone());
//! let model = analyzer.analyze(&store.type_def(&token).unwrap()).unwrap();
//! assert_eq!(model.category, TypeCategory::Interface);
//! assert_eq!(model.properties.len(), 1);
//! ```

pub mod accessors;
pub mod category;
pub mod interfaces;
pub mod methods;
pub mod names;
pub mod params;
pub mod visitor;
pub mod walker;

use std::sync::Arc;

use crate::{
    metadata::{
        diagnostics::Diagnostics,
        signatures::{ElementType, TypeDefOrRef},
        store::MetadataStore,
        tables::{EventRc, MethodRc, PropertyRc, TypeDefRc},
        token::Token,
    },
    model::{
        accessors::{resolve_event, resolve_property, EventAccessors, PropertyAccessors},
        category::{enum_representation, get_category, TypeCategory},
        interfaces::{InterfaceClosure, InterfaceCollector},
        methods::{MethodAggregator, MethodMap, MethodSignature},
        params::{count_inputs, count_outputs, param_category, ParamCategory},
    },
    Result,
};

/// Aggregate input/output parameter counts of a method signature.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParamCounts {
    /// Parameters in input position
    pub inputs: usize,
    /// Parameters in output position
    pub outputs: usize,
}

/// One method of the flat listing, with per-parameter detail resolved.
#[derive(Debug)]
pub struct MethodModel {
    /// The reference that contributed this method (the type itself or an
    /// interface from its closure)
    pub origin: TypeDefOrRef,
    /// The method record
    pub method: MethodRc,
    /// Paired parameter records and signature parameters
    pub signature: MethodSignature,
    /// Category of each positional parameter, in order
    pub param_categories: Vec<ParamCategory>,
    /// Input/output counts; `None` when a fill-array parameter makes the
    /// positioning caller-dependent
    pub counts: Option<ParamCounts>,
}

/// A property with its resolved accessors.
#[derive(Debug)]
pub struct PropertyModel {
    /// The property record
    pub property: PropertyRc,
    /// The resolved get/set pair
    pub accessors: PropertyAccessors,
}

/// An event with its resolved accessors.
#[derive(Debug)]
pub struct EventModel {
    /// The event record
    pub event: EventRc,
    /// The resolved add/remove pair
    pub accessors: EventAccessors,
}

/// The emitted model of one analyzed type - a one-shot query result consumed
/// by code-emission backends.
#[derive(Debug)]
pub struct TypeModel {
    /// Token of the analyzed type
    pub token: Token,
    /// Resolved category
    pub category: TypeCategory,
    /// Underlying primitive representation, `Some` only for enums (unsigned
    /// for bitflag enums)
    pub enum_representation: Option<ElementType>,
    /// Flattened interface closure, keyed by canonical name
    pub interfaces: InterfaceClosure,
    /// Per-name overload mapping over the aggregated method population
    pub overloads: MethodMap,
    /// Flat, origin-attributed method listing with per-parameter detail
    pub methods: Vec<MethodModel>,
    /// Properties with resolved accessors
    pub properties: Vec<PropertyModel>,
    /// Events with resolved accessors
    pub events: Vec<EventModel>,
}

/// Drives the full analysis of individual types against one store.
pub struct TypeAnalyzer {
    store: Arc<MetadataStore>,
    diagnostics: Arc<Diagnostics>,
}

impl TypeAnalyzer {
    /// Create an analyzer with its own diagnostics container
    #[must_use]
    pub fn new(store: Arc<MetadataStore>) -> Self {
        TypeAnalyzer {
            store,
            diagnostics: Arc::new(Diagnostics::new()),
        }
    }

    /// Create an analyzer reporting into a shared diagnostics container
    #[must_use]
    pub fn with_diagnostics(store: Arc<MetadataStore>, diagnostics: Arc<Diagnostics>) -> Self {
        TypeAnalyzer { store, diagnostics }
    }

    /// The diagnostics collected so far
    #[must_use]
    pub fn diagnostics(&self) -> &Arc<Diagnostics> {
        &self.diagnostics
    }

    /// Build the full [`TypeModel`] for one type.
    ///
    /// # Errors
    /// Fails on resolution failures and structural invariant violations
    /// anywhere in the type's surface; the error names the offending member.
    pub fn analyze(&self, ty: &TypeDefRc) -> Result<TypeModel> {
        let category = get_category(&self.store, ty)?;
        let enum_repr = if category == TypeCategory::Enum {
            Some(enum_representation(&self.store, ty)?)
        } else {
            None
        };

        let interfaces = InterfaceCollector::new(&self.store).collect(ty)?;

        let aggregator = MethodAggregator::new(&self.store, &self.diagnostics);
        let overloads = aggregator.aggregate(ty)?;
        let listing = aggregator.listing(ty)?;

        let mut methods = Vec::with_capacity(listing.len());
        for (origin, method) in listing {
            methods.push(self.analyze_method(origin, method)?);
        }

        let mut properties = Vec::with_capacity(ty.properties.len());
        for property in &ty.properties {
            properties.push(PropertyModel {
                property: property.clone(),
                accessors: resolve_property(property)?,
            });
        }

        let mut events = Vec::with_capacity(ty.events.len());
        for event in &ty.events {
            events.push(EventModel {
                event: event.clone(),
                accessors: resolve_event(event)?,
            });
        }

        Ok(TypeModel {
            token: ty.token,
            category,
            enum_representation: enum_repr,
            interfaces,
            overloads,
            methods,
            properties,
            events,
        })
    }

    /// Analyze every type definition in the store, in token order.
    ///
    /// # Errors
    /// Fails on the first type whose analysis fails.
    pub fn analyze_all(&self) -> Result<Vec<TypeModel>> {
        let mut models = Vec::new();
        for ty in self.store.type_defs() {
            models.push(self.analyze(&ty)?);
        }
        Ok(models)
    }

    fn analyze_method(&self, origin: TypeDefOrRef, method: MethodRc) -> Result<MethodModel> {
        let signature = MethodSignature::new(&method)?;

        let mut param_categories = Vec::with_capacity(signature.params().len());
        for (param, sig) in signature.params() {
            param_categories.push(param_category(param, sig)?);
        }

        // Fill arrays leave input positioning to the caller; counts are only
        // well defined without them.
        let counts = if param_categories.contains(&ParamCategory::FillArray) {
            None
        } else {
            Some(ParamCounts {
                inputs: count_inputs(signature.params())?,
                outputs: count_outputs(signature.params())?,
            })
        };

        Ok(MethodModel {
            origin,
            method,
            signature,
            param_categories,
            counts,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::{
        builder::{StoreBuilder, TypeBuilder},
        signatures::{ElementType, TypeSignature},
    };

    fn i4() -> TypeSignature {
        TypeSignature::Element(ElementType::I4)
    }

    #[test]
    fn test_enum_models_carry_representation() {
        let mut sb = StoreBuilder::new();
        let plain = TypeBuilder::new("Ordinal")
            .namespace("Test")
            .enum_type()
            .build(&mut sb);
        let flags = TypeBuilder::new("Permissions")
            .namespace("Test")
            .enum_type()
            .attribute("System", "FlagsAttribute")
            .build(&mut sb);
        let store = sb.build();

        let analyzer = TypeAnalyzer::new(store.clone());
        let plain = analyzer.analyze(&store.type_def(&plain).unwrap()).unwrap();
        let flags = analyzer.analyze(&store.type_def(&flags).unwrap()).unwrap();

        assert_eq!(plain.category, TypeCategory::Enum);
        assert_eq!(plain.enum_representation, Some(ElementType::I4));
        assert_eq!(flags.enum_representation, Some(ElementType::U4));
    }

    #[test]
    fn test_method_models_carry_param_detail() {
        let mut sb = StoreBuilder::new();
        let token = TypeBuilder::new("IWidget")
            .namespace("Test")
            .interface()
            .method("Exchange", |m| {
                m.param("input", i4())
                    .array_param("batch", i4())
                    .out_param("result", i4())
                    .returns(i4())
            })
            .build(&mut sb);
        let store = sb.build();

        let analyzer = TypeAnalyzer::new(store.clone());
        let model = analyzer.analyze(&store.type_def(&token).unwrap()).unwrap();

        assert_eq!(model.methods.len(), 1);
        let exchange = &model.methods[0];
        assert_eq!(
            exchange.param_categories,
            vec![
                ParamCategory::In,
                ParamCategory::PassArray,
                ParamCategory::Out,
            ]
        );
        assert_eq!(
            exchange.counts,
            Some(ParamCounts {
                inputs: 2,
                outputs: 1,
            })
        );
    }

    #[test]
    fn test_fill_array_suppresses_counts() {
        let mut sb = StoreBuilder::new();
        let token = TypeBuilder::new("IWidget")
            .namespace("Test")
            .interface()
            .method("ReadInto", |m| m.fill_array_param("buffer", i4()))
            .build(&mut sb);
        let store = sb.build();

        let analyzer = TypeAnalyzer::new(store.clone());
        let model = analyzer.analyze(&store.type_def(&token).unwrap()).unwrap();

        let read_into = &model.methods[0];
        assert_eq!(read_into.param_categories, vec![ParamCategory::FillArray]);
        assert_eq!(read_into.counts, None);
    }

    #[test]
    fn test_analyze_all_covers_every_definition() {
        let mut sb = StoreBuilder::new();
        TypeBuilder::new("A").namespace("Test").build(&mut sb);
        TypeBuilder::new("B").namespace("Test").build(&mut sb);
        TypeBuilder::new("C").namespace("Test").build(&mut sb);
        let store = sb.build();

        let analyzer = TypeAnalyzer::new(store);
        let models = analyzer.analyze_all().unwrap();
        assert_eq!(models.len(), 3);
    }
}
