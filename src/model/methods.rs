//! Overload aggregation and method-signature pairing.
//!
//! A type's member surface is its own declared methods plus, for interfaces,
//! every method contributed by its interface closure. The aggregator produces
//! both a per-name overload map (for emitters that group by name) and a flat
//! origin-attributed listing (for positional emission); both draw from the
//! same population, so nothing is double-counted.
//!
//! [`MethodSignature`] pairs a method's parameter records with its signature
//! parameters and untangles the sequence-0 record that carries return-value
//! metadata.

use std::collections::BTreeMap;

use crate::{
    metadata::{
        diagnostics::Diagnostics,
        signatures::{SignatureParameter, TypeDefOrRef},
        store::MetadataStore,
        tables::{MethodDef, MethodRc, ParamRc, TypeDefRc},
    },
    model::{
        category::{get_category, TypeCategory},
        interfaces::InterfaceCollector,
    },
    Result,
};

/// Synthesized name for a return value without a sequence-0 record
pub const RETURN_VALUE_NAME: &str = "__return_value";

/// Overloads of one name, each attributed to the reference that contributed it
pub type OverloadList = Vec<(TypeDefOrRef, MethodRc)>;

/// Per-name overload mapping, ordered by method name
pub type MethodMap = BTreeMap<String, OverloadList>;

/// Aggregates a type's own and inherited methods.
pub struct MethodAggregator<'a> {
    store: &'a MetadataStore,
    diagnostics: &'a Diagnostics,
}

impl<'a> MethodAggregator<'a> {
    /// Create an aggregator over the given store, reporting consistency
    /// findings to `diagnostics`
    #[must_use]
    pub fn new(store: &'a MetadataStore, diagnostics: &'a Diagnostics) -> Self {
        MethodAggregator { store, diagnostics }
    }

    /// Aggregate methods into a per-name overload mapping.
    ///
    /// The type's own declared methods (constructors excluded) appear
    /// attributed to the type itself; if the type is an interface, every
    /// method of every closure entry is additionally appended, attributed to
    /// that entry's interface reference.
    ///
    /// In debug builds, overload static-ness consistency is checked and
    /// violations are reported as diagnostics; see
    /// [`check_overload_consistency`].
    ///
    /// # Errors
    /// Fails if category classification or closure computation fails.
    pub fn aggregate(&self, ty: &TypeDefRc) -> Result<MethodMap> {
        let mut methods = MethodMap::new();

        for method in &ty.methods {
            if method.is_constructor() {
                continue;
            }
            methods
                .entry(method.name.clone())
                .or_default()
                .push((TypeDefOrRef::Def(ty.token), method.clone()));
        }

        if get_category(self.store, ty)? == TypeCategory::Interface {
            let closure = InterfaceCollector::new(self.store).collect(ty)?;
            for (_, info) in closure.iter() {
                for method in &info.methods {
                    methods
                        .entry(method.name.clone())
                        .or_default()
                        .push((info.ty.clone(), method.clone()));
                }
            }
        }

        #[cfg(debug_assertions)]
        if let Err(err) = check_overload_consistency(&methods) {
            use crate::metadata::diagnostics::DiagnosticCategory;
            self.diagnostics
                .error(DiagnosticCategory::Method, err.to_string());
        }

        Ok(methods)
    }

    /// The same population as [`MethodAggregator::aggregate`], as an ordered
    /// flat listing without name grouping.
    ///
    /// Own methods come first in declaration order, then closure-contributed
    /// methods in closure order; inherited methods appear once, under the
    /// interface that declared them.
    ///
    /// # Errors
    /// Fails if category classification or closure computation fails.
    pub fn listing(&self, ty: &TypeDefRc) -> Result<OverloadList> {
        let mut methods = OverloadList::new();

        for method in &ty.methods {
            if method.is_constructor() {
                continue;
            }
            methods.push((TypeDefOrRef::Def(ty.token), method.clone()));
        }

        if get_category(self.store, ty)? == TypeCategory::Interface {
            let closure = InterfaceCollector::new(self.store).collect(ty)?;
            for (_, info) in closure.iter() {
                for method in &info.methods {
                    methods.push((info.ty.clone(), method.clone()));
                }
            }
        }

        Ok(methods)
    }
}

/// Verify that all overloads of each name agree on static-ness with the
/// first-seen overload.
///
/// Disagreement indicates inconsistent metadata. In debug builds
/// [`MethodAggregator::aggregate`] runs this automatically and reports
/// violations as diagnostics; strict consumers can call it directly and treat
/// the error as fatal.
///
/// # Errors
/// Returns an invalid-metadata error naming the first offending method name.
pub fn check_overload_consistency(methods: &MethodMap) -> Result<()> {
    for (name, overloads) in methods {
        if overloads.len() > 1 {
            let static_method = overloads[0].1.is_static();
            if overloads
                .iter()
                .any(|(_, method)| method.is_static() != static_method)
            {
                return Err(invalid_metadata!(
                    "overloads of '{}' disagree on static-ness",
                    name
                ));
            }
        }
    }
    Ok(())
}

/// A method's parameter records paired with their signature parameters, with
/// return-value metadata untangled.
#[derive(Debug)]
pub struct MethodSignature {
    params: Vec<(ParamRc, SignatureParameter)>,
    return_type: Option<SignatureParameter>,
    return_param: Option<ParamRc>,
}

impl MethodSignature {
    /// Pair a method's parameter records with its signature parameters.
    ///
    /// If the method has a return type and its first record has sequence
    /// number 0, that record carries return-value metadata and is not counted
    /// as a parameter.
    ///
    /// # Errors
    /// Returns an invalid-metadata error if the number of positional records
    /// does not match the signature's parameter count.
    pub fn new(method: &MethodDef) -> Result<Self> {
        let mut records = method.params.as_slice();
        let mut return_param = None;

        if method.signature.return_type.is_some() {
            if let Some(first) = records.first() {
                if first.sequence == 0 {
                    return_param = Some(first.clone());
                    records = &records[1..];
                }
            }
        }

        if records.len() != method.signature.params.len() {
            return Err(invalid_metadata!(
                "method '{}' has {} parameter records for {} signature parameters",
                method.name,
                records.len(),
                method.signature.params.len()
            ));
        }

        let params = records
            .iter()
            .cloned()
            .zip(method.signature.params.iter().cloned())
            .collect();

        Ok(MethodSignature {
            params,
            return_type: method.signature.return_type.clone(),
            return_param,
        })
    }

    /// The positional parameters: (record, signature) pairs in sequence order
    #[must_use]
    pub fn params(&self) -> &[(ParamRc, SignatureParameter)] {
        &self.params
    }

    /// The return type signature, `None` for void
    #[must_use]
    pub fn return_signature(&self) -> Option<&SignatureParameter> {
        self.return_type.as_ref()
    }

    /// The name of the return value: the sequence-0 record's name when
    /// present, otherwise the synthesized [`RETURN_VALUE_NAME`]
    #[must_use]
    pub fn return_param_name(&self) -> &str {
        match &self.return_param {
            Some(param) => match &param.name {
                Some(name) => name,
                None => RETURN_VALUE_NAME,
            },
            None => RETURN_VALUE_NAME,
        }
    }

    /// Whether the method has positional parameters
    #[must_use]
    pub fn has_params(&self) -> bool {
        !self.params.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::{
        builder::{MethodBuilder, StoreBuilder, TypeBuilder},
        signatures::{ElementType, TypeSignature},
    };

    fn i4() -> TypeSignature {
        TypeSignature::Element(ElementType::I4)
    }

    #[test]
    fn test_non_interface_aggregates_own_methods_only() {
        let mut sb = StoreBuilder::new();
        let ifoo = TypeBuilder::new("IFoo")
            .namespace("Test")
            .interface()
            .method("GetValue", |m| m.returns(i4()))
            .build(&mut sb);
        let widget = TypeBuilder::new("Widget")
            .namespace("Test")
            .constructor()
            .method("Refresh", |m| m)
            .implements(TypeDefOrRef::Def(ifoo))
            .build(&mut sb);
        let store = sb.build();

        let diagnostics = Diagnostics::new();
        let aggregator = MethodAggregator::new(&store, &diagnostics);
        let ty = store.type_def(&widget).unwrap();
        let methods = aggregator.aggregate(&ty).unwrap();

        // Own non-constructor methods only: classes do not inherit interface
        // methods through aggregation.
        assert_eq!(methods.len(), 1);
        let refresh = &methods["Refresh"];
        assert_eq!(refresh.len(), 1);
        assert!(
            matches!(&refresh[0].0, TypeDefOrRef::Def(token) if *token == widget)
        );
    }

    #[test]
    fn test_interface_aggregates_closure_methods_with_origin() {
        let mut sb = StoreBuilder::new();
        let ifoo = TypeBuilder::new("IFoo")
            .namespace("Test")
            .interface()
            .method("get_Value", |m| m.special_name().returns(i4()))
            .method("put_Value", |m| m.special_name().param("value", i4()))
            .build(&mut sb);
        let ibar = TypeBuilder::new("IBar")
            .namespace("Test")
            .interface()
            .implements(TypeDefOrRef::Def(ifoo))
            .method("Reset", |m| m)
            .build(&mut sb);
        let store = sb.build();

        let diagnostics = Diagnostics::new();
        let aggregator = MethodAggregator::new(&store, &diagnostics);
        let ty = store.type_def(&ibar).unwrap();

        let methods = aggregator.aggregate(&ty).unwrap();
        assert_eq!(methods.len(), 3);
        assert!(
            matches!(&methods["Reset"][0].0, TypeDefOrRef::Def(token) if *token == ibar)
        );
        assert!(
            matches!(&methods["get_Value"][0].0, TypeDefOrRef::Def(token) if *token == ifoo)
        );
        assert!(
            matches!(&methods["put_Value"][0].0, TypeDefOrRef::Def(token) if *token == ifoo)
        );

        // Flat listing: same population, no double-counting.
        let listing = aggregator.listing(&ty).unwrap();
        assert_eq!(listing.len(), 3);
        assert_eq!(listing[0].1.name, "Reset");
    }

    #[test]
    fn test_overload_consistency_check() {
        let mut sb = StoreBuilder::new();
        let ty = TypeBuilder::new("Widget")
            .namespace("Test")
            .method("Load", |m| m.param("path", i4()))
            .method("Load", |m| m.static_method().param("raw", i4()))
            .build(&mut sb);
        let store = sb.build();

        let diagnostics = Diagnostics::new();
        let aggregator = MethodAggregator::new(&store, &diagnostics);
        let methods = aggregator
            .aggregate(&store.type_def(&ty).unwrap())
            .unwrap();

        let err = check_overload_consistency(&methods).unwrap_err();
        assert!(err.to_string().contains("Load"));

        // Debug builds also surface the violation as a diagnostic.
        #[cfg(debug_assertions)]
        assert!(diagnostics.has_errors());
    }

    #[test]
    fn test_signature_consumes_sequence_zero_record() {
        let mut sb = StoreBuilder::new();
        let token = TypeBuilder::new("Widget")
            .namespace("Test")
            .method("Measure", |m| {
                m.returns(i4()).named_return("size").param("scale", i4())
            })
            .method("Scale", |m| m.returns(i4()).param("factor", i4()))
            .build(&mut sb);
        let store = sb.build();
        let ty = store.type_def(&token).unwrap();

        let named = MethodSignature::new(&ty.methods[0]).unwrap();
        assert_eq!(named.params().len(), 1);
        assert_eq!(named.params()[0].0.name.as_deref(), Some("scale"));
        assert_eq!(named.return_param_name(), "size");
        assert!(named.has_params());

        let unnamed = MethodSignature::new(&ty.methods[1]).unwrap();
        assert_eq!(unnamed.params().len(), 1);
        assert_eq!(unnamed.return_param_name(), RETURN_VALUE_NAME);
        assert!(unnamed.return_signature().is_some());
    }

    #[test]
    fn test_signature_record_count_mismatch_is_invalid() {
        let mut sb = StoreBuilder::new();
        let method = MethodBuilder::new("Broken").param("a", i4());
        let token = TypeBuilder::new("Widget")
            .namespace("Test")
            .method("Broken", |_| method)
            .build(&mut sb);
        let store = sb.build();
        let ty = store.type_def(&token).unwrap();

        // Pair a record list against a signature with a different arity by
        // rebuilding the method with mismatched parts.
        let original = &ty.methods[0];
        let broken = MethodDef {
            rid: original.rid,
            token: original.token,
            flags: original.flags,
            name: original.name.clone(),
            signature: crate::metadata::signatures::SignatureMethod {
                has_this: true,
                return_type: None,
                params: Vec::new(),
            },
            params: original.params.clone(),
        };
        assert!(MethodSignature::new(&broken).is_err());
    }
}
