//! Interface closure computation.
//!
//! For a type, the closure is the deduplicated, transitively flattened set of
//! every interface it implements, each entry tagged with the methods its
//! defining type contributes. Entries are keyed by canonical name (see
//! [`CanonicalNames`]) and kept in insertion order.
//!
//! The walk is depth-first over declared interface-implementation edges with
//! two load-bearing rules:
//!
//! - **First insertion wins.** An edge whose key is already present is
//!   skipped entirely - no re-descent, no overwrite. Diamond-shaped graphs
//!   (B and C both requiring A) therefore register A exactly once, on
//!   whichever path reaches it first, and never re-process it.
//! - **Ancestors before descendants.** A resolved interface's own closure is
//!   merged before the interface itself is inserted, so an entry never
//!   precedes the interfaces it requires.
//!
//! Interface graphs cannot be cyclic (metadata forbids circular
//! implementation), so deduplication is a correctness rule here, not a cycle
//! guard. Whether an interface is marked exclusive-to a class has no effect
//! on membership; exclusivity is emission policy.

use std::collections::HashMap;

use crate::{
    metadata::{
        signatures::TypeDefOrRef,
        store::MetadataStore,
        tables::{MethodRc, TypeDef},
    },
    model::names::CanonicalNames,
    Error::TypeNotFound,
    Result,
};

/// One entry of a type's interface closure.
#[derive(Debug)]
pub struct InterfaceInfo {
    /// The reference as it appeared in metadata (possibly a generic
    /// instantiation)
    pub ty: TypeDefOrRef,
    /// The methods contributed by the interface's defining type, in
    /// declaration order
    pub methods: Vec<MethodRc>,
}

/// The insertion-ordered closure result, keyed by canonical name.
///
/// Backed by a vector plus an index so iteration order is exactly insertion
/// order, independent of any map implementation detail.
#[derive(Debug)]
pub struct InterfaceClosure {
    entries: Vec<(String, InterfaceInfo)>,
    index: HashMap<String, usize>,
}

impl InterfaceClosure {
    fn new() -> Self {
        InterfaceClosure {
            entries: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Insert unless the key is already present; first insertion wins.
    fn insert_if_absent(&mut self, key: String, info: InterfaceInfo) {
        if self.index.contains_key(&key) {
            return;
        }
        self.index.insert(key.clone(), self.entries.len());
        self.entries.push((key, info));
    }

    /// Whether an entry with this canonical key exists
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    /// Look up an entry by canonical key
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&InterfaceInfo> {
        self.index.get(key).map(|&at| &self.entries[at].1)
    }

    /// Iterate entries in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &InterfaceInfo)> {
        self.entries.iter().map(|(key, info)| (key.as_str(), info))
    }

    /// Number of entries
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the closure is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Computes interface closures against a store.
pub struct InterfaceCollector<'a> {
    store: &'a MetadataStore,
    names: CanonicalNames<'a>,
}

impl<'a> InterfaceCollector<'a> {
    /// Create a collector over the given store
    #[must_use]
    pub fn new(store: &'a MetadataStore) -> Self {
        InterfaceCollector {
            store,
            names: CanonicalNames::new(store),
        }
    }

    /// Compute the interface closure of a type.
    ///
    /// If the type is itself generic, its formal parameter names form the
    /// outermost scope frame so open-generic edges render deterministic keys.
    ///
    /// The result depends only on declared interface-implementation edges and
    /// their declaration order; recomputing against the same snapshot yields
    /// the same closure.
    ///
    /// # Errors
    /// Fails if an edge cannot be resolved to a definition or a specification
    /// is malformed.
    pub fn collect(&mut self, ty: &TypeDef) -> Result<InterfaceClosure> {
        let store = self.store;
        let mut closure = InterfaceClosure::new();
        if ty.is_parameterized() {
            let frame = ty
                .generic_params
                .iter()
                .map(|param| param.name.clone())
                .collect();
            self.names.scoped(frame, |names| {
                walk_impls(store, names, &ty.interfaces, &mut closure)
            })?;
        } else {
            walk_impls(store, &mut self.names, &ty.interfaces, &mut closure)?;
        }
        Ok(closure)
    }
}

/// Depth-first merge of the closure reachable through `edges` into `out`.
fn walk_impls(
    store: &MetadataStore,
    names: &mut CanonicalNames<'_>,
    edges: &[TypeDefOrRef],
    out: &mut InterfaceClosure,
) -> Result<()> {
    for edge in edges {
        let key = names.coded_name(edge)?;
        if out.contains(&key) {
            continue;
        }

        let definition = match edge {
            TypeDefOrRef::Def(token) => store.type_def(token).ok_or(TypeNotFound(*token))?,
            TypeDefOrRef::Ref(token) => {
                let tref = store.type_ref(token).ok_or(TypeNotFound(*token))?;
                store.find_required(&tref)?
            }
            TypeDefOrRef::Spec(token) => {
                let spec = store.type_spec(token).ok_or(TypeNotFound(*token))?;
                let inst = spec.generic_inst()?;
                let frame = names.render_args(inst)?;
                let definition = store.resolve(&inst.base)?;
                names.scoped(frame, |names| {
                    walk_impls(store, names, &definition.interfaces, out)
                })?;
                out.insert_if_absent(
                    key,
                    InterfaceInfo {
                        ty: edge.clone(),
                        methods: definition.methods.clone(),
                    },
                );
                continue;
            }
        };

        walk_impls(store, names, &definition.interfaces, out)?;
        out.insert_if_absent(
            key,
            InterfaceInfo {
                ty: edge.clone(),
                methods: definition.methods.clone(),
            },
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::{
        builder::{StoreBuilder, TypeBuilder},
        signatures::{ElementType, GenericInstSig, TypeSignature},
    };

    fn interface_method(
        builder: TypeBuilder,
        name: &str,
    ) -> TypeBuilder {
        builder.method(name, |m| m.returns(TypeSignature::Element(ElementType::I4)))
    }

    #[test]
    fn test_empty_closure() {
        let mut sb = StoreBuilder::new();
        let token = TypeBuilder::new("Widget").namespace("Test").build(&mut sb);
        let store = sb.build();

        let closure = InterfaceCollector::new(&store)
            .collect(&store.type_def(&token).unwrap())
            .unwrap();
        assert!(closure.is_empty());
    }

    #[test]
    fn test_diamond_registers_shared_ancestor_once() {
        let mut sb = StoreBuilder::new();
        let base = interface_method(
            TypeBuilder::new("IBase").namespace("Test").interface(),
            "GetId",
        )
        .build(&mut sb);
        let left = interface_method(
            TypeBuilder::new("ILeft")
                .namespace("Test")
                .interface()
                .implements(TypeDefOrRef::Def(base)),
            "GetLeft",
        )
        .build(&mut sb);
        let right = interface_method(
            TypeBuilder::new("IRight")
                .namespace("Test")
                .interface()
                .implements(TypeDefOrRef::Def(base)),
            "GetRight",
        )
        .build(&mut sb);
        let widget = TypeBuilder::new("Widget")
            .namespace("Test")
            .implements(TypeDefOrRef::Def(left))
            .implements(TypeDefOrRef::Def(right))
            .build(&mut sb);
        let store = sb.build();

        let closure = InterfaceCollector::new(&store)
            .collect(&store.type_def(&widget).unwrap())
            .unwrap();

        assert_eq!(closure.len(), 3);
        let keys: Vec<_> = closure.iter().map(|(key, _)| key.to_string()).collect();
        // Ancestor registered before the descendant that required it; first
        // path wins, the second never re-registers.
        assert_eq!(keys, vec!["Test.IBase", "Test.ILeft", "Test.IRight"]);

        // The shared ancestor's method range is its own direct methods.
        let base_entry = closure.get("Test.IBase").unwrap();
        assert_eq!(base_entry.methods.len(), 1);
        assert_eq!(base_entry.methods[0].name, "GetId");
    }

    #[test]
    fn test_closure_is_deterministic() {
        let mut sb = StoreBuilder::new();
        let a = TypeBuilder::new("IA")
            .namespace("Test")
            .interface()
            .build(&mut sb);
        let b = TypeBuilder::new("IB")
            .namespace("Test")
            .interface()
            .implements(TypeDefOrRef::Def(a))
            .build(&mut sb);
        let widget = TypeBuilder::new("Widget")
            .namespace("Test")
            .implements(TypeDefOrRef::Def(b))
            .implements(TypeDefOrRef::Def(a))
            .build(&mut sb);
        let store = sb.build();

        let ty = store.type_def(&widget).unwrap();
        let first: Vec<_> = InterfaceCollector::new(&store)
            .collect(&ty)
            .unwrap()
            .iter()
            .map(|(key, _)| key.to_string())
            .collect();
        let second: Vec<_> = InterfaceCollector::new(&store)
            .collect(&ty)
            .unwrap()
            .iter()
            .map(|(key, _)| key.to_string())
            .collect();
        assert_eq!(first, second);
        assert_eq!(first, vec!["Test.IA", "Test.IB"]);
    }

    #[test]
    fn test_generic_instantiations_collapse_by_structure() {
        let mut sb = StoreBuilder::new();

        interface_method(
            TypeBuilder::new("IIterable`1")
                .namespace("Test.Collections")
                .interface()
                .generic_param("T"),
            "First",
        )
        .build(&mut sb);

        let iterable_ref = sb.type_ref("Test.Collections", "IIterable`1");
        let iterable_of_t = sb.type_spec(TypeSignature::GenericInst(GenericInstSig {
            base: TypeDefOrRef::Ref(iterable_ref),
            args: vec![TypeSignature::GenericParam(0)],
        }));

        interface_method(
            TypeBuilder::new("IVector`1")
                .namespace("Test.Collections")
                .interface()
                .generic_param("T")
                .implements(TypeDefOrRef::Spec(iterable_of_t)),
            "GetAt",
        )
        .build(&mut sb);

        let vector_ref = sb.type_ref("Test.Collections", "IVector`1");
        let vector_of_i4 = sb.type_spec(TypeSignature::GenericInst(GenericInstSig {
            base: TypeDefOrRef::Ref(vector_ref),
            args: vec![TypeSignature::Element(ElementType::I4)],
        }));
        let iterable_of_i4 = sb.type_spec(TypeSignature::GenericInst(GenericInstSig {
            base: TypeDefOrRef::Ref(iterable_ref),
            args: vec![TypeSignature::Element(ElementType::I4)],
        }));

        // Implements IVector<Int32> (which requires IIterable<Int32>) and
        // IIterable<Int32> directly - a diamond through substitution.
        let widget = TypeBuilder::new("Widget")
            .namespace("Test")
            .implements(TypeDefOrRef::Spec(vector_of_i4))
            .implements(TypeDefOrRef::Spec(iterable_of_i4))
            .build(&mut sb);
        let store = sb.build();

        let closure = InterfaceCollector::new(&store)
            .collect(&store.type_def(&widget).unwrap())
            .unwrap();

        assert_eq!(closure.len(), 2);
        let keys: Vec<_> = closure.iter().map(|(key, _)| key.to_string()).collect();
        assert_eq!(
            keys,
            vec![
                "Test.Collections.IIterable`1<Int32>",
                "Test.Collections.IVector`1<Int32>",
            ]
        );
    }

    #[test]
    fn test_open_generic_closure_uses_formal_names() {
        let mut sb = StoreBuilder::new();

        interface_method(
            TypeBuilder::new("IIterable`1")
                .namespace("Test.Collections")
                .interface()
                .generic_param("T"),
            "First",
        )
        .build(&mut sb);
        let iterable_ref = sb.type_ref("Test.Collections", "IIterable`1");
        let iterable_of_t = sb.type_spec(TypeSignature::GenericInst(GenericInstSig {
            base: TypeDefOrRef::Ref(iterable_ref),
            args: vec![TypeSignature::GenericParam(0)],
        }));
        let vector = TypeBuilder::new("IVector`1")
            .namespace("Test.Collections")
            .interface()
            .generic_param("T")
            .implements(TypeDefOrRef::Spec(iterable_of_t))
            .build(&mut sb);
        let store = sb.build();

        let closure = InterfaceCollector::new(&store)
            .collect(&store.type_def(&vector).unwrap())
            .unwrap();
        let keys: Vec<_> = closure.iter().map(|(key, _)| key.to_string()).collect();
        assert_eq!(keys, vec!["Test.Collections.IIterable`1<T>"]);
    }
}
