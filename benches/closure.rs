//! Benchmarks for interface closure computation.
//!
//! Measures the closure walk over diamond-shaped interface graphs, the shape
//! that exercises the deduplication path, and over generic instantiations,
//! which exercise canonical-name rendering with scope substitution.

extern crate dotbind;

use criterion::{criterion_group, criterion_main, Criterion};
use dotbind::prelude::*;
use std::hint::black_box;
use std::sync::Arc;

/// A wide diamond: `layers` tiers of interfaces, each implementing two
/// interfaces of the tier above, all rooted in one shared base.
fn build_diamond(layers: usize) -> (Arc<MetadataStore>, Token) {
    let mut sb = StoreBuilder::new();

    let base = TypeBuilder::new("IBase")
        .namespace("Bench")
        .interface()
        .method("GetId", |m| m.returns(TypeSignature::Element(ElementType::I4)))
        .build(&mut sb);

    let mut previous = vec![base, base];
    for layer in 0..layers {
        let mut current = Vec::new();
        for position in 0..2 {
            let token = TypeBuilder::new(&format!("ITier{}_{}", layer, position))
                .namespace("Bench")
                .interface()
                .implements(TypeDefOrRef::Def(previous[0]))
                .implements(TypeDefOrRef::Def(previous[1]))
                .method("Get", |m| m.returns(TypeSignature::Element(ElementType::I4)))
                .build(&mut sb);
            current.push(token);
        }
        previous = current;
    }

    let leaf = TypeBuilder::new("Widget")
        .namespace("Bench")
        .implements(TypeDefOrRef::Def(previous[0]))
        .implements(TypeDefOrRef::Def(previous[1]))
        .build(&mut sb);

    (sb.build(), leaf)
}

fn bench_closure_diamond(c: &mut Criterion) {
    let (store, leaf) = build_diamond(8);
    let ty = store.type_def(&leaf).unwrap();

    c.bench_function("closure_diamond_8_layers", |b| {
        b.iter(|| {
            let closure = InterfaceCollector::new(black_box(&store))
                .collect(black_box(&ty))
                .unwrap();
            black_box(closure.len())
        });
    });
}

fn bench_closure_generic(c: &mut Criterion) {
    let mut sb = StoreBuilder::new();

    TypeBuilder::new("IIterable`1")
        .namespace("Bench.Collections")
        .interface()
        .generic_param("T")
        .method("First", |m| m.returns(TypeSignature::Element(ElementType::I4)))
        .build(&mut sb);
    let iterable_ref = sb.type_ref("Bench.Collections", "IIterable`1");
    let iterable_of_t = sb.type_spec(TypeSignature::GenericInst(GenericInstSig {
        base: TypeDefOrRef::Ref(iterable_ref),
        args: vec![TypeSignature::GenericParam(0)],
    }));

    TypeBuilder::new("IVector`1")
        .namespace("Bench.Collections")
        .interface()
        .generic_param("T")
        .implements(TypeDefOrRef::Spec(iterable_of_t))
        .method("GetAt", |m| {
            m.param("index", TypeSignature::Element(ElementType::I4))
                .returns(TypeSignature::Element(ElementType::I4))
        })
        .build(&mut sb);
    let vector_ref = sb.type_ref("Bench.Collections", "IVector`1");

    let vector_of_strings = sb.type_spec(TypeSignature::GenericInst(GenericInstSig {
        base: TypeDefOrRef::Ref(vector_ref),
        args: vec![TypeSignature::Element(ElementType::String)],
    }));
    let leaf = TypeBuilder::new("StringList")
        .namespace("Bench")
        .implements(TypeDefOrRef::Spec(vector_of_strings))
        .build(&mut sb);

    let store = sb.build();
    let ty = store.type_def(&leaf).unwrap();

    c.bench_function("closure_generic_substitution", |b| {
        b.iter(|| {
            let closure = InterfaceCollector::new(black_box(&store))
                .collect(black_box(&ty))
                .unwrap();
            black_box(closure.len())
        });
    });
}

criterion_group!(benches, bench_closure_diamond, bench_closure_generic);
criterion_main!(benches);
