//! Canonical string keys for possibly-generic type references.
//!
//! Interface closure entries are keyed by a canonical rendering of the
//! reference, so structurally identical references - including generic
//! instantiations with identical arguments - collapse to one key no matter
//! how many inheritance paths reach them.
//!
//! Generic-parameter substitution is scoped: while the closure walk descends
//! through a specification, the instantiation's arguments are bound as a
//! frame of pre-rendered strings. Frames are pushed and popped with strict
//! stack discipline through [`CanonicalNames::scoped`], which releases the
//! frame on every exit path, so bindings from one branch never leak into
//! sibling or ancestor traversal.

use crate::{
    metadata::{
        signatures::{GenericInstSig, TypeDefOrRef, TypeSignature},
        store::MetadataStore,
    },
    Result,
};

/// Renders canonical keys, resolving generic parameters against the active
/// scope stack.
pub struct CanonicalNames<'a> {
    store: &'a MetadataStore,
    frames: Vec<Vec<String>>,
}

impl<'a> CanonicalNames<'a> {
    /// Create a renderer with an empty scope stack
    #[must_use]
    pub fn new(store: &'a MetadataStore) -> Self {
        CanonicalNames {
            store,
            frames: Vec::new(),
        }
    }

    /// Canonical key for a coded reference.
    ///
    /// Definitions and references render as "Ns.Name"; specifications render
    /// the full instantiation with angle-bracketed arguments.
    ///
    /// # Errors
    /// Fails on dangling tokens, malformed specifications, or generic
    /// parameters with no active binding.
    pub fn coded_name(&self, coded: &TypeDefOrRef) -> Result<String> {
        match coded {
            TypeDefOrRef::Def(_) | TypeDefOrRef::Ref(_) => {
                let (namespace, name) = self.store.coded_fullname(coded)?;
                Ok(qualify(&namespace, &name))
            }
            TypeDefOrRef::Spec(token) => {
                let spec = self
                    .store
                    .type_spec(token)
                    .ok_or(crate::Error::TypeNotFound(*token))?;
                self.generic_inst_name(spec.generic_inst()?)
            }
        }
    }

    /// Canonical key for a type signature.
    ///
    /// # Errors
    /// Fails on dangling tokens, malformed specifications, or generic
    /// parameters with no active binding.
    pub fn signature_name(&self, signature: &TypeSignature) -> Result<String> {
        match signature {
            TypeSignature::Element(element) => Ok(element.to_string()),
            TypeSignature::Coded(coded) => self.coded_name(coded),
            TypeSignature::GenericInst(inst) => self.generic_inst_name(inst),
            TypeSignature::GenericParam(index) => self.resolve_generic_param(*index),
        }
    }

    fn generic_inst_name(&self, inst: &GenericInstSig) -> Result<String> {
        let (namespace, name) = self.store.coded_fullname(&inst.base)?;
        let mut rendered = qualify(&namespace, &name);
        rendered.push('<');
        for (position, arg) in inst.args.iter().enumerate() {
            if position != 0 {
                rendered.push_str(", ");
            }
            rendered.push_str(&self.signature_name(arg)?);
        }
        rendered.push('>');
        Ok(rendered)
    }

    fn resolve_generic_param(&self, index: u32) -> Result<String> {
        let frame = self.frames.last().ok_or_else(|| {
            invalid_metadata!(
                "generic parameter {} referenced outside any instantiation scope",
                index
            )
        })?;
        frame.get(index as usize).cloned().ok_or_else(|| {
            invalid_metadata!(
                "generic parameter {} exceeds the {} bound arguments in scope",
                index,
                frame.len()
            )
        })
    }

    /// Pre-render an instantiation's arguments under the current scope, ready
    /// to be pushed as a frame for descending into that instantiation.
    ///
    /// # Errors
    /// Fails if any argument cannot be rendered.
    pub fn render_args(&self, inst: &GenericInstSig) -> Result<Vec<String>> {
        inst.args
            .iter()
            .map(|arg| self.signature_name(arg))
            .collect()
    }

    /// Run `f` with `frame` pushed as the innermost scope.
    ///
    /// The frame is released when `f` returns, whether it succeeds or fails,
    /// so no binding survives into sibling branches.
    pub fn scoped<T>(
        &mut self,
        frame: Vec<String>,
        f: impl FnOnce(&mut Self) -> Result<T>,
    ) -> Result<T> {
        self.frames.push(frame);
        let result = f(self);
        self.frames.pop();
        result
    }
}

fn qualify(namespace: &str, name: &str) -> String {
    if namespace.is_empty() {
        name.to_string()
    } else {
        format!("{}.{}", namespace, name)
    }
}
