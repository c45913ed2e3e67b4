//! The capability trait backends implement to receive signature dispatch.
//!
//! Every method defaults to [`crate::Error::UnimplementedHandler`], so a
//! backend that only cares about a subset of categories implements exactly
//! that subset - and any category it forgot surfaces as a hard error on the
//! first signature that needs it, instead of producing partial output.

use crate::{
    metadata::{
        signatures::ElementType,
        tables::{TypeDefRc, TypeRefRc},
    },
    Error, Result,
};

/// Receiver for [`crate::model::walker::SignatureWalker`] dispatch.
///
/// One method per type category plus structural events for generic
/// instantiations. The begin/end bracketing around generic arguments is a
/// contract point: emitters render their delimiter syntax there without the
/// walker knowing anything about target syntax.
pub trait SignatureVisitor {
    /// A runtime class
    fn visit_class(&mut self, ty: &TypeDefRc) -> Result<()> {
        let _ = ty;
        Err(Error::UnimplementedHandler("visit_class"))
    }

    /// An interface
    fn visit_interface(&mut self, ty: &TypeDefRc) -> Result<()> {
        let _ = ty;
        Err(Error::UnimplementedHandler("visit_interface"))
    }

    /// A delegate
    fn visit_delegate(&mut self, ty: &TypeDefRc) -> Result<()> {
        let _ = ty;
        Err(Error::UnimplementedHandler("visit_delegate"))
    }

    /// A value type
    fn visit_struct(&mut self, ty: &TypeDefRc) -> Result<()> {
        let _ = ty;
        Err(Error::UnimplementedHandler("visit_struct"))
    }

    /// The well-known `System.Guid` reference.
    ///
    /// Recognized structurally by namespace+name; it has no member-bearing
    /// definition to traverse, so it is routed here instead of through
    /// resolution.
    fn visit_guid(&mut self, ty: &TypeRefRc) -> Result<()> {
        let _ = ty;
        Err(Error::UnimplementedHandler("visit_guid"))
    }

    /// A primitive element type (also the resolved representation of enums)
    fn visit_element(&mut self, element: ElementType) -> Result<()> {
        let _ = element;
        Err(Error::UnimplementedHandler("visit_element"))
    }

    /// An unresolved generic type parameter, by formal index
    fn visit_generic_param(&mut self, index: u32) -> Result<()> {
        let _ = index;
        Err(Error::UnimplementedHandler("visit_generic_param"))
    }

    /// Generic arguments of an instantiation are about to be emitted
    fn begin_generic_args(&mut self) -> Result<()> {
        Err(Error::UnimplementedHandler("begin_generic_args"))
    }

    /// All generic arguments of an instantiation have been emitted
    fn end_generic_args(&mut self) -> Result<()> {
        Err(Error::UnimplementedHandler("end_generic_args"))
    }
}
