//! Signature value types for the type-reference grammar.
//!
//! The binding model walks a small, closed grammar of type references: primitive
//! element types, coded references into the definition/reference/specification
//! tables, generic instantiations, and unresolved generic-parameter indices.
//! [`TypeSignature`] is that grammar as an explicit sum type; everything the
//! [`crate::model::walker::SignatureWalker`] dispatches on is a variant here, so
//! backends get exhaustiveness checking instead of runtime fallthrough.

use strum::{Display, EnumIter};

use crate::metadata::token::Token;

/// Primitive element types of the runtime.
///
/// Rendering via [`std::fmt::Display`] yields the CLR type name ("Int32",
/// "String", ...), which is what canonical interface keys and emitted models
/// use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
pub enum ElementType {
    /// void
    #[strum(serialize = "Void")]
    Void,
    /// bool
    #[strum(serialize = "Boolean")]
    Boolean,
    /// char
    #[strum(serialize = "Char")]
    Char,
    /// signed 8bit integer
    #[strum(serialize = "SByte")]
    I1,
    /// unsigned 8bit integer
    #[strum(serialize = "Byte")]
    U1,
    /// signed 16bit integer
    #[strum(serialize = "Int16")]
    I2,
    /// unsigned 16bit integer
    #[strum(serialize = "UInt16")]
    U2,
    /// signed 32bit integer
    #[strum(serialize = "Int32")]
    I4,
    /// unsigned 32bit integer
    #[strum(serialize = "UInt32")]
    U4,
    /// signed 64bit integer
    #[strum(serialize = "Int64")]
    I8,
    /// unsigned 64bit integer
    #[strum(serialize = "UInt64")]
    U8,
    /// 32bit floating-point
    #[strum(serialize = "Single")]
    R4,
    /// 64bit floating-point
    #[strum(serialize = "Double")]
    R8,
    /// System.String
    #[strum(serialize = "String")]
    String,
    /// System.Object
    #[strum(serialize = "Object")]
    Object,
}

/// A coded reference to a type in one of three tables.
///
/// This is the pointer-like mention of a type that appears in interface
/// implementation lists, `extends` targets, and type signatures. A `Ref` must
/// resolve to exactly one definition; a `Spec` bundles a generic type with
/// concrete arguments.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeDefOrRef {
    /// A definition owned by this store (`TypeDef` table)
    Def(Token),
    /// An external reference requiring resolution (`TypeRef` table)
    Ref(Token),
    /// A generic instantiation specification (`TypeSpec` table)
    Spec(Token),
}

impl TypeDefOrRef {
    /// The underlying table token, whichever table it points into
    #[must_use]
    pub fn token(&self) -> Token {
        match self {
            TypeDefOrRef::Def(token) | TypeDefOrRef::Ref(token) | TypeDefOrRef::Spec(token) => {
                *token
            }
        }
    }
}

/// A generic type bundled with concrete arguments for its formal parameters.
///
/// The argument sequence is ordered and immutable once constructed.
#[derive(Debug, Clone, PartialEq)]
pub struct GenericInstSig {
    /// The generic type being instantiated (`Def` or `Ref`)
    pub base: TypeDefOrRef,
    /// Concrete arguments, in formal-parameter order
    pub args: Vec<TypeSignature>,
}

/// A parsed type in signatures - the closed type-reference grammar.
#[derive(Debug, Clone, PartialEq)]
pub enum TypeSignature {
    /// A primitive element type
    Element(ElementType),
    /// A coded reference to a definition, reference or specification
    Coded(TypeDefOrRef),
    /// A generic type and its arguments
    GenericInst(GenericInstSig),
    /// An unresolved generic type parameter, by formal index
    GenericParam(u32),
}

/// Parameter type as it appears in a method signature.
///
/// Array-ness is a property of the parameter signature, not a grammar case:
/// a single-dimension array parameter carries `is_szarray` with `base` naming
/// the element type.
#[derive(Debug, Clone, PartialEq)]
pub struct SignatureParameter {
    /// Parameter is passed by reference
    pub by_ref: bool,
    /// Parameter is a single-dimension array of `base`
    pub is_szarray: bool,
    /// The type of the parameter (element type when `is_szarray`)
    pub base: TypeSignature,
}

impl SignatureParameter {
    /// A plain by-value parameter of the given type
    #[must_use]
    pub fn new(base: TypeSignature) -> Self {
        SignatureParameter {
            by_ref: false,
            is_szarray: false,
            base,
        }
    }
}

/// Represents a method signature: return type plus parameter types.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SignatureMethod {
    /// Used to encode the keyword instance in the calling convention
    pub has_this: bool,
    /// The return type of this method, `None` for void
    pub return_type: Option<SignatureParameter>,
    /// The parameters of this method
    pub params: Vec<SignatureParameter>,
}
