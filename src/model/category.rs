//! Type category classification.
//!
//! Category is a capability query, not stored state: it is derived on demand
//! from the `INTERFACE` flag and the identity of the `extends` target. The
//! companion predicates resolve an enum to its underlying primitive
//! representation (bitflag enums project as unsigned) and recognize the
//! exclusivity marker on interfaces.

use crate::{
    metadata::{signatures::ElementType, store::MetadataStore, tables::TypeDef},
    Result,
};

/// Marker attribute identifying a bitflag enum
const FLAGS_ATTRIBUTE: (&str, &str) = ("System", "FlagsAttribute");
/// Marker attribute restricting an interface to one implementing class
const EXCLUSIVE_TO_ATTRIBUTE: (&str, &str) =
    ("Windows.Foundation.Metadata", "ExclusiveToAttribute");

/// The five categories a type definition can classify into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeCategory {
    /// A runtime class
    Class,
    /// An interface
    Interface,
    /// A delegate (extends System.MulticastDelegate)
    Delegate,
    /// An enum (extends System.Enum)
    Enum,
    /// A value type (extends System.ValueType)
    Struct,
}

/// Classify a type definition into its [`TypeCategory`].
///
/// The `INTERFACE` flag decides interfaces; everything else classifies by the
/// namespace+name of its `extends` target. A type without an `extends` target
/// is a class.
///
/// # Errors
/// Returns an error if the `extends` coded reference cannot be read from the
/// store.
pub fn get_category(store: &MetadataStore, ty: &TypeDef) -> Result<TypeCategory> {
    if ty.is_interface() {
        return Ok(TypeCategory::Interface);
    }

    let Some(extends) = &ty.extends else {
        return Ok(TypeCategory::Class);
    };

    let (namespace, name) = store.coded_fullname(extends)?;
    Ok(match (namespace.as_str(), name.as_str()) {
        ("System", "Enum") => TypeCategory::Enum,
        ("System", "ValueType") => TypeCategory::Struct,
        ("System", "MulticastDelegate") => TypeCategory::Delegate,
        _ => TypeCategory::Class,
    })
}

/// Whether the type is an enum carrying the bitflag marker attribute.
///
/// # Errors
/// Returns an error if category classification fails.
pub fn is_flags_enum(store: &MetadataStore, ty: &TypeDef) -> Result<bool> {
    Ok(get_category(store, ty)? == TypeCategory::Enum
        && ty.has_attribute(FLAGS_ATTRIBUTE.0, FLAGS_ATTRIBUTE.1))
}

/// The underlying primitive representation of an enum.
///
/// Bitflag enums are represented as unsigned 4-byte integers so generated
/// bit-manipulation code is well defined; ordinal enums as signed 4-byte
/// integers.
///
/// # Errors
/// Returns an error if category classification fails.
pub fn enum_representation(store: &MetadataStore, ty: &TypeDef) -> Result<ElementType> {
    if is_flags_enum(store, ty)? {
        Ok(ElementType::U4)
    } else {
        Ok(ElementType::I4)
    }
}

/// Whether the type is an interface marked exclusive to a single implementing
/// class.
///
/// Exclusivity is an emission-policy concern for external consumers; closure
/// computation does not consult it.
///
/// # Errors
/// Returns an error if category classification fails.
pub fn is_exclusive_interface(store: &MetadataStore, ty: &TypeDef) -> Result<bool> {
    Ok(get_category(store, ty)? == TypeCategory::Interface
        && ty.has_attribute(EXCLUSIVE_TO_ATTRIBUTE.0, EXCLUSIVE_TO_ATTRIBUTE.1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::builder::{StoreBuilder, TypeBuilder};

    #[test]
    fn test_category_of_each_shape() {
        let mut sb = StoreBuilder::new();
        let class = TypeBuilder::new("Widget").namespace("Test").build(&mut sb);
        let iface = TypeBuilder::new("IWidget")
            .namespace("Test")
            .interface()
            .build(&mut sb);
        let en = TypeBuilder::new("Color")
            .namespace("Test")
            .enum_type()
            .build(&mut sb);
        let st = TypeBuilder::new("Point")
            .namespace("Test")
            .struct_type()
            .build(&mut sb);
        let del = TypeBuilder::new("Handler")
            .namespace("Test")
            .delegate()
            .build(&mut sb);
        let store = sb.build();

        let category = |token| {
            let ty = store.type_def(token).unwrap();
            get_category(&store, &ty).unwrap()
        };
        assert_eq!(category(&class), TypeCategory::Class);
        assert_eq!(category(&iface), TypeCategory::Interface);
        assert_eq!(category(&en), TypeCategory::Enum);
        assert_eq!(category(&st), TypeCategory::Struct);
        assert_eq!(category(&del), TypeCategory::Delegate);
    }

    #[test]
    fn test_enum_representation_by_marker() {
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

        let plain = store.type_def(&plain).unwrap();
        let flags = store.type_def(&flags).unwrap();

        assert!(!is_flags_enum(&store, &plain).unwrap());
        assert!(is_flags_enum(&store, &flags).unwrap());
        assert_eq!(
            enum_representation(&store, &plain).unwrap(),
            crate::metadata::signatures::ElementType::I4
        );
        assert_eq!(
            enum_representation(&store, &flags).unwrap(),
            crate::metadata::signatures::ElementType::U4
        );
    }

    #[test]
    fn test_flags_marker_on_non_enum_is_ignored() {
        let mut sb = StoreBuilder::new();
        let token = TypeBuilder::new("Widget")
            .namespace("Test")
            .attribute("System", "FlagsAttribute")
            .build(&mut sb);
        let store = sb.build();

        let ty = store.type_def(&token).unwrap();
        assert!(!is_flags_enum(&store, &ty).unwrap());
    }

    #[test]
    fn test_exclusive_interface_marker() {
        let mut sb = StoreBuilder::new();
        let marked = TypeBuilder::new("IWidgetPrivate")
            .namespace("Test")
            .interface()
            .attribute("Windows.Foundation.Metadata", "ExclusiveToAttribute")
            .build(&mut sb);
        let open = TypeBuilder::new("IWidget")
            .namespace("Test")
            .interface()
            .build(&mut sb);
        let store = sb.build();

        let marked = store.type_def(&marked).unwrap();
        let open = store.type_def(&open).unwrap();
        assert!(is_exclusive_interface(&store, &marked).unwrap());
        assert!(!is_exclusive_interface(&store, &open).unwrap());
    }
}
