//! Fluent builders for populating a [`MetadataStore`].
//!
//! Decoding binary metadata into records is the job of an external reader;
//! inside this crate the builders are the way a store comes to exist - both
//! for tests and for embedders that already hold decoded metadata. The API
//! follows the builder style used throughout the codebase: start a type,
//! chain facts about it, attach members through closures, then `build` it
//! into the store.
//!
//! # Examples
//!
//! ```rust
//! use dotbind::metadata::builder::{StoreBuilder, TypeBuilder};
//! use dotbind::metadata::signatures::{ElementType, TypeDefOrRef, TypeSignature};
//!
//! let mut sb = StoreBuilder::new();
//!
//! let ifoo = TypeBuilder::new("IFoo")
//!     .namespace("Test")
//!     .interface()
//!     .method("get_Value", |m| {
//!         m.special_name().returns(TypeSignature::Element(ElementType::I4))
//!     })
//!     .build(&mut sb);
//!
//! TypeBuilder::new("Widget")
//!     .namespace("Test")
//!     .implements(TypeDefOrRef::Def(ifoo))
//!     .build(&mut sb);
//!
//! let store = sb.build();
//! assert!(store.find_by_fullname("Test", "Widget").is_some());
//! ```

use std::collections::HashMap;
use std::sync::Arc;

use crate::metadata::{
    signatures::{SignatureMethod, SignatureParameter, TypeDefOrRef, TypeSignature},
    store::MetadataStore,
    tables::{
        AttributeRef, Event, GenericParam, MethodDef, MethodRc, MethodSemantics,
        MethodSemanticsAttributes, Param, ParamAttributes, Property, TypeAttributes, TypeDef,
        TypeRef, TypeSpec,
    },
    token::{TableId, Token},
};

// Default method attributes: public, hide-by-sig.
const METHOD_DEFAULT_FLAGS: u32 = 0x0006 | 0x0080;
const METHOD_STATIC: u32 = 0x0010;
const METHOD_SPECIAL_NAME: u32 = 0x0800;
const METHOD_RTSPECIAL_NAME: u32 = 0x1000;

/// Accumulates records and hands out tokens while a store is under
/// construction.
pub struct StoreBuilder {
    store: MetadataStore,
    ref_cache: HashMap<String, Token>,
    next_type_def: u32,
    next_type_ref: u32,
    next_type_spec: u32,
    next_method: u32,
    next_param: u32,
    next_property: u32,
    next_event: u32,
}

impl StoreBuilder {
    /// Start an empty store
    #[must_use]
    pub fn new() -> Self {
        StoreBuilder {
            store: MetadataStore::new(),
            ref_cache: HashMap::new(),
            next_type_def: 1,
            next_type_ref: 1,
            next_type_spec: 1,
            next_method: 1,
            next_param: 1,
            next_property: 1,
            next_event: 1,
        }
    }

    /// Register an external type reference, returning its token.
    ///
    /// References are deduplicated by full name; asking for the same
    /// namespace+name twice yields the same token.
    pub fn type_ref(&mut self, namespace: &str, name: &str) -> Token {
        let key = format!("{}.{}", namespace, name);
        if let Some(token) = self.ref_cache.get(&key) {
            return *token;
        }

        let rid = self.next_type_ref;
        self.next_type_ref += 1;
        let token = Token::from_table(TableId::TypeRef, rid);
        self.store.insert_type_ref(Arc::new(TypeRef {
            rid,
            token,
            namespace: namespace.to_string(),
            name: name.to_string(),
        }));
        self.ref_cache.insert(key, token);
        token
    }

    /// Register a type specification carrying the given signature, returning
    /// its token.
    pub fn type_spec(&mut self, signature: TypeSignature) -> Token {
        let rid = self.next_type_spec;
        self.next_type_spec += 1;
        let token = Token::from_table(TableId::TypeSpec, rid);
        self.store.insert_type_spec(Arc::new(TypeSpec {
            rid,
            token,
            signature,
        }));
        token
    }

    /// Finish construction and return the immutable store
    #[must_use]
    pub fn build(self) -> Arc<MetadataStore> {
        Arc::new(self.store)
    }

    fn alloc_method(&mut self) -> (u32, Token) {
        let rid = self.next_method;
        self.next_method += 1;
        (rid, Token::from_table(TableId::MethodDef, rid))
    }

    fn alloc_param(&mut self) -> (u32, Token) {
        let rid = self.next_param;
        self.next_param += 1;
        (rid, Token::from_table(TableId::Param, rid))
    }
}

impl Default for StoreBuilder {
    fn default() -> Self {
        Self::new()
    }
}

enum PendingExtends {
    None,
    Coded(TypeDefOrRef),
    System(&'static str),
}

/// Fluent builder for a single type definition.
pub struct TypeBuilder {
    namespace: String,
    name: String,
    flags: u32,
    extends: PendingExtends,
    interfaces: Vec<TypeDefOrRef>,
    generic_params: Vec<String>,
    attributes: Vec<AttributeRef>,
    methods: Vec<MethodBuilder>,
    properties: Vec<PropertyBuilder>,
    events: Vec<EventBuilder>,
}

impl TypeBuilder {
    /// Start a new public type with the given name
    #[must_use]
    pub fn new(name: &str) -> Self {
        TypeBuilder {
            namespace: String::new(),
            name: name.to_string(),
            flags: TypeAttributes::PUBLIC,
            extends: PendingExtends::None,
            interfaces: Vec::new(),
            generic_params: Vec::new(),
            attributes: Vec::new(),
            methods: Vec::new(),
            properties: Vec::new(),
            events: Vec::new(),
        }
    }

    /// Set the namespace
    #[must_use]
    pub fn namespace(mut self, namespace: &str) -> Self {
        self.namespace = namespace.to_string();
        self
    }

    /// Mark the type as an interface
    #[must_use]
    pub fn interface(mut self) -> Self {
        self.flags |= TypeAttributes::INTERFACE | TypeAttributes::ABSTRACT;
        self
    }

    /// Make the type an enum (extends System.Enum)
    #[must_use]
    pub fn enum_type(mut self) -> Self {
        self.extends = PendingExtends::System("Enum");
        self.flags |= TypeAttributes::SEALED;
        self
    }

    /// Make the type a struct (extends System.ValueType)
    #[must_use]
    pub fn struct_type(mut self) -> Self {
        self.extends = PendingExtends::System("ValueType");
        self.flags |= TypeAttributes::SEALED;
        self
    }

    /// Make the type a delegate (extends System.MulticastDelegate)
    #[must_use]
    pub fn delegate(mut self) -> Self {
        self.extends = PendingExtends::System("MulticastDelegate");
        self.flags |= TypeAttributes::SEALED;
        self
    }

    /// Set an explicit `extends` target
    #[must_use]
    pub fn extends(mut self, coded: TypeDefOrRef) -> Self {
        self.extends = PendingExtends::Coded(coded);
        self
    }

    /// Add a direct interface-implementation edge
    #[must_use]
    pub fn implements(mut self, coded: TypeDefOrRef) -> Self {
        self.interfaces.push(coded);
        self
    }

    /// Add a formal generic parameter
    #[must_use]
    pub fn generic_param(mut self, name: &str) -> Self {
        self.generic_params.push(name.to_string());
        self
    }

    /// Apply a marker attribute (presence only)
    #[must_use]
    pub fn attribute(mut self, namespace: &str, name: &str) -> Self {
        self.attributes.push(AttributeRef {
            namespace: namespace.to_string(),
            name: name.to_string(),
        });
        self
    }

    /// Add a method, configured through the closure
    #[must_use]
    pub fn method(mut self, name: &str, f: impl FnOnce(MethodBuilder) -> MethodBuilder) -> Self {
        self.methods.push(f(MethodBuilder::new(name)));
        self
    }

    /// Add a default instance constructor
    #[must_use]
    pub fn constructor(mut self) -> Self {
        self.methods
            .push(MethodBuilder::new(".ctor").runtime_special_name());
        self
    }

    /// Add a property of the given type, configured through the closure
    #[must_use]
    pub fn property(
        mut self,
        name: &str,
        signature: TypeSignature,
        f: impl FnOnce(PropertyBuilder) -> PropertyBuilder,
    ) -> Self {
        self.properties.push(f(PropertyBuilder::new(name, signature)));
        self
    }

    /// Add an event with the given handler type, configured through the closure
    #[must_use]
    pub fn event(
        mut self,
        name: &str,
        handler: TypeSignature,
        f: impl FnOnce(EventBuilder) -> EventBuilder,
    ) -> Self {
        self.events.push(f(EventBuilder::new(name, handler)));
        self
    }

    /// Build the type into the store, returning its token
    pub fn build(self, sb: &mut StoreBuilder) -> Token {
        let rid = sb.next_type_def;
        sb.next_type_def += 1;
        let token = Token::from_table(TableId::TypeDef, rid);

        let extends = match self.extends {
            PendingExtends::None => None,
            PendingExtends::Coded(coded) => Some(coded),
            PendingExtends::System(name) => {
                Some(TypeDefOrRef::Ref(sb.type_ref("System", name)))
            }
        };

        let mut methods: Vec<MethodRc> = self
            .methods
            .into_iter()
            .map(|builder| builder.build(sb))
            .collect();

        let mut properties = Vec::new();
        for builder in self.properties {
            properties.push(Arc::new(builder.build(sb, &mut methods)));
        }

        let mut events = Vec::new();
        for builder in self.events {
            events.push(Arc::new(builder.build(sb, &mut methods)));
        }

        let generic_params = self
            .generic_params
            .into_iter()
            .enumerate()
            .map(|(number, name)| {
                #[allow(clippy::cast_possible_truncation)]
                let number = number as u32;
                Arc::new(GenericParam { number, name })
            })
            .collect();

        sb.store.insert_type_def(Arc::new(TypeDef {
            rid,
            token,
            flags: self.flags,
            namespace: self.namespace,
            name: self.name,
            extends,
            methods,
            interfaces: self.interfaces,
            generic_params,
            properties,
            events,
            custom_attributes: self.attributes,
        }));
        token
    }
}

struct ParamSpec {
    name: Option<String>,
    flags: u32,
    signature: SignatureParameter,
}

/// Fluent builder for a method definition.
pub struct MethodBuilder {
    name: String,
    flags: u32,
    return_type: Option<SignatureParameter>,
    named_return: Option<String>,
    params: Vec<ParamSpec>,
}

impl MethodBuilder {
    /// Start a new method with the given name
    #[must_use]
    pub fn new(name: &str) -> Self {
        MethodBuilder {
            name: name.to_string(),
            flags: METHOD_DEFAULT_FLAGS,
            return_type: None,
            named_return: None,
            params: Vec::new(),
        }
    }

    /// Mark the method static
    #[must_use]
    pub fn static_method(mut self) -> Self {
        self.flags |= METHOD_STATIC;
        self
    }

    /// Apply the special-name marker (accessors, operators)
    #[must_use]
    pub fn special_name(mut self) -> Self {
        self.flags |= METHOD_SPECIAL_NAME;
        self
    }

    /// Apply the runtime special-name marker (constructors)
    #[must_use]
    pub fn runtime_special_name(mut self) -> Self {
        self.flags |= METHOD_SPECIAL_NAME | METHOD_RTSPECIAL_NAME;
        self
    }

    /// Set the return type
    #[must_use]
    pub fn returns(mut self, signature: TypeSignature) -> Self {
        self.return_type = Some(SignatureParameter::new(signature));
        self
    }

    /// Name the return value; emits a sequence-0 parameter record
    #[must_use]
    pub fn named_return(mut self, name: &str) -> Self {
        self.named_return = Some(name.to_string());
        self
    }

    /// Add an input parameter
    #[must_use]
    pub fn param(mut self, name: &str, signature: TypeSignature) -> Self {
        self.params.push(ParamSpec {
            name: Some(name.to_string()),
            flags: ParamAttributes::IN,
            signature: SignatureParameter::new(signature),
        });
        self
    }

    /// Add an output parameter (by-reference, as emitted for out values)
    #[must_use]
    pub fn out_param(mut self, name: &str, signature: TypeSignature) -> Self {
        self.params.push(ParamSpec {
            name: Some(name.to_string()),
            flags: ParamAttributes::OUT,
            signature: SignatureParameter {
                by_ref: true,
                is_szarray: false,
                base: signature,
            },
        });
        self
    }

    /// Add an input array parameter (pass-array)
    #[must_use]
    pub fn array_param(mut self, name: &str, element: TypeSignature) -> Self {
        self.params.push(ParamSpec {
            name: Some(name.to_string()),
            flags: ParamAttributes::IN,
            signature: SignatureParameter {
                by_ref: false,
                is_szarray: true,
                base: element,
            },
        });
        self
    }

    /// Add a caller-allocated output array parameter (fill-array)
    #[must_use]
    pub fn fill_array_param(mut self, name: &str, element: TypeSignature) -> Self {
        self.params.push(ParamSpec {
            name: Some(name.to_string()),
            flags: ParamAttributes::OUT,
            signature: SignatureParameter {
                by_ref: true,
                is_szarray: true,
                base: element,
            },
        });
        self
    }

    /// Add a callee-allocated output array parameter (receive-array)
    #[must_use]
    pub fn receive_array_param(mut self, name: &str, element: TypeSignature) -> Self {
        self.params.push(ParamSpec {
            name: Some(name.to_string()),
            flags: ParamAttributes::OUT,
            signature: SignatureParameter {
                by_ref: false,
                is_szarray: true,
                base: element,
            },
        });
        self
    }

    /// Add a parameter with explicit flags and signature, for fixtures that
    /// exercise combinations outside the valid classification table
    #[must_use]
    pub fn raw_param(
        mut self,
        name: Option<&str>,
        flags: u32,
        signature: SignatureParameter,
    ) -> Self {
        self.params.push(ParamSpec {
            name: name.map(str::to_string),
            flags,
            signature,
        });
        self
    }

    fn build(self, sb: &mut StoreBuilder) -> MethodRc {
        let (rid, token) = sb.alloc_method();

        let mut param_records = Vec::new();
        if self.return_type.is_some() {
            if let Some(return_name) = self.named_return {
                let (prid, ptoken) = sb.alloc_param();
                param_records.push(Arc::new(Param {
                    rid: prid,
                    token: ptoken,
                    flags: 0,
                    sequence: 0,
                    name: Some(return_name),
                }));
            }
        }

        let mut signature_params = Vec::new();
        for (position, spec) in self.params.into_iter().enumerate() {
            let (prid, ptoken) = sb.alloc_param();
            #[allow(clippy::cast_possible_truncation)]
            param_records.push(Arc::new(Param {
                rid: prid,
                token: ptoken,
                flags: spec.flags,
                sequence: position as u32 + 1,
                name: spec.name,
            }));
            signature_params.push(spec.signature);
        }

        Arc::new(MethodDef {
            rid,
            token,
            flags: self.flags,
            name: self.name,
            signature: SignatureMethod {
                has_this: self.flags & METHOD_STATIC == 0,
                return_type: self.return_type,
                params: signature_params,
            },
            params: param_records,
        })
    }
}

/// Fluent builder for a property and its accessor linkages.
///
/// By default a getter is generated; chain [`PropertyBuilder::setter`] for a
/// matching setter. The [`PropertyBuilder::semantic`] escape hatch attaches an
/// arbitrary linkage for fixtures exercising invalid metadata.
pub struct PropertyBuilder {
    name: String,
    signature: TypeSignature,
    with_getter: bool,
    with_setter: bool,
    static_accessors: bool,
    raw_semantics: Vec<(u32, MethodBuilder)>,
}

impl PropertyBuilder {
    fn new(name: &str, signature: TypeSignature) -> Self {
        PropertyBuilder {
            name: name.to_string(),
            signature,
            with_getter: true,
            with_setter: false,
            static_accessors: false,
            raw_semantics: Vec::new(),
        }
    }

    /// Also generate a setter
    #[must_use]
    pub fn setter(mut self) -> Self {
        self.with_setter = true;
        self
    }

    /// Suppress the generated getter (invalid-metadata fixtures)
    #[must_use]
    pub fn without_getter(mut self) -> Self {
        self.with_getter = false;
        self
    }

    /// Make the generated accessors static
    #[must_use]
    pub fn static_accessors(mut self) -> Self {
        self.static_accessors = true;
        self
    }

    /// Attach a raw semantic linkage
    #[must_use]
    pub fn semantic(mut self, semantics: u32, method: MethodBuilder) -> Self {
        self.raw_semantics.push((semantics, method));
        self
    }

    fn build(self, sb: &mut StoreBuilder, methods: &mut Vec<MethodRc>) -> Property {
        let rid = sb.next_property;
        sb.next_property += 1;
        let token = Token::from_table(TableId::Property, rid);

        let mut semantics = Vec::new();

        if self.with_getter {
            let mut getter =
                MethodBuilder::new(&format!("get_{}", self.name))
                    .special_name()
                    .returns(self.signature.clone());
            if self.static_accessors {
                getter = getter.static_method();
            }
            let method = getter.build(sb);
            methods.push(method.clone());
            semantics.push(Arc::new(MethodSemantics {
                semantics: MethodSemanticsAttributes::GETTER,
                method,
            }));
        }

        if self.with_setter {
            let mut setter = MethodBuilder::new(&format!("put_{}", self.name))
                .special_name()
                .param("value", self.signature.clone());
            if self.static_accessors {
                setter = setter.static_method();
            }
            let method = setter.build(sb);
            methods.push(method.clone());
            semantics.push(Arc::new(MethodSemantics {
                semantics: MethodSemanticsAttributes::SETTER,
                method,
            }));
        }

        for (kind, builder) in self.raw_semantics {
            let method = builder.build(sb);
            methods.push(method.clone());
            semantics.push(Arc::new(MethodSemantics {
                semantics: kind,
                method,
            }));
        }

        Property {
            rid,
            token,
            name: self.name,
            semantics,
        }
    }
}

/// Fluent builder for an event and its accessor linkages.
///
/// By default both add and remove accessors are generated.
pub struct EventBuilder {
    name: String,
    handler: TypeSignature,
    with_add: bool,
    with_remove: bool,
    static_accessors: bool,
    raw_semantics: Vec<(u32, MethodBuilder)>,
}

impl EventBuilder {
    fn new(name: &str, handler: TypeSignature) -> Self {
        EventBuilder {
            name: name.to_string(),
            handler,
            with_add: true,
            with_remove: true,
            static_accessors: false,
            raw_semantics: Vec::new(),
        }
    }

    /// Suppress the generated add accessor (invalid-metadata fixtures)
    #[must_use]
    pub fn without_add(mut self) -> Self {
        self.with_add = false;
        self
    }

    /// Suppress the generated remove accessor (invalid-metadata fixtures)
    #[must_use]
    pub fn without_remove(mut self) -> Self {
        self.with_remove = false;
        self
    }

    /// Make the generated accessors static
    #[must_use]
    pub fn static_accessors(mut self) -> Self {
        self.static_accessors = true;
        self
    }

    /// Attach a raw semantic linkage
    #[must_use]
    pub fn semantic(mut self, semantics: u32, method: MethodBuilder) -> Self {
        self.raw_semantics.push((semantics, method));
        self
    }

    fn build(self, sb: &mut StoreBuilder, methods: &mut Vec<MethodRc>) -> Event {
        use crate::metadata::signatures::ElementType;

        let rid = sb.next_event;
        sb.next_event += 1;
        let token = Token::from_table(TableId::Event, rid);

        let mut semantics = Vec::new();

        if self.with_add {
            let mut add = MethodBuilder::new(&format!("add_{}", self.name))
                .special_name()
                .param("handler", self.handler.clone())
                .returns(TypeSignature::Element(ElementType::I8));
            if self.static_accessors {
                add = add.static_method();
            }
            let method = add.build(sb);
            methods.push(method.clone());
            semantics.push(Arc::new(MethodSemantics {
                semantics: MethodSemanticsAttributes::ADD_ON,
                method,
            }));
        }

        if self.with_remove {
            let mut remove = MethodBuilder::new(&format!("remove_{}", self.name))
                .special_name()
                .param("token", TypeSignature::Element(ElementType::I8));
            if self.static_accessors {
                remove = remove.static_method();
            }
            let method = remove.build(sb);
            methods.push(method.clone());
            semantics.push(Arc::new(MethodSemantics {
                semantics: MethodSemanticsAttributes::REMOVE_ON,
                method,
            }));
        }

        for (kind, builder) in self.raw_semantics {
            let method = builder.build(sb);
            methods.push(method.clone());
            semantics.push(Arc::new(MethodSemantics {
                semantics: kind,
                method,
            }));
        }

        Event {
            rid,
            token,
            name: self.name,
            semantics,
        }
    }
}
