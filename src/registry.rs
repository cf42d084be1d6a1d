//! Explicit GraphQL type registry.
//!
//! The schema framework this crate plugs into builds its schema dynamically;
//! contributed types are collected here by name, then drained into the host's
//! [`SchemaBuilder`] with [`TypeRegistry::apply`]. Keeping the registry an
//! owned object (rather than ambient global state) makes registration
//! failures visible at the call site and lets tests inspect what a plugin
//! registered without building a schema.

use async_graphql::dynamic::{Enum, EnumItem, InputObject, InputValue, SchemaBuilder, TypeRef};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Registration errors. Both are fatal to schema construction.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    #[error("Type `{0}` is already registered")]
    DuplicateType(String),

    #[error("`{0}` is not a valid GraphQL type name")]
    InvalidTypeName(String),
}

/// Which backing query engine a GraphQL type's arguments target.
#[derive(Serialize, Deserialize, Copy, Clone, Debug, Eq, PartialEq)]
pub enum QueryClass {
    /// The CMS content-query engine. The only class this crate extends.
    Content,
    /// Term/taxonomy queries. Not supported here.
    Taxonomy,
    /// User queries. Not supported here.
    User,
}

/// Host-side configuration descriptor for the input type being assembled.
///
/// Passed into [`MetaQuery::add_input_fields`](crate::MetaQuery::add_input_fields)
/// so the extension can tell which engine the type's arguments feed.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct TypeConfig {
    /// The backing engine, when the host declares one.
    pub query_class: Option<QueryClass>,
}

impl TypeConfig {
    pub fn new(query_class: QueryClass) -> Self {
        Self {
            query_class: Some(query_class),
        }
    }

    /// Descriptor for a type backed by the content-query engine.
    pub fn content() -> Self {
        Self::new(QueryClass::Content)
    }
}

/// One value of a registered enum: the GraphQL-facing name paired with the
/// internal value argument resolution substitutes for it.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EnumValueDef {
    pub name: String,
    pub value: String,
}

impl EnumValueDef {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// One field of a registered input type.
#[derive(Clone, Debug)]
pub struct InputFieldDef {
    /// GraphQL type reference, optionally list-wrapped.
    pub ty: TypeRef,
    pub description: Option<String>,
}

impl InputFieldDef {
    pub fn new(ty: TypeRef) -> Self {
        Self {
            ty,
            description: None,
        }
    }

    pub fn describe(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Ordered field-name → field-definition mapping, the shape hooks that
/// assemble input types pass around.
pub type InputFields = IndexMap<String, InputFieldDef>;

#[derive(Clone, Debug)]
enum TypeDef {
    Enum(Vec<EnumValueDef>),
    Input(InputFields),
}

/// Named enum and input-object definitions accumulated during schema build.
///
/// Names must match the GraphQL name grammar and are registered at most once;
/// a collision surfaces as [`RegistryError::DuplicateType`] rather than a
/// silent overwrite.
#[derive(Clone, Debug, Default)]
pub struct TypeRegistry {
    types: IndexMap<String, TypeDef>,
}

impl TypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of registered types.
    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Whether a type of this name has been registered.
    pub fn contains(&self, name: &str) -> bool {
        self.types.contains_key(name)
    }

    /// Registered type names, in registration order.
    pub fn type_names(&self) -> impl Iterator<Item = &str> {
        self.types.keys().map(String::as_str)
    }

    /// Register an enum type from its value definitions.
    pub fn register_enum_type(
        &mut self,
        name: impl Into<String>,
        values: Vec<EnumValueDef>,
    ) -> Result<(), RegistryError> {
        self.insert(name.into(), TypeDef::Enum(values))
    }

    /// Register an input object type from its field definitions.
    pub fn register_input_type(
        &mut self,
        name: impl Into<String>,
        fields: InputFields,
    ) -> Result<(), RegistryError> {
        self.insert(name.into(), TypeDef::Input(fields))
    }

    /// Look up the internal value registered for an enum's GraphQL name.
    ///
    /// Returns `None` when `enum_name` is unknown, is not an enum, or has no
    /// value of that name.
    pub fn enum_value(&self, enum_name: &str, graphql_name: &str) -> Option<&str> {
        match self.types.get(enum_name)? {
            TypeDef::Enum(values) => values
                .iter()
                .find(|value| value.name == graphql_name)
                .map(|value| value.value.as_str()),
            TypeDef::Input(_) => None,
        }
    }

    /// Drain the registry into a dynamic schema builder.
    pub fn apply(self, mut builder: SchemaBuilder) -> SchemaBuilder {
        for (name, def) in self.types {
            match def {
                TypeDef::Enum(values) => {
                    let mut enum_type = Enum::new(name);
                    for value in values {
                        enum_type = enum_type.item(EnumItem::new(value.name));
                    }
                    builder = builder.register(enum_type);
                }
                TypeDef::Input(fields) => {
                    let mut input_type = InputObject::new(name);
                    for (field_name, field) in fields {
                        let mut input_value = InputValue::new(field_name, field.ty);
                        if let Some(description) = field.description {
                            input_value = input_value.description(description);
                        }
                        input_type = input_type.field(input_value);
                    }
                    builder = builder.register(input_type);
                }
            }
        }
        builder
    }

    fn insert(&mut self, name: String, def: TypeDef) -> Result<(), RegistryError> {
        if !is_valid_type_name(&name) {
            return Err(RegistryError::InvalidTypeName(name));
        }
        if self.types.contains_key(&name) {
            return Err(RegistryError::DuplicateType(name));
        }
        tracing::debug!(type_name = %name, "Registered GraphQL type");
        self.types.insert(name, def);
        Ok(())
    }
}

/// GraphQL name grammar: `[_A-Za-z][_0-9A-Za-z]*`.
fn is_valid_type_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first == '_' || first.is_ascii_alphabetic() => {}
        _ => return false,
    }
    chars.all(|c| c == '_' || c.is_ascii_alphanumeric())
}
