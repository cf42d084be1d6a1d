//! The meta-query schema extension.
//!
//! [`MetaQuery`] contributes a `metaQuery` argument to every content-backed
//! GraphQL type the host assembles, registering the per-type filter input
//! shape on first use:
//!
//! ```graphql
//! input TMetaQuery { relation: RelationEnum, metaArray: [TMetaArray] }
//! input TMetaArray { key: String, value: String, values: [String], compare: TMetaCompareEnum, type: TMetaTypeEnum }
//! ```
//!
//! The mapping of parsed `metaQuery` arguments onto engine clauses lives in
//! [`mapper`](crate::mapper).

use async_graphql::dynamic::TypeRef;
use async_graphql::{Name, Value};
use indexmap::IndexMap;

use crate::filters::{MetaComparator, MetaValueType, Relation};
use crate::registry::{
    EnumValueDef, InputFieldDef, InputFields, QueryClass, RegistryError, TypeConfig, TypeRegistry,
};

/// Name of the shared relation enum. Registered once, unprefixed, because
/// every filterable type combines conditions the same way.
pub const RELATION_ENUM: &str = "RelationEnum";

/// The plugin object. Stateless; both hooks are pure apart from writing type
/// definitions into the registry they are handed.
#[derive(Copy, Clone, Debug, Default)]
pub struct MetaQuery;

impl MetaQuery {
    /// Register the meta-filter types for one content type.
    ///
    /// Scoped by `type_name` so multiple content types get independently
    /// named inputs: `{T}MetaTypeEnum`, `{T}MetaCompareEnum`, `{T}MetaArray`
    /// and `{T}MetaQuery`, plus the shared [`RELATION_ENUM`] on first use.
    /// Not defensive about re-invocation: registering the same `type_name`
    /// twice fails with [`RegistryError::DuplicateType`].
    pub fn register_types(
        &self,
        type_name: &str,
        registry: &mut TypeRegistry,
    ) -> Result<(), RegistryError> {
        if !registry.contains(RELATION_ENUM) {
            registry.register_enum_type(
                RELATION_ENUM,
                Relation::ALL
                    .iter()
                    .map(|relation| EnumValueDef::new(relation.as_str(), relation.as_str()))
                    .collect(),
            )?;
        }

        let type_enum = format!("{type_name}MetaTypeEnum");
        registry.register_enum_type(
            &type_enum,
            MetaValueType::ALL
                .iter()
                .map(|ty| EnumValueDef::new(ty.as_str(), ty.as_str()))
                .collect(),
        )?;

        let compare_enum = format!("{type_name}MetaCompareEnum");
        registry.register_enum_type(
            &compare_enum,
            MetaComparator::ALL
                .iter()
                .map(|cmp| EnumValueDef::new(cmp.graphql_name(), cmp.to_sql()))
                .collect(),
        )?;

        let mut condition_fields = InputFields::new();
        condition_fields.insert(
            "key".into(),
            InputFieldDef::new(TypeRef::named(TypeRef::STRING)).describe("Custom field key"),
        );
        condition_fields.insert(
            "value".into(),
            InputFieldDef::new(TypeRef::named(TypeRef::STRING)).describe("Custom field value"),
        );
        condition_fields.insert(
            "values".into(),
            InputFieldDef::new(TypeRef::named_list(TypeRef::STRING))
                .describe("Custom field values"),
        );
        condition_fields.insert(
            "compare".into(),
            InputFieldDef::new(TypeRef::named(compare_enum)).describe("Comparison operator"),
        );
        condition_fields.insert(
            "type".into(),
            InputFieldDef::new(TypeRef::named(type_enum)).describe("Value type hint"),
        );
        registry.register_input_type(format!("{type_name}MetaArray"), condition_fields)?;

        let mut filter_fields = InputFields::new();
        filter_fields.insert(
            "relation".into(),
            InputFieldDef::new(TypeRef::named(RELATION_ENUM)),
        );
        filter_fields.insert(
            "metaArray".into(),
            InputFieldDef::new(TypeRef::named_list(format!("{type_name}MetaArray"))),
        );
        registry.register_input_type(format!("{type_name}MetaQuery"), filter_fields)?;

        tracing::debug!(type_name, "Registered meta-query filter types");
        Ok(())
    }

    /// Contribute the `metaQuery` argument while the host assembles a type's
    /// query-args input fields.
    ///
    /// Only acts on types backed by the content-query engine; for any other
    /// (or undeclared) query class the fields come back unchanged and
    /// nothing is registered.
    pub fn add_input_fields(
        &self,
        mut fields: InputFields,
        type_name: &str,
        config: &TypeConfig,
        registry: &mut TypeRegistry,
    ) -> Result<InputFields, RegistryError> {
        if config.query_class != Some(QueryClass::Content) {
            return Ok(fields);
        }

        self.register_types(type_name, registry)?;
        fields.insert(
            "metaQuery".into(),
            InputFieldDef::new(TypeRef::named(format!("{type_name}MetaQuery"))),
        );
        Ok(fields)
    }

    /// Resolve enum names in a parsed `metaQuery` argument to the values
    /// registered for them (`EQUAL_TO` becomes `=`, and so on).
    ///
    /// The schema framework delivers enum arguments by GraphQL name; the
    /// engine wants the registered keywords. Shape-aware: `relation`
    /// resolves against [`RELATION_ENUM`], each condition's `compare` and
    /// `type` against the `type_name`-scoped enums. Unknown names and
    /// non-enum values are left untouched, as are args without a
    /// `metaQuery`. Hosts call this between argument parsing and
    /// [`map_input_fields`](crate::map_input_fields).
    pub fn resolve_enum_args(
        &self,
        registry: &TypeRegistry,
        type_name: &str,
        mut input_args: IndexMap<Name, Value>,
    ) -> IndexMap<Name, Value> {
        let Some(Value::Object(meta_query)) = input_args.get_mut("metaQuery") else {
            return input_args;
        };

        if let Some(relation) = meta_query.get_mut("relation") {
            resolve_enum(registry, RELATION_ENUM, relation);
        }
        if let Some(Value::List(conditions)) = meta_query.get_mut("metaArray") {
            let compare_enum = format!("{type_name}MetaCompareEnum");
            let type_enum = format!("{type_name}MetaTypeEnum");
            for condition in conditions {
                let Value::Object(fields) = condition else {
                    continue;
                };
                if let Some(compare) = fields.get_mut("compare") {
                    resolve_enum(registry, &compare_enum, compare);
                }
                if let Some(value_type) = fields.get_mut("type") {
                    resolve_enum(registry, &type_enum, value_type);
                }
            }
        }
        input_args
    }
}

/// Replace an enum name (delivered as `Value::Enum` or `Value::String`) with
/// its registered value; anything unresolvable stays as-is.
fn resolve_enum(registry: &TypeRegistry, enum_name: &str, value: &mut Value) {
    let graphql_name = match value {
        Value::Enum(name) => name.as_str(),
        Value::String(name) => name.as_str(),
        _ => return,
    };
    if let Some(resolved) = registry.enum_value(enum_name, graphql_name) {
        *value = Value::String(resolved.to_string());
    }
}
