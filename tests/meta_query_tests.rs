//! End-to-end tests for the meta-query extension
//!
//! These tests drive the full flow through a real dynamically-built GraphQL
//! schema:
//! - Type registration via the input-fields hook
//! - Argument parsing, enum resolution and clause mapping in a resolver
//! - The wire-level SDL the extension contributes

use std::sync::Arc;

use async_graphql::dynamic::{
    Field, FieldFuture, InputValue, Object, ResolverContext, Schema, TypeRef,
};
use async_graphql::Value;
use graphql_meta_query::{
    map_input_fields, InputFields, MetaQuery, TypeConfig, TypeRegistry,
};
use indexmap::IndexMap;
use serde_json::json;

// ============================================================================
// Schema Harness
// ============================================================================

/// Build a schema with one content type, `Post`, whose `posts` field takes
/// a `where: PostWhereArgs` argument and echoes the mapped engine args back
/// as a JSON string.
fn content_schema() -> Schema {
    let mut registry = TypeRegistry::new();
    let fields = MetaQuery
        .add_input_fields(
            InputFields::new(),
            "Post",
            &TypeConfig::content(),
            &mut registry,
        )
        .expect("meta-query registration");
    registry
        .register_input_type("PostWhereArgs", fields)
        .expect("where-args registration");
    let registry = Arc::new(registry);

    let resolver_registry = Arc::clone(&registry);
    let query = Object::new("Query").field(
        Field::new("posts", TypeRef::named_nn(TypeRef::STRING), move |ctx: ResolverContext<'_>| {
            let registry = Arc::clone(&resolver_registry);
            FieldFuture::new(async move {
                let input_args = match ctx.args.get("where").map(|arg| arg.as_value().clone()) {
                    Some(Value::Object(fields)) => fields,
                    _ => IndexMap::new(),
                };
                let input_args = MetaQuery.resolve_enum_args(&registry, "Post", input_args);
                let engine_args = map_input_fields(IndexMap::new(), &input_args);
                let json = Value::Object(engine_args)
                    .into_json()
                    .map_err(|err| async_graphql::Error::new(err.to_string()))?;
                Ok(Some(Value::from(json.to_string())))
            })
        })
        .argument(InputValue::new("where", TypeRef::named("PostWhereArgs"))),
    );

    registry
        .as_ref()
        .clone()
        .apply(Schema::build("Query", None, None).register(query))
        .finish()
        .expect("schema build")
}

/// Run a query against the harness and return the engine args the resolver
/// produced.
async fn engine_args(schema: &Schema, query: &str) -> serde_json::Value {
    let response = schema.execute(query).await;
    assert!(response.errors.is_empty(), "{:?}", response.errors);
    let data = response.data.into_json().expect("response data");
    let echoed = data["posts"].as_str().expect("posts payload");
    serde_json::from_str(echoed).expect("engine args json")
}

// ============================================================================
// Schema Registration
// ============================================================================

#[test]
fn test_sdl_contains_contributed_types() {
    let sdl = content_schema().sdl();
    for fragment in [
        "enum RelationEnum",
        "enum PostMetaTypeEnum",
        "enum PostMetaCompareEnum",
        "input PostMetaArray",
        "input PostMetaQuery",
        "metaQuery: PostMetaQuery",
        "EQUAL_TO",
        "NOT_BETWEEN",
        "DATETIME",
    ] {
        assert!(sdl.contains(fragment), "SDL missing `{fragment}`:\n{sdl}");
    }
}

#[test]
fn test_second_schema_build_for_same_type_fails() {
    let mut registry = TypeRegistry::new();
    MetaQuery.register_types("Post", &mut registry).unwrap();
    let err = MetaQuery.register_types("Post", &mut registry).unwrap_err();
    assert_eq!(
        err.to_string(),
        "Type `PostMetaTypeEnum` is already registered",
    );
}

// ============================================================================
// Query Execution
// ============================================================================

#[tokio::test]
async fn test_meta_query_argument_maps_to_engine_clauses() {
    let schema = content_schema();
    let args = engine_args(
        &schema,
        r#"{
            posts(where: {
                metaQuery: {
                    relation: AND,
                    metaArray: [
                        { key: "color", compare: EQUAL_TO, type: CHAR, value: "blue" },
                        { key: "tag", compare: IN, values: ["x", "y"] }
                    ]
                }
            })
        }"#,
    )
    .await;

    // Enum names arrive resolved to engine keywords, absent fields as nulls.
    assert_eq!(
        args,
        json!({
            "meta_query": {
                "relation": "AND",
                "0": {"key": "color", "compare": "=", "type": "CHAR", "value": "blue"},
                "1": {"key": "tag", "compare": "IN", "type": null, "value": ["x", "y"]},
            },
        }),
    );
}

#[tokio::test]
async fn test_three_conditions_drop_relation_over_the_wire() {
    let schema = content_schema();
    let args = engine_args(
        &schema,
        r#"{
            posts(where: {
                metaQuery: {
                    relation: OR,
                    metaArray: [
                        { key: "a", value: "1" },
                        { key: "b", value: "2" },
                        { key: "c", value: "3" }
                    ]
                }
            })
        }"#,
    )
    .await;

    let meta_query = &args["meta_query"];
    assert!(meta_query.get("relation").is_none());
    assert_eq!(meta_query["0"]["key"], json!("a"));
    assert_eq!(meta_query["2"]["key"], json!("c"));
}

#[tokio::test]
async fn test_omitting_where_produces_no_meta_query() {
    let schema = content_schema();
    let args = engine_args(&schema, "{ posts }").await;
    assert_eq!(args, json!({}));
}

#[tokio::test]
async fn test_empty_meta_query_produces_no_meta_query() {
    let schema = content_schema();
    let args = engine_args(&schema, "{ posts(where: { metaQuery: {} }) }").await;
    assert_eq!(args, json!({}));
}

// ============================================================================
// Typed Construction
// ============================================================================

#[tokio::test]
async fn test_typed_filter_matches_hand_written_query() {
    use async_graphql::Name;
    use graphql_meta_query::{MetaComparator, MetaCondition, MetaFilter, MetaValueType};

    let mut registry = TypeRegistry::new();
    MetaQuery.register_types("Post", &mut registry).unwrap();

    let filter = MetaFilter::all(vec![
        MetaCondition::new("color", MetaComparator::EqualTo, "blue")
            .with_type(MetaValueType::Char),
        MetaCondition::with_values("tag", MetaComparator::In, ["x", "y"]),
    ]);
    let mut input_args = IndexMap::new();
    input_args.insert(Name::new("metaQuery"), filter.into_input_value());
    let input_args = MetaQuery.resolve_enum_args(&registry, "Post", input_args);
    let mapped = Value::Object(map_input_fields(IndexMap::new(), &input_args))
        .into_json()
        .unwrap();

    let schema = content_schema();
    let over_the_wire = engine_args(
        &schema,
        r#"{
            posts(where: {
                metaQuery: {
                    relation: AND,
                    metaArray: [
                        { key: "color", compare: EQUAL_TO, type: CHAR, value: "blue" },
                        { key: "tag", compare: IN, values: ["x", "y"] }
                    ]
                }
            })
        }"#,
    )
    .await;

    assert_eq!(mapped, over_the_wire);
}
