//! Mapping of `metaQuery` input arguments onto engine query args.
//!
//! The content-query engine consumes a positional clause tree under the
//! `meta_query` key: an object holding one condition record per decimal
//! index (`"0"`, `"1"`, …) alongside an optional `relation` entry. This
//! module is the pure reshape from the GraphQL input representation into
//! that tree; it performs no validation, a malformed condition is copied
//! through and left to the engine.

use async_graphql::{Name, Value};
use indexmap::IndexMap;

/// Map the `metaQuery` entry of `input_args` into `query_args` as the
/// engine's `meta_query` clause tree.
///
/// Returns `query_args` unchanged when `input_args` carries no `metaQuery`
/// or an empty one. Within each condition, `values` takes precedence over
/// `value` when present and non-empty; fields the client omitted become
/// explicit nulls in the clause record.
///
/// When more than two conditions are present the `relation` entry is
/// dropped entirely, whatever its value. That mirrors the engine's
/// binary-relation assumption and is preserved for compatibility; treat it
/// as a quirk, not a pattern.
pub fn map_input_fields(
    mut query_args: IndexMap<Name, Value>,
    input_args: &IndexMap<Name, Value>,
) -> IndexMap<Name, Value> {
    let Some(Value::Object(meta_query)) = input_args.get("metaQuery") else {
        return query_args;
    };
    if meta_query.is_empty() {
        return query_args;
    }

    let mut clauses = meta_query.clone();
    if let Some(Value::List(conditions)) = meta_query.get("metaArray") {
        if !conditions.is_empty() {
            if conditions.len() > 2 {
                clauses.shift_remove("relation");
            }
            for (idx, condition) in conditions.iter().enumerate() {
                let fields = match condition {
                    Value::Object(fields) => Some(fields),
                    _ => None,
                };
                clauses.insert(Name::new(idx.to_string()), build_clause(fields));
            }
            tracing::debug!(
                conditions = conditions.len(),
                "Mapped metaQuery input to engine clauses"
            );
        }
    }
    clauses.shift_remove("metaArray");

    if !clauses.is_empty() {
        query_args.insert(Name::new("meta_query"), Value::Object(clauses));
    }
    query_args
}

/// Build one positional condition record: `key`, `compare` and `type`
/// copied verbatim, `value` taken from `values` when it is a non-empty
/// list, else from `value`. Absent fields become nulls.
fn build_clause(condition: Option<&IndexMap<Name, Value>>) -> Value {
    let get = |field: &str| {
        condition
            .and_then(|fields| fields.get(field))
            .cloned()
            .unwrap_or(Value::Null)
    };

    let mut clause = IndexMap::new();
    clause.insert(Name::new("key"), get("key"));
    clause.insert(Name::new("compare"), get("compare"));
    clause.insert(Name::new("type"), get("type"));
    let value = match condition.and_then(|fields| fields.get("values")) {
        Some(Value::List(values)) if !values.is_empty() => Value::List(values.clone()),
        _ => get("value"),
    };
    clause.insert(Name::new("value"), value);
    Value::Object(clause)
}
