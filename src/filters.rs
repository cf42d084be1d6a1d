//! Typed meta-filter model shared by the registry, the plugin, and the mapper.
//!
//! The GraphQL-facing shape is registered per content type (see
//! [`MetaQuery`](crate::MetaQuery)); these types are the crate-side model of
//! that shape:
//! - [`MetaCondition`] — one clause over a single meta field
//! - [`MetaFilter`] — a relation plus an ordered list of conditions
//! - [`MetaComparator`] / [`MetaValueType`] / [`Relation`] — the enum
//!   vocabulary, each GraphQL name paired with the keyword the content-query
//!   engine expects

use std::fmt;

use async_graphql::{Name, Value};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

// ============================================================================
// Enum Vocabulary
// ============================================================================

/// Logical combinator joining sibling meta conditions.
#[derive(Serialize, Deserialize, Copy, Clone, Debug, Default, Eq, PartialEq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Relation {
    #[default]
    And,
    Or,
}

impl Relation {
    /// Both relations, in registration order.
    pub const ALL: [Relation; 2] = [Relation::And, Relation::Or];

    /// GraphQL enum name; identical to the keyword the engine expects.
    pub fn as_str(&self) -> &'static str {
        match self {
            Relation::And => "AND",
            Relation::Or => "OR",
        }
    }

    /// Parse from the GraphQL enum name.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "AND" => Some(Relation::And),
            "OR" => Some(Relation::Or),
            _ => None,
        }
    }
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Value-type hint applied by the engine when comparing a meta value.
///
/// Names double as the engine-side cast keyword, so the GraphQL enum value
/// and the clause entry are the same string (NUMERIC, BINARY, CHAR, DATE,
/// DATETIME, DECIMAL, SIGNED, TIME, UNSIGNED).
#[derive(Serialize, Deserialize, Copy, Clone, Debug, Eq, PartialEq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MetaValueType {
    Numeric,
    Binary,
    Char,
    Date,
    Datetime,
    Decimal,
    Signed,
    Time,
    Unsigned,
}

impl MetaValueType {
    /// Every value type, in registration order.
    pub const ALL: [MetaValueType; 9] = [
        MetaValueType::Numeric,
        MetaValueType::Binary,
        MetaValueType::Char,
        MetaValueType::Date,
        MetaValueType::Datetime,
        MetaValueType::Decimal,
        MetaValueType::Signed,
        MetaValueType::Time,
        MetaValueType::Unsigned,
    ];

    /// GraphQL enum name and engine cast keyword.
    pub fn as_str(&self) -> &'static str {
        match self {
            MetaValueType::Numeric => "NUMERIC",
            MetaValueType::Binary => "BINARY",
            MetaValueType::Char => "CHAR",
            MetaValueType::Date => "DATE",
            MetaValueType::Datetime => "DATETIME",
            MetaValueType::Decimal => "DECIMAL",
            MetaValueType::Signed => "SIGNED",
            MetaValueType::Time => "TIME",
            MetaValueType::Unsigned => "UNSIGNED",
        }
    }

    /// Parse from the GraphQL enum name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|ty| ty.as_str() == name)
    }
}

impl fmt::Display for MetaValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Comparison operator for a meta condition.
///
/// Each GraphQL enum name maps to the literal operator keyword the
/// content-query engine consumes; see [`MetaComparator::to_sql`].
#[derive(Serialize, Deserialize, Copy, Clone, Debug, Eq, PartialEq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MetaComparator {
    EqualTo,
    NotEqualTo,
    GreaterThan,
    GreaterThanOrEqualTo,
    LessThan,
    LessThanOrEqualTo,
    Like,
    NotLike,
    In,
    NotIn,
    Between,
    NotBetween,
    Exists,
    NotExists,
}

impl MetaComparator {
    /// Every comparator, in registration order.
    pub const ALL: [MetaComparator; 14] = [
        MetaComparator::EqualTo,
        MetaComparator::NotEqualTo,
        MetaComparator::GreaterThan,
        MetaComparator::GreaterThanOrEqualTo,
        MetaComparator::LessThan,
        MetaComparator::LessThanOrEqualTo,
        MetaComparator::Like,
        MetaComparator::NotLike,
        MetaComparator::In,
        MetaComparator::NotIn,
        MetaComparator::Between,
        MetaComparator::NotBetween,
        MetaComparator::Exists,
        MetaComparator::NotExists,
    ];

    /// GraphQL-facing enum name.
    pub fn graphql_name(&self) -> &'static str {
        match self {
            MetaComparator::EqualTo => "EQUAL_TO",
            MetaComparator::NotEqualTo => "NOT_EQUAL_TO",
            MetaComparator::GreaterThan => "GREATER_THAN",
            MetaComparator::GreaterThanOrEqualTo => "GREATER_THAN_OR_EQUAL_TO",
            MetaComparator::LessThan => "LESS_THAN",
            MetaComparator::LessThanOrEqualTo => "LESS_THAN_OR_EQUAL_TO",
            MetaComparator::Like => "LIKE",
            MetaComparator::NotLike => "NOT_LIKE",
            MetaComparator::In => "IN",
            MetaComparator::NotIn => "NOT_IN",
            MetaComparator::Between => "BETWEEN",
            MetaComparator::NotBetween => "NOT_BETWEEN",
            MetaComparator::Exists => "EXISTS",
            MetaComparator::NotExists => "NOT_EXISTS",
        }
    }

    /// Operator keyword the engine expects in a meta-query clause.
    pub fn to_sql(&self) -> &'static str {
        match self {
            MetaComparator::EqualTo => "=",
            MetaComparator::NotEqualTo => "!=",
            MetaComparator::GreaterThan => ">",
            MetaComparator::GreaterThanOrEqualTo => ">=",
            MetaComparator::LessThan => "<",
            MetaComparator::LessThanOrEqualTo => "<=",
            MetaComparator::Like => "LIKE",
            MetaComparator::NotLike => "NOT LIKE",
            MetaComparator::In => "IN",
            MetaComparator::NotIn => "NOT IN",
            MetaComparator::Between => "BETWEEN",
            MetaComparator::NotBetween => "NOT BETWEEN",
            MetaComparator::Exists => "EXISTS",
            MetaComparator::NotExists => "NOT EXISTS",
        }
    }

    /// Parse from the GraphQL enum name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|cmp| cmp.graphql_name() == name)
    }

    /// Whether the operator compares against a list of values (`values`
    /// rather than `value`).
    pub fn takes_list(&self) -> bool {
        matches!(
            self,
            MetaComparator::In
                | MetaComparator::NotIn
                | MetaComparator::Between
                | MetaComparator::NotBetween
        )
    }
}

impl fmt::Display for MetaComparator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.graphql_name())
    }
}

// ============================================================================
// Filter Records
// ============================================================================

/// One filter clause over a single meta field.
///
/// Exactly one of `value`/`values` is expected to be populated; `values`
/// takes precedence when both are present (the multi-value operators IN,
/// NOT IN, BETWEEN and NOT BETWEEN read it).
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct MetaCondition {
    /// Meta field key to compare.
    pub key: Option<String>,
    /// Single comparison value.
    pub value: Option<String>,
    /// Multi-value comparison values.
    pub values: Option<Vec<String>>,
    /// Comparison operator; the engine falls back to equality when absent.
    pub compare: Option<MetaComparator>,
    /// Value-type hint; absent means the engine applies no coercion.
    #[serde(rename = "type")]
    pub value_type: Option<MetaValueType>,
}

impl MetaCondition {
    /// Single-value condition (`key <compare> value`).
    pub fn new(key: impl Into<String>, compare: MetaComparator, value: impl Into<String>) -> Self {
        Self {
            key: Some(key.into()),
            value: Some(value.into()),
            compare: Some(compare),
            ..Default::default()
        }
    }

    /// Multi-value condition, for the operators that read `values`.
    pub fn with_values<I, S>(key: impl Into<String>, compare: MetaComparator, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            key: Some(key.into()),
            values: Some(values.into_iter().map(Into::into).collect()),
            compare: Some(compare),
            ..Default::default()
        }
    }

    /// Condition testing that the meta key exists, no value compared.
    pub fn exists(key: impl Into<String>) -> Self {
        Self {
            key: Some(key.into()),
            compare: Some(MetaComparator::Exists),
            ..Default::default()
        }
    }

    /// Condition testing that the meta key does not exist.
    pub fn not_exists(key: impl Into<String>) -> Self {
        Self {
            key: Some(key.into()),
            compare: Some(MetaComparator::NotExists),
            ..Default::default()
        }
    }

    /// Attach a value-type hint for the comparison.
    pub fn with_type(mut self, value_type: MetaValueType) -> Self {
        self.value_type = Some(value_type);
        self
    }

    /// GraphQL input-argument representation of the condition.
    ///
    /// Only populated fields appear, mirroring a parsed input object in which
    /// the client omitted the rest.
    pub fn to_input_value(&self) -> Value {
        let mut fields = IndexMap::new();
        if let Some(key) = &self.key {
            fields.insert(Name::new("key"), Value::String(key.clone()));
        }
        if let Some(value) = &self.value {
            fields.insert(Name::new("value"), Value::String(value.clone()));
        }
        if let Some(values) = &self.values {
            fields.insert(
                Name::new("values"),
                Value::List(values.iter().cloned().map(Value::String).collect()),
            );
        }
        if let Some(compare) = &self.compare {
            fields.insert(
                Name::new("compare"),
                Value::Enum(Name::new(compare.graphql_name())),
            );
        }
        if let Some(value_type) = &self.value_type {
            fields.insert(
                Name::new("type"),
                Value::Enum(Name::new(value_type.as_str())),
            );
        }
        Value::Object(fields)
    }
}

/// A meta filter: a relation plus an ordered list of conditions.
///
/// The wire shape per content type `T` is the `{T}MetaQuery` input with
/// fields `relation` and `metaArray`.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct MetaFilter {
    /// How sibling conditions combine; only meaningful with two or more
    /// conditions, and dropped by the mapper beyond two (see
    /// [`map_input_fields`](crate::map_input_fields)).
    pub relation: Option<Relation>,
    /// Ordered conditions (wire field `metaArray`).
    #[serde(rename = "metaArray")]
    pub conditions: Vec<MetaCondition>,
}

impl MetaFilter {
    /// Combine conditions with AND.
    pub fn all(conditions: Vec<MetaCondition>) -> Self {
        Self {
            relation: Some(Relation::And),
            conditions,
        }
    }

    /// Combine conditions with OR.
    pub fn any(conditions: Vec<MetaCondition>) -> Self {
        Self {
            relation: Some(Relation::Or),
            conditions,
        }
    }

    /// True when the filter would not constrain a query.
    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }

    /// GraphQL input-argument representation of the whole filter, as a
    /// host resolver receives it under the `metaQuery` argument.
    pub fn into_input_value(self) -> Value {
        let mut fields = IndexMap::new();
        if let Some(relation) = self.relation {
            fields.insert(
                Name::new("relation"),
                Value::Enum(Name::new(relation.as_str())),
            );
        }
        if !self.conditions.is_empty() {
            fields.insert(
                Name::new("metaArray"),
                Value::List(
                    self.conditions
                        .iter()
                        .map(MetaCondition::to_input_value)
                        .collect(),
                ),
            );
        }
        Value::Object(fields)
    }
}
