//! # graphql-meta-query
//!
//! Meta-field filtering for dynamically-built GraphQL content APIs.
//!
//! A CMS attaches custom key/value ("meta") fields to its content items;
//! this crate lets GraphQL clients filter on them. It plugs into a host's
//! schema build in two places:
//!
//! - **Schema hook** — [`MetaQuery::add_input_fields`] contributes a
//!   `metaQuery` argument to every content-backed type, registering the
//!   per-type enum and input shapes in an explicit [`TypeRegistry`] that
//!   the host later drains into its `dynamic::SchemaBuilder`.
//! - **Resolver hook** — [`map_input_fields`] reshapes the parsed
//!   `metaQuery` argument into the positional `meta_query` clause tree the
//!   content-query engine consumes (after
//!   [`MetaQuery::resolve_enum_args`] has substituted enum names with their
//!   registered engine keywords).
//!
//! The engine itself is external; this crate only produces its argument
//! structure and never executes a query.
//!
//! ## Usage
//!
//! ```rust
//! use graphql_meta_query::{InputFields, MetaQuery, RegistryError, TypeConfig, TypeRegistry};
//!
//! # fn main() -> Result<(), RegistryError> {
//! let mut registry = TypeRegistry::new();
//! let fields = MetaQuery.add_input_fields(
//!     InputFields::new(),
//!     "Post",
//!     &TypeConfig::content(),
//!     &mut registry,
//! )?;
//! assert!(fields.contains_key("metaQuery"));
//! assert!(registry.contains("PostMetaQuery"));
//! # Ok(())
//! # }
//! ```

pub mod filters;
pub mod mapper;
pub mod meta_query;
pub mod registry;

pub use filters::{MetaComparator, MetaCondition, MetaFilter, MetaValueType, Relation};
pub use mapper::map_input_fields;
pub use meta_query::{MetaQuery, RELATION_ENUM};
pub use registry::{
    EnumValueDef, InputFieldDef, InputFields, QueryClass, RegistryError, TypeConfig, TypeRegistry,
};
