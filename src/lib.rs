//! # queryset
//!
//! A declarative path-based query builder that compiles to multi-dialect SQL.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │            SchemaGraph (declared entity graph)           │
//! │      (tables, columns, primary keys, relationships)      │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ [path resolution]
//! ┌─────────────────────────────────────────────────────────┐
//! │     Selections / Chains / Joins (schema-checked paths)   │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ [builder]
//! ┌─────────────────────────────────────────────────────────┐
//! │          QuerySet (immutable query description)          │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ [rendering, per dialect]
//! ┌─────────────────────────────────────────────────────────┐
//! │                 SQL text (SELECT/UPDATE/DELETE)          │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! Paths like `zone::parent_zone::name__istartswith` traverse declared
//! relationships and name a lookup operator. Everything resolvable against
//! the schema fails when the clause is built; everything that depends on
//! the output engine fails when the queryset is rendered.

pub mod aggregation;
pub mod chain;
pub mod condition;
pub mod error;
pub mod field;
pub mod join;
pub mod limit;
pub mod operation;
pub mod order;
pub mod path;
pub mod projection;
pub mod queryset;
pub mod schema;
pub mod select_related;
pub mod set_ops;
pub mod sql;
pub mod update;
pub mod value;

pub use condition::Filter;
pub use error::{QueryError, QueryResult};
pub use order::Direction;
pub use projection::{col, Row};
pub use queryset::{expect_single, QuerySet};
pub use schema::{Entity, SchemaGraph};
pub use set_ops::SetOperation;
pub use sql::{Dialect, Escaper, QuoteEscaper, RenderContext};
pub use update::Assignment;
pub use value::Value;
