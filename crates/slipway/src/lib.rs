//! Dependency-ordered, idempotent table synchronization.
//!
//! slipway takes a set of declarative [`SchemaDescriptor`]s and brings a
//! live database in line with them: each table is created if missing
//! (never altered), in an order that respects declared dependencies,
//! and post-build hooks are fanned out once every table exists.
//!
//! # Example
//!
//! ```ignore
//! use slipway::{SchemaDescriptor, SyncRunner};
//!
//! let schemas = vec![
//!     SchemaDescriptor::new("tenant").columns(|t| {
//!         t.increments("id");
//!         t.string("name").not_null();
//!     }),
//!     SchemaDescriptor::new("user")
//!         .depends_on(["tenant"])
//!         .timestamps()
//!         .columns(|t| {
//!             t.increments("id");
//!             t.string("email").not_null().unique();
//!             t.big_integer("tenant_id").not_null();
//!             t.foreign("tenant_id").references("tenant", "id");
//!         }),
//! ];
//!
//! let store = slipway_postgres::connect("postgres://localhost/app").await?;
//! let runner = SyncRunner::new(&store);
//! let created = runner.sync(&schemas).await?;
//! ```
//!
//! # Scope
//!
//! Synchronization is create-if-missing only. An existing table is left
//! completely untouched: no diffing, no column migration, no re-applied
//! conventions. Concurrent `sync` calls against the same store are the
//! caller's responsibility to avoid -- the existence probe and the
//! creation request are not atomic together.

mod error;
mod resolver;
mod schema;
mod store;
mod sync;

pub use error::{BoxError, Error};
pub use resolver::resolve;
pub use schema::{BuildColumnsFn, PostBuildFn, SchemaDescriptor};
pub use store::{BuildProcedure, Store};
pub use sync::SyncRunner;

// Re-export the table-definition handle types so build procedures can be
// written against `slipway` alone.
pub use slipway_table::{ColumnSpec, Dialect, ForeignKeySpec, SqlType, TableSpec};

/// Result type for slipway operations.
pub type Result<T> = std::result::Result<T, Error>;
