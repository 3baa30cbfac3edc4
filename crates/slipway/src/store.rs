//! The external store boundary.
//!
//! The synchronizer never talks SQL itself -- everything it needs from a
//! live database goes through [`Store`]. Backends implement it for their
//! connection type (`slipway-postgres` for tokio-postgres,
//! `slipway-mysql` for mysql_async); tests implement it with an
//! in-memory recorder.

use futures::future::BoxFuture;
use slipway_table::TableSpec;

use crate::Result;

/// A table-definition build procedure. The store invokes it with the
/// mutable table handle before issuing the creation request.
pub type BuildProcedure<'b> = dyn Fn(&mut TableSpec) + Send + Sync + 'b;

/// The store collaborator.
///
/// Object-safe so that post-build hooks can receive `&dyn Store`. The
/// handle is externally owned: implementations only issue requests
/// against the underlying connection, they never close or reconfigure
/// it.
pub trait Store: Send + Sync {
    /// Whether a table with this name already exists.
    fn has_table<'a>(&'a self, table: &'a str) -> BoxFuture<'a, Result<bool>>;

    /// Create a table. `build` is invoked with the table-definition
    /// handle to populate columns, constraints, and options; the store
    /// then renders and executes the definition.
    fn create_table<'a>(
        &'a self,
        table: &'a str,
        build: &'a BuildProcedure<'a>,
    ) -> BoxFuture<'a, Result<()>>;

    /// Drop a table if it exists. A missing table is not an error.
    fn drop_table<'a>(&'a self, table: &'a str) -> BoxFuture<'a, Result<()>>;
}
