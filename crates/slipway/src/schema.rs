//! Declarative schema descriptors.

use std::fmt;
use std::future::Future;
use std::pin::Pin;

use slipway_table::TableSpec;

use crate::Result;
use crate::store::Store;

/// Column-build capability: adds schema-specific columns and constraints
/// to the table-definition handle.
pub type BuildColumnsFn = Box<dyn Fn(&mut TableSpec) + Send + Sync>;

/// Post-build capability: runs once per schema after every table in the
/// run exists, with the store handle. Typically used for seeding data.
pub type PostBuildFn = Box<
    dyn for<'a> Fn(&'a dyn Store) -> Pin<Box<dyn Future<Output = Result<()>> + Send + 'a>>
        + Send
        + Sync,
>;

/// Declarative specification of one table: name, dependencies,
/// column-build logic, and optional conventions.
///
/// Descriptors are plain values built at runtime and passed to
/// [`SyncRunner::sync`](crate::SyncRunner::sync); the synchronizer never
/// mutates them.
pub struct SchemaDescriptor {
    /// Table name; must be non-empty and unique within one run.
    pub table_name: String,

    /// Names of tables that must be created before this one.
    ///
    /// A name that does not appear in the synchronized set is treated as
    /// already satisfied: the resolver cannot probe the store, so absent
    /// dependencies are assumed to exist. That allows syncing a partial
    /// schema set, but it also means typos here go unnoticed.
    pub dependencies: Vec<String>,

    /// Add the conventional `created_at`/`updated_at` column pair.
    pub timestamps: bool,

    /// Default expression for `created_at`. When set (and `timestamps`
    /// is on), `created_at` with this default and a plain `updated_at`
    /// are added as two individual columns instead of the convenience
    /// pair.
    pub created_at_default: Option<String>,

    /// Storage engine (rendered on MySQL only).
    pub engine: Option<String>,

    /// Character set (rendered on MySQL only).
    pub charset: Option<String>,

    /// Schema-specific column/constraint builder. `None` is a no-op.
    pub build_columns: Option<BuildColumnsFn>,

    /// Hook run once after all tables in the run exist. `None` is a
    /// no-op.
    pub post_build: Option<PostBuildFn>,
}

impl SchemaDescriptor {
    /// A descriptor for `table_name` with no dependencies, no
    /// conventions, and no capabilities.
    pub fn new(table_name: impl Into<String>) -> Self {
        Self {
            table_name: table_name.into(),
            dependencies: Vec::new(),
            timestamps: false,
            created_at_default: None,
            engine: None,
            charset: None,
            build_columns: None,
            post_build: None,
        }
    }

    /// Declare tables this one must be created after.
    pub fn depends_on<I, S>(mut self, deps: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.dependencies.extend(deps.into_iter().map(Into::into));
        self
    }

    /// Add the conventional `created_at`/`updated_at` timestamp pair.
    pub fn timestamps(mut self) -> Self {
        self.timestamps = true;
        self
    }

    /// Set the default expression for `created_at`.
    pub fn created_at_default(mut self, expr: impl Into<String>) -> Self {
        self.created_at_default = Some(expr.into());
        self
    }

    /// Set the storage engine.
    pub fn engine(mut self, engine: impl Into<String>) -> Self {
        self.engine = Some(engine.into());
        self
    }

    /// Set the character set.
    pub fn charset(mut self, charset: impl Into<String>) -> Self {
        self.charset = Some(charset.into());
        self
    }

    /// Set the column-build capability.
    pub fn columns(mut self, build: impl Fn(&mut TableSpec) + Send + Sync + 'static) -> Self {
        self.build_columns = Some(Box::new(build));
        self
    }

    /// Set the post-build hook.
    ///
    /// Hooks are usually written as free functions so the future can
    /// borrow the store handle:
    ///
    /// ```ignore
    /// fn seed<'a>(store: &'a dyn Store) -> Pin<Box<dyn Future<Output = Result<()>> + Send + 'a>> {
    ///     Box::pin(async move {
    ///         store.has_table("user").await?;
    ///         Ok(())
    ///     })
    /// }
    ///
    /// let schema = SchemaDescriptor::new("user").post_build(seed);
    /// ```
    pub fn post_build<F>(mut self, hook: F) -> Self
    where
        F: for<'a> Fn(&'a dyn Store) -> Pin<Box<dyn Future<Output = Result<()>> + Send + 'a>>
            + Send
            + Sync
            + 'static,
    {
        self.post_build = Some(Box::new(hook));
        self
    }
}

impl fmt::Debug for SchemaDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SchemaDescriptor")
            .field("table_name", &self.table_name)
            .field("dependencies", &self.dependencies)
            .field("timestamps", &self.timestamps)
            .field("created_at_default", &self.created_at_default)
            .field("engine", &self.engine)
            .field("charset", &self.charset)
            .field("build_columns", &self.build_columns.as_ref().map(|_| ".."))
            .field("post_build", &self.post_build.as_ref().map(|_| ".."))
            .finish()
    }
}
