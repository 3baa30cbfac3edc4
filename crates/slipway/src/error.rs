use thiserror::Error;

/// Boxed store-level error.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, Error)]
pub enum Error {
    /// The declared dependencies contain a cycle; `table` lies on it.
    #[error("cyclic dependency involving table '{table}'")]
    CyclicDependency { table: String },

    /// Two descriptors in the same run share a table name.
    #[error("duplicate schema for table '{table}'")]
    DuplicateSchema { table: String },

    /// A descriptor has an empty table name.
    #[error("schema descriptor with empty table name")]
    EmptyTableName,

    /// The store failed during an existence check, a creation request,
    /// or a drop request. Surfaced unchanged at the first occurrence;
    /// the run stops and nothing is retried or rolled back.
    #[error("store error: {0}")]
    Store(#[source] BoxError),
}

impl Error {
    /// Wrap a store-level error.
    pub fn store(err: impl Into<BoxError>) -> Self {
        Error::Store(err.into())
    }
}
