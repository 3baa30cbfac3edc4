//! PostgreSQL store backend for slipway.
//!
//! [`PgStore`] wraps a `tokio_postgres::Client` (or a
//! `deadpool_postgres::Object` checked out of a pool) and implements
//! [`Store`] against it. Every statement runs inside a tracing span.
//!
//! # Example
//!
//! ```ignore
//! use slipway::SyncRunner;
//!
//! let store = slipway_postgres::connect("postgres://localhost/app").await?;
//! let created = SyncRunner::new(&store).sync(&schemas).await?;
//! ```

use futures::future::BoxFuture;
use slipway::{BuildProcedure, Error, Result, Store};
use slipway_table::{Dialect, TableSpec, create_table_sql, drop_table_sql};
use tracing::Instrument;

const HAS_TABLE_SQL: &str = "SELECT EXISTS (SELECT 1 FROM information_schema.tables \
     WHERE table_schema = current_schema() AND table_name = $1)";

/// Store backed by a PostgreSQL connection.
///
/// `engine` and `charset` conventions have no PostgreSQL equivalent and
/// are omitted from the rendered DDL.
pub struct PgStore<C> {
    client: C,
}

impl<C> PgStore<C> {
    /// Wrap an existing connection.
    pub fn new(client: C) -> Self {
        Self { client }
    }

    /// Get the inner connection back.
    pub fn into_inner(self) -> C {
        self.client
    }

    /// The inner connection.
    pub fn inner(&self) -> &C {
        &self.client
    }
}

/// Connect to PostgreSQL and spawn the connection driver task.
///
/// Driver errors after the connection is established are logged via
/// `tracing::error!`; callers that need to observe them should manage
/// the connection themselves and use [`PgStore::new`].
pub async fn connect(database_url: &str) -> Result<PgStore<tokio_postgres::Client>> {
    let (client, connection) = tokio_postgres::connect(database_url, tokio_postgres::NoTls)
        .await
        .map_err(Error::store)?;

    tokio::spawn(async move {
        if let Err(e) = connection.await {
            tracing::error!("database connection error: {e}");
        }
    });

    Ok(PgStore::new(client))
}

impl Store for PgStore<tokio_postgres::Client> {
    fn has_table<'a>(&'a self, table: &'a str) -> BoxFuture<'a, Result<bool>> {
        Box::pin(has_table(&self.client, table))
    }

    fn create_table<'a>(
        &'a self,
        table: &'a str,
        build: &'a BuildProcedure<'a>,
    ) -> BoxFuture<'a, Result<()>> {
        Box::pin(create_table(&self.client, table, build))
    }

    fn drop_table<'a>(&'a self, table: &'a str) -> BoxFuture<'a, Result<()>> {
        Box::pin(drop_table(&self.client, table))
    }
}

impl Store for PgStore<deadpool_postgres::Object> {
    fn has_table<'a>(&'a self, table: &'a str) -> BoxFuture<'a, Result<bool>> {
        let client: &tokio_postgres::Client = &self.client;
        Box::pin(has_table(client, table))
    }

    fn create_table<'a>(
        &'a self,
        table: &'a str,
        build: &'a BuildProcedure<'a>,
    ) -> BoxFuture<'a, Result<()>> {
        let client: &tokio_postgres::Client = &self.client;
        Box::pin(create_table(client, table, build))
    }

    fn drop_table<'a>(&'a self, table: &'a str) -> BoxFuture<'a, Result<()>> {
        let client: &tokio_postgres::Client = &self.client;
        Box::pin(drop_table(client, table))
    }
}

async fn has_table(client: &tokio_postgres::Client, table: &str) -> Result<bool> {
    let span = tracing::debug_span!("db.has_table", table = %table);
    async {
        let row = client
            .query_one(HAS_TABLE_SQL, &[&table])
            .await
            .map_err(Error::store)?;
        row.try_get(0).map_err(Error::store)
    }
    .instrument(span)
    .await
}

async fn create_table(
    client: &tokio_postgres::Client,
    table: &str,
    build: &BuildProcedure<'_>,
) -> Result<()> {
    let mut spec = TableSpec::new(table);
    build(&mut spec);
    let sql = create_table_sql(&spec, Dialect::Postgres);

    let span = tracing::debug_span!("db.create_table", table = %table, sql = %sql);
    client
        .batch_execute(&sql)
        .instrument(span)
        .await
        .map_err(Error::store)
}

async fn drop_table(client: &tokio_postgres::Client, table: &str) -> Result<()> {
    let sql = drop_table_sql(table, Dialect::Postgres);
    let span = tracing::debug_span!("db.drop_table", table = %table, sql = %sql);
    client
        .batch_execute(&sql)
        .instrument(span)
        .await
        .map_err(Error::store)
}
