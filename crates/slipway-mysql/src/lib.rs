//! MySQL store backend for slipway.
//!
//! [`MySqlStore`] wraps a `mysql_async::Pool` and implements [`Store`]
//! against it, checking a connection out of the pool per request. This
//! is the dialect where the `engine`/`charset` schema conventions render
//! as table options.

use futures::future::BoxFuture;
use mysql_async::prelude::Queryable;
use slipway::{BuildProcedure, Error, Result, Store};
use slipway_table::{Dialect, TableSpec, create_table_sql, drop_table_sql};
use tracing::Instrument;

const HAS_TABLE_SQL: &str = "SELECT COUNT(*) FROM information_schema.TABLES \
     WHERE TABLE_SCHEMA = DATABASE() AND TABLE_NAME = ?";

/// Store backed by a MySQL connection pool.
pub struct MySqlStore {
    pool: mysql_async::Pool,
}

impl MySqlStore {
    /// Wrap an existing pool.
    pub fn new(pool: mysql_async::Pool) -> Self {
        Self { pool }
    }

    /// Create a store from a MySQL URL.
    pub fn from_url(url: &str) -> Result<Self> {
        let opts = mysql_async::Opts::from_url(url).map_err(Error::store)?;
        Ok(Self::new(mysql_async::Pool::new(opts)))
    }

    /// The inner pool.
    pub fn pool(&self) -> &mysql_async::Pool {
        &self.pool
    }
}

impl Store for MySqlStore {
    fn has_table<'a>(&'a self, table: &'a str) -> BoxFuture<'a, Result<bool>> {
        let span = tracing::debug_span!("db.has_table", table = %table);
        Box::pin(
            async move {
                let mut conn = self.pool.get_conn().await.map_err(Error::store)?;
                let count: Option<i64> = conn
                    .exec_first(HAS_TABLE_SQL, (table,))
                    .await
                    .map_err(Error::store)?;
                Ok(count.unwrap_or(0) > 0)
            }
            .instrument(span),
        )
    }

    fn create_table<'a>(
        &'a self,
        table: &'a str,
        build: &'a BuildProcedure<'a>,
    ) -> BoxFuture<'a, Result<()>> {
        let mut spec = TableSpec::new(table);
        build(&mut spec);
        let sql = create_table_sql(&spec, Dialect::MySql);

        let span = tracing::debug_span!("db.create_table", table = %table, sql = %sql);
        Box::pin(
            async move {
                let mut conn = self.pool.get_conn().await.map_err(Error::store)?;
                conn.query_drop(&sql).await.map_err(Error::store)
            }
            .instrument(span),
        )
    }

    fn drop_table<'a>(&'a self, table: &'a str) -> BoxFuture<'a, Result<()>> {
        let sql = drop_table_sql(table, Dialect::MySql);
        let span = tracing::debug_span!("db.drop_table", table = %table, sql = %sql);
        Box::pin(
            async move {
                let mut conn = self.pool.get_conn().await.map_err(Error::store)?;
                conn.query_drop(&sql).await.map_err(Error::store)
            }
            .instrument(span),
        )
    }
}
