//! Ordered, idempotent synchronization against a store.

use futures::future::try_join_all;
use slipway_table::TableSpec;
use tracing::{Instrument, debug, info};

use crate::Result;
use crate::resolver::resolve;
use crate::schema::SchemaDescriptor;
use crate::store::Store;

/// Runs synchronization against a store.
///
/// # Example
///
/// ```ignore
/// let runner = SyncRunner::new(&store);
/// let created = runner.sync(&schemas).await?;
/// for schema in created {
///     println!("created {}", schema.table_name);
/// }
/// ```
pub struct SyncRunner<'s> {
    store: &'s dyn Store,
}

impl<'s> SyncRunner<'s> {
    /// Create a runner borrowing the store handle.
    pub fn new(store: &'s dyn Store) -> Self {
        Self { store }
    }

    /// Synchronize `schemas` with the store: create every missing table
    /// in dependency order, then run all post-build hooks.
    ///
    /// Tables are processed strictly one at a time. A later schema's
    /// build procedure may reference an earlier table (foreign keys,
    /// most commonly), so creation is never pipelined. Post-build hooks
    /// run concurrently once every table exists.
    ///
    /// Returns the descriptors whose tables were newly created, in
    /// creation order. Tables that already exist are left untouched --
    /// their conventions and build procedures are not re-applied -- and
    /// they are excluded from the result.
    ///
    /// The first store error aborts the run. Tables created earlier in
    /// the run stay in place: creation is not transactional across
    /// tables, so partial progress is visible in the store but not in
    /// the return value.
    ///
    /// An empty `schemas` slice returns immediately without contacting
    /// the store.
    pub async fn sync<'a>(
        &self,
        schemas: &'a [SchemaDescriptor],
    ) -> Result<Vec<&'a SchemaDescriptor>> {
        if schemas.is_empty() {
            return Ok(Vec::new());
        }

        let ordered = resolve(schemas)?;

        let mut created = Vec::new();
        for schema in ordered {
            let span = tracing::debug_span!("table.sync", table = %schema.table_name);
            if self.sync_table(schema).instrument(span).await? {
                created.push(schema);
            }
        }

        // Every table exists from here on, and hooks carry no ordering
        // constraint among themselves.
        try_join_all(
            schemas
                .iter()
                .filter_map(|schema| schema.post_build.as_ref())
                .map(|hook| hook(self.store)),
        )
        .await?;

        Ok(created)
    }

    /// Check-then-create for one table. Returns whether it was created.
    async fn sync_table(&self, schema: &SchemaDescriptor) -> Result<bool> {
        if self.store.has_table(&schema.table_name).await? {
            debug!("table exists, skipping");
            return Ok(false);
        }
        self.store
            .create_table(&schema.table_name, &table_definition(schema))
            .await?;
        info!("table created");
        Ok(true)
    }

    /// Drop every table in the set, dependents first (reverse resolved
    /// order). Tables missing from the store are skipped by the store's
    /// `drop_table`.
    pub async fn drop_tables(&self, schemas: &[SchemaDescriptor]) -> Result<()> {
        if schemas.is_empty() {
            return Ok(());
        }

        let mut ordered = resolve(schemas)?;
        ordered.reverse();

        for schema in ordered {
            let span = tracing::debug_span!("table.drop", table = %schema.table_name);
            self.store
                .drop_table(&schema.table_name)
                .instrument(span)
                .await?;
        }
        Ok(())
    }
}

/// Derive the table-definition build procedure for a schema.
///
/// Conventions apply before the schema's own columns -- engine, then
/// timestamp columns, then charset -- so a build procedure can override
/// them deliberately but never gets clobbered by them.
fn table_definition(schema: &SchemaDescriptor) -> impl Fn(&mut TableSpec) + Send + Sync {
    move |table: &mut TableSpec| {
        if let Some(engine) = &schema.engine {
            table.set_engine(engine.as_str());
        }

        if schema.timestamps {
            match &schema.created_at_default {
                Some(default) => {
                    table.timestamp("created_at").default_to(default.as_str());
                    table.timestamp("updated_at");
                }
                None => table.timestamps(),
            }
        }

        if let Some(charset) = &schema.charset {
            table.set_charset(charset.as_str());
        }

        if let Some(build) = &schema.build_columns {
            build(table);
        }
    }
}
