//! DDL rendering.

use crate::{ColumnSpec, SqlType, TableSpec};

/// Target dialect for rendered DDL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Dialect {
    /// PostgreSQL: double-quoted identifiers, SERIAL auto-increment.
    /// Table-level engine/charset options do not exist and are omitted.
    #[default]
    Postgres,
    /// MySQL / MariaDB: backtick identifiers, AUTO_INCREMENT columns,
    /// ENGINE and DEFAULT CHARSET table options.
    MySql,
}

/// Quote an identifier, escaping embedded quote characters.
pub fn quote_ident(ident: &str, dialect: Dialect) -> String {
    match dialect {
        Dialect::Postgres => format!("\"{}\"", ident.replace('"', "\"\"")),
        Dialect::MySql => format!("`{}`", ident.replace('`', "``")),
    }
}

/// Generate a CREATE TABLE statement.
///
/// Single-column primary keys are rendered inline; composite primary
/// keys become a table constraint. Foreign keys are rendered inline as
/// table constraints -- the synchronizer creates tables in dependency
/// order, so referenced tables already exist.
pub fn create_table_sql(table: &TableSpec, dialect: Dialect) -> String {
    let mut sql = format!("CREATE TABLE {} (\n", quote_ident(table.name(), dialect));

    // Collect primary key columns
    let pk_columns: Vec<&str> = table
        .columns()
        .iter()
        .filter(|c| c.primary_key)
        .map(|c| c.name.as_str())
        .collect();

    // If there's more than one PK column, we need a table constraint
    let use_table_pk_constraint = pk_columns.len() > 1;

    let mut parts: Vec<String> = table
        .columns()
        .iter()
        .map(|col| {
            let mut def = format!(
                "    {} {}",
                quote_ident(&col.name, dialect),
                column_type_sql(col, dialect)
            );

            // Only add inline PRIMARY KEY for single-column PKs
            if col.primary_key && !use_table_pk_constraint {
                def.push_str(" PRIMARY KEY");
            }

            // NOT NULL: PK columns are implicitly NOT NULL, but for composite PKs
            // we need to add it explicitly since we're not using inline PRIMARY KEY
            if !col.nullable && (!col.primary_key || use_table_pk_constraint) {
                def.push_str(" NOT NULL");
            }

            if col.unique && !col.primary_key {
                def.push_str(" UNIQUE");
            }

            if let Some(default) = &col.default {
                def.push_str(&format!(" DEFAULT {}", default));
            }

            def
        })
        .collect();

    // Add composite primary key constraint if needed
    if use_table_pk_constraint {
        let quoted_pk_cols: Vec<_> = pk_columns
            .iter()
            .map(|c| quote_ident(c, dialect))
            .collect();
        parts.push(format!("    PRIMARY KEY ({})", quoted_pk_cols.join(", ")));
    }

    // Add foreign key constraints
    for fk in table.foreign_keys() {
        let constraint_name = format!("fk_{}_{}", table.name(), fk.columns.join("_"));
        let quoted_cols: Vec<_> = fk.columns.iter().map(|c| quote_ident(c, dialect)).collect();
        let quoted_ref_cols: Vec<_> = fk
            .references_columns
            .iter()
            .map(|c| quote_ident(c, dialect))
            .collect();
        parts.push(format!(
            "    CONSTRAINT {} FOREIGN KEY ({}) REFERENCES {} ({})",
            quote_ident(&constraint_name, dialect),
            quoted_cols.join(", "),
            quote_ident(&fk.references_table, dialect),
            quoted_ref_cols.join(", ")
        ));
    }

    sql.push_str(&parts.join(",\n"));
    sql.push_str("\n)");

    if dialect == Dialect::MySql {
        if let Some(engine) = table.engine() {
            sql.push_str(&format!(" ENGINE={}", engine));
        }
        if let Some(charset) = table.charset() {
            sql.push_str(&format!(" DEFAULT CHARSET={}", charset));
        }
    }

    sql.push(';');
    sql
}

/// Generate a DROP TABLE IF EXISTS statement.
pub fn drop_table_sql(name: &str, dialect: Dialect) -> String {
    format!("DROP TABLE IF EXISTS {};", quote_ident(name, dialect))
}

/// The type portion of a column definition. Auto-increment columns
/// render as SERIAL/BIGSERIAL on Postgres and as AUTO_INCREMENT on
/// MySQL.
fn column_type_sql(col: &ColumnSpec, dialect: Dialect) -> String {
    if !col.auto_increment {
        return col.sql_type.to_sql(dialect);
    }
    match dialect {
        Dialect::Postgres => match col.sql_type {
            SqlType::BigInt => "BIGSERIAL".to_string(),
            _ => "SERIAL".to_string(),
        },
        Dialect::MySql => format!("{} AUTO_INCREMENT", col.sql_type.to_sql(dialect)),
    }
}
