//! Table definition types for slipway.
//!
//! A [`TableSpec`] is the mutable table-definition handle that schema
//! build procedures receive. It collects columns, foreign keys, and
//! table options, and renders to a `CREATE TABLE` statement for a given
//! [`Dialect`].
//!
//! ## Example
//!
//! ```
//! use slipway_table::{Dialect, TableSpec, create_table_sql};
//!
//! let mut table = TableSpec::new("user");
//! table.increments("id");
//! table.string("email").not_null().unique();
//! table.timestamps();
//!
//! let sql = create_table_sql(&table, Dialect::Postgres);
//! assert!(sql.starts_with("CREATE TABLE \"user\""));
//! ```

mod render;
pub use render::{Dialect, create_table_sql, drop_table_sql, quote_ident};

/// SQL column types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SqlType {
    /// SMALLINT (2 bytes)
    SmallInt,
    /// INTEGER (4 bytes)
    Integer,
    /// BIGINT (8 bytes)
    BigInt,
    /// Double-precision floating point
    Double,
    /// NUMERIC (arbitrary precision)
    Numeric,
    /// BOOLEAN
    Boolean,
    /// VARCHAR with a length limit
    Varchar(u32),
    /// TEXT
    Text,
    /// Binary blob
    Binary,
    /// Timestamp (with time zone where the dialect supports it)
    Timestamp,
    /// DATE
    Date,
}

impl SqlType {
    /// Render this type for the given dialect.
    pub fn to_sql(&self, dialect: Dialect) -> String {
        match (self, dialect) {
            (SqlType::SmallInt, _) => "SMALLINT".to_string(),
            (SqlType::Integer, _) => "INTEGER".to_string(),
            (SqlType::BigInt, _) => "BIGINT".to_string(),
            (SqlType::Double, Dialect::Postgres) => "DOUBLE PRECISION".to_string(),
            (SqlType::Double, Dialect::MySql) => "DOUBLE".to_string(),
            (SqlType::Numeric, _) => "NUMERIC".to_string(),
            (SqlType::Boolean, _) => "BOOLEAN".to_string(),
            (SqlType::Varchar(len), _) => format!("VARCHAR({len})"),
            (SqlType::Text, _) => "TEXT".to_string(),
            (SqlType::Binary, Dialect::Postgres) => "BYTEA".to_string(),
            (SqlType::Binary, Dialect::MySql) => "BLOB".to_string(),
            (SqlType::Timestamp, Dialect::Postgres) => "TIMESTAMPTZ".to_string(),
            (SqlType::Timestamp, Dialect::MySql) => "TIMESTAMP".to_string(),
            (SqlType::Date, _) => "DATE".to_string(),
        }
    }
}

/// A column being defined on a [`TableSpec`].
///
/// Columns are nullable by default; use the chainable mutators to
/// tighten the definition.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnSpec {
    /// Column name
    pub name: String,
    /// Column type
    pub sql_type: SqlType,
    /// Whether the column allows NULL
    pub nullable: bool,
    /// Default value expression (if any)
    pub default: Option<String>,
    /// Whether this is (part of) the primary key
    pub primary_key: bool,
    /// Whether this has a unique constraint
    pub unique: bool,
    /// Whether this column auto-increments
    pub auto_increment: bool,
}

impl ColumnSpec {
    fn new(name: impl Into<String>, sql_type: SqlType) -> Self {
        Self {
            name: name.into(),
            sql_type,
            nullable: true,
            default: None,
            primary_key: false,
            unique: false,
            auto_increment: false,
        }
    }

    /// Mark this column NOT NULL.
    pub fn not_null(&mut self) -> &mut Self {
        self.nullable = false;
        self
    }

    /// Mark this column as (part of) the primary key. Implies NOT NULL.
    pub fn primary(&mut self) -> &mut Self {
        self.primary_key = true;
        self.nullable = false;
        self
    }

    /// Add a UNIQUE constraint to this column.
    pub fn unique(&mut self) -> &mut Self {
        self.unique = true;
        self
    }

    /// Set the column's default value expression.
    ///
    /// The expression is rendered verbatim, so quote string literals
    /// yourself: `col.default_to("'pending'")`.
    pub fn default_to(&mut self, expr: impl Into<String>) -> &mut Self {
        self.default = Some(expr.into());
        self
    }
}

/// A foreign key constraint on a [`TableSpec`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForeignKeySpec {
    /// Column(s) in this table
    pub columns: Vec<String>,
    /// Referenced table
    pub references_table: String,
    /// Referenced column(s)
    pub references_columns: Vec<String>,
}

impl ForeignKeySpec {
    /// Point this foreign key at `table.column`.
    pub fn references(
        &mut self,
        table: impl Into<String>,
        column: impl Into<String>,
    ) -> &mut Self {
        self.references_table = table.into();
        self.references_columns = vec![column.into()];
        self
    }
}

/// The mutable table-definition handle.
///
/// Build procedures receive one of these, add columns and options to it,
/// and the store renders and executes the resulting definition.
#[derive(Debug, Clone, PartialEq)]
pub struct TableSpec {
    name: String,
    columns: Vec<ColumnSpec>,
    foreign_keys: Vec<ForeignKeySpec>,
    engine: Option<String>,
    charset: Option<String>,
}

impl TableSpec {
    /// Create an empty definition for `name`.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            columns: Vec::new(),
            foreign_keys: Vec::new(),
            engine: None,
            charset: None,
        }
    }

    /// Table name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Columns in definition order.
    pub fn columns(&self) -> &[ColumnSpec] {
        &self.columns
    }

    /// Look up a column by name.
    pub fn column_named(&self, name: &str) -> Option<&ColumnSpec> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Foreign key constraints.
    pub fn foreign_keys(&self) -> &[ForeignKeySpec] {
        &self.foreign_keys
    }

    /// Storage engine, if set.
    pub fn engine(&self) -> Option<&str> {
        self.engine.as_deref()
    }

    /// Character set, if set.
    pub fn charset(&self) -> Option<&str> {
        self.charset.as_deref()
    }

    /// Set the storage engine (rendered on MySQL only).
    pub fn set_engine(&mut self, engine: impl Into<String>) {
        self.engine = Some(engine.into());
    }

    /// Set the character set (rendered on MySQL only).
    pub fn set_charset(&mut self, charset: impl Into<String>) {
        self.charset = Some(charset.into());
    }

    /// Add a column of the given type.
    pub fn column(&mut self, name: impl Into<String>, sql_type: SqlType) -> &mut ColumnSpec {
        let idx = self.columns.len();
        self.columns.push(ColumnSpec::new(name, sql_type));
        &mut self.columns[idx]
    }

    /// Add an auto-incrementing INTEGER primary key.
    pub fn increments(&mut self, name: impl Into<String>) -> &mut ColumnSpec {
        let col = self.column(name, SqlType::Integer);
        col.primary_key = true;
        col.nullable = false;
        col.auto_increment = true;
        col
    }

    /// Add an auto-incrementing BIGINT primary key.
    pub fn big_increments(&mut self, name: impl Into<String>) -> &mut ColumnSpec {
        let col = self.column(name, SqlType::BigInt);
        col.primary_key = true;
        col.nullable = false;
        col.auto_increment = true;
        col
    }

    /// Add a VARCHAR(255) column.
    pub fn string(&mut self, name: impl Into<String>) -> &mut ColumnSpec {
        self.column(name, SqlType::Varchar(255))
    }

    /// Add a TEXT column.
    pub fn text(&mut self, name: impl Into<String>) -> &mut ColumnSpec {
        self.column(name, SqlType::Text)
    }

    /// Add an INTEGER column.
    pub fn integer(&mut self, name: impl Into<String>) -> &mut ColumnSpec {
        self.column(name, SqlType::Integer)
    }

    /// Add a BIGINT column.
    pub fn big_integer(&mut self, name: impl Into<String>) -> &mut ColumnSpec {
        self.column(name, SqlType::BigInt)
    }

    /// Add a BOOLEAN column.
    pub fn boolean(&mut self, name: impl Into<String>) -> &mut ColumnSpec {
        self.column(name, SqlType::Boolean)
    }

    /// Add a double-precision float column.
    pub fn double(&mut self, name: impl Into<String>) -> &mut ColumnSpec {
        self.column(name, SqlType::Double)
    }

    /// Add a NUMERIC column.
    pub fn decimal(&mut self, name: impl Into<String>) -> &mut ColumnSpec {
        self.column(name, SqlType::Numeric)
    }

    /// Add a binary column.
    pub fn binary(&mut self, name: impl Into<String>) -> &mut ColumnSpec {
        self.column(name, SqlType::Binary)
    }

    /// Add a timestamp column.
    pub fn timestamp(&mut self, name: impl Into<String>) -> &mut ColumnSpec {
        self.column(name, SqlType::Timestamp)
    }

    /// Add a DATE column.
    pub fn date(&mut self, name: impl Into<String>) -> &mut ColumnSpec {
        self.column(name, SqlType::Date)
    }

    /// Add the conventional `created_at`/`updated_at` timestamp pair.
    pub fn timestamps(&mut self) {
        self.column("created_at", SqlType::Timestamp);
        self.column("updated_at", SqlType::Timestamp);
    }

    /// Start a foreign key on `column`; chain
    /// [`references`](ForeignKeySpec::references) to point it somewhere.
    pub fn foreign(&mut self, column: impl Into<String>) -> &mut ForeignKeySpec {
        let idx = self.foreign_keys.len();
        self.foreign_keys.push(ForeignKeySpec {
            columns: vec![column.into()],
            references_table: String::new(),
            references_columns: Vec::new(),
        });
        &mut self.foreign_keys[idx]
    }
}

#[cfg(test)]
mod tests;
