use super::*;

#[test]
fn test_columns_keep_definition_order() {
    let mut table = TableSpec::new("post");
    table.increments("id");
    table.string("title");
    table.text("body");

    let names: Vec<_> = table.columns().iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["id", "title", "body"]);
}

#[test]
fn test_columns_nullable_by_default() {
    let mut table = TableSpec::new("post");
    table.string("title");
    assert!(table.columns()[0].nullable);

    table.string("slug").not_null();
    assert!(!table.columns()[1].nullable);
}

#[test]
fn test_increments_is_auto_increment_primary_key() {
    let mut table = TableSpec::new("post");
    table.increments("id");

    let id = &table.columns()[0];
    assert_eq!(id.sql_type, SqlType::Integer);
    assert!(id.primary_key);
    assert!(id.auto_increment);
    assert!(!id.nullable);
}

#[test]
fn test_timestamps_pair() {
    let mut table = TableSpec::new("post");
    table.timestamps();

    let created = table.column_named("created_at").unwrap();
    let updated = table.column_named("updated_at").unwrap();
    assert_eq!(created.sql_type, SqlType::Timestamp);
    assert_eq!(updated.sql_type, SqlType::Timestamp);
    assert!(created.nullable);
    assert!(created.default.is_none());
}

#[test]
fn test_string_is_varchar_255() {
    let mut table = TableSpec::new("post");
    table.string("title");
    assert_eq!(table.columns()[0].sql_type, SqlType::Varchar(255));
}

#[test]
fn test_foreign_references() {
    let mut table = TableSpec::new("post");
    table.foreign("author_id").references("user", "id");

    let fk = &table.foreign_keys()[0];
    assert_eq!(fk.columns, vec!["author_id"]);
    assert_eq!(fk.references_table, "user");
    assert_eq!(fk.references_columns, vec!["id"]);
}

#[test]
fn test_default_to() {
    let mut table = TableSpec::new("post");
    table.timestamp("created_at").default_to("now()");
    assert_eq!(
        table.columns()[0].default.as_deref(),
        Some("now()")
    );
}
