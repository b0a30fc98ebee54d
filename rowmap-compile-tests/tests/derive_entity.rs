use std::collections::HashMap;

use rowmap::prelude::*;
use rowmap::{describe, DataError, SqlValue, StatementKind};
use rowmap_test::RecordingExecutor;

#[derive(Entity)]
#[entity(embeddable)]
struct Audit {
    #[column(name = "created_by")]
    author: String,
    #[column]
    revision: i32,
}

#[derive(Entity)]
#[entity(table = "customers")]
struct Customer {
    #[id(name = "customer_id")]
    id: i64,
    #[column(name = "full_name", nullable = false, length = 120)]
    name: String,
    #[column(nullable)]
    email: Option<String>,
    scratch: String,
    #[embedded]
    audit: Audit,
}

#[derive(Entity)]
#[entity(name = "tags")]
struct Tag {
    #[id]
    #[column(name = "tag_key", length = 32)]
    key: String,
}

#[derive(Entity)]
struct Widget {
    #[id]
    id: u32,
    #[column]
    label: String,
}

struct Cursor {
    offset: usize,
}

#[derive(Entity)]
#[entity(table = "sessions")]
struct Session {
    #[id]
    id: i64,
    #[column]
    user: String,
    tags: Vec<String>,
    counters: HashMap<String, u64>,
    cursor: Cursor,
}

#[derive(Entity)]
struct Headless {
    #[column]
    label: String,
}

fn customer() -> Customer {
    Customer {
        id: 7,
        name: "Ada".into(),
        email: None,
        scratch: "ignored".into(),
        audit: Audit {
            author: "system".into(),
            revision: 2,
        },
    }
}

#[test]
fn derive_uses_explicit_table_and_column_names() {
    let descriptor = describe::<Customer>().unwrap();

    assert_eq!(descriptor.table_name(), "customers");
    assert_eq!(descriptor.id_column(), "customer_id");
    assert_eq!(
        descriptor.column_names(),
        vec!["customer_id", "full_name", "email", "created_by", "revision"]
    );
}

#[test]
fn derive_carries_column_hints() {
    let descriptor = describe::<Customer>().unwrap();
    let name = &descriptor.columns()[1];
    assert_eq!(name.column, "full_name");
    assert!(!name.nullable);
    assert_eq!(name.length, 120);

    let email = &descriptor.columns()[2];
    assert!(email.nullable);
    assert_eq!(email.length, rowmap::rowmap_data::DEFAULT_COLUMN_LENGTH);
}

#[test]
fn untagged_fields_are_not_persisted() {
    let descriptor = describe::<Customer>().unwrap();
    assert_eq!(descriptor.column_for("scratch"), None);
    assert_eq!(descriptor.column_for("audit.author"), Some("created_by"));
}

#[test]
fn untagged_fields_may_have_any_type() {
    let session = Session {
        id: 5,
        user: "ada".into(),
        tags: vec!["admin".into()],
        counters: HashMap::from([("logins".to_string(), 3)]),
        cursor: Cursor { offset: 10 },
    };

    let stmt = StatementBuilder::<Session>::shared().save(Some(&session)).unwrap();

    assert_eq!(stmt.sql, "INSERT INTO sessions (id, user) VALUES (?, ?);");
    assert_eq!(stmt.params, vec![SqlValue::Int(5), SqlValue::Text("ada".into())]);
    assert_eq!(session.tags.len() + session.counters.len() + session.cursor.offset, 12);
}

#[test]
fn name_alias_and_id_naming_precedence() {
    let descriptor = describe::<Tag>().unwrap();
    assert_eq!(descriptor.table_name(), "tags");
    assert_eq!(descriptor.id_column(), "tag_key");
    assert_eq!(descriptor.identifier().length, 32);
}

#[test]
fn default_table_is_the_type_name() {
    let stmt = StatementBuilder::<Widget>::shared().find_by_id(3_u32).unwrap();
    assert_eq!(stmt.sql, "SELECT * FROM Widget WHERE id = ?;");
    assert_eq!(stmt.params, vec![SqlValue::Int(3)]);
}

#[test]
fn embeddable_types_are_not_entities() {
    let err = describe::<Audit>().unwrap_err();
    assert!(matches!(err, DataError::Configuration(_)));
    assert_eq!(
        err.to_string(),
        "Configuration error: Type Audit is not declared as an entity"
    );
}

#[test]
fn missing_identifier_is_reported() {
    let err = describe::<Headless>().unwrap_err();
    assert_eq!(
        err.to_string(),
        "Configuration error: No identifier field found in Headless"
    );
}

#[test]
fn derived_statements_follow_declaration_order() {
    let builder = StatementBuilder::<Customer>::shared();

    let insert = builder.save(Some(&customer())).unwrap();
    assert_eq!(
        insert.sql,
        "INSERT INTO customers (customer_id, full_name, email, created_by, revision) VALUES (?, ?, ?, ?, ?);"
    );
    assert_eq!(
        insert.params,
        vec![
            SqlValue::Int(7),
            SqlValue::Text("Ada".into()),
            SqlValue::Null,
            SqlValue::Text("system".into()),
            SqlValue::Int(2),
        ]
    );

    let update = builder.update(Some(&customer())).unwrap();
    assert_eq!(
        update.sql,
        "UPDATE customers SET full_name = ?, email = ?, created_by = ?, revision = ? WHERE customer_id = ?;"
    );
    assert_eq!(update.params.last(), Some(&SqlValue::Int(7)));
}

#[tokio::test]
async fn repository_dispatches_derived_statements() {
    let recorder = RecordingExecutor::new();
    let repo = MappedRepository::<Customer, i64, _>::new(recorder.clone());

    repo.save(Some(&customer())).await.unwrap();
    repo.find_by_id(7).await.unwrap();
    repo.update(Some(&customer())).await.unwrap();
    repo.delete_by_id(7).await.unwrap();

    let kinds: Vec<StatementKind> = recorder.statements().iter().map(|s| s.kind).collect();
    assert_eq!(
        kinds,
        vec![
            StatementKind::Insert,
            StatementKind::Select,
            StatementKind::Update,
            StatementKind::Delete,
        ]
    );
    assert_eq!(
        recorder.sql()[3],
        "DELETE FROM customers WHERE customer_id = ?;"
    );
}

#[tokio::test]
async fn missing_arguments_never_reach_the_executor() {
    let recorder = RecordingExecutor::new();
    let repo = MappedRepository::<Customer, i64, _>::new(recorder.clone());

    let err = repo.update(None).await.unwrap_err();
    assert_eq!(err.to_string(), "Invalid argument: Entity must not be null");
    let err = repo.delete_by_id(None::<i64>).await.unwrap_err();
    assert_eq!(err.to_string(), "Invalid argument: Identifier must not be null");

    assert!(recorder.is_empty());
}

#[test]
fn descriptor_serializes_to_json() {
    let descriptor = describe::<Tag>().unwrap();
    let json = serde_json::to_value(&descriptor).unwrap();
    assert_eq!(json["table_name"], "tags");
    assert_eq!(json["columns"][0]["column"], "tag_key");
}
