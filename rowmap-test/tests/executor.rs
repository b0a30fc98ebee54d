use std::sync::Arc;

use rowmap_data::{
    CrudRepository, DataError, Entity, EntityMapping, FieldTag, MappedRepository,
    StatementExecutor, StatementKind,
};
use rowmap_test::{FailingExecutor, RecordingExecutor};
use serde_json::json;

struct Tag {
    slug: String,
    label: String,
}

impl Entity for Tag {
    fn mapping() -> EntityMapping<Self> {
        EntityMapping::<Self>::entity("Tag")
            .field(FieldTag::id(), "slug", |t| &t.slug)
            .field(FieldTag::column(), "label", |t| &t.label)
    }
}

fn tag() -> Tag {
    Tag {
        slug: "rust".into(),
        label: "Rust".into(),
    }
}

#[tokio::test]
async fn recording_executor_sees_statements_through_a_clone() {
    let recorder = RecordingExecutor::new();
    let repo = MappedRepository::<Tag, String, _>::new(recorder.clone());

    repo.save(Some(&tag())).await.unwrap();
    repo.delete_by_id("rust".to_string()).await.unwrap();

    assert_eq!(
        recorder.sql(),
        vec![
            "INSERT INTO Tag (slug, label) VALUES (?, ?);",
            "DELETE FROM Tag WHERE slug = ?;",
        ]
    );
    assert_eq!(recorder.count(StatementKind::Insert), 1);
    assert_eq!(recorder.count(StatementKind::Update), 0);
    assert_eq!(recorder.last().unwrap().kind, StatementKind::Delete);
}

#[tokio::test]
async fn rejected_operations_are_not_recorded() {
    let recorder = RecordingExecutor::new();
    let repo = MappedRepository::<Tag, String, _>::new(recorder.clone());

    assert!(repo.save(None).await.is_err());
    assert!(repo.find_by_id(None::<String>).await.is_err());

    assert!(recorder.is_empty());
}

#[tokio::test]
async fn clear_empties_the_log() {
    let recorder = RecordingExecutor::new();
    let repo = MappedRepository::<Tag, String, _>::new(recorder.clone());
    repo.update(Some(&tag())).await.unwrap();
    assert_eq!(recorder.len(), 1);

    recorder.clear();

    assert!(recorder.is_empty());
    assert_eq!(recorder.last(), None);
}

#[tokio::test]
async fn with_rows_sets_the_reported_count() {
    let recorder = RecordingExecutor::new().with_rows(3);
    let stmt = rowmap_data::StatementBuilder::<Tag>::shared()
        .find_by_id("rust")
        .unwrap();

    assert_eq!(recorder.execute(&stmt).await.unwrap(), 3);
}

#[tokio::test]
async fn to_json_lists_kind_sql_and_params() {
    let recorder = RecordingExecutor::new();
    let repo = MappedRepository::<Tag, String, _>::new(recorder.clone());
    repo.find_by_id("rust".to_string()).await.unwrap();

    assert_eq!(
        recorder.to_json(),
        json!([{
            "kind": "Select",
            "sql": "SELECT * FROM Tag WHERE slug = ?;",
            "params": ["rust"],
        }])
    );
}

#[tokio::test]
async fn failing_executor_returns_execution_error() {
    let repo = MappedRepository::<Tag, String, _>::new(FailingExecutor::new("disk full"));

    let err = repo.save(Some(&tag())).await.unwrap_err();

    assert!(err.is_execution());
    assert_eq!(err.to_string(), "Execution error: disk full");
}

async fn persist<R: CrudRepository<Tag, String>>(repo: &R, tag: &Tag) -> Result<(), DataError> {
    repo.save(Some(tag)).await?;
    repo.update(Some(tag)).await?;
    repo.find_by_id(tag.slug.clone()).await
}

#[tokio::test]
async fn generic_repository_calls_run_on_spawned_tasks() {
    let recorder = RecordingExecutor::new();
    let repo = Arc::new(MappedRepository::<Tag, String, _>::new(recorder.clone()));

    let handle = tokio::spawn({
        let repo = Arc::clone(&repo);
        async move {
            let tag = tag();
            persist(&*repo, &tag).await
        }
    });
    handle.await.unwrap().unwrap();

    assert_eq!(recorder.count(StatementKind::Insert), 1);
    assert_eq!(recorder.count(StatementKind::Update), 1);
    assert_eq!(recorder.count(StatementKind::Select), 1);
}
