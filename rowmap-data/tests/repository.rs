use std::sync::{Arc, Mutex};

use rowmap_data::{
    CrudRepository, DataConfig, DataError, DataResult, Entity, EntityMapping, FieldTag,
    LoggingExecutor, MappedRepository, MetadataResolver, SqlValue, Statement, StatementExecutor,
    StatementKind,
};

#[derive(Default)]
struct Capture {
    seen: Mutex<Vec<Statement>>,
    fail_with: Option<&'static str>,
}

impl Capture {
    fn failing(message: &'static str) -> Self {
        Self {
            seen: Mutex::new(Vec::new()),
            fail_with: Some(message),
        }
    }

    fn seen(&self) -> Vec<Statement> {
        self.seen.lock().unwrap().clone()
    }
}

impl StatementExecutor for Capture {
    async fn execute(&self, statement: &Statement) -> DataResult<u64> {
        self.seen.lock().unwrap().push(statement.clone());
        match self.fail_with {
            Some(message) => Err(DataError::execution(std::io::Error::other(message))),
            None => Ok(1),
        }
    }
}

struct Book {
    isbn: String,
    title: String,
}

impl Entity for Book {
    fn mapping() -> EntityMapping<Self> {
        EntityMapping::<Self>::entity("Book")
            .table("books")
            .field(FieldTag::id(), "isbn", |b| &b.isbn)
            .field(FieldTag::column(), "title", |b| &b.title)
    }
}

struct Orphan {
    title: String,
}

impl Entity for Orphan {
    fn mapping() -> EntityMapping<Self> {
        EntityMapping::<Self>::entity("Orphan").field(FieldTag::column(), "title", |o| &o.title)
    }
}

fn book() -> Book {
    Book {
        isbn: "978-0".into(),
        title: "Dune".into(),
    }
}

#[tokio::test]
async fn every_operation_dispatches_one_statement() {
    let executor = Arc::new(Capture::default());
    let repo = MappedRepository::<Book, String, _>::new(Arc::clone(&executor));

    repo.save(Some(&book())).await.unwrap();
    repo.find_by_id("978-0".to_string()).await.unwrap();
    repo.update(Some(&book())).await.unwrap();
    repo.delete_by_id("978-0".to_string()).await.unwrap();

    let kinds: Vec<StatementKind> = executor.seen().iter().map(|s| s.kind).collect();
    assert_eq!(
        kinds,
        vec![
            StatementKind::Insert,
            StatementKind::Select,
            StatementKind::Update,
            StatementKind::Delete
        ]
    );
    let seen = executor.seen();
    assert_eq!(seen[0].sql, "INSERT INTO books (isbn, title) VALUES (?, ?);");
    assert_eq!(seen[2].params, vec![SqlValue::Text("Dune".into()), SqlValue::Text("978-0".into())]);
}

#[tokio::test]
async fn execution_failures_pass_through_unmodified() {
    let executor = Arc::new(Capture::failing("disk full"));
    let repo = MappedRepository::<Book, String, _>::new(Arc::clone(&executor));

    let err = repo.save(Some(&book())).await.unwrap_err();
    match err {
        DataError::Execution(cause) => assert_eq!(cause.to_string(), "disk full"),
        other => panic!("expected execution error, got {other}"),
    }
    assert_eq!(executor.seen().len(), 1);
}

#[tokio::test]
async fn rejected_calls_never_reach_the_executor() {
    let executor = Arc::new(Capture::default());
    let books = MappedRepository::<Book, String, _>::new(Arc::clone(&executor));
    let orphans = MappedRepository::<Orphan, i64, _>::new(Arc::clone(&executor));

    assert!(books.save(None).await.unwrap_err().is_invalid_argument());
    assert!(books.find_by_id(None::<String>).await.unwrap_err().is_invalid_argument());
    assert!(books.update(None).await.unwrap_err().is_invalid_argument());
    assert!(books.delete_by_id(None::<String>).await.unwrap_err().is_invalid_argument());
    assert!(orphans
        .save(Some(&Orphan { title: "x".into() }))
        .await
        .unwrap_err()
        .is_configuration());

    assert!(executor.seen().is_empty());
}

#[tokio::test]
async fn repositories_can_share_a_resolver() {
    let resolver = Arc::new(MetadataResolver::new());
    let a = MappedRepository::<Book, String, _>::with_resolver(LoggingExecutor, Arc::clone(&resolver));
    let b = MappedRepository::<Book, String, _>::with_resolver(LoggingExecutor, Arc::clone(&resolver));

    a.save(Some(&book())).await.unwrap();
    b.delete_by_id("978-0".to_string()).await.unwrap();
    assert_eq!(resolver.cached_types(), 1);
}

#[tokio::test]
async fn configured_repository_uses_configured_resolver() {
    let config = DataConfig {
        cache: false,
        log_statements: true,
        ..DataConfig::default()
    };
    let repo = MappedRepository::<Book, String, _>::from_config(LoggingExecutor, &config);
    repo.update(Some(&book())).await.unwrap();
    assert_eq!(repo.resolver().cached_types(), 0);
}
