use rowmap::prelude::*;

#[derive(Entity)]
#[entity(table = "notes")]
pub struct Note {
    #[id]
    pub id: i64,
    #[column]
    pub text: String,
}

async fn store<R: CrudRepository<Note, i64>>(repo: &R, note: &Note) -> Result<(), DataError> {
    repo.save(Some(note)).await?;
    repo.update(Some(note)).await?;
    repo.find_by_id(note.id).await?;
    repo.delete_by_id(note.id).await
}

fn assert_send<T: Send>(_: T) {}

fn main() {
    let repo = MappedRepository::<Note, i64, _>::new(LoggingExecutor);
    let note = Note { id: 1, text: "hi".into() };
    assert_send(store(&repo, &note));
}
