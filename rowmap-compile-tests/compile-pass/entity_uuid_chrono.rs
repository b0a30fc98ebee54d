use rowmap::prelude::*;

#[derive(Entity)]
pub struct Event {
    #[id]
    pub id: uuid::Uuid,
    #[column]
    pub at: chrono::DateTime<chrono::Utc>,
}

fn main() {}
