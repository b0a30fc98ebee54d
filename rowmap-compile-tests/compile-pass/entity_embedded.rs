use rowmap::prelude::*;

#[derive(Entity)]
#[entity(embeddable)]
pub struct Timestamps {
    #[column]
    pub created_at: i64,
    #[column(nullable)]
    pub updated_at: Option<i64>,
}

#[derive(Entity)]
pub struct Post {
    #[id]
    pub id: String,
    #[column]
    pub body: String,
    #[embedded]
    pub times: Timestamps,
}

fn main() {}
