use rowmap::prelude::*;

#[derive(Entity)]
pub struct Session {
    #[id]
    pub token: String,
    pub cached_user: Option<String>,
    pub hits: u16,
}

fn main() {}
