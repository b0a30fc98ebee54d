use std::collections::HashMap;
use std::sync::Arc;

use rowmap::prelude::*;

pub struct Preferences {
    pub theme: String,
}

#[derive(Entity)]
pub struct Session {
    #[id]
    pub id: i64,
    #[column]
    pub user: String,
    pub tags: Vec<String>,
    pub counters: HashMap<String, u64>,
    pub prefs: Arc<Preferences>,
}

fn main() {
    let descriptor = rowmap::describe::<Session>().unwrap();
    assert_eq!(descriptor.column_names(), vec!["id", "user"]);
}
