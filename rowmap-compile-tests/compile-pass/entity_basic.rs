use rowmap::prelude::*;

#[derive(Entity)]
pub struct User {
    #[id]
    pub id: i64,
    #[column]
    pub name: String,
}

fn main() {
    let descriptor = rowmap::describe::<User>().unwrap();
    assert_eq!(descriptor.table_name(), "User");
}
