use rowmap::prelude::*;

#[derive(Entity)]
#[entity(table = "settings")]
pub struct Setting<V: ToSqlValue + Send + Sync + 'static> {
    #[id]
    pub key: String,
    #[column]
    pub value: V,
}

fn main() {
    let _ = rowmap::describe::<Setting<bool>>();
    let _ = rowmap::describe::<Setting<String>>();
}
