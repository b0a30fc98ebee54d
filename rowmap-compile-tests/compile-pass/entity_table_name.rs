use rowmap::prelude::*;

#[derive(Entity)]
#[entity(table = "accounts")]
pub struct Account {
    #[id(name = "account_id")]
    pub id: u32,
    #[column(name = "display_name", nullable = false, length = 80)]
    pub name: String,
}

#[derive(Entity)]
#[entity(name = "audit_log")]
pub struct AuditLog {
    #[id]
    pub seq: i64,
}

fn main() {}
