use rowmap::prelude::*;

pub struct Audit {
    pub created_by: String,
}

fn audit_mapping() -> EntityMapping<Audit> {
    EntityMapping::<Audit>::embeddable("Audit")
        .field(FieldTag::column(), "created_by", |a| &a.created_by)
}

pub struct User {
    id: i64,
    name: String,
    audit: Audit,
}

impl Entity for User {
    fn mapping() -> EntityMapping<Self> {
        EntityMapping::<Self>::entity("User")
            .table("users")
            .field(FieldTag::id(), "id", |u| &u.id)
            .field(FieldTag::column_named("full_name"), "name", |u| &u.name)
            .field_fn(FieldTag::column(), "name_length", |u| SqlValue::Int(u.name.len() as i64))
            .embed("audit", |u| &u.audit, audit_mapping())
    }
}

fn main() {
    let user = User {
        id: 1,
        name: "Ada".into(),
        audit: Audit { created_by: "system".into() },
    };
    let stmt = StatementBuilder::<User>::shared().save(Some(&user)).unwrap();
    assert_eq!(
        stmt.sql,
        "INSERT INTO users (id, full_name, name_length, created_by) VALUES (?, ?, ?, ?);"
    );
}
