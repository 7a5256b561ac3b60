use handsql::{Entity, ValueKind};

#[derive(Entity)]
#[entity(table = "Users")]
pub struct User {
    #[column(key)]
    pub id: i32,

    #[column(name = "LastName")]
    pub last_name: String,

    pub age: i32,
}

fn main() {
    let schema = <User as handsql::Entity>::schema();
    assert_eq!(schema.table(), Some("Users"));
    assert_eq!(schema.columns().len(), 3);
    assert_eq!(schema.columns()[0].kind, ValueKind::I32);
    assert!(schema.columns()[0].key);
}
