use handsql::{Entity, OrderBy, SortDirection};

#[derive(Entity, Default)]
#[entity(table = "Documents")]
pub struct Document {
    #[column(key)]
    pub id: uuid::Uuid,

    pub title: String,

    #[column(version)]
    pub revision: i64,

    #[column(readonly)]
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,

    #[column(ignore(select, insert, update))]
    pub checksum: String,

    #[column(not_mapped)]
    pub dirty: bool,
}

fn main() {
    let schema = <Document as handsql::Entity>::schema();
    assert!(schema.columns()[2].version);
    assert!(schema.columns()[3].read_only);
    assert!(schema.columns()[3].nullable);
    assert!(schema.columns()[5].not_mapped);

    // Typed ordering tokens exist for mapped fields.
    let _order: OrderBy<Document> = OrderBy::field(Document::TITLE, SortDirection::Desc);
}
