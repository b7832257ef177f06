use crate::schema::documents;

use diesel::prelude::*;

#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = documents)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct DocumentRow {
  pub collection: String,
  pub id: String,
  pub body: String,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = documents)]
pub struct NewDocumentRow<'a> {
  pub collection: &'a str,
  pub id: &'a str,
  pub body: String,
}
