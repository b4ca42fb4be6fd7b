//! Internal Diesel row structs.
//!
//! These never leave the persistence module; repositories translate them to
//! and from domain types.

use diesel::prelude::*;

use super::schema::users;

/// Read-side projection of the `users` table. The password column is never
/// selected.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub(crate) struct UserRow {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub age: i64,
}

/// Write-side row used for both inserts and full replacements.
#[derive(Debug, Insertable, AsChangeset)]
#[diesel(table_name = users)]
pub(crate) struct UserWriteRow<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub age: i64,
    pub password: &'a str,
}
