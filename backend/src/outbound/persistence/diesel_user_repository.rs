//! SQLite-backed `UserRepository` implementation using Diesel ORM.
//!
//! Adapter only: rows are translated to domain types and Diesel errors to
//! `UserPersistenceError`. The password column is written but never read.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use diesel_async::RunQueryDsl;
use tracing::debug;

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{
    Age, EmailAddress, NewUserRecord, User, UserId, UserName, UserValidationError,
};

use super::models::{UserRow, UserWriteRow};
use super::pool::{DbPool, PoolError};
use super::schema::users;

/// Diesel-backed implementation of the user repository port.
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> UserPersistenceError {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => {
            UserPersistenceError::connection(message)
        }
    }
}

fn map_diesel_error(error: DieselError) -> UserPersistenceError {
    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        other => debug!(error = %other, "diesel operation failed"),
    }

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            UserPersistenceError::connection("database connection error")
        }
        DieselError::DatabaseError(_, info) => UserPersistenceError::query(info.message()),
        other => UserPersistenceError::query(other.to_string()),
    }
}

fn map_write_error(error: DieselError, email: &EmailAddress) -> UserPersistenceError {
    if let DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) = &error {
        debug!("unique constraint rejected user write");
        return UserPersistenceError::duplicate_email(email.as_ref());
    }
    map_diesel_error(error)
}

fn write_row(record: &NewUserRecord) -> UserWriteRow<'_> {
    UserWriteRow {
        name: record.name().as_ref(),
        email: record.email().as_ref(),
        age: record.age().get(),
        password: record.password().as_ref(),
    }
}

fn row_to_user(row: UserRow) -> Result<User, UserPersistenceError> {
    let UserRow {
        id,
        name,
        email,
        age,
    } = row;
    let corrupt = |err: UserValidationError| {
        UserPersistenceError::query(format!("stored user {id} is invalid: {err}"))
    };

    let name = UserName::new(name).map_err(corrupt)?;
    let email = EmailAddress::new(email).map_err(corrupt)?;
    let age = Age::new(age).map_err(corrupt)?;
    Ok(User::new(UserId::new(id), name, email, age))
}

fn affected(rows: usize) -> Result<u64, UserPersistenceError> {
    u64::try_from(rows).map_err(|_| UserPersistenceError::query("affected row count overflow"))
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn list(&self) -> Result<Vec<User>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<UserRow> = users::table
            .select(UserRow::as_select())
            .order(users::id.asc())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows.into_iter().map(row_to_user).collect()
    }

    async fn email_exists(
        &self,
        email: &EmailAddress,
        exclude: Option<UserId>,
    ) -> Result<bool, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let matching = users::table.filter(users::email.eq(email.as_ref()));
        let count: i64 = match exclude {
            Some(id) => {
                matching
                    .filter(users::id.ne(id.get()))
                    .count()
                    .get_result(&mut conn)
                    .await
            }
            None => matching.count().get_result(&mut conn).await,
        }
        .map_err(map_diesel_error)?;

        Ok(count > 0)
    }

    async fn insert(&self, record: &NewUserRecord) -> Result<UserId, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let id: i64 = diesel::insert_into(users::table)
            .values(write_row(record))
            .returning(users::id)
            .get_result(&mut conn)
            .await
            .map_err(|err| map_write_error(err, record.email()))?;

        Ok(UserId::new(id))
    }

    async fn update(
        &self,
        id: UserId,
        record: &NewUserRecord,
    ) -> Result<u64, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows = diesel::update(users::table.find(id.get()))
            .set(write_row(record))
            .execute(&mut conn)
            .await
            .map_err(|err| map_write_error(err, record.email()))?;

        affected(rows)
    }

    async fn delete(&self, id: UserId) -> Result<u64, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows = diesel::delete(users::table.find(id.get()))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        affected(rows)
    }
}

#[cfg(test)]
mod tests {
    //! Error mapping coverage; behaviour against a live database lives in
    //! `tests/diesel_user_repository.rs`.

    use super::*;
    use rstest::rstest;

    #[rstest]
    fn pool_errors_become_connection_errors() {
        let err = map_pool_error(PoolError::checkout("timed out"));
        assert_eq!(err, UserPersistenceError::connection("timed out"));
    }

    #[rstest]
    fn not_found_maps_to_query_error() {
        let err = map_diesel_error(DieselError::NotFound);
        assert!(matches!(err, UserPersistenceError::Query { .. }));
    }

    #[rstest]
    fn unique_violation_maps_to_duplicate_email() {
        let email = EmailAddress::new("ann@x.com").expect("email");
        let err = map_write_error(
            DieselError::DatabaseError(
                DatabaseErrorKind::UniqueViolation,
                Box::new(String::from("UNIQUE constraint failed: users.email")),
            ),
            &email,
        );
        assert_eq!(err, UserPersistenceError::duplicate_email("ann@x.com"));
    }

    #[rstest]
    fn corrupt_rows_are_reported() {
        let err = row_to_user(UserRow {
            id: 4,
            name: String::from("Ann"),
            email: String::from("ann@x.com"),
            age: 0,
        })
        .expect_err("age must be positive");
        assert!(err.to_string().contains("stored user 4"));
    }
}
