//! PostgreSQL-backed `UserRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{UserAccount, UserPersistenceError, UserRepository};
use crate::domain::{PasswordDigest, User, UserId, Username};

use super::diesel_error_mapping::{DieselFailure, classify_diesel_error};
use super::models::{NewUserRow, UserRow};
use super::pool::{DbPool, PoolError};
use super::schema::users;

/// Diesel-backed implementation of the user repository port.
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> UserPersistenceError {
    UserPersistenceError::connection(error.into_message())
}

fn map_diesel_error(error: diesel::result::Error, username: &Username) -> UserPersistenceError {
    match classify_diesel_error(&error) {
        DieselFailure::UniqueViolation => {
            UserPersistenceError::duplicate_username(username.as_ref())
        }
        DieselFailure::Connection(message) => UserPersistenceError::connection(message),
        DieselFailure::Query(message) => UserPersistenceError::query(message),
    }
}

fn map_read_error(error: diesel::result::Error) -> UserPersistenceError {
    match classify_diesel_error(&error) {
        DieselFailure::Connection(message) => UserPersistenceError::connection(message),
        DieselFailure::Query(message) => UserPersistenceError::query(message),
        DieselFailure::UniqueViolation => UserPersistenceError::query("database error"),
    }
}

fn row_to_account(row: UserRow) -> Result<UserAccount, UserPersistenceError> {
    let UserRow {
        id,
        username,
        password_digest,
    } = row;
    let username = Username::new(username)
        .map_err(|err| UserPersistenceError::query(format!("stored username is invalid: {err}")))?;
    let password = PasswordDigest::decode(&password_digest)
        .map_err(|err| UserPersistenceError::query(format!("stored digest is invalid: {err}")))?;
    Ok(UserAccount {
        user: User::new(UserId::from_uuid(id), username),
        password,
    })
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn insert(&self, account: &UserAccount) -> Result<(), UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let digest = account.password.encode();
        let row = NewUserRow {
            id: *account.user.id().as_uuid(),
            username: account.user.username().as_ref(),
            password_digest: &digest,
        };

        diesel::insert_into(users::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(|err| map_diesel_error(err, account.user.username()))
    }

    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<UserAccount>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = users::table
            .filter(users::username.eq(username.as_ref()))
            .select(UserRow::as_select())
            .first::<UserRow>(&mut conn)
            .await
            .optional()
            .map_err(map_read_error)?;

        row.map(row_to_account).transpose()
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = users::table
            .filter(users::id.eq(id.as_uuid()))
            .select(UserRow::as_select())
            .first::<UserRow>(&mut conn)
            .await
            .optional()
            .map_err(map_read_error)?;

        row.map(|row| row_to_account(row).map(|account| account.user))
            .transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use diesel::result::{DatabaseErrorKind, Error as DieselError};
    use rstest::rstest;
    use uuid::Uuid;

    #[rstest]
    fn unique_violation_maps_to_duplicate_username() {
        let username = Username::new("author").expect("username");
        let err = DieselError::DatabaseError(
            DatabaseErrorKind::UniqueViolation,
            Box::new("duplicate key".to_string()),
        );

        assert_eq!(
            map_diesel_error(err, &username),
            UserPersistenceError::duplicate_username("author")
        );
    }

    #[rstest]
    fn row_round_trips_digest() {
        let digest = PasswordDigest::create("s3cret-pass").expect("hash password");
        let account = row_to_account(UserRow {
            id: Uuid::new_v4(),
            username: "author".into(),
            password_digest: digest.encode(),
        })
        .expect("valid row");

        assert!(account.password.verify("s3cret-pass"));
        assert_eq!(account.user.username().as_ref(), "author");
    }

    #[rstest]
    fn corrupt_digest_is_a_query_error() {
        let err = row_to_account(UserRow {
            id: Uuid::new_v4(),
            username: "author".into(),
            password_digest: "md5$abc".into(),
        })
        .expect_err("invalid digest");

        assert!(matches!(err, UserPersistenceError::Query { .. }));
    }
}
