//! Signup and login.
//!
//! Passwords are stored as Argon2id PHC strings with a random salt. Session
//! handling is the caller's concern: `login` only answers which user the
//! credentials belong to.

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use common::Credentials;
use model::entities::user;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryFilter,
    Set, SqlErr, TransactionTrait,
};
use tracing::{debug, info, instrument, warn};

use crate::{AuthFailure, CatalogError, Result};

pub fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| CatalogError::PasswordHash(e.to_string()))
}

pub fn verify_password(password: &str, password_hash: &str) -> Result<bool> {
    let parsed =
        PasswordHash::new(password_hash).map_err(|e| CatalogError::PasswordHash(e.to_string()))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}

pub async fn find_by_username<C: ConnectionTrait>(
    db: &C,
    username: &str,
) -> Result<Option<user::Model>> {
    Ok(user::Entity::find()
        .filter(user::Column::Username.eq(username))
        .one(db)
        .await?)
}

/// Profile lookup; NotFound when the username is unknown.
#[instrument(skip(db))]
pub async fn get_profile(db: &DatabaseConnection, username: &str) -> Result<user::Model> {
    find_by_username(db, username)
        .await?
        .ok_or_else(|| CatalogError::not_found("User", username))
}

pub async fn get_user(db: &DatabaseConnection, user_id: i32) -> Result<Option<user::Model>> {
    Ok(user::Entity::find_by_id(user_id).one(db).await?)
}

/// Creates an account. Fails with `UsernameTaken` rather than creating a
/// second user with the same name.
#[instrument(skip(db, credentials), fields(username = %credentials.username))]
pub async fn signup(db: &DatabaseConnection, credentials: &Credentials) -> Result<user::Model> {
    credentials.check().map_err(CatalogError::Validation)?;
    let credentials = credentials.normalized();
    let username = credentials.username.as_str();

    let txn = db.begin().await?;
    if find_by_username(&txn, username).await?.is_some() {
        warn!("Signup refused, username '{}' exists", username);
        return Err(CatalogError::UsernameTaken);
    }

    let password_hash = hash_password(&credentials.password)?;
    let inserted = user::ActiveModel {
        username: Set(username.to_string()),
        password_hash: Set(password_hash),
        ..Default::default()
    }
    .insert(&txn)
    .await;

    let created = match inserted {
        Ok(created) => created,
        // A concurrent signup won the race for the unique index.
        Err(e) if matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) => {
            warn!("Signup refused by unique index for '{}'", username);
            return Err(CatalogError::UsernameTaken);
        }
        Err(e) => return Err(e.into()),
    };
    txn.commit().await?;

    info!("User created with ID: {}, username: {}", created.id, created.username);
    Ok(created)
}

/// Checks credentials and returns the matching user.
#[instrument(skip(db, credentials), fields(username = %credentials.username))]
pub async fn login(db: &DatabaseConnection, credentials: &Credentials) -> Result<user::Model> {
    let Some(user) = find_by_username(db, credentials.normalized().username.as_str()).await? else {
        debug!("Login for unknown user");
        return Err(AuthFailure::UnknownUser.into());
    };

    if !verify_password(&credentials.password, &user.password_hash)? {
        debug!("Login with wrong password");
        return Err(AuthFailure::PasswordMismatch.into());
    }

    info!("User {} logged in", user.id);
    Ok(user)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::setup_db;
    use sea_orm::PaginatorTrait;

    #[test]
    fn test_hash_is_salted_and_verifies() {
        let first = hash_password("password").unwrap();
        let second = hash_password("password").unwrap();
        assert_ne!(first, second);
        assert!(first.starts_with("$argon2id$"));
        assert!(verify_password("password", &first).unwrap());
        assert!(!verify_password("wrongpassword", &first).unwrap());
    }

    #[tokio::test]
    async fn test_signup_then_profile() {
        let db = setup_db().await;
        let user = signup(&db, &Credentials::new("laurelmclean1", "Password1"))
            .await
            .unwrap();
        assert_ne!(user.password_hash, "Password1");

        let profile = get_profile(&db, "laurelmclean1").await.unwrap();
        assert_eq!(profile.id, user.id);
    }

    #[tokio::test]
    async fn test_signup_existing_username() {
        let db = setup_db().await;
        signup(&db, &Credentials::new("laurel1", "password")).await.unwrap();

        let err = signup(&db, &Credentials::new("laurel1", "password"))
            .await
            .unwrap_err();
        assert!(matches!(err, CatalogError::UsernameTaken));
        assert_eq!(
            err.to_string(),
            "That username is taken. Please choose a different one."
        );
        assert_eq!(user::Entity::find().count(&db).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_blank_or_padded_username_is_rejected() {
        let db = setup_db().await;
        for username in ["     ", " ab "] {
            let err = signup(&db, &Credentials::new(username, "password"))
                .await
                .unwrap_err();
            assert!(matches!(err, CatalogError::Validation(ref errors) if errors[0].field == "username"));
        }
        assert_eq!(user::Entity::find().count(&db).await.unwrap(), 0);

        let user = signup(&db, &Credentials::new("  laurel1  ", "password")).await.unwrap();
        assert_eq!(user.username, "laurel1");
        assert!(login(&db, &Credentials::new(" laurel1 ", "password")).await.is_ok());
    }

    #[tokio::test]
    async fn test_login_outcomes() {
        let db = setup_db().await;
        let created = signup(&db, &Credentials::new("laurel1", "password")).await.unwrap();

        let user = login(&db, &Credentials::new("laurel1", "password")).await.unwrap();
        assert_eq!(user.id, created.id);

        let err = login(&db, &Credentials::new("laurel1", "wrongpassword"))
            .await
            .unwrap_err();
        assert!(matches!(err, CatalogError::Auth(AuthFailure::PasswordMismatch)));
        assert_eq!(err.to_string(), "Password doesn't match. Please try again.");

        let err = login(&db, &Credentials::new("newaccount", "dogs123"))
            .await
            .unwrap_err();
        assert!(matches!(err, CatalogError::Auth(AuthFailure::UnknownUser)));
        assert_eq!(err.to_string(), "No user with that username. Please try again.");
    }

    #[tokio::test]
    async fn test_missing_profile_is_not_found() {
        let db = setup_db().await;
        assert!(matches!(
            get_profile(&db, "nobody").await,
            Err(CatalogError::NotFound { entity: "User", .. })
        ));
    }
}
