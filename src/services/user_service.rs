//! User administration service

use redis::aio::ConnectionManager;
use sqlx::PgPool;
use tracing::{info, warn};
use uuid::Uuid;

use crate::{
    config::SeedConfig,
    constants::roles,
    db::repositories::UserRepository,
    error::{AppError, AppResult},
    models::User,
    services::AuthService,
    utils::{validate_password, validate_role},
};

/// Account fields an administrator sets on create and update
#[derive(Debug, Clone)]
pub struct UserAccount<'a> {
    pub email: &'a str,
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub role: &'a str,
}

/// User service for business logic
pub struct UserService;

impl UserService {
    /// Get user by ID
    pub async fn get_user_by_id(pool: &PgPool, id: &Uuid) -> AppResult<User> {
        UserRepository::find_by_id(pool, id)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))
    }

    /// List every user
    pub async fn list_users(pool: &PgPool) -> AppResult<Vec<User>> {
        UserRepository::list(pool).await
    }

    /// Create an account
    pub async fn create_user(
        pool: &PgPool,
        account: UserAccount<'_>,
        password: &str,
    ) -> AppResult<User> {
        validate_role(account.role).map_err(|e| AppError::Validation(e.to_string()))?;
        validate_password(password).map_err(|e| AppError::Validation(e.to_string()))?;

        let email = account.email.trim();
        if UserRepository::email_exists(pool, email, None).await? {
            return Err(AppError::AlreadyExists("Email already registered".to_string()));
        }

        let hash = AuthService::hash_password(password)?;
        let user = UserRepository::create(
            pool,
            email,
            &hash,
            account.first_name,
            account.last_name,
            account.role,
        )
        .await?;

        info!(user_id = %user.id, role = %user.role, "User created");
        Ok(user)
    }

    /// Replace an account's fields, optionally resetting its password.
    ///
    /// A role change or password reset signs the user out everywhere.
    pub async fn update_user(
        pool: &PgPool,
        redis: ConnectionManager,
        requester_id: &Uuid,
        target_id: &Uuid,
        account: UserAccount<'_>,
        password: Option<&str>,
    ) -> AppResult<User> {
        validate_role(account.role).map_err(|e| AppError::Validation(e.to_string()))?;

        let existing = Self::get_user_by_id(pool, target_id).await?;
        if requester_id == target_id && existing.role != account.role {
            return Err(AppError::Validation(
                "You cannot change your own role".to_string(),
            ));
        }

        let email = account.email.trim();
        if UserRepository::email_exists(pool, email, Some(target_id)).await? {
            return Err(AppError::AlreadyExists("Email already registered".to_string()));
        }

        let password_hash = match password {
            Some(password) => {
                validate_password(password).map_err(|e| AppError::Validation(e.to_string()))?;
                Some(AuthService::hash_password(password)?)
            }
            None => None,
        };

        let user = UserRepository::update(
            pool,
            target_id,
            email,
            account.first_name,
            account.last_name,
            account.role,
            password_hash.as_deref(),
        )
        .await?;

        if existing.role != user.role || password_hash.is_some() {
            AuthService::revoke_all_sessions(redis, target_id, None).await?;
        }

        info!(user_id = %user.id, "User updated");
        Ok(user)
    }

    /// Delete an account and its sessions
    pub async fn delete_user(
        pool: &PgPool,
        redis: ConnectionManager,
        requester_id: &Uuid,
        target_id: &Uuid,
    ) -> AppResult<()> {
        if requester_id == target_id {
            return Err(AppError::Validation(
                "You cannot delete your own account".to_string(),
            ));
        }

        if !UserRepository::delete(pool, target_id).await? {
            return Err(AppError::NotFound("User not found".to_string()));
        }
        AuthService::revoke_all_sessions(redis, target_id, None).await?;

        info!(user_id = %target_id, "User deleted");
        Ok(())
    }

    /// Create the initial administrator when no admin account exists
    pub async fn seed_admin(pool: &PgPool, seed: &SeedConfig) -> AppResult<Option<User>> {
        if UserRepository::count_by_role(pool, roles::ADMIN).await? > 0 {
            return Ok(None);
        }

        if seed.uses_default_password() {
            warn!(
                email = %seed.admin_email,
                "Seeding administrator with the default password, change it after first login"
            );
        }

        let hash = AuthService::hash_password(&seed.admin_password)?;
        let user = UserRepository::create(
            pool,
            &seed.admin_email,
            &hash,
            "Admin",
            "",
            roles::ADMIN,
        )
        .await?;

        info!(user_id = %user.id, email = %user.email, "Administrator account seeded");
        Ok(Some(user))
    }
}
