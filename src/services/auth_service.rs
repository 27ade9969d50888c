//! Authentication and session service

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use redis::aio::ConnectionManager;
use redis::AsyncCommands;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use tracing::{debug, info};
use uuid::Uuid;

use crate::{
    config::{Config, SessionConfig},
    constants::{SESSION_KEY_PREFIX, USER_SESSIONS_KEY_PREFIX},
    db::repositories::UserRepository,
    error::{AppError, AppResult},
    models::User,
    utils::validate_password,
};

/// Session token claims
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // user_id
    pub email: String,
    pub role: String,
    /// Session id, the Redis key of the server-side session record
    pub jti: String,
    pub exp: i64,
    pub iat: i64,
}

/// A freshly issued session
#[derive(Debug, Clone)]
pub struct IssuedSession {
    pub token: String,
    pub session_id: String,
    pub expires_in: i64,
}

/// Authentication service
pub struct AuthService;

impl AuthService {
    /// Login with email and password
    pub async fn login(
        pool: &PgPool,
        redis: ConnectionManager,
        config: &Config,
        email: &str,
        password: &str,
    ) -> AppResult<(User, IssuedSession)> {
        let user = UserRepository::find_by_email(pool, email.trim())
            .await?
            .ok_or(AppError::InvalidCredentials)?;

        if !Self::verify_password(password, &user.password_hash)? {
            return Err(AppError::InvalidCredentials);
        }

        let session = Self::create_session(redis, &config.session, &user).await?;
        info!(user_id = %user.id, "User logged in");

        Ok((user, session))
    }

    /// Revoke the session behind `token`, if it is still valid
    pub async fn logout(redis: ConnectionManager, config: &Config, token: &str) -> AppResult<()> {
        match Self::verify_token(token, &config.session.secret) {
            Ok(claims) => {
                let user_id = Uuid::parse_str(&claims.sub).map_err(|_| AppError::InvalidToken)?;
                Self::revoke_session(redis, &user_id, &claims.jti).await?;
                info!(user_id = %user_id, "User logged out");
            }
            Err(e) => debug!(error = ?e, "Logout with an unusable token"),
        }
        Ok(())
    }

    /// Get user by ID
    pub async fn get_user_by_id(pool: &PgPool, user_id: &Uuid) -> AppResult<User> {
        UserRepository::find_by_id(pool, user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))
    }

    /// Whether an email address belongs to an account
    pub async fn email_in_use(pool: &PgPool, email: &str) -> AppResult<bool> {
        UserRepository::email_exists(pool, email.trim(), None).await
    }

    /// Change own password and sign out every other session
    pub async fn change_password(
        pool: &PgPool,
        redis: ConnectionManager,
        user_id: &Uuid,
        current_session: &str,
        current_password: &str,
        new_password: &str,
    ) -> AppResult<()> {
        let user = Self::get_user_by_id(pool, user_id).await?;

        if !Self::verify_password(current_password, &user.password_hash)? {
            return Err(AppError::Validation("Current password is incorrect".to_string()));
        }
        validate_password(new_password).map_err(|e| AppError::Validation(e.to_string()))?;

        let hash = Self::hash_password(new_password)?;
        UserRepository::update_password(pool, user_id, &hash).await?;
        Self::revoke_all_sessions(redis, user_id, Some(current_session)).await?;

        info!(user_id = %user_id, "Password changed");
        Ok(())
    }

    /// Update the caller's own email and name
    pub async fn update_profile(
        pool: &PgPool,
        user_id: &Uuid,
        email: &str,
        first_name: &str,
        last_name: &str,
    ) -> AppResult<User> {
        let email = email.trim();
        if UserRepository::email_exists(pool, email, Some(user_id)).await? {
            return Err(AppError::AlreadyExists("Email already registered".to_string()));
        }

        UserRepository::update_profile(pool, user_id, email, first_name, last_name).await
    }

    /// Issue a token and record its session in Redis
    pub async fn create_session(
        mut redis: ConnectionManager,
        config: &SessionConfig,
        user: &User,
    ) -> AppResult<IssuedSession> {
        let session_id = Uuid::new_v4().to_string();
        let token = Self::generate_token(user, &session_id, config)?;
        let ttl = config.expiry_secs();

        redis
            .set_ex::<_, _, ()>(session_key(&session_id), user.id.to_string(), ttl as u64)
            .await?;
        let index = user_sessions_key(&user.id);
        redis.sadd::<_, _, ()>(&index, &session_id).await?;
        redis.expire::<_, ()>(&index, ttl).await?;

        Ok(IssuedSession {
            token,
            session_id,
            expires_in: ttl,
        })
    }

    /// Whether a session id is still recorded
    pub async fn session_is_active(
        mut redis: ConnectionManager,
        session_id: &str,
    ) -> AppResult<bool> {
        let exists: bool = redis.exists(session_key(session_id)).await?;
        Ok(exists)
    }

    /// Remove a single session
    pub async fn revoke_session(
        mut redis: ConnectionManager,
        user_id: &Uuid,
        session_id: &str,
    ) -> AppResult<()> {
        redis.del::<_, ()>(session_key(session_id)).await?;
        redis
            .srem::<_, _, ()>(user_sessions_key(user_id), session_id)
            .await?;
        Ok(())
    }

    /// Remove every session of a user, optionally keeping one
    pub async fn revoke_all_sessions(
        mut redis: ConnectionManager,
        user_id: &Uuid,
        keep: Option<&str>,
    ) -> AppResult<()> {
        let index = user_sessions_key(user_id);
        let sessions: Vec<String> = redis.smembers(&index).await?;

        for session_id in sessions.iter().filter(|s| Some(s.as_str()) != keep) {
            redis.del::<_, ()>(session_key(session_id)).await?;
            redis.srem::<_, _, ()>(&index, session_id).await?;
        }

        debug!(user_id = %user_id, revoked = sessions.len(), "Sessions revoked");
        Ok(())
    }

    /// Verify session token and extract claims
    pub fn verify_token(token: &str, secret: &str) -> AppResult<Claims> {
        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(secret.as_bytes()),
            &Validation::default(),
        )?;

        Ok(token_data.claims)
    }

    /// Hash password using Argon2
    pub fn hash_password(password: &str) -> AppResult<String> {
        let salt = SaltString::generate(&mut OsRng);
        let argon2 = Argon2::default();

        let hash = argon2
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| AppError::Internal(anyhow::anyhow!("Password hashing failed: {}", e)))?
            .to_string();

        Ok(hash)
    }

    /// Verify password against hash
    pub fn verify_password(password: &str, hash: &str) -> AppResult<bool> {
        let parsed_hash = PasswordHash::new(hash)
            .map_err(|e| AppError::Internal(anyhow::anyhow!("Invalid password hash: {}", e)))?;

        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok())
    }

    /// `Set-Cookie` value carrying a session token.
    ///
    /// Without `remember` the cookie lives until the browser closes.
    pub fn session_cookie(config: &SessionConfig, token: &str, remember: bool) -> String {
        let mut cookie = format!("{}={}; Path=/; HttpOnly; SameSite=Lax", config.cookie_name, token);
        if config.cookie_secure {
            cookie.push_str("; Secure");
        }
        if remember {
            cookie.push_str(&format!("; Max-Age={}", config.expiry_secs()));
        }
        cookie
    }

    /// `Set-Cookie` value that removes the session cookie
    pub fn clear_cookie(config: &SessionConfig) -> String {
        let mut cookie = format!("{}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0", config.cookie_name);
        if config.cookie_secure {
            cookie.push_str("; Secure");
        }
        cookie
    }

    fn generate_token(user: &User, session_id: &str, config: &SessionConfig) -> AppResult<String> {
        let now = Utc::now();
        let expires_at = now + Duration::hours(config.expiry_hours);

        let claims = Claims {
            sub: user.id.to_string(),
            email: user.email.clone(),
            role: user.role.clone(),
            jti: session_id.to_string(),
            exp: expires_at.timestamp(),
            iat: now.timestamp(),
        };

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(config.secret.as_bytes()),
        )
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Token generation failed: {}", e)))
    }
}

fn session_key(session_id: &str) -> String {
    format!("{SESSION_KEY_PREFIX}:{session_id}")
}

fn user_sessions_key(user_id: &Uuid) -> String {
    format!("{USER_SESSIONS_KEY_PREFIX}:{user_id}")
}
