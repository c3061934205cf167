use bcrypt::{hash, verify};
use log::{info, warn};
use sqlx::SqlitePool;

use crate::error::AppError;
use crate::models::{
    AuthResponse, LoginCredentials, PublicUser, RegisterCredentials, User, DEFAULT_CATEGORIES,
};
use crate::token::TokenCodec;

pub struct AuthService {
    pool: SqlitePool,
    tokens: TokenCodec,
    bcrypt_cost: u32,
}

impl AuthService {
    pub fn new(pool: SqlitePool, tokens: TokenCodec, bcrypt_cost: u32) -> Self {
        Self {
            pool,
            tokens,
            bcrypt_cost,
        }
    }

    pub fn tokens(&self) -> &TokenCodec {
        &self.tokens
    }

    /// Creates the user together with its default categories and settings.
    pub async fn register(&self, creds: RegisterCredentials) -> Result<AuthResponse, AppError> {
        creds.validate()?;
        let name = creds.name.trim();
        let email = creds.email.trim();

        let existing_user = sqlx::query_scalar::<_, i64>("SELECT id FROM users WHERE email = ?")
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;

        if existing_user.is_some() {
            warn!("User with email {} already exists", email);
            return Err(AppError::Conflict("Email já cadastrado".into()));
        }

        let password_hash = hash(creds.password.as_bytes(), self.bcrypt_cost)?;

        let mut tx = self.pool.begin().await?;

        let user = sqlx::query_as::<_, PublicUser>(
            "INSERT INTO users (name, email, password_hash) VALUES (?, ?, ?) RETURNING id, name, email",
        )
        .bind(name)
        .bind(email)
        .bind(&password_hash)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| match AppError::from(e) {
            // Lost a race with a concurrent registration for the same email.
            AppError::Conflict(_) => AppError::Conflict("Email já cadastrado".into()),
            other => other,
        })?;

        for (category, kind, icon, color) in DEFAULT_CATEGORIES {
            sqlx::query(
                "INSERT INTO categories (user_id, name, type, icon, color) VALUES (?, ?, ?, ?, ?)",
            )
            .bind(user.id)
            .bind(category)
            .bind(kind)
            .bind(icon)
            .bind(color)
            .execute(&mut *tx)
            .await?;
        }

        sqlx::query("INSERT INTO user_settings (user_id, monthly_limit) VALUES (?, 0)")
            .bind(user.id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        let token = self.tokens.issue(user.id, &user.email)?;
        info!("User registered successfully: {}", user.email);
        Ok(AuthResponse {
            message: "Usuário criado com sucesso".into(),
            token,
            user,
        })
    }

    pub async fn login(&self, creds: LoginCredentials) -> Result<AuthResponse, AppError> {
        creds.validate()?;
        let email = creds.email.trim();

        let user = sqlx::query_as::<_, User>(
            "SELECT id, name, email, password_hash, created_at FROM users WHERE email = ?",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| {
            warn!("Login attempt for unknown user: {}", email);
            AppError::InvalidCredentials
        })?;

        if !verify(creds.password.as_bytes(), &user.password_hash)? {
            warn!("Invalid password for user: {}", email);
            return Err(AppError::InvalidCredentials);
        }

        let token = self.tokens.issue(user.id, &user.email)?;
        info!("User logged in successfully: {}", user.email);
        Ok(AuthResponse {
            message: "Login realizado com sucesso".into(),
            token,
            user: user.into(),
        })
    }

    pub async fn find_user(&self, user_id: i64) -> Result<PublicUser, AppError> {
        sqlx::query_as::<_, PublicUser>("SELECT id, name, email FROM users WHERE id = ?")
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::not_found("Usuário não encontrado"))
    }

    /// Removes the account; owned rows follow through the foreign-key cascades.
    pub async fn delete_account(&self, user_id: i64) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await?;

        let deleted = sqlx::query("DELETE FROM users WHERE id = ?")
            .bind(user_id)
            .execute(&mut *tx)
            .await?;

        if deleted.rows_affected() == 0 {
            return Err(AppError::not_found("Usuário não encontrado"));
        }

        tx.commit().await?;
        info!("Deleted account for user ID: {}", user_id);
        Ok(())
    }
}
