use log::info;
use sqlx::SqlitePool;

use crate::error::AppError;

pub struct SettingsService {
    pool: SqlitePool,
}

impl SettingsService {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Returns the stored limit, creating a zero-valued row on first read.
    pub async fn monthly_limit(&self, user_id: i64) -> Result<f64, AppError> {
        sqlx::query("INSERT OR IGNORE INTO user_settings (user_id, monthly_limit) VALUES (?, 0)")
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        let limit = sqlx::query_scalar::<_, f64>("SELECT monthly_limit FROM user_settings WHERE user_id = ?")
            .bind(user_id)
            .fetch_one(&self.pool)
            .await?;

        Ok(limit)
    }

    pub async fn set_monthly_limit(&self, user_id: i64, limit: f64) -> Result<f64, AppError> {
        sqlx::query(
            "INSERT INTO user_settings (user_id, monthly_limit) VALUES (?, ?)
             ON CONFLICT(user_id) DO UPDATE SET
                 monthly_limit = excluded.monthly_limit,
                 updated_at = CURRENT_TIMESTAMP",
        )
        .bind(user_id)
        .bind(limit)
        .execute(&self.pool)
        .await?;

        info!("Monthly limit for user {} set to {}", user_id, limit);
        Ok(limit)
    }
}
