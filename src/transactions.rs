use sqlx::SqlitePool;

use crate::error::AppError;
use crate::models::{Transaction, TransactionFields};

const TRANSACTION_COLUMNS: &str = "id, user_id, type, description, amount, category, date, created_at";

pub struct TransactionService {
    pool: SqlitePool,
}

impl TransactionService {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Newest first: by date, then by insertion.
    pub async fn list(&self, user_id: i64) -> Result<Vec<Transaction>, AppError> {
        let transactions = sqlx::query_as::<_, Transaction>(&format!(
            "SELECT {} FROM transactions WHERE user_id = ?
             ORDER BY date DESC, created_at DESC, id DESC",
            TRANSACTION_COLUMNS
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(transactions)
    }

    pub async fn create(&self, user_id: i64, fields: TransactionFields) -> Result<Transaction, AppError> {
        let transaction = sqlx::query_as::<_, Transaction>(&format!(
            "INSERT INTO transactions (user_id, type, description, amount, category, date)
             VALUES (?, ?, ?, ?, ?, ?)
             RETURNING {}",
            TRANSACTION_COLUMNS
        ))
        .bind(user_id)
        .bind(fields.kind)
        .bind(&fields.description)
        .bind(fields.amount)
        .bind(&fields.category)
        .bind(fields.date)
        .fetch_one(&self.pool)
        .await?;

        Ok(transaction)
    }

    pub async fn update(
        &self,
        user_id: i64,
        id: i64,
        fields: TransactionFields,
    ) -> Result<Transaction, AppError> {
        sqlx::query_as::<_, Transaction>(&format!(
            "UPDATE transactions SET type = ?, description = ?, amount = ?, category = ?, date = ?
             WHERE id = ? AND user_id = ?
             RETURNING {}",
            TRANSACTION_COLUMNS
        ))
        .bind(fields.kind)
        .bind(&fields.description)
        .bind(fields.amount)
        .bind(&fields.category)
        .bind(fields.date)
        .bind(id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::not_found("Transação não encontrada"))
    }

    pub async fn delete(&self, user_id: i64, id: i64) -> Result<(), AppError> {
        let deleted = sqlx::query("DELETE FROM transactions WHERE id = ? AND user_id = ?")
            .bind(id)
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        if deleted.rows_affected() == 0 {
            return Err(AppError::not_found("Transação não encontrada"));
        }
        Ok(())
    }
}
