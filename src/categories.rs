use log::info;
use sqlx::{SqliteConnection, SqlitePool};

use crate::error::AppError;
use crate::models::{Category, NewCategory, UpdateCategory};

const CATEGORY_COLUMNS: &str = "id, user_id, name, type, icon, color, description, created_at";

pub struct CategoryService {
    pool: SqlitePool,
}

impl CategoryService {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn list(&self, user_id: i64) -> Result<Vec<Category>, AppError> {
        let categories = sqlx::query_as::<_, Category>(&format!(
            "SELECT {} FROM categories WHERE user_id = ? ORDER BY name ASC",
            CATEGORY_COLUMNS
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(categories)
    }

    pub async fn create(&self, user_id: i64, category: NewCategory) -> Result<Category, AppError> {
        let mut conn = self.pool.acquire().await?;
        if find_by_name(&mut conn, user_id, &category.name).await?.is_some() {
            return Err(AppError::Conflict("Categoria já existe".into()));
        }

        let created = sqlx::query_as::<_, Category>(&format!(
            "INSERT INTO categories (user_id, name, type, icon, color, description)
             VALUES (?, ?, ?, ?, ?, ?)
             RETURNING {}",
            CATEGORY_COLUMNS
        ))
        .bind(user_id)
        .bind(&category.name)
        .bind(category.kind)
        .bind(&category.icon)
        .bind(&category.color)
        .bind(&category.description)
        .fetch_one(&mut *conn)
        .await
        .map_err(|e| match AppError::from(e) {
            AppError::Conflict(_) => AppError::Conflict("Categoria já existe".into()),
            other => other,
        })?;

        Ok(created)
    }

    /// Applies the update and, on a rename, moves every transaction of this
    /// user from the old name to the new one. Both writes commit together.
    pub async fn update(
        &self,
        user_id: i64,
        name: &str,
        update: UpdateCategory,
    ) -> Result<Category, AppError> {
        let mut tx = self.pool.begin().await?;

        let mut category = find_by_name(&mut *tx, user_id, name)
            .await?
            .ok_or_else(|| AppError::not_found("Categoria não encontrada"))?;

        let renamed = match update.new_name {
            Some(new_name) if new_name != category.name => {
                if find_by_name(&mut *tx, user_id, &new_name).await?.is_some() {
                    return Err(AppError::Conflict("Categoria com esse nome já existe".into()));
                }
                Some(std::mem::replace(&mut category.name, new_name))
            }
            _ => None,
        };
        if let Some(kind) = update.kind {
            category.kind = kind;
        }
        if let Some(icon) = update.icon {
            category.icon = icon;
        }
        if let Some(color) = update.color {
            category.color = color;
        }
        if let Some(description) = update.description {
            category.description = description.trim().to_string();
        }

        sqlx::query(
            "UPDATE categories SET name = ?, type = ?, icon = ?, color = ?, description = ?
             WHERE id = ? AND user_id = ?",
        )
        .bind(&category.name)
        .bind(category.kind)
        .bind(&category.icon)
        .bind(&category.color)
        .bind(&category.description)
        .bind(category.id)
        .bind(user_id)
        .execute(&mut *tx)
        .await?;

        if let Some(old_name) = &renamed {
            let moved = sqlx::query(
                "UPDATE transactions SET category = ? WHERE user_id = ? AND category = ?",
            )
            .bind(&category.name)
            .bind(user_id)
            .bind(old_name)
            .execute(&mut *tx)
            .await?;

            info!(
                "Renamed category '{}' to '{}' for user {} ({} transactions moved)",
                old_name,
                category.name,
                user_id,
                moved.rows_affected()
            );
        }

        tx.commit().await?;
        Ok(category)
    }

    /// Deletes the category and every transaction of this user tagged with it.
    pub async fn delete(&self, user_id: i64, name: &str) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await?;

        let deleted = sqlx::query("DELETE FROM categories WHERE user_id = ? AND name = ?")
            .bind(user_id)
            .bind(name)
            .execute(&mut *tx)
            .await?;

        if deleted.rows_affected() == 0 {
            return Err(AppError::not_found("Categoria não encontrada"));
        }

        let removed = sqlx::query("DELETE FROM transactions WHERE user_id = ? AND category = ?")
            .bind(user_id)
            .bind(name)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        info!(
            "Deleted category '{}' for user {} ({} transactions removed)",
            name,
            user_id,
            removed.rows_affected()
        );
        Ok(())
    }
}

async fn find_by_name(
    conn: &mut SqliteConnection,
    user_id: i64,
    name: &str,
) -> Result<Option<Category>, AppError> {
    let category = sqlx::query_as::<_, Category>(&format!(
        "SELECT {} FROM categories WHERE user_id = ? AND name = ?",
        CATEGORY_COLUMNS
    ))
    .bind(user_id)
    .bind(name)
    .fetch_optional(conn)
    .await?;

    Ok(category)
}
