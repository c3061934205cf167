use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::error::AppError;

#[derive(Debug, Serialize, FromRow)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// The fields of a user that are ever sent to a client.
#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct PublicUser {
    pub id: i64,
    pub name: String,
    pub email: String,
}

impl From<User> for PublicUser {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RegisterCredentials {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl RegisterCredentials {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.name.trim().is_empty() || self.email.trim().is_empty() || self.password.is_empty() {
            return Err(AppError::validation("Todos os campos são obrigatórios"));
        }
        if !self.email.contains('@') {
            return Err(AppError::validation("Email inválido"));
        }
        if self.password.chars().count() < 6 {
            return Err(AppError::validation("A senha deve ter no mínimo 6 caracteres"));
        }
        Ok(())
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct LoginCredentials {
    pub email: String,
    pub password: String,
}

impl LoginCredentials {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.email.trim().is_empty() || self.password.is_empty() {
            return Err(AppError::validation("Email e senha são obrigatórios"));
        }
        Ok(())
    }
}

#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub message: String,
    pub token: String,
    pub user: PublicUser,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum CategoryKind {
    Income,
    Expense,
    Both,
}

#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct Category {
    pub id: i64,
    #[serde(skip)]
    pub user_id: i64,
    pub name: String,
    #[serde(rename = "type")]
    #[sqlx(rename = "type")]
    pub kind: CategoryKind,
    pub icon: String,
    pub color: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
}

/// Categories every new account starts with: name, kind, icon, color.
pub const DEFAULT_CATEGORIES: [(&str, CategoryKind, &str, &str); 9] = [
    ("Alimentação", CategoryKind::Expense, "Utensils", "#ef4444"),
    ("Transporte", CategoryKind::Expense, "Car", "#f97316"),
    ("Moradia", CategoryKind::Expense, "Home", "#eab308"),
    ("Saúde", CategoryKind::Expense, "Heart", "#ec4899"),
    ("Lazer", CategoryKind::Expense, "Film", "#8b5cf6"),
    ("Educação", CategoryKind::Expense, "GraduationCap", "#3b82f6"),
    ("Salário", CategoryKind::Income, "Wallet", "#22c55e"),
    ("Freelance", CategoryKind::Income, "Briefcase", "#14b8a6"),
    ("Investimentos", CategoryKind::Income, "TrendingUp", "#06b6d4"),
];

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CreateCategory {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: Option<CategoryKind>,
    pub icon: String,
    pub color: String,
    pub description: String,
}

/// A create request that passed validation.
#[derive(Debug)]
pub struct NewCategory {
    pub name: String,
    pub kind: CategoryKind,
    pub icon: String,
    pub color: String,
    pub description: String,
}

impl CreateCategory {
    pub fn validate(self) -> Result<NewCategory, AppError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(AppError::validation("Nome da categoria é obrigatório"));
        }
        let kind = self
            .kind
            .ok_or_else(|| AppError::validation("Tipo deve ser income, expense ou both"))?;
        let icon = self.icon.trim();
        if icon.is_empty() {
            return Err(AppError::validation("Ícone é obrigatório"));
        }
        check_color(&self.color)?;

        Ok(NewCategory {
            name: name.to_string(),
            kind,
            icon: icon.to_string(),
            color: self.color,
            description: self.description.trim().to_string(),
        })
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct UpdateCategory {
    #[serde(alias = "name")]
    pub new_name: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<CategoryKind>,
    pub icon: Option<String>,
    pub color: Option<String>,
    pub description: Option<String>,
}

impl UpdateCategory {
    pub fn validate(mut self) -> Result<Self, AppError> {
        if self.new_name.is_none()
            && self.kind.is_none()
            && self.icon.is_none()
            && self.color.is_none()
            && self.description.is_none()
        {
            return Err(AppError::validation("Nenhuma alteração informada"));
        }
        if let Some(name) = self.new_name.as_mut() {
            *name = name.trim().to_string();
            if name.is_empty() {
                return Err(AppError::validation("Novo nome é obrigatório"));
            }
        }
        if let Some(icon) = self.icon.as_mut() {
            *icon = icon.trim().to_string();
            if icon.is_empty() {
                return Err(AppError::validation("Ícone é obrigatório"));
            }
        }
        if let Some(color) = &self.color {
            check_color(color)?;
        }
        Ok(self)
    }
}

fn check_color(color: &str) -> Result<(), AppError> {
    let valid = color.len() == 7
        && color.starts_with('#')
        && color[1..].chars().all(|c| c.is_ascii_hexdigit());
    if valid {
        Ok(())
    } else {
        Err(AppError::validation("Cor deve estar no formato #RRGGBB"))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum TransactionKind {
    Income,
    Expense,
}

#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct Transaction {
    pub id: i64,
    #[serde(skip)]
    pub user_id: i64,
    #[serde(rename = "type")]
    #[sqlx(rename = "type")]
    pub kind: TransactionKind,
    pub description: String,
    pub amount: f64,
    pub category: String,
    pub date: NaiveDate,
    pub created_at: DateTime<Utc>,
}

/// Body of both transaction create and update.
///
/// `type` stays a raw string so an unknown value gets its own message
/// instead of a generic JSON error.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct TransactionInput {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub description: Option<String>,
    pub amount: Option<f64>,
    pub category: Option<String>,
    pub date: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TransactionFields {
    pub kind: TransactionKind,
    pub description: String,
    pub amount: f64,
    pub category: String,
    pub date: NaiveDate,
}

impl TransactionInput {
    pub fn validate(self) -> Result<TransactionFields, AppError> {
        let required = || AppError::validation("Todos os campos são obrigatórios");

        let kind = self.kind.filter(|k| !k.is_empty()).ok_or_else(required)?;
        let description = self
            .description
            .map(|d| d.trim().to_string())
            .filter(|d| !d.is_empty())
            .ok_or_else(required)?;
        let amount = self.amount.ok_or_else(required)?;
        let category = self
            .category
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty())
            .ok_or_else(required)?;
        let date = self.date.filter(|d| !d.is_empty()).ok_or_else(required)?;

        let kind = match kind.as_str() {
            "income" => TransactionKind::Income,
            "expense" => TransactionKind::Expense,
            _ => return Err(AppError::validation("Tipo deve ser income ou expense")),
        };
        if !(amount.is_finite() && amount > 0.0) {
            return Err(AppError::validation("O valor deve ser maior que zero"));
        }
        let date = NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d")
            .map_err(|_| AppError::validation("Data inválida, use o formato AAAA-MM-DD"))?;

        Ok(TransactionFields {
            kind,
            description,
            amount,
            category,
            date,
        })
    }
}

#[derive(Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyLimit {
    pub monthly_limit: f64,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MonthlyLimitInput {
    pub monthly_limit: Option<f64>,
}

impl MonthlyLimitInput {
    pub fn validate(self) -> Result<f64, AppError> {
        let limit = self
            .monthly_limit
            .ok_or_else(|| AppError::validation("Limite mensal é obrigatório"))?;
        if !limit.is_finite() || limit < 0.0 {
            return Err(AppError::validation("Limite mensal não pode ser negativo"));
        }
        Ok(limit)
    }
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn error_message(err: AppError) -> String {
        err.to_string()
    }

    #[test]
    fn register_requires_every_field() {
        let creds = RegisterCredentials {
            name: "Ana".into(),
            email: String::new(),
            password: "abcdef".into(),
        };
        assert_eq!(
            error_message(creds.validate().unwrap_err()),
            "Todos os campos são obrigatórios"
        );
    }

    #[test]
    fn register_rejects_short_password() {
        let creds = RegisterCredentials {
            name: "Ana".into(),
            email: "ana@x.com".into(),
            password: "abc".into(),
        };
        assert_eq!(
            error_message(creds.validate().unwrap_err()),
            "A senha deve ter no mínimo 6 caracteres"
        );
    }

    #[test]
    fn register_accepts_six_characters() {
        let creds = RegisterCredentials {
            name: "Ana".into(),
            email: "ana@x.com".into(),
            password: "abcdef".into(),
        };
        assert!(creds.validate().is_ok());
    }

    #[test]
    fn transaction_input_parses_the_scenario_body() {
        let input: TransactionInput = serde_json::from_value(serde_json::json!({
            "type": "expense",
            "description": "Market",
            "amount": 50,
            "category": "Alimentação",
            "date": "2025-01-01"
        }))
        .unwrap();

        let fields = input.validate().unwrap();
        assert_eq!(fields.kind, TransactionKind::Expense);
        assert_eq!(fields.amount, 50.0);
        assert_eq!(fields.date, NaiveDate::from_ymd_opt(2025, 1, 1).unwrap());
    }

    #[test]
    fn transaction_input_rejects_bad_values() {
        let base = || TransactionInput {
            kind: Some("expense".into()),
            description: Some("Market".into()),
            amount: Some(10.0),
            category: Some("Lazer".into()),
            date: Some("2025-01-01".into()),
        };

        let mut missing = base();
        missing.category = None;
        assert_eq!(
            error_message(missing.validate().unwrap_err()),
            "Todos os campos são obrigatórios"
        );

        let mut bad_kind = base();
        bad_kind.kind = Some("transfer".into());
        assert_eq!(
            error_message(bad_kind.validate().unwrap_err()),
            "Tipo deve ser income ou expense"
        );

        let mut zero = base();
        zero.amount = Some(0.0);
        assert!(zero.validate().is_err());

        let mut negative = base();
        negative.amount = Some(-3.0);
        assert!(negative.validate().is_err());

        let mut bad_date = base();
        bad_date.date = Some("01/01/2025".into());
        assert!(bad_date.validate().is_err());
    }

    #[test]
    fn update_category_accepts_name_alias() {
        let update: UpdateCategory =
            serde_json::from_value(serde_json::json!({ "name": "Mercado" })).unwrap();
        assert_eq!(update.validate().unwrap().new_name.as_deref(), Some("Mercado"));

        let update: UpdateCategory =
            serde_json::from_value(serde_json::json!({ "newName": "Mercado" })).unwrap();
        assert_eq!(update.validate().unwrap().new_name.as_deref(), Some("Mercado"));
    }

    #[test]
    fn update_category_rejects_empty_changes() {
        let empty = UpdateCategory::default();
        assert!(empty.validate().is_err());

        let blank = UpdateCategory {
            new_name: Some("  ".into()),
            ..Default::default()
        };
        assert_eq!(
            error_message(blank.validate().unwrap_err()),
            "Novo nome é obrigatório"
        );
    }

    #[test]
    fn create_category_checks_color() {
        let create = CreateCategory {
            name: "Pets".into(),
            kind: Some(CategoryKind::Expense),
            icon: "Heart".into(),
            color: "red".into(),
            description: String::new(),
        };
        assert!(create.validate().is_err());

        let create = CreateCategory {
            name: " Pets ".into(),
            kind: Some(CategoryKind::Both),
            icon: "Heart".into(),
            color: "#A1b2C3".into(),
            description: String::new(),
        };
        assert_eq!(create.validate().unwrap().name, "Pets");
    }

    #[test]
    fn monthly_limit_must_be_non_negative() {
        assert!(MonthlyLimitInput { monthly_limit: None }.validate().is_err());
        assert!(MonthlyLimitInput { monthly_limit: Some(-10.0) }.validate().is_err());
        assert_eq!(MonthlyLimitInput { monthly_limit: Some(0.0) }.validate().unwrap(), 0.0);
        assert_eq!(MonthlyLimitInput { monthly_limit: Some(1500.5) }.validate().unwrap(), 1500.5);
    }
}
