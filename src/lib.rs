pub mod auth;
pub mod categories;
pub mod config;
pub mod db;
pub mod error;
pub mod extract;
pub mod models;
pub mod routes;
pub mod settings;
pub mod token;
pub mod transactions;

use actix_web::web;
use chrono::Duration;
use sqlx::SqlitePool;

use auth::AuthService;
use categories::CategoryService;
use config::Config;
use settings::SettingsService;
use token::TokenCodec;
use transactions::TransactionService;

/// Every service the handlers depend on, built once and shared by all workers.
#[derive(Clone)]
pub struct AppServices {
    auth: web::Data<AuthService>,
    categories: web::Data<CategoryService>,
    transactions: web::Data<TransactionService>,
    settings: web::Data<SettingsService>,
}

impl AppServices {
    pub fn new(pool: SqlitePool, jwt_secret: &str, jwt_expires_in: Duration, bcrypt_cost: u32) -> Self {
        let tokens = TokenCodec::new(jwt_secret, jwt_expires_in);
        Self {
            auth: web::Data::new(AuthService::new(pool.clone(), tokens, bcrypt_cost)),
            categories: web::Data::new(CategoryService::new(pool.clone())),
            transactions: web::Data::new(TransactionService::new(pool.clone())),
            settings: web::Data::new(SettingsService::new(pool)),
        }
    }

    pub fn from_config(pool: SqlitePool, config: &Config) -> Self {
        Self::new(pool, &config.jwt_secret, config.jwt_expires_in, config.bcrypt_cost)
    }

    /// Registers the services and all `/api` routes on an app.
    pub fn configure(&self, cfg: &mut web::ServiceConfig) {
        cfg.app_data(self.auth.clone())
            .app_data(self.categories.clone())
            .app_data(self.transactions.clone())
            .app_data(self.settings.clone())
            .configure(routes::config);
    }
}
