use actix_web::{middleware::Logger, App, HttpServer};
use anyhow::Context;
use env_logger::Env;
use log::{info, warn};

use conta_em_paz::config::Config;
use conta_em_paz::{db, routes, AppServices};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let config = Config::from_env().context("Failed to load configuration")?;
    if config.jwt_secret.len() < 32 {
        warn!("JWT_SECRET is shorter than 32 characters");
    }

    let pool = db::connect(&config.database_url, config.db_max_connections)
        .await
        .context("Failed to create pool")?;

    db::migrate(&pool).await.context("Failed to run migrations")?;

    let services = AppServices::from_config(pool, &config);
    let bind_addr = (config.host.clone(), config.port);
    info!("Starting server at http://{}:{}", config.host, config.port);

    HttpServer::new(move || {
        let services = services.clone();
        App::new()
            .wrap(routes::cors())
            .wrap(Logger::default())
            .configure(move |cfg| services.configure(cfg))
    })
    .bind(bind_addr)?
    .run()
    .await?;

    Ok(())
}
