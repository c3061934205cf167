use std::env;

use anyhow::{anyhow, bail, Context, Result};
use chrono::Duration;

const MAX_TOKEN_LIFETIME_DAYS: i64 = 365;

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub db_max_connections: u32,
    pub jwt_secret: String,
    pub jwt_expires_in: Duration,
    pub bcrypt_cost: u32,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from any key/value source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = lookup("HOST").unwrap_or_else(|| "127.0.0.1".into());

        let port = lookup("PORT")
            .unwrap_or_else(|| "3001".into())
            .parse::<u16>()
            .context("Invalid PORT")?;

        let database_url = lookup("DATABASE_URL")
            .filter(|url| !url.trim().is_empty())
            .ok_or_else(|| anyhow!("DATABASE_URL must be set"))?;

        let db_max_connections = lookup("DB_MAX_CONNECTIONS")
            .unwrap_or_else(|| "5".into())
            .parse::<u32>()
            .context("Invalid DB_MAX_CONNECTIONS")?;

        let jwt_secret = lookup("JWT_SECRET")
            .filter(|secret| !secret.trim().is_empty())
            .ok_or_else(|| anyhow!("JWT_SECRET must be set"))?;

        let jwt_expires_in = parse_duration(&lookup("JWT_EXPIRES_IN").unwrap_or_else(|| "7d".into()))
            .map_err(|e| anyhow!("Invalid JWT_EXPIRES_IN: {}", e))?;

        let bcrypt_cost = lookup("BCRYPT_COST")
            .unwrap_or_else(|| "10".into())
            .parse::<u32>()
            .context("Invalid BCRYPT_COST")?;
        if !(4..=31).contains(&bcrypt_cost) {
            bail!("BCRYPT_COST must be between 4 and 31");
        }

        Ok(Self {
            host,
            port,
            database_url,
            db_max_connections,
            jwt_secret,
            jwt_expires_in,
            bcrypt_cost,
        })
    }
}

fn parse_duration(duration_str: &str) -> Result<Duration, &'static str> {
    let duration_str = duration_str.trim();

    if duration_str.is_empty() {
        return Err("Duration string is empty");
    }

    let (num_part, unit_part) = duration_str.split_at(
        duration_str
            .chars()
            .position(|c| !c.is_ascii_digit())
            .unwrap_or(duration_str.len()),
    );

    let num = num_part.parse::<i64>().map_err(|_| "Invalid number")?;
    if num == 0 {
        return Err("Duration must be positive");
    }

    let duration = match unit_part {
        "s" => Duration::try_seconds(num),
        "m" => Duration::try_minutes(num),
        "h" => Duration::try_hours(num),
        "d" => Duration::try_days(num),
        _ => return Err("Unknown time unit, use s, m, h, or d"),
    };

    duration
        .filter(|d| *d <= max_token_lifetime())
        .ok_or("Duration must not exceed 365 days")
}

fn max_token_lifetime() -> Duration {
    Duration::days(MAX_TOKEN_LIFETIME_DAYS)
}
