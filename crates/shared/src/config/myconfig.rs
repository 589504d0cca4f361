use anyhow::{Context, Result, anyhow};
use rust_decimal::Decimal;

#[derive(Debug, Clone)]
pub struct StripeConfig {
    pub secret_key: String,
    pub webhook_secret: String,
    pub success_url: String,
    pub cancel_url: String,
}

impl StripeConfig {
    pub fn init() -> Result<Self> {
        let secret_key = std::env::var("STRIPE_SECRET_KEY")
            .context("Missing environment variable: STRIPE_SECRET_KEY")?;

        let webhook_secret = std::env::var("STRIPE_WEBHOOK_SECRET")
            .context("Missing environment variable: STRIPE_WEBHOOK_SECRET")?;

        let success_url = std::env::var("CHECKOUT_SUCCESS_URL")
            .context("Missing environment variable: CHECKOUT_SUCCESS_URL")?;

        let cancel_url = std::env::var("CHECKOUT_CANCEL_URL")
            .context("Missing environment variable: CHECKOUT_CANCEL_URL")?;

        Ok(Self {
            secret_key,
            webhook_secret,
            success_url,
            cancel_url,
        })
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    pub jwt_secret: String,
    pub db_min_conn: u32,
    pub db_max_conn: u32,
    pub run_migrations: bool,
    pub vat_default: Decimal,
    pub stripe: StripeConfig,
}

impl Config {
    pub fn init() -> Result<Self> {
        let database_url =
            std::env::var("DATABASE_URL").context("Missing environment variable: DATABASE_URL")?;

        let jwt_secret =
            std::env::var("JWT_SECRET").context("Missing environment variable: JWT_SECRET")?;

        let port = std::env::var("PORT")
            .context("Missing environment variable: PORT")?
            .parse::<u16>()
            .context("PORT must be a valid u16 integer")?;

        let db_min_conn = std::env::var("DB_MIN_CONN")
            .unwrap_or_else(|_| "1".to_string())
            .parse::<u32>()
            .context("DB_MIN_CONN must be a valid u32 integer")?;

        let db_max_conn = std::env::var("DB_MAX_CONN")
            .unwrap_or_else(|_| "10".to_string())
            .parse::<u32>()
            .context("DB_MAX_CONN must be a valid u32 integer")?;

        let run_migrations = match std::env::var("RUN_MIGRATIONS")
            .unwrap_or_else(|_| "false".to_string())
            .as_str()
        {
            "true" => true,
            "false" => false,
            other => {
                return Err(anyhow!(
                    "RUN_MIGRATIONS must be 'true' or 'false', got '{}'",
                    other
                ));
            }
        };

        let vat_default = std::env::var("VAT_DEFAULT")
            .unwrap_or_else(|_| "5.5".to_string())
            .parse::<Decimal>()
            .map_err(|e| anyhow!("VAT_DEFAULT must be a decimal percentage: {e}"))?;

        let stripe = StripeConfig::init().context("failed stripe config")?;

        Ok(Self {
            database_url,
            port,
            jwt_secret,
            db_min_conn,
            db_max_conn,
            run_migrations,
            vat_default,
            stripe,
        })
    }
}
