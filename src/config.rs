use std::{env, path::PathBuf};

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub cart_storage_dir: PathBuf,
    pub jwt_secret: String,
    pub currency_symbol: String,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let jwt_secret = env::var("JWT_SECRET")
            .map_err(|_| anyhow::anyhow!("JWT_SECRET is not set"))?;
        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .ok()
            .and_then(|p| p.parse::<u16>().ok())
            .unwrap_or(3000);
        let cart_storage_dir = env::var("CART_STORAGE_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("./data/carts"));
        let currency_symbol = env::var("CURRENCY_SYMBOL").unwrap_or_else(|_| "₹".to_string());
        Ok(Self {
            host,
            port,
            cart_storage_dir,
            jwt_secret,
            currency_symbol,
        })
    }
}
