use serde::Deserialize;
use anyhow::{Result, anyhow};

use crate::payment::uri::{DEFAULT_QR_SERVICE_URL, DEFAULT_QR_SIZE};

pub const DEFAULT_MERCHANT_NAME: &str = "MERCADO ONLINE";
pub const DEFAULT_MERCHANT_CITY: &str = "SuaCidade";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub supabase_url: String,
    pub supabase_anon_key: String,
    pub supabase_service_role_key: String,
    pub merchant: MerchantConfig,
    pub http_host: String,
    pub http_port: u16,
}

/// Receiving side of every charge the store issues.
#[derive(Debug, Clone, Deserialize)]
pub struct MerchantConfig {
    pub pix_key: String,
    pub name: String,
    pub city: String,
    pub qr_service_url: String,
    pub qr_size: u32,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenv::dotenv().ok();

        Ok(Config {
            supabase_url: std::env::var("SUPABASE_URL")
                .map_err(|_| anyhow!("SUPABASE_URL not set"))?,
            supabase_anon_key: std::env::var("SUPABASE_ANON_KEY")
                .map_err(|_| anyhow!("SUPABASE_ANON_KEY not set"))?,
            supabase_service_role_key: std::env::var("SUPABASE_SERVICE_ROLE_KEY")
                .map_err(|_| anyhow!("SUPABASE_SERVICE_ROLE_KEY not set"))?,
            merchant: MerchantConfig::from_env()?,
            http_host: std::env::var("HTTP_HOST")
                .unwrap_or_else(|_| "127.0.0.1".to_string()),
            http_port: std::env::var("HTTP_PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .map_err(|e| anyhow!("Invalid HTTP_PORT: {}", e))?,
        })
    }
}

impl MerchantConfig {
    pub fn from_env() -> Result<Self> {
        Ok(MerchantConfig {
            pix_key: std::env::var("PIX_KEY")
                .map_err(|_| anyhow!("PIX_KEY not set"))?,
            name: std::env::var("MERCHANT_NAME")
                .unwrap_or_else(|_| DEFAULT_MERCHANT_NAME.to_string()),
            city: std::env::var("MERCHANT_CITY")
                .unwrap_or_else(|_| DEFAULT_MERCHANT_CITY.to_string()),
            qr_service_url: std::env::var("QR_SERVICE_URL")
                .unwrap_or_else(|_| DEFAULT_QR_SERVICE_URL.to_string()),
            qr_size: std::env::var("QR_SIZE")
                .unwrap_or_else(|_| DEFAULT_QR_SIZE.to_string())
                .parse()
                .map_err(|e| anyhow!("Invalid QR_SIZE: {}", e))?,
        })
    }
}
