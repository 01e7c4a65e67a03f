// demos/storefront/src/config.rs

use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::env;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct AppConfig {
  /// Backend origin, e.g. `http://172.16.2.176:8080`. The `/api` prefix is
  /// appended by the gateway.
  pub base_url: String,
  /// Where the JSON snapshot store lives on disk.
  pub store_path: PathBuf,
}

impl AppConfig {
  pub fn from_env() -> Result<Self> {
    dotenv().ok(); // Load .env file if present

    let base_url = env::var("STOREFRONT_BASE_URL").unwrap_or_else(|_| "http://127.0.0.1:8080".to_string());

    let store_path = match env::var("STOREFRONT_STORE_PATH") {
      Ok(path) => PathBuf::from(path),
      Err(_) => {
        let home = env::var("HOME").context("neither STOREFRONT_STORE_PATH nor HOME is set")?;
        PathBuf::from(home).join(".storefront-store.json")
      }
    };

    tracing::info!(%base_url, store_path = %store_path.display(), "configuration loaded");
    Ok(Self { base_url, store_path })
  }
}
