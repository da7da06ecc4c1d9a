use anyhow::{anyhow, Result};
use std::sync::Arc;

use crate::models::Settings;
use crate::services::api::{ApiService, DEFAULT_API_URL};

pub const API_URL_VAR: &str = "API_URL";

/// Shared by every chart container. The client is stateless apart from its
/// base URL, so one instance serves the whole dashboard.
#[derive(Clone)]
pub struct AppState {
    pub api: Arc<ApiService>,
    pub settings: Settings,
}

impl AppState {
    pub fn new(settings: Settings) -> Self {
        AppState {
            api: Arc::new(ApiService::new(settings.api_url.clone())),
            settings,
        }
    }
}

pub fn load_settings() -> Result<Settings> {
    dotenvy::dotenv().ok();
    settings_from(std::env::var(API_URL_VAR).ok())
}

fn settings_from(api_url: Option<String>) -> Result<Settings> {
    let api_url = api_url
        .map(|url| url.trim().to_string())
        .filter(|url| !url.is_empty())
        .unwrap_or_else(|| DEFAULT_API_URL.to_string());

    if !(api_url.starts_with("http://") || api_url.starts_with("https://")) {
        return Err(anyhow!("{} must be an http(s) URL, got {}", API_URL_VAR, api_url));
    }

    Ok(Settings {
        api_url: api_url.trim_end_matches('/').to_string(),
    })
}
