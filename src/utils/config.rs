// @file: src/utils/config.rs
// @description: Layered application configuration and the process-wide proxy default.
// @author: LAS.

use serde::Deserialize;
use config::{Config, ConfigError, File, Environment};
use log::info;
use std::sync::RwLock;
use crate::core::models::{ClientConfig, DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS};


//
// GLOBAL PROXY
//
// Set once during startup, before the first client is constructed.
// Clients built earlier keep whatever transport they were built with.

static GLOBAL_PROXY: RwLock<Option<String>> = RwLock::new(None);

pub fn set_proxy(proxy_url: &str) {
    let value: Option<String> = if proxy_url.is_empty() { None } else { Some(proxy_url.to_string()) };
    let mut guard = GLOBAL_PROXY.write().unwrap_or_else(|poisoned| poisoned.into_inner());
    *guard = value;
    info!("Market data proxy set: {}", proxy_url);
}

pub fn clear_proxy() {
    let mut guard = GLOBAL_PROXY.write().unwrap_or_else(|poisoned| poisoned.into_inner());
    *guard = None;
}

pub fn global_proxy() -> Option<String> {
    GLOBAL_PROXY
        .read()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
        .clone()
}


//
// TYPE DEFINITIONS
//

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub log_level: String,

    // Transport
    pub base_url: String,
    pub proxy_url: Option<String>,
    pub timeout_secs: u64,

    // Demo Defaults
    pub default_symbol: String,
    pub default_interval: String,
    pub default_kline_limit: usize,
}

impl AppConfig {
    //
    // PUBLIC INTERFACE
    //

    pub fn load() -> Result<Self, ConfigError> {
        let builder = Config::builder()
            .set_default("log_level", "info")?
            .set_default("base_url", DEFAULT_BASE_URL)?
            .set_default("timeout_secs", DEFAULT_TIMEOUT_SECS)?
            .set_default("default_symbol", "BTCUSDT")?
            .set_default("default_interval", "1h")?
            .set_default("default_kline_limit", 100)?

            // File & Env Overrides
            .add_source(File::with_name("market_client").required(false))
            .add_source(Environment::with_prefix("MARKET"));

        let config = builder.build()?;
        config.try_deserialize()
    }

    pub fn client_config(&self) -> ClientConfig {
        // An explicit proxy wins; otherwise fall back to the process-wide one
        let proxy_url: Option<String> = self.proxy_url
            .clone()
            .filter(|p| !p.is_empty())
            .or_else(global_proxy);

        ClientConfig {
            base_url: self.base_url.clone(),
            proxy_url,
            timeout_secs: self.timeout_secs,
        }
    }
}
