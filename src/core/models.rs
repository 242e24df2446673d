// @file: src/core/models.rs
// @description: Client configuration plus the typed records decoded from the futures REST API.
// @author: LAS.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use crate::utils::config::global_proxy;


//
// CONSTANTS
//

pub const DEFAULT_BASE_URL: &str = "https://fapi.binance.com";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

// A kline array must carry at least this many positional fields
pub const KLINE_FIELD_COUNT: usize = 11;


//
// CONFIGURATION
//

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientConfig {
    pub base_url: String,
    pub proxy_url: Option<String>,
    pub timeout_secs: u64,
}

impl Default for ClientConfig {
    // #1. Compatibility with the process-wide proxy setting
    // Whatever was passed to `set_proxy` before this point becomes the default proxy.
    fn default() -> Self {
        ClientConfig {
            base_url: DEFAULT_BASE_URL.to_string(),
            proxy_url: global_proxy(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl ClientConfig {
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_proxy(mut self, proxy_url: impl Into<String>) -> Self {
        let proxy_url: String = proxy_url.into();
        self.proxy_url = if proxy_url.is_empty() { None } else { Some(proxy_url) };
        self
    }

    pub fn without_proxy(mut self) -> Self {
        self.proxy_url = None;
        self
    }

    pub fn with_timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }
}


//
// MARKET DATA RECORDS
//

/// One candlestick, decoded from the positional wire array.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Kline {
    pub open_time: i64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
    pub close_time: i64,
    pub quote_volume: f64,
    pub trades: i64,
    pub taker_buy_base_volume: f64,
    pub taker_buy_quote_volume: f64,
}

/// Raw kline as sent by the exchange: a mixed array of numbers and numeric strings.
pub type KlineResponse = Vec<Value>;

#[derive(Debug, Clone, Deserialize)]
pub struct PriceTicker {
    #[serde(default)]
    pub symbol: Option<String>,
    pub price: String,
}

// Shape of the exchange's error payload, e.g. {"code":-1121,"msg":"Invalid symbol."}
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorBody {
    pub code: i64,
    pub msg: String,
}


//
// EXCHANGE METADATA
//

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ExchangeInfo {
    pub timezone: String,
    pub server_time: i64,
    pub rate_limits: Vec<RateLimit>,
    pub symbols: Vec<SymbolInfo>,
}

impl ExchangeInfo {
    pub fn symbol(&self, name: &str) -> Option<&SymbolInfo> {
        self.symbols.iter().find(|s| s.symbol == name)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RateLimit {
    pub rate_limit_type: String,
    pub interval: String,
    pub interval_num: u32,
    pub limit: u32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SymbolInfo {
    pub symbol: String,
    pub pair: String,
    pub contract_type: String,
    pub status: String,
    pub base_asset: String,
    pub quote_asset: String,
    pub margin_asset: String,
    pub price_precision: u32,
    pub quantity_precision: u32,
    // Filters vary per type (PRICE_FILTER, LOT_SIZE, ...); kept as raw JSON
    pub filters: Vec<Value>,
}
