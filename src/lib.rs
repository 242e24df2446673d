// @file: src/lib.rs
// @description: Exposes the REST client, its data model and configuration for the binary and for tests.
// @author: LAS.

pub mod core;
pub mod connectors;
pub mod utils;
mod tests;

pub use crate::connectors::binance_rest::BinanceRestClient;
pub use crate::core::errors::{ClientError, KlineDecodeError};
pub use crate::core::interfaces::MarketDataSource;
pub use crate::core::models::{ClientConfig, ExchangeInfo, Kline, KlineResponse, PriceTicker};
pub use crate::utils::config::{clear_proxy, global_proxy, set_proxy, AppConfig};
