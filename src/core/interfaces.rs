// @file: src/core/interfaces.rs
// @description: Defines the synchronous market data source trait.
// @author: LAS.

use crate::core::errors::ClientError;
use crate::core::models::{ExchangeInfo, Kline};

//
// TRAIT DEFINITIONS
//

pub trait MarketDataSource {
    // #1. Instrument metadata, passed through untouched
    fn get_exchange_info(&self) -> Result<ExchangeInfo, ClientError>;

    // #2. Historical candles in exchange order; malformed records are skipped
    fn get_klines(&self, symbol: &str, interval: &str, limit: usize) -> Result<Vec<Kline>, ClientError>;

    // #3. Latest traded price
    fn get_current_price(&self, symbol: &str) -> Result<f64, ClientError>;
}
