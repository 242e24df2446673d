// @file: src/connectors/binance_rest.rs
// @description: Blocking HTTP client for USDT-M futures metadata, historical klines and spot prices.
// @author: LAS.

use reqwest::blocking::Client;
use reqwest::{Proxy, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use url::Url;
use log::{debug, info, warn};
use std::time::Duration;
use crate::core::errors::{ClientError, KlineDecodeError};
use crate::core::interfaces::MarketDataSource;
use crate::core::models::{
    ApiErrorBody, ClientConfig, ExchangeInfo, Kline, KlineResponse, PriceTicker, KLINE_FIELD_COUNT,
};


//
// ROUTES
//

const EXCHANGE_INFO_PATH: &str = "/fapi/v1/exchangeInfo";
const KLINES_PATH: &str = "/fapi/v1/klines";
const TICKER_PRICE_PATH: &str = "/fapi/v1/ticker/price";


//
// CLIENT
//

pub struct BinanceRestClient {
    http: Client,
    base_url: String,
    proxy: Option<Url>,
}

impl BinanceRestClient {
    //
    // INITIALIZATION
    //

    /// Builds a client from the default configuration, which picks up the process-wide proxy.
    pub fn new() -> Result<Self, ClientError> {
        Self::with_config(ClientConfig::default())
    }

    pub fn with_config(config: ClientConfig) -> Result<Self, ClientError> {
        // #1. Base transport
        // Environment proxy variables are ignored; only an explicit proxy is honored.
        let mut builder = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .danger_accept_invalid_certs(false)
            .no_proxy();

        // #2. Optional forward proxy
        // A malformed proxy is logged and the client falls back to a direct connection.
        let proxy: Option<Url> = match config.proxy_url.as_deref().filter(|p| !p.is_empty()) {
            Some(raw) => match parse_proxy(raw) {
                Ok((url, proxy)) => {
                    builder = builder.proxy(proxy);
                    info!("HTTP client using proxy: {}", url);
                    Some(url)
                }
                Err(reason) => {
                    warn!("Ignoring proxy '{}': {}", raw, reason);
                    None
                }
            },
            None => None,
        };

        let http: Client = builder.build()?;

        Ok(BinanceRestClient {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            proxy,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The proxy actually applied to this client, if any.
    pub fn proxy(&self) -> Option<&Url> {
        self.proxy.as_ref()
    }


    //
    // PUBLIC INTERFACE
    //

    pub fn get_exchange_info(&self) -> Result<ExchangeInfo, ClientError> {
        let (status, body) = self.fetch(EXCHANGE_INFO_PATH, &[])?;
        let info: ExchangeInfo = decode_body(EXCHANGE_INFO_PATH, status, &body)?;

        debug!("Exchange info lists {} symbols", info.symbols.len());
        Ok(info)
    }

    pub fn get_klines(&self, symbol: &str, interval: &str, limit: usize) -> Result<Vec<Kline>, ClientError> {
        // #1. Execute Request
        // The limit is forwarded as-is; the exchange enforces its own bounds.
        let limit: String = limit.to_string();
        let (status, body) = self.fetch(
            KLINES_PATH,
            &[("symbol", symbol), ("interval", interval), ("limit", limit.as_str())],
        )?;

        // #2. Decode the outer array
        // Any element that is neither an array nor null fails the whole call.
        let records: Vec<Option<KlineResponse>> = decode_body(KLINES_PATH, status, &body)?;

        // #3. Decode records, skipping the bad ones
        let klines: Vec<Kline> = parse_kline_batch(records);
        debug!("Decoded {} klines for {} {}", klines.len(), symbol, interval);

        Ok(klines)
    }

    pub fn get_current_price(&self, symbol: &str) -> Result<f64, ClientError> {
        let (status, body) = self.fetch(TICKER_PRICE_PATH, &[("symbol", symbol)])?;
        let ticker: PriceTicker = decode_body(TICKER_PRICE_PATH, status, &body)?;

        // Unlike kline fields, an unparsable price fails the whole call
        let price: f64 = ticker.price.parse::<f64>().map_err(|e| {
            ClientError::Decode(format!("invalid price '{}' for {}: {}", ticker.price, symbol, e))
        })?;

        // Out-of-range text such as "1e400" parses to infinity
        if !price.is_finite() {
            return Err(ClientError::Decode(format!("price '{}' for {} is out of range", ticker.price, symbol)));
        }

        Ok(price)
    }


    //
    // INTERNAL HELPERS
    //

    // Sends a GET and reads the whole body, whatever the status.
    fn fetch(&self, path: &str, query: &[(&str, &str)]) -> Result<(StatusCode, String), ClientError> {
        let url: String = format!("{}{}", self.base_url, path);
        debug!("GET {} {:?}", url, query);

        let response = self.http.get(&url).query(query).send()?;
        let status: StatusCode = response.status();
        let body: String = response.text()?;

        if !status.is_success() {
            warn!("{} answered HTTP {}", path, status);
        }

        Ok((status, body))
    }
}

impl MarketDataSource for BinanceRestClient {
    fn get_exchange_info(&self) -> Result<ExchangeInfo, ClientError> {
        BinanceRestClient::get_exchange_info(self)
    }

    fn get_klines(&self, symbol: &str, interval: &str, limit: usize) -> Result<Vec<Kline>, ClientError> {
        BinanceRestClient::get_klines(self, symbol, interval, limit)
    }

    fn get_current_price(&self, symbol: &str) -> Result<f64, ClientError> {
        BinanceRestClient::get_current_price(self, symbol)
    }
}


//
// RESPONSE DECODING
//

fn parse_proxy(raw: &str) -> Result<(Url, Proxy), String> {
    let url: Url = Url::parse(raw).map_err(|e| e.to_string())?;
    let proxy: Proxy = Proxy::all(url.as_str()).map_err(|e| e.to_string())?;
    Ok((url, proxy))
}

fn decode_body<T: DeserializeOwned>(path: &str, status: StatusCode, body: &str) -> Result<T, ClientError> {
    serde_json::from_str::<T>(body).map_err(|err| {
        // Surface the exchange's own error message when the body carries one
        match serde_json::from_str::<ApiErrorBody>(body) {
            Ok(api) => ClientError::Decode(format!(
                "{} answered HTTP {} with exchange error {}: {}",
                path, status, api.code, api.msg
            )),
            Err(_) => ClientError::Decode(format!("{} (HTTP {}): {}", path, status, err)),
        }
    })
}

/// Decodes every record in exchange order, logging and dropping the ones that fail.
/// A `null` element counts as an empty record.
pub fn parse_kline_batch(records: Vec<Option<KlineResponse>>) -> Vec<Kline> {
    let mut klines: Vec<Kline> = Vec::with_capacity(records.len());

    for (position, record) in records.iter().enumerate() {
        let fields: &[Value] = record.as_deref().unwrap_or_default();

        match parse_kline(fields) {
            Ok(kline) => klines.push(kline),
            Err(e) => warn!("Skipping kline #{}: {}", position, e),
        }
    }

    klines
}

/// Maps one wire array onto a `Kline` by fixed position.
///
/// Integer fields must be JSON numbers and price/volume fields must be JSON
/// strings, otherwise the record is rejected. A string that does not parse as
/// a number becomes `0.0`. Elements past index 10 are ignored.
pub fn parse_kline(fields: &[Value]) -> Result<Kline, KlineDecodeError> {
    if fields.len() < KLINE_FIELD_COUNT {
        return Err(KlineDecodeError::TooShort { len: fields.len() });
    }

    Ok(Kline {
        open_time: integer_at(fields, 0)?,
        open: decimal_at(fields, 1)?,
        high: decimal_at(fields, 2)?,
        low: decimal_at(fields, 3)?,
        close: decimal_at(fields, 4)?,
        volume: decimal_at(fields, 5)?,
        close_time: integer_at(fields, 6)?,
        quote_volume: decimal_at(fields, 7)?,
        trades: integer_at(fields, 8)?,
        taker_buy_base_volume: decimal_at(fields, 9)?,
        taker_buy_quote_volume: decimal_at(fields, 10)?,
    })
}

fn integer_at(fields: &[Value], index: usize) -> Result<i64, KlineDecodeError> {
    let value: &Value = &fields[index];
    value.as_i64()
        .or_else(|| value.as_f64().map(|f| f as i64))
        .ok_or(KlineDecodeError::FieldType { index, expected: "a number" })
}

fn decimal_at(fields: &[Value], index: usize) -> Result<f64, KlineDecodeError> {
    let text: &str = fields[index]
        .as_str()
        .ok_or(KlineDecodeError::FieldType { index, expected: "a numeric string" })?;

    Ok(text.parse::<f64>().unwrap_or(0.0))
}
