// @file: src/main.rs
// @description: Prints a one-shot futures market snapshot for a symbol.
// @author: LAS.

use market_client::{AppConfig, BinanceRestClient, ClientError, MarketDataSource};
use log::{error, info};
use std::env;
use std::process;

fn main() {
    // 1. Load .env and layered configuration
    dotenv::dotenv().ok();

    let app_config: AppConfig = match AppConfig::load() {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    // 2. Initialize Logger, RUST_LOG still wins over the configured level
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(app_config.log_level.as_str())
    ).init();

    // 3. Resolve request parameters: positional args override config defaults
    let args: Vec<String> = env::args().skip(1).collect();
    let symbol: String = args.first().cloned().unwrap_or_else(|| app_config.default_symbol.clone());
    let interval: String = args.get(1).cloned().unwrap_or_else(|| app_config.default_interval.clone());
    let limit: usize = args
        .get(2)
        .and_then(|raw| raw.parse().ok())
        .unwrap_or(app_config.default_kline_limit);

    // 4. Build client and run
    let client: BinanceRestClient = match BinanceRestClient::with_config(app_config.client_config()) {
        Ok(client) => client,
        Err(e) => {
            error!("Failed to build HTTP client: {}", e);
            process::exit(1);
        }
    };

    info!(">>> Fetching snapshot for {} ({}, last {}) from {} <<<", symbol, interval, limit, client.base_url());

    if let Err(e) = print_snapshot(&client, &symbol, &interval, limit) {
        error!("Snapshot failed: {}", e);
        process::exit(1);
    }
}

fn print_snapshot(source: &dyn MarketDataSource, symbol: &str, interval: &str, limit: usize) -> Result<(), ClientError> {
    let info = source.get_exchange_info()?;
    println!("Instruments listed: {}", info.symbols.len());

    match info.symbol(symbol) {
        Some(entry) => println!("{}: status={} contract={}", entry.symbol, entry.status, entry.contract_type),
        None => println!("{}: not listed in exchange info", symbol),
    }

    let klines = source.get_klines(symbol, interval, limit)?;
    println!("Klines received: {}", klines.len());
    if let Some(last) = klines.last() {
        println!(
            "Last {} kline @ {}: O={} H={} L={} C={} V={} trades={}",
            interval, last.open_time, last.open, last.high, last.low, last.close, last.volume, last.trades
        );
    }

    let price: f64 = source.get_current_price(symbol)?;
    println!("Current price: {}", price);

    Ok(())
}
