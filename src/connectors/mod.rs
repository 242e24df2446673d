// @file: src/connectors/mod.rs
// @description: Exchange REST connectors.
// @author: LAS.

pub mod binance_rest;
