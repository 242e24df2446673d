// @file: src/tests/mod.rs
// @description: Test suites for decoding, HTTP contract and configuration.
// @author: LAS.

mod kline_decoding;
