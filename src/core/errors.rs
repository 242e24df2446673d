// @file: src/core/errors.rs
// @description: Failure kinds surfaced by the REST client and by per-record kline decoding.
// @author: LAS.

use thiserror::Error;


//
// CALL-LEVEL FAILURES
//

#[derive(Debug, Error)]
pub enum ClientError {
    // Connect, DNS, timeout or body read failure
    #[error("transport failure: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("decode failure: {0}")]
    Decode(String),
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        ClientError::Decode(err.to_string())
    }
}


//
// RECORD-LEVEL FAILURES
//

/// Why a single kline array was rejected. Absorbed by batch decoding, never returned to callers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KlineDecodeError {
    #[error("kline record has {len} fields, expected at least 11")]
    TooShort { len: usize },

    #[error("kline field [{index}] is not {expected}")]
    FieldType { index: usize, expected: &'static str },
}
