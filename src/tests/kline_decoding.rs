// @file: src/tests/kline_decoding.rs
// @description: Positional kline decoding, per-field coercion and batch skip behavior.
// @author: LAS.

#[cfg(test)]
mod kline_decoding_tests {
    use crate::connectors::binance_rest::{parse_kline, parse_kline_batch};
    use crate::core::errors::KlineDecodeError;
    use crate::core::models::{Kline, KlineResponse};
    use proptest::prelude::*;
    use serde_json::json;

    //
    // FIXTURES
    //

    fn wire_kline(open_time: i64, close: &str) -> KlineResponse {
        vec![
            json!(open_time), json!("123.45"), json!("125.00"), json!("120.10"), json!(close),
            json!("1500.5"), json!(open_time + 3_599_999), json!("185000.75"), json!(842),
            json!("700.25"), json!("86000.5"), json!("0"),
        ]
    }

    //
    // SINGLE RECORD
    //

    #[test]
    fn test_positional_mapping_matches_wire_order() {
        let kline: Kline = parse_kline(&wire_kline(1_700_000_000_000, "124.90")).expect("valid record");

        assert_eq!(kline, Kline {
            open_time: 1_700_000_000_000,
            open: 123.45,
            high: 125.00,
            low: 120.10,
            close: 124.90,
            volume: 1500.5,
            close_time: 1_700_003_599_999,
            quote_volume: 185000.75,
            trades: 842,
            taker_buy_base_volume: 700.25,
            taker_buy_quote_volume: 86000.5,
        });
    }

    #[test]
    fn test_exactly_eleven_fields_is_enough() {
        let record: KlineResponse = wire_kline(1, "1.5")[..11].to_vec();
        let kline: Kline = parse_kline(&record).expect("11 fields is the minimum");

        assert_eq!(kline.taker_buy_quote_volume, 86000.5);
    }

    #[test]
    fn test_short_record_is_rejected() {
        let record: KlineResponse = wire_kline(1, "1.5")[..10].to_vec();

        assert_eq!(parse_kline(&record), Err(KlineDecodeError::TooShort { len: 10 }));
    }

    #[test]
    fn test_non_numeric_string_becomes_zero() {
        // #1. Garbage in a price field keeps the record
        let kline: Kline = parse_kline(&wire_kline(1, "abc")).expect("record survives bad text");

        // #2. Only the affected field is zeroed
        assert_eq!(kline.close, 0.0);
        assert_eq!(kline.open, 123.45);
    }

    #[test]
    fn test_wrong_json_type_rejects_record() {
        // Open time as a string
        let mut record: KlineResponse = wire_kline(1, "1.0");
        record[0] = json!("1700000000000");
        assert_eq!(
            parse_kline(&record),
            Err(KlineDecodeError::FieldType { index: 0, expected: "a number" })
        );

        // Volume as a bare number
        let mut record: KlineResponse = wire_kline(1, "1.0");
        record[5] = json!(1500.5);
        assert_eq!(
            parse_kline(&record),
            Err(KlineDecodeError::FieldType { index: 5, expected: "a numeric string" })
        );
    }

    #[test]
    fn test_negative_trade_count_is_kept() {
        let mut record: KlineResponse = wire_kline(1, "1.0");
        record[8] = json!(-3);

        let kline: Kline = parse_kline(&record).expect("any numeric trade count is accepted");
        assert_eq!(kline.trades, -3);
    }

    #[test]
    fn test_float_timestamps_are_truncated() {
        let mut record: KlineResponse = wire_kline(0, "1.0");
        record[0] = json!(1_700_000_000_000.0);

        let kline: Kline = parse_kline(&record).expect("float timestamp accepted");
        assert_eq!(kline.open_time, 1_700_000_000_000);
    }

    //
    // BATCH
    //

    #[test]
    fn test_batch_skips_bad_records_and_keeps_order() {
        // #1. Five records, the third one truncated, the fifth null
        let records: Vec<Option<KlineResponse>> = vec![
            Some(wire_kline(1_000, "1.0")),
            Some(wire_kline(2_000, "2.0")),
            Some(vec![json!(3_000), json!("1"), json!("2")]),
            Some(wire_kline(4_000, "4.0")),
            None,
        ];

        let klines: Vec<Kline> = parse_kline_batch(records);

        // #2. Survivors come back in exchange order
        let open_times: Vec<i64> = klines.iter().map(|k| k.open_time).collect();
        assert_eq!(open_times, vec![1_000, 2_000, 4_000]);
        assert_eq!(klines[2].close, 4.0);
    }

    #[test]
    fn test_null_record_is_skipped_as_empty() {
        let records: Vec<Option<KlineResponse>> =
            serde_json::from_str("[null]").expect("null elements decode");

        assert_eq!(records, vec![None]);
        assert!(parse_kline_batch(records).is_empty());
    }

    #[test]
    fn test_object_record_is_an_outer_shape_failure() {
        // Only arrays and null are valid elements; anything else fails the whole body
        let result = serde_json::from_str::<Vec<Option<KlineResponse>>>(r#"[{"t": 1}, [1, "2"]]"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_batch_keeps_duplicates_and_unsorted_input() {
        let records: Vec<Option<KlineResponse>> = vec![
            Some(wire_kline(5_000, "1.0")),
            Some(wire_kline(1_000, "1.0")),
            Some(wire_kline(5_000, "1.0")),
        ];

        let open_times: Vec<i64> = parse_kline_batch(records).iter().map(|k| k.open_time).collect();
        assert_eq!(open_times, vec![5_000, 1_000, 5_000]);
    }

    #[test]
    fn test_empty_batch() {
        assert!(parse_kline_batch(Vec::new()).is_empty());
    }

    //
    // POSITIONAL ROUND TRIP
    //

    proptest! {
        #[test]
        fn prop_well_formed_array_decodes_field_by_field(
            open_time in any::<i64>(),
            close_time in any::<i64>(),
            trades in any::<i64>(),
            decimals in prop::array::uniform8(-1e12f64..1e12f64),
        ) {
            // #1. Encode the values in wire order, decimals as numeric strings
            let [open, high, low, close, volume, quote_volume, taker_base, taker_quote] = decimals;
            let record: KlineResponse = vec![
                json!(open_time), json!(open.to_string()), json!(high.to_string()),
                json!(low.to_string()), json!(close.to_string()), json!(volume.to_string()),
                json!(close_time), json!(quote_volume.to_string()), json!(trades),
                json!(taker_base.to_string()), json!(taker_quote.to_string()),
            ];

            // #2. Decode and compare position by position
            let kline: Kline = parse_kline(&record).expect("well-formed record");
            prop_assert_eq!(kline, Kline {
                open_time,
                open,
                high,
                low,
                close,
                volume,
                close_time,
                quote_volume,
                trades,
                taker_buy_base_volume: taker_base,
                taker_buy_quote_volume: taker_quote,
            });
        }
    }
}
