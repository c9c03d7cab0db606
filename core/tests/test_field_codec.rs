#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use whiteflag_core::binary::BitBuffer;
    use whiteflag_core::config::ProtocolVersion;
    use whiteflag_core::fields::{FieldCodec, FieldError, FieldType};

    fn codec() -> FieldCodec {
        FieldCodec::new(ProtocolVersion::V1).unwrap()
    }

    fn round_trip(value: &str, t: FieldType) -> String {
        let c = codec();
        let buf = c.encode(value, t).unwrap();
        c.decode(&buf, t).unwrap()
    }

    #[test]
    fn test_bin_round_trip() {
        let buf = codec().encode("1011", FieldType::Bin).unwrap();
        assert_eq!(buf.len(), 4);
        assert_eq!(buf.to_bytes(), vec![0b1011_0000]);
        assert_eq!(round_trip("1011", FieldType::Bin), "1011");
    }

    #[test]
    fn test_dec_packs_nibbles() {
        let buf = codec().encode("1234", FieldType::Dec).unwrap();
        assert_eq!(buf.len(), 16);
        assert_eq!(buf.to_hex(), "1234");
    }

    #[test]
    fn test_hex_decodes_lower_case() {
        assert_eq!(round_trip("ABcd", FieldType::Hex), "abcd");
    }

    #[test]
    fn test_utf8_single_byte_range() {
        assert_eq!(round_trip("WF é", FieldType::Utf8), "WF é");
        assert!(codec().encode("€", FieldType::Utf8).is_err());
    }

    #[test]
    fn test_datetime_round_trip() {
        let value = "2013-08-31T04:29:15Z";
        let buf = codec().encode(value, FieldType::Datetime).unwrap();
        assert_eq!(buf.len(), 56);
        assert_eq!(buf.to_hex(), "20130831042915");
        assert_eq!(round_trip(value, FieldType::Datetime), value);
    }

    #[test]
    fn test_duration_round_trip() {
        let value = "P00D00H00M";
        let buf = codec().encode(value, FieldType::Duration).unwrap();
        assert_eq!(buf.len(), 24);
        assert_eq!(round_trip("P01D12H30M", FieldType::Duration), "P01D12H30M");
    }

    #[test]
    fn test_latitude_sign_round_trip() {
        assert_eq!(round_trip("+31.1234", FieldType::Lat), "+31.1234");
        assert_eq!(round_trip("-31.1234", FieldType::Lat), "-31.1234");
    }

    #[test]
    fn test_latitude_sign_bit() {
        let plus = codec().encode("+52.08113", FieldType::Lat).unwrap();
        let minus = codec().encode("-52.08113", FieldType::Lat).unwrap();
        assert_eq!(plus.len(), 29);
        assert_eq!(plus.bit(0), Some(1));
        assert_eq!(minus.bit(0), Some(0));
    }

    #[test]
    fn test_longitude_round_trip() {
        let buf = codec().encode("+004.32123", FieldType::Long).unwrap();
        assert_eq!(buf.len(), 33);
        assert_eq!(round_trip("-123.45678", FieldType::Long), "-123.45678");
    }

    #[test]
    fn test_pattern_mismatch() {
        let c = codec();
        assert!(matches!(c.encode("102", FieldType::Bin), Err(FieldError::PatternMismatch { .. })));
        assert!(matches!(c.encode("12a", FieldType::Dec), Err(FieldError::PatternMismatch { .. })));
        assert!(matches!(c.encode("", FieldType::Hex), Err(FieldError::PatternMismatch { .. })));
        assert!(matches!(c.encode("31.1234", FieldType::Lat), Err(FieldError::PatternMismatch { .. })));
        assert!(matches!(c.encode("2013-08-31 04:29:15", FieldType::Datetime), Err(FieldError::PatternMismatch { .. })));
    }

    #[test]
    fn test_is_valid_value() {
        let c = codec();
        assert!(c.is_valid_value("+31.1234", FieldType::Lat));
        assert!(!c.is_valid_value("+031.1234", FieldType::Lat));
        assert!(c.is_valid_value("P99D23H59M", FieldType::Duration));
    }

    #[test]
    fn test_fixed_length_decode_rejects_wrong_size() {
        let buf = BitBuffer::from_hex("201308310429", 0).unwrap();
        assert!(matches!(
            codec().decode(&buf, FieldType::Datetime),
            Err(FieldError::LengthMismatch { expected: 56, actual: 48, .. })
        ));
    }

    #[test]
    fn test_non_decimal_nibble_is_encoding_error() {
        let buf = BitBuffer::from_hex("1a", 0).unwrap();
        assert!(matches!(codec().decode(&buf, FieldType::Dec), Err(FieldError::InvalidEncoding { .. })));
        assert_eq!(codec().decode(&buf, FieldType::Hex).unwrap(), "1a");
    }

    #[test]
    fn test_partial_unit_is_encoding_error() {
        let buf = BitBuffer::from_bytes(&[0x41], 6);
        assert!(matches!(codec().decode(&buf, FieldType::Utf8), Err(FieldError::InvalidEncoding { .. })));
    }

    #[test]
    fn test_field_type_names() {
        assert_eq!("lat".parse::<FieldType>().unwrap(), FieldType::Lat);
        assert_eq!(FieldType::Datetime.to_string(), "DATETIME");
        assert!(matches!("FLOAT".parse::<FieldType>(), Err(FieldError::UnknownFieldType(_))));
    }

    proptest! {
        #[test]
        fn prop_dec_round_trip(value in "[0-9]{1,32}") {
            prop_assert_eq!(round_trip(&value, FieldType::Dec), value);
        }

        #[test]
        fn prop_hex_round_trip(value in "[a-fA-F0-9]{1,32}") {
            prop_assert_eq!(round_trip(&value, FieldType::Hex), value.to_lowercase());
        }

        #[test]
        fn prop_bin_round_trip(value in "[01]{1,40}") {
            prop_assert_eq!(round_trip(&value, FieldType::Bin), value);
        }

        #[test]
        fn prop_lat_round_trip(value in "[+-][0-9]{2}\\.[0-9]{1,5}") {
            prop_assert_eq!(round_trip(&value, FieldType::Lat), value);
        }

        #[test]
        fn prop_long_round_trip(value in "[+-][0-9]{3}\\.[0-9]{1,5}") {
            prop_assert_eq!(round_trip(&value, FieldType::Long), value);
        }
    }
}
