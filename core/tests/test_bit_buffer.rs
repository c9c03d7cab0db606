#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use whiteflag_core::binary::{BinaryError, BitBuffer};

    fn buffer_strategy() -> impl Strategy<Value = BitBuffer> {
        (proptest::collection::vec(any::<u8>(), 0..8), 0isize..64)
            .prop_map(|(bytes, n)| BitBuffer::from_bytes(&bytes, if bytes.is_empty() { 0 } else { n.max(1) }))
    }

    fn bits(buf: &BitBuffer) -> String {
        (0..buf.len()).map(|i| if buf.bit(i) == Some(1) { '1' } else { '0' }).collect()
    }

    #[test]
    fn test_from_hex_bit_length_rules() {
        let all = BitBuffer::from_hex("ff00", 0).unwrap();
        assert_eq!(all.len(), 16);

        let exact = BitBuffer::from_hex("ff00", 12).unwrap();
        assert_eq!(exact.len(), 12);
        assert_eq!(exact.to_hex(), "ff00");

        let minus = BitBuffer::from_hex("ff00", -4).unwrap();
        assert_eq!(minus.len(), 12);

        let clamped = BitBuffer::from_hex("ff", 100).unwrap();
        assert_eq!(clamped.len(), 8);
    }

    #[test]
    fn test_from_bytes_crops_trailing_bits() {
        let buf = BitBuffer::from_bytes(&[0xFF, 0xFF], 12);
        assert_eq!(buf.to_bytes(), vec![0xFF, 0xF0]);
    }

    #[test]
    fn test_malformed_hex_is_rejected() {
        assert!(matches!(BitBuffer::from_hex("abc", 0), Err(BinaryError::InvalidHex(_))));
        assert!(matches!(BitBuffer::from_hex("zz", 0), Err(BinaryError::InvalidHex(_))));
    }

    #[test]
    fn test_append_is_bit_exact() {
        let mut a = BitBuffer::from_bytes(&[0b1010_0000], 3);
        let b = BitBuffer::from_bytes(&[0b1100_0000], 2);
        a.append(&b);
        assert_eq!(a.len(), 5);
        assert_eq!(a.to_bytes(), vec![0b1011_1000]);
    }

    #[test]
    fn test_insert_prepends() {
        let mut a = BitBuffer::from_bytes(&[0xF0], 4);
        a.insert_bytes(&[0x00], 4);
        assert_eq!(a.len(), 8);
        assert_eq!(a.to_bytes(), vec![0x0F]);
    }

    #[test]
    fn test_extract_range_errors() {
        let buf = BitBuffer::from_hex("ff00", 0).unwrap();
        assert!(matches!(buf.extract(16, 20), Err(BinaryError::OutOfRange { .. })));
        assert!(matches!(buf.extract(8, 4), Err(BinaryError::OutOfRange { .. })));
        assert!(BitBuffer::empty().extract(0, 0).is_err());
    }

    #[test]
    fn test_extract_clamps_end() {
        let buf = BitBuffer::from_hex("ff00", 0).unwrap();
        let tail = buf.extract(4, 100).unwrap();
        assert_eq!(tail.len(), 12);
        assert_eq!(tail.to_hex(), "f000");
    }

    #[test]
    fn test_shift_left_then_right_is_lossy() {
        let original = BitBuffer::from_hex("ff00", 0).unwrap();
        let mut buf = original.clone();
        buf.shift_left(4);
        assert_eq!(buf.len(), 12);
        buf.shift_right(4);

        assert_eq!(buf.len(), 16);
        assert_eq!(buf.to_hex(), "0f00");
        assert_ne!(buf, original);
    }

    #[test]
    fn test_shift_left_keeps_trailing_bits() {
        // 1011 0110 1101 (12 bits) minus 3 leading bits -> 1 0110 1101
        let mut buf = BitBuffer::from_hex("b6d0", 12).unwrap();
        buf.shift_left(3);
        assert_eq!(buf.len(), 9);
        assert_eq!(buf.to_bytes(), vec![0xb6, 0x80]);

        buf.shift_left(8);
        assert_eq!(buf.len(), 1);
        assert_eq!(buf.bit(0), Some(1));

        buf.shift_left(5);
        assert!(buf.is_empty());
    }

    #[test]
    fn test_negative_shift_reverses_direction() {
        let mut a = BitBuffer::from_hex("ff00", 0).unwrap();
        let mut b = a.clone();
        a.shift_left(-4);
        b.shift_right(4);
        assert_eq!(a, b);
    }

    #[test]
    fn test_display_is_hex() {
        let buf = BitBuffer::from_bytes(&[0xAB, 0xCD], 0);
        assert_eq!(buf.to_string(), "abcd");
    }

    proptest! {
        #[test]
        fn prop_no_bits_past_length(buf in buffer_strategy()) {
            let bytes = buf.to_bytes();
            prop_assert_eq!(bytes.len(), buf.len().div_ceil(8));
            let tail = buf.len() % 8;
            if tail != 0 {
                let last = bytes[bytes.len() - 1];
                prop_assert_eq!(last & (0xFFu8 >> tail), 0);
            }
        }

        #[test]
        fn prop_append_associative(a in buffer_strategy(), b in buffer_strategy(), c in buffer_strategy()) {
            let mut left = a.clone();
            left.append(&b).append(&c);

            let mut bc = b.clone();
            bc.append(&c);
            let mut right = a.clone();
            right.append(&bc);

            prop_assert_eq!(bits(&left), bits(&right));
            prop_assert_eq!(left, right);
        }

        #[test]
        fn prop_append_concatenates_bits(a in buffer_strategy(), b in buffer_strategy()) {
            let mut joined = a.clone();
            joined.append(&b);
            prop_assert_eq!(bits(&joined), format!("{}{}", bits(&a), bits(&b)));
        }

        #[test]
        fn prop_shift_left_drops_leading_bits(buf in buffer_strategy(), n in 0usize..70) {
            let mut shifted = buf.clone();
            shifted.shift_left(n as isize);
            let expected: String = bits(&buf).chars().skip(n).collect();
            prop_assert_eq!(bits(&shifted), expected);
        }

        #[test]
        fn prop_full_extract_is_identity(buf in buffer_strategy()) {
            prop_assume!(!buf.is_empty());
            let copy = buf.extract(0, buf.len()).unwrap();
            prop_assert_eq!(copy, buf);
        }
    }
}
