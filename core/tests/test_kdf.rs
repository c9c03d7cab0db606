#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use whiteflag_core::config::ProtocolVersion;
    use whiteflag_core::crypto::{
        derive_auth_token, derive_key, hkdf_sha256, AuthMethod, CryptoError, EncryptionMethod, MAX_OUTPUT_LEN,
    };

    const ADDRESS: &[u8] = b"007a0baf6f84f0fa7402ea972686e56d50b707c9b67b108866";

    // RFC 5869, test case 1
    #[test]
    fn test_hkdf_rfc5869_vector() {
        let mut ikm = [0x0bu8; 22];
        let salt = hex::decode("000102030405060708090a0b0c").unwrap();
        let info = hex::decode("f0f1f2f3f4f5f6f7f8f9").unwrap();

        let okm = hkdf_sha256(&mut ikm, &salt, &info, 42).unwrap();
        assert_eq!(
            hex::encode(okm.as_slice()),
            "3cb25f25faacd57a90434f64d0362f2a2d2d0a90cf1a5a4c5db02d56ecc4c5bf34007208d5b887185865"
        );
    }

    #[test]
    fn test_ikm_zeroised_after_derive_key() {
        let mut ikm = *b"32-byte-pre-shared-key-material!";
        let key = derive_key(&mut ikm, EncryptionMethod::Aes256CtrPsk, ADDRESS, ProtocolVersion::V1).unwrap();
        assert_eq!(key.len(), 32);
        assert!(ikm.iter().all(|b| *b == 0));
    }

    #[test]
    fn test_ikm_zeroised_on_error() {
        let mut ikm = [0x42u8; 32];
        let err = derive_key(&mut ikm, EncryptionMethod::None, ADDRESS, ProtocolVersion::V1).unwrap_err();
        assert!(matches!(err, CryptoError::UnsupportedMethod { .. }));
        assert!(ikm.iter().all(|b| *b == 0));

        let mut ikm = [0x42u8; 8];
        assert!(hkdf_sha256(&mut ikm, b"", b"", MAX_OUTPUT_LEN + 1).is_err());
        assert!(ikm.iter().all(|b| *b == 0));
    }

    #[test]
    fn test_key_bound_to_address_and_method() {
        let derive = |method, address: &[u8]| {
            let mut ikm = [7u8; 32];
            derive_key(&mut ikm, method, address, ProtocolVersion::V1).unwrap()
        };
        let k1 = derive(EncryptionMethod::Aes256CtrPsk, ADDRESS);
        let k2 = derive(EncryptionMethod::Aes256CtrPsk, ADDRESS);
        let k3 = derive(EncryptionMethod::Aes256CtrPsk, b"another-address");
        let k4 = derive(EncryptionMethod::Aes256CtrEcdh, ADDRESS);
        assert_eq!(k1, k2);
        assert_ne!(k1, k3);
        assert_ne!(k1, k4);
    }

    #[test]
    fn test_auth_token_shape_and_determinism() {
        let mut s1 = *b"shared secret";
        let mut s2 = *b"shared secret";
        let t1 = derive_auth_token(&mut s1, AuthMethod::SharedToken, ADDRESS, ProtocolVersion::V1).unwrap();
        let t2 = derive_auth_token(&mut s2, AuthMethod::SharedToken, ADDRESS, ProtocolVersion::V1).unwrap();
        assert_eq!(t1, t2);
        assert_eq!(t1.len(), 64);
        assert!(t1.bytes().all(|b| b.is_ascii_hexdigit() && !b.is_ascii_uppercase()));
        assert!(s1.iter().all(|b| *b == 0));
    }

    #[test]
    fn test_signature_method_has_no_token() {
        let mut secret = *b"secret";
        let err = derive_auth_token(&mut secret, AuthMethod::DigitalSignature, ADDRESS, ProtocolVersion::V1);
        assert!(err.is_err());
        assert!(secret.iter().all(|b| *b == 0));
    }

    proptest! {
        #[test]
        fn prop_derive_key_deterministic(ikm in any::<[u8; 32]>(), address in proptest::collection::vec(any::<u8>(), 1..40)) {
            let mut a = ikm;
            let mut b = ikm;
            let k1 = derive_key(&mut a, EncryptionMethod::Aes256CtrEcdh, &address, ProtocolVersion::V1).unwrap();
            let k2 = derive_key(&mut b, EncryptionMethod::Aes256CtrEcdh, &address, ProtocolVersion::V1).unwrap();
            prop_assert_eq!(k1, k2);
            prop_assert!(a.iter().all(|x| *x == 0));
        }

        #[test]
        fn prop_output_length(len in 1usize..200) {
            let mut ikm = [1u8; 16];
            let okm = hkdf_sha256(&mut ikm, b"salt", b"info", len).unwrap();
            prop_assert_eq!(okm.len(), len);
        }
    }
}
