#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use whiteflag_core::config::ProtocolVersion;
    use whiteflag_core::crypto::{generate_iv, CryptoError, EncryptionMethod, WfCipher};
    use zeroize::Zeroizing;

    fn cipher(method: EncryptionMethod) -> WfCipher {
        let mut ikm = [9u8; 32];
        WfCipher::from_secret(method, &mut ikm, b"originator", ProtocolVersion::V1).unwrap()
    }

    // NIST SP 800-38A F.5.5, CTR-AES256.Encrypt, first block
    #[test]
    fn test_aes256_ctr_vector() {
        let key = hex::decode("603deb1015ca71be2b73aef0857d77811f352c073b6108d72d9810a30914dff4").unwrap();
        let iv = hex::decode("f0f1f2f3f4f5f6f7f8f9fafbfcfdfeff").unwrap();
        let plaintext = hex::decode("6bc1bee22e409f96e93d7e117393172a").unwrap();

        let c = WfCipher::new(EncryptionMethod::Aes256CtrPsk, Zeroizing::new(key), ProtocolVersion::V1).unwrap();
        let ciphertext = c.encrypt(&iv, &plaintext).unwrap();
        assert_eq!(hex::encode(ciphertext), "601ec313775789a5b7a7f504bbf3d228");
    }

    #[test]
    fn test_round_trip_both_methods() {
        for method in [EncryptionMethod::Aes256CtrEcdh, EncryptionMethod::Aes256CtrPsk] {
            let c = cipher(method);
            let iv = c.generate_iv();
            let plaintext = b"Whiteflag body bits";
            let ciphertext = c.encrypt(&iv, plaintext).unwrap();
            assert_eq!(ciphertext.len(), plaintext.len());
            assert_ne!(&ciphertext[..], &plaintext[..]);
            assert_eq!(c.decrypt(&iv, &ciphertext).unwrap(), plaintext);
        }
    }

    #[test]
    fn test_iv_length_is_checked() {
        let c = cipher(EncryptionMethod::Aes256CtrPsk);
        let err = c.encrypt(&[0u8; 12], b"data").unwrap_err();
        assert_eq!(err, CryptoError::InvalidIvLen { expected: 16, actual: 12 });
    }

    #[test]
    fn test_key_length_is_checked() {
        let err = WfCipher::new(EncryptionMethod::Aes256CtrPsk, Zeroizing::new(vec![0u8; 16]), ProtocolVersion::V1)
            .err()
            .unwrap();
        assert_eq!(err, CryptoError::InvalidKeyLen { expected: 32, actual: 16 });
    }

    #[test]
    fn test_no_encryption_has_no_cipher() {
        let mut ikm = [1u8; 32];
        assert!(WfCipher::from_secret(EncryptionMethod::None, &mut ikm, b"a", ProtocolVersion::V1).is_err());
        assert!(generate_iv(EncryptionMethod::None, ProtocolVersion::V1).is_err());
    }

    #[test]
    fn test_generated_iv_length() {
        let iv = generate_iv(EncryptionMethod::Aes256CtrEcdh, ProtocolVersion::V1).unwrap();
        assert_eq!(iv.len(), 16);
    }

    #[test]
    fn test_indicator_parsing() {
        assert_eq!(EncryptionMethod::from_indicator("0").unwrap(), EncryptionMethod::None);
        assert_eq!(EncryptionMethod::from_indicator("2").unwrap(), EncryptionMethod::Aes256CtrPsk);
        assert_eq!(EncryptionMethod::Aes256CtrEcdh.indicator(), "1");
        assert!(matches!(EncryptionMethod::from_indicator("9"), Err(CryptoError::UnsupportedMethod { .. })));
        assert!(matches!(EncryptionMethod::from_indicator("12"), Err(CryptoError::InvalidIndicator(_))));
    }

    proptest! {
        #[test]
        fn prop_decrypt_inverts_encrypt(data in proptest::collection::vec(any::<u8>(), 0..128), iv in any::<[u8; 16]>()) {
            let c = cipher(EncryptionMethod::Aes256CtrPsk);
            let ciphertext = c.encrypt(&iv, &data).unwrap();
            prop_assert_eq!(c.decrypt(&iv, &ciphertext).unwrap(), data);
        }
    }
}
