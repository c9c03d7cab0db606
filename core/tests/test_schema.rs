#[cfg(test)]
mod tests {
    use whiteflag_core::config::ProtocolVersion;
    use whiteflag_core::fields::FieldType;
    use whiteflag_core::schema::{names, MessageSchema, MessageType, SchemaError};

    fn schema() -> MessageSchema {
        MessageSchema::new(ProtocolVersion::V1).unwrap()
    }

    fn layout_names(t: MessageType, pseudo: Option<MessageType>, repeats: usize) -> Vec<String> {
        schema().body_layout(t, pseudo, repeats).unwrap().into_iter().map(|f| f.name).collect()
    }

    #[test]
    fn test_header_order_and_size() {
        let s = schema();
        let header = s.header_fields();
        let order: Vec<&str> = header.iter().map(|f| f.name).collect();
        assert_eq!(
            order,
            vec![
                names::PREFIX,
                names::VERSION,
                names::ENCRYPTION_INDICATOR,
                names::DURESS_INDICATOR,
                names::MESSAGE_CODE,
                names::REFERENCE_INDICATOR,
                names::REFERENCED_MESSAGE,
            ]
        );
        assert_eq!(header.iter().map(|f| f.bit_len).sum::<usize>(), 301);
    }

    #[test]
    fn test_sign_signal_types_share_body() {
        let s = schema();
        let protective = s.body_fields(MessageType::Protective).unwrap();
        for t in [
            MessageType::Emergency,
            MessageType::Danger,
            MessageType::Status,
            MessageType::Infrastructure,
            MessageType::Mission,
            MessageType::Request,
        ] {
            assert!(t.is_sign_signal());
            assert_eq!(s.body_fields(t).unwrap(), protective);
        }
        assert_eq!(protective.len(), 9);
        assert_eq!(protective[4].field_type, FieldType::Lat);
    }

    #[test]
    fn test_authentication_body() {
        assert_eq!(
            layout_names(MessageType::Authentication, None, 0),
            vec![names::VERIFICATION_METHOD, names::VERIFICATION_DATA]
        );
    }

    #[test]
    fn test_request_repeats_object_pairs() {
        let fields = layout_names(MessageType::Request, None, 2);
        assert_eq!(fields.len(), 9 + 4);
        assert_eq!(&fields[9..], ["ObjectType1", "ObjectType1Quant", "ObjectType2", "ObjectType2Quant"]);
    }

    #[test]
    fn test_only_request_repeats() {
        assert_eq!(layout_names(MessageType::Protective, None, 3).len(), 9);
    }

    #[test]
    fn test_test_message_embeds_pseudo_body() {
        assert_eq!(layout_names(MessageType::Test, None, 0), vec![names::PSEUDO_MESSAGE_CODE]);

        let fields = layout_names(MessageType::Test, Some(MessageType::FreeText), 0);
        assert_eq!(fields, vec![names::PSEUDO_MESSAGE_CODE, "Text"]);
    }

    #[test]
    fn test_test_message_cannot_embed_itself() {
        let err = schema().body_layout(MessageType::Test, Some(MessageType::Test), 0).unwrap_err();
        assert!(matches!(err, SchemaError::InvalidPseudoType(_)));
    }

    #[test]
    fn test_match_repeated_names() {
        let s = schema();
        let (index, def) = s.match_repeated(MessageType::Request, "ObjectType3Quant").unwrap();
        assert_eq!(index, 3);
        assert_eq!(def.field_type, FieldType::Dec);

        assert_eq!(s.match_repeated(MessageType::Request, "ObjectType12").map(|(i, _)| i), Some(12));
        assert!(s.match_repeated(MessageType::Request, "ObjectType0").is_none());
        assert!(s.match_repeated(MessageType::Request, "ObjectTypeXQuant").is_none());
        assert!(s.match_repeated(MessageType::Protective, "ObjectType1").is_none());
    }

    #[test]
    fn test_message_codes() {
        assert_eq!(MessageType::from_code("A").unwrap(), MessageType::Authentication);
        assert_eq!(MessageType::FreeText.code(), 'F');
        assert!(matches!(MessageType::from_code("X"), Err(SchemaError::UnknownMessageType(_))));
        assert!(matches!(MessageType::from_code("AA"), Err(SchemaError::UnknownMessageType(_))));
    }

    #[test]
    fn test_field_patterns_are_compiled() {
        let s = schema();
        let prefix = &s.header_fields()[0];
        let pattern = s.field_pattern(prefix).unwrap();
        assert!(pattern.is_match("WF"));
        assert!(!pattern.is_match("XF"));
    }
}
