#[cfg(test)]
mod tests {
    use crate::domain::error::{BridgeError, ErrorCode};
    use crate::domain::language::IdentifiedLanguage;
    use crate::domain::settings::{EngineChoice, IdentifierSettings};

    #[test]
    fn test_error_code_serialization() {
        assert_eq!(
            serde_json::to_string(&ErrorCode::InvalidArgument).unwrap(),
            "\"InvalidArgument\""
        );
        assert_eq!(
            serde_json::to_string(&ErrorCode::IdentificationError).unwrap(),
            "\"IdentificationError\""
        );
        assert_eq!(
            serde_json::to_string(&ErrorCode::MethodNotImplemented).unwrap(),
            "\"MethodNotImplemented\""
        );
    }

    #[test]
    fn test_bridge_error_serialization() {
        let err = BridgeError::no_text();
        let v = serde_json::to_value(&err).unwrap();
        assert_eq!(v["code"], "InvalidArgument");
        assert_eq!(v["message"], "no text provided");
    }

    #[test]
    fn test_bridge_error_display() {
        let err = BridgeError::identification("model missing");
        assert_eq!(err.to_string(), "[IdentificationError] model missing");
    }

    #[test]
    fn test_identified_language_field_names() {
        let lang = IdentifiedLanguage::new("fr", 0.5);
        let v = serde_json::to_value(&lang).unwrap();
        assert_eq!(v["languageCode"], "fr");
        assert_eq!(v["confidence"], 0.5);
        assert!(v.get("language_code").is_none());
    }

    #[test]
    fn test_engine_choice_serialization() {
        assert_eq!(
            serde_json::to_string(&EngineChoice::Native).unwrap(),
            "\"native\""
        );
        assert_eq!(
            serde_json::from_str::<EngineChoice>("\"noop\"").unwrap(),
            EngineChoice::Noop
        );
    }

    #[test]
    fn test_settings_serialization() {
        let s = IdentifierSettings {
            engine: EngineChoice::Lingua,
            confidence_threshold: Some(0.5),
        };
        let json = serde_json::to_string(&s).unwrap();
        assert!(json.contains("\"engine\":\"lingua\""));
        assert!(json.contains("confidenceThreshold"));
    }
}
