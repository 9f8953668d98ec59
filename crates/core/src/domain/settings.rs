use serde::{Deserialize, Serialize};

use super::error::BridgeError;
use super::language::IdentifyOptions;

/// 言語識別プラグイン設定（Tauri のプラグイン設定セクションから読む）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct IdentifierSettings {
    /// 識別エンジン選択
    pub engine: EngineChoice,
    /// 全呼び出し共通の信頼度しきい値（None = エンジン既定値）
    pub confidence_threshold: Option<f32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EngineChoice {
    /// プラットフォームのネイティブ識別器（デスクトップでは lingua にフォールバック）
    Native,
    Lingua,
    Noop,
}

impl Default for IdentifierSettings {
    fn default() -> Self {
        Self {
            engine: EngineChoice::Native,
            confidence_threshold: None,
        }
    }
}

impl IdentifierSettings {
    pub fn validate(&self) -> Result<(), BridgeError> {
        if let Some(t) = self.confidence_threshold {
            if !(0.0..=1.0).contains(&t) {
                return Err(BridgeError::invalid_argument(format!(
                    "confidenceThreshold must be between 0.0 and 1.0 (got {t})"
                )));
            }
        }
        Ok(())
    }

    pub fn options(&self) -> IdentifyOptions {
        IdentifyOptions::with_threshold(self.confidence_threshold)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let s = IdentifierSettings::default();
        assert_eq!(s.engine, EngineChoice::Native);
        assert!(s.confidence_threshold.is_none());
        assert!(s.validate().is_ok());
    }

    #[test]
    fn deserialize_partial() {
        let s: IdentifierSettings =
            serde_json::from_str(r#"{"engine":"lingua"}"#).unwrap();
        assert_eq!(s.engine, EngineChoice::Lingua);
        assert!(s.confidence_threshold.is_none());

        let s: IdentifierSettings =
            serde_json::from_str(r#"{"confidenceThreshold":0.25}"#).unwrap();
        assert_eq!(s.engine, EngineChoice::Native);
        assert_eq!(s.options().confidence_threshold, Some(0.25));
    }

    #[test]
    fn validate_rejects_out_of_range() {
        let s = IdentifierSettings {
            engine: EngineChoice::Noop,
            confidence_threshold: Some(1.2),
        };
        assert!(s.validate().is_err());
    }
}
