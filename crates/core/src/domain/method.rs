use serde::Deserialize;
use serde_json::Value;

use super::error::BridgeError;

/// メソッド名定数
pub const IDENTIFY_LANGUAGE: &str = "identifyLanguage";
pub const IDENTIFY_LANGUAGES: &str = "identifyLanguages";
pub const START_LANGUAGE_IDENTIFIER: &str = "nlp#startLanguageIdentifier";
pub const CLOSE_LANGUAGE_IDENTIFIER: &str = "nlp#closeLanguageIdentifier";

/// アプリ層からのメソッド呼び出し
#[derive(Debug, Clone, Deserialize)]
pub struct MethodCall {
    pub method: String,
    #[serde(default)]
    pub arguments: Value,
}

impl MethodCall {
    pub fn new(method: impl Into<String>, arguments: Value) -> Self {
        Self {
            method: method.into(),
            arguments,
        }
    }
}

/// ディスパッチ対象のメソッド
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    IdentifyLanguage,
    IdentifyLanguages,
    StartLanguageIdentifier,
    CloseLanguageIdentifier,
}

impl Method {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            IDENTIFY_LANGUAGE => Some(Method::IdentifyLanguage),
            IDENTIFY_LANGUAGES => Some(Method::IdentifyLanguages),
            START_LANGUAGE_IDENTIFIER => Some(Method::StartLanguageIdentifier),
            CLOSE_LANGUAGE_IDENTIFIER => Some(Method::CloseLanguageIdentifier),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Method::IdentifyLanguage => IDENTIFY_LANGUAGE,
            Method::IdentifyLanguages => IDENTIFY_LANGUAGES,
            Method::StartLanguageIdentifier => START_LANGUAGE_IDENTIFIER,
            Method::CloseLanguageIdentifier => CLOSE_LANGUAGE_IDENTIFIER,
        }
    }
}

/// 引数から text を取り出す。
///
/// 文字列そのもの (`"Hello"`) と `{"text": "Hello"}` の両方を受け付ける。
/// それ以外は `None`。
pub fn text_argument(arguments: &Value) -> Option<&str> {
    match arguments {
        Value::String(s) => Some(s.as_str()),
        Value::Object(map) => map.get("text").and_then(Value::as_str),
        _ => None,
    }
}

/// text 引数を必須として取り出す。無ければ InvalidArgument。
pub fn require_text(arguments: &Value) -> Result<&str, BridgeError> {
    text_argument(arguments).ok_or_else(BridgeError::no_text)
}

/// `nlp#startLanguageIdentifier` の引数
#[derive(Debug, Clone, PartialEq)]
pub struct StartArgs {
    pub text: String,
    pub possible_languages: bool,
    pub confidence: Option<f32>,
}

impl StartArgs {
    pub fn parse(arguments: &Value) -> Result<Self, BridgeError> {
        let text = require_text(arguments)?.to_string();

        let possible_languages = match arguments.get("possibleLanguages") {
            None | Some(Value::Null) => false,
            Some(Value::Bool(b)) => *b,
            Some(_) => {
                return Err(BridgeError::invalid_argument(
                    "possibleLanguages must be a boolean",
                ))
            }
        };

        let confidence = match arguments.get("confidence") {
            None | Some(Value::Null) => None,
            Some(v) => {
                let c = v
                    .as_f64()
                    .filter(|c| (0.0..=1.0).contains(c))
                    .ok_or_else(|| {
                        BridgeError::invalid_argument(
                            "confidence must be a number between 0.0 and 1.0",
                        )
                    })?;
                Some(c as f32)
            }
        };

        Ok(Self {
            text,
            possible_languages,
            confidence,
        })
    }
}
