use serde::Serialize;

use crate::infra::identifier::IdentifyError;

/// ブリッジ応答のエラーコード（アプリ層に返す機械可読な種別）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ErrorCode {
    /// text 引数が無い、または文字列ではない
    InvalidArgument,
    /// 識別エンジンが失敗を報告した
    IdentificationError,
    /// 未対応のメソッド名
    MethodNotImplemented,
}

/// ブリッジの失敗応答（コード + メッセージ）
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BridgeError {
    pub code: ErrorCode,
    pub message: String,
}

impl BridgeError {
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self {
            code: ErrorCode::InvalidArgument,
            message: msg.into(),
        }
    }

    /// text が渡されなかった場合の定型エラー
    pub fn no_text() -> Self {
        Self::invalid_argument("no text provided")
    }

    pub fn identification(msg: impl Into<String>) -> Self {
        Self {
            code: ErrorCode::IdentificationError,
            message: msg.into(),
        }
    }

    pub fn not_implemented(method: &str) -> Self {
        Self {
            code: ErrorCode::MethodNotImplemented,
            message: format!("method not implemented: {method}"),
        }
    }
}

impl From<IdentifyError> for BridgeError {
    fn from(e: IdentifyError) -> Self {
        Self::identification(e.to_string())
    }
}

impl std::fmt::Display for BridgeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for BridgeError {}
