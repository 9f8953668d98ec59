#[cfg(feature = "lingua")]
pub mod lingua;
mod noop;

pub use noop::NoopIdentifier;

use async_trait::async_trait;

use crate::domain::language::{IdentifiedLanguage, IdentifyOptions};

/// 識別エンジンのエラー
#[derive(Debug, thiserror::Error)]
pub enum IdentifyError {
    #[error("Identifier not available: {0}")]
    NotAvailable(String),
    #[error("Identification failed: {0}")]
    Failed(String),
}

/// 言語識別エンジン trait。
///
/// 1 回の呼び出しにつき必ず 1 回だけ完了する。"und" の除去はブリッジ側で行うので、
/// 実装はエンジンの生の結果をそのまま返してよい。
#[async_trait]
pub trait LanguageIdentifier: Send + Sync {
    /// 最有力の言語タグを返す。判定不能なら "und" か None。
    async fn identify_language(
        &self,
        text: &str,
        options: &IdentifyOptions,
    ) -> Result<Option<String>, IdentifyError>;

    /// 候補一覧を信頼度の降順で返す。
    async fn identify_possible_languages(
        &self,
        text: &str,
        options: &IdentifyOptions,
    ) -> Result<Vec<IdentifiedLanguage>, IdentifyError>;

    /// エンジン名 (例: "lingua", "noop")。
    fn name(&self) -> &str;

    /// 保持しているリソースを解放する。次の呼び出しで必要に応じて再生成される。
    async fn close(&self) {}
}
