use async_trait::async_trait;

use super::{IdentifyError, LanguageIdentifier};
use crate::domain::language::{IdentifiedLanguage, IdentifyOptions, UNDETERMINED_TAG};

/// NoopIdentifier: 常に「判定不能」を返す実装。
/// 利用可能なエンジンが無い環境でのフォールバック。
pub struct NoopIdentifier;

#[async_trait]
impl LanguageIdentifier for NoopIdentifier {
    async fn identify_language(
        &self,
        _text: &str,
        _options: &IdentifyOptions,
    ) -> Result<Option<String>, IdentifyError> {
        Ok(Some(UNDETERMINED_TAG.to_string()))
    }

    async fn identify_possible_languages(
        &self,
        _text: &str,
        _options: &IdentifyOptions,
    ) -> Result<Vec<IdentifiedLanguage>, IdentifyError> {
        Ok(vec![IdentifiedLanguage::new(UNDETERMINED_TAG, 1.0)])
    }

    fn name(&self) -> &str {
        "noop"
    }
}
