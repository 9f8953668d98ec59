//! lingua クレートによるプロセス内言語識別エンジン
//!
//! n-gram モデルで全対応言語の信頼度を計算し、ISO 639-1 タグで返す。
//! 計算は CPU バウンドなので `spawn_blocking` 上で実行する。
//! 検出器は初回呼び出し時に構築し、`close` で破棄する。

use std::sync::Arc;

use async_trait::async_trait;
use ::lingua::{LanguageDetector, LanguageDetectorBuilder};
use parking_lot::Mutex;

use super::{IdentifyError, LanguageIdentifier};
use crate::domain::language::{IdentifiedLanguage, IdentifyOptions, UNDETERMINED_TAG};

/// lingua 言語識別エンジン
pub struct LinguaIdentifier {
    detector: Mutex<Option<Arc<LanguageDetector>>>,
}

impl LinguaIdentifier {
    pub fn new() -> Self {
        Self {
            detector: Mutex::new(None),
        }
    }

    /// 検出器が構築済みかどうか
    pub fn is_loaded(&self) -> bool {
        self.detector.lock().is_some()
    }

    fn detector(&self) -> Arc<LanguageDetector> {
        let mut guard = self.detector.lock();
        guard
            .get_or_insert_with(|| {
                log::info!("Building lingua language detector");
                Arc::new(LanguageDetectorBuilder::from_all_languages().build())
            })
            .clone()
    }

    /// 信頼度降順の候補をしきい値で絞り込んで返す
    async fn candidates(
        &self,
        text: &str,
        threshold: f32,
    ) -> Result<Vec<IdentifiedLanguage>, IdentifyError> {
        if text.trim().is_empty() {
            return Ok(Vec::new());
        }

        let detector = self.detector();
        let text = text.to_string();
        let values = tokio::task::spawn_blocking(move || {
            detector.compute_language_confidence_values(text)
        })
        .await
        .map_err(|e| IdentifyError::Failed(format!("lingua task failed: {e}")))?;

        Ok(values
            .into_iter()
            .map(|(language, confidence)| {
                IdentifiedLanguage::new(language.iso_code_639_1().to_string(), confidence as f32)
            })
            .filter(|c| c.confidence >= threshold && c.confidence > 0.0)
            .collect())
    }
}

impl Default for LinguaIdentifier {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LanguageIdentifier for LinguaIdentifier {
    async fn identify_language(
        &self,
        text: &str,
        options: &IdentifyOptions,
    ) -> Result<Option<String>, IdentifyError> {
        let candidates = self.candidates(text, options.single_threshold()).await?;
        let tag = candidates
            .into_iter()
            .next()
            .map(|c| c.language_code)
            .unwrap_or_else(|| UNDETERMINED_TAG.to_string());
        Ok(Some(tag))
    }

    async fn identify_possible_languages(
        &self,
        text: &str,
        options: &IdentifyOptions,
    ) -> Result<Vec<IdentifiedLanguage>, IdentifyError> {
        let candidates = self.candidates(text, options.candidates_threshold()).await?;
        if candidates.is_empty() {
            return Ok(vec![IdentifiedLanguage::new(UNDETERMINED_TAG, 1.0)]);
        }
        Ok(candidates)
    }

    fn name(&self) -> &str {
        "lingua"
    }

    async fn close(&self) {
        if self.detector.lock().take().is_some() {
            log::info!("Released lingua language detector");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_blank_text_is_undetermined() {
        let id = LinguaIdentifier::new();
        let opts = IdentifyOptions::default();

        let tag = id.identify_language("   ", &opts).await.unwrap();
        assert_eq!(tag.as_deref(), Some("und"));

        let list = id.identify_possible_languages("", &opts).await.unwrap();
        assert_eq!(list.len(), 1);
        assert!(list[0].is_undetermined());

        // 空文字では検出器を構築しない
        assert!(!id.is_loaded());
    }

    #[tokio::test]
    async fn test_identifies_english() {
        let id = LinguaIdentifier::new();
        let tag = id
            .identify_language(
                "The quick brown fox jumps over the lazy dog and keeps running through the field.",
                &IdentifyOptions::default(),
            )
            .await
            .unwrap();
        assert_eq!(tag.as_deref(), Some("en"));
    }

    #[tokio::test]
    async fn test_candidates_sorted_descending() {
        let id = LinguaIdentifier::new();
        let list = id
            .identify_possible_languages(
                "Bonjour tout le monde, comment allez-vous aujourd'hui ?",
                &IdentifyOptions::default(),
            )
            .await
            .unwrap();
        assert_eq!(list[0].language_code, "fr");
        for pair in list.windows(2) {
            assert!(pair[0].confidence >= pair[1].confidence);
        }
    }

    #[tokio::test]
    async fn test_close_releases_detector() {
        let id = LinguaIdentifier::new();
        id.identify_language("Guten Morgen, wie geht es dir?", &IdentifyOptions::default())
            .await
            .unwrap();
        assert!(id.is_loaded());

        id.close().await;
        assert!(!id.is_loaded());
    }
}
