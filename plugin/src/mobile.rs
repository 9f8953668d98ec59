//! モバイル端末のネイティブ言語識別器へのブリッジ
//!
//! Tauri のモバイルプラグイン機構で Kotlin / Swift 側のプラグインを登録し、
//! `run_mobile_plugin` で識別を依頼する。呼び出しはブロッキングなので
//! `spawn_blocking` 上で実行する。

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tauri::{
    plugin::{PluginApi, PluginHandle},
    AppHandle, Runtime,
};

use langid_core::domain::language::{IdentifiedLanguage, IdentifyOptions};
use langid_core::infra::identifier::{IdentifyError, LanguageIdentifier};

#[cfg(target_os = "android")]
const PLUGIN_IDENTIFIER: &str = "app.tauri.languageid";

#[cfg(target_os = "ios")]
tauri::ios_plugin_binding!(init_plugin_language_id);

/// ネイティブプラグインを登録する
pub fn register<R: Runtime, C: DeserializeOwned>(
    _app: &AppHandle<R>,
    api: PluginApi<R, C>,
) -> crate::Result<NativeIdentifier<R>> {
    #[cfg(target_os = "android")]
    let handle = api.register_android_plugin(PLUGIN_IDENTIFIER, "LanguageIdPlugin")?;
    #[cfg(target_os = "ios")]
    let handle = api.register_ios_plugin(init_plugin_language_id)?;

    Ok(NativeIdentifier { handle })
}

/// ネイティブ側へ渡すペイロード
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct IdentifyPayload {
    text: String,
    confidence_threshold: Option<f32>,
}

/// `identifyLanguage` のネイティブ応答
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SingleResponse {
    language_code: Option<String>,
}

/// `identifyPossibleLanguages` のネイティブ応答
#[derive(Debug, Deserialize)]
struct CandidatesResponse {
    languages: Vec<IdentifiedLanguage>,
}

/// プラットフォームの言語識別器（Android / iOS）
pub struct NativeIdentifier<R: Runtime> {
    handle: PluginHandle<R>,
}

impl<R: Runtime> NativeIdentifier<R> {
    async fn run<T>(&self, command: &'static str, payload: IdentifyPayload) -> Result<T, IdentifyError>
    where
        T: DeserializeOwned + Send + 'static,
    {
        let handle = self.handle.clone();
        tokio::task::spawn_blocking(move || handle.run_mobile_plugin::<T>(command, payload))
            .await
            .map_err(|e| IdentifyError::Failed(format!("native task failed: {e}")))?
            .map_err(|e| IdentifyError::Failed(e.to_string()))
    }
}

#[async_trait]
impl<R: Runtime> LanguageIdentifier for NativeIdentifier<R> {
    async fn identify_language(
        &self,
        text: &str,
        options: &IdentifyOptions,
    ) -> Result<Option<String>, IdentifyError> {
        let payload = IdentifyPayload {
            text: text.to_string(),
            confidence_threshold: options.confidence_threshold,
        };
        let response: SingleResponse = self.run("identifyLanguage", payload).await?;
        Ok(response.language_code)
    }

    async fn identify_possible_languages(
        &self,
        text: &str,
        options: &IdentifyOptions,
    ) -> Result<Vec<IdentifiedLanguage>, IdentifyError> {
        let payload = IdentifyPayload {
            text: text.to_string(),
            confidence_threshold: options.confidence_threshold,
        };
        let response: CandidatesResponse = self.run("identifyPossibleLanguages", payload).await?;
        Ok(response.languages)
    }

    fn name(&self) -> &str {
        "native"
    }

    async fn close(&self) {
        let handle = self.handle.clone();
        let closed = tokio::task::spawn_blocking(move || {
            handle.run_mobile_plugin::<serde_json::Value>("close", ())
        })
        .await;
        if let Ok(Err(e)) = closed {
            log::warn!("Native identifier close failed: {e}");
        }
    }
}
