use std::sync::Arc;

use serde_json::Value;
use tauri::State;

use langid_core::domain::error::BridgeError;
use langid_core::domain::language::IdentifiedLanguage;
use langid_core::domain::method::MethodCall;
use langid_core::infra::metrics::MetricsSummary;
use langid_core::usecase::bridge::LanguageIdBridge;
use langid_core::usecase::responder;

/// コマンドエラー型（webview には `{code, message}` で返す）
#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error(transparent)]
    Bridge(#[from] BridgeError),
}

impl serde::Serialize for CommandError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        match self {
            CommandError::Bridge(e) => e.serialize(serializer),
        }
    }
}

type CmdResult<T> = Result<T, CommandError>;

// --- Commands ---

/// メソッド名 + 引数でディスパッチする汎用エントリポイント
#[tauri::command]
pub(crate) async fn call_method(
    bridge: State<'_, Arc<LanguageIdBridge>>,
    method: String,
    arguments: Option<Value>,
) -> CmdResult<Value> {
    let call = MethodCall::new(method, arguments.unwrap_or(Value::Null));
    let (result, rx) = responder::channel();
    bridge.inner().clone().spawn(call, result);

    let response = rx
        .await
        .map_err(|_| BridgeError::identification("response channel closed"))?;
    Ok(response?)
}

#[tauri::command]
pub(crate) async fn identify_language(
    bridge: State<'_, Arc<LanguageIdBridge>>,
    text: Option<Value>,
) -> CmdResult<Option<String>> {
    let tag = bridge
        .identify_language(&text.unwrap_or(Value::Null))
        .await?;
    Ok(tag)
}

#[tauri::command]
pub(crate) async fn identify_languages(
    bridge: State<'_, Arc<LanguageIdBridge>>,
    text: Option<Value>,
) -> CmdResult<Vec<IdentifiedLanguage>> {
    let candidates = bridge
        .identify_languages(&text.unwrap_or(Value::Null))
        .await?;
    Ok(candidates)
}

#[tauri::command]
pub(crate) fn get_metrics(bridge: State<'_, Arc<LanguageIdBridge>>) -> MetricsSummary {
    bridge.metrics()
}
