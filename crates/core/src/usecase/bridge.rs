use std::future::Future;
use std::sync::Arc;
use std::time::Instant;

use serde::Serialize;
use serde_json::Value;
use tokio::task::JoinHandle;

use crate::domain::error::{BridgeError, ErrorCode};
use crate::domain::language::{
    normalize_candidates, normalize_single, IdentifiedLanguage, IdentifyOptions,
};
use crate::domain::method::{require_text, Method, MethodCall, StartArgs};
use crate::domain::settings::IdentifierSettings;
use crate::infra::identifier::LanguageIdentifier;
use crate::infra::metrics::{BridgeMetrics, MetricsSummary};
use crate::usecase::responder::{MethodResult, Response};

/// 言語識別ブリッジ（アプリ層のメソッド呼び出しを識別エンジンへ中継する）
///
/// リクエスト間で共有する可変状態は持たない。メトリクスのみ内部で集計する。
pub struct LanguageIdBridge {
    identifier: Arc<dyn LanguageIdentifier>,
    settings: IdentifierSettings,
    metrics: BridgeMetrics,
}

impl LanguageIdBridge {
    pub fn new(identifier: Arc<dyn LanguageIdentifier>, settings: IdentifierSettings) -> Self {
        Self {
            identifier,
            settings,
            metrics: BridgeMetrics::new(),
        }
    }

    pub fn identifier_name(&self) -> &str {
        self.identifier.name()
    }

    pub fn settings(&self) -> &IdentifierSettings {
        &self.settings
    }

    pub fn metrics(&self) -> MetricsSummary {
        self.metrics.summary()
    }

    // ==================== Operations ====================

    /// `identifyLanguage`: 最有力の言語タグ。判定不能なら None。
    pub async fn identify_language(&self, arguments: &Value) -> Result<Option<String>, BridgeError> {
        self.observe(
            Method::IdentifyLanguage,
            Option::is_none,
            self.single(arguments, self.settings.options()),
        )
        .await
    }

    /// `identifyLanguages`: 信頼度降順の候補一覧。判定不能なら空。
    pub async fn identify_languages(
        &self,
        arguments: &Value,
    ) -> Result<Vec<IdentifiedLanguage>, BridgeError> {
        self.observe(
            Method::IdentifyLanguages,
            Vec::is_empty,
            self.candidates(arguments, self.settings.options()),
        )
        .await
    }

    /// `nlp#startLanguageIdentifier`: possibleLanguages に応じて単一/候補を切り替える。
    pub async fn start_language_identifier(&self, arguments: &Value) -> Response {
        self.observe(
            Method::StartLanguageIdentifier,
            is_empty_value,
            self.start(arguments),
        )
        .await
    }

    /// `nlp#closeLanguageIdentifier`: エンジンのリソースを解放する。
    pub async fn close(&self) {
        self.metrics.inc_call(Method::CloseLanguageIdentifier);
        self.identifier.close().await;
        self.metrics.inc_success(true);
        log::debug!("Identifier '{}' closed", self.identifier.name());
    }

    // ==================== Dispatch ====================

    /// メソッド名で振り分けて実行する。未知のメソッドはエンジンを呼ばずに失敗を返す。
    pub async fn dispatch(&self, call: &MethodCall) -> Response {
        let Some(method) = Method::from_name(&call.method) else {
            log::warn!("Method not implemented: {}", call.method);
            self.metrics.inc_error(ErrorCode::MethodNotImplemented);
            return Err(BridgeError::not_implemented(&call.method));
        };

        log::debug!("Dispatched {}", method.as_str());

        match method {
            Method::IdentifyLanguage => to_response(self.identify_language(&call.arguments).await),
            Method::IdentifyLanguages => {
                to_response(self.identify_languages(&call.arguments).await)
            }
            Method::StartLanguageIdentifier => {
                self.start_language_identifier(&call.arguments).await
            }
            Method::CloseLanguageIdentifier => {
                self.close().await;
                Ok(Value::Null)
            }
        }
    }

    /// 呼び出しを処理し、応答チャネルへ必ず 1 回だけ返す。
    pub async fn handle<R: MethodResult>(&self, call: MethodCall, result: R) {
        let request_id = uuid::Uuid::new_v4();
        log::debug!("[{request_id}] Received {}", call.method);

        let response = self.dispatch(&call).await;

        log::debug!(
            "[{request_id}] Responded {} ({})",
            call.method,
            if response.is_ok() { "success" } else { "error" }
        );
        result.send(response);
    }

    /// 呼び出しを tokio タスクとして実行する。
    ///
    /// エンジンがパニックしても IdentificationError で応答する。
    pub fn spawn<R: MethodResult>(self: Arc<Self>, call: MethodCall, result: R) -> JoinHandle<()> {
        tokio::spawn(async move {
            let request_id = uuid::Uuid::new_v4();
            log::debug!("[{request_id}] Received {}", call.method);

            let method = call.method.clone();
            let bridge = self.clone();
            let task = tokio::spawn(async move { bridge.dispatch(&call).await });

            let response = match task.await {
                Ok(response) => response,
                Err(e) => {
                    log::error!("[{request_id}] {method} task failed: {e}");
                    self.metrics.inc_error(ErrorCode::IdentificationError);
                    Err(BridgeError::identification(format!(
                        "identification task failed: {e}"
                    )))
                }
            };

            log::debug!(
                "[{request_id}] Responded {method} ({})",
                if response.is_ok() { "success" } else { "error" }
            );
            result.send(response);
        })
    }

    // ==================== Internals ====================

    async fn single(
        &self,
        arguments: &Value,
        options: IdentifyOptions,
    ) -> Result<Option<String>, BridgeError> {
        let text = require_text(arguments)?;
        self.identify_single(text, options).await
    }

    async fn candidates(
        &self,
        arguments: &Value,
        options: IdentifyOptions,
    ) -> Result<Vec<IdentifiedLanguage>, BridgeError> {
        let text = require_text(arguments)?;
        self.identify_candidates(text, options).await
    }

    async fn start(&self, arguments: &Value) -> Response {
        let args = StartArgs::parse(arguments)?;
        let options = match args.confidence {
            Some(c) => IdentifyOptions::with_threshold(Some(c)),
            None => self.settings.options(),
        };

        if args.possible_languages {
            to_response(self.identify_candidates(&args.text, options).await)
        } else {
            to_response(self.identify_single(&args.text, options).await)
        }
    }

    async fn identify_single(
        &self,
        text: &str,
        options: IdentifyOptions,
    ) -> Result<Option<String>, BridgeError> {
        log::debug!("Awaiting '{}' (single)", self.identifier.name());
        let tag = self
            .identifier
            .identify_language(text, &options)
            .await
            .map_err(|e| {
                log::warn!("Language identification failed: {e}");
                BridgeError::from(e)
            })?;

        let tag = normalize_single(tag);
        if tag.is_none() {
            log::debug!("No language was identified");
        }
        Ok(tag)
    }

    async fn identify_candidates(
        &self,
        text: &str,
        options: IdentifyOptions,
    ) -> Result<Vec<IdentifiedLanguage>, BridgeError> {
        log::debug!("Awaiting '{}' (candidates)", self.identifier.name());
        let candidates = self
            .identifier
            .identify_possible_languages(text, &options)
            .await
            .map_err(|e| {
                log::warn!("Possible language identification failed: {e}");
                BridgeError::from(e)
            })?;

        let candidates = normalize_candidates(candidates);
        if candidates.is_empty() {
            log::debug!("No languages were identified");
        }
        Ok(candidates)
    }

    /// メトリクス（呼び出し数・結果・レイテンシ）を記録しながら操作を実行する。
    async fn observe<T, F>(
        &self,
        method: Method,
        is_empty: fn(&T) -> bool,
        op: F,
    ) -> Result<T, BridgeError>
    where
        F: Future<Output = Result<T, BridgeError>>,
    {
        self.metrics.inc_call(method);
        let started = Instant::now();

        let result = op.await;

        self.metrics
            .record_latency(method.as_str(), started.elapsed().as_millis() as u64);
        match &result {
            Ok(value) => self.metrics.inc_success(is_empty(value)),
            Err(e) => self.metrics.inc_error(e.code),
        }
        result
    }
}

fn to_response<T: Serialize>(result: Result<T, BridgeError>) -> Response {
    let value = result?;
    serde_json::to_value(value)
        .map_err(|e| BridgeError::identification(format!("failed to serialize result: {e}")))
}

fn is_empty_value(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Array(items) => items.is_empty(),
        _ => false,
    }
}
