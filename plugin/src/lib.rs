//! 言語識別 Tauri プラグイン
//!
//! `LanguageIdBridge` を構築して State として登録し、webview にコマンドとして公開する。
//! Android / iOS ではネイティブの言語識別器、デスクトップでは lingua を使う。

mod commands;
mod engine;
mod error;
#[cfg(mobile)]
mod mobile;

use std::sync::Arc;

use tauri::{
    plugin::{Builder, TauriPlugin},
    Manager, Runtime,
};

use langid_core::domain::settings::IdentifierSettings;
use langid_core::usecase::bridge::LanguageIdBridge;

pub use error::{Error, Result};

/// プラグイン名（`plugin:language-id|...` で呼び出す）
pub const PLUGIN_NAME: &str = "language-id";

/// プラグインを構築する。設定は `plugins.language-id` セクションから読む。
pub fn init<R: Runtime>() -> TauriPlugin<R, Option<IdentifierSettings>> {
    Builder::<R, Option<IdentifierSettings>>::new(PLUGIN_NAME)
        .invoke_handler(tauri::generate_handler![
            commands::call_method,
            commands::identify_language,
            commands::identify_languages,
            commands::get_metrics,
        ])
        .setup(|app, api| {
            let settings = api.config().clone().unwrap_or_default();
            settings.validate()?;

            let identifier = engine::create_identifier(app, api, &settings)?;
            let bridge = LanguageIdBridge::new(identifier, settings);
            log::info!("Language identifier '{}' ready", bridge.identifier_name());

            app.manage(Arc::new(bridge));
            Ok(())
        })
        .build()
}
