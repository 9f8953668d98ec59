use std::sync::Arc;

use serde::de::DeserializeOwned;
use tauri::{plugin::PluginApi, AppHandle, Runtime};

use langid_core::domain::settings::{EngineChoice, IdentifierSettings};
use langid_core::infra::identifier::{LanguageIdentifier, NoopIdentifier};

/// 実際に使うエンジン
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Resolved {
    Native,
    Lingua,
    Noop,
}

/// 設定とプラットフォームから使用エンジンを決める（デスクトップに native は無い）
fn resolve(choice: EngineChoice, mobile: bool) -> Resolved {
    match choice {
        EngineChoice::Native if mobile => Resolved::Native,
        EngineChoice::Native | EngineChoice::Lingua => Resolved::Lingua,
        EngineChoice::Noop => Resolved::Noop,
    }
}

/// 言語識別エンジンを構築する（モバイル: ネイティブ, デスクトップ: lingua, 他: Noop）
pub fn create_identifier<R: Runtime, C: DeserializeOwned>(
    app: &AppHandle<R>,
    api: PluginApi<R, C>,
    settings: &IdentifierSettings,
) -> crate::Result<Arc<dyn LanguageIdentifier>> {
    let resolved = resolve(settings.engine, cfg!(mobile));
    if resolved == Resolved::Lingua && settings.engine == EngineChoice::Native {
        log::warn!("No native language identifier on this platform, falling back to lingua");
    }

    match resolved {
        Resolved::Native => native(app, api),
        Resolved::Lingua => Ok(lingua()),
        Resolved::Noop => {
            log::info!("Using Noop language identifier");
            Ok(Arc::new(NoopIdentifier))
        }
    }
}

#[cfg(mobile)]
fn native<R: Runtime, C: DeserializeOwned>(
    app: &AppHandle<R>,
    api: PluginApi<R, C>,
) -> crate::Result<Arc<dyn LanguageIdentifier>> {
    let identifier = crate::mobile::register(app, api)?;
    log::info!("Native platform language identifier selected");
    Ok(Arc::new(identifier))
}

#[cfg(not(mobile))]
fn native<R: Runtime, C: DeserializeOwned>(
    _app: &AppHandle<R>,
    _api: PluginApi<R, C>,
) -> crate::Result<Arc<dyn LanguageIdentifier>> {
    Ok(lingua())
}

fn lingua() -> Arc<dyn LanguageIdentifier> {
    #[cfg(feature = "lingua")]
    {
        use langid_core::infra::identifier::lingua::LinguaIdentifier;
        log::info!("lingua language identifier selected");
        Arc::new(LinguaIdentifier::new())
    }

    #[cfg(not(feature = "lingua"))]
    {
        log::warn!("lingua feature disabled, falling back to Noop language identifier");
        Arc::new(NoopIdentifier)
    }
}
