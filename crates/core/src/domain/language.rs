use serde::{Deserialize, Serialize};

/// 「判定不能」を表すタグ。応答には決して含めない。
pub const UNDETERMINED_TAG: &str = "und";

/// 単一判定のデフォルト信頼度しきい値
pub const DEFAULT_SINGLE_THRESHOLD: f32 = 0.5;

/// 候補一覧のデフォルト信頼度しきい値
pub const DEFAULT_CANDIDATES_THRESHOLD: f32 = 0.01;

// ─── IdentifiedLanguage ──────────────────────────────────────────

/// 言語候補（タグ + 信頼度）。アプリ層へは `{languageCode, confidence}` で返す。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdentifiedLanguage {
    /// 言語タグ (例: "en", "fr")
    pub language_code: String,
    /// 信頼度スコア (0.0–1.0)
    pub confidence: f32,
}

impl IdentifiedLanguage {
    pub fn new(language_code: impl Into<String>, confidence: f32) -> Self {
        Self {
            language_code: language_code.into(),
            confidence,
        }
    }

    pub fn is_undetermined(&self) -> bool {
        is_undetermined(&self.language_code)
    }
}

pub fn is_undetermined(tag: &str) -> bool {
    tag == UNDETERMINED_TAG
}

// ─── IdentifyOptions ─────────────────────────────────────────────

/// 識別エンジンに渡す呼び出しごとのオプション。
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct IdentifyOptions {
    /// 信頼度しきい値。None の場合はエンジン既定値を使う。
    pub confidence_threshold: Option<f32>,
}

impl IdentifyOptions {
    pub fn with_threshold(confidence_threshold: Option<f32>) -> Self {
        Self {
            confidence_threshold,
        }
    }

    pub fn single_threshold(&self) -> f32 {
        self.confidence_threshold.unwrap_or(DEFAULT_SINGLE_THRESHOLD)
    }

    pub fn candidates_threshold(&self) -> f32 {
        self.confidence_threshold.unwrap_or(DEFAULT_CANDIDATES_THRESHOLD)
    }
}

// ─── 結果の正規化 ────────────────────────────────────────────────

/// 単一判定結果から "und" を取り除く。
pub fn normalize_single(tag: Option<String>) -> Option<String> {
    tag.filter(|t| !t.is_empty() && !is_undetermined(t))
}

/// 候補一覧を正規化する。先頭（最有力）が "und" なら判定不能として空を返す。
/// 並び順はエンジンのものをそのまま使う。
pub fn normalize_candidates(candidates: Vec<IdentifiedLanguage>) -> Vec<IdentifiedLanguage> {
    let undetermined = candidates
        .first()
        .map_or(true, IdentifiedLanguage::is_undetermined);
    if undetermined {
        Vec::new()
    } else {
        candidates
    }
}
