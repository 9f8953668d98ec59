use parking_lot::Mutex;
use serde::Serialize;

use crate::domain::error::ErrorCode;
use crate::domain::method::Method;

/// 保持するレイテンシ記録の上限
const LATENCY_CAP: usize = 1000;

/// ブリッジのローカルメトリクス収集器
pub struct BridgeMetrics {
    counters: Mutex<MetricsCounters>,
    latencies: Mutex<Vec<LatencyRecord>>,
}

#[derive(Debug, Default)]
struct MetricsCounters {
    calls_identify_language: u64,
    calls_identify_languages: u64,
    calls_legacy: u64,
    successes: u64,
    undetermined: u64,
    errors_invalid_argument: u64,
    errors_identification: u64,
    errors_not_implemented: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct LatencyRecord {
    pub method: String,
    pub duration_ms: u64,
    pub timestamp: String,
}

/// メトリクスサマリー（アプリ層に返す用）
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricsSummary {
    pub calls: CallCounts,
    pub successes: u64,
    pub undetermined: u64,
    pub error_counts: ErrorCounts,
    pub avg_latency_ms: Option<f64>,
    pub recent_latencies: Vec<LatencyRecord>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CallCounts {
    pub identify_language: u64,
    pub identify_languages: u64,
    pub legacy: u64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorCounts {
    pub invalid_argument: u64,
    pub identification: u64,
    pub not_implemented: u64,
}

impl BridgeMetrics {
    pub fn new() -> Self {
        Self {
            counters: Mutex::new(MetricsCounters::default()),
            latencies: Mutex::new(Vec::new()),
        }
    }

    pub fn inc_call(&self, method: Method) {
        let mut c = self.counters.lock();
        match method {
            Method::IdentifyLanguage => c.calls_identify_language += 1,
            Method::IdentifyLanguages => c.calls_identify_languages += 1,
            Method::StartLanguageIdentifier | Method::CloseLanguageIdentifier => {
                c.calls_legacy += 1
            }
        }
    }

    /// 成功応答を記録する。`empty` は判定不能（null / 空配列）の応答。
    pub fn inc_success(&self, empty: bool) {
        let mut c = self.counters.lock();
        c.successes += 1;
        if empty {
            c.undetermined += 1;
        }
    }

    pub fn inc_error(&self, code: ErrorCode) {
        let mut c = self.counters.lock();
        match code {
            ErrorCode::InvalidArgument => c.errors_invalid_argument += 1,
            ErrorCode::IdentificationError => c.errors_identification += 1,
            ErrorCode::MethodNotImplemented => c.errors_not_implemented += 1,
        }
    }

    pub fn record_latency(&self, method: &str, duration_ms: u64) {
        let record = LatencyRecord {
            method: method.to_string(),
            duration_ms,
            timestamp: chrono::Utc::now().to_rfc3339(),
        };
        let mut latencies = self.latencies.lock();
        latencies.push(record);
        if latencies.len() > LATENCY_CAP {
            let excess = latencies.len() - LATENCY_CAP;
            latencies.drain(0..excess);
        }
    }

    pub fn summary(&self) -> MetricsSummary {
        let c = self.counters.lock();
        let latencies = self.latencies.lock();

        let avg_latency_ms = if latencies.is_empty() {
            None
        } else {
            let total: f64 = latencies.iter().map(|r| r.duration_ms as f64).sum();
            Some(total / latencies.len() as f64)
        };

        let recent: Vec<LatencyRecord> = latencies.iter().rev().take(20).cloned().collect();

        MetricsSummary {
            calls: CallCounts {
                identify_language: c.calls_identify_language,
                identify_languages: c.calls_identify_languages,
                legacy: c.calls_legacy,
            },
            successes: c.successes,
            undetermined: c.undetermined,
            error_counts: ErrorCounts {
                invalid_argument: c.errors_invalid_argument,
                identification: c.errors_identification,
                not_implemented: c.errors_not_implemented,
            },
            avg_latency_ms,
            recent_latencies: recent,
        }
    }
}

impl Default for BridgeMetrics {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counters() {
        let m = BridgeMetrics::new();
        m.inc_call(Method::IdentifyLanguage);
        m.inc_call(Method::IdentifyLanguage);
        m.inc_call(Method::IdentifyLanguages);
        m.inc_call(Method::CloseLanguageIdentifier);
        m.inc_success(false);
        m.inc_success(true);
        m.inc_error(ErrorCode::InvalidArgument);
        m.inc_error(ErrorCode::MethodNotImplemented);

        let s = m.summary();
        assert_eq!(s.calls.identify_language, 2);
        assert_eq!(s.calls.identify_languages, 1);
        assert_eq!(s.calls.legacy, 1);
        assert_eq!(s.successes, 2);
        assert_eq!(s.undetermined, 1);
        assert_eq!(s.error_counts.invalid_argument, 1);
        assert_eq!(s.error_counts.identification, 0);
        assert_eq!(s.error_counts.not_implemented, 1);
    }

    #[test]
    fn test_latency_recording() {
        let m = BridgeMetrics::new();
        assert!(m.summary().avg_latency_ms.is_none());

        m.record_latency("identifyLanguage", 120);
        m.record_latency("identifyLanguages", 80);

        let s = m.summary();
        assert!((s.avg_latency_ms.unwrap() - 100.0).abs() < f64::EPSILON);
        assert_eq!(s.recent_latencies.len(), 2);
        assert_eq!(s.recent_latencies[0].method, "identifyLanguages");
    }

    #[test]
    fn test_latency_cap() {
        let m = BridgeMetrics::new();
        for i in 0..1100 {
            m.record_latency("identifyLanguage", i);
        }
        assert_eq!(m.latencies.lock().len(), LATENCY_CAP);
    }
}
