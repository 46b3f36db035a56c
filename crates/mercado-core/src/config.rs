//! 압축 서비스 설정 구조체.
//!
//! 서비스 인스턴스마다 하나의 `CompressionConfig`를 소유한다.
//! 부분 업데이트는 `CompressionConfigPatch`로 얕은 병합(shallow merge)한다.

use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// deflate 계열 최소 압축 레벨
pub const MIN_LEVEL: u32 = 1;
/// deflate 계열 최대 압축 레벨
pub const MAX_LEVEL: u32 = 9;
/// deflate 계열 기본 압축 레벨
pub const DEFAULT_LEVEL: u32 = 6;

/// 압축 서비스 설정
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompressionConfig {
    /// 기본 압축 알고리즘 (`CompressionService::compress`에서 사용)
    #[serde(default = "default_algorithm")]
    pub default_algorithm: String,
    /// 활성화된 알고리즘 목록 (순서 유지)
    #[serde(default = "default_algorithms")]
    pub algorithms: Vec<String>,
    /// 누적 메트릭 기록 여부
    #[serde(default = "default_true")]
    pub enable_metrics: bool,
    /// 시도별 상세 로그 여부
    #[serde(default)]
    pub enable_logging: bool,
    /// gzip/zlib 실패 시 `none`으로 폴백
    #[serde(default = "default_true")]
    pub fallback_to_none: bool,
}

impl Default for CompressionConfig {
    fn default() -> Self {
        Self::default_config()
    }
}

impl CompressionConfig {
    /// 기본 설정
    pub fn default_config() -> Self {
        Self {
            default_algorithm: default_algorithm(),
            algorithms: default_algorithms(),
            enable_metrics: true,
            enable_logging: false,
            fallback_to_none: true,
        }
    }

    /// 알고리즘이 활성화 목록에 있는지
    pub fn is_enabled(&self, name: &str) -> bool {
        self.algorithms.iter().any(|a| a == name)
    }

    /// 부분 설정 병합. 주어진 키만 교체한다.
    pub fn apply(&mut self, patch: CompressionConfigPatch) {
        if let Some(default_algorithm) = patch.default_algorithm {
            self.default_algorithm = default_algorithm;
        }
        if let Some(algorithms) = patch.algorithms {
            self.algorithms = algorithms;
        }
        if let Some(enable_metrics) = patch.enable_metrics {
            self.enable_metrics = enable_metrics;
        }
        if let Some(enable_logging) = patch.enable_logging {
            self.enable_logging = enable_logging;
        }
        if let Some(fallback_to_none) = patch.fallback_to_none {
            self.fallback_to_none = fallback_to_none;
        }
    }

    /// 병합된 새 설정 반환 (원본 유지)
    pub fn merged(&self, patch: CompressionConfigPatch) -> Self {
        let mut config = self.clone();
        config.apply(patch);
        config
    }

    /// 설정값 검증
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.default_algorithm.trim().is_empty() {
            return Err(CoreError::Config(
                "default_algorithm이 비어 있습니다".to_string(),
            ));
        }
        if let Some(blank) = self.algorithms.iter().find(|a| a.trim().is_empty()) {
            return Err(CoreError::Config(format!(
                "algorithms에 빈 이름이 포함됨: {blank:?}"
            )));
        }
        Ok(())
    }
}

/// 부분 설정. `None`인 필드는 기존 값을 유지한다.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompressionConfigPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_algorithm: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub algorithms: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enable_metrics: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enable_logging: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fallback_to_none: Option<bool>,
}

/// 호출별 압축 옵션 (저장되지 않음)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompressionOptions {
    /// deflate 계열 압축 레벨 (1–9)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<u32>,
}

impl CompressionOptions {
    /// 레벨 지정 옵션 생성
    pub fn with_level(level: u32) -> Self {
        Self { level: Some(level) }
    }

    /// 유효 압축 레벨. 범위를 벗어나면 1–9로 보정한다.
    pub fn effective_level(&self) -> u32 {
        match self.level {
            None => DEFAULT_LEVEL,
            Some(level) if (MIN_LEVEL..=MAX_LEVEL).contains(&level) => level,
            Some(level) => {
                let clamped = level.clamp(MIN_LEVEL, MAX_LEVEL);
                warn!(requested = level, clamped, "압축 레벨 범위 초과, 보정됨");
                clamped
            }
        }
    }
}

// ============================================================
// 기본값 함수
// ============================================================

fn default_true() -> bool {
    true
}

fn default_algorithm() -> String {
    "gzip".to_string()
}

fn default_algorithms() -> Vec<String> {
    ["gzip", "zlib", "lz", "none"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = CompressionConfig::default_config();
        assert_eq!(config.default_algorithm, "gzip");
        assert_eq!(config.algorithms, vec!["gzip", "zlib", "lz", "none"]);
        assert!(config.enable_metrics);
        assert!(!config.enable_logging);
        assert!(config.fallback_to_none);
    }

    #[test]
    fn patch_replaces_only_given_keys() {
        let mut config = CompressionConfig::default_config();
        config.apply(CompressionConfigPatch {
            fallback_to_none: Some(false),
            ..Default::default()
        });
        assert!(!config.fallback_to_none);
        assert_eq!(config.default_algorithm, "gzip");
        assert!(config.enable_metrics);
    }

    #[test]
    fn patch_replaces_algorithm_list_wholesale() {
        let config = CompressionConfig::default_config().merged(CompressionConfigPatch {
            algorithms: Some(vec!["zlib".into()]),
            ..Default::default()
        });
        assert_eq!(config.algorithms, vec!["zlib"]);
        assert!(!config.is_enabled("gzip"));
    }

    #[test]
    fn missing_fields_use_serde_defaults() {
        let config: CompressionConfig =
            serde_json::from_str(r#"{"enable_logging": true}"#).unwrap();
        assert!(config.enable_logging);
        assert_eq!(config.default_algorithm, "gzip");
        assert!(config.fallback_to_none);
    }

    #[test]
    fn validate_rejects_blank_names() {
        let mut config = CompressionConfig::default_config();
        config.algorithms.push("  ".into());
        assert!(matches!(config.validate(), Err(CoreError::Config(_))));

        let mut config = CompressionConfig::default_config();
        config.default_algorithm = String::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn level_defaults_and_clamps() {
        assert_eq!(CompressionOptions::default().effective_level(), 6);
        assert_eq!(CompressionOptions::with_level(3).effective_level(), 3);
        assert_eq!(CompressionOptions::with_level(0).effective_level(), 1);
        assert_eq!(CompressionOptions::with_level(42).effective_level(), 9);
    }
}
