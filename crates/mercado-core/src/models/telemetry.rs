//! 압축 서비스 누적 메트릭 모델.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// 누적 메트릭 스냅샷 (`CompressionService::get_metrics`)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompressionMetrics {
    /// 전체 해제 호출 수 (통과 + 성공 + 실패)
    pub total_operations: u64,
    /// 알고리즘별 성공 횟수
    #[serde(default)]
    pub successes: BTreeMap<String, u64>,
    /// 게이트에서 걸러져 그대로 반환된 횟수
    pub passthroughs: u64,
    /// 최종 실패 횟수
    pub failures: u64,
    /// 성공한 호출의 입력 크기 합계
    pub total_original_size: u64,
    /// 성공한 호출의 출력 크기 합계
    pub total_decompressed_size: u64,
    /// 처리 시간 합계 (밀리초)
    pub total_processing_ms: f64,
    /// 마지막 성공 호출의 감소율
    pub last_compression_ratio: Option<f64>,
    /// 마지막 호출 시각
    pub last_operation_at: Option<DateTime<Utc>>,
}

impl CompressionMetrics {
    /// 성공 횟수 합계
    pub fn success_count(&self) -> u64 {
        self.successes.values().sum()
    }

    /// 특정 알고리즘 성공 횟수
    pub fn successes_for(&self, algorithm: &str) -> u64 {
        self.successes.get(algorithm).copied().unwrap_or(0)
    }

    /// 평균 처리 시간 (밀리초)
    pub fn average_processing_ms(&self) -> f64 {
        if self.total_operations == 0 {
            0.0
        } else {
            self.total_processing_ms / self.total_operations as f64
        }
    }
}
