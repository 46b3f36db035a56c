//! 누적 메트릭 기록기.
//!
//! 해제 호출은 `&self`로 들어오므로 내부 가변성(`parking_lot::Mutex`)을 쓴다.

use chrono::Utc;
use mercado_core::models::result::DecompressionResult;
use mercado_core::models::telemetry::CompressionMetrics;
use parking_lot::Mutex;

#[derive(Debug, Default)]
pub struct MetricsRecorder {
    inner: Mutex<CompressionMetrics>,
}

impl MetricsRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// 성공한 해제 기록
    pub fn record_success<T>(&self, result: &DecompressionResult<T>) {
        let mut metrics = self.inner.lock();
        metrics.total_operations += 1;
        *metrics
            .successes
            .entry(result.algorithm.clone())
            .or_insert(0) += 1;
        metrics.total_original_size += result.original_size as u64;
        metrics.total_decompressed_size += result.decompressed_size as u64;
        metrics.total_processing_ms += result.processing_time_ms;
        metrics.last_compression_ratio = Some(result.compression_ratio);
        metrics.last_operation_at = Some(Utc::now());
    }

    /// 게이트 통과 실패로 그대로 반환된 호출 기록
    pub fn record_passthrough(&self, processing_ms: f64) {
        let mut metrics = self.inner.lock();
        metrics.total_operations += 1;
        metrics.passthroughs += 1;
        metrics.total_processing_ms += processing_ms;
        metrics.last_operation_at = Some(Utc::now());
    }

    /// 최종 실패 기록
    pub fn record_failure(&self, processing_ms: f64) {
        let mut metrics = self.inner.lock();
        metrics.total_operations += 1;
        metrics.failures += 1;
        metrics.total_processing_ms += processing_ms;
        metrics.last_operation_at = Some(Utc::now());
    }

    pub fn snapshot(&self) -> CompressionMetrics {
        self.inner.lock().clone()
    }

    pub fn reset(&self) {
        *self.inner.lock() = CompressionMetrics::default();
    }
}
