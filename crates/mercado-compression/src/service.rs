//! 압축 서비스: 자동 감지 해제, 명시 알고리즘 경로, 진단과 메트릭.
//!
//! 레지스트리와 설정은 인스턴스 단위로 소유한다. 설정이 다른 소비자는
//! 별도 인스턴스를 만든다.

use crate::diagnostics;
use crate::fallback::first_success;
use crate::metrics::MetricsRecorder;
use crate::normalizer::{classify, contains_buffer};
use crate::registry::AlgorithmRegistry;
use mercado_core::config::{CompressionConfig, CompressionConfigPatch, CompressionOptions};
use mercado_core::error::CoreError;
use mercado_core::models::diagnostic::DiagnosticReport;
use mercado_core::models::result::{compression_ratio, serialized_len, DecompressionResult};
use mercado_core::models::telemetry::CompressionMetrics;
use mercado_core::models::wire::WireInput;
use mercado_core::ports::codec::{AlgorithmKind, Codec};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};

/// 자동 감지 시 시도하는 압축 알고리즘 (우선순위 순)
const DETECTION_PRIORITY: [AlgorithmKind; 2] = [AlgorithmKind::Gzip, AlgorithmKind::Zlib];

#[derive(Debug)]
pub struct CompressionService {
    registry: AlgorithmRegistry,
    config: CompressionConfig,
    metrics: MetricsRecorder,
}

impl CompressionService {
    /// 기본 설정 + 내장 코덱
    pub fn new() -> Self {
        Self::with_config(CompressionConfig::default_config())
    }

    pub fn with_config(config: CompressionConfig) -> Self {
        Self::with_registry(config, AlgorithmRegistry::with_builtins())
    }

    pub fn with_registry(config: CompressionConfig, registry: AlgorithmRegistry) -> Self {
        Self {
            registry,
            config,
            metrics: MetricsRecorder::new(),
        }
    }

    pub fn config(&self) -> &CompressionConfig {
        &self.config
    }

    /// 코덱 등록. 같은 이름은 교체되며 이전 코덱을 반환한다.
    pub fn register_algorithm(&mut self, codec: Arc<dyn Codec>) -> Option<Arc<dyn Codec>> {
        let name = codec.name().to_string();
        let previous = self.registry.register(codec);
        info!(algorithm = %name, replaced = previous.is_some(), "압축 알고리즘 등록");
        previous
    }

    /// 부분 설정 병합. 검증에 실패하면 기존 설정을 유지한다.
    pub fn update_config(&mut self, patch: CompressionConfigPatch) -> Result<(), CoreError> {
        let merged = self.config.merged(patch);
        merged.validate()?;
        self.config = merged;
        debug!(config = ?self.config, "압축 설정 갱신");
        Ok(())
    }

    pub fn is_algorithm_available(&self, name: &str) -> bool {
        self.registry.contains(name)
    }

    /// 등록 순서대로 알고리즘 이름
    pub fn get_available_algorithms(&self) -> Vec<String> {
        self.registry.names()
    }

    pub fn get_metrics(&self) -> CompressionMetrics {
        self.metrics.snapshot()
    }

    pub fn reset_metrics(&self) {
        self.metrics.reset();
    }

    /// 해제를 시도할 만한 입력인지.
    ///
    /// 문자열, 바이트, 0–255 숫자 배열, Buffer 래퍼를 포함한 객체만 true.
    pub fn should_attempt_decompression(&self, input: &WireInput) -> bool {
        match input {
            WireInput::Json(value @ Value::Object(_)) => contains_buffer(value),
            other => classify(other).is_recognized(),
        }
    }

    /// 자동 감지 시도 순서.
    ///
    /// 활성화되어 있고 등록된 gzip, zlib 순서. `fallback_to_none`이면 마지막에 `none`.
    pub fn detection_chain(&self) -> Vec<String> {
        let mut chain: Vec<String> = DETECTION_PRIORITY
            .iter()
            .map(AlgorithmKind::as_str)
            .filter(|name| self.config.is_enabled(name) && self.registry.contains(name))
            .map(str::to_string)
            .collect();
        let none = AlgorithmKind::None.as_str();
        if self.config.fallback_to_none && self.registry.contains(none) {
            chain.push(none.to_string());
        }
        chain
    }

    /// 알고리즘을 모르는 입력을 해제한다.
    ///
    /// 게이트를 통과하지 못한 입력은 그대로 `none`으로 반환된다.
    /// 체인의 모든 시도가 실패하면 `AllAlgorithmsExhausted`.
    pub fn detect_and_decompress(
        &self,
        input: &WireInput,
        options: &CompressionOptions,
    ) -> Result<DecompressionResult, CoreError> {
        let started = Instant::now();
        let original_size = input.original_size();

        if !self.should_attempt_decompression(input) {
            debug!(kind = input.kind(), "압축 데이터 형태가 아님, 그대로 반환");
            let result = passthrough(input, original_size, started);
            self.record(|m| m.record_passthrough(result.processing_time_ms));
            return Ok(result);
        }

        let chain = self.detection_chain();
        let attempts = chain.iter().filter_map(|name| {
            self.registry
                .get(name)
                .map(|codec| (name.clone(), move || codec.decompress(input, options)))
        });
        let outcome = first_success(attempts);

        if self.config.enable_logging {
            for failure in &outcome.failures {
                debug!(
                    algorithm = %failure.algorithm,
                    error = %failure.error,
                    "해제 시도 실패, 다음 알고리즘 시도"
                );
            }
        }

        let attempted = outcome.attempted();
        match outcome.success {
            Some((algorithm, data)) => {
                let result = DecompressionResult::measure(data, algorithm, original_size, started);
                if self.config.enable_logging {
                    debug!(
                        algorithm = %result.algorithm,
                        original_size = result.original_size,
                        decompressed_size = result.decompressed_size,
                        ratio = result.compression_ratio,
                        elapsed_ms = result.processing_time_ms,
                        "자동 감지 해제 성공"
                    );
                }
                self.record(|m| m.record_success(&result));
                Ok(result)
            }
            None => {
                warn!(attempted = ?attempted, kind = input.kind(), "모든 알고리즘 해제 실패");
                self.record(|m| m.record_failure(elapsed_ms(started)));
                Err(CoreError::AllAlgorithmsExhausted { attempted })
            }
        }
    }

    /// 자동 감지 해제 후 호출자 타입으로 변환
    pub fn detect_and_decompress_as<T: DeserializeOwned>(
        &self,
        input: &WireInput,
        options: &CompressionOptions,
    ) -> Result<DecompressionResult<T>, CoreError> {
        self.detect_and_decompress(input, options)?.deserialize()
    }

    /// 지정한 알고리즘으로만 해제. 게이트와 폴백 없이 오류를 그대로 전파한다.
    pub fn decompress_with_algorithm(
        &self,
        input: &WireInput,
        algorithm: &str,
        options: &CompressionOptions,
    ) -> Result<DecompressionResult, CoreError> {
        let started = Instant::now();
        let codec = self.registry.require(algorithm)?;

        match codec.decompress(input, options) {
            Ok(data) => {
                let result =
                    DecompressionResult::measure(data, algorithm, input.original_size(), started);
                if self.config.enable_logging {
                    debug!(
                        algorithm,
                        decompressed_size = result.decompressed_size,
                        ratio = result.compression_ratio,
                        "명시 알고리즘 해제 성공"
                    );
                }
                self.record(|m| m.record_success(&result));
                Ok(result)
            }
            Err(e) => {
                warn!(algorithm, error = %e, "명시 알고리즘 해제 실패");
                self.record(|m| m.record_failure(elapsed_ms(started)));
                Err(e)
            }
        }
    }

    /// 지정한 알고리즘으로 압축
    pub fn compress_with_algorithm<T: Serialize + ?Sized>(
        &self,
        data: &T,
        algorithm: &str,
        options: &CompressionOptions,
    ) -> Result<String, CoreError> {
        let codec = self.registry.require(algorithm)?;
        let value = serde_json::to_value(data)?;
        let original_size = serialized_len(&value);

        let encoded = codec.compress(&value, options)?;
        if self.config.enable_logging {
            debug!(
                algorithm,
                original_size,
                compressed_size = encoded.len(),
                ratio = compression_ratio(original_size, encoded.len()),
                level = options.effective_level(),
                "압축 완료"
            );
        }
        Ok(encoded)
    }

    /// 설정의 기본 알고리즘으로 압축
    pub fn compress<T: Serialize + ?Sized>(
        &self,
        data: &T,
        options: &CompressionOptions,
    ) -> Result<String, CoreError> {
        self.compress_with_algorithm(data, &self.config.default_algorithm, options)
    }

    pub fn diagnose_data(&self, input: &WireInput) -> DiagnosticReport {
        diagnostics::diagnose(input)
    }

    fn record(&self, f: impl FnOnce(&MetricsRecorder)) {
        if self.config.enable_metrics {
            f(&self.metrics);
        }
    }
}

impl Default for CompressionService {
    fn default() -> Self {
        Self::new()
    }
}

fn passthrough(input: &WireInput, original_size: usize, started: Instant) -> DecompressionResult {
    let data = input.to_value();
    DecompressionResult {
        decompressed_size: serialized_len(&data),
        data,
        algorithm: AlgorithmKind::None.as_str().to_string(),
        original_size,
        compression_ratio: 0.0,
        processing_time_ms: elapsed_ms(started),
    }
}

fn elapsed_ms(started: Instant) -> f64 {
    started.elapsed().as_secs_f64() * 1_000.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codecs::DeflateCodec;
    use crate::normalizer::encode_base64;
    use serde::Deserialize;
    use serde_json::json;

    fn opts() -> CompressionOptions {
        CompressionOptions::default()
    }

    fn gzip_bytes(text: &str) -> Vec<u8> {
        DeflateCodec::gzip().deflate_bytes(text.as_bytes(), 6).unwrap()
    }

    fn buffer(bytes: &[u8]) -> Value {
        json!({"type": "Buffer", "data": bytes})
    }

    #[test]
    fn wrapped_gzip_buffer_is_detected() {
        let service = CompressionService::new();
        let input = WireInput::from(buffer(&gzip_bytes(r#"{"a":1}"#)));

        let result = service.detect_and_decompress(&input, &opts()).unwrap();
        assert_eq!(result.data, json!({"a": 1}));
        assert_eq!(result.algorithm, "gzip");
        assert!(result.compression_ratio.is_finite());
    }

    #[test]
    fn bare_json_string_falls_back_to_none() {
        let service = CompressionService::new();
        let result = service
            .detect_and_decompress(&WireInput::from(r#"{"a":1}"#), &opts())
            .unwrap();
        assert_eq!(result.data, json!({"a": 1}));
        assert_eq!(result.algorithm, "none");
        assert_eq!(result.compression_ratio, 0.0);
    }

    #[test]
    fn plain_json_texts_all_fall_back_to_none() {
        let service = CompressionService::new();
        // 숫자만 있는 텍스트는 base64로도 디코딩된다
        for text in ["1400", "1500", "140000", "0", "true", "null", "[1]", r#""hola""#, r#"{"a":1}"#] {
            let result = service
                .detect_and_decompress(&WireInput::from(text), &opts())
                .unwrap();
            let expected: Value = serde_json::from_str(text).unwrap();
            assert_eq!(result.algorithm, "none", "{text}");
            assert_eq!(result.data, expected, "{text}");
        }
    }

    #[test]
    fn explicit_zlib_roundtrip() {
        let service = CompressionService::new();
        let encoded = service
            .compress_with_algorithm(&json!({"a": 1}), "zlib", &opts())
            .unwrap();
        let result = service
            .decompress_with_algorithm(&WireInput::from(encoded), "zlib", &opts())
            .unwrap();
        assert_eq!(result.data, json!({"a": 1}));
        assert_eq!(result.algorithm, "zlib");
    }

    #[test]
    fn diagnose_gzip_header() {
        let service = CompressionService::new();
        let report = service.diagnose_data(&WireInput::from(json!([0x1f, 0x8b, 0, 0])));
        assert!(report.detected_algorithms.gzip);
        assert!(report.is_likely_compressed);
    }

    #[test]
    fn same_bytes_in_every_shape_give_same_data() {
        let service = CompressionService::new();
        let bytes = gzip_bytes(r#"{"cupones":[{"codigo":"PROMO10"}]}"#);

        let inputs = [
            WireInput::from(encode_base64(&bytes)),
            WireInput::from(json!(bytes)),
            WireInput::from(buffer(&bytes)),
            WireInput::from(json!({"body": {"payload": buffer(&bytes)}})),
            WireInput::from(bytes.clone()),
        ];
        let expected = json!({"cupones": [{"codigo": "PROMO10"}]});
        for input in &inputs {
            let result = service.detect_and_decompress(input, &opts()).unwrap();
            assert_eq!(result.data, expected, "input kind {}", input.kind());
            assert_eq!(result.algorithm, "gzip");
        }
    }

    #[test]
    fn zlib_stream_is_second_in_chain() {
        let service = CompressionService::new();
        let encoded = service
            .compress_with_algorithm(&json!([1, 2, 3]), "zlib", &opts())
            .unwrap();
        let result = service
            .detect_and_decompress(&WireInput::from(encoded), &opts())
            .unwrap();
        assert_eq!(result.algorithm, "zlib");
        assert_eq!(result.data, json!([1, 2, 3]));
    }

    #[test]
    fn undecodable_bytes_exhaust_every_algorithm() {
        let service = CompressionService::new();
        let err = service
            .detect_and_decompress(&WireInput::from(vec![0xff_u8, 0xfe, 0xfd]), &opts())
            .unwrap_err();
        match err {
            CoreError::AllAlgorithmsExhausted { attempted } => {
                assert_eq!(attempted, vec!["gzip", "zlib", "none"]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn without_none_fallback_plain_json_fails() {
        let mut service = CompressionService::new();
        service
            .update_config(CompressionConfigPatch {
                fallback_to_none: Some(false),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(service.detection_chain(), vec!["gzip", "zlib"]);

        let err = service
            .detect_and_decompress(&WireInput::from(r#"{"a":1}"#), &opts())
            .unwrap_err();
        assert!(matches!(err, CoreError::AllAlgorithmsExhausted { .. }));
    }

    #[test]
    fn chain_honours_enabled_algorithms() {
        let mut service = CompressionService::new();
        service
            .update_config(CompressionConfigPatch {
                algorithms: Some(vec!["zlib".into(), "none".into()]),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(service.detection_chain(), vec!["zlib", "none"]);
        // 나머지 필드는 유지
        assert_eq!(service.config().default_algorithm, "gzip");
        assert!(service.config().fallback_to_none);
    }

    #[test]
    fn lz_is_never_in_the_chain() {
        let service = CompressionService::new();
        assert!(service.is_algorithm_available("lz"));
        assert!(!service.detection_chain().iter().any(|a| a == "lz"));
    }

    #[test]
    fn unrecognized_object_is_returned_unchanged() {
        let service = CompressionService::new();
        let value = json!({"id": 7, "nombre": "Sucursal Norte"});
        let result = service
            .detect_and_decompress(&WireInput::from(value.clone()), &opts())
            .unwrap();
        assert_eq!(result.data, value);
        assert_eq!(result.algorithm, "none");
        assert_eq!(result.compression_ratio, 0.0);
    }

    #[test]
    fn gate_rejects_primitives_and_plain_objects() {
        let service = CompressionService::new();
        assert!(service.should_attempt_decompression(&WireInput::from("abc")));
        assert!(service.should_attempt_decompression(&WireInput::from(vec![1_u8])));
        assert!(service.should_attempt_decompression(&WireInput::from(json!([1, 2]))));
        assert!(service.should_attempt_decompression(&WireInput::from(json!({
            "outer": buffer(&[1, 2])
        }))));
        assert!(!service.should_attempt_decompression(&WireInput::from(json!(42))));
        assert!(!service.should_attempt_decompression(&WireInput::from(json!(null))));
        assert!(!service.should_attempt_decompression(&WireInput::from(json!({"a": 1}))));
        assert!(!service.should_attempt_decompression(&WireInput::from(json!([1, 300]))));
    }

    #[test]
    fn explicit_errors_are_not_swallowed() {
        let service = CompressionService::new();
        let err = service
            .decompress_with_algorithm(&WireInput::from(r#"{"a":1}"#), "gzip", &opts())
            .unwrap_err();
        assert!(matches!(err, CoreError::Decode { .. }));

        let err = service
            .decompress_with_algorithm(&WireInput::from("x"), "brotli", &opts())
            .unwrap_err();
        assert!(matches!(err, CoreError::AlgorithmNotRegistered(_)));

        let err = service
            .compress_with_algorithm(&json!(1), "brotli", &opts())
            .unwrap_err();
        assert!(matches!(err, CoreError::AlgorithmNotRegistered(_)));
    }

    #[test]
    fn compress_uses_default_algorithm() {
        let mut service = CompressionService::new();
        let gz = service.compress(&json!({"a": 1}), &opts()).unwrap();
        assert!(gz.starts_with("H4sI"));

        service
            .update_config(CompressionConfigPatch {
                default_algorithm: Some("none".into()),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(service.compress(&json!({"a": 1}), &opts()).unwrap(), r#"{"a":1}"#);
    }

    #[test]
    fn invalid_patch_keeps_previous_config() {
        let mut service = CompressionService::new();
        let err = service.update_config(CompressionConfigPatch {
            default_algorithm: Some("  ".into()),
            ..Default::default()
        });
        assert!(matches!(err, Err(CoreError::Config(_))));
        assert_eq!(service.config().default_algorithm, "gzip");
    }

    #[test]
    fn registered_codec_is_usable() {
        struct Upper;

        impl Codec for Upper {
            fn name(&self) -> &str {
                "upper"
            }
            fn compress(&self, value: &Value, _: &CompressionOptions) -> Result<String, CoreError> {
                Ok(serde_json::to_string(value)?.to_uppercase())
            }
            fn decompress(
                &self,
                input: &WireInput,
                _: &CompressionOptions,
            ) -> Result<Value, CoreError> {
                Ok(Value::String(input.as_text().unwrap_or_default().to_lowercase()))
            }
            fn detect(&self, _: &WireInput) -> bool {
                false
            }
        }

        let mut service = CompressionService::new();
        assert!(service.register_algorithm(Arc::new(Upper)).is_none());
        assert!(service.is_algorithm_available("upper"));
        assert_eq!(
            service.get_available_algorithms(),
            vec!["gzip", "zlib", "lz", "none", "upper"]
        );

        let encoded = service.compress_with_algorithm("abc", "upper", &opts()).unwrap();
        assert_eq!(encoded, "\"ABC\"");
        let result = service
            .decompress_with_algorithm(&WireInput::from(encoded), "upper", &opts())
            .unwrap();
        assert_eq!(result.data, json!("\"abc\""));
    }

    #[test]
    fn metrics_track_each_outcome() {
        let service = CompressionService::new();
        let gz = WireInput::from(buffer(&gzip_bytes(r#"{"a":1}"#)));
        service.detect_and_decompress(&gz, &opts()).unwrap();
        service
            .detect_and_decompress(&WireInput::from(r#"[1]"#), &opts())
            .unwrap();
        service
            .detect_and_decompress(&WireInput::from(json!({"a": 1})), &opts())
            .unwrap();
        let _ = service.detect_and_decompress(&WireInput::from(vec![0xff_u8]), &opts());

        let metrics = service.get_metrics();
        assert_eq!(metrics.total_operations, 4);
        assert_eq!(metrics.successes_for("gzip"), 1);
        assert_eq!(metrics.successes_for("none"), 1);
        assert_eq!(metrics.passthroughs, 1);
        assert_eq!(metrics.failures, 1);

        service.reset_metrics();
        assert_eq!(service.get_metrics().total_operations, 0);
    }

    #[test]
    fn metrics_disabled_records_nothing() {
        let mut config = CompressionConfig::default_config();
        config.enable_metrics = false;
        let service = CompressionService::with_config(config);
        service
            .detect_and_decompress(&WireInput::from("[1]"), &opts())
            .unwrap();
        assert_eq!(service.get_metrics(), CompressionMetrics::default());
    }

    #[test]
    fn typed_decompression() {
        #[derive(Debug, Deserialize, PartialEq)]
        struct Branch {
            id: u32,
            name: String,
        }

        let service = CompressionService::new();
        let encoded = service
            .compress_with_algorithm(&json!({"id": 3, "name": "Centro"}), "gzip", &opts())
            .unwrap();
        let result = service
            .detect_and_decompress_as::<Branch>(&WireInput::from(encoded), &opts())
            .unwrap();
        assert_eq!(
            result.data,
            Branch {
                id: 3,
                name: "Centro".into()
            }
        );
    }
}
