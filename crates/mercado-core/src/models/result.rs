//! 해제 결과 모델.

use crate::error::CoreError;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Instant;

/// 단일 해제 호출 결과 (호출마다 새로 생성, 반환 후 불변)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecompressionResult<T = Value> {
    /// 해제된 데이터
    pub data: T,
    /// 성공한 알고리즘 이름
    pub algorithm: String,
    /// 입력 크기 (`WireInput::original_size`)
    pub original_size: usize,
    /// 출력의 JSON 직렬화 길이
    pub decompressed_size: usize,
    /// 감소율 (%). 소수점 둘째 자리 반올림, 원본 크기 0이면 0
    pub compression_ratio: f64,
    /// 처리 시간 (밀리초)
    pub processing_time_ms: f64,
}

impl DecompressionResult<Value> {
    /// 결과 생성. 크기/비율/시간은 여기서 계산한다.
    pub fn measure(
        data: Value,
        algorithm: impl Into<String>,
        original_size: usize,
        started: Instant,
    ) -> Self {
        let decompressed_size = serialized_len(&data);
        Self {
            data,
            algorithm: algorithm.into(),
            original_size,
            decompressed_size,
            compression_ratio: compression_ratio(original_size, decompressed_size),
            processing_time_ms: started.elapsed().as_secs_f64() * 1_000.0,
        }
    }

    /// 데이터를 호출자 타입으로 역직렬화
    pub fn deserialize<T: DeserializeOwned>(self) -> Result<DecompressionResult<T>, CoreError> {
        let data = serde_json::from_value(self.data)?;
        Ok(DecompressionResult {
            data,
            algorithm: self.algorithm,
            original_size: self.original_size,
            decompressed_size: self.decompressed_size,
            compression_ratio: self.compression_ratio,
            processing_time_ms: self.processing_time_ms,
        })
    }
}

/// `(original - decompressed) / original * 100`, 소수점 둘째 자리 반올림.
///
/// 원본 크기가 0이면 0을 반환하며 NaN은 나오지 않는다. 음수는 그대로 둔다.
pub fn compression_ratio(original_size: usize, decompressed_size: usize) -> f64 {
    if original_size == 0 {
        return 0.0;
    }
    let original = original_size as f64;
    let ratio = (original - decompressed_size as f64) / original * 100.0;
    (ratio * 100.0).round() / 100.0
}

/// JSON 직렬화 길이
pub fn serialized_len(value: &Value) -> usize {
    value.to_string().len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn ratio_zero_for_empty_original() {
        assert_eq!(compression_ratio(0, 0), 0.0);
        assert_eq!(compression_ratio(0, 500), 0.0);
    }

    #[test]
    fn ratio_rounds_to_two_decimals() {
        assert_eq!(compression_ratio(3, 2), 33.33);
        assert_eq!(compression_ratio(100, 25), 75.0);
    }

    #[test]
    fn ratio_can_be_negative_but_not_nan() {
        let ratio = compression_ratio(10, 40);
        assert_eq!(ratio, -300.0);
        assert!(!ratio.is_nan());
    }

    #[test]
    fn measure_uses_serialized_length() {
        let result = DecompressionResult::measure(json!({"a": 1}), "none", 7, Instant::now());
        assert_eq!(result.decompressed_size, 7);
        assert_eq!(result.compression_ratio, 0.0);
        assert!(result.processing_time_ms >= 0.0);
    }

    #[test]
    fn deserialize_into_caller_type() {
        #[derive(Debug, Deserialize, PartialEq)]
        struct Coupon {
            code: String,
            discount: u32,
        }

        let result = DecompressionResult::measure(
            json!({"code": "PROMO10", "discount": 10}),
            "gzip",
            40,
            Instant::now(),
        );
        let typed = result.deserialize::<Coupon>().unwrap();
        assert_eq!(typed.data.code, "PROMO10");
        assert_eq!(typed.algorithm, "gzip");
    }

    #[test]
    fn deserialize_type_mismatch_is_serialization_error() {
        let result = DecompressionResult::measure(json!("text"), "none", 4, Instant::now());
        let err = result.deserialize::<Vec<u32>>().unwrap_err();
        assert!(matches!(err, CoreError::Serialization(_)));
    }
}
