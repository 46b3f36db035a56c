//! LZ 자리표시자 코덱.
//!
//! 실제 압축은 하지 않는다. 자동 감지 체인에도 포함되지 않는다.

use super::parse_plain_json;
use mercado_core::config::CompressionOptions;
use mercado_core::error::CoreError;
use mercado_core::models::wire::WireInput;
use mercado_core::ports::codec::{AlgorithmKind, Codec};
use serde_json::Value;
use tracing::warn;

#[derive(Debug, Clone, Copy, Default)]
pub struct LzCodec;

impl Codec for LzCodec {
    fn name(&self) -> &str {
        AlgorithmKind::Lz.as_str()
    }

    fn compress(&self, value: &Value, _options: &CompressionOptions) -> Result<String, CoreError> {
        warn!("lz 압축 미구현, 평문 JSON으로 반환");
        Ok(serde_json::to_string(value)?)
    }

    fn decompress(
        &self,
        input: &WireInput,
        _options: &CompressionOptions,
    ) -> Result<Value, CoreError> {
        parse_plain_json(input, self.name())
    }

    fn detect(&self, _input: &WireInput) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn compress_is_plain_json() {
        let encoded = LzCodec
            .compress(&json!({"a": 1}), &CompressionOptions::default())
            .unwrap();
        assert_eq!(encoded, "{\"a\":1}");
        let decoded = LzCodec
            .decompress(&WireInput::from(encoded), &CompressionOptions::default())
            .unwrap();
        assert_eq!(decoded, json!({"a": 1}));
    }

    #[test]
    fn never_detects() {
        assert!(!LzCodec.detect(&WireInput::from("{\"a\":1}")));
        assert!(!LzCodec.detect(&WireInput::from(vec![0x1f_u8, 0x8b])));
    }
}
