//! `none` 코덱. 항등 JSON 직렬화/파싱이며 자동 감지 체인의 마지막 폴백이다.

use super::parse_plain_json;
use mercado_core::config::CompressionOptions;
use mercado_core::error::CoreError;
use mercado_core::models::wire::WireInput;
use mercado_core::ports::codec::{AlgorithmKind, Codec};
use serde_json::Value;

#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityCodec;

impl Codec for IdentityCodec {
    fn name(&self) -> &str {
        AlgorithmKind::None.as_str()
    }

    fn compress(&self, value: &Value, _options: &CompressionOptions) -> Result<String, CoreError> {
        Ok(serde_json::to_string(value)?)
    }

    fn decompress(
        &self,
        input: &WireInput,
        _options: &CompressionOptions,
    ) -> Result<Value, CoreError> {
        parse_plain_json(input, self.name())
    }

    /// 입력이 유효한 JSON으로 파싱되면 true
    fn detect(&self, input: &WireInput) -> bool {
        parse_plain_json(input, self.name()).is_ok()
    }
}
