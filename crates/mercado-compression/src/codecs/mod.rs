//! 내장 코덱.
//!
//! - [`deflate`]: gzip / zlib 컨테이너 (flate2)
//! - [`lz`]: 자리표시자 (실제 압축 없음)
//! - [`identity`]: `none`, 항등 JSON

pub mod deflate;
pub mod identity;
pub mod lz;

pub use deflate::{Container, DeflateCodec};
pub use identity::IdentityCodec;
pub use lz::LzCodec;

use crate::normalizer::{self, WireFormat};
use mercado_core::error::CoreError;
use mercado_core::models::wire::WireInput;
use serde_json::Value;

/// UTF-8 엄격 디코딩
pub(crate) fn utf8(bytes: Vec<u8>, algorithm: &str) -> Result<String, CoreError> {
    String::from_utf8(bytes).map_err(|e| CoreError::decode(algorithm, e))
}

/// JSON 파싱을 시도하고 실패하면 원문 문자열을 그대로 반환
pub(crate) fn parse_or_string(text: String) -> Value {
    match serde_json::from_str(&text) {
        Ok(value) => value,
        Err(_) => Value::String(text),
    }
}

/// 평문 JSON으로 간주하고 파싱.
///
/// 문자열은 JSON 텍스트, 바이트 계열은 UTF-8 JSON 텍스트로 읽는다.
/// 이미 구조화된 값은 그대로 반환한다.
pub(crate) fn parse_plain_json(input: &WireInput, algorithm: &str) -> Result<Value, CoreError> {
    if let Some(text) = input.as_text() {
        return serde_json::from_str(text).map_err(|e| CoreError::decode(algorithm, e));
    }
    match normalizer::classify(input) {
        WireFormat::ByteArray(bytes) => {
            serde_json::from_slice(&bytes).map_err(|e| CoreError::decode(algorithm, e))
        }
        WireFormat::WrappedBuffer(bytes) => {
            serde_json::from_slice(&bytes).map_err(|e| CoreError::decode(algorithm, e))
        }
        WireFormat::Base64Text(_) | WireFormat::Unrecognized => Ok(input.to_value()),
    }
}
