//! 와이어 포맷 정규화.
//!
//! 입력을 먼저 `WireFormat`으로 분류한 뒤 바이트 시퀀스로 변환한다.
//! 분류 단계는 알고리즘 로직보다 항상 먼저 실행된다.

use base64::alphabet;
use base64::engine::general_purpose::STANDARD;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use base64::Engine;
use mercado_core::error::CoreError;
use mercado_core::models::wire::WireInput;
use serde_json::{Map, Value};
use std::borrow::Cow;

/// 중첩 Buffer 래퍼 탐색 최대 깊이
pub const MAX_BUFFER_SEARCH_DEPTH: usize = 32;

/// Buffer 래퍼의 `type` 값
const BUFFER_TYPE: &str = "Buffer";

/// 패딩 유무를 가리지 않는 표준 알파벳 디코더
const LENIENT_BASE64: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// 분류된 와이어 포맷
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WireFormat<'a> {
    /// base64 문자열
    Base64Text(&'a str),
    /// 바이트 시퀀스 또는 0–255 정수 배열
    ByteArray(Cow<'a, [u8]>),
    /// `{type:"Buffer", data:[...]}` (중첩 포함)
    WrappedBuffer(Vec<u8>),
    /// 그 외
    Unrecognized,
}

impl WireFormat<'_> {
    /// 포맷 이름 (진단/로그용)
    pub fn name(&self) -> &'static str {
        match self {
            WireFormat::Base64Text(_) => "base64-string",
            WireFormat::ByteArray(_) => "byte-array",
            WireFormat::WrappedBuffer(_) => "buffer-wrapper",
            WireFormat::Unrecognized => "unrecognized",
        }
    }

    pub fn is_recognized(&self) -> bool {
        !matches!(self, WireFormat::Unrecognized)
    }
}

/// 입력 분류
pub fn classify(input: &WireInput) -> WireFormat<'_> {
    match input {
        WireInput::Text(text) => WireFormat::Base64Text(text),
        WireInput::Bytes(bytes) => WireFormat::ByteArray(Cow::Borrowed(bytes)),
        WireInput::Json(value) => classify_value(value),
    }
}

fn classify_value(value: &Value) -> WireFormat<'_> {
    match value {
        Value::String(text) => WireFormat::Base64Text(text),
        Value::Array(items) => match byte_array(items) {
            Some(bytes) => WireFormat::ByteArray(Cow::Owned(bytes)),
            None => WireFormat::Unrecognized,
        },
        Value::Object(_) => match find_buffer(value) {
            Some(bytes) => WireFormat::WrappedBuffer(bytes),
            None => WireFormat::Unrecognized,
        },
        _ => WireFormat::Unrecognized,
    }
}

/// 0–255 정수 배열을 바이트로 변환. 하나라도 벗어나면 `None`.
pub fn byte_array(items: &[Value]) -> Option<Vec<u8>> {
    items
        .iter()
        .map(|item| item.as_u64().and_then(|n| u8::try_from(n).ok()))
        .collect()
}

/// 객체 자체가 Buffer 래퍼이면 그 바이트
fn buffer_marker(map: &Map<String, Value>) -> Option<Vec<u8>> {
    if map.get("type").and_then(Value::as_str) != Some(BUFFER_TYPE) {
        return None;
    }
    map.get("data")
        .and_then(Value::as_array)
        .and_then(|data| byte_array(data))
}

/// Buffer 래퍼 탐색.
///
/// 전위 순회: 현재 객체를 먼저 검사하고, 이후 필드를 맵 순회 순서대로 내려간다.
/// 첫 번째 일치에서 종료하며 `MAX_BUFFER_SEARCH_DEPTH`보다 깊이 내려가지 않는다.
pub fn find_buffer(value: &Value) -> Option<Vec<u8>> {
    find_buffer_at(value, 0)
}

fn find_buffer_at(value: &Value, depth: usize) -> Option<Vec<u8>> {
    if depth > MAX_BUFFER_SEARCH_DEPTH {
        return None;
    }
    let map = value.as_object()?;
    if let Some(bytes) = buffer_marker(map) {
        return Some(bytes);
    }
    map.values()
        .find_map(|child| find_buffer_at(child, depth + 1))
}

/// Buffer 래퍼 포함 여부
pub fn contains_buffer(value: &Value) -> bool {
    find_buffer(value).is_some()
}

/// base64 디코딩. ASCII 공백은 무시하고 패딩은 있어도 없어도 된다.
pub fn decode_base64(text: &str) -> Result<Vec<u8>, CoreError> {
    let compact: String = text.chars().filter(|c| !c.is_ascii_whitespace()).collect();
    LENIENT_BASE64
        .decode(compact.as_bytes())
        .map_err(|e| CoreError::decode("base64", e))
}

/// 표준 base64 인코딩 (패딩 포함)
pub fn encode_base64(bytes: &[u8]) -> String {
    STANDARD.encode(bytes)
}

/// 분류된 포맷을 바이트로 변환
pub fn to_bytes(format: WireFormat<'_>) -> Result<Vec<u8>, CoreError> {
    match format {
        WireFormat::Base64Text(text) => decode_base64(text),
        WireFormat::ByteArray(bytes) => Ok(bytes.into_owned()),
        WireFormat::WrappedBuffer(bytes) => Ok(bytes),
        WireFormat::Unrecognized => Err(CoreError::FormatUnrecognized(
            "지원하지 않는 입력 형태".to_string(),
        )),
    }
}

/// 입력을 정규 바이트 시퀀스로 변환
pub fn normalize(input: &WireInput) -> Result<Vec<u8>, CoreError> {
    match classify(input) {
        WireFormat::Unrecognized => Err(CoreError::FormatUnrecognized(format!(
            "{} 입력은 바이트로 변환할 수 없음",
            input.kind()
        ))),
        format => to_bytes(format),
    }
}
