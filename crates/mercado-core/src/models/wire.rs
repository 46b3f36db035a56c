//! 와이어 입력 모델.
//!
//! 피처 서비스가 HTTP 응답에서 꺼낸 원시 페이로드를 그대로 담는다.
//! 포맷 판별은 `mercado-compression::normalizer`가 담당한다.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// 압축 코어에 전달되는 원시 페이로드
///
/// - `Text`: base64 문자열 (또는 평문 JSON 텍스트)
/// - `Bytes`: 이미 디코딩된 바이트 시퀀스
/// - `Json`: 숫자 배열, `{type:"Buffer", data:[...]}` 래퍼, 중첩 래퍼, 그 외 JSON 값
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "Value", into = "Value")]
pub enum WireInput {
    Text(String),
    Bytes(Vec<u8>),
    Json(Value),
}

impl WireInput {
    /// JSON 값에서 생성. 문자열 값은 `Text`로 승격한다.
    pub fn from_json(value: Value) -> Self {
        match value {
            Value::String(s) => WireInput::Text(s),
            other => WireInput::Json(other),
        }
    }

    /// 문자열 입력이면 그 내용
    pub fn as_text(&self) -> Option<&str> {
        match self {
            WireInput::Text(s) => Some(s),
            WireInput::Json(Value::String(s)) => Some(s),
            _ => None,
        }
    }

    /// 입력 종류 이름 (로그용)
    pub fn kind(&self) -> &'static str {
        match self {
            WireInput::Text(_) => "string",
            WireInput::Bytes(_) => "bytes",
            WireInput::Json(value) => match value {
                Value::Null => "null",
                Value::Bool(_) => "boolean",
                Value::Number(_) => "number",
                Value::String(_) => "string",
                Value::Array(_) => "array",
                Value::Object(_) => "object",
            },
        }
    }

    /// 원본 크기.
    ///
    /// 문자열은 문자 수, 바이트와 배열은 요소 수, 그 외 값은 직렬화 길이.
    pub fn original_size(&self) -> usize {
        match self {
            WireInput::Text(s) | WireInput::Json(Value::String(s)) => s.chars().count(),
            WireInput::Bytes(bytes) => bytes.len(),
            WireInput::Json(Value::Array(items)) => items.len(),
            WireInput::Json(other) => other.to_string().len(),
        }
    }

    /// JSON 값으로 변환 (바이트는 숫자 배열)
    pub fn to_value(&self) -> Value {
        match self {
            WireInput::Text(s) => Value::String(s.clone()),
            WireInput::Bytes(bytes) => Value::Array(bytes.iter().map(|b| Value::from(*b)).collect()),
            WireInput::Json(value) => value.clone(),
        }
    }
}

impl From<String> for WireInput {
    fn from(s: String) -> Self {
        WireInput::Text(s)
    }
}

impl From<&str> for WireInput {
    fn from(s: &str) -> Self {
        WireInput::Text(s.to_string())
    }
}

impl From<Vec<u8>> for WireInput {
    fn from(bytes: Vec<u8>) -> Self {
        WireInput::Bytes(bytes)
    }
}

impl From<&[u8]> for WireInput {
    fn from(bytes: &[u8]) -> Self {
        WireInput::Bytes(bytes.to_vec())
    }
}

impl From<Value> for WireInput {
    fn from(value: Value) -> Self {
        WireInput::from_json(value)
    }
}

impl From<WireInput> for Value {
    fn from(input: WireInput) -> Self {
        match input {
            WireInput::Json(value) => value,
            other => other.to_value(),
        }
    }
}
