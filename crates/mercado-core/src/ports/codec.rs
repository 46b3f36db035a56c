//! 코덱 포트.
//!
//! 구현: `mercado-compression` crate (flate2, base64)

use crate::config::CompressionOptions;
use crate::error::CoreError;
use crate::models::wire::WireInput;
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// 내장 알고리즘 유형
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AlgorithmKind {
    /// gzip 컨테이너 (flate2)
    Gzip,
    /// zlib 컨테이너 (flate2)
    Zlib,
    /// LZ 자리표시자 (실제 압축 없음)
    Lz,
    /// 항등 JSON 직렬화
    None,
}

impl AlgorithmKind {
    /// 내장 알고리즘 전체 (등록 순서)
    pub const ALL: [AlgorithmKind; 4] = [
        AlgorithmKind::Gzip,
        AlgorithmKind::Zlib,
        AlgorithmKind::Lz,
        AlgorithmKind::None,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AlgorithmKind::Gzip => "gzip",
            AlgorithmKind::Zlib => "zlib",
            AlgorithmKind::Lz => "lz",
            AlgorithmKind::None => "none",
        }
    }
}

impl fmt::Display for AlgorithmKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AlgorithmKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "gzip" => Ok(AlgorithmKind::Gzip),
            "zlib" => Ok(AlgorithmKind::Zlib),
            "lz" => Ok(AlgorithmKind::Lz),
            "none" => Ok(AlgorithmKind::None),
            other => Err(CoreError::AlgorithmNotRegistered(other.to_string())),
        }
    }
}

/// 알고리즘 핸들러 인터페이스
///
/// 해제 실패는 일반 에러로 반환한다. 폴백 여부는 호출자(오케스트레이터)가 결정한다.
pub trait Codec: Send + Sync {
    /// 레지스트리 키
    fn name(&self) -> &str;

    /// 값을 JSON 직렬화 후 압축하여 base64 문자열로 반환
    fn compress(&self, value: &Value, options: &CompressionOptions) -> Result<String, CoreError>;

    /// 와이어 입력을 해제하여 JSON 값으로 반환
    fn decompress(&self, input: &WireInput, options: &CompressionOptions)
        -> Result<Value, CoreError>;

    /// 이 알고리즘으로 인코딩된 입력인지 (순수 함수)
    fn detect(&self, input: &WireInput) -> bool;
}
