//! 진단 리포트 모델.

use serde::{Deserialize, Serialize};
use std::fmt;

/// 알려진 매직 넘버 시그니처
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Signature {
    /// `1F 8B`
    Gzip,
    /// `78 01|5E|9C|DA`
    Zlib,
    /// `08 1D`
    RawDeflate,
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Signature::Gzip => write!(f, "gzip"),
            Signature::Zlib => write!(f, "zlib"),
            Signature::RawDeflate => write!(f, "raw_deflate"),
        }
    }
}

/// 시그니처별 일치 여부
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignatureMatches {
    pub gzip: bool,
    pub zlib: bool,
    pub raw_deflate: bool,
}

impl SignatureMatches {
    /// 하나라도 일치하면 압축된 것으로 본다
    pub fn any(&self) -> bool {
        self.gzip || self.zlib || self.raw_deflate
    }

    /// 일치한 시그니처 (우선순위: gzip, zlib, raw deflate)
    pub fn matched(&self) -> Option<Signature> {
        if self.gzip {
            Some(Signature::Gzip)
        } else if self.zlib {
            Some(Signature::Zlib)
        } else if self.raw_deflate {
            Some(Signature::RawDeflate)
        } else {
            None
        }
    }
}

/// `diagnose_data` 결과
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiagnosticReport {
    /// 판별된 와이어 포맷 이름
    pub format: String,
    /// 정규화된 바이트 길이
    pub byte_length: usize,
    /// 앞부분 바이트
    pub first_bytes: Vec<u8>,
    /// 시그니처별 일치 여부
    pub detected_algorithms: SignatureMatches,
    pub is_likely_compressed: bool,
    pub looks_like_text: bool,
    /// 앞 100자 텍스트 미리보기 (오류 시 오류 설명)
    pub text_preview: String,
    /// 앞 20바이트 16진수 미리보기 (오류 시 오류 설명)
    pub hex_preview: String,
    /// 내부 오류 설명
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}
