//! gzip / zlib 코덱 (flate2).
//!
//! 압축: JSON 직렬화 → deflate 컨테이너 → base64.
//! 해제: 정규화 → 시그니처 확인 → inflate → JSON 파싱 (실패 시 원문 문자열).

use super::{parse_or_string, utf8};
use crate::normalizer::{encode_base64, normalize};
use crate::sniffer::sniff;
use flate2::read::{MultiGzDecoder, ZlibDecoder};
use flate2::write::{GzEncoder, ZlibEncoder};
use flate2::Compression;
use mercado_core::config::CompressionOptions;
use mercado_core::error::CoreError;
use mercado_core::models::diagnostic::SignatureMatches;
use mercado_core::models::wire::WireInput;
use mercado_core::ports::codec::{AlgorithmKind, Codec};
use serde_json::Value;
use std::io::{self, Read, Write};
use tracing::debug;

/// deflate 컨테이너 형식
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Container {
    /// RFC 1952
    Gzip,
    /// RFC 1950
    Zlib,
}

impl Container {
    pub fn kind(&self) -> AlgorithmKind {
        match self {
            Container::Gzip => AlgorithmKind::Gzip,
            Container::Zlib => AlgorithmKind::Zlib,
        }
    }

    /// 이 컨테이너의 헤더 시그니처가 일치하는지
    pub fn matches(&self, signatures: &SignatureMatches) -> bool {
        match self {
            Container::Gzip => signatures.gzip,
            Container::Zlib => signatures.zlib,
        }
    }
}

/// gzip/zlib `Codec` 포트 구현
#[derive(Debug, Clone, Copy)]
pub struct DeflateCodec {
    container: Container,
}

impl DeflateCodec {
    pub fn new(container: Container) -> Self {
        Self { container }
    }

    /// gzip 코덱
    pub fn gzip() -> Self {
        Self::new(Container::Gzip)
    }

    /// zlib 코덱
    pub fn zlib() -> Self {
        Self::new(Container::Zlib)
    }

    /// 원시 바이트 압축
    pub fn deflate_bytes(&self, data: &[u8], level: u32) -> io::Result<Vec<u8>> {
        let level = Compression::new(level);
        match self.container {
            Container::Gzip => {
                let mut encoder = GzEncoder::new(Vec::new(), level);
                encoder.write_all(data)?;
                encoder.finish()
            }
            Container::Zlib => {
                let mut encoder = ZlibEncoder::new(Vec::new(), level);
                encoder.write_all(data)?;
                encoder.finish()
            }
        }
    }

    /// 원시 바이트 해제
    pub fn inflate_bytes(&self, data: &[u8]) -> io::Result<Vec<u8>> {
        let mut decompressed = Vec::new();
        match self.container {
            Container::Gzip => {
                MultiGzDecoder::new(data).read_to_end(&mut decompressed)?;
            }
            Container::Zlib => {
                ZlibDecoder::new(data).read_to_end(&mut decompressed)?;
            }
        }
        Ok(decompressed)
    }
}

impl Codec for DeflateCodec {
    fn name(&self) -> &str {
        self.container.kind().as_str()
    }

    fn compress(&self, value: &Value, options: &CompressionOptions) -> Result<String, CoreError> {
        let json = serde_json::to_string(value)?;
        let compressed = self.deflate_bytes(json.as_bytes(), options.effective_level())?;
        Ok(encode_base64(&compressed))
    }

    fn decompress(
        &self,
        input: &WireInput,
        _options: &CompressionOptions,
    ) -> Result<Value, CoreError> {
        let bytes = normalize(input)?;
        let name = self.name();

        if !sniff(&bytes).any() {
            // base64로 우연히 디코딩되는 평문 JSON(예: "1400")은 none이 처리해야 한다
            if input.as_text().is_some() {
                return Err(CoreError::decode(
                    name,
                    "base64 디코딩 결과에 압축 시그니처 없음",
                ));
            }
            // 바이트 형태 입력: 평문 텍스트로 그대로 반환 (JSON 파싱 안 함)
            debug!(algorithm = name, len = bytes.len(), "시그니처 없음, 평문으로 처리");
            return utf8(bytes, name).map(Value::String);
        }

        let inflated = self
            .inflate_bytes(&bytes)
            .map_err(|e| CoreError::decode(name, e))?;
        debug!(
            algorithm = name,
            compressed = bytes.len(),
            inflated = inflated.len(),
            "해제 완료"
        );
        Ok(parse_or_string(utf8(inflated, name)?))
    }

    fn detect(&self, input: &WireInput) -> bool {
        normalize(input)
            .map(|bytes| self.container.matches(&sniff(&bytes)))
            .unwrap_or(false)
    }
}
