//! 압축 시그니처 판별.
//!
//! 전체 해제 없이 앞 2바이트 매직 넘버로 압축 여부를 추정한다.
//! 모든 함수는 순수 함수이며 빈 입력에도 패닉하지 않는다.

use mercado_core::models::diagnostic::{Signature, SignatureMatches};

/// 텍스트 판별에 쓰는 최대 바이트 수
pub const TEXT_PROBE_LEN: usize = 50;

/// gzip 매직 넘버
pub const GZIP_MAGIC: [u8; 2] = [0x1F, 0x8B];
/// zlib CMF 바이트
pub const ZLIB_CMF: u8 = 0x78;
/// 표준 zlib FLG 바이트 (압축 레벨별)
pub const ZLIB_FLAGS: [u8; 4] = [0x01, 0x5E, 0x9C, 0xDA];
/// raw deflate 시그니처
pub const RAW_DEFLATE_MAGIC: [u8; 2] = [0x08, 0x1D];

/// 시그니처 검사. 2바이트 미만이면 어떤 것도 일치하지 않는다.
pub fn sniff(bytes: &[u8]) -> SignatureMatches {
    match bytes {
        [first, second, ..] => SignatureMatches {
            gzip: [*first, *second] == GZIP_MAGIC,
            zlib: *first == ZLIB_CMF && ZLIB_FLAGS.contains(second),
            raw_deflate: [*first, *second] == RAW_DEFLATE_MAGIC,
        },
        _ => SignatureMatches::default(),
    }
}

/// 압축되었을 가능성이 있는지
pub fn is_likely_compressed(bytes: &[u8]) -> bool {
    sniff(bytes).any()
}

/// 일치한 시그니처
pub fn matched_signature(bytes: &[u8]) -> Option<Signature> {
    sniff(bytes).matched()
}

/// 앞부분이 JSON/텍스트처럼 보이는지 (진단/로그 전용, 해제 게이트 아님)
pub fn looks_like_text(bytes: &[u8]) -> bool {
    let probe = &bytes[..bytes.len().min(TEXT_PROBE_LEN)];
    String::from_utf8_lossy(probe)
        .trim_start()
        .starts_with(['{', '[', '"'])
}
