//! 페이로드 진단.
//!
//! 어떤 입력이 들어와도 실패하지 않는다. 변환 중 오류는 보고서의
//! `error` 필드와 미리보기에 기록된다.

use crate::normalizer::{classify, to_bytes};
use crate::sniffer::{looks_like_text, sniff};
use mercado_core::models::diagnostic::DiagnosticReport;
use mercado_core::models::wire::WireInput;

/// 보고서에 담는 선두 바이트 수
pub const FIRST_BYTES_LEN: usize = 10;
/// 텍스트 미리보기 문자 수
pub const TEXT_PREVIEW_CHARS: usize = 100;
/// 16진수 미리보기 바이트 수
pub const HEX_PREVIEW_BYTES: usize = 20;

/// 입력을 분류하고 바이트 수준 특징을 보고한다
pub fn diagnose(input: &WireInput) -> DiagnosticReport {
    let format = classify(input);
    let format_name = format.name().to_string();

    match to_bytes(format) {
        Ok(bytes) => report_for_bytes(format_name, &bytes),
        Err(e) => {
            let message = e.to_string();
            DiagnosticReport {
                format: format_name,
                byte_length: 0,
                first_bytes: Vec::new(),
                detected_algorithms: Default::default(),
                is_likely_compressed: false,
                looks_like_text: false,
                text_preview: format!("<오류: {message}>"),
                hex_preview: String::new(),
                error: Some(message),
            }
        }
    }
}

fn report_for_bytes(format: String, bytes: &[u8]) -> DiagnosticReport {
    let signatures = sniff(bytes);
    DiagnosticReport {
        format,
        byte_length: bytes.len(),
        first_bytes: bytes.iter().take(FIRST_BYTES_LEN).copied().collect(),
        detected_algorithms: signatures,
        is_likely_compressed: signatures.any(),
        looks_like_text: looks_like_text(bytes),
        text_preview: text_preview(bytes),
        hex_preview: hex_preview(bytes),
        error: None,
    }
}

/// 손실 허용 UTF-8 앞부분
pub fn text_preview(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes)
        .chars()
        .take(TEXT_PREVIEW_CHARS)
        .collect()
}

/// 공백으로 구분된 소문자 16진수
pub fn hex_preview(bytes: &[u8]) -> String {
    bytes
        .iter()
        .take(HEX_PREVIEW_BYTES)
        .map(|b| format!("{b:02x}"))
        .collect::<Vec<_>>()
        .join(" ")
}
