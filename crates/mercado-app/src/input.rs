//! CLI 입력 로딩.
//!
//! 파일 또는 stdin에서 원시 바이트를 읽어 `WireInput`으로 변환한다.

use anyhow::{Context, Result};
use clap::ValueEnum;
use mercado_core::models::wire::WireInput;
use serde_json::Value;
use std::fs;
use std::io::{self, Read};
use std::path::Path;

/// 입력 해석 방식
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum InputKind {
    /// JSON이면 JSON 값, UTF-8이면 텍스트, 그 외는 바이트
    #[default]
    Auto,
    /// base64 텍스트 (앞뒤 공백 제거)
    Text,
    /// 원시 바이트
    Bytes,
    /// JSON 문서 (숫자 배열, Buffer 래퍼 등)
    Json,
}

/// 경로가 없거나 `-`이면 stdin
pub fn read_raw(path: Option<&Path>) -> Result<Vec<u8>> {
    match path {
        Some(path) if path != Path::new("-") => {
            fs::read(path).with_context(|| format!("입력 파일 읽기 실패: {}", path.display()))
        }
        _ => {
            let mut buf = Vec::new();
            io::stdin()
                .read_to_end(&mut buf)
                .context("stdin 읽기 실패")?;
            Ok(buf)
        }
    }
}

pub fn to_wire_input(raw: Vec<u8>, kind: InputKind) -> Result<WireInput> {
    match kind {
        InputKind::Bytes => Ok(WireInput::Bytes(raw)),
        InputKind::Text => {
            let text = String::from_utf8(raw).context("텍스트 입력이 UTF-8이 아님")?;
            Ok(WireInput::Text(text.trim().to_string()))
        }
        InputKind::Json => {
            let value: Value = serde_json::from_slice(&raw).context("JSON 입력 파싱 실패")?;
            Ok(WireInput::from_json(value))
        }
        InputKind::Auto => Ok(match String::from_utf8(raw) {
            Ok(text) => match serde_json::from_str::<Value>(&text) {
                Ok(value) => WireInput::from_json(value),
                Err(_) => WireInput::Text(text.trim().to_string()),
            },
            Err(e) => WireInput::Bytes(e.into_bytes()),
        }),
    }
}

pub fn load(path: Option<&Path>, kind: InputKind) -> Result<WireInput> {
    to_wire_input(read_raw(path)?, kind)
}
