//! # mercado-app
//!
//! `mercado-codec` 바이너리 진입점.
//! 설정 로드, tracing 초기화, 압축 서비스 조립 후 서브커맨드 실행.

mod input;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use mercado_compression::CompressionService;
use mercado_core::config::{CompressionConfig, CompressionOptions};
use mercado_core::config_manager::ConfigManager;
use mercado_core::ports::codec::AlgorithmKind;
use serde_json::Value;
use std::path::PathBuf;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use crate::input::InputKind;

/// 백엔드 응답 페이로드 압축 도구
///
/// base64 문자열, 바이트, 숫자 배열, Buffer 래퍼를 진단하고 해제한다.
#[derive(Parser, Debug)]
#[command(name = "mercado-codec")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// 로그 레벨 (trace, debug, info, warn, error)
    #[arg(long, short = 'l', default_value = "warn", global = true)]
    log_level: String,

    /// 압축 설정 JSON 파일 (없으면 기본값으로 생성)
    #[arg(long, short = 'c', global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// 바이트 수준 진단 보고서 출력
    Diagnose {
        /// 입력 파일 (생략하거나 `-`이면 stdin)
        input: Option<PathBuf>,
        #[arg(long, short = 'k', value_enum, default_value_t = InputKind::Auto)]
        kind: InputKind,
    },
    /// 페이로드 해제 (알고리즘 생략 시 자동 감지)
    Decompress {
        input: Option<PathBuf>,
        #[arg(long, short = 'k', value_enum, default_value_t = InputKind::Auto)]
        kind: InputKind,
        /// 명시 알고리즘 (폴백 없음)
        #[arg(long, short = 'a')]
        algorithm: Option<AlgorithmKind>,
        /// 데이터만 출력
        #[arg(long)]
        data_only: bool,
    },
    /// JSON 문서를 압축해 base64로 출력
    Compress {
        input: Option<PathBuf>,
        /// 알고리즘 (생략 시 설정의 기본 알고리즘)
        #[arg(long, short = 'a')]
        algorithm: Option<AlgorithmKind>,
        /// 압축 레벨 (1–9)
        #[arg(long)]
        level: Option<u32>,
    },
    /// 등록된 알고리즘과 자동 감지 순서
    Algorithms,
}

fn load_config(path: Option<PathBuf>) -> Result<CompressionConfig> {
    match path {
        Some(path) => {
            let manager = ConfigManager::with_path(path.clone())
                .with_context(|| format!("설정 로드 실패: {}", path.display()))?;
            info!(path = %manager.config_path().display(), "압축 설정 로드");
            Ok(manager.get())
        }
        None => Ok(CompressionConfig::default_config()),
    }
}

fn print_json(value: &impl serde::Serialize) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn run(command: Command, service: &CompressionService) -> Result<()> {
    match command {
        Command::Diagnose { input, kind } => {
            let wire = input::load(input.as_deref(), kind)?;
            print_json(&service.diagnose_data(&wire))
        }
        Command::Decompress {
            input,
            kind,
            algorithm,
            data_only,
        } => {
            let wire = input::load(input.as_deref(), kind)?;
            let options = CompressionOptions::default();
            let result = match algorithm {
                Some(algo) => service.decompress_with_algorithm(&wire, algo.as_str(), &options),
                None => service.detect_and_decompress(&wire, &options),
            }
            .context("해제 실패")?;
            debug!(
                algorithm = %result.algorithm,
                ratio = result.compression_ratio,
                "해제 완료"
            );
            if data_only {
                print_json(&result.data)
            } else {
                print_json(&result)
            }
        }
        Command::Compress {
            input,
            algorithm,
            level,
        } => {
            let raw = input::read_raw(input.as_deref())?;
            let value: Value = serde_json::from_slice(&raw).context("압축할 JSON 파싱 실패")?;
            let options = CompressionOptions { level };
            let encoded = match algorithm {
                Some(algo) => service.compress_with_algorithm(&value, algo.as_str(), &options),
                None => service.compress(&value, &options),
            }
            .context("압축 실패")?;
            println!("{encoded}");
            Ok(())
        }
        Command::Algorithms => print_json(&serde_json::json!({
            "available": service.get_available_algorithms(),
            "detection_chain": service.detection_chain(),
            "default": service.config().default_algorithm,
        })),
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level)),
        )
        .init();

    let config = load_config(args.config)?;
    let service = CompressionService::with_config(config);
    run(args.command, &service)
}
