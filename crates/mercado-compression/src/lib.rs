//! # mercado-compression
//!
//! 페이로드 압축/해제 어댑터.
//!
//! - [`normalizer`]: base64 문자열, 바이트, 숫자 배열, Buffer 래퍼를 바이트로 정규화
//! - [`sniffer`]: 매직 넘버 기반 압축 여부 판별
//! - [`codecs`]: gzip/zlib/lz/none `Codec` 구현
//! - [`registry`]: 인스턴스 단위 알고리즘 레지스트리
//! - [`fallback`]: 순차 폴백 체인
//! - [`service`]: 자동 감지 해제와 명시 알고리즘 경로
//! - [`metrics`], [`diagnostics`]: 누적 메트릭과 페이로드 진단

pub mod codecs;
pub mod diagnostics;
pub mod fallback;
pub mod metrics;
pub mod normalizer;
pub mod registry;
pub mod service;
pub mod sniffer;

pub use registry::AlgorithmRegistry;
pub use service::CompressionService;
