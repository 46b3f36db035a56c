//! # mercado-core
//!
//! Mercado 압축 코어의 도메인 모델, 포트(trait) 정의, 에러 타입.
//! 어댑터 crate와 앱 crate가 공유하는 핵심 타입과 인터페이스를 제공한다.
//!
//! ## 구조
//!
//! - [`models`]: 와이어 입력, 해제 결과, 메트릭, 진단 리포트 (serde)
//! - [`ports`]: Hexagonal Architecture 포트 인터페이스 (`Codec`)
//! - [`error`]: 핵심 에러 타입 (thiserror)
//! - [`config`]: 압축 서비스 설정 구조체
//! - [`config_manager`]: 설정 파일 관리 (로드/저장)

pub mod config;
pub mod config_manager;
pub mod error;
pub mod models;
pub mod ports;
