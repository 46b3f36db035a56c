//! 포트 인터페이스 (trait).
//!
//! Hexagonal Architecture의 포트 레이어.
//! 어댑터 crate가 이 trait을 구현하며,
//! 서비스 레지스트리에 `Arc<dyn Codec>`으로 등록된다.

pub mod codec;
