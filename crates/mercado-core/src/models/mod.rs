//! 도메인 모델.

pub mod diagnostic;
pub mod result;
pub mod telemetry;
pub mod wire;
