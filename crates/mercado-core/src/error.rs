//! Mercado 핵심 에러 타입.
//!
//! 어댑터 crate는 이 타입을 그대로 반환하거나 `#[from] CoreError`로 래핑한다.

use thiserror::Error;

/// 코어 레이어 에러.
/// 포맷 인식, 알고리즘 조회, 디코딩, 설정 등 압축 코어 공통 에러를 정의한다.
#[derive(Debug, Error)]
pub enum CoreError {
    /// 입력이 허용된 와이어 포맷 중 어디에도 해당하지 않음
    #[error("인식할 수 없는 데이터 포맷: {0}")]
    FormatUnrecognized(String),

    /// 레지스트리에 없는 알고리즘 이름
    #[error("등록되지 않은 알고리즘: {0}")]
    AlgorithmNotRegistered(String),

    /// 특정 알고리즘의 해제/파싱 단계 실패
    #[error("{algorithm} 디코딩 실패: {message}")]
    Decode {
        /// 실패한 알고리즘 이름
        algorithm: String,
        /// 실패 사유
        message: String,
    },

    /// 자동 감지 체인의 모든 알고리즘이 실패함
    #[error("어떤 알고리즘으로도 데이터를 해제할 수 없음 (시도: {})", attempted.join(", "))]
    AllAlgorithmsExhausted {
        /// 시도한 알고리즘 이름 (시도 순서)
        attempted: Vec<String>,
    },

    /// JSON 직렬화/역직렬화 실패
    #[error("직렬화 에러: {0}")]
    Serialization(#[from] serde_json::Error),

    /// 설정값 오류
    #[error("설정 에러: {0}")]
    Config(String),

    /// I/O 에러
    #[error("I/O 에러: {0}")]
    Io(#[from] std::io::Error),
}

impl CoreError {
    /// `Decode` 에러 생성 헬퍼
    pub fn decode(algorithm: impl Into<String>, message: impl std::fmt::Display) -> Self {
        CoreError::Decode {
            algorithm: algorithm.into(),
            message: message.to_string(),
        }
    }
}
