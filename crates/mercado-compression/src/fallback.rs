//! 순차 폴백 체인.
//!
//! `(이름, 시도)` 목록을 왼쪽부터 실행하고 첫 `Ok`에서 멈춘다.
//! 실패는 삼키지 않고 시도 순서대로 기록해 호출자가 로그/집계한다.

use mercado_core::error::CoreError;

/// 실패한 시도
#[derive(Debug)]
pub struct AttemptFailure {
    pub algorithm: String,
    pub error: CoreError,
}

/// 체인 실행 결과
#[derive(Debug)]
pub struct ChainOutcome<T> {
    /// 첫 성공 (알고리즘 이름, 값)
    pub success: Option<(String, T)>,
    /// 성공 이전까지의 실패 (시도 순서)
    pub failures: Vec<AttemptFailure>,
}

impl<T> ChainOutcome<T> {
    /// 시도한 알고리즘 이름 (성공 포함, 시도 순서)
    pub fn attempted(&self) -> Vec<String> {
        self.failures
            .iter()
            .map(|f| f.algorithm.clone())
            .chain(self.success.iter().map(|(name, _)| name.clone()))
            .collect()
    }
}

/// 첫 성공까지 순서대로 시도
pub fn first_success<T, F, I>(attempts: I) -> ChainOutcome<T>
where
    I: IntoIterator<Item = (String, F)>,
    F: FnOnce() -> Result<T, CoreError>,
{
    let mut failures = Vec::new();
    for (algorithm, attempt) in attempts {
        match attempt() {
            Ok(value) => {
                return ChainOutcome {
                    success: Some((algorithm, value)),
                    failures,
                }
            }
            Err(error) => failures.push(AttemptFailure { algorithm, error }),
        }
    }
    ChainOutcome {
        success: None,
        failures,
    }
}
