//! 알고리즘 레지스트리.
//!
//! 이름 → `Arc<dyn Codec>` 매핑. 등록 순서를 유지하고,
//! 같은 이름을 다시 등록하면 기존 위치에서 교체한다. 제거 API는 없다.

use crate::codecs::{DeflateCodec, IdentityCodec, LzCodec};
use mercado_core::error::CoreError;
use mercado_core::ports::codec::{AlgorithmKind, Codec};
use std::fmt;
use std::sync::Arc;

/// 서비스 인스턴스 단위 레지스트리 (전역 상태 없음)
#[derive(Clone)]
pub struct AlgorithmRegistry {
    entries: Vec<Arc<dyn Codec>>,
}

impl AlgorithmRegistry {
    /// 내장 코덱(gzip, zlib, lz, none)으로 초기화
    pub fn with_builtins() -> Self {
        let mut registry = Self {
            entries: Vec::with_capacity(AlgorithmKind::ALL.len()),
        };
        registry.register(Arc::new(DeflateCodec::gzip()));
        registry.register(Arc::new(DeflateCodec::zlib()));
        registry.register(Arc::new(LzCodec));
        registry.register(Arc::new(IdentityCodec));
        registry
    }

    /// 코덱 등록. 같은 이름이 있으면 교체하고 이전 코덱을 반환한다.
    pub fn register(&mut self, codec: Arc<dyn Codec>) -> Option<Arc<dyn Codec>> {
        match self.entries.iter_mut().find(|c| c.name() == codec.name()) {
            Some(slot) => Some(std::mem::replace(slot, codec)),
            None => {
                self.entries.push(codec);
                None
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&Arc<dyn Codec>> {
        self.entries.iter().find(|c| c.name() == name)
    }

    /// 조회 실패 시 `AlgorithmNotRegistered`
    pub fn require(&self, name: &str) -> Result<&Arc<dyn Codec>, CoreError> {
        self.get(name)
            .ok_or_else(|| CoreError::AlgorithmNotRegistered(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// 등록 순서대로 이름 목록
    pub fn names(&self) -> Vec<String> {
        self.entries.iter().map(|c| c.name().to_string()).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for AlgorithmRegistry {
    fn default() -> Self {
        Self::with_builtins()
    }
}

impl fmt::Debug for AlgorithmRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AlgorithmRegistry")
            .field("algorithms", &self.names())
            .finish()
    }
}
