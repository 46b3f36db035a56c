//! 압축 설정 파일 저장소.
//!
//! `CompressionConfig` 하나를 JSON 파일과 동기화한다. 메모리 사본은
//! 검증을 통과하고 디스크에 기록된 뒤에만 바뀐다.

use crate::config::{CompressionConfig, CompressionConfigPatch};
use crate::error::CoreError;
use parking_lot::RwLock;
use std::fmt::Display;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info};

/// 디렉토리 기준 생성 시 사용하는 파일 이름
pub const CONFIG_FILE_NAME: &str = "compression.json";

/// 파일 기반 압축 설정 핸들. 복제본은 같은 설정을 공유한다.
#[derive(Debug, Clone)]
pub struct ConfigManager {
    config: Arc<RwLock<CompressionConfig>>,
    config_path: PathBuf,
}

impl ConfigManager {
    /// `dir/compression.json`을 사용
    pub fn in_dir(dir: impl AsRef<Path>) -> Result<Self, CoreError> {
        Self::with_path(dir.as_ref().join(CONFIG_FILE_NAME))
    }

    /// 파일이 있으면 읽고, 없으면 기본 설정을 기록한다.
    /// 상위 디렉토리가 없으면 만든다.
    pub fn with_path(config_path: PathBuf) -> Result<Self, CoreError> {
        ensure_parent_dir(&config_path)?;

        let config = if config_path.exists() {
            read_config(&config_path)?
        } else {
            let config = CompressionConfig::default_config();
            write_config(&config_path, &config)?;
            info!(path = %config_path.display(), "압축 설정 파일 없음, 기본값 기록");
            config
        };

        Ok(Self {
            config: Arc::new(RwLock::new(config)),
            config_path,
        })
    }

    pub fn get(&self) -> CompressionConfig {
        self.config.read().clone()
    }

    /// 검증 후 파일에 쓰고 메모리 사본을 교체한다
    pub fn update(&self, new_config: CompressionConfig) -> Result<(), CoreError> {
        new_config.validate()?;
        write_config(&self.config_path, &new_config)?;
        *self.config.write() = new_config;
        debug!(path = %self.config_path.display(), "압축 설정 기록");
        Ok(())
    }

    /// 현재 설정 사본을 수정해 `update`에 넘긴다
    pub fn update_with<F>(&self, updater: F) -> Result<CompressionConfig, CoreError>
    where
        F: FnOnce(&mut CompressionConfig),
    {
        let mut config = self.get();
        updater(&mut config);
        self.update(config.clone())?;
        Ok(config)
    }

    pub fn apply_patch(&self, patch: CompressionConfigPatch) -> Result<CompressionConfig, CoreError> {
        self.update_with(|c| c.apply(patch))
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// 외부에서 수정된 파일 내용을 다시 반영
    pub fn reload(&self) -> Result<(), CoreError> {
        let config = read_config(&self.config_path)?;
        *self.config.write() = config;
        info!(path = %self.config_path.display(), "압축 설정 재적용");
        Ok(())
    }
}

fn config_error(action: &str, path: &Path, cause: impl Display) -> CoreError {
    CoreError::Config(format!("압축 설정 {action} 실패 ({}): {cause}", path.display()))
}

fn ensure_parent_dir(path: &Path) -> Result<(), CoreError> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() && !parent.exists() => {
            fs::create_dir_all(parent).map_err(|e| config_error("디렉토리 생성", parent, e))?;
            info!(dir = %parent.display(), "압축 설정 디렉토리 생성");
            Ok(())
        }
        _ => Ok(()),
    }
}

fn read_config(path: &Path) -> Result<CompressionConfig, CoreError> {
    let content = fs::read_to_string(path).map_err(|e| config_error("읽기", path, e))?;
    let config: CompressionConfig =
        serde_json::from_str(&content).map_err(|e| config_error("파싱", path, e))?;
    config.validate()?;
    Ok(config)
}

fn write_config(path: &Path, config: &CompressionConfig) -> Result<(), CoreError> {
    let content =
        serde_json::to_string_pretty(config).map_err(|e| config_error("직렬화", path, e))?;
    fs::write(path, content).map_err(|e| config_error("쓰기", path, e))
}
