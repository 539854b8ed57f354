use std::fmt::Display;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::services::lifecycle::LifecycleState;

pub type AppResult<T> = Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    /// 文档目录或文件无法创建、读取或写入
    #[error("存储不可用 ({}): {source}", .path.display())]
    StorageUnavailable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("非法的生命周期转换: {from:?} 状态下不能执行 {action}")]
    InvalidTransition {
        from: LifecycleState,
        action: &'static str,
    },
    #[error("控制器未处于活动状态: {0}")]
    Inactive(String),
    #[error("IO错误: {0}")]
    Io(#[from] io::Error),
    #[error("JSON 解析错误: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Tauri 错误: {0}")]
    Tauri(#[from] tauri::Error),
    #[error("配置错误: {0}")]
    Config(String),
    #[error("日志初始化失败: {0}")]
    Logger(String),
    #[error("{0}")]
    Other(String),
}

impl AppError {
    pub fn storage(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::StorageUnavailable {
            path: path.into(),
            source,
        }
    }

    pub fn config<E: Display>(err: E) -> Self {
        Self::Config(err.to_string())
    }

    pub fn other<E: Display>(err: E) -> Self {
        Self::Other(err.to_string())
    }

    pub fn is_storage_unavailable(&self) -> bool {
        matches!(self, Self::StorageUnavailable { .. })
    }
}

/// 为 IO 结果附加出错路径，统一转换为 `StorageUnavailable`
pub trait StorageContext<T> {
    fn storage_context(self, path: &Path) -> AppResult<T>;
}

impl<T> StorageContext<T> for io::Result<T> {
    fn storage_context(self, path: &Path) -> AppResult<T> {
        self.map_err(|source| AppError::storage(path, source))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_context_keeps_path() {
        let result: io::Result<()> = Err(io::Error::new(io::ErrorKind::PermissionDenied, "denied"));
        let err = result
            .storage_context(Path::new("/tmp/data/notes.md"))
            .unwrap_err();

        assert!(err.is_storage_unavailable());
        let message = err.to_string();
        assert!(message.contains("notes.md"));
        assert!(message.contains("denied"));
    }

    #[test]
    fn test_io_error_is_not_storage_unavailable() {
        let err: AppError = io::Error::new(io::ErrorKind::Other, "boom").into();
        assert!(!err.is_storage_unavailable());
        assert_eq!(err.to_string(), "IO错误: boom");
    }
}
