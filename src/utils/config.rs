use std::env;
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use crate::core::error::AppResult;
use crate::models::config::AppConfig;

use super::platform::install_dir;

/// 覆盖数据目录的环境变量
pub const DATA_DIR_ENV: &str = "TINYNOTE_DATA_DIR";
pub const DATA_DIR_NAME: &str = "data";
pub const CONFIG_FILE_NAME: &str = "config.json";

/// 数据目录：优先取环境变量，否则为安装目录下的 `data`
pub fn resolve_data_dir() -> AppResult<PathBuf> {
    let install_dir = install_dir()?;
    Ok(data_dir_from(env::var_os(DATA_DIR_ENV), &install_dir))
}

pub fn data_dir_from(override_dir: Option<OsString>, install_dir: &Path) -> PathBuf {
    match override_dir {
        Some(dir) if !dir.is_empty() => PathBuf::from(dir),
        _ => install_dir.join(DATA_DIR_NAME),
    }
}

pub fn config_path(data_dir: &Path) -> PathBuf {
    data_dir.join(CONFIG_FILE_NAME)
}

/// 读取应用配置，文件不存在或为空时返回 `None`
pub fn read_app_config(data_dir: &Path) -> AppResult<Option<AppConfig>> {
    let path = config_path(data_dir);
    if !path.exists() {
        return Ok(None);
    }

    let content = fs::read_to_string(&path)?;
    if content.trim().is_empty() {
        return Ok(None);
    }

    Ok(Some(serde_json::from_str(&content)?))
}

/// 日志目录，系统数据目录不可用时退回到数据目录下
pub fn log_dir(data_dir: &Path) -> PathBuf {
    dirs::data_local_dir()
        .map(|dir| dir.join("tinynote").join("logs"))
        .unwrap_or_else(|| data_dir.join("logs"))
}
