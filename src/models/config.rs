use serde::{Deserialize, Serialize};

use crate::core::logger::LogConfig;

/// 应用配置，对应数据目录下的 `config.json`，所有字段均可省略
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub window: WindowConfig,
    pub log_config: LogConfig,
}

/// 主窗口尺寸与标题
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    pub width: f64,
    pub height: f64,
    pub min_width: f64,
    pub min_height: f64,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Tinynote".to_string(),
            width: 800.0,
            height: 1200.0,
            min_width: 400.0,
            min_height: 400.0,
        }
    }
}

impl WindowConfig {
    /// 保证初始尺寸不小于最小尺寸
    pub fn clamped_size(&self) -> (f64, f64) {
        (
            self.width.max(self.min_width),
            self.height.max(self.min_height),
        )
    }
}
