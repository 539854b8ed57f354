//! 日志系统
//!
//! 基于 tracing-subscriber 构建，支持控制台与按天滚动的文件输出，
//! 文本或 JSON 两种格式。`RUST_LOG` 环境变量优先于配置中的日志级别。
//! 日志级别可通过 [`set_log_level`] 热重载，格式和输出目标变更需要重启。

use std::fs;
use std::path::Path;
use std::str::FromStr;

use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
    fmt,
    layer::{Layered, SubscriberExt},
    reload,
    util::SubscriberInitExt,
    EnvFilter, Layer, Registry,
};

use crate::core::error::{AppError, AppResult};

/// 日志文件名前缀，滚动后追加日期后缀
pub const LOG_FILE_PREFIX: &str = "tinynote.log";

type FilterLayer = reload::Layer<EnvFilter, Registry>;
type FilterHandle = reload::Handle<EnvFilter, Registry>;
type BoxedLayer = Box<dyn Layer<Layered<FilterLayer, Registry>> + Send + Sync>;

static RELOAD_HANDLE: OnceCell<FilterHandle> = OnceCell::new();

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

impl FromStr for LogLevel {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            other => Err(AppError::config(format!("未知的日志级别: {}", other))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogOutput {
    Console,
    File,
    #[default]
    Both,
}

/// 日志配置
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    pub level: LogLevel,
    pub format: LogFormat,
    pub output: LogOutput,
}

impl LogConfig {
    pub fn writes_console(&self) -> bool {
        matches!(self.output, LogOutput::Console | LogOutput::Both)
    }

    pub fn writes_file(&self) -> bool {
        matches!(self.output, LogOutput::File | LogOutput::Both)
    }

    /// 只有日志级别不同时才能热重载
    pub fn can_hot_reload(&self, other: &LogConfig) -> bool {
        self.format == other.format && self.output == other.output
    }
}

/// 初始化全局日志订阅器
///
/// 启用文件输出时返回 `WorkerGuard`，调用方需持有到进程退出，否则缓冲中的日志会丢失。
pub fn init_logger(config: &LogConfig, log_dir: &Path) -> AppResult<Option<WorkerGuard>> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.level.as_str()));
    let (filter, handle) = reload::Layer::new(filter);

    let mut layers: Vec<BoxedLayer> = Vec::new();
    let mut guard = None;

    if config.writes_console() {
        layers.push(match config.format {
            LogFormat::Text => fmt::layer().with_target(true).boxed(),
            LogFormat::Json => fmt::layer().json().boxed(),
        });
    }

    if config.writes_file() {
        fs::create_dir_all(log_dir)?;
        let appender = tracing_appender::rolling::daily(log_dir, LOG_FILE_PREFIX);
        let (writer, file_guard) = tracing_appender::non_blocking(appender);
        layers.push(match config.format {
            LogFormat::Text => fmt::layer().with_writer(writer).with_ansi(false).boxed(),
            LogFormat::Json => fmt::layer().json().with_writer(writer).boxed(),
        });
        guard = Some(file_guard);
    }

    tracing_subscriber::registry()
        .with(filter)
        .with(layers)
        .try_init()
        .map_err(|e| AppError::Logger(e.to_string()))?;

    // 订阅器安装成功后才登记句柄
    let _ = RELOAD_HANDLE.set(handle);

    tracing::debug!(
        level = config.level.as_str(),
        format = ?config.format,
        output = ?config.output,
        log_dir = %log_dir.display(),
        "日志系统已初始化"
    );

    Ok(guard)
}

/// 热重载日志级别，会覆盖启动时 `RUST_LOG` 指定的过滤规则
pub fn set_log_level(level: LogLevel) -> AppResult<()> {
    let handle = RELOAD_HANDLE
        .get()
        .ok_or_else(|| AppError::Logger("日志系统尚未初始化".to_string()))?;

    handle
        .reload(EnvFilter::new(level.as_str()))
        .map_err(|e| AppError::Logger(e.to_string()))?;

    tracing::info!(level = level.as_str(), "日志级别已更新");
    Ok(())
}
