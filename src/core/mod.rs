pub mod error;
pub mod logger;

// 导出核心类型
pub use error::{AppError, AppResult, StorageContext};
pub use logger::{init_logger, set_log_level, LogConfig, LogFormat, LogLevel, LogOutput};
