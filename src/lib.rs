pub mod core;
pub mod models;
pub mod services;
pub mod ui;
pub mod utils;

pub use crate::core::{init_logger, set_log_level, AppError, AppResult, LogConfig, LogLevel};
