use std::path::PathBuf;

use tauri::{AppHandle, Manager};
use tauri_plugin_dialog::{DialogExt, MessageDialogKind};
use tinynote::core::{init_logger, AppError, AppResult};
use tinynote::models::AppConfig;
use tinynote::services::StartupOutcome;
use tinynote::utils::{log_dir, read_app_config, resolve_data_dir};
use tracing_appender::non_blocking::WorkerGuard;

use super::{events, menu, tray};
use crate::commands::NoteState;

/// Tauri 启动前准备好的数据目录、配置与日志
pub struct Bootstrap {
    pub data_dir: PathBuf,
    pub config: AppConfig,
    pub log_guard: Option<WorkerGuard>,
}

pub fn bootstrap() -> AppResult<Bootstrap> {
    let data_dir = resolve_data_dir()?;

    // 日志尚未初始化，读取失败的原因稍后补记
    let (config, config_error) = match read_app_config(&data_dir) {
        Ok(config) => (config.unwrap_or_default(), None),
        Err(e) => (AppConfig::default(), Some(e)),
    };

    let log_guard = init_logger(&config.log_config, &log_dir(&data_dir))?;

    if let Some(e) = config_error {
        tracing::warn!(error = %e, "读取配置失败，使用默认配置");
    }
    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        data_dir = %data_dir.display(),
        "Tinynote 启动"
    );

    Ok(Bootstrap {
        data_dir,
        config,
        log_guard,
    })
}

/// setup 阶段：加锁、初始化存储，然后依次创建菜单、窗口和托盘
pub fn initialize_app(app: &tauri::App) -> AppResult<()> {
    let handle = app.handle().clone();
    let outcome = app
        .state::<NoteState>()
        .with_controller(|controller| controller.start())?;

    match outcome {
        Ok(StartupOutcome::Active) => {
            menu::setup_app_menu(&handle)?;
            events::open_main_window(&handle)?;
            tray::setup_tray(app)?;
            tracing::info!("启动完成");
        }
        Ok(StartupOutcome::Deferred) => {
            handle.exit(0);
        }
        Err(e) => {
            tracing::error!(error = %e, "便笺存储初始化失败，终止启动");
            report_fatal(&handle, &e);
        }
    }

    Ok(())
}

/// 弹出错误对话框，关闭后以退出码 1 结束进程
fn report_fatal(app: &AppHandle, err: &AppError) {
    let exit_handle = app.clone();
    app.dialog()
        .message(format!("无法初始化便笺存储，程序将退出。\n\n{}", err))
        .title("Tinynote")
        .kind(MessageDialogKind::Error)
        .show(move |_| exit_handle.exit(1));
}
