use tauri::{AppHandle, Manager, RunEvent, WindowEvent};
use tinynote::core::AppResult;
use tinynote::services::{ExitDecision, UiAction};
use tinynote::ui::{self, MAIN_WINDOW_LABEL};

use crate::commands::NoteState;

/// 创建主窗口，文档等前端发出 `surface_ready` 后再推送
pub fn open_main_window(app: &AppHandle) -> AppResult<()> {
    let state = app.state::<NoteState>();
    let config = state.window.clone();

    state.with_controller(|controller| controller.window_created())?;

    if let Err(e) = ui::create_main_window(app, &config) {
        state.with_controller(|controller| controller.window_destroyed())?;
        return Err(e.into());
    }
    Ok(())
}

pub fn apply_ui_action(app: &AppHandle, action: UiAction) {
    match action {
        UiAction::CreateWindow => {
            if let Err(e) = open_main_window(app) {
                tracing::error!(error = %e, "重新创建主窗口失败");
            }
        }
        UiAction::FocusWindow => {
            if !ui::focus_main_window(app) {
                tracing::warn!("主窗口不存在，无法聚焦");
            }
        }
        UiAction::Nothing => {}
    }
}

/// 托盘单击或托盘菜单“显示窗口”
pub fn tray_activated(app: &AppHandle) {
    match app
        .state::<NoteState>()
        .with_controller(|controller| controller.tray_clicked())
    {
        Ok(action) => apply_ui_action(app, action),
        Err(e) => tracing::error!(error = %e, "处理托盘点击失败"),
    }
}

/// 单实例插件回调：另一个进程启动时在已运行的实例中触发
pub fn handle_second_instance(app: &AppHandle, argv: Vec<String>, cwd: String) {
    tracing::debug!(?argv, cwd = %cwd, "收到重复启动通知");
    match app
        .state::<NoteState>()
        .with_controller(|controller| controller.second_instance())
    {
        Ok(action) => apply_ui_action(app, action),
        Err(e) => tracing::error!(error = %e, "处理重复启动失败"),
    }
}

pub fn quit_app(app: &AppHandle) {
    if let Err(e) = app
        .state::<NoteState>()
        .with_controller(|controller| controller.quit_requested())
    {
        tracing::warn!(error = %e, "记录退出请求失败");
    }
    tracing::info!("用户请求退出");
    app.exit(0);
}

pub fn handle_run_event(app: &AppHandle, event: RunEvent) {
    let state = app.state::<NoteState>();

    match event {
        RunEvent::WindowEvent {
            label,
            event: WindowEvent::Destroyed,
            ..
        } if label == MAIN_WINDOW_LABEL => {
            let _ = state.with_controller(|controller| controller.window_destroyed());
            tracing::debug!("主窗口已销毁");
        }
        RunEvent::ExitRequested { code: None, api, .. } => {
            // 最后一个窗口关闭
            match state.with_controller(|controller| controller.all_windows_closed()) {
                Ok(ExitDecision::StayResident) => {
                    api.prevent_exit();
                    tracing::info!("所有窗口已关闭，保持常驻");
                }
                Ok(ExitDecision::Exit) => tracing::info!("所有窗口已关闭，退出应用"),
                Err(e) => tracing::error!(error = %e, "处理窗口全部关闭失败"),
            }
        }
        RunEvent::ExitRequested {
            code: Some(code), ..
        } => {
            let _ = state.with_controller(|controller| controller.quit_requested());
            tracing::debug!(code, "收到退出请求");
        }
        #[cfg(target_os = "macos")]
        RunEvent::Reopen {
            has_visible_windows,
            ..
        } => {
            match state
                .with_controller(|controller| controller.reactivated(has_visible_windows))
            {
                Ok(action) => apply_ui_action(app, action),
                Err(e) => tracing::error!(error = %e, "处理 Dock 重新激活失败"),
            }
        }
        RunEvent::Exit => {
            let _ = state.with_controller(|controller| controller.terminated());
            tracing::info!("Tinynote 已退出");
        }
        _ => {}
    }
}
