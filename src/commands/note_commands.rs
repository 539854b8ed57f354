use tauri::{State, WebviewWindow};
use tinynote::ui::SurfaceRequest;

use super::note_state::NoteState;

/// 保存整篇便笺
///
/// 同步命令在主线程上按到达顺序执行。没有返回值，保存失败只写日志，不通知前端。
#[tauri::command]
pub fn save_data(state: State<'_, NoteState>, data: String) {
    let result = state
        .with_controller(|controller| controller.handle_request(SurfaceRequest::Save(data)))
        .and_then(|saved| saved);

    if let Err(e) = result {
        tracing::error!(error = %e, "保存便笺失败");
    }
}

/// 前端注册完事件监听后发出，后端据此推送便笺内容
///
/// 页面加载完成时 `listen()` 可能还没注册好，直接推送会丢事件。
#[tauri::command]
pub fn surface_ready(window: WebviewWindow, state: State<'_, NoteState>) {
    let result = state
        .with_controller(|controller| controller.content_ready(&window))
        .and_then(|delivered| delivered);

    match result {
        Ok(true) => tracing::info!(label = window.label(), "已向前端推送便笺内容"),
        Ok(false) => tracing::debug!(label = window.label(), "文档已推送过，忽略重复的就绪通知"),
        Err(e) => tracing::error!(error = %e, "推送便笺内容失败"),
    }
}
