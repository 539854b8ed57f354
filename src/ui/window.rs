use tauri::{AppHandle, Manager, Runtime, WebviewUrl, WebviewWindow, WebviewWindowBuilder};

use crate::models::config::WindowConfig;

pub const MAIN_WINDOW_LABEL: &str = "main";

/// 创建主窗口
pub fn create_main_window<R: Runtime>(
    app: &AppHandle<R>,
    config: &WindowConfig,
) -> tauri::Result<WebviewWindow<R>> {
    let (width, height) = config.clamped_size();

    let window = WebviewWindowBuilder::new(
        app,
        MAIN_WINDOW_LABEL,
        WebviewUrl::App("index.html".into()),
    )
    .title(config.title.as_str())
    .inner_size(width, height)
    .min_inner_size(config.min_width, config.min_height)
    .build()?;

    tracing::info!(label = MAIN_WINDOW_LABEL, width, height, "主窗口已创建");
    Ok(window)
}

/// 恢复并聚焦主窗口，窗口不存在时返回 false
pub fn focus_main_window<R: Runtime>(app: &AppHandle<R>) -> bool {
    let Some(window) = app.get_webview_window(MAIN_WINDOW_LABEL) else {
        return false;
    };

    if window.is_minimized().unwrap_or(false) {
        let _ = window.unminimize();
    }
    let _ = window.show();
    let _ = window.set_focus();

    #[cfg(target_os = "macos")]
    {
        use cocoa::appkit::NSApplication;
        use cocoa::base::nil;
        use objc::runtime::YES;

        unsafe {
            let ns_app = NSApplication::sharedApplication(nil);
            ns_app.activateIgnoringOtherApps_(YES);
        }
    }

    true
}

/// 关闭主窗口，触发正常的窗口关闭流程
pub fn close_main_window<R: Runtime>(app: &AppHandle<R>) {
    if let Some(window) = app.get_webview_window(MAIN_WINDOW_LABEL) {
        if let Err(e) = window.close() {
            tracing::warn!(error = %e, "关闭主窗口失败");
        }
    }
}
