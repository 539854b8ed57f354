use tauri::tray::{MouseButton, MouseButtonState, TrayIconBuilder, TrayIconEvent};
use tinynote::core::{AppError, AppResult};
use tinynote::ui::{create_tray_menu, TrayMenuAction, TRAY_ID};

use super::events::{quit_app, tray_activated};

pub fn setup_tray(app: &tauri::App) -> AppResult<()> {
    let tray_menu = create_tray_menu(app.handle())?;
    let icon = app
        .default_window_icon()
        .cloned()
        .ok_or_else(|| AppError::other("缺少默认窗口图标"))?;

    TrayIconBuilder::with_id(TRAY_ID)
        .icon(icon)
        .tooltip("Tinynote")
        .menu(&tray_menu)
        .show_menu_on_left_click(false)
        .on_menu_event(|app, event| match TrayMenuAction::from_id(event.id.as_ref()) {
            Some(TrayMenuAction::Show) => tray_activated(app),
            Some(TrayMenuAction::Quit) => quit_app(app),
            None => {}
        })
        .on_tray_icon_event(|tray, event| {
            // 双击以 DoubleClick 单独上报，这里只处理左键单击抬起
            if let TrayIconEvent::Click {
                button: MouseButton::Left,
                button_state: MouseButtonState::Up,
                ..
            } = event
            {
                tray_activated(tray.app_handle());
            }
        })
        .build(app)?;

    tracing::info!("托盘图标已创建");
    Ok(())
}
