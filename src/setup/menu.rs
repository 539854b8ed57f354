//! 应用菜单栏
//!
//! 关闭窗口、退出、原生编辑操作，以及切换 Vim 模式。
//! 编辑类菜单项由系统文本控件实现，这里只负责挂载。

use tauri::{
    menu::{Menu, MenuBuilder, MenuItem, SubmenuBuilder},
    AppHandle, Manager, Runtime,
};
use tinynote::ui::MAIN_WINDOW_LABEL;

use super::events::quit_app;
use crate::commands::NoteState;

const MENU_CLOSE_ID: &str = "app:close";
const MENU_QUIT_ID: &str = "app:quit";
const MENU_VIM_TOGGLE_ID: &str = "vim:toggle";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MenuAction {
    CloseWindow,
    Quit,
    ToggleVim,
}

/// 解析菜单项 ID，托盘菜单等其他来源的 ID 返回 None
fn parse_menu_id(id: &str) -> Option<MenuAction> {
    match id {
        MENU_CLOSE_ID => Some(MenuAction::CloseWindow),
        MENU_QUIT_ID => Some(MenuAction::Quit),
        MENU_VIM_TOGGLE_ID => Some(MenuAction::ToggleVim),
        _ => None,
    }
}

fn create_app_menu<R: Runtime>(app: &AppHandle<R>) -> tauri::Result<Menu<R>> {
    let app_submenu = SubmenuBuilder::new(app, "Tinynote")
        .item(&MenuItem::with_id(
            app,
            MENU_CLOSE_ID,
            "Close",
            true,
            Some("CmdOrCtrl+W"),
        )?)
        .item(&MenuItem::with_id(
            app,
            MENU_QUIT_ID,
            "Quit",
            true,
            Some("CmdOrCtrl+Q"),
        )?)
        .build()?;

    let edit_submenu = SubmenuBuilder::new(app, "Edit")
        .undo()
        .redo()
        .separator()
        .cut()
        .copy()
        .paste()
        .separator()
        .select_all()
        .build()?;

    let vim_submenu = SubmenuBuilder::new(app, "Vim")
        .item(&MenuItem::with_id(
            app,
            MENU_VIM_TOGGLE_ID,
            "Turn on/off Vim",
            true,
            None::<&str>,
        )?)
        .build()?;

    MenuBuilder::new(app)
        .item(&app_submenu)
        .item(&edit_submenu)
        .item(&vim_submenu)
        .build()
}

pub fn setup_app_menu(app: &AppHandle) -> tauri::Result<()> {
    let menu = create_app_menu(app)?;
    app.set_menu(menu)?;
    app.on_menu_event(|app, event| handle_menu_event(app, event.id().as_ref()));
    Ok(())
}

fn handle_menu_event(app: &AppHandle, id: &str) {
    let Some(action) = parse_menu_id(id) else {
        return;
    };
    tracing::debug!(menu_id = %id, ?action, "应用菜单事件");

    match action {
        MenuAction::CloseWindow => tinynote::ui::close_main_window(app),
        MenuAction::Quit => quit_app(app),
        MenuAction::ToggleVim => toggle_vim(app),
    }
}

fn toggle_vim(app: &AppHandle) {
    let Some(window) = app.get_webview_window(MAIN_WINDOW_LABEL) else {
        tracing::debug!("没有打开的窗口，忽略 Vim 切换");
        return;
    };

    let result = app
        .state::<NoteState>()
        .with_controller(|controller| controller.toggle_vim(&window))
        .and_then(|sent| sent);

    if let Err(e) = result {
        tracing::error!(error = %e, "切换 Vim 模式失败");
    }
}
