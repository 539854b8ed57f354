use tauri::{
    menu::{Menu, MenuItem, PredefinedMenuItem},
    AppHandle, Runtime,
};

pub const TRAY_ID: &str = "main";

const TRAY_SHOW_ID: &str = "tray:show";
const TRAY_QUIT_ID: &str = "tray:quit";

/// 托盘右键菜单项
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrayMenuAction {
    Show,
    Quit,
}

impl TrayMenuAction {
    pub fn from_id(id: &str) -> Option<Self> {
        match id {
            TRAY_SHOW_ID => Some(TrayMenuAction::Show),
            TRAY_QUIT_ID => Some(TrayMenuAction::Quit),
            _ => None,
        }
    }

    pub fn id(&self) -> &'static str {
        match self {
            TrayMenuAction::Show => TRAY_SHOW_ID,
            TrayMenuAction::Quit => TRAY_QUIT_ID,
        }
    }
}

pub fn create_tray_menu<R: Runtime>(app: &AppHandle<R>) -> tauri::Result<Menu<R>> {
    let show_item = MenuItem::with_id(
        app,
        TrayMenuAction::Show.id(),
        "显示窗口",
        true,
        None::<&str>,
    )?;
    let quit_item = MenuItem::with_id(app, TrayMenuAction::Quit.id(), "退出", true, None::<&str>)?;

    Menu::with_items(
        app,
        &[&show_item, &PredefinedMenuItem::separator(app)?, &quit_item],
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tray_menu_ids_round_trip() {
        for action in [TrayMenuAction::Show, TrayMenuAction::Quit] {
            assert_eq!(TrayMenuAction::from_id(action.id()), Some(action));
        }
        assert_eq!(TrayMenuAction::from_id("show"), None);
    }
}
