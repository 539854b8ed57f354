pub mod bridge;
pub mod tray;
pub mod window;

// 导出桥接消息
pub use bridge::{
    BackendEvent, SurfaceRequest, SurfaceSink, DOCUMENT_LOADED_EVENT, VIM_MODE_TOGGLED_EVENT,
};

// 导出窗口管理函数
pub use window::{close_main_window, create_main_window, focus_main_window, MAIN_WINDOW_LABEL};

// 导出托盘菜单
pub use tray::{create_tray_menu, TrayMenuAction, TRAY_ID};
