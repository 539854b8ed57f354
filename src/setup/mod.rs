// 启动初始化逻辑
pub mod initialization;

// 应用菜单栏
pub mod menu;

// 托盘图标
pub mod tray;

// 窗口创建与运行时事件
pub mod events;

// 重新导出常用函数供 main.rs 使用
pub use events::{handle_run_event, handle_second_instance};
pub use initialization::{bootstrap, initialize_app};
