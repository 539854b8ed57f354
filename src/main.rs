// 发布版本在 Windows 上不弹出控制台窗口
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod commands;
mod setup;

use commands::{save_data, surface_ready, NoteState};
use tinynote::services::{NoteController, NoteStore};
use tinynote::utils::ShutdownPolicy;

fn main() {
    let bootstrap = match setup::bootstrap() {
        Ok(bootstrap) => bootstrap,
        Err(e) => {
            eprintln!("Tinynote 启动失败: {}", e);
            std::process::exit(1);
        }
    };
    let _log_guard = bootstrap.log_guard;

    let controller = NoteController::new(
        NoteStore::new(&bootstrap.data_dir),
        ShutdownPolicy::current(),
    );
    let state = NoteState::new(controller, bootstrap.config.window);

    tauri::Builder::default()
        // 必须最先注册：重复启动的进程在插件初始化时退出，并通知已运行的实例
        .plugin(tauri_plugin_single_instance::init(|app, argv, cwd| {
            setup::handle_second_instance(app, argv, cwd)
        }))
        .plugin(tauri_plugin_dialog::init())
        .manage(state)
        .setup(|app| {
            setup::initialize_app(app)?;
            Ok(())
        })
        .invoke_handler(tauri::generate_handler![save_data, surface_ready])
        .build(tauri::generate_context!())
        .expect("error while building tauri application")
        .run(setup::handle_run_event);
}
