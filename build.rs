fn main() {
    // 前端只能调用这里声明的命令，权限在 capabilities/default.json 中授予
    tauri_build::try_build(tauri_build::Attributes::new().app_manifest(
        tauri_build::AppManifest::new().commands(&["save_data", "surface_ready"]),
    ))
    .expect("failed to run tauri-build");
}
