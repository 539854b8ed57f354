use std::env;
use std::path::{Path, PathBuf};

use crate::core::error::{AppError, AppResult};

/// 关闭最后一个窗口后的进程去留
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShutdownPolicy {
    /// 保持常驻，等待 Dock/托盘重新激活（macOS 惯例）
    StayResident,
    /// 直接退出进程
    Terminate,
}

impl ShutdownPolicy {
    /// 按编译目标平台确定，启动时解析一次
    pub fn current() -> Self {
        if cfg!(target_os = "macos") {
            ShutdownPolicy::StayResident
        } else {
            ShutdownPolicy::Terminate
        }
    }
}

/// 安装目录：可执行文件所在目录；位于 `.app/Contents/MacOS` 中时取 `.app` 所在目录
pub fn install_dir() -> AppResult<PathBuf> {
    let exe = env::current_exe()?;
    let exe_dir = exe
        .parent()
        .ok_or_else(|| AppError::config("无法确定可执行文件所在目录"))?;
    Ok(install_dir_for(exe_dir))
}

pub fn install_dir_for(exe_dir: &Path) -> PathBuf {
    let in_bundle = exe_dir.ends_with("Contents/MacOS")
        && exe_dir
            .parent()
            .and_then(Path::parent)
            .and_then(Path::extension)
            .is_some_and(|ext| ext == "app");

    if in_bundle {
        if let Some(root) = exe_dir.ancestors().nth(3) {
            return root.to_path_buf();
        }
    }
    exe_dir.to_path_buf()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shutdown_policy_matches_platform() {
        let policy = ShutdownPolicy::current();
        if cfg!(target_os = "macos") {
            assert_eq!(policy, ShutdownPolicy::StayResident);
        } else {
            assert_eq!(policy, ShutdownPolicy::Terminate);
        }
    }

    #[test]
    fn test_install_dir_plain_binary() {
        let dir = Path::new("/opt/tinynote");
        assert_eq!(install_dir_for(dir), PathBuf::from("/opt/tinynote"));
    }

    #[test]
    fn test_install_dir_inside_app_bundle() {
        let dir = Path::new("/Applications/Tinynote.app/Contents/MacOS");
        assert_eq!(install_dir_for(dir), PathBuf::from("/Applications"));

        let not_bundle = Path::new("/tmp/Contents/MacOS");
        assert_eq!(install_dir_for(not_bundle), not_bundle.to_path_buf());
    }
}
