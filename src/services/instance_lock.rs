//! 单实例锁
//!
//! 在数据目录下对锁文件加排他锁，保证同一时刻只有一个进程拥有该目录中的文档。
//! 锁随 `InstanceLock` 析构或进程退出释放。

use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};

use fs2::FileExt;

use crate::core::error::{AppResult, StorageContext};

pub const LOCK_FILE_NAME: &str = ".tinynote.lock";

#[derive(Debug)]
pub struct InstanceLock {
    file: File,
    path: PathBuf,
}

/// 加锁结果，锁被占用属于正常分支而不是错误
#[derive(Debug)]
pub enum LockOutcome {
    Acquired(InstanceLock),
    Contended,
}

impl LockOutcome {
    pub fn is_acquired(&self) -> bool {
        matches!(self, LockOutcome::Acquired(_))
    }
}

impl InstanceLock {
    pub fn try_acquire(dir: &Path) -> AppResult<LockOutcome> {
        fs::create_dir_all(dir).storage_context(dir)?;

        let path = dir.join(LOCK_FILE_NAME);
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(&path)
            .storage_context(&path)?;

        match file.try_lock_exclusive() {
            Ok(()) => {
                tracing::debug!(path = %path.display(), "已获取单实例锁");
                Ok(LockOutcome::Acquired(InstanceLock { file, path }))
            }
            Err(err) if is_contended(&err) => {
                tracing::info!(path = %path.display(), "单实例锁已被其他进程持有");
                Ok(LockOutcome::Contended)
            }
            Err(err) => Err(err).storage_context(&path),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for InstanceLock {
    fn drop(&mut self) {
        if let Err(err) = FileExt::unlock(&self.file) {
            tracing::warn!(error = %err, path = %self.path.display(), "释放单实例锁失败");
        }
    }
}

fn is_contended(err: &io::Error) -> bool {
    err.kind() == io::ErrorKind::WouldBlock
        || err.raw_os_error() == fs2::lock_contended_error().raw_os_error()
}
