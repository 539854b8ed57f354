//! 便笺持久化
//!
//! 整个文档作为不透明字符串读写，保存时整体替换文件内容。

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::core::error::{AppResult, StorageContext};

pub const NOTES_FILE_NAME: &str = "notes.md";

pub struct NoteStore {
    dir: PathBuf,
    path: PathBuf,
}

impl NoteStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        let dir = dir.into();
        let path = dir.join(NOTES_FILE_NAME);
        Self { dir, path }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// 确保数据目录和文档文件存在，已存在的内容不会被改动
    pub fn ensure_initialized(&self) -> AppResult<()> {
        fs::create_dir_all(&self.dir).storage_context(&self.dir)?;

        match OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&self.path)
        {
            Ok(_) => {
                tracing::info!(path = %self.path.display(), "已创建空白便笺文件");
                Ok(())
            }
            Err(err) if err.kind() == io::ErrorKind::AlreadyExists && self.path.is_file() => Ok(()),
            Err(err) => Err(err).storage_context(&self.path),
        }
    }

    /// 读取完整文档
    pub fn load(&self) -> AppResult<String> {
        let bytes = fs::read(&self.path).storage_context(&self.path)?;
        let content = match String::from_utf8(bytes) {
            Ok(content) => content,
            Err(err) => {
                tracing::warn!(
                    path = %self.path.display(),
                    valid_up_to = err.utf8_error().valid_up_to(),
                    "便笺文件不是合法的 UTF-8，已替换无效字节"
                );
                String::from_utf8_lossy(err.as_bytes()).into_owned()
            }
        };

        tracing::debug!(bytes = content.len(), "已读取便笺");
        Ok(content)
    }

    /// 用 `content` 整体覆盖文档
    ///
    /// 先写入同目录临时文件再重命名，失败时原文件保持不变。
    pub fn save(&self, content: &str) -> AppResult<()> {
        let tmp_path = self.tmp_path();

        if let Err(err) = write_synced(&tmp_path, content.as_bytes()) {
            let _ = fs::remove_file(&tmp_path);
            return Err(err).storage_context(&self.path);
        }

        if let Err(err) = fs::rename(&tmp_path, &self.path) {
            let _ = fs::remove_file(&tmp_path);
            return Err(err).storage_context(&self.path);
        }

        tracing::debug!(bytes = content.len(), "已保存便笺");
        Ok(())
    }

    fn tmp_path(&self) -> PathBuf {
        self.path.with_extension("tmp")
    }
}

fn write_synced(path: &Path, bytes: &[u8]) -> io::Result<()> {
    let mut file = File::create(path)?;
    file.write_all(bytes)?;
    file.sync_all()
}
