//! 前后端桥接消息
//!
//! 后端 → 前端只有两种事件，前端 → 后端只有就绪通知和保存请求，
//! 其余后端能力不对前端暴露（命令白名单见 build.rs 与 capabilities/default.json）。

use tauri::{Emitter, Runtime, WebviewWindow};
use tokio::sync::mpsc::UnboundedSender;

use crate::core::error::{AppError, AppResult};

/// 文档加载完成事件，载荷为完整文档字符串
pub const DOCUMENT_LOADED_EVENT: &str = "on-send-data";
/// 切换 Vim 模式事件，无载荷
pub const VIM_MODE_TOGGLED_EVENT: &str = "on-turn-on-off-vim";

/// 后端发往前端的消息
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendEvent {
    DocumentLoaded(String),
    VimModeToggled,
}

impl BackendEvent {
    pub fn name(&self) -> &'static str {
        match self {
            BackendEvent::DocumentLoaded(_) => DOCUMENT_LOADED_EVENT,
            BackendEvent::VimModeToggled => VIM_MODE_TOGGLED_EVENT,
        }
    }
}

/// 前端发往后端的消息
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SurfaceRequest {
    Save(String),
}

/// 后端事件的投递端，同一投递端上的消息按发送顺序到达
pub trait SurfaceSink {
    fn deliver(&self, event: BackendEvent) -> AppResult<()>;
}

impl<R: Runtime> SurfaceSink for WebviewWindow<R> {
    fn deliver(&self, event: BackendEvent) -> AppResult<()> {
        let name = event.name();
        let label = self.label().to_string();
        match event {
            BackendEvent::DocumentLoaded(content) => self.emit_to(label.as_str(), name, content)?,
            BackendEvent::VimModeToggled => self.emit_to(label.as_str(), name, ())?,
        }
        tracing::debug!(event = name, window = %label, "已向前端发送事件");
        Ok(())
    }
}

impl SurfaceSink for UnboundedSender<BackendEvent> {
    fn deliver(&self, event: BackendEvent) -> AppResult<()> {
        self.send(event)
            .map_err(|e| AppError::other(format!("前端通道已关闭: {:?}", e.0.name())))
    }
}
