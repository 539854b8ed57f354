//! 便笺控制器
//!
//! 每个进程只构造一个，持有文档存储、单实例锁和生命周期状态，
//! 把桥接消息接到存储上。窗口与托盘由外壳根据返回的动作处理。

use crate::core::error::{AppError, AppResult};
use crate::ui::bridge::{BackendEvent, SurfaceRequest, SurfaceSink};
use crate::utils::platform::ShutdownPolicy;

use super::instance_lock::{InstanceLock, LockOutcome};
use super::lifecycle::{ExitDecision, Lifecycle, LifecycleState, UiAction};
use super::note_store::NoteStore;

/// 启动结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartupOutcome {
    /// 获得锁且存储就绪，外壳应创建菜单、窗口和托盘
    Active,
    /// 已有实例在运行，外壳应直接退出
    Deferred,
}

pub struct NoteController {
    store: NoteStore,
    lifecycle: Lifecycle,
    lock: Option<InstanceLock>,
}

impl NoteController {
    pub fn new(store: NoteStore, policy: ShutdownPolicy) -> Self {
        Self {
            store,
            lifecycle: Lifecycle::new(policy),
            lock: None,
        }
    }

    pub fn store(&self) -> &NoteStore {
        &self.store
    }

    pub fn state(&self) -> LifecycleState {
        self.lifecycle.state()
    }

    pub fn holds_lock(&self) -> bool {
        self.lock.is_some()
    }

    /// 加锁并初始化存储，存储初始化失败视为致命错误
    pub fn start(&mut self) -> AppResult<StartupOutcome> {
        self.lifecycle.begin_locking()?;

        match InstanceLock::try_acquire(self.store.dir())? {
            LockOutcome::Acquired(lock) => {
                self.lifecycle.lock_resolved(true)?;
                self.lock = Some(lock);
            }
            LockOutcome::Contended => {
                self.lifecycle.lock_resolved(false)?;
                tracing::info!("已有实例在运行，本进程退出");
                return Ok(StartupOutcome::Deferred);
            }
        }

        self.store.ensure_initialized()?;
        tracing::info!(path = %self.store.path().display(), "便笺存储已就绪");
        Ok(StartupOutcome::Active)
    }

    pub fn window_created(&mut self) {
        self.lifecycle.window_created();
    }

    /// 前端已注册好事件监听：读取此刻磁盘上的文档并推送给前端
    ///
    /// 返回是否实际推送（每个窗口只推送一次）。推送成功前窗口不接受保存请求。
    pub fn content_ready(&mut self, sink: &dyn SurfaceSink) -> AppResult<bool> {
        if !self.lifecycle.content_ready() {
            return Ok(false);
        }
        let delivered = self
            .store
            .load()
            .and_then(|content| sink.deliver(BackendEvent::DocumentLoaded(content)));
        if let Err(e) = delivered {
            self.lifecycle.delivery_failed();
            return Err(e);
        }
        Ok(true)
    }

    /// 处理前端请求
    ///
    /// 错误只返回给外壳记录日志，不会回传给前端。
    pub fn handle_request(&mut self, request: SurfaceRequest) -> AppResult<()> {
        match request {
            SurfaceRequest::Save(content) => {
                if !self.lifecycle.accepts_saves() {
                    return Err(AppError::Inactive(format!(
                        "当前状态 {:?} 不接受保存请求",
                        self.lifecycle.state()
                    )));
                }
                self.store.save(&content)?;
                tracing::info!(bytes = content.len(), "便笺已保存");
                Ok(())
            }
        }
    }

    pub fn toggle_vim(&self, sink: &dyn SurfaceSink) -> AppResult<()> {
        sink.deliver(BackendEvent::VimModeToggled)
    }

    pub fn tray_clicked(&mut self) -> UiAction {
        self.lifecycle.tray_clicked()
    }

    pub fn reactivated(&mut self, has_visible_windows: bool) -> UiAction {
        self.lifecycle.reactivated(has_visible_windows)
    }

    pub fn second_instance(&mut self) -> UiAction {
        let action = self.lifecycle.second_instance();
        tracing::info!(?action, "检测到重复启动");
        action
    }

    pub fn window_destroyed(&mut self) {
        self.lifecycle.window_destroyed();
    }

    pub fn all_windows_closed(&mut self) -> ExitDecision {
        self.lifecycle.all_windows_closed()
    }

    pub fn quit_requested(&mut self) {
        self.lifecycle.quit_requested();
    }

    /// 进程即将退出，释放单实例锁
    pub fn terminated(&mut self) {
        self.lifecycle.terminated();
        self.lock = None;
    }
}
