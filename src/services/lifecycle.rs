//! 进程生命周期状态机
//!
//! ```text
//! Starting → Locking → Deferred
//!                    → Active(Initializing → Running → ShuttingDown → Terminated)
//! ```
//!
//! 常驻平台上关闭最后一个窗口进入 `Resident`，重新激活后回到 `Initializing`。
//! 状态机本身不接触窗口或文件，只返回外壳需要执行的动作。

use crate::core::error::{AppError, AppResult};
use crate::utils::platform::ShutdownPolicy;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleState {
    Starting,
    Locking,
    /// 已有实例在运行，本进程不创建任何界面
    Deferred,
    Active(ActivePhase),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivePhase {
    /// 窗口已创建或即将创建，文档尚未送达
    Initializing,
    Running,
    /// 没有窗口，进程常驻等待重新激活
    Resident,
    ShuttingDown,
    Terminated,
}

/// 需要外壳执行的窗口动作
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiAction {
    CreateWindow,
    FocusWindow,
    Nothing,
}

/// 所有窗口关闭后的处理结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitDecision {
    Exit,
    StayResident,
}

#[derive(Debug)]
pub struct Lifecycle {
    state: LifecycleState,
    policy: ShutdownPolicy,
    window_open: bool,
    document_delivered: bool,
}

impl Lifecycle {
    pub fn new(policy: ShutdownPolicy) -> Self {
        Self {
            state: LifecycleState::Starting,
            policy,
            window_open: false,
            document_delivered: false,
        }
    }

    pub fn state(&self) -> LifecycleState {
        self.state
    }

    pub fn is_active(&self) -> bool {
        matches!(
            self.state,
            LifecycleState::Active(
                ActivePhase::Initializing | ActivePhase::Running | ActivePhase::Resident
            )
        )
    }

    /// 只有文档已送达当前窗口后才接受保存，否则前端可能用空内容覆盖磁盘上的便笺
    pub fn accepts_saves(&self) -> bool {
        self.is_active() && self.window_open && self.document_delivered
    }

    pub fn begin_locking(&mut self) -> AppResult<()> {
        self.expect_state(LifecycleState::Starting, "begin_locking")?;
        self.transition(LifecycleState::Locking);
        Ok(())
    }

    pub fn lock_resolved(&mut self, acquired: bool) -> AppResult<()> {
        self.expect_state(LifecycleState::Locking, "lock_resolved")?;
        if acquired {
            self.transition(LifecycleState::Active(ActivePhase::Initializing));
        } else {
            self.transition(LifecycleState::Deferred);
        }
        Ok(())
    }

    pub fn window_created(&mut self) {
        if !self.is_active() {
            tracing::warn!(state = ?self.state, "非活动状态下创建了窗口");
            return;
        }
        self.window_open = true;
        self.document_delivered = false;
        if self.state == LifecycleState::Active(ActivePhase::Resident) {
            self.transition(LifecycleState::Active(ActivePhase::Initializing));
        }
    }

    /// 前端已注册事件监听，返回是否需要推送文档（每个窗口只推送一次）
    pub fn content_ready(&mut self) -> bool {
        if !self.is_active() || !self.window_open || self.document_delivered {
            tracing::debug!(
                state = ?self.state,
                window_open = self.window_open,
                delivered = self.document_delivered,
                "忽略内容就绪事件"
            );
            return false;
        }
        self.document_delivered = true;
        self.transition(LifecycleState::Active(ActivePhase::Running));
        true
    }

    /// 文档没能送达，前端可以再次报告就绪
    pub fn delivery_failed(&mut self) {
        self.document_delivered = false;
    }

    /// 托盘单击：无窗口则重建，否则恢复并聚焦
    pub fn tray_clicked(&mut self) -> UiAction {
        self.activate(UiAction::FocusWindow)
    }

    /// Dock 重新激活：没有窗口时重建，窗口存在但不可见时恢复
    pub fn reactivated(&mut self, has_visible_windows: bool) -> UiAction {
        let with_window = if has_visible_windows {
            UiAction::Nothing
        } else {
            UiAction::FocusWindow
        };
        self.activate(with_window)
    }

    /// 另一个进程尝试启动
    pub fn second_instance(&mut self) -> UiAction {
        self.activate(UiAction::FocusWindow)
    }

    fn activate(&mut self, with_window: UiAction) -> UiAction {
        if !self.is_active() {
            return UiAction::Nothing;
        }
        if self.window_open {
            return with_window;
        }
        self.transition(LifecycleState::Active(ActivePhase::Initializing));
        UiAction::CreateWindow
    }

    pub fn window_destroyed(&mut self) {
        self.window_open = false;
        self.document_delivered = false;
    }

    pub fn all_windows_closed(&mut self) -> ExitDecision {
        self.window_destroyed();
        if !self.is_active() {
            return ExitDecision::Exit;
        }
        match self.policy {
            ShutdownPolicy::StayResident => {
                self.transition(LifecycleState::Active(ActivePhase::Resident));
                ExitDecision::StayResident
            }
            ShutdownPolicy::Terminate => {
                self.transition(LifecycleState::Active(ActivePhase::ShuttingDown));
                ExitDecision::Exit
            }
        }
    }

    pub fn quit_requested(&mut self) {
        if self.is_active() {
            self.transition(LifecycleState::Active(ActivePhase::ShuttingDown));
        }
    }

    pub fn terminated(&mut self) {
        if let LifecycleState::Active(_) = self.state {
            self.transition(LifecycleState::Active(ActivePhase::Terminated));
        }
    }

    fn expect_state(&self, expected: LifecycleState, action: &'static str) -> AppResult<()> {
        if self.state != expected {
            return Err(AppError::InvalidTransition {
                from: self.state,
                action,
            });
        }
        Ok(())
    }

    fn transition(&mut self, next: LifecycleState) {
        if self.state != next {
            tracing::debug!(from = ?self.state, to = ?next, "生命周期状态变更");
            self.state = next;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn active(policy: ShutdownPolicy) -> Lifecycle {
        let mut lifecycle = Lifecycle::new(policy);
        lifecycle.begin_locking().unwrap();
        lifecycle.lock_resolved(true).unwrap();
        lifecycle
    }

    fn running(policy: ShutdownPolicy) -> Lifecycle {
        let mut lifecycle = active(policy);
        lifecycle.window_created();
        assert!(lifecycle.content_ready());
        lifecycle
    }

    #[test]
    fn test_startup_to_initializing() {
        let mut lifecycle = Lifecycle::new(ShutdownPolicy::Terminate);
        assert_eq!(lifecycle.state(), LifecycleState::Starting);

        lifecycle.begin_locking().unwrap();
        assert_eq!(lifecycle.state(), LifecycleState::Locking);

        lifecycle.lock_resolved(true).unwrap();
        assert_eq!(
            lifecycle.state(),
            LifecycleState::Active(ActivePhase::Initializing)
        );
    }

    #[test]
    fn test_contended_lock_defers() {
        let mut lifecycle = Lifecycle::new(ShutdownPolicy::Terminate);
        lifecycle.begin_locking().unwrap();
        lifecycle.lock_resolved(false).unwrap();

        assert_eq!(lifecycle.state(), LifecycleState::Deferred);
        assert!(!lifecycle.accepts_saves());
        assert_eq!(lifecycle.second_instance(), UiAction::Nothing);
        assert_eq!(lifecycle.tray_clicked(), UiAction::Nothing);
    }

    #[test]
    fn test_invalid_transitions_rejected() {
        let mut lifecycle = Lifecycle::new(ShutdownPolicy::Terminate);
        let err = lifecycle.lock_resolved(true).unwrap_err();
        assert!(matches!(
            err,
            AppError::InvalidTransition {
                from: LifecycleState::Starting,
                action: "lock_resolved"
            }
        ));

        lifecycle.begin_locking().unwrap();
        assert!(lifecycle.begin_locking().is_err());
    }

    #[test]
    fn test_content_ready_once_per_window() {
        let mut lifecycle = active(ShutdownPolicy::Terminate);
        assert!(!lifecycle.content_ready());

        lifecycle.window_created();
        assert!(lifecycle.content_ready());
        assert_eq!(lifecycle.state(), LifecycleState::Active(ActivePhase::Running));
        assert!(!lifecycle.content_ready());
    }

    #[test]
    fn test_tray_click_focuses_live_window() {
        let mut lifecycle = running(ShutdownPolicy::Terminate);
        assert_eq!(lifecycle.tray_clicked(), UiAction::FocusWindow);
        assert_eq!(lifecycle.state(), LifecycleState::Active(ActivePhase::Running));
    }

    #[test]
    fn test_second_instance_focuses_window() {
        let mut lifecycle = running(ShutdownPolicy::Terminate);
        assert_eq!(lifecycle.second_instance(), UiAction::FocusWindow);

        let mut initializing = active(ShutdownPolicy::Terminate);
        initializing.window_created();
        assert_eq!(initializing.second_instance(), UiAction::FocusWindow);
    }

    #[test]
    fn test_terminate_policy_exits_after_last_window() {
        let mut lifecycle = running(ShutdownPolicy::Terminate);
        assert_eq!(lifecycle.all_windows_closed(), ExitDecision::Exit);
        assert_eq!(
            lifecycle.state(),
            LifecycleState::Active(ActivePhase::ShuttingDown)
        );

        lifecycle.terminated();
        assert_eq!(
            lifecycle.state(),
            LifecycleState::Active(ActivePhase::Terminated)
        );
        assert!(!lifecycle.accepts_saves());
    }

    #[test]
    fn test_stay_resident_and_reactivate() {
        let mut lifecycle = running(ShutdownPolicy::StayResident);
        assert_eq!(lifecycle.all_windows_closed(), ExitDecision::StayResident);
        assert_eq!(lifecycle.state(), LifecycleState::Active(ActivePhase::Resident));
        assert!(!lifecycle.accepts_saves());

        assert_eq!(lifecycle.reactivated(false), UiAction::CreateWindow);
        assert_eq!(
            lifecycle.state(),
            LifecycleState::Active(ActivePhase::Initializing)
        );

        lifecycle.window_created();
        assert!(lifecycle.content_ready());
        assert_eq!(lifecycle.reactivated(true), UiAction::Nothing);
        assert_eq!(lifecycle.reactivated(false), UiAction::FocusWindow);
    }

    #[test]
    fn test_saves_rejected_until_document_delivered() {
        let mut lifecycle = active(ShutdownPolicy::Terminate);
        assert!(!lifecycle.accepts_saves());

        lifecycle.window_created();
        assert!(!lifecycle.accepts_saves());

        assert!(lifecycle.content_ready());
        assert!(lifecycle.accepts_saves());

        // 重建的窗口需要重新送达文档
        lifecycle.window_destroyed();
        lifecycle.window_created();
        assert!(!lifecycle.accepts_saves());
        assert!(lifecycle.content_ready());
        assert!(lifecycle.accepts_saves());
    }

    #[test]
    fn test_tray_click_recreates_window_when_resident() {
        let mut lifecycle = running(ShutdownPolicy::StayResident);
        lifecycle.all_windows_closed();

        assert_eq!(lifecycle.tray_clicked(), UiAction::CreateWindow);
        lifecycle.window_created();
        assert!(lifecycle.content_ready());
    }

    #[test]
    fn test_second_instance_without_window_recreates() {
        let mut lifecycle = running(ShutdownPolicy::StayResident);
        lifecycle.all_windows_closed();
        assert_eq!(lifecycle.second_instance(), UiAction::CreateWindow);
    }

    #[test]
    fn test_quit_requested() {
        let mut lifecycle = running(ShutdownPolicy::StayResident);
        lifecycle.quit_requested();
        assert_eq!(
            lifecycle.state(),
            LifecycleState::Active(ActivePhase::ShuttingDown)
        );
        assert_eq!(lifecycle.tray_clicked(), UiAction::Nothing);
        assert_eq!(lifecycle.all_windows_closed(), ExitDecision::Exit);
    }
}
