// Note State
//
// 便笺控制器全局状态

use std::sync::Mutex;

use tinynote::core::{AppError, AppResult};
use tinynote::models::WindowConfig;
use tinynote::services::NoteController;

pub struct NoteState {
    controller: Mutex<NoteController>,
    pub window: WindowConfig,
}

impl NoteState {
    pub fn new(controller: NoteController, window: WindowConfig) -> Self {
        Self {
            controller: Mutex::new(controller),
            window,
        }
    }

    /// 在持有控制器锁期间执行 `f`，不要在其中创建窗口
    pub fn with_controller<T>(&self, f: impl FnOnce(&mut NoteController) -> T) -> AppResult<T> {
        let mut controller = self
            .controller
            .lock()
            .map_err(|_| AppError::other("便笺控制器锁已中毒"))?;
        Ok(f(&mut *controller))
    }
}
