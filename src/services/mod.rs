pub mod controller;
pub mod instance_lock;
pub mod lifecycle;
pub mod note_store;

pub use controller::{NoteController, StartupOutcome};
pub use instance_lock::{InstanceLock, LockOutcome};
pub use lifecycle::{ActivePhase, ExitDecision, Lifecycle, LifecycleState, UiAction};
pub use note_store::NoteStore;
