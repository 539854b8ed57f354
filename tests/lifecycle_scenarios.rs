use std::fs;
use std::path::Path;

use tempfile::TempDir;
use tinynote::services::{
    ActivePhase, ExitDecision, LifecycleState, NoteController, NoteStore, StartupOutcome, UiAction,
};
use tinynote::ui::{BackendEvent, SurfaceRequest};
use tinynote::utils::ShutdownPolicy;
use tokio::sync::mpsc::{self, UnboundedReceiver};

fn launch(data_dir: &Path, policy: ShutdownPolicy) -> (NoteController, StartupOutcome) {
    let mut controller = NoteController::new(NoteStore::new(data_dir), policy);
    let outcome = controller.start().unwrap();
    (controller, outcome)
}

fn open_window(controller: &mut NoteController) -> UnboundedReceiver<BackendEvent> {
    let (tx, rx) = mpsc::unbounded_channel::<BackendEvent>();
    controller.window_created();
    assert!(controller.content_ready(&tx).unwrap());
    rx
}

#[test]
fn fresh_install_shows_empty_document() {
    let temp = TempDir::new().unwrap();
    let data_dir = temp.path().join("data");
    assert!(!data_dir.exists());

    let (mut controller, outcome) = launch(&data_dir, ShutdownPolicy::Terminate);
    assert_eq!(outcome, StartupOutcome::Active);
    assert!(data_dir.join("notes.md").is_file());

    let (tx, mut rx) = mpsc::unbounded_channel::<BackendEvent>();
    controller.window_created();
    controller.content_ready(&tx).unwrap();

    assert_eq!(rx.try_recv().unwrap(), BackendEvent::DocumentLoaded(String::new()));
}

#[test]
fn existing_document_delivered_once() {
    let temp = TempDir::new().unwrap();
    let data_dir = temp.path().join("data");
    fs::create_dir_all(&data_dir).unwrap();
    fs::write(data_dir.join("notes.md"), "hello").unwrap();

    let (mut controller, _) = launch(&data_dir, ShutdownPolicy::Terminate);
    let (tx, mut rx) = mpsc::unbounded_channel::<BackendEvent>();
    controller.window_created();
    controller.content_ready(&tx).unwrap();
    controller.content_ready(&tx).unwrap();

    assert_eq!(
        rx.try_recv().unwrap(),
        BackendEvent::DocumentLoaded("hello".into())
    );
    assert!(rx.try_recv().is_err());
    assert_eq!(
        controller.state(),
        LifecycleState::Active(ActivePhase::Running)
    );
}

#[test]
fn save_request_replaces_file_content() {
    let temp = TempDir::new().unwrap();
    let data_dir = temp.path().join("data");

    let (mut controller, _) = launch(&data_dir, ShutdownPolicy::Terminate);
    let _rx = open_window(&mut controller);
    controller
        .handle_request(SurfaceRequest::Save("hello".into()))
        .unwrap();
    controller
        .handle_request(SurfaceRequest::Save("world".into()))
        .unwrap();

    assert_eq!(fs::read_to_string(data_dir.join("notes.md")).unwrap(), "world");
}

#[test]
fn second_launch_defers_and_focuses_first() {
    let temp = TempDir::new().unwrap();
    let data_dir = temp.path().join("data");

    let (mut first, first_outcome) = launch(&data_dir, ShutdownPolicy::Terminate);
    assert_eq!(first_outcome, StartupOutcome::Active);
    let _rx = open_window(&mut first);
    first
        .handle_request(SurfaceRequest::Save("draft".into()))
        .unwrap();

    let (second, second_outcome) = launch(&data_dir, ShutdownPolicy::Terminate);
    assert_eq!(second_outcome, StartupOutcome::Deferred);
    assert_eq!(second.state(), LifecycleState::Deferred);

    assert_eq!(first.second_instance(), UiAction::FocusWindow);
    assert_eq!(fs::read_to_string(data_dir.join("notes.md")).unwrap(), "draft");
}

#[test]
fn reopened_window_sees_latest_save() {
    let temp = TempDir::new().unwrap();
    let data_dir = temp.path().join("data");

    let (mut controller, _) = launch(&data_dir, ShutdownPolicy::StayResident);
    let (tx, mut rx) = mpsc::unbounded_channel::<BackendEvent>();

    controller.window_created();
    controller.content_ready(&tx).unwrap();
    controller
        .handle_request(SurfaceRequest::Save("edited".into()))
        .unwrap();

    controller.window_destroyed();
    assert_eq!(controller.all_windows_closed(), ExitDecision::StayResident);
    assert_eq!(controller.tray_clicked(), UiAction::CreateWindow);

    controller.window_created();
    controller.content_ready(&tx).unwrap();

    assert_eq!(rx.try_recv().unwrap(), BackendEvent::DocumentLoaded(String::new()));
    assert_eq!(
        rx.try_recv().unwrap(),
        BackendEvent::DocumentLoaded("edited".into())
    );
}

#[test]
fn blank_editor_cannot_overwrite_before_ready() {
    let temp = TempDir::new().unwrap();
    let data_dir = temp.path().join("data");
    fs::create_dir_all(&data_dir).unwrap();
    fs::write(data_dir.join("notes.md"), "hello").unwrap();

    let (mut controller, _) = launch(&data_dir, ShutdownPolicy::Terminate);
    controller.window_created();
    assert!(controller
        .handle_request(SurfaceRequest::Save(String::new()))
        .is_err());
    assert_eq!(fs::read_to_string(data_dir.join("notes.md")).unwrap(), "hello");

    let (tx, mut rx) = mpsc::unbounded_channel::<BackendEvent>();
    assert!(controller.content_ready(&tx).unwrap());
    assert_eq!(
        rx.try_recv().unwrap(),
        BackendEvent::DocumentLoaded("hello".into())
    );
}

#[test]
fn terminate_policy_exits_when_last_window_closes() {
    let temp = TempDir::new().unwrap();
    let (mut controller, _) = launch(&temp.path().join("data"), ShutdownPolicy::Terminate);

    controller.window_created();
    assert_eq!(controller.all_windows_closed(), ExitDecision::Exit);
    controller.terminated();
    assert_eq!(
        controller.state(),
        LifecycleState::Active(ActivePhase::Terminated)
    );
    assert!(controller
        .handle_request(SurfaceRequest::Save("too late".into()))
        .is_err());
}
