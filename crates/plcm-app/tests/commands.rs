//! Integration tests for the project commands.

mod common;

use std::path::PathBuf;
use std::sync::Arc;

use plcm_app::service::{FileFilter, PickerRequest, PresetFilePicker, Services, SnapshotMapper};
use plcm_app::state::{AppState, ProjectPersisted, Settings};
use plcm_app::{App, AppError};
use plcm_model::{NodePath, VariableNode};
use plcm_persistence::{PersistenceError, document_to_project};
use tempfile::tempdir;

use common::{MemoryStorage, app_with, mutate, sample_document};

#[tokio::test]
async fn test_save_as_then_save_scenario() {
    let dir = tempdir().expect("create temp dir");
    let target = dir.path().join("a.plcson");
    let picker = PresetFilePicker::new().with_save_path(&target);
    let mut app = App::new(
        AppState::default(),
        Services::with_picker(Arc::new(picker)),
    );
    let mut persisted = app.state().subscribe_persisted();

    assert!(!app.is_dirty());
    assert!(!app.save_enabled());

    mutate(&mut app);
    assert!(app.is_dirty());

    assert!(app.save_as().await.expect("save as"));
    assert!(!app.is_dirty());
    assert!(app.save_enabled());
    assert_eq!(app.document().file_path(), Some(target.as_path()));
    assert!(target.exists());

    mutate(&mut app);
    assert!(app.is_dirty());

    app.save().await.expect("save");
    assert!(!app.is_dirty());
    assert_eq!(app.document().file_path(), Some(target.as_path()));
    assert_eq!(persisted.try_recv().expect("persisted"), ProjectPersisted);
    assert!(persisted.try_recv().is_err());

    let reopened = plcm_persistence::load_project(&target).expect("reload");
    assert_eq!(reopened.variable_count(), 2);
}

#[tokio::test]
async fn test_resave_keeps_creation_time() {
    let dir = tempdir().expect("create temp dir");
    let path = dir.path().join("line.plcson");
    let mut project = document_to_project(&sample_document());
    project.created_at = "2020-01-01T00:00:00+00:00".to_string();
    plcm_persistence::save_project(&mut project, &path).expect("write fixture");

    let mut app = App::new(
        AppState::default(),
        Services::with_picker(Arc::new(PresetFilePicker::new())),
    );
    app.open_file(&path).await.expect("open");
    mutate(&mut app);
    app.save().await.expect("save");

    let reloaded = plcm_persistence::load_project(&path).expect("reload");
    assert_eq!(reloaded.created_at(), project.created_at());
}

#[tokio::test]
async fn test_save_as_cancelled() {
    let storage = Arc::new(MemoryStorage::default());
    let mut app = app_with(PresetFilePicker::new(), storage.clone());

    assert!(!app.save_as().await.expect("cancel is not an error"));
    assert!(app.document().file_path().is_none());
    assert!(!app.save_enabled());
    assert!(app.is_dirty());
    assert_eq!(storage.len(), 0);
}

#[tokio::test]
async fn test_save_as_requests_project_filter() {
    let picker = Arc::new(PresetFilePicker::new());
    let mut app = App::new(AppState::default(), Services::with_picker(picker.clone()));

    app.save_as().await.expect("cancel is not an error");
    assert_eq!(
        picker.requests(),
        vec![PickerRequest::Save {
            default_extension: "plcson".to_string(),
            filters: vec![FileFilter::project()],
        }]
    );
}

#[tokio::test]
async fn test_save_without_file_is_unavailable() {
    let storage = Arc::new(MemoryStorage::default());
    let mut app = app_with(PresetFilePicker::new(), storage.clone());
    let mut persisted = app.state().subscribe_persisted();
    mutate(&mut app);

    let err = app.save().await.unwrap_err();
    assert!(matches!(err, AppError::SaveUnavailable));
    assert!(app.is_dirty());
    assert_eq!(storage.len(), 0);
    assert!(persisted.try_recv().is_err());
}

#[tokio::test]
async fn test_open_file_replaces_document() {
    let storage = Arc::new(MemoryStorage::default());
    let path = PathBuf::from("/projects/line.plcson");
    storage.insert(&path, document_to_project(&sample_document()));

    let mut app = app_with(PresetFilePicker::new(), storage);
    mutate(&mut app);
    assert!(app.is_dirty());

    app.open_file(&path).await.expect("open");
    assert!(!app.is_dirty());
    assert!(app.save_enabled());
    assert_eq!(app.title(), "PlcMonitor - line");
    assert_eq!(app.document().devices()[0].name, "Press");

    // Nested edits of the loaded document are observed.
    let id = app.document().devices()[0].id();
    app.document_mut()
        .edit_device(id)
        .expect("device")
        .rename(&NodePath::from(vec![0, 0]), "Pressure (bar)")
        .expect("rename");
    assert!(app.is_dirty());
    assert_eq!(app.title(), "PlcMonitor - line *");
}

#[tokio::test]
async fn test_open_failure_keeps_current_document() {
    let storage = Arc::new(MemoryStorage::default());
    let mut app = app_with(PresetFilePicker::new(), storage);
    mutate(&mut app);
    let before = app.document().clone();

    let err = app.open_file("/projects/missing.plcson").await.unwrap_err();
    assert!(matches!(
        err,
        AppError::Persistence(PersistenceError::File { .. })
    ));
    assert_eq!(app.document(), &before);
    assert!(app.is_dirty());
}

#[tokio::test]
async fn test_open_rejects_duplicate_device_ids() {
    let storage = Arc::new(MemoryStorage::default());
    let path = PathBuf::from("/projects/dup.plcson");
    let mut project = document_to_project(&sample_document());
    project.plcs.push(project.plcs[0].clone());
    storage.insert(&path, project);

    let mut app = app_with(PresetFilePicker::new(), storage);
    let err = app.open_file(&path).await.unwrap_err();
    assert!(matches!(err, AppError::Mapping { .. }));
    assert!(app.document().devices().is_empty());
}

#[tokio::test]
async fn test_open_via_picker() {
    let storage = Arc::new(MemoryStorage::default());
    let path = PathBuf::from("/projects/line.plcson");
    storage.insert(&path, document_to_project(&sample_document()));

    let mut app = app_with(PresetFilePicker::new().with_open_path(&path), storage);
    assert!(app.open().await.expect("open"));
    assert_eq!(app.document().file_path(), Some(path.as_path()));
}

#[tokio::test]
async fn test_open_cancelled_is_noop() {
    let storage = Arc::new(MemoryStorage::default());
    let mut app = app_with(PresetFilePicker::new(), storage);
    mutate(&mut app);
    let before = app.document().clone();

    assert!(!app.open().await.expect("cancel is not an error"));
    assert_eq!(app.document(), &before);
    assert!(app.is_dirty());
}

#[tokio::test]
async fn test_failed_save_keeps_state() {
    let storage = Arc::new(MemoryStorage::default());
    let path = PathBuf::from("/projects/line.plcson");
    storage.insert(&path, document_to_project(&sample_document()));

    let mut app = app_with(PresetFilePicker::new(), storage.clone());
    app.open_file(&path).await.expect("open");
    mutate(&mut app);

    storage.fail_writes(true);
    let err = app.save().await.unwrap_err();
    assert!(matches!(err, AppError::Persistence(_)));
    assert!(app.is_dirty());
    assert_eq!(app.document().file_path(), Some(path.as_path()));
    assert_eq!(storage.get(&path).expect("original").variable_count(), 1);
}

#[tokio::test]
async fn test_failed_save_as_keeps_handle() {
    let storage = Arc::new(MemoryStorage::default());
    storage.fail_writes(true);
    let mut app = app_with(
        PresetFilePicker::new().with_save_path("/projects/new.plcson"),
        storage,
    );

    assert!(app.save_as().await.is_err());
    assert!(app.document().file_path().is_none());
    assert!(!app.save_enabled());
    assert!(!app.is_dirty());
}

#[tokio::test]
async fn test_new_project_is_empty_and_rearmed() {
    let storage = Arc::new(MemoryStorage::default());
    let path = PathBuf::from("/projects/line.plcson");
    storage.insert(&path, document_to_project(&sample_document()));

    let mut app = app_with(PresetFilePicker::new(), storage);
    app.open_file(&path).await.expect("open");

    app.new_project();
    assert!(app.document().devices().is_empty());
    assert!(!app.save_enabled());
    assert_eq!(app.title(), "PlcMonitor - Untitled");

    mutate(&mut app);
    assert!(app.is_dirty());
}

#[tokio::test]
async fn test_removing_nested_variable_marks_dirty() {
    let storage = Arc::new(MemoryStorage::default());
    let path = PathBuf::from("/projects/line.plcson");
    storage.insert(&path, document_to_project(&sample_document()));

    let mut app = app_with(PresetFilePicker::new(), storage);
    app.open_file(&path).await.expect("open");

    let id = app.document().devices()[0].id();
    let removed = app
        .document_mut()
        .edit_device(id)
        .expect("device")
        .remove(&NodePath::from(vec![0, 0]))
        .expect("remove");
    assert!(matches!(removed, VariableNode::Variable(_)));
    assert!(app.is_dirty());
}

#[tokio::test]
async fn test_recent_projects_recorded_and_persisted() {
    let dir = tempdir().expect("create temp dir");
    let settings_path = dir.path().join("settings.toml");
    let target = dir.path().join("saved.plcson");

    let mut app = App::new(
        AppState::new(None, Settings::default(), Some(settings_path.clone())),
        Services::new(
            Arc::new(PresetFilePicker::new().with_save_path(&target)),
            Arc::new(MemoryStorage::default()),
            Arc::new(SnapshotMapper),
        ),
    );
    app.save_as().await.expect("save as");

    let recent = &app.state().settings.general.recent_projects;
    assert_eq!(recent.len(), 1);
    assert_eq!(recent[0].path, target);
    assert_eq!(recent[0].display_name, "saved");

    let stored = Settings::load_from(&settings_path);
    assert_eq!(stored.general.recent_projects, *recent);
}
