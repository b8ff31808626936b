use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};

use plcm_app::service::{PresetFilePicker, Services};
use plcm_app::state::{AppState, Settings};
use plcm_app::{App, AppError};

use crate::summary::{print_project_summary, print_recent_projects};

pub async fn run_inspect(settings: Settings, settings_path: PathBuf, file: &Path) -> Result<()> {
    let services = Services::with_picker(Arc::new(PresetFilePicker::new()));
    let mut app = App::new(AppState::new(None, settings, Some(settings_path)), services);
    app.open_file(file)
        .await
        .map_err(explain)
        .with_context(|| format!("reading {}", file.display()))?;
    print_project_summary(&app.title(), app.document());
    Ok(())
}

pub async fn run_open(settings: Settings, settings_path: PathBuf) -> Result<()> {
    let mut app = App::new(
        AppState::new(None, settings, Some(settings_path)),
        Services::native(None),
    );
    if app.open().await.map_err(explain)? {
        print_project_summary(&app.title(), app.document());
    } else {
        println!("No file selected.");
    }
    Ok(())
}

pub async fn run_convert(
    settings: Settings,
    settings_path: PathBuf,
    file: &Path,
    output: PathBuf,
) -> Result<()> {
    let picker = Arc::new(PresetFilePicker::new().with_save_path(output));
    let mut app = App::new(
        AppState::new(None, settings, Some(settings_path)),
        Services::with_picker(picker),
    );

    app.open_file(file)
        .await
        .map_err(explain)
        .with_context(|| format!("reading {}", file.display()))?;
    let saved = app.save_as().await.map_err(explain)?;
    anyhow::ensure!(saved, "no output path given");

    let written = app
        .document()
        .file_path()
        .map(|path| path.display().to_string())
        .unwrap_or_default();
    println!("Wrote {written}");
    print_project_summary(&app.title(), app.document());
    Ok(())
}

pub fn run_recent(mut settings: Settings, settings_path: &Path, prune: bool) -> Result<()> {
    if prune {
        settings.general.prune_stale_projects();
        settings.save_to(settings_path).map_err(explain)?;
    }
    print_recent_projects(&settings.general.recent_projects_sorted());
    Ok(())
}

/// Attach the suggestion, if any, to the error chain.
fn explain(error: AppError) -> anyhow::Error {
    let message = error.user_message();
    match error.suggestion() {
        Some(hint) => anyhow::Error::new(error).context(format!("{message}\nhint: {hint}")),
        None => anyhow::Error::new(error).context(message),
    }
}
