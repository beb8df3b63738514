//! Command implementations

pub mod completions;
pub mod converters;
pub mod map;

use std::path::Path;

use anyhow::{Context, Result};

use projection_loom::util::config::{
    global_config_path, load_settings, project_config_path, Settings,
};

/// Load settings from an explicit file, or merge the global and project files.
pub fn settings(explicit: Option<&Path>) -> Result<Settings> {
    if let Some(path) = explicit {
        return Settings::load(path);
    }

    let cwd = std::env::current_dir().context("failed to determine current directory")?;
    let project = project_config_path(&cwd);

    Ok(match global_config_path() {
        Some(global) => load_settings(&global, &project),
        None => Settings::load_or_default(&project),
    })
}
