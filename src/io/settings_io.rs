use std::fs;
use std::path::{Path, PathBuf};

use crate::model::settings::Settings;

/// File that marks the vault root and holds the durable settings.
pub const SETTINGS_FILE: &str = "tasknote.toml";

/// Keys editable through `tn config set`.
pub const SETTING_KEYS: &[&str] = &[
    "tasks_dir",
    "task_file_name",
    "task_file_template",
    "task_id",
    "append_file",
    "append_template",
    "id_allocator",
];

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("not a task vault: no tasknote.toml found (run `tn init`)")]
    NotAVault,
    #[error("could not read {path}: {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not write {path}: {source}")]
    WriteError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not parse tasknote.toml: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("unknown setting \"{0}\"")]
    UnknownKey(String),
}

/// Discover the vault root by walking up from `start`, looking for the
/// settings file.
pub fn discover_vault(start: &Path) -> Result<PathBuf, SettingsError> {
    let mut current = start.to_path_buf();
    loop {
        if current.join(SETTINGS_FILE).is_file() {
            return Ok(current);
        }
        if !current.pop() {
            return Err(SettingsError::NotAVault);
        }
    }
}

/// Load settings from the vault root. An absent file yields the defaults;
/// a sparse file merges key-by-key over them (serde field defaults).
pub fn load_settings(root: &Path) -> Result<Settings, SettingsError> {
    let path = root.join(SETTINGS_FILE);
    if !path.is_file() {
        return Ok(Settings::default());
    }
    let text = fs::read_to_string(&path).map_err(|e| SettingsError::ReadError {
        path: path.clone(),
        source: e,
    })?;
    Ok(toml::from_str(&text)?)
}

/// Read the settings, returning both the parsed struct and the raw
/// toml_edit document for round-trip-safe editing.
pub fn read_settings_doc(
    root: &Path,
) -> Result<(Settings, toml_edit::DocumentMut), SettingsError> {
    let path = root.join(SETTINGS_FILE);
    let text = fs::read_to_string(&path).map_err(|e| SettingsError::ReadError {
        path: path.clone(),
        source: e,
    })?;
    let settings: Settings = toml::from_str(&text)?;
    let doc: toml_edit::DocumentMut = text
        .parse()
        .map_err(|_: toml_edit::TomlError| SettingsError::ParseError(
            toml::from_str::<toml::Value>("=").unwrap_err(),
        ))?;
    Ok((settings, doc))
}

/// Write the settings document back to disk, preserving formatting.
pub fn write_settings(root: &Path, doc: &toml_edit::DocumentMut) -> Result<(), SettingsError> {
    let path = root.join(SETTINGS_FILE);
    fs::write(&path, doc.to_string()).map_err(|e| SettingsError::WriteError {
        path,
        source: e,
    })
}

/// Set one top-level field in the settings document.
pub fn set_field(
    doc: &mut toml_edit::DocumentMut,
    key: &str,
    value: &str,
) -> Result<(), SettingsError> {
    if !SETTING_KEYS.contains(&key) {
        return Err(SettingsError::UnknownKey(key.to_string()));
    }
    doc[key] = toml_edit::value(value);
    Ok(())
}

/// Look up one field of the parsed settings by key name.
pub fn get_field(settings: &Settings, key: &str) -> Result<String, SettingsError> {
    match key {
        "tasks_dir" => Ok(settings.tasks_dir.clone()),
        "task_file_name" => Ok(settings.task_file_name.clone()),
        "task_file_template" => Ok(settings.task_file_template.clone()),
        "task_id" => Ok(settings.task_id.clone()),
        "append_file" => Ok(settings.append_file.clone()),
        "append_template" => Ok(settings.append_template.clone()),
        "id_allocator" => Ok(match settings.id_allocator {
            crate::model::settings::IdAllocatorKind::Count => "count".to_string(),
            crate::model::settings::IdAllocatorKind::Uuid => "uuid".to_string(),
        }),
        _ => Err(SettingsError::UnknownKey(key.to_string())),
    }
}
