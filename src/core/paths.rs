use std::path::{Path, PathBuf};

const APP_DIR_NAME: &str = "TimePlanner";

fn resource_roots() -> Vec<PathBuf> {
    let mut roots = Vec::new();
    if let Ok(exe) = std::env::current_exe() {
        if let Some(parent) = exe.parent() {
            roots.push(parent.to_path_buf());
        }
    }
    let manifest_root = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    if manifest_root.exists() {
        roots.push(manifest_root);
    }
    roots
}

/// Resolve a bundled resource (template, language table) relative to the
/// executable first, then the source tree.
pub fn resolve_resource_path(path: &Path) -> PathBuf {
    if path.is_absolute() {
        return path.to_path_buf();
    }
    let roots = resource_roots();
    for root in &roots {
        let candidate = root.join(path);
        if candidate.exists() {
            return candidate;
        }
    }
    roots
        .first()
        .map(|root| root.join(path))
        .unwrap_or_else(|| path.to_path_buf())
}

pub fn resource_dir(name: &str) -> Option<PathBuf> {
    let relative = Path::new(name);
    for root in resource_roots() {
        let candidate = root.join(relative);
        if candidate.is_dir() {
            return Some(candidate);
        }
    }
    None
}

/// Per-user configuration folder, falling back to the temp dir.
pub fn app_config_root() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join(APP_DIR_NAME)
}

pub fn settings_path() -> PathBuf {
    app_config_root().join("settings.json")
}

/// Default location of the document template.
pub fn default_template_path() -> PathBuf {
    resolve_resource_path(Path::new("templates/training_plan.docx"))
}

/// Starting folder for save/open dialogs.
pub fn default_export_dir() -> PathBuf {
    dirs::document_dir()
        .or_else(dirs::home_dir)
        .unwrap_or_else(std::env::temp_dir)
}
