use std::path::Path;

use credit_risk_core::EngineConfig;

use super::file::{read_to_string, resolve_path};

/// Load an engine configuration, choosing the parser by file extension.
/// Fields left out of the file keep their defaults.
pub fn load_config(path: &str) -> Result<EngineConfig, Box<dyn std::error::Error>> {
    let resolved = resolve_path(path)?;
    let contents = read_to_string(&resolved)?;
    let config: EngineConfig = match extension(&resolved).as_deref() {
        Some("json") => serde_json::from_str(&contents)
            .map_err(|e| format!("Failed to parse '{}': {}", resolved.display(), e))?,
        Some("yaml") | Some("yml") => serde_yaml::from_str(&contents)
            .map_err(|e| format!("Failed to parse '{}': {}", resolved.display(), e))?,
        _ => {
            return Err(format!(
                "Unsupported config format '{}': use .json, .yaml or .yml",
                resolved.display()
            )
            .into())
        }
    };
    tracing::debug!(path = %resolved.display(), "engine configuration loaded");
    Ok(config)
}

fn extension(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
}
