use crate::error::{ResultExt as _, Result};
use crate::profiler::ProfileOptions;
use std::path::Path;

/// Reads profiling options from a JSON file. Missing fields take their
/// defaults.
///
/// # Errors
///
/// Returns `Io` if the file cannot be read and `Config` if it is not valid
/// options JSON.
pub fn load_options(path: &Path) -> Result<ProfileOptions> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file {}", path.display()))?;
    let options: ProfileOptions = serde_json::from_str(&content)?;
    tracing::debug!("Loaded profile options from {}: {options:?}", path.display());
    Ok(options)
}
