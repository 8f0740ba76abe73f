pub mod agents;
pub mod check;
pub mod init;

use handoff_config::{AppConfig, ConfigError};
use std::path::Path;

/// Load from `--config` when given, otherwise from the default location.
///
/// A named file must exist; only the default location falls back to defaults.
pub fn load_config(path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    match path {
        Some(path) => AppConfig::load_required(path),
        None => AppConfig::load(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_missing_path_is_an_error() {
        let err = load_config(Some(Path::new("/nonexistent/typo.toml"))).unwrap_err();
        assert!(matches!(err, ConfigError::ReadError { .. }));
    }

    #[test]
    fn explicit_path_is_loaded() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("agents.toml");
        std::fs::write(&path, AppConfig::default_toml()).unwrap();

        let config = load_config(Some(&path)).unwrap();
        assert_eq!(config.agents.len(), 2);
    }
}
