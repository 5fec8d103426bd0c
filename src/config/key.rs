//! API key resolution

use std::path::Path;

use tracing::{debug, warn};

use super::{read_optional, ConfigError};

/// Environment variable checked before the key file
pub const API_KEY_ENV: &str = "IQAIR_API_KEY";

/// Picks the API key from `env_value`, falling back to the file at `key_path`
///
/// Both sources are trimmed; an empty value counts as absent. A key file that
/// exists but can't be read is logged and then reported as a missing key
/// naming both sources.
pub fn resolve_api_key(env_value: Option<String>, key_path: &Path) -> Result<String, ConfigError> {
    if let Some(key) = env_value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty()) {
        debug!("using API key from {}", API_KEY_ENV);
        return Ok(key);
    }

    let contents = match read_optional(key_path) {
        Ok(contents) => contents,
        Err(e) => {
            warn!(path = %key_path.display(), error = %e, "could not read API key file");
            None
        }
    };
    let from_file = contents
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty());

    match from_file {
        Some(key) => {
            debug!(path = %key_path.display(), "using API key from file");
            Ok(key)
        }
        None => Err(ConfigError::MissingApiKey {
            env_var: API_KEY_ENV,
            path: key_path.to_path_buf(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_env_value_wins_over_file() {
        let temp_dir = TempDir::new().unwrap();
        let key_path = temp_dir.path().join("key");
        fs::write(&key_path, "from-file").unwrap();

        let key = resolve_api_key(Some("from-env".to_string()), &key_path).unwrap();

        assert_eq!(key, "from-env");
    }

    #[test]
    fn test_env_value_is_trimmed() {
        let temp_dir = TempDir::new().unwrap();
        let key = resolve_api_key(Some("  abc123\n".to_string()), &temp_dir.path().join("key"));

        assert_eq!(key.unwrap(), "abc123");
    }

    #[test]
    fn test_file_used_when_env_missing() {
        let temp_dir = TempDir::new().unwrap();
        let key_path = temp_dir.path().join("key");
        fs::write(&key_path, "file-key\n").unwrap();

        assert_eq!(resolve_api_key(None, &key_path).unwrap(), "file-key");
    }

    #[test]
    fn test_blank_env_falls_back_to_file() {
        let temp_dir = TempDir::new().unwrap();
        let key_path = temp_dir.path().join("key");
        fs::write(&key_path, "file-key").unwrap();

        assert_eq!(resolve_api_key(Some("   ".to_string()), &key_path).unwrap(), "file-key");
    }

    #[test]
    fn test_missing_both_names_both_sources() {
        let temp_dir = TempDir::new().unwrap();
        let key_path = temp_dir.path().join("key");

        let err = resolve_api_key(None, &key_path).unwrap_err();
        let message = err.to_string();

        assert!(matches!(err, ConfigError::MissingApiKey { .. }));
        assert!(message.contains("IQAIR_API_KEY"), "{message}");
        assert!(message.contains(&key_path.display().to_string()), "{message}");
    }

    #[test]
    fn test_empty_key_file_is_missing() {
        let temp_dir = TempDir::new().unwrap();
        let key_path = temp_dir.path().join("key");
        fs::write(&key_path, "\n\n").unwrap();

        assert!(resolve_api_key(None, &key_path).is_err());
    }

    #[test]
    fn test_unreadable_key_file_is_missing() {
        let temp_dir = TempDir::new().unwrap();
        let key_path = temp_dir.path().join("key");
        // A directory at the key path fails to read with something other than NotFound
        fs::create_dir(&key_path).unwrap();

        let err = resolve_api_key(None, &key_path).unwrap_err();

        assert!(matches!(err, ConfigError::MissingApiKey { .. }));
        assert!(err.to_string().contains(&key_path.display().to_string()));
    }
}
