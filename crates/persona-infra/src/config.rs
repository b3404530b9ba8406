//! Configuration loader for Persona.
//!
//! Reads `persona.toml` (by default from `~/.persona/`) and deserializes it
//! into [`AppConfig`]. Falls back to defaults when the file is missing or
//! malformed.

use std::path::{Path, PathBuf};

use persona_types::config::AppConfig;

const CONFIG_FILE: &str = "persona.toml";

/// Default location of the config file: `~/.persona/persona.toml`.
///
/// Falls back to the working directory when no home directory is known.
pub fn default_config_path() -> PathBuf {
    dirs::home_dir()
        .map(|home| home.join(".persona"))
        .unwrap_or_else(|| PathBuf::from("."))
        .join(CONFIG_FILE)
}

/// Load configuration from `path`.
///
/// - If the file does not exist, returns [`AppConfig::default()`].
/// - If the file exists but fails to parse, logs a warning and returns the default.
/// - Missing sections and fields keep their defaults.
pub async fn load_config(path: &Path) -> AppConfig {
    let content = match tokio::fs::read_to_string(path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("No config found at {}, using defaults", path.display());
            return AppConfig::default();
        }
        Err(err) => {
            tracing::warn!("Failed to read {}: {err}, using defaults", path.display());
            return AppConfig::default();
        }
    };

    match toml::from_str::<AppConfig>(&content) {
        Ok(config) => {
            tracing::debug!("Loaded config from {}", path.display());
            config
        }
        Err(err) => {
            tracing::warn!("Failed to parse {}: {err}, using defaults", path.display());
            AppConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn missing_file_returns_default() {
        let tmp = TempDir::new().unwrap();
        let config = load_config(&tmp.path().join(CONFIG_FILE)).await;
        assert_eq!(config.profile.collection_name, "MyProfile");
        assert_eq!(config.chat.reveal_delimiter, "/n");
        assert!(config.rag.api_key.is_none());
    }

    #[tokio::test]
    async fn partial_toml_keeps_other_defaults() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join(CONFIG_FILE);
        tokio::fs::write(
            &path,
            r#"
[rag]
endpoint = "https://rag.internal"
api_key = "sk-local"

[chat]
reveal_delay_ms = 0
"#,
        )
        .await
        .unwrap();

        let config = load_config(&path).await;
        assert_eq!(config.rag.endpoint, "https://rag.internal");
        assert_eq!(config.rag.api_key.as_deref(), Some("sk-local"));
        assert_eq!(config.chat.reveal_delay_ms, 0);
        assert_eq!(config.chat.query_timeout_secs, 10_600);
        assert_eq!(config.profile.max_chunks, 99);
    }

    #[tokio::test]
    async fn invalid_toml_returns_default() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join(CONFIG_FILE);
        tokio::fs::write(&path, "this is not { valid toml !!!")
            .await
            .unwrap();

        let config = load_config(&path).await;
        assert_eq!(config.rag.request_timeout_secs, 300);
    }

    #[test]
    fn default_path_ends_with_file_name() {
        let path = default_config_path();
        assert!(path.ends_with(".persona/persona.toml") || path.ends_with("persona.toml"));
    }
}
