//! Integration tests for layered configuration loading.
//!
//! Uses `figment::Jail` for sandboxed working directory and env var manipulation.

use std::path::PathBuf;

use figment::Jail;
use rota_config::{ConfigError, RotaConfig};

#[test]
fn project_toml_overrides_defaults() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "rota.toml",
            r#"
[model]
repo_id = "acme/roster-model-GGUF"
filename = "roster-q4.gguf"
dir = "cache/models"

[server]
port = 8081
uploads_dir = "incoming"
open_browser = false
"#,
        )?;

        let config = RotaConfig::load().expect("config loads");
        assert_eq!(config.model.repo_id, "acme/roster-model-GGUF");
        assert_eq!(config.model.filename, "roster-q4.gguf");
        assert_eq!(config.model.dir, PathBuf::from("cache/models"));
        assert_eq!(config.model.revision, "main");
        assert_eq!(config.server.port, 8081);
        assert_eq!(config.server.uploads_dir, PathBuf::from("incoming"));
        assert!(!config.server.open_browser);
        assert_eq!(config.server.host, "127.0.0.1");
        Ok(())
    });
}

#[test]
fn env_beats_project_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "rota.toml",
            r#"
[server]
port = 8081
"#,
        )?;
        jail.set_env("ROTA_SERVER__PORT", "9090");
        jail.set_env("ROTA_MODEL__TOKEN", "hf_secret");

        let config = RotaConfig::load().expect("config loads");
        assert_eq!(config.server.port, 9090);
        assert_eq!(config.model.token(), Some("hf_secret"));
        Ok(())
    });
}

#[test]
fn unrelated_rota_env_vars_are_ignored() {
    Jail::expect_with(|jail| {
        jail.set_env("ROTA_LOG", "debug");

        let config = RotaConfig::load().expect("config loads");
        assert_eq!(config.server.port, 5000);
        Ok(())
    });
}

#[test]
fn invalid_values_are_rejected_after_merge() {
    Jail::expect_with(|jail| {
        jail.set_env("ROTA_MODEL__REPO_ID", "no-owner");

        let err = RotaConfig::load().unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { ref field, .. } if field == "model.repo_id"));
        Ok(())
    });
}

#[test]
fn malformed_types_surface_figment_error() {
    Jail::expect_with(|jail| {
        jail.set_env("ROTA_SERVER__PORT", "not-a-port");

        let err = RotaConfig::load().unwrap_err();
        assert!(matches!(err, ConfigError::Figment(_)));
        Ok(())
    });
}
