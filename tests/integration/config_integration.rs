//! Integration tests for configuration loading through the CLI run context

use super::test_utils::with_isolated_env;
use evidence_dag::cli::{Cli, RunContext};
use evidence_dag::config::ConfigLoader;
use evidence_dag::error::ApiError;
use evidence_dag::tree::ScalarEncoding;
use clap::Parser;
use std::fs;
use std::path::PathBuf;

#[test]
fn test_workspace_config_sets_store_location() {
    with_isolated_env(|temp| {
        let workspace = temp.path().join("ws");
        fs::create_dir_all(workspace.join("config")).unwrap();
        fs::write(
            workspace.join("config").join("config.toml"),
            "[store]\npath = \"artifacts\"\nextension = \"blob\"\n",
        )
        .unwrap();
        fs::write(workspace.join("evidence.json"), r#"{"a": 1}"#).unwrap();

        let ctx = RunContext::new(workspace.clone(), None).unwrap();
        assert_eq!(ctx.store_path(), workspace.join("artifacts"));

        let cli = Cli::try_parse_from(["evidag", "build", "evidence.json"]).unwrap();
        let output = ctx.execute(&cli.command).unwrap();
        let root = output.lines().last().unwrap().strip_prefix("root ").unwrap();
        assert!(workspace
            .join("artifacts")
            .join(format!("{}.blob", root))
            .is_file());
    });
}

#[test]
fn test_explicit_config_file_replaces_workspace_files() {
    with_isolated_env(|temp| {
        let workspace = temp.path().join("ws");
        fs::create_dir_all(workspace.join("config")).unwrap();
        fs::write(
            workspace.join("config").join("config.toml"),
            "[fold]\nscalar_encoding = \"native\"\n",
        )
        .unwrap();
        let explicit = temp.path().join("explicit.toml");
        fs::write(&explicit, "[store]\npath = \"elsewhere\"\n").unwrap();

        let ctx = RunContext::new(workspace.clone(), Some(explicit)).unwrap();
        assert_eq!(ctx.config().fold.scalar_encoding, ScalarEncoding::Text);
        assert_eq!(ctx.config().store.path, PathBuf::from("elsewhere"));
    });
}

#[test]
fn test_environment_overrides_workspace_file() {
    with_isolated_env(|temp| {
        let workspace = temp.path().join("ws");
        fs::create_dir_all(workspace.join("config")).unwrap();
        fs::write(
            workspace.join("config").join("config.toml"),
            "[fold]\nindex_width = 4\n",
        )
        .unwrap();
        std::env::set_var("EVIDAG_FOLD__INDEX_WIDTH", "5");

        let config = ConfigLoader::load(&workspace).unwrap();
        assert_eq!(config.fold.index_width, 5);
    });
}

#[test]
fn test_invalid_config_is_rejected() {
    with_isolated_env(|temp| {
        let workspace = temp.path().join("ws");
        fs::create_dir_all(workspace.join("config")).unwrap();
        fs::write(
            workspace.join("config").join("config.toml"),
            "[fold]\nindex_width = 0\n",
        )
        .unwrap();

        assert!(matches!(
            RunContext::new(workspace, None),
            Err(ApiError::ConfigError(_))
        ));
    });
}

#[test]
fn test_unknown_encoding_is_config_error() {
    with_isolated_env(|temp| {
        let workspace = temp.path().join("ws");
        fs::create_dir_all(workspace.join("config")).unwrap();
        fs::write(
            workspace.join("config").join("config.toml"),
            "[fold]\nscalar_encoding = \"binary\"\n",
        )
        .unwrap();

        assert!(matches!(
            RunContext::new(workspace, None),
            Err(ApiError::ConfigError(_))
        ));
    });
}
