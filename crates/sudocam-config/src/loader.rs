// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Configuration file loading with override support
//!
//! This module implements the 3-tier configuration loading system:
//! 1. TOML file (base defaults)
//! 2. Environment variables (runtime overrides)
//! 3. CLI arguments (explicit user overrides)
//!
//! The merged result is validated before it is returned.

use crate::{validate_config, ConfigError, ConfigResult, SudocamConfig};
use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Name of the configuration file searched for on disk
pub const CONFIG_FILE_NAME: &str = "sudocam_configuration.toml";

/// Find the sudocam configuration file
///
/// Search order:
/// 1. `SUDOCAM_CONFIG_PATH` environment variable
/// 2. Current working directory: `./sudocam_configuration.toml`
/// 3. Up to 5 parent directories
///
/// # Errors
///
/// Returns `ConfigError::FileNotFound` if no config file is found in any location
pub fn find_config_file() -> ConfigResult<PathBuf> {
    if let Ok(env_path) = env::var("SUDOCAM_CONFIG_PATH") {
        let path = PathBuf::from(env_path);
        if path.exists() {
            return Ok(path);
        } else {
            return Err(ConfigError::FileNotFound(format!(
                "Config file specified by SUDOCAM_CONFIG_PATH not found: {}",
                path.display()
            )));
        }
    }

    let mut search_paths = Vec::new();

    if let Ok(cwd) = env::current_dir() {
        search_paths.push(cwd.join(CONFIG_FILE_NAME));

        let mut current = cwd.clone();
        for _ in 0..5 {
            if let Some(parent) = current.parent() {
                search_paths.push(parent.join(CONFIG_FILE_NAME));
                current = parent.to_path_buf();
            }
        }
    }

    for path in &search_paths {
        if path.exists() {
            return Ok(path.clone());
        }
    }

    let search_list = search_paths
        .iter()
        .map(|p| format!("  - {}", p.display()))
        .collect::<Vec<_>>()
        .join("\n");

    Err(ConfigError::FileNotFound(format!(
        "sudocam configuration file '{}' not found in any of these locations:\n{}\n\nSet SUDOCAM_CONFIG_PATH environment variable to specify custom location.",
        CONFIG_FILE_NAME, search_list
    )))
}

/// Load configuration from TOML file
///
/// # Arguments
///
/// * `config_path` - Optional path to config file. If `None`, will search for config file.
/// * `cli_args` - Optional CLI argument overrides
///
/// # Errors
///
/// Returns error if config file is not found, contains invalid TOML, or fails validation
pub fn load_config(
    config_path: Option<&Path>,
    cli_args: Option<&HashMap<String, String>>,
) -> ConfigResult<SudocamConfig> {
    let config_file = if let Some(path) = config_path {
        path.to_path_buf()
    } else {
        find_config_file()?
    };

    let content = fs::read_to_string(&config_file)?;
    let config: SudocamConfig = toml::from_str(&content)?;
    finish_loading(config, cli_args)
}

/// Like [`load_config`], but falls back to the built-in defaults when no file can be found.
///
/// An explicitly given path that does not exist is still an error.
pub fn load_config_or_default(
    config_path: Option<&Path>,
    cli_args: Option<&HashMap<String, String>>,
) -> ConfigResult<SudocamConfig> {
    match config_path {
        Some(path) => load_config(Some(path), cli_args),
        None => match find_config_file() {
            Ok(found) => load_config(Some(&found), cli_args),
            Err(ConfigError::FileNotFound(_)) => finish_loading(SudocamConfig::default(), cli_args),
            Err(other) => Err(other),
        },
    }
}

fn finish_loading(
    mut config: SudocamConfig,
    cli_args: Option<&HashMap<String, String>>,
) -> ConfigResult<SudocamConfig> {
    apply_environment_overrides(&mut config)?;

    if let Some(cli) = cli_args {
        apply_cli_overrides(&mut config, cli)?;
    }

    validate_config(&config)?;
    Ok(config)
}

fn parse_override<T: std::str::FromStr>(key: &str, value: &str) -> ConfigResult<T> {
    value.trim().parse::<T>().map_err(|_| {
        ConfigError::InvalidValue(format!("{} = '{}' could not be parsed", key, value))
    })
}

/// Apply environment variable overrides to configuration
///
/// Supported environment variables:
/// - `SUDOCAM_CROP_LEFT` -> `board.crop_left`
/// - `SUDOCAM_CROP_RIGHT` -> `board.crop_right`
/// - `SUDOCAM_CROP_TOP` -> `board.crop_top`
/// - `SUDOCAM_CROP_BOTTOM` -> `board.crop_bottom`
/// - `SUDOCAM_GRID_SIZE` -> `board.grid_size`
/// - `SUDOCAM_LOW_CONTRAST_THRESHOLD` -> `preprocessing.low_contrast_threshold`
/// - `SUDOCAM_LOG_LEVEL` -> `logging.level`
pub fn apply_environment_overrides(config: &mut SudocamConfig) -> ConfigResult<()> {
    if let Ok(value) = env::var("SUDOCAM_CROP_LEFT") {
        config.board.crop_left = parse_override("SUDOCAM_CROP_LEFT", &value)?;
    }
    if let Ok(value) = env::var("SUDOCAM_CROP_RIGHT") {
        config.board.crop_right = parse_override("SUDOCAM_CROP_RIGHT", &value)?;
    }
    if let Ok(value) = env::var("SUDOCAM_CROP_TOP") {
        config.board.crop_top = parse_override("SUDOCAM_CROP_TOP", &value)?;
    }
    if let Ok(value) = env::var("SUDOCAM_CROP_BOTTOM") {
        config.board.crop_bottom = parse_override("SUDOCAM_CROP_BOTTOM", &value)?;
    }
    if let Ok(value) = env::var("SUDOCAM_GRID_SIZE") {
        config.board.grid_size = parse_override("SUDOCAM_GRID_SIZE", &value)?;
    }
    if let Ok(value) = env::var("SUDOCAM_LOW_CONTRAST_THRESHOLD") {
        config.preprocessing.low_contrast_threshold =
            parse_override("SUDOCAM_LOW_CONTRAST_THRESHOLD", &value)?;
    }
    if let Ok(value) = env::var("SUDOCAM_LOG_LEVEL") {
        config.logging.level = value;
    }
    Ok(())
}

/// Apply CLI argument overrides to configuration
///
/// # Arguments
///
/// * `config` - Configuration to modify
/// * `cli_args` - HashMap of CLI arguments (e.g., `{"grid_size": "4", "log_level": "debug"}`)
pub fn apply_cli_overrides(
    config: &mut SudocamConfig,
    cli_args: &HashMap<String, String>,
) -> ConfigResult<()> {
    if let Some(value) = cli_args.get("crop_left") {
        config.board.crop_left = parse_override("crop_left", value)?;
    }
    if let Some(value) = cli_args.get("crop_right") {
        config.board.crop_right = parse_override("crop_right", value)?;
    }
    if let Some(value) = cli_args.get("crop_top") {
        config.board.crop_top = parse_override("crop_top", value)?;
    }
    if let Some(value) = cli_args.get("crop_bottom") {
        config.board.crop_bottom = parse_override("crop_bottom", value)?;
    }
    if let Some(value) = cli_args.get("grid_size") {
        config.board.grid_size = parse_override("grid_size", value)?;
    }
    if let Some(value) = cli_args.get("low_contrast_threshold") {
        config.preprocessing.low_contrast_threshold = parse_override("low_contrast_threshold", value)?;
    }
    if let Some(value) = cli_args.get("log_level") {
        config.logging.level = value.clone();
    }
    if let Some(value) = cli_args.get("log_format") {
        config.logging.format = value.clone();
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;
    use std::sync::Mutex;
    use tempfile::tempdir;

    static ENV_LOCK: Mutex<()> = Mutex::new(());

    const OVERRIDE_VARIABLES: [&str; 7] = [
        "SUDOCAM_CROP_LEFT",
        "SUDOCAM_CROP_RIGHT",
        "SUDOCAM_CROP_TOP",
        "SUDOCAM_CROP_BOTTOM",
        "SUDOCAM_GRID_SIZE",
        "SUDOCAM_LOW_CONTRAST_THRESHOLD",
        "SUDOCAM_LOG_LEVEL",
    ];

    fn clear_override_variables() {
        for variable in OVERRIDE_VARIABLES {
            env::remove_var(variable);
        }
    }

    #[test]
    fn test_find_config_file_env_var() {
        let _env_lock = ENV_LOCK.lock().unwrap();
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("custom_config.toml");
        File::create(&config_path).unwrap();

        env::set_var("SUDOCAM_CONFIG_PATH", config_path.to_str().unwrap());
        let result = find_config_file();
        env::remove_var("SUDOCAM_CONFIG_PATH");

        assert!(result.is_ok());
        assert_eq!(result.unwrap(), config_path);
    }

    #[test]
    fn test_find_config_file_env_var_missing_file() {
        let _env_lock = ENV_LOCK.lock().unwrap();
        env::set_var("SUDOCAM_CONFIG_PATH", "/definitely/not/here/sudocam.toml");
        let result = find_config_file();
        env::remove_var("SUDOCAM_CONFIG_PATH");

        assert!(matches!(result, Err(ConfigError::FileNotFound(_))));
    }

    #[test]
    fn test_load_minimal_config() {
        let _env_lock = ENV_LOCK.lock().unwrap();
        clear_override_variables();
        let dir = tempdir().unwrap();
        let config_path = dir.path().join(CONFIG_FILE_NAME);

        let mut file = File::create(&config_path).unwrap();
        writeln!(file, "[board]").unwrap();
        writeln!(file, "crop_left = 0").unwrap();
        writeln!(file, "crop_right = 160").unwrap();
        writeln!(file, "crop_top = 0").unwrap();
        writeln!(file, "crop_bottom = 160").unwrap();
        writeln!(file, "[preprocessing]").unwrap();
        writeln!(file, "low_contrast_threshold = 40").unwrap();

        let config = load_config(Some(&config_path), None).unwrap();

        assert_eq!(config.board.crop_right, 160);
        assert_eq!(config.board.grid_size, 4);
        assert_eq!(config.preprocessing.low_contrast_threshold, 40);
        assert!(config.diagnostics.dump_final_grid);
    }

    #[test]
    fn test_empty_file_matches_reference_constants() {
        let _env_lock = ENV_LOCK.lock().unwrap();
        clear_override_variables();
        let dir = tempdir().unwrap();
        let config_path = dir.path().join(CONFIG_FILE_NAME);
        File::create(&config_path).unwrap();

        let config = load_config(Some(&config_path), None).unwrap();
        assert_eq!(config, SudocamConfig::default());
        assert_eq!(config.board.crop_right - config.board.crop_left, 180);
        assert_eq!(config.preprocessing.low_contrast_threshold, 30);
    }

    #[test]
    fn test_invalid_toml_is_parse_error() {
        let _env_lock = ENV_LOCK.lock().unwrap();
        clear_override_variables();
        let dir = tempdir().unwrap();
        let config_path = dir.path().join(CONFIG_FILE_NAME);
        let mut file = File::create(&config_path).unwrap();
        writeln!(file, "[board").unwrap();

        let result = load_config(Some(&config_path), None);
        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }

    #[test]
    fn test_environment_overrides() {
        let _env_lock = ENV_LOCK.lock().unwrap();
        clear_override_variables();
        let mut config = SudocamConfig::default();

        env::set_var("SUDOCAM_GRID_SIZE", "2");
        env::set_var("SUDOCAM_LOW_CONTRAST_THRESHOLD", "12");
        env::set_var("SUDOCAM_LOG_LEVEL", "debug");

        apply_environment_overrides(&mut config).unwrap();
        clear_override_variables();

        assert_eq!(config.board.grid_size, 2);
        assert_eq!(config.preprocessing.low_contrast_threshold, 12);
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn test_unparseable_environment_override_is_rejected() {
        let _env_lock = ENV_LOCK.lock().unwrap();
        clear_override_variables();
        let mut config = SudocamConfig::default();

        env::set_var("SUDOCAM_CROP_LEFT", "left");
        let result = apply_environment_overrides(&mut config);
        clear_override_variables();

        assert!(matches!(result, Err(ConfigError::InvalidValue(_))));
    }

    #[test]
    fn test_cli_overrides_win_over_file() {
        let _env_lock = ENV_LOCK.lock().unwrap();
        clear_override_variables();
        let dir = tempdir().unwrap();
        let config_path = dir.path().join(CONFIG_FILE_NAME);
        let mut file = File::create(&config_path).unwrap();
        writeln!(file, "[logging]").unwrap();
        writeln!(file, "level = \"warn\"").unwrap();

        let mut cli_args = HashMap::new();
        cli_args.insert("log_level".to_string(), "trace".to_string());
        cli_args.insert("grid_size".to_string(), "3".to_string());

        let config = load_config(Some(&config_path), Some(&cli_args)).unwrap();
        assert_eq!(config.logging.level, "trace");
        assert_eq!(config.board.grid_size, 3);
    }

    #[test]
    fn test_invalid_merged_config_fails_validation() {
        let _env_lock = ENV_LOCK.lock().unwrap();
        clear_override_variables();
        let dir = tempdir().unwrap();
        let config_path = dir.path().join(CONFIG_FILE_NAME);
        let mut file = File::create(&config_path).unwrap();
        writeln!(file, "[board]").unwrap();
        writeln!(file, "grid_size = 7").unwrap();

        let result = load_config(Some(&config_path), None);
        assert!(matches!(result, Err(ConfigError::ValidationError(_))));
    }
}
