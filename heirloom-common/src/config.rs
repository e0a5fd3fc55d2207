//! Configuration loading and root folder resolution
//!
//! The root folder holds everything the service owns: the SQLite database
//! and the media destinations for stored assets.

use crate::{Error, Result};
use serde::Deserialize;
use std::path::PathBuf;

/// Service configuration from the optional TOML file
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TomlConfig {
    /// Root folder for database and stored media
    pub root_folder: Option<String>,
    /// Bind address for the HTTP server (host:port)
    pub bind_addr: Option<String>,
}

/// Root folder resolution priority order:
/// 1. Command-line argument (highest priority)
/// 2. Environment variable
/// 3. TOML config file
/// 4. OS-dependent compiled default (fallback)
pub fn resolve_root_folder(cli_arg: Option<&str>, env_var_name: &str) -> PathBuf {
    // Priority 1: Command-line argument
    if let Some(path) = cli_arg {
        return PathBuf::from(path);
    }

    // Priority 2: Environment variable
    if let Ok(path) = std::env::var(env_var_name) {
        return PathBuf::from(path);
    }

    // Priority 3: TOML config file
    if let Ok(config) = load_toml_config() {
        if let Some(root_folder) = config.root_folder {
            return PathBuf::from(root_folder);
        }
    }

    // Priority 4: OS-dependent compiled default
    default_root_folder()
}

/// Load the TOML config file from the platform config directory
pub fn load_toml_config() -> Result<TomlConfig> {
    let config_path = config_file_path()?;
    let content = std::fs::read_to_string(&config_path)
        .map_err(|e| Error::Config(format!("Read {} failed: {}", config_path.display(), e)))?;
    toml::from_str(&content)
        .map_err(|e| Error::Config(format!("Parse {} failed: {}", config_path.display(), e)))
}

/// Get configuration file path for the platform
fn config_file_path() -> Result<PathBuf> {
    if cfg!(target_os = "linux") {
        // Try ~/.config/heirloom/config.toml first, then /etc/heirloom/config.toml
        if let Some(path) = dirs::config_dir().map(|d| d.join("heirloom").join("config.toml")) {
            if path.exists() {
                return Ok(path);
            }
        }
        let system_config = PathBuf::from("/etc/heirloom/config.toml");
        if system_config.exists() {
            return Ok(system_config);
        }
        Err(Error::Config("No config file found".to_string()))
    } else {
        let path = dirs::config_dir()
            .map(|d| d.join("heirloom").join("config.toml"))
            .ok_or_else(|| Error::Config("Could not determine config directory".to_string()))?;
        if path.exists() {
            Ok(path)
        } else {
            Err(Error::Config(format!("Config file not found: {:?}", path)))
        }
    }
}

/// Get OS-dependent default root folder path
pub fn default_root_folder() -> PathBuf {
    if cfg!(target_os = "linux") {
        // ~/.local/share/heirloom (or /var/lib/heirloom for system-wide)
        dirs::data_local_dir()
            .map(|d| d.join("heirloom"))
            .unwrap_or_else(|| PathBuf::from("/var/lib/heirloom"))
    } else if cfg!(target_os = "macos") {
        // ~/Library/Application Support/heirloom
        dirs::data_dir()
            .map(|d| d.join("heirloom"))
            .unwrap_or_else(|| PathBuf::from("/Library/Application Support/heirloom"))
    } else if cfg!(target_os = "windows") {
        // %LOCALAPPDATA%\heirloom
        dirs::data_local_dir()
            .map(|d| d.join("heirloom"))
            .unwrap_or_else(|| PathBuf::from("C:\\ProgramData\\heirloom"))
    } else {
        PathBuf::from("./heirloom_data")
    }
}

/// Database path within the root folder
pub fn database_path(root_folder: &std::path::Path) -> PathBuf {
    root_folder.join("heirloom.db")
}

/// Media storage path within the root folder
pub fn media_root(root_folder: &std::path::Path) -> PathBuf {
    root_folder.join("media")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_arg_wins_over_environment() {
        std::env::set_var("HEIRLOOM_TEST_ROOT_A", "/from/env");
        let resolved = resolve_root_folder(Some("/from/cli"), "HEIRLOOM_TEST_ROOT_A");
        assert_eq!(resolved, PathBuf::from("/from/cli"));
        std::env::remove_var("HEIRLOOM_TEST_ROOT_A");
    }

    #[test]
    fn environment_wins_over_default() {
        std::env::set_var("HEIRLOOM_TEST_ROOT_B", "/from/env");
        let resolved = resolve_root_folder(None, "HEIRLOOM_TEST_ROOT_B");
        assert_eq!(resolved, PathBuf::from("/from/env"));
        std::env::remove_var("HEIRLOOM_TEST_ROOT_B");
    }

    #[test]
    fn derived_paths_live_under_root() {
        let root = PathBuf::from("/data/heirloom");
        assert_eq!(database_path(&root), PathBuf::from("/data/heirloom/heirloom.db"));
        assert_eq!(media_root(&root), PathBuf::from("/data/heirloom/media"));
    }
}
