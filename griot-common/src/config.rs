//! Configuration loading and root folder resolution

use crate::{Error, Result};
use std::path::{Path, PathBuf};

/// Name of the SQLite database file inside the root folder
pub const DATABASE_FILE_NAME: &str = "griot.db";

/// Root folder resolution priority order:
/// 1. Command-line argument (highest priority)
/// 2. Environment variable
/// 3. TOML config file
/// 4. OS-dependent compiled default (fallback)
pub fn resolve_root_folder(
    cli_arg: Option<&str>,
    env_var_name: &str,
    config_file_key: Option<&str>,
) -> Result<PathBuf> {
    // Priority 1: Command-line argument
    if let Some(path) = cli_arg {
        return Ok(PathBuf::from(path));
    }

    // Priority 2: Environment variable
    if let Ok(path) = std::env::var(env_var_name) {
        return Ok(PathBuf::from(path));
    }

    // Priority 3: TOML config file
    if let Some(key) = config_file_key {
        if let Ok(config_path) = load_config_file() {
            if let Ok(toml_content) = std::fs::read_to_string(&config_path) {
                if let Ok(config) = toml::from_str::<toml::Value>(&toml_content) {
                    if let Some(root_folder) = config.get(key).and_then(|v| v.as_str()) {
                        return Ok(PathBuf::from(root_folder));
                    }
                }
            }
        }
    }

    // Priority 4: OS-dependent compiled default
    Ok(get_default_root_folder())
}

/// Path of the archive database inside the resolved root folder
pub fn database_path(root_folder: &Path) -> PathBuf {
    root_folder.join(DATABASE_FILE_NAME)
}

/// Get default configuration file path for the platform
fn load_config_file() -> Result<PathBuf> {
    let config_dir = if cfg!(target_os = "linux") {
        // Try ~/.config/griot/config.toml first, then /etc/griot/config.toml
        let user_config = dirs::config_dir().map(|d| d.join("griot").join("config.toml"));
        let system_config = PathBuf::from("/etc/griot/config.toml");

        if let Some(path) = user_config {
            if path.exists() {
                return Ok(path);
            }
        }
        if system_config.exists() {
            return Ok(system_config);
        }
        return Err(Error::Config("No config file found".to_string()));
    } else if cfg!(target_os = "macos") || cfg!(target_os = "windows") {
        dirs::config_dir()
            .map(|d| d.join("griot").join("config.toml"))
            .ok_or_else(|| Error::Config("Could not determine config directory".to_string()))?
    } else {
        return Err(Error::Config("Unsupported platform".to_string()));
    };

    if config_dir.exists() {
        Ok(config_dir)
    } else {
        Err(Error::Config(format!(
            "Config file not found: {:?}",
            config_dir
        )))
    }
}

/// Get OS-dependent default root folder path
fn get_default_root_folder() -> PathBuf {
    if cfg!(target_os = "linux") {
        // ~/.local/share/griot (or /var/lib/griot for system-wide)
        dirs::data_local_dir()
            .map(|d| d.join("griot"))
            .unwrap_or_else(|| PathBuf::from("/var/lib/griot"))
    } else if cfg!(target_os = "macos") {
        // ~/Library/Application Support/griot
        dirs::data_dir()
            .map(|d| d.join("griot"))
            .unwrap_or_else(|| PathBuf::from("/Library/Application Support/griot"))
    } else if cfg!(target_os = "windows") {
        // %LOCALAPPDATA%\griot
        dirs::data_local_dir()
            .map(|d| d.join("griot"))
            .unwrap_or_else(|| PathBuf::from("C:\\ProgramData\\griot"))
    } else {
        PathBuf::from("./griot_data")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_arg_wins() {
        let resolved =
            resolve_root_folder(Some("/tmp/explicit"), "GRIOT_TEST_UNSET_VAR", None).unwrap();
        assert_eq!(resolved, PathBuf::from("/tmp/explicit"));
    }

    #[test]
    fn test_fallback_to_default() {
        let resolved = resolve_root_folder(None, "GRIOT_TEST_UNSET_VAR", None).unwrap();
        // Default is platform dependent but always ends in "griot"
        assert!(resolved.to_string_lossy().contains("griot"));
    }

    #[test]
    fn test_database_path() {
        let path = database_path(Path::new("/data/archive"));
        assert_eq!(path, PathBuf::from("/data/archive/griot.db"));
    }
}
