use std::path::{Path, PathBuf};

use cwscript_mod::ModLayout;
use serde::{Deserialize, Serialize};

use crate::error::CliError;

/// CLI configuration loaded from `cwscript.toml`.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct CliConfig {
    #[serde(default, rename = "mod")]
    pub mod_settings: ModSettings,
}

/// Where mods live and how new content is named.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModSettings {
    /// Game mods directory; defaults to the game's location under `$HOME`.
    #[serde(default)]
    pub mods_dir: Option<PathBuf>,
    /// Prefix for generated file names, e.g. `<prefix>_civics.txt`.
    #[serde(default = "default_author_prefix")]
    pub author_prefix: String,
    #[serde(default = "default_supported_version")]
    pub supported_version: String,
}

impl Default for ModSettings {
    fn default() -> Self {
        Self {
            mods_dir: None,
            author_prefix: default_author_prefix(),
            supported_version: default_supported_version(),
        }
    }
}

fn default_author_prefix() -> String {
    "cwscript".to_string()
}

fn default_supported_version() -> String {
    "3.*".to_string()
}

/// Discovery order for config file:
/// 1. `--config <path>` (explicit, also fed by `CWSCRIPT_CONFIG`)
/// 2. `./cwscript.toml` (project-local)
/// 3. `$XDG_CONFIG_HOME/cwscript/config.toml`
/// 4. `~/.config/cwscript/config.toml`
pub fn load_config(explicit_path: Option<&Path>) -> Result<CliConfig, CliError> {
    if let Some(path) = explicit_path {
        return load_config_from_path(path);
    }

    let local = PathBuf::from("cwscript.toml");
    if local.exists() {
        return load_config_from_path(&local);
    }

    if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME") {
        let path = PathBuf::from(xdg).join("cwscript/config.toml");
        if path.exists() {
            return load_config_from_path(&path);
        }
    }

    if let Some(home) = std::env::var_os("HOME") {
        let path = PathBuf::from(home).join(".config/cwscript/config.toml");
        if path.exists() {
            return load_config_from_path(&path);
        }
    }

    Ok(CliConfig::default())
}

fn load_config_from_path(path: &Path) -> Result<CliConfig, CliError> {
    let contents = std::fs::read_to_string(path).map_err(|e| CliError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;

    toml::from_str(&contents).map_err(|e| CliError::Config {
        message: format!("failed to parse {}: {}", path.display(), e),
    })
}

/// Mods directory from, in order: the command line, the config file, or the
/// game's default below `$HOME`.
pub fn resolve_mods_dir(
    override_dir: Option<&Path>,
    config: &CliConfig,
) -> Result<PathBuf, CliError> {
    if let Some(dir) = override_dir.or(config.mod_settings.mods_dir.as_deref()) {
        return Ok(dir.to_path_buf());
    }
    std::env::var_os("HOME")
        .map(|home| ModLayout::default_mods_dir(Path::new(&home)))
        .ok_or_else(|| CliError::Config {
            message: "no mods directory configured and HOME is not set; \
                      pass --mods-dir or set [mod] mods_dir"
                .to_string(),
        })
}
