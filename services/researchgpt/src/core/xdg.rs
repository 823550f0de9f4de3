//! XDG Base Directory Support
//!
//! Resolves where ResearchGPT keeps its config file, knowledge base
//! and exported reports, following the XDG Base Directory layout.

use std::env;
use std::fs;
use std::path::PathBuf;

const APP_DIR: &str = "researchgpt";

/// XDG directory structure for ResearchGPT
#[derive(Debug, Clone)]
pub struct XdgDirs {
    pub config_dir: PathBuf,
    pub data_dir: PathBuf,
}

impl XdgDirs {
    /// Create new XDG directory structure with proper resolution order
    ///
    /// Priority order (highest to lowest):
    /// 1. Explicit RESEARCHGPT_* env vars
    /// 2. XDG_* environment variables
    /// 3. XDG defaults (~/.config, ~/.local/share)
    pub fn new() -> Self {
        Self {
            config_dir: resolve("RESEARCHGPT_CONFIG_DIR", "XDG_CONFIG_HOME", &[".config"]),
            data_dir: resolve("RESEARCHGPT_DATA_DIR", "XDG_DATA_HOME", &[".local", "share"]),
        }
    }

    /// Get config file path
    pub fn config_file(&self) -> PathBuf {
        if let Ok(file) = env::var("RESEARCHGPT_CONFIG_FILE") {
            return PathBuf::from(file);
        }

        self.config_dir.join("config.toml")
    }

    /// Directory holding the persistent knowledge base index
    pub fn knowledge_dir(&self) -> PathBuf {
        self.data_dir.join("knowledge")
    }

    /// Default directory for exported reports
    pub fn reports_dir(&self) -> PathBuf {
        self.data_dir.join("reports")
    }

    /// Create the config and data directories if they don't exist
    pub fn ensure_dirs_exist(&self) -> std::io::Result<()> {
        fs::create_dir_all(&self.config_dir)?;
        fs::create_dir_all(&self.data_dir)?;
        Ok(())
    }

    /// Log the resolved XDG paths
    pub fn log_paths(&self) {
        tracing::debug!("XDG directories resolved:");
        tracing::debug!("  Config: {:?}", self.config_dir);
        tracing::debug!("  Data: {:?}", self.data_dir);
        tracing::debug!("  Config file: {:?}", self.config_file());
        tracing::debug!("  Knowledge base: {:?}", self.knowledge_dir());
    }
}

impl Default for XdgDirs {
    fn default() -> Self {
        Self::new()
    }
}

fn resolve(app_var: &str, xdg_var: &str, home_default: &[&str]) -> PathBuf {
    if let Ok(dir) = env::var(app_var) {
        return PathBuf::from(dir);
    }

    if let Ok(xdg) = env::var(xdg_var) {
        return PathBuf::from(xdg).join(APP_DIR);
    }

    let mut path = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
    for segment in home_default {
        path.push(segment);
    }
    path.join(APP_DIR)
}

/// Copy a legacy `./researchgpt.toml` into the XDG config location.
///
/// Never deletes the original and never overwrites an existing file.
pub fn migrate_legacy_paths(xdg: &XdgDirs) -> std::io::Result<()> {
    let legacy_config = PathBuf::from("./researchgpt.toml");
    let new_config = xdg.config_file();

    if legacy_config.exists() && !new_config.exists() {
        fs::create_dir_all(&xdg.config_dir)?;
        fs::copy(&legacy_config, &new_config)?;
        tracing::info!("Migrated config: {:?} → {:?}", legacy_config, new_config);
    }

    Ok(())
}
