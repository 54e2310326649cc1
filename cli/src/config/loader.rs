//! CLI configuration loader for clinic-desk
//!
//! Implements single-source priority loading with overrides:
//! 1. --config file/dir (highest priority)
//! 2. Current working directory: ./clinic-desk.json or ./.clinic-desk/config.json
//! 3. XDG config: $XDG_CONFIG_HOME/clinic-desk/config.json or ~/.config/clinic-desk/config.json
//! 4. Built-in defaults
//!
//! Environment variables (`CLINIC_DESK_BASE_PATH`, `CLINIC_DESK_MAX_HISTORY`)
//! are applied on top of the file, and flag overrides on top of those.

use anyhow::{anyhow, Context, Result};
use clinic_desk_core::DeskConfig;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Name of the per-user and per-project config directory
const APP_DIR: &str = "clinic-desk";

/// CLI configuration loader
#[derive(Debug, Clone, Default)]
pub struct DeskConfigLoader {
    /// Override config file/directory path
    config_override: Option<PathBuf>,
    /// Flag overrides
    base_path_override: Option<String>,
    strict_override: Option<bool>,
    /// Directory searched for project config, defaults to the current one
    working_dir: Option<PathBuf>,
    /// Skip the per-user config directory
    skip_user_config: bool,
}

impl DeskConfigLoader {
    /// Create a new loader
    pub fn new() -> Self {
        Self::default()
    }

    /// Set config file/directory override; `~` is expanded
    pub fn with_config_override(mut self, path: PathBuf) -> Self {
        let expanded = shellexpand::tilde(&path.to_string_lossy()).into_owned();
        self.config_override = Some(PathBuf::from(expanded));
        self
    }

    /// Set base path override
    pub fn with_base_path_override(mut self, base_path: String) -> Self {
        self.base_path_override = Some(base_path);
        self
    }

    /// Set strict trailing-slash override
    pub fn with_strict_override(mut self, strict: bool) -> Self {
        self.strict_override = Some(strict);
        self
    }

    /// Search a specific directory instead of the current one
    pub fn with_working_dir(mut self, dir: PathBuf) -> Self {
        self.working_dir = Some(dir);
        self
    }

    /// Ignore `$XDG_CONFIG_HOME/clinic-desk`
    pub fn without_user_config(mut self) -> Self {
        self.skip_user_config = true;
        self
    }

    /// Load and resolve configuration
    pub async fn load(&self) -> Result<DeskConfig> {
        // Step 1: Find and load base configuration
        let mut config = if let Some(override_path) = &self.config_override {
            self.load_from_path(override_path).await.with_context(|| {
                format!(
                    "Failed to load config from override path: {}",
                    override_path.display()
                )
            })?
        } else {
            self.search_and_load().await?
        };

        // Step 2: Environment overrides
        if let Ok(base_path) = std::env::var("CLINIC_DESK_BASE_PATH") {
            config.base_path = Some(base_path);
        }
        if let Ok(max_history) = std::env::var("CLINIC_DESK_MAX_HISTORY") {
            config.max_history = max_history
                .parse()
                .with_context(|| format!("Invalid CLINIC_DESK_MAX_HISTORY: {}", max_history))?;
        }

        // Step 3: Flag overrides
        if let Some(base_path) = &self.base_path_override {
            config.base_path = Some(base_path.clone());
        }
        if let Some(strict) = self.strict_override {
            config.strict_trailing_slash = strict;
        }

        config
            .validate()
            .map_err(|e| anyhow!("Configuration validation failed: {}", e))?;

        Ok(config)
    }

    /// Search for config in priority order
    async fn search_and_load(&self) -> Result<DeskConfig> {
        // 1. Project directory
        if let Some(config) = self.try_load_project().await? {
            return Ok(config);
        }

        // 2. XDG config directory
        if !self.skip_user_config {
            if let Some(config) = self.try_load_xdg().await? {
                return Ok(config);
            }
        }

        // 3. Defaults
        debug!("No config file found, using defaults");
        Ok(DeskConfig::default())
    }

    /// Try loading from the project directory
    async fn try_load_project(&self) -> Result<Option<DeskConfig>> {
        let dir = match &self.working_dir {
            Some(dir) => dir.clone(),
            None => std::env::current_dir()?,
        };

        // Try ./clinic-desk.json first
        let single_file = dir.join(format!("{}.json", APP_DIR));
        if single_file.exists() {
            return Ok(Some(self.load_file(&single_file).await?));
        }

        // Try ./.clinic-desk/config.json
        let dir_config = dir.join(format!(".{}", APP_DIR)).join("config.json");
        if dir_config.exists() {
            return Ok(Some(self.load_file(&dir_config).await?));
        }

        Ok(None)
    }

    /// Try loading from XDG config directory
    async fn try_load_xdg(&self) -> Result<Option<DeskConfig>> {
        if let Some(config_dir) = Self::xdg_config_dir() {
            let config_path = config_dir.join(APP_DIR).join("config.json");
            if config_path.exists() {
                return Ok(Some(self.load_file(&config_path).await?));
            }
        }
        Ok(None)
    }

    /// Load configuration from a specific path (file or directory)
    async fn load_from_path(&self, path: &Path) -> Result<DeskConfig> {
        if path.is_file() {
            self.load_file(path).await
        } else if path.is_dir() {
            let config_file = path.join("config.json");
            if config_file.exists() {
                self.load_file(&config_file).await
            } else {
                Err(anyhow!(
                    "No config.json found in directory: {}",
                    path.display()
                ))
            }
        } else {
            Err(anyhow!("Config path does not exist: {}", path.display()))
        }
    }

    /// Load a single config file
    async fn load_file(&self, path: &Path) -> Result<DeskConfig> {
        debug!("Loading config from {}", path.display());
        let content = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        DeskConfig::from_json(&content)
            .with_context(|| format!("Invalid config file: {}", path.display()))
    }

    /// Get XDG config directory
    fn xdg_config_dir() -> Option<PathBuf> {
        std::env::var("XDG_CONFIG_HOME")
            .ok()
            .map(PathBuf::from)
            .or_else(dirs::config_dir)
    }
}
