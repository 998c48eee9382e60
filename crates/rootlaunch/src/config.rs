use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

use crate::error::{ConfigError, ConfigResult};

pub const LAUNCHER_CONFIG_FILENAME: &str = "launcher.json";
pub const LAUNCHER_CONFIG_VERSION: &str = "1.0.0";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LauncherConfig {
    pub version: String,
    pub shell: ShellConfig,
    pub strategies: StrategyConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShellConfig {
    pub su_binary: String,
    pub timeout_ms: u64,
    pub pool_size: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StrategyConfig {
    /// Backends in the order they are probed.
    pub order: Vec<BackendKind>,
    /// Privilege source the iterative fallback calls through.
    pub iterative_source: IterativeSource,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackendKind {
    Root,
    Shizuku,
    Dhizuku,
    Direct,
    Iterative,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IterativeSource {
    Shizuku,
    Dhizuku,
    Direct,
}

impl Default for LauncherConfig {
    fn default() -> Self {
        Self::default_new()
    }
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            su_binary: "su".to_string(),
            timeout_ms: 10_000,
            pool_size: 1,
        }
    }
}

impl Default for StrategyConfig {
    fn default() -> Self {
        Self {
            order: vec![
                BackendKind::Root,
                BackendKind::Shizuku,
                BackendKind::Dhizuku,
                BackendKind::Direct,
                BackendKind::Iterative,
            ],
            iterative_source: IterativeSource::Shizuku,
        }
    }
}

impl LauncherConfig {
    pub fn default_new() -> Self {
        Self {
            version: LAUNCHER_CONFIG_VERSION.to_string(),
            shell: ShellConfig::default(),
            strategies: StrategyConfig::default(),
        }
    }

    pub fn from_json_str(data: &str) -> ConfigResult<Self> {
        let config: LauncherConfig = serde_json::from_str(data)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads the config at `path`, falling back to defaults when it does not exist.
    pub fn load(path: &Path) -> ConfigResult<Self> {
        if !path.exists() {
            return Ok(Self::default_new());
        }
        let data = std::fs::read_to_string(path)?;
        Self::from_json_str(&data)
    }

    pub fn save(&self, path: &Path) -> ConfigResult<()> {
        self.validate()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_string_pretty(self)?;
        std::fs::write(path, data)?;
        Ok(())
    }

    pub fn validate(&self) -> ConfigResult<()> {
        if self.shell.su_binary.trim().is_empty() {
            return Err(ConfigError::Invalid("shell.su_binary is empty".to_string()));
        }
        if self.shell.timeout_ms == 0 {
            return Err(ConfigError::Invalid(
                "shell.timeout_ms must be positive".to_string(),
            ));
        }
        if self.shell.pool_size == 0 {
            return Err(ConfigError::Invalid(
                "shell.pool_size must be at least 1".to_string(),
            ));
        }
        let mut seen = HashSet::new();
        for backend in &self.strategies.order {
            if !seen.insert(backend) {
                return Err(ConfigError::Invalid(format!(
                    "backend listed twice: {backend:?}"
                )));
            }
        }
        Ok(())
    }
}

pub fn launcher_config_path(dir: &Path) -> std::path::PathBuf {
    dir.join(LAUNCHER_CONFIG_FILENAME)
}
