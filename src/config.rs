use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::Deserialize;

pub const DEFAULT_SERVER: &str = "http://localhost:8080/docs/api/";
pub const DEFAULT_OPERATOR: &str = "admin";

/// Values read from `config.json`. Every field is optional; command-line
/// flags take precedence.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub server: Option<String>,
    pub auth_token: Option<String>,
    pub operator: Option<String>,
}

impl Settings {
    pub fn load() -> anyhow::Result<Self> {
        let path = config_path()?;
        Self::load_from(&path)
    }

    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            tracing::debug!("No config file at {}", path.display());
            return Ok(Self::default());
        }
        let raw = std::fs::read_to_string(path)?;
        let settings: Settings = serde_json::from_str(&raw)
            .map_err(|e| anyhow::anyhow!("Invalid config file {}: {e}", path.display()))?;
        Ok(settings)
    }

    pub fn server(&self, flag: Option<&str>) -> String {
        flag.or(self.server.as_deref())
            .unwrap_or(DEFAULT_SERVER)
            .to_string()
    }

    pub fn auth_token(&self, flag: Option<&str>) -> Option<String> {
        flag.or(self.auth_token.as_deref()).map(String::from)
    }

    pub fn operator(&self, flag: Option<&str>) -> String {
        flag.or(self.operator.as_deref())
            .unwrap_or(DEFAULT_OPERATOR)
            .to_string()
    }
}

pub fn project_dirs() -> anyhow::Result<ProjectDirs> {
    ProjectDirs::from("", "", "regdesk")
        .ok_or_else(|| anyhow::anyhow!("Could not determine home directory"))
}

pub fn config_path() -> anyhow::Result<PathBuf> {
    Ok(project_dirs()?.config_dir().join("config.json"))
}

pub fn db_path() -> anyhow::Result<PathBuf> {
    let dirs = project_dirs()?;
    let data_dir = dirs.data_dir();
    std::fs::create_dir_all(data_dir)?;
    Ok(data_dir.join("regdesk.db"))
}
