use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::db::ConnectionInfo;
use crate::error::Result;

pub const APP_DIR: &str = "spatial_browser";

const MAX_SAVED_CONNECTIONS: usize = 10;

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
#[serde(default)]
pub struct AppConfig {
    pub connections: Vec<ConnectionInfo>,
    pub last_connection: Option<String>,
}

impl AppConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|mut path| {
            path.push(APP_DIR);
            path.push("config.json");
            path
        })
    }

    pub fn load() -> Self {
        match Self::config_path() {
            Some(path) => Self::load_from(&path),
            None => Self::new(),
        }
    }

    /// Reads a config file; a missing or unreadable file yields defaults.
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            return Self::new();
        }
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(err) => {
                tracing::warn!(path = %path.display(), "Config read error: {err}");
                return Self::new();
            }
        };
        match serde_json::from_str(&content) {
            Ok(config) => config,
            Err(err) => {
                tracing::warn!(path = %path.display(), "Config parse error: {err}");
                Self::new()
            }
        }
    }

    pub fn save(&self) -> Result<()> {
        match Self::config_path() {
            Some(path) => self.save_to(&path),
            None => Ok(()),
        }
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if let Err(err) = fs::create_dir_all(parent) {
                tracing::warn!("Config persistence error: {err}");
                return Err(err.into());
            }
        }
        let content = serde_json::to_string_pretty(self)?;
        if let Err(err) = fs::write(path, content) {
            tracing::warn!("Config persistence error: {err}");
            return Err(err.into());
        }
        Ok(())
    }

    /// Saves or replaces a connection, most recent first.
    pub fn add_connection(&mut self, info: ConnectionInfo) {
        self.connections.retain(|c| c.name != info.name);
        self.last_connection = Some(info.name.clone());
        self.connections.insert(0, info);
        self.connections.truncate(MAX_SAVED_CONNECTIONS);
    }

    pub fn get_connection_by_name(&self, name: &str) -> Option<&ConnectionInfo> {
        self.connections.iter().find(|c| c.name == name)
    }

    pub fn remove_connection(&mut self, name: &str) {
        self.connections.retain(|c| c.name != name);
        if self.last_connection.as_deref() == Some(name) {
            self.last_connection = None;
        }
    }

    pub fn get_all_connections(&self) -> &[ConnectionInfo] {
        &self.connections
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::ConnectionOptions;

    fn info(name: &str) -> ConnectionInfo {
        ConnectionInfo::new(name, "scott", "tiger", "localhost", 1521, "ORCL")
    }

    #[test]
    fn test_add_connection_moves_to_front_and_caps() {
        let mut config = AppConfig::new();
        for i in 0..12 {
            config.add_connection(info(&format!("conn{i}")));
        }
        config.add_connection(info("conn5"));
        assert_eq!(config.connections.len(), MAX_SAVED_CONNECTIONS);
        assert_eq!(config.connections[0].name, "conn5");
        assert_eq!(
            config.connections.iter().filter(|c| c.name == "conn5").count(),
            1
        );
        assert_eq!(config.last_connection.as_deref(), Some("conn5"));
    }

    #[test]
    fn test_remove_connection_clears_last() {
        let mut config = AppConfig::new();
        config.add_connection(info("gis"));
        config.remove_connection("gis");
        assert!(config.get_connection_by_name("gis").is_none());
        assert_eq!(config.last_connection, None);
    }

    #[test]
    fn test_save_and_load_round_trip_keeps_options() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(APP_DIR).join("config.json");

        let mut config = AppConfig::new();
        let mut gis = info("gis");
        gis.options = ConnectionOptions {
            estimated_metadata: true,
            allow_geometryless_tables: true,
            ..ConnectionOptions::default()
        };
        config.add_connection(gis);
        config.save_to(&path).unwrap();

        let loaded = AppConfig::load_from(&path);
        let gis = loaded.get_connection_by_name("gis").unwrap();
        assert!(gis.options.estimated_metadata);
        assert!(gis.options.allow_geometryless_tables);
        assert!(gis.password.is_empty());
    }

    #[test]
    fn test_load_from_garbage_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "{ not json").unwrap();
        let config = AppConfig::load_from(&path);
        assert!(config.connections.is_empty());
    }
}
