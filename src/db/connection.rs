use oracle::Connection;
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex, MutexGuard};

use crate::db::catalog::CatalogScope;
use crate::error::{Error, Result};

pub const DEFAULT_PORT: u16 = 1521;

/// Listing behaviour stored with each saved connection.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConnectionOptions {
    /// Sample at most a hundred rows when probing geometry types.
    pub estimated_metadata: bool,
    /// Only look at the connected user's own objects (`USER_*` views).
    pub user_tables_only: bool,
    /// List schemas from the spatial metadata view only.
    pub geometry_columns_only: bool,
    /// Also list tables without a registered geometry column.
    pub allow_geometryless_tables: bool,
    pub only_existing_types: bool,
}

impl ConnectionOptions {
    pub fn scope(&self) -> CatalogScope {
        CatalogScope {
            user_tables_only: self.user_tables_only,
            geometry_columns_only: self.geometry_columns_only,
            estimated_metadata: self.estimated_metadata,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ConnectionInfo {
    pub name: String,
    pub username: String,
    #[serde(skip_serializing, default)]
    pub password: String,
    /// Empty when `database` is a TNS alias.
    pub host: String,
    pub port: u16,
    pub database: String,
    #[serde(default)]
    pub save_password: bool,
    #[serde(default)]
    pub options: ConnectionOptions,
}

impl ConnectionInfo {
    pub fn new(
        name: &str,
        username: &str,
        password: &str,
        host: &str,
        port: u16,
        database: &str,
    ) -> Self {
        Self {
            name: name.to_string(),
            username: username.to_string(),
            password: password.to_string(),
            host: host.to_string(),
            port,
            database: database.to_string(),
            save_password: false,
            options: ConnectionOptions::default(),
        }
    }

    /// Easy Connect string: `host[:port][/database]`, the port omitted when
    /// it is the listener default. Without a host the database is used as
    /// a TNS alias.
    pub fn connect_string(&self) -> String {
        if self.host.is_empty() {
            return self.database.clone();
        }
        let mut connect = self.host.clone();
        if self.port != DEFAULT_PORT {
            connect.push_str(&format!(":{}", self.port));
        }
        if !self.database.is_empty() {
            connect.push('/');
            connect.push_str(&self.database);
        }
        connect
    }

    pub fn display_string(&self) -> String {
        format!("{} ({}@{})", self.name, self.username, self.connect_string())
    }

    /// Connected user as Oracle reports it in catalog views.
    pub fn catalog_user(&self) -> String {
        self.username.to_uppercase()
    }

    /// Overwrite the password with zeros then release the allocation.
    pub fn clear_password(&mut self) {
        // SAFETY: zero bytes are valid UTF-8
        let bytes = unsafe { self.password.as_bytes_mut() };
        for b in bytes.iter_mut() {
            unsafe { std::ptr::write_volatile(b, 0) };
        }
        self.password.clear();
        self.password.shrink_to_fit();
    }
}

impl Default for ConnectionInfo {
    fn default() -> Self {
        Self {
            name: String::new(),
            username: String::new(),
            password: String::new(),
            host: "localhost".to_string(),
            port: DEFAULT_PORT,
            database: "ORCL".to_string(),
            save_password: false,
            options: ConnectionOptions::default(),
        }
    }
}

pub struct DatabaseConnection {
    connection: Option<Arc<Connection>>,
    info: ConnectionInfo,
}

impl DatabaseConnection {
    pub fn new() -> Self {
        Self {
            connection: None,
            info: ConnectionInfo::default(),
        }
    }

    pub fn connect(&mut self, info: ConnectionInfo) -> Result<Arc<Connection>> {
        let connect_string = info.connect_string();
        let connection = match Connection::connect(&info.username, &info.password, &connect_string) {
            Ok(connection) => Arc::new(connection),
            Err(err) => {
                tracing::warn!(connection = %info.name, "Connection error: {err}");
                return Err(Error::Connection(err));
            }
        };
        tracing::info!(connection = %info.display_string(), "connected");

        self.connection = Some(Arc::clone(&connection));
        self.info = info;
        self.info.clear_password();

        Ok(connection)
    }

    pub fn disconnect(&mut self) {
        self.connection = None;
    }

    pub fn is_connected(&self) -> bool {
        self.connection.is_some()
    }

    pub fn get_connection(&self) -> Option<Arc<Connection>> {
        self.connection.clone()
    }

    pub fn get_info(&self) -> &ConnectionInfo {
        &self.info
    }
}

impl Default for DatabaseConnection {
    fn default() -> Self {
        Self::new()
    }
}

pub type SharedConnection = Arc<Mutex<DatabaseConnection>>;

pub fn create_shared_connection() -> SharedConnection {
    Arc::new(Mutex::new(DatabaseConnection::new()))
}

pub fn lock_connection(connection: &SharedConnection) -> MutexGuard<'_, DatabaseConnection> {
    match connection.lock() {
        Ok(guard) => guard,
        Err(poisoned) => {
            tracing::warn!("database connection lock was poisoned; recovering");
            poisoned.into_inner()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connect_string_omits_default_port() {
        let info = ConnectionInfo::new("local", "scott", "tiger", "db.example", 1521, "ORCLPDB");
        assert_eq!(info.connect_string(), "db.example/ORCLPDB");
    }

    #[test]
    fn test_connect_string_with_custom_port() {
        let info = ConnectionInfo::new("local", "scott", "tiger", "db.example", 1600, "");
        assert_eq!(info.connect_string(), "db.example:1600");
    }

    #[test]
    fn test_connect_string_tns_alias() {
        let info = ConnectionInfo::new("alias", "scott", "tiger", "", 1521, "PRODGIS");
        assert_eq!(info.connect_string(), "PRODGIS");
        assert_eq!(info.display_string(), "alias (scott@PRODGIS)");
    }

    #[test]
    fn test_password_is_never_serialized() {
        let info = ConnectionInfo::new("local", "scott", "tiger", "localhost", 1521, "ORCL");
        let json = serde_json::to_string(&info).unwrap();
        assert!(!json.contains("tiger"));
        let restored: ConnectionInfo = serde_json::from_str(&json).unwrap();
        assert!(restored.password.is_empty());
        assert_eq!(restored.options, ConnectionOptions::default());
    }

    #[test]
    fn test_clear_password() {
        let mut info = ConnectionInfo::new("local", "scott", "tiger", "localhost", 1521, "ORCL");
        info.clear_password();
        assert!(info.password.is_empty());
    }

    #[test]
    fn test_options_map_to_catalog_scope() {
        let options = ConnectionOptions {
            estimated_metadata: true,
            user_tables_only: true,
            ..ConnectionOptions::default()
        };
        let scope = options.scope();
        assert!(scope.estimated_metadata);
        assert!(scope.user_tables_only);
        assert!(!scope.geometry_columns_only);
    }
}
