use std::io;
use thiserror::Error;

/// Errors surfaced by the connector, the listing cache and the persisted
/// configuration. Geometry resolution never fails and has no variant here.
#[derive(Error, Debug)]
pub enum Error {
    /// Opening the Oracle session failed (bad credentials, unreachable
    /// listener, missing client libraries).
    #[error("Connection error: {0}")]
    Connection(#[source] oracle::Error),

    /// A statement was rejected by the server.
    #[error("Database error: {source} (while running: {sql})")]
    Database {
        sql: String,
        #[source]
        source: oracle::Error,
    },

    #[error("Insufficient privileges: {0}")]
    InsufficientPrivileges(String),

    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error("Listing cache error: {0}")]
    Cache(String),

    #[error("Credential store error: {0}")]
    Credential(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub fn database(sql: &str, source: oracle::Error) -> Self {
        Error::Database {
            sql: sql.to_string(),
            source,
        }
    }
}
