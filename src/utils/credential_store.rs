use keyring::Entry;

use crate::error::{Error, Result};

const SERVICE_NAME: &str = "spatial_browser";

fn entry_for(connection_name: &str) -> Result<Entry> {
    Entry::new(SERVICE_NAME, connection_name)
        .map_err(|e| Error::Credential(format!("Keyring error: {}", e)))
}

/// Store a password in the OS keyring for the given connection name.
pub fn store_password(connection_name: &str, password: &str) -> Result<()> {
    entry_for(connection_name)?
        .set_password(password)
        .map_err(|e| Error::Credential(format!("Failed to store password in keyring: {}", e)))
}

/// Retrieve a password from the OS keyring for the given connection name.
/// Returns Ok(None) if no credential is found.
pub fn get_password(connection_name: &str) -> Result<Option<String>> {
    match entry_for(connection_name)?.get_password() {
        Ok(password) => Ok(Some(password)),
        Err(keyring::Error::NoEntry) => Ok(None),
        Err(e) => Err(Error::Credential(format!(
            "Failed to retrieve password from keyring: {}",
            e
        ))),
    }
}

/// Delete a password from the OS keyring. Succeeds if none is stored.
pub fn delete_password(connection_name: &str) -> Result<()> {
    match entry_for(connection_name)?.delete_credential() {
        Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
        Err(e) => Err(Error::Credential(format!(
            "Failed to delete password from keyring: {}",
            e
        ))),
    }
}
