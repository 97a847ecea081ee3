use spatial_browser::db::models::{TableEntry, TableKind};
use spatial_browser::db::{DatabaseConnection, OracleConnector};
use spatial_browser::utils::{credential_store, AppConfig};
use spatial_browser::{Error, Result};

pub struct App {
    config: AppConfig,
}

impl App {
    pub fn new() -> Self {
        let config = AppConfig::load();
        Self { config }
    }

    /// Connects with a saved connection and prints its table listing.
    pub fn run(&mut self, connection_name: &str, schema: Option<&str>) -> Result<()> {
        let mut info = self
            .config
            .get_connection_by_name(connection_name)
            .cloned()
            .ok_or_else(|| {
                Error::InvalidData(format!("no saved connection named '{}'", connection_name))
            })?;
        if info.password.is_empty() {
            if let Some(password) = credential_store::get_password(&info.name)? {
                info.password = password;
            }
        }

        let mut db = DatabaseConnection::new();
        let conn = db.connect(info.clone())?;
        let connector = OracleConnector::new(conn, &info)?;

        let entries = connector.tables(schema)?;
        tracing::info!(
            connection = %info.display_string(),
            count = entries.len(),
            "listed tables"
        );
        for entry in &entries {
            println!("{}", listing_line(entry));
        }

        self.config.last_connection = Some(info.name.clone());
        self.config.save()?;
        db.disconnect();
        Ok(())
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

/// Tab separated: schema, name, kind label, WKB type, SRID.
fn listing_line(entry: &TableEntry) -> String {
    let (label, wkb_type, srid) = match &entry.kind {
        TableKind::Vector(vector) => (
            vector.geometry_label.as_str(),
            vector.kind().display_name(),
            vector.srid.map(|srid| srid.to_string()).unwrap_or_default(),
        ),
        TableKind::Plain if entry.is_view => ("VIEW", "", String::new()),
        TableKind::Plain => ("TABLE", "", String::new()),
    };
    format!("{}\t{}\t{}\t{}\t{}", entry.schema, entry.name, label, wkb_type, srid)
}

#[cfg(test)]
mod tests {
    use super::*;
    use spatial_browser::geometry::{ColumnGeometry, GeometryKind};

    #[test]
    fn test_listing_line() {
        let base = TableEntry::plain("ROADS", "GIS", "TABLE", "GIS", None, None);
        assert_eq!(listing_line(&base), "GIS\tROADS\tTABLE\t\t");

        let vector = base.with_geometry(
            "GEOM",
            &ColumnGeometry { kind: GeometryKind::MultiLineString, srid: Some(4326) },
            Some(2),
        );
        assert_eq!(listing_line(&vector), "GIS\tROADS\tLINESTRING\tMultiLineString\t4326");
    }
}
