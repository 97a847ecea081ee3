//! Data-source descriptors handed to a map layer provider.

use std::fmt::Write;

use crate::db::connection::ConnectionInfo;
use crate::db::models::{TableField, TableIndex};
use crate::db::quoting::TableRef;
use crate::geometry::GeometryKind;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LayerTable {
    Table(TableRef),
    /// Ad-hoc query, wrapped in parentheses when rendered.
    Query(String),
}

impl LayerTable {
    /// Text usable in a FROM clause.
    pub fn source_sql(&self) -> String {
        match self {
            LayerTable::Table(table) => table.quoted(),
            LayerTable::Query(sql) => format!("({})", sql.trim()),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LayerSource {
    pub host: String,
    pub port: u16,
    pub database: String,
    pub username: String,
    pub table: LayerTable,
    pub geometry_column: Option<String>,
    pub key_column: Option<String>,
    pub estimated_metadata: bool,
    pub srid: Option<i64>,
    pub wkb_type: GeometryKind,
    /// Cleared for query layers whose rows have no stable identity.
    pub select_at_id: bool,
}

impl LayerSource {
    pub fn new(info: &ConnectionInfo, table: LayerTable) -> Self {
        Self {
            host: info.host.clone(),
            port: info.port,
            database: info.database.clone(),
            username: info.username.clone(),
            table,
            geometry_column: None,
            key_column: None,
            estimated_metadata: info.options.estimated_metadata,
            srid: None,
            wkb_type: GeometryKind::Unknown,
            select_at_id: true,
        }
    }

    pub fn with_geometry(mut self, column: &str, kind: GeometryKind, srid: Option<i64>) -> Self {
        self.geometry_column = Some(column.to_string());
        self.wkb_type = kind;
        self.srid = srid;
        self
    }

    pub fn with_key_column(mut self, column: Option<&str>) -> Self {
        self.key_column = column.filter(|c| !c.is_empty()).map(str::to_string);
        self
    }

    pub fn without_select_at_id(mut self) -> Self {
        self.select_at_id = false;
        self
    }

    /// Provider URI: space separated `key=value` pairs, text values single
    /// quoted, followed by the table and optional geometry column.
    pub fn to_uri(&self) -> String {
        let mut uri = String::new();
        let _ = write!(uri, "dbname={}", quote_value(&self.database));
        if !self.host.is_empty() {
            let _ = write!(uri, " host={} port={}", self.host, self.port);
        }
        let _ = write!(uri, " user={}", quote_value(&self.username));
        if let Some(key) = &self.key_column {
            let _ = write!(uri, " key={}", quote_value(key));
        }
        if self.estimated_metadata {
            uri.push_str(" estimatedmetadata=true");
        }
        if let Some(srid) = self.srid {
            let _ = write!(uri, " srid={}", srid);
        }
        if self.geometry_column.is_some() && self.wkb_type != GeometryKind::Unknown {
            let _ = write!(uri, " type={}", self.wkb_type.display_name());
        }
        if !self.select_at_id {
            uri.push_str(" selectatid=false");
        }
        let _ = write!(uri, " table={}", self.table.source_sql());
        if let Some(column) = &self.geometry_column {
            let _ = write!(uri, " ({})", column);
        }
        uri.push_str(" sql=");
        uri
    }
}

fn quote_value(value: &str) -> String {
    format!("'{}'", value.replace('\\', "\\\\").replace('\'', "\\'"))
}

/// Column usable as a feature id for a view: a numeric primary key, or a
/// numeric column carrying a unique index.
pub fn pick_key_column(fields: &[TableField], indexes: &[TableIndex]) -> Option<String> {
    let numeric = |field: &&TableField| field.data_type.eq_ignore_ascii_case("NUMBER");
    fields
        .iter()
        .filter(numeric)
        .find(|field| field.primary_key)
        .or_else(|| {
            fields.iter().filter(numeric).find(|field| {
                indexes
                    .iter()
                    .any(|idx| idx.is_unique && idx.column == field.name)
            })
        })
        .map(|field| field.name.clone())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn info() -> ConnectionInfo {
        ConnectionInfo::new("gis", "scott", "tiger", "db.example", 1521, "ORCL")
    }

    #[test]
    fn test_table_uri() {
        let source = LayerSource::new(&info(), LayerTable::Table(TableRef::new("GIS", "ROADS")))
            .with_geometry("GEOM", GeometryKind::MultiLineString, Some(4326));
        assert_eq!(
            source.to_uri(),
            "dbname='ORCL' host=db.example port=1521 user='scott' srid=4326 \
             type=MultiLineString table=\"GIS\".\"ROADS\" (GEOM) sql="
        );
    }

    #[test]
    fn test_query_uri_without_host() {
        let mut conn = info();
        conn.host.clear();
        conn.options.estimated_metadata = true;
        let source = LayerSource::new(&conn, LayerTable::Query("SELECT * FROM roads\n".into()))
            .with_geometry("GEOM", GeometryKind::Unknown, None)
            .with_key_column(Some("ID"))
            .without_select_at_id();
        assert_eq!(
            source.to_uri(),
            "dbname='ORCL' user='scott' key='ID' estimatedmetadata=true selectatid=false \
             table=(SELECT * FROM roads) (GEOM) sql="
        );
    }

    #[test]
    fn test_plain_table_has_no_geometry_part() {
        let source = LayerSource::new(&info(), LayerTable::Table(TableRef::new("GIS", "LOOKUP")));
        assert!(source.to_uri().ends_with("table=\"GIS\".\"LOOKUP\" sql="));
    }

    #[test]
    fn test_pick_key_column() {
        let mut id = TableField::from_catalog(1, "ID", "NUMBER", Some(22), "N", None, None, "NUMBER", None);
        let code = TableField::from_catalog(2, "CODE", "NUMBER", Some(22), "N", None, None, "NUMBER", None);
        let name = TableField::from_catalog(3, "NAME", "VARCHAR2", Some(80), "Y", None, None, "VARCHAR2", None);
        let unique_code = TableIndex::from_catalog("UQ_CODE", "CODE", "UNIQUE", None);

        let fields = vec![id.clone(), code.clone(), name.clone()];
        assert_eq!(pick_key_column(&fields, &[unique_code.clone()]), Some("CODE".to_string()));
        assert_eq!(pick_key_column(&fields, &[]), None);

        id.primary_key = true;
        let fields = vec![id, code, name];
        assert_eq!(pick_key_column(&fields, &[unique_code]), Some("ID".to_string()));
    }
}
