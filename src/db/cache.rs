//! Read-only lookaside cache of previous table listings.
//!
//! The SQLite file `data_sources_cache.db` registers cached connections in
//! `meta_oracle` and keeps one `"oracle_<connection>"` table of listed rows
//! per connection. When an entry exists for the active connection, schema
//! and table listings are answered from it instead of the catalog.

use rusqlite::types::Value;
use rusqlite::{params, Connection, OpenFlags};
use std::path::{Path, PathBuf};

use crate::db::models::{merge_listings, Schema, TableEntry};
use crate::db::quoting::quote_id;
use crate::error::{Error, Result};
use crate::geometry::{fan_out, GeometryKind};
use crate::utils::config::APP_DIR;

const CACHE_FILE: &str = "data_sources_cache.db";

/// One cached table. `geomtypes` and `geomsrids` hold comma separated WKB
/// type ids and SRIDs, position for position; both are empty for tables
/// without geometry.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CachedTable {
    pub tablename: String,
    pub ownername: String,
    pub isview: bool,
    pub geometrycolname: String,
    pub geomtypes: String,
    pub geomsrids: String,
}

impl CachedTable {
    fn has_geometry(&self) -> bool {
        !self.geometrycolname.is_empty()
    }

    fn base_entry(&self) -> TableEntry {
        let object_type = if self.isview { "VIEW" } else { "TABLE" };
        TableEntry::plain(
            &self.tablename,
            &self.ownername,
            object_type,
            &self.ownername,
            None,
            None,
        )
    }

    /// Pairs every parsable WKB id with the SRID at the same position.
    fn observed_geometries(&self) -> Vec<(GeometryKind, Option<i64>)> {
        let srids: Vec<Option<i64>> = split_numbers(&self.geomsrids)
            .map(|s| s.parse::<i64>().ok())
            .collect();
        split_numbers(&self.geomtypes)
            .enumerate()
            .filter_map(|(i, raw)| match raw.parse::<i64>() {
                Ok(id) => Some((GeometryKind::from_wkb_type(id), srids.get(i).copied().flatten())),
                Err(_) => {
                    tracing::debug!(table = %self.tablename, value = raw, "skipping malformed geometry type");
                    None
                }
            })
            .collect()
    }
}

/// `isview` is stored as an integer flag, but text flags occur in older files.
fn view_flag(value: Value) -> bool {
    match value {
        Value::Integer(flag) => flag != 0,
        Value::Real(flag) => flag != 0.0,
        Value::Text(flag) => matches!(
            flag.trim().to_ascii_lowercase().as_str(),
            "1" | "t" | "true" | "y" | "yes" | "view"
        ),
        Value::Null | Value::Blob(_) => false,
    }
}

fn cache_error(path: &Path, err: rusqlite::Error) -> Error {
    Error::Cache(format!("{}: {}", path.display(), err))
}

fn split_numbers(list: &str) -> impl Iterator<Item = &str> {
    list.split(',').map(str::trim).filter(|s| !s.is_empty())
}

#[derive(Clone, Debug, Default)]
pub struct ListingCache {
    tables: Vec<CachedTable>,
}

impl ListingCache {
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|mut path| {
            path.push(APP_DIR);
            path.push(CACHE_FILE);
            path
        })
    }

    /// Cache entry for `connection_name` from the default location.
    pub fn open(connection_name: &str) -> Option<Self> {
        let path = Self::default_path()?;
        match Self::open_from(&path, connection_name) {
            Ok(cache) => cache,
            Err(err) => {
                tracing::warn!(path = %path.display(), "Listing cache unavailable: {err}");
                None
            }
        }
    }

    /// `Ok(None)` when the file is missing or `meta_oracle` has no entry for
    /// the connection. The file is opened read-only.
    pub fn open_from(path: &Path, connection_name: &str) -> Result<Option<Self>> {
        if !path.is_file() {
            return Ok(None);
        }
        let conn = Connection::open_with_flags(path, OpenFlags::SQLITE_OPEN_READ_ONLY)
            .map_err(|err| cache_error(path, err))?;

        let registered: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM meta_oracle WHERE conn = ?1",
                params![connection_name],
                |row| row.get(0),
            )
            .map_err(|err| cache_error(path, err))?;
        if registered <= 0 {
            return Ok(None);
        }

        let sql = format!(
            "SELECT tablename, ownername, isview, geometrycolname, geomtypes, geomsrids \
             FROM {} ORDER BY tablename",
            quote_id(&format!("oracle_{}", connection_name))
        );
        let mut stmt = conn.prepare(&sql).map_err(|err| cache_error(path, err))?;
        let rows = stmt
            .query_map([], |row| {
                Ok(CachedTable {
                    tablename: row.get(0)?,
                    ownername: row.get(1)?,
                    isview: view_flag(row.get(2)?),
                    geometrycolname: row.get::<_, Option<String>>(3)?.unwrap_or_default(),
                    geomtypes: row.get::<_, Option<String>>(4)?.unwrap_or_default(),
                    geomsrids: row.get::<_, Option<String>>(5)?.unwrap_or_default(),
                })
            })
            .map_err(|err| cache_error(path, err))?;
        let tables = rows
            .collect::<rusqlite::Result<Vec<CachedTable>>>()
            .map_err(|err| cache_error(path, err))?;
        tracing::debug!(connection = connection_name, rows = tables.len(), "listing cache loaded");
        Ok(Some(Self { tables }))
    }

    pub fn from_tables(tables: Vec<CachedTable>) -> Self {
        Self { tables }
    }

    fn in_scope<'a>(&'a self, owner: Option<&'a str>) -> impl Iterator<Item = &'a CachedTable> + 'a {
        self.tables
            .iter()
            .filter(move |t| owner.map_or(true, |o| t.ownername == o))
    }

    pub fn schemas(&self) -> Vec<Schema> {
        let mut owners: Vec<&str> = self.tables.iter().map(|t| t.ownername.as_str()).collect();
        owners.sort_unstable();
        owners.dedup();
        owners
            .into_iter()
            .map(|name| Schema {
                name: name.to_string(),
            })
            .collect()
    }

    /// One entry per surviving geometry kind of every cached geometry column.
    pub fn vector_tables(&self, owner: Option<&str>) -> Vec<TableEntry> {
        let mut entries = Vec::new();
        for table in self.in_scope(owner).filter(|t| t.has_geometry()) {
            let observed = table.observed_geometries();
            if observed.is_empty() {
                continue;
            }
            let base = table.base_entry();
            for facet in fan_out(&observed) {
                entries.push(base.with_geometry(&table.geometrycolname, &facet, Some(2)));
            }
        }
        entries
    }

    pub fn tables(&self, owner: Option<&str>, allow_geometryless: bool) -> Vec<TableEntry> {
        let plain: Vec<TableEntry> = if allow_geometryless {
            self.in_scope(owner)
                .filter(|t| !t.has_geometry())
                .map(CachedTable::base_entry)
                .collect()
        } else {
            Vec::new()
        };
        merge_listings(self.vector_tables(owner), plain)
    }

    /// Table and owner names, for the SQL editor dictionary.
    pub fn identifiers(&self, owner: Option<&str>) -> Vec<String> {
        let mut names: Vec<String> = self
            .in_scope(owner)
            .flat_map(|t| [t.tablename.clone(), t.ownername.clone()])
            .collect();
        names.sort();
        names.dedup();
        names
    }
}
