//! Live Oracle Spatial connector: runs the catalog and DDL statements built
//! in [`catalog`] and [`ddl`] and turns their rows into listing models.

use oracle::{Connection, Row};
use std::sync::Arc;

use crate::db::cache::ListingCache;
use crate::db::catalog::{self, CatalogScope};
use crate::db::connection::{ConnectionInfo, ConnectionOptions};
use crate::db::data_model::{SqlResultModel, TableDataModel};
use crate::db::ddl::{self, ColumnChange, MetadataPrivilege, MetadataView};
use crate::db::layer::{pick_key_column, LayerSource, LayerTable};
use crate::db::models::{
    merge_listings, Extent, Schema, SchemaPrivileges, TableConstraint, TableEntry, TableField,
    TableIndex, TablePrivileges, TableTrigger,
};
use crate::db::quoting::TableRef;
use crate::error::{Error, Result};
use crate::geometry::{
    fan_out_uniform, resolve_distinct_kinds, resolve_dominant_kind, GeometryKind,
    GeometryObservation,
};
use crate::sql_dictionary::{sql_dictionary, SqlDictionary};

/// Column types offered when adding or editing table columns.
pub const FIELD_TYPES: &[&str] = &[
    "number",
    "number(9)",
    "number(9,2)",
    "number(*,4)",
    "binary_float",
    "binary_double",
    "varchar2(255)",
    "char(20)",
    "nvarchar2(255)",
    "nchar(20)",
    "date",
    "timestamp",
];

const ALL_METADATA_VIEW: &str = "ALL_SDO_GEOM_METADATA";
const USER_METADATA_VIEW: &str = "USER_SDO_GEOM_METADATA";

/// Catalog listings always report two dimensional geometries.
const LISTING_DIMENSION: i64 = 2;

pub struct OracleConnector {
    conn: Arc<Connection>,
    info: ConnectionInfo,
    user: String,
    has_spatial: bool,
    has_geometry_columns: bool,
    has_geometry_columns_access: bool,
    cache: Option<ListingCache>,
}

impl OracleConnector {
    /// Wraps an open connection, probes Spatial support and metadata view
    /// access, and attaches the listing cache saved for this connection.
    pub fn new(conn: Arc<Connection>, info: &ConnectionInfo) -> Result<Self> {
        let cache = ListingCache::open(&info.name);
        Self::with_cache(conn, info, cache)
    }

    pub fn with_cache(
        conn: Arc<Connection>,
        info: &ConnectionInfo,
        cache: Option<ListingCache>,
    ) -> Result<Self> {
        let mut info = info.clone();
        info.clear_password();
        let mut connector = Self {
            conn,
            user: info.catalog_user(),
            info,
            has_spatial: false,
            has_geometry_columns: false,
            has_geometry_columns_access: false,
            cache,
        };
        connector.check_spatial()?;
        connector.check_geometry_columns_table()?;
        tracing::debug!(
            user = %connector.user,
            spatial = connector.has_spatial,
            metadata = connector.has_geometry_columns,
            metadata_access = connector.has_geometry_columns_access,
            cache = connector.cache.is_some(),
            "connector ready"
        );
        Ok(connector)
    }

    fn check_spatial(&mut self) -> Result<()> {
        let count: i64 = self.query_scalar(catalog::SPATIAL_OPTION_SQL)?.unwrap_or(0);
        self.has_spatial = count > 0;
        Ok(())
    }

    fn check_geometry_columns_table(&mut self) -> Result<()> {
        let privilege: Option<String> =
            self.query_scalar(catalog::GEOMETRY_METADATA_PRIVILEGE_SQL)?;
        self.has_geometry_columns = privilege.is_some();
        self.has_geometry_columns_access = if self.has_geometry_columns {
            self.table_privileges(&TableRef::unqualified(ALL_METADATA_VIEW))?
                .select
        } else {
            false
        };
        Ok(())
    }

    fn query_rows<T, F>(&self, sql: &str, mut map: F) -> Result<Vec<T>>
    where
        F: FnMut(&Row) -> oracle::Result<T>,
    {
        let rows = match self.conn.query(sql, &[]) {
            Ok(rows) => rows,
            Err(err) => {
                tracing::warn!("Database operation failed: {err}");
                return Err(Error::database(sql, err));
            }
        };
        let mut items = Vec::new();
        for row_result in rows {
            let row = row_result.map_err(|err| Error::database(sql, err))?;
            items.push(map(&row).map_err(|err| Error::database(sql, err))?);
        }
        Ok(items)
    }

    /// First column of the first row, `None` when nothing came back or the
    /// value is NULL.
    fn query_scalar<T>(&self, sql: &str) -> Result<Option<T>>
    where
        T: oracle::sql_type::FromSql,
    {
        let mut values = self.query_rows(sql, |row| row.get::<_, Option<T>>(0))?;
        Ok(if values.is_empty() {
            None
        } else {
            values.swap_remove(0)
        })
    }

    fn execute(&self, sql: &str) -> Result<()> {
        tracing::debug!(sql, "executing");
        match self.conn.execute(sql, &[]) {
            Ok(_) => Ok(()),
            Err(err) => {
                tracing::warn!("Database operation failed: {err}");
                Err(Error::database(sql, err))
            }
        }
    }

    fn commit(&self) -> Result<()> {
        self.conn
            .commit()
            .map_err(|err| Error::database("COMMIT", err))
    }

    fn execute_and_commit(&self, sql: &str) -> Result<()> {
        self.execute(sql)?;
        self.commit()
    }

    pub fn connection(&self) -> Arc<Connection> {
        Arc::clone(&self.conn)
    }

    pub fn connection_info(&self) -> &ConnectionInfo {
        &self.info
    }

    pub fn options(&self) -> &ConnectionOptions {
        &self.info.options
    }

    fn scope(&self) -> CatalogScope {
        self.info.options.scope()
    }

    /// Connected user, upper-cased as the catalog reports it.
    pub fn user(&self) -> &str {
        &self.user
    }

    /// Server banner from `V$VERSION`.
    pub fn info(&self) -> Result<Option<String>> {
        self.query_scalar(catalog::SERVER_VERSION_SQL)
    }

    /// Oracle Spatial version; `None` without Spatial or when it cannot be read.
    pub fn spatial_info(&self) -> Option<String> {
        if !self.has_spatial {
            return None;
        }
        self.query_scalar(catalog::SPATIAL_VERSION_SQL).ok().flatten()
    }

    pub fn has_spatial_support(&self) -> bool {
        self.has_spatial
    }

    pub fn has_cache(&self) -> bool {
        self.cache.is_some()
    }

    pub fn has_geometry_columns(&self) -> bool {
        self.has_geometry_columns
    }

    pub fn has_geometry_columns_access(&self) -> bool {
        self.has_geometry_columns_access
    }

    pub fn field_types(&self) -> &'static [&'static str] {
        FIELD_TYPES
    }

    pub fn schema_privileges(&self, schema: Option<&str>) -> SchemaPrivileges {
        SchemaPrivileges::for_schema(schema, &self.user)
    }

    pub fn table_privileges(&self, table: &TableRef) -> Result<TablePrivileges> {
        let names = self.query_rows(&catalog::table_privileges(table), |row| {
            row.get::<_, String>(0)
        })?;
        Ok(TablePrivileges::from_names(names.iter().map(String::as_str)))
    }

    pub fn schemas(&self) -> Result<Vec<Schema>> {
        if self.info.options.user_tables_only {
            return Ok(vec![Schema {
                name: self.user.clone(),
            }]);
        }
        if let Some(cache) = &self.cache {
            return Ok(cache.schemas());
        }
        self.query_rows(&catalog::schemas(&self.scope()), |row| {
            Ok(Schema {
                name: row.get::<_, String>(0)?,
            })
        })
    }

    fn cache_owner<'a>(&'a self, schema: Option<&'a str>) -> Option<&'a str> {
        if self.info.options.user_tables_only {
            Some(self.user.as_str())
        } else {
            schema
        }
    }

    /// Vector tables first, then (when allowed) every other table or view
    /// not already listed, ordered by schema then name.
    pub fn tables(&self, schema: Option<&str>) -> Result<Vec<TableEntry>> {
        let options = self.info.options;
        if let Some(cache) = &self.cache {
            return Ok(cache.tables(self.cache_owner(schema), options.allow_geometryless_tables));
        }

        let items = match self.vector_tables(schema) {
            Ok(items) => items,
            Err(err) => {
                tracing::warn!("Vector table listing failed: {err}");
                Vec::new()
            }
        };

        let plain = if options.allow_geometryless_tables {
            let sql = catalog::plain_tables(&self.scope(), schema);
            self.query_rows(&sql, |row| {
                Ok(TableEntry::plain(
                    &row.get::<_, String>(0)?,
                    &row.get::<_, String>(1)?,
                    &row.get::<_, Option<String>>(2)?.unwrap_or_default(),
                    &row.get::<_, String>(3)?,
                    row.get::<_, Option<i64>>(4)?,
                    row.get::<_, Option<String>>(5)?,
                ))
            })?
        } else {
            Vec::new()
        };

        Ok(merge_listings(items, plain))
    }

    /// Tables registered in the spatial metadata view, one entry per
    /// geometry kind found in each geometry column.
    pub fn vector_tables(&self, schema: Option<&str>) -> Result<Vec<TableEntry>> {
        if let Some(cache) = &self.cache {
            return Ok(cache.vector_tables(self.cache_owner(schema)));
        }
        if !self.has_spatial {
            return Ok(Vec::new());
        }

        struct VectorRow {
            entry: TableEntry,
            column: String,
            srid: Option<i64>,
        }

        let sql = catalog::vector_tables(&self.scope(), schema);
        let rows = self.query_rows(&sql, |row| {
            Ok(VectorRow {
                entry: TableEntry::plain(
                    &row.get::<_, String>(0)?,
                    &row.get::<_, String>(1)?,
                    &row.get::<_, Option<String>>(2)?.unwrap_or_default(),
                    &row.get::<_, String>(3)?,
                    row.get::<_, Option<i64>>(4)?,
                    row.get::<_, Option<String>>(5)?,
                ),
                column: row.get::<_, String>(6)?,
                srid: row.get::<_, Option<i64>>(7)?,
            })
        })?;

        let mut items = Vec::new();
        for row in rows {
            let source = row.entry.table_ref().quoted();
            let kinds = self.table_geom_kinds(&source, &row.column);
            for facet in fan_out_uniform(&kinds, row.srid) {
                items.push(row.entry.with_geometry(&row.column, &facet, Some(LISTING_DIMENSION)));
            }
        }
        Ok(items)
    }

    /// Distinct geometry kinds stored in a column. `source` is a quoted
    /// table reference or a parenthesised query. Failures give `[Unknown]`.
    pub fn table_geom_kinds(&self, source: &str, column: &str) -> Vec<GeometryKind> {
        let scope = self.scope();
        if scope.estimated_metadata {
            tracing::info!(
                source,
                column,
                rows = catalog::ESTIMATED_SAMPLE_ROWS,
                "estimated geometry types"
            );
        }
        let sql = catalog::geometry_type_codes(&scope, source, column);
        match self.query_rows(&sql, |row| row.get::<_, Option<i64>>(0)) {
            Ok(codes) => resolve_distinct_kinds(codes.into_iter().flatten()),
            Err(err) => {
                tracing::debug!(source, column, "geometry type probe failed: {err}");
                vec![GeometryKind::Unknown]
            }
        }
    }

    /// Most frequent geometry kind of a column. Failures give `Unknown`.
    pub fn table_main_geom_kind(&self, source: &str, column: &str) -> GeometryKind {
        let sql = catalog::geometry_type_counts(&self.scope(), source, column);
        let observations = self.query_rows(&sql, |row| {
            let code = row.get::<_, Option<i64>>(0)?;
            let count = row.get::<_, Option<i64>>(1)?;
            Ok(code.map(|code| GeometryObservation::new(code, count)))
        });
        match observations {
            Ok(observations) => resolve_dominant_kind(observations.iter().flatten()),
            Err(err) => {
                tracing::debug!(source, column, "geometry count probe failed: {err}");
                GeometryKind::Unknown
            }
        }
    }

    pub fn table_row_count(&self, table: &TableRef) -> Result<i64> {
        Ok(self.query_scalar(&catalog::row_count(table))?.unwrap_or(0))
    }

    pub fn table_fields(&self, table: &TableRef) -> Result<Vec<TableField>> {
        self.query_rows(&catalog::table_fields(table), |row| {
            Ok(TableField::from_catalog(
                row.get::<_, i64>(0)?,
                &row.get::<_, String>(1)?,
                &row.get::<_, Option<String>>(2)?.unwrap_or_default(),
                row.get::<_, Option<i64>>(3)?,
                &row.get::<_, Option<String>>(4)?.unwrap_or_default(),
                row.get::<_, Option<i64>>(5)?,
                row.get::<_, Option<String>>(6)?,
                &row.get::<_, Option<String>>(7)?.unwrap_or_default(),
                row.get::<_, Option<String>>(8)?,
            ))
        })
    }

    /// Fields with their primary key flags set.
    pub fn table_fields_with_keys(&self, table: &TableRef) -> Result<Vec<TableField>> {
        let mut fields = self.table_fields(table)?;
        let constraints = self.table_constraints(table)?;
        TableField::mark_primary_keys(&mut fields, &constraints);
        Ok(fields)
    }

    pub fn table_indexes(&self, table: &TableRef) -> Result<Vec<TableIndex>> {
        self.query_rows(&catalog::table_indexes(table), |row| {
            Ok(TableIndex::from_catalog(
                &row.get::<_, String>(0)?,
                &row.get::<_, Option<String>>(1)?.unwrap_or_default(),
                &row.get::<_, Option<String>>(2)?.unwrap_or_default(),
                row.get::<_, Option<String>>(3)?,
            ))
        })
    }

    pub fn table_constraints(&self, table: &TableRef) -> Result<Vec<TableConstraint>> {
        self.query_rows(&catalog::table_constraints(table), |row| {
            Ok(TableConstraint::from_catalog(
                &row.get::<_, String>(0)?,
                &row.get::<_, Option<String>>(1)?.unwrap_or_default(),
                row.get::<_, Option<String>>(2)?,
                row.get::<_, Option<String>>(3)?,
                row.get::<_, Option<String>>(4)?,
                row.get::<_, Option<String>>(5)?,
            ))
        })
    }

    pub fn table_triggers(&self, table: &TableRef) -> Result<Vec<TableTrigger>> {
        self.query_rows(&catalog::table_triggers(table, &self.user), |row| {
            Ok(TableTrigger::from_catalog(
                &row.get::<_, String>(0)?,
                &row.get::<_, Option<String>>(1)?.unwrap_or_default(),
                &row.get::<_, Option<String>>(2)?.unwrap_or_default(),
                &row.get::<_, Option<String>>(3)?.unwrap_or_default(),
            ))
        })
    }

    pub fn enable_all_table_triggers(&self, table: &TableRef, enable: bool) -> Result<()> {
        for trigger in self.table_triggers(table)? {
            self.enable_table_trigger(table, &trigger.name, enable)?;
        }
        Ok(())
    }

    pub fn enable_table_trigger(&self, table: &TableRef, trigger: &str, enable: bool) -> Result<()> {
        self.execute_and_commit(&ddl::set_trigger_enabled(table, &self.user, trigger, enable))
    }

    pub fn delete_table_trigger(&self, table: &TableRef, trigger: &str) -> Result<()> {
        self.execute_and_commit(&ddl::drop_trigger(table, &self.user, trigger))
    }

    /// Real extent of a geometry column, read from the spatial index when
    /// the column has one. `None` when it cannot be computed.
    pub fn table_extent(&self, table: &TableRef, column: &str) -> Option<Extent> {
        let indexed = match self.table_indexes(table) {
            Ok(indexes) => indexes
                .iter()
                .any(|idx| idx.is_spatial && idx.column.eq_ignore_ascii_case(column)),
            Err(_) => false,
        };
        let sql = catalog::table_extent(table, &self.user, column, indexed);
        let rows = self.query_rows(&sql, |row| {
            Ok((
                row.get::<_, Option<f64>>(0)?,
                row.get::<_, Option<f64>>(1)?,
                row.get::<_, Option<f64>>(2)?,
                row.get::<_, Option<f64>>(3)?,
            ))
        });
        match rows {
            Ok(rows) => match rows.first() {
                Some((Some(xmin), Some(ymin), Some(xmax), Some(ymax))) => Some(Extent {
                    xmin: *xmin,
                    ymin: *ymin,
                    xmax: *xmax,
                    ymax: *ymax,
                }),
                _ => None,
            },
            Err(err) => {
                tracing::debug!(table = %table, column, "extent unavailable: {err}");
                None
            }
        }
    }

    fn estimated_axis(&self, table: &TableRef, column: &str, axis: &str) -> Option<(f64, f64)> {
        let sql = catalog::estimated_extent_axis(table, &self.user, column, axis);
        let rows = self
            .query_rows(&sql, |row| {
                Ok((row.get::<_, Option<f64>>(0)?, row.get::<_, Option<f64>>(1)?))
            })
            .ok()?;
        match rows.first() {
            Some((Some(lb), Some(ub))) => Some((*lb, *ub)),
            _ => None,
        }
    }

    /// Extent registered in the metadata view DIMINFO.
    pub fn table_estimated_extent(&self, table: &TableRef, column: &str) -> Option<Extent> {
        let (xmin, xmax) = self.estimated_axis(table, column, "X")?;
        let (ymin, ymax) = self.estimated_axis(table, column, "Y")?;
        Some(Extent {
            xmin,
            ymin,
            xmax,
            ymax,
        })
    }

    /// Metadata view the user may change for `table`, per privilege.
    pub fn metadata_view(
        &self,
        table: &TableRef,
        privilege: MetadataPrivilege,
    ) -> Result<Option<MetadataView>> {
        let all = self.table_privileges(&TableRef::unqualified(ALL_METADATA_VIEW))?;
        let user_view = self.table_privileges(&TableRef::unqualified(USER_METADATA_VIEW))?;
        Ok(ddl::choose_metadata_view(
            &all,
            &user_view,
            table.schema_or(&self.user),
            &self.user,
            privilege,
        ))
    }

    fn require_metadata_view(
        &self,
        table: &TableRef,
        privilege: MetadataPrivilege,
    ) -> Result<MetadataView> {
        self.metadata_view(table, privilege)?.ok_or_else(|| {
            Error::InsufficientPrivileges(format!(
                "cannot modify spatial metadata of {} ({:?} privilege missing)",
                table, privilege
            ))
        })
    }

    /// Rewrites the registered extent with the real one.
    pub fn update_extent_metadata(&self, table: &TableRef, column: &str) -> Result<()> {
        let extent = self.table_extent(table, column).ok_or_else(|| {
            Error::InvalidData(format!("no extent available for {}.{}", table, column))
        })?;
        let view = self.require_metadata_view(table, MetadataPrivilege::Update)?;
        self.execute_and_commit(&ddl::update_extent_metadata(view, table, &self.user, &extent))
    }

    pub fn view_definition(&self, view: &TableRef) -> Result<Option<String>> {
        self.query_scalar(&catalog::view_definition(view))
    }

    /// Coordinate system name of an SRID.
    pub fn spatial_ref_name(&self, srid: i64) -> Option<String> {
        if !self.has_spatial {
            return None;
        }
        self.query_scalar(&catalog::spatial_ref_name(srid)).ok().flatten()
    }

    pub fn is_vector_table(&self, table: &TableRef) -> Result<bool> {
        if !(self.has_geometry_columns && self.has_geometry_columns_access) {
            return Ok(false);
        }
        let count: i64 = self
            .query_scalar(&catalog::is_vector_table(table, &self.user))?
            .unwrap_or(0);
        Ok(count > 0)
    }

    pub fn is_geometry_column(&self, table: &TableRef, column: &str) -> Result<bool> {
        let count: i64 = self
            .query_scalar(&catalog::is_geometry_column(table, column))?
            .unwrap_or(0);
        Ok(count > 0)
    }

    /// Returns `false` without touching the database when no field is given.
    pub fn create_table(
        &self,
        table: &TableRef,
        field_defs: &[String],
        primary_key: Option<&str>,
    ) -> Result<bool> {
        match ddl::create_table(table, field_defs, primary_key) {
            Some(sql) => {
                self.execute_and_commit(&sql)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Drops a table together with its spatial metadata rows.
    pub fn delete_table(&self, table: &TableRef) -> Result<()> {
        if self.is_vector_table(table)? {
            match self.metadata_view(table, MetadataPrivilege::Delete)? {
                Some(view) => self.execute_and_commit(&ddl::delete_geometry_metadata(
                    view, table, &self.user, None,
                ))?,
                None => tracing::warn!(table = %table, "cannot remove spatial metadata; dropping table anyway"),
            }
        }
        self.execute_and_commit(&ddl::drop_table(table))
    }

    pub fn empty_table(&self, table: &TableRef) -> Result<()> {
        self.execute_and_commit(&ddl::truncate_table(table))
    }

    pub fn rename_table(&self, table: &TableRef, new_name: &str) -> Result<()> {
        if new_name == table.name {
            return Ok(());
        }
        if self.is_vector_table(table)? {
            match self.metadata_view(table, MetadataPrivilege::Update)? {
                Some(view) => self.execute(&ddl::rename_table_metadata(
                    view, table, &self.user, new_name,
                ))?,
                None => tracing::warn!(table = %table, "cannot rename spatial metadata"),
            }
        }
        self.execute(&ddl::rename_table(table, new_name))?;
        self.commit()
    }

    pub fn create_view(&self, view: &TableRef, query: &str) -> Result<()> {
        self.execute_and_commit(&ddl::create_view(view, query))
    }

    pub fn delete_view(&self, view: &TableRef) -> Result<()> {
        self.execute_and_commit(&ddl::drop_view(view))
    }

    pub fn rename_view(&self, view: &TableRef, new_name: &str) -> Result<()> {
        self.rename_table(view, new_name)
    }

    pub fn create_schema(&self, schema: &str) -> Result<()> {
        self.execute_and_commit(&ddl::create_schema(schema))
    }

    pub fn delete_schema(&self, schema: &str) -> Result<()> {
        self.execute_and_commit(&ddl::drop_schema(schema))
    }

    /// Oracle schemas cannot be renamed; this does nothing.
    pub fn rename_schema(&self, schema: &str, new_name: &str) -> Result<()> {
        tracing::debug!(schema, new_name, "schema rename is not supported by Oracle");
        Ok(())
    }

    pub fn add_table_column(&self, table: &TableRef, field_def: &str) -> Result<()> {
        self.execute_and_commit(&ddl::add_column(table, field_def))
    }

    /// Drops a column, first removing its metadata row if it is a geometry
    /// column.
    pub fn delete_table_column(&self, table: &TableRef, column: &str) -> Result<()> {
        if self.is_geometry_column(table, column)? {
            let view = self.require_metadata_view(table, MetadataPrivilege::Delete)?;
            self.execute_and_commit(&ddl::delete_geometry_metadata(
                view,
                table,
                &self.user,
                Some(column),
            ))?;
        }
        self.execute_and_commit(&ddl::drop_column(table, column))
    }

    /// Applies type, nullability and default changes, then the rename,
    /// keeping spatial metadata in step. Committed once at the end.
    pub fn update_table_column(
        &self,
        table: &TableRef,
        column: &str,
        change: &ColumnChange,
    ) -> Result<()> {
        if change.is_empty() {
            return Ok(());
        }
        if let Some(sql) = ddl::modify_column(table, column, change) {
            self.execute(&sql)?;
        }
        if let Some(new_name) = change.new_name.as_deref().filter(|n| *n != column) {
            self.execute(&ddl::rename_column(table, column, new_name))?;
            if self.is_geometry_column(table, column)? {
                let view = self.require_metadata_view(table, MetadataPrivilege::Update)?;
                self.execute(&ddl::rename_column_metadata(
                    view, table, &self.user, column, new_name,
                ))?;
            }
        }
        self.commit()
    }

    pub fn rename_table_column(&self, table: &TableRef, column: &str, new_name: &str) -> Result<()> {
        self.update_table_column(
            table,
            column,
            &ColumnChange {
                new_name: Some(new_name.to_string()),
                ..ColumnChange::default()
            },
        )
    }

    pub fn set_table_column_type(&self, table: &TableRef, column: &str, data_type: &str) -> Result<()> {
        self.update_table_column(
            table,
            column,
            &ColumnChange {
                data_type: Some(data_type.to_string()),
                ..ColumnChange::default()
            },
        )
    }

    pub fn set_table_column_null(&self, table: &TableRef, column: &str, is_null: bool) -> Result<()> {
        self.update_table_column(
            table,
            column,
            &ColumnChange {
                not_null: Some(!is_null),
                ..ColumnChange::default()
            },
        )
    }

    /// An empty default drops the current one.
    pub fn set_table_column_default(&self, table: &TableRef, column: &str, default: &str) -> Result<()> {
        self.update_table_column(
            table,
            column,
            &ColumnChange {
                default: Some(default.to_string()),
                ..ColumnChange::default()
            },
        )
    }

    /// Adds an SDO_GEOMETRY column and registers it in the metadata view.
    /// Metadata stores column names upper-cased.
    pub fn add_geometry_column(&self, table: &TableRef, column: &str, srid: Option<i64>) -> Result<()> {
        let column = column.to_uppercase();
        let view = self.require_metadata_view(table, MetadataPrivilege::Insert)?;
        self.execute_and_commit(&ddl::add_geometry_column(table, &column))?;
        self.execute_and_commit(&ddl::insert_geometry_metadata(
            view, table, &self.user, &column, srid,
        ))
    }

    pub fn delete_geometry_column(&self, table: &TableRef, column: &str) -> Result<()> {
        self.delete_table_column(table, column)
    }

    pub fn add_table_unique_constraint(&self, table: &TableRef, column: &str) -> Result<()> {
        self.execute_and_commit(&ddl::add_unique_constraint(table, column))
    }

    pub fn delete_table_constraint(&self, table: &TableRef, constraint: &str) -> Result<()> {
        self.execute_and_commit(&ddl::drop_constraint(table, constraint))
    }

    pub fn add_table_primary_key(&self, table: &TableRef, column: &str) -> Result<()> {
        self.execute_and_commit(&ddl::add_primary_key(table, column))
    }

    pub fn create_table_index(&self, table: &TableRef, name: &str, column: &str) -> Result<()> {
        self.execute_and_commit(&ddl::create_index(table, name, column))
    }

    pub fn delete_table_index(&self, table: &TableRef, name: &str) -> Result<()> {
        self.execute_and_commit(&ddl::drop_index(table, &self.user, name))
    }

    pub fn create_spatial_index(&self, table: &TableRef, column: &str) -> Result<()> {
        self.execute_and_commit(&ddl::create_spatial_index(table, column))
    }

    pub fn delete_spatial_index(&self, table: &TableRef, column: &str) -> Result<()> {
        self.delete_table_index(table, &ddl::spatial_index_name(table, column))
    }

    /// Keywords and functions plus identifiers for the SQL editor. Table and
    /// owner names come from the listing cache when one is attached.
    pub fn sql_dictionary(&self) -> Result<SqlDictionary> {
        let mut dictionary = sql_dictionary(self.has_spatial);
        if let Some(cache) = &self.cache {
            let owner = self.cache_owner(None);
            dictionary.identifiers.extend(cache.identifiers(owner));
        }
        let sql = catalog::dictionary_identifiers(&self.scope(), self.cache.is_some());
        let names = self.query_rows(sql, |row| row.get::<_, Option<String>>(0))?;
        dictionary.identifiers.extend(names.into_iter().flatten());
        Ok(dictionary)
    }

    /// Runs an ad-hoc statement and commits.
    pub fn execute_sql(&self, sql: &str) -> Result<SqlResultModel> {
        SqlResultModel::run(&self.conn, sql)
    }

    pub fn table_data_model(&self, table: &TableRef) -> Result<TableDataModel> {
        let fields = self.table_fields(table)?;
        Ok(TableDataModel::new(self.connection(), table.clone(), &fields))
    }

    /// Layer source for a listed table. The geometry type is the column's
    /// dominant kind; views get a numeric key column when one is found.
    pub fn layer_source(&self, entry: &TableEntry) -> Result<LayerSource> {
        let table = entry.table_ref();
        let mut source = LayerSource::new(&self.info, LayerTable::Table(table.clone()));
        if let Some(vector) = entry.vector() {
            let kind = self.table_main_geom_kind(&table.quoted(), &vector.geometry_column);
            source = source.with_geometry(&vector.geometry_column, kind, vector.srid);
        }
        if entry.is_view {
            let fields = self.table_fields_with_keys(&table)?;
            let indexes = self.table_indexes(&table)?;
            source = source.with_key_column(pick_key_column(&fields, &indexes).as_deref());
        }
        Ok(source)
    }

    /// Layer source for an ad-hoc query.
    pub fn query_layer_source(
        &self,
        sql: &str,
        geometry_column: &str,
        key_column: Option<&str>,
        avoid_select_by_id: bool,
    ) -> LayerSource {
        let table = LayerTable::Query(sql.to_string());
        let kind = self.table_main_geom_kind(&table.source_sql(), geometry_column);
        let source = LayerSource::new(&self.info, table)
            .with_geometry(geometry_column, kind, None)
            .with_key_column(key_column);
        if avoid_select_by_id {
            source.without_select_at_id()
        } else {
            source
        }
    }
}
