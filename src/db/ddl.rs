//! DDL statements and the Oracle Spatial metadata bookkeeping that must
//! accompany them.

use super::models::{Extent, TablePrivileges};
use super::quoting::{quote_id, quote_string, TableRef};

/// Tolerance written into DIMINFO elements.
pub const DIM_TOLERANCE: f64 = 0.005;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MetadataView {
    /// `ALL_SDO_GEOM_METADATA`, filtered by owner.
    All,
    /// `USER_SDO_GEOM_METADATA`, only for the connected user's own tables.
    User,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MetadataPrivilege {
    Insert,
    Update,
    Delete,
}

impl MetadataPrivilege {
    fn granted(self, privileges: &TablePrivileges) -> bool {
        match self {
            MetadataPrivilege::Insert => privileges.insert,
            MetadataPrivilege::Update => privileges.update,
            MetadataPrivilege::Delete => privileges.delete,
        }
    }
}

impl MetadataView {
    pub fn view_name(self) -> &'static str {
        match self {
            MetadataView::All => "ALL_SDO_GEOM_METADATA",
            MetadataView::User => "USER_SDO_GEOM_METADATA",
        }
    }
}

/// Picks the metadata view the user may modify for `schema`.
///
/// `ALL_SDO_GEOM_METADATA` wins when the privilege is held there; the
/// `USER_` view is only usable for the connected user's own schema. `None`
/// means the metadata cannot be touched.
pub fn choose_metadata_view(
    all: &TablePrivileges,
    user_view: &TablePrivileges,
    schema: &str,
    user: &str,
    privilege: MetadataPrivilege,
) -> Option<MetadataView> {
    if privilege.granted(all) {
        Some(MetadataView::All)
    } else if schema.eq_ignore_ascii_case(user) && privilege.granted(user_view) {
        Some(MetadataView::User)
    } else {
        None
    }
}

fn owner_filter(view: MetadataView, schema: &str) -> String {
    match view {
        MetadataView::All => format!(" AND OWNER = {}", quote_string(schema)),
        MetadataView::User => String::new(),
    }
}

fn dim_array(xmin: f64, xmax: f64, ymin: f64, ymax: f64) -> String {
    format!(
        "MDSYS.SDO_DIM_ARRAY(MDSYS.SDO_DIM_ELEMENT('X', {xmin}, {xmax}, {DIM_TOLERANCE}), \
         MDSYS.SDO_DIM_ELEMENT('Y', {ymin}, {ymax}, {DIM_TOLERANCE}))"
    )
}

pub fn create_table(table: &TableRef, field_defs: &[String], primary_key: Option<&str>) -> Option<String> {
    if field_defs.is_empty() {
        return None;
    }
    let mut sql = format!("CREATE TABLE {} (", table.quoted());
    sql.push_str(&field_defs.join(", "));
    if let Some(pkey) = primary_key.filter(|pkey| !pkey.is_empty()) {
        sql.push_str(&format!(", PRIMARY KEY ({})", quote_id(pkey)));
    }
    sql.push(')');
    Some(sql)
}

pub fn drop_table(table: &TableRef) -> String {
    format!("DROP TABLE {}", table.quoted())
}

pub fn truncate_table(table: &TableRef) -> String {
    format!("TRUNCATE TABLE {}", table.quoted())
}

pub fn rename_table(table: &TableRef, new_name: &str) -> String {
    format!("ALTER TABLE {} RENAME TO {}", table.quoted(), quote_id(new_name))
}

pub fn create_view(view: &TableRef, query: &str) -> String {
    format!("CREATE VIEW {} AS {}", view.quoted(), query)
}

pub fn drop_view(view: &TableRef) -> String {
    format!("DROP VIEW {}", view.quoted())
}

pub fn create_schema(schema: &str) -> String {
    format!("CREATE SCHEMA AUTHORIZATION {}", quote_id(schema))
}

pub fn drop_schema(schema: &str) -> String {
    format!("DROP USER {} CASCADE", quote_id(schema))
}

pub fn add_column(table: &TableRef, field_def: &str) -> String {
    format!("ALTER TABLE {} ADD {}", table.quoted(), field_def)
}

pub fn drop_column(table: &TableRef, column: &str) -> String {
    format!("ALTER TABLE {} DROP COLUMN {}", table.quoted(), quote_id(column))
}

/// Requested changes to one column; `None` leaves that aspect untouched.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ColumnChange {
    pub new_name: Option<String>,
    pub data_type: Option<String>,
    pub not_null: Option<bool>,
    /// `Some("")` drops the default.
    pub default: Option<String>,
}

impl ColumnChange {
    pub fn is_empty(&self) -> bool {
        self.new_name.is_none()
            && self.data_type.is_none()
            && self.not_null.is_none()
            && self.default.is_none()
    }
}

/// `ALTER TABLE .. MODIFY` for type, nullability and default changes.
pub fn modify_column(table: &TableRef, column: &str, change: &ColumnChange) -> Option<String> {
    let mut actions: Vec<String> = Vec::new();
    if let Some(data_type) = &change.data_type {
        actions.push(data_type.clone());
    }
    if let Some(not_null) = change.not_null {
        actions.push(if not_null { "NOT NULL" } else { "NULL" }.to_string());
    }
    if let Some(default) = &change.default {
        if default.is_empty() {
            actions.push("DEFAULT NULL".to_string());
        } else {
            actions.push(format!("DEFAULT {}", default));
        }
    }
    if actions.is_empty() {
        return None;
    }
    Some(format!(
        "ALTER TABLE {} MODIFY ( {} {} )",
        table.quoted(),
        quote_id(column),
        actions.join(" ")
    ))
}

pub fn rename_column(table: &TableRef, column: &str, new_name: &str) -> String {
    format!(
        "ALTER TABLE {} RENAME COLUMN {} TO {}",
        table.quoted(),
        quote_id(column),
        quote_id(new_name)
    )
}

pub fn add_unique_constraint(table: &TableRef, column: &str) -> String {
    format!("ALTER TABLE {} ADD UNIQUE ({})", table.quoted(), quote_id(column))
}

pub fn drop_constraint(table: &TableRef, constraint: &str) -> String {
    format!(
        "ALTER TABLE {} DROP CONSTRAINT {}",
        table.quoted(),
        quote_id(constraint)
    )
}

pub fn add_primary_key(table: &TableRef, column: &str) -> String {
    format!("ALTER TABLE {} ADD PRIMARY KEY ({})", table.quoted(), quote_id(column))
}

pub fn create_index(table: &TableRef, name: &str, column: &str) -> String {
    format!(
        "CREATE INDEX {} ON {} ({})",
        quote_id(name),
        table.quoted(),
        quote_id(column)
    )
}

pub fn drop_index(table: &TableRef, user: &str, name: &str) -> String {
    format!("DROP INDEX {}", TableRef::new(table.schema_or(user), name).quoted())
}

pub fn spatial_index_name(table: &TableRef, column: &str) -> String {
    format!("sidx_{}_{}", table.name, column)
}

pub fn create_spatial_index(table: &TableRef, column: &str) -> String {
    format!(
        "CREATE INDEX {} ON {}({}) INDEXTYPE IS MDSYS.SPATIAL_INDEX",
        quote_id(&spatial_index_name(table, column)),
        table.quoted(),
        quote_id(column)
    )
}

pub fn set_trigger_enabled(table: &TableRef, user: &str, trigger: &str, enable: bool) -> String {
    format!(
        "ALTER TRIGGER {} {}",
        TableRef::new(table.schema_or(user), trigger).quoted(),
        if enable { "ENABLE" } else { "DISABLE" }
    )
}

pub fn drop_trigger(table: &TableRef, user: &str, trigger: &str) -> String {
    format!(
        "DROP TRIGGER {}",
        TableRef::new(table.schema_or(user), trigger).quoted()
    )
}

pub fn add_geometry_column(table: &TableRef, column: &str) -> String {
    format!(
        "ALTER TABLE {} ADD {} SDO_GEOMETRY",
        table.quoted(),
        quote_id(column)
    )
}

/// Registers a new geometry column with a placeholder extent.
pub fn insert_geometry_metadata(
    view: MetadataView,
    table: &TableRef,
    user: &str,
    column: &str,
    srid: Option<i64>,
) -> String {
    let srid = srid.map(|s| s.to_string()).unwrap_or_else(|| "NULL".to_string());
    let dims = dim_array(0.0, 20.0, 0.0, 20.0);
    match view {
        MetadataView::All => format!(
            "INSERT INTO ALL_SDO_GEOM_METADATA (OWNER, TABLE_NAME, COLUMN_NAME, DIMINFO, SRID) \
             VALUES ({}, {}, {}, {}, {})",
            quote_string(table.schema_or(user)),
            quote_string(&table.name),
            quote_string(column),
            dims,
            srid
        ),
        MetadataView::User => format!(
            "INSERT INTO USER_SDO_GEOM_METADATA (TABLE_NAME, COLUMN_NAME, DIMINFO, SRID) \
             VALUES ({}, {}, {}, {})",
            quote_string(&table.name),
            quote_string(column),
            dims,
            srid
        ),
    }
}

/// Removes metadata rows of a table, or of one of its columns.
pub fn delete_geometry_metadata(
    view: MetadataView,
    table: &TableRef,
    user: &str,
    column: Option<&str>,
) -> String {
    let column_filter = column
        .map(|c| format!(" AND COLUMN_NAME = {}", quote_string(&c.to_uppercase())))
        .unwrap_or_default();
    format!(
        "DELETE FROM {} WHERE TABLE_NAME = {}{}{}",
        view.view_name(),
        quote_string(&table.name),
        column_filter,
        owner_filter(view, table.schema_or(user))
    )
}

pub fn rename_table_metadata(view: MetadataView, table: &TableRef, user: &str, new_name: &str) -> String {
    format!(
        "UPDATE {} SET TABLE_NAME = {} WHERE TABLE_NAME = {}{}",
        view.view_name(),
        quote_string(new_name),
        quote_string(&table.name),
        owner_filter(view, table.schema_or(user))
    )
}

pub fn rename_column_metadata(
    view: MetadataView,
    table: &TableRef,
    user: &str,
    column: &str,
    new_name: &str,
) -> String {
    format!(
        "UPDATE {} SET COLUMN_NAME = {} WHERE TABLE_NAME = {} AND COLUMN_NAME = {}{}",
        view.view_name(),
        quote_string(new_name),
        quote_string(&table.name),
        quote_string(column),
        owner_filter(view, table.schema_or(user))
    )
}

/// Rewrites DIMINFO so the registered extent matches `extent`.
pub fn update_extent_metadata(view: MetadataView, table: &TableRef, user: &str, extent: &Extent) -> String {
    format!(
        "UPDATE {} SET DIMINFO = {} WHERE TABLE_NAME = {}{}",
        view.view_name(),
        dim_array(extent.xmin, extent.xmax, extent.ymin, extent.ymax),
        quote_string(&table.name),
        owner_filter(view, table.schema_or(user))
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn privs(insert: bool, update: bool, delete: bool) -> TablePrivileges {
        TablePrivileges {
            select: true,
            insert,
            update,
            delete,
        }
    }

    #[test]
    fn test_all_view_preferred_when_granted() {
        let view = choose_metadata_view(
            &privs(false, true, false),
            &privs(true, true, true),
            "GIS",
            "SCOTT",
            MetadataPrivilege::Update,
        );
        assert_eq!(view, Some(MetadataView::All));
    }

    #[test]
    fn test_user_view_only_for_own_schema() {
        let none = privs(false, false, false);
        let all = privs(true, true, true);
        assert_eq!(
            choose_metadata_view(&none, &all, "scott", "SCOTT", MetadataPrivilege::Delete),
            Some(MetadataView::User)
        );
        assert_eq!(
            choose_metadata_view(&none, &all, "GIS", "SCOTT", MetadataPrivilege::Delete),
            None
        );
    }

    #[test]
    fn test_create_table_with_primary_key() {
        let table = TableRef::new("GIS", "ROADS");
        let sql = create_table(
            &table,
            &["\"ID\" NUMBER(9)".to_string(), "\"NAME\" VARCHAR2(80)".to_string()],
            Some("ID"),
        );
        assert_eq!(
            sql.as_deref(),
            Some("CREATE TABLE \"GIS\".\"ROADS\" (\"ID\" NUMBER(9), \"NAME\" VARCHAR2(80), PRIMARY KEY (\"ID\"))")
        );
        assert_eq!(create_table(&table, &[], None), None);
    }

    #[test]
    fn test_modify_column_combines_actions() {
        let table = TableRef::unqualified("ROADS");
        let change = ColumnChange {
            data_type: Some("NUMBER(10)".to_string()),
            not_null: Some(true),
            default: Some(String::new()),
            ..ColumnChange::default()
        };
        assert_eq!(
            modify_column(&table, "SPEED", &change).as_deref(),
            Some("ALTER TABLE \"ROADS\" MODIFY ( \"SPEED\" NUMBER(10) NOT NULL DEFAULT NULL )")
        );
        assert_eq!(modify_column(&table, "SPEED", &ColumnChange::default()), None);
        assert!(ColumnChange::default().is_empty());
    }

    #[test]
    fn test_metadata_statements_filter_owner_on_all_view() {
        let table = TableRef::new("GIS", "ROADS");
        let sql = delete_geometry_metadata(MetadataView::All, &table, "SCOTT", Some("geom"));
        assert_eq!(
            sql,
            "DELETE FROM ALL_SDO_GEOM_METADATA WHERE TABLE_NAME = 'ROADS' AND COLUMN_NAME = 'GEOM' AND OWNER = 'GIS'"
        );
        let sql = rename_table_metadata(MetadataView::User, &table, "SCOTT", "STREETS");
        assert_eq!(
            sql,
            "UPDATE USER_SDO_GEOM_METADATA SET TABLE_NAME = 'STREETS' WHERE TABLE_NAME = 'ROADS'"
        );
    }

    #[test]
    fn test_update_extent_writes_both_axes() {
        let extent = Extent { xmin: -5.5, ymin: 41.0, xmax: 10.0, ymax: 51.5 };
        let sql = update_extent_metadata(
            MetadataView::All,
            &TableRef::new("GIS", "ROADS"),
            "SCOTT",
            &extent,
        );
        assert!(sql.contains("SDO_DIM_ELEMENT('X', -5.5, 10, 0.005)"));
        assert!(sql.contains("SDO_DIM_ELEMENT('Y', 41, 51.5, 0.005)"));
        assert!(sql.ends_with("AND OWNER = 'GIS'"));
    }

    #[test]
    fn test_insert_metadata_defaults_srid_to_null() {
        let sql = insert_geometry_metadata(
            MetadataView::User,
            &TableRef::unqualified("ROADS"),
            "SCOTT",
            "GEOM",
            None,
        );
        assert!(sql.starts_with("INSERT INTO USER_SDO_GEOM_METADATA (TABLE_NAME"));
        assert!(sql.ends_with(", NULL)"));
    }

    #[test]
    fn test_spatial_index_naming() {
        let table = TableRef::new("GIS", "ROADS");
        assert_eq!(
            create_spatial_index(&table, "GEOM"),
            "CREATE INDEX \"sidx_ROADS_GEOM\" ON \"GIS\".\"ROADS\"(\"GEOM\") INDEXTYPE IS MDSYS.SPATIAL_INDEX"
        );
        assert_eq!(
            drop_index(&table, "SCOTT", &spatial_index_name(&table, "GEOM")),
            "DROP INDEX \"GIS\".\"sidx_ROADS_GEOM\""
        );
    }

    #[test]
    fn test_trigger_statements_use_table_schema() {
        let table = TableRef::unqualified("ROADS");
        assert_eq!(
            set_trigger_enabled(&table, "SCOTT", "TRG_ROADS", false),
            "ALTER TRIGGER \"SCOTT\".\"TRG_ROADS\" DISABLE"
        );
        assert_eq!(
            drop_trigger(&table, "SCOTT", "TRG_ROADS"),
            "DROP TRIGGER \"SCOTT\".\"TRG_ROADS\""
        );
    }
}
