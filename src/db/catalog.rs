//! SQL text for every catalog lookup the connector performs.
//!
//! Builders are pure so listings can be checked without a server; the
//! connector only executes what is produced here.

use super::quoting::{quote_id, quote_string, TableRef};

/// Row cap applied to geometry type sampling in estimated-metadata mode.
pub const ESTIMATED_SAMPLE_ROWS: u32 = 100;

/// Connection options that change which catalog views are consulted.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CatalogScope {
    pub user_tables_only: bool,
    pub geometry_columns_only: bool,
    pub estimated_metadata: bool,
}

impl CatalogScope {
    fn prefix(&self) -> &'static str {
        if self.user_tables_only {
            "user"
        } else {
            "all"
        }
    }

    fn owner_column(&self) -> &'static str {
        if self.user_tables_only {
            "user As owner"
        } else {
            "c.owner"
        }
    }

    fn sample_filter(&self) -> String {
        if self.estimated_metadata {
            format!("AND ROWNUM < {}", ESTIMATED_SAMPLE_ROWS)
        } else {
            String::new()
        }
    }
}

pub const SPATIAL_OPTION_SQL: &str =
    "SELECT count(*) FROM v$option WHERE parameter='Spatial' AND value='TRUE'";

pub const GEOMETRY_METADATA_PRIVILEGE_SQL: &str = "SELECT PRIVILEGE FROM ALL_TAB_PRIVS_RECD \
     WHERE TABLE_NAME IN ('ALL_SDO_GEOM_METADATA', 'USER_SDO_GEOM_METADATA') \
     AND PRIVILEGE = 'SELECT' AND ROWNUM=1";

pub const SERVER_VERSION_SQL: &str = "SELECT * FROM V$VERSION WHERE ROWNUM < 2";

pub const SPATIAL_VERSION_SQL: &str = "SELECT SDO_VERSION FROM DUAL";

pub fn table_privileges(table: &TableRef) -> String {
    let schema_where = match &table.schema {
        Some(schema) => format!(" AND TABLE_SCHEMA = {}", quote_string(schema)),
        None => String::new(),
    };
    format!(
        "SELECT DISTINCT PRIVILEGE FROM ALL_TAB_PRIVS \
         WHERE privilege IN ('SELECT','INSERT','UPDATE','DELETE') \
         AND TABLE_NAME = {}{}",
        quote_string(&table.name),
        schema_where
    )
}

pub fn schemas(scope: &CatalogScope) -> String {
    let metatable = if scope.geometry_columns_only {
        "all_sdo_geom_metadata"
    } else {
        "all_objects WHERE object_type IN ('TABLE','VIEW','SYNONYM')"
    };
    format!("SELECT DISTINCT owner FROM {} ORDER BY owner", metatable)
}

/// Tables registered in the spatial metadata view, one row per geometry
/// column: name, owner, object type, owner, num_rows, comment, column, srid.
pub fn vector_tables(scope: &CatalogScope, schema: Option<&str>) -> String {
    let prefix = scope.prefix();
    let owner = scope.owner_column();
    let schema_where = match schema {
        Some(schema) if !scope.user_tables_only => format!(
            " WHERE c.owner = {} AND o.owner = c.owner AND d.owner = c.owner AND e.owner = c.owner ",
            quote_string(schema)
        ),
        _ => String::new(),
    };
    format!(
        "SELECT c.table_name, {owner}, o.object_type, {owner}, d.num_rows, e.comments, \
         c.column_name, c.srid \
         FROM {prefix}_sdo_geom_metadata c \
         JOIN {prefix}_objects o ON c.table_name = o.object_name \
         AND o.object_type IN ('TABLE','VIEW','SYNONYM') \
         JOIN {prefix}_all_tables d ON c.table_name = d.table_name \
         JOIN {prefix}_tab_comments e ON c.table_name = e.table_name{schema_where} \
         ORDER BY TABLE_NAME"
    )
}

/// Every table or view, with or without geometry: name, owner, object type,
/// owner, num_rows, comment.
pub fn plain_tables(scope: &CatalogScope, schema: Option<&str>) -> String {
    let prefix = scope.prefix();
    let owner = scope.owner_column();
    let schema_where = match schema {
        Some(schema) if !scope.user_tables_only => format!(
            " WHERE c.owner = {} AND o.owner = c.owner AND e.owner = c.owner ",
            quote_string(schema)
        ),
        _ => String::new(),
    };
    format!(
        "SELECT c.table_name, {owner}, o.object_type, {owner}, c.num_rows, e.comments \
         FROM {prefix}_all_tables c \
         JOIN {prefix}_objects o ON c.table_name = o.object_name \
         AND o.object_type IN ('TABLE','VIEW','SYNONYM') \
         JOIN {prefix}_tab_comments e ON c.table_name = e.table_name{schema_where} \
         ORDER BY TABLE_NAME"
    )
}

/// Distinct SDO_GTYPE values of a geometry column, ascending.
///
/// `source` is either a quoted table reference or a parenthesised query.
pub fn geometry_type_codes(scope: &CatalogScope, source: &str, column: &str) -> String {
    let col = quote_id(column);
    format!(
        "SELECT DISTINCT a.{col}.SDO_GTYPE As gtype FROM {source} a \
         WHERE a.{col} IS NOT NULL {} ORDER BY a.{col}.SDO_GTYPE",
        scope.sample_filter()
    )
}

/// SDO_GTYPE values of a geometry column with their row counts, most
/// frequent first.
pub fn geometry_type_counts(scope: &CatalogScope, source: &str, column: &str) -> String {
    let col = quote_id(column);
    format!(
        "SELECT a.{col}.SDO_GTYPE As gtype, COUNT(a.{col}.SDO_GTYPE) As nb_rows \
         FROM {source} a WHERE a.{col} IS NOT NULL {} \
         GROUP BY a.{col}.SDO_GTYPE ORDER BY nb_rows DESC",
        scope.sample_filter()
    )
}

pub fn row_count(table: &TableRef) -> String {
    format!("SELECT COUNT(*) FROM {}", table.quoted())
}

pub fn table_fields(table: &TableRef) -> String {
    let schema_where = match &table.schema {
        Some(schema) => format!(" AND a.OWNER={}", quote_string(schema)),
        None => String::new(),
    };
    format!(
        "SELECT a.COLUMN_ID As ordinal_position, a.COLUMN_NAME As column_name, \
         a.DATA_TYPE As data_type, a.DATA_LENGTH As char_max_len, \
         a.NULLABLE As nullable, a.DEFAULT_LENGTH As hasdefault, \
         a.DATA_DEFAULT As default_value, \
         CASE WHEN a.DATA_PRECISION IS NOT NULL \
              THEN a.DATA_TYPE || '(' || a.DATA_PRECISION || ',' || NVL(a.DATA_SCALE, 0) || ')' \
              ELSE a.DATA_TYPE END As formatted_type, \
         c.COMMENTS \
         FROM ALL_TAB_COLUMNS a \
         JOIN ALL_COL_COMMENTS c ON a.TABLE_NAME = c.TABLE_NAME \
         AND a.COLUMN_NAME = c.COLUMN_NAME AND a.OWNER = c.OWNER \
         WHERE a.TABLE_NAME = {}{} ORDER BY a.COLUMN_ID",
        quote_string(&table.name),
        schema_where
    )
}

pub fn table_indexes(table: &TableRef) -> String {
    let schema_where = match &table.schema {
        Some(schema) => format!(" AND i.OWNER={}", quote_string(schema)),
        None => String::new(),
    };
    format!(
        "SELECT i.index_name, c.COLUMN_NAME, i.uniqueness, i.ityp_name \
         FROM ALL_INDEXES i \
         INNER JOIN ALL_IND_COLUMNS c ON i.index_name = c.index_name AND i.owner = c.index_owner \
         WHERE i.table_name = {}{}",
        quote_string(&table.name),
        schema_where
    )
}

pub fn table_constraints(table: &TableRef) -> String {
    let schema_where = match &table.schema {
        Some(schema) => format!(" AND c.OWNER={}", quote_string(schema)),
        None => String::new(),
    };
    format!(
        "SELECT a.CONSTRAINT_NAME, a.CONSTRAINT_TYPE, a.DEFERRABLE, a.DEFERRED, \
         c.COLUMN_NAME, a.SEARCH_CONDITION \
         FROM ALL_CONS_COLUMNS c \
         INNER JOIN ALL_CONSTRAINTS a ON a.CONSTRAINT_NAME = c.CONSTRAINT_NAME AND a.OWNER = c.OWNER \
         WHERE c.TABLE_NAME = {}{}",
        quote_string(&table.name),
        schema_where
    )
}

pub fn table_triggers(table: &TableRef, user: &str) -> String {
    format!(
        "SELECT TRIGGER_NAME, TRIGGERING_EVENT, TRIGGER_TYPE, STATUS FROM ALL_TRIGGERS \
         WHERE TABLE_OWNER = {} AND TABLE_NAME = {}",
        quote_string(table.schema_or(user)),
        quote_string(&table.name)
    )
}

/// Extent from the spatial index when one exists, otherwise aggregated over
/// every row. Returns xmin, ymin, xmax, ymax.
pub fn table_extent(table: &TableRef, user: &str, column: &str, indexed: bool) -> String {
    let mbr = if indexed {
        format!(
            "SELECT SDO_TUNE.EXTENT_OF({}, {}) AS mbr FROM DUAL",
            quote_string(&format!("{}.{}", table.schema_or(user), table.name)),
            quote_string(column)
        )
    } else {
        format!(
            "SELECT SDO_AGGR_MBR({}) AS mbr FROM {}",
            quote_id(column),
            table.quoted()
        )
    };
    format!(
        "SELECT SDO_GEOM.SDO_MIN_MBR_ORDINATE(m.mbr, 1), SDO_GEOM.SDO_MIN_MBR_ORDINATE(m.mbr, 2), \
         SDO_GEOM.SDO_MAX_MBR_ORDINATE(m.mbr, 1), SDO_GEOM.SDO_MAX_MBR_ORDINATE(m.mbr, 2) \
         FROM ({mbr}) m"
    )
}

/// Bounds registered in DIMINFO for one axis (`X` or `Y`).
pub fn estimated_extent_axis(table: &TableRef, user: &str, column: &str, axis: &str) -> String {
    format!(
        "SELECT sdo_lb, sdo_ub FROM mdsys.all_sdo_geom_metadata m, table(m.diminfo) \
         WHERE owner = {} AND table_name = {} AND column_name = {} AND sdo_dimname = {}",
        quote_string(table.schema_or(user)),
        quote_string(&table.name),
        quote_string(column),
        quote_string(axis)
    )
}

pub fn view_definition(view: &TableRef) -> String {
    let schema_where = match &view.schema {
        Some(schema) => format!(" AND OWNER = {}", quote_string(schema)),
        None => String::new(),
    };
    format!(
        "SELECT TEXT FROM ALL_VIEWS WHERE VIEW_NAME = {}{}",
        quote_string(&view.name),
        schema_where
    )
}

pub fn spatial_ref_name(srid: i64) -> String {
    format!("SELECT CS_NAME FROM MDSYS.CS_SRS WHERE SRID = {}", srid)
}

pub fn is_vector_table(table: &TableRef, user: &str) -> String {
    format!(
        "SELECT count(*) FROM all_sdo_geom_metadata WHERE owner = {} AND table_name = {}",
        quote_string(table.schema_or(user)),
        quote_string(&table.name)
    )
}

pub fn is_geometry_column(table: &TableRef, column: &str) -> String {
    let schema_where = match &table.schema {
        Some(schema) => format!(" AND owner = {}", quote_string(schema)),
        None => String::new(),
    };
    format!(
        "SELECT count(*) FROM all_sdo_geom_metadata WHERE table_name = {} AND column_name = {}{}",
        quote_string(&table.name),
        quote_string(&column.to_uppercase()),
        schema_where
    )
}

/// Identifiers offered to the SQL editor. When the listing cache already
/// supplies table and owner names only column names are fetched.
pub fn dictionary_identifiers(scope: &CatalogScope, has_cache: bool) -> &'static str {
    match (has_cache, scope.user_tables_only) {
        (true, true) => "SELECT DISTINCT COLUMN_NAME FROM USER_TAB_COLUMNS",
        (true, false) => "SELECT DISTINCT COLUMN_NAME FROM ALL_TAB_COLUMNS",
        (false, true) => {
            "SELECT DISTINCT TABLE_NAME FROM USER_ALL_TABLES \
             UNION SELECT USER FROM DUAL \
             UNION SELECT DISTINCT COLUMN_NAME FROM USER_TAB_COLUMNS"
        }
        (false, false) => {
            "SELECT TABLE_NAME FROM ALL_ALL_TABLES \
             UNION SELECT DISTINCT OWNER FROM ALL_ALL_TABLES \
             UNION SELECT DISTINCT COLUMN_NAME FROM ALL_TAB_COLUMNS"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_geometry_type_codes_orders_ascending() {
        let scope = CatalogScope::default();
        let sql = geometry_type_codes(&scope, "\"GIS\".\"ROADS\"", "GEOM");
        assert!(sql.starts_with("SELECT DISTINCT a.\"GEOM\".SDO_GTYPE"));
        assert!(sql.contains("FROM \"GIS\".\"ROADS\" a"));
        assert!(sql.ends_with("ORDER BY a.\"GEOM\".SDO_GTYPE"));
        assert!(!sql.contains("ROWNUM"));
    }

    #[test]
    fn test_estimated_metadata_samples_rows() {
        let scope = CatalogScope {
            estimated_metadata: true,
            ..CatalogScope::default()
        };
        let sql = geometry_type_counts(&scope, "\"ROADS\"", "GEOM");
        assert!(sql.contains("AND ROWNUM < 100"));
        assert!(sql.contains("GROUP BY a.\"GEOM\".SDO_GTYPE ORDER BY nb_rows DESC"));
    }

    #[test]
    fn test_vector_tables_user_scope_ignores_schema_filter() {
        let scope = CatalogScope {
            user_tables_only: true,
            ..CatalogScope::default()
        };
        let sql = vector_tables(&scope, Some("GIS"));
        assert!(sql.contains("FROM user_sdo_geom_metadata c"));
        assert!(sql.contains("user As owner"));
        assert!(!sql.contains("'GIS'"));
    }

    #[test]
    fn test_vector_tables_schema_filter() {
        let sql = vector_tables(&CatalogScope::default(), Some("GIS"));
        assert!(sql.contains("FROM all_sdo_geom_metadata c"));
        assert!(sql.contains("WHERE c.owner = 'GIS'"));
    }

    #[test]
    fn test_schemas_from_metadata_view() {
        let scope = CatalogScope {
            geometry_columns_only: true,
            ..CatalogScope::default()
        };
        assert_eq!(
            schemas(&scope),
            "SELECT DISTINCT owner FROM all_sdo_geom_metadata ORDER BY owner"
        );
    }

    #[test]
    fn test_table_extent_uses_index_when_available() {
        let table = TableRef::new("GIS", "ROADS");
        let indexed = table_extent(&table, "SCOTT", "GEOM", true);
        assert!(indexed.contains("SDO_TUNE.EXTENT_OF('GIS.ROADS', 'GEOM')"));
        let scanned = table_extent(&table, "SCOTT", "GEOM", false);
        assert!(scanned.contains("SDO_AGGR_MBR(\"GEOM\") AS mbr FROM \"GIS\".\"ROADS\""));
    }

    #[test]
    fn test_table_privileges_quotes_names() {
        let sql = table_privileges(&TableRef::new("GIS", "O'HARA"));
        assert!(sql.contains("TABLE_NAME = 'O''HARA'"));
        assert!(sql.contains("TABLE_SCHEMA = 'GIS'"));
    }

    #[test]
    fn test_is_geometry_column_uppercases_column() {
        let sql = is_geometry_column(&TableRef::unqualified("ROADS"), "geom");
        assert!(sql.contains("column_name = 'GEOM'"));
        assert!(!sql.contains("owner"));
    }
}
