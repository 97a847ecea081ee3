use serde::{Deserialize, Serialize};

use crate::db::quoting::TableRef;
use crate::geometry::{ColumnGeometry, GeometryKind};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schema {
    pub name: String,
}

/// Geometry side of a listing entry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VectorInfo {
    pub geometry_column: String,
    /// Family label (`POINT`, `LINESTRING`, `POLYGON` or `UNKNOWN`).
    pub geometry_label: String,
    pub wkb_type: i64,
    pub dimension: Option<i64>,
    pub srid: Option<i64>,
}

impl VectorInfo {
    pub fn kind(&self) -> GeometryKind {
        GeometryKind::from_wkb_type(self.wkb_type)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TableKind {
    Plain,
    Vector(VectorInfo),
}

/// One row of a table listing. Vector tables holding several geometry kinds
/// appear once per kind.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableEntry {
    pub name: String,
    pub schema: String,
    pub is_view: bool,
    pub owner: String,
    pub estimated_row_count: i64,
    pub comment: Option<String>,
    pub kind: TableKind,
}

impl TableEntry {
    /// Builds a plain entry from raw catalog values; object type `VIEW`
    /// marks a view, a missing row estimate counts as zero.
    pub fn plain(
        name: &str,
        schema: &str,
        object_type: &str,
        owner: &str,
        num_rows: Option<i64>,
        comment: Option<String>,
    ) -> Self {
        Self {
            name: name.to_string(),
            schema: schema.to_string(),
            is_view: object_type.eq_ignore_ascii_case("VIEW"),
            owner: owner.to_string(),
            estimated_row_count: num_rows.unwrap_or(0).max(0),
            comment: comment.filter(|c| !c.is_empty()),
            kind: TableKind::Plain,
        }
    }

    /// Copy of this entry carrying one geometry facet.
    pub fn with_geometry(&self, column: &str, facet: &ColumnGeometry, dimension: Option<i64>) -> Self {
        Self {
            kind: TableKind::Vector(VectorInfo {
                geometry_column: column.to_string(),
                geometry_label: facet.label().to_string(),
                wkb_type: facet.wkb_type(),
                dimension,
                srid: facet.srid,
            }),
            ..self.clone()
        }
    }

    pub fn table_ref(&self) -> TableRef {
        TableRef::new(&self.schema, &self.name)
    }

    pub fn vector(&self) -> Option<&VectorInfo> {
        match &self.kind {
            TableKind::Vector(info) => Some(info),
            TableKind::Plain => None,
        }
    }

    pub fn is_vector(&self) -> bool {
        self.vector().is_some()
    }
}

/// Listing order: schema, then table name.
pub fn sort_entries(entries: &mut [TableEntry]) {
    entries.sort_by(|a, b| (&a.schema, &a.name).cmp(&(&b.schema, &b.name)));
}

/// Vector entries plus every plain entry not already listed under the same
/// schema and name, in listing order.
pub fn merge_listings(vector: Vec<TableEntry>, plain: Vec<TableEntry>) -> Vec<TableEntry> {
    let mut items = vector;
    for entry in plain {
        let listed = items
            .iter()
            .any(|e| e.schema == entry.schema && e.name == entry.name);
        if !listed {
            items.push(entry);
        }
    }
    sort_entries(&mut items);
    items
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableField {
    pub num: i64,
    pub name: String,
    pub data_type: String,
    pub char_max_len: Option<i64>,
    /// Precision/scale or length, taken from the `(...)` suffix of the
    /// formatted type.
    pub modifier: Option<String>,
    pub not_null: bool,
    pub has_default: bool,
    pub default: Option<String>,
    pub comment: Option<String>,
    pub primary_key: bool,
}

impl TableField {
    #[allow(clippy::too_many_arguments)]
    pub fn from_catalog(
        num: i64,
        name: &str,
        data_type: &str,
        char_max_len: Option<i64>,
        nullable: &str,
        default_length: Option<i64>,
        default: Option<String>,
        formatted_type: &str,
        comment: Option<String>,
    ) -> Self {
        let default = default
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty());
        Self {
            num,
            name: name.to_string(),
            data_type: data_type.to_string(),
            char_max_len,
            modifier: parse_type_modifier(formatted_type),
            not_null: !nullable.trim().eq_ignore_ascii_case("Y"),
            has_default: default_length.unwrap_or(0) > 0 || default.is_some(),
            default,
            comment: comment.filter(|c| !c.is_empty()),
            primary_key: false,
        }
    }

    pub fn type_to_string(&self) -> String {
        match &self.modifier {
            Some(modifier) => format!("{}({})", self.data_type, modifier),
            None => self.data_type.clone(),
        }
    }

    pub fn default_to_string(&self) -> String {
        self.default.clone().unwrap_or_default()
    }

    pub fn is_geometry(&self) -> bool {
        self.data_type.eq_ignore_ascii_case("SDO_GEOMETRY")
    }

    /// Marks fields named by a primary key constraint.
    pub fn mark_primary_keys(fields: &mut [TableField], constraints: &[TableConstraint]) {
        for field in fields.iter_mut() {
            field.primary_key = constraints.iter().any(|con| {
                con.constraint_type == ConstraintType::PrimaryKey
                    && con.column.as_deref() == Some(field.name.as_str())
            });
        }
    }
}

/// Text between the last pair of parentheses closing the type string, e.g.
/// `NUMBER(9,2)` gives `9,2`.
pub fn parse_type_modifier(formatted_type: &str) -> Option<String> {
    let trimmed = formatted_type.trim();
    let inner = trimmed.strip_suffix(')')?;
    let open = inner.find('(')?;
    let modifier = inner[open + 1..].trim();
    if modifier.is_empty() {
        None
    } else {
        Some(modifier.to_string())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConstraintType {
    PrimaryKey,
    ForeignKey,
    Unique,
    Check,
    Unknown,
}

impl ConstraintType {
    /// Maps ALL_CONSTRAINTS.CONSTRAINT_TYPE letters.
    pub fn from_code(code: &str) -> Self {
        match code.trim().to_ascii_lowercase().as_str() {
            "p" => ConstraintType::PrimaryKey,
            "r" => ConstraintType::ForeignKey,
            "u" => ConstraintType::Unique,
            "c" => ConstraintType::Check,
            _ => ConstraintType::Unknown,
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            ConstraintType::PrimaryKey => "Primary key",
            ConstraintType::ForeignKey => "Foreign key",
            ConstraintType::Unique => "Unique",
            ConstraintType::Check => "Check",
            ConstraintType::Unknown => "Unknown",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableConstraint {
    pub name: String,
    pub constraint_type: ConstraintType,
    pub is_deferrable: bool,
    pub is_deferred: bool,
    pub column: Option<String>,
    pub check_source: Option<String>,
}

impl TableConstraint {
    pub fn from_catalog(
        name: &str,
        type_code: &str,
        deferrable: Option<String>,
        deferred: Option<String>,
        column: Option<String>,
        search_condition: Option<String>,
    ) -> Self {
        let constraint_type = ConstraintType::from_code(type_code);
        Self {
            name: name.to_string(),
            constraint_type,
            is_deferrable: deferrable.as_deref() == Some("DEFERRABLE"),
            is_deferred: deferred.as_deref() == Some("DEFERRED"),
            column,
            check_source: if constraint_type == ConstraintType::Check {
                search_condition
            } else {
                None
            },
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableIndex {
    pub name: String,
    pub column: String,
    pub is_unique: bool,
    pub is_spatial: bool,
}

impl TableIndex {
    pub fn from_catalog(name: &str, column: &str, uniqueness: &str, index_type: Option<String>) -> Self {
        Self {
            name: name.to_string(),
            column: column.to_string(),
            is_unique: uniqueness.eq_ignore_ascii_case("UNIQUE"),
            is_spatial: index_type
                .map(|t| t.eq_ignore_ascii_case("SPATIAL_INDEX"))
                .unwrap_or(false),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableTrigger {
    pub name: String,
    pub event: String,
    pub trigger_type: String,
    pub enabled: bool,
}

impl TableTrigger {
    pub fn from_catalog(name: &str, event: &str, trigger_type: &str, status: &str) -> Self {
        Self {
            name: name.to_string(),
            event: event.to_string(),
            trigger_type: trigger_type.to_string(),
            enabled: status.eq_ignore_ascii_case("ENABLED"),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TablePrivileges {
    pub select: bool,
    pub insert: bool,
    pub update: bool,
    pub delete: bool,
}

impl TablePrivileges {
    pub fn from_names<'a, I>(names: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut privileges = Self::default();
        for name in names {
            match name.trim() {
                "SELECT" => privileges.select = true,
                "INSERT" => privileges.insert = true,
                "UPDATE" => privileges.update = true,
                "DELETE" => privileges.delete = true,
                _ => {}
            }
        }
        privileges
    }

    pub fn is_read_only(&self) -> bool {
        self.select && !self.insert && !self.update && !self.delete
    }

    pub fn names(&self) -> Vec<&'static str> {
        let mut names = Vec::new();
        if self.select {
            names.push("select");
        }
        if self.insert {
            names.push("insert");
        }
        if self.update {
            names.push("update");
        }
        if self.delete {
            names.push("delete");
        }
        names
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaPrivileges {
    pub create: bool,
    pub usage: bool,
}

impl SchemaPrivileges {
    /// Only the owner may create objects in an Oracle schema; listed
    /// schemas are always accessible.
    pub fn for_schema(schema: Option<&str>, user: &str) -> Self {
        let schema = schema.unwrap_or(user);
        Self {
            create: schema.eq_ignore_ascii_case(user),
            usage: true,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Extent {
    pub xmin: f64,
    pub ymin: f64,
    pub xmax: f64,
    pub ymax: f64,
}

impl Extent {
    pub fn display(&self) -> String {
        format!(
            "{:.5}, {:.5} - {:.5}, {:.5}",
            self.xmin, self.ymin, self.xmax, self.ymax
        )
    }
}
