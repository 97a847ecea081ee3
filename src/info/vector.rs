use crate::db::models::{Extent, TableEntry};
use crate::db::OracleConnector;
use crate::error::Result;
use crate::geometry::GeometryKind;

use super::html::{markup, HtmlElem, HtmlTable, HtmlTableCol};

/// Geometry column facts shown in the spatial section of a table page.
#[derive(Clone, Debug, PartialEq)]
pub struct VectorSnapshot {
    pub column: String,
    pub geometry_label: String,
    /// Dominant kind found in the column data.
    pub wkb_type: GeometryKind,
    pub dimension: Option<i64>,
    pub srid: Option<i64>,
    pub spatial_ref_name: Option<String>,
    pub estimated_extent: Option<Extent>,
    /// Computed on request only; scanning the column can be slow.
    pub extent: Option<Extent>,
    pub has_spatial_index: bool,
    pub is_view: bool,
}

impl VectorSnapshot {
    /// `None` for entries without a geometry column.
    pub fn collect(
        connector: &OracleConnector,
        entry: &TableEntry,
        compute_extent: bool,
    ) -> Result<Option<Self>> {
        let vector = match entry.vector() {
            Some(vector) => vector,
            None => return Ok(None),
        };
        let table = entry.table_ref();
        let column = vector.geometry_column.as_str();
        let has_spatial_index = connector
            .table_indexes(&table)?
            .iter()
            .any(|idx| idx.is_spatial && idx.column.eq_ignore_ascii_case(column));
        Ok(Some(Self {
            column: column.to_string(),
            geometry_label: vector.geometry_label.clone(),
            wkb_type: connector.table_main_geom_kind(&table.quoted(), column),
            dimension: vector.dimension,
            srid: vector.srid,
            spatial_ref_name: vector.srid.and_then(|srid| connector.spatial_ref_name(srid)),
            estimated_extent: if entry.is_view {
                None
            } else {
                connector.table_estimated_extent(&table, column)
            },
            extent: if compute_extent {
                connector.table_extent(&table, column)
            } else {
                None
            },
            has_spatial_index,
            is_view: entry.is_view,
        }))
    }

    fn spatial_ref(&self) -> Option<String> {
        match self.srid {
            None => Some("Undefined".to_string()),
            Some(srid) => self
                .spatial_ref_name
                .as_ref()
                .map(|name| format!("{} ({})", name, srid)),
        }
    }

    pub fn extent_outdated(&self) -> bool {
        match (&self.extent, &self.estimated_extent) {
            (Some(real), Some(registered)) => real != registered,
            _ => false,
        }
    }
}

pub fn spatial_info(vector: &VectorSnapshot) -> Vec<HtmlElem> {
    let mut rows: Vec<(&str, HtmlTableCol)> = vec![
        ("Column:", vector.column.as_str().into()),
        ("Geometry:", vector.geometry_label.as_str().into()),
        ("Geometry type:", vector.wkb_type.display_name().into()),
    ];
    if let Some(dimension) = vector.dimension.filter(|dim| *dim > 0) {
        rows.push(("Dimension:", dimension.into()));
    }
    if let Some(spatial_ref) = vector.spatial_ref() {
        rows.push(("Spatial ref:", spatial_ref.into()));
    }
    if !vector.is_view {
        if let Some(estimated) = &vector.estimated_extent {
            rows.push(("Estimated extent:", estimated.display().into()));
        }
    }
    let extent: HtmlTableCol = match &vector.extent {
        Some(extent) => extent.display().into(),
        None => markup("(unknown) (<a href=\"action:extent/get\">find out</a>)").into(),
    };
    rows.push(("Extent:", extent));

    let mut ret = vec![HtmlElem::from(HtmlTable::key_values(rows))];

    if vector.extent_outdated() {
        ret.push(HtmlElem::warning(
            "Metadata extent is different from real extent. \
             You should <a href=\"action:extent/update\">update it</a> !",
        ));
    }
    if vector.geometry_label.eq_ignore_ascii_case("geometry") {
        ret.push(HtmlElem::warning("There isn't entry in geometry_columns!"));
    }
    if !vector.is_view && !vector.has_spatial_index {
        ret.push(HtmlElem::warning(
            "No spatial index defined (<a href=\"action:spatialindex/create\">create it</a>)",
        ));
    }
    ret
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::info::html::render;

    fn snapshot() -> VectorSnapshot {
        VectorSnapshot {
            column: "GEOM".to_string(),
            geometry_label: "LINESTRING".to_string(),
            wkb_type: GeometryKind::MultiLineString,
            dimension: Some(2),
            srid: Some(4326),
            spatial_ref_name: Some("WGS 84".to_string()),
            estimated_extent: Some(Extent { xmin: -180.0, ymin: -90.0, xmax: 180.0, ymax: 90.0 }),
            extent: None,
            has_spatial_index: true,
            is_view: false,
        }
    }

    #[test]
    fn test_spatial_rows() {
        let html = render(&spatial_info(&snapshot()));
        assert!(html.contains("<td>Geometry type:</td><td>MultiLineString</td>"));
        assert!(html.contains("<td>Spatial ref:</td><td>WGS 84 (4326)</td>"));
        assert!(html.contains("<td>Estimated extent:</td><td>-180.00000, -90.00000 - 180.00000, 90.00000</td>"));
        assert!(html.contains("<a href=\"action:extent/get\">find out</a>"));
        assert!(!html.contains("Warning"));
    }

    #[test]
    fn test_outdated_extent_warning() {
        let mut vector = snapshot();
        vector.extent = vector.estimated_extent;
        assert!(!vector.extent_outdated());

        vector.extent = Some(Extent { xmin: 1.0, ymin: 2.0, xmax: 3.0, ymax: 4.0 });
        let html = render(&spatial_info(&vector));
        assert!(html.contains("<td>Extent:</td><td>1.00000, 2.00000 - 3.00000, 4.00000</td>"));
        assert!(html.contains("action:extent/update"));
    }

    #[test]
    fn test_missing_srid_and_index() {
        let mut vector = snapshot();
        vector.srid = None;
        vector.spatial_ref_name = None;
        vector.geometry_label = "GEOMETRY".to_string();
        vector.has_spatial_index = false;
        let html = render(&spatial_info(&vector));
        assert!(html.contains("<td>Spatial ref:</td><td>Undefined</td>"));
        assert!(html.contains("Warning:</span> There isn't entry in geometry_columns!"));
        assert!(html.contains("action:spatialindex/create"));

        vector.is_view = true;
        let html = render(&spatial_info(&vector));
        assert!(!html.contains("spatialindex"));
        assert!(!html.contains("Estimated extent"));
    }
}
