use crate::db::OracleConnector;

use super::html::{HtmlElem, HtmlSection, HtmlTable};

/// Connection facts shown on the database page.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DatabaseSnapshot {
    pub host: String,
    pub user: String,
    pub has_cache: bool,
    /// `None` when Oracle Spatial is missing or its version cannot be read.
    pub spatial_version: Option<String>,
    pub has_geometry_columns: bool,
}

impl DatabaseSnapshot {
    pub fn collect(connector: &OracleConnector) -> Self {
        Self {
            host: connector.connection_info().host.clone(),
            user: connector.user().to_string(),
            has_cache: connector.has_cache(),
            spatial_version: connector.spatial_info(),
            has_geometry_columns: connector.has_geometry_columns(),
        }
    }
}

pub fn connection_details(db: &DatabaseSnapshot) -> HtmlTable {
    HtmlTable::key_values(vec![
        ("Host:", db.host.as_str().into()),
        ("User:", db.user.as_str().into()),
        (
            "List tables cache:",
            if db.has_cache { "Enabled" } else { "Unavailable" }.into(),
        ),
    ])
}

pub fn spatial_info(db: &DatabaseSnapshot) -> Option<Vec<HtmlElem>> {
    let version = db.spatial_version.as_deref()?;
    let mut ret = vec![HtmlElem::from(HtmlTable::key_values(vec![(
        "Oracle Spatial:",
        version.into(),
    )]))];
    if !db.has_geometry_columns {
        ret.push(HtmlElem::warning(
            "ALL_SDO_GEOM_METADATA view doesn't exist!\n\
             This view is essential for many GIS applications for enumeration of tables.",
        ));
    }
    Some(ret)
}

pub fn database_info(db: &DatabaseSnapshot) -> Vec<HtmlElem> {
    let mut ret = vec![HtmlSection::new("Connection details", vec![connection_details(db).into()]).into()];
    if let Some(spatial) = spatial_info(db) {
        ret.push(HtmlSection::new("Oracle Spatial", spatial).into());
    }
    ret
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::info::html::render;

    fn snapshot() -> DatabaseSnapshot {
        DatabaseSnapshot {
            host: "db.example".to_string(),
            user: "SCOTT".to_string(),
            has_cache: true,
            spatial_version: Some("19.0.0.0.0".to_string()),
            has_geometry_columns: true,
        }
    }

    #[test]
    fn test_connection_details() {
        let html = connection_details(&snapshot()).to_html();
        assert!(html.contains("<td>Host:</td><td>db.example</td>"));
        assert!(html.contains("<td>List tables cache:</td><td>Enabled</td>"));
    }

    #[test]
    fn test_spatial_section_absent_without_spatial() {
        let db = DatabaseSnapshot {
            spatial_version: None,
            ..snapshot()
        };
        assert!(spatial_info(&db).is_none());
        assert_eq!(database_info(&db).len(), 1);
    }

    #[test]
    fn test_missing_metadata_view_warning() {
        let db = DatabaseSnapshot {
            has_geometry_columns: false,
            ..snapshot()
        };
        let html = render(&database_info(&db));
        assert!(html.contains("<td>Oracle Spatial:</td><td>19.0.0.0.0</td>"));
        assert!(html.contains("ALL_SDO_GEOM_METADATA view doesn't exist!<br>"));

        let html = render(&database_info(&snapshot()));
        assert!(!html.contains("doesn't exist"));
    }
}
