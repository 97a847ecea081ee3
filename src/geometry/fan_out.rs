use super::resolver::merge_kinds;
use super::types::GeometryKind;

/// Geometry facet of one listing entry after fan-out.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ColumnGeometry {
    pub kind: GeometryKind,
    pub srid: Option<i64>,
}

impl ColumnGeometry {
    pub fn label(&self) -> &'static str {
        self.kind.base_label()
    }

    pub fn wkb_type(&self) -> i64 {
        self.kind.wkb_type()
    }
}

/// Splits one geometry column into one facet per surviving kind.
///
/// `observed` holds every raw kind seen for the column together with the
/// SRID recorded for it. Each surviving kind is paired with the SRID of the
/// first observation that produced it; the `[Unknown]` fallback keeps the
/// first SRID seen, if any.
pub fn fan_out(observed: &[(GeometryKind, Option<i64>)]) -> Vec<ColumnGeometry> {
    let kinds: Vec<GeometryKind> = observed.iter().map(|(kind, _)| *kind).collect();
    let fallback_srid = observed.first().and_then(|(_, srid)| *srid);

    merge_kinds(&kinds)
        .into_iter()
        .map(|kind| {
            let srid = observed
                .iter()
                .find(|(candidate, _)| *candidate == kind)
                .map(|(_, srid)| *srid)
                .unwrap_or(fallback_srid);
            ColumnGeometry { kind, srid }
        })
        .collect()
}

/// Same as [`fan_out`] for a column whose kinds all share one SRID, which is
/// the case for live catalog listings (SRID comes from the metadata view).
pub fn fan_out_uniform(kinds: &[GeometryKind], srid: Option<i64>) -> Vec<ColumnGeometry> {
    merge_kinds(kinds)
        .into_iter()
        .map(|kind| ColumnGeometry { kind, srid })
        .collect()
}
