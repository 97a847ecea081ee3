use serde::{Deserialize, Serialize};
use std::fmt;

/// Raw SDO_GTYPE value as reported by the catalog.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GeometryTypeCode(pub i64);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum GeometryKind {
    #[default]
    Unknown,
    Point,
    LineString,
    Polygon,
    MultiPoint,
    MultiLineString,
    MultiPolygon,
}

/// One distinct code seen in a geometry column, optionally with the number
/// of rows sharing it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GeometryObservation {
    pub code: GeometryTypeCode,
    pub occurrence_count: Option<i64>,
}

/// SDO_GTYPE codes of two-dimensional simple features.
const CODE_TABLE: &[(i64, GeometryKind)] = &[
    (2001, GeometryKind::Point),
    (2002, GeometryKind::LineString),
    (2003, GeometryKind::Polygon),
    (2005, GeometryKind::MultiPoint),
    (2006, GeometryKind::MultiLineString),
    (2007, GeometryKind::MultiPolygon),
];

impl GeometryTypeCode {
    pub fn kind(self) -> GeometryKind {
        CODE_TABLE
            .iter()
            .find(|(code, _)| *code == self.0)
            .map(|(_, kind)| *kind)
            .unwrap_or(GeometryKind::Unknown)
    }
}

impl From<i64> for GeometryTypeCode {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl GeometryKind {
    pub const ALL: [GeometryKind; 7] = [
        GeometryKind::Unknown,
        GeometryKind::Point,
        GeometryKind::LineString,
        GeometryKind::Polygon,
        GeometryKind::MultiPoint,
        GeometryKind::MultiLineString,
        GeometryKind::MultiPolygon,
    ];

    /// Numeric WKB geometry type, as understood by layer providers.
    pub fn wkb_type(self) -> i64 {
        match self {
            GeometryKind::Unknown => 0,
            GeometryKind::Point => 1,
            GeometryKind::LineString => 2,
            GeometryKind::Polygon => 3,
            GeometryKind::MultiPoint => 4,
            GeometryKind::MultiLineString => 5,
            GeometryKind::MultiPolygon => 6,
        }
    }

    pub fn from_wkb_type(value: i64) -> Self {
        Self::ALL
            .iter()
            .copied()
            .find(|kind| kind.wkb_type() == value)
            .unwrap_or(GeometryKind::Unknown)
    }

    /// Multi counterpart of a simple kind; `None` for multi kinds and Unknown.
    pub fn multi_variant(self) -> Option<GeometryKind> {
        match self {
            GeometryKind::Point => Some(GeometryKind::MultiPoint),
            GeometryKind::LineString => Some(GeometryKind::MultiLineString),
            GeometryKind::Polygon => Some(GeometryKind::MultiPolygon),
            _ => None,
        }
    }

    /// Shape family label used in table listings.
    pub fn base_label(self) -> &'static str {
        match self {
            GeometryKind::Point | GeometryKind::MultiPoint => "POINT",
            GeometryKind::LineString | GeometryKind::MultiLineString => "LINESTRING",
            GeometryKind::Polygon | GeometryKind::MultiPolygon => "POLYGON",
            GeometryKind::Unknown => "UNKNOWN",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            GeometryKind::Unknown => "Unknown",
            GeometryKind::Point => "Point",
            GeometryKind::LineString => "LineString",
            GeometryKind::Polygon => "Polygon",
            GeometryKind::MultiPoint => "MultiPoint",
            GeometryKind::MultiLineString => "MultiLineString",
            GeometryKind::MultiPolygon => "MultiPolygon",
        }
    }
}

impl fmt::Display for GeometryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl GeometryObservation {
    pub fn new(code: i64, occurrence_count: Option<i64>) -> Self {
        Self {
            code: GeometryTypeCode(code),
            occurrence_count,
        }
    }

    pub fn count(&self) -> i64 {
        self.occurrence_count.unwrap_or(0).max(0)
    }
}
