use super::*;

fn kinds(codes: &[i64]) -> Vec<GeometryKind> {
    resolve_distinct_kinds(codes.iter().copied())
}

fn observation(code: i64, count: i64) -> GeometryObservation {
    GeometryObservation::new(code, Some(count))
}

#[test]
fn test_each_known_code_maps_to_one_kind() {
    let expected: [(i64, GeometryKind); 6] = [
        (2001, GeometryKind::Point),
        (2002, GeometryKind::LineString),
        (2003, GeometryKind::Polygon),
        (2005, GeometryKind::MultiPoint),
        (2006, GeometryKind::MultiLineString),
        (2007, GeometryKind::MultiPolygon),
    ];
    for (code, kind) in expected {
        assert_eq!(kinds(&[code]), vec![kind], "code {code}");
    }
}

#[test]
fn test_empty_codes_resolve_to_unknown() {
    assert_eq!(
        kinds(&[]),
        vec![GeometryKind::Unknown]
    );
}

#[test]
fn test_unrecognised_code_resolves_to_unknown() {
    assert_eq!(kinds(&[9999]), vec![GeometryKind::Unknown]);
    // 3D and collection codes are not part of the table either
    assert_eq!(
        kinds(&[3001, 2004]),
        vec![GeometryKind::Unknown]
    );
}

#[test]
fn test_unrecognised_code_is_dropped_next_to_known_ones() {
    assert_eq!(
        kinds(&[2001, 9999]),
        vec![GeometryKind::Point]
    );
}

#[test]
fn test_polygon_with_multipolygon_keeps_multi_only() {
    assert_eq!(
        kinds(&[2003, 2007]),
        vec![GeometryKind::MultiPolygon]
    );
}

#[test]
fn test_merge_applies_to_every_family() {
    let resolved = kinds(&[2001, 2002, 2003, 2005, 2006, 2007]);
    assert_eq!(
        resolved,
        vec![
            GeometryKind::MultiPoint,
            GeometryKind::MultiLineString,
            GeometryKind::MultiPolygon,
        ]
    );
}

#[test]
fn test_unrelated_kinds_stay_separate_in_input_order() {
    assert_eq!(
        kinds(&[2001, 2003]),
        vec![GeometryKind::Point, GeometryKind::Polygon]
    );
    assert_eq!(
        kinds(&[2003, 2001]),
        vec![GeometryKind::Polygon, GeometryKind::Point]
    );
}

#[test]
fn test_multipoint_next_to_polygon_is_not_merged() {
    assert_eq!(
        kinds(&[2003, 2005]),
        vec![GeometryKind::Polygon, GeometryKind::MultiPoint]
    );
}

#[test]
fn test_duplicate_codes_are_collapsed() {
    assert_eq!(
        kinds(&[2002, 2002, 2002]),
        vec![GeometryKind::LineString]
    );
}

#[test]
fn test_distinct_kinds_is_stable_across_runs() {
    let codes: [i64; 5] = [2001, 2003, 2006, 2002, 4242];
    let first = resolve_distinct_kinds(codes);
    let second = resolve_distinct_kinds(codes.iter().map(|code| GeometryTypeCode(*code)));
    assert_eq!(first, second);
    assert_eq!(merge_kinds(&first), first);
}

#[test]
fn test_dominant_without_observations_is_unknown() {
    let none: Vec<GeometryObservation> = Vec::new();
    assert_eq!(resolve_dominant_kind(&none), GeometryKind::Unknown);
}

#[test]
fn test_dominant_all_zero_is_unknown() {
    let observations = [
        observation(2001, 0),
        GeometryObservation::new(2003, None),
    ];
    assert_eq!(resolve_dominant_kind(&observations), GeometryKind::Unknown);
}

#[test]
fn test_dominant_point_is_upgraded_when_multipoint_exists() {
    let observations = [observation(2001, 10), observation(2005, 1)];
    assert_eq!(resolve_dominant_kind(&observations), GeometryKind::MultiPoint);
}

#[test]
fn test_dominant_polygon_without_multi_rows_stays_simple() {
    let observations = [observation(2003, 5), observation(2007, 0)];
    assert_eq!(resolve_dominant_kind(&observations), GeometryKind::Polygon);
}

#[test]
fn test_dominant_tie_prefers_earlier_bucket() {
    let observations = [observation(2002, 3), observation(2001, 3)];
    assert_eq!(resolve_dominant_kind(&observations), GeometryKind::Point);
}

#[test]
fn test_dominant_multi_champion_is_returned_directly() {
    let observations = [observation(2006, 7), observation(2002, 2)];
    assert_eq!(
        resolve_dominant_kind(&observations),
        GeometryKind::MultiLineString
    );
}

#[test]
fn test_dominant_ignores_unknown_codes() {
    let observations = [observation(9999, 1_000), observation(2003, 1)];
    assert_eq!(resolve_dominant_kind(&observations), GeometryKind::Polygon);
}

#[test]
fn test_dominant_upgrade_only_looks_at_same_family() {
    let observations = [observation(2001, 10), observation(2007, 4)];
    assert_eq!(resolve_dominant_kind(&observations), GeometryKind::Point);
}

#[test]
fn test_wkb_type_round_trips_through_kind() {
    for kind in GeometryKind::ALL {
        assert_eq!(GeometryKind::from_wkb_type(kind.wkb_type()), kind);
    }
    assert_eq!(GeometryKind::from_wkb_type(17), GeometryKind::Unknown);
}

#[test]
fn test_base_labels_group_families() {
    assert_eq!(GeometryKind::MultiPoint.base_label(), "POINT");
    assert_eq!(GeometryKind::LineString.base_label(), "LINESTRING");
    assert_eq!(GeometryKind::MultiPolygon.base_label(), "POLYGON");
    assert_eq!(GeometryKind::Unknown.base_label(), "UNKNOWN");
}

#[test]
fn test_fan_out_pairs_each_kind_with_its_srid() {
    let observed = [
        (GeometryKind::Polygon, Some(2154)),
        (GeometryKind::Point, Some(4326)),
        (GeometryKind::MultiPolygon, Some(3857)),
    ];
    let facets = fan_out(&observed);
    assert_eq!(
        facets,
        vec![
            ColumnGeometry {
                kind: GeometryKind::Point,
                srid: Some(4326)
            },
            ColumnGeometry {
                kind: GeometryKind::MultiPolygon,
                srid: Some(3857)
            },
        ]
    );
    assert_eq!(facets[1].label(), "POLYGON");
    assert_eq!(facets[1].wkb_type(), 6);
}

#[test]
fn test_fan_out_of_nothing_yields_single_unknown_facet() {
    let facets = fan_out_uniform(&[], Some(4326));
    assert_eq!(
        facets,
        vec![ColumnGeometry {
            kind: GeometryKind::Unknown,
            srid: Some(4326)
        }]
    );
}

#[test]
fn test_fan_out_uniform_shares_srid() {
    let facets = fan_out_uniform(
        &[GeometryKind::LineString, GeometryKind::Point],
        Some(27700),
    );
    assert_eq!(facets.len(), 2);
    assert!(facets.iter().all(|facet| facet.srid == Some(27700)));
}

#[test]
fn test_fan_out_uniform_merges_before_sharing_srid() {
    let facets = fan_out_uniform(
        &[
            GeometryKind::Polygon,
            GeometryKind::Unknown,
            GeometryKind::MultiPolygon,
            GeometryKind::Point,
        ],
        None,
    );
    assert_eq!(
        facets,
        vec![
            ColumnGeometry { kind: GeometryKind::MultiPolygon, srid: None },
            ColumnGeometry { kind: GeometryKind::Point, srid: None },
        ]
    );
}

#[test]
fn test_multi_variant_only_for_simple_kinds() {
    assert_eq!(GeometryKind::Point.multi_variant(), Some(GeometryKind::MultiPoint));
    assert_eq!(GeometryKind::LineString.multi_variant(), Some(GeometryKind::MultiLineString));
    assert_eq!(GeometryKind::Polygon.multi_variant(), Some(GeometryKind::MultiPolygon));
    for kind in [
        GeometryKind::MultiPoint,
        GeometryKind::MultiLineString,
        GeometryKind::MultiPolygon,
        GeometryKind::Unknown,
    ] {
        assert_eq!(kind.multi_variant(), None);
    }
}

#[test]
fn test_dominant_treats_missing_count_as_zero() {
    let observations = [
        GeometryObservation::new(2003, None),
        observation(2002, 1),
    ];
    assert_eq!(resolve_dominant_kind(observations.iter()), GeometryKind::LineString);
}
