use super::types::{GeometryKind, GeometryObservation, GeometryTypeCode};

/// Buckets scored by [`resolve_dominant_kind`], in tie-break order.
const DOMINANT_BUCKETS: [GeometryKind; 6] = [
    GeometryKind::Point,
    GeometryKind::MultiPoint,
    GeometryKind::LineString,
    GeometryKind::MultiLineString,
    GeometryKind::Polygon,
    GeometryKind::MultiPolygon,
];

/// Canonical kinds exposed for a geometry column, given the distinct codes
/// the catalog reported for it (in catalog order).
///
/// A simple kind is dropped whenever its multi counterpart is also present,
/// so a column mixing `Polygon` and `MultiPolygon` is listed once as
/// `MultiPolygon`. Other combinations stay separate entries. Unrecognised
/// codes, or no codes at all, resolve to `[Unknown]`.
pub fn resolve_distinct_kinds<I>(codes: I) -> Vec<GeometryKind>
where
    I: IntoIterator,
    I::Item: Into<GeometryTypeCode>,
{
    let kinds: Vec<GeometryKind> = codes.into_iter().map(|code| code.into().kind()).collect();
    merge_kinds(&kinds)
}

/// Dedupes already-mapped kinds and applies the multi/simple merge rule used
/// by [`resolve_distinct_kinds`]. Never returns an empty list.
pub fn merge_kinds(kinds: &[GeometryKind]) -> Vec<GeometryKind> {
    let mut mapped: Vec<GeometryKind> = Vec::new();
    for kind in kinds.iter().copied() {
        if kind != GeometryKind::Unknown && !mapped.contains(&kind) {
            mapped.push(kind);
        }
    }

    let merged: Vec<GeometryKind> = mapped
        .iter()
        .copied()
        .filter(|kind| match kind.multi_variant() {
            Some(multi) => !mapped.contains(&multi),
            None => true,
        })
        .collect();

    if merged.is_empty() {
        return vec![GeometryKind::Unknown];
    }
    merged
}

/// Single kind used to label a column, chosen by row frequency.
///
/// The most frequent bucket wins (earlier bucket on ties). A simple winner is
/// promoted to its multi variant as soon as any multi geometry of the same
/// family exists.
pub fn resolve_dominant_kind<'a, I>(observations: I) -> GeometryKind
where
    I: IntoIterator<Item = &'a GeometryObservation>,
{
    let mut scores = [0i64; DOMINANT_BUCKETS.len()];
    for observation in observations {
        let kind = observation.code.kind();
        if let Some(slot) = DOMINANT_BUCKETS.iter().position(|bucket| *bucket == kind) {
            scores[slot] = scores[slot].saturating_add(observation.count());
        }
    }

    let score_of = |kind: GeometryKind| -> i64 {
        DOMINANT_BUCKETS
            .iter()
            .position(|bucket| *bucket == kind)
            .map(|slot| scores[slot])
            .unwrap_or(0)
    };

    let mut champion: Option<(GeometryKind, i64)> = None;
    for (slot, kind) in DOMINANT_BUCKETS.iter().enumerate() {
        let score = scores[slot];
        match champion {
            Some((_, best)) if score <= best => {}
            _ if score > 0 => champion = Some((*kind, score)),
            _ => {}
        }
    }

    let Some((kind, _)) = champion else {
        return GeometryKind::Unknown;
    };

    match kind.multi_variant() {
        Some(multi) if score_of(multi) > 0 => multi,
        _ => kind,
    }
}
