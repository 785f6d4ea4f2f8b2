//! ESRI shapefile zone layers.
//!
//! Polygon records (plain, `M` and `Z`) are read with their dBase attribute
//! row; every other shape type is skipped.

use std::path::Path;

use geo::{Contains, Coord, LineString, MultiPolygon, Point, Polygon};
use shapefile::dbase::{FieldValue, Record};
use shapefile::{PolygonRing, Reader, Shape};
use tracing::warn;

use crate::error::IoError;
use crate::geojson::ZoneShape;

/// Read the polygon records of the shapefile at `path` with the zone code
/// stored in the `attribute` column.
///
/// A record whose attribute is missing, null or not an integer is an error.
pub(crate) fn read(path: &Path, attribute: &str) -> Result<Vec<ZoneShape>, IoError> {
    let err = |reason: String| IoError::Shapefile {
        path: path.to_path_buf(),
        reason,
    };

    let mut reader = Reader::from_path(path).map_err(|e| err(e.to_string()))?;
    let mut shapes = Vec::new();
    for (i, item) in reader.iter_shapes_and_records().enumerate() {
        let (shape, record) = item.map_err(|e| err(format!("record {i}: {e}")))?;
        let shape = match shape {
            Shape::Polygon(p) => multipolygon(p.rings(), |pt| (pt.x, pt.y)),
            Shape::PolygonM(p) => multipolygon(p.rings(), |pt| (pt.x, pt.y)),
            Shape::PolygonZ(p) => multipolygon(p.rings(), |pt| (pt.x, pt.y)),
            other => {
                warn!(record = i, shape_type = ?other.shapetype(), "skipping non-polygon record");
                continue;
            }
        };
        let zone =
            record_zone(&record, attribute).map_err(|r| err(format!("record {i}: {r}")))?;
        shapes.push(ZoneShape { shape, zone });
    }
    Ok(shapes)
}

/// Group shapefile rings into polygons. Each inner ring becomes a hole of the
/// outer ring containing its first vertex, or of the latest outer ring.
fn multipolygon<P>(rings: &[PolygonRing<P>], xy: impl Fn(&P) -> (f64, f64)) -> MultiPolygon<f64> {
    let ring = |points: &[P]| {
        LineString::new(
            points
                .iter()
                .map(|p| {
                    let (x, y) = xy(p);
                    Coord { x, y }
                })
                .collect(),
        )
    };

    let mut polygons: Vec<(LineString<f64>, Vec<LineString<f64>>)> = Vec::new();
    for r in rings {
        match r {
            PolygonRing::Outer(points) => polygons.push((ring(points), Vec::new())),
            PolygonRing::Inner(points) => {
                let hole = ring(points);
                let owner = hole.0.first().and_then(|&first| {
                    polygons.iter().rposition(|(outer, _)| {
                        Polygon::new(outer.clone(), Vec::new()).contains(&Point::from(first))
                    })
                });
                match owner.or(polygons.len().checked_sub(1)) {
                    Some(idx) => polygons[idx].1.push(hole),
                    // A hole with no outer ring is kept as an outline.
                    None => polygons.push((hole, Vec::new())),
                }
            }
        }
    }
    MultiPolygon::new(
        polygons
            .into_iter()
            .map(|(outer, holes)| Polygon::new(outer, holes))
            .collect(),
    )
}

fn record_zone(record: &Record, attribute: &str) -> Result<i64, String> {
    let value = record
        .get(attribute)
        .ok_or_else(|| format!("no '{attribute}' field"))?;
    field_zone(value).ok_or_else(|| format!("'{attribute}' value {value:?} is not an integer"))
}

/// Accept integer fields, integral numeric fields and numeric text.
fn field_zone(value: &FieldValue) -> Option<i64> {
    let integral = |f: f64| (f.is_finite() && f.fract() == 0.0).then_some(f as i64);
    match value {
        FieldValue::Integer(i) => Some(i64::from(*i)),
        FieldValue::Numeric(Some(f)) | FieldValue::Double(f) => integral(*f),
        FieldValue::Float(Some(f)) => integral(f64::from(*f)),
        FieldValue::Character(Some(s)) => s.trim().parse().ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_values_to_zone_codes() {
        assert_eq!(field_zone(&FieldValue::Integer(4)), Some(4));
        assert_eq!(field_zone(&FieldValue::Numeric(Some(12.0))), Some(12));
        assert_eq!(field_zone(&FieldValue::Numeric(Some(1.5))), None);
        assert_eq!(field_zone(&FieldValue::Numeric(None)), None);
        assert_eq!(field_zone(&FieldValue::Character(Some(" 7 ".into()))), Some(7));
        assert_eq!(field_zone(&FieldValue::Logical(Some(true))), None);
    }

    #[test]
    fn holes_attach_to_their_outer_ring() {
        let square = |x0: f64, y0: f64, size: f64| {
            vec![
                (x0, y0),
                (x0, y0 + size),
                (x0 + size, y0 + size),
                (x0 + size, y0),
                (x0, y0),
            ]
        };
        let rings = vec![
            PolygonRing::Outer(square(0.0, 0.0, 10.0)),
            PolygonRing::Outer(square(20.0, 0.0, 10.0)),
            PolygonRing::Inner(square(2.0, 2.0, 2.0)),
        ];
        let shape = multipolygon(&rings, |&(x, y)| (x, y));

        assert_eq!(shape.0.len(), 2);
        assert_eq!(shape.0[0].interiors().len(), 1);
        assert!(shape.0[1].interiors().is_empty());
        assert!(!shape.contains(&Point::new(3.0, 3.0)));
        assert!(shape.contains(&Point::new(8.0, 8.0)));
    }

    #[test]
    fn missing_field_is_reported() {
        let mut record = Record::default();
        record.insert("NAME".to_string(), FieldValue::Character(Some("upper".into())));
        let reason = record_zone(&record, "BASIN_INDX").expect_err("missing field");
        assert!(reason.contains("no 'BASIN_INDX' field"));
    }
}
