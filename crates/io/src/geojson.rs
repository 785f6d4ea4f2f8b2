//! GeoJSON zone layers.
//!
//! Only the parts of RFC 7946 needed to burn zones are modelled: a
//! `FeatureCollection` of features whose geometry is a `Polygon` or
//! `MultiPolygon` and whose properties carry an integer zone code.

use std::path::Path;

use geo::{Coord, LineString, MultiPolygon, Polygon};
use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::warn;

use crate::error::IoError;

#[derive(Debug, Deserialize)]
struct FeatureCollection {
    #[serde(rename = "type")]
    type_: String,
    features: Vec<Feature>,
}

#[derive(Debug, Deserialize)]
struct Feature {
    geometry: Option<Geometry>,
    #[serde(default)]
    properties: Option<Map<String, Value>>,
}

type Ring = Vec<Vec<f64>>;

#[derive(Debug, Deserialize)]
#[serde(tag = "type")]
enum Geometry {
    Polygon { coordinates: Vec<Ring> },
    MultiPolygon { coordinates: Vec<Vec<Ring>> },
    #[serde(other)]
    Other,
}

/// One zone polygon with its code, in file order.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ZoneShape {
    pub shape: MultiPolygon<f64>,
    pub zone: i64,
}

/// Parse a GeoJSON FeatureCollection into zone shapes.
///
/// Features without geometry or with non-polygonal geometry are skipped with
/// a warning. A feature whose `attribute` is missing or not an integer is an
/// error.
pub(crate) fn parse(text: &str, attribute: &str, path: &Path) -> Result<Vec<ZoneShape>, IoError> {
    let err = |reason: String| IoError::GeoJson {
        path: path.to_path_buf(),
        reason,
    };

    let collection: FeatureCollection =
        serde_json::from_str(text).map_err(|e| err(e.to_string()))?;
    if collection.type_ != "FeatureCollection" {
        return Err(err(format!(
            "expected a FeatureCollection, found '{}'",
            collection.type_
        )));
    }

    let mut shapes = Vec::with_capacity(collection.features.len());
    for (i, feature) in collection.features.into_iter().enumerate() {
        let shape = match feature.geometry {
            Some(Geometry::Polygon { coordinates }) => MultiPolygon::new(vec![
                polygon(&coordinates).map_err(|r| err(format!("feature {i}: {r}")))?,
            ]),
            Some(Geometry::MultiPolygon { coordinates }) => MultiPolygon::new(
                coordinates
                    .iter()
                    .map(|rings| polygon(rings))
                    .collect::<Result<_, _>>()
                    .map_err(|r| err(format!("feature {i}: {r}")))?,
            ),
            Some(Geometry::Other) | None => {
                warn!(feature = i, "skipping feature without polygon geometry");
                continue;
            }
        };

        let value = feature
            .properties
            .as_ref()
            .and_then(|p| p.get(attribute))
            .ok_or_else(|| err(format!("feature {i} has no '{attribute}' property")))?;
        let zone = zone_code(value).ok_or_else(|| {
            err(format!("feature {i}: '{attribute}' value {value} is not an integer"))
        })?;

        shapes.push(ZoneShape { shape, zone });
    }
    Ok(shapes)
}

fn polygon(rings: &[Ring]) -> Result<Polygon<f64>, String> {
    let mut rings = rings.iter().map(|ring| line_string(ring));
    let exterior = rings.next().ok_or("polygon has no exterior ring")??;
    let interiors = rings.collect::<Result<Vec<_>, _>>()?;
    Ok(Polygon::new(exterior, interiors))
}

fn line_string(ring: &Ring) -> Result<LineString<f64>, String> {
    ring.iter()
        .map(|position| match position.as_slice() {
            [x, y, ..] => Ok(Coord { x: *x, y: *y }),
            _ => Err(format!("position {position:?} has fewer than two coordinates")),
        })
        .collect::<Result<Vec<_>, _>>()
        .map(LineString::new)
}

/// Accept integer numbers, integral floats and numeric strings.
fn zone_code(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as i64)),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
