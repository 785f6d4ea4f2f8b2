//! Burning zone polygons onto grid cell centres.

use geo::{BoundingRect, Contains, MultiPolygon, Point};
use ndarray::Array2;
use tracing::debug;

use crate::reader::GridGeometry;

/// Code given to cells not covered by any polygon.
pub const DEFAULT_FILL: i64 = -9999;

/// Rasterize `(shape, zone)` pairs onto the cell centres of `geometry`.
///
/// A cell takes the zone of the last shape containing its centre; cells no
/// shape contains keep `fill`. Centres exactly on a polygon boundary are not
/// contained.
pub fn rasterize(
    shapes: &[(MultiPolygon<f64>, i64)],
    geometry: &GridGeometry,
    fill: i64,
) -> Array2<i64> {
    let [ny, nx] = geometry.shape();
    let mut codes = Array2::from_elem((ny, nx), fill);

    for (shape, zone) in shapes {
        let Some(bbox) = shape.bounding_rect() else {
            continue;
        };
        let (min, max) = (bbox.min(), bbox.max());
        let cols: Vec<usize> = geometry
            .x()
            .iter()
            .enumerate()
            .filter(|(_, x)| (min.x..=max.x).contains(*x))
            .map(|(c, _)| c)
            .collect();
        if cols.is_empty() {
            continue;
        }

        let mut burned = 0usize;
        for (r, y) in geometry.y().iter().enumerate() {
            if !(min.y..=max.y).contains(y) {
                continue;
            }
            for &c in &cols {
                if shape.contains(&Point::new(geometry.x()[c], *y)) {
                    codes[[r, c]] = *zone;
                    burned += 1;
                }
            }
        }
        debug!(zone, burned, "rasterized zone");
    }
    codes
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::{polygon, MultiPolygon};

    fn square(x0: f64, y0: f64, x1: f64, y1: f64) -> MultiPolygon<f64> {
        MultiPolygon::new(vec![polygon![
            (x: x0, y: y0),
            (x: x1, y: y0),
            (x: x1, y: y1),
            (x: x0, y: y1),
            (x: x0, y: y0),
        ]])
    }

    /// 3 x 4 grid with unit cells, north row first.
    fn geometry() -> GridGeometry {
        GridGeometry::new(vec![0.5, 1.5, 2.5, 3.5], vec![2.5, 1.5, 0.5])
    }

    #[test]
    fn burns_cell_centres() {
        let shapes = vec![(square(0.0, 0.0, 2.0, 3.0), 1), (square(2.0, 0.0, 4.0, 1.0), 2)];
        let codes = rasterize(&shapes, &geometry(), DEFAULT_FILL);
        assert_eq!(
            codes,
            ndarray::array![
                [1, 1, -9999, -9999],
                [1, 1, -9999, -9999],
                [1, 1, 2, 2],
            ]
        );
    }

    #[test]
    fn last_shape_wins() {
        let shapes = vec![(square(0.0, 0.0, 4.0, 3.0), 1), (square(1.0, 1.0, 2.0, 2.0), 5)];
        let codes = rasterize(&shapes, &geometry(), 0);
        assert_eq!(codes[[1, 1]], 5);
        assert_eq!(codes[[0, 0]], 1);
        assert_eq!(codes.iter().filter(|&&z| z == 5).count(), 1);
    }

    #[test]
    fn shapes_outside_grid_leave_fill() {
        let shapes = vec![(square(10.0, 10.0, 11.0, 11.0), 3)];
        let codes = rasterize(&shapes, &geometry(), -1);
        assert!(codes.iter().all(|&z| z == -1));
    }

    #[test]
    fn holes_are_not_burned() {
        let outer = polygon!(
            exterior: [
                (x: 0.0, y: 0.0),
                (x: 4.0, y: 0.0),
                (x: 4.0, y: 3.0),
                (x: 0.0, y: 3.0),
                (x: 0.0, y: 0.0),
            ],
            interiors: [[
                (x: 1.0, y: 1.0),
                (x: 2.0, y: 1.0),
                (x: 2.0, y: 2.0),
                (x: 1.0, y: 2.0),
                (x: 1.0, y: 1.0),
            ]],
        );
        let shapes = vec![(MultiPolygon::new(vec![outer]), 4)];
        let codes = rasterize(&shapes, &geometry(), 0);
        assert_eq!(codes[[1, 1]], 0);
        assert_eq!(codes[[1, 2]], 4);
    }
}
