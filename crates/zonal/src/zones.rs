//! Zone identifier raster.

use std::collections::BTreeSet;

use ndarray::Array2;

/// Integer zone code per grid cell.
///
/// Cells equal to `nodata` belong to no zone and are ignored by the
/// statistics.
#[derive(Debug, Clone, PartialEq)]
pub struct ZoneRaster {
    codes: Array2<i64>,
    nodata: Option<i64>,
}

impl ZoneRaster {
    /// Creates a zone raster from `[ny, nx]` codes.
    pub fn new(codes: Array2<i64>, nodata: Option<i64>) -> Self {
        Self { codes, nodata }
    }

    /// Returns the zone codes.
    pub fn codes(&self) -> &Array2<i64> {
        &self.codes
    }

    /// Returns the code marking cells outside every zone.
    pub fn nodata(&self) -> Option<i64> {
        self.nodata
    }

    /// Returns `[ny, nx]`.
    pub fn shape(&self) -> [usize; 2] {
        let (ny, nx) = self.codes.dim();
        [ny, nx]
    }

    /// Distinct zone codes, ascending, excluding nodata.
    pub fn zone_ids(&self) -> Vec<i64> {
        let ids: BTreeSet<i64> = self
            .codes
            .iter()
            .copied()
            .filter(|&c| Some(c) != self.nodata)
            .collect();
        ids.into_iter().collect()
    }

    /// Number of cells assigned to some zone.
    pub fn n_zoned_cells(&self) -> usize {
        self.codes
            .iter()
            .filter(|&&c| Some(c) != self.nodata)
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn zone_ids_sorted_without_nodata() {
        let z = ZoneRaster::new(array![[3, 1, -9999], [1, 2, 3]], Some(-9999));
        assert_eq!(z.zone_ids(), vec![1, 2, 3]);
        assert_eq!(z.n_zoned_cells(), 5);
        assert_eq!(z.shape(), [2, 3]);
    }

    #[test]
    fn without_nodata_every_code_is_a_zone() {
        let z = ZoneRaster::new(array![[-9999, 0]], None);
        assert_eq!(z.zone_ids(), vec![-9999, 0]);
    }
}
