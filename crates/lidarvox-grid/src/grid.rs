use serde::{Deserialize, Serialize};

use crate::error::GridError;

/// A regular 3D lattice spanning an axis-aligned physical region.
///
/// The lattice has `dims` cells per axis covering `[min_range_m, max_range_m)`.
/// Instances are validated on construction (and on deserialization), so every
/// `VoxelGrid` has positive dimensions and a non-empty range on each axis.
///
/// # Example
///
/// ```
/// use lidarvox_grid::VoxelGrid;
///
/// let grid = VoxelGrid::new([10, 10, 10], [0.0, 0.0, 0.0], [10.0, 10.0, 10.0]).unwrap();
/// assert_eq!(grid.resolution_m(), [1.0, 1.0, 1.0]);
/// assert_eq!(grid.num_voxels(), 1000);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawVoxelGrid")]
pub struct VoxelGrid {
    dims: [usize; 3],
    min_range_m: [f64; 3],
    max_range_m: [f64; 3],
}

#[derive(Deserialize)]
struct RawVoxelGrid {
    dims: [usize; 3],
    min_range_m: [f64; 3],
    max_range_m: [f64; 3],
}

impl TryFrom<RawVoxelGrid> for VoxelGrid {
    type Error = GridError;

    fn try_from(raw: RawVoxelGrid) -> Result<Self, Self::Error> {
        VoxelGrid::new(raw.dims, raw.min_range_m, raw.max_range_m)
    }
}

impl VoxelGrid {
    /// Create a new voxel grid.
    ///
    /// # Arguments
    ///
    /// * `dims` - Number of cells along x, y and z.
    /// * `min_range_m` - Inclusive lower corner of the region in meters.
    /// * `max_range_m` - Exclusive upper corner of the region in meters.
    ///
    /// # Errors
    ///
    /// * [`GridError::ZeroDimension`] if any dimension is zero.
    /// * [`GridError::TooManyVoxels`] if the number of cells overflows `usize`.
    /// * [`GridError::NonFiniteRange`] if a bound or the extent of an axis is not finite.
    /// * [`GridError::EmptyRange`] if `min_range_m[i] < max_range_m[i]` does not hold.
    pub fn new(
        dims: [usize; 3],
        min_range_m: [f64; 3],
        max_range_m: [f64; 3],
    ) -> Result<Self, GridError> {
        for axis in 0..3 {
            if dims[axis] == 0 {
                return Err(GridError::ZeroDimension { axis });
            }
        }
        // every linear voxel index must be representable
        if dims[0]
            .checked_mul(dims[1])
            .and_then(|n| n.checked_mul(dims[2]))
            .is_none()
        {
            return Err(GridError::TooManyVoxels { dims });
        }

        for axis in 0..3 {
            let (min, max) = (min_range_m[axis], max_range_m[axis]);
            if !min.is_finite() || !max.is_finite() || !(max - min).is_finite() {
                return Err(GridError::NonFiniteRange { axis, min, max });
            }
            if min >= max {
                return Err(GridError::EmptyRange { axis, min, max });
            }
        }

        Ok(Self {
            dims,
            min_range_m,
            max_range_m,
        })
    }

    /// Number of cells along each axis.
    #[inline]
    pub fn dims(&self) -> [usize; 3] {
        self.dims
    }

    /// Inclusive lower corner of the grid in meters.
    #[inline]
    pub fn min_range_m(&self) -> [f64; 3] {
        self.min_range_m
    }

    /// Exclusive upper corner of the grid in meters.
    #[inline]
    pub fn max_range_m(&self) -> [f64; 3] {
        self.max_range_m
    }

    /// Physical size of one cell along each axis in meters.
    pub fn resolution_m(&self) -> [f64; 3] {
        std::array::from_fn(|i| (self.max_range_m[i] - self.min_range_m[i]) / self.dims[i] as f64)
    }

    /// Total number of cells in the lattice.
    pub fn num_voxels(&self) -> usize {
        self.dims.iter().product()
    }

    /// Map a single point to its lattice cell, if it lies inside the grid.
    pub fn grid_coordinate(&self, point: &[f64; 3]) -> Option<[usize; 3]> {
        let resolution = self.resolution_m();
        let mut cell = [0usize; 3];
        for axis in 0..3 {
            let q = ((point[axis] - self.min_range_m[axis]) / resolution[axis]).floor();
            if !q.is_finite() || q < 0.0 || q >= self.dims[axis] as f64 {
                return None;
            }
            cell[axis] = q as usize;
        }
        Some(cell)
    }

    /// Transform points to integer grid coordinates.
    ///
    /// Every point is quantized as `floor((p - min_range_m) / resolution_m)`.
    /// The returned mask flags the points whose coordinate lies within `dims`
    /// on every axis; coordinates of invalid points are still reported (or
    /// `i64::MIN` for non-finite input) so that both outputs stay aligned
    /// with `points`.
    ///
    /// # Arguments
    ///
    /// * `points` - The points to transform.
    ///
    /// # Returns
    ///
    /// The grid coordinates and the grid membership mask, both of length `points.len()`.
    pub fn transform_to_grid_coordinates(&self, points: &[[f64; 3]]) -> (Vec<[i64; 3]>, Vec<bool>) {
        let resolution = self.resolution_m();

        points
            .iter()
            .map(|point| {
                let mut coords = [0i64; 3];
                let mut is_inside = true;
                for axis in 0..3 {
                    let q = ((point[axis] - self.min_range_m[axis]) / resolution[axis]).floor();
                    if !q.is_finite() {
                        coords[axis] = i64::MIN;
                        is_inside = false;
                        continue;
                    }
                    coords[axis] = q as i64;
                    is_inside &= q >= 0.0 && q < self.dims[axis] as f64;
                }
                (coords, is_inside)
            })
            .unzip()
    }
}
