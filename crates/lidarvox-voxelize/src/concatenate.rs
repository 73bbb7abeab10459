use lidarvox_grid::{unravel_indices, VoxelGrid};
use ndarray::{s, Array3, ArrayView2};
use num_traits::Zero;

use crate::{
    error::VoxelizeError, output::ConcatenatedVoxels, prepare::grid_points, runs::VoxelRuns,
};

/// Default number of points kept per voxel by [`voxelize_concatenate`].
pub const DEFAULT_MAX_NUM_PTS: usize = 20;

/// Voxelize a point set, stacking the raw features of the points in each voxel.
///
/// Instead of an information destroying reduction, the features of up to
/// `max_num_pts` points are concatenated per voxel and the remaining slots are
/// zero padded. Points are ordered by a stable sort over the row-major voxel
/// index, so within a voxel they keep their input order; points beyond the
/// capacity are dropped from `values` but still counted in `counts`.
///
/// # Arguments
///
/// * `points` - The point coordinates with shape (N, 3).
/// * `features` - The point features with shape (N, F).
/// * `grid` - The voxel grid.
/// * `max_num_pts` - Maximum number of points stored per voxel.
///
/// # Returns
///
/// The voxel indices, the values with shape (M, max_num_pts, F), the true per-voxel
/// point counts and the validity mask over the N input points.
///
/// # Errors
///
/// Returns [`VoxelizeError::ShapeMismatch`] if `features` does not have N rows and
/// [`VoxelizeError::ZeroCapacity`] if `max_num_pts` is zero.
///
/// # Example
///
/// ```
/// use lidarvox_grid::VoxelGrid;
/// use lidarvox_voxelize::voxelize_concatenate;
/// use ndarray::array;
///
/// let grid = VoxelGrid::new([4, 4, 4], [0.0; 3], [4.0; 3]).unwrap();
/// let points = vec![[0.5, 0.5, 0.5], [0.2, 0.1, 0.9], [0.7, 0.3, 0.4]];
/// let features = array![[1.0f32], [2.0], [3.0]];
///
/// let voxels = voxelize_concatenate(&points, features.view(), &grid, 2).unwrap();
/// assert_eq!(voxels.indices, vec![[0, 0, 0]]);
/// assert_eq!(voxels.values, array![[[1.0f32], [2.0]]]);
/// assert_eq!(voxels.counts, vec![3]);
/// ```
pub fn voxelize_concatenate<T: Copy + Zero>(
    points: &[[f64; 3]],
    features: ArrayView2<'_, T>,
    grid: &VoxelGrid,
    max_num_pts: usize,
) -> Result<ConcatenatedVoxels<T>, VoxelizeError> {
    if max_num_pts == 0 {
        return Err(VoxelizeError::ZeroCapacity);
    }

    let prepared = grid_points(points, features.nrows(), grid)?;
    let runs = VoxelRuns::new(&prepared.coords, grid.dims());

    let mut values = Array3::<T>::zeros((runs.keys.len(), max_num_pts, features.ncols()));

    let mut num_dropped = 0usize;
    for ((&pos, &run), slot) in runs
        .order
        .iter()
        .zip(runs.inverse.iter())
        .zip(runs.slots())
    {
        if slot >= max_num_pts {
            num_dropped += 1;
            continue;
        }
        values
            .slice_mut(s![run, slot, ..])
            .assign(&features.row(prepared.rows[pos]));
    }

    if num_dropped > 0 {
        log::debug!(
            "dropped {} points exceeding {} points per voxel",
            num_dropped,
            max_num_pts
        );
    }

    let voxels = ConcatenatedVoxels {
        indices: unravel_indices(&runs.keys, grid.dims()),
        values,
        counts: runs.counts,
        mask: prepared.mask,
    };

    log::debug!(
        "concatenated {} of {} points into {} voxels",
        voxels.num_valid_points(),
        points.len(),
        voxels.len()
    );

    Ok(voxels)
}
