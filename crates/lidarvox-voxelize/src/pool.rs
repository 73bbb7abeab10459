use lidarvox_grid::{unravel_index, VoxelGrid};
use ndarray::{Array2, ArrayView2, Axis};
use num_traits::{Float, NumCast};
use serde::{Deserialize, Serialize};

use crate::{
    error::VoxelizeError, output::PooledVoxels, prepare::grid_points, runs::VoxelRuns,
};

/// The reduction applied to points sharing a voxel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PoolingMode {
    /// Average the features of all points in a voxel.
    #[default]
    Mean,
    /// Keep one row per point; voxel indices may repeat and counts are all one.
    #[serde(rename = "none")]
    Identity,
}

/// Voxelize a point set, pooling the features of points that share a voxel.
///
/// Points are cropped to the grid range, quantized to lattice coordinates and,
/// with [`PoolingMode::Mean`], reduced to one row per occupied voxel holding the
/// mean feature vector. Rows are ordered by ascending row-major voxel index.
///
/// # Arguments
///
/// * `points` - The point coordinates with shape (N, 3).
/// * `features` - The point features with shape (N, F).
/// * `grid` - The voxel grid.
/// * `mode` - The reduction for points sharing a voxel.
///
/// # Returns
///
/// The voxel indices, the values with shape (M, F), the per-voxel point counts and
/// the validity mask over the N input points.
///
/// # Errors
///
/// Returns [`VoxelizeError::ShapeMismatch`] if `features` does not have N rows.
pub fn voxelize_pool<T: Float>(
    points: &[[f64; 3]],
    features: ArrayView2<'_, T>,
    grid: &VoxelGrid,
    mode: PoolingMode,
) -> Result<PooledVoxels<T>, VoxelizeError> {
    let prepared = grid_points(points, features.nrows(), grid)?;

    let voxels = match mode {
        PoolingMode::Identity => PooledVoxels {
            counts: vec![1; prepared.rows.len()],
            values: features.select(Axis(0), &prepared.rows),
            indices: prepared.coords,
            mask: prepared.mask,
        },
        PoolingMode::Mean => {
            let runs = VoxelRuns::new(&prepared.coords, grid.dims());
            let mut values = Array2::<T>::zeros((runs.keys.len(), features.ncols()));

            for (&pos, &run) in runs.order.iter().zip(runs.inverse.iter()) {
                let src = features.row(prepared.rows[pos]);
                values
                    .row_mut(run)
                    .zip_mut_with(&src, |acc, &x| *acc = *acc + x);
            }

            for (mut row, &count) in values.outer_iter_mut().zip(runs.counts.iter()) {
                // usize to float casts never fail
                let n = <T as NumCast>::from(count).unwrap_or_else(T::nan);
                row.mapv_inplace(|v| v / n);
            }

            PooledVoxels {
                indices: runs
                    .keys
                    .iter()
                    .map(|&key| unravel_index(key, grid.dims()))
                    .collect(),
                values,
                counts: runs.counts,
                mask: prepared.mask,
            }
        }
    };

    log::debug!(
        "pooled {} of {} points into {} rows ({:?})",
        voxels.num_valid_points(),
        points.len(),
        voxels.len(),
        mode
    );

    Ok(voxels)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::{array, Array2};

    fn unit_grid() -> VoxelGrid {
        VoxelGrid::new([10, 10, 10], [0.0; 3], [10.0; 3]).unwrap()
    }

    #[test]
    fn test_pool_mean() -> Result<(), VoxelizeError> {
        let points = vec![[1.2, 1.3, 1.4], [1.6, 1.1, 1.9], [5.0, 5.0, 5.0]];
        let features = array![[2.0f32], [4.0], [10.0]];
        let voxels = voxelize_pool(&points, features.view(), &unit_grid(), PoolingMode::Mean)?;

        assert_eq!(voxels.indices, vec![[1, 1, 1], [5, 5, 5]]);
        assert_eq!(voxels.values, array![[3.0f32], [10.0]]);
        assert_eq!(voxels.counts, vec![2, 1]);
        assert_eq!(voxels.mask, vec![true, true, true]);
        Ok(())
    }

    #[test]
    fn test_pool_mean_multichannel() -> Result<(), VoxelizeError> {
        let points = vec![[0.1, 0.1, 0.1], [9.5, 9.5, 9.5], [0.9, 0.2, 0.3], [0.5, 0.5, 0.5]];
        let features = array![[1.0f64, -1.0], [7.0, 7.0], [2.0, 0.0], [0.0, 4.0]];
        let voxels = voxelize_pool(&points, features.view(), &unit_grid(), PoolingMode::Mean)?;

        assert_eq!(voxels.indices, vec![[0, 0, 0], [9, 9, 9]]);
        assert_eq!(voxels.counts, vec![3, 1]);
        assert_relative_eq!(voxels.values[[0, 0]], 1.0);
        assert_relative_eq!(voxels.values[[0, 1]], 1.0);
        assert_relative_eq!(voxels.values[[1, 0]], 7.0);
        Ok(())
    }

    #[test]
    fn test_pool_identity_keeps_duplicates() -> Result<(), VoxelizeError> {
        let points = vec![[1.2, 1.3, 1.4], [11.0, 0.0, 0.0], [1.6, 1.1, 1.9]];
        let features = array![[2.0f32], [3.0], [4.0]];
        let voxels = voxelize_pool(
            &points,
            features.view(),
            &unit_grid(),
            PoolingMode::Identity,
        )?;

        assert_eq!(voxels.indices, vec![[1, 1, 1], [1, 1, 1]]);
        assert_eq!(voxels.values, array![[2.0f32], [4.0]]);
        assert_eq!(voxels.counts, vec![1, 1]);
        assert_eq!(voxels.mask, vec![true, false, true]);
        Ok(())
    }

    #[test]
    fn test_pool_empty() -> Result<(), VoxelizeError> {
        let features = Array2::<f32>::zeros((0, 4));
        let voxels = voxelize_pool(&[], features.view(), &unit_grid(), PoolingMode::Mean)?;
        assert!(voxels.is_empty());
        assert_eq!(voxels.values.shape(), &[0, 4]);
        assert!(voxels.counts.is_empty());
        assert!(voxels.mask.is_empty());
        Ok(())
    }

    #[test]
    fn test_pool_all_outside() -> Result<(), VoxelizeError> {
        let points = vec![[-1.0, 0.0, 0.0], [20.0, 20.0, 20.0]];
        let features = array![[1.0f32, 2.0], [3.0, 4.0]];
        let voxels = voxelize_pool(&points, features.view(), &unit_grid(), PoolingMode::Mean)?;
        assert!(voxels.is_empty());
        assert_eq!(voxels.values.shape(), &[0, 2]);
        assert_eq!(voxels.mask, vec![false, false]);
        Ok(())
    }

    #[test]
    fn test_pool_shape_mismatch() {
        let features = array![[1.0f32], [2.0]];
        let res = voxelize_pool(&[[0.0; 3]], features.view(), &unit_grid(), PoolingMode::Mean);
        assert!(matches!(res, Err(VoxelizeError::ShapeMismatch { .. })));
    }
}
