use lidarvox_grid::{crop_points, VoxelGrid};

use crate::error::VoxelizeError;

/// Points that survived cropping and quantization.
pub(crate) struct GridPoints {
    /// Lattice cell of every surviving point.
    pub coords: Vec<[usize; 3]>,
    /// Row of every surviving point in the caller's input, ascending.
    pub rows: Vec<usize>,
    /// Composite validity mask over the caller's input.
    pub mask: Vec<bool>,
}

/// Crop `points` to the grid range and quantize the survivors.
///
/// The returned mask is the crop mask AND the grid membership mask, expressed
/// over the input points so that `rows` and `mask` always agree.
pub(crate) fn grid_points(
    points: &[[f64; 3]],
    num_feature_rows: usize,
    grid: &VoxelGrid,
) -> Result<GridPoints, VoxelizeError> {
    if num_feature_rows != points.len() {
        return Err(VoxelizeError::ShapeMismatch {
            points: points.len(),
            features: num_feature_rows,
        });
    }

    let (cropped, roi_mask) = crop_points(points, grid.min_range_m(), grid.max_range_m());
    let (cropped_coords, in_grid) = grid.transform_to_grid_coordinates(&cropped);

    let mut mask = roi_mask;
    let mut coords = Vec::with_capacity(cropped.len());
    let mut rows = Vec::with_capacity(cropped.len());

    // walk the crop survivors in order alongside their input rows
    let mut survivors = cropped_coords.iter().zip(in_grid.iter());
    for (row, keep) in mask.iter_mut().enumerate() {
        if !*keep {
            continue;
        }
        let Some((c, &inside)) = survivors.next() else {
            break;
        };
        *keep = inside;
        if inside {
            coords.push([c[0] as usize, c[1] as usize, c[2] as usize]);
            rows.push(row);
        }
    }

    log::trace!(
        "{} of {} points fall inside the voxel grid",
        rows.len(),
        points.len()
    );

    Ok(GridPoints { coords, rows, mask })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_points_composes_masks() -> Result<(), VoxelizeError> {
        let grid = VoxelGrid::new([2, 2, 2], [0.0; 3], [2.0; 3])?;
        let points = vec![
            [0.5, 0.5, 0.5],
            [3.0, 0.5, 0.5],
            [1.5, 1.5, 0.5],
            [-1.0, 0.0, 0.0],
            [1.0, 0.0, 1.99],
        ];
        let prepared = grid_points(&points, points.len(), &grid)?;
        assert_eq!(prepared.mask, vec![true, false, true, false, true]);
        assert_eq!(prepared.rows, vec![0, 2, 4]);
        assert_eq!(prepared.coords, vec![[0, 0, 0], [1, 1, 0], [1, 0, 1]]);
        Ok(())
    }

    #[test]
    fn test_grid_points_shape_mismatch() -> Result<(), VoxelizeError> {
        let grid = VoxelGrid::new([2, 2, 2], [0.0; 3], [2.0; 3])?;
        let res = grid_points(&[[0.0; 3]], 2, &grid);
        assert!(matches!(
            res,
            Err(VoxelizeError::ShapeMismatch {
                points: 1,
                features: 2
            })
        ));
        Ok(())
    }
}
