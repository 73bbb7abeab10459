use lidarvox_grid::VoxelGrid;
use ndarray::{Array2, ArrayView2};

use crate::{
    draw::draw_polygon,
    error::RenderError,
    image::{Image, ImageSize},
};

/// Collapse voxel indices onto the x-y plane.
///
/// # Arguments
///
/// * `indices` - The occupied voxel indices.
/// * `dims` - The grid dimensions.
///
/// # Returns
///
/// A `(dims[0], dims[1])` map with 1.0 where at least one voxel occupies the column.
/// Indices outside `dims` are ignored.
pub fn occupancy_bev(indices: &[[usize; 3]], dims: [usize; 3]) -> Array2<f32> {
    let mut bev = Array2::<f32>::zeros((dims[0], dims[1]));
    for index in indices {
        if index[2] >= dims[2] {
            continue;
        }
        if let Some(cell) = bev.get_mut((index[0], index[1])) {
            *cell = 1.0;
        }
    }
    bev
}

/// Collapse voxel occupancy counts onto the x-y plane.
///
/// The number of points per column is normalized by the densest column, so the
/// map lies in `[0, 1]`. Indices outside `dims` are ignored.
pub fn density_bev(indices: &[[usize; 3]], counts: &[usize], dims: [usize; 3]) -> Array2<f32> {
    let mut bev = Array2::<f32>::zeros((dims[0], dims[1]));
    for (index, &count) in indices.iter().zip(counts.iter()) {
        if index[2] >= dims[2] {
            continue;
        }
        if let Some(cell) = bev.get_mut((index[0], index[1])) {
            *cell += count as f32;
        }
    }

    let max = bev.fold(0.0f32, |acc, &x| acc.max(x));
    if max > 0.0 {
        bev.mapv_inplace(|x| x / max);
    }
    bev
}

/// Convert a `[0, 1]` intensity map into a gray RGB image.
pub fn bev_to_image(bev: ArrayView2<'_, f32>) -> Image {
    let size = ImageSize {
        width: bev.ncols(),
        height: bev.nrows(),
    };
    let mut img = Image::from_size_val(size, 0);
    for ((u, v), &x) in bev.indexed_iter() {
        let gray = (x.clamp(0.0, 1.0) * 255.0).round() as u8;
        img.put_pixel(u as i64, v as i64, [gray; 3]);
    }
    img
}

/// An oriented box on the ground plane, in meters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BevBox {
    /// Center of the box (x, y).
    pub center_m: [f64; 2],
    /// Length along the heading and width across it.
    pub size_m: [f64; 2],
    /// Heading angle around the z axis, counter-clockwise from x.
    pub yaw_rad: f64,
}

impl BevBox {
    /// The four corners, front-left first, going clockwise when seen from above.
    pub fn corners_m(&self) -> [[f64; 2]; 4] {
        let (sin, cos) = self.yaw_rad.sin_cos();
        let (hl, hw) = (self.size_m[0] / 2.0, self.size_m[1] / 2.0);
        [(hl, hw), (hl, -hw), (-hl, -hw), (-hl, hw)].map(|(x, y)| {
            [
                self.center_m[0] + x * cos - y * sin,
                self.center_m[1] + x * sin + y * cos,
            ]
        })
    }
}

/// Draw the outline of a box onto a bird's-eye view of `grid`.
///
/// Metric coordinates map to pixels with the grid resolution: x to rows, y to columns.
pub fn draw_bev_box(
    img: &mut Image,
    grid: &VoxelGrid,
    bbox: &BevBox,
    color: [u8; 3],
    thickness: usize,
) -> Result<(), RenderError> {
    let min = grid.min_range_m();
    let resolution = grid.resolution_m();
    let vertices = bbox.corners_m().map(|[x, y]| {
        (
            ((x - min[0]) / resolution[0]).floor() as i64,
            ((y - min[1]) / resolution[1]).floor() as i64,
        )
    });

    draw_polygon(
        img,
        &vertices,
        &[[0, 1], [1, 2], [2, 3], [3, 0]],
        &[color; 4],
        thickness,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_occupancy_bev() {
        let indices = [[0, 1, 0], [0, 1, 1], [2, 0, 1], [5, 0, 0], [1, 1, 7]];
        let bev = occupancy_bev(&indices, [3, 2, 2]);
        assert_eq!(bev, ndarray::array![[0.0f32, 1.0], [0.0, 0.0], [1.0, 0.0]]);
    }

    #[test]
    fn test_density_bev() {
        let indices = [[0, 1, 0], [0, 1, 1], [2, 0, 1]];
        let bev = density_bev(&indices, &[3, 1, 2], [3, 2, 2]);
        assert_eq!(bev, ndarray::array![[0.0f32, 1.0], [0.0, 0.0], [0.5, 0.0]]);

        let empty = density_bev(&[], &[], [2, 2, 1]);
        assert!(empty.iter().all(|&x| x == 0.0));
    }

    #[test]
    fn test_bev_to_image() {
        let bev = ndarray::array![[0.0f32, 1.0, 0.5], [2.0, -1.0, 0.25]];
        let img = bev_to_image(bev.view());
        assert_eq!(img.rows(), 2);
        assert_eq!(img.cols(), 3);
        assert_eq!(img.pixel(0, 1), Some([255; 3]));
        assert_eq!(img.pixel(0, 2), Some([128; 3]));
        assert_eq!(img.pixel(1, 0), Some([255; 3]));
        assert_eq!(img.pixel(1, 1), Some([0; 3]));
        assert_eq!(img.pixel(1, 2), Some([64; 3]));
    }

    #[test]
    fn test_bev_box_corners() {
        let bbox = BevBox {
            center_m: [1.0, 2.0],
            size_m: [4.0, 2.0],
            yaw_rad: std::f64::consts::FRAC_PI_2,
        };
        let corners = bbox.corners_m();
        let expected = [[0.0, 4.0], [2.0, 4.0], [2.0, 0.0], [0.0, 0.0]];
        for (c, e) in corners.iter().zip(expected.iter()) {
            assert_relative_eq!(c[0], e[0], epsilon = 1e-12);
            assert_relative_eq!(c[1], e[1], epsilon = 1e-12);
        }
    }

    #[test]
    fn test_draw_bev_box() -> Result<(), Box<dyn std::error::Error>> {
        let grid = VoxelGrid::new([10, 10, 1], [0.0; 3], [10.0, 10.0, 1.0])?;
        let mut img = Image::from_size_val(
            ImageSize {
                width: 10,
                height: 10,
            },
            0,
        );
        let bbox = BevBox {
            center_m: [5.0, 5.0],
            size_m: [4.0, 2.0],
            yaw_rad: 0.0,
        };
        draw_bev_box(&mut img, &grid, &bbox, [0, 0, 255], 1)?;

        for (u, v) in [(3, 4), (3, 6), (7, 4), (7, 6), (5, 4), (5, 6), (3, 5)] {
            assert_eq!(img.pixel(u, v), Some([0, 0, 255]), "pixel ({u}, {v})");
        }
        assert_eq!(img.pixel(5, 5), Some([0, 0, 0]));
        assert_eq!(img.pixel(2, 4), Some([0, 0, 0]));
        Ok(())
    }

    #[test]
    fn test_draw_bev_box_off_canvas() -> Result<(), Box<dyn std::error::Error>> {
        let grid = VoxelGrid::new([10, 10, 1], [0.0; 3], [10.0, 10.0, 1.0])?;
        let mut img = Image::from_size_val(
            ImageSize {
                width: 10,
                height: 10,
            },
            0,
        );
        for center_m in [[1e30, -1e30], [f64::INFINITY, 5.0], [f64::NAN, f64::NAN]] {
            let bbox = BevBox {
                center_m,
                size_m: [4.0, 2.0],
                yaw_rad: 0.3,
            };
            draw_bev_box(&mut img, &grid, &bbox, [0, 0, 255], 2)?;
        }
        // far boxes leave the canvas untouched
        let bbox = BevBox {
            center_m: [-1e9, 1e9],
            size_m: [4.0, 2.0],
            yaw_rad: 0.0,
        };
        let mut far = Image::from_size_val(
            ImageSize {
                width: 10,
                height: 10,
            },
            0,
        );
        draw_bev_box(&mut far, &grid, &bbox, [0, 0, 255], 2)?;
        assert!(far.to_vec().iter().all(|&p| p == 0));
        Ok(())
    }
}
