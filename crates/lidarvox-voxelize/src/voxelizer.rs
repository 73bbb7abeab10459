use std::path::Path;

use lidarvox_grid::VoxelGrid;
use ndarray::{Array2, Array3, ArrayView2};
use num_traits::Float;
use serde::{Deserialize, Serialize};

use crate::{
    concatenate::{voxelize_concatenate, DEFAULT_MAX_NUM_PTS},
    error::VoxelizeError,
    output::Voxels,
    pool::{voxelize_pool, PoolingMode},
};

fn default_max_num_pts() -> usize {
    DEFAULT_MAX_NUM_PTS
}

/// The reduction performed during voxelization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum VoxelizationType {
    /// Pool the features of points sharing a voxel, see [`voxelize_pool`].
    Pool {
        /// The pooling reduction.
        #[serde(default)]
        mode: PoolingMode,
    },
    /// Stack up to `max_num_pts` features per voxel, see [`voxelize_concatenate`].
    Concatenate {
        /// Maximum number of points stored per voxel.
        #[serde(default = "default_max_num_pts")]
        max_num_pts: usize,
    },
}

impl Default for VoxelizationType {
    fn default() -> Self {
        Self::Pool {
            mode: PoolingMode::Mean,
        }
    }
}

/// Values produced by a [`Voxelizer`], depending on its [`VoxelizationType`].
#[derive(Debug, Clone, PartialEq)]
pub enum VoxelValues<T> {
    /// Pooled features with shape (M, F).
    Pooled(Array2<T>),
    /// Concatenated features with shape (M, max_num_pts, F).
    Concatenated(Array3<T>),
}

impl<T> VoxelValues<T> {
    /// Number of feature channels.
    pub fn num_features(&self) -> usize {
        match self {
            Self::Pooled(values) => values.ncols(),
            Self::Concatenated(values) => values.shape()[2],
        }
    }
}

/// A voxel grid paired with a voxelization strategy.
///
/// The voxelizer is plain configuration: it can be built in code or loaded from JSON.
///
/// ```json
/// {
///   "grid": { "dims": [512, 512, 1], "min_range_m": [-50, -50, -3], "max_range_m": [50, 50, 3] },
///   "voxelization": { "type": "concatenate", "max_num_pts": 20 }
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Voxelizer {
    /// The voxel grid.
    pub grid: VoxelGrid,
    /// The reduction strategy.
    #[serde(default)]
    pub voxelization: VoxelizationType,
}

impl Voxelizer {
    /// Create a new voxelizer.
    pub fn new(grid: VoxelGrid, voxelization: VoxelizationType) -> Self {
        Self { grid, voxelization }
    }

    /// Parse a voxelizer from a JSON string.
    pub fn from_json_str(json: &str) -> Result<Self, VoxelizeError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read a voxelizer from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, VoxelizeError> {
        let data = std::fs::read_to_string(path)?;
        Self::from_json_str(&data)
    }

    /// Voxelize a point set with the configured strategy.
    ///
    /// # Arguments
    ///
    /// * `points` - The point coordinates with shape (N, 3).
    /// * `features` - The point features with shape (N, F).
    pub fn voxelize<T: Float>(
        &self,
        points: &[[f64; 3]],
        features: ArrayView2<'_, T>,
    ) -> Result<Voxels<VoxelValues<T>>, VoxelizeError> {
        let voxels = match self.voxelization {
            VoxelizationType::Pool { mode } => {
                voxelize_pool(points, features, &self.grid, mode)?.map_values(VoxelValues::Pooled)
            }
            VoxelizationType::Concatenate { max_num_pts } => {
                voxelize_concatenate(points, features, &self.grid, max_num_pts)?
                    .map_values(VoxelValues::Concatenated)
            }
        };
        Ok(voxels)
    }
}
