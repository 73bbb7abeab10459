#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]
//!
//! # Overview
//!
//! Two reductions turn an unordered point set with per-point features into a sparse
//! voxel representation:
//!
//! - [`voxelize_pool`] averages the features of all points sharing a voxel.
//! - [`voxelize_concatenate`] keeps up to `max_num_pts` raw feature vectors per voxel,
//!   zero padding the unused slots.
//!
//! Both first crop the points to the grid range and quantize them with
//! [`lidarvox_grid::VoxelGrid`], and both return a [`Voxels`] holding the voxel
//! indices, the values, the true per-voxel occupancy and a mask over the input points.
//!
//! ```
//! use lidarvox_grid::VoxelGrid;
//! use lidarvox_voxelize::{voxelize_pool, PoolingMode};
//! use ndarray::array;
//!
//! let grid = VoxelGrid::new([10, 10, 10], [0.0; 3], [10.0; 3]).unwrap();
//! let points = vec![[1.2, 1.3, 1.4], [1.6, 1.1, 1.9], [5.0, 5.0, 5.0]];
//! let features = array![[2.0f32], [4.0], [10.0]];
//!
//! let voxels = voxelize_pool(&points, features.view(), &grid, PoolingMode::Mean).unwrap();
//! assert_eq!(voxels.indices, vec![[1, 1, 1], [5, 5, 5]]);
//! assert_eq!(voxels.values, array![[3.0f32], [10.0]]);
//! assert_eq!(voxels.counts, vec![2, 1]);
//! ```

/// Bounded per-voxel concatenation of point features.
pub mod concatenate;

mod error;

/// Voxelization outputs.
pub mod output;

/// Mean pooling of point features per voxel.
pub mod pool;

mod prepare;

mod runs;

/// Configurable voxelization strategy.
pub mod voxelizer;

pub use crate::concatenate::{voxelize_concatenate, DEFAULT_MAX_NUM_PTS};
pub use crate::error::VoxelizeError;
pub use crate::output::{ConcatenatedVoxels, PooledVoxels, Voxels};
pub use crate::pool::{voxelize_pool, PoolingMode};
pub use crate::voxelizer::{VoxelValues, VoxelizationType, Voxelizer};
