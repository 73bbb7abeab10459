#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// Axis-aligned cropping of point sets.
pub mod crop;

mod error;

/// Voxel grid descriptor and the continuous to lattice transform.
pub mod grid;

/// Multi-dimensional index arithmetic.
pub mod index;

pub use crate::crop::crop_points;
pub use crate::error::GridError;
pub use crate::grid::VoxelGrid;
pub use crate::index::{ravel_multi_index, ravel_multi_indices, unravel_index, unravel_indices};
