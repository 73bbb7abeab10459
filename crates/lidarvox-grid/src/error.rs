/// An error type for the voxel grid configuration.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum GridError {
    /// A grid axis has no cells.
    #[error("Grid dimension along axis {axis} must be positive")]
    ZeroDimension {
        /// The offending axis (0 = x, 1 = y, 2 = z).
        axis: usize,
    },

    /// The physical range along an axis is empty or not a number.
    #[error("Grid range along axis {axis} is empty: min {min} must be smaller than max {max}")]
    EmptyRange {
        /// The offending axis (0 = x, 1 = y, 2 = z).
        axis: usize,
        /// Lower bound in meters.
        min: f64,
        /// Upper bound in meters.
        max: f64,
    },

    /// The physical range along an axis is not finite or its extent overflows.
    #[error("Grid range along axis {axis} must be finite: got [{min}, {max})")]
    NonFiniteRange {
        /// The offending axis (0 = x, 1 = y, 2 = z).
        axis: usize,
        /// Lower bound in meters.
        min: f64,
        /// Upper bound in meters.
        max: f64,
    },

    /// The total number of cells does not fit in `usize`.
    #[error("Grid dimensions {dims:?} overflow the number of addressable voxels")]
    TooManyVoxels {
        /// The requested dimensions.
        dims: [usize; 3],
    },
}
