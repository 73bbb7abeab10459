use lidarvox_grid::GridError;

/// An error type for the voxelization module.
#[derive(thiserror::Error, Debug)]
pub enum VoxelizeError {
    /// The features do not have one row per point.
    #[error("Features have {features} rows but {points} points were given")]
    ShapeMismatch {
        /// Number of points.
        points: usize,
        /// Number of feature rows.
        features: usize,
    },

    /// The voxel grid is degenerate.
    #[error("Invalid voxel grid: {0}")]
    InvalidGrid(#[from] GridError),

    /// The per-voxel capacity of the concatenating voxelizer is zero.
    #[error("The number of points per voxel (max_num_pts) must be positive")]
    ZeroCapacity,

    /// Error reading a voxelizer configuration file.
    #[error("Failed to read the voxelizer config")]
    Io(#[from] std::io::Error),

    /// Error parsing a voxelizer configuration.
    #[error("Failed to parse the voxelizer config: {0}")]
    Config(#[from] serde_json::Error),
}
