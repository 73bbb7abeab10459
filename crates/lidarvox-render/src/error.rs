/// An error type for the render module.
#[derive(thiserror::Error, Debug)]
pub enum RenderError {
    /// Error when the data length does not match the image size.
    #[error("Invalid image shape: {0}")]
    InvalidShape(#[from] ndarray::ShapeError),

    /// Error when two images that must match have different sizes.
    #[error("Image size {0:?} does not match {1:?}")]
    SizeMismatch((usize, usize), (usize, usize)),

    /// Error when a polygon has a different number of edges and colors.
    #[error("Polygon has {0} edges but {1} colors")]
    EdgeColorMismatch(usize, usize),

    /// Error when a polygon edge references a missing vertex.
    #[error("Vertex index {index} out of range for {num_vertices} vertices")]
    VertexOutOfRange {
        /// The offending vertex index.
        index: usize,
        /// Number of polygon vertices.
        num_vertices: usize,
    },
}
