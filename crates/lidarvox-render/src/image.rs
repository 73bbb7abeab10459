use ndarray::Array3;

use crate::error::RenderError;

/// Image size in pixels
///
/// # Examples
///
/// ```
/// use lidarvox_render::ImageSize;
///
/// let image_size = ImageSize {
///     width: 10,
///     height: 20,
/// };
/// assert_eq!(image_size.width, 10);
/// assert_eq!(image_size.height, 20);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageSize {
    /// Width of the image in pixels
    pub width: usize,
    /// Height of the image in pixels
    pub height: usize,
}

/// An RGB image with shape (H, W, 3).
#[derive(Debug, Clone, PartialEq)]
pub struct Image {
    /// The pixel data in row-major (H, W, 3) layout.
    pub data: Array3<u8>,
}

impl Image {
    /// Create a new image from interleaved RGB data.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::InvalidShape`] if `data` does not hold
    /// `width * height * 3` values.
    pub fn new(size: ImageSize, data: Vec<u8>) -> Result<Self, RenderError> {
        let data = Array3::from_shape_vec((size.height, size.width, 3), data)?;
        Ok(Self { data })
    }

    /// Create a new image filled with a single value.
    pub fn from_size_val(size: ImageSize, val: u8) -> Self {
        Self {
            data: Array3::from_elem((size.height, size.width, 3), val),
        }
    }

    /// The size of the image in pixels.
    pub fn size(&self) -> ImageSize {
        ImageSize {
            width: self.cols(),
            height: self.rows(),
        }
    }

    /// Number of rows (height).
    #[inline]
    pub fn rows(&self) -> usize {
        self.data.shape()[0]
    }

    /// Number of columns (width).
    #[inline]
    pub fn cols(&self) -> usize {
        self.data.shape()[1]
    }

    /// Get the color at row `u` and column `v`.
    pub fn pixel(&self, u: usize, v: usize) -> Option<[u8; 3]> {
        if u >= self.rows() || v >= self.cols() {
            return None;
        }
        Some(std::array::from_fn(|c| self.data[[u, v, c]]))
    }

    /// Set the color at row `u` and column `v`; out of bounds writes are ignored.
    #[inline]
    pub fn put_pixel(&mut self, u: i64, v: i64, color: [u8; 3]) {
        if u < 0 || v < 0 || u >= self.rows() as i64 || v >= self.cols() as i64 {
            return;
        }
        let (u, v) = (u as usize, v as usize);
        for (c, value) in color.into_iter().enumerate() {
            self.data[[u, v, c]] = value;
        }
    }

    /// The interleaved RGB data in row-major order.
    pub fn to_vec(&self) -> Vec<u8> {
        self.data.iter().copied().collect()
    }
}
