use ndarray::Zip;

use crate::{error::RenderError, image::Image};

/// Blend the foreground and background pixels.
///
/// Every channel is computed as `fg * alpha + bg * (1 - alpha)` and rounded.
///
/// # Arguments
///
/// * `foreground` - The source image.
/// * `background` - The target image.
/// * `alpha` - The blending coefficient in `[0, 1]`.
///
/// # Errors
///
/// Returns [`RenderError::SizeMismatch`] if the images do not have the same size.
pub fn blend(foreground: &Image, background: &Image, alpha: f32) -> Result<Image, RenderError> {
    if foreground.size() != background.size() {
        return Err(RenderError::SizeMismatch(
            (foreground.rows(), foreground.cols()),
            (background.rows(), background.cols()),
        ));
    }

    let alpha = alpha.clamp(0.0, 1.0);
    let data = Zip::from(&foreground.data)
        .and(&background.data)
        .map_collect(|&fg, &bg| {
            (fg as f32 * alpha + bg as f32 * (1.0 - alpha))
                .round()
                .clamp(0.0, 255.0) as u8
        });

    Ok(Image { data })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image::ImageSize;

    #[test]
    fn test_blend() -> Result<(), RenderError> {
        let size = ImageSize {
            width: 2,
            height: 1,
        };
        let fg = Image::new(size, vec![200, 100, 0, 255, 255, 255])?;
        let bg = Image::new(size, vec![0, 100, 200, 0, 0, 0])?;

        let blended = blend(&fg, &bg, 0.5)?;
        assert_eq!(blended.to_vec(), vec![100, 100, 100, 128, 128, 128]);

        assert_eq!(blend(&fg, &bg, 1.0)?, fg);
        assert_eq!(blend(&fg, &bg, 0.0)?, bg);
        Ok(())
    }

    #[test]
    fn test_blend_size_mismatch() {
        let fg = Image::from_size_val(
            ImageSize {
                width: 2,
                height: 2,
            },
            0,
        );
        let bg = Image::from_size_val(
            ImageSize {
                width: 3,
                height: 2,
            },
            0,
        );
        assert!(matches!(
            blend(&fg, &bg, 0.5),
            Err(RenderError::SizeMismatch((2, 2), (2, 3)))
        ));
    }
}
