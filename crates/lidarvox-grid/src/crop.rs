/// Crop a point set to an axis-aligned box.
///
/// A point is kept when `min_range_m[i] <= p[i] < max_range_m[i]` holds on every axis.
/// The relative order of the kept points is preserved.
///
/// # Arguments
///
/// * `points` - The points to crop.
/// * `min_range_m` - Inclusive lower corner of the box.
/// * `max_range_m` - Exclusive upper corner of the box.
///
/// # Returns
///
/// The cropped points and a mask of length `points.len()` flagging the kept points.
///
/// # Example
///
/// ```
/// use lidarvox_grid::crop_points;
///
/// let points = vec![[0.5, 0.5, 0.5], [1.0, 0.5, 0.5], [-0.1, 0.0, 0.0]];
/// let (cropped, mask) = crop_points(&points, [0.0; 3], [1.0; 3]);
/// assert_eq!(cropped, vec![[0.5, 0.5, 0.5]]);
/// assert_eq!(mask, vec![true, false, false]);
/// ```
pub fn crop_points(
    points: &[[f64; 3]],
    min_range_m: [f64; 3],
    max_range_m: [f64; 3],
) -> (Vec<[f64; 3]>, Vec<bool>) {
    let mask = points
        .iter()
        .map(|p| (0..3).all(|i| p[i] >= min_range_m[i] && p[i] < max_range_m[i]))
        .collect::<Vec<_>>();

    let cropped = points
        .iter()
        .zip(mask.iter())
        .filter_map(|(p, &keep)| keep.then_some(*p))
        .collect::<Vec<_>>();

    log::trace!("cropped {} of {} points", cropped.len(), points.len());

    (cropped, mask)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_crop_points_bounds() {
        let points = vec![
            [0.0, 0.0, 0.0],
            [9.999, 5.0, 5.0],
            [10.0, 5.0, 5.0],
            [5.0, -0.001, 5.0],
            [5.0, 5.0, f64::NAN],
        ];
        let (cropped, mask) = crop_points(&points, [0.0; 3], [10.0; 3]);
        assert_eq!(mask, vec![true, true, false, false, false]);
        assert_eq!(cropped, vec![[0.0, 0.0, 0.0], [9.999, 5.0, 5.0]]);
    }

    #[test]
    fn test_crop_points_preserves_order() {
        let points = vec![[3.0, 0.0, 0.0], [20.0, 0.0, 0.0], [1.0, 0.0, 0.0], [2.0, 0.0, 0.0]];
        let (cropped, _) = crop_points(&points, [0.0; 3], [10.0; 3]);
        assert_eq!(cropped, vec![[3.0, 0.0, 0.0], [1.0, 0.0, 0.0], [2.0, 0.0, 0.0]]);
    }

    #[test]
    fn test_crop_points_empty() {
        let (cropped, mask) = crop_points(&[], [0.0; 3], [1.0; 3]);
        assert!(cropped.is_empty());
        assert!(mask.is_empty());
    }
}
