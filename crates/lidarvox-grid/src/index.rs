/// Flatten a 3D coordinate into a row-major linear index.
///
/// The last axis varies fastest: `linear = (c[0] * dims[1] + c[1]) * dims[2] + c[2]`.
/// Coordinates are expected to lie within `dims`.
///
/// # Example
///
/// ```
/// use lidarvox_grid::ravel_multi_index;
///
/// assert_eq!(ravel_multi_index([1, 2, 3], [10, 10, 10]), 123);
/// ```
#[inline]
pub fn ravel_multi_index(coords: [usize; 3], dims: [usize; 3]) -> usize {
    debug_assert!((0..3).all(|i| coords[i] < dims[i]));
    (coords[0] * dims[1] + coords[1]) * dims[2] + coords[2]
}

/// Recover the 3D coordinate of a row-major linear index.
///
/// This is the inverse of [`ravel_multi_index`] for indices below `dims.iter().product()`.
///
/// # Example
///
/// ```
/// use lidarvox_grid::unravel_index;
///
/// assert_eq!(unravel_index(123, [10, 10, 10]), [1, 2, 3]);
/// ```
#[inline]
pub fn unravel_index(linear: usize, dims: [usize; 3]) -> [usize; 3] {
    let z = linear % dims[2];
    let rest = linear / dims[2];
    let y = rest % dims[1];
    let x = rest / dims[1];
    [x, y, z]
}

/// Flatten a batch of 3D coordinates. See [`ravel_multi_index`].
pub fn ravel_multi_indices(coords: &[[usize; 3]], dims: [usize; 3]) -> Vec<usize> {
    coords
        .iter()
        .map(|&c| ravel_multi_index(c, dims))
        .collect()
}

/// Unflatten a batch of linear indices. See [`unravel_index`].
pub fn unravel_indices(linear: &[usize], dims: [usize; 3]) -> Vec<[usize; 3]> {
    linear.iter().map(|&l| unravel_index(l, dims)).collect()
}
