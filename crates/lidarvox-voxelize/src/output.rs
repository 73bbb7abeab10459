use ndarray::{Array2, Array3};

/// The result of voxelizing a point set.
///
/// Row `i` of `indices`, `values` and `counts` describes the same voxel.
#[derive(Debug, Clone, PartialEq)]
pub struct Voxels<V> {
    /// Lattice coordinate of every output row.
    pub indices: Vec<[usize; 3]>,
    /// Per-row values, see [`PooledVoxels`] and [`ConcatenatedVoxels`].
    pub values: V,
    /// Number of input points that fell into each voxel, before any truncation.
    pub counts: Vec<usize>,
    /// One flag per input point: `true` if it survived cropping and quantization.
    pub mask: Vec<bool>,
}

/// Output of the pooling voxelizer: `values` has shape `(M, F)`.
pub type PooledVoxels<T> = Voxels<Array2<T>>;

/// Output of the concatenating voxelizer: `values` has shape `(M, max_num_pts, F)`.
pub type ConcatenatedVoxels<T> = Voxels<Array3<T>>;

impl<V> Voxels<V> {
    /// Number of output rows.
    #[inline]
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    /// Check if no point survived.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Number of input points that survived cropping and quantization.
    pub fn num_valid_points(&self) -> usize {
        self.mask.iter().filter(|&&m| m).count()
    }

    /// Transform the values while keeping indices, counts and mask.
    pub fn map_values<U>(self, f: impl FnOnce(V) -> U) -> Voxels<U> {
        Voxels {
            indices: self.indices,
            values: f(self.values),
            counts: self.counts,
            mask: self.mask,
        }
    }
}

impl<T> ConcatenatedVoxels<T> {
    /// Per-voxel capacity (the `max_num_pts` the output was built with).
    #[inline]
    pub fn capacity(&self) -> usize {
        self.values.shape()[1]
    }

    /// Number of slots of voxel `i` that hold a real point.
    ///
    /// This differs from `counts[i]` when the voxel overflowed its capacity.
    pub fn num_filled(&self, i: usize) -> usize {
        self.counts[i].min(self.capacity())
    }

    /// Slot validity mask of shape `(M, max_num_pts)`.
    ///
    /// Padding slots are zero in `values`, which is indistinguishable from a
    /// genuine all-zero feature; this mask tells them apart.
    pub fn slot_mask(&self) -> Array2<bool> {
        let capacity = self.capacity();
        Array2::from_shape_fn((self.len(), capacity), |(i, slot)| {
            slot < self.counts[i].min(capacity)
        })
    }
}
