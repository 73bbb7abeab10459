use lidarvox_grid::ravel_multi_indices;

/// Points grouped into contiguous runs of identical voxel.
///
/// Grouping is a stable sort over the row-major linear voxel index followed by
/// a run-length encoding, so runs come out in ascending linear index and the
/// points inside a run keep their input order.
pub(crate) struct VoxelRuns {
    /// Positions into the input coordinates, sorted by linear index.
    pub order: Vec<usize>,
    /// Distinct linear indices, ascending.
    pub keys: Vec<usize>,
    /// Number of points in every run.
    pub counts: Vec<usize>,
    /// Run number of every sorted position.
    pub inverse: Vec<usize>,
}

impl VoxelRuns {
    /// Group the lattice coordinates of `coords` into runs of identical voxel.
    pub fn new(coords: &[[usize; 3]], dims: [usize; 3]) -> Self {
        let linear = ravel_multi_indices(coords, dims);

        let mut order = (0..linear.len()).collect::<Vec<_>>();
        order.sort_by_key(|&i| linear[i]);

        let mut keys: Vec<usize> = Vec::new();
        let mut counts: Vec<usize> = Vec::new();
        let mut inverse = Vec::with_capacity(order.len());

        for &i in order.iter() {
            let key = linear[i];
            match keys.last() {
                Some(&last) if last == key => {
                    if let Some(count) = counts.last_mut() {
                        *count += 1;
                    }
                }
                _ => {
                    keys.push(key);
                    counts.push(1);
                }
            }
            inverse.push(keys.len() - 1);
        }

        Self {
            order,
            keys,
            counts,
            inverse,
        }
    }

    /// Exclusive prefix sum of the run lengths: the sorted position where each run starts.
    pub fn offsets(&self) -> Vec<usize> {
        self.counts
            .iter()
            .scan(0usize, |acc, &count| {
                let start = *acc;
                *acc += count;
                Some(start)
            })
            .collect()
    }

    /// 0-based rank of every sorted position inside its own run.
    pub fn slots(&self) -> Vec<usize> {
        let offsets = self.offsets();
        self.inverse
            .iter()
            .enumerate()
            .map(|(pos, &run)| pos - offsets[run])
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_runs_are_sorted_and_stable() {
        let coords = vec![[1, 0, 0], [0, 0, 1], [1, 0, 0], [0, 0, 1], [0, 0, 0]];
        let runs = VoxelRuns::new(&coords, [2, 2, 2]);
        assert_eq!(runs.keys, vec![0, 1, 4]);
        assert_eq!(runs.counts, vec![1, 2, 2]);
        assert_eq!(runs.order, vec![4, 1, 3, 0, 2]);
        assert_eq!(runs.inverse, vec![0, 1, 1, 2, 2]);
        assert_eq!(runs.offsets(), vec![0, 1, 3]);
        assert_eq!(runs.slots(), vec![0, 0, 1, 0, 1]);
    }

    #[test]
    fn test_runs_empty() {
        let runs = VoxelRuns::new(&[], [2, 2, 2]);
        assert!(runs.keys.is_empty());
        assert!(runs.counts.is_empty());
        assert!(runs.slots().is_empty());
    }
}
