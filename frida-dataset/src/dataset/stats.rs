use crate::common::*;

/// Summary statistics of a non-empty list of tracklets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct SubsetStats {
    pub min_len: usize,
    pub max_len: usize,
    pub mean_len: R64,
    pub num_tracklets: usize,
    pub num_ids: usize,
}

impl SubsetStats {
    /// Returns `None` if `lengths` is empty.
    pub fn new(lengths: &[usize], num_ids: usize) -> Option<Self> {
        let (min_len, max_len) = lengths.iter().copied().minmax().into_option()?;
        let total: usize = lengths.iter().sum();
        let mean_len = r64(total as f64 / lengths.len() as f64);

        Some(Self {
            min_len,
            max_len,
            mean_len,
            num_tracklets: lengths.len(),
            num_ids,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stats_of_lengths() {
        let stats = SubsetStats::new(&[3, 1, 2, 6], 2).unwrap();
        assert_eq!(stats.min_len, 1);
        assert_eq!(stats.max_len, 6);
        assert_eq!(stats.mean_len, r64(3.0));
        assert_eq!(stats.num_tracklets, 4);
        assert_eq!(stats.num_ids, 2);

        let stats = SubsetStats::new(&[5], 1).unwrap();
        assert_eq!((stats.min_len, stats.max_len), (5, 5));

        assert!(SubsetStats::new(&[], 0).is_none());
    }
}
