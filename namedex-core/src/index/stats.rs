//! Bucket size statistics.

use crate::index::types::Index;

/// A snapshot of bucket-size statistics.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BucketStats {
    /// Number of buckets.
    pub buckets: usize,
    /// Entries in the smallest bucket.
    pub smallest: Option<usize>,
    /// Entries in the largest bucket.
    pub largest: Option<usize>,
    /// Positional median, see [`BucketStats::from_sizes`].
    pub median: Option<usize>,
    /// Mean entries per bucket; 0.0 for an empty index.
    pub mean: f64,
}

impl Index {
    /// Entry count of every bucket, in key order.
    pub fn bucket_sizes(&self) -> Vec<usize> {
        self.buckets.iter().map(|bucket| bucket.len()).collect()
    }

    /// Returns bucket statistics.
    pub fn stats(&self) -> BucketStats {
        BucketStats::from_sizes(&self.bucket_sizes())
    }
}

impl BucketStats {
    /// Computes statistics over bucket sizes given in key order.
    ///
    /// The median is read positionally at `sizes[ceil(n / 2)]` without
    /// sorting by size first, which keeps reports comparable with indexes
    /// generated by earlier tooling. It is `None` when that position is past
    /// the end, i.e. for zero or one bucket.
    pub fn from_sizes(sizes: &[usize]) -> Self {
        let buckets = sizes.len();
        let mean = if buckets > 0 {
            sizes.iter().sum::<usize>() as f64 / buckets as f64
        } else {
            0.0
        };

        Self {
            buckets,
            smallest: sizes.iter().copied().min(),
            largest: sizes.iter().copied().max(),
            median: sizes.get(buckets.div_ceil(2)).copied(),
            mean,
        }
    }
}

impl core::fmt::Display for BucketStats {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        fn or_dash(value: Option<usize>) -> String {
            value.map_or_else(|| "-".to_owned(), |v| v.to_string())
        }

        writeln!(f, "Bucket stats:")?;
        writeln!(f, " - {} buckets", self.buckets)?;
        writeln!(f, " - smallest has {} entries", or_dash(self.smallest))?;
        writeln!(f, " - largest has {} entries", or_dash(self.largest))?;
        writeln!(f, " - median size is {} entries", or_dash(self.median))?;
        write!(f, " - average size is {} entries", self.mean)
    }
}
