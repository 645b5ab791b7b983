//! Calendar-year buckets for anchor-date resolution.
//!
//! MIMIC-style datasets de-identify dates by shifting them per patient.
//! Re-anchoring maps a shifted date back to a coarse real-world window
//! without re-identifying the patient, which is why only 3-year buckets
//! are exposed rather than exact years.

use serde::{Deserialize, Serialize};

/// A closed-open calendar-year range `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnchorBucket {
    pub start: i32,
    pub end: i32,
}

impl AnchorBucket {
    pub const fn new(start: i32, end: i32) -> Self {
        Self { start, end }
    }

    pub fn contains(&self, year: i32) -> bool {
        self.start <= year && year < self.end
    }

    /// Canonical label, e.g. "2008 - 2011".
    pub fn label(&self) -> String {
        format!("{} - {}", self.start, self.end)
    }
}

/// The five contiguous, non-overlapping buckets covering [2008, 2023).
pub const ANCHOR_BUCKETS: [AnchorBucket; 5] = [
    AnchorBucket::new(2008, 2011),
    AnchorBucket::new(2011, 2014),
    AnchorBucket::new(2014, 2017),
    AnchorBucket::new(2017, 2020),
    AnchorBucket::new(2020, 2023),
];

/// The bucket containing `year`, if any.
pub fn bucket_for(year: i32) -> Option<AnchorBucket> {
    ANCHOR_BUCKETS
        .iter()
        .copied()
        .find(|bucket| bucket.contains(year))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buckets_partition_supported_years() {
        for year in 2008..2023 {
            let matching = ANCHOR_BUCKETS
                .iter()
                .filter(|bucket| bucket.contains(year))
                .count();
            assert_eq!(matching, 1, "year {year} should fall in exactly one bucket");
        }
    }

    #[test]
    fn out_of_range_years_have_no_bucket() {
        assert_eq!(bucket_for(2007), None);
        assert_eq!(bucket_for(2023), None);
    }

    #[test]
    fn bucket_label_format() {
        assert_eq!(ANCHOR_BUCKETS[0].label(), "2008 - 2011");
        assert_eq!(bucket_for(2022).unwrap().label(), "2020 - 2023");
    }
}
