use crate::SlippiRank;

/// A slice of the rating axis mapped to a single tier, covering
/// `lower_bound <= rating < upper_bound`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RankBucket {
    pub lower_bound: f64,
    pub upper_bound: f64,
    pub rank: SlippiRank,
}

impl RankBucket {
    const fn new(lower_bound: f64, upper_bound: f64, rank: SlippiRank) -> Self {
        Self {
            lower_bound,
            upper_bound,
            rank,
        }
    }

    /// Whether `rating` falls in this bucket.
    pub fn contains(&self, rating: f64) -> bool {
        self.lower_bound <= rating && rating < self.upper_bound
    }
}

/// Rating buckets in ascending order.
///
/// The ladder publishes upper bounds one hundredth below the next tier's lower
/// bound (e.g. Bronze 1 ends at 765.42, Bronze 2 starts at 765.43). Each upper
/// bound here is the next tier's lower bound, so the table partitions
/// `[0, inf)` with no holes.
pub const RANK_BUCKETS: [RankBucket; 18] = [
    RankBucket::new(0.0, 765.43, SlippiRank::Bronze1),
    RankBucket::new(765.43, 913.72, SlippiRank::Bronze2),
    RankBucket::new(913.72, 1054.87, SlippiRank::Bronze3),
    RankBucket::new(1054.87, 1188.88, SlippiRank::Silver1),
    RankBucket::new(1188.88, 1315.75, SlippiRank::Silver2),
    RankBucket::new(1315.75, 1435.48, SlippiRank::Silver3),
    RankBucket::new(1435.48, 1548.07, SlippiRank::Gold1),
    RankBucket::new(1548.07, 1653.52, SlippiRank::Gold2),
    RankBucket::new(1653.52, 1751.83, SlippiRank::Gold3),
    RankBucket::new(1751.83, 1843.0, SlippiRank::Platinum1),
    RankBucket::new(1843.0, 1927.03, SlippiRank::Platinum2),
    RankBucket::new(1927.03, 2003.92, SlippiRank::Platinum3),
    RankBucket::new(2003.92, 2073.67, SlippiRank::Diamond1),
    RankBucket::new(2073.67, 2136.28, SlippiRank::Diamond2),
    RankBucket::new(2136.28, 2191.75, SlippiRank::Diamond3),
    RankBucket::new(2191.75, 2275.0, SlippiRank::Master1),
    RankBucket::new(2275.0, 2350.0, SlippiRank::Master2),
    RankBucket::new(2350.0, f64::INFINITY, SlippiRank::Master3),
];
