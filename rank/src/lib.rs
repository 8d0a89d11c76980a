//! Derives a player's ranked tier from the numbers the Slippi ranked ladder
//! reports for them.
//!
//! Classification is a pure function of the rating, the daily regional placement
//! and the win/loss record. There is no shared state and no failure mode: every
//! input produces a `SlippiRank`, including the two sentinel tiers for players
//! who have not played (or finished placing) yet.

use std::fmt;

use serde_repr::{Deserialize_repr, Serialize_repr};

mod buckets;
pub use buckets::{RANK_BUCKETS, RankBucket};

/// A player must be rated strictly above this, and hold a daily regional
/// placement, to be Grandmaster.
pub const GRANDMASTER_THRESHOLD: f64 = 2191.75;

/// Total decided games (wins + losses) needed before a player leaves placements.
pub const PLACEMENT_GAMES: u32 = 5;

/// Represents a rank in the Slippi playerbase.
///
/// The discriminant doubles as the wire index when serialized, and the order of
/// the tiers follows the rating axis.
#[repr(i8)]
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize_repr, Deserialize_repr,
)]
pub enum SlippiRank {
    /// No games played. Displays as "None".
    #[default]
    Unranked,
    Pending,
    Bronze1,
    Bronze2,
    Bronze3,
    Silver1,
    Silver2,
    Silver3,
    Gold1,
    Gold2,
    Gold3,
    Platinum1,
    Platinum2,
    Platinum3,
    Diamond1,
    Diamond2,
    Diamond3,
    Master1,
    Master2,
    Master3,
    Grandmaster,
}

impl SlippiRank {
    /// The display name the ladder uses for this tier.
    pub fn name(self) -> &'static str {
        match self {
            Self::Unranked => "None",
            Self::Pending => "Pending",
            Self::Bronze1 => "Bronze 1",
            Self::Bronze2 => "Bronze 2",
            Self::Bronze3 => "Bronze 3",
            Self::Silver1 => "Silver 1",
            Self::Silver2 => "Silver 2",
            Self::Silver3 => "Silver 3",
            Self::Gold1 => "Gold 1",
            Self::Gold2 => "Gold 2",
            Self::Gold3 => "Gold 3",
            Self::Platinum1 => "Platinum 1",
            Self::Platinum2 => "Platinum 2",
            Self::Platinum3 => "Platinum 3",
            Self::Diamond1 => "Diamond 1",
            Self::Diamond2 => "Diamond 2",
            Self::Diamond3 => "Diamond 3",
            Self::Master1 => "Master 1",
            Self::Master2 => "Master 2",
            Self::Master3 => "Master 3",
            Self::Grandmaster => "Grandmaster",
        }
    }

    /// Whether this is an actual tier, as opposed to one of the sentinels.
    pub fn is_ranked(self) -> bool {
        !matches!(self, Self::Unranked | Self::Pending)
    }

    /// The rating bucket backing this tier, if it has one.
    ///
    /// Grandmaster and the sentinels are decided outside of the bucket scan.
    pub fn bucket(self) -> Option<&'static RankBucket> {
        RANK_BUCKETS.iter().find(|bucket| bucket.rank == self)
    }

    /// Inclusive lower bound of the rating range for this tier.
    pub fn lower_bound(self) -> f64 {
        match self {
            Self::Grandmaster => GRANDMASTER_THRESHOLD,
            rank => rank.bucket().map_or(0.0, |bucket| bucket.lower_bound),
        }
    }

    /// Exclusive upper bound of the rating range for this tier. Unbounded tiers
    /// report `f64::INFINITY`.
    pub fn upper_bound(self) -> f64 {
        match self {
            Self::Grandmaster => f64::INFINITY,
            rank => rank.bucket().map_or(0.0, |bucket| bucket.upper_bound),
        }
    }
}

impl fmt::Display for SlippiRank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Determines the current `SlippiRank` given the provided values.
///
/// `games_played` is carried for diagnostics only; placement status is decided
/// by the win/loss record, as the ladder itself does.
pub fn classify(
    rating: f64,
    daily_regional_placement: u32,
    games_played: u32,
    wins: u32,
    losses: u32,
) -> SlippiRank {
    let rank = decide(rating, daily_regional_placement, wins, losses);

    tracing::trace!(
        rating,
        daily_regional_placement,
        games_played,
        wins,
        losses,
        rank = rank.name(),
        "Classified rank"
    );

    rank
}

fn decide(rating: f64, daily_regional_placement: u32, wins: u32, losses: u32) -> SlippiRank {
    if wins == 0 && losses == 0 {
        return SlippiRank::Unranked;
    }

    if wins.saturating_add(losses) < PLACEMENT_GAMES {
        return SlippiRank::Pending;
    }

    // Has to run before the bucket scan: a placed player above the threshold is
    // Grandmaster no matter which Master bucket the rating falls in.
    if rating > GRANDMASTER_THRESHOLD && daily_regional_placement > 0 {
        return SlippiRank::Grandmaster;
    }

    if rating.is_nan() || rating <= 0.0 {
        return SlippiRank::Unranked;
    }

    RANK_BUCKETS
        .iter()
        .find(|bucket| bucket.contains(rating))
        .map_or(SlippiRank::Unranked, |bucket| bucket.rank)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_games_is_unranked_regardless_of_rating() {
        for rating in [0.0, 800.0, 2200.0, 5000.0, -10.0] {
            assert_eq!(classify(rating, 1, 0, 0, 0), SlippiRank::Unranked);
        }
    }

    #[test]
    fn test_fewer_than_five_games_is_pending() {
        for (wins, losses) in [(1, 0), (0, 1), (2, 2), (4, 0), (0, 4), (3, 1)] {
            assert_eq!(classify(2200.0, 1, wins + losses, wins, losses), SlippiRank::Pending);
        }

        assert_ne!(classify(800.0, 0, 5, 3, 2), SlippiRank::Pending);
    }

    #[test]
    fn test_grandmaster_requires_regional_placement() {
        assert_eq!(classify(2200.0, 1, 12, 10, 2), SlippiRank::Grandmaster);
        assert_eq!(classify(2200.0, 0, 12, 10, 2), SlippiRank::Master1);
        assert_eq!(classify(2400.0, 0, 12, 10, 2), SlippiRank::Master3);
    }

    #[test]
    fn test_grandmaster_threshold_is_exclusive() {
        assert_eq!(classify(GRANDMASTER_THRESHOLD, 3, 12, 10, 2), SlippiRank::Master1);
        assert_eq!(classify(2191.76, 3, 12, 10, 2), SlippiRank::Grandmaster);
    }

    #[test]
    fn test_regional_placement_ignored_below_threshold() {
        assert_eq!(classify(2100.0, 7, 12, 10, 2), SlippiRank::Diamond2);
    }

    #[test]
    fn test_bucket_scan() {
        assert_eq!(classify(800.0, 0, 12, 10, 2), SlippiRank::Bronze2);
        assert_eq!(classify(1500.0, 0, 12, 10, 2), SlippiRank::Gold1);
        assert_eq!(classify(1900.0, 0, 12, 10, 2), SlippiRank::Platinum2);
        assert_eq!(classify(2300.0, 0, 12, 10, 2), SlippiRank::Master2);
    }

    #[test]
    fn test_published_boundaries_belong_to_the_upper_bucket() {
        assert_eq!(classify(1843.0, 0, 12, 10, 2), SlippiRank::Platinum2);
        assert_eq!(classify(2275.0, 0, 12, 10, 2), SlippiRank::Master2);
        assert_eq!(classify(2350.0, 0, 12, 10, 2), SlippiRank::Master3);
        assert_eq!(classify(765.43, 0, 12, 10, 2), SlippiRank::Bronze2);
    }

    #[test]
    fn test_values_between_published_bounds_stay_in_the_lower_bucket() {
        assert_eq!(classify(765.425, 0, 12, 10, 2), SlippiRank::Bronze1);
        assert_eq!(classify(1842.995, 0, 12, 10, 2), SlippiRank::Platinum1);
    }

    #[test]
    fn test_non_positive_or_nan_rating_is_unranked() {
        assert_eq!(classify(0.0, 0, 12, 10, 2), SlippiRank::Unranked);
        assert_eq!(classify(-42.0, 0, 12, 10, 2), SlippiRank::Unranked);
        assert_eq!(classify(f64::NAN, 1, 12, 10, 2), SlippiRank::Unranked);
    }

    #[test]
    fn test_names_and_bounds() {
        assert_eq!(SlippiRank::Unranked.to_string(), "None");
        assert_eq!(SlippiRank::Platinum2.to_string(), "Platinum 2");
        assert_eq!(SlippiRank::Platinum2.lower_bound(), 1843.0);
        assert_eq!(SlippiRank::Platinum2.upper_bound(), 1927.03);
        assert_eq!(SlippiRank::Master3.upper_bound(), f64::INFINITY);
        assert_eq!(SlippiRank::Grandmaster.lower_bound(), GRANDMASTER_THRESHOLD);
        assert_eq!(SlippiRank::Pending.upper_bound(), 0.0);
        assert!(!SlippiRank::Pending.is_ranked());
        assert!(SlippiRank::Bronze1.is_ranked());
    }
}
