use chrono::{DateTime, Utc};

use slippi_rank::{SlippiRank, classify};

use crate::characters;

/// A player's profile, normalized from whichever schema revision the server
/// answered with.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct Profile {
    pub uid: String,
    pub display_name: String,
    pub connect_code: String,
    pub status: Option<String>,
    pub subscription: Option<Subscription>,
    pub ranked: RankedStats,

    /// One snapshot per season, in the order the server sent them. Empty for
    /// schema revisions that don't carry history.
    pub history: Vec<SeasonStats>,
}

impl Profile {
    /// The player's current tier.
    pub fn rank(&self) -> SlippiRank {
        self.ranked.rank()
    }

    /// The character with the most games. Ties go to whichever the server listed first.
    pub fn most_played(&self) -> Option<&CharacterUsage> {
        self.ranked.characters.iter().fold(None::<&CharacterUsage>, |best, usage| match best {
            Some(best) if best.game_count >= usage.game_count => Some(best),
            _ => Some(usage),
        })
    }
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct Subscription {
    pub level: String,
    pub gifted: bool,
}

/// Ranked numbers for a single season (or the live one).
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize)]
pub struct RankedStats {
    pub id: i64,

    /// Zero for players who have never been rated.
    pub rating_ordinal: f64,
    pub rating_update_count: u32,
    pub wins: u32,
    pub losses: u32,
    pub daily_global_placement: u32,
    pub daily_regional_placement: u32,
    pub continent: Option<String>,

    /// Kept in server order; it carries no ranking.
    pub characters: Vec<CharacterUsage>,
}

impl RankedStats {
    /// Decided games, i.e. wins plus losses.
    pub fn games_played(&self) -> u32 {
        self.wins.saturating_add(self.losses)
    }

    pub fn rank(&self) -> SlippiRank {
        classify(
            self.rating_ordinal,
            self.daily_regional_placement,
            self.games_played(),
            self.wins,
            self.losses,
        )
    }
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct CharacterUsage {
    /// Only present on schema revisions that send per-entry ids.
    pub id: Option<i64>,
    pub character: String,
    pub game_count: u32,
}

impl CharacterUsage {
    /// Internal character id, if the name is one we know about.
    pub fn character_id(&self) -> Option<u16> {
        characters::character_id(&self.character)
    }

    /// Accent color used when displaying this character.
    pub fn color(&self) -> Option<&'static str> {
        characters::character_color(&self.character)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct Season {
    pub id: String,
    pub started_at: DateTime<Utc>,

    /// `None` while the season is still running.
    pub ended_at: Option<DateTime<Utc>>,
    pub name: String,
    pub status: String,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct SeasonStats {
    pub season: Season,
    pub stats: RankedStats,
}

impl SeasonStats {
    pub fn rank(&self) -> SlippiRank {
        self.stats.rank()
    }
}
