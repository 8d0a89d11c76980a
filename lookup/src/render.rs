use std::fmt::Write;

use serde_json::json;

use slippi_profile::{Profile, RankedStats};

/// Human readable summary of a profile.
pub fn summary(profile: &Profile) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "{} ({})", profile.display_name, profile.connect_code);
    write_stats(&mut out, &profile.ranked);

    if let Some(subscription) = &profile.subscription {
        let gifted = if subscription.gifted { " (gifted)" } else { "" };
        let _ = writeln!(out, "  Subscription: {}{gifted}", subscription.level);
    }

    if !profile.history.is_empty() {
        let _ = writeln!(out, "  Seasons:");

        for season in &profile.history {
            let _ = writeln!(
                out,
                "    {:<12} {:<12} {:.1}",
                season.season.name,
                season.rank().name(),
                season.stats.rating_ordinal
            );
        }
    }

    out.trim_end().to_string()
}

fn write_stats(out: &mut String, stats: &RankedStats) {
    let rank = stats.rank();

    match rank.is_ranked() {
        true => {
            let _ = writeln!(out, "  Rank:       {rank} ({:.2})", stats.rating_ordinal);
        },

        false => {
            let _ = writeln!(out, "  Rank:       {rank}");
        },
    }

    let _ = writeln!(out, "  Record:     {}W / {}L", stats.wins, stats.losses);

    if stats.daily_global_placement > 0 || stats.daily_regional_placement > 0 {
        let _ = writeln!(
            out,
            "  Placement:  #{} global, #{} regional",
            stats.daily_global_placement, stats.daily_regional_placement
        );
    }

    if let Some(continent) = &stats.continent {
        let _ = writeln!(out, "  Continent:  {continent}");
    }

    if !stats.characters.is_empty() {
        let characters = stats
            .characters
            .iter()
            .map(|usage| format!("{} x{}", usage.character, usage.game_count))
            .collect::<Vec<_>>()
            .join(", ");

        let _ = writeln!(out, "  Characters: {characters}");
    }
}

/// The profile plus its derived rank, as pretty-printed JSON.
pub fn json(profile: &Profile) -> serde_json::Result<String> {
    let rank = profile.rank();

    serde_json::to_string_pretty(&json!({
        "profile": profile,
        "rank": {
            "name": rank.name(),
            "index": rank,
            "lowerBound": rank.lower_bound(),
            "upperBound": if rank.upper_bound().is_finite() { json!(rank.upper_bound()) } else { json!(null) },
        },
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use slippi_profile::{CharacterUsage, Subscription};

    fn profile() -> Profile {
        Profile {
            uid: "uid".into(),
            display_name: "Mors".into(),
            connect_code: "MORS#762".into(),
            status: Some("ACTIVE".into()),
            subscription: Some(Subscription {
                level: "TIER1".into(),
                gifted: true,
            }),
            ranked: RankedStats {
                id: 1,
                rating_ordinal: 2200.0,
                rating_update_count: 12,
                wins: 10,
                losses: 2,
                daily_global_placement: 0,
                daily_regional_placement: 0,
                continent: Some("EUROPE".into()),
                characters: vec![
                    CharacterUsage {
                        id: None,
                        character: "MARTH".into(),
                        game_count: 3,
                    },
                    CharacterUsage {
                        id: None,
                        character: "FOX".into(),
                        game_count: 9,
                    },
                ],
            },
            history: Vec::new(),
        }
    }

    #[test]
    fn test_summary() {
        let summary = summary(&profile());

        assert!(summary.starts_with("Mors (MORS#762)"));
        assert!(summary.contains("Rank:       Master 1 (2200.00)"));
        assert!(summary.contains("Record:     10W / 2L"));
        assert!(summary.contains("Characters: MARTH x3, FOX x9"));
        assert!(summary.contains("Subscription: TIER1 (gifted)"));
        assert!(!summary.contains("Placement"));
        assert!(!summary.contains("Seasons"));
    }

    #[test]
    fn test_summary_for_pending_player() {
        let mut profile = profile();
        profile.ranked.wins = 1;
        profile.ranked.losses = 1;

        assert!(summary(&profile).contains("Rank:       Pending\n"));
    }

    #[test]
    fn test_json_includes_rank() {
        let value: serde_json::Value = serde_json::from_str(&json(&profile()).unwrap()).unwrap();

        assert_eq!(value["rank"]["name"], "Master 1");
        assert_eq!(value["rank"]["index"], 17);
        assert_eq!(value["rank"]["lowerBound"], 2191.75);
        assert_eq!(value["rank"]["upperBound"], 2275.0);
        assert_eq!(value["profile"]["connect_code"], "MORS#762");
        assert_eq!(value["profile"]["ranked"]["characters"][1]["character"], "FOX");
    }
}
