use serde_json::Value;

use super::flat::{RankedNetplayProfile, normalize_with};
use super::{SchemaVersion, required};
use crate::{MalformedResponseError, Profile, RankedStats};

pub(super) const QUERY: &str = r#"
    query ($cc: String!) {
        getConnectCode(code: $cc) {
            user {
                fbUid
                displayName
                status
                connectCode {
                    code
                }
                activeSubscription {
                    level
                    hasGiftSub
                }
                rankedNetplayProfile {
                    id
                    ratingOrdinal
                    ratingUpdateCount
                    wins
                    losses
                    dailyGlobalPlacement
                    dailyRegionalPlacement
                    continent
                    characters {
                        character
                        gameCount
                    }
                }
            }
        }
    }
"#;

pub(super) fn normalize(data: &Value) -> Result<Profile, MalformedResponseError> {
    normalize_with(data, SchemaVersion::V1, ranked_stats)
}

fn ranked_stats(profile: RankedNetplayProfile<i64>) -> Result<RankedStats, MalformedResponseError> {
    let id = required(profile.id, "rankedNetplayProfile.id")?;

    Ok(profile.into_stats(id))
}
