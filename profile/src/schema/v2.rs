use serde_json::Value;

use super::flat::{RankedNetplayProfile, normalize_with};
use super::{SchemaVersion, parse_identifier, required};
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
                    __typename
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
                        __typename
                    }
                    __typename
                }
                __typename
            }
        }
    }
"#;

pub(super) fn normalize(data: &Value) -> Result<Profile, MalformedResponseError> {
    normalize_with(data, SchemaVersion::V2, ranked_stats)
}

/// The id arrives as a string here, but it's numeric everywhere we use it.
fn ranked_stats(profile: RankedNetplayProfile<String>) -> Result<RankedStats, MalformedResponseError> {
    let id = required(profile.id.as_deref(), "rankedNetplayProfile.id")?;
    let id = parse_identifier("rankedNetplayProfile.id", id)?;

    Ok(profile.into_stats(id))
}
