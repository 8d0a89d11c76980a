//! Wire types shared by the flat revisions (V1 and V2).
//!
//! Both revisions send the same document and only disagree on how the ranked
//! profile id is encoded, so the types are generic over that id and each
//! revision supplies its own id conversion.

use serde_json::Value;

use super::{ConnectCodeField, SchemaVersion, SubscriptionField, connect_code, decode, required};
use crate::{CharacterUsage, MalformedResponseError, Profile, RankedStats};

#[derive(Debug, serde::Deserialize)]
struct Response<Id> {
    #[serde(alias = "getConnectCode")]
    get_connect_code: Option<ConnectCodeLookup<Id>>,
}

#[derive(Debug, serde::Deserialize)]
struct ConnectCodeLookup<Id> {
    user: Option<User<Id>>,
}

#[derive(Debug, serde::Deserialize)]
struct User<Id> {
    #[serde(alias = "fbUid")]
    uid: Option<String>,

    #[serde(alias = "displayName")]
    display_name: Option<String>,

    status: Option<String>,

    #[serde(alias = "connectCode")]
    connect_code: Option<ConnectCodeField>,

    #[serde(alias = "activeSubscription")]
    subscription: Option<SubscriptionField>,

    #[serde(alias = "rankedNetplayProfile")]
    ranked_profile: Option<RankedNetplayProfile<Id>>,
}

#[derive(Debug, serde::Deserialize)]
pub(super) struct RankedNetplayProfile<Id> {
    pub id: Option<Id>,

    #[serde(alias = "ratingOrdinal", default)]
    pub rating_ordinal: Option<f64>,

    #[serde(alias = "ratingUpdateCount")]
    pub rating_update_count: u32,

    pub wins: u32,

    pub losses: u32,

    #[serde(alias = "dailyGlobalPlacement", default)]
    pub daily_global_placement: Option<u32>,

    #[serde(alias = "dailyRegionalPlacement", default)]
    pub daily_regional_placement: Option<u32>,

    #[serde(default)]
    pub continent: Option<String>,

    #[serde(default)]
    pub characters: Option<Vec<Character>>,
}

#[derive(Debug, serde::Deserialize)]
pub(super) struct Character {
    pub character: String,

    #[serde(alias = "gameCount")]
    pub game_count: u32,
}

impl<Id> RankedNetplayProfile<Id> {
    /// Builds `RankedStats` once the revision has resolved the id.
    pub fn into_stats(self, id: i64) -> RankedStats {
        RankedStats {
            id,
            rating_ordinal: self.rating_ordinal.unwrap_or(0.0),
            rating_update_count: self.rating_update_count,
            wins: self.wins,
            losses: self.losses,
            daily_global_placement: self.daily_global_placement.unwrap_or(0),
            daily_regional_placement: self.daily_regional_placement.unwrap_or(0),
            continent: self.continent,
            characters: self
                .characters
                .unwrap_or_default()
                .into_iter()
                .map(|character| CharacterUsage {
                    id: None,
                    character: character.character,
                    game_count: character.game_count,
                })
                .collect(),
        }
    }
}

/// Decodes a flat `data` payload, delegating the ranked profile to `stats`.
pub(super) fn normalize_with<Id, F>(
    data: &Value,
    version: SchemaVersion,
    stats: F,
) -> Result<Profile, MalformedResponseError>
where
    Id: serde::de::DeserializeOwned,
    F: FnOnce(RankedNetplayProfile<Id>) -> Result<RankedStats, MalformedResponseError>,
{
    let response: Response<Id> = decode(data, version)?;

    let user = response
        .get_connect_code
        .and_then(|lookup| lookup.user)
        .ok_or(MalformedResponseError::MissingField("getConnectCode.user"))?;

    Ok(Profile {
        uid: required(user.uid, "fbUid")?,
        display_name: required(user.display_name, "displayName")?,
        connect_code: connect_code(user.connect_code)?,
        status: user.status,
        subscription: user.subscription.map(Into::into),
        ranked: stats(required(user.ranked_profile, "rankedNetplayProfile")?)?,
        history: Vec::new(),
    })
}
