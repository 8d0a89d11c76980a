//! The live revision: the ranked profile and every season's snapshot share the
//! `profileFields` fragment, and ids are strings throughout.

use serde_json::Value;

use super::{
    ConnectCodeField, SchemaVersion, SubscriptionField, connect_code, decode, parse_identifier,
    parse_timestamp, required,
};
use crate::{CharacterUsage, MalformedResponseError, Profile, RankedStats, Season, SeasonStats};

pub(super) const OPERATION_NAME: &str = "UserProfilePageQuery";

pub(super) const QUERY: &str = r#"
    fragment profileFields on NetplayProfile {
        id
        ratingOrdinal
        ratingUpdateCount
        wins
        losses
        dailyGlobalPlacement
        dailyRegionalPlacement
        continent
        characters {
            id
            character
            gameCount
            __typename
        }
        __typename
    }

    fragment userProfilePage on User {
        fbUid
        displayName
        connectCode {
            code
            __typename
        }
        status
        activeSubscription {
            level
            hasGiftSub
            __typename
        }
        rankedNetplayProfile {
            ...profileFields
            __typename
        }
        netplayProfiles {
            ...profileFields
            season {
                id
                startedAt
                endedAt
                name
                status
                __typename
            }
            __typename
        }
        __typename
    }

    query UserProfilePageQuery($cc: String!) {
        getConnectCode(code: $cc) {
            user {
                ...userProfilePage
                __typename
            }
            __typename
        }
    }
"#;

#[derive(Debug, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
struct Response {
    get_connect_code: Option<ConnectCodeLookup>,
}

#[derive(Debug, serde::Deserialize)]
struct ConnectCodeLookup {
    user: Option<User>,
}

#[derive(Debug, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
struct User {
    fb_uid: Option<String>,
    display_name: Option<String>,
    status: Option<String>,
    connect_code: Option<ConnectCodeField>,
    active_subscription: Option<SubscriptionField>,
    ranked_netplay_profile: Option<ProfileFields>,

    #[serde(default)]
    netplay_profiles: Option<Vec<SeasonProfile>>,
}

/// Mirrors the `profileFields` fragment.
#[derive(Debug, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProfileFields {
    id: Option<String>,

    #[serde(default)]
    rating_ordinal: Option<f64>,

    rating_update_count: u32,
    wins: u32,
    losses: u32,

    #[serde(default)]
    daily_global_placement: Option<u32>,

    #[serde(default)]
    daily_regional_placement: Option<u32>,

    #[serde(default)]
    continent: Option<String>,

    #[serde(default)]
    characters: Option<Vec<Character>>,
}

#[derive(Debug, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
struct Character {
    #[serde(default)]
    id: Option<String>,

    character: String,
    game_count: u32,
}

#[derive(Debug, serde::Deserialize)]
struct SeasonProfile {
    #[serde(flatten)]
    fields: ProfileFields,

    season: Option<SeasonField>,
}

#[derive(Debug, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
struct SeasonField {
    id: Option<String>,
    started_at: Option<String>,

    #[serde(default)]
    ended_at: Option<String>,

    name: Option<String>,
    status: Option<String>,
}

pub(super) fn normalize(data: &Value) -> Result<Profile, MalformedResponseError> {
    let response: Response = decode(data, SchemaVersion::V3)?;

    let user = response
        .get_connect_code
        .and_then(|lookup| lookup.user)
        .ok_or(MalformedResponseError::MissingField("getConnectCode.user"))?;

    let ranked = required(user.ranked_netplay_profile, "rankedNetplayProfile")?;

    let history = user
        .netplay_profiles
        .unwrap_or_default()
        .into_iter()
        .map(season_stats)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Profile {
        uid: required(user.fb_uid, "fbUid")?,
        display_name: required(user.display_name, "displayName")?,
        connect_code: connect_code(user.connect_code)?,
        status: user.status,
        subscription: user.active_subscription.map(Into::into),
        ranked: ranked_stats(ranked, "rankedNetplayProfile.id")?,
        history,
    })
}

/// Same rules for the live profile and every season snapshot; only the field
/// path reported on a bad id differs.
fn ranked_stats(fields: ProfileFields, id_field: &'static str) -> Result<RankedStats, MalformedResponseError> {
    let id = parse_identifier(id_field, &required(fields.id, id_field)?)?;

    let characters = fields
        .characters
        .unwrap_or_default()
        .into_iter()
        .map(|character| -> Result<CharacterUsage, MalformedResponseError> {
            let id = match character.id {
                Some(id) => Some(parse_identifier("characters.id", &id)?),
                None => None,
            };

            Ok(CharacterUsage {
                id,
                character: character.character,
                game_count: character.game_count,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(RankedStats {
        id,
        rating_ordinal: fields.rating_ordinal.unwrap_or(0.0),
        rating_update_count: fields.rating_update_count,
        wins: fields.wins,
        losses: fields.losses,
        daily_global_placement: fields.daily_global_placement.unwrap_or(0),
        daily_regional_placement: fields.daily_regional_placement.unwrap_or(0),
        continent: fields.continent,
        characters,
    })
}

fn season_stats(profile: SeasonProfile) -> Result<SeasonStats, MalformedResponseError> {
    let season = required(profile.season, "netplayProfiles.season")?;

    let ended_at = match season.ended_at {
        Some(ended_at) => Some(parse_timestamp("netplayProfiles.season.endedAt", &ended_at)?),
        None => None,
    };

    let season = Season {
        id: required(season.id, "netplayProfiles.season.id")?,
        started_at: parse_timestamp(
            "netplayProfiles.season.startedAt",
            &required(season.started_at, "netplayProfiles.season.startedAt")?,
        )?,
        ended_at,
        name: required(season.name, "netplayProfiles.season.name")?,
        status: required(season.status, "netplayProfiles.season.status")?,
    };

    Ok(SeasonStats {
        season,
        stats: ranked_stats(profile.fields, "netplayProfiles.id")?,
    })
}
