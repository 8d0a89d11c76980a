//! Response adapters, one per known revision of the profile query.
//!
//! Each revision module owns its wire types, the query text that produces
//! them and a single conversion into `Profile`. Only leaf conversions that are
//! identical across revisions (connect code, subscription, identifiers) live
//! here.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::{MalformedResponseError, Profile, Subscription};

mod flat;
mod v1;
mod v2;
mod v3;

/// Known revisions of the profile response shape.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum SchemaVersion {
    /// Flat ranked profile with an integer id.
    V1,

    /// Flat ranked profile with the id sent as a string.
    V2,

    /// Fragment-based profile with string ids and per-season history. This is
    /// what the live service answers with.
    #[default]
    V3,
}

impl SchemaVersion {
    pub const ALL: [SchemaVersion; 3] = [Self::V1, Self::V2, Self::V3];

    /// Query text that produces this revision's response shape.
    pub fn query(self) -> &'static str {
        match self {
            Self::V1 => v1::QUERY,
            Self::V2 => v2::QUERY,
            Self::V3 => v3::QUERY,
        }
    }

    /// Name of the operation declared in `query()`, if the revision names it.
    pub fn operation_name(self) -> Option<&'static str> {
        match self {
            Self::V1 | Self::V2 => None,
            Self::V3 => Some(v3::OPERATION_NAME),
        }
    }

    /// Guesses the revision of a `data` payload from its structure.
    ///
    /// Season history only exists in V3; otherwise the type of the ranked
    /// profile id tells V1 and V2 apart.
    pub fn detect(data: &Value) -> Self {
        let user = &data["getConnectCode"]["user"];

        if user.get("netplayProfiles").is_some() {
            return Self::V3;
        }

        match user["rankedNetplayProfile"]["id"].is_string() {
            true => Self::V2,
            false => Self::V1,
        }
    }
}

impl fmt::Display for SchemaVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::V1 => f.write_str("v1"),
            Self::V2 => f.write_str("v2"),
            Self::V3 => f.write_str("v3"),
        }
    }
}

impl FromStr for SchemaVersion {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_ascii_lowercase().as_str() {
            "v1" | "1" => Ok(Self::V1),
            "v2" | "2" => Ok(Self::V2),
            "v3" | "3" => Ok(Self::V3),
            _ => Err(format!("unknown schema version `{value}` (expected v1, v2 or v3)")),
        }
    }
}

/// Converts a `data` payload of the given revision into a `Profile`.
pub fn normalize(data: &Value, version: SchemaVersion) -> Result<Profile, MalformedResponseError> {
    match version {
        SchemaVersion::V1 => v1::normalize(data),
        SchemaVersion::V2 => v2::normalize(data),
        SchemaVersion::V3 => v3::normalize(data),
    }
}

/// Like `normalize`, probing the payload for its revision first.
pub fn normalize_detected(data: &Value) -> Result<Profile, MalformedResponseError> {
    let version = SchemaVersion::detect(data);
    tracing::debug!(%version, "Detected profile response schema");

    normalize(data, version)
}

/// Deserializes `data` into a revision's wire type.
fn decode<T>(data: &Value, version: SchemaVersion) -> Result<T, MalformedResponseError>
where
    T: serde::de::DeserializeOwned,
{
    T::deserialize(data).map_err(|source| {
        tracing::error!(error = ?source, %version, "Profile response does not match schema");
        MalformedResponseError::Shape { version, source }
    })
}

#[derive(Debug, serde::Deserialize)]
struct ConnectCodeField {
    code: Option<String>,
}

#[derive(Debug, serde::Deserialize)]
struct SubscriptionField {
    level: String,

    #[serde(alias = "hasGiftSub", default)]
    has_gift_sub: bool,
}

impl From<SubscriptionField> for Subscription {
    fn from(field: SubscriptionField) -> Self {
        Self {
            level: field.level,
            gifted: field.has_gift_sub,
        }
    }
}

fn connect_code(field: Option<ConnectCodeField>) -> Result<String, MalformedResponseError> {
    field
        .and_then(|field| field.code)
        .ok_or(MalformedResponseError::MissingField("connectCode.code"))
}

fn required<T>(value: Option<T>, field: &'static str) -> Result<T, MalformedResponseError> {
    value.ok_or(MalformedResponseError::MissingField(field))
}

/// Parses an identifier the server sends as a numeric string.
fn parse_identifier(field: &'static str, value: &str) -> Result<i64, MalformedResponseError> {
    value.parse().map_err(|_| MalformedResponseError::InvalidInteger {
        field,
        value: value.to_string(),
    })
}

fn parse_timestamp(field: &'static str, value: &str) -> Result<DateTime<Utc>, MalformedResponseError> {
    DateTime::parse_from_rfc3339(value)
        .map(|timestamp| timestamp.with_timezone(&Utc))
        .map_err(|_| MalformedResponseError::InvalidTimestamp {
            field,
            value: value.to_string(),
        })
}
