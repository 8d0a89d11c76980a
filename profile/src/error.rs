use slippi_gg_api::GraphQLError;

use crate::{ConnectCode, SchemaVersion};

/// A response that can't be turned into a `Profile`.
#[derive(Debug, thiserror::Error)]
pub enum MalformedResponseError {
    #[error("Response does not match schema {version}: {source}")]
    Shape {
        version: SchemaVersion,
        source: serde_json::Error,
    },

    #[error("Required field `{0}` is missing")]
    MissingField(&'static str),

    #[error("Field `{field}` is not a valid integer: {value:?}")]
    InvalidInteger { field: &'static str, value: String },

    #[error("Field `{field}` is not a valid timestamp: {value:?}")]
    InvalidTimestamp { field: &'static str, value: String },
}

/// Caller-supplied input rejected before any request is made.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum InvalidInputError {
    #[error("`{0}` is not a valid connect code (expected NAME#NUMBER)")]
    ConnectCode(String),
}

/// Everything that can go wrong looking up a profile end to end.
#[derive(Debug, thiserror::Error)]
pub enum LookupError {
    #[error(transparent)]
    InvalidInput(#[from] InvalidInputError),

    #[error("No player is registered under {0}")]
    NotFound(ConnectCode),

    #[error("Profile request failed: {0}")]
    Transport(#[from] GraphQLError),

    #[error(transparent)]
    MalformedResponse(#[from] MalformedResponseError),
}
