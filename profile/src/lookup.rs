use serde_json::{Value, json};

use slippi_gg_api::APIClient;

use crate::{ConnectCode, LookupError, Profile, SchemaVersion, normalize};

/// Fetches and normalizes player profiles by connect code.
///
/// Each call is a single request: nothing is cached and nothing is retried.
#[derive(Clone, Debug)]
pub struct ProfileLookup {
    api_client: APIClient,
    endpoint: String,
    schema: SchemaVersion,
}

impl ProfileLookup {
    /// Creates a lookup that queries `endpoint` with the live schema revision.
    pub fn new<Url>(api_client: APIClient, endpoint: Url) -> Self
    where
        Url: Into<String>,
    {
        Self {
            api_client,
            endpoint: endpoint.into(),
            schema: SchemaVersion::default(),
        }
    }

    /// Pins the schema revision to query (and parse) with.
    pub fn with_schema(mut self, schema: SchemaVersion) -> Self {
        self.schema = schema;
        self
    }

    pub fn schema(&self) -> SchemaVersion {
        self.schema
    }

    /// Looks up the profile registered under `code`.
    ///
    /// Codes that can't possibly be valid are rejected before anything goes
    /// over the network.
    pub fn fetch(&self, code: &str) -> Result<Profile, LookupError> {
        let code = ConnectCode::parse(code)?;

        tracing::info!(%code, schema = %self.schema, "Fetching profile");

        let mut request = self
            .api_client
            .graphql(self.schema.query())
            .endpoint(self.endpoint.clone())
            .variables(json!({ "cc": code.as_str() }));

        if let Some(name) = self.schema.operation_name() {
            request = request.operation_name(name);
        }

        let data: Value = request.send()?;

        profile_from_data(&data, code, self.schema)
    }
}

/// Turns a `data` payload into a profile, treating an absent user as "not found"
/// rather than a malformed response.
fn profile_from_data(data: &Value, code: ConnectCode, schema: SchemaVersion) -> Result<Profile, LookupError> {
    if data.pointer("/getConnectCode/user").is_none_or(Value::is_null) {
        tracing::debug!(%code, "No user registered for connect code");
        return Err(LookupError::NotFound(code));
    }

    let profile = normalize(data, schema)?;

    tracing::debug!(
        %code,
        uid = %profile.uid,
        rating = profile.ranked.rating_ordinal,
        seasons = profile.history.len(),
        "Normalized profile"
    );

    Ok(profile)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{InvalidInputError, MalformedResponseError};

    fn code() -> ConnectCode {
        ConnectCode::parse("MORS#762").unwrap()
    }

    #[test]
    fn test_invalid_code_is_rejected_before_any_request() {
        // Nothing listens here; reaching the network would surface a transport error instead.
        let lookup = ProfileLookup::new(APIClient::default(), "http://127.0.0.1:9/graphql");

        assert!(matches!(
            lookup.fetch("TOOLONGNAME#1"),
            Err(LookupError::InvalidInput(InvalidInputError::ConnectCode(code))) if code == "TOOLONGNAME#1"
        ));
    }

    #[test]
    fn test_missing_user_is_not_found() {
        for data in [
            json!({ "getConnectCode": null }),
            json!({ "getConnectCode": { "user": null } }),
            json!({}),
        ] {
            assert!(matches!(
                profile_from_data(&data, code(), SchemaVersion::V3),
                Err(LookupError::NotFound(found)) if found.as_str() == "MORS#762"
            ));
        }
    }

    #[test]
    fn test_present_user_is_normalized_with_the_configured_schema() {
        let data = json!({ "getConnectCode": { "user": {
            "fbUid": "abc",
            "displayName": "Mors",
            "connectCode": { "code": "MORS#762" },
            "rankedNetplayProfile": {
                "id": "5",
                "ratingUpdateCount": 0,
                "wins": 0,
                "losses": 0
            }
        } } });

        let profile = profile_from_data(&data, code(), SchemaVersion::V2).unwrap();
        assert_eq!(profile.ranked.id, 5);

        assert!(matches!(
            profile_from_data(&data, code(), SchemaVersion::V1),
            Err(LookupError::MalformedResponse(MalformedResponseError::Shape { version: SchemaVersion::V1, .. }))
        ));
    }

    #[test]
    fn test_schema_defaults_to_live_revision() {
        let lookup = ProfileLookup::new(APIClient::default(), "http://127.0.0.1:9/graphql");
        assert_eq!(lookup.schema(), SchemaVersion::V3);
        assert_eq!(lookup.with_schema(SchemaVersion::V1).schema(), SchemaVersion::V1);
    }
}
