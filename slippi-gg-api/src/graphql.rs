use std::borrow::Cow;

use serde_json::{Map, Value};

use super::{APIClient, DEFAULT_GRAPHQL_URL};

/// Various errors that can happen during a GraphQL request.
#[derive(Debug, thiserror::Error)]
pub enum GraphQLError {
    #[error("Failed to format the server's error payload: {0}")]
    FailedErrorFormatting(serde_json::Error),

    #[error("Response is missing the `{0}` field")]
    MissingResponseField(String),

    #[error("Response has no `data` payload")]
    MissingResponseData,

    #[error(transparent)]
    Request(Box<ureq::Error>),

    #[error(transparent)]
    IO(#[from] std::io::Error),

    #[error("Response is not valid JSON: {0}")]
    InvalidResponseJSON(serde_json::Error),

    #[error("Response does not match the expected type: {0}")]
    InvalidResponseType(serde_json::Error),

    #[error("Server returned errors: {0}")]
    Server(String),
}

/// A builder pattern that makes constructing and parsing GraphQL
/// responses simpler.
///
/// You generally shouldn't create this type yourself; call `.graphql()`
/// on an `APIClient` instance to receive one for use.
#[derive(Debug)]
pub struct GraphQLBuilder {
    client: APIClient,
    endpoint: Cow<'static, str>,
    response_field: Option<Cow<'static, str>>,
    body: Map<String, Value>,
}

impl GraphQLBuilder {
    /// Creates and returns a new GraphQLBuilder type.
    pub fn new(client: APIClient, query: String) -> Self {
        let mut body = Map::new();
        body.insert("query".into(), Value::String(query));

        Self {
            client,
            endpoint: Cow::Borrowed(DEFAULT_GRAPHQL_URL),
            response_field: None,
            body,
        }
    }

    /// Overrides the gateway this request is sent to.
    pub fn endpoint<Url>(mut self, url: Url) -> Self
    where
        Url: Into<Cow<'static, str>>,
    {
        self.endpoint = url.into();
        self
    }

    /// Sets optional `variables` for the GraphQL payload.
    pub fn variables(mut self, variables: Value) -> Self {
        self.body.insert("variables".into(), variables);
        self
    }

    /// Names the operation to run, for documents that declare more than one.
    pub fn operation_name(mut self, name: &str) -> Self {
        self.body.insert("operationName".into(), Value::String(name.into()));
        self
    }

    /// Sets an optional key that the response handler should use as its
    /// return type. If this is not configured, the response handler will
    /// use the entire `data` payload for deserialization.
    ///
    /// Keys starting with `/` are treated as a JSON pointer into `data`.
    pub fn data_field<Key>(mut self, key: Key) -> Self
    where
        Key: Into<Cow<'static, str>>,
    {
        self.response_field = Some(key.into());
        self
    }

    /// Consumes and sends the request, deserializing the response and yielding
    /// any errors in the process.
    pub fn send<T>(self) -> Result<T, GraphQLError>
    where
        T: serde::de::DeserializeOwned,
    {
        let response_body = self
            .client
            .post(self.endpoint.as_ref())
            .send_json(&self.body)
            .map_err(|error| {
                tracing::error!(?error, endpoint = %self.endpoint, "GraphQL request failed");
                GraphQLError::Request(Box::new(error))
            })?
            .into_string()?;

        extract(&response_body, self.response_field.as_deref())
    }
}

/// Pulls the requested payload out of a raw GraphQL response body.
pub(crate) fn extract<T>(response_body: &str, field: Option<&str>) -> Result<T, GraphQLError>
where
    T: serde::de::DeserializeOwned,
{
    // We always go through `Value` first in order to check any
    // potential errors and remove anything the caller doesn't need.
    let mut response: Value = serde_json::from_str(response_body).map_err(|error| {
        tracing::error!(?error, "Failed to deserialize GraphQL response");
        GraphQLError::InvalidResponseJSON(error)
    })?;

    // Errors will always be in the `errors` slot, so check that first.
    if let Some(errors) = response.get("errors").and_then(Value::as_array) {
        if !errors.is_empty() {
            let error_messages = serde_json::to_string_pretty(errors).map_err(|error| {
                tracing::error!(?error, "Failed to pretty-format error string");
                GraphQLError::FailedErrorFormatting(error)
            })?;

            return Err(GraphQLError::Server(error_messages));
        }
    }

    let mut data = match response.get_mut("data") {
        Some(data) if !data.is_null() => data.take(),
        _ => return Err(GraphQLError::MissingResponseData),
    };

    if let Some(field) = field {
        let slot = match field.starts_with('/') {
            true => data.pointer_mut(field),
            false => data.get_mut(field),
        };

        data = slot
            .ok_or_else(|| GraphQLError::MissingResponseField(field.to_string()))?
            .take();
    }

    serde_json::from_value(data).map_err(GraphQLError::InvalidResponseType)
}
