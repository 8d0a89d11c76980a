use std::io;
use std::net::{SocketAddr, ToSocketAddrs};
use std::ops::Deref;
use std::time::Duration;

use ureq::{Agent, AgentBuilder, Resolver};

mod graphql;
pub use graphql::{GraphQLBuilder, GraphQLError};

/// The GraphQL gateway used when a caller doesn't configure one.
pub const DEFAULT_GRAPHQL_URL: &str = "https://gql-gateway-dot-slippi.uc.r.appspot.com/graphql";

/// A DNS resolver that only accepts IPV4 connections.
struct Ipv4Resolver;

impl Resolver for Ipv4Resolver {
    /// Forces IPV4 addresses only.
    fn resolve(&self, netloc: &str) -> io::Result<Vec<SocketAddr>> {
        ToSocketAddrs::to_socket_addrs(netloc).map(|iter| {
            let vec = iter.filter(|s| s.is_ipv4()).collect::<Vec<SocketAddr>>();

            if vec.is_empty() {
                tracing::warn!("Failed to get any IPV4 addresses. Does the DNS server support it?");
            }

            vec
        })
    }
}

/// Default timeout that we use on client types.
pub fn default_timeout() -> Duration {
    Duration::from_millis(5000)
}

/// A wrapper type that simply dereferences to a `ureq::Agent`.
///
/// Anything that can be called on a `ureq::Agent` can be called on this type.
/// Cloning is cheap and the clone shares the underlying connection pool, so pass
/// it freely to other threads.
#[derive(Clone, Debug)]
pub struct APIClient(Agent);

impl APIClient {
    /// Creates and initializes a new APIClient.
    ///
    /// The returned client will only resolve to IPV4 addresses at the moment
    /// due to upstream issues with GCP flex instances and IPV6.
    pub fn new(user_agent: &str, timeout: Duration) -> Self {
        let http_client = AgentBuilder::new()
            .resolver(Ipv4Resolver)
            .max_idle_connections(5)
            .timeout(timeout)
            .user_agent(user_agent)
            .build();

        Self(http_client)
    }

    /// Returns a type that can be used to construct GraphQL requests.
    pub fn graphql<Query>(&self, query: Query) -> GraphQLBuilder
    where
        Query: Into<String>,
    {
        GraphQLBuilder::new(self.clone(), query.into())
    }
}

impl Default for APIClient {
    fn default() -> Self {
        Self::new(concat!("slippi-lookup/", env!("CARGO_PKG_VERSION")), default_timeout())
    }
}

impl Deref for APIClient {
    type Target = Agent;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}
