//! Player profiles as reported by the slippi.gg ranked ladder.
//!
//! The GraphQL API has shipped several response shapes for the same data over
//! time. Everything in here funnels those into one `Profile` model: each known
//! schema revision gets its own wire types and adapter (see `schema`), and the
//! rest of the crate only ever deals with the normalized form.
//!
//! ```no_run
//! use slippi_gg_api::{APIClient, DEFAULT_GRAPHQL_URL};
//! use slippi_profile::ProfileLookup;
//!
//! fn show(code: &str) -> Result<(), slippi_profile::LookupError> {
//!     let lookup = ProfileLookup::new(APIClient::default(), DEFAULT_GRAPHQL_URL);
//!     let profile = lookup.fetch(code)?;
//!
//!     println!("{} is {}", profile.display_name, profile.rank());
//!     Ok(())
//! }
//! ```

pub mod characters;

mod connect_code;
pub use connect_code::{ConnectCode, validate_connect_code};

mod error;
pub use error::{InvalidInputError, LookupError, MalformedResponseError};

mod lookup;
pub use lookup::ProfileLookup;

mod model;
pub use model::{CharacterUsage, Profile, RankedStats, Season, SeasonStats, Subscription};

pub mod schema;
pub use schema::{SchemaVersion, normalize, normalize_detected};

pub use slippi_rank::SlippiRank;
