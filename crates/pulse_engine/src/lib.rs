//! GitPulse engine: upstream IO and the fan-out/join aggregator.
mod aggregate;
mod fetch;
mod profile;
mod types;

pub use aggregate::Aggregator;
pub use fetch::{FetchSettings, ReqwestFetcher, UpstreamFetcher};
pub use profile::{parse_profile, GithubProfile, ProfileError};
pub use types::{
    AggregateError, Dashboard, FailureKind, FetchError, FetchOutput, Panel, PanelBody,
};
