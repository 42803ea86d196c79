//! GitPulse core: pure domain vocabulary for the stats aggregator.
mod catalog;
mod policy;
mod username;

pub use catalog::{
    CatalogError, Delivery, StatKind, UpstreamCatalog, UpstreamSpec, USER_SLOT,
};
pub use policy::DegradePolicy;
pub use username::{Username, UsernameError, MAX_USERNAME_LEN};
