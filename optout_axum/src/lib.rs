//! optout-axum - Axum handlers for the optout library
//!
//! Mount [`optout_router`] under [`OPTOUT_ROUTE_PREFIX`] after calling [`init`].

mod config;
mod error;
mod preferences;
mod router;
mod session;
mod unsubscribe;

#[cfg(test)]
mod test_utils;

pub use config::OPTOUT_IDENTITY_HEADER;
pub use router::{optout_router, optout_router_no_trace};
pub use session::{AuthRejection, AuthUser};

// Re-export the route prefix and initialization function from the optout crate
pub use optout::{OPTOUT_ROUTE_PREFIX, init, issue_unsubscribe_token};
