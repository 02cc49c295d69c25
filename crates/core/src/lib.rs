//! Domain logic for the eXPlora task discovery and claim engine.
//!
//! Pure modules (`geo`, `scoring`, `preferences`) carry no I/O. The two
//! orchestrating services, [`discovery::discover`] and [`claim::claim`], are
//! generic over the [`store::TaskStore`] persistence contract.

pub mod claim;
pub mod discovery;
pub mod error;
pub mod events;
pub mod geo;
pub mod preferences;
pub mod scoring;
pub mod store;
pub mod tasks;
pub mod types;
pub mod users;

#[cfg(test)]
pub(crate) mod test_support;
