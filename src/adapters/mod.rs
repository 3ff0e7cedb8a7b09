//! Concrete implementations of the collaborator traits.
//!
//! - [`OctopusApiClient`]: reqwest client for a Kraken-style REST API
//! - [`DemoEnergyApi`]: deterministic synthetic data for demo mode
//! - [`mock`]: scriptable implementations for tests

mod demo;
pub mod mock;
mod octopus_api;

pub use demo::DemoEnergyApi;
pub use octopus_api::OctopusApiClient;
