//! Per-screen controllers.
//!
//! Each controller is the single writer of its screen's view state: it owns
//! the `watch` sender, and every action method takes `&mut self`, so two
//! updates to the same state can never interleave. Renderers observe the
//! latest value through [`tokio::sync::watch::Receiver`] handles.

mod tariffs;
mod usage;

pub use tariffs::TariffsController;
pub use usage::UsageController;
