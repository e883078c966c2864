//! Reconciliation engine for a single Jellyfin server's system configuration.
//!
//! A [`SystemSpec`] describes what an operator wants, with every field
//! optional. A [`SystemState`] is what the server currently holds. The
//! [`Reconciler`] fetches the latter through a [`SystemClient`], compares, and
//! only sends a partial update when something differs.

pub mod compare;
pub mod config;
pub mod model;
pub mod reconcile;

pub use compare::SystemDiff;
pub use config::RootConfig;
pub use model::{
    PluginRepository, SystemSpec, SystemState, TrickplayOptions, TrickplayOptionsSpec,
};
pub use reconcile::{Outcome, ReconcileError, Reconciler, SystemClient};
