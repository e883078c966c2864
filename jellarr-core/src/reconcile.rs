use std::{error::Error, fmt::Display};

use async_trait::async_trait;
use tracing::{info, instrument};

use crate::{
    compare::SystemDiff,
    model::{SystemSpec, SystemState},
};

/// Access to the server's system configuration.
///
/// `update_system` must apply only the fields present in the spec; everything
/// else is left as it is on the server.
#[async_trait]
pub trait SystemClient: Send + Sync {
    async fn get_system(&self) -> anyhow::Result<SystemState>;
    async fn update_system(&self, spec: &SystemSpec) -> anyhow::Result<()>;
}

#[async_trait]
impl<T: SystemClient + ?Sized> SystemClient for &T {
    async fn get_system(&self) -> anyhow::Result<SystemState> {
        (**self).get_system().await
    }
    async fn update_system(&self, spec: &SystemSpec) -> anyhow::Result<()> {
        (**self).update_system(spec).await
    }
}

#[async_trait]
impl<T: SystemClient + ?Sized> SystemClient for Box<T> {
    async fn get_system(&self) -> anyhow::Result<SystemState> {
        (**self).get_system().await
    }
    async fn update_system(&self, spec: &SystemSpec) -> anyhow::Result<()> {
        (**self).update_system(spec).await
    }
}

/// What a successful reconciliation did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// No field differed; nothing was sent.
    UpToDate,
    /// An update was sent and accepted.
    Updated,
}

/// The phase in which reconciliation failed, wrapping the client's error.
///
/// Displays as the phase alone; the client error is the `source()`, so
/// `{:#}` on an `anyhow::Error` renders `get system: <cause>`.
#[derive(Debug)]
pub enum ReconcileError {
    Fetch(anyhow::Error),
    Update(anyhow::Error),
}
impl Display for ReconcileError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReconcileError::Fetch(_) => write!(f, "get system"),
            ReconcileError::Update(_) => write!(f, "update system"),
        }
    }
}
impl Error for ReconcileError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        let cause: &(dyn Error + 'static) = self.cause().as_ref();
        Some(cause)
    }
}

impl ReconcileError {
    /// The underlying client error.
    pub fn cause(&self) -> &anyhow::Error {
        match self {
            ReconcileError::Fetch(e) | ReconcileError::Update(e) => e,
        }
    }
}

pub struct Reconciler<C> {
    client: C,
}

impl<C: SystemClient> Reconciler<C> {
    pub fn new(client: C) -> Self {
        Reconciler { client }
    }

    /// Fetch the current state and compare it with `desired`, without
    /// changing anything.
    pub async fn plan(&self, desired: &SystemSpec) -> Result<SystemDiff, ReconcileError> {
        let current = self
            .client
            .get_system()
            .await
            .map_err(ReconcileError::Fetch)?;
        let diff = SystemDiff::between(&current, desired);
        log_changes(&current, desired, &diff);
        Ok(diff)
    }

    /// Bring the server's system configuration in line with `desired`.
    ///
    /// When any present field differs, all present fields are sent, not only
    /// the differing ones.
    #[instrument(name = "reconcile system", skip_all)]
    pub async fn reconcile(&self, desired: &SystemSpec) -> Result<Outcome, ReconcileError> {
        let diff = self.plan(desired).await?;

        if !diff.has_changes() {
            info!("system config up to date");
            return Ok(Outcome::UpToDate);
        }

        info!("updating system config");
        self.client
            .update_system(desired)
            .await
            .map_err(ReconcileError::Update)?;
        info!("updated system config");
        Ok(Outcome::Updated)
    }
}

fn log_changes(current: &SystemState, desired: &SystemSpec, diff: &SystemDiff) {
    if let (true, Some(next)) = (diff.enable_metrics, desired.enable_metrics) {
        info!("EnableMetrics changed: {} → {}", current.enable_metrics, next);
    }
    if let (true, Some(next)) = (diff.plugin_repositories, &desired.plugin_repositories) {
        info!(
            "PluginRepositories changed: {:?} → {:?}",
            current.plugin_repositories, next
        );
    }
    if let (true, Some(next)) = (diff.trickplay_options, &desired.trickplay_options) {
        info!("TrickplayOptions changed: {:?} → {:?}", current.trickplay_options, next);
    }
}
