//! A session shared between async tasks.

use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::debug;

use super::RoutingSession;
use crate::domain::PathCriteria;
use crate::planner::{PathError, PathRequest, PathResult};

/// Thread-safe handle to a [`RoutingSession`].
///
/// Queries run on tokio's blocking pool under a read lock, so a long
/// Bellman-Ford run never stalls the async runtime. Mutations take the write
/// lock.
#[derive(Clone)]
pub struct SharedSession {
    inner: Arc<RwLock<RoutingSession>>,
}

impl SharedSession {
    pub fn new(session: RoutingSession) -> Self {
        Self {
            inner: Arc::new(RwLock::new(session)),
        }
    }

    /// Run a path query on a blocking worker thread.
    pub async fn least_cost_path(
        &self,
        criteria: PathCriteria,
        request: PathRequest,
    ) -> Result<PathResult, PathError> {
        let inner = Arc::clone(&self.inner);
        let handle = tokio::task::spawn_blocking(move || {
            let session = inner.blocking_read();
            session.least_cost_path(criteria, &request)
        });
        match handle.await {
            Ok(result) => result,
            Err(err) => {
                debug!(error = %err, "query worker failed");
                Err(PathError::Worker(err.to_string()))
            }
        }
    }

    /// Read session state.
    pub async fn read<R>(&self, f: impl FnOnce(&RoutingSession) -> R) -> R {
        let guard = self.inner.read().await;
        f(&guard)
    }

    /// Mutate session state, e.g. to run an overlay command.
    pub async fn write<R>(&self, f: impl FnOnce(&mut RoutingSession) -> R) -> R {
        let mut guard = self.inner.write().await;
        f(&mut guard)
    }
}
