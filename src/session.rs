//! Resolution sessions
//!
//! A session owns at most one in-flight resolution. Submitting a new name
//! aborts the previous request so a slow lookup for an old name can never
//! deliver its results after the new one.

use tokio::task::JoinHandle;
use tracing::debug;

use crate::client::NameService;
use crate::error::{EnsQrError, Result};
use crate::pipeline::ResolutionPipeline;
use crate::records::ResolutionOutcome;

/// Handle to one submitted resolution
pub struct ResolutionTicket {
    id: u64,
    name: String,
    handle: JoinHandle<Result<ResolutionOutcome>>,
}

impl ResolutionTicket {
    /// Sequence number of the request within its session
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Name being resolved
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Wait for the outcome; a superseded request yields [`EnsQrError::Superseded`]
    pub async fn outcome(self) -> Result<ResolutionOutcome> {
        match self.handle.await {
            Ok(result) => result,
            Err(e) if e.is_cancelled() => Err(EnsQrError::Superseded(self.name)),
            Err(e) => Err(EnsQrError::Task(e.to_string())),
        }
    }
}

/// Serializes resolution requests so only the latest one can complete
pub struct ResolutionSession<S> {
    pipeline: ResolutionPipeline<S>,
    next_id: u64,
    in_flight: Option<tokio::task::AbortHandle>,
}

impl<S> ResolutionSession<S>
where
    S: NameService + 'static,
{
    pub fn new(pipeline: ResolutionPipeline<S>) -> Self {
        Self {
            pipeline,
            next_id: 0,
            in_flight: None,
        }
    }

    /// Start resolving `name`, cancelling whatever was in flight
    pub fn submit(&mut self, name: impl Into<String>) -> ResolutionTicket {
        self.cancel();

        let name = name.into();
        self.next_id += 1;
        let id = self.next_id;

        let pipeline = self.pipeline.clone();
        let task_name = name.clone();
        let handle = tokio::spawn(async move { pipeline.resolve(&task_name).await });

        debug!("Submitted resolution #{} for {}", id, name);
        self.in_flight = Some(handle.abort_handle());

        ResolutionTicket { id, name, handle }
    }

    /// Abort the in-flight request, if any
    pub fn cancel(&mut self) {
        if let Some(previous) = self.in_flight.take() {
            if !previous.is_finished() {
                debug!("Cancelling superseded resolution");
            }
            previous.abort();
        }
    }
}

impl<S> Drop for ResolutionSession<S> {
    fn drop(&mut self) {
        if let Some(previous) = self.in_flight.take() {
            previous.abort();
        }
    }
}
