//! Bounded fan-out of completion calls.
//!
//! Every request in a batch runs on its own tokio task, but at most
//! `capacity` of them hold a semaphore permit and talk to the backend at
//! once. Workers report back over a channel; the caller owns all results.

use stanza_completion::{CompletionClient, CompletionRequest};
use stanza_core::Candidate;
use stanza_error::{CompletionError, CompletionErrorKind};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Semaphore, mpsc};
use tracing::{debug, instrument};

/// Outcome of one dispatched request.
pub type AttemptOutcome = Result<Candidate, CompletionError>;

/// Worker pool with a fixed ceiling on in-flight completion calls.
#[derive(Debug, Clone)]
pub struct WorkerPool {
    semaphore: Arc<Semaphore>,
    capacity: usize,
}

impl WorkerPool {
    /// Creates a pool allowing `capacity` concurrent calls (at least 1).
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            semaphore: Arc::new(Semaphore::new(capacity)),
            capacity,
        }
    }

    /// Maximum concurrent calls.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Runs every request and waits for all of them to finish.
    ///
    /// The returned outcomes are in the same order as `requests`, regardless
    /// of completion order. A call that exceeds `timeout` yields
    /// [`CompletionErrorKind::Timeout`]; a worker that dies without reporting
    /// yields [`CompletionErrorKind::Aborted`].
    #[instrument(skip(self, client, requests), fields(batch = requests.len(), capacity = self.capacity))]
    pub async fn run_batch<C>(
        &self,
        client: &Arc<C>,
        requests: Vec<CompletionRequest>,
        timeout: Duration,
    ) -> Vec<AttemptOutcome>
    where
        C: CompletionClient + ?Sized + 'static,
    {
        let count = requests.len();
        let (tx, mut rx) = mpsc::channel::<(usize, AttemptOutcome)>(count.max(1));

        for (index, request) in requests.into_iter().enumerate() {
            let tx = tx.clone();
            let client = Arc::clone(client);
            let semaphore = Arc::clone(&self.semaphore);

            tokio::spawn(async move {
                let outcome = match semaphore.acquire_owned().await {
                    Ok(_permit) => {
                        match tokio::time::timeout(timeout, client.complete(&request)).await {
                            Ok(result) => {
                                result.map(|text| Candidate::new(text, *request.temperature()))
                            }
                            Err(_) => Err(CompletionError::new(CompletionErrorKind::Timeout(
                                format!("no response within {} ms", timeout.as_millis()),
                            ))),
                        }
                    }
                    Err(e) => Err(CompletionError::new(CompletionErrorKind::Aborted(
                        e.to_string(),
                    ))),
                };

                if tx.send((index, outcome)).await.is_err() {
                    debug!(index, "Batch receiver dropped before result was sent");
                }
            });
        }

        // Last sender closes when every worker has reported or died
        drop(tx);

        let mut slots: Vec<Option<AttemptOutcome>> = (0..count).map(|_| None).collect();
        while let Some((index, outcome)) = rx.recv().await {
            slots[index] = Some(outcome);
        }

        slots
            .into_iter()
            .map(|slot| {
                slot.unwrap_or_else(|| {
                    Err(CompletionError::new(CompletionErrorKind::Aborted(
                        "worker exited without reporting".to_string(),
                    )))
                })
            })
            .collect()
    }
}
