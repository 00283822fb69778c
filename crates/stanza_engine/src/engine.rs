//! Round-based orchestration of concurrent completion attempts.

use crate::{
    ContextSampler, EngineConfig, InsertOutcome, ResultSet, TemperatureScheduler, WorkerPool,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use stanza_completion::{CompletionClient, CompletionRequest};
use stanza_core::{Alternatives, Attempt, GenerationRequest};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

/// Produces distinct candidate next-lines for a poem.
///
/// Each round dispatches one attempt per missing alternative through a
/// bounded [`WorkerPool`], waits for the whole batch, then inserts successful
/// candidates into a [`ResultSet`] in issue order. Rounds continue until the
/// target is met or `max_rounds` is exhausted. Backend failures never surface
/// as errors; they only shorten the result.
///
/// Cloning is cheap and clones may run `generate` concurrently.
pub struct AlternativeEngine<C: ?Sized> {
    client: Arc<C>,
    config: Arc<EngineConfig>,
    sampler: ContextSampler,
    scheduler: TemperatureScheduler,
    pool: WorkerPool,
}

impl<C: ?Sized> Clone for AlternativeEngine<C> {
    fn clone(&self) -> Self {
        Self {
            client: Arc::clone(&self.client),
            config: Arc::clone(&self.config),
            sampler: self.sampler,
            scheduler: self.scheduler,
            pool: self.pool.clone(),
        }
    }
}

impl<C: ?Sized> std::fmt::Debug for AlternativeEngine<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AlternativeEngine")
            .field("config", &self.config)
            .field("pool_capacity", &self.pool.capacity())
            .finish_non_exhaustive()
    }
}

impl<C> AlternativeEngine<C>
where
    C: CompletionClient + ?Sized + 'static,
{
    /// Creates an engine around a shared completion client.
    pub fn new(client: Arc<C>, config: EngineConfig) -> Self {
        let sampler =
            ContextSampler::new(*config.truncation_probability(), *config.max_context_lines());
        let pool = WorkerPool::new(*config.max_concurrency());
        Self {
            client,
            config: Arc::new(config),
            sampler,
            scheduler: TemperatureScheduler::new(),
            pool,
        }
    }

    /// Engine configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Generates alternatives for a request using the configured limits.
    pub async fn generate_for(&self, request: &GenerationRequest) -> Alternatives {
        self.generate(request.current_text()).await
    }

    /// Generates alternatives with the configured limits and a fresh random source.
    pub async fn generate(&self, current_text: &str) -> Alternatives {
        let mut rng = StdRng::from_entropy();
        self.generate_with_rng(current_text, &mut rng).await
    }

    /// Generates alternatives with the configured limits and the given random source.
    pub async fn generate_with_rng<R: Rng + Send>(
        &self,
        current_text: &str,
        rng: &mut R,
    ) -> Alternatives {
        self.generate_bounded(
            current_text,
            *self.config.target_count(),
            *self.config.max_rounds(),
            rng,
        )
        .await
    }

    /// Generates up to `target_count` alternatives in at most `max_rounds` rounds.
    #[instrument(
        skip(self, current_text, rng),
        fields(provider = self.client.provider_name(), text_len = current_text.len())
    )]
    pub async fn generate_bounded<R: Rng + Send>(
        &self,
        current_text: &str,
        target_count: usize,
        max_rounds: usize,
        rng: &mut R,
    ) -> Alternatives {
        let mut results = ResultSet::new(target_count);
        let mut round = 0;

        while !results.is_full() && round < max_rounds {
            let remaining = results.remaining();
            let attempts = self.plan_round(current_text, round, remaining, rng);
            debug!(round, remaining, "Dispatching round");

            let requests = attempts.iter().map(|a| self.request_for(a)).collect();
            let outcomes = self
                .pool
                .run_batch(&self.client, requests, self.config.attempt_timeout())
                .await;

            let before = results.len();
            for (attempt, outcome) in attempts.iter().zip(outcomes) {
                if results.is_full() {
                    break;
                }
                match outcome {
                    Ok(candidate) => match results.insert(candidate) {
                        InsertOutcome::Inserted => {
                            debug!(round, index = attempt.index(), "Accepted candidate")
                        }
                        InsertOutcome::Duplicate => {
                            debug!(round, index = attempt.index(), "Duplicate candidate")
                        }
                        InsertOutcome::Full => break,
                    },
                    Err(e) => {
                        debug!(round, index = attempt.index(), error = %e, "Attempt failed");
                    }
                }
            }

            if results.len() == before {
                debug!(round, "Round produced no new candidates");
            }
            round += 1;
        }

        if results.is_empty() && target_count > 0 {
            warn!(rounds = round, "No alternatives generated");
        } else if results.len() < target_count {
            warn!(
                rounds = round,
                obtained = results.len(),
                target = target_count,
                "Returning fewer alternatives than requested"
            );
        } else {
            info!(rounds = round, obtained = results.len(), "Generated alternatives");
        }

        results.into_alternatives(round)
    }

    /// Builds the attempts for one round, sampling context and temperature per attempt.
    pub fn plan_round<R: Rng>(
        &self,
        current_text: &str,
        round: usize,
        count: usize,
        rng: &mut R,
    ) -> Vec<Attempt> {
        let temperatures = self.scheduler.temperatures_for_round(round, count, rng);
        temperatures
            .into_iter()
            .enumerate()
            .map(|(index, temperature)| {
                let prompt = self.sampler.sample(current_text, rng);
                Attempt::new(round, index, prompt, temperature)
            })
            .collect()
    }

    fn request_for(&self, attempt: &Attempt) -> CompletionRequest {
        CompletionRequest::new(
            attempt.prompt().clone(),
            *attempt.temperature(),
            *self.config.max_tokens(),
            self.config.stop().clone(),
        )
    }
}
