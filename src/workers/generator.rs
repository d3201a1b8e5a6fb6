use std::sync::Arc;
use std::time::Duration;

use tokio::time;
use tokio_util::sync::CancellationToken;

use crate::config::GeneratorConfig;
use crate::customer::Customer;
use crate::error::{ConfigError, GeneratorError};
use crate::metrics::GeneratorMetrics;
use crate::queue::QueueCoordinator;
use crate::random::{BoundedRandom, StdRandom};
use crate::report::{Arrival, ArrivalSink, TracingSink};

/// Produces customers at randomized intervals and hands each one to a
/// shared queue coordinator until cancelled.
///
/// Each iteration draws an inter-arrival delay and a service time, submits a
/// new customer, waits out the delay and then reports the arrival. Submission
/// is never interrupted; cancellation is observed at the top of the loop and
/// during the delay.
pub struct ArrivalGenerator<Q, R = StdRandom, S = TracingSink> {
    queue: Q,
    config: GeneratorConfig,
    random: R,
    sink: S,
    shutdown: CancellationToken,
    metrics: Arc<GeneratorMetrics>,
}

impl<Q: QueueCoordinator> ArrivalGenerator<Q> {
    pub fn new(queue: Q, config: GeneratorConfig) -> Self {
        Self {
            queue,
            config,
            random: StdRandom::from_entropy(),
            sink: TracingSink,
            shutdown: CancellationToken::new(),
            metrics: Arc::new(GeneratorMetrics::default()),
        }
    }

    pub fn with_bounds(
        queue: Q,
        min_arrival_ms: u64,
        max_arrival_ms: u64,
        min_service_ms: u64,
        max_service_ms: u64,
    ) -> Result<Self, ConfigError> {
        let config = GeneratorConfig::new(
            min_arrival_ms,
            max_arrival_ms,
            min_service_ms,
            max_service_ms,
        )?;

        Ok(Self::new(queue, config))
    }
}

impl<Q, R, S> ArrivalGenerator<Q, R, S> {
    pub fn with_random<R2: BoundedRandom>(self, random: R2) -> ArrivalGenerator<Q, R2, S> {
        ArrivalGenerator {
            queue: self.queue,
            config: self.config,
            random,
            sink: self.sink,
            shutdown: self.shutdown,
            metrics: self.metrics,
        }
    }

    pub fn with_sink<S2: ArrivalSink>(self, sink: S2) -> ArrivalGenerator<Q, R, S2> {
        ArrivalGenerator {
            queue: self.queue,
            config: self.config,
            random: self.random,
            sink,
            shutdown: self.shutdown,
            metrics: self.metrics,
        }
    }

    /// Replaces the generator's own token, typically with a child of a
    /// process-wide shutdown token.
    pub fn with_shutdown(mut self, shutdown: CancellationToken) -> Self {
        self.shutdown = shutdown;
        self
    }

    pub fn with_metrics(mut self, metrics: Arc<GeneratorMetrics>) -> Self {
        self.metrics = metrics;
        self
    }

    /// Handle for stopping the generator. Cancelling more than once has no
    /// further effect.
    pub fn cancellation(&self) -> CancellationToken {
        self.shutdown.clone()
    }

    pub fn metrics(&self) -> Arc<GeneratorMetrics> {
        self.metrics.clone()
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }
}

impl<Q, R, S> ArrivalGenerator<Q, R, S>
where
    Q: QueueCoordinator,
    R: BoundedRandom,
    S: ArrivalSink,
{
    /// Runs until cancelled, returning `Ok(())`. A customer the coordinator
    /// refuses ends the run with [`GeneratorError::Rejected`].
    pub async fn run(mut self) -> Result<(), GeneratorError> {
        let arrival = self.config.arrival();
        let service = self.config.service();

        tracing::info!(
            arrival_min_ms = arrival.min_duration().as_millis(),
            arrival_max_ms = arrival.max_duration().as_millis(),
            service_min_ms = service.min_duration().as_millis(),
            service_max_ms = service.max_duration().as_millis(),
            "arrival generator running"
        );

        while !self.shutdown.is_cancelled() {
            let delay = arrival.sample(&mut self.random);
            let service_time = service.sample(&mut self.random);

            let customer = Customer::new(service_time);
            let id = customer.id();
            self.metrics.record_generated();

            if let Err(source) = self.queue.accept_arrival(customer).await {
                self.metrics.record_rejected();
                tracing::warn!(customer = %id, error = %source, "customer rejected, stopping generator");
                return Err(GeneratorError::Rejected {
                    customer: id,
                    source,
                });
            }
            self.metrics.record_submitted();

            if !pause(&self.shutdown, delay).await {
                tracing::debug!(customer = %id, "cancelled during inter-arrival delay");
                break;
            }

            self.sink.arrived(Arrival {
                customer: id,
                service_time,
                delay,
            });
            self.metrics.record_reported();
        }

        tracing::info!(metrics = %self.metrics.snapshot(), "arrival generator stopped");
        Ok(())
    }
}

/// Waits out `delay`; `false` means cancellation cut it short. A zero delay
/// only yields to the scheduler.
async fn pause(shutdown: &CancellationToken, delay: Duration) -> bool {
    if delay.is_zero() {
        tokio::task::yield_now().await;
        return true;
    }

    tokio::select! {
        biased;
        _ = shutdown.cancelled() => false,
        _ = time::sleep(delay) => true,
    }
}
