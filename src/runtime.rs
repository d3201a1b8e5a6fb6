use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use tokio::task::JoinSet;
use tokio::time::{self, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::Instrument;

use crate::config::Config;
use crate::metrics::{GeneratorMetrics, ServiceMetrics};
use crate::queue::ArrivalQueue;
use crate::random::StdRandom;
use crate::workers::{cashier, generator::ArrivalGenerator};

pub async fn run(config: Config) -> Result<()> {
    let shutdown = CancellationToken::new();
    let signal_token = shutdown.clone();
    let ctrl_c_task = tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            signal_token.cancel();
        }
    });

    let result = simulate(config, shutdown).await;

    ctrl_c_task.abort();
    let _ = ctrl_c_task.await;

    result
}

/// Runs generators and cashiers against one shared queue until `shutdown`
/// fires, the configured run time elapses, or a generator fails.
pub async fn simulate(config: Config, shutdown: CancellationToken) -> Result<()> {
    let (queue, arrivals) = ArrivalQueue::bounded(config.capacity);
    let generator_metrics = Arc::new(GeneratorMetrics::default());
    let service_metrics = Arc::new(ServiceMetrics::default());

    tracing::info!(
        generators = config.generators,
        cashiers = config.cashiers,
        capacity = config.capacity,
        seed = ?config.seed,
        "simulation starting"
    );

    if let Some(period) = config.metrics_interval {
        spawn_metrics_reporter(
            generator_metrics.clone(),
            service_metrics.clone(),
            period,
            shutdown.clone(),
        );
    }

    if let Some(run_for) = config.run_for {
        let timer_token = shutdown.clone();
        tokio::spawn(async move {
            tokio::select! {
                _ = timer_token.cancelled() => {}
                _ = time::sleep(run_for) => {
                    tracing::info!(run_for_ms = run_for.as_millis(), "run time elapsed");
                    timer_token.cancel();
                }
            }
        });
    }

    // Cashiers keep draining until every generator has stopped, so a
    // generator waiting on a full queue is never left without a consumer.
    let service_shutdown = CancellationToken::new();
    let mut cashiers = JoinSet::new();
    for index in 0..config.cashiers {
        cashiers.spawn(cashier::run(
            index,
            arrivals.clone(),
            service_shutdown.clone(),
            service_metrics.clone(),
        ));
    }
    drop(arrivals);

    let mut generators = JoinSet::new();
    for index in 0..config.generators {
        let random = match config.seed {
            Some(seed) => StdRandom::seeded(seed.wrapping_add(index as u64)),
            None => StdRandom::from_entropy(),
        };
        let generator = ArrivalGenerator::new(queue.clone(), config.generator)
            .with_random(random)
            .with_shutdown(shutdown.child_token())
            .with_metrics(generator_metrics.clone());

        generators.spawn(
            generator
                .run()
                .instrument(tracing::info_span!("generator", index)),
        );
    }
    drop(queue);

    let mut failure = None;
    while let Some(joined) = generators.join_next().await {
        match joined {
            Ok(Ok(())) => {}
            Ok(Err(err)) => {
                tracing::error!(error = %err, "generator failed");
                failure.get_or_insert(anyhow::Error::new(err));
                shutdown.cancel();
            }
            Err(err) => {
                tracing::error!(error = %err, "generator task panicked");
                failure.get_or_insert(anyhow::Error::new(err));
                shutdown.cancel();
            }
        }
    }

    shutdown.cancel();
    service_shutdown.cancel();
    while cashiers.join_next().await.is_some() {}

    tracing::info!(
        arrivals = %generator_metrics.snapshot(),
        service = %service_metrics.snapshot(),
        "simulation finished"
    );

    match failure {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

fn spawn_metrics_reporter(
    generators: Arc<GeneratorMetrics>,
    service: Arc<ServiceMetrics>,
    period: Duration,
    shutdown: CancellationToken,
) {
    tokio::spawn(async move {
        let mut ticker = time::interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            tokio::select! {
                _ = shutdown.cancelled() => break,
                _ = ticker.tick() => {
                    tracing::info!(
                        target: "arrivals::metrics",
                        arrivals = %generators.snapshot(),
                        service = %service.snapshot(),
                        "simulation metrics"
                    );
                }
            }
        }
    });
}
