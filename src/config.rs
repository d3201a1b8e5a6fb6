use std::time::Duration;

use anyhow::{Result, bail};

use crate::cli::{Cli, MillisRange};
use crate::error::ConfigError;
use crate::random::BoundedRandom;

#[derive(Clone, Debug)]
pub struct Config {
    pub generator: GeneratorConfig,
    pub generators: usize,
    pub cashiers: usize,
    pub capacity: usize,
    pub run_for: Option<Duration>,
    pub metrics_interval: Option<Duration>,
    pub seed: Option<u64>,
}

impl TryFrom<Cli> for Config {
    type Error = anyhow::Error;

    fn try_from(cli: Cli) -> Result<Self> {
        if cli.generators == 0 {
            bail!("--generators must be greater than zero");
        }

        if cli.cashiers == 0 {
            bail!("--cashiers must be greater than zero");
        }

        if cli.capacity == 0 {
            bail!("--capacity must be greater than zero");
        }

        let generator = GeneratorConfig::from_ranges(&cli.arrival_ms, &cli.service_ms)?;
        let metrics_interval = cli
            .print_metrics_ms
            .and_then(|ms| (ms > 0).then(|| Duration::from_millis(ms)));

        Ok(Self {
            generator,
            generators: cli.generators,
            cashiers: cli.cashiers,
            capacity: cli.capacity,
            run_for: cli.run_for_ms.map(Duration::from_millis),
            metrics_interval,
            seed: cli.seed,
        })
    }
}

/// Closed millisecond interval.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TimeBounds {
    min_ms: u64,
    max_ms: u64,
}

impl TimeBounds {
    fn checked(name: &'static str, min_ms: u64, max_ms: u64) -> Result<Self, ConfigError> {
        if min_ms > max_ms {
            return Err(ConfigError::Inverted {
                name,
                min: min_ms,
                max: max_ms,
            });
        }

        Ok(Self { min_ms, max_ms })
    }

    pub fn sample<R: BoundedRandom + ?Sized>(&self, random: &mut R) -> Duration {
        Duration::from_millis(random.between(self.min_ms, self.max_ms))
    }

    pub fn min_duration(&self) -> Duration {
        Duration::from_millis(self.min_ms)
    }

    pub fn max_duration(&self) -> Duration {
        Duration::from_millis(self.max_ms)
    }

    pub fn contains(&self, value: Duration) -> bool {
        self.min_duration() <= value && value <= self.max_duration()
    }
}

/// Timing bounds for one arrival generator. Immutable once built.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GeneratorConfig {
    arrival: TimeBounds,
    service: TimeBounds,
}

impl GeneratorConfig {
    pub fn new(
        min_arrival_ms: u64,
        max_arrival_ms: u64,
        min_service_ms: u64,
        max_service_ms: u64,
    ) -> Result<Self, ConfigError> {
        let arrival = TimeBounds::checked("arrival time", min_arrival_ms, max_arrival_ms)?;
        if min_service_ms == 0 {
            return Err(ConfigError::NonPositiveService { min: min_service_ms });
        }
        let service = TimeBounds::checked("service time", min_service_ms, max_service_ms)?;

        Ok(Self { arrival, service })
    }

    pub fn from_ranges(
        arrival: &MillisRange,
        service: &MillisRange,
    ) -> Result<Self, ConfigError> {
        Self::new(
            arrival.min_ms,
            arrival.max_ms,
            service.min_ms,
            service.max_ms,
        )
    }

    pub fn arrival(&self) -> TimeBounds {
        self.arrival
    }

    pub fn service(&self) -> TimeBounds {
        self.service
    }
}
