use thiserror::Error;

use crate::customer::CustomerId;

/// Invalid timing bounds, reported before any generator starts.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("{name} minimum ({min} ms) exceeds maximum ({max} ms)")]
    Inverted {
        name: &'static str,
        min: u64,
        max: u64,
    },

    #[error("bounds must be non-negative, got {value}")]
    Negative { value: i64 },

    #[error("service time must be positive, got minimum of {min} ms")]
    NonPositiveService { min: u64 },

    #[error("malformed range `{0}`, expected a form like 100..2000")]
    Malformed(String),
}

/// Failure reported by a queue coordinator when it cannot take a customer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitError {
    #[error("queue coordinator is closed")]
    Closed,

    #[error("queue coordinator is at capacity ({capacity})")]
    Full { capacity: usize },
}

#[derive(Debug, Error)]
pub enum GeneratorError {
    #[error("customer {customer} was not accepted: {source}")]
    Rejected {
        customer: CustomerId,
        #[source]
        source: SubmitError,
    },
}
