pub mod cli;
pub mod config;
pub mod customer;
pub mod error;
pub mod metrics;
pub mod queue;
pub mod random;
pub mod report;
pub mod runtime;
pub mod workers;

pub use config::{GeneratorConfig, TimeBounds};
pub use customer::{Customer, CustomerId};
pub use error::{ConfigError, GeneratorError, SubmitError};
pub use queue::{ArrivalQueue, ArrivalReceiver, QueueCoordinator};
pub use random::{BoundedRandom, ScriptedRandom, StdRandom};
pub use report::{Arrival, ArrivalSink, ChannelSink, NullSink, TracingSink};
pub use workers::generator::ArrivalGenerator;
