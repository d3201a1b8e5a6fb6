use std::time::Duration;

use tokio::sync::mpsc;

use crate::customer::CustomerId;

/// A customer that has been handed to the coordinator and whose
/// inter-arrival delay has elapsed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Arrival {
    pub customer: CustomerId,
    pub service_time: Duration,
    pub delay: Duration,
}

/// Observer for arrivals. Must not block.
pub trait ArrivalSink: Send + Sync {
    fn arrived(&self, arrival: Arrival);
}

#[derive(Clone, Copy, Debug, Default)]
pub struct TracingSink;

impl ArrivalSink for TracingSink {
    fn arrived(&self, arrival: Arrival) {
        tracing::info!(
            customer = %arrival.customer,
            service_ms = arrival.service_time.as_millis(),
            delay_ms = arrival.delay.as_millis(),
            "customer arrived"
        );
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct NullSink;

impl ArrivalSink for NullSink {
    fn arrived(&self, _arrival: Arrival) {}
}

/// Forwards arrivals to a channel. Arrivals are dropped silently once the
/// receiving side has gone away.
#[derive(Clone, Debug)]
pub struct ChannelSink {
    tx: mpsc::UnboundedSender<Arrival>,
}

impl ChannelSink {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<Arrival>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl ArrivalSink for ChannelSink {
    fn arrived(&self, arrival: Arrival) {
        if self.tx.send(arrival).is_err() {
            tracing::trace!(customer = %arrival.customer, "arrival observer gone");
        }
    }
}
