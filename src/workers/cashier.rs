use std::sync::Arc;

use tokio::time;
use tokio_util::sync::CancellationToken;

use crate::metrics::ServiceMetrics;
use crate::queue::ArrivalReceiver;

/// Drains the shared queue, holding each customer for its service time.
pub async fn run(
    index: usize,
    arrivals: ArrivalReceiver,
    shutdown: CancellationToken,
    metrics: Arc<ServiceMetrics>,
) {
    tracing::debug!(cashier = index, "cashier open");

    loop {
        let customer = tokio::select! {
            _ = shutdown.cancelled() => break,
            next = arrivals.next() => match next {
                Some(customer) => customer,
                None => break,
            },
        };

        metrics.record_start();
        tokio::select! {
            _ = shutdown.cancelled() => {
                metrics.record_abandoned();
                tracing::debug!(cashier = index, customer = %customer.id(), "service interrupted");
                break;
            }
            _ = time::sleep(customer.service_time()) => {
                metrics.record_served();
                tracing::trace!(
                    cashier = index,
                    customer = %customer.id(),
                    service_ms = customer.service_time().as_millis(),
                    "customer served"
                );
            }
        }
    }

    tracing::debug!(cashier = index, "cashier closed");
}
