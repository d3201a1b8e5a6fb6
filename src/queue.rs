use std::future::Future;
use std::sync::Arc;

use tokio::sync::{Mutex, mpsc};

use crate::customer::Customer;
use crate::error::SubmitError;

/// Shared structure that takes ownership of newly arrived customers.
///
/// Implementations must be safe to call from several generators at once and
/// must accept or reject a customer as a whole.
pub trait QueueCoordinator: Send + Sync {
    fn accept_arrival(
        &self,
        customer: Customer,
    ) -> impl Future<Output = Result<(), SubmitError>> + Send;
}

impl<Q: QueueCoordinator> QueueCoordinator for Arc<Q> {
    fn accept_arrival(
        &self,
        customer: Customer,
    ) -> impl Future<Output = Result<(), SubmitError>> + Send {
        (**self).accept_arrival(customer)
    }
}

/// Bounded FIFO coordinator. A full queue makes submitters wait.
#[derive(Clone, Debug)]
pub struct ArrivalQueue {
    tx: mpsc::Sender<Customer>,
    capacity: usize,
}

impl ArrivalQueue {
    /// `capacity` must be greater than zero.
    pub fn bounded(capacity: usize) -> (Self, ArrivalReceiver) {
        let (tx, rx) = mpsc::channel(capacity);
        let receiver = ArrivalReceiver {
            rx: Arc::new(Mutex::new(rx)),
        };

        (Self { tx, capacity }, receiver)
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn waiting(&self) -> usize {
        self.capacity - self.tx.capacity()
    }

    /// Non-waiting submission, for callers that prefer to shed load.
    pub fn try_accept(&self, customer: Customer) -> Result<(), SubmitError> {
        self.tx.try_send(customer).map_err(|err| match err {
            mpsc::error::TrySendError::Full(_) => SubmitError::Full {
                capacity: self.capacity,
            },
            mpsc::error::TrySendError::Closed(_) => SubmitError::Closed,
        })
    }
}

impl QueueCoordinator for ArrivalQueue {
    async fn accept_arrival(&self, customer: Customer) -> Result<(), SubmitError> {
        self.tx.send(customer).await.map_err(|_| SubmitError::Closed)
    }
}

/// Consumer end shared by any number of service workers.
#[derive(Clone, Debug)]
pub struct ArrivalReceiver {
    rx: Arc<Mutex<mpsc::Receiver<Customer>>>,
}

impl ArrivalReceiver {
    /// Next customer in arrival order, or `None` once every submitter is gone
    /// and the queue is drained.
    pub async fn next(&self) -> Option<Customer> {
        self.rx.lock().await.recv().await
    }
}
