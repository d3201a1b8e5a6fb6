use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

static NEXT_CUSTOMER_ID: AtomicU64 = AtomicU64::new(1);

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CustomerId(u64);

impl CustomerId {
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for CustomerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A simulated customer waiting to be served.
#[derive(Debug, PartialEq, Eq)]
pub struct Customer {
    id: CustomerId,
    service_time: Duration,
}

impl Customer {
    /// Ids are unique for the lifetime of the process and increase with
    /// construction order.
    pub fn new(service_time: Duration) -> Self {
        let id = NEXT_CUSTOMER_ID.fetch_add(1, Ordering::Relaxed);
        Self {
            id: CustomerId(id),
            service_time,
        }
    }

    pub fn id(&self) -> CustomerId {
        self.id
    }

    pub fn service_time(&self) -> Duration {
        self.service_time
    }
}
