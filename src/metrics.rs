use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

#[derive(Default)]
pub struct GeneratorMetrics {
    generated: AtomicU64,
    submitted: AtomicU64,
    rejected: AtomicU64,
    reported: AtomicU64,
}

impl GeneratorMetrics {
    pub fn record_generated(&self) {
        self.generated.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_submitted(&self) {
        self.submitted.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_rejected(&self) {
        self.rejected.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_reported(&self) {
        self.reported.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> GeneratorSnapshot {
        GeneratorSnapshot {
            generated: self.generated.load(Ordering::Relaxed),
            submitted: self.submitted.load(Ordering::Relaxed),
            rejected: self.rejected.load(Ordering::Relaxed),
            reported: self.reported.load(Ordering::Relaxed),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GeneratorSnapshot {
    pub generated: u64,
    pub submitted: u64,
    pub rejected: u64,
    pub reported: u64,
}

impl fmt::Display for GeneratorSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "generated={} submitted={} reported={} rejected={}",
            self.generated, self.submitted, self.reported, self.rejected
        )
    }
}

#[derive(Default)]
pub struct ServiceMetrics {
    started: AtomicU64,
    served: AtomicU64,
    active: AtomicU64,
}

impl ServiceMetrics {
    pub fn record_start(&self) {
        self.started.fetch_add(1, Ordering::Relaxed);
        self.active.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_served(&self) {
        self.served.fetch_add(1, Ordering::Relaxed);
        decrement(&self.active);
    }

    pub fn record_abandoned(&self) {
        decrement(&self.active);
    }

    pub fn snapshot(&self) -> ServiceSnapshot {
        ServiceSnapshot {
            started: self.started.load(Ordering::Relaxed),
            served: self.served.load(Ordering::Relaxed),
            active: self.active.load(Ordering::Relaxed),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ServiceSnapshot {
    pub started: u64,
    pub served: u64,
    pub active: u64,
}

impl fmt::Display for ServiceSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "started={} served={} active={}",
            self.started, self.served, self.active
        )
    }
}

fn decrement(counter: &AtomicU64) {
    let _ = counter.fetch_update(Ordering::Relaxed, Ordering::Relaxed, |value| {
        value.checked_sub(1)
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn active_never_underflows() {
        let metrics = ServiceMetrics::default();
        metrics.record_abandoned();
        metrics.record_start();
        metrics.record_served();
        metrics.record_served();

        let snapshot = metrics.snapshot();
        assert_eq!(snapshot.active, 0);
        assert_eq!(snapshot.served, 2);
    }

    #[test]
    fn generator_snapshot_formats() {
        let metrics = GeneratorMetrics::default();
        metrics.record_generated();
        metrics.record_submitted();
        assert_eq!(
            metrics.snapshot().to_string(),
            "generated=1 submitted=1 reported=0 rejected=0"
        );
    }
}
