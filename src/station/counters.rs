use std::sync::atomic::{AtomicU32, Ordering};

use crate::atomic::AtomicF64;

/// Aggregate sales counters. Each one is updated on its own,
/// so two counters read in sequence may briefly disagree.
#[derive(Debug, Default)]
pub(crate) struct Counters {
    pub(crate) sales: AtomicU32,
    pub(crate) cancellations_no_gas: AtomicU32,
    pub(crate) cancellations_too_expensive: AtomicU32,
    pub(crate) revenue: AtomicF64,
}

impl Counters {
    pub(crate) fn record_sale(&self, total: f64) {
        self.revenue.add(total);
        self.sales.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_no_gas(&self) {
        self.cancellations_no_gas.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_too_expensive(&self) {
        self.cancellations_too_expensive
            .fetch_add(1, Ordering::Relaxed);
    }
}

/// Point-in-time view of the station counters, read one after another.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Statistics {
    pub revenue: f64,
    pub sales: u32,
    pub cancellations_no_gas: u32,
    pub cancellations_too_expensive: u32,
}
