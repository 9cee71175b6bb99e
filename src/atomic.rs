use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Lock-free `f64` cell, stored as raw bits in an `AtomicU64`.
#[derive(Default)]
pub struct AtomicF64(AtomicU64);

impl AtomicF64 {
    pub fn new(value: f64) -> Self {
        AtomicF64(AtomicU64::new(value.to_bits()))
    }

    pub fn load(&self) -> f64 {
        f64::from_bits(self.0.load(Ordering::Acquire))
    }

    pub fn store(&self, value: f64) {
        self.0.store(value.to_bits(), Ordering::Release);
    }

    /// Add `delta` and return the previous value.
    pub fn add(&self, delta: f64) -> f64 {
        // the closure always returns Some, so this can't fail
        match self.fetch_update(|current| Some(current + delta)) {
            Ok(previous) | Err(previous) => previous,
        }
    }

    /// Apply `f` until the compare-and-swap succeeds or `f` returns `None`.
    ///
    /// Returns the previous value on success, or the value that made `f` bail.
    pub fn fetch_update(&self, mut f: impl FnMut(f64) -> Option<f64>) -> Result<f64, f64> {
        self.0
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |bits| {
                f(f64::from_bits(bits)).map(f64::to_bits)
            })
            .map(f64::from_bits)
            .map_err(f64::from_bits)
    }
}

impl fmt::Debug for AtomicF64 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("AtomicF64").field(&self.load()).finish()
    }
}
