use std::fmt;

use super::DispenseError;
use crate::atomic::AtomicF64;
use crate::model::FuelVariant;

/// A pump dispensing a single fuel variant.
/// Its remaining amount only ever decreases.
pub struct Pump {
    variant: FuelVariant,
    remaining: AtomicF64,
}

impl Pump {
    pub fn new(variant: FuelVariant, remaining: f64) -> Self {
        Self {
            variant,
            remaining: AtomicF64::new(remaining),
        }
    }

    pub fn variant(&self) -> FuelVariant {
        self.variant
    }

    pub fn remaining_amount(&self) -> f64 {
        self.remaining.load()
    }

    /// Take `amount` out of the pump, all or nothing.
    pub fn dispense(&self, amount: f64) -> Result<(), DispenseError> {
        self.remaining
            .fetch_update(|remaining| (remaining >= amount).then(|| remaining - amount))
            .map(|_| ())
            .map_err(|remaining| DispenseError {
                remaining,
                requested: amount,
            })
    }

    /// Detached copy holding the current remaining amount.
    pub fn snapshot(&self) -> Pump {
        Pump::new(self.variant, self.remaining_amount())
    }
}

impl fmt::Debug for Pump {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pump")
            .field("variant", &self.variant)
            .field("remaining", &self.remaining_amount())
            .finish()
    }
}
