//! Station manager.
//!
//! The station owns the pumps, the price table and the sales counters, and
//! serves purchases from many threads at once. Purchases of the same fuel
//! variant serialize on that variant's lock; other variants proceed freely.
//! Also supports driving an async stream of requests.

use parking_lot::{Mutex, RwLock};
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::Ordering;
use tokio::task::JoinSet;
use tokio_stream::{Stream, StreamExt};
use tracing::{debug, info, warn};

use crate::atomic::AtomicF64;
use crate::model::{FuelVariant, Request};

mod counters;
pub use counters::Statistics;
use counters::Counters;

mod pump;
pub use pump::Pump;

mod error;
pub use error::{DispenseError, InvalidArgument, StationError};

const DEFAULT_PRICE: f64 = 0.0;

/// The gas station.
///
/// Price and lock tables are seeded for every [`FuelVariant`] on creation
/// and never resized afterwards.
pub struct Station {
    /// Registration order, first match wins on purchase
    pumps: RwLock<Vec<Arc<Pump>>>,
    prices: HashMap<FuelVariant, AtomicF64>,
    /// Guards dispense + accounting, one lock per variant
    locks: HashMap<FuelVariant, Mutex<()>>,
    counters: Counters,
}

/// Public API
impl Station {
    pub fn new() -> Self {
        Self {
            pumps: RwLock::new(Vec::new()),
            prices: FuelVariant::ALL
                .into_iter()
                .map(|variant| (variant, AtomicF64::new(DEFAULT_PRICE)))
                .collect(),
            locks: FuelVariant::ALL
                .into_iter()
                .map(|variant| (variant, Mutex::new(())))
                .collect(),
            counters: Counters::default(),
        }
    }

    /// Register a pump. Pumps are never removed.
    pub fn add_pump(&self, pump: Pump) -> Result<(), StationError> {
        let remaining = pump.remaining_amount();
        if remaining.is_nan() || remaining < 0.0 {
            return Err(InvalidArgument::InvalidRemaining(remaining).into());
        }

        debug!(variant = %pump.variant(), remaining, "pump added");
        self.pumps.write().push(Arc::new(pump));
        Ok(())
    }

    /// Detached copies of the registered pumps, in registration order.
    pub fn pumps(&self) -> Vec<Pump> {
        self.pumps.read().iter().map(|pump| pump.snapshot()).collect()
    }

    pub fn price(&self, variant: FuelVariant) -> f64 {
        self.prices[&variant].load()
    }

    pub fn set_price(&self, variant: FuelVariant, price: f64) -> Result<(), StationError> {
        if price.is_nan() || price < 0.0 {
            return Err(InvalidArgument::InvalidPrice(price).into());
        }

        self.prices[&variant].store(price);
        debug!(variant = %variant, price, "price set");
        Ok(())
    }

    /// Buy `amount` units of `variant`, paying at most `max_price` per unit.
    /// Returns the total charged.
    ///
    /// Price and supply are checked before taking the variant lock. The
    /// supply is checked again under the lock, so a purchase that lost a race
    /// for the last of a pump's fuel fails with `NotEnoughFuel` instead of
    /// overdrawing the pump.
    pub fn buy_gas(
        &self,
        variant: FuelVariant,
        amount: f64,
        max_price: f64,
    ) -> Result<f64, StationError> {
        if amount.is_nan() || amount <= 0.0 {
            return Err(InvalidArgument::NonPositiveAmount(amount).into());
        }
        if max_price.is_nan() || max_price <= 0.0 {
            return Err(InvalidArgument::NonPositiveMaxPrice(max_price).into());
        }

        let price = self.price(variant);
        if price > max_price {
            self.counters.record_too_expensive();
            return Err(StationError::TooExpensive {
                variant,
                price,
                max_price,
            });
        }

        let pump = self
            .first_pump(variant)
            .ok_or(InvalidArgument::NoPump(variant))?;

        let remaining = pump.remaining_amount();
        if remaining < amount {
            self.counters.record_no_gas();
            return Err(StationError::NotEnoughFuel {
                variant,
                remaining,
                requested: amount,
            });
        }

        let _guard = self.locks[&variant].lock();

        if let Err(e) = pump.dispense(amount) {
            warn!(
                variant = %variant,
                remaining = e.remaining,
                requested = amount,
                "pump drained between check and dispense"
            );
            self.counters.record_no_gas();
            return Err(StationError::NotEnoughFuel {
                variant,
                remaining: e.remaining,
                requested: amount,
            });
        }

        let total = price * amount;
        self.counters.record_sale(total);
        Ok(total)
    }

    pub fn revenue(&self) -> f64 {
        self.counters.revenue.load()
    }

    pub fn number_of_sales(&self) -> u32 {
        self.counters.sales.load(Ordering::Relaxed)
    }

    pub fn number_of_cancellations_no_gas(&self) -> u32 {
        self.counters.cancellations_no_gas.load(Ordering::Relaxed)
    }

    pub fn number_of_cancellations_too_expensive(&self) -> u32 {
        self.counters
            .cancellations_too_expensive
            .load(Ordering::Relaxed)
    }

    /// Read every counter, one after the other.
    pub fn statistics(&self) -> Statistics {
        Statistics {
            revenue: self.revenue(),
            sales: self.number_of_sales(),
            cancellations_no_gas: self.number_of_cancellations_no_gas(),
            cancellations_too_expensive: self.number_of_cancellations_too_expensive(),
        }
    }

    /// Apply a single request on top of the current station state
    pub fn apply(&self, request: Request) -> Result<(), StationError> {
        match request {
            Request::AddPump { variant, amount } => {
                let result = self.add_pump(Pump::new(variant, amount));
                Self::log_result("pump", variant, amount, &result);
                result
            }
            Request::SetPrice { variant, price } => {
                let result = self.set_price(variant, price);
                Self::log_result("price", variant, price, &result);
                result
            }
            Request::Buy {
                variant,
                amount,
                max_price,
            } => {
                let result = self.buy_gas(variant, amount, max_price);
                Self::log_result("purchase", variant, amount, &result);
                result.map(|_| ())
            }
        }
    }

    /// Run the station with the given request stream.
    ///
    /// Pump and price requests are applied in stream order. Each purchase
    /// runs on its own blocking task; this returns once all of them finished.
    pub async fn run(self: &Arc<Self>, mut stream: impl Stream<Item = Request> + Unpin) {
        let mut purchases = JoinSet::new();

        while let Some(request) = stream.next().await {
            match request {
                Request::Buy { .. } => {
                    let station = Arc::clone(self);
                    purchases.spawn_blocking(move || {
                        // a rejected purchase should not stop the station
                        let _ = station.apply(request);
                    });
                }
                _ => {
                    let _ = self.apply(request);
                }
            }
        }

        while let Some(joined) = purchases.join_next().await {
            if let Err(e) = joined {
                warn!(error = %e, "purchase task failed");
            }
        }
    }
}

/// Private API
impl Station {
    /// Small helper to log `apply` results
    fn log_result<T: std::fmt::Debug>(
        kind: &str,
        variant: FuelVariant,
        amount: f64,
        result: &Result<T, StationError>,
    ) {
        match result {
            Ok(outcome) => {
                info!(
                    variant = %variant,
                    amount,
                    outcome = ?outcome,
                    "{kind} applied"
                );
            }
            Err(e) => {
                info!(
                    variant = %variant,
                    amount,
                    reason = %e,
                    "{kind} skipped"
                );
            }
        }
    }

    /// Earliest registered pump for `variant`
    fn first_pump(&self, variant: FuelVariant) -> Option<Arc<Pump>> {
        self.pumps
            .read()
            .iter()
            .find(|pump| pump.variant() == variant)
            .cloned()
    }
}

impl Default for Station {
    fn default() -> Self {
        Self::new()
    }
}
