//! Error types for station operations.

use thiserror::Error;

use crate::model::FuelVariant;

/// Top-level error returned by [`Station`](super::Station) operations.
#[derive(Debug, Error, PartialEq)]
pub enum StationError {
    #[error("invalid argument: {0}")]
    InvalidArgument(#[from] InvalidArgument),

    #[error("{variant} costs {price} per unit, above the accepted {max_price}")]
    TooExpensive {
        variant: FuelVariant,
        price: f64,
        max_price: f64,
    },

    #[error("not enough {variant}: {remaining} remaining, {requested} requested")]
    NotEnoughFuel {
        variant: FuelVariant,
        remaining: f64,
        requested: f64,
    },
}

/// Rejected input or misconfiguration. Never counted as a cancellation.
#[derive(Debug, Error, PartialEq)]
pub enum InvalidArgument {
    #[error("amount must be > 0, got {0}")]
    NonPositiveAmount(f64),

    #[error("max price must be > 0, got {0}")]
    NonPositiveMaxPrice(f64),

    #[error("price must be a non-negative number, got {0}")]
    InvalidPrice(f64),

    #[error("remaining amount must be a non-negative number, got {0}")]
    InvalidRemaining(f64),

    #[error("no pump for fuel variant {0}")]
    NoPump(FuelVariant),
}

/// Error raised by a pump asked to dispense more than it holds.
#[derive(Debug, Error, PartialEq)]
#[error("cannot dispense {requested}, only {remaining} remaining")]
pub struct DispenseError {
    pub remaining: f64,
    pub requested: f64,
}
