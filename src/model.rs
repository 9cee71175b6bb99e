//! Core domain types for the station.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A kind of fuel a pump can dispense.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum FuelVariant {
    Regular,
    Super,
    Diesel,
}

impl FuelVariant {
    /// Every variant, used to seed the per-variant tables.
    pub const ALL: [FuelVariant; 3] = [
        FuelVariant::Regular,
        FuelVariant::Super,
        FuelVariant::Diesel,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            FuelVariant::Regular => "regular",
            FuelVariant::Super => "super",
            FuelVariant::Diesel => "diesel",
        }
    }
}

impl fmt::Display for FuelVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown fuel variant '{0}'")]
pub struct UnknownVariant(pub String);

impl FromStr for FuelVariant {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FuelVariant::ALL
            .into_iter()
            .find(|variant| variant.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownVariant(s.to_string()))
    }
}

impl TryFrom<String> for FuelVariant {
    type Error = UnknownVariant;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

/// A request representing the possible inputs of the station.
#[derive(Debug, Clone, PartialEq)]
pub enum Request {
    /// Register a pump holding `amount` units of `variant`.
    AddPump { variant: FuelVariant, amount: f64 },
    /// Change the per-unit price of `variant`.
    SetPrice { variant: FuelVariant, price: f64 },
    /// Buy `amount` units of `variant` at no more than `max_price` per unit.
    Buy {
        variant: FuelVariant,
        amount: f64,
        max_price: f64,
    },
}
