// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - business logic layer.

pub mod achievements;
pub mod aggregate;
pub mod dashboard;
pub mod footprint;
pub mod leaderboard;
pub mod password;
pub mod suggestions;

pub use footprint::{CalculationError, EmissionFactors, FootprintCalculator};
