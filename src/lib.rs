// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Carbon Tracker: log everyday activities and see their carbon footprint
//!
//! This crate provides the backend API: activity logging with footprint
//! calculation, the per-user dashboard summary (totals, category
//! breakdown, 7-day trend, tips, achievements) and the cross-user
//! leaderboard.

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod time_utils;

use config::Config;
use db::Db;
use services::FootprintCalculator;
use std::sync::Arc;
use time_utils::Clock;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub db: Db,
    pub calculator: FootprintCalculator,
    pub clock: Arc<dyn Clock>,
}
