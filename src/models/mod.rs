// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Data models for the application.

pub mod activity;
pub mod summary;
pub mod user;

pub use activity::{Activity, ActivityData, Category};
pub use summary::{
    Achievement, Aggregate, CategoryBreakdown, LeaderboardEntry, Summary, TrendPoint,
};
pub use user::{Goals, StoredPassword, User};
