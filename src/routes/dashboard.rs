// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Dashboard and leaderboard routes.

use crate::error::Result;
use crate::middleware::auth::AuthUser;
use crate::models::{LeaderboardEntry, Summary};
use crate::services::{dashboard, leaderboard};
use crate::AppState;
use axum::{extract::State, routing::get, Extension, Json, Router};
use std::sync::Arc;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/dashboard", get(get_dashboard))
        .route("/api/dashboard/leaderboard", get(get_leaderboard))
}

/// Summary for the current user, rebuilt from their full history.
async fn get_dashboard(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<Summary>> {
    let activities = state.db.find_activities_by_user(&user.user_id).await?;
    let summary = dashboard::build_summary(&activities, state.clock.now());

    tracing::debug!(
        user_id = %user.user_id,
        activity_count = summary.activity_count,
        total_footprint = summary.total_footprint,
        "Built dashboard summary"
    );

    Ok(Json(summary))
}

/// Top users by lowest total footprint.
///
/// Reads every activity; fine at current scale.
async fn get_leaderboard(State(state): State<Arc<AppState>>) -> Result<Json<Vec<LeaderboardEntry>>> {
    let activities = state.db.find_all_activities().await?;

    let user_ids: Vec<String> = leaderboard::totals_by_user(&activities)
        .into_keys()
        .map(str::to_string)
        .collect();
    let usernames = state.db.usernames_for(&user_ids).await?;

    let ranked = leaderboard::rank(&activities, &usernames);

    tracing::debug!(
        activities = activities.len(),
        users = user_ids.len(),
        ranked = ranked.len(),
        "Built leaderboard"
    );

    Ok(Json(ranked))
}
