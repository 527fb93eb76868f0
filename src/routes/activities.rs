// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Activity logging routes.

use crate::error::{AppError, Result};
use crate::middleware::auth::AuthUser;
use crate::models::{Activity, Category};
use crate::routes::json_body;
use crate::AppState;
use axum::{
    extract::{rejection::JsonRejection, State},
    routing::get,
    Extension, Json, Router,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;

const MISSING_TYPE_OR_DATA: &str = "Please provide activity type and data";

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/api/activities", get(list_activities).post(create_activity))
}

/// Body of `POST /api/activities`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateActivityRequest {
    #[serde(default)]
    pub activity_type: Option<String>,
    #[serde(default)]
    pub data: Option<Value>,
    /// When the activity happened (RFC 3339); defaults to now
    #[serde(default)]
    pub date: Option<String>,
}

fn parse_date(raw: Option<&str>) -> Result<Option<DateTime<Utc>>> {
    raw.map(|raw| {
        DateTime::parse_from_rfc3339(raw)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|_| {
                AppError::BadRequest("Invalid 'date': must be an RFC3339 datetime".to_string())
            })
    })
    .transpose()
}

/// Log a new activity for the current user.
///
/// The footprint is computed once here. Calculation failures (unknown
/// mode, malformed number) are recorded as a footprint of 0 rather than
/// rejecting the request.
async fn create_activity(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    payload: std::result::Result<Json<CreateActivityRequest>, JsonRejection>,
) -> Result<Json<Activity>> {
    let request = json_body(payload)?;

    let activity_type = request
        .activity_type
        .filter(|t| !t.is_empty())
        .ok_or_else(|| AppError::BadRequest(MISSING_TYPE_OR_DATA.to_string()))?;

    let data = match request.data {
        Some(Value::Object(map)) => map,
        None | Some(Value::Null) => {
            return Err(AppError::BadRequest(MISSING_TYPE_OR_DATA.to_string()))
        }
        Some(_) => {
            return Err(AppError::BadRequest(
                "Activity data must be an object".to_string(),
            ))
        }
    };

    let category = Category::parse(&activity_type).ok_or_else(|| {
        AppError::BadRequest(format!(
            "Unknown activity type '{}': expected transport, electricity or food",
            activity_type
        ))
    })?;

    let date = parse_date(request.date.as_deref())?.unwrap_or_else(|| state.clock.now());
    let carbon_footprint = state.calculator.footprint_or_zero(category.as_str(), &data);

    let activity = Activity {
        id: uuid::Uuid::new_v4().to_string(),
        user_id: user.user_id,
        activity_type: category.as_str().to_string(),
        data,
        carbon_footprint,
        date,
    };

    state.db.save_activity(&activity).await?;

    tracing::info!(
        user_id = %activity.user_id,
        activity_id = %activity.id,
        category = %category,
        carbon_footprint,
        "Activity logged"
    );

    Ok(Json(activity))
}

/// All of the current user's activities, newest first.
async fn list_activities(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<Vec<Activity>>> {
    let activities = state.db.find_activities_by_user(&user.user_id).await?;

    tracing::debug!(
        user_id = %user.user_id,
        count = activities.len(),
        "Fetched activities"
    );

    Ok(Json(activities))
}
