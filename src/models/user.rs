//! User model for storage and API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Default monthly footprint goal in kg CO2e.
pub const DEFAULT_MONTHLY_GOAL: f64 = 100.0;

/// User profile stored in the `users` collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Opaque identifier (also used as document ID)
    pub id: String,
    /// Display name, unique
    pub username: String,
    /// Login email, unique, stored lower-cased
    pub email: String,
    /// PBKDF2 password hash
    pub password: StoredPassword,
    /// When the user registered
    pub register_date: DateTime<Utc>,
    #[serde(default)]
    pub goals: Goals,
}

/// Salted password hash (both fields base64).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredPassword {
    pub salt: String,
    pub hash: String,
}

/// Per-user targets.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Goals {
    /// kg CO2e per month
    pub monthly_footprint_goal: f64,
}

impl Default for Goals {
    fn default() -> Self {
        Self {
            monthly_footprint_goal: DEFAULT_MONTHLY_GOAL,
        }
    }
}
