//! Database layer.
//!
//! `Db` is the activity and user store used by the routes. It dispatches
//! to Firestore in production or to an in-process store for local
//! development and tests.

pub mod firestore;
pub mod memory;

pub use self::firestore::FirestoreDb;
pub use memory::MemoryDb;

use crate::config::{Config, StorageBackend};
use crate::error::AppError;
use crate::models::{Activity, User};
use std::collections::HashMap;

/// Collection names as constants.
pub mod collections {
    pub const USERS: &str = "users";
    pub const ACTIVITIES: &str = "activities";
}

/// Activity and user store.
#[derive(Clone)]
pub enum Db {
    Firestore(FirestoreDb),
    Memory(MemoryDb),
}

impl Db {
    /// Connect to the backend selected in configuration.
    pub async fn connect(config: &Config) -> Result<Self, AppError> {
        match config.storage_backend {
            StorageBackend::Firestore => Ok(Db::Firestore(
                FirestoreDb::new(&config.gcp_project_id).await?,
            )),
            StorageBackend::Memory => {
                tracing::warn!("Using in-memory store, data will not survive a restart");
                Ok(Db::in_memory())
            }
        }
    }

    pub fn in_memory() -> Self {
        Db::Memory(MemoryDb::new())
    }

    // ─── Users ───────────────────────────────────────────────────

    pub async fn find_user_by_id(&self, user_id: &str) -> Result<Option<User>, AppError> {
        match self {
            Db::Firestore(db) => db.get_user(user_id).await,
            Db::Memory(db) => Ok(db.get_user(user_id)),
        }
    }

    /// Lookup by email; callers pass the normalized (lower-cased) form.
    pub async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        match self {
            Db::Firestore(db) => db.find_user_by_field("email", email).await,
            Db::Memory(db) => Ok(db.find_user_by_email(email)),
        }
    }

    pub async fn find_user_by_username(&self, username: &str) -> Result<Option<User>, AppError> {
        match self {
            Db::Firestore(db) => db.find_user_by_field("username", username).await,
            Db::Memory(db) => Ok(db.find_user_by_username(username)),
        }
    }

    pub async fn insert_user(&self, user: &User) -> Result<(), AppError> {
        match self {
            Db::Firestore(db) => db.set_user(user).await,
            Db::Memory(db) => db.insert_user(user),
        }
    }

    /// Map of user ID to username for the given IDs.
    pub async fn usernames_for(
        &self,
        user_ids: &[String],
    ) -> Result<HashMap<String, String>, AppError> {
        match self {
            Db::Firestore(db) => db.usernames_for(user_ids).await,
            Db::Memory(db) => Ok(db.usernames_for(user_ids)),
        }
    }

    // ─── Activities ──────────────────────────────────────────────

    /// A user's activities, newest first.
    pub async fn find_activities_by_user(&self, user_id: &str) -> Result<Vec<Activity>, AppError> {
        let mut activities = match self {
            Db::Firestore(db) => db.get_activities_for_user(user_id).await?,
            Db::Memory(db) => db.get_activities_for_user(user_id),
        };
        sort_newest_first(&mut activities);
        Ok(activities)
    }

    pub async fn find_all_activities(&self) -> Result<Vec<Activity>, AppError> {
        match self {
            Db::Firestore(db) => db.get_all_activities().await,
            Db::Memory(db) => Ok(db.get_all_activities()),
        }
    }

    pub async fn save_activity(&self, activity: &Activity) -> Result<(), AppError> {
        match self {
            Db::Firestore(db) => db.set_activity(activity).await,
            Db::Memory(db) => {
                db.set_activity(activity);
                Ok(())
            }
        }
    }
}

/// Sort by date descending, then ID for a stable order.
fn sort_newest_first(activities: &mut [Activity]) {
    activities.sort_by(|a, b| b.date.cmp(&a.date).then_with(|| a.id.cmp(&b.id)));
}
