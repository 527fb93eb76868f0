// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! In-process document store for local development and tests.

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use std::collections::HashMap;
use std::sync::Arc;

use crate::error::AppError;
use crate::models::{Activity, User};

#[derive(Default)]
struct Collections {
    /// Users keyed by ID
    users: DashMap<String, User>,
    /// Lower-cased email -> user ID
    emails: DashMap<String, String>,
    /// Username -> user ID
    usernames: DashMap<String, String>,
    /// Activities grouped by owning user ID
    activities: DashMap<String, Vec<Activity>>,
}

/// Shared handle; clones see the same data.
#[derive(Clone, Default)]
pub struct MemoryDb {
    inner: Arc<Collections>,
}

impl MemoryDb {
    pub fn new() -> Self {
        Self::default()
    }

    // ─── User Operations ─────────────────────────────────────────

    pub fn get_user(&self, user_id: &str) -> Option<User> {
        self.inner.users.get(user_id).map(|u| u.clone())
    }

    pub fn find_user_by_email(&self, email: &str) -> Option<User> {
        let user_id = self.inner.emails.get(email).map(|id| id.clone())?;
        self.get_user(&user_id)
    }

    pub fn find_user_by_username(&self, username: &str) -> Option<User> {
        let user_id = self.inner.usernames.get(username).map(|id| id.clone())?;
        self.get_user(&user_id)
    }

    /// Insert a new user. Claims the email and the username atomically;
    /// if either is taken nothing is stored.
    pub fn insert_user(&self, user: &User) -> Result<(), AppError> {
        let already_exists = || AppError::BadRequest("User already exists".to_string());

        match self.inner.emails.entry(user.email.clone()) {
            Entry::Occupied(_) => return Err(already_exists()),
            Entry::Vacant(slot) => {
                slot.insert(user.id.clone());
            }
        }

        match self.inner.usernames.entry(user.username.clone()) {
            Entry::Occupied(_) => {
                self.inner.emails.remove(&user.email);
                return Err(already_exists());
            }
            Entry::Vacant(slot) => {
                slot.insert(user.id.clone());
            }
        }

        self.inner.users.insert(user.id.clone(), user.clone());
        Ok(())
    }

    pub fn usernames_for(&self, user_ids: &[String]) -> HashMap<String, String> {
        user_ids
            .iter()
            .filter_map(|id| {
                self.inner
                    .users
                    .get(id)
                    .map(|u| (id.clone(), u.username.clone()))
            })
            .collect()
    }

    // ─── Activity Operations ─────────────────────────────────────

    pub fn get_activities_for_user(&self, user_id: &str) -> Vec<Activity> {
        self.inner
            .activities
            .get(user_id)
            .map(|list| list.clone())
            .unwrap_or_default()
    }

    pub fn get_all_activities(&self) -> Vec<Activity> {
        self.inner
            .activities
            .iter()
            .flat_map(|list| list.value().clone())
            .collect()
    }

    pub fn set_activity(&self, activity: &Activity) {
        let mut list = self
            .inner
            .activities
            .entry(activity.user_id.clone())
            .or_default();

        match list.iter_mut().find(|a| a.id == activity.id) {
            Some(existing) => *existing = activity.clone(),
            None => list.push(activity.clone()),
        }
    }
}
