// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::ApiClient;
use crate::error::ApiError;
use crate::models::Notification;
use crate::notifications::NotificationFeed;
use serde_json::Value;

pub struct NotificationApi<'a> {
    pub(crate) client: &'a ApiClient,
}

impl NotificationApi<'_> {
    pub fn all(&self, user_id: i64) -> Result<Vec<Notification>, ApiError> {
        self.client
            .get(&format!("/api/Notification/user/{}", user_id))
    }
}

impl NotificationFeed for NotificationApi<'_> {
    fn unread_count(&self, user_id: i64) -> Result<u32, ApiError> {
        let v: Value = self
            .client
            .get(&format!("/api/Notification/user/{}/unread-count", user_id))?;
        parse_count(&v).ok_or_else(|| ApiError::Decode(format!("unread count in {}", v)))
    }

    fn unread(&self, user_id: i64) -> Result<Vec<Notification>, ApiError> {
        self.client
            .get(&format!("/api/Notification/user/{}/unread", user_id))
    }

    fn mark_read(&self, id: i64) -> Result<(), ApiError> {
        self.client.put_empty(&format!("/api/Notification/{}/read", id))
    }

    fn mark_all_read(&self, user_id: i64) -> Result<(), ApiError> {
        self.client
            .put_empty(&format!("/api/Notification/user/{}/read-all", user_id))
    }

    fn delete(&self, id: i64) -> Result<(), ApiError> {
        self.client.delete(&format!("/api/Notification/{}", id))
    }
}

/// The count endpoint answers with a bare number or `{"count": n}` / `{"unreadCount": n}`.
pub fn parse_count(v: &Value) -> Option<u32> {
    let n = match v {
        Value::Number(n) => n.as_u64(),
        Value::Object(map) => ["count", "unreadCount", "Count"]
            .iter()
            .find_map(|k| map.get(*k).and_then(Value::as_u64)),
        _ => None,
    }?;
    u32::try_from(n).ok()
}
