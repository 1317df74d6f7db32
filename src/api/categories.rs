// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::ApiClient;
use crate::error::ApiError;
use crate::models::{Category, NewCategory};

pub struct CategoryApi<'a> {
    pub(crate) client: &'a ApiClient,
}

impl CategoryApi<'_> {
    pub fn list(&self, user_id: i64) -> Result<Vec<Category>, ApiError> {
        self.client.get(&format!("/api/Category/user/{}", user_id))
    }

    pub fn create(&self, c: &NewCategory) -> Result<Category, ApiError> {
        self.client.post("/api/Category", c)
    }

    pub fn delete(&self, id: i64) -> Result<(), ApiError> {
        self.client.delete(&format!("/api/Category/{}", id))
    }
}

/// Case-insensitive lookup by name, the way users type categories on the command line.
pub fn find_by_name<'c>(cats: &'c [Category], name: &str) -> Option<&'c Category> {
    let needle = name.trim();
    cats.iter().find(|c| c.name.trim().eq_ignore_ascii_case(needle))
}
