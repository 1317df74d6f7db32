// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::ApiClient;
use crate::error::ApiError;
use crate::models::{Goal, NewGoal, NewSavingRecord, SavingRecord};

pub struct GoalApi<'a> {
    pub(crate) client: &'a ApiClient,
}

impl GoalApi<'_> {
    pub fn list(&self, user_id: i64) -> Result<Vec<Goal>, ApiError> {
        self.client.get(&format!("/api/Goal/user/{}", user_id))
    }

    pub fn get(&self, id: i64) -> Result<Goal, ApiError> {
        self.client.get(&format!("/api/Goal/{}", id))
    }

    pub fn create(&self, g: &NewGoal) -> Result<Goal, ApiError> {
        self.client.post("/api/Goal", g)
    }

    pub fn update(&self, id: i64, g: &NewGoal) -> Result<Goal, ApiError> {
        self.client.put(&format!("/api/Goal/{}", id), g)
    }

    pub fn delete(&self, id: i64) -> Result<(), ApiError> {
        self.client.delete(&format!("/api/Goal/{}", id))
    }

    pub fn savings(&self, goal_id: i64) -> Result<Vec<SavingRecord>, ApiError> {
        self.client.get(&format!("/api/Goal/{}/savings", goal_id))
    }

    pub fn add_saving(&self, rec: &NewSavingRecord) -> Result<SavingRecord, ApiError> {
        self.client
            .post(&format!("/api/Goal/{}/savings", rec.goal_id), rec)
    }

    pub fn delete_saving(&self, record_id: i64) -> Result<(), ApiError> {
        self.client
            .delete(&format!("/api/Goal/savings/{}", record_id))
    }
}
