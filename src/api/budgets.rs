// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::ApiClient;
use crate::error::ApiError;
use crate::models::{Budget, NewBudget, SpendingPoint};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeriesPeriod {
    Daily,
    Monthly,
}

impl SeriesPeriod {
    pub fn as_str(&self) -> &'static str {
        match self {
            SeriesPeriod::Daily => "daily",
            SeriesPeriod::Monthly => "monthly",
        }
    }

    pub fn parse(s: &str) -> Option<SeriesPeriod> {
        match s.trim().to_lowercase().as_str() {
            "daily" | "day" => Some(SeriesPeriod::Daily),
            "monthly" | "month" => Some(SeriesPeriod::Monthly),
            _ => None,
        }
    }
}

pub struct BudgetApi<'a> {
    pub(crate) client: &'a ApiClient,
}

impl BudgetApi<'_> {
    pub fn list(&self, user_id: i64) -> Result<Vec<Budget>, ApiError> {
        self.client.get(&format!("/api/Budget/user/{}", user_id))
    }

    pub fn get(&self, id: i64) -> Result<Budget, ApiError> {
        self.client.get(&format!("/api/Budget/{}", id))
    }

    pub fn create(&self, b: &NewBudget) -> Result<Budget, ApiError> {
        self.client.post("/api/Budget", b)
    }

    pub fn update(&self, id: i64, b: &NewBudget) -> Result<Budget, ApiError> {
        self.client.put(&format!("/api/Budget/{}", id), b)
    }

    pub fn delete(&self, id: i64) -> Result<(), ApiError> {
        self.client.delete(&format!("/api/Budget/{}", id))
    }

    /// Cumulative spending buckets, aggregated by the server.
    pub fn spending(&self, id: i64, period: SeriesPeriod) -> Result<Vec<SpendingPoint>, ApiError> {
        self.client.get_query(
            &format!("/api/Budget/{}/spending", id),
            &[("period", period.as_str().to_string())],
        )
    }
}
