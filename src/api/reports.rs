// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::ApiClient;
use crate::error::ApiError;
use crate::models::{NewReport, Report};
use crate::reports::ReportBackend;

pub struct ReportApi<'a> {
    pub(crate) client: &'a ApiClient,
}

impl ReportBackend for ReportApi<'_> {
    fn list(&self, user_id: i64) -> Result<Vec<Report>, ApiError> {
        self.client.get(&format!("/api/reports/user/{}", user_id))
    }

    fn register(&self, r: &NewReport) -> Result<Report, ApiError> {
        self.client.post("/api/reports", r)
    }

    fn delete(&self, id: i64) -> Result<(), ApiError> {
        self.client.delete(&format!("/api/reports/{}", id))
    }
}
