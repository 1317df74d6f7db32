// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::ApiClient;
use crate::error::ApiError;
use crate::models::{FlowType, NewTransaction, Transaction, TransactionReceipt};
use chrono::NaiveDate;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransactionFilter {
    pub kind: Option<FlowType>,
    pub category_id: Option<i64>,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

impl TransactionFilter {
    pub fn query(&self) -> Vec<(&'static str, String)> {
        let mut q = Vec::new();
        if let Some(k) = self.kind {
            q.push(("type", k.as_str().to_string()));
        }
        if let Some(c) = self.category_id {
            q.push(("categoryId", c.to_string()));
        }
        if let Some(d) = self.from {
            q.push(("from", d.to_string()));
        }
        if let Some(d) = self.to {
            q.push(("to", d.to_string()));
        }
        q
    }
}

pub struct TransactionApi<'a> {
    pub(crate) client: &'a ApiClient,
}

impl TransactionApi<'_> {
    pub fn list(&self, user_id: i64, filter: &TransactionFilter) -> Result<Vec<Transaction>, ApiError> {
        self.client
            .get_query(&format!("/api/Transaction/user/{}", user_id), &filter.query())
    }

    /// Records a transaction; the backend answers with the budgets it touched.
    pub fn create(&self, t: &NewTransaction) -> Result<TransactionReceipt, ApiError> {
        self.client.post("/api/Transaction", t)
    }

    pub fn delete(&self, id: i64) -> Result<(), ApiError> {
        self.client.delete(&format!("/api/Transaction/{}", id))
    }
}
