// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Thin blocking clients for the finance backend's REST API.
//!
//! One shared [`ApiClient`] carries the HTTP connection pool and base URL;
//! each resource (`budgets()`, `goals()`, ...) is a borrowed view over it.
//! No caching: every call goes to the network.

pub mod budgets;
pub mod categories;
pub mod goals;
pub mod notifications;
pub mod reports;
pub mod transactions;

use crate::config::ApiConfig;
use crate::error::ApiError;
use reqwest::blocking::{Client, RequestBuilder};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, warn};

const UA: &str = concat!(
    "finboard/",
    env!("CARGO_PKG_VERSION"),
    " (+https://github.com/alphavelocity/finboard)"
);

// Keys a response wrapper may carry next to its `data` payload.
const ENVELOPE_KEYS: &[&str] = &["data", "success", "succeeded", "message", "statusCode", "errors"];

pub struct ApiClient {
    http: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(cfg: &ApiConfig) -> Result<Self, ApiError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(cfg.timeout_secs))
            .user_agent(UA)
            .build()
            .map_err(|e| ApiError::Transport {
                url: cfg.base_url.clone(),
                source: e,
            })?;
        Ok(Self {
            http,
            base_url: cfg.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    pub fn budgets(&self) -> budgets::BudgetApi<'_> {
        budgets::BudgetApi { client: self }
    }

    pub fn transactions(&self) -> transactions::TransactionApi<'_> {
        transactions::TransactionApi { client: self }
    }

    pub fn categories(&self) -> categories::CategoryApi<'_> {
        categories::CategoryApi { client: self }
    }

    pub fn goals(&self) -> goals::GoalApi<'_> {
        goals::GoalApi { client: self }
    }

    pub fn notifications(&self) -> notifications::NotificationApi<'_> {
        notifications::NotificationApi { client: self }
    }

    pub fn reports(&self) -> reports::ReportApi<'_> {
        reports::ReportApi { client: self }
    }

    pub fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let url = self.url(path);
        self.fetch(self.http.get(&url), "GET", &url)
    }

    pub fn get_query<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, ApiError> {
        let url = self.url(path);
        self.fetch(self.http.get(&url).query(query), "GET", &url)
    }

    pub fn post<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let url = self.url(path);
        self.fetch(self.http.post(&url).json(body), "POST", &url)
    }

    pub fn put<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let url = self.url(path);
        self.fetch(self.http.put(&url).json(body), "PUT", &url)
    }

    /// PUT without a body whose response content is irrelevant.
    pub fn put_empty(&self, path: &str) -> Result<(), ApiError> {
        let url = self.url(path);
        self.send(self.http.put(&url), "PUT", &url).map(|_| ())
    }

    pub fn delete(&self, path: &str) -> Result<(), ApiError> {
        let url = self.url(path);
        self.send(self.http.delete(&url), "DELETE", &url).map(|_| ())
    }

    /// Health probe: any HTTP answer from the base URL counts as reachable.
    pub fn ping(&self) -> Result<u16, ApiError> {
        let url = self.url("/");
        let resp = self
            .http
            .get(&url)
            .send()
            .map_err(|e| ApiError::Transport { url, source: e })?;
        Ok(resp.status().as_u16())
    }

    fn fetch<T: DeserializeOwned>(
        &self,
        req: RequestBuilder,
        method: &str,
        url: &str,
    ) -> Result<T, ApiError> {
        let body = self.send(req, method, url)?;
        decode_body(&body)
    }

    fn send(&self, req: RequestBuilder, method: &str, url: &str) -> Result<String, ApiError> {
        debug!(method, url, "api request");
        let resp = req.send().map_err(|e| ApiError::Transport {
            url: url.to_string(),
            source: e,
        })?;
        let status = resp.status();
        let body = resp.text().map_err(|e| ApiError::Transport {
            url: url.to_string(),
            source: e,
        })?;
        if !status.is_success() {
            let err = ApiError::from_status(status.as_u16(), &body);
            warn!(method, url, status = status.as_u16(), error = %err, "api request failed");
            return Err(err);
        }
        debug!(method, url, status = status.as_u16(), bytes = body.len(), "api response");
        Ok(body)
    }
}

/// Strip the wrappers the backend puts around payloads: `{"data": ..}`
/// envelopes and .NET `{"$values": [..]}` collections, at any nesting.
pub fn unwrap_payload(v: Value) -> Value {
    match v {
        Value::Object(mut map) => {
            if let Some(values) = map.remove("$values") {
                return unwrap_payload(values);
            }
            let is_envelope =
                map.contains_key("data") && map.keys().all(|k| ENVELOPE_KEYS.contains(&k.as_str()));
            if is_envelope {
                let data = map.remove("data").unwrap_or(Value::Null);
                return unwrap_payload(data);
            }
            Value::Object(map.into_iter().map(|(k, v)| (k, unwrap_payload(v))).collect())
        }
        Value::Array(items) => Value::Array(items.into_iter().map(unwrap_payload).collect()),
        other => other,
    }
}

pub fn decode_body<T: DeserializeOwned>(body: &str) -> Result<T, ApiError> {
    let v = if body.trim().is_empty() {
        Value::Null
    } else {
        serde_json::from_str::<Value>(body).map_err(|e| ApiError::Decode(e.to_string()))?
    };
    serde_json::from_value(unwrap_payload(v)).map_err(|e| ApiError::Decode(e.to_string()))
}
