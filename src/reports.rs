// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::error::{ApiError, StorageError};
use crate::models::{NewReport, Report};
use reqwest::blocking::Client;
use std::time::Duration;
use tracing::{debug, info, warn};

pub const MOCK_STORAGE_BASE: &str = "https://mock-storage.finboard.local";

pub trait ReportBackend {
    fn list(&self, user_id: i64) -> Result<Vec<Report>, ApiError>;
    fn register(&self, r: &NewReport) -> Result<Report, ApiError>;
    fn delete(&self, id: i64) -> Result<(), ApiError>;
}

/// Where generated report files end up.
pub trait ObjectStore {
    /// Store `bytes` under `key` and return the URL it can be read from.
    fn put(&self, key: &str, bytes: Vec<u8>, content_type: &str) -> Result<String, StorageError>;
}

/// Bucket reachable over plain HTTP `PUT {bucket_url}/{key}`.
pub struct HttpObjectStore {
    http: Client,
    bucket_url: String,
}

impl HttpObjectStore {
    pub fn new(bucket_url: &str, timeout_secs: u64) -> Result<Self, StorageError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| StorageError::Upload {
                key: String::new(),
                source: e,
            })?;
        Ok(Self {
            http,
            bucket_url: bucket_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn object_url(&self, key: &str) -> String {
        format!("{}/{}", self.bucket_url, encode_key(key))
    }
}

impl ObjectStore for HttpObjectStore {
    fn put(&self, key: &str, bytes: Vec<u8>, content_type: &str) -> Result<String, StorageError> {
        let url = self.object_url(key);
        debug!(%url, bytes = bytes.len(), "uploading report");
        let resp = self
            .http
            .put(&url)
            .header(reqwest::header::CONTENT_TYPE, content_type)
            .body(bytes)
            .send()
            .map_err(|e| StorageError::Upload {
                key: key.to_string(),
                source: e,
            })?;
        if !resp.status().is_success() {
            return Err(StorageError::Rejected {
                key: key.to_string(),
                status: resp.status().as_u16(),
            });
        }
        Ok(url)
    }
}

fn encode_key(key: &str) -> String {
    key.split('/')
        .map(|seg| urlencoding::encode(seg).into_owned())
        .collect::<Vec<_>>()
        .join("/")
}

pub fn object_key(user_id: i64, filename: &str) -> Result<String, StorageError> {
    let name = filename.trim();
    if name.is_empty() || name.contains('/') || name.contains('\\') || name == "." || name == ".." {
        return Err(StorageError::BadFilename(filename.to_string()));
    }
    Ok(format!("reports/user_{}/{}", user_id, name))
}

/// Stand-in URL used when no object store is configured. Same input, same URL.
pub fn mock_url(key: &str) -> String {
    format!("{}/{}", MOCK_STORAGE_BASE, encode_key(key))
}

#[derive(Debug, Clone, PartialEq)]
pub struct UploadOutcome {
    pub key: String,
    pub url: String,
    pub mocked: bool,
}

/// Upload a report file, or mint a mock URL when `store` is `None`.
pub fn upload(
    store: Option<&dyn ObjectStore>,
    user_id: i64,
    filename: &str,
    bytes: Vec<u8>,
    content_type: &str,
) -> Result<UploadOutcome, StorageError> {
    let key = object_key(user_id, filename)?;
    match store {
        Some(s) => {
            let url = s.put(&key, bytes, content_type)?;
            info!(%key, %url, "report uploaded");
            Ok(UploadOutcome {
                key,
                url,
                mocked: false,
            })
        }
        None => {
            warn!(%key, "no object store configured; using a mock URL");
            let url = mock_url(&key);
            Ok(UploadOutcome {
                key,
                url,
                mocked: true,
            })
        }
    }
}

pub fn content_type_for(filename: &str) -> &'static str {
    match filename
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .as_deref()
    {
        Some("pdf") => "application/pdf",
        Some("csv") => "text/csv",
        Some("json") => "application/json",
        _ => "application/octet-stream",
    }
}

/// The report list as currently shown.
#[derive(Debug, Clone, Default)]
pub struct ReportList {
    reports: Vec<Report>,
}

impl ReportList {
    pub fn new(reports: Vec<Report>) -> Self {
        Self { reports }
    }

    pub fn fetch(backend: &dyn ReportBackend, user_id: i64) -> Result<Self, ApiError> {
        Ok(Self::new(backend.list(user_id)?))
    }

    pub fn reports(&self) -> &[Report] {
        &self.reports
    }

    pub fn find(&self, id: i64) -> Option<&Report> {
        self.reports.iter().find(|r| r.id == id)
    }

    /// Drop exactly the report with `id`; everything else stays in order.
    pub fn remove(&mut self, id: i64) -> Option<Report> {
        let pos = self.reports.iter().position(|r| r.id == id)?;
        Some(self.reports.remove(pos))
    }

    /// Delete on the server first; the local list only changes if that worked.
    pub fn delete(&mut self, backend: &dyn ReportBackend, id: i64) -> Result<Option<Report>, ApiError> {
        backend.delete(id)?;
        Ok(self.remove(id))
    }
}
