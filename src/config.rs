// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Client configuration.
//!
//! A TOML file in the platform config dir, every section optional, with
//! `FINBOARD_API_URL` / `FINBOARD_BUCKET_URL` taking precedence.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub notifications: NotificationConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    "http://localhost:5000".to_string()
}

fn default_timeout() -> u64 {
    15
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationConfig {
    #[serde(default = "default_poll_interval")]
    pub poll_interval_secs: u64,
}

fn default_poll_interval() -> u64 {
    30
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            poll_interval_secs: default_poll_interval(),
        }
    }
}

/// Object store for generated reports. Unset means reports get a mock URL.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StorageConfig {
    #[serde(default)]
    pub bucket_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_level")]
    pub level: String,
}

fn default_level() -> String {
    "warn".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    let proj = crate::db::project_dirs()?;
    Ok(proj.config_dir().join("config.toml"))
}

impl Config {
    /// Load from `path` (or the default location). A missing file is not an error.
    pub fn load(path: Option<&Path>) -> Result<Config> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => config_path()?,
        };
        let mut cfg = if path.exists() {
            let raw = fs::read_to_string(&path)
                .with_context(|| format!("Read config {}", path.display()))?;
            Config::from_toml(&raw).with_context(|| format!("Parse config {}", path.display()))?
        } else {
            Config::default()
        };
        cfg.apply_overrides(
            std::env::var("FINBOARD_API_URL").ok(),
            std::env::var("FINBOARD_BUCKET_URL").ok(),
        );
        Ok(cfg)
    }

    pub fn from_toml(raw: &str) -> Result<Config> {
        Ok(toml::from_str(raw)?)
    }

    pub fn apply_overrides(&mut self, api_url: Option<String>, bucket_url: Option<String>) {
        if let Some(u) = api_url.filter(|s| !s.trim().is_empty()) {
            self.api.base_url = u;
        }
        if let Some(u) = bucket_url.filter(|s| !s.trim().is_empty()) {
            self.storage.bucket_url = Some(u);
        }
        self.api.base_url = self.api.base_url.trim_end_matches('/').to_string();
        if let Some(u) = self.storage.bucket_url.as_mut() {
            *u = u.trim_end_matches('/').to_string();
        }
    }

    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }
}
