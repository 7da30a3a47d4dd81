// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Runtime configuration, read once from the environment at startup.

use std::path::PathBuf;

const DEFAULT_SERVICE_URL: &str = "https://localhost:9020";

// Shared token the stock native service ships with; override per install
// through SIGNDESK_TOKEN.
const DEFAULT_API_TOKEN: &str =
    "bnNa4KYWE8PplXOkBe1iPJ7Ghp5J+wE8USJWHFn57KRGO9Cy22lChUuCJ3SOl5ss";

const DEFAULT_REGISTRY_FILE: &str = "signdesk-certificates.db";

#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the native signing service.
    pub service_url: String,
    /// Token sent as X-API-Token on every authenticated call.
    pub api_token: String,
    /// Path of the sqlite certificate registry.
    pub registry_path: PathBuf,
    /// Email the user's own certificate is registered under.
    pub identity_email: String,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            service_url: std::env::var("SIGNDESK_SERVICE_URL")
                .unwrap_or_else(|_| DEFAULT_SERVICE_URL.to_string()),
            api_token: std::env::var("SIGNDESK_TOKEN")
                .unwrap_or_else(|_| DEFAULT_API_TOKEN.to_string()),
            registry_path: std::env::var_os("SIGNDESK_REGISTRY")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_REGISTRY_FILE)),
            identity_email: std::env::var("SIGNDESK_EMAIL").unwrap_or_default(),
        }
    }
}
