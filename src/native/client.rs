// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Blocking HTTP client for the native signing service.
//!
//! Every call here runs on a background thread spawned by the application;
//! nothing in this module touches the UI thread. The service presents a
//! self-signed certificate on localhost, so certificate verification is
//! disabled for this client only.

use super::protocol::{DecryptRequest, EncryptRequest, NativeResponse, SignRequest};
use anyhow::{Context, Result};
use reqwest::blocking::Client;
use std::time::Duration;

const API_TOKEN_HEADER: &str = "X-API-Token";

pub struct NativeClient {
    http: Client,
    base_url: String,
    api_token: String,
}

impl NativeClient {
    pub fn new(base_url: String, api_token: String) -> Result<Self> {
        let http = Client::builder()
            .danger_accept_invalid_certs(true)
            .timeout(Duration::from_secs(120))
            .build()
            .context("failed to build HTTP client")?;
        Ok(Self {
            http,
            base_url,
            api_token,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }

    /// Availability probe. The only endpoint that takes no API token.
    pub fn version(&self) -> Result<NativeResponse> {
        self.http
            .get(self.url("/version"))
            .send()
            .and_then(|r| r.json())
            .context("native service version probe failed")
    }

    /// Fetch the user's certificate details from the service.
    pub fn get_certificate(&self) -> Result<NativeResponse> {
        self.http
            .get(self.url("/get-certificate"))
            .header(API_TOKEN_HEADER, &self.api_token)
            .send()
            .and_then(|r| r.json())
            .context("certificate fetch failed")
    }

    pub fn sign(&self, request: &SignRequest) -> Result<NativeResponse> {
        self.http
            .post(self.url("/sign-pdf"))
            .header(API_TOKEN_HEADER, &self.api_token)
            .json(request)
            .send()
            .and_then(|r| r.json())
            .context("sign request failed")
    }

    pub fn encrypt(&self, data: String, certs: Vec<String>) -> Result<NativeResponse> {
        self.http
            .post(self.url("/encrypt"))
            .header(API_TOKEN_HEADER, &self.api_token)
            .json(&EncryptRequest { data, certs })
            .send()
            .and_then(|r| r.json())
            .context("encrypt request failed")
    }

    pub fn decrypt(&self, data: String) -> Result<NativeResponse> {
        self.http
            .post(self.url("/decrypt"))
            .header(API_TOKEN_HEADER, &self.api_token)
            .json(&DecryptRequest { data })
            .send()
            .and_then(|r| r.json())
            .context("decrypt request failed")
    }
}
