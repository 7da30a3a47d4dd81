// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Wire types for the native signing service.
//!
//! Field names follow the service's JSON contract (camelCase, tagged
//! unions discriminated by a `type` field). The placement of a signature is
//! either a list of explicitly placed boxes per page or a text-search
//! anchor; the two request shapes are mutually exclusive.

use crate::models::appearance::{SignatureAppearance, TextPlacement};
use crate::models::signature::SignaturesOnPage;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type")]
pub enum DocumentSource {
    #[serde(rename = "base64")]
    Base64 { content: String },
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type")]
pub enum DocumentOutput {
    #[serde(rename = "base64")]
    Base64,
}

#[derive(Debug, Clone, Serialize)]
pub struct DocumentPayload {
    pub source: DocumentSource,
    pub output: DocumentOutput,
}

impl DocumentPayload {
    fn base64(content: String) -> Self {
        Self {
            source: DocumentSource::Base64 { content },
            output: DocumentOutput::Base64,
        }
    }
}

/// Where the service should draw the signature stamp.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type")]
pub enum SignaturePlacement {
    #[serde(rename = "pages")]
    Pages { pages: Vec<SignaturesOnPage> },
    #[serde(rename = "text")]
    Text {
        #[serde(rename = "textLocation")]
        text_location: TextPlacement,
    },
}

#[derive(Debug, Clone, Serialize)]
pub struct SignaturePayload {
    pub placement: SignaturePlacement,
    pub appearance: SignatureAppearance,
}

/// Body of `POST /sign-pdf`.
#[derive(Debug, Clone, Serialize)]
pub struct SignRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    pub document: DocumentPayload,
    pub signature: SignaturePayload,
}

impl SignRequest {
    /// Sign at explicitly placed boxes.
    pub fn with_pages(
        pages: Vec<SignaturesOnPage>,
        base64_pdf: String,
        appearance: SignatureAppearance,
        token: &str,
    ) -> Self {
        Self {
            token: Some(token.to_string()),
            document: DocumentPayload::base64(base64_pdf),
            signature: SignaturePayload {
                placement: SignaturePlacement::Pages { pages },
                appearance,
            },
        }
    }

    /// Sign at a located text anchor.
    pub fn with_text_location(
        text_location: TextPlacement,
        base64_pdf: String,
        appearance: SignatureAppearance,
    ) -> Self {
        Self {
            token: None,
            document: DocumentPayload::base64(base64_pdf),
            signature: SignaturePayload {
                placement: SignaturePlacement::Text { text_location },
                appearance,
            },
        }
    }
}

/// Body of `POST /encrypt`.
#[derive(Debug, Clone, Serialize)]
pub struct EncryptRequest {
    pub data: String,
    pub certs: Vec<String>,
}

/// Body of `POST /decrypt`.
#[derive(Debug, Clone, Serialize)]
pub struct DecryptRequest {
    pub data: String,
}

/// Certificate details as reported by `GET /get-certificate`.
///
/// The validity fields are PascalCase on the wire.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CertificateInfo {
    pub certificate: String,
    pub issuer: String,
    pub subject: String,
    pub certificate_usage: Vec<String>,
    #[serde(rename = "ValidFrom")]
    pub valid_from: String,
    #[serde(rename = "ValidTo")]
    pub valid_to: String,
    pub serial_number: String,
    pub signature_algorithm: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ResponseDocument {
    pub content: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ErrorDetail {
    pub message: String,
}

/// Envelope every service endpoint answers with. Absent fields default so
/// the same type covers version probes, certificate fetches, and document
/// operations.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct NativeResponse {
    pub document: ResponseDocument,
    pub timestamp: String,
    pub certificate_details: CertificateInfo,
    pub status: bool,
    pub token_expiry: String,
    pub error: ErrorDetail,
    pub version: String,
}

impl NativeResponse {
    /// Extract the returned base64 document, or the service's error message.
    pub fn into_document(self) -> Result<String, String> {
        if self.status && !self.document.content.is_empty() {
            Ok(self.document.content)
        } else if self.error.message.is_empty() {
            Err("native service returned no document".to_string())
        } else {
            Err(self.error.message)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::signature::SignatureLayout;

    #[test]
    fn test_pages_request_shape() {
        let mut layout = SignatureLayout::new();
        layout.place_at(1, 88, 40);
        let request = SignRequest::with_pages(
            layout.pages,
            "QkFTRTY0".to_string(),
            SignatureAppearance::default(),
            "token-123",
        );
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["token"], "token-123");
        assert_eq!(json["document"]["source"]["type"], "base64");
        assert_eq!(json["document"]["source"]["content"], "QkFTRTY0");
        assert_eq!(json["document"]["output"]["type"], "base64");
        assert_eq!(json["signature"]["placement"]["type"], "pages");
        assert_eq!(
            json["signature"]["placement"]["pages"][0]["pageNumber"],
            1
        );
        assert_eq!(json["signature"]["appearance"]["showTimestamp"], true);
    }

    #[test]
    fn test_text_request_shape() {
        let mut placement = TextPlacement::default();
        placement.search_text = "Authorized".to_string();
        let request = SignRequest::with_text_location(
            placement,
            "QkFTRTY0".to_string(),
            SignatureAppearance::default(),
        );
        let json = serde_json::to_value(&request).unwrap();
        assert!(json.get("token").is_none(), "text requests carry no token");
        assert_eq!(json["signature"]["placement"]["type"], "text");
        assert_eq!(
            json["signature"]["placement"]["textLocation"]["searchText"],
            "Authorized"
        );
        assert_eq!(
            json["signature"]["placement"]["textLocation"]["position"],
            "below"
        );
    }

    #[test]
    fn test_response_with_missing_fields() {
        let response: NativeResponse =
            serde_json::from_str(r#"{"version": "1.2.0"}"#).unwrap();
        assert_eq!(response.version, "1.2.0");
        assert!(!response.status);
        assert!(response.into_document().is_err());
    }

    #[test]
    fn test_successful_response_yields_document() {
        let response: NativeResponse = serde_json::from_str(
            r#"{"status": true, "document": {"content": "U0lHTkVE"}, "timestamp": "2025-03-01T10:00:00Z"}"#,
        )
        .unwrap();
        assert_eq!(response.into_document().unwrap(), "U0lHTkVE");
    }

    #[test]
    fn test_failed_response_surfaces_error_message() {
        let response: NativeResponse = serde_json::from_str(
            r#"{"status": false, "error": {"message": "certificate expired"}}"#,
        )
        .unwrap();
        assert_eq!(response.into_document().unwrap_err(), "certificate expired");
    }

    #[test]
    fn test_certificate_details_validity_casing() {
        let response: NativeResponse = serde_json::from_str(
            r#"{"status": true, "certificateDetails": {"certificate": "PEM", "ValidFrom": "2025-01-01", "ValidTo": "2026-01-01"}}"#,
        )
        .unwrap();
        assert_eq!(response.certificate_details.certificate, "PEM");
        assert_eq!(response.certificate_details.valid_from, "2025-01-01");
    }
}
