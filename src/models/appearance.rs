// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Signature appearance and text-anchored placement options.
//!
//! These structs serialize camelCase because they travel verbatim inside
//! requests to the native signing service.

use serde::{Deserialize, Serialize};

/// How the signer's name is rendered inside the signature stamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SignerNameText {
    #[serde(rename = "name-only")]
    NameOnly,
    #[serde(rename = "signed-by-name")]
    SignedByName,
    #[serde(rename = "signed-by-signer-name")]
    SignedBySignerName,
    #[serde(rename = "none")]
    None,
}

/// Visual options for the signature stamp.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignatureAppearance {
    pub show_timestamp: bool,
    pub show_validity_icon: bool,
    /// Base64-encoded stamp image, empty when none is chosen.
    pub image: String,
    pub signer_name_text: SignerNameText,
    pub custom_text: String,
    pub reason: String,
    pub location: String,
    pub authorized_by: String,
}

impl Default for SignatureAppearance {
    fn default() -> Self {
        Self {
            show_timestamp: true,
            show_validity_icon: true,
            image: String::new(),
            signer_name_text: SignerNameText::NameOnly,
            custom_text: String::new(),
            reason: String::new(),
            location: String::new(),
            authorized_by: String::new(),
        }
    }
}

/// Where the stamp goes relative to the located text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextPosition {
    Above,
    Below,
}

/// Placement of the stamp anchored to a text search match instead of
/// explicitly placed boxes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextPlacement {
    /// Pages to search; 0 means every page.
    pub pages: Vec<u32>,
    pub search_text: String,
    pub width: i32,
    pub height: i32,
    pub position: TextPosition,
    pub gap: i32,
}

impl Default for TextPlacement {
    fn default() -> Self {
        Self {
            pages: vec![0],
            search_text: String::new(),
            width: 100,
            height: 100,
            position: TextPosition::Below,
            gap: 10,
        }
    }
}

impl TextPlacement {
    /// Validate the form before submitting a text-anchored sign request.
    pub fn validation_error(&self) -> Option<&'static str> {
        if self.search_text.trim().is_empty() {
            return Some("Please enter text to locate the signature position");
        }
        if self.width < 50 {
            return Some("Width must be at least 50px");
        }
        if self.height < 30 {
            return Some("Height must be at least 30px");
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_appearance_serializes_camel_case() {
        let json = serde_json::to_string(&SignatureAppearance::default()).unwrap();
        assert!(json.contains("\"showTimestamp\":true"));
        assert!(json.contains("\"signerNameText\":\"name-only\""));
        assert!(json.contains("\"authorizedBy\":\"\""));
    }

    #[test]
    fn test_text_placement_defaults() {
        let tp = TextPlacement::default();
        assert_eq!(tp.pages, vec![0]);
        assert_eq!(tp.position, TextPosition::Below);
        assert_eq!(tp.gap, 10);
    }

    #[test]
    fn test_text_placement_validation() {
        let mut tp = TextPlacement::default();
        assert!(tp.validation_error().is_some(), "empty search text rejected");

        tp.search_text = "Signed by".to_string();
        assert!(tp.validation_error().is_none());

        tp.width = 40;
        assert!(tp.validation_error().is_some());
        tp.width = 100;
        tp.height = 20;
        assert!(tp.validation_error().is_some());
    }
}
