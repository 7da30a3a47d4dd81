// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Loaded document state.
//!
//! This module defines the intrinsic dimensions of a PDF document and the
//! in-memory representation of the currently loaded file.

/// Intrinsic size of the document's first page, in PDF units.
///
/// Derived once per loaded document and read by every coordinate transform.
/// While a document is still loading (or its page tree cannot be resolved)
/// no `PdfDimensions` value exists and placement operations are no-ops.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PdfDimensions {
    pub width: f64,
    pub height: f64,
    pub aspect_ratio: f64,
}

impl PdfDimensions {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            aspect_ratio: width / height,
        }
    }
}

/// The PDF currently open in the viewer.
///
/// The byte buffer is replaced wholesale when the native service returns a
/// signed, encrypted, or decrypted document.
#[derive(Debug, Clone)]
pub struct DocumentFile {
    pub name: String,
    pub bytes: Vec<u8>,
}

impl DocumentFile {
    pub fn new(name: String, bytes: Vec<u8>) -> Self {
        Self { name, bytes }
    }
}
