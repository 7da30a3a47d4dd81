// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Signature placement data structures.
//!
//! This module defines placed signature boxes, their per-page grouping, and
//! the document-wide layout with its numbering and page-entry bookkeeping.

use serde::{Deserialize, Serialize};

/// Default size of a freshly placed signature box, in PDF units.
pub const DEFAULT_SIGNATURE_WIDTH: i32 = 100;
pub const DEFAULT_SIGNATURE_HEIGHT: i32 = 40;

/// One placed signature box, in PDF-space units.
///
/// `sign` is a positive integer unique across the whole document, not just
/// within one page. Coordinates anchor the top-left corner of the box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignaturePosition {
    pub sign: u32,
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

/// The ordered signatures placed on one page.
///
/// Page numbers are 1-based. An entry exists only while the page holds at
/// least one signature.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignaturesOnPage {
    pub page_number: u32,
    pub signatures: Vec<SignaturePosition>,
}

/// Document-wide signature layout: at most one entry per page number.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SignatureLayout {
    pub pages: Vec<SignaturesOnPage>,
}

impl SignatureLayout {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Total number of placed signatures across all pages.
    pub fn signature_count(&self) -> usize {
        self.pages.iter().map(|p| p.signatures.len()).sum()
    }

    /// Signatures placed on the given page, if any.
    pub fn signatures_on(&self, page_number: u32) -> &[SignaturePosition] {
        self.pages
            .iter()
            .find(|p| p.page_number == page_number)
            .map(|p| p.signatures.as_slice())
            .unwrap_or(&[])
    }

    /// Find the first available signature number.
    ///
    /// Gathers every existing `sign` value across all pages, sorts them, and
    /// scans from 1 upward: the first gap wins, otherwise max + 1.
    pub fn next_signature_number(&self) -> u32 {
        let mut existing: Vec<u32> = self
            .pages
            .iter()
            .flat_map(|page| page.signatures.iter().map(|sig| sig.sign))
            .collect();
        existing.sort_unstable();

        let mut next = 1;
        for num in existing {
            if num > next {
                break;
            }
            next = num + 1;
        }
        next
    }

    /// Place a new signature box at the given PDF-space point.
    ///
    /// The box gets the default size and the next available number; the
    /// page entry is created lazily on first placement. Returns the number
    /// assigned to the new signature.
    pub fn place_at(&mut self, page_number: u32, x: i32, y: i32) -> u32 {
        let sign = self.next_signature_number();
        let signature = SignaturePosition {
            sign,
            x,
            y,
            width: DEFAULT_SIGNATURE_WIDTH,
            height: DEFAULT_SIGNATURE_HEIGHT,
        };

        if let Some(page) = self.pages.iter_mut().find(|p| p.page_number == page_number) {
            page.signatures.push(signature);
        } else {
            self.pages.push(SignaturesOnPage {
                page_number,
                signatures: vec![signature],
            });
        }
        sign
    }

    /// Write an updated rect back into the signature matched by `sign`.
    ///
    /// If no entry exists for the page yet, one is created holding the
    /// signature with the new rect.
    pub fn update_rect(
        &mut self,
        page_number: u32,
        sign: u32,
        x: i32,
        y: i32,
        width: i32,
        height: i32,
    ) {
        match self.pages.iter_mut().find(|p| p.page_number == page_number) {
            Some(page) => {
                if let Some(sig) = page.signatures.iter_mut().find(|s| s.sign == sign) {
                    sig.x = x;
                    sig.y = y;
                    sig.width = width;
                    sig.height = height;
                } else {
                    page.signatures.push(SignaturePosition {
                        sign,
                        x,
                        y,
                        width,
                        height,
                    });
                }
            }
            None => {
                self.pages.push(SignaturesOnPage {
                    page_number,
                    signatures: vec![SignaturePosition {
                        sign,
                        x,
                        y,
                        width,
                        height,
                    }],
                });
            }
        }
    }

    /// Remove the signature matched by `sign` from the given page.
    ///
    /// Dropping the last signature on a page removes the page entry itself;
    /// no empty placeholders persist.
    pub fn remove(&mut self, page_number: u32, sign: u32) {
        for page in &mut self.pages {
            if page.page_number == page_number {
                page.signatures.retain(|s| s.sign != sign);
            }
        }
        self.pages.retain(|p| !p.signatures.is_empty());
    }

    /// Discard all placements (after a successful signing round).
    pub fn clear(&mut self) {
        self.pages.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout_with(signs: &[(u32, &[u32])]) -> SignatureLayout {
        let mut layout = SignatureLayout::new();
        for (page, numbers) in signs {
            for &sign in *numbers {
                layout.update_rect(*page, sign, 0, 0, 100, 40);
            }
        }
        layout
    }

    #[test]
    fn test_first_number_on_empty_layout() {
        assert_eq!(SignatureLayout::new().next_signature_number(), 1);
    }

    #[test]
    fn test_number_fills_gap() {
        let layout = layout_with(&[(1, &[1, 4]), (2, &[2])]);
        assert_eq!(layout.next_signature_number(), 3);
    }

    #[test]
    fn test_number_extends_past_max() {
        let layout = layout_with(&[(1, &[1, 2]), (3, &[3])]);
        assert_eq!(layout.next_signature_number(), 4);
    }

    #[test]
    fn test_numbers_unique_across_pages() {
        let mut layout = SignatureLayout::new();
        assert_eq!(layout.place_at(1, 10, 10), 1);
        assert_eq!(layout.place_at(2, 20, 20), 2);
        assert_eq!(layout.place_at(5, 30, 30), 3);
    }

    #[test]
    fn test_place_uses_default_size() {
        let mut layout = SignatureLayout::new();
        layout.place_at(1, 88, 40);
        let sig = layout.signatures_on(1)[0];
        assert_eq!(sig.width, DEFAULT_SIGNATURE_WIDTH);
        assert_eq!(sig.height, DEFAULT_SIGNATURE_HEIGHT);
    }

    #[test]
    fn test_deleting_last_signature_drops_page_entry() {
        let mut layout = SignatureLayout::new();
        let sign = layout.place_at(2, 0, 0);
        layout.remove(2, sign);
        assert!(layout.is_empty());
    }

    #[test]
    fn test_deleting_one_of_several_keeps_page_entry() {
        let mut layout = SignatureLayout::new();
        let first = layout.place_at(1, 0, 0);
        let second = layout.place_at(1, 50, 50);
        layout.remove(1, first);
        assert_eq!(layout.signatures_on(1).len(), 1);
        assert_eq!(layout.signatures_on(1)[0].sign, second);
    }

    #[test]
    fn test_deleted_number_is_reused() {
        let mut layout = SignatureLayout::new();
        layout.place_at(1, 0, 0);
        let second = layout.place_at(1, 10, 10);
        layout.place_at(1, 20, 20);
        layout.remove(1, second);
        assert_eq!(layout.place_at(2, 0, 0), second);
    }

    #[test]
    fn test_update_creates_missing_page_entry() {
        let mut layout = SignatureLayout::new();
        layout.update_rect(4, 7, 10, 20, 120, 60);
        let sig = layout.signatures_on(4)[0];
        assert_eq!(sig.sign, 7);
        assert_eq!((sig.x, sig.y, sig.width, sig.height), (10, 20, 120, 60));
    }

    #[test]
    fn test_update_matches_by_sign() {
        let mut layout = SignatureLayout::new();
        let first = layout.place_at(1, 0, 0);
        let second = layout.place_at(1, 50, 50);
        layout.update_rect(1, second, 60, 70, 110, 45);
        let sigs = layout.signatures_on(1);
        assert_eq!(sigs[0].x, 0, "other signature untouched");
        assert_eq!(sigs[1].x, 60);
        assert_eq!(sigs[0].sign, first);
    }

    #[test]
    fn test_wire_serialization_is_camel_case() {
        let layout = layout_with(&[(1, &[1])]);
        let json = serde_json::to_string(&layout).unwrap();
        assert!(json.contains("\"pageNumber\":1"));
        assert!(json.contains("\"sign\":1"));
    }
}
