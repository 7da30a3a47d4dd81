// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! PDF structure parsing.
//!
//! Resolves the page list and intrinsic page sizes from a loaded byte
//! buffer. The first page's size becomes the document's `PdfDimensions`;
//! when it cannot be resolved the viewer still works, but placement
//! operations stay disabled.

use crate::models::document::PdfDimensions;
use anyhow::{anyhow, Result};
use lopdf::{Document, Object};

/// Surface size used for pages whose MediaBox cannot be resolved (A4).
const FALLBACK_PAGE_SIZE: (f64, f64) = (595.0, 842.0);

/// Structural summary of a parsed document.
#[derive(Debug, Clone)]
pub struct ParsedPdf {
    /// Intrinsic (width, height) per page, in document order. Pages with an
    /// unresolvable MediaBox get the A4 fallback so they can still render.
    pub page_sizes: Vec<(f64, f64)>,
    /// First-page dimensions, `None` when the MediaBox could not be found.
    pub dimensions: Option<PdfDimensions>,
}

impl ParsedPdf {
    pub fn page_count(&self) -> usize {
        self.page_sizes.len()
    }
}

/// Parse the page tree of the given PDF bytes.
pub fn parse(bytes: &[u8]) -> Result<ParsedPdf> {
    let doc = Document::load_mem(bytes).map_err(|e| anyhow!("PDF parse failed: {e}"))?;
    let pages = doc.get_pages();
    if pages.is_empty() {
        return Err(anyhow!("PDF has no pages"));
    }

    let resolved: Vec<Option<(f64, f64)>> = pages
        .values()
        .map(|&page_id| page_size(&doc, page_id))
        .collect();

    let dimensions = resolved
        .first()
        .copied()
        .flatten()
        .map(|(w, h)| PdfDimensions::new(w, h));

    let page_sizes = resolved
        .into_iter()
        .map(|size| size.unwrap_or(FALLBACK_PAGE_SIZE))
        .collect();

    Ok(ParsedPdf {
        page_sizes,
        dimensions,
    })
}

/// Walk a page's dictionary and its `Parent` chain for a MediaBox.
fn page_size(doc: &Document, page_id: lopdf::ObjectId) -> Option<(f64, f64)> {
    let mut current = Some(page_id);
    while let Some(id) = current {
        let dict = doc.get_object(id).and_then(|o| o.as_dict()).ok()?;
        if let Some(size) = media_box(doc, dict) {
            return Some(size);
        }
        current = dict.get(b"Parent").and_then(|p| p.as_reference()).ok();
    }
    None
}

fn media_box(doc: &Document, dict: &lopdf::Dictionary) -> Option<(f64, f64)> {
    let raw = dict.get(b"MediaBox").ok()?;
    let resolved = match raw {
        Object::Reference(id) => doc.get_object(*id).ok()?,
        other => other,
    };
    let arr = resolved.as_array().ok()?;
    if arr.len() != 4 {
        return None;
    }
    let llx = number(&arr[0])?;
    let lly = number(&arr[1])?;
    let urx = number(&arr[2])?;
    let ury = number(&arr[3])?;
    Some((urx - llx, ury - lly))
}

fn number(obj: &Object) -> Option<f64> {
    match obj {
        Object::Integer(i) => Some(*i as f64),
        Object::Real(f) => Some((*f).into()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lopdf::{dictionary, Stream};

    fn minimal_pdf(page_media_box: Option<Vec<Object>>, pages_media_box: Option<Vec<Object>>) -> Vec<u8> {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();
        let content_id = doc.add_object(Stream::new(dictionary! {}, Vec::new()));

        let mut page_dict = dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        };
        if let Some(mb) = page_media_box {
            page_dict.set("MediaBox", mb);
        }
        let page_id = doc.add_object(page_dict);

        let mut pages_dict = dictionary! {
            "Type" => "Pages",
            "Kids" => vec![page_id.into()],
            "Count" => 1,
        };
        if let Some(mb) = pages_media_box {
            pages_dict.set("MediaBox", mb);
        }
        doc.objects.insert(pages_id, Object::Dictionary(pages_dict));

        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);

        let mut buf = Vec::new();
        doc.save_to(&mut buf).unwrap();
        buf
    }

    fn media_box_of(width: i64, height: i64) -> Vec<Object> {
        vec![0.into(), 0.into(), width.into(), height.into()]
    }

    #[test]
    fn test_first_page_dimensions() {
        let bytes = minimal_pdf(Some(media_box_of(350, 495)), None);
        let parsed = parse(&bytes).unwrap();
        assert_eq!(parsed.page_count(), 1);
        let dims = parsed.dimensions.unwrap();
        assert_eq!(dims.width, 350.0);
        assert_eq!(dims.height, 495.0);
        assert!((dims.aspect_ratio - 350.0 / 495.0).abs() < 1e-9);
    }

    #[test]
    fn test_media_box_inherited_from_parent() {
        let bytes = minimal_pdf(None, Some(media_box_of(612, 792)));
        let parsed = parse(&bytes).unwrap();
        assert_eq!(parsed.page_sizes[0], (612.0, 792.0));
        assert!(parsed.dimensions.is_some());
    }

    #[test]
    fn test_missing_media_box_leaves_dimensions_unknown() {
        let bytes = minimal_pdf(None, None);
        let parsed = parse(&bytes).unwrap();
        assert!(parsed.dimensions.is_none());
        // The page still renders on a fallback surface.
        assert_eq!(parsed.page_sizes[0], FALLBACK_PAGE_SIZE);
    }

    #[test]
    fn test_garbage_bytes_rejected() {
        assert!(parse(b"not a pdf").is_err());
    }
}
