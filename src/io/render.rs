// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Page rasterization through a system pdfium library.
//!
//! Rendering is best-effort: when no pdfium library can be bound (or a page
//! fails to render) the caller falls back to blank page surfaces with the
//! correct aspect ratio, and interaction keeps working against those.

use pdfium_render::prelude::*;

/// One page rasterized to RGBA pixels.
pub struct RenderedPage {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

/// Rasterize every page of the document at the given target pixel width.
pub fn rasterize(bytes: &[u8], target_width: i32) -> Result<Vec<RenderedPage>, String> {
    let bindings = Pdfium::bind_to_system_library()
        .map_err(|e| format!("pdfium unavailable: {e}"))?;
    let pdfium = Pdfium::new(bindings);
    let document = pdfium
        .load_pdf_from_byte_slice(bytes, None)
        .map_err(|e| format!("pdfium could not open document: {e}"))?;

    let config = PdfRenderConfig::new().set_target_width(target_width);
    let mut rendered = Vec::new();
    for page in document.pages().iter() {
        let bitmap = page
            .render_with_config(&config)
            .map_err(|e| format!("page render failed: {e}"))?;
        rendered.push(RenderedPage {
            width: bitmap.width() as u32,
            height: bitmap.height() as u32,
            pixels: bitmap.as_rgba_bytes(),
        });
    }
    Ok(rendered)
}
