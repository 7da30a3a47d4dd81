// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Coordinate transforms between the rendered viewport and PDF space.
//!
//! Stored signature coordinates are always PDF-space units; on-screen pixel
//! rects are ephemeral and recomputed from these transforms on every render
//! and resize. All results round to the nearest integer. Out-of-bounds
//! pointer positions are not clamped.

use crate::models::document::PdfDimensions;
use crate::models::signature::SignaturePosition;

/// A signature box expressed in viewport pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelRect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

/// Map a pointer position (relative to the rendered page's top-left corner)
/// to PDF-space coordinates.
pub fn pointer_to_pdf(
    click_x: f32,
    click_y: f32,
    display_width: f32,
    display_height: f32,
    dims: &PdfDimensions,
) -> (i32, i32) {
    let x = (click_x as f64 / display_width as f64 * dims.width).round() as i32;
    let y = (click_y as f64 / display_height as f64 * dims.height).round() as i32;
    (x, y)
}

/// Map a stored signature box to viewport pixels for the page's current
/// rendered size. Each axis scales independently by `rendered / intrinsic`.
pub fn pdf_to_viewport(
    signature: &SignaturePosition,
    display_width: f32,
    display_height: f32,
    dims: &PdfDimensions,
) -> PixelRect {
    let sx = display_width as f64 / dims.width;
    let sy = display_height as f64 / dims.height;
    PixelRect {
        x: (signature.x as f64 * sx).round() as i32,
        y: (signature.y as f64 * sy).round() as i32,
        width: (signature.width as f64 * sx).round() as i32,
        height: (signature.height as f64 * sy).round() as i32,
    }
}

/// Map a dragged or resized pixel rect back to PDF space.
pub fn viewport_to_pdf(
    rect: &PixelRect,
    display_width: f32,
    display_height: f32,
    dims: &PdfDimensions,
) -> (i32, i32, i32, i32) {
    let sx = dims.width / display_width as f64;
    let sy = dims.height / display_height as f64;
    (
        (rect.x as f64 * sx).round() as i32,
        (rect.y as f64 * sy).round() as i32,
        (rect.width as f64 * sx).round() as i32,
        (rect.height as f64 * sy).round() as i32,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dims(width: f64, height: f64) -> PdfDimensions {
        PdfDimensions::new(width, height)
    }

    #[test]
    fn test_click_scales_to_pdf_space() {
        // 700px wide render of a 350-unit page: pixel 175 lands on unit 88.
        let (x, y) = pointer_to_pdf(175.0, 0.0, 700.0, 990.0, &dims(350.0, 495.0));
        assert_eq!(x, 88);
        assert_eq!(y, 0);
    }

    #[test]
    fn test_signature_maps_to_viewport_pixels() {
        let sig = SignaturePosition {
            sign: 1,
            x: 88,
            y: 40,
            width: 100,
            height: 40,
        };
        let px = pdf_to_viewport(&sig, 700.0, 990.0, &dims(350.0, 495.0));
        assert_eq!(
            px,
            PixelRect {
                x: 176,
                y: 80,
                width: 200,
                height: 80,
            }
        );
    }

    #[test]
    fn test_viewport_rect_maps_back_to_pdf() {
        let rect = PixelRect {
            x: 176,
            y: 80,
            width: 200,
            height: 80,
        };
        let (x, y, w, h) = viewport_to_pdf(&rect, 700.0, 990.0, &dims(350.0, 495.0));
        assert_eq!((x, y, w, h), (88, 40, 100, 40));
    }

    #[test]
    fn test_round_trip_stays_within_one_unit() {
        let d = dims(612.0, 792.0);
        let (dw, dh) = (700.0_f32, 906.0_f32);
        for x in (0..700).step_by(7) {
            for y in (0..906).step_by(9) {
                let rect = PixelRect {
                    x,
                    y,
                    width: 150,
                    height: 60,
                };
                let (px, py, pw, ph) = viewport_to_pdf(&rect, dw, dh, &d);
                let back = pdf_to_viewport(
                    &SignaturePosition {
                        sign: 1,
                        x: px,
                        y: py,
                        width: pw,
                        height: ph,
                    },
                    dw,
                    dh,
                    &d,
                );
                assert!((back.x - rect.x).abs() <= 1, "x drifted at {x},{y}");
                assert!((back.y - rect.y).abs() <= 1, "y drifted at {x},{y}");
                assert!((back.width - rect.width).abs() <= 1);
                assert!((back.height - rect.height).abs() <= 1);
            }
        }
    }

    #[test]
    fn test_out_of_bounds_positions_pass_through() {
        // No clamping: a click past the page edge maps past the PDF edge.
        let (x, _) = pointer_to_pdf(750.0, 10.0, 700.0, 990.0, &dims(350.0, 495.0));
        assert_eq!(x, 375);
    }
}
