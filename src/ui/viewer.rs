// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! PDF viewer with interactive signature boxes.
//!
//! Pages render in a vertical scroll list. Signature boxes are drawn as
//! overlay rects whose pixel coordinates are recomputed every frame from
//! the stored PDF-space values and the page's current rendered size;
//! nothing pixel-level survives a resize.

use crate::models::document::PdfDimensions;
use crate::models::signature::SignatureLayout;
use crate::util::geometry;

/// Rendered page width is capped at this many pixels.
pub const MAX_PAGE_WIDTH: f32 = 700.0;

/// Minimum box size during a resize gesture, in display pixels.
pub const MIN_BOX_WIDTH: f32 = 100.0;
pub const MIN_BOX_HEIGHT: f32 = 30.0;

const RESIZE_HANDLE: f32 = 12.0;

/// Display state of one page: its intrinsic size plus the rasterized
/// texture, if pdfium produced one. Without a texture the page shows as a
/// blank surface with the correct aspect ratio.
pub struct PageView {
    pub size: (f64, f64),
    pub texture: Option<egui::TextureHandle>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureKind {
    Move,
    Resize,
}

/// An in-flight drag or resize of one signature box.
///
/// The rect is page-relative pixels; it follows the pointer during the
/// gesture and is converted back to PDF space only on release.
#[derive(Debug, Clone)]
pub struct BoxGesture {
    pub page_number: u32,
    pub sign: u32,
    pub rect: egui::Rect,
    pub page_size: egui::Vec2,
    pub kind: GestureKind,
}

impl BoxGesture {
    pub fn apply_delta(&mut self, delta: egui::Vec2) {
        match self.kind {
            GestureKind::Move => self.rect = self.rect.translate(delta),
            GestureKind::Resize => {
                let width = (self.rect.width() + delta.x).max(MIN_BOX_WIDTH);
                let height = (self.rect.height() + delta.y).max(MIN_BOX_HEIGHT);
                self.rect = egui::Rect::from_min_size(self.rect.min, egui::vec2(width, height));
            }
        }
    }
}

/// Result of viewer interaction.
pub enum ViewerAction {
    None,
    PlaceSignature {
        page_number: u32,
        click_x: f32,
        click_y: f32,
        display_width: f32,
        display_height: f32,
    },
    FocusSignature {
        page_number: u32,
        sign: u32,
    },
    Unfocus,
    BeginGesture(BoxGesture),
    UpdateGesture {
        delta: egui::Vec2,
    },
    CommitGesture,
    DeleteSignature {
        page_number: u32,
        sign: u32,
    },
}

/// Display the page list and handle signature box interactions.
pub fn show(
    ui: &mut egui::Ui,
    pages: &[PageView],
    dimensions: Option<&PdfDimensions>,
    layout: &SignatureLayout,
    adding_signature: bool,
    focused: Option<(u32, u32)>,
    gesture: Option<&BoxGesture>,
) -> ViewerAction {
    let mut action = ViewerAction::None;

    if pages.is_empty() {
        show_welcome(ui);
        return action;
    }

    egui::ScrollArea::vertical()
        .auto_shrink([false; 2])
        .show(ui, |ui| {
            ui.add_space(8.0);
            for (index, page) in pages.iter().enumerate() {
                let page_number = index as u32 + 1;
                ui.vertical_centered(|ui| {
                    ui.label(
                        egui::RichText::new(format!("Page {} of {}", page_number, pages.len()))
                            .weak(),
                    );
                    let page_action = show_page(
                        ui,
                        page,
                        page_number,
                        dimensions,
                        layout,
                        adding_signature,
                        focused,
                        gesture,
                    );
                    if !matches!(page_action, ViewerAction::None) {
                        action = page_action;
                    }
                });
                ui.add_space(16.0);
            }
        });

    action
}

#[allow(clippy::too_many_arguments)]
fn show_page(
    ui: &mut egui::Ui,
    page: &PageView,
    page_number: u32,
    dimensions: Option<&PdfDimensions>,
    layout: &SignatureLayout,
    adding_signature: bool,
    focused: Option<(u32, u32)>,
    gesture: Option<&BoxGesture>,
) -> ViewerAction {
    let mut action = ViewerAction::None;

    let aspect = (page.size.0 / page.size.1) as f32;
    let display_width = ui.available_width().min(MAX_PAGE_WIDTH);
    let display_height = display_width / aspect;
    let display_size = egui::vec2(display_width, display_height);

    let (page_rect, page_response) =
        ui.allocate_exact_size(display_size, egui::Sense::click());
    let page_response = if adding_signature {
        page_response.on_hover_cursor(egui::CursorIcon::Crosshair)
    } else {
        page_response
    };

    let painter = ui.painter_at(page_rect.expand(40.0));
    match &page.texture {
        Some(texture) => painter.image(
            texture.id(),
            page_rect,
            egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
            egui::Color32::WHITE,
        ),
        None => painter.rect_filled(page_rect, 0.0, egui::Color32::WHITE),
    };
    painter.rect_stroke(
        page_rect,
        0.0,
        egui::Stroke::new(1.0, egui::Color32::from_gray(180)),
    );

    // Signature boxes only exist once dimensions resolved; without them the
    // page is view-only.
    let mut box_rects: Vec<egui::Rect> = Vec::new();
    if let Some(dims) = dimensions {
        for signature in layout.signatures_on(page_number) {
            let gesture_rect = gesture
                .filter(|g| g.page_number == page_number && g.sign == signature.sign)
                .map(|g| g.rect.translate(page_rect.min.to_vec2()));
            let box_rect = gesture_rect.unwrap_or_else(|| {
                let px = geometry::pdf_to_viewport(signature, display_width, display_height, dims);
                egui::Rect::from_min_size(
                    page_rect.min + egui::vec2(px.x as f32, px.y as f32),
                    egui::vec2(px.width as f32, px.height as f32),
                )
            });
            box_rects.push(box_rect);

            let is_focused = focused == Some((page_number, signature.sign));
            draw_box(&painter, box_rect, signature.sign, is_focused);

            let box_id = ui.id().with(("signature", page_number, signature.sign));
            let response = ui.interact(box_rect, box_id, egui::Sense::click_and_drag());
            let response = response.on_hover_cursor(egui::CursorIcon::Grab);

            if response.drag_started() {
                action = ViewerAction::BeginGesture(BoxGesture {
                    page_number,
                    sign: signature.sign,
                    rect: box_rect.translate(-page_rect.min.to_vec2()),
                    page_size: display_size,
                    kind: GestureKind::Move,
                });
            } else if response.dragged() {
                action = ViewerAction::UpdateGesture {
                    delta: response.drag_delta(),
                };
            } else if response.drag_stopped() {
                action = ViewerAction::CommitGesture;
            } else if response.clicked() {
                action = ViewerAction::FocusSignature {
                    page_number,
                    sign: signature.sign,
                };
            }

            // Bottom-right resize handle.
            let handle_rect = egui::Rect::from_center_size(
                box_rect.right_bottom(),
                egui::vec2(RESIZE_HANDLE, RESIZE_HANDLE),
            );
            let handle_id = box_id.with("resize");
            let handle = ui.interact(handle_rect, handle_id, egui::Sense::drag());
            let handle = handle.on_hover_cursor(egui::CursorIcon::ResizeNwSe);
            if handle.drag_started() {
                action = ViewerAction::BeginGesture(BoxGesture {
                    page_number,
                    sign: signature.sign,
                    rect: box_rect.translate(-page_rect.min.to_vec2()),
                    page_size: display_size,
                    kind: GestureKind::Resize,
                });
            } else if handle.dragged() {
                action = ViewerAction::UpdateGesture {
                    delta: handle.drag_delta(),
                };
            } else if handle.drag_stopped() {
                action = ViewerAction::CommitGesture;
            }

            if is_focused {
                painter.rect_filled(handle_rect, 2.0, egui::Color32::from_rgb(0, 122, 204));

                let delete_rect = egui::Rect::from_min_size(
                    box_rect.left_bottom() + egui::vec2(0.0, 8.0),
                    egui::vec2(64.0, 22.0),
                );
                if ui
                    .put(delete_rect, egui::Button::new("Delete").small())
                    .clicked()
                {
                    action = ViewerAction::DeleteSignature {
                        page_number,
                        sign: signature.sign,
                    };
                }
            }
        }
    }

    if page_response.clicked() {
        if let Some(pos) = page_response.interact_pointer_pos() {
            let on_box = box_rects.iter().any(|r| r.contains(pos));
            if !on_box {
                if adding_signature {
                    action = ViewerAction::PlaceSignature {
                        page_number,
                        click_x: pos.x - page_rect.min.x,
                        click_y: pos.y - page_rect.min.y,
                        display_width,
                        display_height,
                    };
                } else {
                    action = ViewerAction::Unfocus;
                }
            }
        }
    }

    action
}

fn draw_box(painter: &egui::Painter, rect: egui::Rect, sign: u32, focused: bool) {
    let accent = egui::Color32::from_rgb(0, 122, 204);
    painter.rect_filled(rect, 3.0, egui::Color32::from_rgba_unmultiplied(0, 122, 204, 26));
    let stroke = if focused {
        egui::Stroke::new(2.0, accent)
    } else {
        egui::Stroke::new(1.5, egui::Color32::from_gray(150))
    };
    painter.rect_stroke(rect, 3.0, stroke);
    painter.text(
        rect.center(),
        egui::Align2::CENTER_CENTER,
        format!("Signature {sign}"),
        egui::FontId::proportional(13.0),
        accent,
    );
}

fn show_welcome(ui: &mut egui::Ui) {
    ui.centered_and_justified(|ui| {
        ui.vertical_centered(|ui| {
            ui.add_space(20.0);
            ui.heading(
                egui::RichText::new("SignDesk")
                    .size(32.0)
                    .color(egui::Color32::from_gray(200)),
            );
            ui.label(
                egui::RichText::new("Sign, encrypt, and decrypt PDF documents")
                    .size(14.0)
                    .color(egui::Color32::from_gray(150)),
            );
            ui.add_space(20.0);
            ui.label(
                egui::RichText::new("Open a PDF or drop it onto the window to begin")
                    .color(egui::Color32::from_gray(180)),
            );
            ui.add_space(10.0);
            ui.label(
                egui::RichText::new("File → Open PDF...")
                    .weak()
                    .color(egui::Color32::from_gray(130)),
            );
        });
    });
}
