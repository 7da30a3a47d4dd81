// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Toolbar with the placement toggle and document summary.

/// Display the toolbar. `adding_signature` arms one-shot placement: it
/// disengages automatically after the next click on a page.
pub fn show(
    ui: &mut egui::Ui,
    adding_signature: &mut bool,
    document_name: Option<&str>,
    signature_count: usize,
) {
    ui.horizontal(|ui| {
        ui.spacing_mut().item_spacing.x = 8.0;

        let can_place = document_name.is_some();
        let label = ui.add_enabled(
            can_place,
            egui::SelectableLabel::new(*adding_signature, "✍ Place signature"),
        );
        if label.clicked() {
            *adding_signature = !*adding_signature;
        }

        ui.separator();

        let hint = if !can_place {
            "Open a PDF to place signatures"
        } else if *adding_signature {
            "Click a page to drop the signature box"
        } else {
            "Arm placement, then click a page; drag boxes to move, corner to resize"
        };
        ui.label(egui::RichText::new(hint).italics().weak());

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if let Some(name) = document_name {
                ui.label(name);
                if signature_count > 0 {
                    ui.separator();
                    ui.label(format!("{signature_count} placed"));
                }
            }
        });
    });
}
