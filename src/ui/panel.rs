// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Actions panel: sign, encrypt, and decrypt forms.
//!
//! The panel renders the forms and reports the user's intent back to the
//! application as a `PanelAction`; all side effects (service calls, registry
//! lookups) happen in the app layer.

use crate::models::appearance::{
    SignatureAppearance, SignerNameText, TextPlacement, TextPosition,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelTab {
    Sign,
    Encrypt,
    Decrypt,
}

/// How the sign request locates the stamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlacementMode {
    Pages,
    Text,
}

/// A recipient whose certificate was resolved from the registry.
#[derive(Debug, Clone)]
pub struct Recipient {
    pub email: String,
    pub certificate: String,
}

/// Form state owned by the application and edited in place by the panel.
pub struct PanelState {
    pub tab: PanelTab,
    pub placement_mode: PlacementMode,
    pub appearance: SignatureAppearance,
    pub text_placement: TextPlacement,
    pub text_pages_input: String,
    pub recipient_input: String,
    pub recipients: Vec<Recipient>,
}

impl Default for PanelState {
    fn default() -> Self {
        Self {
            tab: PanelTab::Sign,
            placement_mode: PlacementMode::Pages,
            appearance: SignatureAppearance::default(),
            text_placement: TextPlacement::default(),
            text_pages_input: "0".to_string(),
            recipient_input: String::new(),
            recipients: Vec::new(),
        }
    }
}

/// Read-only context the panel needs to enable and disable its controls.
pub struct PanelContext<'a> {
    pub document_loaded: bool,
    pub signature_count: usize,
    pub service_available: Option<bool>,
    pub busy: bool,
    /// None when the registry could not be opened.
    pub identity_registered: Option<bool>,
    pub identity_email: &'a str,
}

/// Result of panel interaction.
pub enum PanelAction {
    None,
    Sign,
    Encrypt,
    Decrypt,
    RegisterCertificate,
    AddRecipient(String),
    RemoveRecipient(usize),
    ChooseStampImage,
    ClearStampImage,
    ProbeService,
}

/// Display the actions panel.
pub fn show(ui: &mut egui::Ui, state: &mut PanelState, ctx: &PanelContext) -> PanelAction {
    let mut action = PanelAction::None;

    ui.add_space(6.0);
    ui.heading("PDF Actions");
    ui.add_space(6.0);

    match ctx.service_available {
        None => {
            ui.horizontal(|ui| {
                ui.spinner();
                ui.label("Checking for the signing service...");
            });
            ui.separator();
        }
        Some(false) => {
            ui.colored_label(
                egui::Color32::from_rgb(200, 60, 60),
                "The native signing service is not reachable. Start it and recheck.",
            );
            if ui.button("Recheck").clicked() {
                action = PanelAction::ProbeService;
            }
            ui.separator();
        }
        Some(true) => {}
    }

    ui.horizontal(|ui| {
        for (tab, label) in [
            (PanelTab::Sign, "Sign"),
            (PanelTab::Encrypt, "Encrypt"),
            (PanelTab::Decrypt, "Decrypt"),
        ] {
            if ui.selectable_label(state.tab == tab, label).clicked() {
                state.tab = tab;
            }
        }
    });
    ui.separator();

    let actions_enabled =
        ctx.document_loaded && ctx.service_available == Some(true) && !ctx.busy;

    match state.tab {
        PanelTab::Sign => {
            let sign_action = show_sign_tab(ui, state, ctx, actions_enabled);
            if !matches!(sign_action, PanelAction::None) {
                action = sign_action;
            }
        }
        PanelTab::Encrypt => {
            let encrypt_action = show_encrypt_tab(ui, state, ctx, actions_enabled);
            if !matches!(encrypt_action, PanelAction::None) {
                action = encrypt_action;
            }
        }
        PanelTab::Decrypt => {
            ui.label("Decrypt a document that was encrypted for your certificate.");
            ui.add_space(8.0);
            if ui
                .add_enabled(actions_enabled, egui::Button::new("Decrypt PDF"))
                .clicked()
            {
                action = PanelAction::Decrypt;
            }
        }
    }

    action
}

fn show_sign_tab(
    ui: &mut egui::Ui,
    state: &mut PanelState,
    ctx: &PanelContext,
    actions_enabled: bool,
) -> PanelAction {
    let mut action = PanelAction::None;

    ui.label("Placement");
    ui.horizontal(|ui| {
        ui.radio_value(&mut state.placement_mode, PlacementMode::Pages, "Placed boxes");
        ui.radio_value(&mut state.placement_mode, PlacementMode::Text, "Text anchor");
    });
    ui.add_space(4.0);

    match state.placement_mode {
        PlacementMode::Pages => {
            let placed = ctx.signature_count;
            if placed == 0 {
                ui.label(
                    egui::RichText::new(
                        "No signatures placed yet. Arm placement in the toolbar, then click a page.",
                    )
                    .italics()
                    .weak(),
                );
            } else {
                ui.label(format!("{placed} signature box(es) placed"));
            }
        }
        PlacementMode::Text => {
            egui::Grid::new("text_placement")
                .num_columns(2)
                .spacing([8.0, 6.0])
                .show(ui, |ui| {
                    ui.label("Search text");
                    ui.text_edit_singleline(&mut state.text_placement.search_text);
                    ui.end_row();

                    ui.label("Pages");
                    ui.text_edit_singleline(&mut state.text_pages_input)
                        .on_hover_text("Comma-separated page numbers; 0 means every page");
                    ui.end_row();

                    ui.label("Width");
                    ui.add(egui::DragValue::new(&mut state.text_placement.width).range(0..=2000));
                    ui.end_row();

                    ui.label("Height");
                    ui.add(egui::DragValue::new(&mut state.text_placement.height).range(0..=2000));
                    ui.end_row();

                    ui.label("Position");
                    egui::ComboBox::from_id_source("text_position")
                        .selected_text(match state.text_placement.position {
                            TextPosition::Above => "Above the text",
                            TextPosition::Below => "Below the text",
                        })
                        .show_ui(ui, |ui| {
                            ui.selectable_value(
                                &mut state.text_placement.position,
                                TextPosition::Above,
                                "Above the text",
                            );
                            ui.selectable_value(
                                &mut state.text_placement.position,
                                TextPosition::Below,
                                "Below the text",
                            );
                        });
                    ui.end_row();

                    ui.label("Gap");
                    ui.add(egui::DragValue::new(&mut state.text_placement.gap).range(0..=200));
                    ui.end_row();
                });
        }
    }

    ui.add_space(6.0);
    egui::CollapsingHeader::new("Appearance")
        .default_open(false)
        .show(ui, |ui| {
            ui.checkbox(&mut state.appearance.show_timestamp, "Show timestamp");
            ui.checkbox(&mut state.appearance.show_validity_icon, "Show validity icon");

            ui.horizontal(|ui| {
                ui.label("Signer name");
                egui::ComboBox::from_id_source("signer_name_text")
                    .selected_text(signer_name_label(state.appearance.signer_name_text))
                    .show_ui(ui, |ui| {
                        for variant in [
                            SignerNameText::NameOnly,
                            SignerNameText::SignedByName,
                            SignerNameText::SignedBySignerName,
                            SignerNameText::None,
                        ] {
                            ui.selectable_value(
                                &mut state.appearance.signer_name_text,
                                variant,
                                signer_name_label(variant),
                            );
                        }
                    });
            });

            egui::Grid::new("appearance_fields")
                .num_columns(2)
                .spacing([8.0, 6.0])
                .show(ui, |ui| {
                    ui.label("Custom text");
                    ui.text_edit_singleline(&mut state.appearance.custom_text);
                    ui.end_row();
                    ui.label("Reason");
                    ui.text_edit_singleline(&mut state.appearance.reason);
                    ui.end_row();
                    ui.label("Location");
                    ui.text_edit_singleline(&mut state.appearance.location);
                    ui.end_row();
                    ui.label("Authorized by");
                    ui.text_edit_singleline(&mut state.appearance.authorized_by);
                    ui.end_row();
                });

            ui.horizontal(|ui| {
                if ui.button("Choose stamp image...").clicked() {
                    action = PanelAction::ChooseStampImage;
                }
                if !state.appearance.image.is_empty() {
                    ui.label("image set");
                    if ui.small_button("Clear").clicked() {
                        action = PanelAction::ClearStampImage;
                    }
                }
            });
        });

    ui.add_space(8.0);
    if ui
        .add_enabled(actions_enabled, egui::Button::new("Sign Document"))
        .clicked()
    {
        action = PanelAction::Sign;
    }

    action
}

fn show_encrypt_tab(
    ui: &mut egui::Ui,
    state: &mut PanelState,
    ctx: &PanelContext,
    actions_enabled: bool,
) -> PanelAction {
    let mut action = PanelAction::None;

    match ctx.identity_registered {
        None => {
            ui.colored_label(
                egui::Color32::from_rgb(200, 60, 60),
                "Certificate registry unavailable; encryption is disabled.",
            );
            return action;
        }
        Some(false) => {
            if ctx.identity_email.is_empty() {
                ui.label(
                    egui::RichText::new(
                        "Set SIGNDESK_EMAIL to register your own certificate for decryption.",
                    )
                    .italics()
                    .weak(),
                );
            } else {
                ui.label(format!(
                    "No certificate registered for {} yet.",
                    ctx.identity_email
                ));
                if ui
                    .add_enabled(
                        ctx.service_available == Some(true) && !ctx.busy,
                        egui::Button::new("Register my certificate"),
                    )
                    .clicked()
                {
                    action = PanelAction::RegisterCertificate;
                }
            }
            ui.separator();
        }
        Some(true) => {
            ui.horizontal(|ui| {
                ui.label("✔");
                ui.label(format!("Certificate registered for {}", ctx.identity_email));
            });
            ui.separator();
        }
    }

    ui.label("Recipients");
    ui.horizontal(|ui| {
        ui.text_edit_singleline(&mut state.recipient_input);
        if ui.button("Add").clicked() && !state.recipient_input.trim().is_empty() {
            action = PanelAction::AddRecipient(state.recipient_input.trim().to_string());
        }
    });

    let mut remove: Option<usize> = None;
    for (index, recipient) in state.recipients.iter().enumerate() {
        ui.horizontal(|ui| {
            ui.label(&recipient.email);
            if ui.small_button("✖").clicked() {
                remove = Some(index);
            }
        });
    }
    if let Some(index) = remove {
        action = PanelAction::RemoveRecipient(index);
    }

    ui.add_space(8.0);
    let can_encrypt = actions_enabled && !state.recipients.is_empty();
    if ui
        .add_enabled(can_encrypt, egui::Button::new("Encrypt PDF"))
        .clicked()
    {
        action = PanelAction::Encrypt;
    }

    action
}

fn signer_name_label(variant: SignerNameText) -> &'static str {
    match variant {
        SignerNameText::NameOnly => "Name only",
        SignerNameText::SignedByName => "Signed by (name)",
        SignerNameText::SignedBySignerName => "Signed by (signer name)",
        SignerNameText::None => "None",
    }
}

/// Parse the comma-separated page list for text placement. An empty or
/// unparsable input means "every page" (the service's 0 sentinel).
pub fn parse_pages_list(input: &str) -> Vec<u32> {
    let pages: Vec<u32> = input
        .split(',')
        .filter_map(|part| part.trim().parse().ok())
        .collect();
    if pages.is_empty() {
        vec![0]
    } else {
        pages
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_pages_list() {
        assert_eq!(parse_pages_list("1, 3,5"), vec![1, 3, 5]);
        assert_eq!(parse_pages_list("0"), vec![0]);
        assert_eq!(parse_pages_list(""), vec![0]);
        assert_eq!(parse_pages_list("abc"), vec![0]);
    }
}
