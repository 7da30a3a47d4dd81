// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Main application state and egui App implementation.
//!
//! This module contains the main application structure that implements
//! the egui::App trait, owning the loaded document, the signature layout,
//! and the channels to background loading and service threads.

use crate::config::Config;
use crate::io;
use crate::io::registry::CertificateRegistry;
use crate::io::serialization::PlacementLayout;
use crate::models::document::{DocumentFile, PdfDimensions};
use crate::models::signature::SignatureLayout;
use crate::native::client::NativeClient;
use crate::native::protocol::{NativeResponse, SignRequest};
use crate::ui::panel::{self, PanelAction, PanelContext, PanelState, PlacementMode, Recipient};
use crate::ui::toolbar;
use crate::ui::viewer::{self, BoxGesture, PageView, ViewerAction};
use crate::util::geometry;
use base64::engine::general_purpose::STANDARD as B64;
use base64::Engine;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{channel, Receiver};
use std::sync::Arc;

/// Rasterization target width, twice the 700 px display cap.
const RENDER_TARGET_WIDTH: i32 = 1400;

/// Result of background document loading.
struct LoadedDocumentData {
    name: String,
    bytes: Vec<u8>,
    dimensions: Option<PdfDimensions>,
    page_sizes: Vec<(f64, f64)>,
    rendered: Vec<Option<io::render::RenderedPage>>,
}

/// Which document operation a background service call performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ServiceOp {
    Sign,
    Encrypt,
    Decrypt,
}

impl ServiceOp {
    fn result_name(self) -> &'static str {
        match self {
            ServiceOp::Sign => "signed.pdf",
            ServiceOp::Encrypt => "encrypted.pdf",
            ServiceOp::Decrypt => "decrypted.pdf",
        }
    }

    fn verb(self) -> &'static str {
        match self {
            ServiceOp::Sign => "signed",
            ServiceOp::Encrypt => "encrypted",
            ServiceOp::Decrypt => "decrypted",
        }
    }

    fn infinitive(self) -> &'static str {
        match self {
            ServiceOp::Sign => "sign",
            ServiceOp::Encrypt => "encrypt",
            ServiceOp::Decrypt => "decrypt",
        }
    }
}

/// Result of a background call to the native service.
enum ServiceMessage {
    Document {
        op: ServiceOp,
        result: Result<Vec<u8>, String>,
    },
    Certificate(Result<String, String>),
}

struct StatusLine {
    text: String,
    is_error: bool,
}

/// Main application state.
pub struct SignDeskApp {
    config: Config,
    client: Option<Arc<NativeClient>>,
    registry: Option<CertificateRegistry>,

    /// Currently loaded PDF (if any)
    document: Option<DocumentFile>,
    /// First-page dimensions; placement is disabled while unknown
    dimensions: Option<PdfDimensions>,
    /// Per-page display state (intrinsic size + texture)
    pages: Vec<PageView>,
    /// Placed signature boxes, in PDF-space units
    layout: SignatureLayout,

    /// One-shot placement mode, disarmed after a placement
    adding_signature: bool,
    /// Focused box (page number, sign), shows the delete affordance
    focused: Option<(u32, u32)>,
    /// In-flight drag or resize gesture
    gesture: Option<BoxGesture>,

    /// Form state for the actions panel
    panel: PanelState,
    /// Cached "own certificate registered" flag; None when no registry
    identity_present: Option<bool>,

    /// Receiver for background document loading
    doc_loader: Option<Receiver<Result<LoadedDocumentData, String>>>,
    /// Receiver for an in-flight native service call
    service_job: Option<Receiver<ServiceMessage>>,
    /// Receiver for the service availability probe
    probe: Option<Receiver<bool>>,
    service_available: Option<bool>,

    /// Loading state message
    loading_message: Option<String>,
    status: Option<StatusLine>,
}

impl SignDeskApp {
    /// Create a new SignDesk application instance.
    pub fn new(config: Config) -> Self {
        let client = match NativeClient::new(config.service_url.clone(), config.api_token.clone())
        {
            Ok(client) => Some(Arc::new(client)),
            Err(e) => {
                log::error!("Failed to build service client: {e}");
                None
            }
        };
        let registry = match CertificateRegistry::open(&config.registry_path) {
            Ok(registry) => Some(registry),
            Err(e) => {
                log::error!("Failed to open certificate registry: {e}");
                None
            }
        };

        let mut app = Self {
            config,
            client,
            registry,
            document: None,
            dimensions: None,
            pages: Vec::new(),
            layout: SignatureLayout::new(),
            adding_signature: false,
            focused: None,
            gesture: None,
            panel: PanelState::default(),
            identity_present: None,
            doc_loader: None,
            service_job: None,
            probe: None,
            service_available: None,
            loading_message: None,
            status: None,
        };
        app.refresh_identity_presence();
        app.probe_service();
        app
    }

    fn set_status(&mut self, text: String) {
        log::info!("{text}");
        self.status = Some(StatusLine {
            text,
            is_error: false,
        });
    }

    fn set_error(&mut self, text: String) {
        log::error!("{text}");
        self.status = Some(StatusLine {
            text,
            is_error: true,
        });
    }

    fn refresh_identity_presence(&mut self) {
        self.identity_present = match &self.registry {
            None => None,
            Some(_) if self.config.identity_email.is_empty() => Some(false),
            Some(registry) => {
                Some(registry.is_present(&self.config.identity_email).unwrap_or(false))
            }
        };
    }

    /// Check whether the native service answers its version probe.
    fn probe_service(&mut self) {
        let Some(client) = self.client.clone() else {
            self.service_available = Some(false);
            return;
        };
        let (sender, receiver) = channel();
        self.probe = Some(receiver);
        self.service_available = None;

        std::thread::spawn(move || {
            let available = client.version().is_ok();
            let _ = sender.send(available);
        });
    }

    /// Parse and rasterize a PDF on a background thread.
    fn load_document_bytes(&mut self, name: String, bytes: Vec<u8>) {
        let (sender, receiver) = channel();
        self.doc_loader = Some(receiver);
        self.loading_message = Some(format!("Loading {name}..."));

        std::thread::spawn(move || {
            let result = (|| -> Result<LoadedDocumentData, String> {
                let parsed = io::pdf::parse(&bytes).map_err(|e| e.to_string())?;

                let mut rendered: Vec<Option<io::render::RenderedPage>> =
                    match io::render::rasterize(&bytes, RENDER_TARGET_WIDTH) {
                        Ok(pages) => pages.into_iter().map(Some).collect(),
                        Err(e) => {
                            log::warn!("Rendering unavailable, using blank page surfaces: {e}");
                            Vec::new()
                        }
                    };
                rendered.resize_with(parsed.page_count(), || None);

                log::info!("Parsed {}: {} pages", name, parsed.page_count());

                Ok(LoadedDocumentData {
                    name,
                    bytes,
                    dimensions: parsed.dimensions,
                    page_sizes: parsed.page_sizes,
                    rendered,
                })
            })();

            let _ = sender.send(result);
        });
    }

    fn open_pdf(&mut self, path: PathBuf) {
        match std::fs::read(&path) {
            Ok(bytes) => {
                let name = path
                    .file_name()
                    .map(|n| n.to_string_lossy().to_string())
                    .unwrap_or_else(|| "document.pdf".to_string());
                self.load_document_bytes(name, bytes);
            }
            Err(e) => self.set_error(format!("Failed to read {}: {e}", path.display())),
        }
    }

    fn save_pdf(&mut self, path: PathBuf) {
        let Some(document) = &self.document else {
            return;
        };
        match std::fs::write(&path, &document.bytes) {
            Ok(()) => self.set_status(format!("Saved {}", path.display())),
            Err(e) => self.set_error(format!("Failed to save PDF: {e}")),
        }
    }

    /// Export the placed-signature layout to a file.
    fn export_layout(&mut self, path: PathBuf) {
        let layout = PlacementLayout {
            source_file: self
                .document
                .as_ref()
                .map(|d| d.name.clone())
                .unwrap_or_default(),
            pages: self.layout.pages.clone(),
        };

        let extension = path.extension().and_then(|s| s.to_str());
        let result = match extension {
            Some("yaml") | Some("yml") => io::serialization::export_yaml(&layout, &path),
            Some("json") => io::serialization::export_json(&layout, &path),
            _ => {
                self.set_error(format!("Unsupported file extension: {extension:?}"));
                return;
            }
        };

        match result {
            Ok(()) => self.set_status(format!("Exported layout to {}", path.display())),
            Err(e) => self.set_error(format!("Failed to export layout: {e}")),
        }
    }

    /// Import a placed-signature layout from a file.
    fn import_layout(&mut self, path: PathBuf) {
        let extension = path.extension().and_then(|s| s.to_str());
        let result = match extension {
            Some("yaml") | Some("yml") => io::serialization::import_yaml(&path),
            Some("json") => io::serialization::import_json(&path),
            _ => {
                self.set_error(format!("Unsupported file extension: {extension:?}"));
                return;
            }
        };

        match result {
            Ok(imported) => {
                if let Some(document) = &self.document {
                    if !imported.source_file.is_empty() && imported.source_file != document.name {
                        log::warn!(
                            "Layout was made for {}, current document is {}",
                            imported.source_file,
                            document.name
                        );
                    }
                }
                let count: usize = imported.pages.iter().map(|p| p.signatures.len()).sum();
                self.layout.pages = imported.pages;
                self.focused = None;
                self.gesture = None;
                self.set_status(format!("Imported layout with {count} signature(s)"));
            }
            Err(e) => self.set_error(format!("Failed to import layout: {e}")),
        }
    }

    fn choose_stamp_image(&mut self) {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("Images", &["png", "jpg", "jpeg", "bmp"])
            .pick_file()
        {
            match load_stamp_image(&path) {
                Ok(encoded) => {
                    self.panel.appearance.image = encoded;
                    self.set_status("Stamp image loaded".to_string());
                }
                Err(e) => self.set_error(format!("Failed to load stamp image: {e}")),
            }
        }
    }

    /// Spawn a background service call whose result is a document.
    fn spawn_document_job<F>(&mut self, op: ServiceOp, call: F)
    where
        F: FnOnce() -> anyhow::Result<NativeResponse> + Send + 'static,
    {
        let (sender, receiver) = channel();
        self.service_job = Some(receiver);

        std::thread::spawn(move || {
            let result = call()
                .map_err(|e| e.to_string())
                .and_then(|response| response.into_document())
                .and_then(|content| {
                    B64.decode(content)
                        .map_err(|e| format!("invalid base64 document: {e}"))
                });
            let _ = sender.send(ServiceMessage::Document { op, result });
        });
    }

    fn run_sign(&mut self) {
        if self.service_job.is_some() {
            return;
        }
        let data = match &self.document {
            Some(document) => B64.encode(&document.bytes),
            None => {
                self.set_error("Please select a file to sign".to_string());
                return;
            }
        };
        let Some(client) = self.client.clone() else {
            self.set_error("Signing service client unavailable".to_string());
            return;
        };

        let request = match self.panel.placement_mode {
            PlacementMode::Pages => {
                if self.layout.is_empty() {
                    self.set_error(
                        "Please add at least one signature on the viewer".to_string(),
                    );
                    return;
                }
                SignRequest::with_pages(
                    self.layout.pages.clone(),
                    data,
                    self.panel.appearance.clone(),
                    &self.config.api_token,
                )
            }
            PlacementMode::Text => {
                let mut placement = self.panel.text_placement.clone();
                placement.pages = panel::parse_pages_list(&self.panel.text_pages_input);
                if let Some(error) = placement.validation_error() {
                    self.set_error(error.to_string());
                    return;
                }
                SignRequest::with_text_location(placement, data, self.panel.appearance.clone())
            }
        };

        self.set_status("Signing document...".to_string());
        self.spawn_document_job(ServiceOp::Sign, move || client.sign(&request));
    }

    fn run_encrypt(&mut self) {
        if self.service_job.is_some() {
            return;
        }
        let data = match &self.document {
            Some(document) => B64.encode(&document.bytes),
            None => {
                self.set_error("Please select a file to encrypt".to_string());
                return;
            }
        };
        if self.panel.recipients.is_empty() {
            self.set_error("Please add at least one recipient".to_string());
            return;
        }
        let Some(client) = self.client.clone() else {
            self.set_error("Signing service client unavailable".to_string());
            return;
        };

        let certs: Vec<String> = self
            .panel
            .recipients
            .iter()
            .map(|r| r.certificate.clone())
            .collect();
        self.set_status("Encrypting document...".to_string());
        self.spawn_document_job(ServiceOp::Encrypt, move || client.encrypt(data, certs));
    }

    fn run_decrypt(&mut self) {
        if self.service_job.is_some() {
            return;
        }
        let data = match &self.document {
            Some(document) => B64.encode(&document.bytes),
            None => {
                self.set_error("Please select a file to decrypt".to_string());
                return;
            }
        };
        let Some(client) = self.client.clone() else {
            self.set_error("Signing service client unavailable".to_string());
            return;
        };

        self.set_status("Decrypting document...".to_string());
        self.spawn_document_job(ServiceOp::Decrypt, move || client.decrypt(data));
    }

    /// Fetch the user's certificate from the service and store it in the
    /// registry under the configured identity email.
    fn register_certificate(&mut self) {
        if self.service_job.is_some() {
            return;
        }
        if self.config.identity_email.is_empty() {
            self.set_error("Set SIGNDESK_EMAIL to register a certificate".to_string());
            return;
        }
        let Some(client) = self.client.clone() else {
            self.set_error("Signing service client unavailable".to_string());
            return;
        };

        let (sender, receiver) = channel();
        self.service_job = Some(receiver);
        std::thread::spawn(move || {
            let result = client.get_certificate().map_err(|e| e.to_string()).and_then(
                |response| {
                    if response.status && !response.certificate_details.certificate.is_empty() {
                        Ok(response.certificate_details.certificate)
                    } else if response.error.message.is_empty() {
                        Err("service returned no certificate".to_string())
                    } else {
                        Err(response.error.message)
                    }
                },
            );
            let _ = sender.send(ServiceMessage::Certificate(result));
        });
    }

    /// Resolve a recipient's certificate from the registry and add them to
    /// the encrypt list; recipients without a registered certificate are
    /// rejected.
    fn add_recipient(&mut self, email: String) {
        if !is_valid_email(&email) {
            self.set_error("Enter a valid email address".to_string());
            return;
        }
        if self.panel.recipients.iter().any(|r| r.email == email) {
            self.set_error("Recipient already added".to_string());
            return;
        }
        let Some(registry) = &self.registry else {
            self.set_error("Certificate registry unavailable".to_string());
            return;
        };
        match registry.lookup(&email) {
            Ok(Some(certificate)) => {
                self.panel.recipients.push(Recipient { email, certificate });
                self.panel.recipient_input.clear();
            }
            Ok(None) => self.set_error(format!("No certificate registered for {email}")),
            Err(e) => self.set_error(format!("Registry lookup failed: {e}")),
        }
    }

    fn handle_panel_action(&mut self, action: PanelAction) {
        match action {
            PanelAction::Sign => self.run_sign(),
            PanelAction::Encrypt => self.run_encrypt(),
            PanelAction::Decrypt => self.run_decrypt(),
            PanelAction::RegisterCertificate => self.register_certificate(),
            PanelAction::AddRecipient(email) => self.add_recipient(email),
            PanelAction::RemoveRecipient(index) => {
                if index < self.panel.recipients.len() {
                    self.panel.recipients.remove(index);
                }
            }
            PanelAction::ChooseStampImage => self.choose_stamp_image(),
            PanelAction::ClearStampImage => self.panel.appearance.image.clear(),
            PanelAction::ProbeService => self.probe_service(),
            PanelAction::None => {}
        }
    }

    fn handle_viewer_action(&mut self, action: ViewerAction) {
        match action {
            ViewerAction::PlaceSignature {
                page_number,
                click_x,
                click_y,
                display_width,
                display_height,
            } => {
                // No dimensions yet means the document is still resolving;
                // the click does nothing.
                if let Some(dims) = &self.dimensions {
                    let (x, y) =
                        geometry::pointer_to_pdf(click_x, click_y, display_width, display_height, dims);
                    let sign = self.layout.place_at(page_number, x, y);
                    self.adding_signature = false;
                    self.focused = Some((page_number, sign));
                    log::info!("Placed signature {sign} on page {page_number} at ({x}, {y})");
                }
            }
            ViewerAction::FocusSignature { page_number, sign } => {
                self.focused = Some((page_number, sign));
            }
            ViewerAction::Unfocus => {
                self.focused = None;
            }
            ViewerAction::BeginGesture(gesture) => {
                self.focused = Some((gesture.page_number, gesture.sign));
                self.gesture = Some(gesture);
            }
            ViewerAction::UpdateGesture { delta } => {
                if let Some(gesture) = &mut self.gesture {
                    gesture.apply_delta(delta);
                }
            }
            ViewerAction::CommitGesture => {
                if let Some(gesture) = self.gesture.take() {
                    if let Some(dims) = &self.dimensions {
                        let rect = geometry::PixelRect {
                            x: gesture.rect.min.x.round() as i32,
                            y: gesture.rect.min.y.round() as i32,
                            width: gesture.rect.width().round() as i32,
                            height: gesture.rect.height().round() as i32,
                        };
                        let (x, y, width, height) = geometry::viewport_to_pdf(
                            &rect,
                            gesture.page_size.x,
                            gesture.page_size.y,
                            dims,
                        );
                        self.layout
                            .update_rect(gesture.page_number, gesture.sign, x, y, width, height);
                        log::info!(
                            "Signature {} on page {} now at ({x}, {y}) size {width}x{height}",
                            gesture.sign,
                            gesture.page_number
                        );
                    }
                }
            }
            ViewerAction::DeleteSignature { page_number, sign } => {
                self.layout.remove(page_number, sign);
                self.focused = None;
                log::info!("Deleted signature {sign} from page {page_number}");
            }
            ViewerAction::None => {}
        }
    }

    fn handle_dropped_files(&mut self, ctx: &egui::Context) {
        let dropped = ctx.input(|i| i.raw.dropped_files.clone());
        let Some(file) = dropped.into_iter().next() else {
            return;
        };
        if let Some(path) = file.path {
            if path
                .extension()
                .and_then(|s| s.to_str())
                .is_some_and(|e| e.eq_ignore_ascii_case("pdf"))
            {
                self.open_pdf(path);
            } else {
                self.set_error("Only PDF files can be opened".to_string());
            }
        } else if let Some(bytes) = file.bytes {
            self.load_document_bytes(file.name, bytes.to_vec());
        }
    }
}

impl eframe::App for SignDeskApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Check for a completed document load
        if let Some(ref receiver) = self.doc_loader {
            if let Ok(result) = receiver.try_recv() {
                self.doc_loader = None;
                self.loading_message = None;

                match result {
                    Ok(data) => {
                        let LoadedDocumentData {
                            name,
                            bytes,
                            dimensions,
                            page_sizes,
                            rendered,
                        } = data;

                        let mut pages = Vec::with_capacity(page_sizes.len());
                        for (index, (size, bitmap)) in
                            page_sizes.into_iter().zip(rendered).enumerate()
                        {
                            let texture = bitmap.map(|b| {
                                let color_image = egui::ColorImage::from_rgba_unmultiplied(
                                    [b.width as usize, b.height as usize],
                                    &b.pixels,
                                );
                                ctx.load_texture(
                                    format!("page_{}", index + 1),
                                    color_image,
                                    egui::TextureOptions::LINEAR,
                                )
                            });
                            pages.push(PageView { size, texture });
                        }

                        let page_count = pages.len();
                        self.pages = pages;
                        self.dimensions = dimensions;
                        self.layout.clear();
                        self.focused = None;
                        self.gesture = None;
                        self.adding_signature = false;
                        self.document = Some(DocumentFile::new(name.clone(), bytes));

                        if self.dimensions.is_none() {
                            self.set_error(format!(
                                "Loaded {name}, but page size could not be resolved; placement is disabled"
                            ));
                        } else {
                            self.set_status(format!("Loaded {name} ({page_count} pages)"));
                        }
                    }
                    Err(e) => {
                        self.set_error(format!("Failed to load PDF: {e}"));
                    }
                }
            }
        }

        // Check for a completed service call
        if let Some(ref receiver) = self.service_job {
            if let Ok(message) = receiver.try_recv() {
                self.service_job = None;

                match message {
                    ServiceMessage::Document { op, result } => match result {
                        Ok(bytes) => {
                            if op == ServiceOp::Sign {
                                self.layout.clear();
                            }
                            if op == ServiceOp::Encrypt {
                                self.panel.recipients.clear();
                                self.panel.recipient_input.clear();
                            }
                            self.set_status(format!("Document {} successfully", op.verb()));
                            self.load_document_bytes(op.result_name().to_string(), bytes);
                        }
                        Err(e) => {
                            self.set_error(format!("Failed to {} PDF: {e}", op.infinitive()));
                        }
                    },
                    ServiceMessage::Certificate(result) => match result {
                        Ok(certificate) => {
                            let registered = match &self.registry {
                                Some(registry) => registry
                                    .register(&self.config.identity_email, &certificate)
                                    .map_err(|e| e.to_string()),
                                None => Err("certificate registry unavailable".to_string()),
                            };
                            match registered {
                                Ok(()) => {
                                    self.refresh_identity_presence();
                                    self.set_status("Certificate registered".to_string());
                                }
                                Err(e) => {
                                    self.set_error(format!("Failed to register certificate: {e}"))
                                }
                            }
                        }
                        Err(e) => self.set_error(format!("Failed to get certificate: {e}")),
                    },
                }
            }
        }

        // Check for a finished availability probe
        if let Some(ref receiver) = self.probe {
            if let Ok(available) = receiver.try_recv() {
                self.probe = None;
                self.service_available = Some(available);
                log::info!(
                    "Native signing service {}",
                    if available { "available" } else { "not reachable" }
                );
            }
        }

        // Keep polling while background work is pending
        if self.loading_message.is_some() || self.service_job.is_some() || self.probe.is_some() {
            ctx.request_repaint_after(std::time::Duration::from_millis(100));
        }

        self.handle_dropped_files(ctx);

        // Top menu bar
        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.menu_button("File", |ui| {
                    if ui.button("Open PDF...").clicked() {
                        if let Some(path) = rfd::FileDialog::new()
                            .add_filter("PDF", &["pdf"])
                            .pick_file()
                        {
                            self.open_pdf(path);
                        }
                        ui.close_menu();
                    }
                    let has_document = self.document.is_some();
                    if ui
                        .add_enabled(has_document, egui::Button::new("Save PDF As..."))
                        .clicked()
                    {
                        let name = self
                            .document
                            .as_ref()
                            .map(|d| d.name.clone())
                            .unwrap_or_default();
                        if let Some(path) = rfd::FileDialog::new()
                            .add_filter("PDF", &["pdf"])
                            .set_file_name(name)
                            .save_file()
                        {
                            self.save_pdf(path);
                        }
                        ui.close_menu();
                    }
                    ui.separator();
                    if ui.button("Import Layout...").clicked() {
                        if let Some(path) = rfd::FileDialog::new()
                            .add_filter("Layouts", &["yaml", "yml", "json"])
                            .pick_file()
                        {
                            self.import_layout(path);
                        }
                        ui.close_menu();
                    }
                    ui.menu_button("Export Layout", |ui| {
                        let has_layout = !self.layout.is_empty();
                        if ui
                            .add_enabled(has_layout, egui::Button::new("Export as YAML..."))
                            .clicked()
                        {
                            if let Some(path) = rfd::FileDialog::new()
                                .add_filter("YAML", &["yaml", "yml"])
                                .set_file_name("layout.yaml")
                                .save_file()
                            {
                                self.export_layout(path);
                            }
                            ui.close_menu();
                        }
                        if ui
                            .add_enabled(has_layout, egui::Button::new("Export as JSON..."))
                            .clicked()
                        {
                            if let Some(path) = rfd::FileDialog::new()
                                .add_filter("JSON", &["json"])
                                .set_file_name("layout.json")
                                .save_file()
                            {
                                self.export_layout(path);
                            }
                            ui.close_menu();
                        }
                    });
                    ui.separator();
                    if ui.button("Quit").clicked() {
                        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                    }
                });

                ui.menu_button("Help", |ui| {
                    if ui.button("About").clicked() {
                        ui.close_menu();
                    }
                });
            });
        });

        // Toolbar
        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            let document_name = self.document.as_ref().map(|d| d.name.clone());
            toolbar::show(
                ui,
                &mut self.adding_signature,
                document_name.as_deref(),
                self.layout.signature_count(),
            );
        });

        // Status bar
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                match &self.status {
                    Some(status) if status.is_error => {
                        ui.colored_label(egui::Color32::from_rgb(220, 80, 80), &status.text);
                    }
                    Some(status) => {
                        ui.label(&status.text);
                    }
                    None => {
                        ui.label("Ready");
                    }
                }
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if self.service_job.is_some() {
                        ui.spinner();
                        ui.label("Working...");
                    } else if self.document.is_none() {
                        ui.label("No file loaded");
                    }
                });
            });
        });

        // Actions panel (right side)
        let panel_action = egui::SidePanel::right("actions")
            .default_width(300.0)
            .show(ctx, |ui| {
                let context = PanelContext {
                    document_loaded: self.document.is_some(),
                    signature_count: self.layout.signature_count(),
                    service_available: self.service_available,
                    busy: self.service_job.is_some(),
                    identity_registered: self.identity_present,
                    identity_email: &self.config.identity_email,
                };
                panel::show(ui, &mut self.panel, &context)
            })
            .inner;
        self.handle_panel_action(panel_action);

        // Handle keyboard events
        if ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
            self.adding_signature = false;
            self.gesture = None;
            self.focused = None;
        }

        // Delete focused signature; skipped while a text field has focus
        if !ctx.wants_keyboard_input() {
            if ctx.input(|i| i.key_pressed(egui::Key::Delete) || i.key_pressed(egui::Key::Backspace))
            {
                if let Some((page_number, sign)) = self.focused.take() {
                    self.layout.remove(page_number, sign);
                    log::info!("Deleted signature {sign} from page {page_number}");
                }
            }
        }

        // Main viewer (center)
        let viewer_action = egui::CentralPanel::default()
            .show(ctx, |ui| {
                if let Some(ref message) = self.loading_message {
                    ui.centered_and_justified(|ui| {
                        ui.vertical_centered(|ui| {
                            ui.add_space(20.0);
                            ui.spinner();
                            ui.add_space(10.0);
                            ui.label(
                                egui::RichText::new(message)
                                    .size(16.0)
                                    .color(egui::Color32::from_gray(200)),
                            );
                        });
                    });
                    ViewerAction::None
                } else {
                    viewer::show(
                        ui,
                        &self.pages,
                        self.dimensions.as_ref(),
                        &self.layout,
                        self.adding_signature,
                        self.focused,
                        self.gesture.as_ref(),
                    )
                }
            })
            .inner;
        self.handle_viewer_action(viewer_action);
    }
}

/// Load an image file and re-encode it as base64 PNG for the appearance
/// payload.
fn load_stamp_image(path: &Path) -> anyhow::Result<String> {
    let image = image::open(path)?;
    let mut encoded = Vec::new();
    image.write_to(
        &mut std::io::Cursor::new(&mut encoded),
        image::ImageFormat::Png,
    )?;
    Ok(B64.encode(encoded))
}

fn is_valid_email(email: &str) -> bool {
    if email.contains(char::is_whitespace) {
        return false;
    }
    let mut parts = email.split('@');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(local), Some(domain), None) => {
            !local.is_empty()
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_validation() {
        assert!(is_valid_email("alice@example.com"));
        assert!(is_valid_email("a.b@mail.example.org"));
        assert!(!is_valid_email("alice"));
        assert!(!is_valid_email("alice@nodomain"));
        assert!(!is_valid_email("alice@.com"));
        assert!(!is_valid_email("a lice@example.com"));
        assert!(!is_valid_email("alice@example.com@twice"));
    }

    #[test]
    fn test_service_op_result_names() {
        assert_eq!(ServiceOp::Sign.result_name(), "signed.pdf");
        assert_eq!(ServiceOp::Encrypt.result_name(), "encrypted.pdf");
        assert_eq!(ServiceOp::Decrypt.result_name(), "decrypted.pdf");
    }
}
