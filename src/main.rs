// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! SignDesk - PDF signing workbench
//!
//! A cross-platform desktop application for placing signature boxes on PDF
//! documents and signing, encrypting, or decrypting them through the native
//! signing service.

mod app;
mod config;
mod io;
mod models;
mod native;
mod ui;
mod util;

use anyhow::Result;
use app::SignDeskApp;
use config::Config;

fn main() -> Result<()> {
    // Initialize logging
    env_logger::init();

    let config = Config::from_env();
    log::info!("Using signing service at {}", config.service_url);

    // Configure egui options
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 800.0])
            .with_min_inner_size([900.0, 600.0])
            .with_title("SignDesk - PDF Signing Workbench")
            .with_drag_and_drop(true),
        ..Default::default()
    };

    // Run the application
    eframe::run_native(
        "SignDesk",
        options,
        Box::new(move |_cc| Ok(Box::new(SignDeskApp::new(config)))),
    )
    .map_err(|e| anyhow::anyhow!("Application error: {}", e))?;

    Ok(())
}
