// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! UI components for the SignDesk application.

pub mod panel;
pub mod toolbar;
pub mod viewer;
