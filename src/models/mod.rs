// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Data model for documents, signature placements, and appearance options.

pub mod appearance;
pub mod document;
pub mod signature;
