// SPDX-License-Identifier: GPL-3.0-or-later
// src/lib.rs
//
// Crate root: crop engine, document loading and export.

pub mod app;
pub mod config;
pub mod constant;
pub mod domain;
