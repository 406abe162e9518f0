// SPDX-License-Identifier: GPL-3.0-or-later
// src/app/mod.rs
//
// Crop tool host: document loading, message handling, export.

pub mod document;
pub mod export;
pub mod gesture;
pub mod loader;
pub mod message;
pub mod model;
pub mod update;

pub use message::AppMessage;
pub use model::AppModel;
pub use update::{UpdateResult, update};
