// SPDX-License-Identifier: GPL-3.0-or-later
// src/domain/mod.rs
//
// Pure domain logic: no file IO, no async.

pub mod crop;
pub mod error;

pub use error::{CropError, CropResult};
