// SPDX-License-Identifier: GPL-3.0-or-later
// tests/it/main.rs
//
// Single integration test binary.

mod engine_props;
mod export_tests;
mod helpers;
mod loader_tests;
mod tool_flow;
