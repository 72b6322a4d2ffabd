// Copyright 2026 Connections Archive Contributors
// SPDX-License-Identifier: MIT

//! Connections archive runtime — render the answer archive in headless
//! Chromium and flatten it into a CSV dataset.
//!
//! This library crate exposes the pipeline stages for the binary and for
//! integration testing.

pub mod config;
pub mod fetch;
pub mod logging;
pub mod pipeline;
pub mod renderer;
