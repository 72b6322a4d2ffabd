// Copyright 2026 Connections Archive Contributors
// SPDX-License-Identifier: MIT

//! Core library for the Connections answer archive.
//!
//! Turns the rendered archive page into [`AnswerRecord`]s and persists them
//! as a chronologically ordered, densely indexed CSV table. No browser and no
//! async runtime are involved here; see the `connections-archive` crate for
//! page rendering.

pub mod csv;
pub mod dataset;
pub mod extract;
pub mod parser;
pub mod types;

pub use dataset::Dataset;
pub use extract::{extract_category, extract_date, extract_words};
pub use parser::extract_answers;
pub use types::*;
