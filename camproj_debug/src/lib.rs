// Copyright 2026 the Camproj Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pretty-printing, recording, and JSON export for camproj diagnostics.
//!
//! This crate provides [`TraceSink`](camproj_core::trace::TraceSink)
//! implementations for development and post-mortem analysis:
//!
//! - [`pretty::PrettyPrintSink`] — human-readable one-line-per-event output.
//! - [`recorder::RecorderSink`] — in-memory event log.
//! - [`json::export`] — writes recorded events as a JSON array.

pub mod json;
pub mod pretty;
pub mod recorder;
