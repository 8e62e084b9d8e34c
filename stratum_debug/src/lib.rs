// Copyright 2026 the Stratum Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pretty-printing and Chrome trace export for stratum compositor events.
//!
//! This crate provides [`TraceSink`](stratum_core::trace::TraceSink)
//! implementations for development and post-mortem analysis:
//!
//! - [`pretty::PrettyPrintSink`]: one human-readable line per event.
//! - [`chrome::ChromeTraceSink`]: buffers events and writes Chrome Trace
//!   Event Format JSON.
//!
//! Both only receive events when the compositor crate is built with its
//! `trace` feature.

pub mod chrome;
pub mod pretty;
