// Copyright 2026 the Stratum Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core types and backend contract for GPU frame compositing.
//!
//! `stratum_core` describes a compositor that allocates per-frame render
//! targets for an upstream renderer and presents the finished frame onto a
//! platform-owned view. It is `no_std` compatible (with `alloc`) and has no
//! dependency on any graphics API; backend crates supply the GPU work.
//!
//! # Architecture
//!
//! ```text
//!   Renderer
//!       │ create_backing_store()
//!       ▼
//!   Compositor ──► (lazy init: make_current ► load table ► probe) ──► BackingStore
//!       │                                                                 │
//!       │                              renderer draws into framebuffer ◄──┘
//!       │ present(&[Layer])
//!       ▼
//!   View::framebuffer_id() ──► blit ──► View::swap_buffers()
//!       │
//!       ▼ collect_backing_store()
//!   GPU objects deleted
//! ```
//!
//! **[`backend`]** — The [`Compositor`](backend::Compositor) trait renderers
//! drive, and the [`Engine`](backend::Engine), [`View`](backend::View) and
//! [`GlContext`](backend::GlContext) traits embedders implement.
//!
//! **[`store`]** — Backing-store descriptors, destruction tokens, object
//! handles and pixel sizes.
//!
//! **[`layer`]** — Layers submitted for presentation.
//!
//! **[`format`]** — Capability probing: picks BGRA8 or RGBA8 storage from
//! reported extensions and API version.
//!
//! **[`error`]** — [`CompositorError`](error::CompositorError), the
//! recoverable failures of compositor operations.
//!
//! **[`trace`]** — [`TraceSink`](trace::TraceSink) trait and event types for
//! compositor instrumentation, with zero-overhead [`Tracer`](trace::Tracer)
//! wrapper.
//!
//! # Crate features
//!
//! - `std` (disabled by default): Enables `std` support in dependencies.
//! - `trace` (disabled by default): Enables `Tracer` method bodies (one branch
//!   per call site).

#![no_std]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

extern crate alloc;

pub mod backend;
pub mod error;
pub mod format;
pub mod layer;
pub mod store;
pub mod trace;
