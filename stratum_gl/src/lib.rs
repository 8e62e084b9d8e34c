// Copyright 2026 the Stratum Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! OpenGL / GLES backend for stratum.
//!
//! This crate provides a [`Compositor`] for engines that render through GL:
//!
//! - [`GlCompositor`]: lazy initialization, framebuffer backing stores, and
//!   blit-and-swap presentation of a single layer
//! - [`FunctionTable`] / [`TableLoader`]: the seam every GPU call goes through
//! - [`GlowLoader`] / [`GlowTable`]: a table resolved into a [`glow::Context`]
//!   from a platform [`ProcResolver`] (e.g. `eglGetProcAddress`)
//!
//! The embedder implements [`Engine`](stratum_core::backend::Engine) to give
//! the compositor its context and view.
//!
//! # Crate features
//!
//! - `trace` (disabled by default): Enables trace event dispatch to the
//!   compositor's [`TraceSink`](stratum_core::trace::TraceSink).

mod compositor;
mod glow_table;
mod table;

#[cfg(test)]
mod testing;

pub use compositor::GlCompositor;
pub use glow_table::{GlowLoader, GlowTable};
pub use stratum_core::backend::Compositor;
pub use table::{BlitRect, FunctionTable, ProcResolver, REQUIRED_PROCS, TableLoader};
