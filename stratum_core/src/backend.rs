// Copyright 2026 the Stratum Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Backend contract for compositor implementations.
//!
//! A compositor sits between two external collaborators:
//!
//! - **Renderer** — asks for backing stores, draws into them, and hands
//!   finished frames back for presentation. It drives the compositor through
//!   the [`Compositor`] trait.
//!
//! - **Engine** — owns the graphics context and the on-screen view. The
//!   compositor reaches it through the [`Engine`] trait, which exposes a
//!   [`GlContext`] that can be made current on the calling thread and an
//!   optional [`View`] that owns the swap chain.
//!
//! # Crate boundaries
//!
//! `stratum_core` owns the data model and these contracts. Backend crates
//! (e.g. `stratum_gl`) implement [`Compositor`] on top of a concrete graphics
//! API. Embedders implement [`Engine`], [`View`] and [`GlContext`] for their
//! windowing layer.
//!
//! All calls are expected on a single rendering thread. Nothing here is
//! asynchronous and nothing is retried.

use crate::error::CompositorError;
use crate::layer::Layer;
use crate::store::{BackingStore, BackingStoreConfig, FramebufferId};

/// Creates, collects and presents backing stores on behalf of a renderer.
///
/// # Frame pseudocode
///
/// ```rust,ignore
/// let store = compositor.create_backing_store(&BackingStoreConfig::new(size))?;
/// renderer.draw_into(store.framebuffer());
/// compositor.present(&[Layer::backing_store(&store, size)])?;
/// compositor.collect_backing_store(store);
/// ```
pub trait Compositor {
    /// Allocates a new render target sized for `config`.
    ///
    /// # Errors
    ///
    /// Fails if the compositor cannot be initialized or the GPU objects cannot
    /// be created. No partially constructed store is ever returned.
    fn create_backing_store(
        &mut self,
        config: &BackingStoreConfig,
    ) -> Result<BackingStore, CompositorError>;

    /// Releases both GPU objects of `store`.
    fn collect_backing_store(&mut self, store: BackingStore);

    /// Composites `layers` onto the view and swaps.
    ///
    /// # Errors
    ///
    /// Fails if there is no view, the context cannot be made current, or the
    /// swap fails.
    fn present(&mut self, layers: &[Layer<'_>]) -> Result<(), CompositorError>;
}

/// Makes a graphics context current on the calling thread.
pub trait GlContext {
    /// Returns `false` if the context could not be made current.
    fn make_current(&mut self) -> bool;
}

/// The on-screen destination owning the swap chain.
pub trait View {
    /// Returns the framebuffer to draw the next frame into.
    ///
    /// The view may resize its surface to `width`×`height` before answering.
    fn framebuffer_id(&mut self, width: u32, height: u32) -> FramebufferId;

    /// Presents the drawn frame. Returns `false` on failure.
    fn swap_buffers(&mut self) -> bool;
}

/// The embedding engine the compositor belongs to.
pub trait Engine {
    /// Context manager type.
    type Context: GlContext;
    /// View type.
    type View: View;

    /// The graphics context shared by the engine and the compositor.
    fn context(&mut self) -> &mut Self::Context;

    /// The current view, or `None` if it has not been created yet or has been
    /// torn down.
    fn view(&mut self) -> Option<&mut Self::View>;
}
