// Copyright 2026 the Stratum Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Framebuffer-backed GL compositor.
//!
//! [`GlCompositor`] implements [`Compositor`] with one texture + framebuffer
//! pair per backing store and presents by blitting the single layer's
//! framebuffer into the view's framebuffer, then swapping.
//!
//! # Lifecycle
//!
//! ```text
//!   Uninitialized ──(make_current ► load table ► probe format)──► Initialized
//!        ▲                          │
//!        └──── failure: table dropped, retry on next request
//! ```
//!
//! Initialization happens on the first [`create_backing_store`] call or on an
//! explicit [`initialize`](GlCompositor::initialize). Once initialized the
//! function table and texture format never change. Collecting or presenting
//! before that point is a contract violation and panics.
//!
//! [`create_backing_store`]: Compositor::create_backing_store

use core::fmt;

use stratum_core::backend::{Compositor, Engine, GlContext as _, View as _};
use stratum_core::error::CompositorError;
use stratum_core::format::{TextureFormat, select_texture_format};
use stratum_core::layer::Layer;
use stratum_core::store::{
    BackingStore, BackingStoreConfig, FramebufferId, PixelSize, TextureId,
};
use stratum_core::trace::{
    BackingStoreEvent, InitOutcome, InitializeEvent, NoopSink, PresentEvent, PresentOutcome,
    PresentResultEvent, TraceSink, Tracer,
};

use crate::table::{BlitRect, FunctionTable, TableLoader};

const NEAREST: i32 = glow::NEAREST as i32;
const CLAMP_TO_EDGE: i32 = glow::CLAMP_TO_EDGE as i32;

enum State<T> {
    Uninitialized,
    Initialized { gl: T, format: TextureFormat },
}

impl<T> State<T> {
    #[track_caller]
    fn expect_initialized(&mut self, op: &str) -> (&mut T, TextureFormat) {
        match self {
            Self::Initialized { gl, format } => (gl, *format),
            Self::Uninitialized => panic!("{op} called before the compositor was initialized"),
        }
    }
}

/// GL compositor for a single full-surface layer per frame.
///
/// Owns the engine handle `E`, the [`TableLoader`] used once at
/// initialization, and a [`TraceSink`] `S` for instrumentation. Every method
/// takes `&mut self`; callers serialize all use on the rendering thread.
///
/// # Example
///
/// ```ignore
/// let loader = GlowLoader::new(|name: &CStr| egl.get_proc_address(name));
/// let mut compositor = GlCompositor::new(engine, loader);
///
/// let store = compositor.create_backing_store(&BackingStoreConfig::new(size))?;
/// // ... renderer draws into store.framebuffer() ...
/// compositor.present(&[Layer::backing_store(&store, size)])?;
/// compositor.collect_backing_store(store);
/// ```
pub struct GlCompositor<E, L: TableLoader, S = NoopSink> {
    engine: E,
    loader: L,
    state: State<L::Table>,
    sink: S,
    presented_frames: u64,
}

impl<E, L: TableLoader, S> fmt::Debug for GlCompositor<E, L, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GlCompositor")
            .field("initialized", &self.is_initialized())
            .field("format", &self.texture_format())
            .field("presented_frames", &self.presented_frames)
            .finish_non_exhaustive()
    }
}

impl<E, L: TableLoader, S> GlCompositor<E, L, S> {
    /// Returns `true` once initialization has succeeded.
    #[must_use]
    pub fn is_initialized(&self) -> bool {
        matches!(self.state, State::Initialized { .. })
    }

    /// The format advertised for every backing store, once initialized.
    #[must_use]
    pub fn texture_format(&self) -> Option<TextureFormat> {
        match &self.state {
            State::Initialized { format, .. } => Some(*format),
            State::Uninitialized => None,
        }
    }

    /// The loaded function table, once initialized.
    #[must_use]
    pub fn function_table(&self) -> Option<&L::Table> {
        match &self.state {
            State::Initialized { gl, .. } => Some(gl),
            State::Uninitialized => None,
        }
    }

    /// Number of frames presented and swapped successfully.
    #[must_use]
    pub fn presented_frames(&self) -> u64 {
        self.presented_frames
    }

    /// The engine this compositor belongs to.
    #[must_use]
    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// Mutable access to the engine.
    pub fn engine_mut(&mut self) -> &mut E {
        &mut self.engine
    }

    /// The table loader.
    #[must_use]
    pub fn loader(&self) -> &L {
        &self.loader
    }

    /// The trace sink.
    #[must_use]
    pub fn sink(&self) -> &S {
        &self.sink
    }
}

impl<E: Engine, L: TableLoader> GlCompositor<E, L, NoopSink> {
    /// Creates an uninitialized compositor with tracing disabled.
    #[must_use]
    pub fn new(engine: E, loader: L) -> Self {
        Self::with_sink(engine, loader, NoopSink)
    }
}

impl<E: Engine, L: TableLoader, S: TraceSink> GlCompositor<E, L, S> {
    /// Creates an uninitialized compositor reporting to `sink`.
    #[must_use]
    pub fn with_sink(engine: E, loader: L, sink: S) -> Self {
        Self {
            engine,
            loader,
            state: State::Uninitialized,
            sink,
            presented_frames: 0,
        }
    }

    /// Makes the context current, loads the function table and selects the
    /// texture format.
    ///
    /// On failure the compositor stays uninitialized and a later call (or the
    /// next [`create_backing_store`](Compositor::create_backing_store)) tries
    /// again.
    ///
    /// # Errors
    ///
    /// - [`CompositorError::ContextNotCurrent`] if the context could not be
    ///   made current. The loader is not consulted.
    /// - [`CompositorError::InvalidFunctionTable`] if the loaded table does
    ///   not validate. The table is dropped.
    ///
    /// # Panics
    ///
    /// Panics if the compositor is already initialized.
    pub fn initialize(&mut self) -> Result<(), CompositorError> {
        assert!(
            !self.is_initialized(),
            "compositor is already initialized"
        );

        if !self.engine.context().make_current() {
            self.tracer().initialize(&InitializeEvent {
                outcome: InitOutcome::ContextNotCurrent,
                format: None,
            });
            return Err(CompositorError::ContextNotCurrent);
        }

        let gl = self.loader.load();
        if !gl.is_valid() {
            drop(gl);
            self.tracer().initialize(&InitializeEvent {
                outcome: InitOutcome::InvalidFunctionTable,
                format: None,
            });
            return Err(CompositorError::InvalidFunctionTable);
        }

        let format = select_texture_format(&gl.capabilities());
        self.state = State::Initialized { gl, format };
        self.tracer().initialize(&InitializeEvent {
            outcome: InitOutcome::Initialized,
            format: Some(format),
        });
        Ok(())
    }

    fn tracer(&mut self) -> Tracer<'_> {
        Tracer::new(&mut self.sink)
    }
}

/// Generates and configures a texture + framebuffer pair.
///
/// Leaves texture and framebuffer bindings at 0. If either name cannot be
/// generated, the other is deleted before returning.
fn allocate<T: FunctionTable>(
    gl: &mut T,
    size: PixelSize,
    format: TextureFormat,
) -> Result<BackingStore, CompositorError> {
    let texture = gl
        .gen_texture()
        .ok_or(CompositorError::ResourceAllocation)?;
    let Some(framebuffer) = gl.gen_framebuffer() else {
        gl.delete_texture(texture);
        return Err(CompositorError::ResourceAllocation);
    };

    gl.bind_framebuffer(glow::FRAMEBUFFER, framebuffer);

    gl.bind_texture(glow::TEXTURE_2D, texture);
    gl.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_MIN_FILTER, NEAREST);
    gl.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_MAG_FILTER, NEAREST);
    gl.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_WRAP_S, CLAMP_TO_EDGE);
    gl.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_WRAP_T, CLAMP_TO_EDGE);
    // Texel storage is always RGBA8; `format` is what the renderer is told.
    gl.tex_image_2d(
        glow::TEXTURE_2D,
        TextureFormat::GL_RGBA8,
        size,
        glow::RGBA,
        glow::UNSIGNED_BYTE,
    );
    gl.bind_texture(glow::TEXTURE_2D, TextureId::NONE);

    gl.framebuffer_texture_2d(
        glow::FRAMEBUFFER,
        glow::COLOR_ATTACHMENT0,
        glow::TEXTURE_2D,
        texture,
    );
    gl.bind_framebuffer(glow::FRAMEBUFFER, FramebufferId::DEFAULT);

    Ok(BackingStore::new(framebuffer, texture, size, format))
}

impl<E: Engine, L: TableLoader, S: TraceSink> Compositor for GlCompositor<E, L, S> {
    /// Initializes on first use, then allocates a texture + framebuffer pair.
    ///
    /// # Errors
    ///
    /// Returns the initialization error if the compositor could not be
    /// initialized, [`CompositorError::InvalidSize`] if `config.size` is not
    /// representable in pixels, or [`CompositorError::ResourceAllocation`] if
    /// the driver refused to generate names.
    fn create_backing_store(
        &mut self,
        config: &BackingStoreConfig,
    ) -> Result<BackingStore, CompositorError> {
        if !self.is_initialized() {
            self.initialize()?;
        }
        let size = PixelSize::from_logical(config.size).ok_or(CompositorError::InvalidSize)?;

        let (gl, format) = self.state.expect_initialized("create_backing_store");
        let store = allocate(gl, size, format)?;

        self.tracer()
            .backing_store_created(&BackingStoreEvent::from(&store));
        Ok(store)
    }

    /// Deletes the store's framebuffer and texture.
    ///
    /// # Panics
    ///
    /// Panics if the compositor is not initialized.
    fn collect_backing_store(&mut self, store: BackingStore) {
        let event = BackingStoreEvent::from(&store);
        let (gl, _) = self.state.expect_initialized("collect_backing_store");

        let token = store.into_token();
        gl.delete_framebuffer(token.framebuffer());
        gl.delete_texture(token.texture());

        self.tracer().backing_store_collected(&event);
    }

    /// Blits the single layer's backing store into the view and swaps.
    ///
    /// # Errors
    ///
    /// - [`CompositorError::NoView`] if the engine has no view. No GPU call is
    ///   issued.
    /// - [`CompositorError::InvalidSize`] if the layer size is not
    ///   representable in pixels. No GPU call is issued.
    /// - [`CompositorError::ContextNotCurrent`] if the context could not be
    ///   made current.
    /// - [`CompositorError::SwapFailed`] if the view failed to swap.
    ///
    /// # Panics
    ///
    /// Panics if the compositor is not initialized, or unless `layers` holds
    /// exactly one backing-store layer.
    fn present(&mut self, layers: &[Layer<'_>]) -> Result<(), CompositorError> {
        // TODO: composite multiple layers and platform views once their
        // blending semantics are defined.
        assert!(
            self.is_initialized(),
            "present called before the compositor was initialized"
        );
        assert_eq!(
            layers.len(),
            1,
            "GL compositor presents exactly one layer per frame"
        );
        let layer = &layers[0];
        let Some(store) = layer.as_backing_store() else {
            panic!("GL compositor can only present backing-store layers");
        };

        let Some(view) = self.engine.view() else {
            return Err(CompositorError::NoView);
        };
        let size = PixelSize::from_logical(layer.size).ok_or(CompositorError::InvalidSize)?;

        // Asking for the framebuffer resizes the view's surface if needed.
        let destination = view.framebuffer_id(size.width(), size.height());
        let source = store.framebuffer();
        let frame_index = self.presented_frames;

        if !self.engine.context().make_current() {
            self.tracer().present_result(&PresentResultEvent {
                frame_index,
                outcome: PresentOutcome::ContextNotCurrent,
            });
            return Err(CompositorError::ContextNotCurrent);
        }

        self.tracer().present(&PresentEvent {
            frame_index,
            source,
            destination,
            size,
        });

        let (gl, _) = self.state.expect_initialized("present");
        gl.bind_framebuffer(glow::READ_FRAMEBUFFER, source);
        gl.bind_framebuffer(glow::DRAW_FRAMEBUFFER, destination);
        let rect = BlitRect::from_size(size);
        gl.blit_framebuffer(rect, rect, glow::COLOR_BUFFER_BIT, glow::NEAREST);

        let swapped = self.engine.view().is_some_and(|view| view.swap_buffers());
        let outcome = if swapped {
            self.presented_frames += 1;
            PresentOutcome::Presented
        } else {
            PresentOutcome::SwapFailed
        };
        self.tracer().present_result(&PresentResultEvent {
            frame_index,
            outcome,
        });

        if swapped {
            Ok(())
        } else {
            Err(CompositorError::SwapFailed)
        }
    }
}
