// Copyright 2026 the Stratum Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tracing and diagnostics for compositor operations.
//!
//! This module provides a [`TraceSink`] trait with per-event methods that a
//! compositor calls as it initializes, allocates, collects and presents. All
//! method bodies default to no-ops, so implementing only the events you care
//! about is fine.
//!
//! [`Tracer`] wraps an optional `&mut dyn TraceSink`. When the `trace` feature
//! is **off**, every `Tracer` method compiles to nothing (zero overhead). When
//! **on**, each method performs a single `Option` branch before dispatching.
//!
//! # Crate features
//!
//! - `trace` — enables the `Tracer` method bodies (one branch per call).

use crate::format::TextureFormat;
use crate::store::{BackingStore, FramebufferId, PixelSize, TextureId};

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// How an initialization attempt ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum InitOutcome {
    /// The function table loaded and a texture format was selected.
    Initialized,
    /// The context could not be made current.
    ContextNotCurrent,
    /// The function table failed validation and was discarded.
    InvalidFunctionTable,
}

/// How a present call ended once it reached the GPU.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PresentOutcome {
    /// The blit was issued and the view swapped.
    Presented,
    /// The context could not be made current; nothing was drawn.
    ContextNotCurrent,
    /// The blit was issued but the swap failed.
    SwapFailed,
}

// ---------------------------------------------------------------------------
// Event structs
// ---------------------------------------------------------------------------

/// Emitted after every initialization attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InitializeEvent {
    /// Result of the attempt.
    pub outcome: InitOutcome,
    /// Selected format, when initialization succeeded.
    pub format: Option<TextureFormat>,
}

/// Emitted when a backing store is created or collected.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BackingStoreEvent {
    /// Framebuffer name.
    pub framebuffer: FramebufferId,
    /// Attached texture name.
    pub texture: TextureId,
    /// Store dimensions.
    pub size: PixelSize,
    /// Advertised target format.
    pub format: TextureFormat,
}

impl From<&BackingStore> for BackingStoreEvent {
    fn from(store: &BackingStore) -> Self {
        Self {
            framebuffer: store.framebuffer(),
            texture: store.texture(),
            size: store.size(),
            format: store.format(),
        }
    }
}

/// Emitted right before the blit of a present call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PresentEvent {
    /// Zero-based index of the frame being presented.
    pub frame_index: u64,
    /// Framebuffer read from.
    pub source: FramebufferId,
    /// View framebuffer drawn to.
    pub destination: FramebufferId,
    /// Blit extent, identical on both sides.
    pub size: PixelSize,
}

/// Emitted when a present call that reached the GPU finishes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PresentResultEvent {
    /// Index of the frame, matching the preceding [`PresentEvent`] if any.
    pub frame_index: u64,
    /// Result of the present.
    pub outcome: PresentOutcome,
}

// ---------------------------------------------------------------------------
// TraceSink trait
// ---------------------------------------------------------------------------

/// Receives trace events from a compositor.
///
/// All methods have default no-op implementations, so you only need to
/// override the events you care about.
pub trait TraceSink {
    /// Called after each initialization attempt.
    fn on_initialize(&mut self, e: &InitializeEvent) {
        _ = e;
    }

    /// Called after a backing store is fully constructed.
    fn on_backing_store_created(&mut self, e: &BackingStoreEvent) {
        _ = e;
    }

    /// Called after a backing store's GPU objects are deleted.
    fn on_backing_store_collected(&mut self, e: &BackingStoreEvent) {
        _ = e;
    }

    /// Called before the blit of a present call.
    fn on_present(&mut self, e: &PresentEvent) {
        _ = e;
    }

    /// Called when a present call that reached the GPU finishes.
    fn on_present_result(&mut self, e: &PresentResultEvent) {
        _ = e;
    }
}

impl<T: TraceSink + ?Sized> TraceSink for &mut T {
    fn on_initialize(&mut self, e: &InitializeEvent) {
        (**self).on_initialize(e);
    }

    fn on_backing_store_created(&mut self, e: &BackingStoreEvent) {
        (**self).on_backing_store_created(e);
    }

    fn on_backing_store_collected(&mut self, e: &BackingStoreEvent) {
        (**self).on_backing_store_collected(e);
    }

    fn on_present(&mut self, e: &PresentEvent) {
        (**self).on_present(e);
    }

    fn on_present_result(&mut self, e: &PresentResultEvent) {
        (**self).on_present_result(e);
    }
}

// ---------------------------------------------------------------------------
// NoopSink
// ---------------------------------------------------------------------------

/// A [`TraceSink`] that discards all events.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopSink;

impl TraceSink for NoopSink {}

// ---------------------------------------------------------------------------
// Tracer wrapper
// ---------------------------------------------------------------------------

/// Thin wrapper around an optional [`TraceSink`].
///
/// When the `trace` feature is **off**, every method compiles to nothing. When
/// **on**, each method checks the inner `Option` (one branch) before
/// dispatching to the sink.
pub struct Tracer<'a> {
    #[cfg(feature = "trace")]
    sink: Option<&'a mut dyn TraceSink>,
    #[cfg(not(feature = "trace"))]
    _marker: core::marker::PhantomData<&'a mut dyn TraceSink>,
}

impl core::fmt::Debug for Tracer<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Tracer").finish_non_exhaustive()
    }
}

impl<'a> Tracer<'a> {
    /// Creates a tracer that dispatches to the given sink.
    #[inline]
    #[must_use]
    pub fn new(sink: &'a mut dyn TraceSink) -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: Some(sink) }
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = sink;
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Creates a tracer that discards all events.
    #[inline]
    #[must_use]
    pub fn none() -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: None }
        }
        #[cfg(not(feature = "trace"))]
        {
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Emits an [`InitializeEvent`].
    #[inline]
    pub fn initialize(&mut self, e: &InitializeEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_initialize(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a creation [`BackingStoreEvent`].
    #[inline]
    pub fn backing_store_created(&mut self, e: &BackingStoreEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_backing_store_created(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a collection [`BackingStoreEvent`].
    #[inline]
    pub fn backing_store_collected(&mut self, e: &BackingStoreEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_backing_store_collected(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`PresentEvent`].
    #[inline]
    pub fn present(&mut self, e: &PresentEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_present(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`PresentResultEvent`].
    #[inline]
    pub fn present_result(&mut self, e: &PresentResultEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_present_result(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_store() -> BackingStore {
        BackingStore::new(
            FramebufferId(1),
            TextureId(2),
            PixelSize::new(800, 600).unwrap(),
            TextureFormat::Rgba8,
        )
    }

    #[test]
    fn backing_store_event_from_store() {
        let store = sample_store();
        let evt = BackingStoreEvent::from(&store);
        assert_eq!(evt.framebuffer, FramebufferId(1));
        assert_eq!(evt.texture, TextureId(2));
        assert_eq!(evt.size, PixelSize::new(800, 600).unwrap());
        assert_eq!(evt.format, TextureFormat::Rgba8);
    }

    #[test]
    fn noop_sink_compiles() {
        let mut sink = NoopSink;
        sink.on_initialize(&InitializeEvent {
            outcome: InitOutcome::Initialized,
            format: Some(TextureFormat::Bgra8),
        });
        sink.on_backing_store_created(&BackingStoreEvent::from(&sample_store()));
        sink.on_present_result(&PresentResultEvent {
            frame_index: 0,
            outcome: PresentOutcome::Presented,
        });
    }

    #[test]
    fn tracer_none_does_nothing() {
        let mut tracer = Tracer::none();
        tracer.initialize(&InitializeEvent {
            outcome: InitOutcome::ContextNotCurrent,
            format: None,
        });
        tracer.backing_store_collected(&BackingStoreEvent::from(&sample_store()));
    }

    #[cfg(feature = "trace")]
    #[test]
    fn tracer_dispatches_to_sink() {
        use alloc::vec::Vec;

        struct RecordingSink {
            frames: Vec<u64>,
        }
        impl TraceSink for RecordingSink {
            fn on_present(&mut self, e: &PresentEvent) {
                self.frames.push(e.frame_index);
            }
        }

        let mut sink = RecordingSink { frames: Vec::new() };
        let mut tracer = Tracer::new(&mut sink);
        tracer.present(&PresentEvent {
            frame_index: 42,
            source: FramebufferId(1),
            destination: FramebufferId::DEFAULT,
            size: PixelSize::new(1, 1).unwrap(),
        });
        // Access sink after tracer is dropped.
        drop(tracer);
        assert_eq!(sink.frames, &[42]);
    }
}
