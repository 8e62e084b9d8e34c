// Copyright 2026 the Stratum Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Layers submitted for presentation.
//!
//! A presented frame is a slice of [`Layer`]s in back-to-front order. Each
//! layer borrows the content it shows for the duration of the present call.
//! The GL compositor supports exactly one backing-store layer per frame.

use core::fmt;

use kurbo::{Point, Size};

use crate::store::BackingStore;

/// Identifies an embedder-owned platform view.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PlatformViewId(pub u64);

impl fmt::Debug for PlatformViewId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PlatformViewId({})", self.0)
    }
}

/// What a layer shows.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LayerContent<'a> {
    /// Renderer output drawn into a backing store.
    BackingStore(&'a BackingStore),
    /// A native view composited by the embedder.
    PlatformView(PlatformViewId),
}

/// One entry of a presented frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Layer<'a> {
    /// Layer content.
    pub content: LayerContent<'a>,
    /// Top-left corner in logical units.
    pub offset: Point,
    /// Extent in logical units.
    pub size: Size,
}

impl<'a> Layer<'a> {
    /// Creates a layer showing `store` at the origin with the given size.
    #[must_use]
    pub const fn backing_store(store: &'a BackingStore, size: Size) -> Self {
        Self {
            content: LayerContent::BackingStore(store),
            offset: Point::ORIGIN,
            size,
        }
    }

    /// Returns the backing store shown by this layer, if any.
    #[must_use]
    pub const fn as_backing_store(&self) -> Option<&'a BackingStore> {
        match self.content {
            LayerContent::BackingStore(store) => Some(store),
            LayerContent::PlatformView(_) => None,
        }
    }
}
