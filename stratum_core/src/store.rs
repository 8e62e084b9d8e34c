// Copyright 2026 the Stratum Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Backing-store descriptors and GPU object handles.
//!
//! A backing store is a texture attached as the sole color attachment of a
//! framebuffer. The compositor creates one per renderer request and hands it
//! out as a [`BackingStore`]: an owned descriptor the renderer draws into and
//! later returns for collection.
//!
//! [`BackingStore`] is not `Clone`. The descriptor owns both GPU objects and
//! collecting it consumes it, so a store is destroyed at most once and never
//! used afterwards.

use core::fmt;

use kurbo::Size;

use crate::format::TextureFormat;

/// A GL framebuffer object name.
///
/// `FramebufferId(0)` is the default framebuffer; binding it unbinds any
/// framebuffer object.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct FramebufferId(pub u32);

impl FramebufferId {
    /// The default framebuffer (name `0`).
    pub const DEFAULT: Self = Self(0);
}

impl fmt::Debug for FramebufferId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FramebufferId({})", self.0)
    }
}

/// A GL texture object name. `TextureId(0)` means "no texture".
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct TextureId(pub u32);

impl TextureId {
    /// No texture (name `0`).
    pub const NONE: Self = Self(0);
}

impl fmt::Debug for TextureId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TextureId({})", self.0)
    }
}

/// Integer pixel dimensions of a render target.
///
/// Both dimensions fit in a GL `int`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct PixelSize {
    width: u32,
    height: u32,
}

impl PixelSize {
    /// Largest accepted dimension (`i32::MAX`).
    pub const MAX_DIMENSION: u32 = 0x7FFF_FFFF;

    /// Creates a pixel size, or `None` if either dimension exceeds
    /// [`MAX_DIMENSION`](Self::MAX_DIMENSION).
    #[must_use]
    pub const fn new(width: u32, height: u32) -> Option<Self> {
        if width > Self::MAX_DIMENSION || height > Self::MAX_DIMENSION {
            return None;
        }
        Some(Self { width, height })
    }

    /// Converts a logical size to whole pixels, truncating toward zero.
    ///
    /// Returns `None` for non-finite or negative dimensions and for
    /// dimensions that do not fit in a GL `int`.
    #[must_use]
    pub fn from_logical(size: Size) -> Option<Self> {
        Self::new(dimension(size.width)?, dimension(size.height)?)
    }

    /// Width in pixels.
    #[must_use]
    pub const fn width(self) -> u32 {
        self.width
    }

    /// Height in pixels.
    #[must_use]
    pub const fn height(self) -> u32 {
        self.height
    }

    /// Width as a GL `int`.
    #[must_use]
    pub fn gl_width(self) -> i32 {
        i32::try_from(self.width).unwrap_or(i32::MAX)
    }

    /// Height as a GL `int`.
    #[must_use]
    pub fn gl_height(self) -> i32 {
        i32::try_from(self.height).unwrap_or(i32::MAX)
    }
}

impl fmt::Debug for PixelSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PixelSize({}x{})", self.width, self.height)
    }
}

#[expect(
    clippy::cast_possible_truncation,
    reason = "range checked first; the cast truncates toward zero"
)]
fn dimension(value: f64) -> Option<u32> {
    // Anything below 2^31 truncates to at most `MAX_DIMENSION`.
    if !value.is_finite() || value < 0.0 || value >= f64::from(PixelSize::MAX_DIMENSION) + 1.0 {
        return None;
    }
    Some(value as u32)
}

/// A renderer's request for a new backing store.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BackingStoreConfig {
    /// Requested size in logical units; truncated to whole pixels.
    pub size: Size,
}

impl BackingStoreConfig {
    /// Creates a request for a store of the given size.
    #[must_use]
    pub const fn new(size: Size) -> Self {
        Self { size }
    }
}

/// The GPU object pair owned by a [`BackingStore`].
///
/// Returned from [`BackingStore::into_token`] when the store is collected;
/// whoever holds the token is responsible for deleting both objects.
#[derive(Debug, PartialEq, Eq, Hash)]
pub struct DestructionToken {
    framebuffer: FramebufferId,
    texture: TextureId,
}

impl DestructionToken {
    /// The framebuffer to delete.
    #[must_use]
    pub const fn framebuffer(&self) -> FramebufferId {
        self.framebuffer
    }

    /// The texture to delete.
    #[must_use]
    pub const fn texture(&self) -> TextureId {
        self.texture
    }
}

/// A fully constructed render target handed to the renderer.
///
/// Carries the framebuffer the renderer draws into and the texture format
/// advertised downstream, plus the [`DestructionToken`] for the pair.
#[derive(Debug, PartialEq, Eq, Hash)]
pub struct BackingStore {
    format: TextureFormat,
    size: PixelSize,
    token: DestructionToken,
}

impl BackingStore {
    /// Wraps a framebuffer with `texture` attached as its color attachment.
    ///
    /// Backends call this only once both objects exist and the attachment is
    /// in place.
    #[must_use]
    pub const fn new(
        framebuffer: FramebufferId,
        texture: TextureId,
        size: PixelSize,
        format: TextureFormat,
    ) -> Self {
        Self {
            format,
            size,
            token: DestructionToken {
                framebuffer,
                texture,
            },
        }
    }

    /// The framebuffer the renderer draws into.
    #[must_use]
    pub const fn framebuffer(&self) -> FramebufferId {
        self.token.framebuffer
    }

    /// The color texture attached to [`framebuffer`](Self::framebuffer).
    #[must_use]
    pub const fn texture(&self) -> TextureId {
        self.token.texture
    }

    /// The target format advertised to the renderer.
    #[must_use]
    pub const fn format(&self) -> TextureFormat {
        self.format
    }

    /// Pixel dimensions, fixed at creation.
    #[must_use]
    pub const fn size(&self) -> PixelSize {
        self.size
    }

    /// Consumes the descriptor, yielding the objects to delete.
    #[must_use]
    pub fn into_token(self) -> DestructionToken {
        self.token
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_logical_truncates() {
        let px = PixelSize::from_logical(Size::new(800.9, 600.2)).unwrap();
        assert_eq!(px.width(), 800);
        assert_eq!(px.height(), 600);
    }

    #[test]
    fn from_logical_rejects_unrepresentable() {
        assert!(PixelSize::from_logical(Size::new(-1.0, 10.0)).is_none());
        assert!(PixelSize::from_logical(Size::new(f64::NAN, 10.0)).is_none());
        assert!(PixelSize::from_logical(Size::new(10.0, f64::INFINITY)).is_none());
        assert!(PixelSize::from_logical(Size::new(3.0e9, 10.0)).is_none());
    }

    #[test]
    fn zero_size_is_allowed() {
        let px = PixelSize::from_logical(Size::ZERO).unwrap();
        assert_eq!(px, PixelSize::new(0, 0).unwrap());
    }

    #[test]
    fn new_bounds_dimensions() {
        assert!(PixelSize::new(PixelSize::MAX_DIMENSION, 1).is_some());
        assert!(PixelSize::new(PixelSize::MAX_DIMENSION + 1, 1).is_none());
        let px = PixelSize::new(PixelSize::MAX_DIMENSION, 7).unwrap();
        assert_eq!(px.gl_width(), i32::MAX);
        assert_eq!(px.gl_height(), 7);
    }

    #[test]
    fn backing_store_exposes_pair_through_token() {
        let size = PixelSize::new(64, 32).unwrap();
        let store = BackingStore::new(FramebufferId(3), TextureId(4), size, TextureFormat::Bgra8);
        assert_eq!(store.framebuffer(), FramebufferId(3));
        assert_eq!(store.texture(), TextureId(4));
        assert_eq!(store.format(), TextureFormat::Bgra8);
        assert_eq!(store.size(), size);

        let token = store.into_token();
        assert_eq!(token.framebuffer(), FramebufferId(3));
        assert_eq!(token.texture(), TextureId(4));
    }
}
