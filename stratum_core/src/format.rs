// Copyright 2026 the Stratum Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Capability probing and texture format selection.
//!
//! The compositor picks one internal storage format for every backing store
//! it creates. The choice depends on what the driver reports when the
//! function table is first loaded:
//!
//! 1. `GL_EXT_texture_format_BGRA8888` → [`TextureFormat::Bgra8`].
//! 2. `GL_APPLE_texture_format_BGRA8888` on a 3.0+ context →
//!    [`TextureFormat::Bgra8`].
//! 3. Anything else → [`TextureFormat::Rgba8`].
//!
//! BGRA storage matches the native swap-chain layout on most desktop
//! platforms and avoids a swizzle on present. The APPLE variant of the
//! extension only covers texture storage on contexts older than 3.0, hence the
//! version gate.
//!
//! [`select_texture_format`] is a pure function over [`Capabilities`] so it
//! can be exercised without a GPU context.

use alloc::string::String;
use core::fmt;

use hashbrown::HashSet;

/// Extension enabling native BGRA8 texture storage.
pub const EXT_TEXTURE_FORMAT_BGRA8888: &str = "GL_EXT_texture_format_BGRA8888";

/// Apple's BGRA8 texture storage extension. Only usable on 3.0+ contexts.
pub const APPLE_TEXTURE_FORMAT_BGRA8888: &str = "GL_APPLE_texture_format_BGRA8888";

/// Internal storage format of a color texture.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TextureFormat {
    /// 8-bit BGRA (`GL_BGRA8_EXT`).
    Bgra8,
    /// 8-bit RGBA (`GL_RGBA8`).
    Rgba8,
}

impl TextureFormat {
    /// `GL_BGRA8_EXT`.
    pub const GL_BGRA8_EXT: u32 = 0x93A1;
    /// `GL_RGBA8`.
    pub const GL_RGBA8: u32 = 0x8058;

    /// Returns the sized internal format enum for this format.
    #[must_use]
    pub const fn gl_internal_format(self) -> u32 {
        match self {
            Self::Bgra8 => Self::GL_BGRA8_EXT,
            Self::Rgba8 => Self::GL_RGBA8,
        }
    }
}

/// A `major.minor` graphics API version.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct GlVersion {
    /// Major version.
    pub major: u32,
    /// Minor version.
    pub minor: u32,
}

impl GlVersion {
    /// Creates a version from its components.
    #[must_use]
    pub const fn new(major: u32, minor: u32) -> Self {
        Self { major, minor }
    }

    /// Returns `true` if `self` is `other` or newer.
    #[must_use]
    pub const fn is_at_least(self, other: Self) -> bool {
        self.major > other.major || (self.major == other.major && self.minor >= other.minor)
    }
}

impl fmt::Debug for GlVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "GlVersion({}.{})", self.major, self.minor)
    }
}

/// What the active graphics context reports about itself.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Capabilities {
    /// Context API version.
    pub version: GlVersion,
    /// Reported extension names, including the `GL_` prefix.
    pub extensions: HashSet<String>,
}

impl Capabilities {
    /// Creates capabilities from a version and a list of extension names.
    #[must_use]
    pub fn new<I, S>(version: GlVersion, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            version,
            extensions: extensions.into_iter().map(Into::into).collect(),
        }
    }

    /// Returns `true` if the context reports the named extension.
    #[must_use]
    pub fn has_extension(&self, name: &str) -> bool {
        self.extensions.contains(name)
    }
}

/// Picks the internal format for all color textures created on a context
/// with the given capabilities.
#[must_use]
pub fn select_texture_format(caps: &Capabilities) -> TextureFormat {
    if caps.has_extension(EXT_TEXTURE_FORMAT_BGRA8888) {
        TextureFormat::Bgra8
    } else if caps.has_extension(APPLE_TEXTURE_FORMAT_BGRA8888)
        && caps.version.is_at_least(GlVersion::new(3, 0))
    {
        TextureFormat::Bgra8
    } else {
        TextureFormat::Rgba8
    }
}
