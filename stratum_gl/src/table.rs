// Copyright 2026 the Stratum Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The function-table seam between the compositor and the GL driver.
//!
//! The compositor never calls GL directly. It loads a [`FunctionTable`] once,
//! through a [`TableLoader`], after the engine's context is current, and
//! issues every GPU call through it. [`GlowLoader`](crate::GlowLoader)
//! resolves a real table from a [`ProcResolver`]; tests substitute a
//! recording fake.
//!
//! Method signatures mirror the GL entry points they wrap, with object names
//! carried as [`FramebufferId`] / [`TextureId`] and enums as raw `u32`
//! values.

use core::ffi::{CStr, c_void};

use stratum_core::format::Capabilities;
use stratum_core::store::{FramebufferId, PixelSize, TextureId};

/// Entry points the compositor needs. A table missing any of them is invalid.
pub const REQUIRED_PROCS: &[&CStr] = &[
    c"glGetString",
    c"glGetIntegerv",
    c"glGenTextures",
    c"glDeleteTextures",
    c"glBindTexture",
    c"glTexParameteri",
    c"glTexImage2D",
    c"glGenFramebuffers",
    c"glDeleteFramebuffers",
    c"glBindFramebuffer",
    c"glFramebufferTexture2D",
    c"glBlitFramebuffer",
];

/// Resolves GL entry points by name.
///
/// Implemented for any `FnMut(&CStr) -> *const c_void`, so platform loaders
/// such as `eglGetProcAddress` wrappers can be passed as closures.
pub trait ProcResolver {
    /// Returns the address of `name`, or null if it is unavailable.
    fn resolve(&mut self, name: &CStr) -> *const c_void;
}

impl<F> ProcResolver for F
where
    F: FnMut(&CStr) -> *const c_void,
{
    fn resolve(&mut self, name: &CStr) -> *const c_void {
        self(name)
    }
}

/// A rectangle in framebuffer pixels, as `(x0, y0)`–`(x1, y1)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub struct BlitRect {
    /// Left edge.
    pub x0: i32,
    /// Bottom edge.
    pub y0: i32,
    /// Right edge (exclusive).
    pub x1: i32,
    /// Top edge (exclusive).
    pub y1: i32,
}

impl BlitRect {
    /// The rectangle `(0, 0)`–`(width, height)`.
    #[must_use]
    pub fn from_size(size: PixelSize) -> Self {
        Self {
            x0: 0,
            y0: 0,
            x1: size.gl_width(),
            y1: size.gl_height(),
        }
    }
}

/// Resolved GL entry points.
pub trait FunctionTable {
    /// Returns `true` if every required entry point resolved and the context
    /// answered the version query.
    fn is_valid(&self) -> bool;

    /// Version and extensions reported by the context.
    fn capabilities(&self) -> Capabilities;

    /// `glGenTextures` for a single name. `None` if the driver refused.
    fn gen_texture(&mut self) -> Option<TextureId>;

    /// `glGenFramebuffers` for a single name. `None` if the driver refused.
    fn gen_framebuffer(&mut self) -> Option<FramebufferId>;

    /// `glDeleteTextures` for a single name.
    fn delete_texture(&mut self, texture: TextureId);

    /// `glDeleteFramebuffers` for a single name.
    fn delete_framebuffer(&mut self, framebuffer: FramebufferId);

    /// `glBindTexture`. [`TextureId::NONE`] unbinds.
    fn bind_texture(&mut self, target: u32, texture: TextureId);

    /// `glBindFramebuffer`. [`FramebufferId::DEFAULT`] unbinds.
    fn bind_framebuffer(&mut self, target: u32, framebuffer: FramebufferId);

    /// `glTexParameteri`.
    fn tex_parameter_i32(&mut self, target: u32, parameter: u32, value: i32);

    /// `glTexImage2D` at level 0 with no initial data.
    fn tex_image_2d(
        &mut self,
        target: u32,
        internal_format: u32,
        size: PixelSize,
        format: u32,
        ty: u32,
    );

    /// `glFramebufferTexture2D` at level 0.
    fn framebuffer_texture_2d(
        &mut self,
        target: u32,
        attachment: u32,
        texture_target: u32,
        texture: TextureId,
    );

    /// `glBlitFramebuffer` from the bound read framebuffer to the bound draw
    /// framebuffer.
    fn blit_framebuffer(&mut self, src: BlitRect, dst: BlitRect, mask: u32, filter: u32);
}

/// Builds a [`FunctionTable`] once the context is current.
pub trait TableLoader {
    /// The table this loader produces.
    type Table: FunctionTable;

    /// Resolves a new table. The result may be invalid; callers check
    /// [`FunctionTable::is_valid`] before use.
    fn load(&mut self) -> Self::Table;
}
