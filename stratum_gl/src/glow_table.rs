// Copyright 2026 the Stratum Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! [`FunctionTable`] backed by [`glow`].

#![expect(unsafe_code, reason = "glow entry points are raw GL FFI")]

use core::ffi::CStr;
use core::fmt;
use core::num::NonZeroU32;

use glow::HasContext as _;
use stratum_core::format::{Capabilities, GlVersion};
use stratum_core::store::{FramebufferId, PixelSize, TextureId};

use crate::table::{BlitRect, FunctionTable, ProcResolver, REQUIRED_PROCS, TableLoader};

/// Loads a [`GlowTable`] through a platform [`ProcResolver`].
///
/// # Example
///
/// ```ignore
/// let loader = GlowLoader::new(|name: &CStr| egl.get_proc_address(name));
/// let compositor = GlCompositor::new(engine, loader);
/// ```
pub struct GlowLoader<R> {
    resolver: R,
}

impl<R> fmt::Debug for GlowLoader<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GlowLoader").finish_non_exhaustive()
    }
}

impl<R: ProcResolver> GlowLoader<R> {
    /// Creates a loader that resolves entry points with `resolver`.
    #[must_use]
    pub fn new(resolver: R) -> Self {
        Self { resolver }
    }
}

impl<R: ProcResolver> TableLoader for GlowLoader<R> {
    type Table = GlowTable;

    fn load(&mut self) -> GlowTable {
        let resolver = &mut self.resolver;
        let missing: Vec<&'static CStr> = REQUIRED_PROCS
            .iter()
            .copied()
            .filter(|name| resolver.resolve(name).is_null())
            .collect();
        if !missing.is_empty() {
            // Building a glow context would call the missing entry points.
            return GlowTable { gl: None, missing };
        }

        // SAFETY: the caller made the context current before loading, and
        // every entry point glow queries during construction resolved above.
        let gl = unsafe { glow::Context::from_loader_function_cstr(|name| resolver.resolve(name)) };
        GlowTable {
            gl: Some(gl),
            missing,
        }
    }
}

/// GL entry points resolved into a [`glow::Context`].
///
/// An invalid table (see [`missing_procs`](Self::missing_procs)) holds no
/// context; its GPU methods do nothing.
pub struct GlowTable {
    gl: Option<glow::Context>,
    missing: Vec<&'static CStr>,
}

impl fmt::Debug for GlowTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GlowTable")
            .field("loaded", &self.gl.is_some())
            .field("missing", &self.missing)
            .finish()
    }
}

impl GlowTable {
    /// Required entry points the resolver returned null for.
    #[must_use]
    pub fn missing_procs(&self) -> &[&'static CStr] {
        &self.missing
    }

    /// The underlying glow context, if the table is loaded.
    #[must_use]
    pub fn context(&self) -> Option<&glow::Context> {
        self.gl.as_ref()
    }
}

fn native_texture(texture: TextureId) -> Option<glow::NativeTexture> {
    NonZeroU32::new(texture.0).map(glow::NativeTexture)
}

fn native_framebuffer(framebuffer: FramebufferId) -> Option<glow::NativeFramebuffer> {
    NonZeroU32::new(framebuffer.0).map(glow::NativeFramebuffer)
}

impl FunctionTable for GlowTable {
    fn is_valid(&self) -> bool {
        self.gl.as_ref().is_some_and(|gl| gl.version().major > 0)
    }

    fn capabilities(&self) -> Capabilities {
        let Some(gl) = &self.gl else {
            return Capabilities::default();
        };
        let version = gl.version();
        Capabilities::new(
            GlVersion::new(version.major, version.minor),
            gl.supported_extensions().iter().cloned(),
        )
    }

    fn gen_texture(&mut self) -> Option<TextureId> {
        let gl = self.gl.as_ref()?;
        // SAFETY: the context is current on this thread.
        let texture = unsafe { gl.create_texture() }.ok()?;
        Some(TextureId(texture.0.get()))
    }

    fn gen_framebuffer(&mut self) -> Option<FramebufferId> {
        let gl = self.gl.as_ref()?;
        // SAFETY: the context is current on this thread.
        let framebuffer = unsafe { gl.create_framebuffer() }.ok()?;
        Some(FramebufferId(framebuffer.0.get()))
    }

    fn delete_texture(&mut self, texture: TextureId) {
        if let (Some(gl), Some(texture)) = (&self.gl, native_texture(texture)) {
            // SAFETY: the name was generated on this context.
            unsafe { gl.delete_texture(texture) };
        }
    }

    fn delete_framebuffer(&mut self, framebuffer: FramebufferId) {
        if let (Some(gl), Some(framebuffer)) = (&self.gl, native_framebuffer(framebuffer)) {
            // SAFETY: the name was generated on this context.
            unsafe { gl.delete_framebuffer(framebuffer) };
        }
    }

    fn bind_texture(&mut self, target: u32, texture: TextureId) {
        if let Some(gl) = &self.gl {
            // SAFETY: `None` unbinds; any other name came from this context.
            unsafe { gl.bind_texture(target, native_texture(texture)) };
        }
    }

    fn bind_framebuffer(&mut self, target: u32, framebuffer: FramebufferId) {
        if let Some(gl) = &self.gl {
            // SAFETY: `None` binds the default framebuffer; view framebuffers
            // are owned by the same share group.
            unsafe { gl.bind_framebuffer(target, native_framebuffer(framebuffer)) };
        }
    }

    fn tex_parameter_i32(&mut self, target: u32, parameter: u32, value: i32) {
        if let Some(gl) = &self.gl {
            // SAFETY: plain state call on the current context.
            unsafe { gl.tex_parameter_i32(target, parameter, value) };
        }
    }

    fn tex_image_2d(
        &mut self,
        target: u32,
        internal_format: u32,
        size: PixelSize,
        format: u32,
        ty: u32,
    ) {
        let Some(gl) = &self.gl else {
            return;
        };
        let Ok(internal_format) = i32::try_from(internal_format) else {
            return;
        };
        // SAFETY: no pixel data is read; storage is allocated uninitialized.
        unsafe {
            gl.tex_image_2d(
                target,
                0,
                internal_format,
                size.gl_width(),
                size.gl_height(),
                0,
                format,
                ty,
                glow::PixelUnpackData::Slice(None),
            );
        }
    }

    fn framebuffer_texture_2d(
        &mut self,
        target: u32,
        attachment: u32,
        texture_target: u32,
        texture: TextureId,
    ) {
        if let Some(gl) = &self.gl {
            // SAFETY: the texture name came from this context.
            unsafe {
                gl.framebuffer_texture_2d(
                    target,
                    attachment,
                    texture_target,
                    native_texture(texture),
                    0,
                );
            }
        }
    }

    fn blit_framebuffer(&mut self, src: BlitRect, dst: BlitRect, mask: u32, filter: u32) {
        if let Some(gl) = &self.gl {
            // SAFETY: read and draw framebuffers are bound by the caller.
            unsafe {
                gl.blit_framebuffer(
                    src.x0, src.y0, src.x1, src.y1, dst.x0, dst.y0, dst.x1, dst.y1, mask, filter,
                );
            }
        }
    }
}
