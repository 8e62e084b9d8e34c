// Copyright 2026 the Stratum Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Test doubles: a recording function table and a scripted engine.

use std::collections::HashSet;

use stratum_core::backend::{Engine, GlContext, View};
use stratum_core::format::Capabilities;
use stratum_core::store::{FramebufferId, PixelSize, TextureId};

use crate::table::{BlitRect, FunctionTable, TableLoader};

/// One recorded GL call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum GlCall {
    GenTexture(TextureId),
    GenFramebuffer(FramebufferId),
    DeleteTexture(TextureId),
    DeleteFramebuffer(FramebufferId),
    BindTexture(u32, TextureId),
    BindFramebuffer(u32, FramebufferId),
    TexParameter(u32, u32, i32),
    TexImage2d {
        internal_format: u32,
        size: PixelSize,
        format: u32,
        ty: u32,
    },
    FramebufferTexture2d {
        attachment: u32,
        texture: TextureId,
    },
    Blit {
        src: BlitRect,
        dst: BlitRect,
        mask: u32,
        filter: u32,
    },
}

/// Recording [`FunctionTable`].
///
/// Names are handed out from one counter so textures and framebuffers never
/// share a name. Deleting a name that is not live panics, which catches
/// double frees and use-after-collect in tests.
#[derive(Debug)]
pub(crate) struct FakeGl {
    pub(crate) valid: bool,
    pub(crate) caps: Capabilities,
    pub(crate) fail_gen_texture: bool,
    pub(crate) fail_gen_framebuffer: bool,
    pub(crate) calls: Vec<GlCall>,
    pub(crate) live_textures: HashSet<TextureId>,
    pub(crate) live_framebuffers: HashSet<FramebufferId>,
    next_name: u32,
}

impl FakeGl {
    pub(crate) fn new(caps: Capabilities) -> Self {
        Self {
            valid: true,
            caps,
            fail_gen_texture: false,
            fail_gen_framebuffer: false,
            calls: Vec::new(),
            live_textures: HashSet::new(),
            live_framebuffers: HashSet::new(),
            next_name: 1,
        }
    }

    fn next(&mut self) -> u32 {
        let name = self.next_name;
        self.next_name += 1;
        name
    }

    pub(crate) fn blits(&self) -> Vec<GlCall> {
        self.calls
            .iter()
            .copied()
            .filter(|call| matches!(call, GlCall::Blit { .. }))
            .collect()
    }
}

impl FunctionTable for FakeGl {
    fn is_valid(&self) -> bool {
        self.valid
    }

    fn capabilities(&self) -> Capabilities {
        self.caps.clone()
    }

    fn gen_texture(&mut self) -> Option<TextureId> {
        if self.fail_gen_texture {
            return None;
        }
        let texture = TextureId(self.next());
        self.live_textures.insert(texture);
        self.calls.push(GlCall::GenTexture(texture));
        Some(texture)
    }

    fn gen_framebuffer(&mut self) -> Option<FramebufferId> {
        if self.fail_gen_framebuffer {
            return None;
        }
        let framebuffer = FramebufferId(self.next());
        self.live_framebuffers.insert(framebuffer);
        self.calls.push(GlCall::GenFramebuffer(framebuffer));
        Some(framebuffer)
    }

    fn delete_texture(&mut self, texture: TextureId) {
        assert!(
            self.live_textures.remove(&texture),
            "deleted texture {texture:?} that is not live"
        );
        self.calls.push(GlCall::DeleteTexture(texture));
    }

    fn delete_framebuffer(&mut self, framebuffer: FramebufferId) {
        assert!(
            self.live_framebuffers.remove(&framebuffer),
            "deleted framebuffer {framebuffer:?} that is not live"
        );
        self.calls.push(GlCall::DeleteFramebuffer(framebuffer));
    }

    fn bind_texture(&mut self, target: u32, texture: TextureId) {
        self.calls.push(GlCall::BindTexture(target, texture));
    }

    fn bind_framebuffer(&mut self, target: u32, framebuffer: FramebufferId) {
        self.calls.push(GlCall::BindFramebuffer(target, framebuffer));
    }

    fn tex_parameter_i32(&mut self, target: u32, parameter: u32, value: i32) {
        self.calls.push(GlCall::TexParameter(target, parameter, value));
    }

    fn tex_image_2d(
        &mut self,
        _target: u32,
        internal_format: u32,
        size: PixelSize,
        format: u32,
        ty: u32,
    ) {
        self.calls.push(GlCall::TexImage2d {
            internal_format,
            size,
            format,
            ty,
        });
    }

    fn framebuffer_texture_2d(
        &mut self,
        _target: u32,
        attachment: u32,
        _texture_target: u32,
        texture: TextureId,
    ) {
        self.calls
            .push(GlCall::FramebufferTexture2d { attachment, texture });
    }

    fn blit_framebuffer(&mut self, src: BlitRect, dst: BlitRect, mask: u32, filter: u32) {
        self.calls.push(GlCall::Blit {
            src,
            dst,
            mask,
            filter,
        });
    }
}

/// Loader producing [`FakeGl`] tables configured up front.
#[derive(Debug)]
pub(crate) struct FakeLoader {
    pub(crate) caps: Capabilities,
    pub(crate) valid: bool,
    pub(crate) fail_gen_texture: bool,
    pub(crate) fail_gen_framebuffer: bool,
    pub(crate) loads: usize,
}

impl FakeLoader {
    pub(crate) fn new(caps: Capabilities) -> Self {
        Self {
            caps,
            valid: true,
            fail_gen_texture: false,
            fail_gen_framebuffer: false,
            loads: 0,
        }
    }
}

impl TableLoader for FakeLoader {
    type Table = FakeGl;

    fn load(&mut self) -> FakeGl {
        self.loads += 1;
        let mut gl = FakeGl::new(self.caps.clone());
        gl.valid = self.valid;
        gl.fail_gen_texture = self.fail_gen_texture;
        gl.fail_gen_framebuffer = self.fail_gen_framebuffer;
        gl
    }
}

#[derive(Debug)]
pub(crate) struct FakeContext {
    pub(crate) succeed: bool,
    pub(crate) attempts: usize,
}

impl GlContext for FakeContext {
    fn make_current(&mut self) -> bool {
        self.attempts += 1;
        self.succeed
    }
}

/// View that records requested framebuffer sizes.
#[derive(Debug)]
pub(crate) struct FakeView {
    pub(crate) framebuffer: FramebufferId,
    pub(crate) requested: Vec<(u32, u32)>,
    pub(crate) swap_succeeds: bool,
    pub(crate) swaps: usize,
}

impl View for FakeView {
    fn framebuffer_id(&mut self, width: u32, height: u32) -> FramebufferId {
        self.requested.push((width, height));
        self.framebuffer
    }

    fn swap_buffers(&mut self) -> bool {
        self.swaps += 1;
        self.swap_succeeds
    }
}

#[derive(Debug)]
pub(crate) struct FakeEngine {
    pub(crate) context: FakeContext,
    pub(crate) view: Option<FakeView>,
}

impl FakeEngine {
    /// An engine with a working context and a view whose framebuffer is
    /// `view_framebuffer`.
    pub(crate) fn new(view_framebuffer: FramebufferId) -> Self {
        Self {
            context: FakeContext {
                succeed: true,
                attempts: 0,
            },
            view: Some(FakeView {
                framebuffer: view_framebuffer,
                requested: Vec::new(),
                swap_succeeds: true,
                swaps: 0,
            }),
        }
    }
}

impl Engine for FakeEngine {
    type Context = FakeContext;
    type View = FakeView;

    fn context(&mut self) -> &mut FakeContext {
        &mut self.context
    }

    fn view(&mut self) -> Option<&mut FakeView> {
        self.view.as_mut()
    }
}
