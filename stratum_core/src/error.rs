// Copyright 2026 the Stratum Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Recoverable compositor failures.
//!
//! Contract violations (presenting before initialization, presenting an
//! unsupported layer set) are not errors; they panic.

use core::fmt;

/// Errors returned by [`Compositor`](crate::backend::Compositor) operations.
///
/// None of these are retried internally. Retrying (for example, initializing
/// again on the next frame) is up to the caller.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CompositorError {
    /// The engine's graphics context could not be made current.
    ContextNotCurrent,
    /// The function table failed to resolve or did not validate.
    InvalidFunctionTable,
    /// The requested size cannot be expressed in whole GL pixels.
    InvalidSize,
    /// The driver failed to generate a texture or framebuffer name.
    ResourceAllocation,
    /// There is no view to present to.
    NoView,
    /// The view failed to swap buffers.
    SwapFailed,
}

impl fmt::Display for CompositorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ContextNotCurrent => f.write_str("graphics context could not be made current"),
            Self::InvalidFunctionTable => f.write_str("graphics function table is invalid"),
            Self::InvalidSize => f.write_str("size is not representable in pixels"),
            Self::ResourceAllocation => f.write_str("failed to allocate GPU objects"),
            Self::NoView => f.write_str("no view to present to"),
            Self::SwapFailed => f.write_str("buffer swap failed"),
        }
    }
}

impl core::error::Error for CompositorError {}
