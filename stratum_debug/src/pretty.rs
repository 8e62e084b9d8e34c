// Copyright 2026 the Stratum Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Human-readable trace output.
//!
//! [`PrettyPrintSink`] implements [`TraceSink`] and writes one line per event
//! to a [`Write`](std::io::Write) destination (default: stderr).

use std::io::Write;

use stratum_core::format::TextureFormat;
use stratum_core::trace::{
    BackingStoreEvent, InitOutcome, InitializeEvent, PresentEvent, PresentOutcome,
    PresentResultEvent, TraceSink,
};

/// Writes human-readable trace lines to a [`Write`](std::io::Write) destination.
pub struct PrettyPrintSink<W: Write = Box<dyn Write>> {
    writer: W,
}

impl<W: Write> std::fmt::Debug for PrettyPrintSink<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrettyPrintSink").finish_non_exhaustive()
    }
}

impl PrettyPrintSink {
    /// Creates a sink that writes to stderr.
    #[must_use]
    pub fn stderr() -> Self {
        Self {
            writer: Box::new(std::io::stderr()),
        }
    }

    /// Creates a sink that writes to a boxed writer.
    #[must_use]
    pub fn new(writer: Box<dyn Write>) -> Self {
        Self { writer }
    }
}

impl<W: Write> PrettyPrintSink<W> {
    /// Creates a sink that writes to the given destination.
    #[must_use]
    pub fn with_writer(writer: W) -> Self {
        Self { writer }
    }

    /// Consumes the sink and returns its writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

fn format_name(format: TextureFormat) -> &'static str {
    match format {
        TextureFormat::Bgra8 => "bgra8",
        TextureFormat::Rgba8 => "rgba8",
    }
}

impl<W: Write> TraceSink for PrettyPrintSink<W> {
    fn on_initialize(&mut self, e: &InitializeEvent) {
        let _ = match (e.outcome, e.format) {
            (InitOutcome::Initialized, Some(format)) => writeln!(
                self.writer,
                "[init] ok format={}",
                format_name(format)
            ),
            (outcome, _) => writeln!(self.writer, "[init] FAILED {outcome:?}"),
        };
    }

    fn on_backing_store_created(&mut self, e: &BackingStoreEvent) {
        let _ = writeln!(
            self.writer,
            "[store:create] fb={} tex={} {}x{} {}",
            e.framebuffer.0,
            e.texture.0,
            e.size.width(),
            e.size.height(),
            format_name(e.format),
        );
    }

    fn on_backing_store_collected(&mut self, e: &BackingStoreEvent) {
        let _ = writeln!(
            self.writer,
            "[store:collect] fb={} tex={}",
            e.framebuffer.0, e.texture.0,
        );
    }

    fn on_present(&mut self, e: &PresentEvent) {
        let _ = writeln!(
            self.writer,
            "[present] frame={} fb={} -> fb={} {}x{}",
            e.frame_index,
            e.source.0,
            e.destination.0,
            e.size.width(),
            e.size.height(),
        );
    }

    fn on_present_result(&mut self, e: &PresentResultEvent) {
        let status = match e.outcome {
            PresentOutcome::Presented => "ok",
            PresentOutcome::ContextNotCurrent => "NO CONTEXT",
            PresentOutcome::SwapFailed => "SWAP FAILED",
        };
        let _ = writeln!(self.writer, "[present:end] frame={} {status}", e.frame_index);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stratum_core::store::{FramebufferId, PixelSize, TextureId};

    fn store_event() -> BackingStoreEvent {
        BackingStoreEvent {
            framebuffer: FramebufferId(2),
            texture: TextureId(1),
            size: PixelSize::new(800, 600).unwrap(),
            format: TextureFormat::Bgra8,
        }
    }

    fn output(sink: PrettyPrintSink<Vec<u8>>) -> String {
        String::from_utf8(sink.into_inner()).unwrap()
    }

    #[test]
    fn lifecycle_lines() {
        let mut sink = PrettyPrintSink::with_writer(Vec::new());
        sink.on_initialize(&InitializeEvent {
            outcome: InitOutcome::Initialized,
            format: Some(TextureFormat::Bgra8),
        });
        sink.on_backing_store_created(&store_event());
        sink.on_present(&PresentEvent {
            frame_index: 0,
            source: FramebufferId(2),
            destination: FramebufferId::DEFAULT,
            size: PixelSize::new(800, 600).unwrap(),
        });
        sink.on_present_result(&PresentResultEvent {
            frame_index: 0,
            outcome: PresentOutcome::Presented,
        });
        sink.on_backing_store_collected(&store_event());

        let out = output(sink);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(
            lines,
            [
                "[init] ok format=bgra8",
                "[store:create] fb=2 tex=1 800x600 bgra8",
                "[present] frame=0 fb=2 -> fb=0 800x600",
                "[present:end] frame=0 ok",
                "[store:collect] fb=2 tex=1",
            ]
        );
    }

    #[test]
    fn failures_are_flagged() {
        let mut sink = PrettyPrintSink::with_writer(Vec::new());
        sink.on_initialize(&InitializeEvent {
            outcome: InitOutcome::ContextNotCurrent,
            format: None,
        });
        sink.on_present_result(&PresentResultEvent {
            frame_index: 3,
            outcome: PresentOutcome::SwapFailed,
        });

        let out = output(sink);
        assert!(out.contains("[init] FAILED ContextNotCurrent"));
        assert!(out.contains("[present:end] frame=3 SWAP FAILED"));
    }
}
