// Copyright 2026 the Stratum Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Chrome Trace Event Format exporter.
//!
//! [`ChromeTraceSink`] buffers compositor events as they arrive, stamping each
//! with the time elapsed since the sink was created, and
//! [`write_to`](ChromeTraceSink::write_to) writes them as
//! [Chrome Trace Event Format][format] JSON.
//!
//! Each present becomes a duration slice (`B` on [`PresentEvent`], `E` on the
//! matching [`PresentResultEvent`]). Everything else is an instant event.
//!
//! [format]: https://docs.google.com/document/d/1CvAClvFfyA5R-PhYUmn5OOQtYMH4h6I0nSsKchNAySU

use std::io::{self, Write};
use std::time::Instant;

use serde_json::{Value, json};

use stratum_core::trace::{
    BackingStoreEvent, InitializeEvent, PresentEvent, PresentResultEvent, TraceSink,
};

/// Collects events for export as Chrome Trace Event Format JSON.
///
/// The output is a complete JSON array of trace event objects, suitable for
/// loading into `chrome://tracing` or [Perfetto](https://ui.perfetto.dev/).
#[derive(Debug)]
pub struct ChromeTraceSink {
    origin: Instant,
    events: Vec<Value>,
    open_present: Option<u64>,
}

impl Default for ChromeTraceSink {
    fn default() -> Self {
        Self::new()
    }
}

impl ChromeTraceSink {
    /// Creates an empty sink. Timestamps are relative to this call.
    #[must_use]
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
            events: Vec::new(),
            open_present: None,
        }
    }

    /// Trace events recorded so far.
    #[must_use]
    pub fn events(&self) -> &[Value] {
        &self.events
    }

    /// Writes the recorded events as a pretty-printed JSON array.
    ///
    /// # Errors
    ///
    /// Returns any error from `writer` or from serialization.
    pub fn write_to(&self, writer: &mut dyn Write) -> io::Result<()> {
        serde_json::to_writer_pretty(writer, &self.events)?;
        Ok(())
    }

    fn now_us(&self) -> f64 {
        self.origin.elapsed().as_secs_f64() * 1_000_000.0
    }

    fn instant(&mut self, name: &str, cat: &str, args: Value) {
        let ts = self.now_us();
        self.events.push(json!({
            "ph": "i",
            "name": name,
            "cat": cat,
            "ts": ts,
            "pid": 0,
            "tid": 0,
            "s": "t",
            "args": args,
        }));
    }
}

impl TraceSink for ChromeTraceSink {
    fn on_initialize(&mut self, e: &InitializeEvent) {
        self.instant(
            "Initialize",
            "Lifecycle",
            json!({
                "outcome": format!("{:?}", e.outcome),
                "format": e.format.map(|f| format!("{f:?}")),
            }),
        );
    }

    fn on_backing_store_created(&mut self, e: &BackingStoreEvent) {
        self.instant(
            "CreateBackingStore",
            "BackingStore",
            json!({
                "framebuffer": e.framebuffer.0,
                "texture": e.texture.0,
                "width": e.size.width(),
                "height": e.size.height(),
                "format": format!("{:?}", e.format),
            }),
        );
    }

    fn on_backing_store_collected(&mut self, e: &BackingStoreEvent) {
        self.instant(
            "CollectBackingStore",
            "BackingStore",
            json!({
                "framebuffer": e.framebuffer.0,
                "texture": e.texture.0,
            }),
        );
    }

    fn on_present(&mut self, e: &PresentEvent) {
        let ts = self.now_us();
        self.events.push(json!({
            "ph": "B",
            "name": "Present",
            "cat": "Frame",
            "ts": ts,
            "pid": 0,
            "tid": 0,
            "args": {
                "frame_index": e.frame_index,
                "source": e.source.0,
                "destination": e.destination.0,
                "width": e.size.width(),
                "height": e.size.height(),
            }
        }));
        self.open_present = Some(e.frame_index);
    }

    fn on_present_result(&mut self, e: &PresentResultEvent) {
        let ts = self.now_us();
        let outcome = format!("{:?}", e.outcome);
        if self.open_present.take() == Some(e.frame_index) {
            self.events.push(json!({
                "ph": "E",
                "name": "Present",
                "cat": "Frame",
                "ts": ts,
                "pid": 0,
                "tid": 0,
                "args": {
                    "frame_index": e.frame_index,
                    "outcome": outcome,
                }
            }));
        } else {
            // Failed before reaching the GPU; there is no slice to close.
            self.instant(
                "PresentFailed",
                "Frame",
                json!({
                    "frame_index": e.frame_index,
                    "outcome": outcome,
                }),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stratum_core::format::TextureFormat;
    use stratum_core::store::{FramebufferId, PixelSize, TextureId};
    use stratum_core::trace::{InitOutcome, PresentOutcome};

    fn export(sink: &ChromeTraceSink) -> Vec<Value> {
        let mut out = Vec::new();
        sink.write_to(&mut out).unwrap();
        let json_str = String::from_utf8(out).unwrap();
        serde_json::from_str(&json_str).unwrap()
    }

    #[test]
    fn export_produces_valid_json() {
        let mut sink = ChromeTraceSink::new();
        sink.on_initialize(&InitializeEvent {
            outcome: InitOutcome::Initialized,
            format: Some(TextureFormat::Rgba8),
        });
        sink.on_backing_store_created(&BackingStoreEvent {
            framebuffer: FramebufferId(2),
            texture: TextureId(1),
            size: PixelSize::new(800, 600).unwrap(),
            format: TextureFormat::Rgba8,
        });
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

        let parsed = export(&sink);
        assert_eq!(parsed.len(), 4);

        assert_eq!(parsed[0]["ph"], "i");
        assert_eq!(parsed[0]["name"], "Initialize");
        assert_eq!(parsed[0]["args"]["format"], "Rgba8");

        assert_eq!(parsed[1]["name"], "CreateBackingStore");
        assert_eq!(parsed[1]["args"]["width"], 800);

        assert_eq!(parsed[2]["ph"], "B");
        assert_eq!(parsed[3]["ph"], "E");
        assert_eq!(parsed[3]["args"]["outcome"], "Presented");
        assert!(parsed[2]["ts"].as_f64().unwrap() <= parsed[3]["ts"].as_f64().unwrap());
    }

    #[test]
    fn context_failure_is_an_instant() {
        let mut sink = ChromeTraceSink::new();
        sink.on_present_result(&PresentResultEvent {
            frame_index: 5,
            outcome: PresentOutcome::ContextNotCurrent,
        });

        let parsed = export(&sink);
        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed[0]["ph"], "i");
        assert_eq!(parsed[0]["name"], "PresentFailed");
        assert_eq!(parsed[0]["args"]["frame_index"], 5);
    }

    #[test]
    fn export_empty_recording() {
        let parsed = export(&ChromeTraceSink::default());
        assert!(parsed.is_empty());
    }
}
