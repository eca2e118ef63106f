//! Broadcast renderer for WebSocket clients.

use tokio::sync::broadcast;

use crate::render::{GridFrame, GridRenderer, RenderFrame, SequenceFrame, SortRenderer};
use crate::theme::Theme;

/// Frames buffered per subscriber before slow clients start lagging.
pub const FRAME_CHANNEL_CAPACITY: usize = 256;

/// Publishes every rendered frame to a broadcast channel.
///
/// Frames rendered while nobody is subscribed are dropped.
#[derive(Debug, Clone)]
pub struct FrameSink {
    tx: broadcast::Sender<RenderFrame>,
}

impl FrameSink {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(FRAME_CHANNEL_CAPACITY);
        Self { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<RenderFrame> {
        self.tx.subscribe()
    }

    fn publish(&self, frame: RenderFrame) {
        // Err only means there are no subscribers right now.
        let _ = self.tx.send(frame);
    }
}

impl Default for FrameSink {
    fn default() -> Self {
        Self::new()
    }
}

impl SortRenderer for FrameSink {
    fn render_sequence(&mut self, frame: &SequenceFrame<'_>, theme: Theme) {
        self.publish(RenderFrame::from_sequence(frame, theme));
    }
}

impl GridRenderer for FrameSink {
    fn render_grid(&mut self, frame: &GridFrame<'_>, theme: Theme) {
        self.publish(RenderFrame::from_grid(frame, theme));
    }
}
