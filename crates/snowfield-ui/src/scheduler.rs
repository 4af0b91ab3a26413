use snowfield_platform::{FrameHandle, FrameScheduler};
use tracing::debug;

/// Frame callbacks backed by egui repaints: every request asks the context for
/// one more repaint, and the app fires the overlay's pending handle from
/// `update`.
pub struct EguiFrameScheduler {
    context: egui::Context,
    next: u64,
    cancelled: u64,
}

impl EguiFrameScheduler {
    pub fn new(context: egui::Context) -> Self {
        Self {
            context,
            next: 0,
            cancelled: 0,
        }
    }

    pub fn cancelled(&self) -> u64 {
        self.cancelled
    }
}

impl FrameScheduler for EguiFrameScheduler {
    fn request_frame(&mut self) -> FrameHandle {
        self.next += 1;
        self.context.request_repaint();
        FrameHandle(self.next)
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        // A repaint already requested is harmless; the overlay drops the handle.
        debug!("frame {:?} cancelled", handle);
        self.cancelled += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn handles_are_unique_and_cancels_counted() {
        let mut scheduler = EguiFrameScheduler::new(egui::Context::default());
        let a = scheduler.request_frame();
        let b = scheduler.request_frame();
        assert_ne!(a, b);
        scheduler.cancel_frame(b);
        assert_eq!(scheduler.cancelled(), 1);
    }
}
