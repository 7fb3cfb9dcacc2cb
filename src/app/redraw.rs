use eframe::egui::Context;

/// Asks the host for one more frame tick.
pub(in crate::app) trait FrameRequester {
    fn request_frame(&self);
}

impl FrameRequester for Context {
    fn request_frame(&self) {
        self.request_repaint();
    }
}

/// Coalesces redraw requests: at most one frame is pending at a time.
#[derive(Debug)]
pub(in crate::app) struct RedrawScheduler {
    pending: bool,
    frames_drawn: u64,
}

impl RedrawScheduler {
    /// Starts armed so the first tick after load builds the scene.
    pub(in crate::app) fn armed() -> Self {
        Self {
            pending: true,
            frames_drawn: 0,
        }
    }

    #[cfg(test)]
    pub(in crate::app) fn is_pending(&self) -> bool {
        self.pending
    }

    pub(in crate::app) fn frames_drawn(&self) -> u64 {
        self.frames_drawn
    }

    /// Returns `true` when this call armed a new frame.
    pub(in crate::app) fn request_redraw(&mut self, requester: &impl FrameRequester) -> bool {
        if self.pending {
            return false;
        }
        self.pending = true;
        requester.request_frame();
        true
    }

    /// Runs `frame` if a redraw is pending, then disarms.
    pub(in crate::app) fn fire(&mut self, frame: impl FnOnce()) -> bool {
        if !self.pending {
            return false;
        }
        frame();
        self.pending = false;
        self.frames_drawn += 1;
        true
    }
}

#[cfg(test)]
pub(in crate::app) mod testing {
    use std::cell::Cell;

    use super::FrameRequester;

    #[derive(Default)]
    pub(in crate::app) struct CountingRequester {
        pub(in crate::app) requests: Cell<usize>,
    }

    impl FrameRequester for CountingRequester {
        fn request_frame(&self) {
            self.requests.set(self.requests.get() + 1);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::testing::CountingRequester;
    use super::*;

    fn idle() -> RedrawScheduler {
        let mut scheduler = RedrawScheduler::armed();
        scheduler.fire(|| {});
        scheduler
    }

    #[test]
    fn bursts_of_requests_coalesce_into_one_frame() {
        let requester = CountingRequester::default();
        let mut scheduler = idle();
        let rebuilds = Cell::new(0);
        let draws = Cell::new(0);

        let armed = (0..25)
            .filter(|_| scheduler.request_redraw(&requester))
            .count();
        assert_eq!(armed, 1);
        assert_eq!(requester.requests.get(), 1);

        let fired = scheduler.fire(|| {
            rebuilds.set(rebuilds.get() + 1);
            draws.set(draws.get() + 1);
        });
        assert!(fired);
        assert_eq!((rebuilds.get(), draws.get()), (1, 1));

        assert!(!scheduler.fire(|| draws.set(draws.get() + 1)));
        assert_eq!(draws.get(), 1);
    }

    #[test]
    fn firing_rearms_for_the_next_request() {
        let requester = CountingRequester::default();
        let mut scheduler = idle();

        assert!(scheduler.request_redraw(&requester));
        assert!(scheduler.fire(|| {}));
        assert!(!scheduler.is_pending());
        assert!(scheduler.request_redraw(&requester));
        assert_eq!(requester.requests.get(), 2);
        assert_eq!(scheduler.frames_drawn(), 2);
    }

    #[test]
    fn starts_with_a_pending_frame() {
        let requester = CountingRequester::default();
        let mut scheduler = RedrawScheduler::armed();

        assert!(!scheduler.request_redraw(&requester));
        assert_eq!(requester.requests.get(), 0);
        assert!(scheduler.fire(|| {}));
    }
}
