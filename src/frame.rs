//! Render-tick collaborator used to throttle `touchmove` processing.

/// Opaque tick identity handed to frame listeners.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Frame(pub u64);

pub type FrameListener = Box<dyn FnMut(Frame)>;

pub trait FrameScheduler {
    fn add_frame_listener(&mut self, listener: FrameListener);
}

/// Scheduler advanced explicitly by its owner, one `tick` per rendered frame.
#[derive(Default)]
pub struct ManualFrames {
    listeners: Vec<FrameListener>,
    next: u64,
}

impl ManualFrames {
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs every listener once with a fresh frame and returns that frame.
    pub fn tick(&mut self) -> Frame {
        let frame = Frame(self.next);
        self.next += 1;
        for listener in self.listeners.iter_mut() {
            listener(frame);
        }
        frame
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }
}

impl FrameScheduler for ManualFrames {
    fn add_frame_listener(&mut self, listener: FrameListener) {
        self.listeners.push(listener);
    }
}
