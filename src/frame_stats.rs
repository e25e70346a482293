/// Frame rate statistics sampled over one-second windows.
///
/// Owned by the host loop and fed the current time once per frame. Time per
/// frame is the more useful number when comparing workloads, so [`title`]
/// reports both.
///
/// [`title`]: FrameStats::title
#[derive(Clone, Debug)]
pub struct FrameStats {
    window_start: f64,
    frames: u32,
    fps: f64,
}

impl FrameStats {
    /// Starts the first sampling window at `now` seconds.
    pub fn new(now: f64) -> Self {
        Self {
            window_start: now,
            frames: 0,
            fps: 0.0,
        }
    }

    /// Records one frame at time `now` and returns the current estimate.
    ///
    /// The estimate only changes once at least a second has passed since the
    /// window started; frames in between just count.
    pub fn tick(&mut self, now: f64) -> f64 {
        let elapsed = now - self.window_start;
        if elapsed >= 1.0 {
            self.fps = f64::from(self.frames) / elapsed;
            self.window_start = now;
            self.frames = 0;
        }
        self.frames += 1;
        self.fps
    }

    /// True right after a tick that refreshed the estimate (and on the very
    /// first frame), which is when the window title should change.
    pub fn just_refreshed(&self) -> bool {
        self.frames == 1
    }

    pub fn fps(&self) -> f64 {
        self.fps
    }

    /// Milliseconds per frame, or 0 before the first estimate.
    pub fn frame_time_ms(&self) -> f64 {
        if self.fps > 0.0 { 1000.0 / self.fps } else { 0.0 }
    }

    pub fn title(&self, base: &str) -> String {
        format!(
            "{base}: {:.2} ms/frame ({:.1} FPS)",
            self.frame_time_ms(),
            self.fps
        )
    }
}
