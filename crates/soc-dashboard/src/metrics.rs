use web_time::Instant;

/// Frame rate over one-second spans, shown by the debug overlay.
pub struct FrameStats {
    fps: f32,
    last_update_time: Instant,
    frames_last_time_span: usize,
}

impl FrameStats {
    pub fn starting_at(now: Instant) -> Self {
        Self {
            fps: 0.0,
            last_update_time: now,
            frames_last_time_span: 0,
        }
    }

    pub fn record_frame(&mut self, now: Instant) {
        self.frames_last_time_span += 1;
        let elapsed = now.duration_since(self.last_update_time);
        if elapsed.as_secs() >= 1 {
            self.last_update_time = now;
            self.fps = self.frames_last_time_span as f32 / elapsed.as_secs_f32();
            self.frames_last_time_span = 0;
        }
    }

    pub fn fps(&self) -> f32 {
        self.fps
    }
}
