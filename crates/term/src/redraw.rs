/// Decides which ticks are worth presenting.
///
/// A frame is drawn when the board fingerprint changes. While the board sits
/// idle (nothing animating, nothing spinning into a new frame) the gate still
/// lets one refresh through every `idle_interval_ticks`, so a resized or
/// scribbled-over terminal recovers.
#[derive(Debug, Clone)]
pub struct RedrawGate {
    idle_interval_ticks: u64,
    last_tick: u64,
    last_fingerprint: Option<u64>,
}

impl RedrawGate {
    pub fn new(idle_interval_ticks: u64) -> Self {
        Self {
            idle_interval_ticks,
            last_tick: 0,
            last_fingerprint: None,
        }
    }

    pub fn should_redraw(&mut self, tick: u64, fingerprint: u64) -> bool {
        let changed = self.last_fingerprint != Some(fingerprint);
        let stale = tick.saturating_sub(self.last_tick) >= self.idle_interval_ticks;
        if changed || stale {
            self.last_tick = tick;
            self.last_fingerprint = Some(fingerprint);
            return true;
        }
        false
    }

    /// Forget the last frame so the next call always redraws.
    pub fn reset(&mut self) {
        self.last_fingerprint = None;
    }
}
