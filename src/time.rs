//! Fixed-timestep clock and wall-clock helpers.
//!
//! `draw_web()` fires at the display refresh rate with a variable delta.
//! `TickClock` folds those frame timestamps into whole engine ticks so the
//! progression rules always advance in identical 100 ms steps.

/// Engine ticks per real-time second.
pub const TICKS_PER_SECOND: u32 = 10;

/// Seconds of game time covered by one tick.
pub const TICK_SECONDS: f64 = 1.0 / TICKS_PER_SECOND as f64;

/// Largest frame gap fed into the accumulator. A backgrounded tab resumes
/// with at most this much catch-up instead of a burst of ticks.
const MAX_FRAME_MS: f64 = 500.0;

pub struct TickClock {
    ms_per_tick: f64,
    /// Milliseconds not yet consumed as ticks.
    pending_ms: f64,
    pub total_ticks: u64,
    last_frame_ms: Option<f64>,
}

impl TickClock {
    pub fn new(ticks_per_sec: u32) -> Self {
        Self {
            ms_per_tick: 1000.0 / ticks_per_sec.max(1) as f64,
            pending_ms: 0.0,
            total_ticks: 0,
            last_frame_ms: None,
        }
    }

    /// Feed a frame timestamp (`performance.now()`), get back the number of
    /// ticks to run this frame. The first frame only arms the clock.
    pub fn advance(&mut self, now_ms: f64) -> u32 {
        let elapsed = self
            .last_frame_ms
            .map(|prev| (now_ms - prev).clamp(0.0, MAX_FRAME_MS))
            .unwrap_or(0.0);
        self.last_frame_ms = Some(now_ms);

        self.pending_ms += elapsed;
        let ticks = (self.pending_ms / self.ms_per_tick) as u32;
        self.pending_ms -= ticks as f64 * self.ms_per_tick;
        self.total_ticks += ticks as u64;
        ticks
    }
}

impl Default for TickClock {
    fn default() -> Self {
        Self::new(TICKS_PER_SECOND)
    }
}

/// Milliseconds since the Unix epoch.
#[cfg(target_arch = "wasm32")]
pub fn epoch_millis() -> i64 {
    js_sys::Date::now() as i64
}

/// Milliseconds since the Unix epoch.
#[cfg(not(target_arch = "wasm32"))]
pub fn epoch_millis() -> i64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as i64)
        .unwrap_or(0)
}
