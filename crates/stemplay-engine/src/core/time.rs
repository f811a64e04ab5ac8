/// Fixed timestep accumulator.
/// Turns variable frame deltas into whole countdown units.
pub struct FixedTimestep {
    /// Seconds per unit.
    dt: f32,
    /// Accumulated time from variable frame deltas.
    accumulator: f32,
}

impl FixedTimestep {
    pub fn new(dt: f32) -> Self {
        Self {
            dt,
            accumulator: 0.0,
        }
    }

    /// Add frame time to the accumulator. Returns the number of whole units elapsed.
    pub fn accumulate(&mut self, frame_dt: f32) -> u32 {
        self.accumulator += frame_dt.max(0.0);
        // Cap at 10 units per frame: a long stall (hidden tab) does not burn the clock.
        self.accumulator = self.accumulator.min(self.dt * 10.0);
        let steps = (self.accumulator / self.dt) as u32;
        self.accumulator -= steps as f32 * self.dt;
        steps
    }
}

/// Session countdown measured in whole time units.
///
/// Untimed countdowns only count elapsed units. Timed ones also count down
/// and report expiry exactly once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Countdown {
    limit: Option<u32>,
    remaining: Option<u32>,
    elapsed: u32,
}

impl Countdown {
    pub fn new(limit: Option<u32>) -> Self {
        Self {
            limit,
            remaining: limit,
            elapsed: 0,
        }
    }

    /// Advance by one unit. Returns `true` only on the tick that reaches zero.
    pub fn tick(&mut self) -> bool {
        if self.is_expired() {
            return false;
        }
        match self.remaining {
            Some(left) => {
                self.elapsed += 1;
                self.remaining = Some(left - 1);
                left == 1
            }
            None => {
                self.elapsed += 1;
                false
            }
        }
    }

    pub fn is_expired(&self) -> bool {
        self.remaining == Some(0)
    }

    pub fn remaining(&self) -> Option<u32> {
        self.remaining
    }

    pub fn elapsed(&self) -> u32 {
        self.elapsed
    }

    pub fn limit(&self) -> Option<u32> {
        self.limit
    }
}

/// Render seconds as `m:ss`.
pub fn format_clock(seconds: u32) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}
