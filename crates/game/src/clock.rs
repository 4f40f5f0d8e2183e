//! Round countdown and score.

/// What a countdown second produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountdownTick {
    /// Not started, already finished, cancelled, or input not captured.
    Idle,
    /// One second elapsed; this many remain.
    Remaining(u32),
    /// The round just ran out. Reported exactly once.
    Expired,
}

/// One-shot countdown driven by an external one-second interval.
#[derive(Debug, Clone)]
pub struct Countdown {
    duration: u32,
    remaining: u32,
    running: bool,
    started: bool,
}

impl Countdown {
    pub fn new(seconds: u32) -> Self {
        Self {
            duration: seconds,
            remaining: seconds,
            running: false,
            started: false,
        }
    }

    /// Start the countdown. Returns false if it was already started once.
    pub fn start(&mut self) -> bool {
        if self.started || self.duration == 0 {
            return false;
        }
        self.started = true;
        self.running = true;
        true
    }

    /// Called once per real second. Seconds while `active` is false are skipped.
    pub fn on_second(&mut self, active: bool) -> CountdownTick {
        if !self.running || !active {
            return CountdownTick::Idle;
        }
        self.remaining = self.remaining.saturating_sub(1);
        if self.remaining == 0 {
            self.running = false;
            CountdownTick::Expired
        } else {
            CountdownTick::Remaining(self.remaining)
        }
    }

    /// Stop without expiring. Safe to call any number of times.
    pub fn cancel(&mut self) {
        self.running = false;
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    pub fn is_running(&self) -> bool {
        self.running
    }
}

/// Hit counter.
#[derive(Debug, Clone, Copy, Default)]
pub struct Scoreboard {
    score: u32,
}

impl Scoreboard {
    /// Count one hit and return the new score.
    pub fn record_hit(&mut self) -> u32 {
        self.score = self.score.saturating_add(1);
        self.score
    }

    pub fn score(&self) -> u32 {
        self.score
    }
}
