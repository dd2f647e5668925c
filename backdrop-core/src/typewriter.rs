//! Looping type-and-erase effect for the dashboard heading.

use crate::config::TypewriterConfig;
use std::time::Duration;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TypewriterPhase {
    /// Adding one character per `type_ms`.
    Typing,
    /// Full text shown for `hold_ms`.
    Holding,
    /// Removing one character per `delete_ms`.
    Deleting,
    /// Empty for `pause_ms`.
    Pausing,
}

#[derive(Clone, Debug)]
pub struct Typewriter {
    text: String,
    len: usize,
    shown: usize,
    phase: TypewriterPhase,
    elapsed: Duration,
    type_delay: Duration,
    hold_delay: Duration,
    delete_delay: Duration,
    pause_delay: Duration,
}

impl Typewriter {
    pub fn new(cfg: &TypewriterConfig) -> Self {
        let ms = |v: u64| Duration::from_millis(v.max(1));
        let len = cfg.text.chars().count();
        Self {
            text: cfg.text.clone(),
            len,
            shown: 0,
            phase: if len == 0 {
                TypewriterPhase::Holding
            } else {
                TypewriterPhase::Typing
            },
            elapsed: Duration::ZERO,
            type_delay: ms(cfg.type_ms),
            hold_delay: ms(cfg.hold_ms),
            delete_delay: ms(cfg.delete_ms),
            pause_delay: ms(cfg.pause_ms),
        }
    }

    /// Feeds elapsed time, applying every transition that came due.
    ///
    /// Whole type-hold-delete-pause cycles are skipped, so the work done is
    /// bounded by one cycle however large `dt` is.
    pub fn advance(&mut self, dt: Duration) {
        self.elapsed = self.elapsed.saturating_add(dt);
        let cycle = self.cycle().as_nanos();
        if self.elapsed.as_nanos() >= cycle {
            let rest = self.elapsed.as_nanos() % cycle;
            self.elapsed = Duration::from_nanos(u64::try_from(rest).unwrap_or(u64::MAX));
        }
        loop {
            let wait = self.current_delay();
            if self.elapsed < wait {
                break;
            }
            self.elapsed -= wait;
            self.transition();
        }
    }

    /// Length of one full loop through all four phases.
    pub fn cycle(&self) -> Duration {
        let chars = u32::try_from(self.len).unwrap_or(u32::MAX);
        self.type_delay
            .saturating_mul(chars)
            .saturating_add(self.hold_delay)
            .saturating_add(self.delete_delay.saturating_mul(chars))
            .saturating_add(self.pause_delay)
    }

    /// Largest step that lands on every phase boundary: the greatest common
    /// divisor of the four delays.
    pub fn resolution(&self) -> Duration {
        let ms = [
            self.type_delay,
            self.hold_delay,
            self.delete_delay,
            self.pause_delay,
        ]
        .iter()
        .map(|d| u64::try_from(d.as_millis()).unwrap_or(u64::MAX))
        .fold(0, gcd);
        Duration::from_millis(ms.max(1))
    }

    fn current_delay(&self) -> Duration {
        match self.phase {
            TypewriterPhase::Typing => self.type_delay,
            TypewriterPhase::Holding => self.hold_delay,
            TypewriterPhase::Deleting => self.delete_delay,
            TypewriterPhase::Pausing => self.pause_delay,
        }
    }

    fn transition(&mut self) {
        self.phase = match self.phase {
            TypewriterPhase::Typing => {
                self.shown += 1;
                if self.shown >= self.len {
                    TypewriterPhase::Holding
                } else {
                    TypewriterPhase::Typing
                }
            }
            TypewriterPhase::Holding => {
                if self.len == 0 {
                    TypewriterPhase::Pausing
                } else {
                    TypewriterPhase::Deleting
                }
            }
            TypewriterPhase::Deleting => {
                self.shown = self.shown.saturating_sub(1);
                if self.shown == 0 {
                    TypewriterPhase::Pausing
                } else {
                    TypewriterPhase::Deleting
                }
            }
            TypewriterPhase::Pausing => {
                if self.len == 0 {
                    TypewriterPhase::Holding
                } else {
                    TypewriterPhase::Typing
                }
            }
        };
    }

    /// Currently visible prefix of the heading.
    pub fn text(&self) -> &str {
        let end = self
            .text
            .char_indices()
            .nth(self.shown)
            .map_or(self.text.len(), |(i, _)| i);
        &self.text[..end]
    }

    pub fn phase(&self) -> TypewriterPhase {
        self.phase
    }
}

fn gcd(a: u64, b: u64) -> u64 {
    if b == 0 { a } else { gcd(b, a % b) }
}
