use std::time::{Duration, Instant};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Visibility {
    Hidden,
    Fading,
    Shown,
}

/// Staggered fade-in of the cards of a freshly activated panel.
///
/// Card `i` starts `i * step` after `started` and takes `duration` to
/// become fully visible.
#[derive(Clone, Copy, Debug)]
pub struct RevealAnimation {
    started: Instant,
    step: Duration,
    duration: Duration,
}

impl RevealAnimation {
    pub fn new(started: Instant, step: Duration, duration: Duration) -> Self {
        Self {
            started,
            step,
            duration,
        }
    }

    /// Fraction of card `index`'s transition that has elapsed at `now`, in `0.0..=1.0`.
    pub fn progress(&self, index: usize, now: Instant) -> f64 {
        let delay = self.step * index as u32;
        let elapsed = now.saturating_duration_since(self.started);
        if elapsed < delay {
            return 0.0;
        }
        if self.duration.is_zero() {
            return 1.0;
        }
        let into = (elapsed - delay).as_secs_f64() / self.duration.as_secs_f64();
        into.min(1.0)
    }

    pub fn visibility(&self, index: usize, now: Instant) -> Visibility {
        let p = self.progress(index, now);
        if p <= 0.0 {
            Visibility::Hidden
        } else if p < 1.0 {
            Visibility::Fading
        } else {
            Visibility::Shown
        }
    }

    /// Rows a card is still shifted down by (slides up as it fades in).
    pub fn offset_rows(&self, index: usize, now: Instant) -> u16 {
        ((1.0 - self.progress(index, now)) * 2.0).round() as u16
    }

    pub fn is_finished(&self, card_count: usize, now: Instant) -> bool {
        card_count == 0 || self.progress(card_count - 1, now) >= 1.0
    }
}
