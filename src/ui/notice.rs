use std::time::{Duration, Instant};

/// A value that disappears on its own once its deadline passes.
#[derive(Clone, Debug)]
pub struct Transient<T> {
    pub value: T,
    expires_at: Instant,
}

impl<T> Transient<T> {
    pub fn new(value: T, now: Instant, ttl: Duration) -> Self {
        Self {
            value,
            expires_at: now + ttl,
        }
    }

    pub fn is_expired(&self, now: Instant) -> bool {
        now >= self.expires_at
    }
}

/// Drop `slot`'s contents if expired. Returns true when something was cleared.
pub fn expire<T>(slot: &mut Option<Transient<T>>, now: Instant) -> bool {
    if slot.as_ref().is_some_and(|t| t.is_expired(now)) {
        *slot = None;
        return true;
    }
    false
}

pub fn completion_message(lesson: u32) -> String {
    format!("🎉 Lesson {lesson} complete! 🎉")
}
