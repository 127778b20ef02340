use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::course::catalog;

/// The learner's completion and session state.
///
/// Missing fields in a persisted record fall back to `Default`, so a record
/// written by an older build (or a hand-edited one) still loads.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CourseProgress {
    pub completed_lessons: BTreeSet<u32>,
    pub total_lessons: u32,
    pub start_date: Option<DateTime<Utc>>,
    pub last_accessed: Option<DateTime<Utc>>,
}

impl Default for CourseProgress {
    fn default() -> Self {
        Self {
            completed_lessons: BTreeSet::new(),
            total_lessons: catalog::total_lessons(),
            start_date: None,
            last_accessed: None,
        }
    }
}

impl CourseProgress {
    /// Record that a lesson card was opened. The first access ever also sets
    /// the start date.
    pub fn track_access(&mut self, now: DateTime<Utc>) {
        if self.start_date.is_none() {
            self.start_date = Some(now);
        }
        self.last_accessed = Some(now);
    }

    /// Returns true if the lesson was not already complete.
    pub fn mark_complete(&mut self, lesson: u32) -> bool {
        self.completed_lessons.insert(lesson)
    }

    /// Returns true if the lesson was previously complete.
    pub fn mark_incomplete(&mut self, lesson: u32) -> bool {
        self.completed_lessons.remove(&lesson)
    }

    pub fn is_complete(&self, lesson: u32) -> bool {
        self.completed_lessons.contains(&lesson)
    }

    pub fn completed_count(&self) -> usize {
        self.completed_lessons.len()
    }

    pub fn percentage(&self) -> f64 {
        if self.total_lessons == 0 {
            return 0.0;
        }
        self.completed_count() as f64 / self.total_lessons as f64 * 100.0
    }

    pub fn rounded_percentage(&self) -> u32 {
        self.percentage().round() as u32
    }

    pub fn ratio(&self) -> f64 {
        self.percentage() / 100.0
    }

    pub fn summary(&self) -> String {
        format!(
            "{} of {} lessons completed ({}%)",
            self.completed_count(),
            self.total_lessons,
            self.rounded_percentage()
        )
    }

    /// Drop lesson numbers outside `1..=total_lessons`. Returns the removed numbers.
    pub fn retain_known_lessons(&mut self) -> Vec<u32> {
        let total = self.total_lessons;
        let unknown: Vec<u32> = self
            .completed_lessons
            .iter()
            .copied()
            .filter(|n| *n == 0 || *n > total)
            .collect();
        for n in &unknown {
            self.completed_lessons.remove(n);
        }
        unknown
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(1_700_000_000 + secs, 0).unwrap()
    }

    #[test]
    fn test_default_progress_is_empty() {
        let progress = CourseProgress::default();
        assert!(progress.completed_lessons.is_empty());
        assert_eq!(progress.total_lessons, 15);
        assert!(progress.start_date.is_none());
        assert!(progress.last_accessed.is_none());
        assert_eq!(progress.rounded_percentage(), 0);
    }

    #[test]
    fn test_complete_then_incomplete_restores_set() {
        let mut progress = CourseProgress::default();
        progress.mark_complete(4);
        let before = progress.completed_lessons.clone();

        for n in 1..=15 {
            let had = progress.is_complete(n);
            progress.mark_complete(n);
            progress.mark_incomplete(n);
            if had {
                progress.mark_complete(n);
            }
            assert_eq!(progress.completed_lessons, before, "lesson {n}");
        }
    }

    #[test]
    fn test_mark_complete_is_idempotent() {
        let mut progress = CourseProgress::default();
        assert!(progress.mark_complete(7));
        assert!(!progress.mark_complete(7));
        assert_eq!(progress.completed_count(), 1);
        assert!(progress.mark_incomplete(7));
        assert!(!progress.mark_incomplete(7));
        assert_eq!(progress.completed_count(), 0);
    }

    #[test]
    fn test_percentage_rounds_for_display() {
        let mut progress = CourseProgress::default();
        for k in 1..=15u32 {
            progress.mark_complete(k);
            let expected = (k as f64 / 15.0 * 100.0).round() as u32;
            assert_eq!(progress.rounded_percentage(), expected, "k={k}");
        }

        let mut three = CourseProgress::default();
        three.mark_complete(2);
        three.mark_complete(9);
        three.mark_complete(14);
        assert_eq!(three.rounded_percentage(), 20);
        assert_eq!(three.summary(), "3 of 15 lessons completed (20%)");
    }

    #[test]
    fn test_percentage_zero_total() {
        let progress = CourseProgress {
            total_lessons: 0,
            ..CourseProgress::default()
        };
        assert_eq!(progress.percentage(), 0.0);
    }

    #[test]
    fn test_track_access_sets_start_once() {
        let mut progress = CourseProgress::default();
        progress.track_access(at(0));
        progress.track_access(at(60));
        assert_eq!(progress.start_date, Some(at(0)));
        assert_eq!(progress.last_accessed, Some(at(60)));
    }

    #[test]
    fn test_completed_lessons_serialize_ascending() {
        let mut progress = CourseProgress::default();
        progress.mark_complete(12);
        progress.mark_complete(3);
        progress.mark_complete(7);
        let json = serde_json::to_string(&progress).unwrap();
        assert!(json.contains("\"completedLessons\":[3,7,12]"), "{json}");
        assert!(json.contains("\"totalLessons\":15"));
    }

    #[test]
    fn test_partial_record_keeps_defaults() {
        let progress: CourseProgress =
            serde_json::from_str(r#"{"completedLessons":[5,2,5]}"#).unwrap();
        assert_eq!(progress.completed_lessons, BTreeSet::from([2, 5]));
        assert_eq!(progress.total_lessons, 15);
        assert!(progress.start_date.is_none());
    }

    #[test]
    fn test_retain_known_lessons_drops_out_of_range() {
        let mut progress = CourseProgress::default();
        progress.completed_lessons = BTreeSet::from([0, 3, 15, 16, 99]);
        let dropped = progress.retain_known_lessons();
        assert_eq!(dropped, vec![0, 16, 99]);
        assert_eq!(progress.completed_lessons, BTreeSet::from([3, 15]));
    }
}
