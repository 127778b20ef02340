use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::course::catalog;
use crate::course::progress::CourseProgress;
use crate::store::storage::Storage;
use crate::ui::theme::ThemeMode;

/// Progress and theme persistence on top of a string key/value [`Storage`].
///
/// Every failure is logged and swallowed: a broken store only means state
/// does not survive a restart, so callers never see an error.
pub struct CourseStore<S: Storage> {
    storage: S,
    namespace: String,
}

impl<S: Storage> CourseStore<S> {
    pub fn new(storage: S, namespace: &str) -> Self {
        Self {
            storage,
            namespace: namespace.to_string(),
        }
    }

    pub fn progress_key(&self) -> String {
        format!("{}-progress", self.namespace)
    }

    pub fn theme_key(&self) -> String {
        format!("{}-theme", self.namespace)
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Load the persisted progress record. Each readable field present in
    /// storage wins; missing or unreadable fields keep their defaults.
    pub fn load_progress(&self) -> CourseProgress {
        let key = self.progress_key();
        let saved = match self.storage.get_item(&key) {
            Ok(Some(saved)) => saved,
            Ok(None) => return CourseProgress::default(),
            Err(e) => {
                warn!(%key, error = %e, "could not load progress");
                return CourseProgress::default();
            }
        };

        let fields: Map<String, Value> = match serde_json::from_str(&saved) {
            Ok(Value::Object(fields)) => fields,
            Ok(other) => {
                warn!(%key, value = %other, "saved progress is not an object");
                return CourseProgress::default();
            }
            Err(e) => {
                warn!(%key, error = %e, "could not parse saved progress");
                return CourseProgress::default();
            }
        };

        let mut progress = CourseProgress::default();
        merge_field(&fields, "completedLessons", &mut progress.completed_lessons);
        merge_field(&fields, "totalLessons", &mut progress.total_lessons);
        merge_field(&fields, "startDate", &mut progress.start_date);
        merge_field(&fields, "lastAccessed", &mut progress.last_accessed);

        let total = catalog::total_lessons();
        if progress.total_lessons != total {
            warn!(
                saved = progress.total_lessons,
                total, "saved lesson total differs from catalogue"
            );
            progress.total_lessons = total;
        }
        let dropped = progress.retain_known_lessons();
        if !dropped.is_empty() {
            warn!(?dropped, "ignoring unknown lessons in saved progress");
        }
        debug!(completed = progress.completed_count(), "progress loaded");
        progress
    }

    /// Returns false when the record could not be written.
    pub fn save_progress(&mut self, progress: &CourseProgress) -> bool {
        let key = self.progress_key();
        let json = match serde_json::to_string(progress) {
            Ok(json) => json,
            Err(e) => {
                warn!(error = %e, "could not serialize progress");
                return false;
            }
        };
        match self.storage.set_item(&key, &json) {
            Ok(()) => true,
            Err(e) => {
                warn!(%key, error = %e, "could not save progress");
                false
            }
        }
    }

    pub fn load_theme(&self) -> ThemeMode {
        let key = self.theme_key();
        match self.storage.get_item(&key) {
            Ok(Some(saved)) => saved.parse().unwrap_or_else(|_| {
                warn!(%key, value = %saved, "unknown theme preference");
                ThemeMode::default()
            }),
            Ok(None) => ThemeMode::default(),
            Err(e) => {
                warn!(%key, error = %e, "could not load theme");
                ThemeMode::default()
            }
        }
    }

    pub fn save_theme(&mut self, mode: ThemeMode) -> bool {
        let key = self.theme_key();
        match self.storage.set_item(&key, mode.as_str()) {
            Ok(()) => true,
            Err(e) => {
                warn!(%key, error = %e, "could not save theme");
                false
            }
        }
    }
}

fn merge_field<T: DeserializeOwned>(fields: &Map<String, Value>, name: &str, slot: &mut T) {
    let Some(value) = fields.get(name) else {
        return;
    };
    match serde_json::from_value(value.clone()) {
        Ok(parsed) => *slot = parsed,
        Err(e) => warn!(field = name, error = %e, "ignoring unreadable saved field"),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;
    use crate::store::storage::{FileStorage, MemoryStorage};
    use tempfile::TempDir;

    #[test]
    fn test_keys_use_namespace() {
        let store = CourseStore::new(MemoryStorage::new(), "html-course");
        assert_eq!(store.progress_key(), "html-course-progress");
        assert_eq!(store.theme_key(), "html-course-theme");
    }

    #[test]
    fn test_progress_round_trip_through_file() {
        let dir = TempDir::new().unwrap();
        let mut progress = CourseProgress::default();
        progress.mark_complete(2);
        progress.mark_complete(5);
        {
            let mut store = CourseStore::new(FileStorage::open(dir.path()).unwrap(), "html-course");
            assert!(store.save_progress(&progress));
        }

        let store = CourseStore::new(FileStorage::open(dir.path()).unwrap(), "html-course");
        let loaded = store.load_progress();
        assert_eq!(loaded.completed_lessons, BTreeSet::from([2, 5]));
        assert_eq!(loaded.total_lessons, 15);
        assert!(loaded.start_date.is_none());
    }

    #[test]
    fn test_partial_record_merges_over_defaults() {
        let mut storage = MemoryStorage::new();
        storage
            .set_item("html-course-progress", r#"{"completedLessons":[2,5]}"#)
            .unwrap();
        let store = CourseStore::new(storage, "html-course");
        let loaded = store.load_progress();
        assert_eq!(loaded.completed_lessons, BTreeSet::from([2, 5]));
        assert_eq!(loaded.total_lessons, 15);
        assert!(loaded.last_accessed.is_none());
    }

    #[test]
    fn test_corrupt_record_falls_back_to_default() {
        let mut storage = MemoryStorage::new();
        storage.set_item("html-course-progress", "{oops").unwrap();
        let store = CourseStore::new(storage, "html-course");
        assert_eq!(store.load_progress(), CourseProgress::default());
    }

    #[test]
    fn test_bad_field_keeps_the_rest_of_the_record() {
        let mut storage = MemoryStorage::new();
        storage
            .set_item(
                "html-course-progress",
                r#"{"completedLessons":[2,5],"startDate":"yesterday","lastAccessed":"2024-03-01T10:00:00Z"}"#,
            )
            .unwrap();
        let store = CourseStore::new(storage, "html-course");
        let loaded = store.load_progress();
        assert_eq!(loaded.completed_lessons, BTreeSet::from([2, 5]));
        assert!(loaded.start_date.is_none());
        assert_eq!(
            loaded.last_accessed.map(|t| t.to_rfc3339()),
            Some("2024-03-01T10:00:00+00:00".to_string())
        );
    }

    #[test]
    fn test_non_object_record_falls_back_to_default() {
        let mut storage = MemoryStorage::new();
        storage.set_item("html-course-progress", "[1,2]").unwrap();
        let store = CourseStore::new(storage, "html-course");
        assert_eq!(store.load_progress(), CourseProgress::default());
    }

    #[test]
    fn test_saved_total_and_unknown_lessons_are_normalized() {
        let mut storage = MemoryStorage::new();
        storage
            .set_item(
                "html-course-progress",
                r#"{"completedLessons":[1,40],"totalLessons":50}"#,
            )
            .unwrap();
        let store = CourseStore::new(storage, "html-course");
        let loaded = store.load_progress();
        assert_eq!(loaded.total_lessons, 15);
        assert_eq!(loaded.completed_lessons, BTreeSet::from([1]));
    }

    #[test]
    fn test_disabled_storage_never_errors() {
        let mut store = CourseStore::new(MemoryStorage::disabled(), "html-course");
        assert_eq!(store.load_progress(), CourseProgress::default());
        assert!(!store.save_progress(&CourseProgress::default()));
        assert_eq!(store.load_theme(), ThemeMode::Light);
        assert!(!store.save_theme(ThemeMode::Dark));
    }

    #[test]
    fn test_theme_round_trip_and_default() {
        let mut store = CourseStore::new(MemoryStorage::new(), "html-course");
        assert_eq!(store.load_theme(), ThemeMode::Light);
        assert!(store.save_theme(ThemeMode::Dark));
        assert_eq!(store.load_theme(), ThemeMode::Dark);
        assert_eq!(
            store.storage().get_item("html-course-theme").unwrap().as_deref(),
            Some("dark")
        );
    }

    #[test]
    fn test_unknown_theme_value_defaults_to_light() {
        let mut storage = MemoryStorage::new();
        storage.set_item("html-course-theme", "sepia").unwrap();
        let store = CourseStore::new(storage, "html-course");
        assert_eq!(store.load_theme(), ThemeMode::Light);
    }
}
