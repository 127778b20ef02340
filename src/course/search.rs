use crate::course::catalog::{ALL_LESSONS, Lesson};

/// Result of running the search box contents through the index.
#[derive(Debug)]
pub enum SearchOutcome<'a> {
    /// Query shorter than the minimum; the results panel stays hidden.
    Inactive,
    /// Matches in catalogue order. Empty means "no results found".
    Matches(Vec<&'a Lesson>),
}

impl SearchOutcome<'_> {
    pub fn is_active(&self) -> bool {
        matches!(self, SearchOutcome::Matches(_))
    }

    pub fn lessons(&self) -> &[&Lesson] {
        match self {
            SearchOutcome::Inactive => &[],
            SearchOutcome::Matches(lessons) => lessons,
        }
    }
}

pub struct SearchIndex {
    lessons: &'static [Lesson],
    min_chars: usize,
}

impl SearchIndex {
    pub fn new(min_chars: usize) -> Self {
        Self::with_lessons(ALL_LESSONS, min_chars)
    }

    pub fn with_lessons(lessons: &'static [Lesson], min_chars: usize) -> Self {
        Self { lessons, min_chars }
    }

    /// Case-insensitive substring filter over titles and topic keywords.
    pub fn search(&self, query: &str) -> Vec<&'static Lesson> {
        let query = query.to_lowercase();
        self.lessons
            .iter()
            .filter(|lesson| {
                lesson.title.to_lowercase().contains(&query)
                    || lesson.topics.iter().any(|t| t.to_lowercase().contains(&query))
            })
            .collect()
    }

    pub fn query(&self, text: &str) -> SearchOutcome<'static> {
        if text.chars().count() < self.min_chars {
            return SearchOutcome::Inactive;
        }
        SearchOutcome::Matches(self.search(text))
    }
}
