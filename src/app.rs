use std::time::{Duration, Instant};

use chrono::Utc;
use crossterm::event::KeyEvent;
use tracing::{debug, info};

use crate::analytics;
use crate::config::Config;
use crate::course::catalog::{self, ALL_LESSONS, ALL_PROJECTS, ALL_RESOURCES};
use crate::course::progress::CourseProgress;
use crate::course::search::{SearchIndex, SearchOutcome};
use crate::store::course_store::CourseStore;
use crate::store::storage::Storage;
use crate::ui::notice::{self, Transient};
use crate::ui::reveal::RevealAnimation;
use crate::ui::search_box::{InputResult, SearchBox};
use crate::ui::tabs::TabManager;
use crate::ui::theme::{Theme, ThemeMode};

/// Every user-visible action the controller understands. Key bindings map
/// onto these in `main.rs`; nothing else mutates [`App`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    SwitchTab(String),
    NextTab,
    PrevTab,
    SelectNext,
    SelectPrev,
    OpenSelected,
    ToggleSelected,
    MarkComplete(u32),
    MarkIncomplete(u32),
    ToggleLesson(u32),
    GoToLesson(u32),
    ToggleTheme,
    OpenSearch,
    SearchKey(KeyEvent),
    Tick,
    Quit,
}

pub struct App {
    pub config: Config,
    pub progress: CourseProgress,
    pub tabs: TabManager,
    pub search: SearchBox,
    pub search_open: bool,
    pub theme_mode: ThemeMode,
    pub theme: Theme,
    pub notice: Option<Transient<String>>,
    pub highlight: Option<Transient<u32>>,
    pub reveal: Option<RevealAnimation>,
    /// Focused card on the active panel.
    pub selected: usize,
    pub should_quit: bool,
    store: CourseStore<Box<dyn Storage>>,
    index: SearchIndex,
}

impl App {
    pub fn new(config: Config, storage: Box<dyn Storage>) -> Self {
        let store = CourseStore::new(storage, &config.namespace);
        let progress = store.load_progress();
        let theme_mode = store.load_theme();
        let index = SearchIndex::new(config.search_min_chars);

        let mut app = Self {
            config,
            progress,
            tabs: TabManager::new(),
            search: SearchBox::new(),
            search_open: false,
            theme_mode,
            theme: Theme::for_mode(theme_mode),
            notice: None,
            highlight: None,
            reveal: None,
            selected: 0,
            should_quit: false,
            store,
            index,
        };
        app.start_reveal(Instant::now());
        info!(
            completed = app.progress.completed_count(),
            theme = %app.theme_mode,
            "course initialized"
        );
        app
    }

    pub fn store(&self) -> &CourseStore<Box<dyn Storage>> {
        &self.store
    }

    pub fn dispatch(&mut self, command: Command) {
        let now = Instant::now();
        match command {
            Command::SwitchTab(id) => {
                self.switch_tab(&id);
            }
            Command::NextTab => {
                let id = self.tabs.next_id();
                self.switch_tab(id);
            }
            Command::PrevTab => {
                let id = self.tabs.prev_id();
                self.switch_tab(id);
            }
            Command::SelectNext => self.select_next(),
            Command::SelectPrev => self.select_prev(),
            Command::OpenSelected => {
                if let Some(lesson) = self.selected_lesson() {
                    self.track_access(lesson);
                }
            }
            Command::ToggleSelected => {
                if let Some(lesson) = self.selected_lesson() {
                    self.track_access(lesson);
                    self.toggle_lesson(lesson);
                }
            }
            Command::MarkComplete(n) => {
                self.mark_lesson_complete(n);
            }
            Command::MarkIncomplete(n) => {
                self.mark_lesson_incomplete(n);
            }
            Command::ToggleLesson(n) => self.toggle_lesson(n),
            Command::GoToLesson(n) => self.go_to_lesson(n),
            Command::ToggleTheme => self.toggle_theme(),
            Command::OpenSearch => {
                self.search_open = true;
            }
            Command::SearchKey(key) => self.handle_search_key(key),
            Command::Tick => self.expire_transients(now),
            Command::Quit => self.should_quit = true,
        }
    }

    // --- Tabs ---

    /// Unknown ids are ignored and leave the current panel active.
    pub fn switch_tab(&mut self, id: &str) -> bool {
        if !self.tabs.switch_tab(id) {
            debug!(tab = id, "ignoring switch to unknown tab");
            return false;
        }
        self.selected = 0;
        self.start_reveal(Instant::now());
        analytics::track_page_view(self.tabs.fragment());
        true
    }

    /// Back/forward navigation: follow a `#id` fragment if it names a tab.
    pub fn restore_fragment(&mut self, fragment: &str) -> bool {
        let id = fragment.strip_prefix('#').unwrap_or(fragment);
        self.switch_tab(id)
    }

    fn start_reveal(&mut self, now: Instant) {
        self.reveal = Some(RevealAnimation::new(
            now,
            Duration::from_millis(self.config.reveal_step_ms),
            Duration::from_millis(self.config.reveal_duration_ms),
        ));
    }

    /// Number of cards on the active panel.
    pub fn card_count(&self) -> usize {
        match self.tabs.active_id() {
            "lessons" => ALL_LESSONS.len(),
            "projects" => ALL_PROJECTS.len(),
            "resources" => ALL_RESOURCES.len(),
            _ => 0,
        }
    }

    pub fn select_next(&mut self) {
        let count = self.card_count();
        if count > 0 {
            self.selected = (self.selected + 1) % count;
        }
    }

    pub fn select_prev(&mut self) {
        let count = self.card_count();
        if count > 0 {
            self.selected = (self.selected + count - 1) % count;
        }
    }

    pub fn selected_lesson(&self) -> Option<u32> {
        if self.tabs.active_id() != "lessons" {
            return None;
        }
        ALL_LESSONS.get(self.selected).map(|l| l.number)
    }

    /// Header collapses once focus has moved a few cards down the panel.
    pub fn header_compact(&self) -> bool {
        self.selected >= self.config.compact_header_after
    }

    // --- Progress ---

    pub fn track_access(&mut self, lesson: u32) {
        self.progress.track_access(Utc::now());
        debug!(lesson, "lesson accessed");
        self.store.save_progress(&self.progress);
    }

    /// Returns true if the lesson was newly completed.
    pub fn mark_lesson_complete(&mut self, lesson: u32) -> bool {
        if !self.progress.mark_complete(lesson) {
            return false;
        }
        self.store.save_progress(&self.progress);
        self.notice = Some(Transient::new(
            notice::completion_message(lesson),
            Instant::now(),
            Duration::from_secs(self.config.notice_secs),
        ));
        analytics::track_event("Progress", "Lesson Complete", Some(lesson.to_string().as_str()));
        true
    }

    /// Returns true if the lesson was previously complete.
    pub fn mark_lesson_incomplete(&mut self, lesson: u32) -> bool {
        if !self.progress.mark_incomplete(lesson) {
            return false;
        }
        self.store.save_progress(&self.progress);
        true
    }

    /// The single checkbox handler for a lesson card.
    pub fn toggle_lesson(&mut self, lesson: u32) {
        if self.progress.is_complete(lesson) {
            self.mark_lesson_incomplete(lesson);
        } else {
            self.mark_lesson_complete(lesson);
        }
    }

    // --- Search ---

    pub fn search_outcome(&self) -> SearchOutcome<'static> {
        self.index.query(self.search.value())
    }

    fn handle_search_key(&mut self, key: KeyEvent) {
        match self.search.handle(key) {
            InputResult::Continue | InputResult::Edited => {}
            InputResult::SelectNext => {
                let count = self.search_outcome().lessons().len();
                if count > 0 {
                    self.search.selected = (self.search.selected + 1) % count;
                }
            }
            InputResult::SelectPrev => {
                let count = self.search_outcome().lessons().len();
                if count > 0 {
                    self.search.selected = (self.search.selected + count - 1) % count;
                }
            }
            InputResult::Submit => {
                let target = self
                    .search_outcome()
                    .lessons()
                    .get(self.search.selected)
                    .map(|l| l.number);
                if let Some(lesson) = target {
                    self.go_to_lesson(lesson);
                }
            }
            InputResult::Cancel => self.close_search(),
        }
    }

    fn close_search(&mut self) {
        self.search.clear();
        self.search_open = false;
    }

    /// Show the lessons panel with `lesson`'s card focused and briefly
    /// highlighted, then dismiss the search box.
    pub fn go_to_lesson(&mut self, lesson: u32) {
        self.switch_tab("lessons");
        if let Some(found) = catalog::find_lesson(lesson) {
            self.selected = found.card_index();
            self.highlight = Some(Transient::new(
                lesson,
                Instant::now(),
                Duration::from_millis(self.config.highlight_ms),
            ));
        }
        self.close_search();
    }

    pub fn highlighted_lesson(&self) -> Option<u32> {
        self.highlight.as_ref().map(|h| h.value)
    }

    // --- Theme ---

    pub fn toggle_theme(&mut self) {
        self.set_theme(self.theme_mode.toggle());
    }

    pub fn set_theme(&mut self, mode: ThemeMode) {
        self.theme_mode = mode;
        self.theme = Theme::for_mode(mode);
        self.store.save_theme(mode);
    }

    // --- Timers ---

    pub fn expire_transients(&mut self, now: Instant) {
        notice::expire(&mut self.notice, now);
        notice::expire(&mut self.highlight, now);
        let cards = self.card_count();
        if self.reveal.is_some_and(|r| r.is_finished(cards, now)) {
            self.reveal = None;
        }
    }
}
