pub struct Tab {
    pub id: &'static str,
    pub label: &'static str,
}

pub const ALL_TABS: &[Tab] = &[
    Tab { id: "lessons", label: "Lessons" },
    Tab { id: "projects", label: "Projects" },
    Tab { id: "resources", label: "Resources" },
    Tab { id: "progress", label: "Progress" },
];

pub const DEFAULT_TAB: &str = "lessons";

/// Mutually exclusive panels selected by identifier.
///
/// The active panel is mirrored into a location fragment (`#lessons`). The
/// fragment is replaced on every switch, never appended, so switching tabs
/// does not grow any back/forward history.
pub struct TabManager {
    tabs: &'static [Tab],
    active: usize,
    fragment: String,
}

impl TabManager {
    pub fn new() -> Self {
        let mut manager = Self {
            tabs: ALL_TABS,
            active: 0,
            fragment: String::new(),
        };
        manager.switch_tab(DEFAULT_TAB);
        manager
    }

    pub fn tabs(&self) -> &'static [Tab] {
        self.tabs
    }

    pub fn active_index(&self) -> usize {
        self.active
    }

    pub fn active_id(&self) -> &'static str {
        self.tabs[self.active].id
    }

    pub fn fragment(&self) -> &str {
        &self.fragment
    }

    /// Activate the tab named `id`. Unknown ids leave the current tab active
    /// and return false.
    pub fn switch_tab(&mut self, id: &str) -> bool {
        let Some(index) = self.tabs.iter().position(|t| t.id == id) else {
            return false;
        };
        self.active = index;
        self.fragment = format!("#{id}");
        true
    }

    pub fn next_id(&self) -> &'static str {
        self.tabs[(self.active + 1) % self.tabs.len()].id
    }

    pub fn prev_id(&self) -> &'static str {
        let len = self.tabs.len();
        self.tabs[(self.active + len - 1) % len].id
    }
}

impl Default for TabManager {
    fn default() -> Self {
        Self::new()
    }
}
