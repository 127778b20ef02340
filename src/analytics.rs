//! Hook points for usage analytics. Events are only logged for now.

use tracing::info;

pub fn track_event(category: &str, action: &str, label: Option<&str>) {
    info!(target: "coursedeck::analytics", category, action, label, "event tracked");
}

pub fn track_page_view(page: &str) {
    info!(target: "coursedeck::analytics", page, "page view tracked");
}
