use ratatui::layout::{Constraint, Direction, Layout, Rect};

pub struct AppLayout {
    pub header: Rect,
    pub main: Rect,
    pub footer: Rect,
}

impl AppLayout {
    /// `compact` shrinks the header to a single row once the panel is scrolled.
    pub fn new(area: Rect, compact: bool, footer_lines: u16) -> Self {
        let header_height = if compact { 1 } else { 3 };
        let vertical = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(header_height),
                Constraint::Min(3),
                Constraint::Length(footer_lines.max(1)),
            ])
            .split(area);

        Self {
            header: vertical[0],
            main: vertical[1],
            footer: vertical[2],
        }
    }
}

pub fn pack_hint_lines(hints: &[&str], width: usize) -> Vec<String> {
    if width == 0 || hints.is_empty() {
        return Vec::new();
    }

    let prefix = "  ";
    let separator = "  ";
    let mut out: Vec<String> = Vec::new();
    let mut current = prefix.to_string();
    let mut has_hint = false;

    for hint in hints {
        if hint.is_empty() {
            continue;
        }
        let candidate = if has_hint {
            format!("{current}{separator}{hint}")
        } else {
            format!("{current}{hint}")
        };
        if candidate.chars().count() <= width {
            current = candidate;
            has_hint = true;
        } else {
            if has_hint {
                out.push(current);
            }
            current = format!("{prefix}{hint}");
            has_hint = true;
        }
    }

    if has_hint {
        out.push(current);
    }
    out
}

/// Popup rect centered in `area`, at least `min_w` x `min_h` where space allows.
pub fn centered_rect(percent_x: u16, percent_y: u16, min_w: u16, min_h: u16, area: Rect) -> Rect {
    let requested_w = area.width.saturating_mul(percent_x.min(100)) / 100;
    let requested_h = area.height.saturating_mul(percent_y.min(100)) / 100;

    let target_w = requested_w.max(min_w).min(area.width);
    let target_h = requested_h.max(min_h).min(area.height);

    let left = area
        .x
        .saturating_add((area.width.saturating_sub(target_w)) / 2);
    let top = area
        .y
        .saturating_add((area.height.saturating_sub(target_h)) / 2);

    Rect::new(left, top, target_w, target_h)
}

/// First visible row so that the row `selected` (each `row_height` tall) fits
/// in a viewport of `height` rows, never scrolling above `scroll`.
pub fn scroll_to_fit(selected: usize, row_height: usize, height: usize, scroll: usize) -> usize {
    if height == 0 || row_height == 0 {
        return 0;
    }
    let top = selected * row_height;
    let bottom = top + row_height;
    if top < scroll {
        top
    } else if bottom > scroll + height {
        bottom.saturating_sub(height)
    } else {
        scroll
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pack_hint_lines_wraps() {
        let lines = pack_hint_lines(&["[q] Quit", "[t] Theme", "[/] Search"], 22);
        assert_eq!(lines, vec!["  [q] Quit  [t] Theme", "  [/] Search"]);
        assert!(pack_hint_lines(&["[q] Quit"], 0).is_empty());
    }

    #[test]
    fn test_compact_header_is_one_row() {
        let area = Rect::new(0, 0, 80, 24);
        assert_eq!(AppLayout::new(area, false, 1).header.height, 3);
        let compact = AppLayout::new(area, true, 2);
        assert_eq!(compact.header.height, 1);
        assert_eq!(compact.footer.height, 2);
        assert_eq!(compact.main.height, 21);
    }

    #[test]
    fn test_centered_rect_clamps_to_area() {
        let area = Rect::new(0, 0, 40, 10);
        let r = centered_rect(50, 50, 60, 5, area);
        assert_eq!(r.width, 40);
        assert_eq!(r.height, 5);
        assert_eq!(r.x, 0);
        assert_eq!(r.y, 2);
    }

    #[test]
    fn test_scroll_to_fit() {
        // rows of 3, viewport of 9: rows 0..=2 fit without scrolling
        assert_eq!(scroll_to_fit(2, 3, 9, 0), 0);
        assert_eq!(scroll_to_fit(3, 3, 9, 0), 3);
        assert_eq!(scroll_to_fit(0, 3, 9, 6), 0);
        assert_eq!(scroll_to_fit(4, 3, 9, 6), 6);
    }
}
