use ratatui::buffer::Buffer;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Clear, Paragraph, Widget};

use crate::course::search::SearchOutcome;
use crate::ui::layout::scroll_to_fit;
use crate::ui::search_box::SearchBox;
use crate::ui::theme::Theme;

pub struct SearchPopup<'a> {
    pub input: &'a SearchBox,
    pub outcome: &'a SearchOutcome<'a>,
    pub theme: &'a Theme,
    pub min_chars: usize,
}

impl<'a> SearchPopup<'a> {
    pub fn new(
        input: &'a SearchBox,
        outcome: &'a SearchOutcome<'a>,
        min_chars: usize,
        theme: &'a Theme,
    ) -> Self {
        Self {
            input,
            outcome,
            theme,
            min_chars,
        }
    }
}

impl Widget for SearchPopup<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        Clear.render(area, buf);
        let block = Block::bordered()
            .title(" Search lessons, topics... ")
            .border_style(Style::default().fg(colors.border_focused()))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(2), Constraint::Min(0)])
            .split(inner);

        let (before, cursor_ch, after) = self.input.render_parts();
        let cursor_style = Style::default().fg(colors.bg()).bg(colors.fg());
        let input_line = Line::from(vec![
            Span::styled(" / ", Style::default().fg(colors.accent())),
            Span::styled(before, Style::default().fg(colors.fg())),
            Span::styled(cursor_ch.map(String::from).unwrap_or_else(|| " ".to_string()), cursor_style),
            Span::styled(after, Style::default().fg(colors.fg())),
        ]);
        Paragraph::new(input_line).render(layout[0], buf);

        let visible = layout[1].height as usize;
        let first_row = scroll_to_fit(self.input.selected, 1, visible, 0);

        let lines: Vec<Line> = match self.outcome {
            SearchOutcome::Inactive => {
                let noun = if self.min_chars == 1 { "character" } else { "characters" };
                vec![Line::from(Span::styled(
                    format!("   Type at least {} {noun}", self.min_chars),
                    Style::default().fg(colors.text_muted()),
                ))]
            }
            SearchOutcome::Matches(lessons) if lessons.is_empty() => vec![Line::from(Span::styled(
                "   No results found",
                Style::default().fg(colors.warning()),
            ))],
            SearchOutcome::Matches(lessons) => lessons
                .iter()
                .enumerate()
                .skip(first_row)
                .take(visible)
                .map(|(i, lesson)| {
                    let is_selected = i == self.input.selected;
                    let style = if is_selected {
                        Style::default()
                            .fg(colors.accent())
                            .add_modifier(Modifier::BOLD)
                    } else {
                        Style::default().fg(colors.fg())
                    };
                    let indicator = if is_selected { ">" } else { " " };
                    Line::from(vec![
                        Span::styled(format!(" {indicator} Lesson {}", lesson.number), style),
                        Span::styled(format!(": {}", lesson.title), Style::default().fg(colors.fg())),
                    ])
                })
                .collect(),
        };
        Paragraph::new(lines).render(layout[1], buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::course::search::SearchIndex;
    use crate::ui::theme::ThemeMode;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    fn render_query(text: &str) -> String {
        render_with(text, 2, 0)
    }

    fn render_with(text: &str, min_chars: usize, selected: usize) -> String {
        let theme = Theme::for_mode(ThemeMode::Light);
        let mut input = SearchBox::new();
        for ch in text.chars() {
            input.handle(KeyEvent::new(KeyCode::Char(ch), KeyModifiers::NONE));
        }
        input.selected = selected;
        let outcome = SearchIndex::new(min_chars).query(input.value());
        let area = Rect::new(0, 0, 50, 10);
        let mut buf = Buffer::empty(area);
        SearchPopup::new(&input, &outcome, min_chars, &theme).render(area, &mut buf);
        (0..10)
            .map(|y| (0..50).map(|x| buf[(x, y)].symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_lists_matches() {
        let screen = render_query("svg");
        assert!(screen.contains("Lesson 11: Canvas and SVG"));
    }

    #[test]
    fn test_no_results_message() {
        assert!(render_query("zz").contains("No results found"));
    }

    #[test]
    fn test_short_query_shows_hint() {
        let screen = render_query("h");
        assert!(screen.contains("Type at least 2 characters"));
        assert!(!screen.contains("Lesson 1"));
    }

    #[test]
    fn test_hint_follows_configured_minimum() {
        assert!(render_with("ht", 3, 0).contains("Type at least 3 characters"));
    }

    #[test]
    fn test_results_scroll_to_selected_row() {
        let matches = SearchIndex::new(2).query("es").lessons().len();
        assert_eq!(matches, 7);
        let screen = render_with("es", 2, matches - 1);
        assert!(screen.contains("> Lesson 15: Best Practices"));
        assert!(!screen.contains("Lesson 3: Text Elements"));
    }
}
