use std::time::Instant;

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};

use crate::ui::layout::scroll_to_fit;
use crate::ui::reveal::{RevealAnimation, Visibility};
use crate::ui::theme::Theme;

/// Rows per card: title line, detail line, spacer.
pub const CARD_HEIGHT: u16 = 3;

pub struct Card {
    pub title: String,
    pub detail: String,
    /// Completion checkbox state; `None` for cards without one.
    pub checked: Option<bool>,
    pub highlighted: bool,
}

pub struct CardList<'a> {
    pub title: &'a str,
    pub cards: Vec<Card>,
    pub selected: usize,
    pub reveal: Option<RevealAnimation>,
    pub now: Instant,
    pub theme: &'a Theme,
}

impl<'a> CardList<'a> {
    pub fn new(title: &'a str, cards: Vec<Card>, theme: &'a Theme) -> Self {
        Self {
            title,
            cards,
            selected: 0,
            reveal: None,
            now: Instant::now(),
            theme,
        }
    }

    pub fn selected(mut self, selected: usize) -> Self {
        self.selected = selected;
        self
    }

    pub fn reveal(mut self, reveal: Option<RevealAnimation>, now: Instant) -> Self {
        self.reveal = reveal;
        self.now = now;
        self
    }
}

impl Widget for CardList<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let block = Block::bordered()
            .title(format!(" {} ", self.title))
            .border_style(Style::default().fg(colors.border()))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.width == 0 || inner.height == 0 || self.cards.is_empty() {
            return;
        }

        let height = inner.height as usize;
        let row_height = CARD_HEIGHT as usize;
        let first_row = scroll_to_fit(self.selected, row_height, height, 0);

        for (i, card) in self.cards.iter().enumerate() {
            let visibility = self
                .reveal
                .map(|r| r.visibility(i, self.now))
                .unwrap_or(Visibility::Shown);
            if visibility == Visibility::Hidden {
                continue;
            }
            let slide = self.reveal.map(|r| r.offset_rows(i, self.now)).unwrap_or(0) as usize;

            let top = i * row_height + slide;
            if top < first_row {
                continue;
            }
            let y_offset = top - first_row;
            if y_offset + 2 > height {
                break;
            }

            let is_selected = i == self.selected;
            let indicator = if is_selected { ">" } else { " " };
            let checkbox = match card.checked {
                Some(true) => "[✓] ",
                Some(false) => "[ ] ",
                None => "",
            };

            let mut title_style = Style::default().fg(if visibility == Visibility::Fading {
                colors.text_muted()
            } else if card.checked == Some(true) {
                colors.success()
            } else if is_selected {
                colors.accent()
            } else {
                colors.fg()
            });
            if is_selected {
                title_style = title_style.add_modifier(Modifier::BOLD);
            }
            if card.highlighted {
                title_style = title_style.bg(colors.highlight_bg());
            }

            let lines = vec![
                Line::from(vec![
                    Span::styled(format!(" {indicator} "), Style::default().fg(colors.accent())),
                    Span::styled(format!("{checkbox}{}", card.title), title_style),
                ]),
                Line::from(Span::styled(
                    format!("     {}", card.detail),
                    Style::default().fg(colors.text_muted()),
                )),
            ];

            let card_area = Rect::new(inner.x, inner.y + y_offset as u16, inner.width, 2);
            Paragraph::new(lines).render(card_area, buf);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(title: &str, checked: Option<bool>) -> Card {
        Card {
            title: title.to_string(),
            detail: "detail".to_string(),
            checked,
            highlighted: false,
        }
    }

    fn row_text(buf: &Buffer, y: u16) -> String {
        (0..buf.area.width).map(|x| buf[(x, y)].symbol()).collect()
    }

    #[test]
    fn test_renders_checkboxes_and_selection() {
        let theme = Theme::for_mode(crate::ui::theme::ThemeMode::Light);
        let list = CardList::new(
            "Lessons",
            vec![card("One", Some(true)), card("Two", Some(false))],
            &theme,
        )
        .selected(1);
        let area = Rect::new(0, 0, 30, 10);
        let mut buf = Buffer::empty(area);
        list.render(area, &mut buf);

        assert!(row_text(&buf, 1).contains("[✓] One"));
        let second = row_text(&buf, 4);
        assert!(second.contains('>'));
        assert!(second.contains("[ ] Two"));
    }

    #[test]
    fn test_scrolls_selected_card_into_view() {
        let theme = Theme::for_mode(crate::ui::theme::ThemeMode::Dark);
        let cards = (1..=10).map(|n| card(&format!("Card {n}"), None)).collect();
        let list = CardList::new("Lessons", cards, &theme).selected(9);
        let area = Rect::new(0, 0, 30, 8);
        let mut buf = Buffer::empty(area);
        list.render(area, &mut buf);

        let rendered: String = (0..8).map(|y| row_text(&buf, y)).collect();
        assert!(rendered.contains("Card 10"));
        assert!(!rendered.contains("Card 1 "));
    }
}
