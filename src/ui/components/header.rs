use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Widget};

use crate::ui::tabs::Tab;
use crate::ui::theme::{Theme, ThemeMode};

/// Title row plus tab strip. In compact mode only the tab strip is drawn.
pub struct Header<'a> {
    pub tabs: &'a [Tab],
    pub active: usize,
    pub fragment: &'a str,
    pub mode: ThemeMode,
    pub compact: bool,
    pub theme: &'a Theme,
}

impl Widget for Header<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;
        let bar = Style::default().bg(colors.header_bg());

        let mut tab_spans: Vec<Span> = vec![Span::styled(" ", bar)];
        for (i, tab) in self.tabs.iter().enumerate() {
            let style = if i == self.active {
                Style::default()
                    .fg(colors.bg())
                    .bg(colors.accent())
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(colors.header_fg()).bg(colors.header_bg())
            };
            tab_spans.push(Span::styled(format!(" [{}] {} ", i + 1, tab.label), style));
            tab_spans.push(Span::styled(" ", bar));
        }
        tab_spans.push(Span::styled(
            format!(" {} ", self.mode.toggle_icon()),
            Style::default().fg(colors.header_fg()).bg(colors.header_bg()),
        ));

        let mut lines = Vec::new();
        if !self.compact {
            lines.push(Line::from(vec![
                Span::styled(
                    " coursedeck ",
                    Style::default()
                        .fg(colors.header_fg())
                        .bg(colors.header_bg())
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(
                    format!(" HTML Course  {}", self.fragment),
                    Style::default().fg(colors.text_muted()).bg(colors.header_bg()),
                ),
            ]));
            lines.push(Line::from(""));
        }
        lines.push(Line::from(tab_spans));

        Paragraph::new(lines).style(bar).render(area, buf);
    }
}
