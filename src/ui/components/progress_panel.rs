use chrono::{DateTime, Local, Utc};
use ratatui::buffer::Buffer;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget, Wrap};

use crate::course::catalog;
use crate::course::progress::CourseProgress;
use crate::ui::components::progress_bar::ProgressBar;
use crate::ui::theme::Theme;

pub struct ProgressPanel<'a> {
    pub progress: &'a CourseProgress,
    pub theme: &'a Theme,
}

impl<'a> ProgressPanel<'a> {
    pub fn new(progress: &'a CourseProgress, theme: &'a Theme) -> Self {
        Self { progress, theme }
    }
}

fn format_timestamp(ts: Option<DateTime<Utc>>) -> String {
    ts.map(|t| t.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| "never".to_string())
}

impl Widget for ProgressPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let block = Block::bordered()
            .title(" Progress ")
            .border_style(Style::default().fg(colors.border()))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Length(4),
                Constraint::Min(0),
            ])
            .split(inner);

        ProgressBar::new("Course Progress", self.progress.ratio(), self.theme)
            .render(layout[0], buf);

        let label_style = Style::default().fg(colors.text_muted());
        let value_style = Style::default().fg(colors.fg());
        let stats = vec![
            Line::from(Span::styled(
                format!("  {}", self.progress.summary()),
                Style::default()
                    .fg(colors.accent())
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(vec![
                Span::styled("  Started:       ", label_style),
                Span::styled(format_timestamp(self.progress.start_date), value_style),
            ]),
            Line::from(vec![
                Span::styled("  Last accessed: ", label_style),
                Span::styled(format_timestamp(self.progress.last_accessed), value_style),
            ]),
        ];
        Paragraph::new(stats).render(layout[1], buf);

        let mut lines = vec![Line::from(Span::styled(
            "  Completed lessons",
            Style::default().fg(colors.fg()).add_modifier(Modifier::BOLD),
        ))];
        if self.progress.completed_lessons.is_empty() {
            lines.push(Line::from(Span::styled("    none yet", label_style)));
        }
        for n in &self.progress.completed_lessons {
            let title = catalog::find_lesson(*n).map(|l| l.title).unwrap_or("");
            lines.push(Line::from(vec![
                Span::styled("    ✓ ", Style::default().fg(colors.success())),
                Span::styled(format!("Lesson {n}: {title}"), value_style),
            ]));
        }
        Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .render(layout[2], buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::theme::ThemeMode;

    #[test]
    fn test_lists_completed_lessons_in_order() {
        let theme = Theme::for_mode(ThemeMode::Light);
        let mut progress = CourseProgress::default();
        progress.mark_complete(9);
        progress.mark_complete(2);
        let area = Rect::new(0, 0, 60, 16);
        let mut buf = Buffer::empty(area);
        ProgressPanel::new(&progress, &theme).render(area, &mut buf);

        let rows: Vec<String> = (0..16)
            .map(|y| (0..60).map(|x| buf[(x, y)].symbol()).collect())
            .collect();
        let second = rows.iter().position(|r| r.contains("Lesson 2: HTML Document Structure"));
        let ninth = rows.iter().position(|r| r.contains("Lesson 9: HTML5 Features"));
        assert!(second.is_some() && ninth.is_some());
        assert!(second < ninth);
        assert!(rows.iter().any(|r| r.contains("2 of 15 lessons completed (13%)")));
        assert!(rows.iter().any(|r| r.contains("never")));
    }
}
