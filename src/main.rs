use std::fs;
use std::io;
use std::path::Path;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use anyhow::Result;
use clap::Parser;
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Clear, Paragraph, Widget};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use coursedeck::analytics;
use coursedeck::app::App;
use coursedeck::config::Config;
use coursedeck::course::catalog::{ALL_LESSONS, ALL_PROJECTS, ALL_RESOURCES};
use coursedeck::event::{AppEvent, EventHandler};
use coursedeck::keymap::command_for_key;
use coursedeck::store::storage::{FileStorage, MemoryStorage, Storage};
use coursedeck::ui::components::card_list::{Card, CardList};
use coursedeck::ui::components::header::Header;
use coursedeck::ui::components::progress_bar::ProgressBar;
use coursedeck::ui::components::progress_panel::ProgressPanel;
use coursedeck::ui::components::search_popup::SearchPopup;
use coursedeck::ui::layout::{AppLayout, centered_rect, pack_hint_lines};
use coursedeck::ui::theme::ThemeMode;

#[derive(Parser)]
#[command(name = "coursedeck", version, about = "Terminal companion for the HTML course")]
struct Cli {
    #[arg(short, long, help = "Color theme (light, dark); saved as the new preference")]
    theme: Option<ThemeMode>,

    #[arg(short, long, help = "Storage key prefix")]
    namespace: Option<String>,

    #[arg(short, long, help = "Directory for saved progress and logs")]
    data_dir: Option<String>,

    #[arg(long, help = "Panel to open, e.g. 'progress' or '#progress'")]
    tab: Option<String>,
}

fn main() -> Result<()> {
    let started = Instant::now();
    let cli = Cli::parse();

    let mut config = Config::load().unwrap_or_else(|e| {
        eprintln!("Ignoring unreadable config: {e:#}");
        Config::default()
    });
    if let Some(namespace) = cli.namespace {
        config.namespace = namespace;
    }
    if let Some(dir) = cli.data_dir {
        config.data_dir = dir;
    }
    config.validate();

    let data_dir = config.data_path();
    if let Err(e) = init_logging(&data_dir) {
        eprintln!("Logging disabled: {e:#}");
    }

    let storage: Box<dyn Storage> = match FileStorage::open(&data_dir) {
        Ok(storage) => {
            info!(path = %storage.path().display(), "using file storage");
            Box::new(storage)
        }
        Err(e) => {
            warn!(error = %e, "falling back to in-memory storage; progress will not be saved");
            Box::new(MemoryStorage::new())
        }
    };

    let mut app = App::new(config, storage);
    if let Some(mode) = cli.theme {
        app.set_theme(mode);
    }
    if let Some(fragment) = cli.tab {
        app.restore_fragment(&fragment);
    }

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let events = EventHandler::new(Duration::from_millis(100));

    let load_ms = started.elapsed().as_millis().to_string();
    info!(load_ms = %load_ms, "course loaded");
    analytics::track_event("Performance", "Startup Time", Some(load_ms.as_str()));

    let result = run_app(&mut terminal, &mut app, &events);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = result {
        analytics::track_event("Error", "Runtime Error", Some(err.to_string().as_str()));
        eprintln!("Error: {err:?}");
    }

    Ok(())
}

fn init_logging(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir)?;
    let file = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(dir.join("coursedeck.log"))?;
    let filter =
        EnvFilter::try_from_env("COURSEDECK_LOG").unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    events: &EventHandler,
) -> Result<()> {
    loop {
        terminal.draw(|frame| render(frame, app))?;

        match events.next()? {
            AppEvent::Key(key) => {
                if let Some(command) = command_for_key(key, app.search_open) {
                    app.dispatch(command);
                }
            }
            AppEvent::Tick => app.dispatch(coursedeck::app::Command::Tick),
            AppEvent::Resize => {}
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn render(frame: &mut ratatui::Frame, app: &App) {
    let area = frame.area();
    let colors = &app.theme.colors;
    let now = Instant::now();

    let bg = Block::default().style(Style::default().bg(colors.bg()));
    frame.render_widget(bg, area);

    let hints = [
        "[1-4] Panels",
        "[←/→] Move",
        "[Enter] Open",
        "[Space] Complete",
        "[/] Search",
        "[t] Theme",
        "[q] Quit",
    ];
    let hint_lines = pack_hint_lines(&hints, area.width as usize);
    let layout = AppLayout::new(area, app.header_compact(), hint_lines.len() as u16 + 1);

    let header = Header {
        tabs: app.tabs.tabs(),
        active: app.tabs.active_index(),
        fragment: app.tabs.fragment(),
        mode: app.theme_mode,
        compact: app.header_compact(),
        theme: &app.theme,
    };
    frame.render_widget(header, layout.header);

    match app.tabs.active_id() {
        "lessons" => {
            let cards = ALL_LESSONS
                .iter()
                .map(|lesson| Card {
                    title: format!("Lesson {}: {}", lesson.number, lesson.title),
                    detail: lesson.topics.join(" · "),
                    checked: Some(app.progress.is_complete(lesson.number)),
                    highlighted: app.highlighted_lesson() == Some(lesson.number),
                })
                .collect();
            let list = CardList::new("Lessons", cards, &app.theme)
                .selected(app.selected)
                .reveal(app.reveal, now);
            frame.render_widget(list, layout.main);
        }
        "projects" => {
            let cards = ALL_PROJECTS
                .iter()
                .map(|project| {
                    let done = project
                        .lessons
                        .iter()
                        .filter(|n| app.progress.is_complete(**n))
                        .count();
                    Card {
                        title: format!("{} ({done}/{} lessons)", project.title, project.lessons.len()),
                        detail: project.description.to_string(),
                        checked: None,
                        highlighted: false,
                    }
                })
                .collect();
            let list = CardList::new("Projects", cards, &app.theme)
                .selected(app.selected)
                .reveal(app.reveal, now);
            frame.render_widget(list, layout.main);
        }
        "resources" => {
            let cards = ALL_RESOURCES
                .iter()
                .map(|resource| Card {
                    title: resource.category.to_string(),
                    detail: resource.entries.join(" · "),
                    checked: None,
                    highlighted: false,
                })
                .collect();
            let list = CardList::new("Resources", cards, &app.theme)
                .selected(app.selected)
                .reveal(app.reveal, now);
            frame.render_widget(list, layout.main);
        }
        _ => {
            frame.render_widget(ProgressPanel::new(&app.progress, &app.theme), layout.main);
        }
    }

    render_footer(frame, app, &hint_lines, layout.footer);

    if app.search_open {
        let outcome = app.search_outcome();
        let popup_area = centered_rect(60, 60, 50, 12, area);
        frame.render_widget(SearchPopup::new(
                &app.search,
                &outcome,
                app.config.search_min_chars,
                &app.theme,
            ), popup_area);
    }

    if let Some(ref notice) = app.notice {
        let width = (notice.value.chars().count() as u16 + 6).min(area.width);
        let notice_area = centered_rect(0, 0, width, 3, area);
        frame.render_widget(Clear, notice_area);
        let block = Block::bordered()
            .border_style(Style::default().fg(colors.success()))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(notice_area);
        frame.render_widget(block, notice_area);
        let text = Paragraph::new(Line::from(Span::styled(
            notice.value.as_str(),
            Style::default()
                .fg(colors.success())
                .add_modifier(Modifier::BOLD),
        )))
        .alignment(ratatui::layout::Alignment::Center);
        frame.render_widget(text, inner);
    }
}

fn render_footer(
    frame: &mut ratatui::Frame,
    app: &App,
    hint_lines: &[String],
    area: ratatui::layout::Rect,
) {
    let colors = &app.theme.colors;
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(0)])
        .split(area);

    let summary = format!(" {} ", app.progress.summary());
    let progress_row = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(summary.chars().count() as u16),
            Constraint::Min(0),
        ])
        .split(rows[0]);
    Paragraph::new(Span::styled(summary, Style::default().fg(colors.text_muted())))
        .render(progress_row[0], frame.buffer_mut());
    ProgressBar::mini(app.progress.ratio(), &app.theme)
        .render(progress_row[1], frame.buffer_mut());

    let lines: Vec<Line> = hint_lines
        .iter()
        .map(|line| Line::from(Span::styled(line.as_str(), Style::default().fg(colors.text_muted()))))
        .collect();
    Paragraph::new(lines).render(rows[1], frame.buffer_mut());
}
