use std::io;
use std::time::{Duration, Instant};

use arboard::Clipboard;
use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

use crate::config::Config;
use crate::logging;
use crate::session::Session;
use crate::ui::{sidebar, toc::TocWindow};

/// Transient footer messages disappear after this long.
const MESSAGE_EXPIRY: Duration = Duration::from_millis(2000);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageType {
    Info,
    Error,
}

/// Full-screen course reader: sidebar on the left, the current section on
/// the right, slide controls in the footer.
pub struct Reader {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
    session: Session,
    config: Config,
    toc: TocWindow,
    scroll: u16,
    message: Option<String>,
    message_type: MessageType,
    message_time: Option<Instant>,
    should_quit: bool,
}

impl Reader {
    pub fn new(session: Session, config: Config) -> eyre::Result<Self> {
        let backend = CrosstermBackend::new(io::stdout());
        let terminal = Terminal::new(backend)?;

        Ok(Self {
            terminal,
            session,
            config,
            toc: TocWindow::new(),
            scroll: 0,
            message: None,
            message_type: MessageType::Info,
            message_time: None,
            should_quit: false,
        })
    }

    /// Run the main application loop
    pub fn run(&mut self) -> eyre::Result<()> {
        crossterm::terminal::enable_raw_mode()?;
        crossterm::execute!(io::stdout(), crossterm::terminal::EnterAlternateScreen)?;

        self.terminal.clear()?;
        self.terminal.hide_cursor()?;

        loop {
            if self.should_quit {
                break;
            }

            // Auto-clear expired messages before rendering
            if self.message_expired() {
                self.clear_message();
            }

            {
                let session = &self.session;
                let config = &self.config;
                let toc = &self.toc;
                let scroll = self.scroll;
                let message = self.message.clone();
                let message_type = self.message_type;
                self.terminal.draw(|f| {
                    render_static(f, session, config, toc, scroll);
                    if let Some(msg) = &message {
                        render_message_static(f, msg, message_type);
                    }
                })?;
            }

            // Poll with timeout so we re-render when a message expires.
            let poll_timeout = match self.message_time {
                Some(t) => {
                    let elapsed = t.elapsed();
                    if elapsed < MESSAGE_EXPIRY {
                        MESSAGE_EXPIRY - elapsed
                    } else {
                        Duration::from_millis(100)
                    }
                }
                None => Duration::from_secs(60),
            };

            if !crossterm::event::poll(poll_timeout)? {
                continue;
            }

            if let Ok(event) = crossterm::event::read() {
                match event {
                    Event::Key(key) => {
                        if key.kind == KeyEventKind::Press {
                            self.handle_key_event(key);
                        }
                    }
                    Event::Resize(_, _) => {}
                    _ => {}
                }
            }
        }

        if let Err(err) = self.config.save() {
            logging::warn(format!("could not save configuration: {}", err));
        }

        self.terminal.clear()?;
        self.terminal.show_cursor()?;
        crossterm::execute!(io::stdout(), crossterm::terminal::LeaveAlternateScreen)?;
        crossterm::terminal::disable_raw_mode()?;

        Ok(())
    }

    fn set_message(&mut self, message: String, message_type: MessageType) {
        self.message = Some(message);
        self.message_type = message_type;
        self.message_time = Some(Instant::now());
    }

    fn clear_message(&mut self) {
        self.message = None;
        self.message_time = None;
    }

    fn message_expired(&self) -> bool {
        self.message_time
            .is_some_and(|t| t.elapsed() >= MESSAGE_EXPIRY)
    }

    /// Session failures surface as transient messages and never escape to
    /// `run`, so the terminal cleanup path always executes.
    fn handle_key_event(&mut self, key: KeyEvent) {
        if self.message.is_some() {
            self.clear_message();
        }

        if self.toc.visible {
            self.handle_toc_key(key);
            return;
        }

        if self.session.is_welcome() {
            self.handle_welcome_key(key);
            return;
        }

        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Right | KeyCode::Char('l') | KeyCode::Char(' ') => {
                let result = self.session.advance();
                if self.report_page_error(result) {
                    self.scroll = 0;
                }
            }
            KeyCode::Left | KeyCode::Char('h') => {
                let result = self.session.retreat();
                if self.report_page_error(result) {
                    self.scroll = 0;
                }
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.scroll = self.scroll.saturating_add(1);
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.scroll = self.scroll.saturating_sub(1);
            }
            KeyCode::Char('t') => {
                self.toc.set_entries(self.session.toc());
                self.toc.toggle();
            }
            KeyCode::Char('c') => self.copy_current_section(),
            KeyCode::Char('e') => {
                let page = self.session.page_id().to_string();
                if !page.is_empty() {
                    self.session.nav_mut().toggle_expanded(&page, true);
                }
            }
            KeyCode::Char('+') => self.config.settings.enlarge(),
            KeyCode::Char('-') => self.config.settings.shrink(),
            KeyCode::Char('s') => {
                self.config.settings.show_progress_indicator =
                    !self.config.settings.show_progress_indicator;
            }
            KeyCode::Char('D') => {
                self.config.settings.dark_mode = !self.config.settings.dark_mode;
            }
            _ => {}
        }
    }

    fn handle_welcome_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Enter => {
                if let Some(first) = self.session.first_part_id() {
                    let result = self.session.open(&first);
                    if self.report_page_error(result) {
                        self.scroll = 0;
                    }
                }
            }
            KeyCode::Char('r') => {
                let target = self.session.resume_target().map(|p| p.full_id.clone());
                if let Some(id) = target {
                    let result = self.session.open(&id);
                    if self.report_page_error(result) {
                        self.scroll = 0;
                    }
                }
            }
            _ => {}
        }
    }

    fn handle_toc_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Down | KeyCode::Char('j') => self.toc.next_entry(),
            KeyCode::Up | KeyCode::Char('k') => self.toc.previous_entry(),
            _ => self.toc.toggle(),
        }
    }

    /// True when the operation succeeded; a failure is logged and shown as
    /// a transient error message. The session is untouched on failure, so
    /// the page keeps working.
    fn report_page_error(&mut self, result: eyre::Result<()>) -> bool {
        match result {
            Ok(()) => true,
            Err(err) => {
                logging::warn(format!("page navigation failed: {}", err));
                self.set_message("Could not open page".to_string(), MessageType::Error);
                false
            }
        }
    }

    fn copy_current_section(&mut self) {
        let Some(section) = self.session.current_section().map(|s| s.to_string()) else {
            return;
        };
        match Clipboard::new().and_then(|mut clipboard| clipboard.set_text(section)) {
            Ok(()) => self.set_message("Copied".to_string(), MessageType::Info),
            Err(err) => {
                logging::warn(format!("clipboard write failed: {}", err));
                self.set_message("Copy failed".to_string(), MessageType::Error);
            }
        }
    }
}

fn render_static(
    frame: &mut Frame,
    session: &Session,
    config: &Config,
    toc: &TocWindow,
    scroll: u16,
) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(28), Constraint::Percentage(72)])
        .split(frame.area());

    let tree = session.sidebar_tree();
    sidebar::render(frame, chunks[0], tree.as_ref());

    if session.is_welcome() {
        render_welcome_static(frame, chunks[1], session);
    } else {
        render_page_static(frame, chunks[1], session, config, scroll);
    }

    let full_area = frame.area();
    toc.render(frame, full_area);
}

fn render_welcome_static(frame: &mut Frame, area: Rect, session: &Session) {
    let title = session
        .outline()
        .map(|o| o.course_title().to_string())
        .unwrap_or_else(|| "Course".to_string());

    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            title,
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from("Press Enter to start from the beginning"),
    ];
    if let Some(part) = session.resume_target() {
        lines.push(Line::from(format!(
            "Press r to continue with {}",
            crate::segment::simplify_title(&part.title)
        )));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "q quits",
        Style::default().fg(Color::DarkGray),
    )));

    let paragraph = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL))
        .alignment(ratatui::layout::Alignment::Center);
    frame.render_widget(paragraph, area);
}

fn render_page_static(
    frame: &mut Frame,
    area: Rect,
    session: &Session,
    config: &Config,
    scroll: u16,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(3),
        ])
        .split(area);

    let header = session.page_title().unwrap_or_default();
    frame.render_widget(
        Paragraph::new(Span::styled(
            header,
            Style::default().add_modifier(Modifier::BOLD),
        ))
        .block(Block::default().borders(Borders::ALL)),
        chunks[0],
    );

    let body_style = if config.settings.dark_mode {
        Style::default().fg(Color::White)
    } else {
        Style::default().fg(Color::Black)
    };
    let text = session.current_section().unwrap_or_default();
    let width = text_width(&config.settings, chunks[1].width);
    let wrapped: Vec<Line> = textwrap::wrap(text, width)
        .into_iter()
        .map(|cow| Line::from(cow.into_owned()))
        .collect();
    frame.render_widget(
        Paragraph::new(wrapped)
            .style(body_style)
            .block(Block::default().borders(Borders::ALL))
            .scroll((scroll, 0)),
        chunks[1],
    );

    render_footer_static(frame, chunks[2], session, config);
}

fn render_footer_static(frame: &mut Frame, area: Rect, session: &Session, config: &Config) {
    let trail: Vec<String> = session
        .breadcrumb()
        .iter()
        .map(|crumb| crumb.label.clone())
        .collect();

    let dim = Style::default().fg(Color::DarkGray);
    let control = |label: &str, enabled: bool| {
        if enabled {
            Span::raw(label.to_string())
        } else {
            Span::styled(label.to_string(), dim)
        }
    };

    let mut spans = vec![
        control("‹", !session.at_first_section()),
        Span::raw(" "),
        Span::raw(trail.join(" › ")),
        Span::raw(" "),
        control("›", !session.at_last_section()),
    ];

    if config.settings.show_progress_indicator {
        let total = session.sections().len().max(1);
        spans.push(Span::raw("   "));
        if total > 1 {
            let dots: String = (0..total)
                .map(|i| if i == session.cursor() { '●' } else { '○' })
                .collect();
            spans.push(Span::styled(format!("{}  ", dots), dim));
        }
        spans.push(Span::styled(session.indicator(), dim));
    }

    frame.render_widget(
        Paragraph::new(Line::from(spans)).block(Block::default().borders(Borders::ALL)),
        area,
    );
}

fn render_message_static(frame: &mut Frame, message: &str, message_type: MessageType) {
    let color = match message_type {
        MessageType::Info => Color::Blue,
        MessageType::Error => Color::Red,
    };

    let message_paragraph = Paragraph::new(message)
        .style(Style::default().fg(color))
        .block(Block::default().borders(Borders::ALL))
        .wrap(Wrap { trim: true });

    let frame_area = frame.area();
    let area = Rect {
        x: frame_area.x + 2,
        y: frame_area.y + 2,
        width: frame_area.width.saturating_sub(4),
        height: 3,
    };

    frame.render_widget(Clear, area);
    frame.render_widget(message_paragraph, area);
}

/// Wrap column for the body text. A larger scale narrows the column so the
/// text reads larger relative to the pane.
fn text_width(settings: &crate::settings::Settings, pane_width: u16) -> usize {
    let base = settings
        .text_width
        .unwrap_or_else(|| (pane_width as usize).saturating_sub(4));
    let scaled = (base as f64 / settings.text_scale) as usize;
    let max = (pane_width.saturating_sub(2) as usize).max(20);
    scaled.clamp(20, max)
}
