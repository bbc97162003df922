//! Main Application
//!
//! The App hosts two mascot instances side by side:
//! - Login panel (lg): driven by a simulated login form through
//!   [`LoginMoodDriver`]
//! - Chat panel (md): driven directly from the keyboard, for trying out
//!   moods, the cover gesture and bubble overrides
//!
//! Each instance has its own id, style scope and animation clock.

use std::io;
use std::time::{Duration, Instant};

use crossterm::event::{Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use futures::StreamExt;
use mascot_core::{
    BubbleText, InstanceIds, Mascot, MascotConfig, MascotProps, MascotSize, Mood, Timelines,
};
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::{Frame, Terminal};
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver};
use tracing::{debug, info};

use crate::mood_driver::{DriverEvent, Field, LoginMoodDriver};
use crate::theme::{DIM_GRAY, ERROR_RED, FOCUS_BLUE};
use crate::widgets::MascotPanel;

/// Form area below the login mascot
const FORM_HEIGHT: u16 = 8;

/// Custom line the chat mascot cycles through
const CHAT_CUSTOM_LINE: &str = "Cùng học nào! 📚";

/// Which input has the keyboard
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Focus {
    /// A login form field
    Form(Field),
    /// The chat panel's mascot controls
    Chat,
}

impl Focus {
    fn next(self) -> Self {
        match self {
            Self::Form(Field::Username) => Self::Form(Field::Password),
            Self::Form(Field::Password) => Self::Chat,
            Self::Chat => Self::Form(Field::Username),
        }
    }
}

/// Main application state
pub struct App {
    /// Is the app still running?
    running: bool,
    /// Target frame interval
    frame_interval: Duration,

    // === Mascots ===
    login: Mascot,
    login_base: MascotProps,
    chat: Mascot,

    // === Login flow ===
    driver: LoginMoodDriver,
    driver_events: UnboundedReceiver<DriverEvent>,

    // === Input State ===
    focus: Focus,
    username: String,
    password: String,
}

impl App {
    /// Create the app from configuration
    ///
    /// `chat_props` overrides the chat mascot's initial props.
    pub fn new(config: &MascotConfig, chat_props: Option<MascotProps>) -> Self {
        let timelines = Timelines::new(config.timing);
        let mut ids = InstanceIds::new();

        let (tx, driver_events) = unbounded_channel();
        let mut driver = LoginMoodDriver::new(tx);
        driver.focus(Field::Username);

        let login_base = MascotProps {
            size: MascotSize::Lg,
            headline: Some("Đăng nhập".to_string()),
            subline: Some("Chào mừng bạn quay trở lại!".to_string()),
            ..MascotProps::with_defaults(&config.defaults)
        };
        let login = Mascot::new(ids.allocate(), driver.props(&login_base), timelines);

        let chat_props = chat_props.unwrap_or_else(|| MascotProps {
            size: MascotSize::Md,
            headline: Some("Robot học tập".to_string()),
            subline: Some("Tab để chọn, m/c/p/b/f để thử".to_string()),
            ..MascotProps::with_defaults(&config.defaults)
        });
        let chat = Mascot::new(ids.allocate(), chat_props, timelines);

        info!(
            login = %login.id(),
            chat = %chat.id(),
            fps = config.surface.fps,
            "Mascots created"
        );

        Self {
            running: true,
            frame_interval: Duration::from_secs(1) / config.surface.fps.max(1),
            login,
            login_base,
            chat,
            driver,
            driver_events,
            focus: Focus::Form(Field::Username),
            username: String::new(),
            password: String::new(),
        }
    }

    /// Main event loop
    pub async fn run(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    ) -> anyhow::Result<()> {
        let mut event_stream = EventStream::new();
        let mut ticker = tokio::time::interval(self.frame_interval);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
        let mut last_frame = Instant::now();

        // Render initial frame immediately so user sees UI
        terminal.draw(|frame| self.render(frame))?;

        while self.running {
            tokio::select! {
                biased;

                // Terminal events - highest priority
                maybe_event = event_stream.next() => {
                    match maybe_event {
                        Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => {
                            self.handle_key(key);
                        }
                        Some(Ok(_)) => {}
                        Some(Err(e)) => return Err(e.into()),
                        None => self.running = false,
                    }
                }

                // Timed effects of the login flow
                Some(event) = self.driver_events.recv() => {
                    self.handle_driver_event(event);
                }

                // Frame tick - advance clocks and render
                _ = ticker.tick() => {
                    let now = Instant::now();
                    self.tick(now.duration_since(last_frame));
                    last_frame = now;
                    terminal.draw(|frame| self.render(frame))?;
                }
            }
        }

        Ok(())
    }

    /// Whether the app should keep running
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Current keyboard focus
    #[must_use]
    pub fn focus(&self) -> Focus {
        self.focus
    }

    /// Login panel mascot
    #[must_use]
    pub fn login_mascot(&self) -> &Mascot {
        &self.login
    }

    /// Chat panel mascot
    #[must_use]
    pub fn chat_mascot(&self) -> &Mascot {
        &self.chat
    }

    /// Advance both mascot clocks
    pub fn tick(&mut self, delta: Duration) {
        self.login.tick(delta);
        self.chat.tick(delta);
    }

    /// Wait for the next timed effect of the login flow
    pub async fn next_driver_event(&mut self) -> Option<DriverEvent> {
        self.driver_events.recv().await
    }

    /// Feed back a timed effect of the login flow
    pub fn handle_driver_event(&mut self, event: DriverEvent) {
        if self.driver.handle_event(event) {
            self.sync_login();
        }
    }

    fn sync_login(&mut self) {
        let outcome = self.login.update(self.driver.props(&self.login_base));
        if outcome.remount.is_fresh() {
            debug!(render_key = %self.login.render_key(), "Login mascot remounted");
        }
    }

    /// Handle keyboard input
    pub fn handle_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => self.running = false,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.running = false;
            }
            KeyCode::Tab => self.move_focus(),
            _ => match self.focus {
                Focus::Form(field) => self.handle_form_key(field, key),
                Focus::Chat => self.handle_chat_key(key),
            },
        }
    }

    fn move_focus(&mut self) {
        if let Focus::Form(field) = self.focus {
            self.driver.blur(field);
        }
        self.focus = self.focus.next();
        if let Focus::Form(field) = self.focus {
            self.driver.focus(field);
        }
        self.sync_login();
    }

    fn handle_form_key(&mut self, field: Field, key: KeyEvent) {
        let value = match field {
            Field::Username => &mut self.username,
            Field::Password => &mut self.password,
        };

        match key.code {
            KeyCode::Enter => {
                if !self.driver.submit() {
                    return;
                }
            }
            KeyCode::Char(c) => {
                value.push(c);
                let value = value.clone();
                self.driver.input(field, &value);
            }
            KeyCode::Backspace => {
                value.pop();
                let value = value.clone();
                self.driver.input(field, &value);
            }
            _ => return,
        }

        self.sync_login();
    }

    fn handle_chat_key(&mut self, key: KeyEvent) {
        let mut props = self.chat.props().clone();

        match key.code {
            KeyCode::Char('m') => props.mood = next_mood(props.mood),
            KeyCode::Char('c') => props.covering_eyes = !props.covering_eyes,
            KeyCode::Char('p') => props.single_hand_peek = !props.single_hand_peek,
            KeyCode::Char('f') => props.floating = !props.floating,
            KeyCode::Char('b') => {
                props.bubble_text = match props.bubble_text {
                    BubbleText::MoodDefault => BubbleText::Suppressed,
                    BubbleText::Suppressed => BubbleText::custom(CHAT_CUSTOM_LINE),
                    BubbleText::Custom(_) => BubbleText::MoodDefault,
                };
            }
            _ => return,
        }

        self.chat.update(props);
    }

    /// Draw the whole screen
    pub fn render(&self, frame: &mut Frame) {
        let area = frame.area();
        let [main, status] =
            Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(area);
        let [login_area, chat_area] =
            Layout::horizontal([Constraint::Percentage(60), Constraint::Percentage(40)])
                .areas(main);

        self.render_login(frame, login_area);
        self.render_chat(frame, chat_area);

        let hint = Line::from(vec![
            Span::styled("Tab", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(" focus  "),
            Span::styled("Enter", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(" login  "),
            Span::styled("Esc", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(" quit"),
        ])
        .style(Style::default().fg(DIM_GRAY));
        frame.render_widget(Paragraph::new(hint), status);
    }

    fn render_login(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(DIM_GRAY))
            .title(" Đăng nhập ");
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let [mascot_area, form_area] =
            Layout::vertical([Constraint::Min(0), Constraint::Length(FORM_HEIGHT)]).areas(inner);
        frame.render_widget(MascotPanel::new(&self.login), mascot_area);

        let masked = "•".repeat(self.password.chars().count());
        let mut lines = vec![
            self.field_line("Tên đăng nhập", &self.username, Field::Username),
            Line::raw(""),
            self.field_line("Mật khẩu", &masked, Field::Password),
            Line::raw(""),
        ];
        if let Some(error) = self.driver.error() {
            lines.push(Line::styled(format!("😢 {error}"), Style::default().fg(ERROR_RED)));
        } else if self.driver.is_loading() {
            lines.push(Line::styled("Đang kiểm tra...", Style::default().fg(DIM_GRAY)));
        }
        frame.render_widget(Paragraph::new(lines), form_area);
    }

    fn field_line(&self, label: &str, value: &str, field: Field) -> Line<'static> {
        let focused = self.focus == Focus::Form(field);
        let style = if focused {
            Style::default().fg(FOCUS_BLUE).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(DIM_GRAY)
        };
        let cursor = if focused { "▏" } else { "" };
        Line::from(vec![
            Span::styled(format!("{label}: "), style),
            Span::raw(format!("{value}{cursor}")),
        ])
    }

    fn render_chat(&self, frame: &mut Frame, area: Rect) {
        let border = if self.focus == Focus::Chat {
            FOCUS_BLUE
        } else {
            DIM_GRAY
        };
        let state = self.chat.state();
        let title = format!(" {} · {} ", state.mood, self.chat.render_key());
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border))
            .title(title);
        let inner = block.inner(area);
        frame.render_widget(block, area);
        frame.render_widget(MascotPanel::new(&self.chat), inner);
    }
}

fn next_mood(mood: Mood) -> Mood {
    let idx = Mood::ALL.iter().position(|m| *m == mood).unwrap_or(0);
    Mood::ALL[(idx + 1) % Mood::ALL.len()]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mood_driver::LOGIN_LATENCY;
    use mascot_core::HandCoverMode;
    use pretty_assertions::assert_eq;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_next_mood_cycles() {
        assert_eq!(next_mood(Mood::Idle), Mood::Peek);
        assert_eq!(next_mood(Mood::Wave), Mood::Idle);
    }

    #[test]
    fn test_instances_get_distinct_ids() {
        let app = App::new(&MascotConfig::default(), None);
        assert_ne!(app.login_mascot().id(), app.chat_mascot().id());
        assert_eq!(app.chat_mascot().composition().scale, 0.75);
        assert_eq!(app.login_mascot().composition().scale, 1.0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_password_focus_covers_login_eyes_only() {
        let mut app = App::new(&MascotConfig::default(), None);

        app.handle_key(key(KeyCode::Tab));

        assert_eq!(app.focus(), Focus::Form(Field::Password));
        assert_eq!(app.login_mascot().state().hand_cover_mode, HandCoverMode::Two);
        assert_eq!(app.chat_mascot().state().hand_cover_mode, HandCoverMode::None);
    }

    #[test]
    fn test_initial_focus_reaches_login_mascot() {
        let app = App::new(&MascotConfig::default(), None);

        assert_eq!(app.focus(), Focus::Form(Field::Username));
        assert_eq!(app.login_mascot().state().mood, Mood::Typing);
        assert_eq!(
            app.login_mascot().view().bubble.as_deref(),
            Some("Đang nhập thông tin... 👀")
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_enter_while_loading_keeps_first_request() {
        let mut app = App::new(&MascotConfig::default(), None);
        let start = tokio::time::Instant::now();

        for c in "minh".chars() {
            app.handle_key(key(KeyCode::Char(c)));
        }
        app.handle_key(key(KeyCode::Tab));
        for c in "abc".chars() {
            app.handle_key(key(KeyCode::Char(c)));
        }
        app.handle_key(key(KeyCode::Enter));
        tokio::time::advance(Duration::from_millis(400)).await;
        app.handle_key(key(KeyCode::Enter));

        let event = loop {
            match app.next_driver_event().await {
                Some(event @ DriverEvent::LoginFinished { .. }) => break event,
                Some(event) => app.handle_driver_event(event),
                None => panic!("driver channel closed"),
            }
        };
        assert_eq!(start.elapsed(), LOGIN_LATENCY);
        app.handle_driver_event(event);
        assert_eq!(app.login_mascot().state().mood, Mood::Sad);
    }

    #[test]
    fn test_chat_keys() {
        let mut app = App::new(&MascotConfig::default(), None);
        app.focus = Focus::Chat;

        app.handle_key(key(KeyCode::Char('c')));
        app.handle_key(key(KeyCode::Char('p')));
        assert_eq!(app.chat_mascot().state().hand_cover_mode, HandCoverMode::One);

        app.handle_key(key(KeyCode::Char('b')));
        assert_eq!(app.chat_mascot().view().bubble, None);
        app.handle_key(key(KeyCode::Char('b')));
        assert_eq!(app.chat_mascot().view().bubble.as_deref(), Some(CHAT_CUSTOM_LINE));
    }

    #[test]
    fn test_escape_quits() {
        let mut app = App::new(&MascotConfig::default(), None);
        app.handle_key(key(KeyCode::Esc));
        assert!(!app.is_running());
    }
}
