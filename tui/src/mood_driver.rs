//! Login Mood Driver
//!
//! Drives the login-panel mascot from form interaction: typing, peeking
//! while the password is entered, waving when the user returns to the form,
//! and celebrating or commiserating once the (simulated) login finishes.
//!
//! Timed effects run as scoped tokio tasks. Each one is tagged with a
//! generation; starting a new one aborts the previous task, dropping the
//! driver aborts everything still pending, and an event from an older
//! generation that slipped through is ignored.
//!
//! ```text
//!   form input ──▶ LoginMoodDriver ──▶ MascotProps (mood, coveringEyes, bubbleText)
//!                     │     ▲
//!         spawn_after │     │ DriverEvent (wave expired, login finished)
//!                     ▼     │
//!                  ScopedTask ──▶ mpsc
//! ```

use std::time::Duration;

use mascot_core::{BubbleText, MascotProps, Mood};
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;
use tokio::time::{sleep_until, Instant};
use tracing::debug;

/// How long a wave lasts
pub const WAVE_DURATION: Duration = Duration::from_millis(1800);

/// Simulated round trip of a login request
pub const LOGIN_LATENCY: Duration = Duration::from_millis(900);

/// Shortest password the simulated backend accepts
const MIN_PASSWORD_LEN: usize = 6;

/// A form field
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Field {
    /// Username input
    Username,
    /// Password input
    Password,
}

/// Results of timed effects, delivered back to the driver
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DriverEvent {
    /// A wave ran its course
    WaveExpired {
        /// Generation of the wave that expired
        generation: u64,
    },
    /// The simulated login request finished
    LoginFinished {
        /// Generation of the request
        generation: u64,
        /// Error message on failure
        result: Result<(), String>,
    },
}

/// At most one pending tokio task, aborted when replaced or dropped
#[derive(Debug, Default)]
struct ScopedTask {
    handle: Option<JoinHandle<()>>,
    generation: u64,
}

impl ScopedTask {
    /// Abort any pending task and send `event(generation)` after `after`
    fn spawn_after<F>(&mut self, after: Duration, tx: &UnboundedSender<DriverEvent>, event: F) -> u64
    where
        F: FnOnce(u64) -> DriverEvent + Send + 'static,
    {
        self.cancel();
        self.generation += 1;

        let generation = self.generation;
        let deadline = Instant::now() + after;
        let tx = tx.clone();
        self.handle = Some(tokio::spawn(async move {
            sleep_until(deadline).await;
            // receiver gone means the host is shutting down
            let _ = tx.send(event(generation));
        }));

        generation
    }

    fn cancel(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }

    fn is_pending(&self) -> bool {
        self.handle.is_some()
    }

    /// Accept an event for `generation`, clearing the pending task
    fn settle(&mut self, generation: u64) -> bool {
        if self.is_pending() && generation == self.generation {
            self.handle = None;
            true
        } else {
            false
        }
    }
}

impl Drop for ScopedTask {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// Maps login-form interaction onto the mascot's mood, gesture and bubble
#[derive(Debug)]
pub struct LoginMoodDriver {
    username: String,
    password: String,
    mood: Mood,
    waving: bool,
    loading: bool,
    error: Option<String>,
    wave: ScopedTask,
    login: ScopedTask,
    events: UnboundedSender<DriverEvent>,
}

impl LoginMoodDriver {
    /// New driver; timed effects report back on `events`
    pub fn new(events: UnboundedSender<DriverEvent>) -> Self {
        Self {
            username: String::new(),
            password: String::new(),
            mood: Mood::Idle,
            waving: false,
            loading: false,
            error: None,
            wave: ScopedTask::default(),
            login: ScopedTask::default(),
            events,
        }
    }

    fn set_mood(&mut self, mood: Mood) {
        if self.mood != mood {
            debug!(from = %self.mood, to = %mood, "Login mood changed");
            self.mood = mood;
        }
    }

    fn trigger_wave(&mut self) {
        let generation = self.wave.spawn_after(WAVE_DURATION, &self.events, |generation| {
            DriverEvent::WaveExpired { generation }
        });
        self.waving = true;
        debug!(generation, "Wave started");
    }

    fn stop_wave(&mut self) {
        self.wave.cancel();
        self.waving = false;
    }

    /// A field gained focus
    pub fn focus(&mut self, field: Field) {
        match field {
            Field::Username => {
                if !self.password.is_empty() {
                    self.trigger_wave();
                }
                self.set_mood(Mood::Typing);
            }
            Field::Password => {
                self.trigger_wave();
                self.set_mood(Mood::Peek);
            }
        }
    }

    /// A field lost focus
    pub fn blur(&mut self, _field: Field) {
        if self.username.is_empty() && self.password.is_empty() && self.error.is_none() {
            self.set_mood(Mood::Idle);
        }
    }

    /// A field's value changed
    pub fn input(&mut self, field: Field, value: &str) {
        match field {
            Field::Username => {
                self.username = value.to_string();
                if !value.is_empty() {
                    self.set_mood(Mood::Typing);
                    if !self.password.is_empty() {
                        self.trigger_wave();
                    }
                } else if self.password.is_empty() {
                    self.set_mood(Mood::Idle);
                }
            }
            Field::Password => {
                self.password = value.to_string();
                if !value.is_empty() {
                    self.trigger_wave();
                    self.set_mood(Mood::Peek);
                } else if self.username.is_empty() {
                    self.set_mood(Mood::Idle);
                }
            }
        }
    }

    /// Submit the form; the outcome arrives later as [`DriverEvent::LoginFinished`]
    ///
    /// Returns `false` without restarting anything while a request is in flight.
    pub fn submit(&mut self) -> bool {
        if self.loading {
            debug!("Login already in flight, ignoring submit");
            return false;
        }
        self.error = None;
        self.loading = true;
        self.set_mood(Mood::Typing);

        let result = check_credentials(&self.username, &self.password);
        let generation = self.login.spawn_after(LOGIN_LATENCY, &self.events, move |generation| {
            DriverEvent::LoginFinished { generation, result }
        });
        debug!(generation, "Login submitted");
        true
    }

    /// Feed back a timed effect; returns whether anything changed
    pub fn handle_event(&mut self, event: DriverEvent) -> bool {
        match event {
            DriverEvent::WaveExpired { generation } => {
                if !self.wave.settle(generation) {
                    debug!(generation, "Ignoring stale wave expiry");
                    return false;
                }
                self.waving = false;
                true
            }
            DriverEvent::LoginFinished { generation, result } => {
                if !self.login.settle(generation) {
                    debug!(generation, "Ignoring stale login result");
                    return false;
                }
                self.loading = false;
                match result {
                    Ok(()) => {
                        self.set_mood(Mood::Happy);
                        self.trigger_wave();
                    }
                    Err(message) => self.fail(message),
                }
                true
            }
        }
    }

    fn fail(&mut self, message: String) {
        debug!(%message, "Login failed");
        self.error = Some(message);
        self.set_mood(Mood::Sad);
        self.stop_wave();
    }

    /// Current mood
    #[must_use]
    pub fn mood(&self) -> Mood {
        self.mood
    }

    /// Whether a wave is in progress
    #[must_use]
    pub fn is_waving(&self) -> bool {
        self.waving
    }

    /// Whether a login request is in flight
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Last login error
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Current username
    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Current password
    #[must_use]
    pub fn password(&self) -> &str {
        &self.password
    }

    /// Bubble line for the current form state
    #[must_use]
    pub fn bubble_text(&self) -> &'static str {
        if self.error.is_some() {
            "Ôi không, thử lại nhé! 😢"
        } else if self.loading {
            "Đang kiểm tra... ⚡"
        } else if self.mood == Mood::Happy {
            "Tuyệt vời! Đăng nhập thành công! 🎉"
        } else if self.mood == Mood::Typing {
            "Đang nhập thông tin... 👀"
        } else if self.waving {
            "Xin chào! 👋"
        } else {
            "Chào bạn! Hãy điền thông tin để đăng nhập nhé!"
        }
    }

    /// `base` with mood, covering gesture and bubble taken from the form
    #[must_use]
    pub fn props(&self, base: &MascotProps) -> MascotProps {
        MascotProps {
            mood: self.mood,
            covering_eyes: self.mood == Mood::Peek,
            bubble_text: BubbleText::custom(self.bubble_text()),
            ..base.clone()
        }
    }
}

/// Stand-in for a real backend
fn check_credentials(username: &str, password: &str) -> Result<(), String> {
    if username.trim().is_empty() || password.is_empty() {
        Err("Vui lòng nhập đầy đủ thông tin".to_string())
    } else if password.chars().count() < MIN_PASSWORD_LEN {
        Err("Sai tên đăng nhập hoặc mật khẩu".to_string())
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver};

    fn driver() -> (LoginMoodDriver, UnboundedReceiver<DriverEvent>) {
        let (tx, rx) = unbounded_channel();
        (LoginMoodDriver::new(tx), rx)
    }

    #[tokio::test(start_paused = true)]
    async fn test_password_focus_peeks_and_waves() {
        let (mut d, _rx) = driver();

        d.focus(Field::Password);

        assert_eq!(d.mood(), Mood::Peek);
        assert!(d.is_waving());
        let props = d.props(&MascotProps::default());
        assert!(props.covering_eyes);
        assert_eq!(props.bubble_text, BubbleText::custom("Xin chào! 👋"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_wave_expires_after_duration() {
        let (mut d, mut rx) = driver();
        let start = Instant::now();

        d.focus(Field::Password);
        let event = rx.recv().await.unwrap();

        assert_eq!(start.elapsed(), WAVE_DURATION);
        assert!(d.handle_event(event));
        assert!(!d.is_waving());
    }

    #[tokio::test(start_paused = true)]
    async fn test_retrigger_restarts_wave() {
        let (mut d, mut rx) = driver();
        let start = Instant::now();

        d.focus(Field::Password);
        tokio::time::advance(Duration::from_millis(1000)).await;
        d.input(Field::Password, "s");

        let event = rx.recv().await.unwrap();
        assert_eq!(event, DriverEvent::WaveExpired { generation: 2 });
        assert_eq!(start.elapsed(), Duration::from_millis(2800));
    }

    #[tokio::test(start_paused = true)]
    async fn test_stale_expiry_ignored() {
        let (mut d, _rx) = driver();

        d.focus(Field::Password);
        d.input(Field::Password, "s");

        assert!(!d.handle_event(DriverEvent::WaveExpired { generation: 1 }));
        assert!(d.is_waving());
    }

    #[tokio::test(start_paused = true)]
    async fn test_teardown_cancels_pending_timers() {
        let (mut d, mut rx) = driver();

        d.focus(Field::Password);
        d.input(Field::Username, "minh");
        d.input(Field::Password, "secret-pass");
        d.submit();
        drop(d);

        // every sender is gone without a send: both tasks were aborted
        assert_eq!(rx.recv().await, None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_username_typing() {
        let (mut d, _rx) = driver();

        d.input(Field::Username, "m");
        assert_eq!(d.mood(), Mood::Typing);
        assert!(!d.is_waving());
        assert_eq!(d.bubble_text(), "Đang nhập thông tin... 👀");

        d.input(Field::Username, "");
        assert_eq!(d.mood(), Mood::Idle);
    }

    #[tokio::test(start_paused = true)]
    async fn test_username_with_password_waves() {
        let (mut d, _rx) = driver();

        d.input(Field::Password, "abc");
        d.stop_wave();
        d.focus(Field::Username);

        assert!(d.is_waving());
        assert_eq!(d.mood(), Mood::Typing);
    }

    #[tokio::test(start_paused = true)]
    async fn test_blur_with_empty_form_returns_to_idle() {
        let (mut d, _rx) = driver();

        d.focus(Field::Password);
        d.blur(Field::Password);

        assert_eq!(d.mood(), Mood::Idle);
        assert!(!d.props(&MascotProps::default()).covering_eyes);
    }

    #[tokio::test(start_paused = true)]
    async fn test_successful_login() {
        let (mut d, mut rx) = driver();

        d.input(Field::Username, "minh");
        d.input(Field::Password, "secret-pass");
        d.submit();
        assert!(d.is_loading());
        assert_eq!(d.mood(), Mood::Typing);
        assert_eq!(d.bubble_text(), "Đang kiểm tra... ⚡");

        // the login result lands before the password wave expires
        loop {
            let event = rx.recv().await.unwrap();
            let finished = matches!(event, DriverEvent::LoginFinished { .. });
            d.handle_event(event);
            if finished {
                break;
            }
        }

        assert!(!d.is_loading());
        assert_eq!(d.mood(), Mood::Happy);
        assert!(d.is_waving());
        assert_eq!(d.bubble_text(), "Tuyệt vời! Đăng nhập thành công! 🎉");
    }

    #[tokio::test(start_paused = true)]
    async fn test_submit_ignored_while_loading() {
        let (mut d, mut rx) = driver();
        let start = Instant::now();

        d.input(Field::Username, "minh");
        d.input(Field::Password, "secret-pass");
        assert!(d.submit());
        tokio::time::advance(Duration::from_millis(500)).await;
        assert!(!d.submit());

        let finished = loop {
            match rx.recv().await.unwrap() {
                event @ DriverEvent::LoginFinished { .. } => break event,
                event => {
                    d.handle_event(event);
                }
            }
        };

        assert_eq!(start.elapsed(), LOGIN_LATENCY);
        assert!(matches!(finished, DriverEvent::LoginFinished { generation: 1, .. }));
        assert!(d.handle_event(finished));
        assert!(!d.is_loading());
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_login() {
        let (mut d, mut rx) = driver();

        d.input(Field::Username, "minh");
        d.input(Field::Password, "abc");
        d.submit();

        loop {
            let event = rx.recv().await.unwrap();
            let finished = matches!(event, DriverEvent::LoginFinished { .. });
            d.handle_event(event);
            if finished {
                break;
            }
        }

        assert_eq!(d.mood(), Mood::Sad);
        assert!(!d.is_waving());
        assert_eq!(d.error(), Some("Sai tên đăng nhập hoặc mật khẩu"));
        assert_eq!(d.bubble_text(), "Ôi không, thử lại nhé! 😢");

        // the error keeps the mood on blur
        d.blur(Field::Password);
        assert_eq!(d.mood(), Mood::Sad);
    }
}
