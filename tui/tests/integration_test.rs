//! Integration Tests for the Terminal Host
//!
//! These tests drive the App the way the event loop does (keys, driver
//! events, frame ticks) and render through ratatui's `TestBackend`.
//!
//! # Test Coverage
//!
//! 1. **Startup**: Both mascots render with their default lines
//! 2. **Login Flow**: Password entry covers the eyes; a finished login
//!    changes mood and bubble
//! 3. **Isolation**: The chat mascot is unaffected by the login flow

use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use mascot_core::{HandCoverMode, MascotConfig, Mood};
use ratatui::backend::TestBackend;
use ratatui::Terminal;
use tokio::time::timeout;

use mascot_tui::mood_driver::{DriverEvent, LOGIN_LATENCY};
use mascot_tui::App;

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

fn type_text(app: &mut App, text: &str) {
    for c in text.chars() {
        app.handle_key(key(KeyCode::Char(c)));
    }
}

fn screen(app: &App) -> String {
    let mut terminal = Terminal::new(TestBackend::new(100, 40)).unwrap();
    terminal.draw(|frame| app.render(frame)).unwrap();
    terminal
        .backend()
        .buffer()
        .content
        .iter()
        .map(|cell| cell.symbol())
        .collect()
}

#[test]
fn startup_renders_both_mascots() {
    let app = App::new(&MascotConfig::default(), None);
    let text = screen(&app);

    // the username field starts focused
    assert!(text.contains("Đang nhập thông tin"));
    assert!(text.contains("Robot học tập"));
    assert!(text.contains("Đăng nhập"));
}

#[tokio::test(start_paused = true)]
async fn password_entry_covers_login_eyes() {
    let mut app = App::new(&MascotConfig::default(), None);

    type_text(&mut app, "minh");
    assert_eq!(app.login_mascot().state().mood, Mood::Typing);

    app.handle_key(key(KeyCode::Tab));
    type_text(&mut app, "abc");

    let login = app.login_mascot().state();
    assert_eq!(login.mood, Mood::Peek);
    assert!(login.covering_eyes);
    assert_eq!(login.hand_cover_mode, HandCoverMode::Two);
    assert_eq!(app.chat_mascot().state().hand_cover_mode, HandCoverMode::None);

    app.tick(Duration::from_millis(100));
    assert!(screen(&app).contains("Xin chào! 👋"));
}

#[tokio::test(start_paused = true)]
async fn failed_login_turns_sad() {
    let mut app = App::new(&MascotConfig::default(), None);

    type_text(&mut app, "minh");
    app.handle_key(key(KeyCode::Tab));
    type_text(&mut app, "abc");
    app.handle_key(key(KeyCode::Enter));
    assert!(screen(&app).contains("Đang kiểm tra"));

    let event = timeout(Duration::from_secs(5), app.next_driver_event())
        .await
        .unwrap()
        .unwrap();
    assert!(matches!(event, DriverEvent::LoginFinished { .. }));
    app.handle_driver_event(event);

    let login = app.login_mascot().state();
    assert_eq!(login.mood, Mood::Sad);
    assert!(!login.covering_eyes);
    let text = screen(&app);
    assert!(text.contains("Ôi không, thử lại nhé!"));
    assert!(text.contains("Sai tên đăng nhập"));
}

#[tokio::test(start_paused = true)]
async fn successful_login_celebrates() {
    let mut app = App::new(&MascotConfig::default(), None);

    type_text(&mut app, "minh");
    app.handle_key(key(KeyCode::Tab));
    type_text(&mut app, "secret-pass");
    app.handle_key(key(KeyCode::Enter));

    let event = timeout(LOGIN_LATENCY * 2, app.next_driver_event())
        .await
        .unwrap()
        .unwrap();
    app.handle_driver_event(event);

    let login = app.login_mascot();
    assert_eq!(login.state().mood, Mood::Happy);
    assert_eq!(login.state().hand_cover_mode, HandCoverMode::None);
    assert!(screen(&app).contains("Đăng nhập thành công"));
}

#[tokio::test(start_paused = true)]
async fn chat_controls_do_not_touch_login() {
    let mut app = App::new(&MascotConfig::default(), None);

    // Username -> Password -> Chat
    app.handle_key(key(KeyCode::Tab));
    app.handle_key(key(KeyCode::Tab));

    app.handle_key(key(KeyCode::Char('m')));
    app.handle_key(key(KeyCode::Char('c')));

    assert_eq!(app.chat_mascot().state().mood, Mood::Peek);
    assert_eq!(app.chat_mascot().state().hand_cover_mode, HandCoverMode::Two);
    assert_eq!(app.login_mascot().generation(), 2);
}
