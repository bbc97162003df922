//! Mascot TUI Entry Point
//!
//! Launches the terminal host with the login and chat mascots.
//!
//! Usage:
//!   mascot-tui
//!
//! Environment:
//!   RUST_LOG           log filter (logs go to the state directory, not the terminal)
//!   MASCOT_*           configuration overrides, see `config`
//!   MASCOT_CHAT_PROPS  JSON props for the chat mascot, e.g. `{"mood":"happy","bubbleText":null}`

use std::fs::{self, File};
use std::io;
use std::panic;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use mascot_core::MascotProps;
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use mascot_tui::config::load_config;
use mascot_tui::App;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();

    // Check if we have a TTY before attempting initialization
    use std::io::IsTerminal;

    if !io::stdin().is_terminal() || !io::stdout().is_terminal() {
        eprintln!("Error: mascot-tui requires a terminal (TTY)");
        eprintln!();
        eprintln!("This usually means stdin/stdout are piped or the session has no TTY");
        eprintln!("(CI, containers, or SSH without -t).");
        std::process::exit(1);
    }

    let loaded = load_config()?;
    info!(source = %loaded.source, "Configuration loaded");
    let chat_props = chat_props_from_env();

    // Set up panic hook to restore terminal
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    // Initialize terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let mut app = App::new(&loaded.config, chat_props);
    let result = app.run(&mut terminal).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

/// Log to a file so the alternate screen stays clean
fn init_logging() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("mascot_tui=info,mascot_core=info"));

    let Some(file) = log_path().and_then(|path| open_log(&path)) else {
        // Nowhere to write; stay silent rather than draw over the UI
        return;
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
        .with(filter)
        .init();
}

fn log_path() -> Option<PathBuf> {
    dirs::state_dir()
        .or_else(dirs::cache_dir)
        .map(|dir| dir.join("mascot").join("mascot-tui.log"))
}

fn open_log(path: &Path) -> Option<File> {
    let parent = path.parent()?;
    fs::create_dir_all(parent).ok()?;
    File::options().create(true).append(true).open(path).ok()
}

fn chat_props_from_env() -> Option<MascotProps> {
    let raw = std::env::var("MASCOT_CHAT_PROPS").ok()?;
    match serde_json::from_str::<MascotProps>(&raw) {
        Ok(props) => Some(props),
        Err(e) => {
            warn!(error = %e, "Ignoring invalid MASCOT_CHAT_PROPS");
            None
        }
    }
}
