// Interactive console: stdin commands drive refresh and filters.
use crate::filter::ListingFilter;
use crate::render::render_page;
use crate::state::AppState;
use std::sync::Arc;
use std::time::Instant;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::{Mutex, Notify};
use tracing::{info, warn};

const HELP: &str = "📋 Available commands:\n\
    /refresh — reload listings\n\
    /search <text> — filter by title, description or address\n\
    /type <text> — filter by offer type (e.g. venta, alquiler)\n\
    /available on|off — only show available listings\n\
    /clear — reset all filters\n\
    /status — load status and uptime\n\
    /help — command list\n\
    /quit — exit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Refresh,
    Search(String),
    Type(String),
    Available(bool),
    Clear,
    Status,
    Help,
    Quit,
    Unknown(String),
}

/// `None` for blank input.
pub fn parse_command(line: &str) -> Option<Command> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }
    let (name, arg) = match line.split_once(char::is_whitespace) {
        Some((name, arg)) => (name, arg.trim()),
        None => (line, ""),
    };
    let command = match name {
        "/refresh" | "/r" => Command::Refresh,
        "/search" | "/q" => Command::Search(arg.to_string()),
        "/type" => Command::Type(arg.to_string()),
        "/available" => match arg {
            "on" | "yes" | "true" | "" => Command::Available(true),
            "off" | "no" | "false" => Command::Available(false),
            _ => Command::Unknown(line.to_string()),
        },
        "/clear" => Command::Clear,
        "/status" => Command::Status,
        "/help" => Command::Help,
        "/quit" | "/exit" => Command::Quit,
        _ => Command::Unknown(line.to_string()),
    };
    Some(command)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub text: String,
    pub quit: bool,
}

impl Reply {
    fn text(text: impl Into<String>) -> Self {
        Self { text: text.into(), quit: false }
    }
}

pub struct Console {
    pub state: Arc<Mutex<AppState>>,
    pub refresh_notify: Arc<Notify>,
    pub shutdown_notify: Arc<Notify>,
    pub start_time: Instant,
}

impl Console {
    pub fn new(state: Arc<Mutex<AppState>>, refresh_notify: Arc<Notify>, shutdown_notify: Arc<Notify>) -> Self {
        Self {
            state,
            refresh_notify,
            shutdown_notify,
            start_time: Instant::now(),
        }
    }

    async fn update_filter<F>(&self, change: F) -> Reply
    where
        F: FnOnce(&mut ListingFilter),
    {
        let mut state = self.state.lock().await;
        let mut filter = state.filter().clone();
        change(&mut filter);
        state.set_filter(filter);
        Reply::text(render_page(&state))
    }

    /// Handles a single command and returns what to print.
    pub async fn handle_command(&self, command: Command) -> Reply {
        info!("Handling command: {:?}", command);
        match command {
            Command::Refresh => {
                self.refresh_notify.notify_one();
                Reply::text("🔄 Refresh requested.")
            }
            Command::Search(text) => self.update_filter(|f| f.query = text).await,
            Command::Type(text) => self.update_filter(|f| f.offer_type = text).await,
            Command::Available(on) => self.update_filter(|f| f.only_available = on).await,
            Command::Clear => self.update_filter(|f| *f = ListingFilter::default()).await,
            Command::Status => {
                let state = self.state.lock().await;
                let uptime = self.start_time.elapsed().as_secs();
                let loaded = state
                    .loaded_at()
                    .map(|t| t.format("%Y-%m-%d %H:%M:%S UTC").to_string())
                    .unwrap_or_else(|| "never".into());
                Reply::text(format!(
                    "📊 {}\nListings held: {} | Last load: {} | Uptime: {:02}:{:02}:{:02}",
                    state.status(),
                    state.listings().len(),
                    loaded,
                    uptime / 3600,
                    (uptime % 3600) / 60,
                    uptime % 60
                ))
            }
            Command::Help => Reply::text(HELP),
            Command::Quit => {
                self.shutdown_notify.notify_one();
                Reply { text: "👋 Bye.".into(), quit: true }
            }
            Command::Unknown(_) => Reply::text("🤖 Unknown command. Type /help for a list of commands."),
        }
    }
}

/// Reads stdin line by line until EOF or `/quit`.
pub async fn listen_for_commands(console: &Console) {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        match lines.next_line().await {
            Ok(Some(line)) => {
                let Some(command) = parse_command(&line) else { continue };
                let reply = console.handle_command(command).await;
                println!("{}", reply.text);
                if reply.quit {
                    return;
                }
            }
            Ok(None) => {
                info!("stdin closed, console listener stops.");
                return;
            }
            Err(e) => {
                warn!("stdin read failed: {}", e);
                return;
            }
        }
    }
}

pub fn spawn_listener(console: Console) {
    tokio::spawn(async move {
        info!("▶️ Starting console listener...");
        listen_for_commands(&console).await;
        info!("🛑 Console listener ended.");
    });
}
