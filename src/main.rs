//! Browse image directories as horizontal thumbnail strips.
//!
//! Each directory argument becomes one strip.  Stepping with the arrow keys
//! or the `◀`/`▶` buttons always lands on a whole card; the horizontal
//! wheel scrolls freely.

mod app;
mod config;
mod core;
mod error;
mod ui;

use std::fs::File;
use std::io::{self, stderr, Write};
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use anyhow::{bail, Result};
use clap::Parser;
use crossterm::{
    cursor::Show,
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, widgets::Paragraph, Frame, Terminal};
use tracing_subscriber::EnvFilter;

use crate::app::{
    event::{spawn_event_reader, AppEvent},
    handler,
    state::AppState,
    strip::Strip,
    thumb_runtime::{spawn_thumbnail_workers, ThumbUpdate},
};
use crate::config::{config_path, AppConfig};
use crate::core::scan::{scan_images, ScanConfig};
use crate::ui::{spinner::LoadingIndicator, strip_widget::StripWidget, theme::Theme};

/// One frame at 20 fps; also the idle tick driving scroll animations.
const FRAME: Duration = Duration::from_millis(50);

// ───────────────────────────────────────── CLI ───────────────

#[derive(Parser, Debug)]
#[command(name = env!("CARGO_PKG_NAME"), about = "Scrolling thumbnail strips for image directories")]
struct Cli {
    /// Directories to show, one strip each (defaults to `.`).
    #[arg(default_value = ".")]
    dirs: Vec<PathBuf>,

    /// Include hidden (dot) files.
    #[arg(long)]
    hidden: bool,

    /// How deep to look for images below each directory.
    #[arg(long, default_value_t = 1)]
    depth: usize,

    /// Margin (columns) left beside a card revealed by a step.
    #[arg(long)]
    pad: Option<f64>,

    /// Overhang (columns) still counted as fully visible.
    #[arg(long)]
    tolerance: Option<f64>,

    /// Thumbnail height in terminal rows.
    #[arg(long)]
    rows: Option<u16>,

    /// Print the resolved configuration and exit.
    #[arg(long = "print-config")]
    print_config: bool,

    /// Write logs here instead of stderr.
    #[arg(long = "log-file")]
    log_file: Option<PathBuf>,
}

impl Cli {
    fn apply_overrides(&self, config: &mut AppConfig) {
        if let Some(pad) = self.pad {
            config.tolerances.landing_pad = pad.max(0.0);
        }
        if let Some(tolerance) = self.tolerance {
            config.tolerances.tolerance = tolerance.max(0.0);
        }
        if let Some(rows) = self.rows {
            config.sizing.thumb_rows = rows.clamp(2, 40);
        }
    }
}

fn init_tracing(log_file: Option<&PathBuf>) -> Result<()> {
    // Silent unless RUST_LOG is set.
    let filter = EnvFilter::from_default_env();
    match log_file {
        Some(path) => {
            let file = File::create(path)?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .init();
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(io::stderr)
                .init();
        }
    }
    Ok(())
}

/// Scan every directory and build its strip.  Directories without images
/// are skipped; a path that is not a directory aborts startup.
fn discover_strips(cli: &Cli, config: &AppConfig) -> Result<Vec<Strip>> {
    let scan = ScanConfig {
        max_depth: cli.depth,
        show_hidden: cli.hidden,
        ..ScanConfig::default()
    };

    let mut strips = Vec::new();
    for dir in &cli.dirs {
        let dir = dir.canonicalize().unwrap_or_else(|_| dir.clone());
        let entries = scan_images(&dir, &scan)?;
        let count = entries.len();
        match Strip::new(dir.clone(), entries, config.sizing, config.scroll_speed) {
            Some(strip) => {
                tracing::info!(dir = %dir.display(), images = count, "strip ready");
                strips.push(strip);
            }
            None => tracing::warn!(dir = %dir.display(), "no images, skipped"),
        }
    }
    Ok(strips)
}

// ───────────────────────────────────────── main ─────────────

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_file.as_ref())?;

    let mut config = AppConfig::load();
    if !config_path().exists() {
        // Best effort: give the user a file to edit.
        let _ = config.save();
    }
    cli.apply_overrides(&mut config);

    if cli.print_config {
        print!("{}", config.serialise());
        return Ok(());
    }

    let strips = discover_strips(&cli, &config)?;
    if strips.is_empty() {
        bail!("no images found in {:?}", cli.dirs);
    }
    let mut state = AppState::new(strips, config);

    enable_raw_mode()?;
    let result = run_tui(&mut state).await;
    restore_terminal(result, &mut stderr())
}

/// Undo raw mode, the alternate screen and mouse capture whether or not the
/// session ended in an error; the session's own error wins.
fn restore_terminal(result: Result<()>, out: &mut impl Write) -> Result<()> {
    let disabled = disable_raw_mode();
    let left = execute!(out, LeaveAlternateScreen, DisableMouseCapture, Show);
    result?;
    disabled?;
    left?;
    Ok(())
}

/// The interactive session; runs with raw mode already enabled.
async fn run_tui(state: &mut AppState) -> Result<()> {
    // ── terminal setup ────────────────────────────────────────
    let mut stderr_handle = stderr();
    execute!(stderr_handle, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stderr());
    let mut terminal = Terminal::new(backend)?;
    let size = terminal.size()?;
    handler::handle_resize(state, size.width, size.height);

    // ── async channels ────────────────────────────────────────
    let mut events = spawn_event_reader(FRAME);
    let (thumb_tx, mut thumb_rx) = tokio::sync::mpsc::unbounded_channel::<ThumbUpdate>();
    let loader = spawn_thumbnail_workers(&state.strips, &thumb_tx);
    drop(thumb_tx);
    tracing::debug!(workers = loader.worker_count(), "thumbnail workers started");

    // ── event loop ────────────────────────────────────────────
    let mut last_frame = Instant::now();
    let result = loop {
        if let Err(e) = terminal.draw(|frame| draw(frame, state)) {
            break Err(e.into());
        }

        tokio::select! {
            biased;

            Some(event) = events.recv() => {
                match event {
                    AppEvent::Key(k) => handler::handle_key(state, k),
                    AppEvent::Mouse(m) => handler::handle_mouse(state, m),
                    AppEvent::Resize(w, h) => handler::handle_resize(state, w, h),
                    AppEvent::Tick => {}
                }
            }

            Some(update) = thumb_rx.recv() => {
                // Drain everything queued so a burst of thumbnails costs one frame.
                handler::handle_thumb_update(state, update);
                while let Ok(update) = thumb_rx.try_recv() {
                    handler::handle_thumb_update(state, update);
                }
            }

            else => break Ok(()),
        }

        // Animations advance on wall-clock frames, not per event.
        if last_frame.elapsed() >= FRAME {
            state.tick_animations();
            last_frame = Instant::now();
        }

        if state.should_quit {
            break Ok(());
        }
    };

    loader.request_cancel();
    result
}

fn draw(frame: &mut Frame, state: &AppState) {
    let layout = state.layout();

    for area in &layout.strips {
        let Some(strip) = state.strips.get(area.index) else {
            continue;
        };
        frame.render_widget(
            StripWidget {
                strip,
                area: *area,
                focused: area.index == state.focused,
                tolerance: state.config.tolerances.tolerance,
            },
            area.block,
        );
    }
    if layout.strips.is_empty() {
        frame.render_widget(
            Paragraph::new("terminal too small").style(Theme::placeholder_style()),
            layout.strips_area,
        );
    }

    let hint = state.config.status_bar_hint();
    let status_text = state.status_message.as_deref().unwrap_or(&hint);
    let status = Paragraph::new(status_text).style(Theme::status_bar_style());
    frame.render_widget(status, layout.status_area);
    frame.render_widget(
        LoadingIndicator {
            pending: state.pending_thumbs(),
            tick: state.tick,
        },
        layout.status_area,
    );
}
