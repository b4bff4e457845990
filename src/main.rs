//! Scroll through a sequence of scenes in the terminal.
//!
//! The mouse wheel and scroll keys move a virtual document; the timeline
//! turns its scroll position into a smoothed progress, an active scene and
//! a per-scene fade/drift animation.

use std::io::{self, stderr};
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::Rect,
    widgets::{Block, Borders},
    Frame, Terminal,
};
use tokio::sync::mpsc::UnboundedReceiver;

use scroll_scenes::app::{
    document::ScrollDocument,
    event::{AppEvent, EventSources},
    handler,
    state::AppState,
};
use scroll_scenes::config::AppConfig;
use scroll_scenes::core::scene::{ElementId, SceneList};
use scroll_scenes::core::timeline::ScrollTimeline;
use scroll_scenes::ui::{
    layout::AppLayout,
    scene_view::SceneView,
    stage::TerminalStage,
    status::{ProgressLine, SettleIndicator, StatusBar},
    theme::Theme,
};

// ───────────────────────────────────────── CLI ───────────────

#[derive(Parser, Debug)]
#[command(name = env!("CARGO_PKG_NAME"), about = "Scroll-linked scene timeline")]
struct Cli {
    /// TOML file of `[[scene]]` tables (defaults to a built-in demo).
    #[arg(long)]
    scenes: Option<PathBuf>,

    /// Smoothing factor in (0, 1]; overrides the config file.
    #[arg(long)]
    lerp: Option<f64>,

    /// Disable the boundary snap.
    #[arg(long)]
    no_snap: bool,

    /// Sample every scroll event instead of throttling.
    #[arg(long)]
    no_throttle: bool,

    /// Frames per second of the update loop.
    #[arg(long, default_value_t = 60)]
    fps: u32,

    /// Viewport heights of scrolling per scene.
    #[arg(long, default_value_t = 3.0)]
    screens_per_scene: f64,

    /// Write logs here instead of stderr.
    #[arg(long)]
    log_file: Option<PathBuf>,
}

// ───────────────────────────────────────── main ─────────────

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_file.as_ref())?;

    // ── inputs ────────────────────────────────────────────────
    let scenes = match &cli.scenes {
        Some(path) => SceneList::load(path)?,
        None => SceneList::demo(),
    };
    let mut config = AppConfig::load();
    if let Some(lerp) = cli.lerp {
        config.timeline.lerp_factor = lerp;
    }
    if cli.no_snap {
        config.timeline.snap_enabled = false;
    }
    if cli.no_throttle {
        config.timeline.throttle_ms = 0;
    }

    // ── timeline ──────────────────────────────────────────────
    // The container is the terminal viewport; without a size there is
    // nothing to scroll and the timeline stays inactive.
    let container = crossterm::terminal::size().ok().map(|(w, h)| {
        let rows = AppLayout::viewport_rows(Rect::new(0, 0, w, h));
        ScrollDocument::new(scenes.len(), rows, cli.screens_per_scene)
    });
    let timeline = ScrollTimeline::activate(
        scenes,
        config.timeline.clone(),
        container,
        TerminalStage::new(),
    )
    .context("cannot start scene timeline")?;
    let mut state = AppState::new(timeline, config);

    // ── terminal setup ────────────────────────────────────────
    enable_raw_mode()?;
    let mut stderr_handle = stderr();
    execute!(stderr_handle, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stderr());
    let mut terminal = Terminal::new(backend)?;

    let frame_period = Duration::from_secs_f64(1.0 / f64::from(cli.fps.max(1)));
    let mut sources = EventSources::spawn(frame_period, state.timeline.frame_token());

    let result = run(&mut terminal, &mut state, &mut sources.events).await;

    // ── teardown ──────────────────────────────────────────────
    state.timeline.teardown();
    sources.shutdown().await;
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

fn init_tracing(log_file: Option<&PathBuf>) -> Result<()> {
    let filter = tracing_subscriber::EnvFilter::from_default_env();
    match log_file {
        Some(path) => {
            let file = std::fs::File::create(path)
                .with_context(|| format!("cannot create log file {}", path.display()))?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
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

// ───────────────────────────────────────── event loop ───────

async fn run(
    terminal: &mut Terminal<CrosstermBackend<io::Stderr>>,
    state: &mut AppState,
    events: &mut UnboundedReceiver<AppEvent>,
) -> Result<()> {
    loop {
        // ── draw first ─────────────────────────────────────────
        // The draw renders the active scene's elements; only then can a
        // pending transition bind its animation to them.
        terminal.draw(|frame| draw(frame, state))?;

        let outcome = state.timeline.settle();
        state.record_transition(outcome);

        let Some(event) = events.recv().await else {
            break;
        };
        let now = Instant::now();
        match event {
            AppEvent::Frame => {
                let report = state.timeline.tick(now);
                state.record_tick(report);
            }
            AppEvent::Key(k) => handler::handle_key(state, k, now),
            AppEvent::Mouse(m) => handler::handle_mouse(state, m, now),
            AppEvent::Resize(w, h) => {
                let rows = AppLayout::viewport_rows(Rect::new(0, 0, w, h));
                handler::handle_resize(state, rows, now);
            }
        }

        if state.should_quit {
            break;
        }
    }
    Ok(())
}

fn draw(frame: &mut Frame, state: &mut AppState) {
    let layout = AppLayout::from_area(frame.area());
    let timeline = &state.timeline;
    let index = timeline.active_index();

    let block = Block::default()
        .title(format!(" {}/{} ", index + 1, timeline.scene_count()))
        .title_style(Theme::title_style())
        .borders(Borders::ALL)
        .border_style(Theme::border_style());

    let scene = SceneView::new(timeline.current_header(), timeline.current_paragraph())
        .style(timeline.current_style())
        .frame(timeline.live_animation().map(|a| a.frame()))
        .drift(timeline.backend().has_hint(ElementId::header(index)))
        .block(block);
    frame.render_widget(scene, layout.scene_area);

    frame.render_widget(
        SettleIndicator {
            visible: timeline.is_settling(),
            tick: state.frame_count,
        },
        layout.scene_area,
    );
    frame.render_widget(
        ProgressLine {
            progress: timeline.displayed_progress(),
            scenes: timeline.scene_count(),
        },
        layout.progress_area,
    );

    let hint = state.config.status_bar_hint();
    frame.render_widget(
        StatusBar {
            progress: timeline.displayed_progress(),
            scene: index,
            scenes: timeline.scene_count(),
            hint: &hint,
            message: state.status_message.as_deref(),
        },
        layout.status_area,
    );

    state.timeline.backend_mut().present(index);
}
