mod config;
mod context;
mod display;
mod domain;
mod engine;
mod events;
mod indicator;
mod input;
mod logging;
mod network;
mod prefs;
mod states;
mod ticker;
mod ui;

use anyhow::{Context as _, Result};
use clap::{Parser, Subcommand};
use context::Ctx;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use display::SharedDisplay;
use engine::Core;
use events::event_channel;
use indicator::SharedIndicator;
use input::InputEvent;
use network::{NetLink, NetworkGateway};
use prefs::{
    ensure_focusdial_dir, events_file, load_settings, log_file, settings_file, spool_file,
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

#[derive(Parser)]
#[command(name = "focusdial")]
#[command(about = "Control core of a one-button-plus-knob focus timer", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize the focusdial data directory
    Init,
    /// Validate a catalog payload and drop it into the inbound spool
    Ingest {
        /// Path to a JSON file with the task catalog payload
        file: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Init) => {
            let dir = ensure_focusdial_dir()?;
            println!("Initialized focusdial directory: {}", dir.display());
            println!();
            println!("Drop task catalogs with 'focusdial ingest <file>'.");
            println!("Run 'focusdial' to start the dial.");
            Ok(())
        }
        Some(Commands::Ingest { file }) => {
            // Boundary validation: malformed payloads never reach the core.
            let json = std::fs::read_to_string(&file)
                .with_context(|| format!("reading {}", file.display()))?;
            network::validate_inbound(&json)
                .with_context(|| format!("rejecting {}", file.display()))?;

            ensure_focusdial_dir()?;
            let spool = spool_file()?;
            prefs::atomic_write(&spool, &json)?;
            println!("Spooled catalog payload: {}", spool.display());
            Ok(())
        }
        None => run_tui(),
    }
}

fn run_tui() -> Result<()> {
    ensure_focusdial_dir()?;
    logging::init(&log_file()?)?;

    let settings_path = settings_file()?;
    let settings = load_settings(&settings_path)?;

    // Collaborators shared between the core (writers) and renderer (reader).
    let display = SharedDisplay::new();
    let indicator = SharedIndicator::new();
    let (sender, events_rx) = event_channel(config::EVENT_QUEUE_CAPACITY);
    let net = NetLink::new(settings.provisioned, sender);

    let ctx = Ctx::new(
        Box::new(display.clone()),
        Box::new(indicator.clone()),
        net.clone(),
        settings,
        Some(settings_path),
    );
    let core = Arc::new(Mutex::new(Core::new(ctx)));
    core.lock()
        .expect("core state lock poisoned")
        .start(Instant::now());

    // Inbound payloads go through the engine's lock; the gateway thread is
    // the asynchronous call site for catalog updates.
    let callback_core = Arc::clone(&core);
    let gateway = NetworkGateway::spawn(
        net,
        spool_file()?,
        events_file()?,
        events_rx,
        Arc::new(move |json: &str| {
            callback_core
                .lock()
                .expect("core state lock poisoned")
                .ingest_catalog(json);
        }),
        Duration::from_millis(500),
    );

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run app
    let result = run_app(&mut terminal, &core, &display, &indicator);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    gateway.stop();

    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    core: &Arc<Mutex<Core>>,
    display: &SharedDisplay,
    indicator: &SharedIndicator,
) -> Result<()> {
    let tick_rate = ticker::tick_duration();

    loop {
        // Render from the shared sinks; the core only writes them.
        let (effect, effect_set_at) = indicator.snapshot();
        let view = ui::ViewModel {
            frame: display.snapshot(),
            effect,
            effect_set_at,
            now: Instant::now(),
        };
        terminal.draw(|f| ui::render(f, &view))?;

        // Map keys onto the dial's two physical controls.
        if event::poll(tick_rate)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    if key.code == KeyCode::Char('q') {
                        let state = core.lock().expect("core state lock poisoned").current();
                        tracing::info!(?state, "operator quit");
                        return Ok(());
                    }
                    if let Some(event) = map_key(key.code) {
                        core.lock()
                            .expect("core state lock poisoned")
                            .ctx
                            .input
                            .push(event);
                    }
                }
            }
        }

        // One tick for the current state.
        core.lock()
            .expect("core state lock poisoned")
            .update(Instant::now());
    }
}

/// Keyboard stand-ins for the knob and button.
fn map_key(code: KeyCode) -> Option<InputEvent> {
    match code {
        KeyCode::Left | KeyCode::Down => Some(InputEvent::Rotate(-1)),
        KeyCode::Right | KeyCode::Up => Some(InputEvent::Rotate(1)),
        KeyCode::Char(' ') | KeyCode::Enter => Some(InputEvent::Click),
        KeyCode::Char('d') | KeyCode::Tab => Some(InputEvent::DoubleClick),
        KeyCode::Char('l') | KeyCode::Backspace => Some(InputEvent::LongPress),
        _ => None,
    }
}
