use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{bail, Result};
use clap::{Parser, ValueEnum};
use crossterm::{
    event::Event,
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::info;

use metrics_dashboard::{
    app, events, logging, ui, App, AutoRefresh, DashboardConfigPatch, DashboardStore, FileSource,
    FileStore, MetricsSource, MockSource, Preferences, Settings, SourceKind, ThemeMode,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ThemeArg {
    Light,
    Dark,
    /// Follow the terminal background
    Auto,
}

#[derive(Parser, Debug)]
#[command(name = "metrics-dashboard")]
#[command(about = "Terminal dashboard for document parsing, retrieval and QA quality metrics")]
struct Args {
    /// Settings file (TOML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory for persisted preferences
    #[arg(long)]
    state_dir: Option<PathBuf>,

    /// Where metrics come from
    #[arg(short, long, value_enum)]
    source: Option<SourceKind>,

    /// Bundle read by the file source
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Simulated latency of the mock source in milliseconds
    #[arg(long)]
    delay_ms: Option<u64>,

    /// Color theme; saved as the dashboard preference
    #[arg(short, long, value_enum)]
    theme: Option<ThemeArg>,

    /// Write logs to this file
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Load once, write the metrics bundle to a JSON file and exit
    #[arg(short, long)]
    export: Option<PathBuf>,
}

impl Args {
    /// Command-line flags take precedence over the settings file.
    fn apply(&self, settings: &mut Settings) {
        if let Some(ref dir) = self.state_dir {
            settings.state_dir = dir.clone();
        }
        if let Some(source) = self.source {
            settings.source = source;
        }
        if let Some(ref file) = self.file {
            settings.file = file.clone();
        }
        if let Some(delay_ms) = self.delay_ms {
            settings.delay_ms = delay_ms;
        }
        if let Some(ref log_file) = self.log_file {
            settings.log_file = Some(log_file.clone());
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    let mut settings = Settings::load(args.config.as_deref())?;
    args.apply(&mut settings);
    logging::init(settings.log_file.as_deref())?;
    info!(?settings, "starting");

    let source: Arc<dyn MetricsSource> = match settings.source {
        SourceKind::Mock => Arc::new(MockSource::new(settings.delay())),
        SourceKind::File => Arc::new(FileSource::new(&settings.file)),
    };
    let preferences = Preferences::new(Arc::new(FileStore::new(&settings.state_dir)));
    let store = Arc::new(
        DashboardStore::new(source)
            .with_preferences(preferences)
            .with_trend_days(settings.trend_days),
    );

    if let Some(theme) = args.theme {
        let mode = match theme {
            ThemeArg::Light => ThemeMode::Light,
            ThemeArg::Dark => ThemeMode::Dark,
            ThemeArg::Auto => ui::theme::detect_mode(),
        };
        store.update_dashboard_config(DashboardConfigPatch::new().theme(mode));
    }

    let rt = tokio::runtime::Runtime::new()?;

    // Handle export mode (non-interactive)
    if let Some(ref export_path) = args.export {
        return export_to_file(&rt, &store, export_path);
    }

    run_tui(&rt, store)
}

fn run_tui(rt: &tokio::runtime::Runtime, store: Arc<DashboardStore>) -> Result<()> {
    let _guard = rt.enter();

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Setup panic hook to restore terminal
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic);
    }));

    // Initial load runs in the background; the first frames show the loading state
    let mut app = App::new(store.clone(), rt.handle().clone());
    app.refresh();
    let refresh = AutoRefresh::start(store);

    let result = run_app(&mut terminal, &mut app);

    refresh.stop();

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> Result<()> {
    while app.running {
        terminal.draw(|frame| ui::render(frame, app))?;

        // Poll for events with a short timeout; store updates show up on the next draw
        if let Some(Event::Key(key)) = events::poll_event(Duration::from_millis(100))? {
            events::handle_key_event(app, key);
        }
    }

    Ok(())
}

/// Load one bundle and write it as pretty JSON.
fn export_to_file(
    rt: &tokio::runtime::Runtime,
    store: &DashboardStore,
    export_path: &Path,
) -> Result<()> {
    rt.block_on(store.load_metrics());

    let state = store.state();
    if let Some(ref error) = state.error {
        bail!("load failed: {error}");
    }
    let Some(bundle) = state.bundle() else {
        bail!("no metrics loaded");
    };
    drop(state);

    app::write_bundle(&bundle, export_path)?;
    println!("Exported metrics to {}", export_path.display());
    Ok(())
}
