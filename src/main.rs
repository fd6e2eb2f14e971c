use bpchart::{
    app::App,
    app_dirs::AppDirs,
    clump::clump,
    config::{Config, ConfigStore, FileConfigStore},
    error::ChartError,
    export::write_points,
    loader::load_readings,
    logging::setup_logging,
    markers::load_markers,
    runtime::{with_restore, ChartEvent, CrosstermEventSource, Runner},
};
use clap::Parser;
use crossterm::{
    execute, Command,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::{
    error::Error,
    io::{self, stdout},
    path::PathBuf,
    time::Duration,
};
use tracing::{debug, info};

const TICK_RATE_MS: u64 = 250;

/// chart blood pressure exports in the terminal
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "Loads every blood pressure CSV export in a directory, averages readings taken close together, and charts pressure and heart rate over time."
)]
pub struct Cli {
    /// directory holding the CSV exports
    #[clap(default_value = ".")]
    dir: PathBuf,

    /// readings closer than this many minutes to the previous one are averaged together
    #[clap(short = 'w', long)]
    window_minutes: Option<i64>,

    /// extension of the files to load
    #[clap(short = 'e', long)]
    extension: Option<String>,

    /// JSON file with labeled date markers, replacing those in the config file
    #[clap(short = 'm', long)]
    markers: Option<PathBuf>,

    /// configuration file (defaults to the platform config directory)
    #[clap(short = 'c', long)]
    config: Option<PathBuf>,

    /// print the clumped readings as CSV instead of opening the chart
    #[clap(long)]
    export: bool,

    /// log level: trace, debug, info, warn, error or off
    #[clap(long, default_value = "warn")]
    log_level: String,

    /// append logs to this file
    #[clap(long)]
    log_file: Option<PathBuf>,
}

impl Cli {
    /// Layer the command line over the stored configuration.
    fn resolve_config(&self) -> Result<Config, ChartError> {
        let store = match &self.config {
            Some(path) => FileConfigStore::with_path(path),
            None => FileConfigStore::new(),
        };
        let mut config = store.load()?;

        if let Some(window) = self.window_minutes {
            config.window_minutes = window;
        }
        if let Some(ext) = &self.extension {
            config.extension = ext.trim_start_matches('.').to_string();
        }
        if let Some(path) = &self.markers {
            config.markers = load_markers(path)?;
        }

        config.validate()?;
        Ok(config)
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    // stderr belongs to the chart while it is open, so default to a log file
    let log_file = cli
        .log_file
        .clone()
        .or_else(|| (!cli.export).then(AppDirs::log_path).flatten());
    setup_logging(&cli.log_level, log_file.as_deref())?;

    let config = cli.resolve_config()?;
    debug!("Using configuration {:?}", config);

    let readings = load_readings(&cli.dir, &config.extension)?;
    let points = clump(&readings, config.window()?);
    info!(
        "{} readings clumped into {} points",
        readings.len(),
        points.len()
    );

    if cli.export {
        write_points(&points, stdout().lock())?;
        return Ok(());
    }

    if !stdout().is_tty() {
        return Err(ChartError::Terminal(
            "stdout must be a tty, use --export for non-interactive output".into(),
        )
        .into());
    }

    let mut app = App::new(readings, points, &config);

    with_restore::<_, Box<dyn Error>>(
        || enable_raw_mode().map_err(Into::into),
        || run_chart(&mut app),
        || disable_raw_mode().map_err(Into::into),
    )
}

/// Draw the chart on the alternate screen, leaving it again whatever happens.
fn run_chart(app: &mut App) -> Result<(), Box<dyn Error>> {
    with_restore::<_, Box<dyn Error>>(
        || screen(EnterAlternateScreen),
        || {
            let mut terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;
            let result = start_tui(&mut terminal, app);
            result.and(terminal.show_cursor().map_err(Into::into))
        },
        || screen(LeaveAlternateScreen),
    )
}

fn screen(command: impl Command) -> Result<(), Box<dyn Error>> {
    let mut out = io::stdout();
    execute!(out, command)?;
    Ok(())
}

fn start_tui<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<(), Box<dyn Error>> {
    let runner = Runner::new(
        CrosstermEventSource::new(),
        Duration::from_millis(TICK_RATE_MS),
    );

    terminal.draw(|f| f.render_widget(&*app, f.area()))?;

    loop {
        match runner.step() {
            ChartEvent::Tick => {}
            ChartEvent::Resize => {
                terminal.draw(|f| f.render_widget(&*app, f.area()))?;
            }
            ChartEvent::Key(key) => {
                app.on_key(key);
                if app.should_quit {
                    break;
                }
                terminal.draw(|f| f.render_widget(&*app, f.area()))?;
            }
        }
    }

    Ok(())
}
