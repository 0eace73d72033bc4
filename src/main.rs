use std::io;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use connect_disarray::config::GameConfig;
use connect_disarray::game::Representation;
use connect_disarray::ui::{self, App};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::info;
use tracing_subscriber::EnvFilter;

const LOG_FILE: &str = "connect_disarray.log";

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Storage {
    Dense,
    Packed,
}

/// Play Connect Disarray in the terminal.
#[derive(Parser)]
#[command(name = "connect_disarray", about = "Connect-style game with disarray and offset moves")]
struct Cli {
    /// Path to TOML configuration file
    #[arg(long, default_value = "connect_disarray.toml")]
    config: PathBuf,

    /// Pieces in a row needed to win
    #[arg(short, long)]
    run: Option<usize>,

    /// Number of columns
    #[arg(short, long)]
    width: Option<usize>,

    /// Number of rows
    #[arg(long)]
    height: Option<usize>,

    /// Board storage
    #[arg(long, value_enum, conflicts_with_all = ["matrix", "bits"])]
    representation: Option<Storage>,

    /// Shorthand for --representation dense
    #[arg(short = 'm', long, conflicts_with = "bits")]
    matrix: bool,

    /// Shorthand for --representation packed
    #[arg(short = 'b', long)]
    bits: bool,

    /// Line-based play on stdin/stdout instead of the full-screen UI
    #[arg(long)]
    plain: bool,
}

impl Cli {
    fn representation(&self) -> Option<Representation> {
        match (self.representation, self.matrix, self.bits) {
            (Some(Storage::Dense), _, _) | (None, true, _) => Some(Representation::Dense),
            (Some(Storage::Packed), _, _) | (None, _, true) => Some(Representation::Packed),
            (None, false, false) => None,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.plain)?;

    // Load configuration
    let mut config = GameConfig::load_or_default(&cli.config)
        .with_context(|| format!("loading config from {}", cli.config.display()))?;

    // Apply CLI overrides
    if let Some(run) = cli.run {
        config.run = run;
    }
    if let Some(width) = cli.width {
        config.width = width;
    }
    if let Some(height) = cli.height {
        config.height = height;
    }
    if let Some(representation) = cli.representation() {
        config.representation = representation;
    }
    info!(?config, plain = cli.plain, "starting");

    if cli.plain {
        let mut game = config.new_game().context("creating game")?;
        let outcome = ui::plain::run(&mut game, io::stdin().lock(), io::stdout().lock())?;
        info!(?outcome, "game finished");
        Ok(())
    } else {
        let app = App::new(config).context("creating game")?;
        run_tui(app)
    }
}

/// Log to stderr in plain mode, to a file when the terminal is taken over.
fn init_logging(plain: bool) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    if plain {
        builder.with_writer(io::stderr).init();
    } else {
        let log_file = std::fs::File::create(LOG_FILE)
            .with_context(|| format!("creating log file {LOG_FILE}"))?;
        builder.with_writer(Arc::new(log_file)).with_ansi(false).init();
    }
    Ok(())
}

fn run_tui(mut app: App) -> Result<()> {
    // Setup terminal
    enable_raw_mode().context("enabling raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("entering alternate screen")?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("creating terminal")?;

    let res = app.run(&mut terminal);

    // Restore terminal even if the app failed
    let _ = disable_raw_mode();
    let _ = execute!(terminal.backend_mut(), LeaveAlternateScreen);
    let _ = terminal.show_cursor();

    res.context("running terminal UI")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_representation_flags() {
        let cli = Cli::parse_from(["connect_disarray", "-b", "-r", "3", "-w", "5"]);
        assert_eq!(cli.representation(), Some(Representation::Packed));
        assert_eq!(cli.run, Some(3));
        assert_eq!(cli.width, Some(5));

        let cli = Cli::parse_from(["connect_disarray", "--representation", "dense"]);
        assert_eq!(cli.representation(), Some(Representation::Dense));

        let cli = Cli::parse_from(["connect_disarray", "--plain"]);
        assert_eq!(cli.representation(), None);
        assert!(cli.plain);

        assert!(Cli::try_parse_from(["connect_disarray", "-m", "-b"]).is_err());
    }
}
