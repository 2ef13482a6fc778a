use std::fs::File;
use std::io::{self, IsTerminal};
use std::path::Path;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::Parser;

use colour_search::app::{App, SearchState};
use colour_search::catalog::loader::{LoadState, PaletteLoader};
use colour_search::catalog::source::source_from_arg;
use colour_search::cli::Args;
use colour_search::{report, tui};

fn init_logging(log_file: Option<&Path>, interactive: bool) -> Result<()> {
    let env = env_logger::Env::default().default_filter_or(if log_file.is_some() {
        "info"
    } else {
        "warn"
    });

    match log_file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("failed to create log file {}", path.display()))?;
            env_logger::Builder::from_env(env)
                .target(env_logger::Target::Pipe(Box::new(file)))
                .format_timestamp_millis()
                .init();
            log::info!("logging initialized to {}", path.display());
        }
        // The UI owns the terminal, so stderr is off limits.
        None if interactive => {}
        None => env_logger::Builder::from_env(env).init(),
    }
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.log_file.as_deref(), args.query.is_none())?;

    let source = source_from_arg(&args.source, Duration::from_secs(args.timeout))
        .context("failed to set up palette source")?;
    let loader = PaletteLoader::new(source);
    let limit = usize::try_from(args.limit).unwrap_or(usize::MAX);
    let mut app = App::new(loader, limit);

    let Some(query) = args.query else {
        log::info!("starting interactive UI");
        return tui::run(app);
    };

    app.reload();
    app.loader.wait();
    if let LoadState::Failed(message) = app.load_state() {
        bail!(
            "failed to load colours from {}: {message}",
            app.loader.source_description()
        );
    }

    app.search_text(&query);
    if let SearchState::Invalid(err) = &app.search {
        bail!("{err}");
    }

    let palette = app.loader.palette();
    let rows = app.rows(&palette);
    let stdout = io::stdout();
    let styled = stdout.is_terminal();
    report::write_table(&mut stdout.lock(), &rows, styled)?;
    Ok(())
}
