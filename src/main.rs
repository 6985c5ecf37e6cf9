use civic_pulse::storage::config::Config;
use tracing_subscriber::EnvFilter;

mod cli;
use cli::{CliMode, parse_cli_options, run_agenda_mode};
mod tui;
use tui::run_tui;

fn main() -> anyhow::Result<()> {
    setup_logging();

    let options = match parse_cli_options(std::env::args().skip(1)) {
        Ok(options) => options,
        Err(err) => {
            eprintln!("Error: {}", err);
            println!("{}", cli::USAGE);
            return Ok(());
        }
    };

    let mut config = Config::load_or_create()?;
    options.apply_to(&mut config);

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    match options.mode {
        CliMode::Agenda(route) => runtime.block_on(run_agenda_mode(&config, route)),
        CliMode::Help => {
            println!("{}", cli::USAGE);
            Ok(())
        }
        CliMode::Dashboard => runtime.block_on(run_tui(config)),
    }
}

fn setup_logging() {
    let log_dir = Config::config_dir();

    std::fs::create_dir_all(&log_dir).ok();

    let file_appender = tracing_appender::rolling::daily(log_dir, "civic-pulse.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_target(false)
        .init();

    std::mem::forget(_guard);

    tracing::info!("civic-pulse started");
}
