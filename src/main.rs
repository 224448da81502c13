use std::io;
use std::process::ExitCode;

use bookstats::state::settings::{CliArgs, Settings, USAGE};
use bookstats::ui::chart_viewer::WindowPresenter;
use bookstats::ui::menu::Menu;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    // Logs go to stderr so they stay out of the menu output.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = match CliArgs::parse(std::env::args().skip(1)) {
        Ok(cli) => cli,
        Err(e) => {
            eprintln!("{e}");
            eprintln!("{USAGE}");
            return ExitCode::from(2);
        }
    };
    if cli.help {
        println!("{USAGE}");
        return ExitCode::SUCCESS;
    }

    let mut settings = match Settings::resolve(cli.config.as_deref()) {
        Ok(settings) => settings,
        Err(e) => {
            tracing::error!("Failed to load settings: {e}");
            eprintln!("{}", e.user_message());
            return ExitCode::FAILURE;
        }
    };
    cli.apply(&mut settings);
    tracing::debug!("Using settings: {:?}", settings);

    let stdin = io::stdin();
    let mut menu = Menu::new(stdin.lock(), io::stdout(), WindowPresenter, settings);
    match menu.run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("Terminal I/O failed: {e}");
            ExitCode::FAILURE
        }
    }
}
