//! kvlint CLI entry point.

use std::io::{self, Write};
use std::process::ExitCode;

use clap::Parser;
use kvlint::cli::{Cli, LintDriver};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize the tracing subscriber for logging.
///
/// Log level is controlled by:
/// 1. `--debug` flag sets level to DEBUG
/// 2. `RUST_LOG` environment variable (if set)
/// 3. Default is INFO
fn init_tracing(debug: bool) {
    let filter = if debug {
        EnvFilter::new("kvlint=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("kvlint=info"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(io::stderr))
        .with(filter)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    tracing::debug!("kvlint starting with args: {:?}", cli);

    // Handle --no-color
    if cli.no_color {
        std::env::set_var("NO_COLOR", "1");
    }

    let driver = LintDriver::new(cli);
    let mut stdout = io::stdout().lock();
    let mut stderr = io::stderr().lock();

    match driver.execute(&mut stdout, &mut stderr) {
        Ok(result) => ExitCode::from(result.exit_code as u8),
        Err(e) => {
            let _ = writeln!(stderr, "kvlint: {e}");
            ExitCode::from(1)
        }
    }
}
