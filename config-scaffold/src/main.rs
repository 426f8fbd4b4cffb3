//! CLI entrypoint for `config-scaffold`.

use std::process::ExitCode;

use camino::{Utf8Path, Utf8PathBuf};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use config_scaffold::cli::Args;
use config_scaffold::settings::load_settings;
use config_scaffold::{Generator, Result};

#[expect(
    clippy::print_stdout,
    reason = "created paths and failures are the command's output"
)]
fn main() -> ExitCode {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(err) => {
            print!("{err}");
            return if err.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        }
    };
    init_tracing(args.verbose);
    match run(&args) {
        Ok(created) => {
            for path in created {
                println!("created: {path}");
            }
            ExitCode::SUCCESS
        }
        Err(err) => {
            println!("{err}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<Vec<Utf8PathBuf>> {
    let (request, out_dir) = load_settings(args)?.into_request()?;
    let generator = Generator::with_defaults(request, &out_dir)?;
    let created = generator.generate()?;
    Ok(created
        .into_iter()
        .map(|path| display_path(&out_dir, path))
        .collect())
}

fn display_path(out_dir: &Utf8Path, path: Utf8PathBuf) -> Utf8PathBuf {
    if out_dir == Utf8Path::new(".") {
        path
    } else {
        out_dir.join(path)
    }
}

fn init_tracing(verbosity: u8) {
    let fallback = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
