//! Prints the configuration read from `.env` in the working directory.

use std::process::ExitCode;

use sampleenv::config;

#[expect(clippy::print_stdout, reason = "the demo prints what it read")]
fn main() -> ExitCode {
    match config::read() {
        Ok(config) => {
            println!("SAMPLE_ENV_VAR={}", config.SampleEnvVar);
            ExitCode::SUCCESS
        }
        Err(err) => {
            println!("{err}");
            ExitCode::FAILURE
        }
    }
}
