//! Prints the configuration read from `.env-custom` in the working directory.

use std::process::ExitCode;

use customenvfile::config;

const ENV_FILE: &str = ".env-custom";

#[expect(clippy::print_stdout, reason = "the demo prints what it read")]
fn main() -> ExitCode {
    match config::read_from_env_file(ENV_FILE) {
        Ok(config) => {
            println!("{config:#?}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            println!("{err}");
            ExitCode::FAILURE
        }
    }
}
