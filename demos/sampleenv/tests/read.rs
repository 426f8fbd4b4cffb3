//! Reads the checked-in `.env` through the scaffolded module.
#![expect(
    clippy::expect_used,
    reason = "tests panic to surface configuration mistakes"
)]

use std::path::Path;

use rstest::rstest;
use sampleenv::config::read_from_env_file;

#[rstest]
fn reads_the_sample_variable() {
    let env_file = Path::new(env!("CARGO_MANIFEST_DIR")).join(".env");
    let config = read_from_env_file(&env_file).expect("read config");
    assert_eq!(config.SampleEnvVar, "some value");
}
