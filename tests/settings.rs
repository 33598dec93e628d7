// Flag, environment and config file precedence.
mod common;

use common::{cargo_bin, tempfile_with};

// Step left, write 'A', step right, print. On a 1-cell tape every move lands
// on the same cell, so 'A' comes out; on wider tapes cell 0 is still zero.
const SAME_CELL_PROBE: &str = "<+++++++++++++++++++++++++++++++++++++++++++++++++++++++++++++++++>.";

#[test]
fn tape_size_flag_controls_wraparound() {
    cargo_bin()
        .args(["--tape-size", "1", "--eval", SAME_CELL_PROBE])
        .assert()
        .success()
        .stdout("A");

    cargo_bin()
        .args(["--tape-size", "2", "--eval", SAME_CELL_PROBE])
        .assert()
        .success()
        .stdout(vec![0u8]);
}

#[test]
fn env_sets_tape_size() {
    cargo_bin()
        .env("CBF_TAPE_SIZE", "1")
        .args(["--eval", SAME_CELL_PROBE])
        .assert()
        .success()
        .stdout("A");
}

#[test]
fn flag_beats_env() {
    cargo_bin()
        .env("CBF_EOF", "unchanged")
        .args(["--eof", "zero", "--eval", "+,."])
        .write_stdin("")
        .assert()
        .success()
        .stdout(vec![0u8]);
}

#[test]
fn config_file_is_used() {
    let cfg = tempfile_with("[engine]\ntape_size = 1\neof = \"zero\"\n");
    cargo_bin()
        .env("CBF_CONFIG", cfg.path())
        .args(["--eval", SAME_CELL_PROBE])
        .assert()
        .success()
        .stdout("A");
}

#[test]
fn malformed_config_file_fails() {
    let cfg = tempfile_with("[engine]\ntape_size = \"lots\"\n");
    cargo_bin()
        .env("CBF_CONFIG", cfg.path())
        .args(["--eval", "+"])
        .assert()
        .code(1)
        .stderr(predicates::str::contains("invalid config file"));
}
