mod common;

use common::cargo_bin;
use predicates::prelude::*;

#[test]
fn unmatched_open_bracket_fails() {
    cargo_bin()
        .args(["--eval", "[+"])
        .assert()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("no matching ']'").and(predicate::str::contains("instruction 0")));
}

#[test]
fn unmatched_close_bracket_fails() {
    cargo_bin()
        .args(["--eval", "+]"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("no matching '['").and(predicate::str::contains("^")));
}

#[test]
fn output_before_failure_is_kept() {
    // 'A' is printed, then the cell is cleared and the final '[' has no partner.
    let code = format!("{}.[-][", "+".repeat(65));
    cargo_bin()
        .args(["--eval", &code])
        .assert()
        .code(1)
        .stdout("A")
        .stderr(predicate::str::contains("no matching"));
}

#[test]
fn stray_close_on_zero_cell_is_harmless() {
    cargo_bin()
        .args(["--eval", "]"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::is_empty());
}

#[test]
fn zero_tape_size_is_rejected() {
    cargo_bin()
        .args(["--tape-size", "0", "--eval", "+"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("at least one cell"));
}

#[test]
fn unknown_eof_policy_is_a_usage_error() {
    cargo_bin()
        .args(["--eof", "sometimes", "--eval", ","])
        .assert()
        .code(2);
}
