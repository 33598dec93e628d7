#![allow(dead_code)]

use std::io::Write;

/// A `cbf` command isolated from the caller's config file and environment.
pub fn cargo_bin() -> assert_cmd::Command {
    let mut cmd = assert_cmd::Command::cargo_bin("cbf").expect("cbf binary");
    cmd.env("CBF_CONFIG", "/nonexistent/cbf.toml")
        .env_remove("CBF_TAPE_SIZE")
        .env_remove("CBF_EOF")
        .env_remove("CBF_MAX_PROGRAM_SIZE")
        .env_remove("RUST_LOG");
    cmd
}

pub fn tempfile_with(content: &str) -> tempfile::NamedTempFile {
    let mut tf = tempfile::NamedTempFile::new().expect("tempfile");
    write!(tf, "{}", content).unwrap();
    tf
}

pub fn hello_world() -> &'static str {
    "++++++++++[>+++++++>++++++++++>+++>+<<<<-]>++.>+.+++++++..+++.>++.<<+++++++++++++++.>.+++.------.--------.>+.>."
}
