use std::io::{self, Write};

use crate::EngineError;

/// Characters shown on each side of an error position.
const WINDOW: usize = 32;

/// Print an engine error to stderr, prefixed with the program name. Errors
/// that point into the program get a caret context window.
pub fn print_engine_error(program: &str, code: &[u8], err: &EngineError) {
    let msg = format!("{program}: Error: {err}");
    match err.ip() {
        Some(ip) => print_error_with_context(&msg, code, ip),
        None => {
            eprintln!("{msg}");
            let _ = io::stderr().flush();
        }
    }
}

/// Print `prefix` followed by the program text around `pos` with a caret
/// under the offending instruction.
pub fn print_error_with_context(prefix: &str, code: &[u8], pos: usize) {
    eprintln!("{prefix}");
    let (snippet, underline) = context_window(code, pos);
    eprintln!("  {snippet}");
    eprintln!("  {underline}");
    let _ = io::stderr().flush();
}

/// Render the bytes around `pos` one column per byte, plus a matching caret line.
///
/// Whitespace and non-printable bytes are shown as spaces and `?` so the
/// caret stays aligned.
pub fn context_window(code: &[u8], pos: usize) -> (String, String) {
    let start = pos.saturating_sub(WINDOW);
    let end = (pos + WINDOW + 1).min(code.len());

    let snippet: String = code[start.min(end)..end]
        .iter()
        .map(|&b| match b {
            b' ' | b'\t' | b'\r' | b'\n' => ' ',
            b if b.is_ascii_graphic() => b as char,
            _ => '?',
        })
        .collect();

    let mut underline = " ".repeat(pos - start);
    underline.push('^');

    (snippet, underline)
}
