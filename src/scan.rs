//! Bracket matching by linear re-scan.
//!
//! Every loop entry or exit that needs a jump walks the program text from the
//! bracket to its partner, counting nesting depth. Nothing is cached between
//! calls, so these two functions are the only place a jump table could be
//! slotted in later.

/// Byte that ends a program text early, as in a NUL-terminated buffer.
pub const END_MARKER: u8 = 0;

/// Length of the executable part of `program`: everything before the first
/// NUL, or the whole slice.
pub fn program_end(program: &[u8]) -> usize {
    program
        .iter()
        .position(|&b| b == END_MARKER)
        .unwrap_or(program.len())
}

/// Find the `]` that closes the `[` at `open_at`.
///
/// Returns `None` when the end of the program is reached first.
pub fn find_matching_close(program: &[u8], open_at: usize) -> Option<usize> {
    let end = program_end(program);
    let mut depth = 1usize;

    for (offset, &b) in program[..end].iter().enumerate().skip(open_at.saturating_add(1)) {
        match b {
            b'[' => depth += 1,
            b']' => {
                depth -= 1;
                if depth == 0 {
                    return Some(offset);
                }
            }
            _ => {}
        }
    }

    None
}

/// Find the `[` that opens the `]` at `close_at`.
///
/// Returns `None` when the scan would step before index 0, or when
/// `close_at` is not inside the program.
pub fn find_matching_open(program: &[u8], close_at: usize) -> Option<usize> {
    if close_at >= program_end(program) {
        return None;
    }
    let mut depth = 1usize;

    for idx in (0..close_at).rev() {
        match program[idx] {
            b']' => depth += 1,
            b'[' => {
                depth -= 1;
                if depth == 0 {
                    return Some(idx);
                }
            }
            _ => {}
        }
    }

    None
}
