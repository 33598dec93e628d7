//! A minimal Brainfuck interpreter on a circular byte tape.
//!
//! The [`Engine`] owns a zeroed tape (100,000 cells from the CLI, any
//! positive size from the library) and a single access cursor, and runs a
//! program text once.
//!
//! Features and behaviors:
//! - Cells are `u8` and wrap on `+`/`-`.
//! - The access cursor wraps around both ends of the tape. This is kept
//!   stable, but programs should not depend on it.
//! - Output `.` writes the raw byte at the cursor.
//! - Input `,` reads a single byte; at end of input the cell is set according
//!   to [`EofPolicy`] (255 by default).
//! - Loops are matched by scanning the program text; a bracket with no partner
//!   is reported only when execution needs to jump from it.
//! - Any other character is a comment; a NUL byte ends the program.
//!
//! Quick start:
//!
//! ```no_run
//! use cbrainfuck::Engine;
//!
//! // Classic "Hello World!" in Brainfuck
//! let code = "++++++++++[>+++++++>++++++++++>+++>+<<<<-]>++.>+.+++++++..+++.>++.<<+++++++++++++++.>.+++.------.--------.>+.>.";
//! let mut engine = Engine::new(30_000).expect("tape should allocate");
//! engine.run(code).expect("program should run");
//! ```

pub mod cli_util;
pub mod commands;
pub mod config;
pub mod engine;
pub mod loader;
pub mod scan;
pub mod tape;

pub use engine::{Engine, EngineError, EofPolicy};
pub use loader::LoadError;
pub use tape::Tape;
