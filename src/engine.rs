//! The interpreter engine.
//!
//! An [`Engine`] owns a circular [`Tape`] and a program cursor and runs one
//! program text to completion. Behaviors:
//! - Tape cells are unsigned bytes that wrap on overflow and underflow.
//! - `>` and `<` wrap around the ends of the tape.
//! - `.` writes the current cell as a raw byte; `,` reads one byte, applying
//!   an [`EofPolicy`] when input is exhausted.
//! - Loops are matched by re-scanning the program text each time a jump is
//!   needed. An unmatched bracket is only reported when a scan runs off the
//!   program, so `]` on a zero cell is harmless.
//! - Every byte other than `+-.,<>[]` is a comment. A NUL byte ends the program.

use std::fmt;
use std::io::{self, Read, Write};
use std::str::FromStr;

use tracing::{debug, trace, warn};

use crate::scan::{find_matching_close, find_matching_open, program_end};
use crate::tape::Tape;

/// Errors that can occur while building or running an [`Engine`].
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// A `[` on a zero cell had no matching `]` before the end of the program.
    #[error("no matching ']' for '[' at instruction {ip}")]
    UnmatchedOpenBracket { ip: usize },

    /// A `]` on a nonzero cell had no matching `[` before the start of the program.
    #[error("no matching '[' for ']' at instruction {ip}")]
    UnmatchedCloseBracket { ip: usize },

    /// The tape could not be allocated.
    #[error("unable to allocate a tape of {cells} cells")]
    ResourceExhausted { cells: usize },

    #[error("tape length must be at least one cell")]
    ZeroLengthTape,

    /// `run` was called on an engine that already ran a program.
    #[error("engine has already run a program; create a new engine for each run")]
    AlreadyRan,
}

impl EngineError {
    /// Program index the error points at, if it has one.
    pub fn ip(&self) -> Option<usize> {
        match self {
            EngineError::UnmatchedOpenBracket { ip } | EngineError::UnmatchedCloseBracket { ip } => {
                Some(*ip)
            }
            _ => None,
        }
    }
}

/// What `,` stores when there is no more input.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum EofPolicy {
    /// Store 0.
    Zero,
    /// Store 255, the byte an end-of-file `-1` truncates to.
    #[default]
    Max,
    /// Leave the cell as it was.
    Unchanged,
}

impl FromStr for EofPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "zero" | "0" => Ok(EofPolicy::Zero),
            "max" | "255" | "-1" => Ok(EofPolicy::Max),
            "unchanged" | "keep" => Ok(EofPolicy::Unchanged),
            other => Err(format!("unknown EOF policy '{other}' (expected zero, max or unchanged)")),
        }
    }
}

impl fmt::Display for EofPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EofPolicy::Zero => write!(f, "zero"),
            EofPolicy::Max => write!(f, "max"),
            EofPolicy::Unchanged => write!(f, "unchanged"),
        }
    }
}

type OutputSink = Box<dyn FnMut(&[u8]) + Send>;
type InputProvider = Box<dyn FnMut() -> Option<u8> + Send>;

/// A Brainfuck interpreter bound to one tape.
///
/// Build it with [`Engine::new`], optionally swap its I/O with
/// [`set_output_sink`](Engine::set_output_sink) and
/// [`set_input_provider`](Engine::set_input_provider), then call
/// [`run`](Engine::run) once.
pub struct Engine {
    tape: Tape,
    pc: usize,
    ran: bool,
    eof: EofPolicy,
    output_sink: Option<OutputSink>,
    input_provider: Option<InputProvider>,
}

impl fmt::Debug for Engine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Engine")
            .field("tape_len", &self.tape.len())
            .field("ap", &self.tape.pointer())
            .field("pc", &self.pc)
            .field("eof", &self.eof)
            .finish()
    }
}

impl Engine {
    /// Create an engine with `tape_len` zeroed cells.
    pub fn new(tape_len: usize) -> Result<Self, EngineError> {
        Ok(Self {
            tape: Tape::new(tape_len)?,
            pc: 0,
            ran: false,
            eof: EofPolicy::default(),
            output_sink: None,
            input_provider: None,
        })
    }

    /// Send `.` output to `sink` instead of stdout. The sink receives one
    /// single-byte slice per `.`.
    pub fn set_output_sink<F>(&mut self, sink: F)
    where
        F: FnMut(&[u8]) + Send + 'static,
    {
        self.output_sink = Some(Box::new(sink));
    }

    /// Read `,` input from `provider` instead of stdin. Returning `None`
    /// means input is exhausted.
    pub fn set_input_provider<F>(&mut self, provider: F)
    where
        F: FnMut() -> Option<u8> + Send + 'static,
    {
        self.input_provider = Some(Box::new(provider));
    }

    pub fn set_eof_policy(&mut self, eof: EofPolicy) {
        self.eof = eof;
    }

    pub fn tape(&self) -> &[u8] {
        self.tape.cells()
    }

    /// Access cursor: index of the current tape cell.
    pub fn pointer(&self) -> usize {
        self.tape.pointer()
    }

    pub fn program_counter(&self) -> usize {
        self.pc
    }

    /// Execute `program` until the program cursor reaches its end.
    ///
    /// An engine runs one program; a second call fails with
    /// [`EngineError::AlreadyRan`] and leaves the tape alone.
    ///
    /// Stdout is flushed before every stdin read and before returning, on
    /// success and on failure alike. Stdin and stdout are only locked when
    /// no input provider or output sink replaces them.
    pub fn run(&mut self, program: impl AsRef<[u8]>) -> Result<(), EngineError> {
        if self.ran {
            return Err(EngineError::AlreadyRan);
        }
        self.ran = true;

        let program = program.as_ref();
        let end = program_end(program);
        debug!(
            program_len = end,
            tape_len = self.tape.len(),
            eof = %self.eof,
            "starting run"
        );

        let mut stdout = self.output_sink.is_none().then(|| io::stdout().lock());
        let mut stdin = self.input_provider.is_none().then(|| io::stdin().lock());
        let result = self.execute(&program[..end], stdin.as_mut(), stdout.as_mut());

        if let Some(out) = stdout.as_mut() {
            if let Err(e) = out.flush() {
                warn!(error = %e, "failed to flush stdout");
            }
        }

        match &result {
            Ok(()) => debug!(pc = self.pc, ap = self.tape.pointer(), "run finished"),
            Err(e) => debug!(pc = self.pc, ap = self.tape.pointer(), error = %e, "run aborted"),
        }
        result
    }

    fn execute<R: Read, W: Write>(
        &mut self,
        program: &[u8],
        mut stdin: Option<&mut R>,
        mut stdout: Option<&mut W>,
    ) -> Result<(), EngineError> {
        while self.pc < program.len() {
            let instr = program[self.pc];

            match instr {
                b'+' => {
                    self.tape.increment();
                }
                b'-' => {
                    self.tape.decrement();
                }
                b'.' => self.emit(self.tape.current(), stdout.as_deref_mut()),
                b',' => {
                    match self.read_byte(stdin.as_deref_mut(), stdout.as_deref_mut()) {
                        Some(b) => self.tape.set_current(b),
                        None => match self.eof {
                            EofPolicy::Zero => self.tape.set_current(0),
                            EofPolicy::Max => self.tape.set_current(u8::MAX),
                            EofPolicy::Unchanged => {}
                        },
                    }
                }
                b'>' => {
                    self.tape.move_right();
                }
                b'<' => {
                    self.tape.move_left();
                }
                b'[' => {
                    if self.tape.current() == 0 {
                        self.pc = find_matching_close(program, self.pc)
                            .ok_or(EngineError::UnmatchedOpenBracket { ip: self.pc })?;
                    }
                }
                b']' => {
                    if self.tape.current() != 0 {
                        self.pc = find_matching_open(program, self.pc)
                            .ok_or(EngineError::UnmatchedCloseBracket { ip: self.pc })?;
                    }
                }
                _ => {}
            }

            trace!(
                pc = self.pc,
                instr = %char::from(instr),
                ap = self.tape.pointer(),
                cell = self.tape.current(),
                "step"
            );

            // Bracket jumps land on the partner bracket; this steps past it.
            self.pc += 1;
        }

        Ok(())
    }

    fn emit<W: Write>(&mut self, byte: u8, stdout: Option<&mut W>) {
        if let Some(sink) = self.output_sink.as_mut() {
            sink(&[byte]);
        } else if let Some(out) = stdout {
            if let Err(e) = out.write_all(&[byte]) {
                warn!(error = %e, pc = self.pc, "failed to write output byte");
            }
        }
    }

    fn read_byte<R: Read, W: Write>(
        &mut self,
        stdin: Option<&mut R>,
        stdout: Option<&mut W>,
    ) -> Option<u8> {
        if let Some(provider) = self.input_provider.as_mut() {
            return provider();
        }
        let stdin = stdin?;

        // A prompt printed without a newline must be visible before we block.
        if let Some(out) = stdout {
            if let Err(e) = out.flush() {
                warn!(error = %e, pc = self.pc, "failed to flush stdout before reading");
            }
        }

        let mut buf = [0u8; 1];
        loop {
            match stdin.read(&mut buf) {
                Ok(0) => return None,
                Ok(_) => return Some(buf[0]),
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => {
                    warn!(error = %e, pc = self.pc, "stdin read failed; treating as end of input");
                    return None;
                }
            }
        }
    }
}
