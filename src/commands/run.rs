use std::io::{self, Write};
use std::path::PathBuf;

use clap::Args;
use tracing::info;

use crate::cli_util::print_engine_error;
use crate::config::{self, Overrides, Settings};
use crate::loader::{inline_program, load_program};
use crate::{Engine, EofPolicy};

#[derive(Args, Debug)]
pub struct RunArgs {
    /// Brainfuck source file to execute
    #[arg(value_name = "FILE", required_unless_present = "eval")]
    pub file: Option<PathBuf>,

    /// Run CODE instead of reading a file
    #[arg(short = 'e', long = "eval", value_name = "CODE", conflicts_with = "file")]
    pub eval: Option<String>,

    /// Number of tape cells (fallback CBF_TAPE_SIZE, config, default 100000)
    #[arg(short = 't', long = "tape-size", value_name = "N")]
    pub tape_size: Option<usize>,

    /// Value stored by ',' at end of input (fallback CBF_EOF, config, default max)
    #[arg(long = "eof", value_name = "POLICY")]
    pub eof: Option<EofPolicy>,

    /// Longest program accepted; longer sources are truncated (fallback CBF_MAX_PROGRAM_SIZE, config, default 1000000)
    #[arg(long = "max-program-size", value_name = "BYTES")]
    pub max_program_size: Option<usize>,
}

impl RunArgs {
    fn overrides(&self) -> Overrides {
        Overrides {
            tape_size: self.tape_size,
            eof: self.eof,
            max_program_size: self.max_program_size,
        }
    }
}

/// Load, configure and execute one program. Returns the process exit code.
pub fn run(program: &str, args: RunArgs) -> i32 {
    // Resolve settings: flags -> env -> config file -> defaults
    let file_config = match config::load() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("{program}: {e}");
            let _ = io::stderr().flush();
            return 1;
        }
    };
    let settings = Settings::resolve(args.overrides(), config::env_overrides(), &file_config);
    info!(
        tape_size = settings.tape_size,
        eof = %settings.eof,
        max_program_size = settings.max_program_size,
        "resolved settings"
    );

    let code = match (args.file, args.eval) {
        (Some(path), _) => match load_program(&path, settings.max_program_size) {
            Ok(code) => code,
            Err(e) => {
                eprintln!("{program}: {e}");
                let _ = io::stderr().flush();
                return 1;
            }
        },
        (None, Some(code)) => inline_program(code, settings.max_program_size),
        (None, None) => {
            eprintln!("{program}: expected a FILE or --eval <CODE>");
            let _ = io::stderr().flush();
            return 2;
        }
    };

    let mut engine = match Engine::new(settings.tape_size) {
        Ok(e) => e,
        Err(e) => {
            print_engine_error(program, &code, &e);
            return 1;
        }
    };
    engine.set_eof_policy(settings.eof);

    match engine.run(&code) {
        Ok(()) => 0,
        Err(e) => {
            print_engine_error(program, &code, &e);
            1
        }
    }
}
