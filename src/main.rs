use cbrainfuck::commands::run::{self, RunArgs};
use clap::Parser;
use std::env;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "cbf",
    version,
    about = "Run a Brainfuck program on a circular byte tape"
)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace); RUST_LOG wins when set
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(flatten)]
    run: RunArgs,
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    // Program output owns stdout; logs go to stderr.
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    // We still pull the program name for error messages
    let program = env::args().next().unwrap_or_else(|| String::from("cbf"));

    let cli = Cli::parse();
    init_logging(cli.verbose);

    let code = run::run(&program, cli.run);
    std::process::exit(code);
}
