use clap::Parser;
use stakewalk::cli::{run, Cli};

fn main() -> std::process::ExitCode {
    run(Cli::parse())
}
