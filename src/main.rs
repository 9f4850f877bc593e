use clap::Parser;
use macdvol::cli::{run, Cli};

fn main() -> std::process::ExitCode {
    run(Cli::parse())
}
