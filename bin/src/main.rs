use std::process::ExitCode;

mod cli;
mod distpaths;

fn main() -> ExitCode {
    cli::run()
}
