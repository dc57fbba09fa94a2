use std::process::ExitCode;

use trees::output as out;

mod app;
mod logging;

fn main() -> ExitCode {
    let args = trees::cli::parse();
    match app::run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            out::print_error(&format!("{e:#}"));
            ExitCode::FAILURE
        }
    }
}
