use std::process::ExitCode;

use dirtyfmt::{cli, ui::output};

fn main() -> ExitCode {
    match cli::run() {
        Ok(report) if report.is_success() => ExitCode::SUCCESS,
        Ok(_) => ExitCode::FAILURE,
        Err(err) => {
            output::error(err);
            ExitCode::FAILURE
        }
    }
}
