use std::process::ExitCode;

use finance_control::cli::output;

fn main() -> ExitCode {
    finance_control::init();
    match finance_control::cli::run_cli() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            output::error(&err);
            ExitCode::FAILURE
        }
    }
}
