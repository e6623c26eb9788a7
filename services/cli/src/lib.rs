mod cli;
mod demo;
mod report;

use clinic_ai::error::AppError;

pub fn run() -> Result<(), AppError> {
    cli::run()
}
