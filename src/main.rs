mod config;
mod error;
mod gui;
mod support;

use std::process::ExitCode;

use config::AppConfig;
use error::AppError;

fn run() -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let system = support::System::init(&config)?;
    let gui = gui::Gui::new(&config, system.fonts());
    system.main_loop(gui)
}

fn main() -> ExitCode {
    env_logger::init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            ExitCode::FAILURE
        }
    }
}
