use std::process::ExitCode;

use clap::Parser;
use log::error;
use ski_art::{api, config::Config, logs};

fn main() -> ExitCode {
    let config = Config::parse();

    if let Err(e) = logs::init(config.verbose, config.log_file.as_deref()) {
        eprintln!("failed to initialize logging: {e:?}");
    }

    match api::convert(&config) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}
