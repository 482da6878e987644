use std::{env, process::ExitCode};

use color_eyre::eyre::{self, WrapErr};
use tsb_driver::{Command, Console, Driver, ExternalToolchain};

mod cli;
mod logging;

fn main() -> eyre::Result<ExitCode>
{
    color_eyre::install()?;

    let command = tsb_driver::parse_arguments(env::args().skip(1));

    let silent = matches!(&command, Ok(Command::Build { flags, .. }) if flags.silent);
    let requested_level = env::var(logging::LOG_VAR).ok();

    logging::setup_logger(logging::level_filter(silent, requested_level.as_deref()))?;

    let (flags, inputs) = match command {
        Ok(Command::Hint) => {
            cli::print_hint();

            return Ok(ExitCode::SUCCESS);
        }
        Ok(Command::Help) => {
            cli::print_usage();

            return Ok(ExitCode::SUCCESS);
        }
        Ok(Command::Build { flags, inputs }) => (flags, inputs),
        Err(error) => {
            log::error!("{error}");

            return Ok(ExitCode::FAILURE);
        }
    };

    let cwd = env::current_dir().wrap_err("failed to determine the working directory")?;

    // The console holds stdin until the driver is dropped.
    let mut driver = Driver::new(flags, ExternalToolchain::from_env(), Console::stdio(), cwd);

    driver.build_all(&inputs);

    Ok(ExitCode::SUCCESS)
}
