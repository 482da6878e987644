use std::str::FromStr;

use color_eyre::eyre;
use log::{Level, LevelFilter};
use owo_colors::OwoColorize;

pub const LOG_VAR: &str = "TSB_LOG";

/// `--silent` keeps errors only, otherwise `TSB_LOG` decides and `info` is the
/// default. Errors are never filtered out.
pub fn level_filter(
    silent: bool,
    requested: Option<&str>,
) -> LevelFilter
{
    if silent {
        return LevelFilter::Error;
    }

    requested
        .and_then(|level| LevelFilter::from_str(level.trim()).ok())
        .unwrap_or(LevelFilter::Info)
        .max(LevelFilter::Error)
}

/// Progress goes to stdout as plain text, everything else to stderr.
pub fn setup_logger(level: LevelFilter) -> eyre::Result<()>
{
    {
        use fern::colors::{Color, ColoredLevelConfig};

        let colors = ColoredLevelConfig::new()
            .info(Color::Green)
            .warn(Color::BrightYellow)
            .error(Color::BrightRed)
            .debug(Color::BrightMagenta)
            .trace(Color::BrightCyan);

        fern::Dispatch::new()
            .format(move |out, message, record| match record.level() {
                Level::Info => out.finish(format_args!("{message}")),
                Level::Warn => out.finish(format_args!("{} {message}", "warning:".yellow())),
                Level::Error => out.finish(format_args!("{} {message}", "error:".red())),
                Level::Debug | Level::Trace => out.finish(format_args!(
                    "[{} @ {}] {}",
                    colors.color(record.level()),
                    record
                        .file()
                        .zip(record.line())
                        .map(|(file, line)| format!("{file}:{line}"))
                        .unwrap_or_else(|| record.target().into()),
                    message,
                )),
            })
            .level(level)
            .chain(
                fern::Dispatch::new()
                    .filter(|metadata| metadata.level() == Level::Info)
                    .chain(std::io::stdout()),
            )
            .chain(
                fern::Dispatch::new()
                    .filter(|metadata| metadata.level() != Level::Info)
                    .chain(std::io::stderr()),
            )
            .apply()?;
    }

    Ok(())
}

#[cfg(test)]
mod tests
{
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn silent_only_keeps_errors()
    {
        assert_eq!(level_filter(true, Some("trace")), LevelFilter::Error);
    }

    #[test]
    fn environment_picks_the_level()
    {
        assert_eq!(level_filter(false, None), LevelFilter::Info);
        assert_eq!(level_filter(false, Some("DEBUG")), LevelFilter::Debug);
        assert_eq!(level_filter(false, Some("loud")), LevelFilter::Info);
    }

    #[test]
    fn errors_survive_every_setting()
    {
        assert_eq!(level_filter(false, Some("off")), LevelFilter::Error);
        assert_eq!(level_filter(false, Some("error")), LevelFilter::Error);
        assert_eq!(level_filter(true, Some("off")), LevelFilter::Error);
    }
}
