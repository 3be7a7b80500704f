//! mtgaup: MTG Arena updater for Wine.

use clap::{ColorChoice, CommandFactory, FromArgMatches};
use mtgaup_cli::cli::{Cli, LogFormatArg, LogLevelArg};
use mtgaup_cli::commands::{format_error, help_epilogue, run_update_command};
use mtgaup_cli::logging::{LogConfig, LogFormat, init_logging};
use mtgaup_updater::WineEnvironment;
use std::io::{self, IsTerminal};
use tracing::level_filters::LevelFilter;

fn main() {
    let env = WineEnvironment::from_env();
    let matches = Cli::command()
        .after_long_help(help_epilogue(&env))
        .get_matches();
    let cli = Cli::from_arg_matches(&matches).unwrap_or_else(|error| error.exit());

    // Diagnostic mode: no logging setup, no network, no files.
    if cli.env_info {
        print!("{}", env.report());
        return;
    }

    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }

    let exit_code = match run_update_command(&cli, env) {
        Ok(outcome) => {
            tracing::debug!("Run finished: {:?}", outcome);
            0
        }
        Err(error) => {
            eprintln!("error: {}", format_error(&error));
            1
        }
    };
    std::process::exit(exit_code);
}

/// Build logging configuration from CLI flags with consistent precedence.
fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let mut config = LogConfig {
        level_filter: cli.verbosity.tracing_level_filter(),
        ..LogConfig::default()
    };
    config.use_env_filter = !(cli.verbosity.is_present() || cli.log_level.is_some());
    if let Some(level) = cli.log_level {
        config.level_filter = match level {
            LogLevelArg::Error => LevelFilter::ERROR,
            LogLevelArg::Warn => LevelFilter::WARN,
            LogLevelArg::Info => LevelFilter::INFO,
            LogLevelArg::Debug => LevelFilter::DEBUG,
            LogLevelArg::Trace => LevelFilter::TRACE,
        };
    }
    config.format = match cli.log_format {
        LogFormatArg::Pretty => LogFormat::Pretty,
        LogFormatArg::Compact => LogFormat::Compact,
        LogFormatArg::Json => LogFormat::Json,
    };
    config.log_file = cli.log_file.clone();
    config.with_timestamps = cli.log_timestamps;
    config.with_ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => cli.log_file.is_none() && io::stderr().is_terminal(),
    };
    config
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_log_timestamps_flag() {
        let cli = Cli::try_parse_from(["mtgaup", "--log-timestamps"]).unwrap();
        assert!(log_config_from_cli(&cli).with_timestamps);

        let cli = Cli::try_parse_from(["mtgaup"]).unwrap();
        assert!(!log_config_from_cli(&cli).with_timestamps);
    }

    #[test]
    fn test_explicit_level_disables_env_filter() {
        let cli = Cli::try_parse_from(["mtgaup", "--log-level", "debug", "--log-format", "json"])
            .unwrap();
        let config = log_config_from_cli(&cli);
        assert_eq!(config.level_filter, LevelFilter::DEBUG);
        assert!(!config.use_env_filter);
        assert_eq!(config.format, LogFormat::Json);
    }
}
