use std::path::PathBuf;
use std::str::FromStr;

use clap::{crate_authors, crate_version, value_t, App, Arg, ArgMatches};
use log::LevelFilter;
use minifb::Scale;

const DEFAULT_CYCLES_PER_SECOND: &str = "1000";
const DEFAULT_SCALE: &str = "16";
const DEFAULT_TONE: &str = "1000";
const DEFAULT_LOG_LEVEL: &str = "info";

/// Front end settings, taken from the command line.
pub struct Config {
    pub rom: PathBuf,
    pub cycles_per_second: u32,
    pub scale: Scale,
    pub tone: f32,
    pub mute: bool,
    pub log_level: LevelFilter,
}

impl Config {
    pub fn from_args() -> Self {
        Self::from_matches(&app().get_matches())
    }

    fn from_matches(matches: &ArgMatches) -> Self {
        let scale = match matches.value_of("scale").unwrap_or(DEFAULT_SCALE) {
            "1" => Scale::X1,
            "2" => Scale::X2,
            "4" => Scale::X4,
            "8" => Scale::X8,
            "32" => Scale::X32,
            _ => Scale::X16,
        };
        let log_level = matches
            .value_of("log-level")
            .and_then(|level| LevelFilter::from_str(level).ok())
            .unwrap_or(LevelFilter::Info);

        Self {
            // Required, clap exits before we get here without it.
            rom: PathBuf::from(matches.value_of("ROM").unwrap_or_default()),
            cycles_per_second: value_t!(matches, "cycles-per-second", u32)
                .unwrap_or_else(|e| e.exit()),
            scale,
            tone: value_t!(matches, "tone", f32).unwrap_or_else(|e| e.exit()),
            mute: matches.is_present("mute"),
            log_level,
        }
    }
}

fn is_positive_number(value: String) -> Result<(), String> {
    match value.parse::<f64>() {
        Ok(number) if number > 0.0 => Ok(()),
        _ => Err(format!("expected a positive number, got {}", value)),
    }
}

fn app<'a, 'b>() -> App<'a, 'b> {
    App::new("CHIP-8")
        .version(crate_version!())
        .author(crate_authors!())
        .about("A CHIP-8 emulator")
        .arg(
            Arg::with_name("ROM")
                .help("The CHIP-8 ROM to run")
                .required(true)
                .index(1),
        )
        .arg(
            Arg::with_name("cycles-per-second")
                .long("cycles-per-second")
                .short("c")
                .help("Instructions executed per second")
                .takes_value(true)
                .default_value(DEFAULT_CYCLES_PER_SECOND)
                .validator(is_positive_number),
        )
        .arg(
            Arg::with_name("scale")
                .long("scale")
                .short("s")
                .help("Window pixels per CHIP-8 pixel")
                .takes_value(true)
                .possible_values(&["1", "2", "4", "8", "16", "32"])
                .default_value(DEFAULT_SCALE),
        )
        .arg(
            Arg::with_name("tone")
                .long("tone")
                .help("Frequency of the buzzer in Hz")
                .takes_value(true)
                .default_value(DEFAULT_TONE)
                .validator(is_positive_number),
        )
        .arg(
            Arg::with_name("mute")
                .long("mute")
                .help("Run without sound"),
        )
        .arg(
            Arg::with_name("log-level")
                .long("log-level")
                .help("Maximum level of log messages")
                .takes_value(true)
                .possible_values(&["off", "error", "warn", "info", "debug", "trace"])
                .default_value(DEFAULT_LOG_LEVEL),
        )
}

#[cfg(test)]
mod tests {
    use super::{app, Config};
    use log::LevelFilter;

    fn parse(args: &[&str]) -> Config {
        let matches = app().get_matches_from(args);

        Config::from_matches(&matches)
    }

    #[test]
    fn test_defaults() {
        let config = parse(&["chip8-vm", "pong.ch8"]);

        assert_eq!(config.rom.to_str(), Some("pong.ch8"));
        assert_eq!(config.cycles_per_second, 1000);
        assert_eq!(config.tone, 1000.0);
        assert!(!config.mute);
        assert_eq!(config.log_level, LevelFilter::Info);
    }

    #[test]
    fn test_overrides() {
        let config = parse(&[
            "chip8-vm",
            "--cycles-per-second",
            "500",
            "--mute",
            "--log-level",
            "trace",
            "--scale",
            "8",
            "maze.ch8",
        ]);

        assert_eq!(config.rom.to_str(), Some("maze.ch8"));
        assert_eq!(config.cycles_per_second, 500);
        assert!(config.mute);
        assert_eq!(config.log_level, LevelFilter::Trace);
    }

    #[test]
    fn test_rejects_zero_cycles() {
        let result = app().get_matches_from_safe(&["chip8-vm", "-c", "0", "pong.ch8"]);

        assert!(result.is_err());
    }
}
