//! Tunable constants and command-line settings
//!
//! The library only reads the constants. [`Settings`] is what the binary
//! builds from its arguments.

use crate::errors::LifeError;
use crate::life::Rule;
use std::path::PathBuf;
use std::time::Duration;

/// Undo depth when `--history` is not given
pub const DEFAULT_HISTORY_LENGTH: usize = 100;

/// Number of recent step costs averaged for the render ETA
pub const ETA_WINDOW: usize = 32;

/// Generations rendered ahead by the `r` key
pub const DEFAULT_RENDER_GENERATIONS: usize = 200;

/// Time slice given to the render controller per UI frame
pub const TICK_BUDGET: Duration = Duration::from_millis(8);

/// Delay between generations in play mode
pub const PLAY_INTERVAL: Duration = Duration::from_millis(120);

/// Upper bound on cells a single flood fill may touch
pub const FLOOD_FILL_LIMIT: usize = 4096;

/// Margin added around the live cells to bound a flood fill
pub const FILL_MARGIN: u32 = 8;

/// Settings for one run of the terminal host
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub rule: Rule,
    pub pattern: String,
    pub generations: usize,
    pub history_length: usize,
    /// JSON file exported chains are loaded from and saved to
    pub chains: Option<PathBuf>,
    /// Pipe log output here instead of stderr
    pub log_file: Option<PathBuf>,
    pub show_help: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            rule: Rule::CONWAY,
            pattern: String::from("glider"),
            generations: DEFAULT_RENDER_GENERATIONS,
            history_length: DEFAULT_HISTORY_LENGTH,
            chains: None,
            log_file: None,
            show_help: false,
        }
    }
}

impl Settings {
    /// Parse settings from `std::env::args()` (the first entry is the program name)
    pub fn from_args(args: &[String]) -> Result<Self, LifeError> {
        let mut settings = Settings::default();
        let mut iter = args.iter().skip(1);

        while let Some(arg) = iter.next() {
            match arg.as_str() {
                "-h" | "--help" => settings.show_help = true,
                "--rule" => {
                    settings.rule = Rule::parse(value_for(arg, iter.next())?)?;
                }
                "--pattern" => {
                    settings.pattern = value_for(arg, iter.next())?.to_string();
                }
                "--generations" => {
                    settings.generations = positive_for(arg, iter.next())?;
                }
                "--history" => {
                    settings.history_length = positive_for(arg, iter.next())?;
                }
                "--chains" => {
                    settings.chains = Some(PathBuf::from(value_for(arg, iter.next())?));
                }
                "--log-file" => {
                    settings.log_file = Some(PathBuf::from(value_for(arg, iter.next())?));
                }
                other => {
                    return Err(LifeError::InvalidArgument {
                        message: format!("unknown option '{}'", other),
                    });
                }
            }
        }

        Ok(settings)
    }

    pub fn usage(program_name: &str) -> String {
        format!(
            "Usage: {} [options]\n\n\
             Options:\n  \
             --rule <B3/S23>       Life-like rule in B/S notation\n  \
             --pattern <name>      Starting pattern (see below)\n  \
             --generations <n>     Generations rendered ahead by 'r'\n  \
             --history <n>         Undo depth\n  \
             --chains <file.json>  Load and save rendered chains\n  \
             --log-file <file>     Write log output to a file\n  \
             -h, --help            Show this message\n\n\
             Patterns: {}",
            program_name,
            crate::patterns::names().join(", ")
        )
    }
}

fn value_for<'a>(flag: &str, value: Option<&'a String>) -> Result<&'a str, LifeError> {
    value
        .map(|v| v.as_str())
        .ok_or_else(|| LifeError::InvalidArgument {
            message: format!("{} needs a value", flag),
        })
}

fn positive_for(flag: &str, value: Option<&String>) -> Result<usize, LifeError> {
    let raw = value_for(flag, value)?;
    match raw.parse::<usize>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(LifeError::InvalidArgument {
            message: format!("{} expects a positive integer, got '{}'", flag, raw),
        }),
    }
}
