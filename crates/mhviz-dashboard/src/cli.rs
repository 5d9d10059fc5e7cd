#![forbid(unsafe_code)]

//! Command-line argument parsing.
//!
//! Arguments are parsed by hand. Every option has an `MHVIZ_*` environment
//! variable; explicit flags win over the environment.

use std::env;
use std::fmt;
use std::num::NonZeroUsize;
use std::path::PathBuf;
use std::process;

use crate::panels::comparison::DEFAULT_STRIDE;

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Exit status for invalid arguments.
pub const EXIT_USAGE: i32 = 2;

/// Iterations per generated series unless overridden.
pub const DEFAULT_ITERATIONS: u32 = 1000;

pub const HELP_TEXT: &str = "\
mhviz - metaheuristic results dashboard

USAGE:
    mhviz [OPTIONS]

OPTIONS:
    --panel=NAME         Start on a panel: a family id (BPSO, BGSA, Hybrid,
                         BWOA) or 'comparison' (default: first panel)
    --stride=N           Keep every Nth point on comparison charts (default: 20)
    --iterations=N       Iterations per convergence series (default: 1000)
    --inline             Draw in the main screen instead of the alternate screen
    --log-file=PATH      Write logs to PATH (logging is off without it)
    --help, -h           Show this help message
    --version, -V        Show version

KEYBINDINGS:
    1-9              Switch to panel by number
    Tab / Shift-Tab  Cycle through panels
    [ / ]            Previous / next problem instance
    Left / Right     Move the chart cursor
    n                Next info card
    ?                Toggle help overlay
    q / Esc          Quit

ENVIRONMENT VARIABLES:
    MHVIZ_PANEL           Override --panel
    MHVIZ_STRIDE          Override --stride
    MHVIZ_ITERATIONS      Override --iterations
    MHVIZ_NO_ALT_SCREEN   Same as --inline when set to 1
    MHVIZ_LOG_FILE        Override --log-file
    MHVIZ_LOG             Log filter, e.g. 'debug' or 'mhviz_dashboard=trace'";

/// Parsed command-line options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Opts {
    /// Panel to open first, by name.
    pub panel: Option<String>,
    /// Resampling stride for comparison charts.
    pub stride: NonZeroUsize,
    /// Iterations per generated convergence series.
    pub iterations: u32,
    /// Use the alternate screen.
    pub alt_screen: bool,
    pub log_file: Option<PathBuf>,
}

impl Default for Opts {
    fn default() -> Self {
        Self {
            panel: None,
            stride: DEFAULT_STRIDE,
            iterations: DEFAULT_ITERATIONS,
            alt_screen: true,
            log_file: None,
        }
    }
}

/// What the command line asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliAction {
    Run(Opts),
    Help,
    Version,
}

/// A rejected argument or environment value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliError {
    /// A flag or variable had a value that does not parse.
    InvalidValue { name: String, value: String },
    UnknownArgument(String),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidValue { name, value } => write!(f, "Invalid {name} value: {value}"),
            Self::UnknownArgument(arg) => write!(f, "Unknown argument: {arg}"),
        }
    }
}

impl std::error::Error for CliError {}

fn invalid(name: &str, value: &str) -> CliError {
    CliError::InvalidValue {
        name: name.to_string(),
        value: value.to_string(),
    }
}

fn parse_stride(name: &str, value: &str) -> Result<NonZeroUsize, CliError> {
    value.parse().map_err(|_| invalid(name, value))
}

fn parse_iterations(name: &str, value: &str) -> Result<u32, CliError> {
    match value.parse::<u32>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(invalid(name, value)),
    }
}

impl Opts {
    /// Parse the process arguments and environment.
    ///
    /// Prints help or version and exits when asked to; prints the error and
    /// exits with [`EXIT_USAGE`] on invalid input.
    pub fn parse() -> Self {
        let args = env::args().skip(1);
        match Self::parse_from(args, |name| env::var(name).ok()) {
            Ok(CliAction::Run(opts)) => opts,
            Ok(CliAction::Help) => {
                println!("{HELP_TEXT}");
                process::exit(0);
            }
            Ok(CliAction::Version) => {
                println!("mhviz {VERSION}");
                process::exit(0);
            }
            Err(err) => {
                eprintln!("{err}");
                eprintln!("Run with --help for usage information.");
                process::exit(EXIT_USAGE);
            }
        }
    }

    /// Parse `args` (without the program name) with `var` as the environment.
    ///
    /// # Errors
    ///
    /// Returns [`CliError`] for unknown flags and unparsable values, whether
    /// they come from a flag or an environment variable.
    pub fn parse_from<I, F>(args: I, var: F) -> Result<CliAction, CliError>
    where
        I: IntoIterator<Item = String>,
        F: Fn(&str) -> Option<String>,
    {
        let mut opts = Self::default();

        // Environment first; flags below override it.
        if let Some(val) = var("MHVIZ_PANEL") {
            opts.panel = Some(val);
        }
        if let Some(val) = var("MHVIZ_STRIDE") {
            opts.stride = parse_stride("MHVIZ_STRIDE", &val)?;
        }
        if let Some(val) = var("MHVIZ_ITERATIONS") {
            opts.iterations = parse_iterations("MHVIZ_ITERATIONS", &val)?;
        }
        if var("MHVIZ_NO_ALT_SCREEN").is_some_and(|v| v == "1") {
            opts.alt_screen = false;
        }
        if let Some(val) = var("MHVIZ_LOG_FILE") {
            opts.log_file = Some(PathBuf::from(val));
        }

        for arg in args {
            match arg.as_str() {
                "--help" | "-h" => return Ok(CliAction::Help),
                "--version" | "-V" => return Ok(CliAction::Version),
                "--inline" => opts.alt_screen = false,
                other => {
                    if let Some(val) = other.strip_prefix("--panel=") {
                        opts.panel = Some(val.to_string());
                    } else if let Some(val) = other.strip_prefix("--stride=") {
                        opts.stride = parse_stride("--stride", val)?;
                    } else if let Some(val) = other.strip_prefix("--iterations=") {
                        opts.iterations = parse_iterations("--iterations", val)?;
                    } else if let Some(val) = other.strip_prefix("--log-file=") {
                        opts.log_file = Some(PathBuf::from(val));
                    } else {
                        return Err(CliError::UnknownArgument(other.to_string()));
                    }
                }
            }
        }

        Ok(CliAction::Run(opts))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn parse(args: &[&str], env: &[(&str, &str)]) -> Result<CliAction, CliError> {
        let env: HashMap<String, String> = env
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Opts::parse_from(args.iter().map(|s| s.to_string()), |name| env.get(name).cloned())
    }

    fn run(args: &[&str], env: &[(&str, &str)]) -> Opts {
        match parse(args, env) {
            Ok(CliAction::Run(opts)) => opts,
            other => panic!("expected options, got {other:?}"),
        }
    }

    #[test]
    fn default_opts() {
        let opts = Opts::default();
        assert_eq!(opts.panel, None);
        assert_eq!(opts.stride.get(), 20);
        assert_eq!(opts.iterations, 1000);
        assert!(opts.alt_screen);
        assert_eq!(opts.log_file, None);
    }

    #[test]
    fn flags_are_parsed() {
        let opts = run(
            &["--panel=comparison", "--stride=5", "--iterations=200", "--inline", "--log-file=/tmp/m.log"],
            &[],
        );
        assert_eq!(opts.panel.as_deref(), Some("comparison"));
        assert_eq!(opts.stride.get(), 5);
        assert_eq!(opts.iterations, 200);
        assert!(!opts.alt_screen);
        assert_eq!(opts.log_file, Some(PathBuf::from("/tmp/m.log")));
    }

    #[test]
    fn flags_override_environment() {
        let opts = run(&["--stride=3"], &[("MHVIZ_STRIDE", "7"), ("MHVIZ_PANEL", "BGSA")]);
        assert_eq!(opts.stride.get(), 3);
        assert_eq!(opts.panel.as_deref(), Some("BGSA"));
    }

    #[test]
    fn no_alt_screen_needs_one() {
        assert!(run(&[], &[("MHVIZ_NO_ALT_SCREEN", "0")]).alt_screen);
        assert!(!run(&[], &[("MHVIZ_NO_ALT_SCREEN", "1")]).alt_screen);
    }

    #[test]
    fn zero_stride_is_rejected() {
        assert_eq!(
            parse(&["--stride=0"], &[]),
            Err(CliError::InvalidValue {
                name: "--stride".into(),
                value: "0".into()
            })
        );
        assert!(parse(&[], &[("MHVIZ_STRIDE", "abc")]).is_err());
        assert!(parse(&["--iterations=0"], &[]).is_err());
    }

    #[test]
    fn unknown_argument_is_rejected() {
        let err = parse(&["--frobnicate"], &[]).expect_err("unknown flag");
        assert_eq!(err.to_string(), "Unknown argument: --frobnicate");
    }

    #[test]
    fn help_and_version_short_circuit() {
        assert_eq!(parse(&["--stride=4", "-h"], &[]), Ok(CliAction::Help));
        assert_eq!(parse(&["--version"], &[]), Ok(CliAction::Version));
    }

    #[test]
    fn version_string_nonempty() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn help_text_lists_options() {
        assert!(HELP_TEXT.contains("--stride"));
        assert!(HELP_TEXT.contains("MHVIZ_LOG"));
        assert!(HELP_TEXT.contains("comparison"));
    }
}
