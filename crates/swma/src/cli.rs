//! Command line arguments.

use clap::{Args, Parser, Subcommand};
use std::{ffi::OsString, path::PathBuf};
use swma_feeds::{schema::FORECAST_KINDS, Mode};

/// Space Weather Monitor: near-real-time space weather feeds as charts.
#[derive(Parser, Debug)]
#[command(name = "swma", author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, global = true, env = "SWMA_CONFIG_PATH")]
    pub config: Option<PathBuf>,

    /// Directory for charts and images
    #[arg(short, long, global = true)]
    pub output_dir: Option<PathBuf>,

    /// More log output; repeat for trace level
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// What to do
    #[command(subcommand)]
    pub command: Command,
}

/// Subcommands.
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// List the available tools
    List,
    /// Run one tool from the registry by name or slug
    Run(RunArgs),
    /// GOES soft X-ray flux chart
    Xrays {
        /// Feed time window
        #[arg(short, long, default_value_t = Mode::OneDay)]
        mode: Mode,
        /// Leave out the flare overlay
        #[arg(long)]
        no_flares: bool,
        /// Chart file, instead of the default name in the output directory
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// GOES integral proton flux chart
    Protons {
        /// Feed time window
        #[arg(short, long, default_value_t = Mode::OneDay)]
        mode: Mode,
        /// Chart file, instead of the default name in the output directory
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// NOAA flare and proton event probabilities
    Forecast {
        /// Forecast kind for the timeline chart
        #[arg(short, long, default_value = "c_class", value_parser = FORECAST_KINDS)]
        timeline: String,
        /// Probability chart file, instead of the default name
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Print the current conditions summary
    Conditions,
}

/// Arguments of `swma run`.
#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct RunArgs {
    /// Tool name or slug, see `swma list`
    pub tool: String,
    /// Feed time window
    #[arg(short, long)]
    pub mode: Option<Mode>,
    /// Leave out the flare overlay
    #[arg(long)]
    pub no_flares: bool,
    /// Forecast kind for the timeline chart
    #[arg(short, long, value_parser = FORECAST_KINDS)]
    pub timeline: Option<String>,
    /// Request images with the PFSS field line overlay
    #[arg(long)]
    pub pfss: bool,
}

/// Rewrites the single-dash `-mode` spelling to `--mode`.
pub fn normalize_args<I>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = OsString>,
{
    args.into_iter()
        .map(|arg| match arg.to_str() {
            Some("-mode") => OsString::from("--mode"),
            Some(value) if value.starts_with("-mode=") => OsString::from(format!("-{value}")),
            _ => arg,
        })
        .collect()
}

impl Cli {
    /// Parses the process arguments after [`normalize_args`].
    pub fn parse_normalized() -> Self {
        Self::parse_from(normalize_args(std::env::args_os()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(normalize_args(args.iter().map(OsString::from))).unwrap()
    }

    #[test]
    fn test_single_dash_mode() {
        let cli = parse(&["swma", "xrays", "-mode", "3-day"]);
        assert_eq!(
            cli.command,
            Command::Xrays {
                mode: Mode::ThreeDay,
                no_flares: false,
                output: None
            }
        );

        let cli = parse(&["swma", "protons", "-mode=6-hour"]);
        assert!(matches!(cli.command, Command::Protons { mode: Mode::SixHour, .. }));
    }

    #[test]
    fn test_run_with_selections() {
        let cli = parse(&["swma", "-vv", "run", "aia", "--pfss", "--output-dir", "/tmp/out"]);
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.output_dir, Some(PathBuf::from("/tmp/out")));
        let Command::Run(run) = cli.command else {
            panic!("expected run");
        };
        assert_eq!(run.tool, "aia");
        assert!(run.pfss);
        assert_eq!(run.mode, None);
    }

    #[test]
    fn test_bad_mode_rejected() {
        let args = normalize_args(["swma", "xrays", "--mode", "2-day"].map(OsString::from));
        assert!(Cli::try_parse_from(args).is_err());
    }

    #[test]
    fn test_unknown_timeline_rejected() {
        let forecast: &[&str] = &["swma", "forecast", "--timeline", "bogus"];
        let run: &[&str] = &["swma", "run", "forecast", "-t", "bogus"];
        for args in [forecast, run] {
            assert!(Cli::try_parse_from(args.iter().copied()).is_err());
        }
        let cli = parse(&["swma", "run", "forecast", "--timeline", "10mev_protons"]);
        let Command::Run(run) = cli.command else {
            panic!("expected run");
        };
        assert_eq!(run.timeline.as_deref(), Some("10mev_protons"));
    }

    #[test]
    fn test_forecast_default_timeline() {
        let cli = parse(&["swma", "forecast"]);
        assert_eq!(
            cli.command,
            Command::Forecast {
                timeline: "c_class".to_string(),
                output: None
            }
        );
    }
}
