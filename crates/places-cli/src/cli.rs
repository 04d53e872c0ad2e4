//! CLI argument definitions for the PLACES client.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

use places_analysis::{DuplicatePolicy, MeasureFilter, PivotLevel, RegionFilter};

#[derive(Parser)]
#[command(
    name = "places",
    version,
    about = "Explore CDC PLACES county health data",
    long_about = "Download, filter, and analyze county-level estimates from the CDC PLACES \
                  datasets.\n\nRequests authenticate with a Socrata application token passed \
                  with --app-token, the PLACES_APP_TOKEN environment variable, or a config file."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[command(flatten)]
    pub connection: ConnectionArgs,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

/// How to reach the API.
#[derive(Args, Debug, Clone, Default)]
pub struct ConnectionArgs {
    /// Socrata application token.
    #[arg(
        long = "app-token",
        env = "PLACES_APP_TOKEN",
        hide_env_values = true,
        global = true
    )]
    pub app_token: Option<String>,

    /// TOML config file with app_token, base_url and timeout_secs.
    #[arg(long = "config", value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Override the API base URL.
    #[arg(long = "base-url", value_name = "URL", global = true)]
    pub base_url: Option<String>,

    /// Request timeout in seconds.
    #[arg(long = "timeout", value_name = "SECONDS", global = true)]
    pub timeout: Option<u64>,
}

#[derive(Subcommand)]
pub enum Command {
    /// List health-outcome and health-risk-behavior measures.
    Measures,

    /// Download county observations for a release.
    County(CountyArgs),

    /// Summary statistics per measure.
    Summarize(SummarizeArgs),

    /// Pearson correlation between two measures across counties.
    Correlate(CorrelateArgs),

    /// One row per location, one column per measure.
    Pivot(PivotArgs),

    /// List supported releases.
    Releases,
}

/// Row filters shared by the data commands.
#[derive(Args, Debug, Clone, Default)]
pub struct FilterArgs {
    /// Keep rows for these state abbreviations (repeatable).
    #[arg(long = "state", value_name = "ABBR")]
    pub states: Vec<String>,

    /// Keep rows for these location ids (repeatable).
    #[arg(long = "county", value_name = "LOCATIONID")]
    pub counties: Vec<String>,

    /// Keep rows for these measure ids (repeatable).
    #[arg(long = "measure-id", value_name = "ID")]
    pub measure_ids: Vec<String>,

    /// Keep rows whose category label matches (repeatable).
    #[arg(long = "category", value_name = "LABEL")]
    pub categories: Vec<String>,

    /// Keep rows whose short question text matches (repeatable).
    #[arg(long = "measure", value_name = "TEXT")]
    pub measures: Vec<String>,
}

impl FilterArgs {
    pub fn measure_filter(&self) -> MeasureFilter {
        MeasureFilter::new()
            .measures(self.measures.iter().cloned())
            .categories(self.categories.iter().cloned())
            .measure_ids(self.measure_ids.iter().cloned())
    }

    pub fn region_filter(&self) -> RegionFilter {
        RegionFilter::new()
            .states(self.states.iter().cloned())
            .counties(self.counties.iter().cloned())
    }
}

#[derive(Parser)]
pub struct CountyArgs {
    /// Release year.
    #[arg(value_name = "RELEASE", default_value = "2025")]
    pub release: String,

    #[command(flatten)]
    pub filters: FilterArgs,

    /// Write every matching row to a CSV file.
    #[arg(long = "output", short = 'o', value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Rows to print when no output file is given.
    #[arg(long = "limit", default_value_t = 20)]
    pub limit: usize,
}

#[derive(Parser)]
pub struct SummarizeArgs {
    /// Release year.
    #[arg(value_name = "RELEASE")]
    pub release: String,

    /// Measure id to summarize (all measures when omitted).
    #[arg(value_name = "MEASURE_ID")]
    pub measure_id: Option<String>,

    #[command(flatten)]
    pub filters: FilterArgs,
}

#[derive(Parser)]
pub struct CorrelateArgs {
    /// Release year.
    #[arg(value_name = "RELEASE")]
    pub release: String,

    /// First measure id.
    #[arg(value_name = "X")]
    pub x: String,

    /// Second measure id.
    #[arg(value_name = "Y")]
    pub y: String,

    #[command(flatten)]
    pub filters: FilterArgs,
}

#[derive(Parser)]
pub struct PivotArgs {
    /// Release year.
    #[arg(value_name = "RELEASE")]
    pub release: String,

    /// Row granularity.
    #[arg(long = "level", value_enum, default_value = "county")]
    pub level: LevelArg,

    /// How to combine several values for the same location and measure.
    #[arg(long = "duplicates", value_enum, default_value = "mean")]
    pub duplicates: DuplicateArg,

    #[command(flatten)]
    pub filters: FilterArgs,

    /// Write the pivot table to a CSV file.
    #[arg(long = "output", short = 'o', value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Rows to print when no output file is given.
    #[arg(long = "limit", default_value_t = 20)]
    pub limit: usize,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum LevelArg {
    County,
    State,
}

impl From<LevelArg> for PivotLevel {
    fn from(level: LevelArg) -> Self {
        match level {
            LevelArg::County => PivotLevel::County,
            LevelArg::State => PivotLevel::State,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
pub enum DuplicateArg {
    Mean,
    Last,
    Error,
}

impl From<DuplicateArg> for DuplicatePolicy {
    fn from(policy: DuplicateArg) -> Self {
        match policy {
            DuplicateArg::Mean => DuplicatePolicy::Mean,
            DuplicateArg::Last => DuplicatePolicy::Last,
            DuplicateArg::Error => DuplicatePolicy::Error,
        }
    }
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_county_filters() {
        let cli = Cli::try_parse_from([
            "places",
            "--app-token",
            "abc",
            "county",
            "2024",
            "--state",
            "CA",
            "--state",
            "NY",
            "--measure-id",
            "CHD",
        ])
        .unwrap();
        assert_eq!(cli.connection.app_token.as_deref(), Some("abc"));
        let Command::County(args) = cli.command else {
            panic!("expected county command");
        };
        assert_eq!(args.release, "2024");
        assert_eq!(args.filters.states, ["CA", "NY"]);
        assert_eq!(
            args.filters.region_filter(),
            RegionFilter::new().states(["CA", "NY"])
        );
        assert_eq!(
            args.filters.measure_filter(),
            MeasureFilter::new().measure_ids(["CHD"])
        );
    }

    #[test]
    fn test_parse_pivot_defaults() {
        let cli = Cli::try_parse_from(["places", "pivot", "2023"]).unwrap();
        let Command::Pivot(args) = cli.command else {
            panic!("expected pivot command");
        };
        assert_eq!(PivotLevel::from(args.level), PivotLevel::County);
        assert_eq!(DuplicatePolicy::from(args.duplicates), DuplicatePolicy::Mean);
        assert_eq!(args.limit, 20);
    }
}
